// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod apply;
pub mod context;
pub mod evaluate;
pub mod expression;

pub use apply::{Apply, ApplyConfig, ApplyOutput, RowErrorPolicy};
pub use context::EvaluationContext;
pub use evaluate::{Evaluator, Flattening, NativeEvaluator, UdfEvaluator};
pub use expression::Expression;
pub use strata_type::{Error, Result};
