// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod display;
mod expr;
pub mod resolve;

pub use expr::{BinaryExpr, BinaryOp, CastExpr, ColumnExpr, Expr, UdfExpr, UnaryOp};
pub use strata_type::Result;
