// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod loader;
pub mod registry;

pub use loader::{load_functions_from_dir, register_functions_from_dir};
pub use registry::{FunctionDef, Functions, FunctionsBuilder};
