// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod column;
pub mod schema;
pub mod table;

pub use column::{Column, ColumnData, Columns, container::Container};
pub use schema::{Schema, SchemaColumn};
pub use strata_type::{Error, Result};
pub use table::{AppendableTable, ReadableTable, WritableColumn};
