// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_core::{ReadableTable, Schema};

/// Compile-time context: the schema column references are resolved against.
pub struct CompileContext<'a> {
	pub schema: &'a Schema,
}

impl<'a> CompileContext<'a> {
	pub fn new(schema: &'a Schema) -> Self {
		Self {
			schema,
		}
	}
}

/// Runtime context passed to `CompiledExpr::execute()`.
pub struct ExecContext<'a> {
	pub table: &'a dyn ReadableTable,
	pub row: usize,
}

impl<'a> ExecContext<'a> {
	pub fn new(table: &'a dyn ReadableTable, row: usize) -> Self {
		Self {
			table,
			row,
		}
	}
}
