// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_core::{ColumnData, ReadableTable};
use strata_type::{Result, return_internal_error};
use tracing::instrument;

use super::compiled::{CompiledExpr, ExecContext};

/// Evaluates `compiled` for every row of `table` into a single column.
#[instrument(name = "evaluate::column", level = "trace", skip_all, fields(rows = table.row_count()))]
pub fn evaluate_column(compiled: &CompiledExpr, table: &dyn ReadableTable) -> Result<ColumnData> {
	let rows = table.row_count();
	let mut data = ColumnData::with_capacity(compiled.ty(), rows);

	for row in 0..rows {
		let value = compiled.execute(&ExecContext::new(table, row))?;
		if let Err(value) = data.try_push(value) {
			return_internal_error!("{} does not fit a {} column", value, compiled.ty());
		}
	}

	Ok(data)
}
