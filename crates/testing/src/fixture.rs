// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Small input batches used across test suites.

use strata_core::{Column, ColumnData, Columns};
use strata_type::{Type, Value};

/// Two INT4 columns `x` and `y`, one row per pair.
pub fn int4_pairs(rows: &[(i32, i32)]) -> Columns {
	Columns::new(vec![
		Column::new("x", ColumnData::int4(rows.iter().map(|(x, _)| *x))),
		Column::new("y", ColumnData::int4(rows.iter().map(|(_, y)| *y))),
	])
}

/// A single-column batch of `ty` holding `values`.
///
/// Panics if a value does not fit `ty`.
pub fn single(name: &str, ty: Type, values: impl IntoIterator<Item = Value>) -> Columns {
	let data = match ColumnData::from_values(ty, values) {
		Ok(data) => data,
		Err(value) => panic!("{} does not fit a {} column", value, ty),
	};
	Columns::new(vec![Column::new(name, data)])
}

/// An empty batch with one column per `(name, type)`.
pub fn empty(columns: &[(&str, Type)]) -> Columns {
	Columns::new(columns.iter().map(|(name, ty)| Column::empty(*name, *ty)).collect())
}
