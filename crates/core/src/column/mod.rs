// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod container;
mod data;

pub use data::ColumnData;
use strata_type::{
	Result, Type, Value,
	error::diagnostic::column::{column_index_out_of_range, column_type_mismatch},
	return_error,
};

use crate::{
	schema::{Schema, SchemaColumn},
	table::{AppendableTable, ReadableTable, WritableColumn},
};

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
	pub name: String,
	pub data: ColumnData,
}

impl Column {
	pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
		Self {
			name: name.into(),
			data,
		}
	}

	pub fn empty(name: impl Into<String>, ty: Type) -> Self {
		Self::new(name, ColumnData::with_capacity(ty, 0))
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}
}

impl WritableColumn for Column {
	fn get_type(&self) -> Type {
		self.data.get_type()
	}

	fn push_value(&mut self, value: Value) -> Result<()> {
		match self.data.try_push(value) {
			Ok(()) => Ok(()),
			Err(rejected) => {
				// only defined values can be rejected
				let actual = rejected.get_type().unwrap_or(self.data.get_type());
				return_error!(column_type_mismatch(&self.name, self.data.get_type(), actual))
			}
		}
	}

	fn push_undefined(&mut self) {
		self.data.push_undefined();
	}
}

/// An in-memory columnar batch. Readable when all columns have the same
/// length; appendable column by column.
#[derive(Clone, Debug, PartialEq)]
pub struct Columns {
	schema: Schema,
	columns: Vec<Column>,
}

impl Columns {
	pub fn new(columns: Vec<Column>) -> Self {
		let schema = Schema::new(columns.iter().map(|c| SchemaColumn::new(c.name.clone(), c.data.get_type())).collect());
		Self {
			schema,
			columns,
		}
	}

	/// An empty batch with one column per schema entry.
	pub fn empty(schema: Schema) -> Self {
		let columns = schema.iter().map(|c| Column::empty(c.name.clone(), c.ty)).collect();
		Self {
			schema,
			columns,
		}
	}

	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	pub fn column(&self, index: usize) -> Option<&Column> {
		self.columns.get(index)
	}

	pub fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
		self.columns.get_mut(index)
	}

	pub fn column_by_name(&self, name: &str) -> Option<&Column> {
		self.columns.iter().find(|c| c.name == name)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Column> {
		self.columns.iter()
	}

	pub fn into_columns(self) -> Vec<Column> {
		self.columns
	}

	/// Appends every column of `other` to the matching column of `self`.
	/// Both batches must share the same schema.
	pub fn append_columns(&mut self, other: &Columns) -> Result<()> {
		if other.columns.len() != self.columns.len() {
			return_error!(column_index_out_of_range(other.columns.len(), self.columns.len()));
		}

		for (target, source) in self.columns.iter_mut().zip(other.columns.iter()) {
			if let Err(actual) = target.data.extend(&source.data) {
				return_error!(column_type_mismatch(&target.name, target.data.get_type(), actual));
			}
		}
		Ok(())
	}

	/// Removes all values, keeping the columns.
	pub fn clear(&mut self) {
		for column in &mut self.columns {
			column.data.clear();
		}
	}
}

impl ReadableTable for Columns {
	fn schema(&self) -> &Schema {
		&self.schema
	}

	fn row_count(&self) -> usize {
		self.columns.first().map_or(0, Column::len)
	}

	fn get_value(&self, column: usize, row: usize) -> Value {
		self.columns[column].data.get_value(row)
	}
}

impl AppendableTable for Columns {
	fn schema(&self) -> &Schema {
		&self.schema
	}

	fn put_value(&mut self, column: usize, value: Value) -> Result<()> {
		let count = self.columns.len();
		match self.columns.get_mut(column) {
			Some(target) => target.push_value(value),
			None => return_error!(column_index_out_of_range(column, count)),
		}
	}
}
