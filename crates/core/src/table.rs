// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Contracts between the evaluation layer and the batches it reads from and
//! appends to. Implementations own their storage; the evaluation layer only
//! borrows them.

use strata_type::{Blob, DateTime, Result, Type, Value};

use crate::schema::Schema;

/// Row and column addressable, read-only view over one batch of tuples.
///
/// Getters index by `(column, row)` and panic when either is out of range;
/// typed getters return `None` for undefined values and for values of a
/// different type.
pub trait ReadableTable {
	fn schema(&self) -> &Schema;

	fn row_count(&self) -> usize;

	fn get_value(&self, column: usize, row: usize) -> Value;

	fn is_defined(&self, column: usize, row: usize) -> bool {
		self.get_value(column, row).is_defined()
	}

	fn get_boolean(&self, column: usize, row: usize) -> Option<bool> {
		match self.get_value(column, row) {
			Value::Boolean(v) => Some(v),
			_ => None,
		}
	}

	fn get_int4(&self, column: usize, row: usize) -> Option<i32> {
		match self.get_value(column, row) {
			Value::Int4(v) => Some(v),
			_ => None,
		}
	}

	fn get_int8(&self, column: usize, row: usize) -> Option<i64> {
		match self.get_value(column, row) {
			Value::Int8(v) => Some(v),
			_ => None,
		}
	}

	fn get_float4(&self, column: usize, row: usize) -> Option<f32> {
		match self.get_value(column, row) {
			Value::Float4(v) => Some(v),
			_ => None,
		}
	}

	fn get_float8(&self, column: usize, row: usize) -> Option<f64> {
		match self.get_value(column, row) {
			Value::Float8(v) => Some(v),
			_ => None,
		}
	}

	fn get_utf8(&self, column: usize, row: usize) -> Option<String> {
		match self.get_value(column, row) {
			Value::Utf8(v) => Some(v),
			_ => None,
		}
	}

	fn get_datetime(&self, column: usize, row: usize) -> Option<DateTime> {
		match self.get_value(column, row) {
			Value::DateTime(v) => Some(v),
			_ => None,
		}
	}

	fn get_blob(&self, column: usize, row: usize) -> Option<Blob> {
		match self.get_value(column, row) {
			Value::Blob(v) => Some(v),
			_ => None,
		}
	}
}

/// Append-only sink for a single column. Every successful call appends
/// exactly one value.
pub trait WritableColumn {
	fn get_type(&self) -> Type;

	fn push_value(&mut self, value: Value) -> Result<()>;

	fn push_undefined(&mut self);

	fn push_boolean(&mut self, value: bool) -> Result<()> {
		self.push_value(Value::Boolean(value))
	}

	fn push_int4(&mut self, value: i32) -> Result<()> {
		self.push_value(Value::Int4(value))
	}

	fn push_int8(&mut self, value: i64) -> Result<()> {
		self.push_value(Value::Int8(value))
	}

	fn push_float4(&mut self, value: f32) -> Result<()> {
		self.push_value(Value::Float4(value))
	}

	fn push_float8(&mut self, value: f64) -> Result<()> {
		self.push_value(Value::Float8(value))
	}

	fn push_utf8(&mut self, value: impl Into<String>) -> Result<()>
	where
		Self: Sized,
	{
		self.push_value(Value::Utf8(value.into()))
	}

	fn push_datetime(&mut self, value: DateTime) -> Result<()> {
		self.push_value(Value::DateTime(value))
	}

	fn push_blob(&mut self, value: Blob) -> Result<()> {
		self.push_value(Value::Blob(value))
	}
}

/// Append-only sink addressed by column index. Every successful call
/// appends exactly one value to the target column.
pub trait AppendableTable {
	fn schema(&self) -> &Schema;

	fn put_value(&mut self, column: usize, value: Value) -> Result<()>;

	fn put_undefined(&mut self, column: usize) -> Result<()> {
		self.put_value(column, Value::Undefined)
	}

	fn put_boolean(&mut self, column: usize, value: bool) -> Result<()> {
		self.put_value(column, Value::Boolean(value))
	}

	fn put_int4(&mut self, column: usize, value: i32) -> Result<()> {
		self.put_value(column, Value::Int4(value))
	}

	fn put_int8(&mut self, column: usize, value: i64) -> Result<()> {
		self.put_value(column, Value::Int8(value))
	}

	fn put_float4(&mut self, column: usize, value: f32) -> Result<()> {
		self.put_value(column, Value::Float4(value))
	}

	fn put_float8(&mut self, column: usize, value: f64) -> Result<()> {
		self.put_value(column, Value::Float8(value))
	}

	fn put_utf8(&mut self, column: usize, value: impl Into<String>) -> Result<()>
	where
		Self: Sized,
	{
		self.put_value(column, Value::Utf8(value.into()))
	}

	fn put_datetime(&mut self, column: usize, value: DateTime) -> Result<()> {
		self.put_value(column, Value::DateTime(value))
	}

	fn put_blob(&mut self, column: usize, value: Blob) -> Result<()> {
		self.put_value(column, Value::Blob(value))
	}
}
