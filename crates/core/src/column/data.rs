// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use strata_type::{Blob, DateTime, Type, Value};

use crate::column::container::Container;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
	Boolean(Container<bool>),
	Int4(Container<i32>),
	Int8(Container<i64>),
	Float4(Container<f32>),
	Float8(Container<f64>),
	Utf8(Container<String>),
	DateTime(Container<DateTime>),
	Blob(Container<Blob>),
}

impl ColumnData {
	pub fn with_capacity(ty: Type, capacity: usize) -> Self {
		match ty {
			Type::Boolean => ColumnData::Boolean(Container::with_capacity(capacity)),
			Type::Int4 => ColumnData::Int4(Container::with_capacity(capacity)),
			Type::Int8 => ColumnData::Int8(Container::with_capacity(capacity)),
			Type::Float4 => ColumnData::Float4(Container::with_capacity(capacity)),
			Type::Float8 => ColumnData::Float8(Container::with_capacity(capacity)),
			Type::Utf8 => ColumnData::Utf8(Container::with_capacity(capacity)),
			Type::DateTime => ColumnData::DateTime(Container::with_capacity(capacity)),
			Type::Blob => ColumnData::Blob(Container::with_capacity(capacity)),
		}
	}

	pub fn bool(values: impl IntoIterator<Item = bool>) -> Self {
		ColumnData::Boolean(Container::new(values.into_iter().collect()))
	}

	pub fn int4(values: impl IntoIterator<Item = i32>) -> Self {
		ColumnData::Int4(Container::new(values.into_iter().collect()))
	}

	pub fn int8(values: impl IntoIterator<Item = i64>) -> Self {
		ColumnData::Int8(Container::new(values.into_iter().collect()))
	}

	pub fn float4(values: impl IntoIterator<Item = f32>) -> Self {
		ColumnData::Float4(Container::new(values.into_iter().collect()))
	}

	pub fn float8(values: impl IntoIterator<Item = f64>) -> Self {
		ColumnData::Float8(Container::new(values.into_iter().collect()))
	}

	pub fn utf8<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
		ColumnData::Utf8(Container::new(values.into_iter().map(Into::into).collect()))
	}

	pub fn datetime(values: impl IntoIterator<Item = DateTime>) -> Self {
		ColumnData::DateTime(Container::new(values.into_iter().collect()))
	}

	pub fn blob(values: impl IntoIterator<Item = Blob>) -> Self {
		ColumnData::Blob(Container::new(values.into_iter().collect()))
	}

	/// Builds a column of type `ty` from values, widening where lossless.
	/// Returns the first value that does not fit.
	pub fn from_values(ty: Type, values: impl IntoIterator<Item = Value>) -> Result<Self, Value> {
		let mut result = ColumnData::with_capacity(ty, 0);
		for value in values {
			result.try_push(value)?;
		}
		Ok(result)
	}

	pub fn get_type(&self) -> Type {
		match self {
			ColumnData::Boolean(_) => Type::Boolean,
			ColumnData::Int4(_) => Type::Int4,
			ColumnData::Int8(_) => Type::Int8,
			ColumnData::Float4(_) => Type::Float4,
			ColumnData::Float8(_) => Type::Float8,
			ColumnData::Utf8(_) => Type::Utf8,
			ColumnData::DateTime(_) => Type::DateTime,
			ColumnData::Blob(_) => Type::Blob,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			ColumnData::Boolean(container) => container.len(),
			ColumnData::Int4(container) => container.len(),
			ColumnData::Int8(container) => container.len(),
			ColumnData::Float4(container) => container.len(),
			ColumnData::Float8(container) => container.len(),
			ColumnData::Utf8(container) => container.len(),
			ColumnData::DateTime(container) => container.len(),
			ColumnData::Blob(container) => container.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn is_defined(&self, idx: usize) -> bool {
		match self {
			ColumnData::Boolean(container) => container.is_defined(idx),
			ColumnData::Int4(container) => container.is_defined(idx),
			ColumnData::Int8(container) => container.is_defined(idx),
			ColumnData::Float4(container) => container.is_defined(idx),
			ColumnData::Float8(container) => container.is_defined(idx),
			ColumnData::Utf8(container) => container.is_defined(idx),
			ColumnData::DateTime(container) => container.is_defined(idx),
			ColumnData::Blob(container) => container.is_defined(idx),
		}
	}

	/// The value at `idx`, or [`Value::Undefined`] for undefined slots.
	///
	/// # Panics
	/// If `idx` is out of range.
	pub fn get_value(&self, idx: usize) -> Value {
		assert!(idx < self.len(), "row index {} out of range for column of length {}", idx, self.len());
		match self {
			ColumnData::Boolean(container) => container.get(idx).map(|v| Value::Boolean(*v)),
			ColumnData::Int4(container) => container.get(idx).map(|v| Value::Int4(*v)),
			ColumnData::Int8(container) => container.get(idx).map(|v| Value::Int8(*v)),
			ColumnData::Float4(container) => container.get(idx).map(|v| Value::Float4(*v)),
			ColumnData::Float8(container) => container.get(idx).map(|v| Value::Float8(*v)),
			ColumnData::Utf8(container) => container.get(idx).map(|v| Value::Utf8(v.clone())),
			ColumnData::DateTime(container) => container.get(idx).map(|v| Value::DateTime(*v)),
			ColumnData::Blob(container) => container.get(idx).map(|v| Value::Blob(v.clone())),
		}
		.unwrap_or(Value::Undefined)
	}

	pub fn push_undefined(&mut self) {
		match self {
			ColumnData::Boolean(container) => container.push_undefined(),
			ColumnData::Int4(container) => container.push_undefined(),
			ColumnData::Int8(container) => container.push_undefined(),
			ColumnData::Float4(container) => container.push_undefined(),
			ColumnData::Float8(container) => container.push_undefined(),
			ColumnData::Utf8(container) => container.push_undefined(),
			ColumnData::DateTime(container) => container.push_undefined(),
			ColumnData::Blob(container) => container.push_undefined(),
		}
	}

	/// Appends `value`, widening numeric values losslessly. A value that
	/// does not fit is handed back unchanged.
	pub fn try_push(&mut self, value: Value) -> Result<(), Value> {
		let value = match value.clone().widen(self.get_type()) {
			Some(widened) => widened,
			None => return Err(value),
		};

		match (self, value) {
			(data, Value::Undefined) => data.push_undefined(),
			(ColumnData::Boolean(container), Value::Boolean(v)) => container.push(v),
			(ColumnData::Int4(container), Value::Int4(v)) => container.push(v),
			(ColumnData::Int8(container), Value::Int8(v)) => container.push(v),
			(ColumnData::Float4(container), Value::Float4(v)) => container.push(v),
			(ColumnData::Float8(container), Value::Float8(v)) => container.push(v),
			(ColumnData::Utf8(container), Value::Utf8(v)) => container.push(v),
			(ColumnData::DateTime(container), Value::DateTime(v)) => container.push(v),
			(ColumnData::Blob(container), Value::Blob(v)) => container.push(v),
			(_, value) => return Err(value),
		}
		Ok(())
	}

	/// Appends all values of `other`, which must have the same type.
	pub fn extend(&mut self, other: &ColumnData) -> Result<(), Type> {
		match (self, other) {
			(ColumnData::Boolean(l), ColumnData::Boolean(r)) => l.extend(r),
			(ColumnData::Int4(l), ColumnData::Int4(r)) => l.extend(r),
			(ColumnData::Int8(l), ColumnData::Int8(r)) => l.extend(r),
			(ColumnData::Float4(l), ColumnData::Float4(r)) => l.extend(r),
			(ColumnData::Float8(l), ColumnData::Float8(r)) => l.extend(r),
			(ColumnData::Utf8(l), ColumnData::Utf8(r)) => l.extend(r),
			(ColumnData::DateTime(l), ColumnData::DateTime(r)) => l.extend(r),
			(ColumnData::Blob(l), ColumnData::Blob(r)) => l.extend(r),
			(_, other) => return Err(other.get_type()),
		}
		Ok(())
	}

	pub fn clear(&mut self) {
		match self {
			ColumnData::Boolean(container) => container.clear(),
			ColumnData::Int4(container) => container.clear(),
			ColumnData::Int8(container) => container.clear(),
			ColumnData::Float4(container) => container.clear(),
			ColumnData::Float8(container) => container.clear(),
			ColumnData::Utf8(container) => container.clear(),
			ColumnData::DateTime(container) => container.clear(),
			ColumnData::Blob(container) => container.clear(),
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
		(0..self.len()).map(|idx| self.get_value(idx))
	}
}
