// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::value::{blob::Blob, datetime::DateTime};

/// The closed set of column and scalar types understood by the evaluation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	/// A boolean: true or false.
	Boolean,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// A 4-byte floating point
	Float4,
	/// An 8-byte floating point
	Float8,
	/// A UTF-8 encoded text.
	Utf8,
	/// A point in time with nanosecond precision
	DateTime,
	/// An opaque byte sequence
	Blob,
}

impl Type {
	pub fn is_number(&self) -> bool {
		self.is_integer() || self.is_floating_point()
	}

	pub fn is_integer(&self) -> bool {
		matches!(self, Type::Int4 | Type::Int8)
	}

	pub fn is_floating_point(&self) -> bool {
		matches!(self, Type::Float4 | Type::Float8)
	}

	pub fn is_bool(&self) -> bool {
		matches!(self, Type::Boolean)
	}

	pub fn is_utf8(&self) -> bool {
		matches!(self, Type::Utf8)
	}

	/// Returns the smallest numeric type both operands can be widened to
	/// without losing precision, or `None` if either side is not a number.
	pub fn promote(left: Type, right: Type) -> Option<Type> {
		if !left.is_number() || !right.is_number() {
			return None;
		}

		Some(match (left, right) {
			(l, r) if l == r => l,
			(l, r) if l.is_integer() && r.is_integer() => Type::Int8,
			// a 4-byte float cannot hold every integer exactly
			_ => Type::Float8,
		})
	}

	/// Whether a value of `self` can be stored in a column of `target`
	/// without loss.
	pub fn widens_to(&self, target: Type) -> bool {
		match (self, target) {
			(l, r) if *l == r => true,
			(Type::Int4, Type::Int8 | Type::Float8) => true,
			(Type::Int8, Type::Float8) => true,
			(Type::Float4, Type::Float8) => true,
			_ => false,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Int4 => f.write_str("INT4"),
			Type::Int8 => f.write_str("INT8"),
			Type::Float4 => f.write_str("FLOAT4"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Utf8 => f.write_str("UTF8"),
			Type::DateTime => f.write_str("DATETIME"),
			Type::Blob => f.write_str("BLOB"),
		}
	}
}

pub trait GetType {
	fn get_type() -> Type;
}

impl GetType for bool {
	fn get_type() -> Type {
		Type::Boolean
	}
}

impl GetType for i32 {
	fn get_type() -> Type {
		Type::Int4
	}
}

impl GetType for i64 {
	fn get_type() -> Type {
		Type::Int8
	}
}

impl GetType for f32 {
	fn get_type() -> Type {
		Type::Float4
	}
}

impl GetType for f64 {
	fn get_type() -> Type {
		Type::Float8
	}
}

impl GetType for String {
	fn get_type() -> Type {
		Type::Utf8
	}
}

impl GetType for DateTime {
	fn get_type() -> Type {
		Type::DateTime
	}
}

impl GetType for Blob {
	fn get_type() -> Type {
		Type::Blob
	}
}
