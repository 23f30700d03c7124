// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub mod blob;
pub mod datetime;
pub mod r#type;
pub mod wire;

use blob::Blob;
use datetime::DateTime;
use r#type::Type;

/// A single scalar value flowing through evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// Value is not defined (think null in common programming languages)
	Undefined,
	/// A boolean: true or false.
	Boolean(bool),
	/// A 4-byte signed integer
	Int4(i32),
	/// An 8-byte signed integer
	Int8(i64),
	/// A 4-byte floating point
	Float4(f32),
	/// An 8-byte floating point
	Float8(f64),
	/// A UTF-8 encoded text.
	Utf8(String),
	/// A point in time
	DateTime(DateTime),
	/// An opaque byte sequence
	Blob(Blob),
}

impl Value {
	/// The type of a defined value; `None` for [`Value::Undefined`].
	pub fn get_type(&self) -> Option<Type> {
		match self {
			Value::Undefined => None,
			Value::Boolean(_) => Some(Type::Boolean),
			Value::Int4(_) => Some(Type::Int4),
			Value::Int8(_) => Some(Type::Int8),
			Value::Float4(_) => Some(Type::Float4),
			Value::Float8(_) => Some(Type::Float8),
			Value::Utf8(_) => Some(Type::Utf8),
			Value::DateTime(_) => Some(Type::DateTime),
			Value::Blob(_) => Some(Type::Blob),
		}
	}

	pub fn is_defined(&self) -> bool {
		!matches!(self, Value::Undefined)
	}

	/// Widens a numeric value into `target` when that is lossless; returns
	/// `None` otherwise. Undefined stays undefined.
	pub fn widen(self, target: Type) -> Option<Value> {
		match (self, target) {
			(Value::Undefined, _) => Some(Value::Undefined),
			(v, t) if v.get_type() == Some(t) => Some(v),
			(Value::Int4(v), Type::Int8) => Some(Value::Int8(v as i64)),
			(Value::Int4(v), Type::Float8) => Some(Value::Float8(v as f64)),
			(Value::Int8(v), Type::Float8) => Some(Value::Float8(v as f64)),
			(Value::Float4(v), Type::Float8) => Some(Value::Float8(v as f64)),
			_ => None,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Boolean(v) => Display::fmt(v, f),
			Value::Int4(v) => Display::fmt(v, f),
			Value::Int8(v) => Display::fmt(v, f),
			Value::Float4(v) => Display::fmt(v, f),
			Value::Float8(v) => Display::fmt(v, f),
			Value::Utf8(v) => write!(f, "'{}'", v),
			Value::DateTime(v) => Display::fmt(v, f),
			Value::Blob(v) => Display::fmt(v, f),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int4(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int8(v)
	}
}

impl From<f32> for Value {
	fn from(v: f32) -> Self {
		Value::Float4(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Float8(v)
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Utf8(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Utf8(v.to_string())
	}
}

impl From<DateTime> for Value {
	fn from(v: DateTime) -> Self {
		Value::DateTime(v)
	}
}

impl From<Blob> for Value {
	fn from(v: Blob) -> Self {
		Value::Blob(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		match v {
			Some(v) => v.into(),
			None => Value::Undefined,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{Type, Value};
	use crate::Blob;

	#[test]
	fn test_get_type() {
		assert_eq!(Value::Int4(1).get_type(), Some(Type::Int4));
		assert_eq!(Value::Blob(Blob::empty()).get_type(), Some(Type::Blob));
		assert_eq!(Value::Undefined.get_type(), None);
	}

	#[test]
	fn test_widen() {
		assert_eq!(Value::Int4(7).widen(Type::Int8), Some(Value::Int8(7)));
		assert_eq!(Value::Float4(1.5).widen(Type::Float8), Some(Value::Float8(1.5)));
		assert_eq!(Value::Undefined.widen(Type::Utf8), Some(Value::Undefined));
		assert_eq!(Value::Int8(7).widen(Type::Int4), None);
		assert_eq!(Value::Utf8("x".into()).widen(Type::Blob), None);
	}

	#[test]
	fn test_from_option() {
		assert_eq!(Value::from(Some(3i32)), Value::Int4(3));
		assert_eq!(Value::from(None::<i64>), Value::Undefined);
	}

	#[test]
	fn test_serde_json() {
		let json = serde_json::to_string(&Value::Int8(42)).unwrap();
		assert_eq!(json, r#"{"Int8":42}"#);
		let back: Value = serde_json::from_str(&json).unwrap();
		assert_eq!(back, Value::Int8(42));
	}
}
