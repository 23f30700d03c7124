// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	cmp::Ordering,
	ops::{Add, Div, Mul, Rem, Sub},
};

use strata_expression::BinaryOp;
use strata_type::{
	DateTime, Result, Type, Value,
	error::diagnostic::expression::{arithmetic_overflow, division_by_zero, invalid_cast},
	return_error, return_internal_error,
};

fn widen(value: Value, ty: Type) -> Result<Value> {
	let actual = value.get_type();
	match value.widen(ty) {
		Some(value) => Ok(value),
		None => return_internal_error!("cannot widen {:?} to {}", actual, ty),
	}
}

pub(crate) fn arithmetic(op: BinaryOp, left: Value, right: Value, ty: Type, text: &str) -> Result<Value> {
	if !left.is_defined() || !right.is_defined() {
		return Ok(Value::Undefined);
	}

	if ty == Type::Utf8 {
		return match (left, right) {
			(Value::Utf8(l), Value::Utf8(r)) => Ok(Value::Utf8(l + &r)),
			(l, r) => return_internal_error!("cannot concatenate {} and {}", l, r),
		};
	}

	match (widen(left, ty)?, widen(right, ty)?) {
		(Value::Int4(l), Value::Int4(r)) => {
			let result = integer(op, l as i64, r as i64, ty, text)?;
			match i32::try_from(result) {
				Ok(v) => Ok(Value::Int4(v)),
				Err(_) => return_error!(arithmetic_overflow(text, op.symbol(), ty)),
			}
		}
		(Value::Int8(l), Value::Int8(r)) => Ok(Value::Int8(integer(op, l, r, ty, text)?)),
		(Value::Float4(l), Value::Float4(r)) => Ok(Value::Float4(float(op, l, r))),
		(Value::Float8(l), Value::Float8(r)) => Ok(Value::Float8(float(op, l, r))),
		(l, r) => return_internal_error!("{} is not applicable to {} and {}", op.symbol(), l, r),
	}
}

fn integer(op: BinaryOp, l: i64, r: i64, ty: Type, text: &str) -> Result<i64> {
	let result = match op {
		BinaryOp::Add => l.checked_add(r),
		BinaryOp::Sub => l.checked_sub(r),
		BinaryOp::Mul => l.checked_mul(r),
		BinaryOp::Div | BinaryOp::Rem if r == 0 => return_error!(division_by_zero(text)),
		BinaryOp::Div => l.checked_div(r),
		BinaryOp::Rem => l.checked_rem(r),
		_ => return_internal_error!("{} is not an arithmetic operator", op.symbol()),
	};
	match result {
		Some(v) => Ok(v),
		None => return_error!(arithmetic_overflow(text, op.symbol(), ty)),
	}
}

fn float<T>(op: BinaryOp, l: T, r: T) -> T
where
	T: Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T> + Rem<Output = T>,
{
	match op {
		BinaryOp::Add => l + r,
		BinaryOp::Sub => l - r,
		BinaryOp::Mul => l * r,
		BinaryOp::Div => l / r,
		_ => l % r,
	}
}

pub(crate) fn compare(op: BinaryOp, left: Value, right: Value, operand: Type) -> Result<Value> {
	if !left.is_defined() || !right.is_defined() {
		return Ok(Value::Undefined);
	}

	let ordering = match (widen(left, operand)?, widen(right, operand)?) {
		(Value::Boolean(l), Value::Boolean(r)) => l.partial_cmp(&r),
		(Value::Int4(l), Value::Int4(r)) => l.partial_cmp(&r),
		(Value::Int8(l), Value::Int8(r)) => l.partial_cmp(&r),
		(Value::Float4(l), Value::Float4(r)) => l.partial_cmp(&r),
		(Value::Float8(l), Value::Float8(r)) => l.partial_cmp(&r),
		(Value::Utf8(l), Value::Utf8(r)) => l.partial_cmp(&r),
		(Value::DateTime(l), Value::DateTime(r)) => l.partial_cmp(&r),
		(Value::Blob(l), Value::Blob(r)) => l.as_bytes().partial_cmp(r.as_bytes()),
		(l, r) => return_internal_error!("cannot compare {} and {}", l, r),
	};

	// unordered operands (NaN) are only ever unequal
	let result = match (op, ordering) {
		(BinaryOp::NotEqual, None) => true,
		(_, None) => false,
		(BinaryOp::Equal, Some(o)) => o == Ordering::Equal,
		(BinaryOp::NotEqual, Some(o)) => o != Ordering::Equal,
		(BinaryOp::GreaterThan, Some(o)) => o == Ordering::Greater,
		(BinaryOp::GreaterThanEqual, Some(o)) => o != Ordering::Less,
		(BinaryOp::LessThan, Some(o)) => o == Ordering::Less,
		(BinaryOp::LessThanEqual, Some(o)) => o != Ordering::Greater,
		(op, _) => return_internal_error!("{} is not a comparison operator", op.symbol()),
	};
	Ok(Value::Boolean(result))
}

pub(crate) fn logical(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
	match (left, right) {
		(Value::Boolean(l), Value::Boolean(r)) => Ok(Value::Boolean(match op {
			BinaryOp::And => l && r,
			BinaryOp::Or => l || r,
			BinaryOp::Xor => l ^ r,
			_ => return_internal_error!("{} is not a logical operator", op.symbol()),
		})),
		(Value::Undefined, _) | (_, Value::Undefined) => Ok(Value::Undefined),
		(l, r) => return_internal_error!("{} is not applicable to {} and {}", op.symbol(), l, r),
	}
}

pub(crate) fn not(value: Value) -> Result<Value> {
	match value {
		Value::Boolean(v) => Ok(Value::Boolean(!v)),
		Value::Undefined => Ok(Value::Undefined),
		other => return_internal_error!("NOT is not applicable to {}", other),
	}
}

pub(crate) fn negate(value: Value, text: &str) -> Result<Value> {
	match value {
		Value::Int4(v) => match v.checked_neg() {
			Some(v) => Ok(Value::Int4(v)),
			None => return_error!(arithmetic_overflow(text, "-", Type::Int4)),
		},
		Value::Int8(v) => match v.checked_neg() {
			Some(v) => Ok(Value::Int8(v)),
			None => return_error!(arithmetic_overflow(text, "-", Type::Int8)),
		},
		Value::Float4(v) => Ok(Value::Float4(-v)),
		Value::Float8(v) => Ok(Value::Float8(-v)),
		Value::Undefined => Ok(Value::Undefined),
		other => return_internal_error!("negation is not applicable to {}", other),
	}
}

pub(crate) fn cast(value: Value, to: Type, text: &str) -> Result<Value> {
	if !value.is_defined() || value.get_type() == Some(to) {
		return Ok(value);
	}

	let result = match (&value, to) {
		(Value::Utf8(s), _) => parse_text(s, to),
		(v, Type::Utf8) => Some(Value::Utf8(v.to_string())),

		(Value::Int4(v), Type::Int8) => Some(Value::Int8(*v as i64)),
		(Value::Int4(v), Type::Float4) => Some(Value::Float4(*v as f32)),
		(Value::Int4(v), Type::Float8) => Some(Value::Float8(*v as f64)),
		(Value::Int8(v), Type::Int4) => i32::try_from(*v).ok().map(Value::Int4),
		(Value::Int8(v), Type::Float4) => Some(Value::Float4(*v as f32)),
		(Value::Int8(v), Type::Float8) => Some(Value::Float8(*v as f64)),
		(Value::Int8(v), Type::DateTime) => Some(Value::DateTime(DateTime::from_nanos(*v))),

		(Value::Float4(v), Type::Float8) => Some(Value::Float8(*v as f64)),
		(Value::Float8(v), Type::Float4) => Some(Value::Float4(*v as f32)),
		(Value::Float4(v), Type::Int4 | Type::Int8) => float_to_integer(*v as f64, to),
		(Value::Float8(v), Type::Int4 | Type::Int8) => float_to_integer(*v, to),

		(Value::Boolean(v), Type::Int4) => Some(Value::Int4(*v as i32)),
		(Value::Boolean(v), Type::Int8) => Some(Value::Int8(*v as i64)),
		(Value::DateTime(v), Type::Int8) => Some(Value::Int8(v.to_nanos())),
		_ => None,
	};

	match result {
		Some(v) => Ok(v),
		None => return_error!(invalid_cast(text, &value, to)),
	}
}

fn parse_text(text: &str, to: Type) -> Option<Value> {
	let text = text.trim();
	match to {
		Type::Int4 => text.parse().ok().map(Value::Int4),
		Type::Int8 => text.parse().ok().map(Value::Int8),
		Type::Float4 => text.parse().ok().map(Value::Float4),
		Type::Float8 => text.parse().ok().map(Value::Float8),
		Type::Boolean => match text.to_ascii_lowercase().as_str() {
			"true" => Some(Value::Boolean(true)),
			"false" => Some(Value::Boolean(false)),
			_ => None,
		},
		_ => None,
	}
}

/// Truncates toward zero; fails for NaN, infinities and out of range values.
fn float_to_integer(v: f64, to: Type) -> Option<Value> {
	if !v.is_finite() {
		return None;
	}
	let v = v.trunc();
	match to {
		Type::Int4 if v >= i32::MIN as f64 && v <= i32::MAX as f64 => Some(Value::Int4(v as i32)),
		// i64::MAX is not representable, 2^63 is the first value out of range
		Type::Int8 if v >= -9_223_372_036_854_775_808.0 && v < 9_223_372_036_854_775_808.0 => {
			Some(Value::Int8(v as i64))
		}
		_ => None,
	}
}
