// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Type rules for operator trees.

use strata_core::Schema;
use strata_type::{
	Result, Type, Value,
	error::diagnostic::expression::{
		column_out_of_range, operator_not_applicable, unary_not_applicable, unsupported_cast, untyped_undefined,
	},
	return_error, return_internal_error,
};

use crate::expr::{BinaryOp, Expr, UnaryOp};

impl Expr {
	/// Resolves the type this expression produces against `schema`.
	pub fn output_type(&self, schema: &Schema) -> Result<Type> {
		if let Some((op, left, right)) = self.as_binary() {
			let left = left.output_type(schema)?;
			let right = right.output_type(schema)?;
			return binary_result_type(op, left, right);
		}

		match self {
			Expr::Column(c) => column_type(schema, c.index),
			Expr::Constant(value) => constant_type(value),
			Expr::Not(e) => unary_result_type(UnaryOp::Not, e.output_type(schema)?),
			Expr::Negate(e) => unary_result_type(UnaryOp::Negate, e.output_type(schema)?),
			Expr::Cast(c) => {
				// an undefined constant takes the type it is cast to
				if let Expr::Constant(Value::Undefined) = c.expr.as_ref() {
					return Ok(c.to);
				}
				let from = c.expr.output_type(schema)?;
				if !cast_supported(from, c.to) {
					return_error!(unsupported_cast(from, c.to));
				}
				Ok(c.to)
			}
			Expr::Udf(u) => Ok(u.output),
			_ => return_internal_error!("unhandled expression {}", self),
		}
	}
}

pub fn column_type(schema: &Schema, index: usize) -> Result<Type> {
	match schema.column_type(index) {
		Some(ty) => Ok(ty),
		None => return_error!(column_out_of_range(index, schema.len())),
	}
}

pub fn constant_type(value: &Value) -> Result<Type> {
	match value.get_type() {
		Some(ty) => Ok(ty),
		None => return_error!(untyped_undefined()),
	}
}

/// Result type of `left op right`.
///
/// Arithmetic promotes numeric operands to a common type and `+` also
/// concatenates text. Comparisons require numeric operands or operands of
/// the same type. Logical operators require booleans.
pub fn binary_result_type(op: BinaryOp, left: Type, right: Type) -> Result<Type> {
	let result = if op.is_arithmetic() {
		match Type::promote(left, right) {
			Some(ty) => Some(ty),
			None if op == BinaryOp::Add && left.is_utf8() && right.is_utf8() => Some(Type::Utf8),
			None => None,
		}
	} else if op.is_comparison() {
		if comparison_operand_type(left, right).is_some() {
			Some(Type::Boolean)
		} else {
			None
		}
	} else if left.is_bool() && right.is_bool() {
		Some(Type::Boolean)
	} else {
		None
	};

	match result {
		Some(ty) => Ok(ty),
		None => return_error!(operator_not_applicable(op.symbol(), left, right)),
	}
}

/// The type both sides of a comparison are brought to before comparing.
pub fn comparison_operand_type(left: Type, right: Type) -> Option<Type> {
	match Type::promote(left, right) {
		Some(ty) => Some(ty),
		None if left == right => Some(left),
		None => None,
	}
}

pub fn unary_result_type(op: UnaryOp, operand: Type) -> Result<Type> {
	match (op, operand) {
		(UnaryOp::Not, Type::Boolean) => Ok(Type::Boolean),
		(UnaryOp::Negate, ty) if ty.is_number() => Ok(ty),
		(op, ty) => return_error!(unary_not_applicable(op.symbol(), ty)),
	}
}

pub fn cast_supported(from: Type, to: Type) -> bool {
	if from == to {
		return true;
	}
	match (from, to) {
		(f, t) if f.is_number() && t.is_number() => true,
		(_, Type::Utf8) => true,
		(Type::Utf8, t) => t.is_number() || t.is_bool(),
		(Type::Boolean, t) => t.is_integer(),
		(Type::Int8, Type::DateTime) | (Type::DateTime, Type::Int8) => true,
		_ => false,
	}
}
