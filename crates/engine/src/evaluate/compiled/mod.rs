// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod context;
mod execute;
pub mod expr;

pub use context::{CompileContext, ExecContext};
pub use expr::CompiledExpr;
use strata_expression::{
	BinaryOp, Expr, UnaryOp,
	resolve::{
		binary_result_type, cast_supported, column_type, comparison_operand_type, constant_type,
		unary_result_type,
	},
};
use strata_type::{
	Result, Value,
	error::diagnostic::expression::{nested_udf, unsupported_cast},
	return_error, return_internal_error,
};

/// Compile an `Expr` into a `CompiledExpr`.
///
/// Column references are checked against the schema and every node gets its
/// result type fixed; operands are widened to the promoted type at runtime.
pub fn compile_expression(ctx: &CompileContext, expr: &Expr) -> Result<CompiledExpr> {
	if let Some((op, left, right)) = expr.as_binary() {
		return compile_binary(ctx, expr, op, left, right);
	}

	Ok(match expr {
		Expr::Column(c) => {
			let index = c.index;
			let ty = column_type(ctx.schema, index)?;
			CompiledExpr::new(ty, move |exec| Ok(exec.table.get_value(index, exec.row)))
		}
		Expr::Constant(value) => {
			let ty = constant_type(value)?;
			let value = value.clone();
			CompiledExpr::new(ty, move |_| Ok(value.clone()))
		}
		Expr::Not(inner) => {
			let inner = compile_expression(ctx, inner)?;
			let ty = unary_result_type(UnaryOp::Not, inner.ty())?;
			CompiledExpr::new(ty, move |exec| execute::not(inner.execute(exec)?))
		}
		Expr::Negate(inner) => {
			let inner = compile_expression(ctx, inner)?;
			let ty = unary_result_type(UnaryOp::Negate, inner.ty())?;
			let text = expr.to_string();
			CompiledExpr::new(ty, move |exec| execute::negate(inner.execute(exec)?, &text))
		}
		Expr::Cast(c) => {
			let to = c.to;
			if let Expr::Constant(Value::Undefined) = c.expr.as_ref() {
				return Ok(CompiledExpr::new(to, |_| Ok(Value::Undefined)));
			}
			let inner = compile_expression(ctx, &c.expr)?;
			if !cast_supported(inner.ty(), to) {
				return_error!(unsupported_cast(inner.ty(), to));
			}
			let text = expr.to_string();
			CompiledExpr::new(to, move |exec| execute::cast(inner.execute(exec)?, to, &text))
		}
		Expr::Udf(udf) => return_error!(nested_udf(&udf.name)),
		_ => return_internal_error!("unhandled expression {}", expr),
	})
}

fn compile_binary(ctx: &CompileContext, expr: &Expr, op: BinaryOp, left: &Expr, right: &Expr) -> Result<CompiledExpr> {
	let left = compile_expression(ctx, left)?;
	let right = compile_expression(ctx, right)?;
	let ty = binary_result_type(op, left.ty(), right.ty())?;

	if op.is_arithmetic() {
		let text = expr.to_string();
		return Ok(CompiledExpr::new(ty, move |exec| {
			let l = left.execute(exec)?;
			let r = right.execute(exec)?;
			execute::arithmetic(op, l, r, ty, &text)
		}));
	}

	if op.is_comparison() {
		let operand = match comparison_operand_type(left.ty(), right.ty()) {
			Some(operand) => operand,
			None => return_internal_error!("no common type for {} and {}", left.ty(), right.ty()),
		};
		return Ok(CompiledExpr::new(ty, move |exec| {
			let l = left.execute(exec)?;
			let r = right.execute(exec)?;
			execute::compare(op, l, r, operand)
		}));
	}

	Ok(CompiledExpr::new(ty, move |exec| {
		let l = left.execute(exec)?;
		let r = right.execute(exec)?;
		execute::logical(op, l, r)
	}))
}

#[cfg(test)]
mod tests {
	use strata_core::{Column, ColumnData, Columns, ReadableTable, Schema};
	use strata_expression::{BinaryOp, Expr};
	use strata_type::{
		ErrorKind, Type, Value,
		error::diagnostic::expression::{column_out_of_range, nested_udf, operator_not_applicable},
	};

	use super::{CompileContext, ExecContext, compile_expression};

	fn table() -> Columns {
		Columns::new(vec![
			Column::new("a", ColumnData::int4([6, i32::MAX])),
			Column::new("b", ColumnData::int8([4, 1])),
			Column::new("c", ColumnData::float8([0.5, 2.0])),
			Column::new("s", ColumnData::utf8(["12", "x"])),
			Column::new("z", ColumnData::int4([0, 0])),
		])
	}

	fn eval(expr: Expr, row: usize) -> strata_type::Result<Value> {
		let table = table();
		let schema: Schema = ReadableTable::schema(&table).clone();
		let compiled = compile_expression(&CompileContext::new(&schema), &expr)?;
		compiled.execute(&ExecContext::new(&table, row))
	}

	#[test]
	fn test_promotion() {
		assert_eq!(eval(Expr::add(Expr::column(0), Expr::column(1)), 0).unwrap(), Value::Int8(10));
		assert_eq!(eval(Expr::mul(Expr::column(0), Expr::column(2)), 0).unwrap(), Value::Float8(3.0));
		assert_eq!(eval(Expr::div(Expr::column(0), Expr::constant(4i32)), 0).unwrap(), Value::Int4(1));
	}

	#[test]
	fn test_comparison_across_types() {
		let expr = Expr::binary(BinaryOp::GreaterThan, Expr::column(0), Expr::column(2));
		assert_eq!(eval(expr, 0).unwrap(), Value::Boolean(true));
	}

	#[test]
	fn test_concat() {
		let expr = Expr::add(Expr::column(3), Expr::constant("!"));
		assert_eq!(eval(expr, 1).unwrap(), Value::Utf8("x!".to_string()));
	}

	#[test]
	fn test_division_by_zero() {
		let err = eval(Expr::div(Expr::column(0), Expr::column(4)), 0).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Invocation);
		assert_eq!(err.code, "INVOKE_001");
		assert_eq!(err.statement.as_deref(), Some("($0 / $4)"));
	}

	#[test]
	fn test_overflow() {
		let err = eval(Expr::add(Expr::column(0), Expr::constant(1i32)), 1).unwrap_err();
		assert_eq!(err.code, "INVOKE_002");
	}

	#[test]
	fn test_cast_text() {
		assert_eq!(eval(Expr::cast(Expr::column(3), Type::Int4), 0).unwrap(), Value::Int4(12));
		let err = eval(Expr::cast(Expr::column(3), Type::Int4), 1).unwrap_err();
		assert_eq!(err.code, "INVOKE_003");
	}

	#[test]
	fn test_undefined_propagates() {
		let expr = Expr::add(Expr::column(0), Expr::cast(Expr::constant(Value::Undefined), Type::Int4));
		assert_eq!(eval(expr, 0).unwrap(), Value::Undefined);
	}

	#[test]
	fn test_compile_errors() {
		let err = eval(Expr::column(7), 0).unwrap_err();
		assert_eq!(err.diagnostic(), column_out_of_range(7, 5));

		let err = eval(Expr::sub(Expr::column(3), Expr::column(0)), 0).unwrap_err();
		assert_eq!(err.diagnostic(), operator_not_applicable("-", Type::Utf8, Type::Int4));

		let nested = Expr::add(Expr::udf("f", Expr::column(0), Expr::column(0), Type::Int4), Expr::column(0));
		let err = eval(nested, 0).unwrap_err();
		assert_eq!(err.diagnostic(), nested_udf("f"));
	}
}
