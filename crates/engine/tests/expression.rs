// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_core::{Column, ColumnData, Columns, ReadableTable};
use strata_engine::{EvaluationContext, Expression};
use strata_expression::Expr;
use strata_function::Functions;
use strata_testing::{
	MockLauncher, Response,
	fixture::{empty, int4_pairs, single},
	init_tracing,
};
use strata_type::{ErrorKind, Type, Value};

fn ctx() -> EvaluationContext {
	EvaluationContext::new(Functions::empty(), Arc::new(MockLauncher::new(|_| Response::Hangup)))
}

#[test]
fn test_native_rows() {
	init_tracing();
	let input = int4_pairs(&[(2, 3), (0, 0), (-1, 5)]);
	let mut expression = Expression::new("sum", Arc::new(Expr::add(Expr::column(0), Expr::column(1))));
	expression.compile(&ctx(), ReadableTable::schema(&input)).unwrap();

	assert!(expression.is_compiled());
	assert!(!expression.is_flattening());
	assert_eq!(expression.source(), Some(expression.expr().to_string().as_str()));

	let mut output = empty(&[("sum", Type::Int4)]);
	for row in 0..3 {
		assert_eq!(expression.eval(&input, row, None, &mut output, 0).unwrap(), 1);
	}
	assert_eq!(output.column(0).unwrap().data, ColumnData::int4([5, 0, 4]));
}

#[test]
fn test_flattening_native_reports_counts() {
	let input = int4_pairs(&[(1, 1), (2, 2)]);
	let mut expression =
		Expression::flattening("product", Arc::new(Expr::mul(Expr::column(0), Expr::column(1))));
	expression.compile(&ctx(), ReadableTable::schema(&input)).unwrap();
	assert!(expression.is_flattening());

	let mut output = empty(&[("product", Type::Int4)]);
	let mut count = Column::empty("count", Type::Int4);
	for row in 0..2 {
		expression.eval(&input, row, Some(&mut count), &mut output, 0).unwrap();
	}
	assert_eq!(output.column(0).unwrap().data, ColumnData::int4([1, 4]));
	assert_eq!(count.data, ColumnData::int4([1, 1]));

	let err = expression.eval_value(&input, 0).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[test]
fn test_eval_value() {
	let input = single("n", Type::Int8, [Value::Int8(40), Value::Undefined]);
	let expr = Expr::cast(Expr::add(Expr::column(0), Expr::constant(2i64)), Type::Utf8);
	let mut expression = Expression::new("text", Arc::new(expr));
	expression.compile(&ctx(), ReadableTable::schema(&input)).unwrap();

	assert_eq!(expression.eval_value(&input, 0).unwrap(), Value::Utf8("42".to_string()));
	assert_eq!(expression.eval_value(&input, 1).unwrap(), Value::Undefined);
}

#[test]
fn test_compile_error_names_expression() {
	let input = single("name", Type::Utf8, [Value::from("a")]);
	let mut expression = Expression::new("bad", Arc::new(Expr::sub(Expr::column(0), Expr::constant(1i32))));

	let err = expression.compile(&ctx(), ReadableTable::schema(&input)).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Compilation);
	assert_eq!(err.code, "COMPILE_001");
	assert_eq!(err.cause.as_ref().map(|cause| cause.code.as_str()), Some("COMPILE_003"));
	assert!(!expression.is_compiled());
}

#[test]
fn test_column_out_of_range() {
	let input = int4_pairs(&[(1, 2)]);
	let mut expression = Expression::new("oops", Arc::new(Expr::column(5)));

	let err = expression.compile(&ctx(), ReadableTable::schema(&input)).unwrap_err();
	assert_eq!(err.code, "COMPILE_001");
	assert_eq!(err.cause.as_ref().map(|cause| cause.code.as_str()), Some("COMPILE_002"));
}

#[test]
fn test_udf_operand_must_be_column() {
	let input = int4_pairs(&[(1, 2)]);
	let expr = Expr::udf("add", Expr::column(0), Expr::constant(1i32), Type::Int4);
	let mut expression = Expression::new("out", Arc::new(expr));

	let err = expression.compile(&ctx(), ReadableTable::schema(&input)).unwrap_err();
	assert_eq!(err.cause.as_ref().map(|cause| cause.code.as_str()), Some("COMPILE_006"));
}

#[test]
fn test_udf_output_without_wire_type() {
	let input = int4_pairs(&[(1, 2)]);
	let expr = Expr::udf("add", Expr::column(0), Expr::column(1), Type::Utf8);
	let mut expression = Expression::new("out", Arc::new(expr));

	let err = expression.compile(&ctx(), ReadableTable::schema(&input)).unwrap_err();
	assert_eq!(err.cause.as_ref().map(|cause| cause.code.as_str()), Some("COMPILE_007"));
}

#[test]
fn test_invocation_errors() {
	let input = int4_pairs(&[(i32::MAX, 1), (7, 0)]);
	let schema = ReadableTable::schema(&input).clone();

	let mut sum = Expression::new("sum", Arc::new(Expr::add(Expr::column(0), Expr::column(1))));
	sum.compile(&ctx(), &schema).unwrap();
	let err = sum.eval_value(&input, 0).unwrap_err();
	assert_eq!(err.code, "INVOKE_002");
	assert!(err.kind().is_row_local());

	let mut quotient = Expression::new("quotient", Arc::new(Expr::div(Expr::column(0), Expr::column(1))));
	quotient.compile(&ctx(), &schema).unwrap();
	let err = quotient.eval_value(&input, 1).unwrap_err();
	assert_eq!(err.code, "INVOKE_001");
	assert_eq!(err.kind(), ErrorKind::Invocation);
}

#[test]
fn test_row_out_of_range() {
	let input = int4_pairs(&[(1, 2)]);
	let mut expression = Expression::new("x", Arc::new(Expr::column(0)));
	expression.compile(&ctx(), ReadableTable::schema(&input)).unwrap();

	let mut output = empty(&[("x", Type::Int4)]);
	let err = expression.eval(&input, 1, None, &mut output, 0).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Internal);
	assert_eq!(output.column(0).unwrap().len(), 0);
}

#[test]
fn test_input_unchanged() {
	let input = Columns::new(vec![
		Column::new("a", ColumnData::float8([1.5, -2.0])),
		Column::new("b", ColumnData::int4([2, 4])),
	]);
	let before = input.clone();

	let expr = Expr::mul(Expr::column(0), Expr::column(1));
	let mut expression = Expression::new("m", Arc::new(expr));
	expression.compile(&ctx(), ReadableTable::schema(&input)).unwrap();

	let mut output = empty(&[("m", Type::Float8)]);
	for row in 0..2 {
		expression.eval(&input, row, None, &mut output, 0).unwrap();
	}
	assert_eq!(output.column(0).unwrap().data, ColumnData::float8([3.0, -8.0]));
	assert_eq!(input, before);
}

#[test]
fn test_table_shape_must_match_compiled_schema() {
	let compiled_for = int4_pairs(&[(1, 2)]);
	let mut expression = Expression::new("sum", Arc::new(Expr::add(Expr::column(0), Expr::column(1))));
	expression.compile(&ctx(), ReadableTable::schema(&compiled_for)).unwrap();
	let mut output = empty(&[("sum", Type::Int4)]);

	let narrower = single("x", Type::Int4, [Value::Int4(1)]);
	let err = expression.eval(&narrower, 0, None, &mut output, 0).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Precondition);
	assert_eq!(err.code, "PRECONDITION_004");

	let retyped = Columns::new(vec![
		Column::new("x", ColumnData::int4([1])),
		Column::new("y", ColumnData::utf8(["2"])),
	]);
	let err = expression.eval(&retyped, 0, None, &mut output, 0).unwrap_err();
	assert_eq!(err.code, "PRECONDITION_004");
	assert_eq!(output.column(0).unwrap().len(), 0);

	// column names do not take part in the check
	let renamed = Columns::new(vec![Column::new("a", ColumnData::int4([4])), Column::new("b", ColumnData::int4([5]))]);
	expression.eval(&renamed, 0, None, &mut output, 0).unwrap();
	assert_eq!(output.column(0).unwrap().data, ColumnData::int4([9]));
}
