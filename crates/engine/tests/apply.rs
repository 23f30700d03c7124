// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_core::{ColumnData, ReadableTable, Schema, SchemaColumn};
use strata_engine::{Apply, ApplyConfig, EvaluationContext, Expression, RowErrorPolicy};
use strata_expression::Expr;
use strata_function::Functions;
use strata_testing::{MockLauncher, Response, fixture::int4_pairs, init_tracing};
use strata_type::{ErrorKind, Type, Value};

fn launcher() -> MockLauncher {
	MockLauncher::new(|row| match (&row[0], &row[1]) {
		(Value::Int4(x), _) if *x < 0 => Response::exception("negative input"),
		(Value::Int4(_), Value::Int4(0)) => Response::values([]),
		(Value::Int4(x), Value::Int4(y)) => Response::values((0..*y).map(|i| Value::Int4(x + i))),
		_ => Response::Hangup,
	})
}

fn apply(launcher: &MockLauncher, config: ApplyConfig) -> Apply {
	let ctx = EvaluationContext::new(
		Functions::builder().with_function("range", b"range".to_vec()).build(),
		Arc::new(launcher.clone()),
	);
	let mut apply = Apply::new(
		vec![
			Expression::new("doubled", Arc::new(Expr::mul(Expr::column(0), Expr::constant(2i32)))),
			Expression::new("range", Arc::new(Expr::udf("range", Expr::column(0), Expr::column(1), Type::Int4))),
		],
		config,
	);
	apply.compile(&ctx, ReadableTable::schema(&int4_pairs(&[]))).unwrap();
	apply
}

#[test]
fn test_output_schema() {
	let apply = apply(&launcher(), ApplyConfig::default());
	assert_eq!(
		apply.output_schema(),
		Some(&Schema::new(vec![SchemaColumn::new("doubled", Type::Int4), SchemaColumn::new("range", Type::Int4)]))
	);
}

#[test]
fn test_apply_counts() {
	init_tracing();
	let launcher = launcher();
	let mut apply = apply(&launcher, ApplyConfig::default());

	let output = apply.apply(&int4_pairs(&[(1, 2), (5, 0), (7, 1)])).unwrap();
	assert_eq!(output.columns.column(0).unwrap().data, ColumnData::int4([2, 10, 14]));
	assert_eq!(output.columns.column(1).unwrap().data, ColumnData::int4([1, 2, 7]));
	assert_eq!(output.counts.column(0).unwrap().data, ColumnData::int4([1, 1, 1]));
	assert_eq!(output.counts.column(1).unwrap().data, ColumnData::int4([2, 0, 1]));
	assert!(output.skipped.is_empty());
	assert_eq!(launcher.launches(), 1);
}

#[test]
fn test_fail_policy_reports_row() {
	let mut apply = apply(&launcher(), ApplyConfig::default());

	let err = apply.apply(&int4_pairs(&[(1, 1), (-1, 1)])).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::RemoteEvaluation);
	assert_eq!(err.message, "negative input");
	assert!(err.notes.iter().any(|note| note == "while evaluating input row 1"));
}

#[test]
fn test_skip_policy_drops_failing_rows() {
	let config = ApplyConfig::default().with_row_error_policy(RowErrorPolicy::Skip);
	let mut apply = apply(&launcher(), config);

	let output = apply.apply(&int4_pairs(&[(1, 1), (-3, 1), (4, 1)])).unwrap();
	assert_eq!(output.skipped, vec![1]);
	// the native column of the skipped row is discarded too
	assert_eq!(output.columns.column(0).unwrap().data, ColumnData::int4([2, 8]));
	assert_eq!(output.columns.column(1).unwrap().data, ColumnData::int4([1, 4]));
	assert_eq!(output.counts.column(1).unwrap().data, ColumnData::int4([1, 1]));
}

#[test]
fn test_skip_policy_still_aborts_on_channel_failure() {
	let launcher = MockLauncher::new(|_| Response::Hangup);
	let config = ApplyConfig::default().with_row_error_policy(RowErrorPolicy::Skip);
	let mut apply = apply(&launcher, config);

	let err = apply.apply(&int4_pairs(&[(1, 1)])).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Channel);
}

#[test]
fn test_apply_before_compile() {
	let mut apply = Apply::new(vec![Expression::new("x", Arc::new(Expr::column(0)))], ApplyConfig::default());
	let err = apply.apply(&int4_pairs(&[(1, 1)])).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[test]
fn test_config_from_json() {
	let config: ApplyConfig = serde_json::from_str(r#"{"on_row_error":"skip"}"#).unwrap();
	assert_eq!(config.on_row_error, RowErrorPolicy::Skip);
	let config: ApplyConfig = serde_json::from_str("{}").unwrap();
	assert_eq!(config, ApplyConfig::default());
}
