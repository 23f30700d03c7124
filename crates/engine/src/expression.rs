// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_core::{AppendableTable, Columns, ReadableTable, Schema, SchemaColumn, WritableColumn};
use strata_expression::Expr;
use strata_type::{
	ErrorKind, Result, Type, Value,
	error::diagnostic::expression::{compilation_failed, input_schema_mismatch, not_compiled, not_scalar},
	return_error, return_internal_error,
};
use tracing::{debug, instrument};

use crate::{
	context::EvaluationContext,
	evaluate::{Evaluator, Flattening, NativeEvaluator, UdfEvaluator},
};

/// A named output computed per input row from a shared operator tree.
///
/// `compile` must be called once with the input schema before rows are
/// evaluated. An external function at the root of the tree is evaluated by a
/// worker process; anything else is compiled and evaluated in-process.
pub struct Expression {
	output_name: String,
	expr: Arc<Expr>,
	flatten: bool,
	source: Option<String>,
	schema: Option<Schema>,
	evaluator: Option<Box<dyn Evaluator>>,
}

impl Expression {
	pub fn new(output_name: impl Into<String>, expr: Arc<Expr>) -> Self {
		Self {
			output_name: output_name.into(),
			expr,
			flatten: false,
			source: None,
			schema: None,
			evaluator: None,
		}
	}

	/// Like [`Expression::new`], but always evaluated in flattening mode so
	/// every row also reports its count.
	pub fn flattening(output_name: impl Into<String>, expr: Arc<Expr>) -> Self {
		Self {
			flatten: true,
			..Self::new(output_name, expr)
		}
	}

	pub fn output_name(&self) -> &str {
		&self.output_name
	}

	pub fn expr(&self) -> &Arc<Expr> {
		&self.expr
	}

	/// Readable text of the operator tree, available once compiled.
	pub fn source(&self) -> Option<&str> {
		self.source.as_deref()
	}

	pub fn output_type(&self, schema: &Schema) -> Result<Type> {
		self.expr.output_type(schema)
	}

	pub fn is_compiled(&self) -> bool {
		self.evaluator.is_some()
	}

	pub fn is_flattening(&self) -> bool {
		match &self.evaluator {
			Some(evaluator) => evaluator.is_flattening(),
			None => self.flatten || self.expr.as_udf().is_some(),
		}
	}

	/// Builds and prepares the evaluator for rows of `schema`. Every
	/// failure is reported as a compilation error naming the expression,
	/// except a missing function, which is only detected on the first row.
	#[instrument(name = "expression::compile", level = "debug", skip_all, fields(name = %self.output_name))]
	pub fn compile(&mut self, ctx: &EvaluationContext, schema: &Schema) -> Result<()> {
		let source = self.expr.to_string();

		let evaluator = match self.build(ctx, schema) {
			Ok(evaluator) => evaluator,
			Err(err) if err.kind() == ErrorKind::Compilation => {
				return_error!(compilation_failed(source, err.diagnostic()))
			}
			Err(err) => return Err(err),
		};

		debug!(source = %source, flattening = evaluator.is_flattening(), "compiled expression");
		self.evaluator = Some(evaluator);
		self.source = Some(source);
		self.schema = Some(schema.clone());
		Ok(())
	}

	fn build(&self, ctx: &EvaluationContext, schema: &Schema) -> Result<Box<dyn Evaluator>> {
		let output = self.expr.output_type(schema)?;

		let mut evaluator: Box<dyn Evaluator> = match self.expr.as_udf() {
			Some(udf) => Box::new(UdfEvaluator::new(udf, schema, ctx.functions.clone(), ctx.launcher.clone())?),
			None => {
				let native = NativeEvaluator::new(self.expr.clone(), schema.clone(), output);
				if self.flatten {
					Box::new(Flattening::new(native))
				} else {
					Box::new(native)
				}
			}
		};

		evaluator.compile()?;
		Ok(evaluator)
	}

	/// Evaluates `row` of `table`, appending to `column` of `output` and,
	/// for flattening expressions, the produced count to `count`. Returns
	/// the number of values appended.
	pub fn eval(
		&mut self,
		table: &dyn ReadableTable,
		row: usize,
		count: Option<&mut dyn WritableColumn>,
		output: &mut dyn AppendableTable,
		column: usize,
	) -> Result<usize> {
		let Some(evaluator) = self.evaluator.as_mut() else {
			return_error!(not_compiled(&format!("expression {}", self.output_name)));
		};
		if let Some(schema) = &self.schema {
			if !same_column_types(schema, table.schema()) {
				return_error!(input_schema_mismatch(schema.to_string(), table.schema().to_string()));
			}
		}
		if row >= table.row_count() {
			return_internal_error!("row {} out of range for a table of {} rows", row, table.row_count());
		}
		evaluator.eval(table, row, count, output, column)
	}

	/// Evaluates `row` to a single value. Only for non-flattening expressions.
	pub fn eval_value(&mut self, table: &dyn ReadableTable, row: usize) -> Result<Value> {
		let ty = match &self.evaluator {
			Some(evaluator) if evaluator.is_flattening() => {
				return_error!(not_scalar(self.source.clone().unwrap_or_default()))
			}
			Some(evaluator) => evaluator.output_type(),
			None => return_error!(not_compiled(&format!("expression {}", self.output_name))),
		};

		let mut scratch = Columns::empty(Schema::new(vec![SchemaColumn::new(self.output_name.clone(), ty)]));
		self.eval(table, row, None, &mut scratch, 0)?;
		Ok(scratch.get_value(0, 0))
	}

	/// Releases a failed worker so the next row starts a fresh one. Has no
	/// effect on in-process expressions.
	pub fn reset(&mut self) {
		if let Some(evaluator) = self.evaluator.as_mut() {
			evaluator.reset();
		}
	}
}

// columns are addressed by index, so names may differ
fn same_column_types(compiled: &Schema, actual: &Schema) -> bool {
	compiled.len() == actual.len() && compiled.iter().zip(actual.iter()).all(|(c, a)| c.ty == a.ty)
}
