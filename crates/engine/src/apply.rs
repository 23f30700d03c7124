// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Evaluates a list of expressions over every row of a batch.

use serde::{Deserialize, Serialize};
use strata_core::{Column, Columns, ReadableTable, Schema, SchemaColumn, WritableColumn};
use strata_type::{Result, Type, error::diagnostic::expression::not_compiled, return_error};
use tracing::{debug, instrument, warn};

use crate::{context::EvaluationContext, expression::Expression};

/// What to do when evaluating a row fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorPolicy {
	/// Abort the batch.
	#[default]
	Fail,
	/// Drop the row and continue, for failures confined to that row.
	/// Stream, precondition and sink failures still abort.
	Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplyConfig {
	pub on_row_error: RowErrorPolicy,
}

impl ApplyConfig {
	pub fn with_row_error_policy(mut self, policy: RowErrorPolicy) -> Self {
		self.on_row_error = policy;
		self
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutput {
	/// One column per expression. Flattening expressions may contribute
	/// more or fewer values than there are input rows.
	pub columns: Columns,
	/// One INT4 column per expression with the number of values each
	/// committed row produced.
	pub counts: Columns,
	/// Input rows dropped under [`RowErrorPolicy::Skip`].
	pub skipped: Vec<usize>,
}

pub struct Apply {
	expressions: Vec<Expression>,
	config: ApplyConfig,
	output_schema: Option<Schema>,
}

impl Apply {
	pub fn new(expressions: Vec<Expression>, config: ApplyConfig) -> Self {
		Self {
			expressions,
			config,
			output_schema: None,
		}
	}

	pub fn expressions(&self) -> &[Expression] {
		&self.expressions
	}

	pub fn expressions_mut(&mut self) -> &mut [Expression] {
		&mut self.expressions
	}

	/// Schema of [`ApplyOutput::columns`], known after compile.
	pub fn output_schema(&self) -> Option<&Schema> {
		self.output_schema.as_ref()
	}

	pub fn compile(&mut self, ctx: &EvaluationContext, schema: &Schema) -> Result<()> {
		let mut output = Schema::empty();
		for expression in &mut self.expressions {
			expression.compile(ctx, schema)?;
			output.push(SchemaColumn::new(expression.output_name(), expression.output_type(schema)?));
		}
		self.output_schema = Some(output);
		Ok(())
	}

	/// Evaluates every expression for each row of `input`, in row order.
	///
	/// A row is committed only after all expressions evaluated it, so a
	/// failing row leaves nothing behind in the output.
	#[instrument(name = "apply", level = "debug", skip_all, fields(rows = input.row_count()))]
	pub fn apply(&mut self, input: &dyn ReadableTable) -> Result<ApplyOutput> {
		let Some(schema) = self.output_schema.clone() else {
			return_error!(not_compiled("apply"));
		};

		let mut columns = Columns::empty(schema.clone());
		let mut counts = Columns::new(
			self.expressions.iter().map(|e| Column::empty(e.output_name(), Type::Int4)).collect(),
		);
		let mut scratch = Columns::empty(schema);
		let mut produced = vec![0usize; self.expressions.len()];
		let mut skipped = Vec::new();

		for row in 0..input.row_count() {
			scratch.clear();

			if let Err(err) = self.eval_row(input, row, &mut scratch, &mut produced) {
				if self.config.on_row_error == RowErrorPolicy::Skip && err.kind().is_row_local() {
					warn!(row, code = %err.code, message = %err.message, "skipping row");
					skipped.push(row);
					continue;
				}
				return Err(err.with_note(format!("while evaluating input row {}", row)));
			}

			columns.append_columns(&scratch)?;
			for (index, n) in produced.iter().enumerate() {
				if let Some(column) = counts.column_mut(index) {
					column.push_int4(*n as i32)?;
				}
			}
		}

		debug!(skipped = skipped.len(), "applied expressions");
		Ok(ApplyOutput {
			columns,
			counts,
			skipped,
		})
	}

	fn eval_row(
		&mut self,
		input: &dyn ReadableTable,
		row: usize,
		scratch: &mut Columns,
		produced: &mut [usize],
	) -> Result<()> {
		for (index, expression) in self.expressions.iter_mut().enumerate() {
			produced[index] = expression.eval(input, row, None, scratch, index)?;
		}
		Ok(())
	}
}
