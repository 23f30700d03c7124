// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_core::{AppendableTable, ColumnData, ReadableTable, Schema, WritableColumn};
use strata_expression::Expr;
use strata_type::{Result, Type, error::diagnostic::expression::not_compiled, return_error, return_internal_error};
use tracing::debug;

use super::{
	Evaluator,
	column::evaluate_column,
	compiled::{CompileContext, CompiledExpr, ExecContext, compile_expression},
};

/// Evaluates an operator tree in-process. Produces exactly one value per row.
pub struct NativeEvaluator {
	expr: Arc<Expr>,
	schema: Schema,
	output: Type,
	compiled: Option<CompiledExpr>,
}

impl NativeEvaluator {
	pub fn new(expr: Arc<Expr>, schema: Schema, output: Type) -> Self {
		Self {
			expr,
			schema,
			output,
			compiled: None,
		}
	}

	/// Evaluates all rows of `table` at once.
	pub fn evaluate_column(&self, table: &dyn ReadableTable) -> Result<ColumnData> {
		evaluate_column(self.compiled()?, table)
	}

	fn compiled(&self) -> Result<&CompiledExpr> {
		match &self.compiled {
			Some(compiled) => Ok(compiled),
			None => return_error!(not_compiled("native evaluator")),
		}
	}
}

impl Evaluator for NativeEvaluator {
	fn compile(&mut self) -> Result<()> {
		let compiled = compile_expression(&CompileContext::new(&self.schema), &self.expr)?;
		if compiled.ty() != self.output {
			return_internal_error!("compiled type {} differs from resolved type {}", compiled.ty(), self.output);
		}
		debug!(expr = %self.expr, ty = %self.output, "compiled native expression");
		self.compiled = Some(compiled);
		Ok(())
	}

	fn eval(
		&mut self,
		input: &dyn ReadableTable,
		row: usize,
		_count: Option<&mut dyn WritableColumn>,
		output: &mut dyn AppendableTable,
		column: usize,
	) -> Result<usize> {
		let value = self.compiled()?.execute(&ExecContext::new(input, row))?;
		output.put_value(column, value)?;
		Ok(1)
	}

	fn is_flattening(&self) -> bool {
		false
	}

	fn output_type(&self) -> Type {
		self.output
	}
}
