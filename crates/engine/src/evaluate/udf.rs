// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_core::{AppendableTable, ReadableTable, Schema, WritableColumn};
use strata_expression::{Expr, UdfExpr, resolve::column_type};
use strata_function::Functions;
use strata_type::{
	Result, Type, WireTag,
	error::diagnostic::{
		expression::{not_compiled, udf_operand_not_column, udf_output_type_unsupported},
		worker::remote_exception,
	},
	return_error, return_internal_error,
};
use strata_worker::{ChannelState, Operand, Registration, Reply, WorkerChannel, WorkerLauncher};
use tracing::{debug, instrument};

use super::{Evaluator, push_count};

#[derive(Debug, Clone, Copy)]
struct Argument {
	index: usize,
	ty: Type,
}

/// Evaluates a two-operand external function by delegating each row to a
/// dedicated worker process.
///
/// The worker is started on the first row, which is also when the function
/// is looked up and registered. A row can yield any number of values.
pub struct UdfEvaluator {
	name: String,
	output: Type,
	output_tag: WireTag,
	arguments: [Argument; 2],
	functions: Functions,
	launcher: Arc<dyn WorkerLauncher>,
	channel: Option<WorkerChannel>,
	compiled: bool,
}

impl UdfEvaluator {
	/// Binds the output type and operand columns of `udf` against `schema`.
	/// Operands must be direct column references.
	pub fn new(udf: &UdfExpr, schema: &Schema, functions: Functions, launcher: Arc<dyn WorkerLauncher>) -> Result<Self> {
		let left = argument(udf, &udf.left, "left", schema)?;
		let right = argument(udf, &udf.right, "right", schema)?;

		let output_tag = match udf.output.wire_tag() {
			Some(tag) => tag,
			None => return_error!(udf_output_type_unsupported(&udf.name, udf.output)),
		};

		Ok(Self {
			name: udf.name.clone(),
			output: udf.output,
			output_tag,
			arguments: [left, right],
			functions,
			launcher,
			channel: None,
			compiled: false,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// State of the worker channel, `None` before the first row.
	pub fn channel_state(&self) -> Option<ChannelState> {
		self.channel.as_ref().map(WorkerChannel::state)
	}

	/// Drops the current worker channel; the next row starts a fresh worker.
	pub fn reset_channel(&mut self) {
		if let Some(mut channel) = self.channel.take() {
			debug!(function = %self.name, state = %channel.state(), "resetting worker channel");
			channel.close();
		}
	}

	fn channel(&mut self) -> Result<&mut WorkerChannel> {
		if self.channel.is_none() {
			// a missing function must not start a worker
			let function = self.functions.resolve(&self.name)?;
			let mut channel = WorkerChannel::new(self.launcher.clone());
			let started = channel
				.start()
				.and_then(|_| channel.register(&Registration::binary(function.payload, self.output_tag)));
			self.channel = Some(channel);
			started?;
		}

		match self.channel.as_mut() {
			Some(channel) => Ok(channel),
			None => return_internal_error!("worker channel missing after start"),
		}
	}

	fn operands(&self, input: &dyn ReadableTable, row: usize) -> Vec<Operand> {
		let mut operands = Vec::with_capacity(2);
		for argument in &self.arguments {
			match argument.ty.wire_tag() {
				Some(tag) => operands.push(Operand::new(tag, input.get_value(argument.index, row))),
				None => debug!(
					function = %self.name,
					column = argument.index,
					ty = %argument.ty,
					"operand type is not transmitted to workers, skipped"
				),
			}
		}
		operands
	}
}

fn argument(udf: &UdfExpr, operand: &Expr, position: &str, schema: &Schema) -> Result<Argument> {
	match operand.as_column() {
		Some(index) => Ok(Argument {
			index,
			ty: column_type(schema, index)?,
		}),
		None => return_error!(udf_operand_not_column(&udf.name, position)),
	}
}

impl Evaluator for UdfEvaluator {
	fn compile(&mut self) -> Result<()> {
		// nothing to generate, registration happens with the first row
		self.compiled = true;
		Ok(())
	}

	#[instrument(name = "evaluate::udf::eval", level = "trace", skip_all, fields(function = %self.name, row = row))]
	fn eval(
		&mut self,
		input: &dyn ReadableTable,
		row: usize,
		count: Option<&mut dyn WritableColumn>,
		output: &mut dyn AppendableTable,
		column: usize,
	) -> Result<usize> {
		if !self.compiled {
			return_error!(not_compiled("external function evaluator"));
		}

		let operands = self.operands(input, row);
		let reply = self.channel()?.call(&operands)?;

		match reply {
			Reply::Values(values) => {
				let produced = values.len();
				for value in values {
					output.put_value(column, value)?;
				}
				push_count(count, produced)?;
				Ok(produced)
			}
			Reply::Exception(message) => return_error!(remote_exception(&self.name, message)),
		}
	}

	fn is_flattening(&self) -> bool {
		true
	}

	fn output_type(&self) -> Type {
		self.output
	}

	fn reset(&mut self) {
		self.reset_channel();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use strata_core::{ReadableTable, Schema};
	use strata_expression::{Expr, UdfExpr};
	use strata_function::Functions;
	use strata_testing::{MockLauncher, Response, fixture::int4_pairs};
	use strata_type::{
		Type,
		error::diagnostic::expression::{udf_operand_not_column, udf_output_type_unsupported},
	};

	use super::UdfEvaluator;

	fn udf(expr: Expr) -> UdfExpr {
		expr.as_udf().unwrap().clone()
	}

	fn schema() -> Schema {
		ReadableTable::schema(&int4_pairs(&[])).clone()
	}

	#[test]
	fn test_operand_must_be_column() {
		let expr = udf(Expr::udf("f", Expr::column(0), Expr::constant(1i32), Type::Int4));
		let err = UdfEvaluator::new(&expr, &schema(), Functions::empty(), Arc::new(MockLauncher::new(|_| Response::Hangup)))
			.err()
			.unwrap();
		assert_eq!(err.diagnostic(), udf_operand_not_column("f", "right"));
	}

	#[test]
	fn test_output_needs_wire_tag() {
		let expr = udf(Expr::udf("f", Expr::column(0), Expr::column(1), Type::Utf8));
		let err = UdfEvaluator::new(&expr, &schema(), Functions::empty(), Arc::new(MockLauncher::new(|_| Response::Hangup)))
			.err()
			.unwrap();
		assert_eq!(err.diagnostic(), udf_output_type_unsupported("f", Type::Utf8));
	}

	#[test]
	fn test_no_channel_before_first_row() {
		let expr = udf(Expr::udf("f", Expr::column(0), Expr::column(1), Type::Int4));
		let launcher = MockLauncher::new(|_| Response::Hangup);
		let evaluator = UdfEvaluator::new(&expr, &schema(), Functions::empty(), Arc::new(launcher.clone())).unwrap();
		assert_eq!(evaluator.channel_state(), None);
		assert_eq!(launcher.launches(), 0);
	}
}
