// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod column;
pub mod compiled;
mod flatten;
mod native;
mod udf;

pub use column::evaluate_column;
pub use flatten::Flattening;
pub use native::NativeEvaluator;
use strata_core::{AppendableTable, ReadableTable, WritableColumn};
use strata_type::{Result, Type, error::diagnostic::internal::internal, err};
pub use udf::UdfEvaluator;

/// Evaluates one input row at a time into an output table.
///
/// Implementations never modify the input and only append to the sinks
/// they are given. A single instance serves one evaluation at a time.
pub trait Evaluator: Send {
	/// One-time preparation. Must be called before [`Evaluator::eval`].
	fn compile(&mut self) -> Result<()>;

	/// Evaluates `row` of `input`, appending the produced values to
	/// `column` of `output`, and returns how many values were appended.
	/// Flattening evaluators also append that number to `count`.
	fn eval(
		&mut self,
		input: &dyn ReadableTable,
		row: usize,
		count: Option<&mut dyn WritableColumn>,
		output: &mut dyn AppendableTable,
		column: usize,
	) -> Result<usize>;

	/// Whether a row can produce any number of values, including none.
	fn is_flattening(&self) -> bool;

	fn output_type(&self) -> Type;

	/// Discards external resources left unusable by a failure.
	fn reset(&mut self) {}
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
	fn compile(&mut self) -> Result<()> {
		(**self).compile()
	}

	fn eval(
		&mut self,
		input: &dyn ReadableTable,
		row: usize,
		count: Option<&mut dyn WritableColumn>,
		output: &mut dyn AppendableTable,
		column: usize,
	) -> Result<usize> {
		(**self).eval(input, row, count, output, column)
	}

	fn is_flattening(&self) -> bool {
		(**self).is_flattening()
	}

	fn output_type(&self) -> Type {
		(**self).output_type()
	}

	fn reset(&mut self) {
		(**self).reset()
	}
}

/// Appends a produced row count to the count sink.
pub(crate) fn push_count(count: Option<&mut dyn WritableColumn>, produced: usize) -> Result<()> {
	let Some(count) = count else {
		return Ok(());
	};
	match i32::try_from(produced) {
		Ok(n) => count.push_int4(n),
		Err(_) => err!(internal(format!("row count {} does not fit INT4", produced))),
	}
}
