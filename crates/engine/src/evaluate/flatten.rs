// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_core::{AppendableTable, ReadableTable, WritableColumn};
use strata_type::{Result, Type};

use super::{Evaluator, push_count};

/// Presents any evaluator as a flattening one: after each row the number of
/// values the inner evaluator appended is written to the count sink.
pub struct Flattening<E> {
	inner: E,
}

impl<E: Evaluator> Flattening<E> {
	pub fn new(inner: E) -> Self {
		Self {
			inner,
		}
	}

	pub fn inner(&self) -> &E {
		&self.inner
	}

	pub fn into_inner(self) -> E {
		self.inner
	}
}

impl<E: Evaluator> Evaluator for Flattening<E> {
	fn compile(&mut self) -> Result<()> {
		self.inner.compile()
	}

	fn eval(
		&mut self,
		input: &dyn ReadableTable,
		row: usize,
		count: Option<&mut dyn WritableColumn>,
		output: &mut dyn AppendableTable,
		column: usize,
	) -> Result<usize> {
		let produced = self.inner.eval(input, row, None, output, column)?;
		push_count(count, produced)?;
		Ok(produced)
	}

	fn is_flattening(&self) -> bool {
		true
	}

	fn output_type(&self) -> Type {
		self.inner.output_type()
	}

	fn reset(&mut self) {
		self.inner.reset()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use strata_core::{Column, ReadableTable, Schema};
	use strata_expression::Expr;
	use strata_testing::fixture::{empty, int4_pairs};
	use strata_type::{Type, Value};

	use super::Flattening;
	use crate::evaluate::{Evaluator, NativeEvaluator};

	#[test]
	fn test_reports_one_per_row() {
		let input = int4_pairs(&[(1, 1), (2, 2)]);
		let schema: Schema = ReadableTable::schema(&input).clone();
		let mut evaluator =
			Flattening::new(NativeEvaluator::new(Arc::new(Expr::sub(Expr::column(0), Expr::column(1))), schema, Type::Int4));
		evaluator.compile().unwrap();
		assert!(evaluator.is_flattening());

		let mut output = empty(&[("diff", Type::Int4)]);
		let mut count = Column::empty("count", Type::Int4);
		for row in 0..2 {
			assert_eq!(evaluator.eval(&input, row, Some(&mut count), &mut output, 0).unwrap(), 1);
		}
		assert_eq!(count.data.get_value(0), Value::Int4(1));
		assert_eq!(count.data.get_value(1), Value::Int4(1));
		assert_eq!(output.get_value(0, 1), Value::Int4(0));
	}
}
