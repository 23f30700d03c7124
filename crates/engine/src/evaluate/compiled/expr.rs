// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use strata_type::{Result, Type, Value};

use super::context::ExecContext;

/// An operator tree bound to a schema, ready to run against rows.
pub struct CompiledExpr {
	ty: Type,
	inner: Box<dyn Fn(&ExecContext) -> Result<Value> + Send + Sync>,
}

impl CompiledExpr {
	pub fn new(ty: Type, f: impl Fn(&ExecContext) -> Result<Value> + Send + Sync + 'static) -> Self {
		Self {
			ty,
			inner: Box::new(f),
		}
	}

	/// Type of every defined value this expression produces.
	pub fn ty(&self) -> Type {
		self.ty
	}

	pub fn execute(&self, ctx: &ExecContext) -> Result<Value> {
		(self.inner)(ctx)
	}
}
