// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use crate::expr::Expr;

impl Display for Expr {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Expr::Column(c) => write!(f, "${}", c.index),
			Expr::Constant(value) => Display::fmt(value, f),
			Expr::Not(e) => write!(f, "(NOT {})", e),
			Expr::Negate(e) => write!(f, "(-{})", e),
			Expr::Cast(c) => write!(f, "CAST({} AS {})", c.expr, c.to),
			Expr::Udf(u) => write!(f, "{}({}, {}) -> {}", u.name, u.left, u.right, u.output),
			_ => match self.as_binary() {
				Some((op, left, right)) => write!(f, "({} {} {})", left, op.symbol(), right),
				None => Ok(()),
			},
		}
	}
}
