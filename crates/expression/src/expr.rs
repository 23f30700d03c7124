// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use strata_type::{Result, Type, Value, error::diagnostic::expression::invalid_encoding, return_error};

/// Operator tree describing the computation of one output value. Produced
/// upstream by plan construction and shared between the expressions that
/// use it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
	Column(ColumnExpr),
	Constant(Value),

	Add(BinaryExpr),
	Sub(BinaryExpr),
	Mul(BinaryExpr),
	Div(BinaryExpr),
	Rem(BinaryExpr),

	Equal(BinaryExpr),
	NotEqual(BinaryExpr),
	GreaterThan(BinaryExpr),
	GreaterThanEqual(BinaryExpr),
	LessThan(BinaryExpr),
	LessThanEqual(BinaryExpr),

	And(BinaryExpr),
	Or(BinaryExpr),
	Xor(BinaryExpr),

	Not(Box<Expr>),
	Negate(Box<Expr>),

	Cast(CastExpr),

	/// A user-defined function of two operands, evaluated by an external worker.
	Udf(UdfExpr),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnExpr {
	pub index: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
	pub left: Box<Expr>,
	pub right: Box<Expr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CastExpr {
	pub expr: Box<Expr>,
	pub to: Type,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UdfExpr {
	/// Name the function is registered under.
	pub name: String,
	pub left: Box<Expr>,
	pub right: Box<Expr>,
	/// Output type declared by the function's registration.
	pub output: Type,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
	Add,
	Sub,
	Mul,
	Div,
	Rem,
	Equal,
	NotEqual,
	GreaterThan,
	GreaterThanEqual,
	LessThan,
	LessThanEqual,
	And,
	Or,
	Xor,
}

impl BinaryOp {
	pub fn symbol(&self) -> &'static str {
		match self {
			BinaryOp::Add => "+",
			BinaryOp::Sub => "-",
			BinaryOp::Mul => "*",
			BinaryOp::Div => "/",
			BinaryOp::Rem => "%",
			BinaryOp::Equal => "==",
			BinaryOp::NotEqual => "!=",
			BinaryOp::GreaterThan => ">",
			BinaryOp::GreaterThanEqual => ">=",
			BinaryOp::LessThan => "<",
			BinaryOp::LessThanEqual => "<=",
			BinaryOp::And => "AND",
			BinaryOp::Or => "OR",
			BinaryOp::Xor => "XOR",
		}
	}

	pub fn is_arithmetic(&self) -> bool {
		matches!(self, BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem)
	}

	pub fn is_comparison(&self) -> bool {
		matches!(
			self,
			BinaryOp::Equal
				| BinaryOp::NotEqual
				| BinaryOp::GreaterThan
				| BinaryOp::GreaterThanEqual
				| BinaryOp::LessThan | BinaryOp::LessThanEqual
		)
	}

	pub fn is_logical(&self) -> bool {
		matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Xor)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
	Not,
	Negate,
}

impl UnaryOp {
	pub fn symbol(&self) -> &'static str {
		match self {
			UnaryOp::Not => "NOT",
			UnaryOp::Negate => "-",
		}
	}
}

impl Expr {
	pub fn column(index: usize) -> Expr {
		Expr::Column(ColumnExpr {
			index,
		})
	}

	pub fn constant(value: impl Into<Value>) -> Expr {
		Expr::Constant(value.into())
	}

	pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
		let e = BinaryExpr {
			left: Box::new(left),
			right: Box::new(right),
		};
		match op {
			BinaryOp::Add => Expr::Add(e),
			BinaryOp::Sub => Expr::Sub(e),
			BinaryOp::Mul => Expr::Mul(e),
			BinaryOp::Div => Expr::Div(e),
			BinaryOp::Rem => Expr::Rem(e),
			BinaryOp::Equal => Expr::Equal(e),
			BinaryOp::NotEqual => Expr::NotEqual(e),
			BinaryOp::GreaterThan => Expr::GreaterThan(e),
			BinaryOp::GreaterThanEqual => Expr::GreaterThanEqual(e),
			BinaryOp::LessThan => Expr::LessThan(e),
			BinaryOp::LessThanEqual => Expr::LessThanEqual(e),
			BinaryOp::And => Expr::And(e),
			BinaryOp::Or => Expr::Or(e),
			BinaryOp::Xor => Expr::Xor(e),
		}
	}

	pub fn add(left: Expr, right: Expr) -> Expr {
		Expr::binary(BinaryOp::Add, left, right)
	}

	pub fn sub(left: Expr, right: Expr) -> Expr {
		Expr::binary(BinaryOp::Sub, left, right)
	}

	pub fn mul(left: Expr, right: Expr) -> Expr {
		Expr::binary(BinaryOp::Mul, left, right)
	}

	pub fn div(left: Expr, right: Expr) -> Expr {
		Expr::binary(BinaryOp::Div, left, right)
	}

	pub fn not(expr: Expr) -> Expr {
		Expr::Not(Box::new(expr))
	}

	pub fn negate(expr: Expr) -> Expr {
		Expr::Negate(Box::new(expr))
	}

	pub fn cast(expr: Expr, to: Type) -> Expr {
		Expr::Cast(CastExpr {
			expr: Box::new(expr),
			to,
		})
	}

	pub fn udf(name: impl Into<String>, left: Expr, right: Expr, output: Type) -> Expr {
		Expr::Udf(UdfExpr {
			name: name.into(),
			left: Box::new(left),
			right: Box::new(right),
			output,
		})
	}

	/// Splits a binary node into its operator and operands.
	pub fn as_binary(&self) -> Option<(BinaryOp, &Expr, &Expr)> {
		let (op, e) = match self {
			Expr::Add(e) => (BinaryOp::Add, e),
			Expr::Sub(e) => (BinaryOp::Sub, e),
			Expr::Mul(e) => (BinaryOp::Mul, e),
			Expr::Div(e) => (BinaryOp::Div, e),
			Expr::Rem(e) => (BinaryOp::Rem, e),
			Expr::Equal(e) => (BinaryOp::Equal, e),
			Expr::NotEqual(e) => (BinaryOp::NotEqual, e),
			Expr::GreaterThan(e) => (BinaryOp::GreaterThan, e),
			Expr::GreaterThanEqual(e) => (BinaryOp::GreaterThanEqual, e),
			Expr::LessThan(e) => (BinaryOp::LessThan, e),
			Expr::LessThanEqual(e) => (BinaryOp::LessThanEqual, e),
			Expr::And(e) => (BinaryOp::And, e),
			Expr::Or(e) => (BinaryOp::Or, e),
			Expr::Xor(e) => (BinaryOp::Xor, e),
			_ => return None,
		};
		Some((op, e.left.as_ref(), e.right.as_ref()))
	}

	/// The column index if this node is a direct column reference.
	pub fn as_column(&self) -> Option<usize> {
		match self {
			Expr::Column(c) => Some(c.index),
			_ => None,
		}
	}

	pub fn as_udf(&self) -> Option<&UdfExpr> {
		match self {
			Expr::Udf(udf) => Some(udf),
			_ => None,
		}
	}

	/// Direct children of this node, left to right.
	pub fn children(&self) -> Vec<&Expr> {
		if let Some((_, left, right)) = self.as_binary() {
			return vec![left, right];
		}
		match self {
			Expr::Column(_) | Expr::Constant(_) => vec![],
			Expr::Not(e) | Expr::Negate(e) => vec![e.as_ref()],
			Expr::Cast(c) => vec![c.expr.as_ref()],
			Expr::Udf(u) => vec![u.left.as_ref(), u.right.as_ref()],
			_ => vec![],
		}
	}

	/// Decodes an operator tree from its JSON plan encoding.
	pub fn from_json(json: &str) -> Result<Expr> {
		match serde_json::from_str(json) {
			Ok(expr) => Ok(expr),
			Err(e) => return_error!(invalid_encoding(e.to_string())),
		}
	}

	pub fn to_json(&self) -> Result<String> {
		match serde_json::to_string(self) {
			Ok(json) => Ok(json),
			Err(e) => return_error!(invalid_encoding(e.to_string())),
		}
	}
}
