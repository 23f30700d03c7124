// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use strata_type::Type;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaColumn {
	pub name: String,
	pub ty: Type,
}

impl SchemaColumn {
	pub fn new(name: impl Into<String>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
		}
	}
}

/// Ordered column names and types of a batch. Column positions are stable
/// and used as indices everywhere else.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
	columns: Vec<SchemaColumn>,
}

impl Schema {
	pub fn new(columns: Vec<SchemaColumn>) -> Self {
		Self {
			columns,
		}
	}

	pub fn empty() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	pub fn column(&self, index: usize) -> Option<&SchemaColumn> {
		self.columns.get(index)
	}

	pub fn column_type(&self, index: usize) -> Option<Type> {
		self.columns.get(index).map(|c| c.ty)
	}

	pub fn column_name(&self, index: usize) -> Option<&str> {
		self.columns.get(index).map(|c| c.name.as_str())
	}

	pub fn index_of(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|c| c.name == name)
	}

	pub fn push(&mut self, column: SchemaColumn) {
		self.columns.push(column);
	}

	pub fn iter(&self) -> impl Iterator<Item = &SchemaColumn> {
		self.columns.iter()
	}
}

impl<S: Into<String>> FromIterator<(S, Type)> for Schema {
	fn from_iter<I: IntoIterator<Item = (S, Type)>>(iter: I) -> Self {
		Self::new(iter.into_iter().map(|(name, ty)| SchemaColumn::new(name, ty)).collect())
	}
}

impl Display for Schema {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("(")?;
		for (idx, column) in self.columns.iter().enumerate() {
			if idx > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}: {}", column.name, column.ty)?;
		}
		f.write_str(")")
	}
}
