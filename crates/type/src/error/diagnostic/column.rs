// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, DiagnosticColumn};
use crate::value::r#type::Type;

/// A value of the wrong type was appended to a column
pub fn column_type_mismatch(name: &str, expected: Type, actual: Type) -> Diagnostic {
	Diagnostic {
		code: "COLUMN_001".to_string(),
		statement: None,
		message: format!("Cannot append {} to column {} of type {}", actual, name, expected),
		column: Some(DiagnosticColumn {
			name: name.to_string(),
			ty: expected,
		}),
		label: Some("type mismatch".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn column_index_out_of_range(index: usize, column_count: usize) -> Diagnostic {
	Diagnostic {
		code: "COLUMN_002".to_string(),
		statement: None,
		message: format!("Column index {} out of range, table has {} columns", index, column_count),
		column: None,
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}
