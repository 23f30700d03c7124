// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;

pub fn internal(reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		statement: None,
		message: format!("Internal error: {}", reason.into()),
		column: None,
		label: None,
		help: Some("This is an internal error that should never occur in normal operation".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// Internal error diagnostic carrying the source location it was raised at.
pub fn internal_with_context(reason: impl Into<String>, file: &str, line: u32, module_path: &str) -> Diagnostic {
	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		statement: None,
		message: format!("Internal error: {}", reason.into()),
		column: None,
		label: Some(format!("Internal invariant violated at {}:{}", file, line)),
		help: Some("This is an internal error that should never occur in normal operation".to_string()),
		notes: vec![format!("Module: {}", module_path), format!("Version: {}", env!("CARGO_PKG_VERSION"))],
		cause: None,
	}
}
