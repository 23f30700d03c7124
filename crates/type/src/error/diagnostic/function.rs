// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;

/// No external function is registered under the requested name
pub fn function_not_found(name: &str) -> Diagnostic {
	Diagnostic {
		code: "CONFIG_001".to_string(),
		statement: None,
		message: format!("No external function with name {} registered", name),
		column: None,
		label: Some("function not found".to_string()),
		help: Some("Register the function before running queries that reference it".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// Reading function definitions from disk failed
pub fn function_load_failed(location: &str, reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "CONFIG_002".to_string(),
		statement: None,
		message: format!("Failed to load external functions from {}: {}", location, reason.into()),
		column: None,
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}
