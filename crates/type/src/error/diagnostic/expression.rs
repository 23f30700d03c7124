// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;
use crate::value::{Value, r#type::Type};

/// The expression (or the evaluator generated for it) was rejected
pub fn compilation_failed(expression: impl Into<String>, cause: Diagnostic) -> Diagnostic {
	let expression = expression.into();
	Diagnostic {
		code: "COMPILE_001".to_string(),
		statement: Some(expression.clone()),
		message: format!("Error when compiling expression {}", expression),
		column: None,
		label: Some("expression rejected".to_string()),
		help: None,
		notes: vec![],
		cause: Some(Box::new(cause)),
	}
}

/// A column reference points past the end of the input schema
pub fn column_out_of_range(index: usize, column_count: usize) -> Diagnostic {
	Diagnostic {
		code: "COMPILE_002".to_string(),
		statement: None,
		message: format!("Column ${} does not exist, input has {} columns", index, column_count),
		column: None,
		label: Some("unknown column reference".to_string()),
		help: Some(format!("Reference a column between $0 and ${}", column_count.saturating_sub(1))),
		notes: vec![],
		cause: None,
	}
}

/// A binary operator was applied to operand types it does not support
pub fn operator_not_applicable(operator: &str, left: Type, right: Type) -> Diagnostic {
	Diagnostic {
		code: "COMPILE_003".to_string(),
		statement: None,
		message: format!("Cannot apply {} to {} and {}", operator, left, right),
		column: None,
		label: Some("incompatible operand types".to_string()),
		help: Some("Cast the operands to compatible types first".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// A unary operator was applied to an operand type it does not support
pub fn unary_not_applicable(operator: &str, operand: Type) -> Diagnostic {
	Diagnostic {
		code: "COMPILE_004".to_string(),
		statement: None,
		message: format!("Cannot apply {} to {}", operator, operand),
		column: None,
		label: Some("incompatible operand type".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn unsupported_cast(from: Type, to: Type) -> Diagnostic {
	Diagnostic {
		code: "COMPILE_005".to_string(),
		statement: None,
		message: format!("Cannot cast {} to {}", from, to),
		column: None,
		label: Some("unsupported cast".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// An external function operand is not a direct column reference
pub fn udf_operand_not_column(function: &str, position: &str) -> Diagnostic {
	Diagnostic {
		code: "COMPILE_006".to_string(),
		statement: None,
		message: format!("The {} operand of external function {} must be a column reference", position, function),
		column: None,
		label: Some("nested expression not supported here".to_string()),
		help: Some("Compute the operand in a preceding step and pass the resulting column".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// The declared output type of an external function cannot be transmitted
pub fn udf_output_type_unsupported(function: &str, ty: Type) -> Diagnostic {
	Diagnostic {
		code: "COMPILE_007".to_string(),
		statement: None,
		message: format!("External function {} declares output type {} which the worker protocol cannot carry", function, ty),
		column: None,
		label: Some("unsupported output type".to_string()),
		help: Some("Use one of INT4, INT8, FLOAT4, FLOAT8 or BLOB".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// An external function appears below the root of an expression
pub fn nested_udf(function: &str) -> Diagnostic {
	Diagnostic {
		code: "COMPILE_008".to_string(),
		statement: None,
		message: format!("External function {} can only be used as the outermost operator", function),
		column: None,
		label: Some("nested external function".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// An operation requiring a compiled expression was invoked before compile
pub fn not_compiled(what: &str) -> Diagnostic {
	Diagnostic {
		code: "PRECONDITION_001".to_string(),
		statement: None,
		message: format!("{} is not compiled, call compile first", what),
		column: None,
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// A single-value evaluation was requested from an evaluator that produces a variable number of rows
pub fn not_scalar(expression: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "PRECONDITION_002".to_string(),
		statement: Some(expression.into()),
		message: "Expression produces a variable number of rows and cannot be evaluated to a single value"
			.to_string(),
		column: None,
		label: None,
		help: Some("Evaluate it with an output table and a count column".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// A row was evaluated against a table whose columns differ from the schema the expression was compiled for
pub fn input_schema_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "PRECONDITION_004".to_string(),
		statement: None,
		message: "Input table does not match the schema the expression was compiled for".to_string(),
		column: None,
		label: None,
		help: Some("Compile the expression again with the schema of this table".to_string()),
		notes: vec![format!("compiled for {}", expected.into()), format!("table has {}", actual.into())],
		cause: None,
	}
}

/// Integer division or remainder by zero
pub fn division_by_zero(expression: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "INVOKE_001".to_string(),
		statement: Some(expression.into()),
		message: "division by zero".to_string(),
		column: None,
		label: Some("divisor evaluated to zero".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn arithmetic_overflow(expression: impl Into<String>, operator: &str, ty: Type) -> Diagnostic {
	Diagnostic {
		code: "INVOKE_002".to_string(),
		statement: Some(expression.into()),
		message: format!("{} overflowed the range of {}", operator, ty),
		column: None,
		label: Some("arithmetic overflow".to_string()),
		help: Some(format!("Cast the operands to a wider type than {}", ty)),
		notes: vec![],
		cause: None,
	}
}

pub fn invalid_cast(expression: impl Into<String>, value: &Value, target: Type) -> Diagnostic {
	Diagnostic {
		code: "INVOKE_003".to_string(),
		statement: Some(expression.into()),
		message: format!("Cannot convert {} to {}", value, target),
		column: None,
		label: Some("invalid cast".to_string()),
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// An undefined constant carries no type on its own
pub fn untyped_undefined() -> Diagnostic {
	Diagnostic {
		code: "COMPILE_009".to_string(),
		statement: None,
		message: "Undefined constant has no type".to_string(),
		column: None,
		label: Some("untyped undefined".to_string()),
		help: Some("Wrap the constant in a cast, e.g. CAST(undefined AS INT4)".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// The serialized expression could not be decoded
pub fn invalid_encoding(reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "COMPILE_010".to_string(),
		statement: None,
		message: format!("Invalid expression encoding: {}", reason.into()),
		column: None,
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}
