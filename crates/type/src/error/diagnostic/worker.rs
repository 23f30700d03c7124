// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::Diagnostic;

/// The worker raised an exception while evaluating a row. `message` is the
/// text the worker sent, unchanged.
pub fn remote_exception(function: &str, message: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "REMOTE_001".to_string(),
		statement: None,
		message: message.into(),
		column: None,
		label: Some(format!("exception raised by external function {}", function)),
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn channel_io(reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "CHANNEL_001".to_string(),
		statement: None,
		message: format!("Worker stream failed: {}", reason.into()),
		column: None,
		label: Some("worker channel closed".to_string()),
		help: Some("The worker process may have exited; create a new channel to resume".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn malformed_frame(reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "CHANNEL_002".to_string(),
		statement: None,
		message: format!("Malformed frame from worker: {}", reason.into()),
		column: None,
		label: Some("worker channel closed".to_string()),
		help: Some("Check that the worker speaks the same protocol version".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn channel_closed() -> Diagnostic {
	Diagnostic {
		code: "CHANNEL_003".to_string(),
		statement: None,
		message: "Worker channel is closed".to_string(),
		column: None,
		label: None,
		help: Some("A closed channel cannot be reused; reset the evaluator to start a new worker".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn worker_spawn_failed(program: &str, reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "CHANNEL_004".to_string(),
		statement: None,
		message: format!("Failed to start worker {}: {}", program, reason.into()),
		column: None,
		label: None,
		help: Some("Check the worker program and arguments in the worker configuration".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// A protocol round was requested on a channel that has not been started
pub fn channel_not_started() -> Diagnostic {
	Diagnostic {
		code: "PRECONDITION_003".to_string(),
		statement: None,
		message: "Worker channel is not started".to_string(),
		column: None,
		label: None,
		help: Some("Start the channel and send the function registration first".to_string()),
		notes: vec![],
		cause: None,
	}
}
