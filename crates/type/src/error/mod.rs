// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	ops::{Deref, DerefMut},
};

pub mod diagnostic;
mod r#macro;

pub use diagnostic::{Diagnostic, DiagnosticColumn, IntoDiagnostic, render::DefaultRenderer};

#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Deref for Error {
	type Target = Diagnostic;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl DerefMut for Error {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let out = DefaultRenderer::render_string(&self.0);
		f.write_str(out.as_str())
	}
}

impl Error {
	pub fn diagnostic(self) -> Diagnostic {
		self.0
	}

	pub fn kind(&self) -> ErrorKind {
		ErrorKind::from_code(&self.0.code)
	}

	/// Appends a note to the diagnostic, keeping everything else intact.
	pub fn with_note(mut self, note: impl Into<String>) -> Self {
		self.0.notes.push(note.into());
		self
	}
}

impl std::error::Error for Error {}

impl<T: IntoDiagnostic> From<T> for Error {
	fn from(value: T) -> Self {
		Error(value.into_diagnostic())
	}
}

/// Coarse classification of a diagnostic, derived from its code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// The expression or the generated evaluator was rejected at compile time.
	Compilation,
	/// An operation was invoked out of order, e.g. eval before compile.
	Precondition,
	/// A referenced external function is not available.
	Configuration,
	/// The compiled expression faulted while evaluating a row.
	Invocation,
	/// The worker reported an application-level exception for a row.
	RemoteEvaluation,
	/// The worker stream failed or desynchronized; the channel is closed.
	Channel,
	/// An output sink rejected a value.
	Column,
	Internal,
}

impl ErrorKind {
	pub fn from_code(code: &str) -> ErrorKind {
		match code.split('_').next().unwrap_or_default() {
			"COMPILE" => ErrorKind::Compilation,
			"PRECONDITION" => ErrorKind::Precondition,
			"CONFIG" => ErrorKind::Configuration,
			"INVOKE" => ErrorKind::Invocation,
			"REMOTE" => ErrorKind::RemoteEvaluation,
			"CHANNEL" => ErrorKind::Channel,
			"COLUMN" => ErrorKind::Column,
			_ => ErrorKind::Internal,
		}
	}

	/// Whether the failure is confined to a single row and leaves the
	/// evaluator usable for the next one.
	pub fn is_row_local(&self) -> bool {
		matches!(self, ErrorKind::Invocation | ErrorKind::RemoteEvaluation)
	}
}
