// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::string::FromUtf8Error;

use strata_type::{
	Type, WireTag,
	error::{
		Diagnostic, IntoDiagnostic,
		diagnostic::{
			internal::internal,
			worker::{channel_io, malformed_frame},
		},
	},
};

/// Failures while encoding or decoding worker frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
	#[error("{0}")]
	Io(#[from] std::io::Error),

	#[error("negative row count {0}")]
	NegativeCount(i32),

	#[error("unknown type tag {0}")]
	UnknownTag(i32),

	#[error("invalid length {length} for type tag {tag}")]
	InvalidLength {
		tag: i32,
		length: i32,
	},

	#[error("exception message is not valid UTF-8")]
	InvalidUtf8(#[from] FromUtf8Error),

	#[error("cannot encode {actual} value with type tag {}", tag.to_i32())]
	ValueMismatch {
		tag: WireTag,
		actual: Type,
	},

	#[error("undefined value has no type tag")]
	UntaggedValue,
}

impl FrameError {
	/// Whether the error happened on the stream itself, as opposed to
	/// encoding a value before anything was written.
	pub fn is_stream_failure(&self) -> bool {
		!matches!(self, FrameError::ValueMismatch { .. } | FrameError::UntaggedValue)
	}
}

impl IntoDiagnostic for FrameError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			FrameError::Io(err) => channel_io(err.to_string()),
			FrameError::ValueMismatch {
				..
			}
			| FrameError::UntaggedValue => internal(self.to_string()),
			_ => malformed_frame(self.to_string()),
		}
	}
}
