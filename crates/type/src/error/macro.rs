// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Wraps a diagnostic into an [`Error`](crate::Error).
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::Error($diagnostic)
	};
}

/// Creates an `Err` result from a diagnostic.
#[macro_export]
macro_rules! err {
	($diagnostic:expr) => {
		Err($crate::error!($diagnostic))
	};
}

/// Returns early with an error built from a diagnostic.
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return $crate::err!($diagnostic)
	};
}

/// Returns early with an internal error carrying the call site.
#[macro_export]
macro_rules! return_internal_error {
	($($arg:tt)*) => {
		return $crate::err!($crate::error::diagnostic::internal::internal_with_context(
			format!($($arg)*),
			file!(),
			line!(),
			module_path!(),
		))
	};
}
