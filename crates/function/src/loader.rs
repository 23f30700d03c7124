// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Builds a function registry from a directory of serialized functions.

use std::path::Path;

use strata_type::{Result, error::diagnostic::function::function_load_failed, return_error};
use tracing::debug;

use crate::registry::{Functions, FunctionsBuilder};

/// Scan `dir` and register every regular file as a function. The function
/// name is the file stem (`add.bin` registers `"add"`); hidden files are
/// ignored.
pub fn load_functions_from_dir(dir: &Path) -> Result<Functions> {
	Ok(register_functions_from_dir(dir, Functions::builder())?.build())
}

pub fn register_functions_from_dir(dir: &Path, mut builder: FunctionsBuilder) -> Result<FunctionsBuilder> {
	let location = dir.display().to_string();

	let entries = match std::fs::read_dir(dir) {
		Ok(entries) => entries,
		Err(e) => return_error!(function_load_failed(&location, e.to_string())),
	};

	let mut paths = Vec::new();
	for entry in entries {
		match entry {
			Ok(entry) => paths.push(entry.path()),
			Err(e) => return_error!(function_load_failed(&location, e.to_string())),
		}
	}
	paths.sort();

	for path in paths {
		if !path.is_file() {
			continue;
		}

		let name = match path.file_stem().and_then(|s| s.to_str()) {
			Some(n) if !n.is_empty() && !n.starts_with('.') => n.to_string(),
			_ => continue,
		};

		let payload = match std::fs::read(&path) {
			Ok(bytes) => bytes,
			Err(e) => return_error!(function_load_failed(&path.display().to_string(), e.to_string())),
		};

		debug!(function = %name, bytes = payload.len(), "registered external function");
		builder = builder.with_function(&name, payload);
	}

	Ok(builder)
}
