// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};

/// What happens to the worker's standard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StderrMode {
	/// Share the parent's standard error.
	Inherit,
	/// Discard.
	Null,
	/// Forward each line to the log at `warn` level.
	#[default]
	Log,
}

/// How to start a worker process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
	/// Executable to run.
	pub program: String,
	pub args: Vec<String>,
	/// Extra environment variables, added to the inherited environment.
	pub env: BTreeMap<String, String>,
	pub working_dir: Option<PathBuf>,
	pub stderr: StderrMode,
}

impl Default for WorkerConfig {
	fn default() -> Self {
		Self {
			program: "python3".to_string(),
			args: vec!["-u".to_string(), "-m".to_string(), "strata_worker".to_string()],
			env: BTreeMap::new(),
			working_dir: None,
			stderr: StderrMode::default(),
		}
	}
}

impl WorkerConfig {
	pub fn new(program: impl Into<String>) -> Self {
		Self {
			program: program.into(),
			args: Vec::new(),
			..Self::default()
		}
	}

	pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
		self.args.push(arg.into());
		self
	}

	pub fn with_args<I, S>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.args.extend(args.into_iter().map(Into::into));
		self
	}

	pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.env.insert(key.into(), value.into());
		self
	}

	pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.working_dir = Some(dir.into());
		self
	}

	pub fn with_stderr(mut self, mode: StderrMode) -> Self {
		self.stderr = mode;
		self
	}
}
