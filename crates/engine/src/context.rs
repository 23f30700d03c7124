// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_function::Functions;
use strata_worker::{ProcessLauncher, WorkerConfig, WorkerLauncher};

/// Collaborators needed to compile expressions: the external function
/// registry and the way workers for those functions are started.
#[derive(Clone)]
pub struct EvaluationContext {
	pub functions: Functions,
	pub launcher: Arc<dyn WorkerLauncher>,
}

impl EvaluationContext {
	pub fn new(functions: Functions, launcher: Arc<dyn WorkerLauncher>) -> Self {
		Self {
			functions,
			launcher,
		}
	}

	/// Workers are started as subprocesses according to `config`.
	pub fn with_worker_config(functions: Functions, config: WorkerConfig) -> Self {
		Self::new(functions, Arc::new(ProcessLauncher::new(config)))
	}
}

impl Default for EvaluationContext {
	fn default() -> Self {
		Self::with_worker_config(Functions::empty(), WorkerConfig::default())
	}
}
