// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::{Read, Write};

use strata_type::Result;

use crate::{config::WorkerConfig, process::WorkerProcess};

/// The two byte streams of a started worker, plus the process when there is one.
pub struct WorkerConnection {
	pub reader: Box<dyn Read + Send>,
	pub writer: Box<dyn Write + Send>,
	pub process: Option<WorkerProcess>,
}

impl WorkerConnection {
	pub fn new(reader: impl Read + Send + 'static, writer: impl Write + Send + 'static) -> Self {
		Self {
			reader: Box::new(reader),
			writer: Box::new(writer),
			process: None,
		}
	}

	pub fn with_process(mut self, process: WorkerProcess) -> Self {
		self.process = Some(process);
		self
	}
}

/// Starts workers. Each call yields a fresh, dedicated worker.
pub trait WorkerLauncher: Send + Sync {
	fn launch(&self) -> Result<WorkerConnection>;
}

/// Launches workers as local subprocesses.
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
	config: WorkerConfig,
}

impl ProcessLauncher {
	pub fn new(config: WorkerConfig) -> Self {
		Self {
			config,
		}
	}

	pub fn config(&self) -> &WorkerConfig {
		&self.config
	}
}

impl WorkerLauncher for ProcessLauncher {
	fn launch(&self) -> Result<WorkerConnection> {
		let (process, stdin, stdout) = WorkerProcess::spawn(&self.config)?;
		Ok(WorkerConnection::new(stdout, stdin).with_process(process))
	}
}
