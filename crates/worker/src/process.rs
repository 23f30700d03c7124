// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	io::{BufRead, BufReader},
	process::{Child, ChildStdin, ChildStdout, Command, Stdio},
	thread,
};

use strata_type::{Result, error::diagnostic::worker::worker_spawn_failed, return_error};
use tracing::{debug, warn};

use crate::config::{StderrMode, WorkerConfig};

/// A running worker subprocess. The process is killed and reaped on drop.
pub struct WorkerProcess {
	child: Child,
	program: String,
	reaped: bool,
}

impl WorkerProcess {
	/// Spawns the configured program with piped stdin and stdout.
	pub fn spawn(config: &WorkerConfig) -> Result<(WorkerProcess, ChildStdin, ChildStdout)> {
		let mut command = Command::new(&config.program);
		command.args(&config.args).envs(&config.env).stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(
			match config.stderr {
				StderrMode::Inherit => Stdio::inherit(),
				StderrMode::Null => Stdio::null(),
				StderrMode::Log => Stdio::piped(),
			},
		);
		if let Some(dir) = &config.working_dir {
			command.current_dir(dir);
		}

		let mut child = match command.spawn() {
			Ok(child) => child,
			Err(e) => return_error!(worker_spawn_failed(&config.program, e.to_string())),
		};
		let pid = child.id();

		let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
			(Some(stdin), Some(stdout)) => (stdin, stdout),
			_ => {
				let _ = child.kill();
				let _ = child.wait();
				return_error!(worker_spawn_failed(&config.program, "standard streams are not piped"));
			}
		};

		// the reader thread ends on its own once the pipe closes
		if let Some(stderr) = child.stderr.take() {
			let spawned = thread::Builder::new().name(format!("worker-stderr-{}", pid)).spawn(move || {
				for line in BufReader::new(stderr).lines() {
					match line {
						Ok(line) => warn!(target: "strata_worker::stderr", pid, "{}", line),
						Err(_) => break,
					}
				}
			});
			if let Err(e) = spawned {
				warn!(pid, error = %e, "failed to start stderr reader");
			}
		}

		debug!(program = %config.program, pid, "started worker process");

		Ok((
			WorkerProcess {
				child,
				program: config.program.clone(),
				reaped: false,
			},
			stdin,
			stdout,
		))
	}

	pub fn id(&self) -> u32 {
		self.child.id()
	}

	pub fn program(&self) -> &str {
		&self.program
	}

	/// Whether the process has already exited on its own.
	pub fn has_exited(&mut self) -> bool {
		matches!(self.child.try_wait(), Ok(Some(_)))
	}

	/// Kills the process if it is still running and waits for it.
	pub fn kill(&mut self) {
		if self.reaped {
			return;
		}
		self.reaped = true;

		if !self.has_exited() {
			let _ = self.child.kill();
		}
		match self.child.wait() {
			Ok(status) => debug!(pid = self.child.id(), %status, "worker process exited"),
			Err(e) => warn!(pid = self.child.id(), error = %e, "failed to reap worker process"),
		}
	}
}

impl Drop for WorkerProcess {
	fn drop(&mut self) {
		self.kill();
	}
}

#[cfg(test)]
mod tests {
	use strata_type::ErrorKind;

	use super::WorkerProcess;
	use crate::config::WorkerConfig;

	#[test]
	fn test_spawn_missing_program() {
		let config = WorkerConfig::new("/nonexistent/strata-worker-binary");
		let err = WorkerProcess::spawn(&config).err().unwrap();
		assert_eq!(err.kind(), ErrorKind::Channel);
		assert_eq!(err.code, "CHANNEL_004");
	}

	#[cfg(unix)]
	#[test]
	fn test_kill_on_drop() {
		let config = WorkerConfig::new("sleep").with_arg("30");
		let (mut process, stdin, stdout) = WorkerProcess::spawn(&config).unwrap();
		assert!(!process.has_exited());
		drop(stdin);
		drop(stdout);
		process.kill();
		assert!(process.has_exited());
	}
}
