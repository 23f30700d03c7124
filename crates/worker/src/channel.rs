// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	io::{BufReader, BufWriter, Read, Write},
	sync::Arc,
};

use strata_type::{
	Error, Result,
	error::diagnostic::worker::{channel_closed, channel_not_started},
	return_error, return_internal_error,
};
use tracing::{debug, instrument, trace, warn};

use crate::{
	error::FrameError,
	launcher::{WorkerConnection, WorkerLauncher},
	process::WorkerProcess,
	protocol::{Operand, Registration, Reply, read_reply, write_value_frame},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
	NotStarted,
	Idle,
	/// A request was written and its reply is not fully consumed.
	Busy,
	Closed,
}

impl Display for ChannelState {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ChannelState::NotStarted => f.write_str("not started"),
			ChannelState::Idle => f.write_str("idle"),
			ChannelState::Busy => f.write_str("busy"),
			ChannelState::Closed => f.write_str("closed"),
		}
	}
}

struct Session {
	reader: BufReader<Box<dyn Read + Send>>,
	writer: BufWriter<Box<dyn Write + Send>>,
	process: Option<WorkerProcess>,
}

impl Session {
	fn exchange(&mut self, request: &[u8]) -> std::result::Result<Reply, FrameError> {
		self.writer.write_all(request)?;
		self.writer.flush()?;
		read_reply(&mut self.reader)
	}

	fn send(&mut self, request: &[u8]) -> std::result::Result<(), FrameError> {
		self.writer.write_all(request)?;
		self.writer.flush()?;
		Ok(())
	}
}

/// Framed request/response channel to one dedicated worker.
///
/// Any stream failure closes the channel for good; a remote exception does
/// not. Requests are strictly sequential.
pub struct WorkerChannel {
	launcher: Arc<dyn WorkerLauncher>,
	state: ChannelState,
	session: Option<Session>,
}

impl WorkerChannel {
	pub fn new(launcher: Arc<dyn WorkerLauncher>) -> Self {
		Self {
			launcher,
			state: ChannelState::NotStarted,
			session: None,
		}
	}

	pub fn state(&self) -> ChannelState {
		self.state
	}

	pub fn is_closed(&self) -> bool {
		self.state == ChannelState::Closed
	}

	/// Launches the worker. Starting an already started channel does nothing.
	pub fn start(&mut self) -> Result<()> {
		match self.state {
			ChannelState::NotStarted => {}
			ChannelState::Idle | ChannelState::Busy => return Ok(()),
			ChannelState::Closed => return_error!(channel_closed()),
		}

		let WorkerConnection {
			reader,
			writer,
			process,
		} = match self.launcher.launch() {
			Ok(connection) => connection,
			Err(err) => {
				self.state = ChannelState::Closed;
				return Err(err);
			}
		};

		debug!(pid = process.as_ref().map(WorkerProcess::id), "worker channel started");
		self.session = Some(Session {
			reader: BufReader::new(reader),
			writer: BufWriter::new(writer),
			process,
		});
		self.state = ChannelState::Idle;
		Ok(())
	}

	/// Sends the one-time function registration.
	pub fn register(&mut self, registration: &Registration) -> Result<()> {
		self.ensure_idle()?;

		let mut request = Vec::with_capacity(registration.payload.len() + 16);
		registration.write_to(&mut request)?;

		let result = match self.session.as_mut() {
			Some(session) => session.send(&request),
			None => return_internal_error!("idle worker channel without a session"),
		};
		if let Err(err) = result {
			return Err(self.fail(err));
		}

		debug!(
			bytes = registration.payload.len(),
			arity = registration.arity,
			output = registration.output.to_i32(),
			version = registration.version,
			"registered function with worker"
		);
		Ok(())
	}

	/// Sends one row of operands and reads the complete reply.
	#[instrument(name = "worker::channel::call", level = "trace", skip_all, fields(operands = operands.len()))]
	pub fn call(&mut self, operands: &[Operand]) -> Result<Reply> {
		self.ensure_idle()?;

		let mut request = Vec::new();
		for operand in operands {
			write_value_frame(&mut request, operand.tag, &operand.value)?;
		}

		self.state = ChannelState::Busy;
		let result = match self.session.as_mut() {
			Some(session) => session.exchange(&request),
			None => return_internal_error!("busy worker channel without a session"),
		};

		match result {
			Ok(reply) => {
				self.state = ChannelState::Idle;
				trace!(reply = ?reply, "worker replied");
				Ok(reply)
			}
			Err(err) => Err(self.fail(err)),
		}
	}

	/// Closes the streams and terminates the worker. Idempotent.
	pub fn close(&mut self) {
		if self.state != ChannelState::Closed {
			debug!(state = %self.state, "closing worker channel");
		}
		self.state = ChannelState::Closed;

		if let Some(session) = self.session.take() {
			let Session {
				reader,
				writer,
				process,
			} = session;
			// closing stdin first lets a well-behaved worker exit on its own
			drop(writer.into_parts());
			drop(reader);
			if let Some(mut process) = process {
				process.kill();
			}
		}
	}

	fn ensure_idle(&self) -> Result<()> {
		match self.state {
			ChannelState::Idle => Ok(()),
			ChannelState::NotStarted => return_error!(channel_not_started()),
			ChannelState::Closed => return_error!(channel_closed()),
			ChannelState::Busy => return_internal_error!("worker channel is busy"),
		}
	}

	fn fail(&mut self, err: FrameError) -> Error {
		warn!(error = %err, "worker channel failed");
		self.close();
		err.into()
	}
}

impl Drop for WorkerChannel {
	fn drop(&mut self) {
		self.close();
	}
}
