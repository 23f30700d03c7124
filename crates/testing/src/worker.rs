// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-process stand-in for a worker process.

use std::{
	io::Write,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	thread,
};

use parking_lot::Mutex;
use strata_type::{Result, Value, error::diagnostic::worker::worker_spawn_failed, return_error};
use strata_worker::{
	Registration, Reply, WorkerConnection, WorkerLauncher,
	protocol::{read_operand_frame, write_reply},
};
use tracing::trace;

use crate::pipe::{Duplex, duplex};

/// What the mock worker sends back for one row.
#[derive(Clone, Debug)]
pub enum Response {
	Reply(Reply),
	/// Bytes written verbatim, for malformed replies.
	Raw(Vec<u8>),
	/// Close both streams without replying.
	Hangup,
}

impl Response {
	pub fn values(values: impl IntoIterator<Item = Value>) -> Self {
		Response::Reply(Reply::Values(values.into_iter().collect()))
	}

	pub fn value(value: impl Into<Value>) -> Self {
		Response::values([value.into()])
	}

	pub fn exception(message: impl Into<String>) -> Self {
		Response::Reply(Reply::Exception(message.into()))
	}
}

type Handler = Arc<dyn Fn(&[Value]) -> Response + Send + Sync>;

#[derive(Default)]
struct Recorded {
	registrations: Vec<Registration>,
	requests: Vec<Vec<Value>>,
}

/// Launches mock workers that answer each row with `handler`. Every launch
/// runs a fresh peer thread; registrations and operand rows of all peers
/// are recorded.
#[derive(Clone)]
pub struct MockLauncher {
	handler: Handler,
	operands: usize,
	fail: bool,
	launches: Arc<AtomicUsize>,
	recorded: Arc<Mutex<Recorded>>,
}

impl MockLauncher {
	pub fn new<F>(handler: F) -> Self
	where
		F: Fn(&[Value]) -> Response + Send + Sync + 'static,
	{
		Self {
			handler: Arc::new(handler),
			operands: 2,
			fail: false,
			launches: Arc::new(AtomicUsize::new(0)),
			recorded: Arc::new(Mutex::new(Recorded::default())),
		}
	}

	/// A launcher whose every launch fails.
	pub fn failing() -> Self {
		let mut launcher = Self::new(|_| Response::Hangup);
		launcher.fail = true;
		launcher
	}

	/// Number of operand frames the peer reads per row.
	pub fn with_operands(mut self, operands: usize) -> Self {
		self.operands = operands;
		self
	}

	pub fn launches(&self) -> usize {
		self.launches.load(Ordering::SeqCst)
	}

	pub fn registrations(&self) -> Vec<Registration> {
		self.recorded.lock().registrations.clone()
	}

	pub fn requests(&self) -> Vec<Vec<Value>> {
		self.recorded.lock().requests.clone()
	}
}

impl WorkerLauncher for MockLauncher {
	fn launch(&self) -> Result<WorkerConnection> {
		self.launches.fetch_add(1, Ordering::SeqCst);
		if self.fail {
			return_error!(worker_spawn_failed("mock-worker", "launch refused"));
		}

		let (ours, theirs) = duplex();
		let handler = self.handler.clone();
		let recorded = self.recorded.clone();
		let operands = self.operands;

		thread::Builder::new()
			.name("mock-worker".to_string())
			.spawn(move || serve(theirs, handler, operands, recorded))
			.map_err(|e| strata_type::error!(worker_spawn_failed("mock-worker", e.to_string())))?;

		Ok(WorkerConnection::new(ours.reader, ours.writer))
	}
}

fn serve(mut end: Duplex, handler: Handler, operands: usize, recorded: Arc<Mutex<Recorded>>) {
	let registration = match Registration::read_from(&mut end.reader) {
		Ok(registration) => registration,
		Err(_) => return,
	};
	recorded.lock().registrations.push(registration);

	loop {
		let mut row = Vec::with_capacity(operands);
		for _ in 0..operands {
			match read_operand_frame(&mut end.reader) {
				Ok(value) => row.push(value),
				Err(_) => return,
			}
		}
		trace!(operands = ?row, "mock worker received row");
		recorded.lock().requests.push(row.clone());

		let sent = match handler(&row) {
			Response::Reply(reply) => write_reply(&mut end.writer, &reply).is_ok(),
			Response::Raw(bytes) => end.writer.write_all(&bytes).is_ok(),
			Response::Hangup => false,
		};
		if !sent {
			return;
		}
	}
}
