// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use strata_testing::{MockLauncher, Response, init_tracing};
use strata_type::{ErrorKind, Value, WireTag};
use strata_worker::{ChannelState, Operand, Registration, Reply, WorkerChannel, protocol::EXCEPTION_TAG};

fn registration() -> Registration {
	Registration::binary(Arc::from(&b"payload"[..]), WireTag::Int4)
}

fn ints(a: i32, b: i32) -> Vec<Operand> {
	vec![Operand::new(WireTag::Int4, Value::Int4(a)), Operand::new(WireTag::Int4, Value::Int4(b))]
}

fn adder() -> MockLauncher {
	MockLauncher::new(|row| match (&row[0], &row[1]) {
		(Value::Int4(a), Value::Int4(b)) => Response::value(a + b),
		_ => Response::exception("TypeError: unsupported operands"),
	})
}

#[test]
fn test_lifecycle() {
	init_tracing();
	let launcher = adder();
	let mut channel = WorkerChannel::new(Arc::new(launcher.clone()));
	assert_eq!(channel.state(), ChannelState::NotStarted);

	channel.start().unwrap();
	assert_eq!(channel.state(), ChannelState::Idle);
	channel.register(&registration()).unwrap();

	assert_eq!(channel.call(&ints(2, 3)).unwrap(), Reply::Values(vec![Value::Int4(5)]));
	assert_eq!(channel.call(&ints(-1, 5)).unwrap(), Reply::Values(vec![Value::Int4(4)]));
	assert_eq!(channel.state(), ChannelState::Idle);

	channel.close();
	assert!(channel.is_closed());
	assert_eq!(launcher.launches(), 1);
	assert_eq!(launcher.registrations(), vec![registration()]);
	assert_eq!(launcher.requests().len(), 2);
}

#[test]
fn test_call_before_start() {
	let launcher = adder();
	let mut channel = WorkerChannel::new(Arc::new(launcher.clone()));
	let err = channel.call(&ints(1, 1)).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Precondition);
	assert_eq!(launcher.launches(), 0);
}

#[test]
fn test_start_twice_launches_once() {
	let launcher = adder();
	let mut channel = WorkerChannel::new(Arc::new(launcher.clone()));
	channel.start().unwrap();
	channel.start().unwrap();
	assert_eq!(launcher.launches(), 1);
}

#[test]
fn test_exception_keeps_channel_idle() {
	let launcher = MockLauncher::new(|row| match &row[1] {
		Value::Int4(0) => Response::exception("ZeroDivisionError: division by zero"),
		Value::Int4(b) => Response::value(10 / b),
		_ => Response::Hangup,
	});
	let mut channel = WorkerChannel::new(Arc::new(launcher));
	channel.start().unwrap();
	channel.register(&registration()).unwrap();

	let reply = channel.call(&ints(10, 0)).unwrap();
	assert_eq!(reply, Reply::Exception("ZeroDivisionError: division by zero".to_string()));
	assert_eq!(channel.state(), ChannelState::Idle);

	assert_eq!(channel.call(&ints(10, 5)).unwrap(), Reply::Values(vec![Value::Int4(2)]));
}

#[test]
fn test_hangup_closes_channel() {
	let launcher = MockLauncher::new(|_| Response::Hangup);
	let mut channel = WorkerChannel::new(Arc::new(launcher));
	channel.start().unwrap();
	channel.register(&registration()).unwrap();

	let err = channel.call(&ints(1, 2)).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Channel);
	assert_eq!(channel.state(), ChannelState::Closed);

	let err = channel.call(&ints(1, 2)).unwrap_err();
	assert_eq!(err.code, "CHANNEL_003");
}

#[test]
fn test_negative_count_closes_channel() {
	let launcher = MockLauncher::new(|_| Response::Raw((-2i32).to_be_bytes().to_vec()));
	let mut channel = WorkerChannel::new(Arc::new(launcher));
	channel.start().unwrap();
	channel.register(&registration()).unwrap();

	let err = channel.call(&ints(1, 2)).unwrap_err();
	assert_eq!(err.code, "CHANNEL_002");
	assert!(channel.is_closed());
}

#[test]
fn test_invalid_utf8_exception_closes_channel() {
	let mut raw = Vec::new();
	for v in [1, EXCEPTION_TAG, 1] {
		raw.extend_from_slice(&v.to_be_bytes());
	}
	raw.push(0xff);
	let launcher = MockLauncher::new(move |_| Response::Raw(raw.clone()));
	let mut channel = WorkerChannel::new(Arc::new(launcher));
	channel.start().unwrap();
	channel.register(&registration()).unwrap();

	let err = channel.call(&ints(1, 2)).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Channel);
	assert!(channel.is_closed());
}

#[test]
fn test_launch_failure_closes_channel() {
	let launcher = MockLauncher::failing();
	let mut channel = WorkerChannel::new(Arc::new(launcher));
	let err = channel.start().unwrap_err();
	assert_eq!(err.code, "CHANNEL_004");
	assert!(channel.is_closed());
	assert_eq!(channel.start().unwrap_err().code, "CHANNEL_003");
}

#[test]
fn test_encoding_error_keeps_channel() {
	let launcher = adder();
	let mut channel = WorkerChannel::new(Arc::new(launcher));
	channel.start().unwrap();
	channel.register(&registration()).unwrap();

	let operands = vec![Operand::new(WireTag::Int4, Value::Float8(1.0))];
	let err = channel.call(&operands).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Internal);
	assert_eq!(channel.state(), ChannelState::Idle);
}
