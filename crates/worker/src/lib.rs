// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod channel;
pub mod config;
pub mod error;
pub mod launcher;
pub mod process;
pub mod protocol;

pub use channel::{ChannelState, WorkerChannel};
pub use config::{StderrMode, WorkerConfig};
pub use error::FrameError;
pub use launcher::{ProcessLauncher, WorkerConnection, WorkerLauncher};
pub use process::WorkerProcess;
pub use protocol::{Frame, Operand, Registration, Reply};
