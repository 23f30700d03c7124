// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod fixture;
pub mod logging;
pub mod pipe;
pub mod worker;

pub use logging::init_tracing;
pub use pipe::{Duplex, PipeReader, PipeWriter, duplex, pipe};
pub use worker::{MockLauncher, Response};
