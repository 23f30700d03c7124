// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod value;

pub use error::{Error, ErrorKind};
pub use value::{
	Value,
	blob::Blob,
	datetime::DateTime,
	r#type::{GetType, Type},
	wire::WireTag,
};

pub type Result<T> = std::result::Result<T, Error>;
