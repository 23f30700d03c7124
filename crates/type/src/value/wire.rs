// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Fixed mapping between value types and the integer tags used on the
//! external worker protocol.

use crate::value::r#type::Type;

#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WireTag {
	Int4 = 1,
	Int8 = 2,
	Float4 = 3,
	Float8 = 4,
	Blob = 5,
}

impl WireTag {
	pub fn to_i32(self) -> i32 {
		self as i32
	}

	pub fn from_i32(tag: i32) -> Option<WireTag> {
		match tag {
			1 => Some(WireTag::Int4),
			2 => Some(WireTag::Int8),
			3 => Some(WireTag::Float4),
			4 => Some(WireTag::Float8),
			5 => Some(WireTag::Blob),
			_ => None,
		}
	}

	pub fn ty(self) -> Type {
		match self {
			WireTag::Int4 => Type::Int4,
			WireTag::Int8 => Type::Int8,
			WireTag::Float4 => Type::Float4,
			WireTag::Float8 => Type::Float8,
			WireTag::Blob => Type::Blob,
		}
	}

	/// Size of the payload for fixed-width tags.
	pub fn fixed_size(self) -> Option<i32> {
		match self {
			WireTag::Int4 | WireTag::Float4 => Some(4),
			WireTag::Int8 | WireTag::Float8 => Some(8),
			WireTag::Blob => None,
		}
	}
}

impl Type {
	/// The wire tag for this type, or `None` if the external path does
	/// not transmit it.
	pub fn wire_tag(&self) -> Option<WireTag> {
		match self {
			Type::Int4 => Some(WireTag::Int4),
			Type::Int8 => Some(WireTag::Int8),
			Type::Float4 => Some(WireTag::Float4),
			Type::Float8 => Some(WireTag::Float8),
			Type::Blob => Some(WireTag::Blob),
			Type::Boolean | Type::Utf8 | Type::DateTime => None,
		}
	}
}
