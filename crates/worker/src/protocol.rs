// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Wire format spoken with worker processes.
//!
//! All integers are big-endian `i32`. The two directions frame values
//! differently:
//!
//! - operands sent to the worker are `[tag][length][payload]`, where
//!   fixed-width tags carry their exact size as length and `length = -5`
//!   marks an absent value with no payload;
//! - values in a reply are `[tag][payload]` for fixed-width tags and
//!   `[tag][length][bytes]` for blobs, again with `-5` as the absent length.
//!
//! A reply is `[count]` followed by `count` value frames; a frame with tag
//! `-3` carries `[length][utf8 message]` and ends the reply as a remote
//! exception.

use std::{
	io::{Read, Write},
	sync::Arc,
};

use strata_type::{Blob, Value, WireTag};

use crate::error::FrameError;

pub const EXCEPTION_TAG: i32 = -3;
pub const NULL_LENGTH: i32 = -5;
pub const PROTOCOL_VERSION: i32 = 1;
/// Number of operands sent per row by binary functions.
pub const BINARY_ARITY: i32 = 2;

#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
	Value(Value),
	Exception(String),
}

/// Response to one row.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
	Values(Vec<Value>),
	/// The worker raised while evaluating the row; the text is passed through unchanged.
	Exception(String),
}

/// An operand as sent to the worker: the tag of its column type and the value.
#[derive(Clone, Debug, PartialEq)]
pub struct Operand {
	pub tag: WireTag,
	pub value: Value,
}

impl Operand {
	pub fn new(tag: WireTag, value: Value) -> Self {
		Self {
			tag,
			value,
		}
	}
}

/// One-time function registration sent before the first row.
#[derive(Clone, Debug, PartialEq)]
pub struct Registration {
	pub payload: Arc<[u8]>,
	pub arity: i32,
	pub output: WireTag,
	pub version: i32,
}

impl Registration {
	pub fn binary(payload: Arc<[u8]>, output: WireTag) -> Self {
		Self {
			payload,
			arity: BINARY_ARITY,
			output,
			version: PROTOCOL_VERSION,
		}
	}

	/// `[payload length][payload][arity][output tag][version]`
	pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), FrameError> {
		write_i32(w, length_of(self.payload.len())?)?;
		w.write_all(&self.payload)?;
		write_i32(w, self.arity)?;
		write_i32(w, self.output.to_i32())?;
		write_i32(w, self.version)?;
		Ok(())
	}

	pub fn read_from<R: Read>(r: &mut R) -> Result<Registration, FrameError> {
		let length = read_i32(r)?;
		if length < 0 {
			return Err(FrameError::InvalidLength {
				tag: 0,
				length,
			});
		}
		let payload = read_bytes(r, length)?;
		let arity = read_i32(r)?;
		let tag = read_i32(r)?;
		let output = WireTag::from_i32(tag).ok_or(FrameError::UnknownTag(tag))?;
		let version = read_i32(r)?;
		Ok(Registration {
			payload: Arc::from(payload),
			arity,
			output,
			version,
		})
	}
}

pub fn write_i32<W: Write>(w: &mut W, value: i32) -> Result<(), FrameError> {
	w.write_all(&value.to_be_bytes())?;
	Ok(())
}

pub fn read_i32<R: Read>(r: &mut R) -> Result<i32, FrameError> {
	let mut buf = [0u8; 4];
	r.read_exact(&mut buf)?;
	Ok(i32::from_be_bytes(buf))
}

fn length_of(len: usize) -> Result<i32, FrameError> {
	i32::try_from(len).map_err(|_| FrameError::InvalidLength {
		tag: WireTag::Blob.to_i32(),
		length: i32::MAX,
	})
}

fn read_bytes<R: Read>(r: &mut R, length: i32) -> Result<Vec<u8>, FrameError> {
	let expected = length as usize;
	let mut buf = Vec::new();
	r.take(expected as u64).read_to_end(&mut buf)?;
	if buf.len() != expected {
		return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
	}
	Ok(buf)
}

/// Writes `value` as a frame of `tag`. Values of a narrower type are widened
/// to the tag's type; undefined values are written with the null length.
pub fn write_value_frame<W: Write>(w: &mut W, tag: WireTag, value: &Value) -> Result<(), FrameError> {
	write_i32(w, tag.to_i32())?;

	let value = match value.get_type() {
		None => return write_i32(w, NULL_LENGTH),
		Some(ty) if ty == tag.ty() => value.clone(),
		Some(ty) => value.clone().widen(tag.ty()).ok_or(FrameError::ValueMismatch {
			tag,
			actual: ty,
		})?,
	};

	match value {
		Value::Int4(v) => {
			write_i32(w, 4)?;
			w.write_all(&v.to_be_bytes())?;
		}
		Value::Int8(v) => {
			write_i32(w, 8)?;
			w.write_all(&v.to_be_bytes())?;
		}
		Value::Float4(v) => {
			write_i32(w, 4)?;
			w.write_all(&v.to_bits().to_be_bytes())?;
		}
		Value::Float8(v) => {
			write_i32(w, 8)?;
			w.write_all(&v.to_bits().to_be_bytes())?;
		}
		Value::Blob(b) => {
			write_i32(w, length_of(b.len())?)?;
			w.write_all(b.as_bytes())?;
		}
		other => {
			return Err(FrameError::ValueMismatch {
				tag,
				actual: other.get_type().unwrap_or(tag.ty()),
			});
		}
	}
	Ok(())
}

/// Writes `value` as a reply frame tagged with its own type.
pub fn write_tagged_value<W: Write>(w: &mut W, value: &Value) -> Result<(), FrameError> {
	let ty = value.get_type().ok_or(FrameError::UntaggedValue)?;
	let tag = ty.wire_tag().ok_or(FrameError::ValueMismatch {
		tag: WireTag::Blob,
		actual: ty,
	})?;
	write_i32(w, tag.to_i32())?;

	match value {
		Value::Int4(v) => w.write_all(&v.to_be_bytes())?,
		Value::Int8(v) => w.write_all(&v.to_be_bytes())?,
		Value::Float4(v) => w.write_all(&v.to_bits().to_be_bytes())?,
		Value::Float8(v) => w.write_all(&v.to_bits().to_be_bytes())?,
		Value::Blob(b) => {
			write_i32(w, length_of(b.len())?)?;
			w.write_all(b.as_bytes())?;
		}
		_ => {
			return Err(FrameError::ValueMismatch {
				tag,
				actual: ty,
			});
		}
	}
	Ok(())
}

pub fn write_exception_frame<W: Write>(w: &mut W, message: &str) -> Result<(), FrameError> {
	write_i32(w, EXCEPTION_TAG)?;
	write_i32(w, length_of(message.len())?)?;
	w.write_all(message.as_bytes())?;
	Ok(())
}

/// Reads one frame of a reply.
pub fn read_frame<R: Read>(r: &mut R) -> Result<Frame, FrameError> {
	let raw = read_i32(r)?;

	if raw == EXCEPTION_TAG {
		let length = read_i32(r)?;
		if length < 0 {
			return Err(FrameError::InvalidLength {
				tag: raw,
				length,
			});
		}
		let message = String::from_utf8(read_bytes(r, length)?)?;
		return Ok(Frame::Exception(message));
	}

	let tag = WireTag::from_i32(raw).ok_or(FrameError::UnknownTag(raw))?;
	if tag != WireTag::Blob {
		return Ok(Frame::Value(read_fixed(r, tag)?));
	}

	match read_i32(r)? {
		NULL_LENGTH => Ok(Frame::Value(Value::Undefined)),
		length if length < 0 => Err(FrameError::InvalidLength {
			tag: raw,
			length,
		}),
		length => Ok(Frame::Value(Value::Blob(Blob::new(read_bytes(r, length)?)))),
	}
}

/// Reads one operand frame, as written by [`write_value_frame`].
pub fn read_operand_frame<R: Read>(r: &mut R) -> Result<Value, FrameError> {
	let raw = read_i32(r)?;
	let tag = WireTag::from_i32(raw).ok_or(FrameError::UnknownTag(raw))?;
	let length = read_i32(r)?;
	if length == NULL_LENGTH {
		return Ok(Value::Undefined);
	}

	let invalid = FrameError::InvalidLength {
		tag: raw,
		length,
	};
	match tag.fixed_size() {
		Some(size) if size != length => Err(invalid),
		None if length < 0 => Err(invalid),
		Some(_) => read_fixed(r, tag),
		None => Ok(Value::Blob(Blob::new(read_bytes(r, length)?))),
	}
}

fn read_fixed<R: Read>(r: &mut R, tag: WireTag) -> Result<Value, FrameError> {
	let value = match tag {
		WireTag::Int4 => {
			let mut buf = [0u8; 4];
			r.read_exact(&mut buf)?;
			Value::Int4(i32::from_be_bytes(buf))
		}
		WireTag::Int8 => {
			let mut buf = [0u8; 8];
			r.read_exact(&mut buf)?;
			Value::Int8(i64::from_be_bytes(buf))
		}
		WireTag::Float4 => {
			let mut buf = [0u8; 4];
			r.read_exact(&mut buf)?;
			Value::Float4(f32::from_bits(u32::from_be_bytes(buf)))
		}
		WireTag::Float8 => {
			let mut buf = [0u8; 8];
			r.read_exact(&mut buf)?;
			Value::Float8(f64::from_bits(u64::from_be_bytes(buf)))
		}
		WireTag::Blob => {
			return Err(FrameError::ValueMismatch {
				tag,
				actual: tag.ty(),
			});
		}
	};
	Ok(value)
}

/// Reads `[count]` and up to `count` frames. An exception frame ends the
/// reply early.
pub fn read_reply<R: Read>(r: &mut R) -> Result<Reply, FrameError> {
	let count = read_i32(r)?;
	if count < 0 {
		return Err(FrameError::NegativeCount(count));
	}

	let mut values = Vec::with_capacity((count as usize).min(1024));
	for _ in 0..count {
		match read_frame(r)? {
			Frame::Value(value) => values.push(value),
			Frame::Exception(message) => return Ok(Reply::Exception(message)),
		}
	}
	Ok(Reply::Values(values))
}

/// Worker side of [`read_reply`]. An exception is sent as a count of one
/// followed by the exception frame.
pub fn write_reply<W: Write>(w: &mut W, reply: &Reply) -> Result<(), FrameError> {
	match reply {
		Reply::Values(values) => {
			write_i32(w, length_of(values.len())?)?;
			for value in values {
				write_tagged_value(w, value)?;
			}
		}
		Reply::Exception(message) => {
			write_i32(w, 1)?;
			write_exception_frame(w, message)?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::{io::Cursor, sync::Arc};

	use strata_type::{Blob, Value, WireTag};

	use super::*;

	fn ints(values: &[i32]) -> Vec<u8> {
		values.iter().flat_map(|v| v.to_be_bytes()).collect()
	}

	#[test]
	fn test_write_int4() {
		let mut out = Vec::new();
		write_value_frame(&mut out, WireTag::Int4, &Value::Int4(7)).unwrap();
		assert_eq!(out, ints(&[1, 4, 7]));
	}

	#[test]
	fn test_write_undefined() {
		let mut out = Vec::new();
		write_value_frame(&mut out, WireTag::Blob, &Value::Undefined).unwrap();
		assert_eq!(out, ints(&[5, NULL_LENGTH]));
	}

	#[test]
	fn test_write_widens() {
		let mut out = Vec::new();
		write_value_frame(&mut out, WireTag::Int8, &Value::Int4(-1)).unwrap();
		let mut expected = ints(&[2, 8]);
		expected.extend_from_slice(&(-1i64).to_be_bytes());
		assert_eq!(out, expected);
	}

	#[test]
	fn test_write_mismatch() {
		let mut out = Vec::new();
		let err = write_value_frame(&mut out, WireTag::Int4, &Value::Float8(1.5)).unwrap_err();
		assert!(matches!(err, FrameError::ValueMismatch { .. }));
	}

	#[test]
	fn test_write_float8_bits() {
		let mut out = Vec::new();
		write_value_frame(&mut out, WireTag::Float8, &Value::Float8(0.1)).unwrap();
		let mut expected = ints(&[4, 8]);
		expected.extend_from_slice(&0.1f64.to_bits().to_be_bytes());
		assert_eq!(out, expected);
	}

	#[test]
	fn test_registration_layout() {
		let registration = Registration::binary(Arc::from(&b"abc"[..]), WireTag::Int8);
		let mut out = Vec::new();
		registration.write_to(&mut out).unwrap();

		let mut expected = ints(&[3]);
		expected.extend_from_slice(b"abc");
		expected.extend(ints(&[2, 2, 1]));
		assert_eq!(out, expected);

		let decoded = Registration::read_from(&mut Cursor::new(out)).unwrap();
		assert_eq!(decoded, registration);
	}

	#[test]
	fn test_read_reply_values() {
		let mut bytes = ints(&[2, 1, 5, 5, 2]);
		bytes.extend_from_slice(&[0xde, 0xad]);
		let reply = read_reply(&mut Cursor::new(bytes)).unwrap();
		assert_eq!(reply, Reply::Values(vec![Value::Int4(5), Value::Blob(Blob::from_slice(&[0xde, 0xad]))]));
	}

	#[test]
	fn test_read_reply_empty() {
		let reply = read_reply(&mut Cursor::new(ints(&[0]))).unwrap();
		assert_eq!(reply, Reply::Values(vec![]));
	}

	#[test]
	fn test_read_null_and_empty_blob() {
		let bytes = ints(&[2, 5, NULL_LENGTH, 5, 0]);
		let reply = read_reply(&mut Cursor::new(bytes)).unwrap();
		assert_eq!(reply, Reply::Values(vec![Value::Undefined, Value::Blob(Blob::empty())]));
	}

	#[test]
	fn test_read_exception() {
		let mut bytes = ints(&[1, EXCEPTION_TAG, 15]);
		bytes.extend_from_slice(b"ValueError: bad");
		let reply = read_reply(&mut Cursor::new(bytes)).unwrap();
		assert_eq!(reply, Reply::Exception("ValueError: bad".to_string()));
	}

	#[test]
	fn test_read_negative_count() {
		let err = read_reply(&mut Cursor::new(ints(&[-1]))).unwrap_err();
		assert!(matches!(err, FrameError::NegativeCount(-1)));
	}

	#[test]
	fn test_read_reply_fixed_without_length() {
		let mut bytes = ints(&[4, 1, 5, 2]);
		bytes.extend_from_slice(&(-7i64).to_be_bytes());
		bytes.extend(ints(&[3]));
		bytes.extend_from_slice(&1.5f32.to_bits().to_be_bytes());
		bytes.extend(ints(&[4]));
		bytes.extend_from_slice(&0.1f64.to_bits().to_be_bytes());

		let reply = read_reply(&mut Cursor::new(bytes)).unwrap();
		assert_eq!(
			reply,
			Reply::Values(vec![Value::Int4(5), Value::Int8(-7), Value::Float4(1.5), Value::Float8(0.1)])
		);
	}

	#[test]
	fn test_read_unknown_tag() {
		let err = read_reply(&mut Cursor::new(ints(&[1, 9, 4, 0]))).unwrap_err();
		assert!(matches!(err, FrameError::UnknownTag(9)));
	}

	#[test]
	fn test_read_negative_blob_length() {
		let err = read_reply(&mut Cursor::new(ints(&[1, 5, -2]))).unwrap_err();
		assert!(matches!(
			err,
			FrameError::InvalidLength {
				tag: 5,
				length: -2
			}
		));
	}

	#[test]
	fn test_read_operand_frames() {
		let mut bytes = Vec::new();
		write_value_frame(&mut bytes, WireTag::Int8, &Value::Int4(3)).unwrap();
		write_value_frame(&mut bytes, WireTag::Blob, &Value::Undefined).unwrap();
		write_value_frame(&mut bytes, WireTag::Blob, &Value::Blob(Blob::from_slice(b"xy"))).unwrap();

		let mut cursor = Cursor::new(bytes);
		assert_eq!(read_operand_frame(&mut cursor).unwrap(), Value::Int8(3));
		assert_eq!(read_operand_frame(&mut cursor).unwrap(), Value::Undefined);
		assert_eq!(read_operand_frame(&mut cursor).unwrap(), Value::Blob(Blob::from_slice(b"xy")));
	}

	#[test]
	fn test_read_operand_wrong_fixed_length() {
		let err = read_operand_frame(&mut Cursor::new(ints(&[2, 4, 0]))).unwrap_err();
		assert!(matches!(
			err,
			FrameError::InvalidLength {
				tag: 2,
				length: 4
			}
		));
	}

	#[test]
	fn test_read_invalid_utf8() {
		let mut bytes = ints(&[1, EXCEPTION_TAG, 2]);
		bytes.extend_from_slice(&[0xff, 0xfe]);
		let err = read_reply(&mut Cursor::new(bytes)).unwrap_err();
		assert!(matches!(err, FrameError::InvalidUtf8(_)));
	}

	#[test]
	fn test_read_truncated() {
		let err = read_reply(&mut Cursor::new(ints(&[1, 2, 4]))).unwrap_err();
		assert!(matches!(err, FrameError::Io(_)));
	}

	#[test]
	fn test_reply_through_writer() {
		let reply = Reply::Values(vec![Value::Int8(1), Value::Float4(2.5), Value::Float8(-3.25)]);
		let mut out = Vec::new();
		write_reply(&mut out, &reply).unwrap();
		assert_eq!(&out[..12], ints(&[3, 2, 0]).as_slice());
		assert_eq!(read_reply(&mut Cursor::new(out)).unwrap(), reply);

		let exception = Reply::Exception("boom".to_string());
		let mut out = Vec::new();
		write_reply(&mut out, &exception).unwrap();
		assert_eq!(read_reply(&mut Cursor::new(out)).unwrap(), exception);
	}
}
