// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Blocking in-memory byte pipes.

use std::io::{self, Read, Write};

use crossbeam_channel::{Receiver, Sender, unbounded};

/// Writing half of a pipe. Dropping it signals end of stream to the reader.
pub struct PipeWriter {
	sender: Sender<Vec<u8>>,
}

/// Reading half of a pipe. Reads block until data arrives and return 0 once
/// the writer is gone.
pub struct PipeReader {
	receiver: Receiver<Vec<u8>>,
	chunk: Vec<u8>,
	pos: usize,
}

pub fn pipe() -> (PipeWriter, PipeReader) {
	let (sender, receiver) = unbounded();
	(
		PipeWriter {
			sender,
		},
		PipeReader {
			receiver,
			chunk: Vec::new(),
			pos: 0,
		},
	)
}

impl Write for PipeWriter {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		if buf.is_empty() {
			return Ok(0);
		}
		self.sender.send(buf.to_vec()).map_err(|_| io::Error::from(io::ErrorKind::BrokenPipe))?;
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl Read for PipeReader {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		if buf.is_empty() {
			return Ok(0);
		}
		while self.pos >= self.chunk.len() {
			match self.receiver.recv() {
				Ok(chunk) => {
					self.chunk = chunk;
					self.pos = 0;
				}
				Err(_) => return Ok(0),
			}
		}
		let n = buf.len().min(self.chunk.len() - self.pos);
		buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
		self.pos += n;
		Ok(n)
	}
}

/// One end of a bidirectional pipe.
pub struct Duplex {
	pub reader: PipeReader,
	pub writer: PipeWriter,
}

/// Two connected ends: what one writes, the other reads.
pub fn duplex() -> (Duplex, Duplex) {
	let (left_writer, right_reader) = pipe();
	let (right_writer, left_reader) = pipe();
	(
		Duplex {
			reader: left_reader,
			writer: left_writer,
		},
		Duplex {
			reader: right_reader,
			writer: right_writer,
		},
	)
}

#[cfg(test)]
mod tests {
	use std::{
		io::{Read, Write},
		thread,
	};

	use super::{duplex, pipe};

	#[test]
	fn test_pipe_eof_after_writer_drop() {
		let (mut writer, mut reader) = pipe();
		writer.write_all(b"abc").unwrap();
		writer.write_all(b"de").unwrap();
		drop(writer);

		let mut out = Vec::new();
		reader.read_to_end(&mut out).unwrap();
		assert_eq!(out, b"abcde");
	}

	#[test]
	fn test_write_after_reader_drop() {
		let (mut writer, reader) = pipe();
		drop(reader);
		let err = writer.write_all(b"x").unwrap_err();
		assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe);
	}

	#[test]
	fn test_duplex_echo() {
		let (mut ours, mut theirs) = duplex();
		let peer = thread::spawn(move || {
			let mut buf = [0u8; 4];
			theirs.reader.read_exact(&mut buf).unwrap();
			theirs.writer.write_all(&buf).unwrap();
		});

		ours.writer.write_all(b"ping").unwrap();
		let mut buf = [0u8; 4];
		ours.reader.read_exact(&mut buf).unwrap();
		assert_eq!(&buf, b"ping");
		peer.join().unwrap();
	}
}
