//! Stream-mode RESP decoder over a tokio byte source.
//!
//! [`RespReader`] decodes one complete frame per call from an [`AsyncRead`]
//! that may deliver data in arbitrary chunks. Bytes read past the end of a
//! frame stay buffered in the reader for the next call.
//!
//! Only one decode may be in flight per reader. A decode future that is
//! dropped midway, or that fails, may have consumed part of a frame; the
//! reader is then out of sync with the peer and should be discarded.

use std::io;

use bytes::Buf;
use bytes::BytesMut;
use log::debug;
use log::trace;
use tokio::io::AsyncRead;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWrite;
use tokio::io::AsyncWriteExt;
use tokio::time::Instant;

use crate::config::DecodeConfig;
use crate::encode::RespEncoder;
use crate::error::ParseError;
use crate::error::RespError;
use crate::types::RespValue;
use crate::utils::*;

const READ_CHUNK: usize = 4096;
const MAX_RESERVE: usize = 64 * 1024;
const MAX_PREALLOC_ELEMENTS: usize = 1024;

/// Buffered RESP frame reader.
pub struct RespReader<R> {
	inner: R,
	buf: BytesMut,
	config: DecodeConfig,
	deadline: Option<Instant>,
}

// A decoded header: either a finished value or the start of a non-empty array.
enum Header {
	Value(RespValue),
	Array(usize),
}

struct PendingArray {
	expected: usize,
	elements: Vec<RespValue>,
}

impl<R: AsyncRead + Unpin> RespReader<R> {
	pub fn new(inner: R) -> Self {
		Self::with_config(inner, DecodeConfig::default())
	}

	pub fn with_config(inner: R, config: DecodeConfig) -> Self {
		Self {
			inner,
			buf: BytesMut::with_capacity(READ_CHUNK),
			config,
			deadline: None,
		}
	}

	/// Bound every following decode call by an absolute deadline.
	///
	/// Takes precedence over the configured `read_timeout`. `None` clears it.
	pub fn set_deadline(&mut self, deadline: Option<Instant>) {
		self.deadline = deadline;
	}

	pub fn config(&self) -> &DecodeConfig {
		&self.config
	}

	/// Bytes received but not yet decoded.
	pub fn buffered(&self) -> &[u8] {
		&self.buf
	}

	pub fn get_ref(&self) -> &R {
		&self.inner
	}

	pub fn get_mut(&mut self) -> &mut R {
		&mut self.inner
	}

	/// Return the source. Buffered bytes are discarded.
	pub fn into_inner(self) -> R {
		self.inner
	}

	/// Decode the next frame.
	///
	/// Returns `Ok(None)` if the source ends cleanly on a frame boundary.
	/// End-of-input inside a frame fails with an `UnexpectedEof` I/O error.
	pub async fn read_value(&mut self) -> Result<Option<RespValue>, RespError> {
		let deadline = self
			.deadline
			.or_else(|| self.config.read_timeout().map(|t| Instant::now() + t));

		if self.buf.is_empty() && self.read_more(deadline).await? == 0 {
			trace!("source closed on frame boundary");
			return Ok(None);
		}

		match self.read_frame(deadline).await {
			Ok(value) => {
				trace!("decoded {} frame", value.kind());
				Ok(Some(value))
			}
			Err(e) => {
				debug!("stream decode failed: {}", e);
				Err(e)
			}
		}
	}

	/// Decode the next frame and require a simple string or non-null bulk string.
	pub async fn read_string(&mut self) -> Result<String, RespError> {
		self.next_value().await?.into_string()
	}

	/// Decode the next frame and require an integer.
	pub async fn read_integer(&mut self) -> Result<i64, RespError> {
		self.next_value().await?.into_integer()
	}

	/// Decode the next frame and require an array. A Null array yields `None`.
	pub async fn read_array(&mut self) -> Result<Option<Vec<RespValue>>, RespError> {
		self.next_value().await?.into_array()
	}

	async fn next_value(&mut self) -> Result<RespValue, RespError> {
		self.read_value().await?.ok_or_else(|| unexpected_eof().into())
	}

	async fn read_frame(&mut self, deadline: Option<Instant>) -> Result<RespValue, RespError> {
		let mut stack: Vec<PendingArray> = Vec::new();

		'frames: loop {
			let mut value = match self.read_header(deadline, stack.len()).await? {
				Header::Value(value) => value,
				Header::Array(expected) => {
					stack.push(PendingArray {
						expected,
						elements: Vec::with_capacity(expected.min(MAX_PREALLOC_ELEMENTS)),
					});
					continue;
				}
			};

			// Fold the finished value into its parents.
			while let Some(mut top) = stack.pop() {
				top.elements.push(value);
				if top.elements.len() < top.expected {
					stack.push(top);
					continue 'frames;
				}
				value = RespValue::Array(Some(top.elements));
			}
			return Ok(value);
		}
	}

	async fn read_header(
		&mut self,
		deadline: Option<Instant>,
		depth: usize,
	) -> Result<Header, RespError> {
		self.fill_to(1, deadline).await?;
		let marker = self.buf[0];
		if !matches!(marker, SIMPLE_STRING | ERROR | INTEGER | BULK_STRING | ARRAY) {
			return Err(ParseError::UnknownType(marker as char).into());
		}

		let mut line = self.read_line(deadline).await?;
		line.advance(1);

		let header = match marker {
			SIMPLE_STRING => Header::Value(RespValue::SimpleString(line.freeze())),
			ERROR => Header::Value(RespValue::Error(line.freeze())),
			INTEGER => Header::Value(RespValue::Integer(parse_integer(&line)?)),
			BULK_STRING => {
				match check_bulk_len(parse_length(&line)?, self.config.max_bulk_len)? {
					None => Header::Value(RespValue::BulkString(None)),
					Some(length) => {
						let mut payload = self.read_exact(length.saturating_add(2), deadline).await?;
						if &payload[length..] != CRLF {
							return Err(ParseError::Truncated.into());
						}
						payload.truncate(length);
						Header::Value(RespValue::BulkString(Some(payload.freeze())))
					}
				}
			}
			_ => {
				if depth >= self.config.max_depth {
					return Err(ParseError::NestingTooDeep(self.config.max_depth).into());
				}
				match check_array_len(parse_length(&line)?, self.config.max_array_len)? {
					None => Header::Value(RespValue::Array(None)),
					Some(0) => Header::Value(RespValue::Array(Some(Vec::new()))),
					Some(count) => Header::Array(count),
				}
			}
		};
		Ok(header)
	}

	/// Split off the next line, without its CRLF.
	async fn read_line(&mut self, deadline: Option<Instant>) -> Result<BytesMut, RespError> {
		// Line length counts the type byte; a trailing CR may await its LF.
		let max = self.config.max_line_len;
		let limit = max.saturating_add(1);
		let mut scanned = 0;
		loop {
			if let Some(pos) = find_crlf(&self.buf[scanned..]) {
				let end = scanned + pos;
				if end > limit {
					return Err(line_too_long(max));
				}
				let line = self.buf.split_to(end);
				self.buf.advance(2);
				return Ok(line);
			}
			scanned = self.buf.len().saturating_sub(1);
			if self.buf.len() > limit.saturating_add(1) {
				return Err(line_too_long(max));
			}
			if self.read_more(deadline).await? == 0 {
				return Err(unexpected_eof().into());
			}
		}
	}

	/// Split off exactly `n` bytes, reading until they have all arrived.
	async fn read_exact(
		&mut self,
		n: usize,
		deadline: Option<Instant>,
	) -> Result<BytesMut, RespError> {
		self.fill_to(n, deadline).await?;
		Ok(self.buf.split_to(n))
	}

	async fn fill_to(&mut self, n: usize, deadline: Option<Instant>) -> Result<(), RespError> {
		while self.buf.len() < n {
			self.buf.reserve((n - self.buf.len()).min(MAX_RESERVE));
			if self.read_more(deadline).await? == 0 {
				return Err(unexpected_eof().into());
			}
		}
		Ok(())
	}

	/// One read from the source, bounded by `deadline`. Returns 0 at end-of-input.
	async fn read_more(&mut self, deadline: Option<Instant>) -> Result<usize, RespError> {
		if self.buf.capacity() == self.buf.len() {
			self.buf.reserve(READ_CHUNK);
		}
		let read = self.inner.read_buf(&mut self.buf);
		let n = match deadline {
			Some(deadline) => tokio::time::timeout_at(deadline, read)
				.await
				.map_err(|_| RespError::Timeout)??,
			None => read.await?,
		};
		trace!("read {} bytes, {} buffered", n, self.buf.len());
		Ok(n)
	}
}

/// Decode the next frame from `reader`, treating a closed source as an error.
pub async fn decode_stream<R: AsyncRead + Unpin>(
	reader: &mut RespReader<R>,
) -> Result<RespValue, RespError> {
	reader.next_value().await
}

/// Encode `value` and write it to `sink`.
pub async fn write_value<W: AsyncWrite + Unpin>(
	sink: &mut W,
	value: &RespValue,
) -> Result<(), RespError> {
	let encoded = value.encode()?;
	sink.write_all(&encoded).await?;
	sink.flush().await?;
	Ok(())
}

fn unexpected_eof() -> io::Error {
	io::Error::new(io::ErrorKind::UnexpectedEof, "source closed mid-frame")
}

fn line_too_long(max: usize) -> RespError {
	ParseError::TooLarge(format!("line exceeds limit of {} bytes", max)).into()
}
