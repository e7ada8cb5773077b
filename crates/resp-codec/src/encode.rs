//! RESP encoder.
//!
//! The free functions map one value to its exact wire bytes. Arrays are built
//! from already encoded elements, so composite replies nest by composition:
//!
//! ```rust
//! use resp_codec::encode;
//!
//! let reply = encode::encode_array(&[encode::encode_integer(1), encode::encode_null()]);
//! assert_eq!(&reply[..], b"*2\r\n:1\r\n$-1\r\n");
//! ```

use bytes::BufMut;
use bytes::Bytes;
use bytes::BytesMut;

use crate::error::EncodeError;
use crate::types::RespValue;
use crate::utils::*;

/// `+OK\r\n`
pub const OK: &[u8] = b"+OK\r\n";

/// `+PONG\r\n`
pub const PONG: &[u8] = b"+PONG\r\n";

const NULL_BULK_STRING: &[u8] = b"$-1\r\n";
const NULL_ARRAY: &[u8] = b"*-1\r\n";

/// Trait for encoding RESP values.
pub trait RespEncoder {
	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError>;

	fn encode(&self) -> Result<Bytes, EncodeError> {
		let mut buf = BytesMut::new();
		self.encode_to(&mut buf)?;
		Ok(buf.freeze())
	}
}

impl RespEncoder for RespValue {
	fn encode_to(&self, buf: &mut BytesMut) -> Result<(), EncodeError> {
		match self {
			RespValue::SimpleString(s) => put_line(buf, SIMPLE_STRING, s)?,
			RespValue::Error(e) => put_line(buf, ERROR, e)?,
			RespValue::Integer(i) => put_integer(buf, *i),
			RespValue::BulkString(Some(s)) => put_bulk_string(buf, s)?,
			RespValue::BulkString(None) => buf.put_slice(NULL_BULK_STRING),
			RespValue::Array(Some(arr)) => {
				put_length(buf, ARRAY, arr.len());
				for value in arr {
					value.encode_to(buf)?;
				}
			}
			RespValue::Array(None) => buf.put_slice(NULL_ARRAY),
		}
		Ok(())
	}
}

/// Encode a simple string. Fails if `text` contains CR or LF.
pub fn encode_simple_string(text: impl AsRef<[u8]>) -> Result<Bytes, EncodeError> {
	let text = text.as_ref();
	let mut buf = BytesMut::with_capacity(text.len() + 3);
	put_line(&mut buf, SIMPLE_STRING, text)?;
	Ok(buf.freeze())
}

/// Encode an error string. Fails if `text` contains CR or LF.
pub fn encode_error(text: impl AsRef<[u8]>) -> Result<Bytes, EncodeError> {
	let text = text.as_ref();
	let mut buf = BytesMut::with_capacity(text.len() + 3);
	put_line(&mut buf, ERROR, text)?;
	Ok(buf.freeze())
}

pub fn encode_integer(i: i64) -> Bytes {
	let mut buf = BytesMut::with_capacity(24);
	put_integer(&mut buf, i);
	buf.freeze()
}

/// Encode a binary-safe bulk string. Fails above the 512 MiB bound.
pub fn encode_bulk_string(payload: impl AsRef<[u8]>) -> Result<Bytes, EncodeError> {
	let payload = payload.as_ref();
	let mut buf = BytesMut::with_capacity(payload.len() + 16);
	put_bulk_string(&mut buf, payload)?;
	Ok(buf.freeze())
}

/// `$-1\r\n`
pub fn encode_null() -> Bytes {
	Bytes::from_static(NULL_BULK_STRING)
}

/// `*-1\r\n`
pub fn encode_null_array() -> Bytes {
	Bytes::from_static(NULL_ARRAY)
}

/// Encode an array from already encoded elements, copied verbatim in order.
pub fn encode_array<B: AsRef<[u8]>>(elements: &[B]) -> Bytes {
	let body: usize = elements.iter().map(|e| e.as_ref().len()).sum();
	let mut buf = BytesMut::with_capacity(body + 16);
	put_length(&mut buf, ARRAY, elements.len());
	for element in elements {
		buf.put_slice(element.as_ref());
	}
	buf.freeze()
}

#[inline]
fn put_line(buf: &mut BytesMut, marker: u8, text: &[u8]) -> Result<(), EncodeError> {
	if let Some(pos) = memchr::memchr2(b'\r', b'\n', text) {
		return Err(EncodeError::InvalidPayload(format!(
			"line payload contains CR or LF at offset {}",
			pos
		)));
	}
	buf.put_u8(marker);
	buf.put_slice(text);
	buf.put_slice(CRLF);
	Ok(())
}

#[inline]
fn put_integer(buf: &mut BytesMut, i: i64) {
	buf.put_u8(INTEGER);
	buf.put_slice(i.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn put_length(buf: &mut BytesMut, marker: u8, length: usize) {
	buf.put_u8(marker);
	buf.put_slice(length.to_string().as_bytes());
	buf.put_slice(CRLF);
}

#[inline]
fn put_bulk_string(buf: &mut BytesMut, payload: &[u8]) -> Result<(), EncodeError> {
	check_payload_len(payload.len())?;
	put_length(buf, BULK_STRING, payload.len());
	buf.put_slice(payload);
	buf.put_slice(CRLF);
	Ok(())
}

#[inline]
fn check_payload_len(len: usize) -> Result<(), EncodeError> {
	if len > MAX_BULK_LEN {
		return Err(EncodeError::ValueTooLarge(len));
	}
	Ok(())
}
