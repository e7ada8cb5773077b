//! Buffer-mode RESP decoder.
//!
//! Parses complete in-memory frames. Each call reports how many bytes the
//! value occupied, so back-to-back frames in one slice can be walked by the
//! caller.

use bytes::Bytes;

use crate::config::DecodeConfig;
use crate::error::ParseError;
use crate::error::RespError;
use crate::types::RespValue;
use crate::utils::*;

/// Parse one RESP value from the front of `buf`.
///
/// Returns the number of bytes consumed and the value. Bytes after the frame
/// are left untouched.
pub fn parse(buf: &[u8]) -> Result<(usize, RespValue), ParseError> {
	parse_with_config(buf, &DecodeConfig::default())
}

/// [`parse`] with explicit decoding limits.
pub fn parse_with_config(
	buf: &[u8],
	config: &DecodeConfig,
) -> Result<(usize, RespValue), ParseError> {
	if buf.len() < MIN_FRAME_LEN {
		return Err(ParseError::TooShort(buf.len()));
	}
	parse_value(buf, config, 0)
}

/// Decode a slice that holds exactly one frame.
pub fn decode(buf: &[u8]) -> Result<RespValue, ParseError> {
	decode_with_config(buf, &DecodeConfig::default())
}

/// [`decode`] with explicit decoding limits.
pub fn decode_with_config(buf: &[u8], config: &DecodeConfig) -> Result<RespValue, ParseError> {
	let (consumed, value) = parse_with_config(buf, config)?;
	if consumed != buf.len() {
		return Err(ParseError::TrailingBytes(buf.len() - consumed));
	}
	Ok(value)
}

/// Decode every frame of a back-to-back sequence.
///
/// An empty slice is an empty sequence. Any malformed or incomplete frame
/// fails the whole call.
pub fn decode_all(buf: &[u8]) -> Result<Vec<RespValue>, ParseError> {
	let config = DecodeConfig::default();
	let mut values = Vec::new();
	let mut pos = 0;
	while pos < buf.len() {
		let (consumed, value) = parse_with_config(&buf[pos..], &config)?;
		values.push(value);
		pos += consumed;
	}
	Ok(values)
}

/// Decode one frame and require a simple string or non-null bulk string.
pub fn decode_as_string(buf: &[u8]) -> Result<String, RespError> {
	decode(buf)?.into_string()
}

/// Decode one frame and require an integer.
pub fn decode_as_integer(buf: &[u8]) -> Result<i64, RespError> {
	decode(buf)?.into_integer()
}

/// Decode one frame and require an array. A Null array yields `None`.
pub fn decode_as_array(buf: &[u8]) -> Result<Option<Vec<RespValue>>, RespError> {
	decode(buf)?.into_array()
}

fn parse_value(
	buf: &[u8],
	config: &DecodeConfig,
	depth: usize,
) -> Result<(usize, RespValue), ParseError> {
	let marker = *buf.first().ok_or(ParseError::Truncated)?;
	if !matches!(marker, SIMPLE_STRING | ERROR | INTEGER | BULK_STRING | ARRAY) {
		return Err(ParseError::UnknownType(marker as char));
	}

	let (line, line_len) = extract_line(&buf[1..])?;
	let header_len = 1 + line_len;

	match marker {
		SIMPLE_STRING => Ok((
			header_len,
			RespValue::SimpleString(Bytes::copy_from_slice(line)),
		)),
		ERROR => Ok((header_len, RespValue::Error(Bytes::copy_from_slice(line)))),
		INTEGER => Ok((header_len, RespValue::Integer(parse_integer(line)?))),
		BULK_STRING => {
			let Some(length) = check_bulk_len(parse_length(line)?, config.max_bulk_len)? else {
				return Ok((header_len, RespValue::BulkString(None)));
			};
			let end = header_len.saturating_add(length);
			match buf.get(end..end.saturating_add(2)) {
				Some(CRLF) => Ok((
					end + 2,
					RespValue::BulkString(Some(Bytes::copy_from_slice(&buf[header_len..end]))),
				)),
				_ => Err(ParseError::Truncated),
			}
		}
		_ => {
			if depth >= config.max_depth {
				return Err(ParseError::NestingTooDeep(config.max_depth));
			}
			let Some(count) = check_array_len(parse_length(line)?, config.max_array_len)? else {
				return Ok((header_len, RespValue::Array(None)));
			};

			// Every element needs at least MIN_FRAME_LEN bytes.
			let remaining = buf.len() - header_len;
			let mut elements = Vec::with_capacity(count.min(remaining / MIN_FRAME_LEN));
			let mut pos = header_len;
			for _ in 0..count {
				let (consumed, value) = parse_value(&buf[pos..], config, depth + 1)?;
				elements.push(value);
				pos += consumed;
			}
			Ok((pos, RespValue::Array(Some(elements))))
		}
	}
}
