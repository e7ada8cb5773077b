//! Utility functions and constants for RESP protocol.

use memchr::memmem;

use crate::error::ParseError;

/// CRLF line ending
pub const CRLF: &[u8] = b"\r\n";

/// Type markers for RESP2
pub const SIMPLE_STRING: u8 = b'+';
pub const ERROR: u8 = b'-';
pub const INTEGER: u8 = b':';
pub const BULK_STRING: u8 = b'$';
pub const ARRAY: u8 = b'*';

/// Largest bulk string payload accepted on the wire (512 MiB).
pub const MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Smallest complete frame, `+\r\n`.
pub const MIN_FRAME_LEN: usize = 3;

/// Find the position of the first CRLF pair in a byte slice
#[inline]
pub fn find_crlf(buf: &[u8]) -> Option<usize> {
	memmem::find(buf, CRLF)
}

/// Extract a line from buffer (without CRLF).
///
/// Returns the line and the number of bytes consumed including the CRLF.
#[inline]
pub fn extract_line(buf: &[u8]) -> Result<(&[u8], usize), ParseError> {
	match find_crlf(buf) {
		Some(pos) => Ok((&buf[..pos], pos + 2)),
		None => Err(ParseError::Truncated),
	}
}

/// Parse the payload of an integer frame
#[inline]
pub fn parse_integer(buf: &[u8]) -> Result<i64, ParseError> {
	std::str::from_utf8(buf)
		.ok()
		.and_then(|s| s.parse::<i64>().ok())
		.ok_or_else(|| ParseError::MalformedInteger(String::from_utf8_lossy(buf).into_owned()))
}

/// Parse a bulk length or array count header
#[inline]
pub fn parse_length(buf: &[u8]) -> Result<i64, ParseError> {
	std::str::from_utf8(buf)
		.ok()
		.and_then(|s| s.parse::<i64>().ok())
		.ok_or_else(|| ParseError::MalformedLength(String::from_utf8_lossy(buf).into_owned()))
}

/// Check a declared bulk length against `max`.
///
/// Returns `None` for the Null bulk string (`-1`).
#[inline]
pub fn check_bulk_len(length: i64, max: usize) -> Result<Option<usize>, ParseError> {
	match length {
		-1 => Ok(None),
		n if n < -1 || n as u64 > max as u64 => Err(ParseError::LengthOutOfBounds(n)),
		n => Ok(Some(n as usize)),
	}
}

/// Check a declared array count against `max`.
///
/// Returns `None` for the Null array (`-1`).
#[inline]
pub fn check_array_len(count: i64, max: usize) -> Result<Option<usize>, ParseError> {
	match count {
		-1 => Ok(None),
		n if n < -1 => Err(ParseError::LengthOutOfBounds(n)),
		n if n as u64 > max as u64 => Err(ParseError::TooLarge(format!(
			"array of {} elements exceeds limit of {}",
			n, max
		))),
		n => Ok(Some(n as usize)),
	}
}
