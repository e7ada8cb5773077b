//! Error types for RESP parsing and encoding.

use thiserror::Error;

use crate::types::RespKind;

/// Main error type for RESP operations.
#[derive(Error, Debug)]
pub enum RespError {
	/// Error during parsing
	#[error("Parse error: {0}")]
	Parse(#[from] ParseError),

	/// Error during encoding
	#[error("Encode error: {0}")]
	Encode(#[from] EncodeError),

	/// A typed accessor found a value of another kind
	#[error("Type mismatch: expected {expected}, found {found}")]
	TypeMismatch {
		expected: &'static str,
		found: RespKind,
	},

	/// A string payload was not valid UTF-8
	#[error("UTF-8 error: {0}")]
	Utf8(String),

	/// I/O error from the underlying byte source or sink
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// The read deadline elapsed before a complete frame arrived
	#[error("Read timed out")]
	Timeout,
}

impl RespError {
	/// True when the source reached end-of-input inside (or before) a frame.
	pub fn is_eof(&self) -> bool {
		matches!(self, RespError::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
	}
}

/// Errors that can occur during RESP parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
	/// Input shorter than the smallest possible frame
	#[error("Input too short: {0} bytes")]
	TooShort(usize),

	/// Leading byte is not a RESP2 type marker
	#[error("Unknown type marker: {0:?}")]
	UnknownType(char),

	/// Non-numeric bulk length or array count
	#[error("Malformed length: {0}")]
	MalformedLength(String),

	/// Non-numeric or out-of-range integer payload
	#[error("Malformed integer: {0}")]
	MalformedInteger(String),

	/// Declared length above the maximum or below -1
	#[error("Length out of bounds: {0}")]
	LengthOutOfBounds(i64),

	/// Fewer bytes than declared, or a missing/incorrect CRLF terminator
	#[error("Truncated frame")]
	Truncated,

	/// Arrays nested deeper than the configured limit
	#[error("Nesting too deep: more than {0} levels")]
	NestingTooDeep(usize),

	/// A declared count or a pending line exceeds the configured limit
	#[error("Too large: {0}")]
	TooLarge(String),

	/// Bytes left over after the single expected frame
	#[error("Trailing bytes after frame: {0}")]
	TrailingBytes(usize),
}

/// Errors that can occur during RESP encoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
	/// Line-framed payload contains CR or LF
	#[error("Invalid payload: {0}")]
	InvalidPayload(String),

	/// Bulk payload above the maximum bulk length
	#[error("Value too large: {0} bytes")]
	ValueTooLarge(usize),
}
