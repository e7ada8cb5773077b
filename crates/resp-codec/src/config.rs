//! Decoder limits and stream read timeout.

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::utils::MAX_BULK_LEN;

pub const DEFAULT_MAX_DEPTH: usize = 512;
pub const DEFAULT_MAX_ARRAY_LEN: usize = 1024 * 1024;
pub const DEFAULT_MAX_LINE_LEN: usize = 64 * 1024;

/// Limits applied while decoding untrusted input.
///
/// Every field has a default, so a partial table deserializes:
///
/// ```rust
/// let config: resp_codec::DecodeConfig = toml::from_str("max_depth = 8").unwrap();
/// assert_eq!(config.max_depth, 8);
/// assert_eq!(config.max_bulk_len, 512 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
	/// Largest accepted bulk string length
	pub max_bulk_len: usize,
	/// Deepest accepted array nesting
	pub max_depth: usize,
	/// Largest accepted array element count
	pub max_array_len: usize,
	/// Stream mode: bytes buffered while looking for a CRLF
	pub max_line_len: usize,
	/// Stream mode: milliseconds a single decode call may wait for data
	pub read_timeout: Option<u64>,
}

impl Default for DecodeConfig {
	fn default() -> Self {
		Self {
			max_bulk_len: MAX_BULK_LEN,
			max_depth: DEFAULT_MAX_DEPTH,
			max_array_len: DEFAULT_MAX_ARRAY_LEN,
			max_line_len: DEFAULT_MAX_LINE_LEN,
			read_timeout: None,
		}
	}
}

impl DecodeConfig {
	pub fn with_max_bulk_len(mut self, max_bulk_len: usize) -> Self {
		self.max_bulk_len = max_bulk_len;
		self
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn with_max_array_len(mut self, max_array_len: usize) -> Self {
		self.max_array_len = max_array_len;
		self
	}

	pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
		self.max_line_len = max_line_len;
		self
	}

	pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
		self.read_timeout = timeout.map(|t| t.as_millis() as u64);
		self
	}

	pub fn read_timeout(&self) -> Option<Duration> {
		self.read_timeout.map(Duration::from_millis)
	}
}
