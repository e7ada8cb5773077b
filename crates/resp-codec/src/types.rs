//! RESP data types and value representation.

use std::fmt;

use bytes::Bytes;

use crate::error::RespError;

/// Represents a decoded RESP2 value.
///
/// Null bulk strings and Null arrays are distinct wire states and stay
/// distinct here: `BulkString(None)` is `$-1\r\n`, `Array(None)` is `*-1\r\n`
/// and `Array(Some(vec![]))` is `*0\r\n`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RespValue {
	/// Simple string: `+OK\r\n`
	SimpleString(Bytes),

	/// Error: `-ERR message\r\n`
	///
	/// Decoding an error frame succeeds; the error-ness is carried as data.
	Error(Bytes),

	/// Integer: `:1000\r\n`
	Integer(i64),

	/// Bulk string: `$6\r\nfoobar\r\n`, or Null: `$-1\r\n`
	BulkString(Option<Bytes>),

	/// Array: `*2\r\n$3\r\nfoo\r\n$3\r\nbar\r\n`, or Null array: `*-1\r\n`
	Array(Option<Vec<RespValue>>),
}

/// The tag of a [`RespValue`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RespKind {
	SimpleString,
	Error,
	Integer,
	BulkString,
	Array,
}

impl fmt::Display for RespKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			RespKind::SimpleString => "simple string",
			RespKind::Error => "error",
			RespKind::Integer => "integer",
			RespKind::BulkString => "bulk string",
			RespKind::Array => "array",
		};
		f.write_str(name)
	}
}

impl RespValue {
	/// The tag of this value
	pub fn kind(&self) -> RespKind {
		match self {
			RespValue::SimpleString(_) => RespKind::SimpleString,
			RespValue::Error(_) => RespKind::Error,
			RespValue::Integer(_) => RespKind::Integer,
			RespValue::BulkString(_) => RespKind::BulkString,
			RespValue::Array(_) => RespKind::Array,
		}
	}

	/// Check if the value is an error
	pub fn is_error(&self) -> bool {
		matches!(self, RespValue::Error(_))
	}

	/// Check if the value is a Null bulk string or a Null array
	pub fn is_null(&self) -> bool {
		matches!(self, RespValue::BulkString(None) | RespValue::Array(None))
	}

	/// Try to convert to a string slice
	pub fn as_str(&self) -> Option<&str> {
		self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
	}

	/// Try to convert to bytes
	pub fn as_bytes(&self) -> Option<&Bytes> {
		match self {
			RespValue::SimpleString(b) | RespValue::BulkString(Some(b)) => Some(b),
			_ => None,
		}
	}

	/// Try to convert to integer
	pub fn as_integer(&self) -> Option<i64> {
		match self {
			RespValue::Integer(i) => Some(*i),
			_ => None,
		}
	}

	/// Try to convert to array. A Null array yields `None`.
	pub fn as_array(&self) -> Option<&[RespValue]> {
		match self {
			RespValue::Array(Some(a)) => Some(a),
			_ => None,
		}
	}

	/// Consume a simple string or non-null bulk string as UTF-8 text.
	pub fn into_string(self) -> Result<String, RespError> {
		match self {
			RespValue::SimpleString(b) | RespValue::BulkString(Some(b)) => {
				String::from_utf8(b.to_vec()).map_err(|e| RespError::Utf8(e.to_string()))
			}
			other => Err(other.mismatch("string")),
		}
	}

	/// Consume an integer value.
	pub fn into_integer(self) -> Result<i64, RespError> {
		match self {
			RespValue::Integer(i) => Ok(i),
			other => Err(other.mismatch("integer")),
		}
	}

	/// Consume an array value. A Null array yields `Ok(None)`.
	pub fn into_array(self) -> Result<Option<Vec<RespValue>>, RespError> {
		match self {
			RespValue::Array(a) => Ok(a),
			other => Err(other.mismatch("array")),
		}
	}

	fn mismatch(&self, expected: &'static str) -> RespError {
		RespError::TypeMismatch {
			expected,
			found: self.kind(),
		}
	}

	// Convenience constructors

	/// Create a simple string value
	pub fn simple_string(s: impl Into<Bytes>) -> Self {
		RespValue::SimpleString(s.into())
	}

	/// Create a bulk string value
	pub fn bulk_string(s: impl Into<Bytes>) -> Self {
		RespValue::BulkString(Some(s.into()))
	}

	/// Create an error value
	pub fn error(e: impl Into<Bytes>) -> Self {
		RespValue::Error(e.into())
	}

	/// Create an integer value
	pub fn integer(i: i64) -> Self {
		RespValue::Integer(i)
	}

	/// Create an array value from an iterator
	pub fn array(items: impl IntoIterator<Item = RespValue>) -> Self {
		RespValue::Array(Some(items.into_iter().collect()))
	}

	/// Create a Null bulk string
	pub fn null() -> Self {
		RespValue::BulkString(None)
	}

	/// Create a Null array
	pub fn null_array() -> Self {
		RespValue::Array(None)
	}
}

impl From<&str> for RespValue {
	fn from(s: &str) -> Self {
		RespValue::bulk_string(Bytes::copy_from_slice(s.as_bytes()))
	}
}

impl From<String> for RespValue {
	fn from(s: String) -> Self {
		RespValue::bulk_string(s)
	}
}

impl From<&[u8]> for RespValue {
	fn from(b: &[u8]) -> Self {
		RespValue::bulk_string(Bytes::copy_from_slice(b))
	}
}

impl From<Bytes> for RespValue {
	fn from(b: Bytes) -> Self {
		RespValue::bulk_string(b)
	}
}

impl From<i64> for RespValue {
	fn from(i: i64) -> Self {
		RespValue::Integer(i)
	}
}

impl<T: Into<RespValue>> From<Vec<T>> for RespValue {
	fn from(v: Vec<T>) -> Self {
		RespValue::array(v.into_iter().map(Into::into))
	}
}

impl<T: Into<RespValue>> From<Option<T>> for RespValue {
	fn from(o: Option<T>) -> Self {
		match o {
			Some(v) => v.into(),
			None => RespValue::null(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_is_error() {
		let err = RespValue::error("ERR");
		assert!(err.is_error());

		let ok = RespValue::simple_string("OK");
		assert!(!ok.is_error());
	}

	#[test]
	fn test_null_states_are_distinct() {
		assert!(RespValue::null().is_null());
		assert!(RespValue::null_array().is_null());
		assert!(!RespValue::array(vec![]).is_null());
		assert_ne!(RespValue::null(), RespValue::null_array());
		assert_ne!(RespValue::null_array(), RespValue::array(vec![]));
		assert_ne!(RespValue::null(), RespValue::bulk_string(""));
	}

	#[test]
	fn test_as_str() {
		assert_eq!(RespValue::simple_string("hello").as_str(), Some("hello"));
		assert_eq!(RespValue::bulk_string("hi").as_str(), Some("hi"));
		assert_eq!(RespValue::null().as_str(), None);
		assert_eq!(RespValue::integer(42).as_str(), None);
	}

	#[test]
	fn test_from_conversions() {
		let s: RespValue = "test".into();
		assert_eq!(s, RespValue::bulk_string("test"));

		let i: RespValue = 42i64.into();
		assert_eq!(i.as_integer(), Some(42));

		let none: RespValue = Option::<String>::None.into();
		assert_eq!(none, RespValue::BulkString(None));

		let arr: RespValue = vec!["a", "b"].into();
		assert_eq!(arr.as_array().map(|a| a.len()), Some(2));
	}

	#[test]
	fn test_into_string() {
		assert_eq!(RespValue::simple_string("OK").into_string().unwrap(), "OK");
		assert_eq!(RespValue::bulk_string("中文").into_string().unwrap(), "中文");
		assert!(matches!(
			RespValue::bulk_string(&b"\xff"[..]).into_string(),
			Err(RespError::Utf8(_))
		));
		assert!(matches!(
			RespValue::null().into_string(),
			Err(RespError::TypeMismatch {
				expected: "string",
				found: RespKind::BulkString
			})
		));
		assert!(matches!(
			RespValue::error("ERR").into_string(),
			Err(RespError::TypeMismatch {
				found: RespKind::Error,
				..
			})
		));
	}

	#[test]
	fn test_into_integer_and_array() {
		assert_eq!(RespValue::integer(-7).into_integer().unwrap(), -7);
		assert!(RespValue::simple_string("7").into_integer().is_err());

		assert_eq!(RespValue::null_array().into_array().unwrap(), None);
		assert_eq!(
			RespValue::array(vec![RespValue::integer(1)]).into_array().unwrap(),
			Some(vec![RespValue::integer(1)])
		);
		assert!(matches!(
			RespValue::integer(1).into_array(),
			Err(RespError::TypeMismatch {
				expected: "array",
				found: RespKind::Integer
			})
		));
	}
}
