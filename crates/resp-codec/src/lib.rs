//! # RESP codec - Redis Serialization Protocol
//!
//! Encodes values into RESP2 wire bytes and decodes them back, either from a
//! complete in-memory buffer or frame by frame from a live tokio byte source.
//!
//! ## Features
//!
//! - **Pure encoder**: free functions returning `Bytes`, composable into arrays
//! - **Buffer mode**: one frame plus its exact consumed length
//! - **Stream mode**: tolerates fragmented reads, read deadlines
//! - **Bounded decoding**: bulk length, array count and nesting depth limits
//!
//! ## Example
//!
//! ```rust
//! use resp_codec::RespValue;
//!
//! let (consumed, value) = resp_codec::parse(b"+OK\r\n").unwrap();
//! assert_eq!(consumed, 5);
//! assert_eq!(value.as_str(), Some("OK"));
//!
//! let encoded = resp_codec::encode::encode_bulk_string("foobar").unwrap();
//! assert_eq!(resp_codec::decode(&encoded).unwrap(), RespValue::bulk_string("foobar"));
//! ```
//!
//! Decoded `-ERR ...` frames are ordinary [`RespValue::Error`] values; the
//! decode call itself succeeds.

mod config;
pub mod encode;
mod error;
mod parser;
mod stream;
mod types;
mod utils;

pub use config::DecodeConfig;
pub use encode::RespEncoder;
pub use error::EncodeError;
pub use error::ParseError;
pub use error::RespError;
pub use parser::decode;
pub use parser::decode_all;
pub use parser::decode_as_array;
pub use parser::decode_as_integer;
pub use parser::decode_as_string;
pub use parser::decode_with_config;
pub use parser::parse;
pub use parser::parse_with_config;
pub use stream::RespReader;
pub use stream::decode_stream;
pub use stream::write_value;
pub use types::RespKind;
pub use types::RespValue;
pub use utils::MAX_BULK_LEN;
