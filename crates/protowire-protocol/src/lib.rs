//! Tag/varint wire codec for protowire.
//!
//! This crate implements the subset of the protobuf binary format needed to
//! carry scalar integer fields.
//!
//! # Wire Overview
//!
//! A record is a sequence of fields, each written as:
//! - tag: varint of `field_number << 3 | wire_type`
//! - value: varint of the unsigned value
//!
//! Only the varint wire type (0) is encoded or decoded. When a field number
//! appears more than once, the last value wins on decode.
//!
//! Records can also be written to streams with a varint length prefix, see
//! [`FrameReader`] and [`FrameWriter`].
//!
//! # Example
//!
//! ```rust
//! use protowire_protocol::{Record, Value, decode, encode};
//!
//! let record = Record::new().with_varint(1, 150u64);
//! let bytes = encode(&record).unwrap();
//! assert_eq!(bytes, [0x08, 0x96, 0x01]);
//!
//! let decoded = decode(&bytes).unwrap();
//! assert_eq!(decoded.get(1), Some(Value::Unsigned(150)));
//! ```

mod codec;
mod error;
mod framing;
mod types;
pub mod varint;

pub use codec::{decode, decode_tag, encode, encode_into, encode_tag, encoded_len};
pub use error::{DecodeError, EncodeError, ProtocolError, ProtocolResult};
pub use framing::{FrameReader, FrameWriter, decode_delimited, encode_delimited};
pub use types::{Field, Record, Value, WireType};

/// Largest field number a tag can carry (2^29 - 1).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Maximum delimited frame size (1 MB).
pub const MAX_MESSAGE_SIZE: u32 = 1024 * 1024;
