//! Codec error types.

use thiserror::Error;

use crate::types::WireType;

/// Result type for framing and stream operations.
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Errors raised while encoding a record.
///
/// These are deterministic: retrying the same record fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Field number is zero or above [`crate::MAX_FIELD_NUMBER`].
    #[error("invalid field number: {0}")]
    InvalidFieldNumber(u32),

    /// Negative signed value with no agreed encoding convention.
    #[error("field {number}: negative value {value} cannot be encoded as an unsigned varint")]
    NegativeValue { number: u32, value: i64 },

    /// Wire type this codec does not encode.
    #[error("field {number}: unsupported wire type {wire_type}")]
    UnsupportedWireType { number: u32, wire_type: WireType },
}

/// Errors raised while decoding bytes into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input ended in the middle of a varint or before a field value.
    #[error("truncated input at offset {offset}")]
    Truncated { offset: usize },

    /// Varint longer than 10 bytes or carrying more than 64 bits.
    #[error("varint overflows 64 bits at offset {offset}")]
    VarintOverflow { offset: usize },

    /// Tag carries field number zero or one above the maximum.
    #[error("invalid field number {number} at offset {offset}")]
    InvalidFieldNumber { number: u64, offset: usize },

    /// Wire type code unknown or not handled by this codec.
    #[error("unsupported wire type {code} at offset {offset}")]
    UnsupportedWireType { code: u8, offset: usize },
}

impl DecodeError {
    /// Shifts the reported offset by `base`, for errors found in a sub-slice.
    pub(crate) fn at(self, base: usize) -> Self {
        match self {
            Self::Truncated { offset } => Self::Truncated {
                offset: offset + base,
            },
            Self::VarintOverflow { offset } => Self::VarintOverflow {
                offset: offset + base,
            },
            Self::InvalidFieldNumber { number, offset } => Self::InvalidFieldNumber {
                number,
                offset: offset + base,
            },
            Self::UnsupportedWireType { code, offset } => Self::UnsupportedWireType {
                code,
                offset: offset + base,
            },
        }
    }
}

/// Errors that can occur while framing records on a byte stream.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Record could not be encoded.
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// Frame payload could not be decoded.
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Frame exceeds maximum allowed size.
    #[error("message too large: {size} bytes (max: {max})")]
    MessageTooLarge { size: u64, max: u32 },

    /// Stream ended before the full frame was received.
    #[error("incomplete message: expected {expected} bytes, got {received}")]
    IncompleteMessage { expected: usize, received: usize },

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
