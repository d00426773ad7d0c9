//! Client error types.

use std::fmt;

use protowire_core::{HexError, TracingError};
use protowire_protocol::{DecodeError, EncodeError, ProtocolError};

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Invalid command-line input (bad hex or FIELD=VALUE).
    Input(String),
    /// Record could not be encoded.
    Encode(EncodeError),
    /// Bytes could not be decoded.
    Decode(DecodeError),
    /// Framing error other than encode/decode.
    Protocol(String),
    /// Logging setup failed.
    Tracing(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Input(msg) => write!(f, "invalid input: {}", msg),
            Self::Encode(err) => write!(f, "failed to serialize message: {}", err),
            Self::Decode(err) => write!(f, "failed to parse message: {}", err),
            Self::Protocol(msg) => write!(f, "protocol error: {}", msg),
            Self::Tracing(msg) => write!(f, "tracing setup failed: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<EncodeError> for ClientError {
    fn from(err: EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl From<DecodeError> for ClientError {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

impl From<ProtocolError> for ClientError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Encode(e) => Self::Encode(e),
            ProtocolError::Decode(e) => Self::Decode(e),
            ProtocolError::Io(e) => Self::Io(e),
            other => Self::Protocol(other.to_string()),
        }
    }
}

impl From<HexError> for ClientError {
    fn from(err: HexError) -> Self {
        Self::Input(err.to_string())
    }
}

impl From<TracingError> for ClientError {
    fn from(err: TracingError) -> Self {
        Self::Tracing(err.to_string())
    }
}
