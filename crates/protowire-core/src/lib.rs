//! Shared utilities: tracing setup and hex rendering

pub mod hex;
pub mod tracing;

pub use hex::{decode_hex, encode_hex, HexCase, HexError};
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
