//! Hexadecimal rendering and parsing for byte dumps.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Letter case used for hex digits `a`-`f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexCase {
    /// `6fab`
    Lower,
    /// `6FAB`
    #[default]
    Upper,
}

/// Errors from [`decode_hex`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// Character outside `0-9a-fA-F`.
    #[error("invalid hex digit {ch:?} at position {position}")]
    InvalidDigit { ch: char, position: usize },

    /// Odd number of hex digits.
    #[error("odd number of hex digits: {0}")]
    OddLength(usize),
}

/// Renders `bytes` as contiguous two-digit hex, no separators.
pub fn encode_hex(bytes: impl AsRef<[u8]>, case: HexCase) -> String {
    bytes
        .as_ref()
        .iter()
        .map(|b| match case {
            HexCase::Lower => format!("{:02x}", b),
            HexCase::Upper => format!("{:02X}", b),
        })
        .collect()
}

/// Parses hex text into bytes.
///
/// Digits may be in either case. ASCII whitespace between digits is ignored,
/// so `"08 96 01"` and `"089601"` parse the same.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let mut nibbles = Vec::with_capacity(text.len());
    for (position, ch) in text.char_indices() {
        if ch.is_ascii_whitespace() {
            continue;
        }
        let digit = ch
            .to_digit(16)
            .ok_or(HexError::InvalidDigit { ch, position })?;
        nibbles.push(digit as u8);
    }

    if nibbles.len() % 2 != 0 {
        return Err(HexError::OddLength(nibbles.len()));
    }

    Ok(nibbles
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}
