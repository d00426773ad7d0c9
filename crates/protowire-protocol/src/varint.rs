//! Base-128 varint primitives.
//!
//! Each byte carries seven bits of the value, least-significant group first.
//! The high bit is set on every byte except the last:
//!
//! ```text
//! 150 = 0b1001_0110  ->  [1_0010110] [0_0000001]  ->  96 01
//! ```

use crate::error::DecodeError;

/// Longest possible encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Appends the varint encoding of `value` to `out`.
pub fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7F) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Returns the number of bytes [`encode_varint`] writes for `value`.
pub fn varint_len(value: u64) -> usize {
    // One byte per started 7-bit group; zero still takes one byte.
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Decodes a varint from the start of `buf`.
///
/// Returns the value and the number of bytes consumed. Fails with
/// [`DecodeError::Truncated`] when `buf` ends before a terminating byte, and
/// with [`DecodeError::VarintOverflow`] when the encoding runs past ten bytes
/// or sets bits above bit 63.
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize), DecodeError> {
    let mut value = 0u64;

    for (i, &byte) in buf.iter().enumerate() {
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            // Tenth group only has room for bit 63.
            return Err(DecodeError::VarintOverflow { offset: i });
        }

        value |= u64::from(byte & 0x7F) << (7 * i);

        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    Err(DecodeError::Truncated { offset: buf.len() })
}
