//! Record encoding and decoding.
//!
//! Every field is written as a tag followed by its value:
//!
//! ```text
//! +---------------------------------+-----------------+
//! | varint(number << 3 | wire_type) |  varint(value)  |
//! +---------------------------------+-----------------+
//! ```
//!
//! Only the varint wire type is handled. Both directions are pure functions.

use tracing::{debug, trace};

use crate::MAX_FIELD_NUMBER;
use crate::error::{DecodeError, EncodeError};
use crate::types::{Field, Record, Value, WireType};
use crate::varint::{decode_varint, encode_varint, varint_len};

/// Appends the tag for `number` / `wire_type` to `out`.
pub fn encode_tag(number: u32, wire_type: WireType, out: &mut Vec<u8>) {
    encode_varint((u64::from(number) << 3) | u64::from(wire_type.code()), out);
}

/// Reads a tag from the start of `buf`.
///
/// Returns the field number, wire type and bytes consumed.
pub fn decode_tag(buf: &[u8]) -> Result<(u32, WireType, usize), DecodeError> {
    let (tag, read) = decode_varint(buf)?;
    let number = tag >> 3;
    let code = (tag & 0x7) as u8;

    if number == 0 || number > u64::from(MAX_FIELD_NUMBER) {
        return Err(DecodeError::InvalidFieldNumber { number, offset: 0 });
    }
    let wire_type =
        WireType::from_code(code).ok_or(DecodeError::UnsupportedWireType { code, offset: 0 })?;

    Ok((number as u32, wire_type, read))
}

/// Checks a field and returns the unsigned value to write.
fn validate(field: &Field) -> Result<u64, EncodeError> {
    if field.number == 0 || field.number > MAX_FIELD_NUMBER {
        return Err(EncodeError::InvalidFieldNumber(field.number));
    }
    if field.wire_type != WireType::Varint {
        return Err(EncodeError::UnsupportedWireType {
            number: field.number,
            wire_type: field.wire_type,
        });
    }
    match field.value {
        Value::Unsigned(v) => Ok(v),
        Value::Signed(v) => u64::try_from(v).map_err(|_| EncodeError::NegativeValue {
            number: field.number,
            value: v,
        }),
    }
}

/// Returns the exact number of bytes [`encode`] produces for `record`.
pub fn encoded_len(record: &Record) -> Result<usize, EncodeError> {
    record.iter().try_fold(0, |len: usize, field| -> Result<usize, EncodeError> {
        let value = validate(field)?;
        let tag = (u64::from(field.number) << 3) | u64::from(field.wire_type.code());
        Ok(len + varint_len(tag) + varint_len(value))
    })
}

/// Encodes `record` into its wire representation.
///
/// Fields are written in insertion order. The output is deterministic.
///
/// # Example
///
/// ```rust
/// use protowire_protocol::{encode, Record};
///
/// let record = Record::new().with_varint(1, 150u64);
/// assert_eq!(encode(&record).unwrap(), [0x08, 0x96, 0x01]);
/// ```
pub fn encode(record: &Record) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(encoded_len(record)?);
    encode_into(record, &mut out)?;
    debug!(fields = record.len(), bytes = out.len(), "encoded record");
    Ok(out)
}

/// Appends the encoding of `record` to `out`.
///
/// On error `out` may hold the fields written before the failing one.
pub fn encode_into(record: &Record, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    for field in record {
        let value = validate(field)?;
        trace!(number = field.number, value, "encoding field");
        encode_tag(field.number, field.wire_type, out);
        encode_varint(value, out);
    }
    Ok(())
}

/// Decodes a record from `buf`.
///
/// Duplicate field numbers keep the last value seen. Either the whole input
/// decodes or an error is returned; partial records are never exposed.
///
/// # Example
///
/// ```rust
/// use protowire_protocol::{decode, Value};
///
/// let record = decode(&[0x08, 0x96, 0x01]).unwrap();
/// assert_eq!(record.get(1), Some(Value::Unsigned(150)));
/// ```
pub fn decode(buf: &[u8]) -> Result<Record, DecodeError> {
    let mut record = Record::new();
    let mut pos = 0;

    while pos < buf.len() {
        let (number, wire_type, read) = decode_tag(&buf[pos..]).map_err(|e| e.at(pos))?;
        if wire_type != WireType::Varint {
            return Err(DecodeError::UnsupportedWireType {
                code: wire_type.code(),
                offset: pos,
            });
        }
        pos += read;

        let (value, read) = decode_varint(&buf[pos..]).map_err(|e| e.at(pos))?;
        pos += read;

        trace!(number, value, "decoded field");
        record.merge(Field::varint(number, value));
    }

    debug!(fields = record.len(), bytes = buf.len(), "decoded record");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn canonical_example() {
        let record = Record::new().with_varint(1, 150u64);
        assert_eq!(encode(&record).unwrap(), [0x08, 0x96, 0x01]);
        assert_eq!(encoded_len(&record).unwrap(), 3);
    }

    #[test]
    fn encode_empty_record() {
        assert!(encode(&Record::new()).unwrap().is_empty());
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn encode_keeps_insertion_order() {
        let record = Record::new().with_varint(2, 1u64).with_varint(1, 2u64);
        assert_eq!(encode(&record).unwrap(), [0x10, 0x01, 0x08, 0x02]);
    }

    #[test]
    fn encode_multi_byte_tag() {
        // 16 << 3 = 128, which needs two bytes.
        let record = Record::new().with_varint(16, 1u64);
        assert_eq!(encode(&record).unwrap(), [0x80, 0x01, 0x01]);
    }

    #[test]
    fn encode_non_negative_signed() {
        let record = Record::new().with_varint(1, 150i64);
        assert_eq!(encode(&record).unwrap(), [0x08, 0x96, 0x01]);
    }

    #[test]
    fn encode_rejects_field_zero() {
        let record = Record::new().with_varint(0, 1u64);
        assert_eq!(encode(&record), Err(EncodeError::InvalidFieldNumber(0)));
    }

    #[test]
    fn encode_rejects_field_above_max() {
        let record = Record::new().with_varint(MAX_FIELD_NUMBER + 1, 1u64);
        assert!(matches!(
            encode(&record),
            Err(EncodeError::InvalidFieldNumber(_))
        ));
        let record = Record::new().with_varint(MAX_FIELD_NUMBER, 1u64);
        assert!(encode(&record).is_ok());
    }

    #[test]
    fn encode_rejects_negative() {
        let record = Record::new().with_varint(3, -1i64);
        assert_eq!(
            encode(&record),
            Err(EncodeError::NegativeValue {
                number: 3,
                value: -1
            })
        );
    }

    #[test]
    fn encode_rejects_other_wire_types() {
        let mut record = Record::new();
        record.push(Field::new(1, WireType::Fixed32, 1u64));
        assert!(matches!(
            encode(&record),
            Err(EncodeError::UnsupportedWireType {
                wire_type: WireType::Fixed32,
                ..
            })
        ));
    }

    #[test]
    fn decode_canonical() {
        let record = decode(&[0x08, 0x96, 0x01]).unwrap();
        assert_eq!(record, Record::new().with_varint(1, 150u64));
    }

    #[test]
    fn decode_proper_prefixes_fail() {
        let full = [0x08, 0x96, 0x01];
        for end in 1..full.len() {
            assert!(
                matches!(decode(&full[..end]), Err(DecodeError::Truncated { .. })),
                "prefix of length {} should be truncated",
                end
            );
        }
    }

    #[test]
    fn decode_truncation_reports_offset() {
        assert_eq!(
            decode(&[0x08, 0x96]),
            Err(DecodeError::Truncated { offset: 2 })
        );
    }

    #[test]
    fn decode_overflowing_value() {
        let mut data = vec![0x08];
        data.extend_from_slice(&[0xFF; 11]);
        assert!(matches!(
            decode(&data),
            Err(DecodeError::VarintOverflow { .. })
        ));
    }

    #[test]
    fn decode_duplicate_field_keeps_later_value() {
        let record = decode(&[0x08, 0x01, 0x08, 0x02]).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.get(1), Some(Value::Unsigned(2)));
    }

    #[test]
    fn decode_unknown_wire_type() {
        // number 1, wire type 7
        assert!(matches!(
            decode(&[0x0F, 0x00]),
            Err(DecodeError::UnsupportedWireType { code: 7, offset: 0 })
        ));
    }

    #[test]
    fn decode_recognized_but_unsupported_wire_type() {
        // number 1, fixed32
        assert!(matches!(
            decode(&[0x0D, 0x00, 0x00, 0x00, 0x00]),
            Err(DecodeError::UnsupportedWireType { code: 5, .. })
        ));
    }

    #[test]
    fn decode_field_zero() {
        assert!(matches!(
            decode(&[0x00, 0x01]),
            Err(DecodeError::InvalidFieldNumber { number: 0, .. })
        ));
    }

    #[test]
    fn decode_error_offset_in_second_field() {
        assert_eq!(
            decode(&[0x08, 0x01, 0x17]),
            Err(DecodeError::UnsupportedWireType { code: 7, offset: 2 })
        );
    }

    #[test]
    fn decode_tag_values() {
        assert_eq!(decode_tag(&[0x08]), Ok((1, WireType::Varint, 1)));
        assert_eq!(decode_tag(&[0x12]), Ok((2, WireType::LengthDelimited, 1)));
        assert_eq!(decode_tag(&[0x80, 0x01]), Ok((16, WireType::Varint, 2)));
    }

    fn varint_record() -> impl Strategy<Value = Record> {
        prop::collection::vec((1..=MAX_FIELD_NUMBER, any::<u64>()), 0..16).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(number, value)| Field::varint(number, value))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn roundtrip_modulo_dedup(record in varint_record()) {
            let bytes = encode(&record).unwrap();
            prop_assert_eq!(bytes.len(), encoded_len(&record).unwrap());
            prop_assert_eq!(decode(&bytes).unwrap(), record.deduplicated());
        }

        #[test]
        fn roundtrip_with_duplicates(values in prop::collection::vec(any::<u64>(), 1..8)) {
            let record: Record = values.iter().map(|&v| Field::varint(7, v)).collect();
            let decoded = decode(&encode(&record).unwrap()).unwrap();
            prop_assert_eq!(decoded.len(), 1);
            prop_assert_eq!(decoded.get(7), values.last().copied().map(Value::Unsigned));
        }
    }
}
