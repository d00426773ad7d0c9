//! Output rendering for encoded bytes and decoded records.

use protowire_core::{HexCase, encode_hex};
use protowire_protocol::Record;

/// The three lines printed by the demo: the serialized record in the
/// configured case, then the two sample dumps in lowercase.
pub fn demo_output(serialized: &[u8], case: HexCase, hex_literal: &[u8], utf8: &str) -> String {
    format!(
        "Serialized message: {}\nHex literal: {}\nUTF-8 string: {}\n",
        encode_hex(serialized, case),
        encode_hex(hex_literal, HexCase::Lower),
        encode_hex(utf8, HexCase::Lower),
    )
}

/// One `field N (wire type): value` line per field.
pub fn record_text(record: &Record) -> String {
    record
        .iter()
        .map(|f| format!("field {} ({}): {}\n", f.number, f.wire_type, f.value))
        .collect()
}

/// Text for several records, each under a `# record N` header.
pub fn records_text(records: &[Record]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| format!("# record {}\n{}", i, record_text(record)))
        .collect()
}

/// Pretty JSON for a single record.
pub fn record_json(record: &Record) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

/// Pretty JSON array of records.
pub fn records_json(records: &[Record]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_output_matches_reference_program() {
        let output = demo_output(
            &[0x08, 0x96, 0x01],
            HexCase::Upper,
            b"protobuf\n",
            "Hello, Protobuf!",
        );
        insta::assert_snapshot!(output, @r"
        Serialized message: 089601
        Hex literal: 70726f746f6275660a
        UTF-8 string: 48656c6c6f2c2050726f746f62756621
        ");
    }

    #[test]
    fn demo_output_upper_case_letters() {
        let output = demo_output(&[0xab, 0x01], HexCase::Upper, &[0xab], "");
        assert!(output.starts_with("Serialized message: AB01\n"));
        assert!(output.contains("Hex literal: ab\n"));
        assert!(output.ends_with("UTF-8 string: \n"));
    }

    #[test]
    fn record_text_lines() {
        let record = Record::new().with_varint(1, 150u64).with_varint(2, 0u64);
        insta::assert_snapshot!(record_text(&record), @r"
        field 1 (varint): 150
        field 2 (varint): 0
        ");
    }

    #[test]
    fn records_text_headers() {
        let records = vec![Record::new().with_varint(1, 1u64), Record::new()];
        insta::assert_snapshot!(records_text(&records), @r"
        # record 0
        field 1 (varint): 1
        # record 1
        ");
    }

    #[test]
    fn record_json_pretty() {
        let record = Record::new().with_varint(1, 150u64);
        insta::assert_snapshot!(record_json(&record).unwrap(), @r#"
        [
          {
            "number": 1,
            "wire_type": "varint",
            "value": 150
          }
        ]
        "#);
    }

    #[test]
    fn records_json_empty() {
        assert_eq!(records_json(&[]).unwrap(), "[]");
    }
}
