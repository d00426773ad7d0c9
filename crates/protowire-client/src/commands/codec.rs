//! `encode` and `decode` commands.

use std::io::{Cursor, Write};

use protowire_core::{HexCase, decode_hex, encode_hex};
use protowire_protocol::{Field, FrameReader, FrameWriter, Record, decode, encode};
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::render;

/// Encodes `fields` in order and writes the bytes as one line of hex.
pub fn encode_fields(
    fields: &[Field],
    case: HexCase,
    delimited: bool,
    out: &mut impl Write,
) -> ClientResult<()> {
    let record: Record = fields.iter().copied().collect();

    let bytes = if delimited {
        let mut writer = FrameWriter::new(Vec::new());
        writer.write_record(&record)?;
        writer.into_inner()
    } else {
        encode(&record)?
    };
    debug!(fields = record.len(), bytes = bytes.len(), delimited, "encoded");

    writeln!(out, "{}", encode_hex(&bytes, case))?;
    Ok(())
}

/// Parses `hex`, decodes one record (or a stream of delimited records) and
/// writes the fields as text or JSON.
pub fn decode_hex_input(
    hex: &str,
    json: bool,
    delimited: bool,
    out: &mut impl Write,
) -> ClientResult<()> {
    let bytes = decode_hex(hex)?;

    if !delimited {
        let record = decode(&bytes)?;
        let text = if json {
            format!("{}\n", render::record_json(&record).map_err(json_error)?)
        } else {
            render::record_text(&record)
        };
        out.write_all(text.as_bytes())?;
        return Ok(());
    }

    let mut reader = FrameReader::new(Cursor::new(bytes));
    let mut records = Vec::new();
    while let Some(record) = reader.read_record()? {
        records.push(record);
    }
    debug!(records = records.len(), "decoded delimited stream");

    let text = if json {
        format!("{}\n", render::records_json(&records).map_err(json_error)?)
    } else {
        render::records_text(&records)
    };
    out.write_all(text.as_bytes())?;
    Ok(())
}

fn json_error(err: serde_json::Error) -> ClientError {
    ClientError::Protocol(format!("failed to render JSON: {}", err))
}
