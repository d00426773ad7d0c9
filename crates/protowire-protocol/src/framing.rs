//! Length-delimited record framing.
//!
//! Records written to a stream are prefixed with their encoded length as a
//! varint, so several records can be concatenated and read back one by one:
//!
//! ```text
//! +------------------+------------------+
//! | varint(length)   |  encoded record  |
//! +------------------+------------------+
//! ```

use std::io::{ErrorKind, Read, Write};

use tracing::debug;

use crate::MAX_MESSAGE_SIZE;
use crate::codec::{decode, encode};
use crate::error::{DecodeError, ProtocolError, ProtocolResult};
use crate::types::Record;
use crate::varint::{MAX_VARINT_LEN, decode_varint, encode_varint};

fn check_size(len: u64) -> ProtocolResult<usize> {
    if len > u64::from(MAX_MESSAGE_SIZE) {
        return Err(ProtocolError::MessageTooLarge {
            size: len,
            max: MAX_MESSAGE_SIZE,
        });
    }
    Ok(len as usize)
}

/// Encodes a record with its varint length prefix.
///
/// # Example
///
/// ```rust
/// use protowire_protocol::{encode_delimited, Record};
///
/// let bytes = encode_delimited(&Record::new().with_varint(1, 150u64)).unwrap();
/// assert_eq!(bytes, [0x03, 0x08, 0x96, 0x01]);
/// ```
pub fn encode_delimited(record: &Record) -> ProtocolResult<Vec<u8>> {
    let body = encode(record)?;
    check_size(body.len() as u64)?;

    let mut buffer = Vec::with_capacity(MAX_VARINT_LEN + body.len());
    encode_varint(body.len() as u64, &mut buffer);
    buffer.extend_from_slice(&body);
    Ok(buffer)
}

/// Decodes one length-delimited record from the start of `data`.
///
/// Returns the record and the total number of bytes consumed, so callers can
/// walk a buffer holding several frames.
pub fn decode_delimited(data: &[u8]) -> ProtocolResult<(Record, usize)> {
    let (len, prefix) = match decode_varint(data) {
        Ok(v) => v,
        Err(DecodeError::Truncated { .. }) => {
            return Err(ProtocolError::IncompleteMessage {
                expected: data.len() + 1,
                received: data.len(),
            });
        }
        Err(e) => return Err(e.into()),
    };
    let len = check_size(len)?;

    if data.len() < prefix + len {
        return Err(ProtocolError::IncompleteMessage {
            expected: prefix + len,
            received: data.len(),
        });
    }

    let record = decode(&data[prefix..prefix + len]).map_err(|e| e.at(prefix))?;
    Ok((record, prefix + len))
}

/// Reads length-delimited records from a byte stream.
///
/// Decode errors carry offsets from the start of the stream, matching
/// [`decode_delimited`] on the same bytes.
pub struct FrameReader<R> {
    reader: R,
    /// Bytes of complete frames read so far.
    position: usize,
}

impl<R: Read> FrameReader<R> {
    /// Creates a new FrameReader wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    /// Stream offset of the next frame.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Reads a single framed record.
    ///
    /// Returns `Ok(None)` on EOF before the first byte of a frame.
    /// Returns an error if the stream ends inside a frame or the payload is
    /// malformed.
    pub fn read_record(&mut self) -> ProtocolResult<Option<Record>> {
        let start = self.position;
        let Some((len, prefix)) = self.read_length().map_err(|e| match e {
            ProtocolError::Decode(d) => ProtocolError::Decode(d.at(start)),
            other => other,
        })?
        else {
            return Ok(None);
        };
        let len = check_size(len)?;

        let mut payload = vec![0u8; len];
        let mut filled = 0;
        while filled < len {
            match self.reader.read(&mut payload[filled..]) {
                Ok(0) => {
                    return Err(ProtocolError::IncompleteMessage {
                        expected: len,
                        received: filled,
                    });
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }

        let record = decode(&payload).map_err(|e| e.at(start + prefix))?;
        self.position = start + prefix + len;
        debug!(offset = start, bytes = len, fields = record.len(), "read framed record");
        Ok(Some(record))
    }

    /// Reads the varint length prefix one byte at a time.
    ///
    /// Returns the length and the size of the prefix itself.
    fn read_length(&mut self) -> ProtocolResult<Option<(u64, usize)>> {
        let mut prefix = [0u8; MAX_VARINT_LEN];

        for i in 0..MAX_VARINT_LEN {
            let mut byte = [0u8; 1];
            match self.reader.read_exact(&mut byte) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    if i == 0 {
                        return Ok(None);
                    }
                    return Err(ProtocolError::IncompleteMessage {
                        expected: i + 1,
                        received: i,
                    });
                }
                Err(e) => return Err(e.into()),
            }
            prefix[i] = byte[0];

            if byte[0] & 0x80 == 0 {
                let (len, read) = decode_varint(&prefix[..=i])?;
                return Ok(Some((len, read)));
            }
        }

        Err(DecodeError::VarintOverflow {
            offset: MAX_VARINT_LEN - 1,
        }
        .into())
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Returns a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Unwraps this FrameReader, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Writes length-delimited records to a byte stream.
pub struct FrameWriter<W> {
    writer: W,
}

impl<W: Write> FrameWriter<W> {
    /// Creates a new FrameWriter wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes a single framed record.
    pub fn write_record(&mut self, record: &Record) -> ProtocolResult<()> {
        let data = encode_delimited(record)?;
        self.writer.write_all(&data)?;
        Ok(())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> ProtocolResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Returns a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Unwraps this FrameWriter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
