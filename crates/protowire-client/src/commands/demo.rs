//! The default command: encode a one-field record and print sample dumps.

use std::io::Write;

use protowire_protocol::{Record, encode};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::render;

/// Builds `{field_number: value}` from the demo settings, encodes it and
/// writes the three demo lines.
///
/// An encode failure is returned to the caller, which treats it as fatal.
pub fn run(config: &ClientConfig, out: &mut impl Write) -> ClientResult<()> {
    let demo = &config.demo;
    let record = Record::new().with_varint(demo.field_number, demo.value);

    let serialized = encode(&record)?;
    debug!(bytes = serialized.len(), "serialized demo record");

    out.write_all(
        render::demo_output(
            &serialized,
            config.display.case,
            &demo.hex_literal,
            &demo.utf8_string,
        )
        .as_bytes(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use protowire_protocol::EncodeError;

    #[test]
    fn default_demo_output() {
        let mut out = Vec::new();
        run(&ClientConfig::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        insta::assert_snapshot!(text, @r"
        Serialized message: 089601
        Hex literal: 70726f746f6275660a
        UTF-8 string: 48656c6c6f2c2050726f746f62756621
        ");
    }

    #[test]
    fn demo_uses_configured_value() {
        let mut config = ClientConfig::default();
        config.demo.value = 300;
        config.demo.field_number = 2;

        let mut out = Vec::new();
        run(&config, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Serialized message: 10AC02\n"));
    }

    #[test]
    fn demo_invalid_field_is_fatal() {
        let mut config = ClientConfig::default();
        config.demo.field_number = 0;

        let mut out = Vec::new();
        let err = run(&config, &mut out).unwrap_err();

        assert!(matches!(
            err,
            ClientError::Encode(EncodeError::InvalidFieldNumber(0))
        ));
        assert!(out.is_empty());
    }
}
