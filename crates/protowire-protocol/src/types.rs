//! Record, field and wire-type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire type carried in the low three bits of every tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireType {
    /// Base-128 varint.
    Varint,
    /// Eight little-endian bytes.
    Fixed64,
    /// Varint length followed by that many bytes.
    LengthDelimited,
    /// Four little-endian bytes.
    Fixed32,
}

impl WireType {
    /// Returns the 3-bit code used in the tag.
    pub fn code(self) -> u8 {
        match self {
            Self::Varint => 0,
            Self::Fixed64 => 1,
            Self::LengthDelimited => 2,
            Self::Fixed32 => 5,
        }
    }

    /// Maps a 3-bit tag code back to a wire type.
    ///
    /// Codes 3 and 4 (groups) and 6, 7 are not recognized.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Varint),
            1 => Some(Self::Fixed64),
            2 => Some(Self::LengthDelimited),
            5 => Some(Self::Fixed32),
            _ => None,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Varint => "varint",
            Self::Fixed64 => "fixed64",
            Self::LengthDelimited => "length_delimited",
            Self::Fixed32 => "fixed32",
        };
        f.write_str(name)
    }
}

/// Scalar integer value held by a field.
///
/// Signed values are written with a direct cast, so only non-negative ones
/// can be encoded. Decoded fields are always [`Value::Unsigned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Unsigned(u64),
    Signed(i64),
}

impl Value {
    /// Returns the value as `u64` when it is representable without a sign.
    pub fn as_u64(self) -> Option<u64> {
        match self {
            Self::Unsigned(v) => Some(v),
            Self::Signed(v) => u64::try_from(v).ok(),
        }
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Unsigned(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Signed(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Signed(value.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned(v) => write!(f, "{}", v),
            Self::Signed(v) => write!(f, "{}", v),
        }
    }
}

/// One tagged value inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field number (1 through [`crate::MAX_FIELD_NUMBER`]).
    pub number: u32,
    /// How the value is laid out on the wire.
    pub wire_type: WireType,
    /// The scalar value.
    pub value: Value,
}

impl Field {
    /// Creates a field with an explicit wire type.
    pub fn new(number: u32, wire_type: WireType, value: impl Into<Value>) -> Self {
        Self {
            number,
            wire_type,
            value: value.into(),
        }
    }

    /// Creates a varint field.
    pub fn varint(number: u32, value: impl Into<Value>) -> Self {
        Self::new(number, WireType::Varint, value)
    }
}

/// An ordered collection of fields making up one message instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field, keeping insertion order.
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Builder-style [`Record::push`] for a varint field.
    #[must_use]
    pub fn with_varint(mut self, number: u32, value: impl Into<Value>) -> Self {
        self.push(Field::varint(number, value));
        self
    }

    /// Sets `field`, replacing the value of an existing field with the same
    /// number in place. Later values win.
    pub fn merge(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.number == field.number) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    /// Returns the last value stored for `number`.
    pub fn get(&self, number: u32) -> Option<Value> {
        self.fields
            .iter()
            .rev()
            .find(|f| f.number == number)
            .map(|f| f.value)
    }

    /// Returns the fields in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns a copy with duplicate field numbers collapsed, last value wins.
    #[must_use]
    pub fn deduplicated(&self) -> Self {
        let mut out = Self::new();
        for field in &self.fields {
            out.merge(*field);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the fields.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }
}

impl FromIterator<Field> for Record {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
