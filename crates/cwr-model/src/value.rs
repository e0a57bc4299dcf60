//! Decoded field values.
//!
//! Every field of a decoded record carries one of these variants. Decoding
//! is total: content that fails its declared format is preserved as
//! [`FieldValue::Invalid`] with the raw text intact, and the failure is
//! reported as a diagnostic by the decoder, never as an error.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single-character CWR flag (Y/N/U).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    Yes,
    No,
    Unknown,
}

impl Flag {
    /// Parse a flag character. Returns `None` for anything but Y/N/U.
    pub fn parse(c: char) -> Option<Flag> {
        match c {
            'Y' => Some(Flag::Yes),
            'N' => Some(Flag::No),
            'U' => Some(Flag::Unknown),
            _ => None,
        }
    }
}

/// A decoded field value.
///
/// Numeric share fields (PR/MR/SR ownership and collection shares) are
/// stored as [`FieldValue::Number`] in integer thousandths of a percent:
/// `050000` decodes to `Number(50000)`, meaning 50.000%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Alphanumeric content, right-trimmed of padding.
    Text(String),
    /// Non-negative integer (leading zeros allowed in the wire form).
    Number(u64),
    /// Calendar-validated date.
    Date(NaiveDate),
    /// Time of day; hundredths of a second map onto milliseconds.
    Time(NaiveTime),
    /// Duration in whole seconds.
    Duration(u32),
    /// Y/N/U indicator.
    Flag(Flag),
    /// Boolean indicator (Y/N).
    Bool(bool),
    /// Blank content in an optional field (all spaces, or all-zero dates).
    Empty,
    /// Content that failed its declared format; raw text preserved.
    Invalid(String),
}

impl FieldValue {
    /// Text content, if this value is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric content, if this value decoded as a number.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<Flag> {
        match self {
            FieldValue::Flag(f) => Some(*f),
            _ => None,
        }
    }

    /// True for blank optional content.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// True when the field carried content that failed its format.
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldValue::Invalid(_))
    }
}
