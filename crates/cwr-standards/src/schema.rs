//! Field layout schemas for CWR records.
//!
//! A schema is an ordered list of [`FieldSpec`]s covering a record line
//! contiguously from byte 1. Positions are 1-indexed inclusive, matching
//! the CISAC layout documents. Tables are compiled in; adding a record
//! type or revision means extending [`crate::layouts`] only.

use std::collections::BTreeMap;

use cwr_model::CwrVersion;

use crate::layouts;

/// Wire format of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Free text, right-padded with spaces.
    Alphanumeric,
    /// Non-negative integer, left-padded with zeros; blank decodes to none.
    Numeric,
    /// YYYYMMDD; all-zero or all-space decodes to none.
    Date,
    /// HHMMSS, or HHMMSSFF with hundredths when the field is 8 wide.
    Time,
    /// HHMMSS elapsed time.
    Duration,
    /// Y/N/U indicator.
    Flag,
    /// Y/N indicator.
    Boolean,
    /// Code validated against the named lookup table.
    Lookup(&'static str),
}

/// Layout of one field inside a fixed-width record.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    /// 1-indexed first byte of the field.
    pub start: usize,
    pub len: usize,
    pub format: FieldFormat,
    pub mandatory: bool,
}

impl FieldSpec {
    /// 1-indexed last byte of the field.
    pub const fn end(&self) -> usize {
        self.start + self.len - 1
    }
}

/// Complete layout of one record type in one revision.
#[derive(Debug)]
pub struct RecordSchema {
    pub record_type: &'static str,
    /// Declared record width; equals the end of the last field.
    pub width: usize,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn mandatory_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.mandatory)
    }
}

/// Record types that open a transaction.
pub const TRANSACTION_HEADERS: &[&str] = &["WRK", "REV", "NWR", "ISW", "ISR"];

/// Record types that delimit the file/group structure.
pub const STRUCTURAL_TYPES: &[&str] = &["HDR", "GRH", "GRT", "TRL"];

/// Immutable registry of record schemas for both supported revisions.
#[derive(Debug)]
pub struct SchemaRegistry {
    v21: BTreeMap<&'static str, &'static RecordSchema>,
    v22: BTreeMap<&'static str, &'static RecordSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        let build = |version| {
            layouts::schemas(version)
                .iter()
                .map(|schema| (schema.record_type, *schema))
                .collect()
        };
        Self {
            v21: build(CwrVersion::V21),
            v22: build(CwrVersion::V22),
        }
    }

    /// The layout for a record type under the given revision, if known.
    pub fn schema(&self, version: CwrVersion, record_type: &str) -> Option<&'static RecordSchema> {
        let table = match version {
            CwrVersion::V21 => &self.v21,
            CwrVersion::V22 => &self.v22,
        };
        table.get(record_type).copied()
    }

    /// All record types known under the given revision.
    pub fn record_types(&self, version: CwrVersion) -> impl Iterator<Item = &'static str> + '_ {
        let table = match version {
            CwrVersion::V21 => &self.v21,
            CwrVersion::V22 => &self.v22,
        };
        table.keys().copied()
    }

    /// True for record types that open a transaction (WRK, REV, NWR, ...).
    pub fn is_transaction_header(record_type: &str) -> bool {
        TRANSACTION_HEADERS.contains(&record_type)
    }

    /// True for HDR/GRH/GRT/TRL.
    pub fn is_structural(record_type: &str) -> bool {
        STRUCTURAL_TYPES.contains(&record_type)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
