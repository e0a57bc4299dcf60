//! The decoded record tree: File -> Group -> Transaction -> Record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::diagnostic::{Diagnostic, Severity};
use crate::error::CwrError;
use crate::value::{FieldValue, Flag};

/// Supported CWR format revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CwrVersion {
    V21,
    V22,
}

impl CwrVersion {
    /// The version string as it appears in HDR/GRH records.
    pub fn as_str(&self) -> &'static str {
        match self {
            CwrVersion::V21 => "02.10",
            CwrVersion::V22 => "02.20",
        }
    }
}

impl fmt::Display for CwrVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CwrVersion {
    type Err = CwrError;

    /// Accepts both the wire form ("02.10") and the short form ("2.1").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "02.10" | "2.1" => Ok(CwrVersion::V21),
            "02.20" | "2.2" => Ok(CwrVersion::V22),
            other => Err(CwrError::UnsupportedVersion(other.to_string())),
        }
    }
}

/// One decoded fixed-width record line.
///
/// Immutable after decode. `record_type` is the first three bytes of the
/// line; `fields` maps schema field names to decoded values. Records whose
/// type has no schema carry an empty field map and the raw line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub record_type: String,
    /// 1-based input line number.
    pub line: usize,
    pub raw: String,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(record_type: impl Into<String>, line: usize, raw: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            line,
            raw: raw.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Text content of a field, if present and textual.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(FieldValue::as_text)
    }

    /// Numeric content of a field, if present and numeric.
    pub fn number(&self, field: &str) -> Option<u64> {
        self.fields.get(field).and_then(FieldValue::as_number)
    }

    pub fn flag(&self, field: &str) -> Option<Flag> {
        self.fields.get(field).and_then(FieldValue::as_flag)
    }

    /// The transaction sequence from the record prefix, when decoded.
    pub fn transaction_sequence(&self) -> Option<u64> {
        self.number("transaction_sequence")
    }

    /// The record sequence from the record prefix, when decoded.
    pub fn record_sequence(&self) -> Option<u64> {
        self.number("record_sequence")
    }
}

/// A transaction header record plus its detail records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub header: Record,
    pub records: Vec<Record>,
}

impl Transaction {
    pub fn new(header: Record) -> Self {
        Self {
            header,
            records: Vec::new(),
        }
    }

    /// The transaction type (the header's record type).
    pub fn transaction_type(&self) -> &str {
        &self.header.record_type
    }

    /// Header plus details, in input order.
    pub fn all_records(&self) -> impl Iterator<Item = &Record> {
        std::iter::once(&self.header).chain(self.records.iter())
    }

    /// Number of records including the header.
    pub fn record_count(&self) -> usize {
        1 + self.records.len()
    }
}

/// A GRH/GRT-bounded run of same-type transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub header: Record,
    pub transactions: Vec<Transaction>,
    /// Absent when the group was never closed by a GRT.
    pub trailer: Option<Record>,
}

impl Group {
    pub fn new(header: Record) -> Self {
        Self {
            header,
            transactions: Vec::new(),
            trailer: None,
        }
    }

    /// The group's declared transaction type from the GRH.
    pub fn transaction_type(&self) -> Option<&str> {
        self.header.text("transaction_type")
    }

    pub fn group_id(&self) -> Option<u64> {
        self.header.number("group_id")
    }

    /// Records observed inside the group.
    ///
    /// With `include_bounds`, the GRH and GRT count toward the total, the
    /// same convention the TRL applies file-wide.
    pub fn observed_record_count(&self, include_bounds: bool) -> usize {
        let body: usize = self.transactions.iter().map(Transaction::record_count).sum();
        if include_bounds {
            body + 1 + usize::from(self.trailer.is_some())
        } else {
            body
        }
    }
}

/// A fully parsed CWR file with all findings attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CwrFile {
    pub version: CwrVersion,
    /// Absent only when the input does not start with a decodable HDR.
    pub header: Option<Record>,
    pub groups: Vec<Group>,
    pub trailer: Option<Record>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CwrFile {
    /// True when no finding invalidates a record or wider scope.
    ///
    /// Field-level and warning findings leave the file usable; callers
    /// needing finer policy consult `diagnostics` directly.
    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity >= Severity::Record)
    }

    /// Transactions across all groups.
    pub fn transaction_count(&self) -> usize {
        self.groups.iter().map(|g| g.transactions.len()).sum()
    }

    /// Every record in the file including HDR, GRH, GRT, and TRL.
    pub fn observed_record_count(&self) -> usize {
        let bounds = usize::from(self.header.is_some()) + usize::from(self.trailer.is_some());
        let groups: usize = self
            .groups
            .iter()
            .map(|g| g.observed_record_count(true))
            .sum();
        bounds + groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticCode;

    fn record(record_type: &str, line: usize) -> Record {
        Record::new(record_type, line, format!("{record_type}..."))
    }

    #[test]
    fn version_round_trip() {
        assert_eq!("02.10".parse::<CwrVersion>().unwrap(), CwrVersion::V21);
        assert_eq!("2.2".parse::<CwrVersion>().unwrap(), CwrVersion::V22);
        assert_eq!(CwrVersion::V22.as_str(), "02.20");
        assert!("3.0".parse::<CwrVersion>().is_err());
    }

    #[test]
    fn group_record_count_conventions() {
        let mut group = Group::new(record("GRH", 2));
        let mut txn = Transaction::new(record("WRK", 3));
        txn.records.push(record("ALT", 4));
        group.transactions.push(txn);
        group.trailer = Some(record("GRT", 5));

        assert_eq!(group.observed_record_count(false), 2);
        assert_eq!(group.observed_record_count(true), 4);
    }

    #[test]
    fn file_counts_span_bounds() {
        let mut group = Group::new(record("GRH", 2));
        group.transactions.push(Transaction::new(record("WRK", 3)));
        group.trailer = Some(record("GRT", 4));

        let file = CwrFile {
            version: CwrVersion::V22,
            header: Some(record("HDR", 1)),
            groups: vec![group],
            trailer: Some(record("TRL", 5)),
            diagnostics: Vec::new(),
        };

        assert_eq!(file.transaction_count(), 1);
        assert_eq!(file.observed_record_count(), 5);
        assert!(file.is_valid());
    }

    #[test]
    fn field_level_findings_do_not_invalidate() {
        let mut file = CwrFile {
            version: CwrVersion::V21,
            header: None,
            groups: Vec::new(),
            trailer: None,
            diagnostics: vec![Diagnostic::new(
                Severity::Field,
                DiagnosticCode::Truncated,
                "short line",
            )],
        };
        assert!(file.is_valid());

        file.diagnostics.push(Diagnostic::new(
            Severity::Record,
            DiagnosticCode::UnknownRecordType,
            "XYZ",
        ));
        assert!(!file.is_valid());
    }
}
