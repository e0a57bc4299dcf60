//! Classified diagnostics emitted by the decoder, parser, and validator.
//!
//! Diagnostics are data, not errors: every parse returns a result carrying
//! zero or more of these, and no content defect aborts processing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic, ordered ascending so that scope comparisons
/// read naturally (`severity >= Severity::Record` invalidates the result).
///
/// The level names the scope that a finding invalidates:
/// - `Warning` - informational only
/// - `Field` - a single field is unusable
/// - `Record` - one record is unusable
/// - `Transaction` - one transaction is unusable
/// - `Group` - one group is unusable, others remain usable
/// - `Fatal` - the whole file is unusable
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Field,
    Record,
    Transaction,
    Group,
    Fatal,
}

/// Stable machine-readable code for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    /// Line shorter than the three-byte record type prefix.
    MalformedRecord,
    /// Record type has no schema in the active version.
    UnknownRecordType,
    /// Line ended before a field's declared range.
    Truncated,
    /// Field content failed its declared format.
    FormatError,
    /// Structural transition the state machine does not allow.
    BadStructure,
    /// GRH version differs from the HDR version.
    VersionMismatch,
    /// Blank input line.
    EmptyLine,
    /// Mandatory field blank or invalid after decode.
    MissingMandatoryField,
    /// Lookup-coded field value not in its table.
    UnknownCode,
    /// Lookup table unavailable; membership rule skipped.
    LookupTableUnavailable,
    /// Ownership or collection shares do not total 100.000%.
    ShareSumInvalid,
    /// Territory or publisher record references an unknown interested party.
    OrphanReference,
    /// Record or transaction sequence out of order.
    BadSequence,
    /// Declared count differs from the observed count.
    CountMismatch,
    /// Transaction lacks a record type its transaction type requires.
    IncompleteTransaction,
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticCode::MalformedRecord => "MALFORMED_RECORD",
            DiagnosticCode::UnknownRecordType => "UNKNOWN_RECORD_TYPE",
            DiagnosticCode::Truncated => "TRUNCATED",
            DiagnosticCode::FormatError => "FORMAT_ERROR",
            DiagnosticCode::BadStructure => "BAD_STRUCTURE",
            DiagnosticCode::VersionMismatch => "VERSION_MISMATCH",
            DiagnosticCode::EmptyLine => "EMPTY_LINE",
            DiagnosticCode::MissingMandatoryField => "MISSING_MANDATORY_FIELD",
            DiagnosticCode::UnknownCode => "UNKNOWN_CODE",
            DiagnosticCode::LookupTableUnavailable => "LOOKUP_TABLE_UNAVAILABLE",
            DiagnosticCode::ShareSumInvalid => "SHARE_SUM_INVALID",
            DiagnosticCode::OrphanReference => "ORPHAN_REFERENCE",
            DiagnosticCode::BadSequence => "BAD_SEQUENCE",
            DiagnosticCode::CountMismatch => "COUNT_MISMATCH",
            DiagnosticCode::IncompleteTransaction => "INCOMPLETE_TRANSACTION",
        };
        f.write_str(name)
    }
}

/// A single classified finding attached to the parse result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    /// 1-based input line, when the finding is anchored to one.
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            line: None,
            record_type: None,
            field: None,
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn for_record(mut self, record_type: impl Into<String>) -> Self {
        self.record_type = Some(record_type.into());
        self
    }

    #[must_use]
    pub fn for_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{}: {}", self.severity, self.code, self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering_matches_scope() {
        assert!(Severity::Fatal > Severity::Group);
        assert!(Severity::Group > Severity::Transaction);
        assert!(Severity::Transaction > Severity::Record);
        assert!(Severity::Record > Severity::Field);
        assert!(Severity::Field > Severity::Warning);
    }

    #[test]
    fn invalidating_threshold() {
        // The result stays valid while every finding is below Record scope.
        for severity in [Severity::Warning, Severity::Field] {
            assert!(severity < Severity::Record);
        }
        for severity in [
            Severity::Record,
            Severity::Transaction,
            Severity::Group,
            Severity::Fatal,
        ] {
            assert!(severity >= Severity::Record);
        }
    }

    #[test]
    fn builder_attaches_location() {
        let diag = Diagnostic::new(
            Severity::Field,
            DiagnosticCode::Truncated,
            "line ends before field",
        )
        .at_line(7)
        .for_record("WRK")
        .for_field("title");

        assert_eq!(diag.line, Some(7));
        assert_eq!(diag.record_type.as_deref(), Some("WRK"));
        assert_eq!(diag.field.as_deref(), Some("title"));
    }
}
