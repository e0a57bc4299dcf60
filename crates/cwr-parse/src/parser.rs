//! Structural parser: rebuilds the file / group / transaction hierarchy
//! from the flat record stream.
//!
//! A deterministic state machine over decoded records:
//!
//! ```text
//! Start --HDR--> InFile --GRH--> InGroup --<txn header>--> InTransaction
//! InTransaction --<detail>--> InTransaction
//! InTransaction --<txn header>--> InTransaction   (close previous)
//! InGroup/InTransaction --GRT--> InFile
//! InFile --TRL--> End
//! ```
//!
//! Unexpected transitions produce a diagnostic and the parser recovers at
//! the next record that re-establishes a known state, so a malformed file
//! still yields a complete report rather than one stop error.

use cwr_model::{
    CwrFile, CwrVersion, Diagnostic, DiagnosticCode, Group, Record, Severity, Transaction,
};
use cwr_standards::SchemaRegistry;
use tracing::debug;

use crate::decoder::RecordDecoder;
use crate::tokenizer::{RawLine, tokenize};

/// Parser configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Force a revision instead of reading it from the HDR.
    pub version: Option<CwrVersion>,
}

/// Parse a whole input using a fresh parser; see [`StructuralParser`].
pub fn parse_str(input: &str, registry: &SchemaRegistry, options: ParseOptions) -> CwrFile {
    StructuralParser::new(registry)
        .with_options(options)
        .parse_str(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InFile,
    InGroup,
    InTransaction,
    End,
}

/// One-shot structural parser.
///
/// Carries no state between calls; the registry it borrows is immutable
/// and shareable. Instantiate one parser per concurrently processed input.
#[derive(Debug, Clone, Copy)]
pub struct StructuralParser<'a> {
    registry: &'a SchemaRegistry,
    options: ParseOptions,
}

impl<'a> StructuralParser<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            options: ParseOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse the input into a file tree. Total: every input yields a
    /// `CwrFile`, with defects reported through its diagnostics.
    pub fn parse_str(&self, input: &str) -> CwrFile {
        let (lines, mut diagnostics) = tokenize(input);
        let version = self.resolve_version(&lines, &mut diagnostics);
        let decoder = RecordDecoder::new(self.registry);
        debug!(%version, lines = lines.len(), "parsing record stream");

        let mut state = State::Start;
        let mut header: Option<Record> = None;
        let mut trailer: Option<Record> = None;
        let mut groups: Vec<Group> = Vec::new();
        let mut open_group: Option<Group> = None;
        let mut open_txn: Option<Transaction> = None;

        fn close_txn(open_txn: &mut Option<Transaction>, open_group: &mut Option<Group>) {
            if let Some(txn) = open_txn.take()
                && let Some(group) = open_group.as_mut()
            {
                group.transactions.push(txn);
            }
        }

        fn close_group(
            open_txn: &mut Option<Transaction>,
            open_group: &mut Option<Group>,
            groups: &mut Vec<Group>,
            grt: Option<Record>,
        ) {
            close_txn(open_txn, open_group);
            if let Some(mut group) = open_group.take() {
                group.trailer = grt;
                groups.push(group);
            }
        }

        for line in &lines {
            let (record, mut record_diags) = decoder.decode(version, line);
            diagnostics.append(&mut record_diags);

            let record_type = record.record_type.clone();
            match record_type.as_str() {
                "HDR" => {
                    if state == State::Start {
                        header = Some(record);
                        state = State::InFile;
                    } else {
                        diagnostics.push(bad_structure(
                            Severity::Fatal,
                            "unexpected HDR after the file header",
                            line,
                        ));
                    }
                }
                "GRH" => {
                    match state {
                        State::InFile => {}
                        State::Start => {
                            diagnostics.push(bad_structure(
                                Severity::Fatal,
                                "GRH before HDR",
                                line,
                            ));
                        }
                        State::InGroup | State::InTransaction => {
                            diagnostics.push(bad_structure(
                                Severity::Group,
                                "GRH while the previous group is still open; closing it",
                                line,
                            ));
                            close_group(&mut open_txn, &mut open_group, &mut groups, None);
                        }
                        State::End => {
                            diagnostics.push(bad_structure(
                                Severity::Fatal,
                                "GRH after TRL",
                                line,
                            ));
                            continue;
                        }
                    }
                    if let Some(grh_version) = record.text("version_number")
                        && grh_version != version.as_str()
                    {
                        diagnostics.push(
                            Diagnostic::new(
                                Severity::Group,
                                DiagnosticCode::VersionMismatch,
                                format!(
                                    "group declares version {grh_version}, file is {}",
                                    version.as_str()
                                ),
                            )
                            .at_line(line.number)
                            .for_record("GRH"),
                        );
                    }
                    open_group = Some(Group::new(record));
                    state = State::InGroup;
                }
                "GRT" => match state {
                    State::InGroup | State::InTransaction => {
                        close_group(&mut open_txn, &mut open_group, &mut groups, Some(record));
                        state = State::InFile;
                    }
                    _ => {
                        diagnostics.push(bad_structure(
                            Severity::Group,
                            "GRT without an open group",
                            line,
                        ));
                    }
                },
                "TRL" => match state {
                    State::InFile => {
                        trailer = Some(record);
                        state = State::End;
                    }
                    State::InGroup | State::InTransaction => {
                        diagnostics.push(bad_structure(
                            Severity::Fatal,
                            "TRL while a group is still open; closing it",
                            line,
                        ));
                        close_group(&mut open_txn, &mut open_group, &mut groups, None);
                        trailer = Some(record);
                        state = State::End;
                    }
                    State::Start => {
                        diagnostics.push(bad_structure(Severity::Fatal, "TRL before HDR", line));
                        trailer = Some(record);
                        state = State::End;
                    }
                    State::End => {
                        diagnostics.push(bad_structure(
                            Severity::Fatal,
                            "duplicate TRL",
                            line,
                        ));
                    }
                },
                t if SchemaRegistry::is_transaction_header(t) => match state {
                    State::InGroup => {
                        open_txn = Some(Transaction::new(record));
                        state = State::InTransaction;
                    }
                    State::InTransaction => {
                        close_txn(&mut open_txn, &mut open_group);
                        open_txn = Some(Transaction::new(record));
                    }
                    _ => {
                        diagnostics.push(bad_structure(
                            Severity::Fatal,
                            format!("transaction header {t} outside a group"),
                            line,
                        ));
                    }
                },
                // Malformed lines already carry a Fatal diagnostic from the
                // decoder; fold them into the open transaction when one
                // exists so the raw content stays visible in the tree.
                "" => {
                    if let Some(txn) = open_txn.as_mut() {
                        txn.records.push(record);
                    }
                }
                _ => {
                    // Detail record, including unknown types which degraded
                    // at decode time but still belong to their transaction.
                    if state == State::InTransaction {
                        if let Some(txn) = open_txn.as_mut() {
                            txn.records.push(record);
                        }
                    } else {
                        diagnostics.push(bad_structure(
                            Severity::Fatal,
                            format!(
                                "detail record {} outside a transaction",
                                record.record_type
                            ),
                            line,
                        ));
                    }
                }
            }
        }

        let last_line = lines.last().map(|l| l.number);
        match state {
            State::End => {}
            State::Start => {
                diagnostics.push(end_diag("no HDR record found", last_line));
            }
            State::InFile => {
                diagnostics.push(end_diag("input ended without a TRL record", last_line));
            }
            State::InGroup | State::InTransaction => {
                diagnostics.push(end_diag(
                    "input ended inside an open group; missing GRT and TRL",
                    last_line,
                ));
                close_group(&mut open_txn, &mut open_group, &mut groups, None);
            }
        }

        diagnostics.sort_by_key(|d| d.line.unwrap_or(usize::MAX));

        CwrFile {
            version,
            header,
            groups,
            trailer,
            diagnostics,
        }
    }

    /// Decide the revision: explicit option, else the HDR version field,
    /// else 2.2.
    fn resolve_version(
        &self,
        lines: &[RawLine<'_>],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> CwrVersion {
        if let Some(version) = self.options.version {
            return version;
        }
        let Some(first) = lines.first() else {
            return CwrVersion::V22;
        };
        let chars: Vec<char> = first.text.chars().take(8).collect();
        if chars.len() < 8 || chars[..3].iter().collect::<String>() != "HDR" {
            return CwrVersion::V22;
        }
        let declared: String = chars[3..8].iter().collect();
        match declared.parse() {
            Ok(version) => version,
            Err(_) => {
                diagnostics.push(
                    Diagnostic::new(
                        Severity::Fatal,
                        DiagnosticCode::FormatError,
                        format!("unsupported version {declared:?} in HDR; assuming 02.20"),
                    )
                    .at_line(first.number)
                    .for_record("HDR")
                    .for_field("version_number"),
                );
                CwrVersion::V22
            }
        }
    }
}

fn bad_structure(severity: Severity, message: impl Into<String>, line: &RawLine<'_>) -> Diagnostic {
    Diagnostic::new(severity, DiagnosticCode::BadStructure, message).at_line(line.number)
}

fn end_diag(message: &str, last_line: Option<usize>) -> Diagnostic {
    let diag = Diagnostic::new(Severity::Fatal, DiagnosticCode::BadStructure, message);
    match last_line {
        Some(line) => diag.at_line(line),
        None => diag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    fn parse(input: &str) -> CwrFile {
        parse_str(input, &registry(), ParseOptions::default())
    }

    fn hdr_line(version: &str) -> String {
        let mut l = String::from("HDR");
        l.push_str(version);
        l.push_str("PB");
        l.push_str("000000123");
        l.push_str(&format!("{:<45}", "EXAMPLE MUSIC PUBLISHING"));
        l.push_str("20240115");
        l.push_str("120000");
        l.push_str("20240116");
        if version == "02.20" {
            l.push_str(&" ".repeat(15));
        }
        l
    }

    fn grh_line(txn_type: &str, group_id: u64, version: &str) -> String {
        format!("GRH{txn_type}{group_id:05}{version}{:10}", "")
    }

    fn grt_line(group_id: u64, txn_count: u64, record_count: u64) -> String {
        format!("GRT{group_id:05}{txn_count:08}{record_count:08}")
    }

    fn trl_line(group_count: u64, txn_count: u64, record_count: u64) -> String {
        format!("TRL{group_count:05}{txn_count:08}{record_count:08}")
    }

    fn wrk_line(record_type: &str, txn_seq: u64, record_seq: u64, title: &str) -> String {
        let mut l = String::from(record_type);
        l.push_str(&format!("{txn_seq:08}"));
        l.push_str(&format!("{record_seq:08}"));
        l.push_str(&format!("{:<14}", "SW000001"));
        l.push_str(&format!("{title:<60}"));
        l.push_str("  "); // language
        l.push_str(&" ".repeat(11)); // iswc
        l.push_str(&" ".repeat(8)); // copyright date
        l.push_str(&" ".repeat(6)); // duration
        l.push(' '); // recorded indicator
        l.push_str("POP"); // distribution category
        l.push_str("ORI"); // version type
        l.push_str(&" ".repeat(12)); // excerpt/composite/lyric/arrangement
        l.push_str(&" ".repeat(14)); // catalogue number
        l.push_str(&" ".repeat(20)); // opus number
        l.push_str("  "); // work type
        l.push(' '); // grand rights
        l.push_str(&" ".repeat(3)); // component count
        l.push_str(&" ".repeat(8)); // publication date
        l.push_str("  "); // exceptional clause, priority
        l.push_str(&" ".repeat(3)); // text-music relationship
        l
    }

    #[test]
    fn minimal_valid_file() {
        let input = [
            hdr_line("02.20"),
            grh_line("NWR", 1, "02.20"),
            wrk_line("WRK", 0, 0, "SONG"),
            grt_line(1, 1, 3),
            trl_line(1, 1, 5),
        ]
        .join("\n");

        let file = parse(&input);
        assert!(file.diagnostics.is_empty(), "{:#?}", file.diagnostics);
        assert_eq!(file.version, CwrVersion::V22);
        assert_eq!(file.groups.len(), 1);
        assert_eq!(file.groups[0].transactions.len(), 1);
        assert_eq!(
            file.groups[0].transactions[0].header.text("title"),
            Some("SONG")
        );
        assert!(file.trailer.is_some());
        assert!(file.is_valid());
    }

    #[test]
    fn version_read_from_hdr() {
        let input = [
            hdr_line("02.10"),
            grh_line("NWR", 1, "02.10"),
            wrk_line("WRK", 0, 0, "OLD STYLE"),
            grt_line(1, 1, 3),
            trl_line(1, 1, 5),
        ]
        .join("\n");

        let file = parse(&input);
        assert_eq!(file.version, CwrVersion::V21);
        assert!(file.is_valid(), "{:#?}", file.diagnostics);
    }

    #[test]
    fn explicit_version_overrides_hdr() {
        let input = [hdr_line("02.20"), trl_line(0, 0, 2)].join("\n");
        let file = parse_str(
            &input,
            &registry(),
            ParseOptions {
                version: Some(CwrVersion::V21),
            },
        );
        assert_eq!(file.version, CwrVersion::V21);
    }

    #[test]
    fn group_version_mismatch_is_reported_and_parse_completes() {
        let input = [
            hdr_line("02.20"),
            grh_line("NWR", 1, "02.10"),
            wrk_line("WRK", 0, 0, "SONG"),
            grt_line(1, 1, 3),
            trl_line(1, 1, 5),
        ]
        .join("\n");

        let file = parse(&input);
        let mismatches: Vec<_> = file
            .diagnostics
            .iter()
            .filter(|d| d.code == DiagnosticCode::VersionMismatch)
            .collect();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].severity, Severity::Group);
        assert_eq!(mismatches[0].line, Some(2));
        assert_eq!(file.groups.len(), 1);
        assert_eq!(file.groups[0].transactions.len(), 1);
    }

    #[test]
    fn unsupported_hdr_version_is_fatal_but_total() {
        let input = [hdr_line("09.99"), trl_line(0, 0, 2)].join("\n");
        let file = parse(&input);
        assert!(
            file.diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::FormatError
                    && d.severity == Severity::Fatal)
        );
        assert_eq!(file.version, CwrVersion::V22);
    }

    #[test]
    fn unknown_record_mid_transaction_stays_in_tree() {
        let input = [
            hdr_line("02.20"),
            grh_line("NWR", 1, "02.20"),
            wrk_line("WRK", 0, 0, "SONG"),
            "XYZ garbage".to_string(),
            wrk_line("WRK", 1, 0, "SECOND SONG"),
            grt_line(1, 2, 5),
            trl_line(1, 2, 7),
        ]
        .join("\n");

        let file = parse(&input);
        let unknown: Vec<_> = file
            .diagnostics
            .iter()
            .filter(|d| d.code == DiagnosticCode::UnknownRecordType)
            .collect();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].line, Some(4));

        // Both transactions survive; the unknown record rides in the first.
        assert_eq!(file.groups[0].transactions.len(), 2);
        assert_eq!(file.groups[0].transactions[0].records.len(), 1);
        assert_eq!(
            file.groups[0].transactions[1].header.text("title"),
            Some("SECOND SONG")
        );
    }

    #[test]
    fn missing_grt_recovers_at_trl() {
        let input = [
            hdr_line("02.20"),
            grh_line("NWR", 1, "02.20"),
            wrk_line("WRK", 0, 0, "SONG"),
            trl_line(1, 1, 5),
        ]
        .join("\n");

        let file = parse(&input);
        assert!(
            file.diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::BadStructure
                    && d.severity == Severity::Fatal)
        );
        assert_eq!(file.groups.len(), 1);
        assert!(file.groups[0].trailer.is_none());
        assert!(file.trailer.is_some());
    }

    #[test]
    fn back_to_back_groups_without_grt() {
        let input = [
            hdr_line("02.20"),
            grh_line("NWR", 1, "02.20"),
            wrk_line("WRK", 0, 0, "A"),
            grh_line("REV", 2, "02.20"),
            wrk_line("REV", 0, 0, "B"),
            grt_line(2, 1, 3),
            trl_line(2, 2, 7),
        ]
        .join("\n");

        let file = parse(&input);
        assert_eq!(file.groups.len(), 2);
        assert!(file.groups[0].trailer.is_none());
        assert!(file.groups[1].trailer.is_some());
        assert!(
            file.diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::BadStructure
                    && d.severity == Severity::Group)
        );
    }

    #[test]
    fn detail_outside_transaction_is_diagnosed_and_skipped() {
        let input = [
            hdr_line("02.20"),
            grh_line("NWR", 1, "02.20"),
            // ALT with no preceding work header
            format!("ALT0000000000000001{:<60}AT  ", "TITLE"),
            grt_line(1, 0, 2),
            trl_line(1, 0, 4),
        ]
        .join("\n");

        let file = parse(&input);
        assert!(
            file.diagnostics
                .iter()
                .any(|d| d.code == DiagnosticCode::BadStructure
                    && d.message.contains("outside a transaction"))
        );
        assert!(file.groups[0].transactions.is_empty());
    }

    #[test]
    fn empty_input_reports_missing_hdr() {
        let file = parse("");
        assert_eq!(file.diagnostics.len(), 1);
        assert_eq!(file.diagnostics[0].severity, Severity::Fatal);
        assert!(file.header.is_none());
    }

    /// Parser totality: arbitrary line soups produce a result with
    /// diagnostics in input order.
    #[test]
    fn parser_is_total_and_orders_diagnostics() {
        let soups = vec![
            "TRL00001\nHDR02.20\nGRT".to_string(),
            "GRH???\n\nXYZ\nWRK".to_string(),
            "\n\n\n".to_string(),
            "WRK only detail-ish content".to_string(),
            format!("{}\n{}", grt_line(1, 1, 1), hdr_line("02.20")),
        ];
        for soup in &soups {
            let file = parse(soup);
            let lines: Vec<usize> = file
                .diagnostics
                .iter()
                .map(|d| d.line.unwrap_or(usize::MAX))
                .collect();
            let mut sorted = lines.clone();
            sorted.sort_unstable();
            assert_eq!(lines, sorted, "diagnostics out of order for {soup:?}");
        }
    }
}
