//! L4: structural counts and group bookkeeping.
//!
//! Re-surfaces the parser's count invariants as diagnostics: GRT counts
//! against observed group contents, TRL totals against the whole file,
//! group id monotonicity, and group/transaction type agreement. Declared
//! values that failed to decode are skipped; the decoder and L1 already
//! reported those.

use cwr_model::{CwrFile, Diagnostic, DiagnosticCode, Group, Severity};

use crate::validator::ValidateOptions;

pub fn check(file: &CwrFile, options: &ValidateOptions) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let mut previous_group_id: Option<u64> = None;
    for group in &file.groups {
        if let Some(group_id) = group.group_id() {
            if let Some(previous) = previous_group_id
                && group_id <= previous
            {
                diagnostics.push(
                    Diagnostic::new(
                        Severity::Group,
                        DiagnosticCode::BadSequence,
                        format!("group id {group_id} does not increase over {previous}"),
                    )
                    .at_line(group.header.line)
                    .for_record("GRH"),
                );
            }
            previous_group_id = Some(group_id);
        }

        check_group_types(group, &mut diagnostics);
        check_group_counts(group, options, &mut diagnostics);
    }

    check_file_counts(file, &mut diagnostics);
    diagnostics
}

/// Transaction header types compatible with a group's declared type.
/// WRK is the legacy spelling of a new-work registration.
fn compatible(group_type: &str, header_type: &str) -> bool {
    group_type == header_type
        || matches!((group_type, header_type), ("NWR", "WRK") | ("WRK", "NWR"))
}

fn check_group_types(group: &Group, out: &mut Vec<Diagnostic>) {
    let Some(group_type) = group.transaction_type() else {
        return;
    };
    for txn in &group.transactions {
        if !compatible(group_type, txn.transaction_type()) {
            out.push(
                Diagnostic::new(
                    Severity::Group,
                    DiagnosticCode::BadStructure,
                    format!(
                        "{} transaction in a group declared {group_type}",
                        txn.transaction_type()
                    ),
                )
                .at_line(txn.header.line)
                .for_record(txn.transaction_type()),
            );
        }
    }
}

fn check_group_counts(group: &Group, options: &ValidateOptions, out: &mut Vec<Diagnostic>) {
    let Some(trailer) = &group.trailer else {
        // An unterminated group already carries a structural diagnostic.
        return;
    };

    if let (Some(grh_id), Some(grt_id)) = (group.group_id(), trailer.number("group_id"))
        && grh_id != grt_id
    {
        out.push(
            Diagnostic::new(
                Severity::Group,
                DiagnosticCode::BadStructure,
                format!("GRT group id {grt_id} does not match GRH group id {grh_id}"),
            )
            .at_line(trailer.line)
            .for_record("GRT"),
        );
    }

    if let Some(declared) = trailer.number("transaction_count") {
        let observed = group.transactions.len() as u64;
        if declared != observed {
            out.push(count_mismatch(
                Severity::Group,
                trailer.line,
                "GRT",
                "group transaction count",
                declared,
                observed,
            ));
        }
    }

    if let Some(declared) = trailer.number("record_count") {
        let observed = group.observed_record_count(options.group_count_includes_bounds) as u64;
        if declared != observed {
            out.push(count_mismatch(
                Severity::Group,
                trailer.line,
                "GRT",
                "group record count",
                declared,
                observed,
            ));
        }
    }
}

fn check_file_counts(file: &CwrFile, out: &mut Vec<Diagnostic>) {
    let Some(trailer) = &file.trailer else {
        return;
    };

    if let Some(declared) = trailer.number("group_count") {
        let observed = file.groups.len() as u64;
        if declared != observed {
            out.push(count_mismatch(
                Severity::Fatal,
                trailer.line,
                "TRL",
                "file group count",
                declared,
                observed,
            ));
        }
    }

    if let Some(declared) = trailer.number("transaction_count") {
        let observed = file.transaction_count() as u64;
        if declared != observed {
            out.push(count_mismatch(
                Severity::Fatal,
                trailer.line,
                "TRL",
                "file transaction count",
                declared,
                observed,
            ));
        }
    }

    if let Some(declared) = trailer.number("record_count") {
        let observed = file.observed_record_count() as u64;
        if declared != observed {
            out.push(count_mismatch(
                Severity::Fatal,
                trailer.line,
                "TRL",
                "file record count",
                declared,
                observed,
            ));
        }
    }
}

fn count_mismatch(
    severity: Severity,
    line: usize,
    record_type: &str,
    what: &str,
    declared: u64,
    observed: u64,
) -> Diagnostic {
    Diagnostic::new(
        severity,
        DiagnosticCode::CountMismatch,
        format!("{what} declares {declared}, observed {observed}"),
    )
    .at_line(line)
    .for_record(record_type)
}
