//! L3: transaction shape.
//!
//! New and revised registrations must declare at least one submitter
//! writer and one writer territory; a registration with neither cannot be
//! applied by a receiving society.

use std::collections::BTreeSet;

use cwr_model::{CwrFile, Diagnostic, DiagnosticCode, Severity};

/// `(transaction type, required detail record types)`
const REQUIRED_RECORDS: &[(&str, &[&str])] = &[
    ("NWR", &["SWR", "SWT"]),
    ("REV", &["SWR", "SWT"]),
];

pub fn check(file: &CwrFile) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for group in &file.groups {
        for txn in &group.transactions {
            let Some((_, required)) = REQUIRED_RECORDS
                .iter()
                .find(|(txn_type, _)| *txn_type == txn.transaction_type())
            else {
                continue;
            };

            let present: BTreeSet<&str> = txn
                .records
                .iter()
                .map(|r| r.record_type.as_str())
                .collect();

            for required_type in *required {
                if !present.contains(required_type) {
                    diagnostics.push(
                        Diagnostic::new(
                            Severity::Transaction,
                            DiagnosticCode::IncompleteTransaction,
                            format!(
                                "{} transaction has no {required_type} record",
                                txn.transaction_type()
                            ),
                        )
                        .at_line(txn.header.line)
                        .for_record(txn.transaction_type()),
                    );
                }
            }
        }
    }

    diagnostics
}
