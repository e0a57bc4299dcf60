//! L3: sequencing.
//!
//! Within a group, transaction sequences increase strictly. Within a
//! transaction, every record carries the header's transaction sequence;
//! the header's record sequence is 0 and detail record sequences increase
//! strictly from the configured base.
//!
//! Records whose sequence fields failed to decode are skipped here; the
//! decoder and the mandatory-field rule already cover them.

use cwr_model::{CwrFile, Diagnostic, DiagnosticCode, Severity, Transaction};

use crate::validator::ValidateOptions;

pub fn check(file: &CwrFile, options: &ValidateOptions) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for group in &file.groups {
        let mut previous_txn_seq: Option<u64> = None;

        for txn in &group.transactions {
            if let Some(seq) = txn.header.transaction_sequence() {
                if let Some(previous) = previous_txn_seq
                    && seq <= previous
                {
                    diagnostics.push(
                        Diagnostic::new(
                            options.sequence_severity,
                            DiagnosticCode::BadSequence,
                            format!(
                                "transaction sequence {seq} does not increase over {previous}"
                            ),
                        )
                        .at_line(txn.header.line)
                        .for_record(txn.transaction_type()),
                    );
                }
                previous_txn_seq = Some(seq);
            }
            check_transaction(txn, options, &mut diagnostics);
        }
    }

    diagnostics
}

fn check_transaction(txn: &Transaction, options: &ValidateOptions, out: &mut Vec<Diagnostic>) {
    let header_seq = txn.header.transaction_sequence();

    if let Some(record_seq) = txn.header.record_sequence()
        && record_seq != 0
    {
        out.push(
            Diagnostic::new(
                Severity::Transaction,
                DiagnosticCode::BadSequence,
                format!("transaction header record sequence is {record_seq}, expected 0"),
            )
            .at_line(txn.header.line)
            .for_record(txn.transaction_type()),
        );
    }

    let mut previous: Option<u64> = None;
    for record in &txn.records {
        if let (Some(txn_seq), Some(header_seq)) = (record.transaction_sequence(), header_seq)
            && txn_seq != header_seq
        {
            out.push(
                Diagnostic::new(
                    options.sequence_severity,
                    DiagnosticCode::BadSequence,
                    format!(
                        "record carries transaction sequence {txn_seq}, header declares \
                         {header_seq}"
                    ),
                )
                .at_line(record.line)
                .for_record(&record.record_type),
            );
        }

        let Some(seq) = record.record_sequence() else {
            continue;
        };
        match previous {
            None if seq != options.detail_sequence_base => {
                out.push(
                    Diagnostic::new(
                        Severity::Transaction,
                        DiagnosticCode::BadSequence,
                        format!(
                            "first detail record sequence is {seq}, expected {}",
                            options.detail_sequence_base
                        ),
                    )
                    .at_line(record.line)
                    .for_record(&record.record_type),
                );
            }
            Some(previous) if seq <= previous => {
                out.push(
                    Diagnostic::new(
                        Severity::Transaction,
                        DiagnosticCode::BadSequence,
                        format!("record sequence {seq} does not increase over {previous}"),
                    )
                    .at_line(record.line)
                    .for_record(&record.record_type),
                );
            }
            _ => {}
        }
        previous = Some(seq);
    }
}
