//! L3: referential linkage inside a transaction.
//!
//! Territory records must reference an interested party declared by the
//! matching writer/publisher record, and PWR must link a known publisher
//! to a known writer.

use std::collections::BTreeSet;

use cwr_model::{CwrFile, Diagnostic, DiagnosticCode, Record, Severity, Transaction};

pub fn check(file: &CwrFile) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for group in &file.groups {
        for txn in &group.transactions {
            check_transaction(txn, &mut diagnostics);
        }
    }
    diagnostics
}

fn ipn_set<'a>(txn: &'a Transaction, record_types: &[&str]) -> BTreeSet<&'a str> {
    txn.records
        .iter()
        .filter(|r| record_types.contains(&r.record_type.as_str()))
        .filter_map(|r| r.text("interested_party_number"))
        .collect()
}

fn check_transaction(txn: &Transaction, out: &mut Vec<Diagnostic>) {
    let swr = ipn_set(txn, &["SWR"]);
    let owr = ipn_set(txn, &["OWR"]);
    let spu = ipn_set(txn, &["SPU"]);
    let opu = ipn_set(txn, &["OPU"]);

    for record in &txn.records {
        match record.record_type.as_str() {
            "SWT" => check_reference(record, "interested_party_number", &swr, "SWR", out),
            "OWT" => check_reference(record, "interested_party_number", &owr, "OWR", out),
            "SPT" => check_reference(record, "interested_party_number", &spu, "SPU", out),
            "OPT" => check_reference(record, "interested_party_number", &opu, "OPU", out),
            "PWR" => {
                let publishers: BTreeSet<&str> = spu.union(&opu).copied().collect();
                let writers: BTreeSet<&str> = swr.union(&owr).copied().collect();
                check_reference(record, "publisher_ip_number", &publishers, "SPU/OPU", out);
                check_reference(record, "writer_ip_number", &writers, "SWR/OWR", out);
            }
            _ => {}
        }
    }
}

fn check_reference(
    record: &Record,
    field: &str,
    known: &BTreeSet<&str>,
    expected_in: &str,
    out: &mut Vec<Diagnostic>,
) {
    let Some(ipn) = record.text(field) else {
        return;
    };
    if !known.contains(ipn) {
        out.push(
            Diagnostic::new(
                Severity::Transaction,
                DiagnosticCode::OrphanReference,
                format!(
                    "{} references interested party {ipn:?} with no matching {expected_in} \
                     in the transaction",
                    record.record_type
                ),
            )
            .at_line(record.line)
            .for_record(&record.record_type)
            .for_field(field),
        );
    }
}
