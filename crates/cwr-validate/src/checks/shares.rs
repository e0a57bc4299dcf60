//! L3: share totals.
//!
//! Shares are integer thousandths of a percent, so the 100.000% rule is
//! exact arithmetic on `u64` with a small configured tolerance to absorb
//! submitter rounding. Per rights type the rule only fires when the
//! transaction declares a non-zero share of that type; works registered
//! without shares stay valid.

use std::collections::BTreeMap;

use cwr_model::{CwrFile, Diagnostic, DiagnosticCode, Severity, Transaction};

use crate::validator::ValidateOptions;

/// 100.000% in thousandths.
pub const FULL_SHARE: u64 = 100_000;

const OWNERSHIP_TYPES: &[&str] = &["SWR", "OWR", "SPU", "OPU"];
const COLLECTION_TYPES: &[&str] = &["SWT", "OWT", "SPT", "OPT"];

/// `(label, ownership field, collection field)` per rights type.
const RIGHTS: &[(&str, &str, &str)] = &[
    ("PR", "pr_ownership_share", "pr_collection_share"),
    ("MR", "mr_ownership_share", "mr_collection_share"),
    ("SR", "sr_ownership_share", "sr_collection_share"),
];

/// Transaction types parsed structurally but excluded from share rules.
const STRUCTURAL_ONLY: &[&str] = &["ISW", "ISR"];

pub fn check(file: &CwrFile, options: &ValidateOptions) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for group in &file.groups {
        for txn in &group.transactions {
            if STRUCTURAL_ONLY.contains(&txn.transaction_type()) {
                continue;
            }
            check_ownership(txn, options, &mut diagnostics);
            check_collection(txn, options, &mut diagnostics);
        }
    }

    diagnostics
}

fn check_ownership(txn: &Transaction, options: &ValidateOptions, out: &mut Vec<Diagnostic>) {
    for (label, field, _) in RIGHTS {
        let total: u64 = txn
            .records
            .iter()
            .filter(|r| OWNERSHIP_TYPES.contains(&r.record_type.as_str()))
            .filter_map(|r| r.number(field))
            .sum();
        if total != 0 && total.abs_diff(FULL_SHARE) > options.share_tolerance {
            out.push(share_diag(
                txn,
                format!("{label} ownership total {total} thousandths; expected {FULL_SHARE}"),
            ));
        }
    }
}

fn check_collection(txn: &Transaction, options: &ValidateOptions, out: &mut Vec<Diagnostic>) {
    // (territory, rights index) -> running total over included territories
    let mut totals: BTreeMap<(String, usize), u64> = BTreeMap::new();

    for record in &txn.records {
        if !COLLECTION_TYPES.contains(&record.record_type.as_str()) {
            continue;
        }
        if record.text("inclusion_exclusion_indicator") != Some("I") {
            continue;
        }
        let Some(territory) = record.text("territory_code") else {
            continue;
        };
        for (idx, (_, _, field)) in RIGHTS.iter().enumerate() {
            if let Some(share) = record.number(field) {
                *totals.entry((territory.to_string(), idx)).or_default() += share;
            }
        }
    }

    for ((territory, idx), total) in totals {
        let (label, _, _) = RIGHTS[idx];
        if total != 0 && total.abs_diff(FULL_SHARE) > options.share_tolerance {
            out.push(share_diag(
                txn,
                format!(
                    "{label} collection total {total} thousandths for territory {territory}; \
                     expected {FULL_SHARE}"
                ),
            ));
        }
    }
}

fn share_diag(txn: &Transaction, message: String) -> Diagnostic {
    Diagnostic::new(Severity::Transaction, DiagnosticCode::ShareSumInvalid, message)
        .at_line(txn.header.line)
        .for_record(txn.transaction_type())
}
