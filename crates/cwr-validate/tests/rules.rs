//! Focused rule coverage: one defect per test, asserted precisely.

mod common;

use common::*;
use cwr_model::{DiagnosticCode, Severity};
use cwr_standards::{LookupManager, LookupTable};
use cwr_validate::ValidateOptions;

fn single_txn_file(detail_lines: &[String], grt_records: u64, trl_records: u64) -> String {
    let mut lines = vec![
        hdr_line("02.20"),
        grh_line("NWR", 1, "02.20"),
        work_line("WRK", 0, 0, "SONG"),
    ];
    lines.extend_from_slice(detail_lines);
    lines.push(grt_line(1, 1, grt_records));
    lines.push(trl_line(1, 1, trl_records));
    lines.join("\n")
}

#[test]
fn missing_mandatory_field() {
    // Blank out the title region of an otherwise valid WRK.
    let wrk = work_line("WRK", 0, 0, "SONG");
    let blanked: String = wrk
        .char_indices()
        .map(|(i, c)| if (33..93).contains(&i) { ' ' } else { c })
        .collect();
    let input = [
        hdr_line("02.20"),
        grh_line("NWR", 1, "02.20"),
        blanked,
        grt_line(1, 1, 3),
        trl_line(1, 1, 5),
    ]
    .join("\n");

    let file = parse_and_validate(&input);
    let missing: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::MissingMandatoryField)
        .collect();
    assert_eq!(missing.len(), 1, "{:#?}", file.diagnostics);
    assert_eq!(missing[0].severity, Severity::Record);
    assert_eq!(missing[0].field.as_deref(), Some("title"));
    assert!(!file.is_valid());
}

#[test]
fn lookup_membership_flags_unknown_codes() {
    let lookups = LookupManager::new();
    lookups.insert_table(LookupTable::from_pairs(
        "Musical Work Distribution Category",
        &[("POP", "Popular"), ("SER", "Serious")],
    ));
    lookups.insert_table(LookupTable::from_pairs(
        "Version Type",
        &[("ORI", "Original"), ("MOD", "Modified")],
    ));
    lookups.insert_table(LookupTable::from_pairs("Character Set", &[]));

    // Corrupt the distribution category to an unlisted code.
    let wrk = work_line("WRK", 0, 0, "SONG").replace("POPORI", "ZZZORI");
    let input = [
        hdr_line("02.20"),
        grh_line("NWR", 1, "02.20"),
        wrk,
        grt_line(1, 1, 3),
        trl_line(1, 1, 5),
    ]
    .join("\n");

    let file = parse_and_validate_with(&input, Some(&lookups), ValidateOptions::default());
    let unknown: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::UnknownCode)
        .collect();
    assert_eq!(unknown.len(), 1, "{:#?}", file.diagnostics);
    assert_eq!(unknown[0].severity, Severity::Field);
    assert_eq!(
        unknown[0].field.as_deref(),
        Some("musical_work_distribution_category")
    );
    // A field-level finding alone does not invalidate the file.
    assert!(file.is_valid());
}

#[test]
fn missing_lookup_table_degrades_to_single_warning() {
    // Only one of the two referenced tables is available.
    let lookups = LookupManager::new();
    lookups.insert_table(LookupTable::from_pairs("Version Type", &[("ORI", "Original")]));
    lookups.insert_table(LookupTable::from_pairs("Character Set", &[]));

    let input = [
        hdr_line("02.20"),
        grh_line("NWR", 1, "02.20"),
        work_line("WRK", 0, 0, "FIRST"),
        work_line("WRK", 1, 0, "SECOND"),
        grt_line(1, 2, 4),
        trl_line(1, 2, 6),
    ]
    .join("\n");

    let file = parse_and_validate_with(&input, Some(&lookups), ValidateOptions::default());
    let unavailable: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::LookupTableUnavailable)
        .collect();
    // Warned once per table, not once per record.
    assert_eq!(unavailable.len(), 1, "{:#?}", file.diagnostics);
    assert_eq!(unavailable[0].severity, Severity::Warning);
    assert!(file.is_valid());
}

#[test]
fn collection_shares_sum_per_territory() {
    let details = [
        swr_line("SWR", 0, 1, "W0001", "DOE", "CA", 100_000, 0, 0),
        territory_line("SWT", 0, 2, "W0001", 60_000, 0, 0, "I", "0826"),
        territory_line("SWT", 0, 3, "W0001", 30_000, 0, 0, "I", "0826"),
        // Excluded territory must not count toward any total.
        territory_line("SWT", 0, 4, "W0001", 99_999, 0, 0, "E", "2136"),
    ];
    let input = single_txn_file(&details, 7, 9);

    let file = parse_and_validate(&input);
    let share_diags: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::ShareSumInvalid)
        .collect();
    assert_eq!(share_diags.len(), 1, "{:#?}", file.diagnostics);
    assert!(share_diags[0].message.contains("0826"));
    assert!(share_diags[0].message.contains("90000"));
}

#[test]
fn share_tolerance_absorbs_rounding() {
    let details = [
        swr_line("SWR", 0, 1, "W0001", "DOE", "CA", 33_333, 0, 0),
        swr_line("SWR", 0, 2, "W0002", "ROE", "CA", 33_333, 0, 0),
        swr_line("SWR", 0, 3, "W0003", "POE", "CA", 33_333, 0, 0),
    ];
    // 99,999 thousandths is within the default +/-3 tolerance.
    let input = single_txn_file(&details, 6, 8);

    let file = parse_and_validate(&input);
    assert!(
        !file
            .diagnostics
            .iter()
            .any(|d| d.code == DiagnosticCode::ShareSumInvalid),
        "{:#?}",
        file.diagnostics
    );
}

#[test]
fn pwr_links_both_sides() {
    let details = [
        swr_line("SWR", 0, 1, "W0001", "DOE", "CA", 100_000, 0, 0),
        spu_line("SPU", 0, 2, 1, "P0001", "EXAMPLE MUSIC", "E", 0, 0, 0),
        // References an unknown publisher but a known writer.
        pwr_line(0, 3, "P9999", "W0001"),
    ];
    let input = single_txn_file(&details, 6, 8);

    let file = parse_and_validate(&input);
    let orphans: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::OrphanReference)
        .collect();
    assert_eq!(orphans.len(), 1, "{:#?}", file.diagnostics);
    assert_eq!(orphans[0].field.as_deref(), Some("publisher_ip_number"));
}

#[test]
fn pwr_publisher_name_is_optional() {
    // The linked SPU carries the authoritative name; a blank name on the
    // PWR itself is not a defect.
    let pwr = pwr_line(0, 3, "P0001", "W0001");
    let blanked: String = pwr
        .char_indices()
        .map(|(i, c)| if (28..73).contains(&i) { ' ' } else { c })
        .collect();
    let details = [
        swr_line("SWR", 0, 1, "W0001", "DOE", "CA", 100_000, 0, 0),
        spu_line("SPU", 0, 2, 1, "P0001", "EXAMPLE MUSIC", "E", 0, 0, 0),
        blanked,
    ];
    let input = single_txn_file(&details, 6, 8);

    let file = parse_and_validate(&input);
    assert!(file.diagnostics.is_empty(), "{:#?}", file.diagnostics);
    assert!(file.is_valid());
}

#[test]
fn detail_sequence_must_start_at_base_and_increase() {
    let details = [
        alt_line(0, 2, "FIRST ALT", "AT"),
        alt_line(0, 2, "SECOND ALT", "AT"),
    ];
    let input = single_txn_file(&details, 5, 7);

    let file = parse_and_validate(&input);
    let sequence_diags: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::BadSequence)
        .collect();
    // One for starting at 2 instead of 1, one for not increasing.
    assert_eq!(sequence_diags.len(), 2, "{:#?}", file.diagnostics);
    assert!(sequence_diags
        .iter()
        .all(|d| d.severity == Severity::Transaction));
}

#[test]
fn child_transaction_sequence_mismatch_severity_is_configurable() {
    let details = [alt_line(7, 1, "ALT TITLE", "AT")];
    let input = single_txn_file(&details, 4, 6);

    let file = parse_and_validate(&input);
    let default_diag = file
        .diagnostics
        .iter()
        .find(|d| d.code == DiagnosticCode::BadSequence)
        .expect("sequence mismatch expected");
    assert_eq!(default_diag.severity, Severity::Transaction);

    let options = ValidateOptions {
        sequence_severity: Severity::Record,
        ..ValidateOptions::default()
    };
    let file = parse_and_validate_with(&input, None, options);
    let record_diag = file
        .diagnostics
        .iter()
        .find(|d| d.code == DiagnosticCode::BadSequence)
        .expect("sequence mismatch expected");
    assert_eq!(record_diag.severity, Severity::Record);
}

#[test]
fn transaction_sequence_monotonic_within_group() {
    let input = [
        hdr_line("02.20"),
        grh_line("NWR", 1, "02.20"),
        work_line("WRK", 1, 0, "FIRST"),
        work_line("WRK", 0, 0, "SECOND"),
        grt_line(1, 2, 4),
        trl_line(1, 2, 6),
    ]
    .join("\n");

    let file = parse_and_validate(&input);
    let sequence_diags: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::BadSequence)
        .collect();
    assert_eq!(sequence_diags.len(), 1, "{:#?}", file.diagnostics);
    assert_eq!(sequence_diags[0].line, Some(4));
}

#[test]
fn nwr_without_writer_records_is_incomplete() {
    let input = [
        hdr_line("02.20"),
        grh_line("NWR", 1, "02.20"),
        work_line("NWR", 0, 0, "SONG"),
        grt_line(1, 1, 3),
        trl_line(1, 1, 5),
    ]
    .join("\n");

    let file = parse_and_validate(&input);
    let incomplete: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::IncompleteTransaction)
        .collect();
    // Missing both SWR and SWT.
    assert_eq!(incomplete.len(), 2, "{:#?}", file.diagnostics);
    assert!(incomplete.iter().all(|d| d.severity == Severity::Transaction));
}

#[test]
fn group_transaction_type_must_match() {
    let input = [
        hdr_line("02.20"),
        grh_line("NWR", 1, "02.20"),
        work_line("REV", 0, 0, "SONG"),
        grt_line(1, 1, 3),
        trl_line(1, 1, 5),
    ]
    .join("\n");

    let file = parse_and_validate(&input);
    let mismatched: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::BadStructure && d.severity == Severity::Group)
        .collect();
    assert_eq!(mismatched.len(), 1, "{:#?}", file.diagnostics);
}

#[test]
fn group_count_mismatch_yields_one_diagnostic_per_count() {
    let input = [
        hdr_line("02.20"),
        grh_line("NWR", 1, "02.20"),
        work_line("WRK", 0, 0, "SONG"),
        grt_line(1, 9, 3), // wrong transaction count only
        trl_line(1, 1, 5),
    ]
    .join("\n");

    let file = parse_and_validate(&input);
    let mismatches: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::CountMismatch)
        .collect();
    assert_eq!(mismatches.len(), 1, "{:#?}", file.diagnostics);
    assert_eq!(mismatches[0].severity, Severity::Group);
    assert!(mismatches[0].message.contains("declares 9"));
    assert!(mismatches[0].message.contains("observed 1"));
}

#[test]
fn group_record_count_convention_is_configurable() {
    // Declared count excludes GRH/GRT: 1 header record only.
    let input = [
        hdr_line("02.20"),
        grh_line("NWR", 1, "02.20"),
        work_line("WRK", 0, 0, "SONG"),
        grt_line(1, 1, 1),
        trl_line(1, 1, 5),
    ]
    .join("\n");

    // Bounds-inclusive counting (the default) flags it.
    let file = parse_and_validate(&input);
    assert!(file
        .diagnostics
        .iter()
        .any(|d| d.code == DiagnosticCode::CountMismatch));

    // Details-only counting accepts it.
    let options = ValidateOptions {
        group_count_includes_bounds: false,
        ..ValidateOptions::default()
    };
    let file = parse_and_validate_with(&input, None, options);
    let group_mismatches: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::CountMismatch && d.severity == Severity::Group)
        .collect();
    assert!(group_mismatches.is_empty(), "{:#?}", file.diagnostics);
}

#[test]
fn trl_count_mismatches_are_fatal() {
    let input = [
        hdr_line("02.20"),
        grh_line("NWR", 1, "02.20"),
        work_line("WRK", 0, 0, "SONG"),
        grt_line(1, 1, 3),
        trl_line(2, 1, 5), // wrong group count
    ]
    .join("\n");

    let file = parse_and_validate(&input);
    let mismatches: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::CountMismatch)
        .collect();
    assert_eq!(mismatches.len(), 1, "{:#?}", file.diagnostics);
    assert_eq!(mismatches[0].severity, Severity::Fatal);
    assert!(!file.is_valid());
}

#[test]
fn group_ids_must_increase() {
    let input = [
        hdr_line("02.20"),
        grh_line("NWR", 2, "02.20"),
        work_line("WRK", 0, 0, "FIRST"),
        grt_line(2, 1, 3),
        grh_line("NWR", 1, "02.20"),
        work_line("WRK", 0, 0, "SECOND"),
        grt_line(1, 1, 3),
        trl_line(2, 2, 8),
    ]
    .join("\n");

    let file = parse_and_validate(&input);
    let order_diags: Vec<_> = file
        .diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::BadSequence && d.record_type.as_deref() == Some("GRH"))
        .collect();
    assert_eq!(order_diags.len(), 1, "{:#?}", file.diagnostics);
    assert_eq!(order_diags[0].severity, Severity::Group);
}

#[test]
fn isw_transactions_are_structural_only() {
    // ISW carries no share records; the share and shape rules stay quiet.
    let input = [
        hdr_line("02.20"),
        grh_line("ISW", 1, "02.20"),
        work_line("ISW", 0, 0, "SONG"),
        grt_line(1, 1, 3),
        trl_line(1, 1, 5),
    ]
    .join("\n");

    let file = parse_and_validate(&input);
    assert!(file.diagnostics.is_empty(), "{:#?}", file.diagnostics);
    assert!(file.is_valid());
}
