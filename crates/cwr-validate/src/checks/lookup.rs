//! L2: coded fields must be members of their lookup table.
//!
//! A missing table downgrades the rule to a warning and a logged gap; the
//! rule is never skipped silently.

use std::collections::BTreeSet;

use cwr_model::{CwrFile, Diagnostic, DiagnosticCode, FieldValue, Severity};
use cwr_standards::{FieldFormat, LookupManager, SchemaRegistry};
use tracing::warn;

use super::records_in_order;

pub fn check(
    file: &CwrFile,
    registry: &SchemaRegistry,
    lookups: &LookupManager,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut unavailable: BTreeSet<&'static str> = BTreeSet::new();

    for record in records_in_order(file) {
        let Some(schema) = registry.schema(file.version, &record.record_type) else {
            continue;
        };
        for spec in schema.fields {
            let FieldFormat::Lookup(table_name) = spec.format else {
                continue;
            };
            let Some(FieldValue::Text(value)) = record.fields.get(spec.name) else {
                // Blank optional fields pass; blank mandatory ones are L1's.
                continue;
            };

            let Ok(table) = lookups.get_table(table_name) else {
                if unavailable.insert(table_name) {
                    warn!(
                        table = table_name,
                        field = spec.name,
                        "lookup table unavailable; membership checks skipped"
                    );
                    diagnostics.push(
                        Diagnostic::new(
                            Severity::Warning,
                            DiagnosticCode::LookupTableUnavailable,
                            format!(
                                "lookup table {table_name:?} unavailable; values not checked"
                            ),
                        )
                        .at_line(record.line)
                        .for_record(&record.record_type)
                        .for_field(spec.name),
                    );
                }
                continue;
            };

            if !table.contains(value) {
                diagnostics.push(
                    Diagnostic::new(
                        Severity::Field,
                        DiagnosticCode::UnknownCode,
                        format!("value {value:?} is not in table {table_name:?}"),
                    )
                    .at_line(record.line)
                    .for_record(&record.record_type)
                    .for_field(spec.name),
                );
            }
        }
    }

    diagnostics
}
