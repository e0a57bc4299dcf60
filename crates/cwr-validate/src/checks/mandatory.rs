//! L1: mandatory fields must be non-empty after decode.

use cwr_model::{CwrFile, Diagnostic, DiagnosticCode, FieldValue, Severity};
use cwr_standards::SchemaRegistry;

use super::records_in_order;

pub fn check(file: &CwrFile, registry: &SchemaRegistry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for record in records_in_order(file) {
        let Some(schema) = registry.schema(file.version, &record.record_type) else {
            // Unknown types already carry their own diagnostic.
            continue;
        };
        for spec in schema.mandatory_fields() {
            let missing = match record.fields.get(spec.name) {
                None | Some(FieldValue::Empty) => true,
                // Invalid content is present but malformed; the decoder
                // reported it at field level.
                _ => false,
            };
            if missing {
                diagnostics.push(
                    Diagnostic::new(
                        Severity::Record,
                        DiagnosticCode::MissingMandatoryField,
                        format!("mandatory field {} is blank", spec.name),
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
