//! Schema-driven record decoder.
//!
//! Slices a raw line into typed fields per the active version's layout.
//! Decoding is total: fields that fail their format keep the raw content
//! as [`FieldValue::Invalid`] and the failure becomes a field-level
//! diagnostic; the record is always produced.

use chrono::{NaiveDate, NaiveTime};

use cwr_model::{
    CwrVersion, Diagnostic, DiagnosticCode, FieldValue, Flag, Record, Severity,
};
use cwr_standards::{FieldFormat, FieldSpec, SchemaRegistry};

use crate::tokenizer::RawLine;

/// Decoder over a shared schema registry.
#[derive(Debug, Clone, Copy)]
pub struct RecordDecoder<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> RecordDecoder<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Decode one line under the given revision.
    pub fn decode(&self, version: CwrVersion, line: &RawLine<'_>) -> (Record, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let chars: Vec<char> = line.text.chars().collect();

        if chars.len() < 3 {
            diagnostics.push(
                Diagnostic::new(
                    Severity::Fatal,
                    DiagnosticCode::MalformedRecord,
                    format!("line shorter than a record type prefix: {:?}", line.text),
                )
                .at_line(line.number),
            );
            return (Record::new("", line.number, line.text), diagnostics);
        }

        let record_type: String = chars[..3].iter().collect();
        let mut record = Record::new(record_type.clone(), line.number, line.text);

        let Some(schema) = self.registry.schema(version, &record_type) else {
            diagnostics.push(
                Diagnostic::new(
                    Severity::Record,
                    DiagnosticCode::UnknownRecordType,
                    format!("unknown record type {record_type}"),
                )
                .at_line(line.number)
                .for_record(record_type),
            );
            return (record, diagnostics);
        };

        for spec in schema.fields {
            let (content, truncated) = slice_field(&chars, spec);
            if truncated {
                diagnostics.push(
                    Diagnostic::new(
                        Severity::Field,
                        DiagnosticCode::Truncated,
                        format!(
                            "line ends at byte {} before field {} ({}-{})",
                            chars.len(),
                            spec.name,
                            spec.start,
                            spec.end(),
                        ),
                    )
                    .at_line(line.number)
                    .for_record(&record_type)
                    .for_field(spec.name),
                );
            }

            match decode_field(&content, spec.format) {
                Ok(value) => {
                    record.fields.insert(spec.name.to_string(), value);
                }
                Err(reason) => {
                    diagnostics.push(
                        Diagnostic::new(
                            Severity::Field,
                            DiagnosticCode::FormatError,
                            format!("field {}: {reason}", spec.name),
                        )
                        .at_line(line.number)
                        .for_record(&record_type)
                        .for_field(spec.name),
                    );
                    record
                        .fields
                        .insert(spec.name.to_string(), FieldValue::Invalid(content));
                }
            }
        }

        (record, diagnostics)
    }
}

/// Extract a field's content, padding short lines with spaces.
///
/// Returns the content and whether the line ended before the field's
/// declared range.
fn slice_field(chars: &[char], spec: &FieldSpec) -> (String, bool) {
    let start = spec.start - 1;
    let end = start + spec.len;
    if chars.len() >= end {
        (chars[start..end].iter().collect(), false)
    } else if chars.len() > start {
        let mut content: String = chars[start..].iter().collect();
        content.extend(std::iter::repeat_n(' ', end - chars.len()));
        (content, true)
    } else {
        (" ".repeat(spec.len), true)
    }
}

fn decode_field(content: &str, format: FieldFormat) -> Result<FieldValue, String> {
    match format {
        FieldFormat::Alphanumeric | FieldFormat::Lookup(_) => {
            let text = content.trim_end();
            if text.is_empty() {
                Ok(FieldValue::Empty)
            } else {
                Ok(FieldValue::Text(text.to_string()))
            }
        }
        FieldFormat::Numeric => decode_numeric(content),
        FieldFormat::Date => decode_date(content),
        FieldFormat::Time => decode_time(content),
        FieldFormat::Duration => decode_duration(content),
        FieldFormat::Flag => decode_flag(content),
        FieldFormat::Boolean => decode_boolean(content),
    }
}

fn decode_numeric(content: &str) -> Result<FieldValue, String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(FieldValue::Empty);
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("non-numeric content {trimmed:?}"));
    }
    trimmed
        .parse::<u64>()
        .map(FieldValue::Number)
        .map_err(|_| format!("numeric overflow in {trimmed:?}"))
}

fn decode_date(content: &str) -> Result<FieldValue, String> {
    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '0') {
        return Ok(FieldValue::Empty);
    }
    if trimmed.len() != 8 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("date must be YYYYMMDD, got {trimmed:?}"));
    }
    let year: i32 = trimmed[..4].parse().expect("digits checked");
    let month: u32 = trimmed[4..6].parse().expect("digits checked");
    let day: u32 = trimmed[6..8].parse().expect("digits checked");
    NaiveDate::from_ymd_opt(year, month, day)
        .map(FieldValue::Date)
        .ok_or_else(|| format!("invalid calendar date {trimmed}"))
}

fn decode_time(content: &str) -> Result<FieldValue, String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(FieldValue::Empty);
    }
    if !(trimmed.len() == 6 || trimmed.len() == 8) || !trimmed.chars().all(|c| c.is_ascii_digit())
    {
        return Err(format!("time must be HHMMSS or HHMMSSFF, got {trimmed:?}"));
    }
    let hour: u32 = trimmed[..2].parse().expect("digits checked");
    let minute: u32 = trimmed[2..4].parse().expect("digits checked");
    let second: u32 = trimmed[4..6].parse().expect("digits checked");
    let hundredths: u32 = if trimmed.len() == 8 {
        trimmed[6..8].parse().expect("digits checked")
    } else {
        0
    };
    // from_hms_milli_opt bounds-checks HH<24, MM<60, SS<60; FF<100 holds
    // because two digits cap at 99.
    NaiveTime::from_hms_milli_opt(hour, minute, second, hundredths * 10)
        .map(FieldValue::Time)
        .ok_or_else(|| format!("time out of range {trimmed}"))
}

fn decode_duration(content: &str) -> Result<FieldValue, String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(FieldValue::Empty);
    }
    if trimmed.len() != 6 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("duration must be HHMMSS, got {trimmed:?}"));
    }
    let hours: u32 = trimmed[..2].parse().expect("digits checked");
    let minutes: u32 = trimmed[2..4].parse().expect("digits checked");
    let seconds: u32 = trimmed[4..6].parse().expect("digits checked");
    if minutes >= 60 || seconds >= 60 {
        return Err(format!("duration out of range {trimmed}"));
    }
    Ok(FieldValue::Duration(hours * 3600 + minutes * 60 + seconds))
}

fn decode_flag(content: &str) -> Result<FieldValue, String> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(FieldValue::Empty);
    }
    let mut chars = trimmed.chars();
    match (chars.next().and_then(Flag::parse), chars.next()) {
        (Some(flag), None) => Ok(FieldValue::Flag(flag)),
        _ => Err(format!("flag must be Y, N, or U, got {trimmed:?}")),
    }
}

fn decode_boolean(content: &str) -> Result<FieldValue, String> {
    match content.trim() {
        "" => Ok(FieldValue::Empty),
        "Y" => Ok(FieldValue::Bool(true)),
        "N" => Ok(FieldValue::Bool(false)),
        other => Err(format!("boolean must be Y or N, got {other:?}")),
    }
}
