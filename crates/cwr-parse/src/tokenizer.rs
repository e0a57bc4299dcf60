//! Line tokenizer.
//!
//! Splits raw input into records, trimming exactly one trailing line
//! terminator (LF, CRLF, or CR) per line. Everything else is preserved:
//! trailing spaces are significant fixed-width padding, and a line
//! shorter than its schema is a defect the decoder reports. Content is
//! never interpreted here.

use cwr_model::{Diagnostic, DiagnosticCode, Severity};

/// One input line, tagged with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Split input into records.
///
/// Purely empty lines are skipped and reported as warnings; they still
/// consume a line number so downstream locations match the source file.
pub fn tokenize(input: &str) -> (Vec<RawLine<'_>>, Vec<Diagnostic>) {
    let mut lines = Vec::new();
    let mut diagnostics = Vec::new();
    let mut number = 0;

    let bytes = input.as_bytes();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                number += 1;
                push_line(&mut lines, &mut diagnostics, number, &input[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                number += 1;
                push_line(&mut lines, &mut diagnostics, number, &input[start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        number += 1;
        push_line(&mut lines, &mut diagnostics, number, &input[start..]);
    }

    (lines, diagnostics)
}

fn push_line<'a>(
    lines: &mut Vec<RawLine<'a>>,
    diagnostics: &mut Vec<Diagnostic>,
    number: usize,
    text: &'a str,
) {
    if text.is_empty() {
        diagnostics.push(
            Diagnostic::new(Severity::Warning, DiagnosticCode::EmptyLine, "empty line")
                .at_line(number),
        );
    } else {
        lines.push(RawLine { number, text });
    }
}
