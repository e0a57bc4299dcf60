//! The parse-and-validate pipeline behind the `parse` subcommand.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use cwr_model::{CwrFile, CwrVersion, Diagnostic, Group, Record, Severity};
use cwr_parse::{ParseOptions, StructuralParser};
use cwr_standards::{LookupManager, SchemaRegistry};
use cwr_validate::Validator;

/// Pipeline configuration derived from the CLI arguments.
#[derive(Debug, Default)]
pub struct RunOptions {
    pub version: Option<CwrVersion>,
    pub validate: bool,
    pub tables_dir: Option<std::path::PathBuf>,
}

/// The JSON result written by `--output`.
#[derive(Serialize)]
pub struct Report<'a> {
    pub is_valid: bool,
    pub version: &'static str,
    pub header: &'a Option<Record>,
    pub groups: &'a [Group],
    pub trailer: &'a Option<Record>,
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> Report<'a> {
    pub fn new(file: &'a CwrFile) -> Self {
        Self {
            is_valid: file.is_valid(),
            version: file.version.as_str(),
            header: &file.header,
            groups: &file.groups,
            trailer: &file.trailer,
            diagnostics: &file.diagnostics,
        }
    }
}

/// Parse (and optionally validate) one file.
///
/// Host failures (unreadable input) are errors; content defects land in
/// the returned file's diagnostics.
pub fn run(input: &Path, options: &RunOptions) -> Result<CwrFile> {
    let text = read_latin1(input)?;

    let registry = SchemaRegistry::new();
    let parse_options = ParseOptions {
        version: options.version,
    };
    let mut file = StructuralParser::new(&registry)
        .with_options(parse_options)
        .parse_str(&text);

    if options.validate {
        let lookups = options
            .tables_dir
            .as_ref()
            .map(LookupManager::with_tables_dir);
        let mut validator = Validator::new(&registry);
        if let Some(lookups) = &lookups {
            validator = validator.with_lookups(lookups);
        }
        validator.validate(&mut file);
    }

    info!(
        groups = file.groups.len(),
        transactions = file.transaction_count(),
        records = file.observed_record_count(),
        diagnostics = file.diagnostics.len(),
        "parse complete"
    );
    Ok(file)
}

/// One-line human summary for stdout.
pub fn summarize(file: &CwrFile) -> String {
    let errors = file
        .diagnostics
        .iter()
        .filter(|d| d.severity >= Severity::Record)
        .count();
    let warnings = file.diagnostics.len() - errors;
    format!(
        "{}: {} group(s), {} transaction(s), {} record(s), {} error(s), {} warning(s)",
        if file.is_valid() { "valid" } else { "invalid" },
        file.groups.len(),
        file.transaction_count(),
        file.observed_record_count(),
        errors,
        warnings
    )
}

/// CWR files are single-byte text (ASCII or latin-1); map bytes straight
/// to chars so field positions stay byte positions.
fn read_latin1(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read input: {}", path.display()))?;
    Ok(bytes.iter().map(|&b| b as char).collect())
}
