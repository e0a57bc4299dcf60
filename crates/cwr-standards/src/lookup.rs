//! Enumerated code tables (lookup tables) for field validation.
//!
//! Tables are CSV files with at least `CODE` and `DEFINITION` columns;
//! extra columns are preserved as row attributes. A single bulk dump with
//! a `Category` column can be split into per-category tables via
//! [`LookupManager::extract_all_lookup_tables`].
//!
//! Tables load lazily on first request and are cached for the manager's
//! lifetime. A handful of small enumerations are compiled in as fallbacks
//! (see [`crate::builtin`]) so a manager without a table directory still
//! resolves them.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Serialize;
use tracing::warn;

use cwr_model::CwrError;

use crate::builtin;

/// Column holding the code value in table CSVs.
pub const CODE_COLUMN: &str = "CODE";
/// Column holding the textual definition in table CSVs.
pub const DEFINITION_COLUMN: &str = "DEFINITION";
/// Column selecting the target table in a bulk multi-table dump.
pub const CATEGORY_COLUMN: &str = "Category";

/// One row of a lookup table.
#[derive(Debug, Clone, Serialize)]
pub struct LookupRow {
    pub code: String,
    pub definition: String,
    /// The full row, including `CODE` and `DEFINITION`.
    pub attributes: BTreeMap<String, String>,
}

/// A named, immutable code table.
#[derive(Debug, Clone, Serialize)]
pub struct LookupTable {
    pub name: String,
    rows: BTreeMap<String, LookupRow>,
}

impl LookupTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Build a table from `(code, definition)` pairs.
    pub fn from_pairs(name: &str, pairs: &[(&str, &str)]) -> Self {
        let mut table = LookupTable::new(name);
        for (code, definition) in pairs {
            let mut attributes = BTreeMap::new();
            attributes.insert(CODE_COLUMN.to_string(), (*code).to_string());
            attributes.insert(DEFINITION_COLUMN.to_string(), (*definition).to_string());
            table.insert(LookupRow {
                code: (*code).to_string(),
                definition: (*definition).to_string(),
                attributes,
            });
        }
        table
    }

    pub fn insert(&mut self, row: LookupRow) {
        self.rows.insert(row.code.clone(), row);
    }

    pub fn get(&self, code: &str) -> Option<&LookupRow> {
        self.rows.get(code)
    }

    /// Membership test against the `CODE` column.
    pub fn contains(&self, code: &str) -> bool {
        self.rows.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &LookupRow> {
        self.rows.values()
    }

    /// Find the row whose `key_field` equals `key_value` and return its
    /// `value_field`. `CODE`-keyed queries take the indexed path.
    pub fn lookup(&self, key_field: &str, key_value: &str, value_field: &str) -> Option<&str> {
        let row = if key_field == CODE_COLUMN {
            self.rows.get(key_value)
        } else {
            self.rows
                .values()
                .find(|row| row.attributes.get(key_field).map(String::as_str) == Some(key_value))
        }?;
        row.attributes.get(value_field).map(String::as_str)
    }
}

/// Loader and cache for lookup tables.
///
/// Immutable from the caller's perspective: queries take `&self`, and the
/// interior cache only ever grows. Safe to share by reference.
#[derive(Debug, Default)]
pub struct LookupManager {
    tables_dir: Option<PathBuf>,
    tables: RwLock<BTreeMap<String, Arc<LookupTable>>>,
}

impl LookupManager {
    /// A manager with no table directory; only compiled-in fallback tables
    /// and tables registered through bulk extraction resolve.
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager loading `<name>.csv` files from the given directory.
    pub fn with_tables_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            tables_dir: Some(dir.into()),
            tables: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a table directly, replacing any cached copy.
    pub fn insert_table(&self, table: LookupTable) {
        let mut cache = self.tables.write().expect("lookup cache poisoned");
        cache.insert(table.name.clone(), Arc::new(table));
    }

    /// Fetch a table, loading and caching it on first request.
    pub fn get_table(&self, name: &str) -> cwr_model::Result<Arc<LookupTable>> {
        if let Some(table) = self
            .tables
            .read()
            .expect("lookup cache poisoned")
            .get(name)
        {
            return Ok(Arc::clone(table));
        }

        let table = self
            .load_from_dir(name)
            .or_else(|| builtin::table(name))
            .ok_or_else(|| CwrError::TableNotFound(name.to_string()))?;

        let table = Arc::new(table);
        let mut cache = self.tables.write().expect("lookup cache poisoned");
        let entry = cache.entry(name.to_string()).or_insert_with(|| Arc::clone(&table));
        Ok(Arc::clone(entry))
    }

    /// Look up `value_field` in the row of `table` where `key_field` equals
    /// `key_value`. `None` when the table or the row is absent.
    pub fn lookup(
        &self,
        table: &str,
        key_field: &str,
        key_value: &str,
        value_field: &str,
    ) -> Option<String> {
        let table = self.get_table(table).ok()?;
        table
            .lookup(key_field, key_value, value_field)
            .map(String::from)
    }

    /// Membership test; false when the table itself is absent.
    pub fn is_valid(&self, table: &str, key_field: &str, key_value: &str) -> bool {
        let Ok(table) = self.get_table(table) else {
            return false;
        };
        if key_field == CODE_COLUMN {
            table.contains(key_value)
        } else {
            table
                .lookup(key_field, key_value, CODE_COLUMN)
                .is_some()
        }
    }

    /// Split a multi-table CSV dump into per-category tables.
    ///
    /// Rows are grouped by the `Category` column; a blank category
    /// continues the previous one. Each resulting table is registered in
    /// the cache. Categories outside the catalog of known tables are kept
    /// but logged, since extended tables do ship in the wild. Returns the
    /// table names, sorted.
    pub fn extract_all_lookup_tables(&self, path: &Path) -> Result<Vec<String>> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read lookup dump: {}", path.display()))?;
        self.extract_from_str(&raw)
    }

    /// As [`Self::extract_all_lookup_tables`], from an open reader.
    pub fn extract_from_reader(&self, mut reader: impl Read) -> Result<Vec<String>> {
        let mut raw = String::new();
        reader
            .read_to_string(&mut raw)
            .context("read lookup dump")?;
        self.extract_from_str(&raw)
    }

    fn extract_from_str(&self, raw: &str) -> Result<Vec<String>> {
        let rows = read_csv_rows(raw)?;

        let mut tables: BTreeMap<String, LookupTable> = BTreeMap::new();
        let mut current: Option<String> = None;

        for row in rows {
            let category = row
                .get(CATEGORY_COLUMN)
                .map(String::as_str)
                .unwrap_or("")
                .trim();
            if !category.is_empty() {
                current = Some(category.to_string());
            }
            let Some(name) = current.as_deref() else {
                continue;
            };

            let code = row.get(CODE_COLUMN).cloned().unwrap_or_default();
            if code.is_empty() {
                continue;
            }
            let definition = row.get(DEFINITION_COLUMN).cloned().unwrap_or_default();

            tables
                .entry(name.to_string())
                .or_insert_with(|| LookupTable::new(name))
                .insert(LookupRow {
                    code,
                    definition,
                    attributes: row,
                });
        }

        let names: Vec<String> = tables.keys().cloned().collect();
        for table in tables.into_values() {
            if !builtin::is_known_table(&table.name) {
                warn!(table = %table.name, rows = table.len(), "extracted non-catalog lookup table");
            }
            self.insert_table(table);
        }
        Ok(names)
    }

    fn load_from_dir(&self, name: &str) -> Option<LookupTable> {
        let dir = self.tables_dir.as_ref()?;
        let path = dir.join(format!("{name}.csv"));
        let raw = std::fs::read_to_string(&path).ok()?;
        let rows = match read_csv_rows(&raw) {
            Ok(rows) => rows,
            Err(error) => {
                warn!(table = name, path = %path.display(), %error, "unreadable lookup table");
                return None;
            }
        };

        let mut table = LookupTable::new(name);
        for row in rows {
            let code = row.get(CODE_COLUMN).cloned().unwrap_or_default();
            if code.is_empty() {
                continue;
            }
            let definition = row.get(DEFINITION_COLUMN).cloned().unwrap_or_default();
            table.insert(LookupRow {
                code,
                definition,
                attributes: row,
            });
        }
        Some(table)
    }
}

/// Read CSV content into row maps keyed by header.
///
/// The delimiter is sniffed from the header line (`;` wins when present,
/// matching the dumps publishers ship); BOM and cell whitespace are
/// trimmed.
fn read_csv_rows(raw: &str) -> Result<Vec<BTreeMap<String, String>>> {
    let delimiter = sniff_delimiter(raw);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("read headers")?
        .iter()
        .map(|h| h.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("read record")?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let Some(key) = headers.get(idx) else {
                continue;
            };
            row.insert(key.clone(), value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

fn sniff_delimiter(raw: &str) -> u8 {
    let header = raw.lines().next().unwrap_or("");
    if header.contains(';') { b';' } else { b',' }
}
