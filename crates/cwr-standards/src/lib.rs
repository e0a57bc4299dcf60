//! CWR standards: record layout tables and enumerated code tables.
//!
//! This crate owns the two read-only registries shared by the decoder and
//! validator:
//!
//! - [`SchemaRegistry`] - compiled-in field layout tables per
//!   `(version, record_type)`
//! - [`LookupManager`] - CSV-backed enumerated code tables with lazy
//!   loading and a bulk multi-table importer
//!
//! Both are immutable once constructed and freely shareable by reference.

pub mod builtin;
pub mod lookup;
pub mod schema;

mod layouts;

pub use lookup::{LookupManager, LookupRow, LookupTable};
pub use schema::{FieldFormat, FieldSpec, RecordSchema, SchemaRegistry};
