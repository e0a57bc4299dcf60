//! CWR data model types and structures.
//!
//! This crate provides the core data model for CWR (Common Works
//! Registration) processing: the decoded record tree, field values,
//! classified diagnostics, and host error types.
//!
//! # Modules
//!
//! - [`diagnostic`] - Severity ladder, diagnostic codes, and diagnostics
//! - [`error`] - Host error types (I/O, configuration)
//! - [`record`] - Record / Transaction / Group / File tree and versions
//! - [`value`] - Decoded field values

pub mod diagnostic;
pub mod error;
pub mod record;
pub mod value;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use error::{CwrError, Result};
pub use record::{CwrFile, CwrVersion, Group, Record, Transaction};
pub use value::{FieldValue, Flag};
