//! Validation for parsed CWR files.
//!
//! Rules run in four layers after structural assembly:
//!
//! - **L1** mandatory fields per record schema
//! - **L2** lookup-table membership for coded fields
//! - **L3** cross-record integrity: share totals, referential linkage,
//!   sequencing, and transaction shape
//! - **L4** structural counts and group bookkeeping
//!
//! Diagnostics are merged with the parser's own findings and ordered by
//! input line, tie-broken by layer. Validation never fails: every rule is
//! a total function emitting zero or more diagnostics.

pub mod checks;
pub mod rules;
pub mod validator;

pub use rules::{Rule, RuleKind, DEFAULT_RULES};
pub use validator::{ValidateOptions, Validator};
