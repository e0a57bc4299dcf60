//! Rule check implementations, one module per rule family.
//!
//! Every check is a free function taking the parsed file (plus whatever
//! registry or options it needs) and returning the diagnostics it found.

pub mod counts;
pub mod linkage;
pub mod lookup;
pub mod mandatory;
pub mod sequence;
pub mod shape;
pub mod shares;

use cwr_model::{CwrFile, Record};

/// All records of the file in input order, bounds included.
pub(crate) fn records_in_order(file: &CwrFile) -> Vec<&Record> {
    let mut records = Vec::new();
    if let Some(header) = &file.header {
        records.push(header);
    }
    for group in &file.groups {
        records.push(&group.header);
        for txn in &group.transactions {
            records.extend(txn.all_records());
        }
        if let Some(trailer) = &group.trailer {
            records.push(trailer);
        }
    }
    if let Some(trailer) = &file.trailer {
        records.push(trailer);
    }
    records
}
