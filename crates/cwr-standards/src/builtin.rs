//! Compiled-in fallback tables and the catalog of known table names.
//!
//! Only the small enumerations that are fixed by the format itself are
//! compiled in; the larger tables (Language, Territory, Writer Role, ...)
//! ship as CSV and load through the [`crate::LookupManager`].

use crate::lookup::LookupTable;

/// Table names the validator may request for the supported record types.
pub const KNOWN_TABLES: &[&str] = &[
    "Agreement Type",
    "BLTVR",
    "Character Set",
    "Composite Type",
    "Excerpt Type",
    "Instrument",
    "Intended Purpose",
    "Language",
    "Lyric Adaptation",
    "Music Arrangement",
    "Musical Work Distribution Category",
    "Publisher Type",
    "Sender Type",
    "Standard Instrumentation Type",
    "Territory",
    "Text Music Relationship",
    "Title Type",
    "Transaction Type",
    "Version Type",
    "Work Type",
    "Writer Role",
];

pub fn is_known_table(name: &str) -> bool {
    KNOWN_TABLES.contains(&name)
}

/// A compiled-in fallback table, when one exists for the name.
pub fn table(name: &str) -> Option<LookupTable> {
    let pairs: &[(&str, &str)] = match name {
        "Sender Type" => &[
            ("PB", "Publisher"),
            ("SO", "Society"),
            ("WR", "Writer"),
            ("AA", "Administrative Agency"),
        ],
        "Transaction Type" => &[
            ("NWR", "New Work Registration"),
            ("REV", "Revised Registration"),
            ("WRK", "Work Registration"),
            ("ISW", "Notification of ISWC"),
            ("ISR", "ISWC Request"),
            ("ACK", "Acknowledgement"),
            ("EXC", "Existing Work in Conflict"),
        ],
        "Title Type" => &[
            ("OT", "Original Title"),
            ("AT", "Alternative Title"),
            ("TT", "Translated Title"),
            ("FT", "First Line of Text"),
            ("ET", "Extra Search Title"),
        ],
        "BLTVR" => &[
            ("B", "Background"),
            ("L", "Logo"),
            ("T", "Theme"),
            ("V", "Visual"),
            ("R", "Rolled Up Cue"),
        ],
        _ => return None,
    };
    Some(LookupTable::from_pairs(name, pairs))
}
