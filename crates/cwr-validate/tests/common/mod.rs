//! Fixed-width line builders shared by the validation test suites.
//!
//! Builders produce full-width lines for the 2.2 layouts; callers slice
//! or corrupt them to set up defect scenarios.
#![allow(dead_code)]

use cwr_model::CwrFile;
use cwr_parse::{ParseOptions, parse_str};
use cwr_standards::{LookupManager, SchemaRegistry};
use cwr_validate::{ValidateOptions, Validator};

pub fn parse_and_validate(input: &str) -> CwrFile {
    let registry = SchemaRegistry::new();
    let mut file = parse_str(input, &registry, ParseOptions::default());
    Validator::new(&registry).validate(&mut file);
    file
}

pub fn parse_and_validate_with(
    input: &str,
    lookups: Option<&LookupManager>,
    options: ValidateOptions,
) -> CwrFile {
    let registry = SchemaRegistry::new();
    let mut file = parse_str(input, &registry, ParseOptions::default());
    let mut validator = Validator::new(&registry).with_options(options);
    if let Some(lookups) = lookups {
        validator = validator.with_lookups(lookups);
    }
    validator.validate(&mut file);
    file
}

pub fn hdr_line(version: &str) -> String {
    let mut l = String::from("HDR");
    l.push_str(version);
    l.push_str("PB");
    l.push_str("000000123");
    l.push_str(&format!("{:<45}", "EXAMPLE MUSIC PUBLISHING"));
    l.push_str("20240115");
    l.push_str("120000");
    l.push_str("20240116");
    if version == "02.20" {
        l.push_str(&" ".repeat(15));
    }
    l
}

pub fn grh_line(txn_type: &str, group_id: u64, version: &str) -> String {
    format!("GRH{txn_type}{group_id:05}{version}{:10}", "")
}

pub fn grt_line(group_id: u64, txn_count: u64, record_count: u64) -> String {
    format!("GRT{group_id:05}{txn_count:08}{record_count:08}")
}

pub fn trl_line(group_count: u64, txn_count: u64, record_count: u64) -> String {
    format!("TRL{group_count:05}{txn_count:08}{record_count:08}")
}

fn prefix(record_type: &str, txn_seq: u64, record_seq: u64) -> String {
    format!("{record_type}{txn_seq:08}{record_seq:08}")
}

pub fn work_line(record_type: &str, txn_seq: u64, record_seq: u64, title: &str) -> String {
    let mut l = prefix(record_type, txn_seq, record_seq);
    l.push_str(&format!("{:<14}", "SW000001"));
    l.push_str(&format!("{title:<60}"));
    l.push_str("  "); // language
    l.push_str(&" ".repeat(11)); // iswc
    l.push_str(&" ".repeat(8)); // copyright date
    l.push_str(&" ".repeat(6)); // duration
    l.push(' '); // recorded indicator
    l.push_str("POP"); // distribution category
    l.push_str("ORI"); // version type
    l.push_str(&" ".repeat(12)); // excerpt/composite/lyric/arrangement
    l.push_str(&" ".repeat(14)); // catalogue number
    l.push_str(&" ".repeat(20)); // opus number
    l.push_str("  "); // work type
    l.push(' '); // grand rights
    l.push_str(&" ".repeat(3)); // component count
    l.push_str(&" ".repeat(8)); // publication date
    l.push_str("  "); // exceptional clause, priority
    l.push_str(&" ".repeat(3)); // text-music relationship
    l
}

pub fn swr_line(
    record_type: &str,
    txn_seq: u64,
    record_seq: u64,
    ipn: &str,
    last_name: &str,
    role: &str,
    pr: u64,
    mr: u64,
    sr: u64,
) -> String {
    let mut l = prefix(record_type, txn_seq, record_seq);
    l.push_str(&format!("{ipn:<9}"));
    l.push_str(&format!("{last_name:<45}"));
    l.push_str(&format!("{:<30}", "")); // first name
    l.push(' '); // unknown indicator
    l.push_str(&format!("{role:<2}"));
    l.push_str(&" ".repeat(11)); // ipi name number
    l.push_str("   "); // pr society
    l.push_str(&format!("{pr:06}"));
    l.push_str("   "); // mr society
    l.push_str(&format!("{mr:06}"));
    l.push_str("   "); // sr society
    l.push_str(&format!("{sr:06}"));
    l
}

pub fn spu_line(
    record_type: &str,
    txn_seq: u64,
    record_seq: u64,
    publisher_seq: u64,
    ipn: &str,
    name: &str,
    publisher_type: &str,
    pr: u64,
    mr: u64,
    sr: u64,
) -> String {
    let mut l = prefix(record_type, txn_seq, record_seq);
    l.push_str(&format!("{publisher_seq:02}"));
    l.push_str(&format!("{ipn:<9}"));
    l.push_str(&format!("{name:<45}"));
    l.push(' '); // unknown indicator
    l.push_str(&format!("{publisher_type:<2}"));
    l.push_str(&" ".repeat(14)); // agreement number
    l.push_str(&" ".repeat(11)); // ipi name number
    l.push_str("   ");
    l.push_str(&format!("{pr:06}"));
    l.push_str("   ");
    l.push_str(&format!("{mr:06}"));
    l.push_str("   ");
    l.push_str(&format!("{sr:06}"));
    l
}

pub fn territory_line(
    record_type: &str,
    txn_seq: u64,
    record_seq: u64,
    ipn: &str,
    pr: u64,
    mr: u64,
    sr: u64,
    inclusion: &str,
    territory: &str,
) -> String {
    let mut l = prefix(record_type, txn_seq, record_seq);
    l.push_str(&format!("{ipn:<9}"));
    l.push_str(&format!("{pr:06}"));
    l.push_str(&format!("{mr:06}"));
    l.push_str(&format!("{sr:06}"));
    l.push_str(inclusion);
    l.push_str(&format!("{territory:<4}"));
    l.push(' '); // shares change
    l.push_str("   "); // sequence number
    l
}

pub fn pwr_line(
    txn_seq: u64,
    record_seq: u64,
    publisher_ipn: &str,
    writer_ipn: &str,
) -> String {
    let mut l = prefix("PWR", txn_seq, record_seq);
    l.push_str(&format!("{publisher_ipn:<9}"));
    l.push_str(&format!("{:<45}", "EXAMPLE MUSIC PUBLISHING"));
    l.push_str(&" ".repeat(14)); // submitter agreement
    l.push_str(&" ".repeat(14)); // society agreement
    l.push_str(&format!("{writer_ipn:<9}"));
    l
}

pub fn alt_line(txn_seq: u64, record_seq: u64, title: &str, title_type: &str) -> String {
    let mut l = prefix("ALT", txn_seq, record_seq);
    l.push_str(&format!("{title:<60}"));
    l.push_str(&format!("{title_type:<2}"));
    l.push_str("  "); // language
    l
}
