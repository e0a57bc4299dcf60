//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use cwr_model::CwrVersion;

#[derive(Parser)]
#[command(
    name = "cwr-import",
    version,
    about = "Parse and validate CWR (Common Works Registration) files",
    long_about = "Parse CWR 2.1/2.2 registration files into a structured result\n\
                  and validate field formats, code-table membership, share totals,\n\
                  and structural counts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse a CWR file and report diagnostics.
    Parse(ParseArgs),

    /// Split a bulk lookup-table dump into per-table code sets.
    Tables(TablesArgs),
}

#[derive(Parser)]
pub struct ParseArgs {
    /// Path to the CWR file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// CWR revision; read from the HDR record when omitted.
    #[arg(long, value_enum)]
    pub version: Option<VersionArg>,

    /// Skip validation; structural parsing and decoding still run.
    #[arg(long = "no-validate")]
    pub no_validate: bool,

    /// Write the full JSON result to this path instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Directory of lookup-table CSV files for code membership checks.
    #[arg(long = "tables-dir", value_name = "DIR")]
    pub tables_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct TablesArgs {
    /// Multi-table CSV dump with a Category column.
    #[arg(value_name = "FILE")]
    pub dump: PathBuf,
}

/// CWR revision choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum VersionArg {
    #[value(name = "2.1")]
    V21,
    #[value(name = "2.2")]
    V22,
}

impl From<VersionArg> for CwrVersion {
    fn from(value: VersionArg) -> Self {
        match value {
            VersionArg::V21 => CwrVersion::V21,
            VersionArg::V22 => CwrVersion::V22,
        }
    }
}
