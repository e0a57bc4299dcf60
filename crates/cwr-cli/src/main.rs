use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use cwr_cli::cli::{Cli, Command, ParseArgs, TablesArgs};
use cwr_cli::{logging, pipeline};
use cwr_standards::LookupManager;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.verbosity);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Tables(args) => run_tables(args),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run_parse(args: ParseArgs) -> anyhow::Result<bool> {
    let options = pipeline::RunOptions {
        version: args.version.map(Into::into),
        validate: !args.no_validate,
        tables_dir: args.tables_dir,
    };
    let file = pipeline::run(&args.input, &options)?;

    let report = pipeline::Report::new(&file);
    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("wrote {}", path.display());
            println!("{}", pipeline::summarize(&file));
        }
        None => println!("{json}"),
    }

    // Exit 1 on an invalid result unless validation was skipped.
    Ok(args.no_validate || file.is_valid())
}

fn run_tables(args: TablesArgs) -> anyhow::Result<bool> {
    let manager = LookupManager::new();
    let names = manager.extract_all_lookup_tables(&args.dump)?;
    for name in &names {
        let table = manager.get_table(name)?;
        println!("{name}: {} code(s)", table.len());
    }
    println!("{} table(s) extracted", names.len());
    Ok(true)
}
