pub mod args;
pub mod commands;

use anyhow::{Result, bail};
use std::io::{self, Write};

pub fn run(args: &[String]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(args, &mut out)
}

/// Dispatch a command, writing its results to `out`.
pub fn run_with_output(args: &[String], out: &mut dyn Write) -> Result<()> {
    if args.is_empty() {
        print_usage(out)?;
        bail!("No command provided");
    }

    match args[0].as_str() {
        "vocab" => commands::vocab::execute(&args[1..], out),
        "index" => commands::index::execute(&args[1..], out),
        "compound" => commands::compound::execute(&args[1..], out),
        "help" | "-h" | "--help" => print_usage(out),
        "-v" | "--version" => {
            writeln!(out, "musicbert {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            eprintln!("Error: Unknown command '{}'", other);
            print_usage(out)?;
            bail!("Unknown command: {}", other)
        }
    }
}

fn print_usage(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "MusicBERT tooling - vocabularies and compound input shapes")?;
    writeln!(out)?;
    writeln!(out, "USAGE:")?;
    writeln!(out, "    musicbert <COMMAND> [OPTIONS]")?;
    writeln!(out)?;
    writeln!(out, "COMMANDS:")?;
    writeln!(out, "    vocab       Load or infer a vocabulary and print it")?;
    writeln!(out, "    index       Print token/index mappings for a vocabulary")?;
    writeln!(
        out,
        "    compound    Convert a raw compound sequence length to its logical length"
    )?;
    writeln!(out, "    help        Print this help message")?;
    writeln!(out)?;
    writeln!(out, "VOCAB / INDEX OPTIONS:")?;
    writeln!(out, "    --csv-dir <DIR>              Folder of CSV files to infer from")?;
    writeln!(
        out,
        "    --feature <COLUMN>           CSV column holding space-separated tokens"
    )?;
    writeln!(out, "    --path <FILE>                Vocabulary file to load, or to save to")?;
    writeln!(
        out,
        "    --sort <MODE>                lexical (default), frequency or none [vocab]"
    )?;
    writeln!(
        out,
        "    --specials <A,B,..>          Special tokens placed first [vocab]"
    )?;
    writeln!(
        out,
        "    --frequency-scope <SCOPE>    last-file (default) or corpus [vocab]"
    )?;
    writeln!(
        out,
        "    --config <FILE>              JSON file with sort/specials/frequency_scope [vocab]"
    )?;
    writeln!(
        out,
        "    --json                       Print the vocabulary as a JSON array [vocab]"
    )?;
    writeln!(out)?;
    writeln!(out, "COMPOUND OPTIONS:")?;
    writeln!(out, "    --length <N>                 Raw input length")?;
    writeln!(out, "    --batch <N>                  Batch size (default 1)")?;
    writeln!(out, "    --ratio <N>                  Ids per event (default 8)")?;
    writeln!(out, "    --past <N>                   Cached positions (default 0)")?;
    writeln!(out)?;
    writeln!(out, "OPTIONS:")?;
    writeln!(out, "    -h, --help       Print help information")?;
    writeln!(out, "    -v, --version    Print version information")?;
    Ok(())
}
