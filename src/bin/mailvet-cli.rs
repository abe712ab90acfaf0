#[path = "mailvet-cli/args.rs"]
mod args;
#[path = "mailvet-cli/output.rs"]
mod output;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use mailvet::{Outcome, verify_addresses};

use crate::args::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let addresses = if cli.stdin {
        read_stdin_lines()?
    } else {
        read_file_lines(&cli.input)?
    };

    let options = cli.verify_options();
    let quiet = cli.quiet;
    let report = verify_addresses(&addresses, &options, |entry| {
        if quiet {
            return;
        }
        if entry.outcome == Outcome::Blank {
            println!("[{}] (blank line)", entry.index + 1);
        } else {
            println!("[{}] {} -> {}", entry.index + 1, entry.address, entry.outcome);
        }
    });

    output::write_status_file(&cli.out_status, report.entries())?;
    output::write_csv_file(&cli.out_csv, report.entries())?;
    if let Some(path) = &cli.out_ndjson {
        output::write_ndjson_file(path, report.entries())?;
    }

    let valid = report.valid_addresses().count();
    println!(
        "{} addresses checked, {valid} valid; wrote {} and {}",
        report.len(),
        cli.out_status,
        cli.out_csv
    );
    Ok(())
}

fn read_file_lines(path: &std::path::Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read input file {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

fn read_stdin_lines() -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in io::stdin().lock().lines() {
        lines.push(line.context("read stdin")?);
    }
    Ok(lines)
}
