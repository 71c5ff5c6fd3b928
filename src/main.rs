mod cli;
mod format;
mod reporter;
mod scanner;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::Args;
use format::format_size;
use reporter::{ReportStyle, render, report_file_name};
use scanner::{AuditNode, scan};

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    println!(
        "{} Auditing {} (threshold: {})",
        "=>".blue().bold(),
        args.path.bold(),
        format_size(args.threshold)
    );

    let tree = match scan(Path::new(&args.path), args.threshold) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };
    // Move past the last "\rScanning ..." progress line.
    println!();

    let report_path = args.output.unwrap_or_else(|| report_file_name(&args.path));
    if let Err(e) = write_report(&tree, &report_path) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }

    println!(
        "\n{} Report written to {}",
        "=>".green().bold(),
        report_path.bold()
    );
}

/// Render the tree twice: colored to the console, plain to the audit file.
fn write_report(tree: &AuditNode, report_path: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    render(tree, &mut stdout, &ReportStyle::color())?;
    drop(stdout);

    let mut out = BufWriter::new(File::create(report_path)?);
    render(tree, &mut out, &ReportStyle::plain())?;
    out.flush()
}
