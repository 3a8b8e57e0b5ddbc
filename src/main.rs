//! # depin CLI Entry Point
//!
//! Parses the optional manifest path and runs the vendoring pipeline from the
//! current directory. Any failure prints one diagnostic line and exits non-zero.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use depin::config::{DEFAULT_MANIFEST, VENDOR_SRC_DIR, VendorLayout};

#[derive(Parser)]
#[command(name = "depin")]
#[command(about = "Pin git and hg source dependencies into _vendor/src", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// Dependency manifest (JSON array of {vcs, repo, rev, path})
    #[arg(default_value = DEFAULT_MANIFEST)]
    manifest: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match vendor(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "x".red(), err);
            ExitCode::FAILURE
        }
    }
}

fn vendor(cli: &Cli) -> Result<()> {
    let layout = VendorLayout::from_current_dir().context("Could not read current directory")?;
    let summary = depin::run(&cli.manifest, &layout)?;

    if summary.empty > 0 {
        println!(
            "{} {} of {} dependencies had no supported vcs and were left empty",
            "!".yellow(),
            summary.empty,
            summary.total()
        );
    }
    println!("{} Dependencies written into {}", "✓".green(), VENDOR_SRC_DIR);
    Ok(())
}
