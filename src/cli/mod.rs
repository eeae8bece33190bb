//! Command-line parsing for the prize bond checker.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fetching/matching code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{BondType, DocumentFormat};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pbc", version, about = "Check prize bond numbers against published draw results")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a bond list against the published results of one or all bond types.
    ///
    /// Missing `--type`/`--bonds` are asked for interactively.
    Check(CheckArgs),
    /// List the result files published for a bond type.
    Files(FilesArgs),
    /// List bond types and their listing pages.
    Types,
    /// Print the bond numbers found in a local result file.
    Extract(ExtractArgs),
    /// Render a report saved with `pbc check --json`.
    Show(ShowArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CheckArgs {
    /// Bond type to check.
    #[arg(short = 't', long = "type", value_enum, conflicts_with = "all")]
    pub bond_type: Option<BondType>,

    /// Check every bond type.
    #[arg(long)]
    pub all: bool,

    /// Bond list: one 6-digit number per line.
    #[arg(short, long, value_name = "TXT")]
    pub bonds: Option<PathBuf>,

    /// Write the winning bonds download here.
    #[arg(short, long, value_name = "TXT")]
    pub out: Option<PathBuf>,

    /// Write the full report as JSON.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FilesArgs {
    /// Bond type whose listing page to read.
    #[arg(short = 't', long = "type", value_enum)]
    pub bond_type: BondType,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Local result file.
    pub file: PathBuf,

    /// Content format (default: from the file extension).
    #[arg(long, value_enum)]
    pub format: Option<DocumentFormat>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Report JSON produced by `pbc check --json`.
    #[arg(value_name = "JSON")]
    pub report: PathBuf,
}
