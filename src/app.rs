//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - asks for a bond type / bond list when they were not given
//! - runs the check pipeline
//! - prints reports
//! - writes optional exports

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{CheckArgs, Command, ExtractArgs, FilesArgs, ShowArgs};
use crate::config::SiteConfig;
use crate::data::locator::ResultFileLocator;
use crate::domain::{BondType, CheckConfig, DocumentFormat};
use crate::error::{AppError, EXIT_INPUT, EXIT_NETWORK};
use crate::extract::{extract_bond_numbers, read_document};

pub mod pipeline;

const SUBCOMMANDS: [&str; 5] = ["check", "files", "types", "extract", "show"];

/// Entry point for the `pbc` binary.
pub fn run() -> Result<(), AppError> {
    // We want `pbc` and `pbc -t rs750 ...` to behave like `pbc check ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    match cli.command {
        Command::Check(args) => handle_check(args),
        Command::Files(args) => handle_files(args),
        Command::Types => handle_types(),
        Command::Extract(args) => handle_extract(args),
        Command::Show(args) => handle_show(args),
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Only fails if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_check(args: CheckArgs) -> Result<(), AppError> {
    let config = check_config_from_args(&args)?;
    let run = pipeline::run_check(&config)?;

    let source = config.bond_list.display().to_string();
    if run.no_valid_bonds() {
        println!("{}", crate::report::format_no_valid_bonds(&source));
        return Ok(());
    }

    // Print terminal output.
    print!("{}", crate::report::format_bond_list_summary(&run.bond_list));
    for report in &run.reports {
        print!("{}", crate::report::format_report(report));
    }

    // Optional exports. The winners download only exists when there are winners.
    let winners = crate::report::combined_winners(&run.reports);
    let mut written = None;
    if let Some(path) = &config.export_winners {
        if winners.is_empty() {
            println!("\nNo winners, so {} was not written.", path.display());
        } else {
            crate::io::export::write_winners(path, &winners)?;
            written = Some(path.display().to_string());
        }
    }
    if let Some(path) = &config.export_report {
        crate::io::report::write_report_json(path, &run.reports, run.bond_list.bonds.len())?;
    }

    print!("{}", crate::report::format_footer(written.as_deref()));

    if !run.listing_errors.is_empty() {
        for err in &run.listing_errors {
            eprintln!("{err}");
        }
        return Err(AppError::new(
            EXIT_NETWORK,
            format!("{} bond type(s) could not be checked.", run.listing_errors.len()),
        ));
    }

    Ok(())
}

fn handle_files(args: FilesArgs) -> Result<(), AppError> {
    let site = SiteConfig::official();
    let client = pipeline::http_client()?;
    let mut locator = ResultFileLocator::new(&client, &site);
    let files = locator.locate(args.bond_type)?;

    print!("{}", crate::report::format_result_files(args.bond_type, &files));
    Ok(())
}

fn handle_types() -> Result<(), AppError> {
    let site = SiteConfig::official();
    for bond_type in BondType::ALL {
        println!(
            "{:<10} {:<9} {}",
            bond_type.display_name(),
            bond_type.cli_name(),
            site.listing_url(bond_type).unwrap_or("-")
        );
    }
    Ok(())
}

fn handle_extract(args: ExtractArgs) -> Result<(), AppError> {
    let format = match args.format {
        Some(format) => format,
        None => format_for_path(&args.file)?,
    };
    let bytes = std::fs::read(&args.file)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read '{}': {e}", args.file.display())))?;
    let text = read_document(&bytes, format)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read '{}': {e}", args.file.display())))?;

    let numbers = extract_bond_numbers(&text);
    println!("{} bond number(s) in {}:", numbers.len(), args.file.display());
    for number in &numbers {
        println!("{number}");
    }
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let saved = crate::io::report::read_report_json(&args.report)?;

    println!(
        "=== {} report ({}) | {} bond number(s) checked ===",
        saved.tool,
        saved.generated_at.format("%Y-%m-%d %H:%M UTC"),
        saved.bonds_checked
    );
    for report in &saved.reports {
        print!("{}", crate::report::format_report(report));
    }
    Ok(())
}

/// Resolve a check's configuration, prompting for anything missing.
pub fn check_config_from_args(args: &CheckArgs) -> Result<CheckConfig, AppError> {
    let bond_types = if args.all {
        BondType::ALL.to_vec()
    } else {
        match args.bond_type {
            Some(bond_type) => vec![bond_type],
            None => vec![crate::cli::picker::prompt_for_bond_type()?],
        }
    };

    let bond_list = match &args.bonds {
        Some(path) => path.clone(),
        None => crate::cli::picker::prompt_for_bond_list()?,
    };

    Ok(CheckConfig {
        bond_list,
        bond_types,
        export_winners: args.out.clone(),
        export_report: args.json.clone(),
    })
}

fn format_for_path(path: &Path) -> Result<DocumentFormat, AppError> {
    DocumentFormat::from_url(&path.to_string_lossy()).ok_or_else(|| {
        AppError::new(
            EXIT_INPUT,
            format!(
                "No reader for '{}'. Only .txt and .docx are supported (use --format to override).",
                path.display()
            ),
        )
    })
}

/// Rewrite argv so `pbc` defaults to `pbc check`.
///
/// Rules:
/// - `pbc`                       -> `pbc check`
/// - `pbc -t rs750 ...`          -> `pbc check -t rs750 ...`
/// - `pbc -v ...`                -> verbosity flags are skipped before deciding
/// - `pbc --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let first = argv
        .iter()
        .skip(1)
        .position(|arg| !is_verbose_flag(arg))
        .map(|pos| pos + 1);

    let Some(idx) = first else {
        argv.push("check".to_string());
        return argv;
    };

    let arg = argv[idx].as_str();
    let is_top_level_help_or_version = matches!(arg, "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version || SUBCOMMANDS.contains(&arg) {
        return argv;
    }

    // If the first token is a flag, treat it as "check flags".
    if arg.starts_with('-') {
        argv.insert(idx, "check".to_string());
    }

    // Otherwise, leave as-is.
    argv
}

fn is_verbose_flag(arg: &str) -> bool {
    arg == "--verbose" || (arg.len() > 1 && arg.starts_with('-') && arg[1..].chars().all(|c| c == 'v'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_becomes_check() {
        assert_eq!(rewrite_args(argv(&["pbc"])), argv(&["pbc", "check"]));
        assert_eq!(rewrite_args(argv(&["pbc", "-vv"])), argv(&["pbc", "-vv", "check"]));
    }

    #[test]
    fn leading_flags_are_check_flags() {
        assert_eq!(
            rewrite_args(argv(&["pbc", "-t", "rs750"])),
            argv(&["pbc", "check", "-t", "rs750"])
        );
        assert_eq!(
            rewrite_args(argv(&["pbc", "-v", "--all", "-b", "b.txt"])),
            argv(&["pbc", "-v", "check", "--all", "-b", "b.txt"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_are_untouched() {
        for args in [
            argv(&["pbc", "files", "-t", "rs100"]),
            argv(&["pbc", "-v", "types"]),
            argv(&["pbc", "--help"]),
            argv(&["pbc", "-V"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn extract_format_comes_from_extension() {
        assert_eq!(format_for_path(Path::new("draw.txt")).unwrap(), DocumentFormat::Text);
        assert_eq!(format_for_path(Path::new("draw.docx")).unwrap(), DocumentFormat::Docx);
        assert_eq!(format_for_path(Path::new("draw.doc")).unwrap_err().exit_code(), EXIT_INPUT);
    }
}
