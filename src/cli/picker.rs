//! Interactive prompts for `pbc check`.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `pbc` and choose" UX when a flag is missing
//!
//! Bond lists are searched for as `*.txt` files under the current working directory.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::domain::BondType;
use crate::error::{AppError, EXIT_INPUT};
use crate::io::export::DEFAULT_WINNERS_FILE;

/// Default directory recursion depth for finding bond lists.
const DEFAULT_SEARCH_DEPTH: usize = 4;

/// Prompt the user to pick a bond type from the menu.
pub fn prompt_for_bond_type() -> Result<BondType, AppError> {
    println!("Bond types:");
    for (idx, bond_type) in BondType::ALL.iter().enumerate() {
        println!("{:>3}) {}", idx + 1, bond_type.display_name());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let line = read_answer(
            &mut input,
            &format!("Select a bond type (1-{}, q to quit): ", BondType::ALL.len()),
        )?;
        match parse_bond_type_choice(&line) {
            Some(bond_type) => return Ok(bond_type),
            None => println!("Invalid choice: {line}."),
        }
    }
}

/// Prompt the user to select a bond list from the current directory tree.
///
/// Behavior:
/// - list discovered `*.txt` files
/// - accept either a number (from the list) or an explicit path
/// - `q` cancels
pub fn prompt_for_bond_list() -> Result<PathBuf, AppError> {
    let files = discover_bond_lists();
    if files.is_empty() {
        return Err(AppError::new(
            2,
            "No .txt files found. Provide one with `pbc check -b <bonds.txt>`.",
        ));
    }

    println!("Found {} text file(s):", files.len());
    for (idx, path) in files.iter().enumerate() {
        println!("{:>3}) {}", idx + 1, pretty_path(path));
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        let line = read_answer(
            &mut input,
            &format!("Select your bond list by number (1-{}) or type a path (q to quit): ", files.len()),
        )?;

        if let Ok(choice) = line.parse::<usize>() {
            if (1..=files.len()).contains(&choice) {
                return validate_bond_list_path(&files[choice - 1]);
            }
            println!("Invalid choice: {choice}. Enter a number between 1 and {}.", files.len());
            continue;
        }

        match validate_bond_list_path(Path::new(&line)) {
            Ok(path) => return Ok(path),
            Err(err) => println!("{err}"),
        }
    }
}

/// Read one trimmed answer; EOF and `q` cancel.
fn read_answer(input: &mut impl BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout()
        .flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write prompt: {e}")))?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read input: {e}")))?;
    if bytes == 0 {
        return Err(AppError::new(
            2,
            "No input received. Pass `--type` and `--bonds` to run non-interactively.",
        ));
    }

    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return Err(AppError::new(EXIT_INPUT, "Canceled."));
    }
    Ok(line.to_string())
}

/// Accept a menu number, a CLI name (`rs750`), or a display name (`Rs. 750`).
fn parse_bond_type_choice(input: &str) -> Option<BondType> {
    if let Ok(choice) = input.parse::<usize>() {
        return choice.checked_sub(1).and_then(|i| BondType::ALL.get(i).copied());
    }
    BondType::ALL.into_iter().find(|t| {
        t.cli_name().eq_ignore_ascii_case(input) || t.display_name().eq_ignore_ascii_case(input)
    })
}

/// Validate the provided path points to a `.txt` file.
pub fn validate_bond_list_path(path: &Path) -> Result<PathBuf, AppError> {
    if !path.exists() {
        return Err(AppError::new(
            2,
            format!("Bond list not found: {}", path.display()),
        ));
    }
    if path.is_dir() {
        return Err(AppError::new(
            2,
            format!("Expected a file, got a directory: {}", path.display()),
        ));
    }
    if !has_txt_extension(path) {
        return Err(AppError::new(
            2,
            format!(
                "Expected a .txt bond list (got: {}). Use -b to pass a bond list.",
                path.display()
            ),
        ));
    }

    Ok(path.to_path_buf())
}

/// Discover `*.txt` files under the current directory (deterministic order).
///
/// Our own winners download is left out of the list.
pub fn discover_bond_lists() -> Vec<PathBuf> {
    find_txt_files(Path::new("."), DEFAULT_SEARCH_DEPTH)
}

fn find_txt_files(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    let mut out = Vec::new();
    find_txt_files_inner(root, 0, max_depth, &mut out);
    out.retain(|p| p.file_name().and_then(|n| n.to_str()) != Some(DEFAULT_WINNERS_FILE));
    out.sort_by(|a, b| pretty_path(a).cmp(&pretty_path(b)));
    out
}

fn find_txt_files_inner(root: &Path, depth: usize, max_depth: usize, out: &mut Vec<PathBuf>) {
    if depth > max_depth {
        return;
    }

    let Ok(entries) = fs::read_dir(root) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(ft) => ft,
            Err(_) => continue,
        };

        if file_type.is_dir() {
            if should_skip_dir(&path) {
                continue;
            }
            find_txt_files_inner(&path, depth + 1, max_depth, out);
            continue;
        }

        if file_type.is_file() && has_txt_extension(&path) {
            out.push(path);
        }
    }
}

fn has_txt_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        == Some(true)
}

fn should_skip_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    matches!(name, ".git" | "target" | "node_modules")
}

fn pretty_path(path: &Path) -> String {
    let stripped = path.strip_prefix("./").unwrap_or(path);
    stripped.display().to_string()
}
