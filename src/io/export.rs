//! The "winning bonds" download.
//!
//! Format: a `Winning Bonds:` header line, then one number per line in
//! ascending order. Re-reading the file with `ingest::parse_bond_list` gives
//! back exactly the exported set (the header is not a bond number).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::domain::BondNumber;
use crate::error::{AppError, EXIT_INPUT};

pub const WINNERS_HEADER: &str = "Winning Bonds:";
pub const DEFAULT_WINNERS_FILE: &str = "winning_bonds.txt";

/// Render the winners download.
pub fn format_winners(winners: &BTreeSet<BondNumber>) -> String {
    let mut out = String::with_capacity(WINNERS_HEADER.len() + 1 + winners.len() * (BondNumber::LEN + 1));
    out.push_str(WINNERS_HEADER);
    out.push('\n');
    for bond in winners {
        out.push_str(bond.as_str());
        out.push('\n');
    }
    out
}

/// Write the winners download to `path`.
pub fn write_winners(path: &Path, winners: &BTreeSet<BondNumber>) -> Result<(), AppError> {
    fs::write(path, format_winners(winners))
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write winners file '{}': {e}", path.display())))
}
