//! Bond list ingest and normalization.
//!
//! A bond list is line-delimited: one bond number per line. Each line is
//! trimmed of ASCII whitespace (vertical tab included) and kept only if what remains is exactly six
//! ASCII digits. Anything else is dropped without error; the caller only sees
//! how many lines were read and kept.
//!
//! Parsing works on raw bytes, so a file in a legacy encoding still yields its
//! well-formed lines.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::{BondNumber, UserBondSet};
use crate::error::{AppError, EXIT_INPUT};

/// Ingest output: normalized bond set + line counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondList {
    pub bonds: UserBondSet,
    pub lines_read: usize,
    /// Lines that were not a bond number (blank lines included).
    pub lines_dropped: usize,
}

impl BondList {
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }
}

/// Load a bond list from disk.
pub fn load_bond_list(path: &Path) -> Result<BondList, AppError> {
    let bytes = fs::read(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read bond list '{}': {e}", path.display())))?;
    let list = parse_bond_list(&bytes);
    debug!(
        path = %path.display(),
        read = list.lines_read,
        kept = list.bonds.len(),
        dropped = list.lines_dropped,
        "loaded bond list"
    );
    Ok(list)
}

/// Parse a line-delimited bond list.
pub fn parse_bond_list(bytes: &[u8]) -> BondList {
    let mut bonds = UserBondSet::new();
    let mut lines_read = 0usize;
    let mut lines_dropped = 0usize;

    for line in bytes.split(|b| *b == b'\n') {
        lines_read += 1;
        match parse_line(line) {
            Some(bond) => {
                bonds.insert(bond);
            }
            None => lines_dropped += 1,
        }
    }

    // A trailing newline (or empty input) does not start another line.
    if bytes.is_empty() || bytes.ends_with(b"\n") {
        lines_read -= 1;
        lines_dropped -= 1;
    }

    BondList {
        bonds,
        lines_read,
        lines_dropped,
    }
}

fn parse_line(line: &[u8]) -> Option<BondNumber> {
    let trimmed = std::str::from_utf8(trim_line(line)).ok()?;
    BondNumber::parse(trimmed)
}

/// Like `trim_ascii`, but `\x0b` counts as whitespace too.
fn trim_line(line: &[u8]) -> &[u8] {
    let is_space = |b: &u8| b.is_ascii_whitespace() || *b == 0x0b;
    let start = line.iter().position(|b| !is_space(b)).unwrap_or(line.len());
    let end = line.iter().rposition(|b| !is_space(b)).map_or(start, |i| i + 1);
    &line[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(items: &[&str]) -> UserBondSet {
        items.iter().map(|s| BondNumber::parse(s).unwrap()).collect()
    }

    #[test]
    fn keeps_only_exact_six_digit_lines() {
        let list = parse_bond_list(b"12345\n1234567\n123456\n");
        assert_eq!(list.bonds, set(&["123456"]));
        assert_eq!(list.lines_read, 3);
        assert_eq!(list.lines_dropped, 2);
    }

    #[test]
    fn trims_surrounding_whitespace_but_not_inner() {
        let list = parse_bond_list(b"  000001\r\n\t654321  \n123 456\n12a456");
        assert_eq!(list.bonds, set(&["000001", "654321"]));
        assert_eq!(list.lines_read, 4);
    }

    #[test]
    fn vertical_tab_and_form_feed_are_trimmed() {
        let list = parse_bond_list(b"123456\x0b\n\x0b\x0c222222\n\x0b\n");
        assert_eq!(list.bonds, set(&["123456", "222222"]));
        assert_eq!(list.lines_read, 3);
        assert_eq!(list.lines_dropped, 1);
    }

    #[test]
    fn tolerates_non_utf8_lines() {
        let list = parse_bond_list(b"\xff\xfe\n111111\n\xe9t\xe9\n");
        assert_eq!(list.bonds, set(&["111111"]));
        assert_eq!(list.lines_dropped, 2);
    }

    #[test]
    fn empty_or_garbage_input_yields_empty_list() {
        assert!(parse_bond_list(b"").is_empty());
        assert!(parse_bond_list(b"Winning Bonds:\nnone\n").is_empty());
    }

    #[test]
    fn load_reports_missing_file_with_input_exit_code() {
        let err = load_bond_list(Path::new("definitely/not/here.txt")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
    }
}
