//! Bond number extraction from free text.

use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::{BondNumber, WinningSet};

lazy_static! {
    // Maximal digit runs. `\d` is Unicode-aware so a non-ASCII digit still
    // extends a run instead of splitting it.
    static ref DIGIT_RUN: Regex = Regex::new(r"\d+").unwrap();
}

/// Collect every maximal run of exactly six digits in `text`.
///
/// Shorter and longer runs are dropped whole; a 6-digit slice of a longer run
/// never counts. Surrounding letters or punctuation do not matter.
pub fn extract_bond_numbers(text: &str) -> WinningSet {
    DIGIT_RUN
        .find_iter(text)
        .filter_map(|m| BondNumber::parse(m.as_str()))
        .collect()
}
