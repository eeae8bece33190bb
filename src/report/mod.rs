//! Reporting utilities: combined winners and formatted terminal output.

use std::collections::BTreeSet;

use crate::domain::{BondNumber, MatchReport};

pub mod format;

pub use format::*;

/// Union of the winners of several reports (e.g. `check --all`).
pub fn combined_winners(reports: &[MatchReport]) -> BTreeSet<BondNumber> {
    reports.iter().flat_map(|r| r.winners.iter().cloned()).collect()
}
