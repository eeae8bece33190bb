//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a check
//! - exported to JSON/plain text
//! - reloaded later for re-rendering a saved report

use std::collections::BTreeSet;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Prize bond denomination.
///
/// Each bond type has exactly one listing page with its draw results
/// (see `config::SiteConfig`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BondType {
    Rs100,
    Rs200,
    Rs750,
    Rs1500,
    Rs25000,
    Rs40000,
}

impl BondType {
    pub const ALL: [BondType; 6] = [
        BondType::Rs100,
        BondType::Rs200,
        BondType::Rs750,
        BondType::Rs1500,
        BondType::Rs25000,
        BondType::Rs40000,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            BondType::Rs100 => "Rs. 100",
            BondType::Rs200 => "Rs. 200",
            BondType::Rs750 => "Rs. 750",
            BondType::Rs1500 => "Rs. 1500",
            BondType::Rs25000 => "Rs. 25000",
            BondType::Rs40000 => "Rs. 40000",
        }
    }

    /// Name accepted by `--type` on the command line.
    pub fn cli_name(self) -> &'static str {
        match self {
            BondType::Rs100 => "rs100",
            BondType::Rs200 => "rs200",
            BondType::Rs750 => "rs750",
            BondType::Rs1500 => "rs1500",
            BondType::Rs25000 => "rs25000",
            BondType::Rs40000 => "rs40000",
        }
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A 6-digit bond number in canonical form (leading zeros kept).
///
/// Only constructed through [`BondNumber::parse`], so every value is exactly six
/// ASCII digits. Ordering is lexicographic, which equals numeric order for
/// fixed-width values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BondNumber(String);

impl BondNumber {
    pub const LEN: usize = 6;

    /// Accept `raw` only if it is exactly six ASCII digits (no trimming).
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == Self::LEN && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BondNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BondNumber {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BondNumber::parse(&value).ok_or_else(|| format!("not a 6-digit bond number: {value:?}"))
    }
}

impl From<BondNumber> for String {
    fn from(value: BondNumber) -> Self {
        value.0
    }
}

/// Numbers held by the user (parsed from an uploaded list).
pub type UserBondSet = BTreeSet<BondNumber>;

/// Numbers published as winners in one result file.
pub type WinningSet = BTreeSet<BondNumber>;

/// Content format of a result file, implied by its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Plain UTF-8 text (`.txt`).
    Text,
    /// Office Open XML word-processing document (`.docx`).
    Docx,
}

impl DocumentFormat {
    /// Pick the reader for a URL by its trailing extension.
    ///
    /// Matching is case-sensitive. Anything other than `.txt`/`.docx` (notably
    /// legacy `.doc`) has no reader and yields `None`.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.ends_with(".txt") {
            Some(DocumentFormat::Text)
        } else if url.ends_with(".docx") {
            Some(DocumentFormat::Docx)
        } else {
            None
        }
    }
}

/// Where a result file's winning numbers come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResultFile {
    /// A file linked from the listing page.
    Remote { url: String },
    /// The compiled-in dataset standing in for a historically unavailable file.
    Fallback { id: String },
}

impl ResultFile {
    /// Short identity used in logs and warnings.
    pub fn identity(&self) -> &str {
        match self {
            ResultFile::Remote { url } => url,
            ResultFile::Fallback { id } => id,
        }
    }

    /// Final `/` segment of the URL (the whole id for the fallback).
    pub fn file_name(&self) -> &str {
        let ident = self.identity();
        ident.rsplit('/').next().unwrap_or(ident)
    }
}

/// Matches found in a single result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMatches {
    pub label: String,
    /// Sorted ascending.
    pub bonds: Vec<BondNumber>,
}

/// A result file that could not be processed (fetch, decode or parse failure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    pub file: String,
    pub message: String,
}

/// The outcome of checking one bond list against one bond type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub bond_type: BondType,
    /// Per-file matches in locator order; files without matches are omitted.
    pub matches: Vec<FileMatches>,
    /// Union of every per-file match.
    pub winners: BTreeSet<BondNumber>,
    pub files_located: usize,
    pub files_checked: usize,
    /// Files skipped because no reader exists for their format.
    pub files_unsupported: usize,
    pub failures: Vec<FileFailure>,
}

/// Coarse classification of a report for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// At least one file matched.
    Winners,
    /// Files were checked, none matched.
    NoWinners,
    /// The listing page yielded no result files at all.
    NoFiles,
}

impl MatchReport {
    pub fn new(bond_type: BondType) -> Self {
        Self {
            bond_type,
            matches: Vec::new(),
            winners: BTreeSet::new(),
            files_located: 0,
            files_checked: 0,
            files_unsupported: 0,
            failures: Vec::new(),
        }
    }

    /// Record matches for `label`.
    ///
    /// A repeated label replaces the earlier entry's numbers but keeps its
    /// position. The running union is only ever extended.
    pub fn record(&mut self, label: &str, bonds: Vec<BondNumber>) {
        self.winners.extend(bonds.iter().cloned());
        match self.matches.iter_mut().find(|m| m.label == label) {
            Some(existing) => existing.bonds = bonds,
            None => self.matches.push(FileMatches {
                label: label.to_string(),
                bonds,
            }),
        }
    }

    pub fn outcome(&self) -> CheckOutcome {
        if !self.matches.is_empty() {
            CheckOutcome::Winners
        } else if self.files_located == 0 {
            CheckOutcome::NoFiles
        } else {
            CheckOutcome::NoWinners
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus interactive prompts).
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub bond_list: std::path::PathBuf,
    pub bond_types: Vec<BondType>,
    /// Where to write the `Winning Bonds:` download.
    pub export_winners: Option<std::path::PathBuf>,
    /// Where to write the full JSON report.
    pub export_report: Option<std::path::PathBuf>,
}

/// A saved report file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFile {
    pub tool: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub bonds_checked: usize,
    pub reports: Vec<MatchReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bn(s: &str) -> BondNumber {
        BondNumber::parse(s).unwrap()
    }

    #[test]
    fn bond_number_requires_exactly_six_ascii_digits() {
        assert_eq!(BondNumber::parse("000001").map(|b| b.to_string()), Some("000001".to_string()));
        assert!(BondNumber::parse("12345").is_none());
        assert!(BondNumber::parse("1234567").is_none());
        assert!(BondNumber::parse(" 123456").is_none());
        assert!(BondNumber::parse("12a456").is_none());
        assert!(BondNumber::parse("١٢٣٤٥٦").is_none());
    }

    #[test]
    fn format_follows_case_sensitive_extension() {
        assert_eq!(DocumentFormat::from_url("https://x/a.txt"), Some(DocumentFormat::Text));
        assert_eq!(DocumentFormat::from_url("https://x/a.docx"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_url("https://x/a.doc"), None);
        assert_eq!(DocumentFormat::from_url("https://x/a.TXT"), None);
    }

    #[test]
    fn file_name_is_last_path_segment() {
        let f = ResultFile::Remote {
            url: "https://savings.gov.pk/wp-content/uploads/draw-97.txt".to_string(),
        };
        assert_eq!(f.file_name(), "draw-97.txt");
    }

    #[test]
    fn repeated_label_replaces_in_place() {
        let mut report = MatchReport::new(BondType::Rs100);
        report.record("a.txt", vec![bn("111111")]);
        report.record("b.txt", vec![bn("222222")]);
        report.record("a.txt", vec![bn("333333")]);

        assert_eq!(report.matches.len(), 2);
        assert_eq!(report.matches[0].label, "a.txt");
        assert_eq!(report.matches[0].bonds, vec![bn("333333")]);
        assert_eq!(report.winners.len(), 3);
    }

    #[test]
    fn outcome_distinguishes_empty_from_no_files() {
        let mut report = MatchReport::new(BondType::Rs200);
        assert_eq!(report.outcome(), CheckOutcome::NoFiles);
        report.files_located = 3;
        assert_eq!(report.outcome(), CheckOutcome::NoWinners);
        report.record("x.txt", vec![bn("123456")]);
        assert_eq!(report.outcome(), CheckOutcome::Winners);
    }

    #[test]
    fn bond_number_rejects_bad_json() {
        let ok: BondNumber = serde_json::from_str("\"012345\"").unwrap();
        assert_eq!(ok.as_str(), "012345");
        assert!(serde_json::from_str::<BondNumber>("\"12345\"").is_err());
    }
}
