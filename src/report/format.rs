//! Terminal rendering of check results.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - output changes are localized (saved reports render through the same code)

use crate::config::OFFICIAL_CHECKER_URL;
use crate::domain::{BondType, CheckOutcome, DocumentFormat, MatchReport, ResultFile};
use crate::io::ingest::BondList;

/// Header shown once per run: what was loaded from the bond list.
pub fn format_bond_list_summary(list: &BondList) -> String {
    format!(
        "=== pbc - Prize Bond Check ===\nBonds: {} valid | {} line(s) read | {} dropped\n",
        list.bonds.len(),
        list.lines_read,
        list.lines_dropped
    )
}

/// Warning for a bond list without a single usable line.
pub fn format_no_valid_bonds(source: &str) -> String {
    format!("Warning: no valid 6-digit bond numbers found in {source}. Nothing to check.")
}

/// Full per-bond-type result block.
pub fn format_report(report: &MatchReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n--- {} ---\n", report.bond_type.display_name()));
    out.push_str(&format!(
        "Files: located={} | checked={} | unsupported={} | failed={}\n",
        report.files_located,
        report.files_checked,
        report.files_unsupported,
        report.failures.len()
    ));

    match report.outcome() {
        CheckOutcome::Winners => {
            out.push_str(&format!(
                "\nYou've got {} winning bond(s)!\n",
                report.winners.len()
            ));
            for m in &report.matches {
                out.push_str(&format!("\n{}\n", m.label));
                for bond in &m.bonds {
                    out.push_str(&format!("  - {bond}\n"));
                }
            }
        }
        CheckOutcome::NoWinners => {
            out.push_str("\nNo winning bonds found in recent draws.\n");
        }
        CheckOutcome::NoFiles => {
            out.push_str(&format!(
                "\nNo result files were found on the {} listing page.\n",
                report.bond_type.display_name()
            ));
        }
    }

    if !report.failures.is_empty() {
        out.push_str(&format!("\nSkipped {} file(s) due to errors:\n", report.failures.len()));
        for failure in &report.failures {
            out.push_str(&format!("  - {}: {}\n", failure.file, failure.message));
        }
    }

    out
}

/// Footer with where the download went and the official checker.
pub fn format_footer(winners_path: Option<&str>) -> String {
    let mut out = String::new();
    if let Some(path) = winners_path {
        out.push_str(&format!("\nWinning bonds written to {path}\n"));
    }
    out.push_str(&format!("Verify on the official checker: {OFFICIAL_CHECKER_URL}\n"));
    out
}

/// Listing of the files the locator found for a bond type.
pub fn format_result_files(bond_type: BondType, files: &[ResultFile]) -> String {
    let mut out = format!("Found {} result file(s) for {}:\n", files.len(), bond_type.display_name());
    for (idx, file) in files.iter().enumerate() {
        let note = match file {
            ResultFile::Remote { url } if DocumentFormat::from_url(url).is_none() => {
                " (unsupported, skipped)"
            }
            ResultFile::Fallback { .. } => " (compiled-in)",
            ResultFile::Remote { .. } => "",
        };
        out.push_str(&format!("{:>3}) {}{note}\n", idx + 1, file.identity()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BondNumber, FileFailure};

    #[test]
    fn winners_are_listed_per_file() {
        let mut report = MatchReport::new(BondType::Rs750);
        report.files_located = 2;
        report.files_checked = 2;
        report.record("draw-97.txt", vec![BondNumber::parse("125416").unwrap()]);

        let text = format_report(&report);
        assert!(text.contains("--- Rs. 750 ---"));
        assert!(text.contains("You've got 1 winning bond(s)!"));
        assert!(text.contains("draw-97.txt\n  - 125416\n"));
        assert!(!text.contains("Skipped"));
    }

    #[test]
    fn empty_and_missing_files_read_differently() {
        let mut report = MatchReport::new(BondType::Rs100);
        assert!(format_report(&report).contains("No result files were found"));

        report.files_located = 1;
        report.failures.push(FileFailure {
            file: "https://x/a.txt".to_string(),
            message: "returned HTTP 404".to_string(),
        });
        let text = format_report(&report);
        assert!(text.contains("No winning bonds found"));
        assert!(text.contains("  - https://x/a.txt: returned HTTP 404"));
    }

    #[test]
    fn result_file_listing_marks_unsupported_and_fallback() {
        let files = vec![
            ResultFile::Remote { url: "https://x/a.doc".to_string() },
            ResultFile::Fallback { id: "First-Page".to_string() },
        ];
        let text = format_result_files(BondType::Rs750, &files);
        assert!(text.contains("  1) https://x/a.doc (unsupported, skipped)"));
        assert!(text.contains("  2) First-Page (compiled-in)"));
    }
}
