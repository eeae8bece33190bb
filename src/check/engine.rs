//! Match a user's bond list against every result file of a bond type.
//!
//! Files are processed one at a time in locator order. A file that cannot be
//! fetched, decoded or parsed is logged, recorded in the report, and skipped.
//! Only a listing page failure aborts the check.

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::data::http::{Fetch, FetchError};
use crate::data::locator::{LocateError, ResultFileLocator};
use crate::domain::{BondType, DocumentFormat, FileFailure, MatchReport, ResultFile, UserBondSet, WinningSet};
use crate::extract::{ReadError, extract_bond_numbers, read_document};

/// Failure confined to a single result file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Read(#[from] ReadError),
}

/// Winning numbers of one file, or the reason there are none to compare.
enum FileWinners {
    Found { label: String, numbers: WinningSet },
    Unsupported,
}

pub struct MatchEngine<'a, F: Fetch> {
    fetcher: &'a F,
    config: &'a SiteConfig,
    locator: ResultFileLocator<'a, F>,
}

impl<'a, F: Fetch> MatchEngine<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a SiteConfig) -> Self {
        Self {
            fetcher,
            config,
            locator: ResultFileLocator::new(fetcher, config),
        }
    }

    /// Check `user_bonds` against every result file published for `bond_type`.
    pub fn check(&mut self, user_bonds: &UserBondSet, bond_type: BondType) -> Result<MatchReport, LocateError> {
        let files = self.locator.locate(bond_type)?;

        let mut report = MatchReport::new(bond_type);
        report.files_located = files.len();

        for file in &files {
            let (label, numbers) = match self.winners_of(file) {
                Ok(FileWinners::Found { label, numbers }) => (label, numbers),
                Ok(FileWinners::Unsupported) => {
                    debug!(file = file.identity(), "no reader for this format, skipping");
                    report.files_unsupported += 1;
                    continue;
                }
                Err(e) => {
                    warn!(file = file.identity(), error = %e, "skipped result file");
                    report.failures.push(FileFailure {
                        file: file.identity().to_string(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            report.files_checked += 1;
            let matched: Vec<_> = user_bonds.intersection(&numbers).cloned().collect();
            debug!(%label, winners = numbers.len(), matched = matched.len(), "checked result file");
            if !matched.is_empty() {
                report.record(&label, matched);
            }
        }

        Ok(report)
    }

    /// Forget cached file lists, e.g. when a new bond list is loaded.
    pub fn reset(&mut self) {
        self.locator.clear_cache();
    }

    /// Result files the locator finds for `bond_type`.
    pub fn result_files(&mut self, bond_type: BondType) -> Result<Vec<ResultFile>, LocateError> {
        self.locator.locate(bond_type)
    }

    fn winners_of(&self, file: &ResultFile) -> Result<FileWinners, FileError> {
        match file {
            ResultFile::Fallback { .. } => Ok(FileWinners::Found {
                label: self.config.fallback.label.clone(),
                numbers: self.config.fallback.numbers.clone(),
            }),
            ResultFile::Remote { url } => {
                // Decide before fetching so unsupported files cost no request.
                let Some(format) = DocumentFormat::from_url(url) else {
                    return Ok(FileWinners::Unsupported);
                };
                let bytes = self.fetcher.fetch(url)?;
                let text = read_document(&bytes, format)?;
                Ok(FileWinners::Found {
                    label: file.file_name().to_string(),
                    numbers: extract_bond_numbers(&text),
                })
            }
        }
    }
}
