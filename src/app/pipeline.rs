//! Shared "check pipeline" logic used by every front-end command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! bond list ingest -> result file discovery -> fetch/read/extract -> match
//!
//! The command handlers can then focus on presentation (printing and exports).

use tracing::error;

use crate::check::MatchEngine;
use crate::config::SiteConfig;
use crate::data::http::{Fetch, HttpClient};
use crate::domain::{BondType, CheckConfig, MatchReport};
use crate::error::{AppError, EXIT_NETWORK};
use crate::io::ingest::{BondList, load_bond_list};

/// All computed outputs of a single `pbc check` run.
#[derive(Debug, Clone)]
pub struct CheckRun {
    pub bond_list: BondList,
    /// One report per bond type that could be checked, in request order.
    pub reports: Vec<MatchReport>,
    /// Bond types whose listing page failed (only when several were requested).
    pub listing_errors: Vec<AppError>,
}

impl CheckRun {
    /// The bond list had no usable line, so nothing was matched.
    pub fn no_valid_bonds(&self) -> bool {
        self.bond_list.is_empty()
    }
}

/// Build the blocking HTTP client used by every command.
pub fn http_client() -> Result<HttpClient, AppError> {
    HttpClient::new().map_err(|e| AppError::new(EXIT_NETWORK, e.to_string()))
}

/// Execute the full check pipeline against the official site.
pub fn run_check(config: &CheckConfig) -> Result<CheckRun, AppError> {
    // 1) Load and normalize the bond list.
    let bond_list = load_bond_list(&config.bond_list)?;
    if bond_list.is_empty() {
        return Ok(CheckRun {
            bond_list,
            reports: Vec::new(),
            listing_errors: Vec::new(),
        });
    }

    let site = SiteConfig::official();
    let client = http_client()?;
    run_check_with(&client, &site, bond_list, &config.bond_types)
}

/// Execute the matching part of the pipeline with an injected fetcher and site.
///
/// With a single bond type a listing failure aborts the run. With several, the
/// failing types are collected and the others still run.
pub fn run_check_with<F: Fetch>(
    fetcher: &F,
    site: &SiteConfig,
    bond_list: BondList,
    bond_types: &[BondType],
) -> Result<CheckRun, AppError> {
    let mut engine = MatchEngine::new(fetcher, site);
    let mut reports = Vec::with_capacity(bond_types.len());
    let mut listing_errors = Vec::new();

    // 2) Locate, read and match each bond type's result files.
    for &bond_type in bond_types {
        match engine.check(&bond_list.bonds, bond_type) {
            Ok(report) => reports.push(report),
            Err(e) if bond_types.len() > 1 => {
                error!(%bond_type, error = %e, "bond type could not be checked");
                listing_errors.push(e.into());
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(CheckRun {
        bond_list,
        reports,
        listing_errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::http::FetchError;
    use crate::io::ingest::parse_bond_list;

    /// Every listing page is empty except the ones that fail.
    struct EmptyListings {
        failing: Vec<BondType>,
        site: SiteConfig,
    }

    impl Fetch for EmptyListings {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            let failing = self
                .failing
                .iter()
                .any(|t| self.site.listing_url(*t) == Some(url));
            if failing {
                Err(FetchError::Request {
                    url: url.to_string(),
                    message: "connection refused".to_string(),
                })
            } else {
                Ok(b"<html></html>".to_vec())
            }
        }
    }

    #[test]
    fn single_type_listing_failure_is_fatal() {
        let site = SiteConfig::with_origin("http://results.test");
        let fetcher = EmptyListings {
            failing: vec![BondType::Rs100],
            site: site.clone(),
        };
        let err = run_check_with(&fetcher, &site, parse_bond_list(b"123456\n"), &[BondType::Rs100]).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NETWORK);
    }

    #[test]
    fn several_types_keep_going_past_a_failure() {
        let site = SiteConfig::with_origin("http://results.test");
        let fetcher = EmptyListings {
            failing: vec![BondType::Rs200],
            site: site.clone(),
        };
        let run = run_check_with(&fetcher, &site, parse_bond_list(b"125416\n"), &BondType::ALL).unwrap();

        assert_eq!(run.reports.len(), 5);
        assert_eq!(run.listing_errors.len(), 1);
        let rs750 = run.reports.iter().find(|r| r.bond_type == BondType::Rs750).unwrap();
        assert_eq!(rs750.winners.len(), 1);
    }
}
