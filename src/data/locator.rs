//! Result file discovery from a bond type's listing page.
//!
//! The listing page links every published draw result. We keep links whose
//! target ends in `.txt`, `.doc` or `.docx` (exact, case-sensitive suffix),
//! in page order. Readers exist only for `.txt`/`.docx`; `.doc` links are kept
//! here and skipped later by the engine.

use std::collections::HashMap;

use lazy_static::lazy_static;
use scraper::{Html, Selector};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::data::http::{Fetch, FetchError};
use crate::domain::{BondType, ResultFile};

const RESULT_SUFFIXES: [&str; 3] = [".txt", ".doc", ".docx"];

lazy_static! {
    static ref LINK: Selector = Selector::parse("a[href]").unwrap();
}

/// Failure to obtain the file list for a bond type. Aborts the whole check.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("failed to load the {bond_type} listing page: {source}")]
    Listing {
        bond_type: BondType,
        #[source]
        source: FetchError,
    },

    #[error("no listing page configured for {0}")]
    UnknownBondType(BondType),
}

/// Finds result files per bond type, memoizing each bond type's list.
pub struct ResultFileLocator<'a, F: Fetch> {
    fetcher: &'a F,
    config: &'a SiteConfig,
    cache: HashMap<BondType, Vec<ResultFile>>,
}

impl<'a, F: Fetch> ResultFileLocator<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a SiteConfig) -> Self {
        Self {
            fetcher,
            config,
            cache: HashMap::new(),
        }
    }

    /// Result files for `bond_type`, in listing order.
    ///
    /// The fallback dataset's identifier is appended for the bond type it covers.
    /// A listing page that cannot be fetched is an error; nothing is cached then.
    pub fn locate(&mut self, bond_type: BondType) -> Result<Vec<ResultFile>, LocateError> {
        if let Some(files) = self.cache.get(&bond_type) {
            debug!(%bond_type, files = files.len(), "using cached result file list");
            return Ok(files.clone());
        }

        let listing_url = self
            .config
            .listing_url(bond_type)
            .ok_or(LocateError::UnknownBondType(bond_type))?;

        let body = self
            .fetcher
            .fetch(listing_url)
            .map_err(|source| LocateError::Listing { bond_type, source })?;
        let html = String::from_utf8_lossy(&body);

        let mut files: Vec<ResultFile> = result_file_links(&html)
            .into_iter()
            .map(|href| ResultFile::Remote {
                url: self.config.resolve(&href),
            })
            .collect();

        if self.config.fallback.applies_to(bond_type) {
            files.push(ResultFile::Fallback {
                id: self.config.fallback.id.clone(),
            });
        }

        info!(%bond_type, files = files.len(), "located result files");
        self.cache.insert(bond_type, files.clone());
        Ok(files)
    }

    /// Forget every cached file list (e.g. a new bond list was loaded).
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

/// Raw `href` values of result-file links, in document order.
pub fn result_file_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| RESULT_SUFFIXES.iter().any(|suffix| href.ends_with(suffix)))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use pretty_assertions::assert_eq;

    const LISTING: &str = r#"<html><body>
        <a href="/wp-content/uploads/draw-96.txt">96th draw</a>
        <a href="https://savings.gov.pk/wp-content/uploads/draw-95.docx">95th draw</a>
        <a href="/wp-content/uploads/draw-94.doc">94th draw</a>
        <a href="/wp-content/uploads/draw-93.pdf">93rd draw</a>
        <a href="/wp-content/uploads/draw-92.TXT">92nd draw</a>
        <a>no target</a>
        <a href="/contact/">Contact</a>
    </body></html>"#;

    struct CountingFetch {
        body: Option<&'static str>,
        calls: RefCell<usize>,
    }

    impl Fetch for CountingFetch {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            *self.calls.borrow_mut() += 1;
            match self.body {
                Some(body) => Ok(body.as_bytes().to_vec()),
                None => Err(FetchError::Status {
                    url: url.to_string(),
                    status: 503,
                }),
            }
        }
    }

    #[test]
    fn links_filtered_by_exact_suffix_in_page_order() {
        assert_eq!(
            result_file_links(LISTING),
            vec![
                "/wp-content/uploads/draw-96.txt",
                "https://savings.gov.pk/wp-content/uploads/draw-95.docx",
                "/wp-content/uploads/draw-94.doc",
            ]
        );
    }

    #[test]
    fn locate_resolves_links_and_appends_fallback_for_rs750() {
        let fetcher = CountingFetch {
            body: Some(LISTING),
            calls: RefCell::new(0),
        };
        let config = SiteConfig::official();
        let mut locator = ResultFileLocator::new(&fetcher, &config);

        let files = locator.locate(BondType::Rs750).unwrap();
        assert_eq!(files.len(), 4);
        assert_eq!(
            files[0],
            ResultFile::Remote {
                url: "https://savings.gov.pk/wp-content/uploads/draw-96.txt".to_string()
            }
        );
        assert_eq!(
            files[3],
            ResultFile::Fallback {
                id: config.fallback.id.clone()
            }
        );

        let files = locator.locate(BondType::Rs100).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn locate_caches_per_bond_type_until_cleared() {
        let fetcher = CountingFetch {
            body: Some(LISTING),
            calls: RefCell::new(0),
        };
        let config = SiteConfig::official();
        let mut locator = ResultFileLocator::new(&fetcher, &config);

        let first = locator.locate(BondType::Rs200).unwrap();
        let second = locator.locate(BondType::Rs200).unwrap();
        assert_eq!(first, second);
        assert_eq!(*fetcher.calls.borrow(), 1);

        locator.locate(BondType::Rs1500).unwrap();
        assert_eq!(*fetcher.calls.borrow(), 2);

        locator.clear_cache();
        locator.locate(BondType::Rs200).unwrap();
        assert_eq!(*fetcher.calls.borrow(), 3);
    }

    #[test]
    fn listing_failure_propagates_and_is_not_cached() {
        let fetcher = CountingFetch {
            body: None,
            calls: RefCell::new(0),
        };
        let config = SiteConfig::official();
        let mut locator = ResultFileLocator::new(&fetcher, &config);

        let err = locator.locate(BondType::Rs750).unwrap_err();
        assert!(matches!(err, LocateError::Listing { bond_type: BondType::Rs750, .. }));
        assert!(locator.locate(BondType::Rs750).is_err());
        assert_eq!(*fetcher.calls.borrow(), 2);
    }
}
