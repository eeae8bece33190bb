//! Compiled-in site configuration.
//!
//! The bond type → listing page map, the origin used to resolve relative
//! links, and the fallback dataset are fixed at build time. They are gathered
//! into one [`SiteConfig`] value that is built once at startup and handed to the
//! locator and engine.

use std::collections::HashMap;

use crate::data::fallback::FallbackDataset;
use crate::domain::BondType;

const OFFICIAL_ORIGIN: &str = "https://savings.gov.pk";

/// Listing page path for each bond type, relative to the origin.
const LISTING_PATHS: [(BondType, &str); 6] = [
    (BondType::Rs100, "/rs-100-prize-bond-draw/"),
    (BondType::Rs200, "/rs-200-prize-bond-draw/"),
    (BondType::Rs750, "/rs-750-prize-bond-draw/"),
    (BondType::Rs1500, "/rs-1500-prize-bond-draw/"),
    (BondType::Rs25000, "/premium-prize-bond-rs-25000/"),
    (BondType::Rs40000, "/premium-prize-bond-rs-40000/"),
];

/// Official results checker, shown as a pointer in terminal output.
pub const OFFICIAL_CHECKER_URL: &str = "https://www.savings.gov.pk/latest/results.php#focus";

pub const USER_AGENT: &str = concat!("pbc/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Scheme + host used to resolve links that are not absolute.
    pub origin: String,
    pub listings: HashMap<BondType, String>,
    pub fallback: FallbackDataset,
}

impl SiteConfig {
    /// The National Savings site.
    pub fn official() -> Self {
        Self::with_origin(OFFICIAL_ORIGIN)
    }

    /// Same listing paths and fallback, served from another origin.
    ///
    /// Used to point the checker at a mirror or a local test server.
    pub fn with_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/').to_string();
        let listings = LISTING_PATHS
            .iter()
            .map(|(bond_type, path)| (*bond_type, format!("{origin}{path}")))
            .collect();
        Self {
            origin,
            listings,
            fallback: FallbackDataset::rs750_jan_2024(),
        }
    }

    pub fn listing_url(&self, bond_type: BondType) -> Option<&str> {
        self.listings.get(&bond_type).map(String::as_str)
    }

    /// Resolve a link target against the origin.
    ///
    /// Anything starting with `http` is taken as absolute.
    pub fn resolve(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else if href.starts_with('/') {
            format!("{}{href}", self.origin)
        } else {
            format!("{}/{href}", self.origin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bond_type_has_a_listing() {
        let config = SiteConfig::official();
        for bond_type in BondType::ALL {
            assert!(config.listing_url(bond_type).is_some(), "{bond_type} has no listing");
        }
        assert_eq!(
            config.listing_url(BondType::Rs25000),
            Some("https://savings.gov.pk/premium-prize-bond-rs-25000/")
        );
    }

    #[test]
    fn resolve_keeps_absolute_and_prefixes_relative() {
        let config = SiteConfig::with_origin("http://127.0.0.1:8080/");
        assert_eq!(config.resolve("https://cdn.example/a.txt"), "https://cdn.example/a.txt");
        assert_eq!(config.resolve("/files/a.txt"), "http://127.0.0.1:8080/files/a.txt");
        assert_eq!(config.resolve("files/a.txt"), "http://127.0.0.1:8080/files/a.txt");
    }
}
