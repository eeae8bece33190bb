//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - bond categories and numbers (`BondType`, `BondNumber`)
//! - result file identities and their formats (`ResultFile`, `DocumentFormat`)
//! - check outputs (`MatchReport`, `CheckOutcome`, `ReportFile`)

pub mod types;

pub use types::*;
