//! Input/output helpers.
//!
//! - bond list ingest + validation (`ingest`)
//! - winners download (`export`)
//! - report JSON read/write (`report`)

pub mod export;
pub mod ingest;
pub mod report;

pub use export::*;
pub use ingest::*;
pub use report::*;
