//! `prize-bond-checker` library crate.
//!
//! The binary (`pbc`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the matching pipeline is reusable by other front-ends
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod check;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod extract;
pub mod io;
pub mod report;
