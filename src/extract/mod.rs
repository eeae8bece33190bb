//! Text extraction: result-file bytes → text → bond numbers.

pub mod document;
pub mod numbers;

pub use document::{ReadError, read_document};
pub use numbers::extract_bond_numbers;
