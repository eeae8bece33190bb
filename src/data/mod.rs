//! Remote data: HTTP access, result-file discovery, and the compiled-in
//! fallback winner list.

pub mod fallback;
pub mod http;
pub mod locator;

pub use fallback::FallbackDataset;
pub use http::{Fetch, FetchError, HttpClient};
pub use locator::{LocateError, ResultFileLocator};
