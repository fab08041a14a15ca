//! Utility modules.

pub mod url;

pub use url::{endpoint_url, normalize_base_url};
