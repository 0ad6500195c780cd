//! Serialization for ThreadMap chains.
//!
//! - [`atomic`]: crash-safe file writes
//! - [`json`]: lossless JSON documents and async file helpers
//! - [`stix`]: STIX 2.1 bundle export
//! - [`report`]: Markdown analysis reports

#![forbid(unsafe_code)]

pub mod atomic;
pub mod error;
pub mod json;
pub mod report;
pub mod stix;

pub use atomic::write_atomic;
pub use error::{Error, Result};
pub use json::{from_json, load_chain, save_chain, to_json};
pub use report::{ReportOptions, to_markdown, to_markdown_with};
pub use stix::{to_stix_bundle, to_stix_bundle_at};
