//! ThreadMap - model hybrid operations as typed graphs and find where to
//! disrupt them.
//!
//! This crate provides the `threadmap` CLI and the pieces it is built from:
//! configuration, the network intelligence adapter, and reference scenarios.
//! The graph model lives in `threadmap-core`; serialization in `threadmap-io`.

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod network;
pub mod output;
pub mod scenarios;
pub mod summary;

pub use error::{Error, Result};
