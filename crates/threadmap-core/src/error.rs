//! Error types for chain operations.
//!
//! The store only fails in two ways: a relationship names an entity that is
//! not in the chain, or an ordering query runs against a cyclic graph.

use crate::domain::EntityId;
use std::fmt;
use thiserror::Error;

/// Which end of a relationship an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The `source_id` of the relationship
    Source,
    /// The `target_id` of the relationship
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("Source"),
            Endpoint::Target => f.write_str("Target"),
        }
    }
}

/// The error type for chain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A relationship endpoint is not in the chain.
    #[error("{endpoint} entity '{id}' not in chain")]
    UnknownEntity {
        /// Which endpoint was missing
        endpoint: Endpoint,
        /// The id that could not be resolved
        id: EntityId,
    },

    /// The chain contains a cycle, so no execution order exists.
    #[error("Chain contains cycles - not a valid DAG (cycle through '{node}')")]
    Cycle {
        /// An entity that lies on a cycle
        node: EntityId,
    },
}

/// A specialized Result type for chain operations.
pub type Result<T> = std::result::Result<T, Error>;
