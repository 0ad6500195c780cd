//! ThreadMap core - hybrid operation chains as typed directed graphs.
//!
//! A [`HybridChain`] holds actors, actions, capabilities, infrastructure,
//! narratives, targets and effects joined by typed relationships, and answers
//! structural questions about them: execution order, the longest-duration
//! path, the best places to intervene, and which paths carry a narrative.
//!
//! ```
//! use threadmap_core::domain::{Action, Actor, ActorType, EdgeType, Relationship};
//! use threadmap_core::HybridChain;
//!
//! let mut chain = HybridChain::new("op", "Operation", "");
//! chain.add_entity(Actor::new("actor", "Operator", ActorType::State));
//! chain.add_entity(Action { duration_hours: Some(24.0), ..Action::new("recon", "Recon") });
//! chain.add_relationship(Relationship::new("actor", "recon", EdgeType::Triggers))?;
//!
//! assert_eq!(chain.get_critical_path()?, vec!["actor", "recon"]);
//! # Ok::<(), threadmap_core::Error>(())
//! ```

#![forbid(unsafe_code)]

pub mod analysis;
pub mod chain;
pub mod domain;
pub mod error;

pub use chain::HybridChain;
pub use error::{Error, Result};
