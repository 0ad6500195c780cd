//! JSON document import and export.
//!
//! A chain serializes to a single document:
//!
//! ```json
//! {
//!   "id": "chain-id",
//!   "name": "Chain name",
//!   "description": "...",
//!   "entities": [{"type": "action", "id": "act1", "name": "Recon", ...}],
//!   "relationships": [{"source_id": "a1", "target_id": "act1", "edge_type": "triggers", ...}]
//! }
//! ```
//!
//! Entities and relationships are written in insertion order, so saving the
//! same chain twice produces identical bytes. Loading is strict: an invalid
//! entity, a repeated id, or a dangling relationship rejects the whole
//! document rather than producing a partial chain.

use crate::atomic::write_atomic;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use threadmap_core::HybridChain;
use threadmap_core::domain::{Entity, Relationship};

/// Serialized form of a [`HybridChain`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainDocument {
    /// Chain identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-text summary
    #[serde(default)]
    pub description: String,

    /// Every entity, each tagged with its `"type"`
    #[serde(default)]
    pub entities: Vec<Entity>,

    /// Every relationship
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl ChainDocument {
    /// Snapshot a chain into a document
    pub fn from_chain(chain: &HybridChain) -> Self {
        Self {
            id: chain.id().to_string(),
            name: chain.name().to_string(),
            description: chain.description().to_string(),
            entities: chain.entities().cloned().collect(),
            relationships: chain.relationships().cloned().collect(),
        }
    }

    /// Rebuild a chain, rejecting malformed content.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidEntity`] if an entity fails validation
    /// - [`Error::DuplicateEntity`] if an id appears twice
    /// - [`Error::Chain`] if a relationship references a missing entity
    pub fn into_chain(self) -> Result<HybridChain> {
        let mut seen = HashSet::new();
        for entity in &self.entities {
            entity.validate().map_err(|reason| Error::InvalidEntity {
                id: entity.id().to_string(),
                reason,
            })?;
            if !seen.insert(entity.id().clone()) {
                return Err(Error::DuplicateEntity(entity.id().to_string()));
            }
        }

        let mut chain = HybridChain::new(self.id, self.name, self.description);
        for entity in self.entities {
            chain.add_entity(entity);
        }
        for rel in self.relationships {
            chain.add_relationship(rel)?;
        }

        tracing::debug!(
            chain_id = %chain.id(),
            entities = chain.entity_count(),
            relationships = chain.relationship_count(),
            "Loaded chain document"
        );
        Ok(chain)
    }
}

/// Export a chain to a pretty-printed JSON string.
pub fn to_json(chain: &HybridChain) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ChainDocument::from_chain(chain))?)
}

/// Import a chain from a JSON string.
///
/// # Errors
///
/// Fails on malformed JSON, unknown entity types, or any of the content
/// errors listed on [`ChainDocument::into_chain`].
pub fn from_json(json: &str) -> Result<HybridChain> {
    let document: ChainDocument = serde_json::from_str(json)?;
    document.into_chain()
}

/// Load a chain from a JSON file.
pub async fn load_chain(path: &Path) -> Result<HybridChain> {
    let content = tokio::fs::read_to_string(path).await?;
    from_json(&content)
}

/// Save a chain to a JSON file with atomic writes.
///
/// See [`write_atomic`]: an interrupted or failed save leaves the original
/// file unchanged and no temporary file behind.
pub async fn save_chain(chain: &HybridChain, path: &Path) -> Result<()> {
    let mut json = to_json(chain)?;
    json.push('\n');
    write_atomic(path, json.as_bytes()).await?;

    tracing::debug!(chain_id = %chain.id(), path = %path.display(), "Saved chain");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use threadmap_core::domain::{Action, EdgeType, Effect, EffectType, Target};

    fn small_chain() -> HybridChain {
        let mut chain = HybridChain::new("small", "Small", "Two steps");
        chain.add_entity(Action {
            duration_hours: Some(6.0),
            tools: vec!["nmap".to_string()],
            ..Action::new("scan", "Scan")
        });
        chain.add_entity(Target::new("org", "Org"));
        chain
            .add_relationship(
                Relationship::new("scan", "org", EdgeType::Dependency).with_description("staging"),
            )
            .unwrap();
        chain
    }

    #[test]
    fn round_trip_preserves_counts_and_values() {
        let chain = small_chain();
        let restored = from_json(&to_json(&chain).unwrap()).unwrap();

        assert_eq!(restored.id(), "small");
        assert_eq!(restored.description(), "Two steps");
        assert_eq!(restored.entity_count(), chain.entity_count());
        assert_eq!(restored.relationship_count(), chain.relationship_count());
        for entity in chain.entities() {
            assert_eq!(restored.get_entity(entity.id().as_str()), Some(entity));
        }
        let rels: Vec<_> = restored.relationships().collect();
        assert_eq!(rels[0].description, "staging");
    }

    #[test]
    fn output_is_deterministic() {
        let chain = small_chain();
        assert_eq!(to_json(&chain).unwrap(), to_json(&chain).unwrap());
    }

    #[test]
    fn dangling_relationship_rejects_document() {
        let json = r#"{
            "id": "x", "name": "X",
            "entities": [{"type": "target", "id": "t", "name": "T"}],
            "relationships": [{"source_id": "ghost", "target_id": "t"}]
        }"#;
        assert!(matches!(from_json(json), Err(Error::Chain(_))));
    }

    #[test]
    fn duplicate_id_rejects_document() {
        let json = r#"{
            "id": "x", "name": "X",
            "entities": [
                {"type": "target", "id": "t", "name": "T"},
                {"type": "actor", "id": "t", "name": "A", "actor_type": "state"}
            ]
        }"#;
        assert!(matches!(from_json(json), Err(Error::DuplicateEntity(id)) if id == "t"));
    }

    #[test]
    fn invalid_entity_rejects_document() {
        let mut chain = HybridChain::new("x", "X", "");
        chain.add_entity(Effect {
            severity: 3.0,
            ..Effect::new("e", "E", EffectType::DataLoss)
        });
        let json = to_json(&chain).unwrap();
        assert!(matches!(
            from_json(&json),
            Err(Error::InvalidEntity { id, .. }) if id == "e"
        ));
    }

    #[test]
    fn unknown_entity_type_is_a_json_error() {
        let json = r#"{"id": "x", "name": "X", "entities": [{"type": "drone", "id": "d", "name": "D"}]}"#;
        assert!(matches!(from_json(json), Err(Error::Json(_))));
    }
}
