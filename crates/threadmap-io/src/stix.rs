//! STIX 2.1 bundle export.
//!
//! Each entity becomes a STIX domain object whose type depends on the entity
//! variant, and each relationship becomes a STIX `relationship` object. Ids
//! are derived from ThreadMap ids rather than random UUIDs so repeated exports
//! of the same chain reference the same objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use threadmap_core::HybridChain;
use threadmap_core::domain::{Entity, EntityKind};

/// STIX specification version stamped on every object.
pub const SPEC_VERSION: &str = "2.1";

/// STIX object type used for entities of the given kind.
pub fn stix_type(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Actor => "threat-actor",
        EntityKind::Action => "attack-pattern",
        EntityKind::Capability => "tool",
        EntityKind::Infrastructure => "infrastructure",
        EntityKind::Narrative => "campaign",
        EntityKind::Target => "identity",
        EntityKind::Effect => "impact",
    }
}

/// A STIX bundle wrapping every object exported from one chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StixBundle {
    /// Always `"bundle"`
    #[serde(rename = "type")]
    pub object_type: String,

    /// `bundle--{chain id}`
    pub id: String,

    /// Domain objects followed by relationship objects
    pub objects: Vec<StixObject>,
}

/// One object inside a [`StixBundle`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StixObject {
    /// A relationship between two domain objects
    Relationship(StixRelationship),
    /// A domain object carrying one entity
    Domain(StixDomainObject),
}

/// A STIX domain object built from a ThreadMap entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StixDomainObject {
    /// STIX type (see [`stix_type`])
    #[serde(rename = "type")]
    pub object_type: String,

    /// Always [`SPEC_VERSION`]
    pub spec_version: String,

    /// `{type}--{entity id}`
    pub id: String,

    /// Entity name
    pub name: String,

    /// Entity description, omitted when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Modification timestamp
    pub modified: DateTime<Utc>,

    /// The complete ThreadMap entity
    pub x_threadmap: Entity,
}

/// A STIX relationship object built from a ThreadMap relationship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StixRelationship {
    /// Always `"relationship"`
    #[serde(rename = "type")]
    pub object_type: String,

    /// Always [`SPEC_VERSION`]
    pub spec_version: String,

    /// `relationship--{source}--{target}`
    pub id: String,

    /// The edge type name
    pub relationship_type: String,

    /// Composite id of the source object
    pub source_ref: String,

    /// Composite id of the target object
    pub target_ref: String,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Modification timestamp
    pub modified: DateTime<Utc>,
}

/// Export a chain as a STIX bundle stamped with the current time.
pub fn to_stix_bundle(chain: &HybridChain) -> StixBundle {
    to_stix_bundle_at(chain, Utc::now())
}

/// Export a chain as a STIX bundle stamped with `timestamp`.
pub fn to_stix_bundle_at(chain: &HybridChain, timestamp: DateTime<Utc>) -> StixBundle {
    let mut objects: Vec<StixObject> = chain
        .entities()
        .map(|entity| StixObject::Domain(domain_object(entity, timestamp)))
        .collect();

    for rel in chain.relationships() {
        let (Some(source), Some(target)) = (
            chain.get_entity(rel.source_id.as_str()),
            chain.get_entity(rel.target_id.as_str()),
        ) else {
            // The store never holds a dangling edge
            continue;
        };
        objects.push(StixObject::Relationship(StixRelationship {
            object_type: "relationship".to_string(),
            spec_version: SPEC_VERSION.to_string(),
            id: format!("relationship--{}--{}", rel.source_id, rel.target_id),
            relationship_type: rel.edge_type.as_str().to_string(),
            source_ref: object_ref(source),
            target_ref: object_ref(target),
            created: timestamp,
            modified: timestamp,
        }));
    }

    tracing::debug!(chain_id = %chain.id(), objects = objects.len(), "Built STIX bundle");

    StixBundle {
        object_type: "bundle".to_string(),
        id: format!("bundle--{}", chain.id()),
        objects,
    }
}

fn object_ref(entity: &Entity) -> String {
    format!("{}--{}", stix_type(entity.kind()), entity.id())
}

fn domain_object(entity: &Entity, timestamp: DateTime<Utc>) -> StixDomainObject {
    StixDomainObject {
        object_type: stix_type(entity.kind()).to_string(),
        spec_version: SPEC_VERSION.to_string(),
        id: object_ref(entity),
        name: entity.name().to_string(),
        description: entity.description().map(str::to_string),
        created: timestamp,
        modified: timestamp,
        x_threadmap: entity.clone(),
    }
}
