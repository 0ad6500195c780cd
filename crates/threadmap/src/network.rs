//! Network intelligence adapter.
//!
//! Converts a social-network influence analysis (and optionally an operation
//! plan derived from it) into a [`HybridChain`], so network-derived operations
//! can be analyzed like any other hybrid operation.
//!
//! | Input | Becomes |
//! |-------|---------|
//! | top influential nodes | `actor-{node}` Actors |
//! | communities | `community-{id}` Infrastructure |
//! | plan entry points | `entry-{i}` Actions chained by `enables` |
//! | plan amplification steps | `amplify-{i}` Actions chained by `amplifies` |
//! | plan with entry points | `target-network` Target |
//! | weak links | `weakness-{i}` Capabilities |
//! | risk nodes | `risk-{i}` Narratives |
//! | estimated reach | `effect-reach` Effect |
//!
//! Anything the adapter had to skip or adjust is reported as an
//! [`AdapterWarning`] in the returned [`NetworkImport`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use threadmap_core::HybridChain;
use threadmap_core::domain::{
    Action, ActionDomain, Actor, ActorType, Capability, CapabilityType, EdgeType, Effect,
    EffectType, Entity, EntityId, EntityKind, Infrastructure, InfrastructureType, Narrative,
    NarrativeType, Relationship, Target,
};

/// Influence metrics for one network node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeInfluence {
    /// Node (account) name
    pub node: String,

    /// Structural role (hub, bridge, seed, amplifier, gatekeeper, peripheral)
    #[serde(default)]
    pub role: String,

    /// Influence score, normally in [0, 1]
    #[serde(default)]
    pub influence_score: f64,
}

/// Result of a network influence analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkIntel {
    /// Per-node influence metrics
    #[serde(default)]
    pub nodes: Vec<NodeInfluence>,

    /// Community id to member nodes
    #[serde(default)]
    pub communities: BTreeMap<String, Vec<String>>,
}

impl NetworkIntel {
    /// The `n` most influential nodes, highest first.
    ///
    /// Ties keep input order.
    pub fn top_nodes(&self, n: usize) -> Vec<&NodeInfluence> {
        let mut nodes: Vec<&NodeInfluence> = self.nodes.iter().collect();
        nodes.sort_by(|a, b| b.influence_score.total_cmp(&a.influence_score));
        nodes.truncate(n);
        nodes
    }
}

/// One step of an operation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    /// Node acting at this step
    pub node: String,

    /// The node's role, if known
    #[serde(default)]
    pub role: Option<String>,

    /// The node's influence, if known
    #[serde(default)]
    pub influence_score: Option<f64>,
}

/// A node whose removal fragments the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeakLink {
    /// The node
    pub node: String,

    /// Single point of failure
    #[serde(default)]
    pub is_spof: bool,

    /// Fraction of the network disconnected by removing it
    #[serde(default)]
    pub fragmentation_if_removed: f64,
}

/// A node that could expose the operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskNode {
    /// The node
    pub node: String,

    /// Why it is risky
    #[serde(default)]
    pub reason: String,
}

/// A planned influence operation over the network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationPlan {
    /// Where the operation gains a foothold, in order
    #[serde(default)]
    pub entry_points: Vec<PlanStep>,

    /// Who boosts the content, in order
    #[serde(default)]
    pub amplification_chain: Vec<PlanStep>,

    /// Exploitable structural weaknesses
    #[serde(default)]
    pub weak_links: Vec<WeakLink>,

    /// Nodes that could expose the operation
    #[serde(default)]
    pub risk_nodes: Vec<RiskNode>,

    /// Expected fraction of the network reached, in [0, 1]
    #[serde(default)]
    pub estimated_reach_pct: f64,
}

/// Tunables for [`network_to_chain`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    /// Most actors created from the top nodes
    pub max_actors: usize,

    /// Entry success probability when the step has no influence score
    pub default_success_probability: f64,

    /// Cap on entry success probability
    pub max_entry_success: f64,

    /// Success probability of amplification actions
    pub amplify_success: f64,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            max_actors: 20,
            default_success_probability: 0.5,
            max_entry_success: 0.95,
            amplify_success: 0.6,
        }
    }
}

impl AdapterConfig {
    /// Check that every probability lies in [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("default_success_probability", self.default_success_probability),
            ("max_entry_success", self.max_entry_success),
            ("amplify_success", self.amplify_success),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "adapter.{name} must be between 0.0 and 1.0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Something the adapter skipped or adjusted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdapterWarning {
    /// A top node had no positive influence and produced no actor
    NonPositiveInfluence {
        /// The node
        node: String,
        /// Its score
        score: f64,
    },
    /// A role had no actor type mapping and defaulted to proxy
    UnmappedRole {
        /// The node
        node: String,
        /// The unrecognized role
        role: String,
    },
    /// A value was outside its valid range and was clamped
    ClampedValue {
        /// Entity receiving the value
        entity_id: String,
        /// Field name
        field: String,
        /// Value from the input
        original: f64,
        /// Value stored
        clamped: f64,
    },
    /// The plan had no actions, so the effect is unlinked
    EffectWithoutAction,
    /// A derived entity failed validation and was skipped
    InvalidEntity {
        /// The entity
        entity_id: String,
        /// Validation message
        reason: String,
    },
    /// Two inputs mapped to the same id; the later one replaced the earlier
    DuplicateEntity {
        /// The shared id
        entity_id: String,
        /// Kind of the entity that was replaced
        replaced_kind: EntityKind,
    },
}

impl fmt::Display for AdapterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterWarning::NonPositiveInfluence { node, score } => {
                write!(f, "skipped node '{node}': influence score {score} is not positive")
            }
            AdapterWarning::UnmappedRole { node, role } => {
                write!(f, "node '{node}': unknown role '{role}', using proxy")
            }
            AdapterWarning::ClampedValue {
                entity_id,
                field,
                original,
                clamped,
            } => write!(f, "{entity_id}.{field}: {original} clamped to {clamped}"),
            AdapterWarning::EffectWithoutAction => {
                write!(f, "plan has no actions; effect-reach is not linked")
            }
            AdapterWarning::InvalidEntity { entity_id, reason } => {
                write!(f, "skipped entity '{entity_id}': {reason}")
            }
            AdapterWarning::DuplicateEntity {
                entity_id,
                replaced_kind,
            } => write!(f, "duplicate id '{entity_id}': replaced earlier {replaced_kind}"),
        }
    }
}

/// A converted chain plus everything the adapter reported.
#[derive(Debug, Clone)]
pub struct NetworkImport {
    /// The chain
    pub chain: HybridChain,
    /// Skipped or adjusted input
    pub warnings: Vec<AdapterWarning>,
}

fn role_to_actor_type(role: &str) -> Option<ActorType> {
    match role {
        "hub" | "seed" => Some(ActorType::State),
        "bridge" | "gatekeeper" => Some(ActorType::Proxy),
        "amplifier" => Some(ActorType::Automated),
        "peripheral" => Some(ActorType::Hacktivist),
        _ => None,
    }
}

/// Chain id derived from a campaign name
pub fn campaign_id(campaign_name: &str) -> String {
    campaign_name.to_lowercase().replace(' ', "-")
}

struct Builder<'a> {
    chain: HybridChain,
    warnings: Vec<AdapterWarning>,
    config: &'a AdapterConfig,
}

impl Builder<'_> {
    fn warn(&mut self, warning: AdapterWarning) {
        tracing::warn!(%warning, "Network import adjusted input");
        self.warnings.push(warning);
    }

    /// Insert a validated entity; returns whether it was added.
    fn insert(&mut self, entity: impl Into<Entity>) -> bool {
        let entity = entity.into();
        match entity.validate() {
            Ok(()) => {
                let entity_id = entity.id().to_string();
                if let Some(replaced) = self.chain.add_entity(entity) {
                    self.warn(AdapterWarning::DuplicateEntity {
                        entity_id,
                        replaced_kind: replaced.kind(),
                    });
                }
                true
            }
            Err(reason) => {
                self.warn(AdapterWarning::InvalidEntity {
                    entity_id: entity.id().to_string(),
                    reason,
                });
                false
            }
        }
    }

    fn clamp_unit(&mut self, entity_id: &str, field: &str, value: f64) -> f64 {
        let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        if clamped != value {
            self.warn(AdapterWarning::ClampedValue {
                entity_id: entity_id.to_string(),
                field: field.to_string(),
                original: value,
                clamped,
            });
        }
        clamped
    }

    fn link(
        &mut self,
        from: &EntityId,
        to: &EntityId,
        edge_type: EdgeType,
    ) -> threadmap_core::Result<()> {
        self.chain
            .add_relationship(Relationship::new(from.clone(), to.clone(), edge_type))
    }

    fn add_actors(&mut self, intel: &NetworkIntel) {
        for node in intel.top_nodes(self.config.max_actors) {
            if node.influence_score <= 0.0 || node.influence_score.is_nan() {
                self.warn(AdapterWarning::NonPositiveInfluence {
                    node: node.node.clone(),
                    score: node.influence_score,
                });
                continue;
            }

            let actor_type = role_to_actor_type(&node.role).unwrap_or_else(|| {
                self.warn(AdapterWarning::UnmappedRole {
                    node: node.node.clone(),
                    role: node.role.clone(),
                });
                ActorType::Proxy
            });

            self.insert(Actor {
                capabilities: vec![node.role.clone()],
                attribution_confidence: node.influence_score.min(1.0),
                ..Actor::new(format!("actor-{}", node.node), node.node.clone(), actor_type)
            });
        }
    }

    fn add_communities(&mut self, intel: &NetworkIntel) {
        for (community, members) in &intel.communities {
            self.insert(Infrastructure {
                reach_estimate: Some(members.len().to_string()),
                detection_difficulty: 0.3,
                ..Infrastructure::new(
                    format!("community-{community}"),
                    format!("Community {community} ({} members)", members.len()),
                    InfrastructureType::SocialMedia,
                )
            });
        }
    }

    fn actor_for(&self, node: &str) -> Option<EntityId> {
        let id = format!("actor-{node}");
        self.chain.contains(&id).then(|| EntityId::new(id))
    }

    fn add_plan(&mut self, plan: &OperationPlan) -> threadmap_core::Result<()> {
        let mut previous: Option<EntityId> = None;

        for (i, step) in plan.entry_points.iter().enumerate() {
            let id = format!("entry-{i}");
            let influence = step
                .influence_score
                .unwrap_or(self.config.default_success_probability);
            let success = self
                .clamp_unit(&id, "success_probability", influence)
                .min(self.config.max_entry_success);
            let action = Action {
                description: format!(
                    "Establish presence via {} node (influence: {:.3})",
                    step.role.as_deref().unwrap_or("unknown"),
                    step.influence_score.unwrap_or(0.0)
                ),
                domain: ActionDomain::Cognitive,
                actor_id: self.actor_for(&step.node),
                success_probability: success,
                ..Action::new(id, format!("Position at {}", step.node))
            };
            self.push_action(action, EdgeType::Enables, &mut previous)?;
        }

        for (i, step) in plan.amplification_chain.iter().enumerate() {
            let action = Action {
                description: format!(
                    "Content amplification through {} (influence: {:.3})",
                    step.role.as_deref().unwrap_or("unknown"),
                    step.influence_score.unwrap_or(0.0)
                ),
                domain: ActionDomain::Cognitive,
                actor_id: self.actor_for(&step.node),
                success_probability: self.config.amplify_success,
                ..Action::new(format!("amplify-{i}"), format!("Amplify via {}", step.node))
            };
            self.push_action(action, EdgeType::Amplifies, &mut previous)?;
        }

        if !plan.entry_points.is_empty() {
            self.insert(Target {
                target_type: "population".to_string(),
                description: format!("Estimated reach: {:.1}%", plan.estimated_reach_pct * 100.0),
                ..Target::new("target-network", "Target network segment")
            });
        }

        for (i, weak_link) in plan.weak_links.iter().enumerate() {
            self.insert(Capability {
                description: format!(
                    "SPOF={}, fragmentation={:.3}",
                    weak_link.is_spof, weak_link.fragmentation_if_removed
                ),
                perishable: true,
                ..Capability::new(
                    format!("weakness-{i}"),
                    format!("Weak link: {}", weak_link.node),
                    CapabilityType::Access,
                )
            });
        }

        for (i, risk) in plan.risk_nodes.iter().enumerate() {
            self.insert(Narrative {
                description: risk.reason.clone(),
                ..Narrative::new(
                    format!("risk-{i}"),
                    format!("Risk: {}", risk.node),
                    NarrativeType::Amplification,
                )
            });
        }

        let severity = self.clamp_unit("effect-reach", "severity", plan.estimated_reach_pct);
        let effect = Effect {
            severity,
            reversibility: 0.7,
            ..Effect::new(
                "effect-reach",
                format!("Network penetration ({:.0}% reach)", severity * 100.0),
                EffectType::NarrativeAdoption,
            )
        };
        let effect_id = effect.id.clone();
        if self.insert(effect) {
            match &previous {
                Some(last) => self.link(last, &effect_id, EdgeType::Triggers)?,
                None => self.warn(AdapterWarning::EffectWithoutAction),
            }
        }

        Ok(())
    }

    fn push_action(
        &mut self,
        action: Action,
        edge_type: EdgeType,
        previous: &mut Option<EntityId>,
    ) -> threadmap_core::Result<()> {
        let id = action.id.clone();
        if !self.insert(action) {
            return Ok(());
        }
        if let Some(prev) = previous.as_ref() {
            self.link(prev, &id, edge_type)?;
        }
        *previous = Some(id);
        Ok(())
    }
}

/// Convert network intelligence, and optionally an operation plan, into a
/// chain named `campaign_name`.
///
/// Plan actions form a single sequence ending in the reach effect, so the
/// result is always acyclic.
///
/// # Errors
///
/// Only if a derived relationship references an entity the adapter did not
/// create, which indicates a bug rather than bad input.
pub fn network_to_chain(
    intel: &NetworkIntel,
    plan: Option<&OperationPlan>,
    campaign_name: &str,
    config: &AdapterConfig,
) -> threadmap_core::Result<NetworkImport> {
    let mut builder = Builder {
        chain: HybridChain::new(campaign_id(campaign_name), campaign_name, ""),
        warnings: Vec::new(),
        config,
    };

    builder.add_actors(intel);
    builder.add_communities(intel);
    if let Some(plan) = plan {
        builder.add_plan(plan)?;
    }

    tracing::info!(
        chain_id = %builder.chain.id(),
        entities = builder.chain.entity_count(),
        relationships = builder.chain.relationship_count(),
        warnings = builder.warnings.len(),
        "Imported network intelligence"
    );

    Ok(NetworkImport {
        chain: builder.chain,
        warnings: builder.warnings,
    })
}
