//! Impact analysis over a chain.
//!
//! These queries answer "where should a defender intervene?":
//! - Chokepoints: nodes with the most downstream dependents
//! - Intervention ranking: downstream impact weighted by convergence and
//!   action fragility
//! - Narrative threads: root-to-leaf paths that carry an information
//!   operation narrative
//! - Capability requirements: what the operation needs to succeed
//!
//! Reachability is recomputed per node, O(V·(V+E)) overall. Modeled
//! operations are tens of nodes, so nothing is cached.

use crate::chain::{HybridChain, count_reachable};
use crate::domain::{CapabilityType, Entity, EntityId, EntityKind};
use petgraph::Direction;
use petgraph::algo;
use petgraph::graph::NodeIndex;
use petgraph::visit::Reversed;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A node ranked by how much of the chain sits downstream of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chokepoint {
    /// The entity
    pub node_id: EntityId,
    /// Its kind
    pub entity_type: EntityKind,
    /// Entities reachable from it
    pub downstream_count: usize,
    /// Entities that can reach it
    pub upstream_count: usize,
    /// Ranking key (currently the downstream count)
    pub impact: usize,
}

/// A node scored as a disruption target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionPoint {
    /// The entity
    pub node_id: EntityId,
    /// Its kind
    pub entity_type: EntityKind,
    /// Its display name
    pub name: String,
    /// Entities reachable from it
    pub downstream_impact: usize,
    /// Relationships converging on it
    pub in_degree: usize,
    /// Relationships leaving it
    pub out_degree: usize,
    /// Composite score, rounded to 2 decimals
    pub score: f64,
}

/// Where a capability requirement comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "action_id")]
pub enum Provenance {
    /// An explicit Capability entity
    Entity,
    /// A tool listed on the given action
    Action(EntityId),
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Entity => f.write_str("entity"),
            Provenance::Action(id) => write!(f, "action:{id}"),
        }
    }
}

/// Something the operation needs in order to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRequirement {
    /// Capability id, or `"{action}:{tool}"` for tools implied by an action
    pub id: String,
    /// Display name (the tool name for implied tools)
    pub name: String,
    /// Category of capability
    pub capability_type: CapabilityType,
    /// Where the requirement was found
    pub source: Provenance,
}

/// Find the nodes whose removal disables the most downstream nodes.
///
/// Returns at most `limit` records sorted by impact, highest first. Ties keep
/// entity insertion order.
pub fn find_chokepoints(chain: &HybridChain, limit: usize) -> Vec<Chokepoint> {
    let graph = chain.graph();
    let mut results: Vec<Chokepoint> = graph
        .node_indices()
        .filter_map(|node| {
            let entity = chain.entity_at(node)?;
            let downstream = count_reachable(graph, node);
            let upstream = count_reachable(Reversed(graph), node);
            Some(Chokepoint {
                node_id: entity.id().clone(),
                entity_type: entity.kind(),
                downstream_count: downstream,
                upstream_count: upstream,
                impact: downstream,
            })
        })
        .collect();

    results.sort_by(|a, b| b.impact.cmp(&a.impact));
    results.truncate(limit);
    results
}

/// Rank every node as an intervention point, highest priority first.
///
/// `score = downstream × (1 + in_degree)`: nodes with large downstream impact
/// where many paths converge are hardest to route around. Actions are further
/// multiplied by `2.0 − success_probability`, so unreliable steps rank higher.
/// Scores are never negative.
pub fn intervention_ranking(chain: &HybridChain) -> Vec<InterventionPoint> {
    let graph = chain.graph();
    let mut rankings: Vec<InterventionPoint> = graph
        .node_indices()
        .filter_map(|node| {
            let entity = chain.entity_at(node)?;
            let downstream = count_reachable(graph, node);
            let in_degree = chain.degree(node, Direction::Incoming);
            let out_degree = chain.degree(node, Direction::Outgoing);

            let mut score = downstream as f64 * (1 + in_degree) as f64;
            if let Some(action) = entity.as_action() {
                score *= 2.0 - action.success_probability.clamp(0.0, 1.0);
            }

            Some(InterventionPoint {
                node_id: entity.id().clone(),
                entity_type: entity.kind(),
                name: entity.name().to_string(),
                downstream_impact: downstream,
                in_degree,
                out_degree,
                score: round2(score),
            })
        })
        .collect();

    rankings.sort_by(|a, b| b.score.total_cmp(&a.score));
    rankings
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Every root-to-leaf path that passes through at least one Narrative.
///
/// Paths are simple (no repeated node). Enumeration is exponential in the
/// worst case and only suitable for small modeled operations. An isolated
/// node is both root and leaf but forms no path.
pub fn narrative_threads(chain: &HybridChain) -> Vec<Vec<EntityId>> {
    let narratives: HashSet<NodeIndex> = chain
        .get_entities_by_type(EntityKind::Narrative)
        .into_iter()
        .filter_map(|entity| chain.node_index(entity.id().as_str()))
        .collect();
    if narratives.is_empty() {
        return Vec::new();
    }

    let graph = chain.graph();
    let sources = chain.source_nodes();
    let sinks = chain.sink_nodes();

    let mut threads = Vec::new();
    for &source in &sources {
        for &sink in &sinks {
            if source == sink {
                continue;
            }
            for path in algo::all_simple_paths::<Vec<NodeIndex>, _>(graph, source, sink, 0, None) {
                if path.iter().any(|node| narratives.contains(node)) {
                    threads.push(path.into_iter().map(|node| graph[node].clone()).collect());
                }
            }
        }
    }

    tracing::debug!(chain_id = %chain.id(), threads = threads.len(), "Extracted narrative threads");
    threads
}

/// Capabilities the chain requires.
///
/// Explicit Capability entities come first, followed by every tool listed on
/// an Action (typed as tooling and attributed to that action).
pub fn capability_requirements(chain: &HybridChain) -> Vec<CapabilityRequirement> {
    let explicit = chain
        .get_entities_by_type(EntityKind::Capability)
        .into_iter()
        .filter_map(|entity| match entity {
            Entity::Capability(capability) => Some(CapabilityRequirement {
                id: capability.id.to_string(),
                name: capability.name.clone(),
                capability_type: capability.capability_type,
                source: Provenance::Entity,
            }),
            _ => None,
        });

    let implied = chain
        .get_entities_by_type(EntityKind::Action)
        .into_iter()
        .filter_map(Entity::as_action)
        .flat_map(|action| {
            action.tools.iter().map(move |tool| CapabilityRequirement {
                id: format!("{}:{tool}", action.id),
                name: tool.clone(),
                capability_type: CapabilityType::Tooling,
                source: Provenance::Action(action.id.clone()),
            })
        });

    explicit.chain(implied).collect()
}
