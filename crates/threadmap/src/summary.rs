//! Every analysis query over a chain, gathered into one serializable value.

use serde::Serialize;
use threadmap_core::HybridChain;
use threadmap_core::analysis::{
    CapabilityRequirement, Chokepoint, InterventionPoint, capability_requirements,
    find_chokepoints, intervention_ranking, narrative_threads,
};
use threadmap_core::domain::EntityId;

/// The longest-duration path and its length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalPath {
    /// Entity ids from root to leaf
    pub path: Vec<EntityId>,
    /// Sum of action durations along the path
    pub total_hours: f64,
}

/// Output of the `analyze` command.
///
/// Ordering results are `None` when the chain has a cycle; the impact
/// queries do not need an order and are always present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainAnalysis {
    /// Chain identifier
    pub chain_id: String,
    /// Chain name
    pub name: String,
    /// Number of entities
    pub entity_count: usize,
    /// Number of relationships
    pub relationship_count: usize,
    /// Whether the chain is acyclic
    pub is_valid_dag: bool,
    /// Topological execution order
    pub execution_order: Option<Vec<EntityId>>,
    /// Longest-duration path
    pub critical_path: Option<CriticalPath>,
    /// Highest-impact nodes
    pub chokepoints: Vec<Chokepoint>,
    /// All nodes ranked as intervention points
    pub interventions: Vec<InterventionPoint>,
    /// Root-to-leaf paths through a narrative
    pub narrative_threads: Vec<Vec<EntityId>>,
    /// What the operation needs
    pub capabilities: Vec<CapabilityRequirement>,
}

impl ChainAnalysis {
    /// Run every query against `chain`.
    pub fn compute(chain: &HybridChain, chokepoint_limit: usize) -> Self {
        let execution_order = chain
            .get_chain()
            .inspect_err(|e| tracing::warn!(chain_id = %chain.id(), error = %e, "No execution order"))
            .ok();
        let critical_path = chain
            .get_critical_path()
            .inspect_err(|e| tracing::warn!(chain_id = %chain.id(), error = %e, "No critical path"))
            .ok()
            .map(|path| CriticalPath {
                total_hours: chain.path_duration(&path),
                path,
            });

        Self {
            chain_id: chain.id().to_string(),
            name: chain.name().to_string(),
            entity_count: chain.entity_count(),
            relationship_count: chain.relationship_count(),
            is_valid_dag: chain.is_valid_dag(),
            execution_order,
            critical_path,
            chokepoints: find_chokepoints(chain, chokepoint_limit),
            interventions: intervention_ranking(chain),
            narrative_threads: narrative_threads(chain),
            capabilities: capability_requirements(chain),
        }
    }
}
