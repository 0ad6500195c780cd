//! In-memory chain store using HashMap and petgraph.
//!
//! [`HybridChain`] owns every entity and relationship of one modeled
//! operation and exposes the ordering queries that depend on the graph being
//! acyclic.
//!
//! # Architecture
//!
//! - `HashMap<EntityId, Entity>` for O(1) entity lookups
//! - `petgraph::DiGraph<EntityId, Relationship>` for topology
//! - `HashMap<EntityId, NodeIndex>` for mapping entities to graph nodes
//! - `HashMap<EntityKind, Vec<EntityId>>` so type filtering only touches
//!   matching entities
//!
//! Nodes are never removed, so node indices stay dense and follow insertion
//! order. Every enumeration (entities, relationships, per-kind lists) is in
//! insertion order.
//!
//! ## Edge Direction Convention
//!
//! Edges point in execution order: `source -> target` means the source comes
//! first (an actor triggers an action, a capability enables it, an action
//! leads to an effect). There is at most one edge per ordered pair; adding a
//! second relationship between the same endpoints replaces the stored one.
//!
//! # Usage Discipline
//!
//! Insertion takes `&mut self` and every query takes `&self`, so the borrow
//! checker enforces "all writes, then any number of readers". No query
//! caches anything between calls.

mod critical_path;

use crate::domain::{Entity, EntityId, EntityKind, Relationship};
use crate::error::{Endpoint, Error, Result};
use petgraph::Direction;
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, IntoNeighbors, Reversed, Visitable};
use std::collections::HashMap;

/// A directed graph representing one hybrid operation.
#[derive(Debug, Clone)]
pub struct HybridChain {
    /// Chain identifier
    id: String,

    /// Display name
    name: String,

    /// Free-text summary
    description: String,

    /// Entities indexed by ID for O(1) lookups
    entities: HashMap<EntityId, Entity>,

    /// Topology. Node weights are entity ids, edge weights the relationship.
    graph: DiGraph<EntityId, Relationship>,

    /// Mapping from EntityId to graph NodeIndex.
    ///
    /// Every key of `entities` has an entry here.
    node_map: HashMap<EntityId, NodeIndex>,

    /// Entity ids grouped by kind, in insertion order
    by_kind: HashMap<EntityKind, Vec<EntityId>>,
}

impl HybridChain {
    /// Create an empty chain
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            entities: HashMap::new(),
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            by_kind: HashMap::new(),
        }
    }

    /// Chain identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text summary
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Add an entity as a node.
    ///
    /// An entity whose id is already present replaces the existing one and
    /// keeps its position and edges; the displaced entity is returned so the
    /// caller can tell an insert from an overwrite.
    pub fn add_entity(&mut self, entity: impl Into<Entity>) -> Option<Entity> {
        let entity = entity.into();
        let id = entity.id().clone();
        let kind = entity.kind();

        if !self.node_map.contains_key(&id) {
            let node = self.graph.add_node(id.clone());
            self.node_map.insert(id.clone(), node);
        }

        let previous = self.entities.insert(id.clone(), entity);

        match &previous {
            Some(old) if old.kind() == kind => {}
            Some(old) => {
                if let Some(ids) = self.by_kind.get_mut(&old.kind()) {
                    ids.retain(|existing| existing != &id);
                }
                self.by_kind.entry(kind).or_default().push(id.clone());
            }
            None => self.by_kind.entry(kind).or_default().push(id.clone()),
        }

        if let Some(old) = &previous {
            tracing::warn!(
                entity_id = %id,
                old_kind = %old.kind(),
                new_kind = %kind,
                "Entity id already in chain, replacing existing entity"
            );
        } else {
            tracing::debug!(entity_id = %id, kind = %kind, "Added entity");
        }

        previous
    }

    /// Add a directed edge between two entities already in the chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEntity`] if either endpoint is missing; the
    /// relationship is not stored.
    pub fn add_relationship(&mut self, rel: Relationship) -> Result<()> {
        let source = self.node_index(rel.source_id.as_str()).ok_or_else(|| {
            Error::UnknownEntity {
                endpoint: Endpoint::Source,
                id: rel.source_id.clone(),
            }
        })?;
        let target = self.node_index(rel.target_id.as_str()).ok_or_else(|| {
            Error::UnknownEntity {
                endpoint: Endpoint::Target,
                id: rel.target_id.clone(),
            }
        })?;

        tracing::debug!(
            source = %rel.source_id,
            target = %rel.target_id,
            edge_type = %rel.edge_type,
            "Added relationship"
        );
        self.graph.update_edge(source, target, rel);
        Ok(())
    }

    /// Look up an entity by id
    pub fn get_entity(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Whether an entity with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// All entities of one kind, in insertion order
    pub fn get_entities_by_type(&self, kind: EntityKind) -> Vec<&Entity> {
        self.by_kind
            .get(&kind)
            .map(|ids| ids.iter().filter_map(|id| self.entities.get(id)).collect())
            .unwrap_or_default()
    }

    /// All entities, in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.graph
            .node_weights()
            .filter_map(|id| self.entities.get(id))
    }

    /// All relationships, in insertion order
    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> + '_ {
        self.graph.edge_weights()
    }

    /// Number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of relationships
    pub fn relationship_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the chain has no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of relationships pointing at an entity
    pub fn in_degree(&self, id: &str) -> Option<usize> {
        self.node_index(id).map(|node| self.degree(node, Direction::Incoming))
    }

    /// Number of relationships leaving an entity
    pub fn out_degree(&self, id: &str) -> Option<usize> {
        self.node_index(id).map(|node| self.degree(node, Direction::Outgoing))
    }

    /// Whether the chain is free of cycles (self-loops count as cycles).
    pub fn is_valid_dag(&self) -> bool {
        !algo::is_cyclic_directed(&self.graph)
    }

    /// Every entity id in execution order.
    ///
    /// For each relationship `u -> v`, `u` precedes `v`. The order is
    /// deterministic for a given insertion order but otherwise any valid
    /// topological order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cycle`] if the chain is not a DAG.
    pub fn get_chain(&self) -> Result<Vec<EntityId>> {
        let order = algo::toposort(&self.graph, None).map_err(|cycle| Error::Cycle {
            node: self.graph[cycle.node_id()].clone(),
        })?;
        Ok(order.into_iter().map(|node| self.graph[node].clone()).collect())
    }

    /// Number of entities reachable by following outgoing edges
    pub fn descendant_count(&self, id: &str) -> Option<usize> {
        self.node_index(id)
            .map(|node| count_reachable(&self.graph, node))
    }

    /// Number of entities that can reach this one
    pub fn ancestor_count(&self, id: &str) -> Option<usize> {
        self.node_index(id)
            .map(|node| count_reachable(Reversed(&self.graph), node))
    }

    /// How many downstream entities depend on this one.
    ///
    /// Higher means a more impactful intervention point. `None` if the id is
    /// not in the chain.
    pub fn intervention_score(&self, id: &str) -> Option<usize> {
        self.descendant_count(id)
    }

    pub(crate) fn graph(&self) -> &DiGraph<EntityId, Relationship> {
        &self.graph
    }

    pub(crate) fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_map.get(id).copied()
    }

    pub(crate) fn degree(&self, node: NodeIndex, direction: Direction) -> usize {
        self.graph.edges_directed(node, direction).count()
    }

    /// Nodes with no incoming edges, in insertion order
    pub(crate) fn source_nodes(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&node| self.degree(node, Direction::Incoming) == 0)
            .collect()
    }

    /// Nodes with no outgoing edges, in insertion order
    pub(crate) fn sink_nodes(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&node| self.degree(node, Direction::Outgoing) == 0)
            .collect()
    }

    pub(crate) fn entity_at(&self, node: NodeIndex) -> Option<&Entity> {
        self.entities.get(&self.graph[node])
    }
}

/// Count nodes reachable from `start`, excluding `start` itself.
pub(crate) fn count_reachable<G>(graph: G, start: G::NodeId) -> usize
where
    G: IntoNeighbors + Visitable,
{
    let mut dfs = Dfs::new(graph, start);
    let mut seen = 0usize;
    while dfs.next(graph).is_some() {
        seen += 1;
    }
    seen.saturating_sub(1)
}
