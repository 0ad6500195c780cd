//! Longest-duration path through a chain.
//!
//! Every node weighs its duration (see [`Entity::duration_hours`]) and the
//! weight is charged to the edge entering the node. A virtual super-source
//! feeds every root and every leaf drains into a virtual super-sink; with all
//! weights negated, the shortest source-to-sink path is the longest path of
//! the original graph. Bellman-Ford handles the negative weights, and the
//! graph is checked acyclic first so no negative cycle can exist.
//!
//! [`Entity::duration_hours`]: crate::domain::Entity::duration_hours

use super::HybridChain;
use crate::domain::EntityId;
use crate::error::{Error, Result};
use petgraph::algo;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

impl HybridChain {
    /// The path of maximum total duration through the chain.
    ///
    /// Returns an empty path for an empty chain. Ties between equally long
    /// paths are broken arbitrarily.
    ///
    /// If the chain has no root or no leaf, the plain execution order is
    /// returned instead. That fallback is an approximation, not a critical
    /// path; it cannot happen for a non-empty DAG and is logged when taken.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cycle`] if the chain is not a DAG.
    pub fn get_critical_path(&self) -> Result<Vec<EntityId>> {
        let order = self.get_chain()?;
        if order.is_empty() {
            return Ok(order);
        }

        let sources = self.source_nodes();
        let sinks = self.sink_nodes();
        if sources.is_empty() || sinks.is_empty() {
            tracing::warn!(
                chain_id = %self.id,
                "Chain has no root or no leaf; returning execution order instead of a critical path"
            );
            return Ok(order);
        }

        let weight = |node: NodeIndex| -> f64 {
            -self.entity_at(node).map_or(0.0, |entity| entity.duration_hours())
        };

        // Node indices are dense, so mirroring the node count keeps indices
        // aligned between the two graphs.
        let mut search: DiGraph<(), f64> = DiGraph::with_capacity(
            self.graph.node_count() + 2,
            self.graph.edge_count() + sources.len() + sinks.len(),
        );
        for _ in self.graph.node_indices() {
            search.add_node(());
        }
        let super_source = search.add_node(());
        let super_sink = search.add_node(());

        for edge in self.graph.edge_references() {
            search.add_edge(edge.source(), edge.target(), weight(edge.target()));
        }
        for &root in &sources {
            search.add_edge(super_source, root, weight(root));
        }
        for &leaf in &sinks {
            search.add_edge(leaf, super_sink, 0.0);
        }

        let paths = algo::bellman_ford(&search, super_source).map_err(|_| Error::Cycle {
            node: self.graph[sources[0]].clone(),
        })?;

        let mut path = Vec::new();
        let mut current = paths.predecessors[super_sink.index()];
        while let Some(node) = current {
            if node == super_source {
                break;
            }
            path.push(self.graph[node].clone());
            current = paths.predecessors[node.index()];
        }
        path.reverse();

        tracing::debug!(
            chain_id = %self.id,
            length = path.len(),
            hours = -paths.distances[super_sink.index()],
            "Computed critical path"
        );
        Ok(path)
    }

    /// Total duration in hours of the entities along a path.
    ///
    /// Unknown ids contribute nothing.
    pub fn path_duration(&self, path: &[EntityId]) -> f64 {
        path.iter()
            .filter_map(|id| self.get_entity(id.as_str()))
            .map(|entity| entity.duration_hours())
            .sum()
    }
}
