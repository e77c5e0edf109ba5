//! petgraph-based directed graph wrapper for the strategy.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::Strategy;
use crate::error::{codes, CompileError};

/// The handle name an edge without an explicit target handle attaches to.
pub const DEFAULT_HANDLE: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLabel {
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

impl EdgeLabel {
    /// The inbound port this edge attaches to. `None` and `""` collapse
    /// onto the default port.
    pub fn target_port(&self) -> &str {
        match self.target_handle.as_deref() {
            None | Some("") => DEFAULT_HANDLE,
            Some(h) => h,
        }
    }
}

#[derive(Debug)]
pub struct StrategyGraph {
    pub graph: DiGraph<String, EdgeLabel>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl StrategyGraph {
    pub fn build(strategy: &Strategy) -> Result<Self, CompileError> {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();

        for node in &strategy.nodes {
            let id = node.id.clone();
            let idx = graph.add_node(id.clone());
            node_indices.insert(id, idx);
        }

        for conn in &strategy.connections {
            let source_idx = node_indices.get(&conn.source);
            let target_idx = node_indices.get(&conn.target);

            match (source_idx, target_idx) {
                (Some(&s), Some(&t)) => {
                    graph.add_edge(
                        s,
                        t,
                        EdgeLabel {
                            source_handle: conn.source_handle.clone(),
                            target_handle: conn.target_handle.clone(),
                        },
                    );
                }
                (None, _) => {
                    return Err(CompileError::structural(
                        codes::DANGLING_ENDPOINT,
                        format!("connection references unknown source node '{}'", conn.source),
                        None,
                    ));
                }
                (_, None) => {
                    return Err(CompileError::structural(
                        codes::DANGLING_ENDPOINT,
                        format!("connection references unknown target node '{}'", conn.target),
                        None,
                    ));
                }
            }
        }

        Ok(StrategyGraph { graph, node_indices })
    }

    /// Inbound `(source_id, label)` pairs for a node, in connection
    /// declaration order. Declaration order matters: when two edges land on
    /// the same port, the first declared one wins, deterministically.
    pub fn inputs(&self, node_id: &str) -> Vec<(&str, &EdgeLabel)> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, petgraph::Direction::Incoming)
            .collect();
        edges.sort_by_key(|e| e.id());
        edges
            .into_iter()
            .map(|e| (self.graph[e.source()].as_str(), e.weight()))
            .collect()
    }

    /// The source node wired to a named inbound port, if any.
    pub fn input_on_port(&self, node_id: &str, port: &str) -> Option<&str> {
        self.inputs(node_id)
            .into_iter()
            .find(|(_, label)| label.target_port() == port)
            .map(|(source, _)| source)
    }

    pub fn successors(&self, node_id: &str) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return vec![];
        };
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect()
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return 0;
        };
        self.graph
            .edges_directed(idx, petgraph::Direction::Incoming)
            .count()
    }
}
