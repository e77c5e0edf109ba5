//! Graph-level structural rules (S001–S003).
//!
//! Cycle detection (S004) lives in the resolver, where the coloring pass
//! runs as part of the dependency sort.

use std::collections::HashSet;

use crate::error::{codes, CompileError};
use crate::parse::types::Strategy;

/// S001/S002: every node needs a non-empty id, unique within the graph.
pub fn check_ids(strategy: &Strategy) -> Result<(), CompileError> {
    let mut seen = HashSet::new();
    for (index, node) in strategy.nodes.iter().enumerate() {
        if node.id.trim().is_empty() {
            return Err(CompileError::structural(
                codes::MISSING_ID,
                format!("node at position {} is missing an id", index),
                None,
            ));
        }
        if !seen.insert(node.id.as_str()) {
            return Err(CompileError::structural(
                codes::DUPLICATE_ID,
                format!("duplicate node id '{}'", node.id),
                Some(node.id.clone()),
            ));
        }
    }
    Ok(())
}

/// S003: both connection endpoints must reference declared nodes.
pub fn check_endpoints(strategy: &Strategy) -> Result<(), CompileError> {
    let ids: HashSet<&str> = strategy.nodes.iter().map(|n| n.id.as_str()).collect();
    for conn in &strategy.connections {
        if !ids.contains(conn.source.as_str()) {
            return Err(CompileError::structural(
                codes::DANGLING_ENDPOINT,
                format!("connection references unknown source node '{}'", conn.source),
                None,
            ));
        }
        if !ids.contains(conn.target.as_str()) {
            return Err(CompileError::structural(
                codes::DANGLING_ENDPOINT,
                format!("connection references unknown target node '{}'", conn.target),
                None,
            ));
        }
    }
    Ok(())
}
