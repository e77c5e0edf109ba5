//! Validation phase: raw editor nodes → normalized, closed-model nodes.
//!
//! Everything downstream (resolver, mapper, emitters) works on the
//! normalized `Node` list produced here; no free-form category string or
//! stringly numeric parameter survives this phase.

pub mod nodes;
pub mod structural;

pub use nodes::{Node, NodeKind, Param};

use crate::error::CompileError;
use crate::parse::types::Strategy;

/// Normalize and validate the whole strategy, failing fast on the first
/// error found. Structural checks (ids, endpoints) run before semantic
/// ones (categories), so a missing id is always reported ahead of an
/// invalid category.
pub fn validate(strategy: &Strategy) -> Result<Vec<Node>, CompileError> {
    structural::check_ids(strategy)?;
    structural::check_endpoints(strategy)?;
    strategy.nodes.iter().map(nodes::normalize).collect()
}
