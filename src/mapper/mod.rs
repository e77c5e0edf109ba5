//! Semantic mapping phase: ordered nodes → platform-agnostic fragments.
//!
//! This is where the compiler's domain knowledge lives: indicator
//! formulas, operator arity, entry/exit rules. Each node maps to at most
//! one fragment; Input and Output nodes are pure anchors and map to none.

pub mod action;
pub mod indicator;
pub mod logic;

use std::collections::HashMap;

use crate::error::CompileError;
use crate::ir::Fragment;
use crate::parse::graph::StrategyGraph;
use crate::validate::{Node, NodeKind};

/// What an already-mapped node contributes to its downstream consumers.
#[derive(Debug, Clone)]
pub(crate) enum Produced {
    /// A numeric series bound to an identifier (indicator output).
    Series(String),
    /// A boolean bound to an identifier (logic output).
    Condition(String),
    /// An anchor with no value of its own (Input node); consumers reading
    /// it fall back to the price series.
    Anchor,
}

/// Map every node, in resolved order, aborting on the first unresolved
/// one. The returned fragments preserve evaluation order.
pub fn map_nodes(
    ordered: &[&Node],
    graph: &StrategyGraph,
) -> Result<Vec<Fragment>, CompileError> {
    let mut produced: HashMap<&str, Produced> = HashMap::new();
    let mut fragments = Vec::new();
    // Counts overlay-plotted indicators so successive instances pick
    // successive line styles.
    let mut overlay_seq = 0usize;

    for node in ordered {
        match node.kind {
            NodeKind::Input => {
                produced.insert(node.id.as_str(), Produced::Anchor);
            }
            NodeKind::Output => {
                // Terminal marker; nothing downstream can consume it.
            }
            NodeKind::Indicator => {
                let (fragment, series) = indicator::map(node, &mut overlay_seq)?;
                produced.insert(node.id.as_str(), Produced::Series(series));
                fragments.push(Fragment::Indicator(fragment));
            }
            NodeKind::Logic => {
                let fragment = logic::map(node, graph, &produced)?;
                produced.insert(node.id.as_str(), Produced::Condition(fragment.var.clone()));
                fragments.push(Fragment::Condition(fragment));
            }
            NodeKind::Action => {
                let fragment = action::map(node, graph, &produced)?;
                fragments.push(Fragment::Action(fragment));
            }
        }
    }

    Ok(fragments)
}
