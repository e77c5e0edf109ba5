//! Dependency resolution: stable evaluation order + cycle detection.

use std::collections::HashMap;

use petgraph::graph::NodeIndex;

use crate::error::{codes, CompileError};
use crate::parse::graph::StrategyGraph;
use crate::validate::Node;

/// Compute the evaluation order: every node comes after all nodes with a
/// connection into it. Ties (several nodes ready at once) break by
/// declaration order in the input list, which makes repeated compiles of
/// the same graph byte-identical.
///
/// A graph with no connections is valid; the order is plain declaration
/// order.
pub fn evaluation_order<'a>(
    nodes: &'a [Node],
    graph: &StrategyGraph,
) -> Result<Vec<&'a Node>, CompileError> {
    let mut indegree: HashMap<&str, usize> = nodes
        .iter()
        .map(|n| (n.id.as_str(), graph.incoming_count(&n.id)))
        .collect();

    let mut ordered = Vec::with_capacity(nodes.len());
    let mut emitted = vec![false; nodes.len()];

    while ordered.len() < nodes.len() {
        let next =
            (0..nodes.len()).find(|&i| !emitted[i] && indegree[nodes[i].id.as_str()] == 0);

        let Some(pos) = next else {
            // Stalled: everything left sits on a cycle. Name one node on it.
            let offender = find_cycle_node(nodes, graph, &emitted);
            return Err(CompileError::structural(
                codes::CYCLIC_GRAPH,
                "cyclic graph: strategy connections must not form a loop",
                offender,
            ));
        };

        emitted[pos] = true;
        ordered.push(&nodes[pos]);
        for successor in graph.successors(&nodes[pos].id) {
            if let Some(count) = indegree.get_mut(successor) {
                *count = count.saturating_sub(1);
            }
        }
    }

    Ok(ordered)
}

#[derive(Clone, Copy, PartialEq)]
enum Color {
    White,
    Grey,
    Black,
}

/// White/grey/black DFS over the unemitted remainder; the first node seen
/// while already grey sits on a cycle.
fn find_cycle_node(
    nodes: &[Node],
    graph: &StrategyGraph,
    emitted: &[bool],
) -> Option<String> {
    let mut colors: HashMap<NodeIndex, Color> = HashMap::new();

    for (pos, node) in nodes.iter().enumerate() {
        if emitted[pos] {
            continue;
        }
        let Some(&start) = graph.node_indices.get(&node.id) else {
            continue;
        };
        if colors.get(&start).copied().unwrap_or(Color::White) != Color::White {
            continue;
        }
        if let Some(found) = dfs_cycle(graph, start, &mut colors) {
            return Some(graph.graph[found].clone());
        }
    }
    None
}

fn dfs_cycle(
    graph: &StrategyGraph,
    start: NodeIndex,
    colors: &mut HashMap<NodeIndex, Color>,
) -> Option<NodeIndex> {
    // Iterative DFS; the stack holds (node, next-neighbor cursor).
    let mut stack = vec![(start, graph.graph.neighbors(start))];
    colors.insert(start, Color::Grey);

    loop {
        let step = match stack.last_mut() {
            Some((_, neighbors)) => neighbors.next(),
            None => return None,
        };
        match step {
            Some(next) => match colors.get(&next).copied().unwrap_or(Color::White) {
                Color::Grey => return Some(next),
                Color::White => {
                    colors.insert(next, Color::Grey);
                    stack.push((next, graph.graph.neighbors(next)));
                }
                Color::Black => {}
            },
            None => {
                if let Some((node, _)) = stack.pop() {
                    colors.insert(node, Color::Black);
                }
            }
        }
    }
}
