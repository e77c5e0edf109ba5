//! Logic nodes → condition fragments.
//!
//! Operand wiring: handle `"a"` is the primary operand, `"b"` the
//! secondary. An unwired `a` falls back to the close-price series (the
//! editor's "Price > SMA" pattern wires only `b`); an unwired `b` falls
//! back to the node's literal `value` parameter. Logical combinators
//! (`and`/`or`) take two upstream conditions instead and may chain to any
//! depth.

use std::collections::HashMap;

use crate::error::{codes, CompileError};
use crate::ir::{sanitize_identifier, BoolExpr, BoolOp, CompareOp, ConditionFragment, CrossDirection, Operand};
use crate::mapper::Produced;
use crate::parse::graph::StrategyGraph;
use crate::validate::Node;

pub(crate) fn map(
    node: &Node,
    graph: &StrategyGraph,
    produced: &HashMap<&str, Produced>,
) -> Result<ConditionFragment, CompileError> {
    let operator = node
        .param("operator")
        .as_text()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let expr = match operator.as_str() {
        "<" => compare(node, graph, produced, CompareOp::Lt)?,
        ">" => compare(node, graph, produced, CompareOp::Gt)?,
        "<=" => compare(node, graph, produced, CompareOp::Le)?,
        ">=" => compare(node, graph, produced, CompareOp::Ge)?,
        "==" => compare(node, graph, produced, CompareOp::Eq)?,
        "!=" => compare(node, graph, produced, CompareOp::Ne)?,
        "crossover" => cross(node, graph, produced, CrossDirection::Over)?,
        "crossunder" => cross(node, graph, produced, CrossDirection::Under)?,
        "and" => combine(node, graph, produced, BoolOp::And)?,
        "or" => combine(node, graph, produced, BoolOp::Or)?,
        other => {
            return Err(CompileError::semantic(
                codes::UNKNOWN_OPERATOR,
                format!("unknown logic operator '{}'", other),
                Some(node.id.clone()),
            ));
        }
    };

    Ok(ConditionFragment {
        var: sanitize_identifier(&node.id),
        expr,
        label: node.label.clone(),
    })
}

fn compare(
    node: &Node,
    graph: &StrategyGraph,
    produced: &HashMap<&str, Produced>,
    op: CompareOp,
) -> Result<BoolExpr, CompileError> {
    Ok(BoolExpr::Compare {
        op,
        lhs: primary_operand(node, graph, produced)?,
        rhs: secondary_operand(node, graph, produced)?,
    })
}

fn cross(
    node: &Node,
    graph: &StrategyGraph,
    produced: &HashMap<&str, Produced>,
    direction: CrossDirection,
) -> Result<BoolExpr, CompileError> {
    // Cross detection needs two resolved numeric operands; the directional
    // construct must never degrade into a plain comparison.
    Ok(BoolExpr::Cross {
        direction,
        lhs: primary_operand(node, graph, produced)?,
        rhs: secondary_operand(node, graph, produced)?,
    })
}

fn combine(
    node: &Node,
    graph: &StrategyGraph,
    produced: &HashMap<&str, Produced>,
    op: BoolOp,
) -> Result<BoolExpr, CompileError> {
    Ok(BoolExpr::Combine {
        op,
        lhs: condition_operand(node, graph, produced, "a")?,
        rhs: condition_operand(node, graph, produced, "b")?,
    })
}

/// Operand `a`: the wired series, or the close price when unwired or
/// anchored on an Input node.
fn primary_operand(
    node: &Node,
    graph: &StrategyGraph,
    produced: &HashMap<&str, Produced>,
) -> Result<Operand, CompileError> {
    match graph.input_on_port(&node.id, "a") {
        Some(source) => numeric_source(node, source, produced),
        None => Ok(Operand::Price),
    }
}

/// Operand `b`: the wired series, else the literal `value` parameter.
fn secondary_operand(
    node: &Node,
    graph: &StrategyGraph,
    produced: &HashMap<&str, Produced>,
) -> Result<Operand, CompileError> {
    if let Some(source) = graph.input_on_port(&node.id, "b") {
        return numeric_source(node, source, produced);
    }
    if let Some(value) = node.number_param("value") {
        return Ok(Operand::Const(value));
    }
    Err(CompileError::semantic(
        codes::UNRESOLVED_OPERAND,
        "unresolved operand: wire input 'b' or set a numeric 'value' parameter",
        Some(node.id.clone()),
    ))
}

fn numeric_source(
    node: &Node,
    source: &str,
    produced: &HashMap<&str, Produced>,
) -> Result<Operand, CompileError> {
    match produced.get(source) {
        Some(Produced::Series(var)) => Ok(Operand::Series(var.clone())),
        Some(Produced::Anchor) => Ok(Operand::Price),
        Some(Produced::Condition(_)) | None => Err(CompileError::semantic(
            codes::UNRESOLVED_OPERAND,
            format!("operand source '{}' does not produce a numeric series", source),
            Some(node.id.clone()),
        )),
    }
}

fn condition_operand(
    node: &Node,
    graph: &StrategyGraph,
    produced: &HashMap<&str, Produced>,
    port: &str,
) -> Result<String, CompileError> {
    let source = graph.input_on_port(&node.id, port).ok_or_else(|| {
        CompileError::semantic(
            codes::UNRESOLVED_OPERAND,
            format!("logical operator requires a condition wired to input '{}'", port),
            Some(node.id.clone()),
        )
    })?;
    match produced.get(source) {
        Some(Produced::Condition(var)) => Ok(var.clone()),
        _ => Err(CompileError::semantic(
            codes::UNRESOLVED_OPERAND,
            format!("operand source '{}' does not produce a condition", source),
            Some(node.id.clone()),
        )),
    }
}
