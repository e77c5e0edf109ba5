//! Action nodes → entry fragments with optional exit offsets.

use std::collections::HashMap;

use crate::error::{codes, CompileError};
use crate::ir::{ActionFragment, TradeDirection};
use crate::mapper::Produced;
use crate::parse::graph::{StrategyGraph, DEFAULT_HANDLE};
use crate::validate::{Node, Param};

pub(crate) fn map(
    node: &Node,
    graph: &StrategyGraph,
    produced: &HashMap<&str, Produced>,
) -> Result<ActionFragment, CompileError> {
    let direction = match node.param("actionType").as_text() {
        Some(t) if t.eq_ignore_ascii_case("buy") => TradeDirection::Buy,
        Some(t) if t.eq_ignore_ascii_case("sell") => TradeDirection::Sell,
        other => {
            return Err(CompileError::semantic(
                codes::INVALID_ACTION,
                format!("invalid actionType '{}': expected 'buy' or 'sell'", other.unwrap_or("")),
                Some(node.id.clone()),
            ));
        }
    };

    let source = graph
        .input_on_port(&node.id, DEFAULT_HANDLE)
        .ok_or_else(|| missing_condition(node))?;
    let condition_var = match produced.get(source) {
        Some(Produced::Condition(var)) => var.clone(),
        _ => return Err(missing_condition(node)),
    };

    Ok(ActionFragment {
        direction,
        condition_var,
        stop_loss: exit_offset(node.param("stopLoss")),
        take_profit: exit_offset(node.param("takeProfit")),
        label: node.label.clone(),
    })
}

fn missing_condition(node: &Node) -> CompileError {
    CompileError::semantic(
        codes::MISSING_CONDITION,
        "action node has no gating condition: wire a logic node into its input",
        Some(node.id.clone()),
    )
}

/// An explicit numeric offset, zero included, emits an exit; the unset
/// sentinel emits none.
fn exit_offset(param: &Param) -> Option<f64> {
    param.as_number()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::{Connection, RawNode, Strategy};
    use crate::validate::NodeKind;

    fn action_node(id: &str, params: &[(&str, Param)]) -> Node {
        Node {
            id: id.into(),
            kind: NodeKind::Action,
            label: "Buy".into(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    fn gated_graph() -> StrategyGraph {
        let s = Strategy {
            name: "t".into(),
            nodes: ["logic-1", "buy-1"]
                .iter()
                .map(|id| RawNode {
                    id: (*id).into(),
                    node_type: "logic".into(),
                    name: "n".into(),
                    parameters: Default::default(),
                    position: Default::default(),
                })
                .collect(),
            connections: vec![Connection {
                source: "logic-1".into(),
                target: "buy-1".into(),
                source_handle: None,
                target_handle: Some("default".into()),
            }],
        };
        StrategyGraph::build(&s).unwrap()
    }

    fn gating() -> HashMap<&'static str, Produced> {
        let mut produced = HashMap::new();
        produced.insert("logic-1", Produced::Condition("logic_1".into()));
        produced
    }

    #[test]
    fn buy_with_offsets() {
        let node = action_node(
            "buy-1",
            &[
                ("actionType", Param::Text("buy".into())),
                ("stopLoss", Param::Number(1.5)),
                ("takeProfit", Param::Number(3.0)),
            ],
        );
        let fragment = map(&node, &gated_graph(), &gating()).unwrap();
        assert_eq!(fragment.direction, TradeDirection::Buy);
        assert_eq!(fragment.condition_var, "logic_1");
        assert_eq!(fragment.stop_loss, Some(1.5));
        assert_eq!(fragment.take_profit, Some(3.0));
    }

    #[test]
    fn unset_offsets_emit_no_exit() {
        let node = action_node(
            "buy-1",
            &[
                ("actionType", Param::Text("buy".into())),
                ("stopLoss", Param::Unset),
            ],
        );
        let fragment = map(&node, &gated_graph(), &gating()).unwrap();
        assert_eq!(fragment.stop_loss, None);
        assert_eq!(fragment.take_profit, None);
    }

    #[test]
    fn zero_offset_is_a_real_offset() {
        let node = action_node(
            "buy-1",
            &[
                ("actionType", Param::Text("buy".into())),
                ("stopLoss", Param::Number(0.0)),
            ],
        );
        let fragment = map(&node, &gated_graph(), &gating()).unwrap();
        assert_eq!(fragment.stop_loss, Some(0.0));
    }

    #[test]
    fn ungated_action_rejected() {
        let s = Strategy {
            name: "t".into(),
            nodes: vec![RawNode {
                id: "buy-1".into(),
                node_type: "action".into(),
                name: "Buy".into(),
                parameters: Default::default(),
                position: Default::default(),
            }],
            connections: vec![],
        };
        let graph = StrategyGraph::build(&s).unwrap();
        let node = action_node("buy-1", &[("actionType", Param::Text("buy".into()))]);
        let err = map(&node, &graph, &HashMap::new()).unwrap_err();
        assert_eq!(err.code(), "M005");
    }

    #[test]
    fn sell_direction_parsed() {
        let node = action_node("buy-1", &[("actionType", Param::Text("sell".into()))]);
        let fragment = map(&node, &gated_graph(), &gating()).unwrap();
        assert_eq!(fragment.direction, TradeDirection::Sell);
    }

    #[test]
    fn missing_action_type_rejected() {
        let node = action_node("buy-1", &[]);
        let err = map(&node, &gated_graph(), &gating()).unwrap_err();
        assert_eq!(err.code(), "M006");
    }
}
