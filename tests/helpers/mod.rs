use std::collections::HashMap;

use alphastrat_compiler::parse::{Connection, Position, RawNode, RawParam, Strategy};

// =============================================================================
// Strategy builders
// =============================================================================

pub fn strategy(name: &str, nodes: Vec<RawNode>, connections: Vec<Connection>) -> Strategy {
    Strategy {
        name: name.into(),
        nodes,
        connections,
    }
}

pub fn node(id: &str, node_type: &str, name: &str) -> RawNode {
    RawNode {
        id: id.into(),
        node_type: node_type.into(),
        name: name.into(),
        parameters: HashMap::new(),
        position: Position::default(),
    }
}

pub fn node_with_params(
    id: &str,
    node_type: &str,
    name: &str,
    params: Vec<(&str, Option<RawParam>)>,
) -> RawNode {
    let mut n = node(id, node_type, name);
    n.parameters = params
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    n
}

pub fn num(value: f64) -> Option<RawParam> {
    Some(RawParam::Number(value))
}

pub fn text(value: &str) -> Option<RawParam> {
    Some(RawParam::Text(value.into()))
}

// =============================================================================
// Connection builders
// =============================================================================

pub fn connect(source: &str, target: &str) -> Connection {
    Connection {
        source: source.into(),
        target: target.into(),
        source_handle: None,
        target_handle: None,
    }
}

pub fn connect_to(source: &str, target: &str, target_handle: &str) -> Connection {
    Connection {
        source: source.into(),
        target: target.into(),
        source_handle: None,
        target_handle: Some(target_handle.into()),
    }
}

// =============================================================================
// Common graph shapes
// =============================================================================

/// RSI(14) < 30 feeding a buy action, the smallest useful strategy.
pub fn rsi_buy_strategy() -> Strategy {
    strategy(
        "RSI Dip Buy",
        vec![
            node_with_params("rsi-1", "indicator", "RSI", vec![("period", num(14.0))]),
            node_with_params(
                "logic-1",
                "logic",
                "RSI < 30",
                vec![("operator", text("<")), ("value", num(30.0))],
            ),
            node_with_params("buy-1", "action", "Buy", vec![("actionType", text("buy"))]),
        ],
        vec![
            connect_to("rsi-1", "logic-1", "a"),
            connect("logic-1", "buy-1"),
        ],
    )
}
