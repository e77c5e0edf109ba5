//! End-to-end pipeline tests: parse → validate → resolve → map → emit.

mod helpers;

use alphastrat_compiler::error::CompileError;
use alphastrat_compiler::{compile, compile_json};

#[test]
fn rsi_fixture_compiles_to_pinescript() {
    let json = include_str!("fixtures/rsi_strategy.json");
    let out = compile_json(json, "pinescript").unwrap();
    assert_eq!(out.language, "pinescript");
    assert!(out.code.starts_with("//@version=5"));
    assert!(out.code.contains("strategy('Test RSI Strategy', overlay=true)"));
    assert!(out.code.contains("rsi_1 = ta.rsi(close, 14)"));
    assert!(out.code.contains("logic_1 = rsi_1 < 30"));
    assert!(out.code.contains("if (logic_1)"));
    assert!(out.code.contains("strategy.entry('Long', strategy.long)"));
}

#[test]
fn compilation_is_deterministic() {
    let json = include_str!("fixtures/rsi_strategy.json");
    let first = compile_json(json, "pinescript").unwrap();
    let second = compile_json(json, "pinescript").unwrap();
    assert_eq!(first.code, second.code);

    // Same graph built programmatically produces the same evaluation order.
    let strategy = helpers::rsi_buy_strategy();
    let a = compile(&strategy, "pinescript").unwrap();
    let b = compile(&strategy, "pinescript").unwrap();
    assert_eq!(a.code, b.code);
}

#[test]
fn every_target_accepts_the_minimal_graph() {
    let strategy = helpers::strategy("Tiny", vec![helpers::node("start", "input", "Start")], vec![]);
    for target in ["pinescript", "csharp", "mql"] {
        let out = compile(&strategy, target).unwrap();
        assert_eq!(out.language, target);
        assert!(!out.code.is_empty());
    }
}

#[test]
fn unknown_target_is_rejected() {
    let strategy = helpers::rsi_buy_strategy();
    let err = compile(&strategy, "python").unwrap_err();
    assert_eq!(err.code(), "T001");
    assert_eq!(err.kind(), "unsupported_target");
    assert!(matches!(err, CompileError::UnsupportedTarget { ref target } if target == "python"));
}

#[test]
fn unknown_node_category_is_semantic() {
    let strategy = helpers::strategy(
        "Bad",
        vec![helpers::node("x-1", "banana", "Mystery")],
        vec![],
    );
    let err = compile(&strategy, "pinescript").unwrap_err();
    assert_eq!(err.code(), "M001");
    assert_eq!(err.kind(), "semantic");
    assert_eq!(err.node_id(), Some("x-1"));
}

#[test]
fn missing_id_reported_before_bad_category() {
    // Structural identity checks run over the whole node list before any
    // per-node normalization, so the blank id wins even though the bad
    // category appears first.
    let strategy = helpers::strategy(
        "Bad",
        vec![
            helpers::node("x-1", "banana", "Mystery"),
            helpers::node("", "indicator", "RSI"),
        ],
        vec![],
    );
    let err = compile(&strategy, "pinescript").unwrap_err();
    assert_eq!(err.code(), "S001");
}

#[test]
fn duplicate_ids_rejected() {
    let strategy = helpers::strategy(
        "Dup",
        vec![
            helpers::node("n-1", "input", "Start"),
            helpers::node("n-1", "indicator", "RSI"),
        ],
        vec![],
    );
    let err = compile(&strategy, "pinescript").unwrap_err();
    assert_eq!(err.code(), "S002");
    assert_eq!(err.node_id(), Some("n-1"));
}

#[test]
fn dangling_connection_rejected() {
    let strategy = helpers::strategy(
        "Dangling",
        vec![helpers::node("start", "input", "Start")],
        vec![helpers::connect("start", "ghost")],
    );
    let err = compile(&strategy, "pinescript").unwrap_err();
    assert_eq!(err.code(), "S003");
}

#[test]
fn cycle_rejected_and_names_an_involved_node() {
    let json = include_str!("fixtures/cycle.json");
    let err = compile_json(json, "pinescript").unwrap_err();
    assert_eq!(err.code(), "S004");
    let id = err.node_id().expect("cycle error should carry a node id");
    assert!(["logic-1", "logic-2"].contains(&id));
}

#[test]
fn chained_logic_combines_conditions() {
    let json = include_str!("fixtures/chained_logic.json");
    let code = compile_json(json, "pinescript").unwrap().code;
    assert!(code.contains("logic_1 = rsi_1 < 30"));
    // Only handle `b` is wired; the primary operand falls back to price.
    assert!(code.contains("logic_2 = close > sma_1"));
    assert!(code.contains("logic_3 = logic_1 and logic_2"));
    assert!(code.contains("if (logic_3)"));
    assert!(code.contains(
        "strategy.exit('Stop Loss', 'Long', stop=strategy.position_avg_price * (1 - 1.5 / 100))"
    ));
}

#[test]
fn empty_string_exit_levels_mean_unset() {
    let json = include_str!("fixtures/flip_strategy.json");
    let code = compile_json(json, "pinescript").unwrap().code;
    assert!(!code.contains("strategy.exit"));
}

#[test]
fn zero_stop_loss_is_not_unset() {
    let mut strategy = helpers::rsi_buy_strategy();
    strategy.nodes[2]
        .parameters
        .insert("stopLoss".into(), helpers::num(0.0));
    let code = compile(&strategy, "pinescript").unwrap().code;
    assert!(code.contains("strategy.exit('Stop Loss'"));
    assert!(code.contains("(1 - 0 / 100)"));
}

#[test]
fn numeric_string_parameters_coerce() {
    let mut strategy = helpers::rsi_buy_strategy();
    strategy.nodes[2]
        .parameters
        .insert("stopLoss".into(), helpers::text("2.5"));
    let code = compile(&strategy, "pinescript").unwrap().code;
    assert!(code.contains("(1 - 2.5 / 100)"));
}

#[test]
fn action_without_condition_input_rejected() {
    let strategy = helpers::strategy(
        "No Gate",
        vec![helpers::node_with_params(
            "buy-1",
            "action",
            "Buy",
            vec![("actionType", helpers::text("buy"))],
        )],
        vec![],
    );
    let err = compile(&strategy, "pinescript").unwrap_err();
    assert_eq!(err.code(), "M005");
    assert_eq!(err.node_id(), Some("buy-1"));
}

#[test]
fn node_suffixed_type_aliases_accepted() {
    let json = include_str!("fixtures/chained_logic.json");
    // The fixture uses indicatorNode/logicNode/actionNode throughout.
    assert!(compile_json(json, "pinescript").is_ok());
}

#[test]
fn evaluation_order_follows_declaration_order_for_ties() {
    // Two independent indicators: both are sources, so their relative
    // order comes from the node list, not from hashing.
    let strategy = helpers::strategy(
        "Two MAs",
        vec![
            helpers::node_with_params("ema-b", "indicator", "EMA", vec![("period", helpers::num(26.0))]),
            helpers::node_with_params("ema-a", "indicator", "EMA", vec![("period", helpers::num(12.0))]),
        ],
        vec![],
    );
    let code = compile(&strategy, "pinescript").unwrap().code;
    let first = code.find("ema_b = ").expect("ema_b declared");
    let second = code.find("ema_a = ").expect("ema_a declared");
    assert!(first < second);
}
