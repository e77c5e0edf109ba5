//! Fragment types: the platform-agnostic output of the semantic mapper.
//!
//! One fragment per computing node, in evaluation order. Emitters render
//! these into concrete target syntax; nothing here mentions any target
//! platform. Fragments live for one compile call and are never persisted.

use serde::{Deserialize, Serialize};

/// The compiled meaning of one node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Fragment {
    Indicator(IndicatorFragment),
    Condition(ConditionFragment),
    Action(ActionFragment),
}

/// An indicator declaration bound to a deterministic identifier, plus
/// presentation hints for emitters that draw charts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorFragment {
    /// Sanitized from the node id, so two instances of the same catalog
    /// entry never collide.
    pub var: String,
    pub call: IndicatorCall,
    pub plot: PlotHint,
    /// Display label, used only for generated comments and plot titles.
    pub label: String,
}

/// Catalog indicator + resolved numeric parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IndicatorCall {
    Rsi { period: f64 },
    Sma { period: f64 },
    Ema { period: f64 },
    Wma { period: f64 },
    Macd { fast: f64, slow: f64, signal: f64 },
    Atr { period: f64 },
}

/// How the primary (chart-capable) target should present an indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PlotHint {
    /// Drawn on the price chart; successive instances get successive
    /// styles so two otherwise-identical lines stay distinguishable.
    Overlay { style: LineStyle },
    /// Drawn in its own pane with fixed reference levels (e.g. RSI 70/30).
    Oscillator { upper: f64, lower: f64 },
    /// Drawn in its own pane without reference levels.
    Pane,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Tint,
    pub width: u32,
}

/// Abstract color names; each emitter maps them to its own palette syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Blue,
    Orange,
    Purple,
    Teal,
}

/// A boolean condition bound to a deterministic identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionFragment {
    pub var: String,
    pub expr: BoolExpr,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BoolExpr {
    /// Plain relational comparison between two series/scalar operands.
    Compare {
        op: CompareOp,
        lhs: Operand,
        rhs: Operand,
    },
    /// Directional cross detection. Never collapses to a comparison: the
    /// direction must survive into emitted output.
    Cross {
        direction: CrossDirection,
        lhs: Operand,
        rhs: Operand,
    },
    /// Combination of two upstream conditions, referenced by variable.
    Combine {
        op: BoolOp,
        lhs: String,
        rhs: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossDirection {
    Over,
    Under,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolOp {
    And,
    Or,
}

/// A numeric operand of a condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// An upstream indicator's bound identifier.
    Series(String),
    /// The market close-price series.
    Price,
    /// A literal threshold from the node's `value` parameter.
    Const(f64),
}

/// A trade action gated on an upstream condition, with optional exit
/// offsets. `stop_loss`/`take_profit` hold `Some(0.0)` for an explicit
/// zero offset and `None` only when the parameter was absent or unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionFragment {
    pub direction: TradeDirection,
    /// Variable of the gating condition fragment.
    pub condition_var: String,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Buy,
    Sell,
}

/// Sanitize a node id into a target-safe identifier: every run of
/// non-alphanumeric characters becomes `_`, and a leading digit gets a
/// `_` prefix.
pub fn sanitize_identifier(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 1);
    if id.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.push('_');
    }
    for c in id.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.push('_');
        }
    }
    out
}
