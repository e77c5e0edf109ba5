//! C# emitter, secondary target at stub fidelity.
//!
//! Emits a NinjaTrader-style strategy skeleton: indicator declarations,
//! condition booleans, entry calls and percent-based exits, without the
//! primary target's charting layer.

use super::writer::CodeWriter;
use super::{fmt_num, Emitter};
use crate::ir::*;

pub struct CSharp;

impl Emitter for CSharp {
    fn language(&self) -> &'static str {
        "csharp"
    }

    fn emit(&self, strategy_name: &str, fragments: &[Fragment]) -> String {
        let mut w = CodeWriter::new();
        w.line(&format!("// Strategy: {}", strategy_name));
        w.line("// Generated strategy skeleton.");
        w.line("using System;");
        w.blank();
        w.block_open(&format!("public class {} : StrategyBase", class_name(strategy_name)));
        w.block_open("protected override void OnBarUpdate()");

        for fragment in fragments {
            match fragment {
                Fragment::Indicator(ind) => emit_indicator(ind, &mut w),
                Fragment::Condition(cond) => {
                    w.line(&format!("bool {} = {};", cond.var, bool_expr(&cond.expr)));
                }
                Fragment::Action(action) => emit_action(action, &mut w),
            }
        }

        w.block_close();
        w.block_close();
        w.finish()
    }
}

fn emit_indicator(ind: &IndicatorFragment, w: &mut CodeWriter) {
    let line = match &ind.call {
        IndicatorCall::Rsi { period } => {
            format!("var {} = RSI(Close, {});", ind.var, fmt_num(*period))
        }
        IndicatorCall::Sma { period } => {
            format!("var {} = SMA(Close, {});", ind.var, fmt_num(*period))
        }
        IndicatorCall::Ema { period } => {
            format!("var {} = EMA(Close, {});", ind.var, fmt_num(*period))
        }
        IndicatorCall::Wma { period } => {
            format!("var {} = WMA(Close, {});", ind.var, fmt_num(*period))
        }
        IndicatorCall::Macd { fast, slow, signal } => format!(
            "var {}_line = MACD(Close, {}, {}, {});",
            ind.var,
            fmt_num(*fast),
            fmt_num(*slow),
            fmt_num(*signal)
        ),
        IndicatorCall::Atr { period } => {
            format!("var {} = ATR({});", ind.var, fmt_num(*period))
        }
    };
    w.line(&line);
}

fn emit_action(action: &ActionFragment, w: &mut CodeWriter) {
    let (entry_call, entry_id, mode) = match action.direction {
        TradeDirection::Buy => ("EnterLong", "Long", "CalculationMode.Percent"),
        TradeDirection::Sell => ("EnterShort", "Short", "CalculationMode.Percent"),
    };
    w.block_open(&format!("if ({})", action.condition_var));
    w.line(&format!("{}(\"{}\");", entry_call, entry_id));
    if let Some(stop) = action.stop_loss {
        w.line(&format!("SetStopLoss(\"{}\", {}, {});", entry_id, mode, fmt_num(stop)));
    }
    if let Some(profit) = action.take_profit {
        w.line(&format!("SetProfitTarget(\"{}\", {}, {});", entry_id, mode, fmt_num(profit)));
    }
    w.block_close();
}

fn bool_expr(expr: &BoolExpr) -> String {
    match expr {
        BoolExpr::Compare { op, lhs, rhs } => {
            format!("{} {} {}", operand(lhs), compare_op(*op), operand(rhs))
        }
        BoolExpr::Cross { direction, lhs, rhs } => {
            let call = match direction {
                CrossDirection::Over => "CrossAbove",
                CrossDirection::Under => "CrossBelow",
            };
            format!("{}({}, {}, 1)", call, operand(lhs), operand(rhs))
        }
        BoolExpr::Combine { op, lhs, rhs } => {
            let joiner = match op {
                BoolOp::And => "&&",
                BoolOp::Or => "||",
            };
            format!("{} {} {}", lhs, joiner, rhs)
        }
    }
}

fn operand(op: &Operand) -> String {
    match op {
        Operand::Series(var) => var.clone(),
        Operand::Price => "Close[0]".to_string(),
        Operand::Const(value) => fmt_num(*value),
    }
}

fn compare_op(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Lt => "<",
        CompareOp::Gt => ">",
        CompareOp::Le => "<=",
        CompareOp::Ge => ">=",
        CompareOp::Eq => "==",
        CompareOp::Ne => "!=",
    }
}

/// Strategy name → C# class identifier.
fn class_name(name: &str) -> String {
    let cleaned: String = name.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if cleaned.is_empty() {
        "GeneratedStrategy".to_string()
    } else if cleaned.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("Strategy{}", cleaned)
    } else {
        cleaned
    }
}
