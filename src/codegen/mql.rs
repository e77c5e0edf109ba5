//! MQL emitter, secondary target at stub fidelity.
//!
//! Emits an MQL4-style expert-advisor skeleton: indicator declarations on
//! the current bar, condition booleans, and order calls with percent
//! offsets from the current price.

use super::writer::CodeWriter;
use super::{fmt_num, Emitter};
use crate::ir::*;

pub struct Mql;

impl Emitter for Mql {
    fn language(&self) -> &'static str {
        "mql"
    }

    fn emit(&self, strategy_name: &str, fragments: &[Fragment]) -> String {
        let mut w = CodeWriter::new();
        w.line("//+------------------------------------------------------------------+");
        w.line(&format!("//| {} (generated)", strategy_name));
        w.line("//+------------------------------------------------------------------+");
        w.line("#property strict");
        w.blank();

        if has_cross(fragments) {
            // Stub-level cross detection; exact detection needs the
            // previous-bar values tracked by the caller.
            w.line("bool CrossOver(double fast, double slow) { return fast > slow; }");
            w.line("bool CrossUnder(double fast, double slow) { return fast < slow; }");
            w.blank();
        }

        w.block_open("void OnTick()");

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
        w.finish()
    }
}

fn has_cross(fragments: &[Fragment]) -> bool {
    fragments.iter().any(|f| {
        matches!(
            f,
            Fragment::Condition(ConditionFragment {
                expr: BoolExpr::Cross { .. },
                ..
            })
        )
    })
}

fn emit_indicator(ind: &IndicatorFragment, w: &mut CodeWriter) {
    let line = match &ind.call {
        IndicatorCall::Rsi { period } => format!(
            "double {} = iRSI(_Symbol, 0, {}, PRICE_CLOSE, 0);",
            ind.var,
            fmt_num(*period)
        ),
        IndicatorCall::Sma { period } => format!(
            "double {} = iMA(_Symbol, 0, {}, 0, MODE_SMA, PRICE_CLOSE, 0);",
            ind.var,
            fmt_num(*period)
        ),
        IndicatorCall::Ema { period } => format!(
            "double {} = iMA(_Symbol, 0, {}, 0, MODE_EMA, PRICE_CLOSE, 0);",
            ind.var,
            fmt_num(*period)
        ),
        IndicatorCall::Wma { period } => format!(
            "double {} = iMA(_Symbol, 0, {}, 0, MODE_LWMA, PRICE_CLOSE, 0);",
            ind.var,
            fmt_num(*period)
        ),
        IndicatorCall::Macd { fast, slow, signal } => format!(
            "double {}_line = iMACD(_Symbol, 0, {}, {}, {}, PRICE_CLOSE, MODE_MAIN, 0);",
            ind.var,
            fmt_num(*fast),
            fmt_num(*slow),
            fmt_num(*signal)
        ),
        IndicatorCall::Atr { period } => format!(
            "double {} = iATR(_Symbol, 0, {}, 0);",
            ind.var,
            fmt_num(*period)
        ),
    };
    w.line(&line);
}

fn emit_action(action: &ActionFragment, w: &mut CodeWriter) {
    w.block_open(&format!("if ({})", action.condition_var));
    match action.direction {
        TradeDirection::Buy => {
            let stop = offset_expr("Ask", "-", action.stop_loss);
            let limit = offset_expr("Ask", "+", action.take_profit);
            w.line(&format!(
                "OrderSend(_Symbol, OP_BUY, 0.1, Ask, 3, {}, {});",
                stop, limit
            ));
        }
        TradeDirection::Sell => {
            let stop = offset_expr("Bid", "+", action.stop_loss);
            let limit = offset_expr("Bid", "-", action.take_profit);
            w.line(&format!(
                "OrderSend(_Symbol, OP_SELL, 0.1, Bid, 3, {}, {});",
                stop, limit
            ));
        }
    }
    w.block_close();
}

/// Percent offset from the quoted price, or `0` (no level) when unset.
fn offset_expr(price: &str, sign: &str, offset: Option<f64>) -> String {
    match offset {
        Some(value) => format!("{} * (1 {} {} / 100)", price, sign, fmt_num(value)),
        None => "0".to_string(),
    }
}

fn bool_expr(expr: &BoolExpr) -> String {
    match expr {
        BoolExpr::Compare { op, lhs, rhs } => {
            format!("{} {} {}", operand(lhs), compare_op(*op), operand(rhs))
        }
        BoolExpr::Cross { direction, lhs, rhs } => {
            let call = match direction {
                CrossDirection::Over => "CrossOver",
                CrossDirection::Under => "CrossUnder",
            };
            format!("{}({}, {})", call, operand(lhs), operand(rhs))
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
