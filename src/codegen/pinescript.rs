//! PineScript v5 emitter, the full-featured primary target.
//!
//! Emits the versioned header, the strategy declaration, indicator
//! declarations with their chart directives (plots, reference hlines),
//! condition lines, and entry blocks with visual markers and tagged exits.

use super::writer::CodeWriter;
use super::{fmt_num, Emitter};
use crate::ir::*;

pub struct PineScript;

impl Emitter for PineScript {
    fn language(&self) -> &'static str {
        "pinescript"
    }

    fn emit(&self, strategy_name: &str, fragments: &[Fragment]) -> String {
        let mut w = CodeWriter::new();
        w.line("//@version=5");
        w.line(&format!("strategy('{}', overlay=true)", escape(strategy_name)));

        for fragment in fragments {
            w.blank();
            match fragment {
                Fragment::Indicator(ind) => emit_indicator(ind, &mut w),
                Fragment::Condition(cond) => emit_condition(cond, &mut w),
                Fragment::Action(action) => emit_action(action, &mut w),
            }
        }

        w.finish()
    }
}

fn emit_indicator(ind: &IndicatorFragment, w: &mut CodeWriter) {
    comment(&ind.label, w);
    let title = if ind.label.is_empty() { &ind.var } else { &ind.label };

    match &ind.call {
        IndicatorCall::Rsi { period } => {
            w.line(&format!("{} = ta.rsi(close, {})", ind.var, fmt_num(*period)));
        }
        IndicatorCall::Sma { period } => {
            w.line(&format!("{} = ta.sma(close, {})", ind.var, fmt_num(*period)));
        }
        IndicatorCall::Ema { period } => {
            w.line(&format!("{} = ta.ema(close, {})", ind.var, fmt_num(*period)));
        }
        IndicatorCall::Wma { period } => {
            w.line(&format!("{} = ta.wma(close, {})", ind.var, fmt_num(*period)));
        }
        IndicatorCall::Macd { fast, slow, signal } => {
            w.line(&format!(
                "[{v}_line, {v}_signal, {v}_hist] = ta.macd(close, {}, {}, {})",
                fmt_num(*fast),
                fmt_num(*slow),
                fmt_num(*signal),
                v = ind.var,
            ));
        }
        IndicatorCall::Atr { period } => {
            w.line(&format!("{} = ta.atr({})", ind.var, fmt_num(*period)));
        }
    }

    match &ind.plot {
        PlotHint::Overlay { style } => {
            w.line(&format!(
                "plot({}, title='{}', color={}, linewidth={})",
                ind.var,
                escape(title),
                tint(style.color),
                style.width
            ));
        }
        PlotHint::Oscillator { upper, lower } => {
            w.line(&format!(
                "plot({}, title='{}', color=color.purple)",
                ind.var,
                escape(title)
            ));
            w.line(&format!(
                "hline({}, 'Overbought', color=color.red, linestyle=hline.style_dashed)",
                fmt_num(*upper)
            ));
            w.line(&format!(
                "hline({}, 'Oversold', color=color.green, linestyle=hline.style_dashed)",
                fmt_num(*lower)
            ));
        }
        PlotHint::Pane => match &ind.call {
            IndicatorCall::Macd { .. } => {
                w.line(&format!(
                    "plot({v}_line, title='{}', color=color.blue)",
                    escape(title),
                    v = ind.var
                ));
                w.line(&format!("plot({v}_signal, title='Signal', color=color.orange)", v = ind.var));
            }
            _ => {
                w.line(&format!(
                    "plot({}, title='{}', color=color.silver)",
                    ind.var,
                    escape(title)
                ));
            }
        },
    }
}

fn emit_condition(cond: &ConditionFragment, w: &mut CodeWriter) {
    comment(&cond.label, w);
    w.line(&format!("{} = {}", cond.var, bool_expr(&cond.expr)));
}

fn bool_expr(expr: &BoolExpr) -> String {
    match expr {
        BoolExpr::Compare { op, lhs, rhs } => {
            format!("{} {} {}", operand(lhs), compare_op(*op), operand(rhs))
        }
        BoolExpr::Cross { direction, lhs, rhs } => {
            let call = match direction {
                CrossDirection::Over => "ta.crossover",
                CrossDirection::Under => "ta.crossunder",
            };
            format!("{}({}, {})", call, operand(lhs), operand(rhs))
        }
        BoolExpr::Combine { op, lhs, rhs } => {
            let joiner = match op {
                BoolOp::And => "and",
                BoolOp::Or => "or",
            };
            format!("{} {} {}", lhs, joiner, rhs)
        }
    }
}

fn emit_action(action: &ActionFragment, w: &mut CodeWriter) {
    comment(&action.label, w);
    let cond = &action.condition_var;

    match action.direction {
        TradeDirection::Buy => {
            w.line(&format!("if ({})", cond));
            w.indent();
            w.line("strategy.entry('Long', strategy.long)");
            w.dedent();
            w.line(&format!(
                "plotshape({}, style=shape.labelup, location=location.belowbar, color=color.green, size=size.small, text='BUY')",
                cond
            ));
            emit_exits(action, "Long", w);
        }
        TradeDirection::Sell => {
            w.line(&format!("if ({})", cond));
            w.indent();
            w.line("strategy.entry('Short', strategy.short)");
            w.dedent();
            w.line(&format!(
                "plotshape({}, style=shape.labeldown, location=location.abovebar, color=color.red, size=size.small, text='SELL')",
                cond
            ));
            emit_exits(action, "Short", w);
        }
    }
}

/// One tagged `strategy.exit` per present offset. Offsets are percentages
/// from the average entry price; sign flips with trade direction.
fn emit_exits(action: &ActionFragment, entry_id: &str, w: &mut CodeWriter) {
    let (stop_sign, limit_sign) = match action.direction {
        TradeDirection::Buy => ("-", "+"),
        TradeDirection::Sell => ("+", "-"),
    };
    if let Some(stop) = action.stop_loss {
        w.line(&format!(
            "strategy.exit('Stop Loss', '{}', stop=strategy.position_avg_price * (1 {} {} / 100))",
            entry_id,
            stop_sign,
            fmt_num(stop)
        ));
    }
    if let Some(profit) = action.take_profit {
        w.line(&format!(
            "strategy.exit('Take Profit', '{}', limit=strategy.position_avg_price * (1 {} {} / 100))",
            entry_id,
            limit_sign,
            fmt_num(profit)
        ));
    }
}

fn operand(op: &Operand) -> String {
    match op {
        Operand::Series(var) => var.clone(),
        Operand::Price => "close".to_string(),
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

fn tint(color: Tint) -> &'static str {
    match color {
        Tint::Blue => "color.blue",
        Tint::Orange => "color.orange",
        Tint::Purple => "color.purple",
        Tint::Teal => "color.teal",
    }
}

fn comment(label: &str, w: &mut CodeWriter) {
    if !label.is_empty() {
        w.line(&format!("// {}", label));
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}
