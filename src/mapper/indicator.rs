//! Indicator nodes → declaration fragments with presentation hints.

use crate::catalog;
use crate::error::{codes, CompileError};
use crate::ir::{
    sanitize_identifier, IndicatorCall, IndicatorFragment, LineStyle, PlotHint, Tint,
};
use crate::validate::Node;

/// Style cycle for overlay indicators. Successive instances must stay
/// visually distinguishable, so each takes the next entry.
static OVERLAY_STYLES: &[LineStyle] = &[
    LineStyle { color: Tint::Blue, width: 1 },
    LineStyle { color: Tint::Orange, width: 2 },
    LineStyle { color: Tint::Purple, width: 1 },
    LineStyle { color: Tint::Teal, width: 2 },
];

/// Map one indicator node. Returns the fragment plus the series
/// identifier downstream logic operands should reference (for MACD that is
/// the MACD line, not the tuple).
pub(crate) fn map(
    node: &Node,
    overlay_seq: &mut usize,
) -> Result<(IndicatorFragment, String), CompileError> {
    let def = catalog::find(&node.label).ok_or_else(|| {
        CompileError::semantic(
            codes::UNKNOWN_INDICATOR,
            format!("unknown indicator '{}'", node.label),
            Some(node.id.clone()),
        )
    })?;

    let var = sanitize_identifier(&node.id);
    let param = |key: &str| {
        node.number_param(key)
            .or_else(|| def.default_for(key))
            .unwrap_or(14.0)
    };

    let (call, series, plot) = match def.id {
        "rsi" => (
            IndicatorCall::Rsi { period: param("period") },
            var.clone(),
            PlotHint::Oscillator {
                upper: catalog::RSI_OVERBOUGHT,
                lower: catalog::RSI_OVERSOLD,
            },
        ),
        "sma" => (
            IndicatorCall::Sma { period: param("period") },
            var.clone(),
            next_overlay_style(overlay_seq),
        ),
        "ema" => (
            IndicatorCall::Ema { period: param("period") },
            var.clone(),
            next_overlay_style(overlay_seq),
        ),
        "wma" => (
            IndicatorCall::Wma { period: param("period") },
            var.clone(),
            next_overlay_style(overlay_seq),
        ),
        "macd" => (
            IndicatorCall::Macd {
                fast: param("fast"),
                slow: param("slow"),
                signal: param("signal"),
            },
            format!("{}_line", var),
            PlotHint::Pane,
        ),
        "atr" => (
            IndicatorCall::Atr { period: param("period") },
            var.clone(),
            PlotHint::Pane,
        ),
        other => {
            // Catalog entry without a mapping is a bug in this file, not in
            // the user's graph.
            return Err(CompileError::semantic(
                codes::UNKNOWN_INDICATOR,
                format!("indicator '{}' has no semantic mapping", other),
                Some(node.id.clone()),
            ));
        }
    };

    let fragment = IndicatorFragment {
        var,
        call,
        plot,
        label: node.label.clone(),
    };
    Ok((fragment, series))
}

fn next_overlay_style(overlay_seq: &mut usize) -> PlotHint {
    let style = OVERLAY_STYLES[*overlay_seq % OVERLAY_STYLES.len()].clone();
    *overlay_seq += 1;
    PlotHint::Overlay { style }
}
