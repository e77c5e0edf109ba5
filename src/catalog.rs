//! The fixed indicator catalog.
//!
//! Single source of truth shared by the semantic mapper (which resolves
//! indicator nodes against it) and the surrounding service's
//! `/api/indicators` endpoint (which serializes it), so the two cannot
//! drift apart.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct IndicatorDef {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub parameters: &'static [ParamDef],
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamDef {
    pub key: &'static str,
    pub default: f64,
}

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

static CATALOG: &[IndicatorDef] = &[
    IndicatorDef {
        id: "rsi",
        name: "RSI",
        category: "momentum",
        parameters: &[ParamDef { key: "period", default: 14.0 }],
    },
    IndicatorDef {
        id: "sma",
        name: "SMA",
        category: "trend",
        parameters: &[ParamDef { key: "period", default: 20.0 }],
    },
    IndicatorDef {
        id: "ema",
        name: "EMA",
        category: "trend",
        parameters: &[ParamDef { key: "period", default: 20.0 }],
    },
    IndicatorDef {
        id: "wma",
        name: "WMA",
        category: "trend",
        parameters: &[ParamDef { key: "period", default: 20.0 }],
    },
    IndicatorDef {
        id: "macd",
        name: "MACD",
        category: "momentum",
        parameters: &[
            ParamDef { key: "fast", default: 12.0 },
            ParamDef { key: "slow", default: 26.0 },
            ParamDef { key: "signal", default: 9.0 },
        ],
    },
    IndicatorDef {
        id: "atr",
        name: "ATR",
        category: "volatility",
        parameters: &[ParamDef { key: "period", default: 14.0 }],
    },
];

/// Every indicator the compiler understands.
pub fn all() -> &'static [IndicatorDef] {
    CATALOG
}

/// Case-insensitive lookup by catalog id or display name.
pub fn find(label: &str) -> Option<&'static IndicatorDef> {
    let needle = label.trim().to_ascii_lowercase();
    CATALOG
        .iter()
        .find(|def| def.id == needle || def.name.to_ascii_lowercase() == needle)
}

impl IndicatorDef {
    pub fn default_for(&self, key: &str) -> Option<f64> {
        self.parameters
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.default)
    }
}
