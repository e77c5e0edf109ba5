//! Parse phase: strategy JSON → Rust types + graph construction.

pub mod graph;
pub mod types;

pub use graph::StrategyGraph;
pub use types::*;

use crate::error::{codes, CompileError};

/// Deserialize a strategy JSON string into a `Strategy`.
pub fn parse(json: &str) -> Result<Strategy, CompileError> {
    serde_json::from_str::<Strategy>(json).map_err(|e| {
        CompileError::structural(
            codes::MALFORMED_INPUT,
            format!("failed to parse strategy JSON: {}", e),
            None,
        )
    })
}
