//! WASM entry points for browser use.
//!
//! The strategy editor calls these to validate graphs live and to preview
//! compiled output without a round-trip to the backend.

use wasm_bindgen::prelude::*;

use crate::error::CompileError;

/// Validate a strategy JSON: parse + structural + node normalization.
/// Returns a JSON array of error objects (empty when valid).
#[wasm_bindgen]
pub fn validate_strategy(json: &str) -> JsValue {
    let result = validate_strategy_inner(json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_strategy_inner(json: &str) -> Vec<ErrorDto> {
    let strategy = match crate::parse::parse(json) {
        Ok(s) => s,
        Err(e) => return vec![ErrorDto::from(e)],
    };

    if let Err(e) = crate::validate::validate(&strategy) {
        return vec![ErrorDto::from(e)];
    }
    if let Err(e) = crate::parse::StrategyGraph::build(&strategy) {
        return vec![ErrorDto::from(e)];
    }
    vec![]
}

/// Full pipeline: parse → validate → resolve → map → emit.
/// Returns `{status: "success", code, language}` or `{status: "errors", ...}`.
#[wasm_bindgen]
pub fn compile_strategy(json: &str, target: &str) -> JsValue {
    let result = match crate::compile::compile_json(json, target) {
        Ok(compiled) => CompileResultDto::Success {
            code: compiled.code,
            language: compiled.language,
        },
        Err(e) => CompileResultDto::Errors {
            errors: vec![ErrorDto::from(e)],
        },
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// The indicator catalog, as served by the backend's `/api/indicators`.
#[wasm_bindgen]
pub fn indicator_catalog() -> JsValue {
    serde_wasm_bindgen::to_value(crate::catalog::all()).unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize, serde::Deserialize)]
struct ErrorDto {
    kind: String,
    code: String,
    message: String,
    node_id: Option<String>,
}

impl From<CompileError> for ErrorDto {
    fn from(e: CompileError) -> Self {
        ErrorDto {
            kind: e.kind().to_string(),
            code: e.code().to_string(),
            message: e.to_string(),
            node_id: e.node_id().map(String::from),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(tag = "status")]
enum CompileResultDto {
    #[serde(rename = "success")]
    Success { code: String, language: String },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
