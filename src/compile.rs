//! Compiler facade: validate → resolve → map → emit.
//!
//! Compilation is a pure, synchronous transformation of an immutable
//! graph: no I/O, no shared state, no retries. It either returns source
//! text for the requested target or the first error found; nothing is
//! ever partially emitted.

use serde::{Deserialize, Serialize};

use crate::codegen;
use crate::error::CompileError;
use crate::mapper;
use crate::parse::{self, StrategyGraph, Strategy};
use crate::resolve;
use crate::validate;

/// A successful compile: source text plus the language it is written in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompiledStrategy {
    pub code: String,
    pub language: String,
}

/// Compile a strategy graph for one target platform.
pub fn compile(strategy: &Strategy, target: &str) -> Result<CompiledStrategy, CompileError> {
    let nodes = validate::validate(strategy)?;
    let graph = StrategyGraph::build(strategy)?;
    let ordered = resolve::evaluation_order(&nodes, &graph)?;
    let fragments = mapper::map_nodes(&ordered, &graph)?;

    let emitter = codegen::emitter_for(target)
        .ok_or_else(|| CompileError::unsupported_target(target))?;

    Ok(CompiledStrategy {
        code: emitter.emit(&strategy.name, &fragments),
        language: emitter.language().to_string(),
    })
}

/// Compile straight from a JSON request body.
pub fn compile_json(json: &str, target: &str) -> Result<CompiledStrategy, CompileError> {
    let strategy = parse::parse(json)?;
    compile(&strategy, target)
}
