pub mod catalog;
pub mod codegen;
pub mod compile;
pub mod error;
pub mod ir;
pub mod mapper;
pub mod parse;
pub mod resolve;
pub mod validate;
pub mod wasm;

pub use compile::{compile, compile_json, CompiledStrategy};
pub use error::CompileError;
