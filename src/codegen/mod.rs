//! Codegen pass: ordered fragments → target-platform source text.
//!
//! One emitter per target platform behind a closed registry. Adding a
//! platform is a new module plus a registry entry; the facade never
//! changes.

mod csharp;
mod mql;
mod pinescript;
mod writer;

pub use writer::CodeWriter;

use crate::ir::Fragment;

/// A pure renderer for one target platform.
pub trait Emitter: Sync {
    /// Language identifier reported back to the caller (and used as the
    /// registry key).
    fn language(&self) -> &'static str;

    /// Render the ordered fragments into complete source text.
    fn emit(&self, strategy_name: &str, fragments: &[Fragment]) -> String;
}

static EMITTERS: &[&dyn Emitter] = &[
    &pinescript::PineScript,
    &csharp::CSharp,
    &mql::Mql,
];

/// Look up the emitter registered for a target identifier.
pub fn emitter_for(target: &str) -> Option<&'static dyn Emitter> {
    EMITTERS.iter().copied().find(|e| e.language() == target)
}

/// All registered target identifiers, in registry order.
pub fn targets() -> Vec<&'static str> {
    EMITTERS.iter().map(|e| e.language()).collect()
}

/// Format a numeric literal the way chart platforms write them: whole
/// numbers without a trailing `.0`.
pub(crate) fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
