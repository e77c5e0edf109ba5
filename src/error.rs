//! Unified compiler error type used across all phases.
//!
//! Three variants, matching what the caller can actually do about the
//! failure: fix the graph's shape (Structural), fix a node's meaning
//! (Semantic), or fix the requested target (UnsupportedTarget). Every
//! error carries a short stable code so the surrounding service and the
//! frontend can match on it without parsing messages.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// The graph itself is malformed: missing/duplicate ids, dangling
    /// connection endpoints, cycles, unparseable input.
    #[error("[Structural:{code}] {message}{}", fmt_node(.node_id))]
    Structural {
        code: &'static str,
        message: String,
        node_id: Option<String>,
    },

    /// The graph is well-formed but not compilable as-is: unknown node
    /// category, unknown indicator/operator, unresolved operand, action
    /// without a gating condition.
    #[error("[Semantic:{code}] {message}{}", fmt_node(.node_id))]
    Semantic {
        code: &'static str,
        message: String,
        node_id: Option<String>,
    },

    /// The requested target platform has no registered emitter. Independent
    /// of the graph's validity.
    #[error("[Target:T001] unsupported compilation target '{target}'")]
    UnsupportedTarget { target: String },
}

fn fmt_node(node_id: &Option<String>) -> String {
    match node_id {
        Some(id) => format!(" (node '{}')", id),
        None => String::new(),
    }
}

impl CompileError {
    pub fn structural(
        code: &'static str,
        message: impl Into<String>,
        node_id: Option<String>,
    ) -> Self {
        CompileError::Structural {
            code,
            message: message.into(),
            node_id,
        }
    }

    pub fn semantic(
        code: &'static str,
        message: impl Into<String>,
        node_id: Option<String>,
    ) -> Self {
        CompileError::Semantic {
            code,
            message: message.into(),
            node_id,
        }
    }

    pub fn unsupported_target(target: impl Into<String>) -> Self {
        CompileError::UnsupportedTarget {
            target: target.into(),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            CompileError::Structural { code, .. } => code,
            CompileError::Semantic { code, .. } => code,
            CompileError::UnsupportedTarget { .. } => "T001",
        }
    }

    pub fn node_id(&self) -> Option<&str> {
        match self {
            CompileError::Structural { node_id, .. } => node_id.as_deref(),
            CompileError::Semantic { node_id, .. } => node_id.as_deref(),
            CompileError::UnsupportedTarget { .. } => None,
        }
    }

    /// Taxonomy label for DTO serialization: "structural", "semantic",
    /// "unsupported_target".
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::Structural { .. } => "structural",
            CompileError::Semantic { .. } => "semantic",
            CompileError::UnsupportedTarget { .. } => "unsupported_target",
        }
    }
}

// Stable error codes, grouped by variant.
pub mod codes {
    // Structural
    pub const MALFORMED_INPUT: &str = "S000";
    pub const MISSING_ID: &str = "S001";
    pub const DUPLICATE_ID: &str = "S002";
    pub const DANGLING_ENDPOINT: &str = "S003";
    pub const CYCLIC_GRAPH: &str = "S004";

    // Semantic
    pub const UNKNOWN_CATEGORY: &str = "M001";
    pub const UNKNOWN_INDICATOR: &str = "M002";
    pub const UNKNOWN_OPERATOR: &str = "M003";
    pub const UNRESOLVED_OPERAND: &str = "M004";
    pub const MISSING_CONDITION: &str = "M005";
    pub const INVALID_ACTION: &str = "M006";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_node() {
        let e = CompileError::semantic(codes::UNKNOWN_CATEGORY, "invalid node type", Some("n1".into()));
        assert_eq!(e.to_string(), "[Semantic:M001] invalid node type (node 'n1')");
    }

    #[test]
    fn display_without_node() {
        let e = CompileError::structural(codes::CYCLIC_GRAPH, "cyclic graph", None);
        assert_eq!(e.to_string(), "[Structural:S004] cyclic graph");
    }

    #[test]
    fn unsupported_target_display() {
        let e = CompileError::unsupported_target("cobol");
        assert_eq!(e.to_string(), "[Target:T001] unsupported compilation target 'cobol'");
        assert_eq!(e.kind(), "unsupported_target");
    }
}
