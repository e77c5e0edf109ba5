//! Per-node normalization: category canonicalization and parameter
//! coercion.

use std::collections::HashMap;

use crate::error::{codes, CompileError};
use crate::parse::types::{RawNode, RawParam};

/// Canonical node category. The editor sends these in several spellings
/// (`"indicator"`, `"indicatorNode"`, `"Indicator"`, legacy `"default"`);
/// they are resolved here exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Input,
    Indicator,
    Logic,
    Action,
    Output,
}

/// A normalized parameter value. `Unset` is the explicit "intentionally
/// absent" sentinel: an empty string or JSON null from the editor, never
/// conflated with a numeric zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Number(f64),
    Text(String),
    Unset,
}

impl Param {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Param::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Param::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A validated node. `label` feeds generated comments and identifier
/// resolution against the indicator catalog; it carries no other semantics.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    pub params: HashMap<String, Param>,
}

impl Node {
    pub fn param(&self, key: &str) -> &Param {
        self.params.get(key).unwrap_or(&Param::Unset)
    }

    /// Numeric parameter, whether it arrived as a number or was coerced
    /// from a numeric string. `Unset` and non-numeric text yield `None`.
    pub fn number_param(&self, key: &str) -> Option<f64> {
        self.param(key).as_number()
    }
}

/// Normalize one raw node. Ids are assumed already checked (S001/S002).
pub fn normalize(raw: &RawNode) -> Result<Node, CompileError> {
    let kind = canonical_kind(&raw.node_type).ok_or_else(|| {
        CompileError::semantic(
            codes::UNKNOWN_CATEGORY,
            format!("invalid node type '{}'", raw.node_type),
            Some(raw.id.clone()),
        )
    })?;

    let params = raw
        .parameters
        .iter()
        .map(|(key, value)| (key.clone(), coerce(value)))
        .collect();

    Ok(Node {
        id: raw.id.clone(),
        kind,
        label: raw.name.clone(),
        params,
    })
}

/// Lower-case, strip one trailing `"node"` suffix, match the closed set.
/// `"default"` is the editor's legacy spelling for indicator nodes.
fn canonical_kind(raw_type: &str) -> Option<NodeKind> {
    let lower = raw_type.to_ascii_lowercase();
    let base = lower.strip_suffix("node").unwrap_or(&lower);
    match base {
        "input" => Some(NodeKind::Input),
        "indicator" | "default" => Some(NodeKind::Indicator),
        "logic" => Some(NodeKind::Logic),
        "action" => Some(NodeKind::Action),
        "output" => Some(NodeKind::Output),
        _ => None,
    }
}

/// Coerce a raw parameter into the closed model. Strings made of digits
/// with at most one decimal point become numbers; the empty string stays
/// the unset sentinel, not zero.
fn coerce(value: &Option<RawParam>) -> Param {
    match value {
        None => Param::Unset,
        Some(RawParam::Number(n)) => Param::Number(*n),
        Some(RawParam::Flag(b)) => Param::Text(b.to_string()),
        Some(RawParam::Text(s)) => {
            if s.is_empty() {
                Param::Unset
            } else if let Some(n) = parse_numeric(s) {
                Param::Number(n)
            } else {
                Param::Text(s.clone())
            }
        }
    }
}

/// Accepts only digits with at most one decimal point (`14`, `1.5`, `.5`).
/// Signs, exponents and whitespace stay text.
fn parse_numeric(s: &str) -> Option<f64> {
    let mut dots = 0usize;
    let mut digits = 0usize;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }
    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn raw(node_type: &str) -> RawNode {
        RawNode {
            id: "n1".into(),
            node_type: node_type.into(),
            name: "RSI".into(),
            parameters: HashMap::new(),
            position: Default::default(),
        }
    }

    #[test]
    fn canonicalizes_suffixed_and_cased_types() {
        assert_eq!(canonical_kind("indicatorNode"), Some(NodeKind::Indicator));
        assert_eq!(canonical_kind("IndicatorNode"), Some(NodeKind::Indicator));
        assert_eq!(canonical_kind("logic"), Some(NodeKind::Logic));
        assert_eq!(canonical_kind("ACTION"), Some(NodeKind::Action));
        assert_eq!(canonical_kind("outputnode"), Some(NodeKind::Output));
        assert_eq!(canonical_kind("default"), Some(NodeKind::Indicator));
        assert_eq!(canonical_kind("foobar"), None);
    }

    #[test]
    fn unknown_type_is_semantic_error() {
        let err = normalize(&raw("foobar")).unwrap_err();
        assert_eq!(err.code(), "M001");
        assert!(matches!(err, CompileError::Semantic { .. }));
    }

    #[test]
    fn numeric_strings_coerce() {
        assert_eq!(coerce(&Some(RawParam::Text("14".into()))), Param::Number(14.0));
        assert_eq!(coerce(&Some(RawParam::Text("1.5".into()))), Param::Number(1.5));
        assert_eq!(coerce(&Some(RawParam::Text(".5".into()))), Param::Number(0.5));
    }

    #[test]
    fn non_numeric_strings_stay_text() {
        assert_eq!(coerce(&Some(RawParam::Text("-3".into()))), Param::Text("-3".into()));
        assert_eq!(coerce(&Some(RawParam::Text("1.2.3".into()))), Param::Text("1.2.3".into()));
        assert_eq!(coerce(&Some(RawParam::Text("buy".into()))), Param::Text("buy".into()));
        assert_eq!(coerce(&Some(RawParam::Text("1e3".into()))), Param::Text("1e3".into()));
    }

    #[test]
    fn empty_string_is_unset_not_zero() {
        assert_eq!(coerce(&Some(RawParam::Text(String::new()))), Param::Unset);
        assert_ne!(coerce(&Some(RawParam::Text(String::new()))), Param::Number(0.0));
    }

    #[test]
    fn null_is_unset() {
        assert_eq!(coerce(&None), Param::Unset);
    }

    #[test]
    fn explicit_zero_stays_a_number() {
        assert_eq!(coerce(&Some(RawParam::Number(0.0))), Param::Number(0.0));
        assert_eq!(coerce(&Some(RawParam::Text("0".into()))), Param::Number(0.0));
    }

    #[test]
    fn lone_dot_is_not_numeric() {
        assert_eq!(parse_numeric("."), None);
    }
}
