//! Serde targets for the strategy-builder wire format.
//!
//! These types mirror the JSON the visual editor sends: a flat node list
//! with free-form `type` strings and loosely typed parameter maps, plus a
//! connection list. Normalization into the closed model happens in the
//! validate phase; nothing downstream of it touches these raw shapes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A full strategy graph as received over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

fn default_name() -> String {
    "Untitled Strategy".to_string()
}

/// A node as declared by the editor. `id` defaults to empty (caught by
/// validation as "missing id" rather than a deserialization failure, so the
/// caller gets a structural error it can attribute).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parameters: HashMap<String, Option<RawParam>>,
    /// Layout only; deserialized for round-tripping, never read here.
    #[serde(default)]
    pub position: Position,
}

/// A loosely typed parameter value. JSON `null` arrives as the `None` side
/// of the surrounding `Option`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawParam {
    Number(f64),
    Text(String),
    Flag(bool),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// A directed edge between two nodes, optionally qualified by named handles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
}
