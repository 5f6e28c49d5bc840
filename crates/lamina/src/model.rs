//! Node, edge and graph labels shared by the layering passes.
//!
//! Labels are plain `Clone` structs. Caller-defined edge attributes travel in
//! [`EdgeLabel::extras`] so that passes which rebuild edges keep them intact.

use crate::graphlib::EdgeKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_DUMMY_PREFIX: &str = "_d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphLabel {
    /// Id prefix for nodes created by [`crate::normalize::run`].
    pub dummy_prefix: String,
    /// First dummy node of every chain created by the last `normalize::run`.
    pub dummy_chains: Vec<String>,
}

impl Default for GraphLabel {
    fn default() -> Self {
        Self {
            dummy_prefix: DEFAULT_DUMMY_PREFIX.to_string(),
            dummy_chains: Vec::new(),
        }
    }
}

/// Role of a synthetic node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dummy {
    /// A segment of a long edge.
    Edge,
}

impl Dummy {
    pub fn as_str(self) -> &'static str {
        match self {
            Dummy::Edge => "edge",
        }
    }
}

impl fmt::Display for Dummy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dummy: Option<Dummy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labelpos: Option<LabelPos>,
    /// Label of the edge a chain replaced; kept on the chain's first dummy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_label: Option<EdgeLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_obj: Option<EdgeKey>,
}

impl NodeLabel {
    pub fn with_rank(rank: i32) -> Self {
        Self {
            rank: Some(rank),
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelPos {
    #[serde(rename = "l")]
    L,
    #[default]
    #[serde(rename = "c")]
    C,
    #[serde(rename = "r")]
    R,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeLabel {
    /// Left unset unless the caller provides one; passes only copy it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_rank: Option<i32>,
    pub labelpos: LabelPos,
    pub labeloffset: f64,
    #[serde(flatten)]
    pub extras: BTreeMap<String, serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
}

impl EdgeLabel {
    pub fn with_weight(weight: f64) -> Self {
        Self {
            weight: Some(weight),
            ..Default::default()
        }
    }

    pub fn has_label(&self) -> bool {
        self.label_rank.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_edge_fields_land_in_extras() {
        let label: EdgeLabel = serde_json::from_value(json!({
            "weight": 3.0,
            "labelRank": 2,
            "labelpos": "r",
            "foo": "bar"
        }))
        .unwrap();

        assert_eq!(label.weight, Some(3.0));
        assert_eq!(label.label_rank, Some(2));
        assert_eq!(label.labelpos, LabelPos::R);
        assert_eq!(label.extras.get("foo"), Some(&json!("bar")));

        let back = serde_json::to_value(&label).unwrap();
        assert_eq!(back["foo"], json!("bar"));
        assert!(back.get("points").is_none());
    }

    #[test]
    fn dummy_nodes_serialize_their_role_as_a_string() {
        let node = NodeLabel {
            dummy: Some(Dummy::Edge),
            ..NodeLabel::with_rank(1)
        };
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(value["dummy"], json!("edge"));
        assert_eq!(value["rank"], json!(1));
        assert_eq!(Dummy::Edge.to_string(), "edge");
    }
}
