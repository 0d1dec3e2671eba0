//! Visual element kinds and handles

use super::render_tree::NodeId;
use serde::{Deserialize, Serialize};

/// Type tag of a visual element, written as its `class` attribute
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Component,
    Wire,
    Terminal,
    BoundingBox,
    Path,
}

impl ElementKind {
    pub fn class_name(self) -> &'static str {
        match self {
            ElementKind::Component => "component",
            ElementKind::Wire => "wire",
            ElementKind::Terminal => "terminal",
            ElementKind::BoundingBox => "bounding-box",
            ElementKind::Path => "path",
        }
    }
}

/// Handle to a created visual element
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    pub node: NodeId,
    pub kind: ElementKind,
}

impl ElementHandle {
    pub fn new(node: NodeId, kind: ElementKind) -> Self {
        Self { node, kind }
    }
}
