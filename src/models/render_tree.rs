//! In-memory SVG render tree
//!
//! The render tree is the canonical schematic model: a visual element exists
//! exactly as long as its node is attached somewhere below the root. Nodes live
//! in a slot map and are addressed by generational `NodeId`s; detaching a node
//! drops its whole subtree and frees the slots for reuse.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::fmt;

slotmap::new_key_type! {
    /// Handle to a node in a `RenderTree`. Slots are reused after removal,
    /// but a stale handle never resolves to the node that took its slot.
    pub struct NodeId;
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:?}", self.0)
    }
}

/// A single SVG element
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Node {
    /// Element name without namespace prefix (`svg`, `g`, `rect`, ...)
    pub tag: String,

    /// Attributes in insertion order
    pub attributes: Vec<(String, String)>,

    /// Inline style properties in insertion order
    pub styles: Vec<(String, String)>,

    pub children: Vec<NodeId>,

    pub parent: Option<NodeId>,

    /// Pre-rendered SVG markup emitted verbatim after the children
    #[serde(default)]
    pub markup: Option<String>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
            parent: None,
            markup: None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Numeric attribute value, if present and parseable
    pub fn attr_f64(&self, name: &str) -> Option<f64> {
        self.attr(name).and_then(parse_length)
    }

    /// Translation encoded in a `translate(x,y)` transform attribute
    pub fn translation(&self) -> Option<(f64, f64)> {
        parse_translate(self.attr("transform")?)
    }

    pub fn class(&self) -> Option<&str> {
        self.attr("class")
    }
}

/// Arena of SVG nodes with a single root
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RenderTree {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
}

impl RenderTree {
    /// Create a tree holding a lone root element
    pub fn new(root_tag: &str) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(root_tag));
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Whether the node is still present in the tree
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Create a detached node; it is not rendered until attached
    pub fn create(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node::new(tag))
    }

    /// Create a node and append it as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, tag: &str) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.create(tag);
        self.attach(parent, id, None);
        Some(id)
    }

    /// Create a node and insert it as the first child of `parent`
    pub fn prepend(&mut self, parent: NodeId, tag: &str) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.create(tag);
        self.attach(parent, id, Some(0));
        Some(id)
    }

    /// Attach a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let detached = self.get(child).is_some_and(|n| n.parent.is_none()) && child != self.root;
        if !detached || !self.contains(parent) {
            return false;
        }
        self.attach(parent, child, None);
        true
    }

    fn attach(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.get_mut(parent) {
            match index {
                Some(i) => node.children.insert(i.min(node.children.len()), child),
                None => node.children.push(child),
            }
        }
    }

    /// Set (or overwrite) an attribute. Returns `false` for a dead node.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> bool {
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        let value = value.into();
        match node.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => node.attributes.push((name.to_string(), value)),
        }
        true
    }

    /// Set (or overwrite) an inline style property
    pub fn set_style(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> bool {
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        let value = value.into();
        match node.styles.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => node.styles.push((name.to_string(), value)),
        }
        true
    }

    pub fn set_markup(&mut self, id: NodeId, markup: impl Into<String>) -> bool {
        let Some(node) = self.get_mut(id) else {
            return false;
        };
        node.markup = Some(markup.into());
        true
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Detach a node from its parent and drop its subtree.
    /// Returns the number of nodes removed.
    pub fn remove(&mut self, id: NodeId) -> usize {
        if id == self.root {
            return 0;
        }
        let parent = match self.get(id) {
            Some(node) => node.parent,
            None => return 0,
        };
        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    /// Remove every direct child of `parent` with the given tag
    pub fn remove_children_with_tag(&mut self, parent: NodeId, tag: &str) -> Vec<NodeId> {
        let targets: Vec<NodeId> = self
            .children(parent)
            .iter()
            .copied()
            .filter(|c| self.get(*c).is_some_and(|n| n.tag == tag))
            .collect();
        for target in &targets {
            self.remove(*target);
        }
        targets
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth-first search for the first node with a matching `id` attribute
    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            let node = self.get(current)?;
            if node.attr("id") == Some(element_id) {
                return Some(current);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }
}

/// Format a coordinate the way it is written into attributes.
///
/// Finite values use the shortest decimal form that parses back to the same
/// `f64`, never exponent notation. Non-finite values are written as `NaN` /
/// `Infinity` so they stay visible in the output.
pub fn fmt_num(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if value == 0.0 {
        // -0 prints as "-0"
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// Parse a length such as `7`, `7px` or `-3.5`
pub fn parse_length(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").parse().ok()
}

/// Parse `translate(x,y)` (comma or whitespace separated)
pub fn parse_translate(transform: &str) -> Option<(f64, f64)> {
    let inner = transform
        .trim()
        .strip_prefix("translate(")?
        .strip_suffix(')')?;
    let mut parts = inner
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let x = parts.next()?.parse().ok()?;
    let y = parts.next().map_or(Some(0.0), |p| p.parse().ok())?;
    Some((x, y))
}
