//! Arena-backed in-memory document tree.
//!
//! `MemTree` implements [`DocumentTree`] without a browser. It is loaded from
//! a JSON snapshot where every node is either a string (a text node) or an
//! object:
//!
//! ```json
//! { "tag": "div", "attrs": { "class": "row" }, "children": ["text", { "tag": "span" }] }
//! ```
//!
//! Markup written through [`DocumentTree::set_inner_html`] is stored verbatim
//! as an opaque node. Its text is the markup with tags removed, and selectors
//! do not see into it.

#[cfg(test)]
#[path = "memdom_test.rs"]
mod memdom_test;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::tree::{DocumentTree, Selector, TreeError};

/// Error returned when a snapshot cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The input is not valid snapshot JSON.
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level node is a bare string.
    #[error("snapshot root must be an element, not text")]
    TextRoot,
}

/// One node of a JSON snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SnapshotNode {
    Text(String),
    Element(SnapshotElement),
}

/// An element of a JSON snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotElement {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<SnapshotNode>,
}

/// Index of a node inside a [`MemTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element { tag: String, attrs: BTreeMap<String, String> },
    Text(String),
    Raw(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory document.
#[derive(Debug, Clone)]
pub struct MemTree {
    nodes: Vec<NodeData>,
    root: NodeId,
    writes: usize,
}

impl MemTree {
    /// Parse a JSON snapshot string.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let node: SnapshotNode = serde_json::from_str(raw)?;
        Self::from_node(node)
    }

    /// Build from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SnapshotError> {
        let node: SnapshotNode = serde_json::from_value(value)?;
        Self::from_node(node)
    }

    fn from_node(node: SnapshotNode) -> Result<Self, SnapshotError> {
        match node {
            SnapshotNode::Element(element) => Ok(Self::from_snapshot(element)),
            SnapshotNode::Text(_) => Err(SnapshotError::TextRoot),
        }
    }

    /// Build from a snapshot element, which becomes the root.
    #[must_use]
    pub fn from_snapshot(root: SnapshotElement) -> Self {
        let mut tree = Self { nodes: Vec::new(), root: NodeId(0), writes: 0 };
        tree.root = tree.push_element(root, None);
        tree
    }

    fn push_element(&mut self, element: SnapshotElement, parent: Option<NodeId>) -> NodeId {
        let id = self.push(NodeKind::Element { tag: element.tag.to_ascii_lowercase(), attrs: element.attrs }, parent);
        for child in element.children {
            let child_id = match child {
                SnapshotNode::Text(text) => self.push(NodeKind::Text(text), Some(id)),
                SnapshotNode::Element(el) => self.push_element(el, Some(id)),
            };
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        self.nodes.push(NodeData { kind, parent, children: Vec::new() });
        NodeId(self.nodes.len() - 1)
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of successful writes since the tree was built.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// First element whose `id` attribute equals `id`.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants_inclusive(self.root)
            .into_iter()
            .find(|node| self.attribute(node, "id").as_deref() == Some(id))
    }

    /// Serialized children of `node`.
    #[must_use]
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(data) = self.nodes.get(node.0) {
            for child in &data.children {
                self.write_html(*child, &mut out);
            }
        }
        out
    }

    /// Serialize the whole tree as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(self.root, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.nodes.get(node.0) else {
            return;
        };
        match &data.kind {
            NodeKind::Text(text) => out.push_str(&escape_text(text)),
            NodeKind::Raw(html) => out.push_str(html),
            NodeKind::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push_str(&format!(" {name}=\"{}\"", escape_attr(value)));
                }
                out.push('>');
                for child in &data.children {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{tag}>"));
            }
        }
    }

    /// Element descendants of `node` in document order, `node` first.
    fn descendants_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let Some(data) = self.nodes.get(current.0) else {
                continue;
            };
            if matches!(data.kind, NodeKind::Element { .. }) {
                out.push(current);
                stack.extend(data.children.iter().rev());
            }
        }
        out
    }

    fn element(&self, node: NodeId) -> Option<(&str, &BTreeMap<String, String>)> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element { tag, attrs } => Some((tag, attrs)),
            NodeKind::Text(_) | NodeKind::Raw(_) => None,
        }
    }

    fn attrs_mut(&mut self, node: NodeId) -> Result<&mut BTreeMap<String, String>, TreeError> {
        match self.nodes.get_mut(node.0).map(|data| &mut data.kind) {
            Some(NodeKind::Element { attrs, .. }) => Ok(attrs),
            _ => Err(TreeError::Detached),
        }
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let Some(data) = self.nodes.get(node.0) else {
            return;
        };
        match &data.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Raw(html) => out.push_str(&strip_tags(html)),
            NodeKind::Element { .. } => {
                for child in &data.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }
}

impl DocumentTree for MemTree {
    type Node = NodeId;

    fn select_all(&self, selector: &Selector<'_>) -> Vec<NodeId> {
        self.descendants_inclusive(self.root)
            .into_iter()
            .filter(|node| self.matches(node, selector))
            .collect()
    }

    fn select_within(&self, scope: &NodeId, selector: &Selector<'_>) -> Option<NodeId> {
        self.descendants_inclusive(*scope)
            .into_iter()
            .skip(1)
            .find(|node| self.matches(node, selector))
    }

    fn matches(&self, node: &NodeId, selector: &Selector<'_>) -> bool {
        self.element(*node)
            .is_some_and(|(tag, attrs)| selector.matches_parts(tag, attrs.get("class").map(String::as_str)))
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn previous_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = &self.nodes[parent.0].children;
        let index = siblings.iter().position(|child| child == node)?;
        siblings[..index]
            .iter()
            .rev()
            .copied()
            .find(|sibling| self.element(*sibling).is_some())
    }

    fn text(&self, node: &NodeId) -> String {
        let mut out = String::new();
        self.collect_text(*node, &mut out);
        out
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(*node)?.1.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), TreeError> {
        self.attrs_mut(*node)?.insert(name.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn set_inner_html(&mut self, node: &NodeId, html: &str) -> Result<(), TreeError> {
        self.element(*node).ok_or(TreeError::Detached)?;
        let old_children = std::mem::take(&mut self.nodes[node.0].children);
        for child in old_children {
            self.nodes[child.0].parent = None;
        }
        if !html.is_empty() {
            let raw = self.push(NodeKind::Raw(html.to_string()), Some(*node));
            self.nodes[node.0].children.push(raw);
        }
        self.writes += 1;
        Ok(())
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), TreeError> {
        let attrs = self.attrs_mut(*node)?;
        let current = attrs.get("class").map(String::as_str).unwrap_or_default();
        if !current.split_ascii_whitespace().any(|c| c == class) {
            let next = if current.trim().is_empty() {
                class.to_string()
            } else {
                format!("{} {class}", current.trim_end())
            };
            attrs.insert("class".to_string(), next);
        }
        self.writes += 1;
        Ok(())
    }
}

/// Remove `<...>` tags from markup, keeping the text between them.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
