//! The document capability the engine needs, and nothing more.
//!
//! Implementations exist for the browser DOM (`nsdelay-web`) and for the
//! in-memory [`crate::memdom::MemTree`]. Reads never fail: a node that has
//! gone away mid-render simply has no parent, no text, no match. Writes can
//! fail on a real DOM and report [`TreeError`].

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

/// A write against the host tree was rejected.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The host refused to set an attribute.
    #[error("failed to set attribute `{name}`: {reason}")]
    SetAttribute { name: String, reason: String },
    /// The host refused to change an element's class list.
    #[error("failed to add class `{class}`: {reason}")]
    AddClass { class: String, reason: String },
    /// The node handle no longer refers to an element.
    #[error("node is detached")]
    Detached,
}

/// The subset of CSS selectors the engine relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// Element name, compared case-insensitively.
    Tag(&'a str),
    /// Exact class token.
    Class(&'a str),
    /// Any class attribute containing the substring.
    ClassContains(&'a str),
}

impl Selector<'_> {
    /// Render as a CSS selector string.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Tag(tag) => (*tag).to_string(),
            Self::Class(class) => format!(".{class}"),
            Self::ClassContains(fragment) => format!("[class*=\"{fragment}\"]"),
        }
    }

    /// Test a tag name and class attribute against this selector.
    ///
    /// Shared by tree implementations that do not have a selector engine.
    #[must_use]
    pub fn matches_parts(&self, tag: &str, class_attr: Option<&str>) -> bool {
        match self {
            Self::Tag(want) => tag.eq_ignore_ascii_case(want),
            Self::Class(want) => class_attr.is_some_and(|attr| attr.split_ascii_whitespace().any(|c| c == *want)),
            Self::ClassContains(fragment) => class_attr.is_some_and(|attr| attr.contains(fragment)),
        }
    }
}

/// Minimal element access used by the annotation pass.
pub trait DocumentTree {
    /// Handle to an element.
    type Node: Clone;

    /// Every element in document order matching `selector`.
    fn select_all(&self, selector: &Selector<'_>) -> Vec<Self::Node>;

    /// First descendant of `scope` (excluding `scope`) matching `selector`.
    fn select_within(&self, scope: &Self::Node, selector: &Selector<'_>) -> Option<Self::Node>;

    /// Whether `node` itself matches `selector`.
    fn matches(&self, node: &Self::Node, selector: &Selector<'_>) -> bool;

    /// Parent element.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Closest preceding sibling that is an element.
    fn previous_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Concatenated text of the node and its descendants, untrimmed.
    fn text(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<(), TreeError>;

    /// Replace the node's children with parsed `html`.
    fn set_inner_html(&mut self, node: &Self::Node, html: &str) -> Result<(), TreeError>;

    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), TreeError>;

    /// `node` itself, or its nearest ancestor, matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &Selector<'_>) -> Option<Self::Node> {
        let mut current = Some(node.clone());
        while let Some(candidate) = current {
            if self.matches(&candidate, selector) {
                return Some(candidate);
            }
            current = self.parent(&candidate);
        }
        None
    }
}
