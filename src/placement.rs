//! Detailed-vs-summary layout heuristic.
//!
//! Inside the per-stop itinerary the delay column is narrow, so the actual
//! time is stacked under the delay. Everywhere else it goes inline. The page
//! gives no explicit signal for this; the rules below match the containers
//! the itinerary currently renders and will need updating when that markup
//! changes.

#[cfg(test)]
#[path = "placement_test.rs"]
mod placement_test;

use serde::Serialize;

use crate::tree::{DocumentTree, Selector};

/// How the actual time is laid out next to the delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `+5(09:10)` on one line.
    Inline,
    /// `+5` with `(09:10)` underneath.
    Stacked,
}

/// A structural pattern that marks an itinerary row.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// The marker, or an ancestor, matches.
    Within(Selector<'static>),
    /// The marker, or an ancestor, matches `inner`, and that element has an
    /// ancestor matching `outer`.
    WithinNested { outer: Selector<'static>, inner: Selector<'static> },
}

/// Containers that only appear in the per-stop itinerary view.
pub const DETAILED_VIEW_RULES: &[Rule] = &[
    Rule::Within(Selector::Tag("rio-jp-leg")),
    Rule::Within(Selector::Tag("rio-jp-stop")),
    Rule::Within(Selector::ClassContains("rio-jp-leg")),
    Rule::WithinNested {
        outer: Selector::Class("rio-jp-trip-container"),
        inner: Selector::Tag("rio-jp-delay-container"),
    },
    Rule::Within(Selector::ClassContains("nes-flex-col")),
];

impl Rule {
    fn holds<T: DocumentTree>(&self, tree: &T, marker: &T::Node) -> bool {
        match self {
            Self::Within(selector) => tree.closest(marker, selector).is_some(),
            Self::WithinNested { outer, inner } => {
                let mut start = Some(marker.clone());
                while let Some(node) = start {
                    let Some(candidate) = tree.closest(&node, inner) else {
                        return false;
                    };
                    let above = tree.parent(&candidate);
                    if above.as_ref().is_some_and(|p| tree.closest(p, outer).is_some()) {
                        return true;
                    }
                    start = above;
                }
                false
            }
        }
    }
}

/// Whether `marker` sits inside the detailed itinerary view.
pub fn is_detailed_view<T: DocumentTree>(tree: &T, marker: &T::Node) -> bool {
    DETAILED_VIEW_RULES.iter().any(|rule| rule.holds(tree, marker))
}

/// Layout to use for `marker`.
pub fn layout_for<T: DocumentTree>(tree: &T, marker: &T::Node) -> Layout {
    if is_detailed_view(tree, marker) { Layout::Stacked } else { Layout::Inline }
}
