//! Pairing a delay marker with the scheduled time it modifies.
//!
//! The markup differs between the compact journey rows and the per-stop
//! lists, so the lookup tries progressively wider scopes:
//!
//! 1. the previous element sibling (a time element, or any text with `H:MM`),
//! 2. the first time element under the parent,
//! 3. the first time element under the grandparent.

#[cfg(test)]
#[path = "resolve_test.rs"]
mod resolve_test;

use crate::clock::find_time;
use crate::consts::TIME_TAG;
use crate::tree::{DocumentTree, Selector};

/// Scheduled time text for `marker`, or `None` if nothing nearby has one.
///
/// The first scope that yields a time element wins even when its text is
/// empty; an empty result is reported as `None`.
pub fn resolve_scheduled_time<T: DocumentTree>(tree: &T, marker: &T::Node) -> Option<String> {
    let time = Selector::Tag(TIME_TAG);

    let found = from_sibling(tree, marker, &time)
        .or_else(|| {
            let parent = tree.parent(marker)?;
            time_within(tree, &parent, &time)
        })
        .or_else(|| {
            let grandparent = tree.parent(&tree.parent(marker)?)?;
            time_within(tree, &grandparent, &time)
        })?;

    if found.is_empty() { None } else { Some(found) }
}

fn from_sibling<T: DocumentTree>(tree: &T, marker: &T::Node, time: &Selector<'_>) -> Option<String> {
    let sibling = tree.previous_sibling(marker)?;
    let text = tree.text(&sibling);
    if tree.matches(&sibling, time) {
        return Some(text.trim().to_string());
    }
    find_time(&text).map(str::to_string)
}

fn time_within<T: DocumentTree>(tree: &T, scope: &T::Node, time: &Selector<'_>) -> Option<String> {
    let element = tree.select_within(scope, time)?;
    Some(tree.text(&element).trim().to_string())
}
