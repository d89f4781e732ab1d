//! The annotation pass.
//!
//! [`plan`] reads the tree and decides, for every marker that has not been
//! annotated yet, either an [`Action`] or a [`Skip`] reason. [`apply`] carries
//! out the actions. [`process_delays`] runs both and is what hosts call from
//! their timers and observers; it is cheap to call repeatedly because
//! annotated markers carry [`PROCESSED_ATTR`] and are never selected again.
//!
//! Skipped markers are left exactly as they were, unflagged, so a later pass
//! picks them up once the page has finished rendering them.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::clock::compute_actual_time;
use crate::consts::{DISPLAY_CLASS, MARKER_TAG, PROCESSED_ATTR, PROCESSED_VALUE, STACKED_CONTAINER_CLASS, TOOLTIP_ATTR};
use crate::delay::parse_delay;
use crate::placement::{Layout, layout_for};
use crate::render::Annotation;
use crate::resolve::resolve_scheduled_time;
use crate::tree::{DocumentTree, Selector, TreeError};

/// Why a marker was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Skip {
    /// The marker has no text yet.
    Blank,
    /// The text holds no signed number.
    NoDelay,
    /// The delay is zero minutes. Never flagged, so a later non-zero value
    /// is still picked up.
    ZeroDelay,
    /// No scheduled time could be found near the marker.
    NoScheduledTime,
    /// The scheduled time text is not a valid time of day.
    InvalidTime,
    /// The marker has no display element to rewrite.
    NoDisplay,
}

/// One planned rewrite.
#[derive(Debug, Clone)]
pub struct Action<N> {
    pub marker: N,
    pub display: N,
    pub annotation: Annotation,
}

/// Result of [`plan`].
#[derive(Debug, Clone)]
pub struct Plan<N> {
    pub actions: Vec<Action<N>>,
    pub skipped: Vec<(N, Skip)>,
}

impl<N> Plan<N> {
    /// Markers considered by the pass.
    #[must_use]
    pub fn scanned(&self) -> usize {
        self.actions.len() + self.skipped.len()
    }
}

/// Outcome of one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PassReport {
    /// Unprocessed markers found.
    pub scanned: usize,
    /// Markers rewritten and flagged.
    pub annotated: usize,
    /// Markers whose rewrite was rejected by the host tree.
    pub failed: usize,
    /// Skip counts by reason.
    pub skipped: BTreeMap<Skip, usize>,
}

impl PassReport {
    /// True when the pass found nothing to do.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.scanned == 0
    }

    /// Fold another pass into this one.
    pub fn merge(&mut self, other: &PassReport) {
        self.scanned += other.scanned;
        self.annotated += other.annotated;
        self.failed += other.failed;
        for (reason, count) in &other.skipped {
            *self.skipped.entry(*reason).or_default() += count;
        }
    }
}

/// Markers that have not been annotated, in document order.
pub fn unprocessed_markers<T: DocumentTree>(tree: &T) -> Vec<T::Node> {
    tree.select_all(&Selector::Tag(MARKER_TAG))
        .into_iter()
        .filter(|marker| tree.attribute(marker, PROCESSED_ATTR).is_none())
        .collect()
}

/// Decide what to do with a single marker.
pub fn evaluate<T: DocumentTree>(tree: &T, marker: &T::Node) -> Result<Action<T::Node>, Skip> {
    let text = tree.text(marker);
    let text = text.trim();
    if text.is_empty() {
        return Err(Skip::Blank);
    }

    let delay = parse_delay(text).ok_or(Skip::NoDelay)?;
    if delay.is_zero() {
        return Err(Skip::ZeroDelay);
    }

    let scheduled = resolve_scheduled_time(tree, marker).ok_or(Skip::NoScheduledTime)?;
    let actual = compute_actual_time(&scheduled, delay.signed_minutes).ok_or(Skip::InvalidTime)?;
    let display = tree
        .select_within(marker, &Selector::Class(DISPLAY_CLASS))
        .ok_or(Skip::NoDisplay)?;

    Ok(Action {
        marker: marker.clone(),
        display,
        annotation: Annotation {
            sign: delay.sign,
            magnitude: delay.magnitude,
            scheduled,
            actual,
            layout: layout_for(tree, marker),
        },
    })
}

/// Read-only half of a pass.
pub fn plan<T: DocumentTree>(tree: &T) -> Plan<T::Node> {
    let mut actions = Vec::new();
    let mut skipped = Vec::new();
    for marker in unprocessed_markers(tree) {
        match evaluate(tree, &marker) {
            Ok(action) => actions.push(action),
            Err(reason) => skipped.push((marker, reason)),
        }
    }
    Plan { actions, skipped }
}

/// Rewrite one display element and flag its marker.
///
/// The flag is written last, so a failure part-way leaves the marker
/// eligible for the next pass.
pub fn apply_action<T: DocumentTree>(tree: &mut T, action: &Action<T::Node>) -> Result<(), TreeError> {
    let annotation = &action.annotation;
    tree.set_inner_html(&action.display, &annotation.to_html())?;
    if annotation.layout == Layout::Stacked {
        tree.add_class(&action.display, STACKED_CONTAINER_CLASS)?;
    }
    tree.set_attribute(&action.display, TOOLTIP_ATTR, &annotation.tooltip())?;
    tree.set_attribute(&action.marker, PROCESSED_ATTR, PROCESSED_VALUE)
}

/// Write half of a pass.
pub fn apply<T: DocumentTree>(tree: &mut T, plan: &Plan<T::Node>) -> PassReport {
    let mut report = PassReport { scanned: plan.scanned(), ..PassReport::default() };

    for (_, reason) in &plan.skipped {
        tracing::debug!(?reason, "delay marker skipped");
        *report.skipped.entry(*reason).or_default() += 1;
    }

    for action in &plan.actions {
        match apply_action(tree, action) {
            Ok(()) => {
                tracing::trace!(
                    scheduled = %action.annotation.scheduled,
                    actual = %action.annotation.actual,
                    "delay marker annotated"
                );
                report.annotated += 1;
            }
            Err(error) => {
                tracing::warn!(%error, "delay annotation write failed");
                report.failed += 1;
            }
        }
    }

    report
}

/// Annotate every unprocessed marker in `tree`.
///
/// Safe to call at any time and any number of times.
pub fn process_delays<T: DocumentTree>(tree: &mut T) -> PassReport {
    let planned = plan(tree);
    let report = apply(tree, &planned);
    if !report.is_noop() {
        tracing::debug!(
            scanned = report.scanned,
            annotated = report.annotated,
            failed = report.failed,
            "delay pass complete"
        );
    }
    report
}
