use serde_json::json;

use super::*;
use crate::memdom::{MemTree, NodeId};

fn row(id: &str, time: &str, delay: &str) -> serde_json::Value {
    json!({ "tag": "div", "attrs": { "class": "journey-row" }, "children": [
        { "tag": "rio-jp-time", "children": [time] },
        { "tag": "rio-jp-delay", "attrs": { "id": id }, "children": [
            { "tag": "span", "attrs": { "class": "rio-jp-delay", "id": format!("{id}-display") }, "children": [delay] }
        ]}
    ]})
}

fn page(rows: Vec<serde_json::Value>) -> MemTree {
    MemTree::from_value(json!({ "tag": "main", "children": rows })).unwrap()
}

fn node(tree: &MemTree, id: &str) -> NodeId {
    tree.find_by_id(id).unwrap()
}

fn is_flagged(tree: &MemTree, id: &str) -> bool {
    tree.attribute(&node(tree, id), PROCESSED_ATTR).as_deref() == Some(PROCESSED_VALUE)
}

// =============================================================
// End to end
// =============================================================

#[test]
fn doubled_delay_is_annotated() {
    let mut tree = page(vec![row("a", "09:05", "+1010")]);
    let report = process_delays(&mut tree);

    assert_eq!(report.annotated, 1);
    let display = node(&tree, "a-display");
    assert_eq!(
        tree.inner_html(display),
        "<span class=\"rio-jp-delay-sign\">+</span>10<span class=\"ns-actual-time\">(09:15)</span>"
    );
    assert_eq!(
        tree.attribute(&display, TOOLTIP_ATTR).as_deref(),
        Some("Scheduled: 09:05 → Actual: 09:15")
    );
    assert!(is_flagged(&tree, "a"));
}

#[test]
fn early_delay_wraps_within_day() {
    let mut tree = page(vec![row("a", "23:50", "-5")]);
    process_delays(&mut tree);
    assert_eq!(tree.text(&node(&tree, "a-display")), "-5(23:45)");
}

#[test]
fn late_delay_wraps_past_midnight() {
    let mut tree = page(vec![row("a", "23:58", "+10")]);
    process_delays(&mut tree);
    assert_eq!(tree.text(&node(&tree, "a-display")), "+10(00:08)");
}

#[test]
fn stacked_layout_in_itinerary() {
    let mut tree = MemTree::from_value(json!({ "tag": "rio-jp-stop", "children": [row("a", "10:00", "+3")] })).unwrap();
    process_delays(&mut tree);

    let display = node(&tree, "a-display");
    assert_eq!(
        tree.inner_html(display),
        "<span class=\"ns-delay-row\"><span class=\"rio-jp-delay-sign\">+</span>3</span>\
         <span class=\"ns-actual-time ns-stacked\">(10:03)</span>"
    );
    assert_eq!(
        tree.attribute(&display, "class").as_deref(),
        Some("rio-jp-delay ns-stacked-container")
    );
}

#[test]
fn several_markers_in_one_pass() {
    let mut tree = page(vec![row("a", "08:00", "+2"), row("b", "08:30", "+0"), row("c", "09:00", "-1")]);
    let report = process_delays(&mut tree);

    assert_eq!(report.scanned, 3);
    assert_eq!(report.annotated, 2);
    assert_eq!(report.skipped.get(&Skip::ZeroDelay), Some(&1));
    assert!(is_flagged(&tree, "a"));
    assert!(!is_flagged(&tree, "b"));
    assert!(is_flagged(&tree, "c"));
}

// =============================================================
// Skips leave the marker untouched and unflagged
// =============================================================

fn single_skip(tree: &MemTree) -> Skip {
    let planned = plan(tree);
    assert!(planned.actions.is_empty());
    assert_eq!(planned.skipped.len(), 1);
    planned.skipped[0].1
}

#[test]
fn blank_marker_is_skipped() {
    let tree = page(vec![row("a", "09:00", "  ")]);
    assert_eq!(single_skip(&tree), Skip::Blank);
}

#[test]
fn text_without_delay_is_skipped() {
    let tree = page(vec![row("a", "09:00", "op tijd")]);
    assert_eq!(single_skip(&tree), Skip::NoDelay);
}

#[test]
fn zero_delay_is_skipped_and_retried() {
    let mut tree = page(vec![row("a", "09:00", "-00")]);
    assert_eq!(single_skip(&tree), Skip::ZeroDelay);

    process_delays(&mut tree);
    assert_eq!(tree.write_count(), 0);
    assert_eq!(plan(&tree).scanned(), 1);
}

#[test]
fn zero_delay_is_annotated_once_it_changes() {
    let mut tree = page(vec![row("a", "09:00", "+0")]);
    process_delays(&mut tree);
    assert!(!is_flagged(&tree, "a"));

    let display = node(&tree, "a-display");
    tree.set_inner_html(&display, "+77").unwrap();
    let report = process_delays(&mut tree);

    assert_eq!(report.annotated, 1);
    assert_eq!(tree.text(&display), "+7(09:07)");
    assert!(is_flagged(&tree, "a"));
}

#[test]
fn missing_time_is_skipped() {
    let tree = MemTree::from_value(json!({ "tag": "main", "children": [
        { "tag": "rio-jp-delay", "attrs": { "id": "a" }, "children": [
            { "tag": "span", "attrs": { "class": "rio-jp-delay" }, "children": ["+4"] }
        ]}
    ]}))
    .unwrap();
    assert_eq!(single_skip(&tree), Skip::NoScheduledTime);
}

#[test]
fn invalid_time_is_skipped() {
    let tree = page(vec![row("a", "25:00", "+4")]);
    assert_eq!(single_skip(&tree), Skip::InvalidTime);
}

#[test]
fn missing_display_is_skipped_and_left_unflagged() {
    let mut tree = MemTree::from_value(json!({ "tag": "main", "children": [
        { "tag": "rio-jp-time", "children": ["09:00"] },
        { "tag": "rio-jp-delay", "attrs": { "id": "a" }, "children": ["+4"] }
    ]}))
    .unwrap();
    assert_eq!(single_skip(&tree), Skip::NoDisplay);

    let report = process_delays(&mut tree);
    assert_eq!(report.skipped.get(&Skip::NoDisplay), Some(&1));
    assert!(!is_flagged(&tree, "a"));
    assert_eq!(tree.write_count(), 0);
}

// =============================================================
// Idempotence
// =============================================================

#[test]
fn second_pass_writes_nothing() {
    let mut tree = page(vec![row("a", "09:05", "+5"), row("b", "12:00", "-2")]);
    process_delays(&mut tree);
    let writes = tree.write_count();
    let html = tree.to_html();

    let first = process_delays(&mut tree);
    let second = process_delays(&mut tree);

    assert!(first.is_noop());
    assert!(second.is_noop());
    assert_eq!(tree.write_count(), writes);
    assert_eq!(tree.to_html(), html);
}

#[test]
fn flagged_markers_are_not_selected() {
    let tree = MemTree::from_value(json!({ "tag": "main", "children": [
        { "tag": "rio-jp-delay", "attrs": { "id": "done", "data-ns-converted": "true" }, "children": ["+4"] },
        { "tag": "rio-jp-delay", "attrs": { "id": "todo" }, "children": ["+4"] }
    ]}))
    .unwrap();
    assert_eq!(unprocessed_markers(&tree), vec![node(&tree, "todo")]);
}

// =============================================================
// Failed writes
// =============================================================

/// Delegates to `MemTree` but rejects every write of one attribute.
struct RejectingTree {
    inner: MemTree,
    rejected: &'static str,
}

impl DocumentTree for RejectingTree {
    type Node = NodeId;

    fn select_all(&self, selector: &Selector<'_>) -> Vec<NodeId> {
        self.inner.select_all(selector)
    }

    fn select_within(&self, scope: &NodeId, selector: &Selector<'_>) -> Option<NodeId> {
        self.inner.select_within(scope, selector)
    }

    fn matches(&self, node: &NodeId, selector: &Selector<'_>) -> bool {
        self.inner.matches(node, selector)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.inner.parent(node)
    }

    fn previous_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.inner.previous_sibling(node)
    }

    fn text(&self, node: &NodeId) -> String {
        self.inner.text(node)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.inner.attribute(node, name)
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), TreeError> {
        if name == self.rejected {
            return Err(TreeError::SetAttribute { name: name.to_string(), reason: "rejected".to_string() });
        }
        self.inner.set_attribute(node, name, value)
    }

    fn set_inner_html(&mut self, node: &NodeId, html: &str) -> Result<(), TreeError> {
        self.inner.set_inner_html(node, html)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), TreeError> {
        self.inner.add_class(node, class)
    }
}

#[test]
fn failed_tooltip_write_leaves_marker_unflagged() {
    let mut tree = RejectingTree { inner: page(vec![row("a", "09:05", "+5")]), rejected: TOOLTIP_ATTR };
    let report = process_delays(&mut tree);

    assert_eq!(report.failed, 1);
    assert_eq!(report.annotated, 0);
    assert!(!is_flagged(&tree.inner, "a"));

    tree.rejected = "none";
    let retry = process_delays(&mut tree);
    assert_eq!(retry.annotated, 1);
    assert!(is_flagged(&tree.inner, "a"));
}

// =============================================================
// Report
// =============================================================

#[test]
fn report_merge_sums_counts() {
    let mut total = PassReport::default();
    let mut pass = PassReport { scanned: 2, annotated: 1, failed: 0, skipped: BTreeMap::new() };
    pass.skipped.insert(Skip::NoDisplay, 1);
    total.merge(&pass);
    total.merge(&pass);
    assert_eq!(total.scanned, 4);
    assert_eq!(total.annotated, 2);
    assert_eq!(total.skipped.get(&Skip::NoDisplay), Some(&2));
}

#[test]
fn report_serializes_skip_reasons_as_keys() {
    let mut report = PassReport { scanned: 1, ..PassReport::default() };
    report.skipped.insert(Skip::ZeroDelay, 1);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({ "scanned": 1, "annotated": 0, "failed": 0, "skipped": { "zero_delay": 1 } })
    );
}
