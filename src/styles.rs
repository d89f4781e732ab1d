//! Stylesheet for the annotation markup.
//!
//! Injected once per page by the browser adapter. The last three rules give
//! the itinerary rows room for the stacked layout.

pub const STYLESHEET: &str = r"
.ns-actual-time {
    color: #0063d3 !important;
    font-weight: 600 !important;
    font-size: 0.9em;
    margin-left: 2px;
    white-space: nowrap;
}

.ns-stacked-container {
    display: flex !important;
    flex-direction: column !important;
    align-items: flex-start !important;
    line-height: 1.3 !important;
}

.ns-delay-row {
    display: block !important;
    white-space: nowrap !important;
}

.ns-actual-time.ns-stacked {
    display: block !important;
    margin-left: 0 !important;
    margin-top: 2px;
    font-size: 0.85em;
}

.stop-details-grid {
    row-gap: 16px !important;
}

.nes-col-start-1:has(rio-jp-delay) {
    min-height: 45px !important;
    padding-bottom: 8px !important;
}

.nes-flex-col:has(rio-jp-delay) {
    padding-bottom: 10px !important;
}
";

/// `id` given to the injected `<style>` element so it is added only once.
pub const STYLE_ELEMENT_ID: &str = "ns-delay-converter-style";
