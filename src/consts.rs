//! Shared names for the journey planner markup this crate reads and writes.

// ── Page markup (read) ──────────────────────────────────────────

/// Element that wraps one delay indicator.
pub const MARKER_TAG: &str = "rio-jp-delay";

/// Class of the element inside a marker that holds the visible delay text.
pub const DISPLAY_CLASS: &str = "rio-jp-delay";

/// Element holding a published `H:MM` time.
pub const TIME_TAG: &str = "rio-jp-time";

// ── Annotation markup (written) ─────────────────────────────────

/// Marker attribute set once a marker has been annotated.
pub const PROCESSED_ATTR: &str = "data-ns-converted";

/// Value written to [`PROCESSED_ATTR`].
pub const PROCESSED_VALUE: &str = "true";

/// Attribute carrying the hover tooltip on the display element.
pub const TOOLTIP_ATTR: &str = "title";

/// Class on the span wrapping the `+`/`-` glyph. Reused from the page so the
/// sign keeps its original styling.
pub const SIGN_CLASS: &str = "rio-jp-delay-sign";

/// Class on the span holding `(HH:MM)`.
pub const ACTUAL_TIME_CLASS: &str = "ns-actual-time";

/// Extra class on the actual-time span in the stacked layout.
pub const STACKED_CLASS: &str = "ns-stacked";

/// Class on the span wrapping sign and magnitude in the stacked layout.
pub const DELAY_ROW_CLASS: &str = "ns-delay-row";

/// Class added to the display element itself in the stacked layout.
pub const STACKED_CONTAINER_CLASS: &str = "ns-stacked-container";

// ── Time ────────────────────────────────────────────────────────

/// Minutes in one day; actual times wrap modulo this.
pub const MINUTES_PER_DAY: i64 = 1440;

/// Upper bound accepted for any configured scan delay.
pub const MAX_SCAN_DELAY_MS: u32 = 60_000;
