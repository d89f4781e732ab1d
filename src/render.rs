//! Markup for an annotated delay.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::consts::{ACTUAL_TIME_CLASS, DELAY_ROW_CLASS, SIGN_CLASS, STACKED_CLASS};
use crate::delay::Sign;
use crate::placement::Layout;

/// Everything needed to rewrite one marker's display element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub sign: Sign,
    pub magnitude: u32,
    /// Scheduled time exactly as found on the page.
    pub scheduled: String,
    /// Computed `HH:MM`.
    pub actual: String,
    pub layout: Layout,
}

impl Annotation {
    /// Replacement content for the display element.
    #[must_use]
    pub fn to_html(&self) -> String {
        let sign = format!("<span class=\"{SIGN_CLASS}\">{}</span>{}", self.sign.as_str(), self.magnitude);
        match self.layout {
            Layout::Inline => format!("{sign}<span class=\"{ACTUAL_TIME_CLASS}\">({})</span>", self.actual),
            Layout::Stacked => format!(
                "<span class=\"{DELAY_ROW_CLASS}\">{sign}</span>\
                 <span class=\"{ACTUAL_TIME_CLASS} {STACKED_CLASS}\">({})</span>",
                self.actual
            ),
        }
    }

    /// Hover text for the display element.
    #[must_use]
    pub fn tooltip(&self) -> String {
        format!("Scheduled: {} → Actual: {}", self.scheduled, self.actual)
    }
}
