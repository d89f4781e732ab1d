//! Delay text parsing.
//!
//! Marker text looks like `+5` or `-12`, sometimes surrounded by whitespace
//! or other copy. The page occasionally renders the digits twice (`+55` for a
//! five minute delay); [`parse_delay`] collapses that before reading the
//! number.

#[cfg(test)]
#[path = "delay_test.rs"]
mod delay_test;

use serde::Serialize;

/// Direction of a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sign {
    /// Later than scheduled.
    #[serde(rename = "+")]
    Plus,
    /// Earlier than scheduled.
    #[serde(rename = "-")]
    Minus,
}

impl Sign {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            _ => None,
        }
    }

    /// The glyph shown on the page.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

/// A delay read from marker text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedDelay {
    pub sign: Sign,
    /// Minutes after quirk normalization. Zero means no visible delay.
    pub magnitude: u32,
    /// `magnitude` with the sign applied.
    pub signed_minutes: i64,
}

impl ParsedDelay {
    #[must_use]
    pub fn new(sign: Sign, magnitude: u32) -> Self {
        let signed_minutes = match sign {
            Sign::Plus => i64::from(magnitude),
            Sign::Minus => -i64::from(magnitude),
        };
        Self { sign, magnitude, signed_minutes }
    }

    /// True when the delay should not be shown at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.magnitude == 0
    }
}

/// Parse the first signed integer in `text`.
///
/// Returns `None` when there is no sign immediately followed by a digit, or
/// when the digits do not fit in a `u32`.
#[must_use]
pub fn parse_delay(text: &str) -> Option<ParsedDelay> {
    let bytes = text.as_bytes();
    let (start, sign) = bytes.iter().enumerate().find_map(|(i, &b)| {
        let sign = Sign::from_char(char::from(b))?;
        bytes.get(i + 1).filter(|next| next.is_ascii_digit())?;
        Some((i + 1, sign))
    })?;

    let len = bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count();
    let digits = collapse_doubled(&text[start..start + len]);
    let Ok(magnitude) = digits.parse::<u32>() else {
        return None;
    };
    Some(ParsedDelay::new(sign, magnitude))
}

/// Undo the doubled-digit rendering defect: `"1212"` becomes `"12"`.
///
/// Only even-length runs whose halves match are collapsed.
#[must_use]
pub fn collapse_doubled(digits: &str) -> &str {
    let len = digits.len();
    if len >= 2 && len % 2 == 0 {
        let (first, second) = digits.split_at(len / 2);
        if first == second {
            return first;
        }
    }
    digits
}
