//! Time-of-day arithmetic.
//!
//! Times are `H:MM` or `HH:MM` strings on the page and minutes since midnight
//! internally. Day rollover is not tracked: `23:58` plus ten minutes is
//! `00:08`, nothing more.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use crate::consts::MINUTES_PER_DAY;

/// Locate the first `H:MM` or `HH:MM` in `text` and return the matched slice.
///
/// The hour takes two digits when it can, so `123:45` yields `23:45` and
/// `9:055` yields `9:05`. Range is not checked here.
#[must_use]
pub fn find_time(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let digit = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);
    let colon = |i: usize| bytes.get(i) == Some(&b':');

    (0..bytes.len()).find_map(|i| {
        if !digit(i) {
            return None;
        }
        if digit(i + 1) && colon(i + 2) && digit(i + 3) && digit(i + 4) {
            return Some(&text[i..i + 5]);
        }
        if colon(i + 1) && digit(i + 2) && digit(i + 3) {
            return Some(&text[i..i + 4]);
        }
        None
    })
}

/// Minutes since midnight for the first time found in `text`.
///
/// Returns `None` when no time is present or it names an impossible time of
/// day (hour above 23 or minute above 59).
#[must_use]
pub fn time_to_minutes(text: &str) -> Option<u32> {
    let (hours, minutes) = find_time(text)?.split_once(':')?;
    let hours = hours.parse::<u32>().unwrap_or(u32::MAX);
    let minutes = minutes.parse::<u32>().unwrap_or(u32::MAX);
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Format any minute count as `HH:MM`, wrapping into a single day.
#[must_use]
pub fn minutes_to_time(total_minutes: i64) -> String {
    let wrapped = total_minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Shift the time in `scheduled` by `signed_minutes`.
#[must_use]
pub fn compute_actual_time(scheduled: &str, signed_minutes: i64) -> Option<String> {
    let base = time_to_minutes(scheduled)?;
    Some(minutes_to_time(i64::from(base).saturating_add(signed_minutes)))
}
