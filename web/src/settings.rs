//! Page-supplied configuration.
//!
//! A page or user-script wrapper can set `window.nsDelayConfig` before the
//! module loads, e.g. `{ "log_level": "debug", "observe_mutations": false }`.
//! Anything missing or malformed falls back to the defaults.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use nsdelay::config::{AnnotatorConfig, LogLevel};
use wasm_bindgen::JsValue;

use crate::dom::js_reason;

/// Global the configuration is read from.
pub const CONFIG_GLOBAL: &str = "nsDelayConfig";

/// Configuration for this page.
pub fn load() -> AnnotatorConfig {
    from_global(read_global())
}

/// Settle the outcome of reading the global: absent means defaults, and so
/// does anything unreadable, with a warning.
pub fn from_global(read: Result<Option<String>, String>) -> AnnotatorConfig {
    match read {
        Ok(Some(raw)) => parse(&raw),
        Ok(None) => AnnotatorConfig::default(),
        Err(reason) => {
            log::warn!("could not read window.{CONFIG_GLOBAL}: {reason}");
            AnnotatorConfig::default()
        }
    }
}

/// Parse configuration JSON, falling back to defaults on error.
pub fn parse(raw: &str) -> AnnotatorConfig {
    AnnotatorConfig::from_json(raw).unwrap_or_else(|err| {
        log::warn!("ignoring window.{CONFIG_GLOBAL}: {err}");
        AnnotatorConfig::default()
    })
}

/// Map the configured level onto the `log` facade.
#[must_use]
pub fn log_level(level: LogLevel) -> log::Level {
    match level {
        LogLevel::Error => log::Level::Error,
        LogLevel::Warn => log::Level::Warn,
        LogLevel::Info => log::Level::Info,
        LogLevel::Debug => log::Level::Debug,
        LogLevel::Trace => log::Level::Trace,
    }
}

fn read_global() -> Result<Option<String>, String> {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).map_err(|err| js_reason(&err))?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    let json = js_sys::JSON::stringify(&value).map_err(|err| js_reason(&err))?;
    serialized(json.as_string()).map(Some)
}

/// `JSON.stringify` yields `undefined` for functions and symbols.
fn serialized(json: Option<String>) -> Result<String, String> {
    json.ok_or_else(|| "value is not JSON-serializable".to_string())
}
