//! # nsdelay-web
//!
//! WebAssembly adapter that runs the `nsdelay` annotation pass on the live
//! journey planner page. The core crate knows nothing about the browser; this
//! crate supplies the DOM binding ([`dom::WebTree`]), the start-up and
//! re-scan scheduling ([`scheduler`]), and the page-level configuration
//! ([`settings`]).
//!
//! The module starts itself when loaded. The page (or a user script wrapper)
//! may also call `processDelays()` directly at any time.

pub mod dom;
pub mod scheduler;
pub mod settings;

use wasm_bindgen::prelude::*;

/// Entry point run by the wasm-bindgen loader.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("nsdelay: logger unavailable: {err}")));
    }
    log::set_max_level(log::LevelFilter::Warn);

    let config = settings::load();
    log::set_max_level(settings::log_level(config.log_level).to_level_filter());
    scheduler::boot(config);
}

/// Run one annotation pass now. Returns the number of markers annotated.
#[wasm_bindgen(js_name = processDelays)]
pub fn process_delays() -> u32 {
    let report = scheduler::run_pass();
    u32::try_from(report.annotated).unwrap_or(u32::MAX)
}
