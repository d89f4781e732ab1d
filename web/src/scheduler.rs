//! When to run the annotation pass.
//!
//! The journey planner renders client-side and re-renders on navigation, so
//! there is no single moment when the markers are ready. Instead the pass
//! runs on a fixed series of timers after start-up and again shortly after
//! every batch of DOM mutations. Extra runs are harmless: annotated markers
//! are flagged and skipped.

use gloo_timers::callback::Timeout;
use nsdelay::config::AnnotatorConfig;
use nsdelay::engine::{PassReport, process_delays};
use nsdelay::styles::{STYLE_ELEMENT_ID, STYLESHEET};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, MutationObserver, MutationObserverInit};

use crate::dom::{WebTree, js_reason};

/// Start once the document has been parsed.
pub fn boot(config: AnnotatorConfig) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("no document; delay annotation disabled");
        return;
    };

    if document.ready_state() != "loading" {
        start(&document, &config);
        return;
    }

    let deferred = document.clone();
    let on_ready = Closure::once_into_js(move || start(&deferred, &config));
    if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref()) {
        log::warn!("could not wait for DOMContentLoaded: {}", js_reason(&err));
    }
}

fn start(document: &Document, config: &AnnotatorConfig) {
    inject_stylesheet(document);
    schedule_passes(&config.initial_scans_ms);
    if config.observe_mutations {
        observe_body(document, config.mutation_rescans_ms.clone());
    }
    log::info!(
        "delay annotation armed: {} start-up passes, mutation rescans {:?}",
        config.initial_scans_ms.len(),
        config.mutation_rescans_ms
    );
}

/// One pass over the current document.
pub fn run_pass() -> PassReport {
    match WebTree::current() {
        Some(mut tree) => process_delays(&mut tree),
        None => PassReport::default(),
    }
}

fn schedule_passes(delays_ms: &[u32]) {
    for &ms in delays_ms {
        Timeout::new(ms, || {
            run_pass();
        })
        .forget();
    }
}

fn observe_body(document: &Document, rescans_ms: Vec<u32>) {
    let Some(body) = document.body() else {
        log::warn!("document has no body; mutation rescans disabled");
        return;
    };

    let on_mutation = Closure::<dyn FnMut()>::new(move || schedule_passes(&rescans_ms));
    let observer = match MutationObserver::new(on_mutation.as_ref().unchecked_ref()) {
        Ok(observer) => observer,
        Err(err) => {
            log::warn!("could not create MutationObserver: {}", js_reason(&err));
            return;
        }
    };

    let options = MutationObserverInit::new();
    options.set_child_list(true);
    options.set_subtree(true);
    if let Err(err) = observer.observe_with_options(&body, &options) {
        log::warn!("could not observe document body: {}", js_reason(&err));
        return;
    }

    // The observer lives as long as the page; so must its callback.
    on_mutation.forget();
}

fn inject_stylesheet(document: &Document) {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return;
    }
    let Some(head) = document.head() else {
        log::warn!("document has no head; annotation styles not injected");
        return;
    };
    let style = match document.create_element("style") {
        Ok(style) => style,
        Err(err) => {
            log::warn!("could not create style element: {}", js_reason(&err));
            return;
        }
    };
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(STYLESHEET));
    if let Err(err) = head.append_child(&style) {
        log::warn!("could not inject annotation styles: {}", js_reason(&err));
    }
}
