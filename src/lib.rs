//! Delay annotation engine for rendered journey planner pages.
//!
//! The page shows delays as compact markers (`+5`) next to the published
//! time. This crate finds those markers in a document tree, works out the
//! actual time, and rewrites the marker so it reads `+5 (09:20)`. It has no
//! opinion about where the tree comes from: the browser adapter in `web/`
//! binds it to the live DOM, the `cli/` binary binds it to JSON snapshots,
//! and the tests bind it to [`memdom::MemTree`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Plans and applies one annotation pass ([`engine::process_delays`]) |
//! | [`delay`] | Delay text parsing, including the doubled-digit quirk |
//! | [`clock`] | Time-of-day parsing, formatting, and wraparound arithmetic |
//! | [`resolve`] | Finds the scheduled time that belongs to a marker |
//! | [`placement`] | Detailed-vs-summary layout heuristic |
//! | [`render`] | Markup and tooltip for an annotated marker |
//! | [`tree`] | The [`tree::DocumentTree`] capability trait and selectors |
//! | [`memdom`] | Arena-backed in-memory tree with JSON snapshot loading |
//! | [`config`] | Scan schedule and logging configuration |
//! | [`styles`] | Static stylesheet injected by the browser adapter |
//! | [`consts`] | Element names, class names, and attribute names |

pub mod clock;
pub mod config;
pub mod consts;
pub mod delay;
pub mod engine;
pub mod memdom;
pub mod placement;
pub mod render;
pub mod resolve;
pub mod styles;
pub mod tree;
