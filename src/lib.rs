//! Roster chart engine: drag students around a score chart, edit the roster,
//! and move it in and out of CSV.
//!
//! This crate is compiled to WebAssembly and runs in the browser, and it also
//! builds natively for the `roster` CLI. It owns the roster state, the
//! mapping between score space and chart pixels, the drag gesture state
//! machine, and the CSV codec. The host layer is responsible only for wiring
//! DOM events to the engine and redrawing when it reports
//! [`engine::Action::RenderNeeded`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Roster owner and testable [`engine::EngineCore`] |
//! | [`roster`] | Student records and the in-memory roster |
//! | [`chart`] | Score/pixel coordinate conversions |
//! | [`input`] | Unified pointer events and drag state |
//! | [`drag`] | The drag gesture state machine |
//! | [`codec`] | CSV import and export |
//! | [`sort`] | Table sort spec and ordering |
//! | [`avatar`] | Placeholder avatar URLs |
//! | [`config`] | Chart and avatar configuration |
//! | [`web`] | Browser host: DOM event normalization and downloads |
//! | [`consts`] | Shared constants (chart geometry, CSV columns) |

pub mod avatar;
pub mod chart;
pub mod codec;
pub mod config;
pub mod consts;
pub mod drag;
pub mod engine;
pub mod input;
pub mod roster;
pub mod sort;
pub mod web;
