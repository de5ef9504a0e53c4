//! Page navigation and display-mode controllers for the portfolio site.
//!
//! This crate holds every piece of page-controller logic that does not need a
//! browser. The `pagectl` host crate scans the document, feeds layout
//! snapshots and DOM events into the controllers defined here, and applies
//! the actions they return (attribute updates, history replaces, timers).
//! Keeping the state machines free of `web_sys` lets them run under plain
//! `cargo test` with virtual time.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`sync`] | Active-section reconciliation ([`sync::NavSync`]) |
//! | [`section`] | Section extents, viewport snapshot, in-view detection |
//! | [`lease`] | Suppression lease and per-frame scroll throttle |
//! | [`theme`] | Light/dark/system-auto preference state machine |
//! | [`panel`] | Collapsible navigation panel open/closed state |
//! | [`config`] | Page tunables parsed from JSON |
//! | [`consts`] | Shared defaults (storage key, margins, breakpoint) |

pub mod config;
pub mod consts;
pub mod lease;
pub mod panel;
pub mod section;
pub mod sync;
pub mod theme;
