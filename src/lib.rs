//! Browser host for the portfolio page controllers.
//!
//! Built with `--features hydrate` this is the WASM module loaded by the
//! static site: on start it installs console logging, scans the document, and
//! attaches the `navsync` controllers to it. Without the feature every module
//! still compiles so the pure helpers can be tested natively.
//!
//! | Module | Role |
//! |--------|------|
//! | [`host`] | Event wiring, shared controller state, release timer |
//! | [`dom`] | Element lookup, layout reads, action application |
//! | [`storage`] | `localStorage` preference store with session fallback |
//! | [`logging`] | Console logger and panic hook |

pub mod dom;
pub mod host;
pub mod logging;
pub mod storage;

/// WASM entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    logging::init();
    if !host::mount() {
        log::warn!("page controller inactive");
    }
}
