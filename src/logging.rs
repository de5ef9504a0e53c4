//! Browser console logging and panic reporting.
//!
//! Controllers log through the `log` facade; in the browser build the records
//! are routed to `console.*` and panics are printed with their message
//! instead of an opaque `unreachable` trap.

#[cfg(test)]
#[path = "logging_test.rs"]
mod logging_test;

/// Maximum level emitted by this build.
#[must_use]
pub fn level() -> log::Level {
    if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info }
}

/// Install the console logger and panic hook. Later calls keep the first logger.
pub fn init() {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level()).is_err() {
            log::debug!("console logger already installed");
        }
    }
}
