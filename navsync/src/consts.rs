//! Shared defaults for the navsync crate.

// ── Theme ───────────────────────────────────────────────────────

/// `localStorage` key holding the explicit theme choice.
pub const DEFAULT_STORAGE_KEY: &str = "syricoff-theme";

/// Stored value and body class for the light appearance.
pub const THEME_LIGHT: &str = "theme-light";

/// Stored value and body class for the dark appearance.
pub const THEME_DARK: &str = "theme-dark";

// ── Section detection ───────────────────────────────────────────

/// Extra look-ahead below the fixed header when probing for the in-view section.
pub const DEFAULT_LOOKAHEAD_MARGIN_PX: f64 = 24.0;

/// Distance from the document top or bottom still treated as "at the edge".
pub const DEFAULT_EDGE_TOLERANCE_PX: f64 = 2.0;

/// Fragment that stands for the page top; written to the address bar as a bare path.
pub const DEFAULT_TOP_HASH: &str = "#top";

// ── Timing ──────────────────────────────────────────────────────

/// How long a menu click keeps scroll-driven recomputation suppressed.
pub const DEFAULT_SUPPRESSION_MS: f64 = 1000.0;

// ── Navigation panel ────────────────────────────────────────────

/// Viewport width above which the collapsible navigation is forced closed.
pub const DEFAULT_NAV_BREAKPOINT_PX: f64 = 768.0;
