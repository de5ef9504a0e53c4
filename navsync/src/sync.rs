//! Active-section reconciliation between scrolling, menu clicks, and history.
//!
//! [`NavSync`] owns the single `active_hash` that decides which menu entry
//! carries `aria-current`. Three sources race to set it:
//!
//! - the scroll position (sampled once per animation frame),
//! - an explicit click on a menu entry,
//! - a `hashchange` from back/forward or a typed URL.
//!
//! A click wins immediately and arms a [`SuppressionLease`] so the sections
//! passed during the browser's smooth scroll do not flicker through the
//! indicator. The lease ends on `scrollend`, when the host's release timer
//! fires, or simply when its deadline passes.
//!
//! Handlers never touch the DOM. They return [`NavAction`]s for the host to
//! apply, and return an empty list when nothing changed, so repeated calls
//! with the same inputs never write attributes or history twice.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use crate::config::PageConfig;
use crate::lease::SuppressionLease;
use crate::section::{Section, Viewport, detect_section};

/// Side effects requested by [`NavSync`] handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum NavAction {
    /// Mark the entry pointing at this fragment as current.
    MarkCurrent(String),
    /// Remove the current marker from the entry pointing at this fragment.
    ClearCurrent(String),
    /// Rewrite the address fragment in place (history replace, never push).
    /// `None` means the bare path, used for the top of the page.
    ReplaceFragment(Option<String>),
    /// Call [`NavSync::on_suppression_elapsed`] after this delay, cancelling
    /// any release that is already scheduled.
    ScheduleRelease { after_ms: f64 },
}

/// Numeric and fragment settings taken from [`PageConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct NavSettings {
    pub lookahead_margin_px: f64,
    pub edge_tolerance_px: f64,
    pub suppression_ms: f64,
    pub top_hash: String,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self::from(&PageConfig::default())
    }
}

impl From<&PageConfig> for NavSettings {
    fn from(config: &PageConfig) -> Self {
        Self {
            lookahead_margin_px: config.lookahead_margin_px,
            edge_tolerance_px: config.edge_tolerance_px,
            suppression_ms: config.suppression_ms,
            top_hash: config.top_hash.clone(),
        }
    }
}

/// Keeps the current menu entry in step with what the viewer is looking at.
#[derive(Debug, Clone)]
pub struct NavSync {
    settings: NavSettings,
    /// Fragments of menu entries whose target section exists, in menu order.
    entries: Vec<String>,
    active_hash: Option<String>,
    lease: SuppressionLease,
    /// Fragment most recently written by a history replace, until the next
    /// activation that did not write one.
    last_replaced: Option<String>,
}

impl NavSync {
    /// Build a controller from the section ids and menu-entry fragments
    /// scanned at startup.
    ///
    /// Entries whose fragment names no section are inert and dropped here.
    /// Duplicate fragments collapse into one entry.
    #[must_use]
    pub fn new(section_ids: &[String], entry_hashes: &[String], settings: NavSettings) -> Self {
        let mut entries: Vec<String> = Vec::new();
        for hash in entry_hashes {
            let Some(id) = hash.strip_prefix('#') else {
                log::debug!("navsync: ignoring menu entry without fragment: {hash:?}");
                continue;
            };
            if id.is_empty() || !section_ids.iter().any(|section| section == id) {
                log::debug!("navsync: menu entry {hash} has no matching section");
                continue;
            }
            if !entries.contains(hash) {
                entries.push(hash.clone());
            }
        }
        if section_ids.is_empty() || entries.is_empty() {
            log::info!("navsync: no sections or menu entries; scroll sync disabled");
        }
        Self { settings, entries, active_hash: None, lease: SuppressionLease::default(), last_replaced: None }
    }

    /// Whether there is anything to synchronize.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.entries.is_empty()
    }

    #[must_use]
    pub fn active_hash(&self) -> Option<&str> {
        self.active_hash.as_deref()
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn settings(&self) -> &NavSettings {
        &self.settings
    }

    #[must_use]
    pub fn is_suppressed(&self, now_ms: f64) -> bool {
        self.lease.is_active(now_ms)
    }

    /// Start (or restart) the suppression window and ask the host to schedule
    /// its release.
    pub fn arm_suppression(&mut self, now_ms: f64) -> NavAction {
        self.lease.arm(now_ms, self.settings.suppression_ms);
        NavAction::ScheduleRelease { after_ms: self.settings.suppression_ms }
    }

    /// Normalize a raw `location.hash`: empty and bare `#` mean the page top.
    #[must_use]
    pub fn normalize_hash(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "#" {
            return self.settings.top_hash.clone();
        }
        if trimmed.starts_with('#') {
            trimmed.to_owned()
        } else {
            format!("#{trimmed}")
        }
    }

    // --- Event handlers ---

    /// Scroll tick, already throttled to one call per animation frame.
    pub fn on_scroll(&mut self, sections: &[Section], viewport: &Viewport, now_ms: f64) -> Vec<NavAction> {
        if !self.is_enabled() || self.lease.is_active(now_ms) {
            return Vec::new();
        }
        self.lease.release();
        self.reconcile(sections, viewport)
    }

    /// A menu entry was clicked. The browser performs the (smooth) scroll and
    /// pushes the fragment itself.
    pub fn on_menu_click(&mut self, raw_hash: &str, now_ms: f64) -> Vec<NavAction> {
        if !self.is_enabled() {
            return Vec::new();
        }
        let hash = self.normalize_hash(raw_hash);
        if !self.is_live(&hash) {
            return Vec::new();
        }
        let mut actions = self.activate(&hash, false);
        actions.push(self.arm_suppression(now_ms));
        log::debug!("navsync: click on {hash}, scroll sync suppressed");
        actions
    }

    /// `hashchange` fired. Echoes of this controller's own writes and of a
    /// click that already took effect are ignored.
    pub fn on_hash_change(&mut self, raw_hash: &str, now_ms: f64) -> Vec<NavAction> {
        if !self.is_enabled() {
            return Vec::new();
        }
        let hash = self.normalize_hash(raw_hash);
        if self.last_replaced.as_deref() == Some(hash.as_str()) || self.active_hash.as_deref() == Some(hash.as_str()) {
            return Vec::new();
        }
        if !self.is_live(&hash) {
            log::debug!("navsync: hash {hash} matches no menu entry; state unchanged");
            return Vec::new();
        }
        let mut actions = self.activate(&hash, false);
        actions.push(self.arm_suppression(now_ms));
        log::debug!("navsync: external navigation to {hash}");
        actions
    }

    /// Page load: trust the URL fragment first, then correct it against the
    /// real scroll position unless a click is still settling.
    pub fn on_load(&mut self, raw_hash: &str, sections: &[Section], viewport: &Viewport, now_ms: f64) -> Vec<NavAction> {
        if !self.is_enabled() {
            return Vec::new();
        }
        let hash = self.normalize_hash(raw_hash);
        let mut actions = self.activate(&hash, false);
        if !self.lease.is_active(now_ms) {
            actions.extend(self.reconcile(sections, viewport));
        }
        actions
    }

    /// `scrollend` fired: the scroll has physically stopped, so the lease is
    /// no longer needed.
    pub fn on_scroll_end(&mut self, sections: &[Section], viewport: &Viewport) -> Vec<NavAction> {
        if !self.is_enabled() {
            return Vec::new();
        }
        if self.lease.release() {
            log::debug!("navsync: scroll settled, sync resumed");
        }
        self.reconcile(sections, viewport)
    }

    /// The host's release timer fired. A timer from an earlier arm that
    /// outlived a re-arm is ignored.
    pub fn on_suppression_elapsed(&mut self, sections: &[Section], viewport: &Viewport, now_ms: f64) -> Vec<NavAction> {
        if !self.is_enabled() || self.lease.is_active(now_ms) {
            return Vec::new();
        }
        self.lease.release();
        self.reconcile(sections, viewport)
    }

    // --- Internals ---

    fn is_live(&self, hash: &str) -> bool {
        self.entries.iter().any(|entry| entry == hash)
    }

    /// Detect the in-view section and activate it, writing history.
    fn reconcile(&mut self, sections: &[Section], viewport: &Viewport) -> Vec<NavAction> {
        let Some(section) = detect_section(
            sections,
            viewport,
            self.settings.lookahead_margin_px,
            self.settings.edge_tolerance_px,
        ) else {
            return Vec::new();
        };
        let hash = section.hash();
        self.activate(&hash, true)
    }

    fn activate(&mut self, hash: &str, write_history: bool) -> Vec<NavAction> {
        if self.active_hash.as_deref() == Some(hash) || !self.is_live(hash) {
            return Vec::new();
        }

        let mut actions: Vec<NavAction> = self
            .entries
            .iter()
            .filter(|entry| entry.as_str() != hash)
            .map(|entry| NavAction::ClearCurrent(entry.clone()))
            .collect();
        actions.push(NavAction::MarkCurrent(hash.to_owned()));
        self.active_hash = Some(hash.to_owned());

        if write_history {
            let fragment = (hash != self.settings.top_hash).then(|| hash.to_owned());
            actions.push(NavAction::ReplaceFragment(fragment));
            self.last_replaced = Some(hash.to_owned());
        } else {
            self.last_replaced = None;
        }
        actions
    }
}
