//! Open/closed state of the collapsible navigation panel on narrow screens.
//!
//! The panel only exists when the page has a header, a toggle button, and a
//! navigation container; otherwise it is built disabled and never opens.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

/// Class/attribute update for the host to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Add the open classes and set `aria-expanded="true"`.
    Open,
    /// Remove the open classes and set `aria-expanded="false"`.
    Close,
}

#[derive(Debug, Clone)]
pub struct NavPanel {
    enabled: bool,
    open: bool,
    breakpoint_px: f64,
}

impl NavPanel {
    #[must_use]
    pub fn new(enabled: bool, breakpoint_px: f64) -> Self {
        Self { enabled, open: false, breakpoint_px }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn on_toggle(&mut self) -> Option<PanelAction> {
        if !self.enabled {
            return None;
        }
        if self.open { self.close() } else { self.set_open() }
    }

    pub fn on_escape(&mut self) -> Option<PanelAction> {
        self.close()
    }

    /// A click anywhere in the document. `inside` is true when the target is
    /// within the panel or the toggle button.
    pub fn on_document_click(&mut self, inside: bool) -> Option<PanelAction> {
        if inside {
            return None;
        }
        self.close()
    }

    pub fn on_menu_click(&mut self) -> Option<PanelAction> {
        self.close()
    }

    /// The viewport was resized to `width_px`.
    pub fn on_resize(&mut self, width_px: f64) -> Option<PanelAction> {
        if width_px > self.breakpoint_px { self.close() } else { None }
    }

    fn set_open(&mut self) -> Option<PanelAction> {
        self.open = true;
        Some(PanelAction::Open)
    }

    fn close(&mut self) -> Option<PanelAction> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(PanelAction::Close)
    }
}
