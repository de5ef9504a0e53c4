//! Section extents, the per-pass viewport snapshot, and in-view detection.
//!
//! Extents come from live layout (`offsetTop` / `offsetHeight`) and change on
//! resize or reflow, so the host re-reads them before every detection pass.
//! Nothing in this module caches geometry.

#[cfg(test)]
#[path = "section_test.rs"]
mod section_test;

/// A navigable region of the page, in document coordinates (CSS pixels).
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    #[must_use]
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self { id: id.into(), top, height }
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `y` falls inside the half-open interval `[top, bottom)`.
    #[must_use]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }

    /// The fragment a menu entry uses to point at this section.
    #[must_use]
    pub fn hash(&self) -> String {
        format!("#{}", self.id)
    }
}

/// Scroll and size readings taken together at the start of a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// `window.scrollY`.
    pub scroll_y: f64,
    /// `window.innerHeight`.
    pub viewport_height: f64,
    /// Full scrollable height of the document.
    pub document_height: f64,
    /// Height of the fixed header overlapping the top of the content.
    pub header_height: f64,
}

impl Viewport {
    /// Document y-coordinate used to decide which section is in view.
    #[must_use]
    pub fn probe(&self, lookahead_margin: f64) -> f64 {
        self.scroll_y + self.header_height + lookahead_margin
    }

    #[must_use]
    pub fn near_top(&self, tolerance: f64) -> bool {
        self.scroll_y <= tolerance
    }

    #[must_use]
    pub fn near_bottom(&self, tolerance: f64) -> bool {
        self.scroll_y + self.viewport_height >= self.document_height - tolerance
    }
}

/// Pick the section the viewer is looking at.
///
/// The probe sits below the fixed header plus a look-ahead margin. When
/// extents overlap, the last containing section wins. When the probe falls
/// in a gap (or past the last section), the first section is used at the
/// document top, the last section at the document bottom, and the first
/// section otherwise. Returns `None` only for an empty slice.
#[must_use]
pub fn detect_section<'a>(
    sections: &'a [Section],
    viewport: &Viewport,
    lookahead_margin: f64,
    edge_tolerance: f64,
) -> Option<&'a Section> {
    let probe = viewport.probe(lookahead_margin);
    if let Some(hit) = sections.iter().rev().find(|section| section.contains(probe)) {
        return Some(hit);
    }
    if viewport.near_top(edge_tolerance) {
        return sections.first();
    }
    if viewport.near_bottom(edge_tolerance) {
        return sections.last();
    }
    sections.first()
}
