//! DOM adapter: scans the page once, reads layout, and applies controller actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controllers in `navsync` never see a DOM node. This module is the only
//! place that knows the page's class names and attributes: it turns elements
//! into ids and fragments at startup, turns layout into [`Section`] and
//! [`Viewport`] snapshots on every pass, and turns returned actions back into
//! attribute, class, and history writes. A selector that matches nothing
//! simply leaves the corresponding feature without input.

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

use navsync::config::PageConfig;
#[cfg(feature = "hydrate")]
use navsync::consts::{THEME_DARK, THEME_LIGHT};
#[cfg(feature = "hydrate")]
use navsync::panel::PanelAction;
#[cfg(feature = "hydrate")]
use navsync::section::{Section, Viewport};
#[cfg(feature = "hydrate")]
use navsync::sync::NavAction;
#[cfg(feature = "hydrate")]
use navsync::theme::Appearance;

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(feature = "hydrate")]
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement, MediaQueryList, Node, Window};

pub const HEADER_SELECTOR: &str = ".site-header";
pub const NAV_TOGGLE_SELECTOR: &str = ".nav-toggle";
pub const PRIMARY_NAV_SELECTOR: &str = ".primary-nav";
pub const MODE_TOGGLE_SELECTOR: &str = ".mode-toggle";
pub const MENU_ENTRY_SELECTOR: &str = ".nav-chip";
pub const SECTION_SELECTOR: &str = ".page-section";

pub const HEADER_OPEN_CLASS: &str = "site-header--nav-open";
pub const BODY_OPEN_CLASS: &str = "nav-open";
pub const CURRENT_ATTRIBUTE: &str = "aria-current";
pub const EXPANDED_ATTRIBUTE: &str = "aria-expanded";
pub const CONFIG_ATTRIBUTE: &str = "data-page-config";

pub const COLOR_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Build the page config from the raw `data-page-config` attribute.
///
/// An absent or blank attribute yields defaults silently; an invalid one is
/// logged and also yields defaults.
#[must_use]
pub fn page_config_from_attribute(raw: Option<&str>) -> PageConfig {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return PageConfig::default();
    };
    match PageConfig::from_json(raw) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{CONFIG_ATTRIBUTE} ignored, using defaults: {e}");
            PageConfig::default()
        }
    }
}

/// URL passed to `history.replaceState`: the current path and query, plus the
/// fragment when there is one.
#[must_use]
pub fn replacement_url(pathname: &str, search: &str, fragment: Option<&str>) -> String {
    format!("{pathname}{search}{}", fragment.unwrap_or_default())
}

/// Element handles found at startup.
#[cfg(feature = "hydrate")]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub body: HtmlElement,
    pub header: Option<HtmlElement>,
    pub nav_toggle: Option<Element>,
    pub primary_nav: Option<Element>,
    pub mode_toggle: Option<Element>,
    /// Menu entries with the fragment each one targets, in document order.
    pub menu_entries: Vec<(String, HtmlAnchorElement)>,
    /// Sections with a non-empty id, in document order.
    pub sections: Vec<HtmlElement>,
}

#[cfg(feature = "hydrate")]
impl Page {
    /// Find every element the controllers use. `None` only when there is no
    /// window, document, or body at all.
    #[must_use]
    pub fn scan() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let body = document.body()?;

        let header = query(&document, HEADER_SELECTOR).and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let nav_toggle = query(&document, NAV_TOGGLE_SELECTOR);
        let primary_nav = query(&document, PRIMARY_NAV_SELECTOR);
        let mode_toggle = query(&document, MODE_TOGGLE_SELECTOR);

        let menu_entries = query_all(&document, MENU_ENTRY_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlAnchorElement>().ok())
            .map(|anchor| (anchor.hash(), anchor))
            .collect::<Vec<_>>();

        let sections = query_all(&document, SECTION_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .filter(|section| !section.id().is_empty())
            .collect::<Vec<_>>();

        log::debug!(
            "page scan: {} menu entries, {} sections, header={} nav_toggle={} mode_toggle={}",
            menu_entries.len(),
            sections.len(),
            header.is_some(),
            nav_toggle.is_some(),
            mode_toggle.is_some()
        );

        Some(Self { window, document, body, header, nav_toggle, primary_nav, mode_toggle, menu_entries, sections })
    }

    #[must_use]
    pub fn config(&self) -> PageConfig {
        page_config_from_attribute(self.body.get_attribute(CONFIG_ATTRIBUTE).as_deref())
    }

    #[must_use]
    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|el| el.id()).collect()
    }

    #[must_use]
    pub fn entry_hashes(&self) -> Vec<String> {
        self.menu_entries.iter().map(|(hash, _)| hash.clone()).collect()
    }

    /// The collapsible navigation needs its header, toggle, and container.
    #[must_use]
    pub fn has_nav_panel(&self) -> bool {
        self.header.is_some() && self.nav_toggle.is_some() && self.primary_nav.is_some()
    }

    // --- Layout reads ---

    #[must_use]
    pub fn read_sections(&self) -> Vec<Section> {
        self.sections
            .iter()
            .map(|el| Section::new(el.id(), f64::from(el.offset_top()), f64::from(el.offset_height())))
            .collect()
    }

    #[must_use]
    pub fn read_viewport(&self) -> Viewport {
        Viewport {
            scroll_y: self.window.scroll_y().unwrap_or(0.0),
            viewport_height: js_number(self.window.inner_height()),
            document_height: self
                .document
                .document_element()
                .map_or(0.0, |root| f64::from(root.scroll_height())),
            header_height: self.header.as_ref().map_or(0.0, |h| f64::from(h.offset_height())),
        }
    }

    #[must_use]
    pub fn viewport_width(&self) -> f64 {
        js_number(self.window.inner_width())
    }

    #[must_use]
    pub fn current_hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    #[must_use]
    pub fn color_scheme_query(&self) -> Option<MediaQueryList> {
        self.window.match_media(COLOR_SCHEME_QUERY).ok().flatten()
    }

    #[must_use]
    pub fn system_prefers_dark(&self) -> bool {
        self.color_scheme_query().is_some_and(|mq| mq.matches())
    }

    /// Whether a click target lies inside the navigation container or its toggle.
    #[must_use]
    pub fn is_inside_nav(&self, target: Option<&Node>) -> bool {
        let Some(target) = target else {
            return false;
        };
        [&self.primary_nav, &self.nav_toggle]
            .into_iter()
            .flatten()
            .any(|el| el.contains(Some(target)))
    }

    // --- Writes ---

    /// Apply a navigation action. `ScheduleRelease` is a timer request and is
    /// handled by the host, not here.
    pub fn apply_nav(&self, action: &NavAction) {
        match action {
            NavAction::MarkCurrent(hash) => {
                if let Some((_, anchor)) = self.menu_entries.iter().find(|(h, _)| h == hash) {
                    let _ = anchor.set_attribute(CURRENT_ATTRIBUTE, "page");
                }
            }
            NavAction::ClearCurrent(hash) => {
                for (_, anchor) in self.menu_entries.iter().filter(|(h, _)| h == hash) {
                    let _ = anchor.remove_attribute(CURRENT_ATTRIBUTE);
                }
            }
            NavAction::ReplaceFragment(fragment) => self.replace_fragment(fragment.as_deref()),
            NavAction::ScheduleRelease { .. } => {}
        }
    }

    pub fn apply_panel(&self, action: PanelAction) {
        let open = action == PanelAction::Open;
        if let Some(header) = &self.header {
            toggle_class(header, HEADER_OPEN_CLASS, open);
        }
        toggle_class(&self.body, BODY_OPEN_CLASS, open);
        if let Some(toggle) = &self.nav_toggle {
            let _ = toggle.set_attribute(EXPANDED_ATTRIBUTE, if open { "true" } else { "false" });
        }
    }

    pub fn apply_appearance(&self, appearance: Appearance) {
        let classes = self.body.class_list();
        let _ = classes.remove_2(THEME_LIGHT, THEME_DARK);
        let _ = classes.add_1(appearance.class_name());
    }

    fn replace_fragment(&self, fragment: Option<&str>) {
        let location = self.window.location();
        let url = replacement_url(
            &location.pathname().unwrap_or_default(),
            &location.search().unwrap_or_default(),
            fragment,
        );
        let Ok(history) = self.window.history() else {
            return;
        };
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log::warn!("history.replaceState failed for {url}: {e:?}");
        }
    }
}

#[cfg(feature = "hydrate")]
fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

#[cfg(feature = "hydrate")]
fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

#[cfg(feature = "hydrate")]
fn toggle_class(el: &Element, class: &str, on: bool) {
    let classes = el.class_list();
    let _ = if on { classes.add_1(class) } else { classes.remove_1(class) };
}

#[cfg(feature = "hydrate")]
fn js_number(value: Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}
