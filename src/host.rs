//! Browser host: owns the controllers, wires DOM events to them, and applies
//! the actions they return.
//!
//! All controller state lives in one `Rc<RefCell<Controllers>>` shared by the
//! event closures. Closures are leaked with `forget`; they live as long as the
//! page does. Handlers use `try_borrow_mut` and drop an event that arrives
//! while another handler still holds the state.

#[cfg(test)]
#[path = "host_test.rs"]
mod host_test;

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::rc::{Rc, Weak};

#[cfg(feature = "hydrate")]
use gloo_timers::callback::Timeout;
#[cfg(feature = "hydrate")]
use js_sys::Date;
#[cfg(feature = "hydrate")]
use navsync::lease::FrameThrottle;
#[cfg(feature = "hydrate")]
use navsync::panel::{NavPanel, PanelAction};
#[cfg(feature = "hydrate")]
use navsync::sync::{NavAction, NavSettings, NavSync};
#[cfg(feature = "hydrate")]
use navsync::theme::{Appearance, ThemeController};
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};
#[cfg(feature = "hydrate")]
use web_sys::{AddEventListenerOptions, Event, EventTarget, KeyboardEvent, Node};

#[cfg(feature = "hydrate")]
use crate::dom::Page;
#[cfg(feature = "hydrate")]
use crate::storage::BrowserStore;

/// Timer delay for a release requested `after_ms` from now. Rounded up with a
/// millisecond of slack so the timer never fires before the lease deadline.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn release_delay_ms(after_ms: f64) -> u32 {
    let ms = after_ms.max(0.0);
    (ms.ceil() + 1.0).min(f64::from(u32::MAX)) as u32
}

/// `KeyboardEvent.key` values that dismiss the navigation panel.
#[must_use]
pub fn is_escape(key: &str) -> bool {
    matches!(key, "Escape" | "Esc")
}

/// Attach every controller to the current document. Returns false when there
/// is no document body to attach to.
#[cfg(feature = "hydrate")]
pub fn mount() -> bool {
    let Some(page) = Page::scan() else {
        log::warn!("no document body, page controller not mounted");
        return false;
    };
    attach(page);
    true
}

/// Non-browser builds have no document.
#[cfg(not(feature = "hydrate"))]
pub fn mount() -> bool {
    false
}

#[cfg(feature = "hydrate")]
struct Controllers {
    page: Page,
    nav: NavSync,
    panel: NavPanel,
    theme: ThemeController<BrowserStore>,
    throttle: FrameThrottle,
    /// Pending lease release. Replacing it cancels the previous timer.
    release_timer: Option<Timeout>,
}

#[cfg(feature = "hydrate")]
type Shared = Rc<RefCell<Controllers>>;

#[cfg(feature = "hydrate")]
impl Controllers {
    fn apply_nav(&mut self, actions: Vec<NavAction>, weak: &Weak<RefCell<Self>>) {
        for action in actions {
            if let NavAction::ScheduleRelease { after_ms } = action {
                self.release_timer = Some(schedule_release(weak.clone(), after_ms));
            } else {
                self.page.apply_nav(&action);
            }
        }
    }

    fn apply_panel(&self, action: Option<PanelAction>) {
        if let Some(action) = action {
            self.page.apply_panel(action);
        }
    }

    fn apply_appearance(&self, appearance: Option<Appearance>) {
        if let Some(appearance) = appearance {
            self.page.apply_appearance(appearance);
        }
    }
}

#[cfg(feature = "hydrate")]
fn attach(page: Page) {
    let config = page.config();
    let nav = NavSync::new(&page.section_ids(), &page.entry_hashes(), NavSettings::from(&config));
    let panel = NavPanel::new(page.has_nav_panel(), config.nav_breakpoint_px);

    let store = BrowserStore::open();
    let durable = store.is_durable();
    let mut theme = ThemeController::new(store, config.storage_key.clone(), config.theme_policy);
    if let Some(appearance) = theme.initialize(page.system_prefers_dark()) {
        page.apply_appearance(appearance);
    }

    log::info!(
        "page controller mounted: scroll sync {}, nav panel {}, theme storage {}",
        if nav.is_enabled() { "on" } else { "off" },
        if page.has_nav_panel() { "on" } else { "off" },
        if durable { "local" } else { "session" }
    );

    let sync_enabled = nav.is_enabled();
    let shared: Shared = Rc::new(RefCell::new(Controllers {
        page,
        nav,
        panel,
        theme,
        throttle: FrameThrottle::default(),
        release_timer: None,
    }));

    wire_theme(&shared);
    wire_panel(&shared);
    if sync_enabled {
        wire_nav(&shared);
        drive_nav(&shared, |nav, page, now| {
            nav.on_load(&page.current_hash(), &page.read_sections(), &page.read_viewport(), now)
        });
    }
}

// --- Wiring ---

#[cfg(feature = "hydrate")]
fn wire_theme(shared: &Shared) {
    let c = shared.borrow();

    if let Some(toggle) = &c.page.mode_toggle {
        let shared = Rc::clone(shared);
        listen(toggle, "click", false, move |_| {
            let Ok(mut c) = shared.try_borrow_mut() else {
                return;
            };
            let system_dark = c.page.system_prefers_dark();
            let appearance = c.theme.toggle(system_dark);
            c.apply_appearance(appearance);
        });
    }

    if let Some(query) = c.page.color_scheme_query() {
        let shared = Rc::clone(shared);
        listen(&query, "change", false, move |_| {
            let Ok(mut c) = shared.try_borrow_mut() else {
                return;
            };
            let system_dark = c.page.system_prefers_dark();
            let appearance = c.theme.on_system_change(system_dark);
            c.apply_appearance(appearance);
        });
    }
}

#[cfg(feature = "hydrate")]
fn wire_panel(shared: &Shared) {
    let c = shared.borrow();

    if let Some(toggle) = &c.page.nav_toggle {
        let shared = Rc::clone(shared);
        listen(toggle, "click", false, move |_| {
            drive_panel(&shared, |panel, _| panel.on_toggle());
        });
    }

    let for_resize = Rc::clone(shared);
    listen(&c.page.window, "resize", false, move |_| {
        drive_panel(&for_resize, |panel, page| panel.on_resize(page.viewport_width()));
    });

    let for_keys = Rc::clone(shared);
    listen(&c.page.document, "keydown", false, move |event| {
        let escape = event.dyn_ref::<KeyboardEvent>().is_some_and(|key| is_escape(&key.key()));
        if escape {
            drive_panel(&for_keys, |panel, _| panel.on_escape());
        }
    });

    let for_clicks = Rc::clone(shared);
    listen(&c.page.document, "click", false, move |event| {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        drive_panel(&for_clicks, |panel, page| panel.on_document_click(page.is_inside_nav(target.as_ref())));
    });
}

#[cfg(feature = "hydrate")]
fn wire_nav(shared: &Shared) {
    let c = shared.borrow();

    for (hash, anchor) in &c.page.menu_entries {
        let shared = Rc::clone(shared);
        let hash = hash.clone();
        listen(anchor, "click", false, move |_| {
            drive_nav(&shared, |nav, _, now| nav.on_menu_click(&hash, now));
            drive_panel(&shared, |panel, _| panel.on_menu_click());
        });
    }

    let for_hash = Rc::clone(shared);
    listen(&c.page.window, "hashchange", false, move |_| {
        drive_nav(&for_hash, |nav, page, now| nav.on_hash_change(&page.current_hash(), now));
    });

    let for_scroll = Rc::clone(shared);
    listen(&c.page.window, "scroll", true, move |_| request_scroll_pass(&for_scroll));

    let for_scroll_end = Rc::clone(shared);
    listen(&c.page.window, "scrollend", true, move |_| {
        drive_nav(&for_scroll_end, |nav, page, _| nav.on_scroll_end(&page.read_sections(), &page.read_viewport()));
    });

    let for_load = Rc::clone(shared);
    listen(&c.page.window, "load", false, move |_| {
        drive_nav(&for_load, |nav, page, now| {
            nav.on_load(&page.current_hash(), &page.read_sections(), &page.read_viewport(), now)
        });
    });
}

#[cfg(feature = "hydrate")]
fn listen(target: &EventTarget, event: &str, passive: bool, handler: impl FnMut(Event) + 'static) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    if let Err(e) =
        target.add_event_listener_with_callback_and_add_event_listener_options(event, cb.as_ref().unchecked_ref(), &options)
    {
        log::warn!("could not listen for {event}: {e:?}");
    }
    cb.forget();
}

// --- Dispatch ---

/// Run a navigation handler and apply its actions.
#[cfg(feature = "hydrate")]
fn drive_nav(shared: &Shared, handler: impl FnOnce(&mut NavSync, &Page, f64) -> Vec<NavAction>) {
    let weak = Rc::downgrade(shared);
    let Ok(mut guard) = shared.try_borrow_mut() else {
        log::debug!("nav event skipped while another handler runs");
        return;
    };
    let c = &mut *guard;
    let actions = handler(&mut c.nav, &c.page, Date::now());
    c.apply_nav(actions, &weak);
}

#[cfg(feature = "hydrate")]
fn drive_panel(shared: &Shared, handler: impl FnOnce(&mut NavPanel, &Page) -> Option<PanelAction>) {
    let Ok(mut guard) = shared.try_borrow_mut() else {
        return;
    };
    let c = &mut *guard;
    let action = handler(&mut c.panel, &c.page);
    c.apply_panel(action);
}

#[cfg(feature = "hydrate")]
fn schedule_release(weak: Weak<RefCell<Controllers>>, after_ms: f64) -> Timeout {
    Timeout::new(release_delay_ms(after_ms), move || {
        if let Some(shared) = weak.upgrade() {
            drive_nav(&shared, |nav, page, now| {
                nav.on_suppression_elapsed(&page.read_sections(), &page.read_viewport(), now)
            });
        }
    })
}

/// Coalesce scroll events into one detection pass per animation frame.
#[cfg(feature = "hydrate")]
fn request_scroll_pass(shared: &Shared) {
    let Ok(requested) = shared.try_borrow_mut().map(|mut c| c.throttle.request()) else {
        return;
    };
    if !requested {
        return;
    }

    let Some(window) = web_sys::window() else {
        run_scroll_pass(shared);
        return;
    };

    let shared_for_cb = Rc::clone(shared);
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        run_scroll_pass(&shared_for_cb);
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
        *holder.borrow_mut() = Some(cb);
    } else {
        run_scroll_pass(shared);
    }
}

#[cfg(feature = "hydrate")]
fn run_scroll_pass(shared: &Shared) {
    if let Ok(mut c) = shared.try_borrow_mut() {
        c.throttle.run();
    }
    drive_nav(shared, |nav, page, now| nav.on_scroll(&page.read_sections(), &page.read_viewport(), now));
}
