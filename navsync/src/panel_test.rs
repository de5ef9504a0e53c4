use super::*;

fn open_panel() -> NavPanel {
    let mut panel = NavPanel::new(true, 768.0);
    assert_eq!(panel.on_toggle(), Some(PanelAction::Open));
    panel
}

#[test]
fn starts_closed() {
    assert!(!NavPanel::new(true, 768.0).is_open());
}

#[test]
fn toggle_opens_then_closes() {
    let mut panel = open_panel();
    assert!(panel.is_open());
    assert_eq!(panel.on_toggle(), Some(PanelAction::Close));
    assert!(!panel.is_open());
}

#[test]
fn disabled_panel_never_opens() {
    let mut panel = NavPanel::new(false, 768.0);
    assert_eq!(panel.on_toggle(), None);
    assert!(!panel.is_open());
}

#[test]
fn escape_closes_open_panel() {
    let mut panel = open_panel();
    assert_eq!(panel.on_escape(), Some(PanelAction::Close));
    assert_eq!(panel.on_escape(), None);
}

#[test]
fn outside_click_closes_but_inside_click_does_not() {
    let mut panel = open_panel();
    assert_eq!(panel.on_document_click(true), None);
    assert!(panel.is_open());
    assert_eq!(panel.on_document_click(false), Some(PanelAction::Close));
}

#[test]
fn menu_click_closes_panel() {
    let mut panel = open_panel();
    assert_eq!(panel.on_menu_click(), Some(PanelAction::Close));
}

#[test]
fn resize_above_breakpoint_forces_close() {
    let mut panel = open_panel();
    assert_eq!(panel.on_resize(768.0), None);
    assert!(panel.is_open());
    assert_eq!(panel.on_resize(1024.0), Some(PanelAction::Close));
    assert!(!panel.is_open());
}

#[test]
fn closing_a_closed_panel_emits_nothing() {
    let mut panel = NavPanel::new(true, 768.0);
    assert_eq!(panel.on_resize(1440.0), None);
    assert_eq!(panel.on_menu_click(), None);
    assert_eq!(panel.on_document_click(false), None);
}
