use super::*;

const KEY: &str = "syricoff-theme";

// =============================================================
// Helpers
// =============================================================

/// Store whose every operation fails, as with blocked `localStorage`.
struct BlockedStore;

impl PreferenceStore for BlockedStore {
    fn load(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn save(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Rejected("QuotaExceededError".to_owned()))
    }

    fn clear(&mut self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}

fn store_with(value: &str) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.save(KEY, value).unwrap();
    store
}

fn stored(theme: &ThemeController<MemoryStore>) -> Option<String> {
    theme.store().load(KEY).unwrap()
}

fn three_state(store: MemoryStore) -> ThemeController<MemoryStore> {
    ThemeController::new(store, KEY, ThemePolicy::ThreeState)
}

// =============================================================
// ThemeMode
// =============================================================

#[test]
fn stored_values_round_trip() {
    assert_eq!(ThemeMode::from_stored("theme-light"), ThemeMode::Light);
    assert_eq!(ThemeMode::from_stored("theme-dark"), ThemeMode::Dark);
    assert_eq!(ThemeMode::Light.stored_value(), Some("theme-light"));
    assert_eq!(ThemeMode::Dark.stored_value(), Some("theme-dark"));
    assert_eq!(ThemeMode::SystemAuto.stored_value(), None);
}

#[test]
fn unrecognised_stored_value_reads_as_system_auto() {
    assert_eq!(ThemeMode::from_stored("true"), ThemeMode::SystemAuto);
    assert_eq!(ThemeMode::from_stored(""), ThemeMode::SystemAuto);
}

#[test]
fn next_flips_away_from_rendered_appearance() {
    assert_eq!(ThemeMode::SystemAuto.next(true), ThemeMode::Light);
    assert_eq!(ThemeMode::SystemAuto.next(false), ThemeMode::Dark);
    assert_eq!(ThemeMode::Light.next(true), ThemeMode::Dark);
    assert_eq!(ThemeMode::Light.next(false), ThemeMode::Dark);
    assert_eq!(ThemeMode::Dark.next(true), ThemeMode::Light);
    assert_eq!(ThemeMode::Dark.next(false), ThemeMode::Light);
}

#[test]
fn appearance_class_names() {
    assert_eq!(Appearance::Light.class_name(), "theme-light");
    assert_eq!(Appearance::Dark.class_name(), "theme-dark");
}

// =============================================================
// ThreeState controller
// =============================================================

#[test]
fn toggle_from_system_dark_goes_light_then_dark() {
    let mut theme = three_state(MemoryStore::new());
    assert_eq!(theme.initialize(true), Some(Appearance::Dark));
    assert_eq!(theme.mode(), ThemeMode::SystemAuto);
    assert_eq!(stored(&theme), None);

    assert_eq!(theme.toggle(true), Some(Appearance::Light));
    assert_eq!(theme.mode(), ThemeMode::Light);

    assert_eq!(theme.toggle(true), Some(Appearance::Dark));
    assert_eq!(theme.mode(), ThemeMode::Dark);
    assert_eq!(stored(&theme).as_deref(), Some("theme-dark"));
}

#[test]
fn stored_preference_wins_over_system() {
    let mut theme = three_state(store_with("theme-light"));
    assert_eq!(theme.initialize(true), Some(Appearance::Light));
    assert_eq!(theme.mode(), ThemeMode::Light);
}

#[test]
fn system_auto_follows_live_system_changes() {
    let mut theme = three_state(MemoryStore::new());
    assert_eq!(theme.initialize(false), Some(Appearance::Light));
    assert_eq!(theme.on_system_change(true), Some(Appearance::Dark));
    assert_eq!(theme.on_system_change(false), Some(Appearance::Light));
    assert_eq!(stored(&theme), None);
}

#[test]
fn system_change_with_unchanged_value_is_noop() {
    let mut theme = three_state(MemoryStore::new());
    theme.initialize(true);
    assert_eq!(theme.on_system_change(true), None);
}

#[test]
fn explicit_choice_ignores_system_changes() {
    let mut theme = three_state(MemoryStore::new());
    theme.initialize(false);
    theme.toggle(false);
    assert_eq!(theme.appearance(), Some(Appearance::Dark));
    assert_eq!(theme.on_system_change(false), None);
    assert_eq!(theme.on_system_change(true), None);
    assert_eq!(theme.appearance(), Some(Appearance::Dark));
}

#[test]
fn clearing_storage_and_reloading_returns_to_system_auto() {
    let mut theme = three_state(MemoryStore::new());
    theme.initialize(false);
    theme.toggle(false);
    assert_eq!(stored(&theme).as_deref(), Some("theme-dark"));

    // Storage cleared externally, then the page reloads with the same store.
    let mut store = MemoryStore::new();
    store.clear(KEY).unwrap();
    let mut reloaded = three_state(store);
    assert_eq!(reloaded.initialize(true), Some(Appearance::Dark));
    assert_eq!(reloaded.mode(), ThemeMode::SystemAuto);
    assert_eq!(reloaded.on_system_change(false), Some(Appearance::Light));
}

#[test]
fn toggle_never_reenters_system_auto() {
    let mut theme = three_state(MemoryStore::new());
    theme.initialize(true);
    for _ in 0..5 {
        theme.toggle(true);
        assert_ne!(theme.mode(), ThemeMode::SystemAuto);
    }
}

// =============================================================
// Storage failures
// =============================================================

#[test]
fn blocked_storage_degrades_to_session_state() {
    let mut theme = ThemeController::new(BlockedStore, KEY, ThemePolicy::ThreeState);
    assert_eq!(theme.initialize(true), Some(Appearance::Dark));
    assert_eq!(theme.toggle(true), Some(Appearance::Light));
    assert_eq!(theme.mode(), ThemeMode::Light);
    assert_eq!(theme.toggle(true), Some(Appearance::Dark));
}

#[test]
fn store_error_messages() {
    assert_eq!(StoreError::Unavailable.to_string(), "preference storage is unavailable");
    assert!(StoreError::Rejected("denied".to_owned()).to_string().contains("denied"));
}

// =============================================================
// LegacyFlip controller
// =============================================================

#[test]
fn legacy_persists_resolved_mode_on_startup() {
    let mut theme = ThemeController::new(MemoryStore::new(), KEY, ThemePolicy::LegacyFlip);
    assert_eq!(theme.initialize(true), Some(Appearance::Dark));
    assert_eq!(theme.mode(), ThemeMode::Dark);
    assert_eq!(theme.store().load(KEY).unwrap().as_deref(), Some("theme-dark"));
}

#[test]
fn legacy_ignores_system_changes() {
    let mut theme = ThemeController::new(MemoryStore::new(), KEY, ThemePolicy::LegacyFlip);
    theme.initialize(false);
    assert_eq!(theme.on_system_change(true), None);
}

#[test]
fn legacy_toggle_is_plain_flip() {
    let mut theme = ThemeController::new(store_with("theme-light"), KEY, ThemePolicy::LegacyFlip);
    theme.initialize(true);
    assert_eq!(theme.toggle(true), Some(Appearance::Dark));
    assert_eq!(theme.toggle(true), Some(Appearance::Light));
    assert_eq!(theme.store().load(KEY).unwrap().as_deref(), Some("theme-light"));
}
