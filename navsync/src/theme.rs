//! Display-mode preference: light, dark, or follow the system.
//!
//! DESIGN
//! ======
//! The stored preference is the only durable state. Its absence means
//! [`ThemeMode::SystemAuto`], in which the rendered appearance tracks the
//! `prefers-color-scheme` media query for as long as the page is open. The
//! toggle always flips away from what is currently rendered and never returns
//! to system-auto; only clearing the stored key does that.
//!
//! Persistence is best-effort. Storage errors are logged and dropped, and the
//! controller keeps working from its in-memory mode.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::collections::HashMap;

use serde::Deserialize;

use crate::consts::{THEME_DARK, THEME_LIGHT};

/// The user's preference as stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
    /// No stored override; follow the system preference.
    #[default]
    SystemAuto,
}

/// What is actually rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    #[must_use]
    pub fn from_system(system_dark: bool) -> Self {
        if system_dark { Self::Dark } else { Self::Light }
    }

    /// Body class carrying this appearance.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Light => THEME_LIGHT,
            Self::Dark => THEME_DARK,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl ThemeMode {
    /// Parse a stored value. Anything unrecognised reads as no preference.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        match raw {
            THEME_LIGHT => Self::Light,
            THEME_DARK => Self::Dark,
            _ => Self::SystemAuto,
        }
    }

    /// The value to store, or `None` when the key should be absent.
    #[must_use]
    pub fn stored_value(self) -> Option<&'static str> {
        match self {
            Self::Light => Some(THEME_LIGHT),
            Self::Dark => Some(THEME_DARK),
            Self::SystemAuto => None,
        }
    }

    #[must_use]
    pub fn resolve(self, system_dark: bool) -> Appearance {
        match self {
            Self::Light => Appearance::Light,
            Self::Dark => Appearance::Dark,
            Self::SystemAuto => Appearance::from_system(system_dark),
        }
    }

    /// State after one press of the toggle.
    #[must_use]
    pub fn next(self, system_dark: bool) -> Self {
        Self::from(self.resolve(system_dark).opposite())
    }
}

impl From<Appearance> for ThemeMode {
    fn from(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Light => Self::Light,
            Appearance::Dark => Self::Dark,
        }
    }
}

/// Which toggle behavior the page uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePolicy {
    /// Light, dark, and system-auto; auto is never re-entered by the toggle.
    #[default]
    ThreeState,
    /// Older two-state flip: the resolved mode is written back on startup and
    /// system changes are not followed afterwards.
    LegacyFlip,
}

/// Error from a [`PreferenceStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("preference storage is unavailable")]
    Unavailable,
    #[error("preference storage rejected the operation: {0}")]
    Rejected(String),
}

/// Durable key-value storage for the theme preference.
pub trait PreferenceStore {
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing storage cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] when the write is refused.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] when the removal is refused.
    fn clear(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Session-only store. Used when durable storage is unavailable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Resolves, applies, and persists the display mode.
///
/// Methods return the [`Appearance`] the host should render, or `None` when
/// the rendered appearance would not change.
#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    key: String,
    policy: ThemePolicy,
    mode: ThemeMode,
    applied: Option<Appearance>,
}

impl<S: PreferenceStore> ThemeController<S> {
    #[must_use]
    pub fn new(store: S, key: impl Into<String>, policy: ThemePolicy) -> Self {
        Self { store, key: key.into(), policy, mode: ThemeMode::SystemAuto, applied: None }
    }

    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    #[must_use]
    pub fn appearance(&self) -> Option<Appearance> {
        self.applied
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Read the stored preference and resolve the first appearance.
    pub fn initialize(&mut self, system_dark: bool) -> Option<Appearance> {
        self.mode = match self.store.load(&self.key) {
            Ok(Some(raw)) => ThemeMode::from_stored(&raw),
            Ok(None) => ThemeMode::SystemAuto,
            Err(e) => {
                log::warn!("theme: could not read preference, following system: {e}");
                ThemeMode::SystemAuto
            }
        };

        if self.policy == ThemePolicy::LegacyFlip && self.mode == ThemeMode::SystemAuto {
            self.mode = ThemeMode::from(Appearance::from_system(system_dark));
            self.persist();
        }

        log::debug!("theme: initialized as {:?}", self.mode);
        self.apply(self.mode.resolve(system_dark))
    }

    /// The system color-scheme preference changed.
    pub fn on_system_change(&mut self, system_dark: bool) -> Option<Appearance> {
        if self.mode != ThemeMode::SystemAuto {
            return None;
        }
        self.apply(Appearance::from_system(system_dark))
    }

    /// The mode toggle was pressed.
    pub fn toggle(&mut self, system_dark: bool) -> Option<Appearance> {
        self.mode = self.mode.next(system_dark);
        self.persist();
        log::debug!("theme: toggled to {:?}", self.mode);
        self.apply(self.mode.resolve(system_dark))
    }

    fn apply(&mut self, appearance: Appearance) -> Option<Appearance> {
        if self.applied == Some(appearance) {
            return None;
        }
        self.applied = Some(appearance);
        Some(appearance)
    }

    fn persist(&mut self) {
        let result = match self.mode.stored_value() {
            Some(value) => self.store.save(&self.key, value),
            None => self.store.clear(&self.key),
        };
        if let Err(e) = result {
            log::warn!("theme: preference not persisted: {e}");
        }
    }
}
