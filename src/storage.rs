//! Theme preference storage backed by `localStorage`.
//!
//! TRADE-OFFS
//! ==========
//! `localStorage` can be missing or throw on access (private browsing,
//! blocked site data). In that case the store degrades to a session-only
//! [`MemoryStore`] so the toggle still works until the page is closed.
//! Non-hydrate builds always use the session store.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use navsync::theme::{MemoryStore, PreferenceStore, StoreError};

#[derive(Debug)]
pub enum BrowserStore {
    #[cfg(feature = "hydrate")]
    Local(web_sys::Storage),
    Session(MemoryStore),
}

impl BrowserStore {
    /// Open `window.localStorage`, or a session store when it is unavailable.
    #[must_use]
    pub fn open() -> Self {
        #[cfg(feature = "hydrate")]
        {
            match web_sys::window().map(|w| w.local_storage()) {
                Some(Ok(Some(storage))) => return Self::Local(storage),
                Some(Err(e)) => {
                    log::warn!("localStorage blocked, theme choice kept for this page only: {e:?}");
                }
                _ => log::info!("localStorage unavailable, theme choice kept for this page only"),
            }
        }
        Self::Session(MemoryStore::new())
    }

    /// Whether writes survive a reload.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        match self {
            #[cfg(feature = "hydrate")]
            Self::Local(_) => true,
            Self::Session(_) => false,
        }
    }
}

impl PreferenceStore for BrowserStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            #[cfg(feature = "hydrate")]
            Self::Local(storage) => storage.get_item(key).map_err(|e| rejected(&e)),
            Self::Session(store) => store.load(key),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            #[cfg(feature = "hydrate")]
            Self::Local(storage) => storage.set_item(key, value).map_err(|e| rejected(&e)),
            Self::Session(store) => store.save(key, value),
        }
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        match self {
            #[cfg(feature = "hydrate")]
            Self::Local(storage) => storage.remove_item(key).map_err(|e| rejected(&e)),
            Self::Session(store) => store.clear(key),
        }
    }
}

#[cfg(feature = "hydrate")]
fn rejected(err: &wasm_bindgen::JsValue) -> StoreError {
    StoreError::Rejected(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
