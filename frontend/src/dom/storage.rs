use web_sys::{Storage, Window};

use super::describe;
use crate::error::EnhancerError;
use crate::theme::{PreferenceStore, Theme};

/// `window.localStorage`, or nothing when the browser refuses access.
pub(crate) struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub(crate) fn new(window: &Window) -> Self {
        let storage = window.local_storage().ok().flatten();
        if storage.is_none() {
            tracing::warn!("localStorage unavailable; theme changes last for this page only");
        }
        Self { storage }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), EnhancerError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| EnhancerError::Storage("localStorage is not available".into()))?;
        storage
            .set_item(key, value)
            .map_err(|err| EnhancerError::Storage(describe(&err)))
    }
}

/// The environment's light/dark signal, if the browser exposes one.
pub(crate) fn ambient_theme(window: &Window) -> Option<Theme> {
    let query = window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()?;
    Some(if query.matches() {
        Theme::Dark
    } else {
        Theme::Light
    })
}
