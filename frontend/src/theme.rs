//! Light/dark preference, resolved once at boot and persisted on every change.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EnhancerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Key/value storage for the preference (browser `localStorage` in production).
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), EnhancerError>;
}

/// In-memory store for tests; counts writes so callers can assert on persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values, writes: 0 }
    }

    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), EnhancerError> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// The page-wide theme preference. `set_theme` is its only write path.
#[derive(Debug)]
pub struct ThemeSettings<S> {
    store: S,
    key: String,
    current: Theme,
}

impl<S: PreferenceStore> ThemeSettings<S> {
    /// Stored value first, then the environment's signal, then light.
    pub fn init(store: S, key: &str, ambient: Option<Theme>) -> Self {
        let stored = store.load(key).and_then(|raw| Theme::parse(&raw));
        let current = stored.or(ambient).unwrap_or_default();
        tracing::debug!(?stored, ?ambient, theme = current.as_str(), "theme resolved");
        Self {
            store,
            key: key.to_string(),
            current,
        }
    }

    pub fn get_theme(&self) -> Theme {
        self.current
    }

    /// Switches the preference and writes it through. A failed write still
    /// leaves the new theme in effect for this page.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), EnhancerError> {
        self.current = theme;
        self.store.save(&self.key, theme.as_str())
    }

    /// Flips the preference through `set_theme`; the new theme is current even
    /// when the write fails.
    pub fn toggle(&mut self) -> Result<Theme, EnhancerError> {
        let next = self.current.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_wins_over_ambient() {
        let settings = ThemeSettings::init(
            MemoryStore::with_value("theme", "dark"),
            "theme",
            Some(Theme::Light),
        );
        assert_eq!(settings.get_theme(), Theme::Dark);
    }

    #[test]
    fn ambient_is_used_without_a_stored_value() {
        let settings = ThemeSettings::init(MemoryStore::default(), "theme", Some(Theme::Dark));
        assert_eq!(settings.get_theme(), Theme::Dark);
    }

    #[test]
    fn garbage_stored_value_falls_through() {
        let settings =
            ThemeSettings::init(MemoryStore::with_value("theme", "sepia"), "theme", None);
        assert_eq!(settings.get_theme(), Theme::Light);
    }

    #[test]
    fn init_does_not_write() {
        let settings = ThemeSettings::init(MemoryStore::default(), "theme", Some(Theme::Dark));
        assert_eq!(settings.store().write_count(), 0);
        assert_eq!(settings.store().load("theme"), None);
    }

    #[test]
    fn set_theme_persists_immediately() {
        let mut settings = ThemeSettings::init(MemoryStore::default(), "theme", None);
        settings.set_theme(Theme::Dark).unwrap();
        assert_eq!(settings.store().load("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut settings =
            ThemeSettings::init(MemoryStore::with_value("theme", "dark"), "theme", None);
        assert_eq!(settings.toggle().unwrap(), Theme::Light);
        assert_eq!(settings.get_theme(), Theme::Light);
        assert_eq!(settings.store().load("theme").as_deref(), Some("light"));
        assert_eq!(settings.store().write_count(), 1);
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
