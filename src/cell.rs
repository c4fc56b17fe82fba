//! Construct-once holder for [`Settings`].
//!
//! A [`SettingsCell`] is owned by the application's composition root and
//! handed to consumers by reference. The first successful [`get`](SettingsCell::get)
//! loads settings through the wrapped builder; every later call returns the
//! same instance without touching files or the environment again. A failed
//! load leaves the cell empty, so the next call retries from scratch.

use std::sync::OnceLock;

use crate::builder::{Layerfig, SettingsBuilder};
use crate::error::LayerfigError;
use crate::settings::Settings;

#[derive(Debug)]
pub struct SettingsCell {
    builder: SettingsBuilder,
    settings: OnceLock<Settings>,
}

impl SettingsCell {
    /// A cell that loads with the given builder on first access.
    pub fn new(builder: SettingsBuilder) -> Self {
        Self {
            builder,
            settings: OnceLock::new(),
        }
    }

    /// Return the cached settings, loading them on first use.
    ///
    /// If two threads race on an empty cell, both may load but only one
    /// result is kept and both callers receive that instance.
    pub fn get(&self) -> Result<&Settings, LayerfigError> {
        if let Some(settings) = self.settings.get() {
            return Ok(settings);
        }
        let loaded = self.builder.clone().load()?;
        Ok(self.settings.get_or_init(|| loaded))
    }

    /// The cached settings, if they have been loaded.
    pub fn loaded(&self) -> Option<&Settings> {
        self.settings.get()
    }

    /// Consume the cell, yielding the settings if they were loaded.
    pub fn into_inner(self) -> Option<Settings> {
        self.settings.into_inner()
    }
}

impl Default for SettingsCell {
    fn default() -> Self {
        Self::new(Layerfig::builder())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn builder(dir: &TempDir, vars: Vec<(String, String)>) -> SettingsBuilder {
        Layerfig::builder()
            .dotenv_file(dir.path().join(".env"))
            .env_vars(vars)
    }

    #[test]
    fn empty_until_first_access() {
        let dir = TempDir::new().unwrap();
        let cell = SettingsCell::new(builder(&dir, vec![]));
        assert!(cell.loaded().is_none());
        cell.get().unwrap();
        assert!(cell.loaded().is_some());
    }

    #[test]
    fn repeated_access_returns_same_instance() {
        let dir = TempDir::new().unwrap();
        let cell = SettingsCell::new(builder(
            &dir,
            vec![("DATABASE_PASSWORD".into(), "pw".into())],
        ));
        let first = cell.get().unwrap();
        let second = cell.get().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.database_url(), second.database_url());
    }

    #[test]
    fn cached_instance_ignores_later_source_changes() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.yaml");
        fs::write(&base, "app:\n  max_workers: 10\n").unwrap();
        let cell = SettingsCell::new(builder(
            &dir,
            vec![("CONFIG_BASE_PATH".into(), base.display().to_string())],
        ));

        assert_eq!(cell.get().unwrap().app.max_workers, 10);
        fs::write(&base, "app:\n  max_workers: 99\n").unwrap();
        assert_eq!(cell.get().unwrap().app.max_workers, 10);
    }

    #[test]
    fn failed_load_leaves_cell_empty() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("base.yaml");
        fs::write(&base, "database:\n  port: abc\n").unwrap();
        let cell = SettingsCell::new(builder(
            &dir,
            vec![("CONFIG_BASE_PATH".into(), base.display().to_string())],
        ));

        assert!(cell.get().is_err());
        assert!(cell.loaded().is_none());

        fs::write(&base, "database:\n  port: 3307\n").unwrap();
        assert_eq!(cell.get().unwrap().database.port, 3307);
    }

    #[test]
    fn into_inner_yields_loaded_settings() {
        let dir = TempDir::new().unwrap();
        let cell = SettingsCell::new(builder(&dir, vec![]));
        cell.get().unwrap();
        let settings = cell.into_inner().unwrap();
        assert_eq!(settings.api.timeout, 5000);
    }
}
