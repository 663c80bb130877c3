//! UI preferences persisted next to the task collection.
//!
//! # Invariants
//! - The theme lives under its own key and never touches task data.
//! - A missing or unrecognized stored theme reads as `Theme::Light`.

use crate::storage::{KeyValueStorage, StorageResult};
use log::{info, warn};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Storage key holding the selected theme.
pub const THEME_STORAGE_KEY: &str = "taskflow_theme";

/// Color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme `{other}`; expected light|dark")),
        }
    }
}

/// Reads and writes preferences through a key-value store.
pub struct Preferences<S: KeyValueStorage> {
    storage: S,
}

impl<S: KeyValueStorage> Preferences<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn theme(&self) -> StorageResult<Theme> {
        let Some(raw) = self.storage.get_item(THEME_STORAGE_KEY)? else {
            return Ok(Theme::default());
        };
        Ok(raw.parse().unwrap_or_else(|_| {
            warn!("event=theme_load module=preferences status=fallback reason=unknown_value");
            Theme::default()
        }))
    }

    pub fn set_theme(&self, theme: Theme) -> StorageResult<()> {
        self.storage.set_item(THEME_STORAGE_KEY, theme.as_str())?;
        info!("event=theme_set module=preferences status=ok theme={theme}");
        Ok(())
    }

    /// Flips light/dark and returns the theme now in effect.
    pub fn toggle_theme(&self) -> StorageResult<Theme> {
        let next = self.theme()?.toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::{Preferences, Theme, THEME_STORAGE_KEY};
    use crate::storage::{KeyValueStorage, MemoryKvStorage};

    #[test]
    fn theme_defaults_to_light_and_toggles() {
        let storage = MemoryKvStorage::new();
        let prefs = Preferences::new(&storage);
        assert_eq!(prefs.theme().unwrap(), Theme::Light);

        assert_eq!(prefs.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(
            storage.get_item(THEME_STORAGE_KEY).unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(prefs.toggle_theme().unwrap(), Theme::Light);
    }

    #[test]
    fn unknown_stored_theme_falls_back_to_light() {
        let storage = MemoryKvStorage::new();
        storage.set_item(THEME_STORAGE_KEY, "solarized").unwrap();
        assert_eq!(Preferences::new(&storage).theme().unwrap(), Theme::Light);
    }
}
