//! Persisted settings.
//!
//! The host gives this plugin three durable, world-scoped values: the
//! selected provider id, the per-tab visibility map, and whether players
//! (rather than only the GM) may open the panel. [`Settings`] is the typed
//! form of those three values with TOML load/save for embedders that
//! persist to a file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::details::TabVisibility;
use crate::error::Result;

/// The three persisted settings of the overview plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Identifier of the user-selected provider; `None` means "use the
    /// computed default". A stale id (provider no longer registered) also
    /// falls back to the default at resolution time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_provider: Option<String>,
    /// Which optional tabs the user has chosen to show
    pub tab_visibility: TabVisibility,
    /// Whether non-GM players may open the overview at all
    pub enable_player_access: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            system_provider: None,
            tab_visibility: TabVisibility::new(),
            enable_player_access: true,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, falling back to defaults when the
    /// file does not exist. Missing keys take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save settings to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::details::Tab;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.system_provider, None);
        assert!(settings.tab_visibility.is_empty());
        assert!(settings.enable_player_access);
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partyview/settings.toml");

        let mut settings = Settings::default();
        settings.system_provider = Some("native.dnd5e".to_string());
        settings.enable_player_access = false;
        settings
            .tab_visibility
            .insert("currencies".to_string(), Tab::new("currencies", "Money"));
        let mut hidden_tab = Tab::new("lore", "Skills");
        hidden_tab.visible = false;
        settings.tab_visibility.insert("lore".to_string(), hidden_tab);

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        // insertion order survives the roundtrip
        let keys: Vec<_> = loaded.tab_visibility.keys().collect();
        assert_eq!(keys, ["currencies", "lore"]);
    }

    #[test]
    fn test_partial_file_takes_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "system_provider = \"module.better-dnd5e\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.system_provider.as_deref(), Some("module.better-dnd5e"));
        assert!(settings.enable_player_access);
        assert!(settings.tab_visibility.is_empty());
    }
}
