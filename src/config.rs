//! Persisted user settings
//!
//! The only state that survives a session is the theme preference, stored as
//! a small TOML file under the user config directory. A missing file yields
//! the defaults; a corrupt file is logged and replaced by the defaults rather
//! than aborting.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::app;

/// Two-valued theme preference, light by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// The value the toggle switches to
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Glyph shown on the theme toggle button
    pub fn icon(self) -> &'static str {
        match self {
            ThemePreference::Light => "\u{1F319}", // moon: switch to dark
            ThemePreference::Dark => "\u{2600}",   // sun: switch to light
        }
    }

    /// Attribute value used in the exported HTML page
    pub fn attribute(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

/// Settings persisted across sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: ThemePreference,
}

impl Settings {
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(app::CONFIG_DIR);
        path.push(app::CONFIG_FILENAME);
        path
    }

    /// Load settings from the default location, silently defaulting when the
    /// file is absent
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Settings>(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse settings file, using defaults");
                    Settings::default()
                }
            },
            Err(_) => Settings::default(),
        }
    }

    /// Persist settings to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;
        fs::write(path, contents)
            .context(format!("Failed to write settings file to {}", path.display()))?;
        Ok(())
    }

    /// Flip the theme and persist the new value. A failed save is logged but
    /// does not undo the in-memory flip.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        info!(theme = self.theme.attribute(), "Theme toggled");
        if let Err(e) = self.save() {
            warn!(error = ?e, "Failed to persist theme preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle_round_trip() {
        let mut theme = ThemePreference::default();
        assert_eq!(theme, ThemePreference::Light);

        theme = theme.toggled();
        assert_eq!(theme, ThemePreference::Dark);

        theme = theme.toggled();
        assert_eq!(theme, ThemePreference::Light);
    }

    #[test]
    fn test_missing_file_defaults_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("missing.toml"));
        assert_eq!(settings.theme, ThemePreference::Light);
    }

    #[test]
    fn test_corrupt_file_defaults_to_light() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = [not toml").unwrap();
        let settings = Settings::load_from(&path);
        assert_eq!(settings.theme, ThemePreference::Light);
    }

    #[test]
    fn test_save_and_reload_persists_dark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let settings = Settings {
            theme: ThemePreference::Dark,
        };
        settings.save_to(&path).unwrap();

        let reloaded = Settings::load_from(&path);
        assert_eq!(reloaded.theme, ThemePreference::Dark);
    }

    #[test]
    fn test_icon_matches_target_mode() {
        assert_eq!(ThemePreference::Light.icon(), "\u{1F319}");
        assert_eq!(ThemePreference::Dark.icon(), "\u{2600}");
    }
}
