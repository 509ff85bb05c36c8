//! User settings stored as `settings.json` in the config directory.
//!
//! Every field has a default, so a missing or partial file is fine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GardenError, Result};

const SETTINGS_FILE: &str = "settings.json";
const APP_DIR: &str = "my-garden";

pub const DEFAULT_SCROLL_OFFSET_MAX: f32 = 400.0;
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

impl ThemeChoice {
    pub fn theme(&self) -> iced::Theme {
        match self {
            ThemeChoice::Dark => iced::Theme::Dark,
            ThemeChoice::Light => iced::Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Catalog location; None means the platform data directory
    pub database_path: Option<PathBuf>,
    /// Thumbnail cache; None means the platform cache directory
    pub thumbnail_dir: Option<PathBuf>,
    /// Furthest the swipe gesture will scroll the detail content
    pub scroll_offset_max: f32,
    /// Drag distance (logical pixels) that dismisses the detail modal
    pub swipe_threshold: f32,
    pub theme: ThemeChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: None,
            thumbnail_dir: None,
            scroll_offset_max: DEFAULT_SCROLL_OFFSET_MAX,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
            theme: ThemeChoice::default(),
        }
    }
}

impl Settings {
    pub fn thumbnail_dir(&self) -> Result<PathBuf> {
        match &self.thumbnail_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let mut path = dirs::cache_dir()
                    .or_else(dirs::home_dir)
                    .ok_or(GardenError::NoDirectory("cache"))?;
                path.push(APP_DIR);
                path.push("thumbnails");
                Ok(path)
            }
        }
    }
}

fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_DIR);
        path.push(SETTINGS_FILE);
        path
    })
}

/// Load settings from the config directory, falling back to defaults.
///
/// On first launch the defaults are written out so there is a file to edit.
pub fn load() -> Settings {
    let Some(path) = default_settings_path() else {
        return Settings::default();
    };
    if !path.exists() {
        let settings = Settings::default();
        match save_to_path(&settings, &path) {
            Ok(()) => tracing::info!("📝 Wrote default settings to {}", path.display()),
            Err(e) => tracing::warn!("⚠️  Could not write {}: {}", path.display(), e),
        }
        return settings;
    }

    load_from_path(&path).unwrap_or_else(|e| {
        tracing::warn!("⚠️  Ignoring {}: {}", path.display(), e);
        Settings::default()
    })
}

pub fn load_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_to_path(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip() {
        let settings = Settings {
            database_path: Some(PathBuf::from("/tmp/garden.db")),
            swipe_threshold: 60.0,
            theme: ThemeChoice::Light,
            ..Settings::default()
        };
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        save_to_path(&settings, &path).expect("failed to save settings");
        let loaded = load_from_path(&path).expect("failed to load settings");

        assert_eq!(loaded, settings);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, r#"{ "theme": "light" }"#).unwrap();

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded.theme, ThemeChoice::Light);
        assert_eq!(loaded.scroll_offset_max, DEFAULT_SCROLL_OFFSET_MAX);
        assert_eq!(loaded.swipe_threshold, DEFAULT_SWIPE_THRESHOLD);
        assert!(loaded.database_path.is_none());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempdir().expect("failed to create temp dir");
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "not json").unwrap();

        assert!(matches!(load_from_path(&path), Err(GardenError::Json(_))));
    }

    #[test]
    fn explicit_thumbnail_dir_wins() {
        let settings = Settings {
            thumbnail_dir: Some(PathBuf::from("/var/thumbs")),
            ..Settings::default()
        };
        assert_eq!(settings.thumbnail_dir().unwrap(), PathBuf::from("/var/thumbs"));
    }
}
