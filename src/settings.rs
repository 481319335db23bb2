//! User settings persistence.
//!
//! This module handles loading and saving the visitor's locale preference
//! across sessions, and provides the disk-backed [`Environment`]
//! implementation used by desktop builds of the site shell.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Environment;

/// Errors that can occur while persisting settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(serde_json::Error),

    #[error("Failed to write settings file: {0}")]
    Write(std::io::Error),
}

/// User settings that persist across sessions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Chosen locale tag ("ua", "ru", "en"); empty until the visitor picks one.
    /// Kept as a raw string so an unsupported value survives load and can be
    /// ignored by the locale resolver instead of being silently rewritten.
    #[serde(default)]
    pub locale: String,
}

fn default_version() -> u32 {
    1
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: 1,
            locale: String::new(),
        }
    }
}

impl UserSettings {
    /// Get the config directory path for Retouch University
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("RetouchUniversity"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("RetouchUniversity"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|p| p.join("retouch-university"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            dirs::config_dir().map(|p| p.join("retouch-university"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific path, falling back to defaults on any
    /// missing, unreadable, or corrupt file
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::get_settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SettingsError::CreateDir)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(SettingsError::Serialize)?;

        std::fs::write(path, content).map_err(SettingsError::Write)
    }
}

/// Disk-backed environment: locale preference in the platform config dir,
/// language tags supplied by the hosting shell.
#[derive(Clone, Debug, Default)]
pub struct DiskEnvironment {
    /// Override for the settings directory; `None` uses the platform default
    config_dir: Option<PathBuf>,
    languages: Vec<String>,
}

impl DiskEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific settings directory instead of the platform default
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: Some(dir.into()),
            languages: Vec::new(),
        }
    }

    /// Attach the host's preferred-language list, most preferred first
    pub fn with_languages(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.languages = tags.into_iter().collect();
        self
    }

    fn settings_path(&self) -> Option<PathBuf> {
        match &self.config_dir {
            Some(dir) => Some(dir.join("settings.json")),
            None => UserSettings::get_settings_path(),
        }
    }
}

impl Environment for DiskEnvironment {
    fn persisted_locale(&self) -> Option<String> {
        let path = self.settings_path()?;
        let settings = UserSettings::load_from(&path);

        if settings.locale.is_empty() {
            None
        } else {
            Some(settings.locale)
        }
    }

    fn language_tags(&self) -> Vec<String> {
        self.languages.clone()
    }

    fn persist_locale(&self, tag: &str) -> Result<(), SettingsError> {
        let path = self.settings_path().ok_or(SettingsError::NoConfigDir)?;

        // Read-modify-write so future settings fields survive a locale change
        let mut settings = UserSettings::load_from(&path);
        settings.locale = tag.to_string();
        settings.save_to(&path)
    }
}
