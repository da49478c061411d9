//! Application settings
//!
//! One JSON file under the work dir, loaded at startup and written
//! back on save. Missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::theme::ThemeColors;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

/// Persisted application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Appearance ===
    pub colors: ThemeColors,
    pub theme_mode: ThemeMode,
    pub font_size: FontSize,

    // === Restaurant profile ===
    pub restaurant_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,

    // === System ===
    pub language: String,
    pub currency: String,
    pub timezone: String,
    pub date_format: String,

    // === Notifications ===
    pub order_notifications: bool,
    pub low_stock_alerts: bool,
    pub payment_alerts: bool,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            colors: ThemeColors::default(),
            theme_mode: ThemeMode::Light,
            font_size: FontSize::Medium,
            restaurant_name: "RestoPOS".to_string(),
            address: None,
            phone: None,
            email: None,
            language: "en".to_string(),
            currency: "$".to_string(),
            timezone: "UTC".to_string(),
            date_format: "YYYY-MM-DD".to_string(),
            order_notifications: true,
            low_stock_alerts: true,
            payment_alerts: true,
            sound_enabled: true,
        }
    }
}

/// Settings file access
pub struct SettingsStore {
    file_path: PathBuf,
}

impl SettingsStore {
    /// Settings live at `{work_dir}/settings.json`
    pub fn new(work_dir: impl AsRef<Path>) -> Self {
        Self {
            file_path: work_dir.as_ref().join("settings.json"),
        }
    }

    /// Load settings, falling back to defaults when the file is absent
    pub fn load_or_default(&self) -> Result<Settings, SettingsError> {
        if !self.file_path.exists() {
            return Ok(Settings::default());
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.file_path, content)?;
        info!(path = %self.file_path.display(), "Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path());
        let settings = store.load_or_default().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path());

        let mut settings = Settings::default();
        settings.restaurant_name = "Casa Lucia".to_string();
        settings.colors.primary = "#334155".to_string();
        settings.theme_mode = ThemeMode::Dark;
        settings.low_stock_alerts = false;
        store.save(&settings).unwrap();

        let loaded = store.load_or_default().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path());
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{"restaurant_name": "Casa Lucia"}"#,
        )
        .unwrap();

        let loaded = store.load_or_default().unwrap();
        assert_eq!(loaded.restaurant_name, "Casa Lucia");
        assert_eq!(loaded.currency, "$");
        assert_eq!(loaded.colors, ThemeColors::default());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path());
        std::fs::write(dir.path().join("settings.json"), "{not json").unwrap();

        assert!(matches!(
            store.load_or_default(),
            Err(SettingsError::Json(_))
        ));
    }
}
