//! CLI configuration

use std::path::{Path, PathBuf};

use nasab_gedcom::ExportOptions;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Location of the config file inside a data directory
pub fn config_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Configuration for the CLI, stored as TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_email: Option<String>,

    #[serde(default = "default_true")]
    pub include_notes: bool,

    #[serde(default = "default_true")]
    pub include_photos: bool,

    #[serde(default = "default_true")]
    pub include_hijri_dates: bool,
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submitter_name: None,
            submitter_email: None,
            include_notes: true,
            include_photos: true,
            include_hijri_dates: true,
        }
    }
}

impl Config {
    /// Load from `path`; a missing or unreadable file gives defaults
    pub fn load(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &[
            "submitter_name",
            "submitter_email",
            "include_notes",
            "include_photos",
            "include_hijri_dates",
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "submitter_name" => Some(self.submitter_name.clone().unwrap_or_default()),
            "submitter_email" => Some(self.submitter_email.clone().unwrap_or_default()),
            "include_notes" => Some(self.include_notes.to_string()),
            "include_photos" => Some(self.include_photos.to_string()),
            "include_hijri_dates" => Some(self.include_hijri_dates.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let text = || {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        match key {
            "submitter_name" => self.submitter_name = text(),
            "submitter_email" => self.submitter_email = text(),
            "include_notes" => self.include_notes = parse_bool(key, value)?,
            "include_photos" => self.include_photos = parse_bool(key, value)?,
            "include_hijri_dates" => self.include_hijri_dates = parse_bool(key, value)?,
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }

    /// Export options seeded from this config
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            include_notes: self.include_notes,
            include_photos: self.include_photos,
            include_hijri_dates: self.include_hijri_dates,
            submitter_name: self.submitter_name.clone(),
            submitter_email: self.submitter_email.clone(),
            export_date: None,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid value for {}: '{}' (expected true or false)", key, value),
    }
}
