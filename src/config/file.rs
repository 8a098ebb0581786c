//! Configuration file management for wardwatch.
//!
//! This module handles loading and saving application configuration from TOML files.
//! Configuration is stored in the user's config directory and created with defaults
//! on first run.

use crate::patients::{SortKey, StatusFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MIN_FRAME_RATE: u32 = 1;
const MAX_FRAME_RATE: u32 = 240;

/// Card layout for the patient grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Small cards with a compact ECG trace
    Compact,
    /// Large cards with the full-height ECG trace
    #[default]
    Detailed,
}

impl ViewMode {
    pub fn is_compact(self) -> bool {
        self == Self::Compact
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Compact => Self::Detailed,
            Self::Detailed => Self::Compact,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Detailed => write!(f, "detailed"),
        }
    }
}

/// Dashboard display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Card layout: "compact" or "detailed"
    #[serde(default)]
    pub view: ViewMode,
    /// Animation frames per second (1-240)
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Initial ordering: "name", "room", "status" or "heart-rate"
    #[serde(default)]
    pub sort: SortKey,
    /// Initial status filter: "all", "stable", "warning" or "critical"
    #[serde(default)]
    pub filter: StatusFilter,
}

fn default_frame_rate() -> u32 {
    60
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            view: ViewMode::default(),
            frame_rate: default_frame_rate(),
            sort: SortKey::default(),
            filter: StatusFilter::default(),
        }
    }
}

impl DisplayConfig {
    /// Time between animation frames, with the frame rate clamped to a usable range.
    pub fn frame_interval(&self) -> Duration {
        let rate = self.frame_rate.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE);
        Duration::from_secs_f64(1.0 / rate as f64)
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WardwatchConfig {
    #[serde(default)]
    pub display: DisplayConfig,
}

impl WardwatchConfig {
    /// Loads configuration from the user's config directory, writing defaults if
    /// the file does not exist yet.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the config file cannot be read or written
    /// - If the TOML is malformed
    pub fn load() -> anyhow::Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, creating it with defaults if missing.
    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            tracing::info!(
                "No config file found, writing defaults to {}",
                config_path.display()
            );
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: WardwatchConfig = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Saves configuration to an explicit path.
    ///
    /// # Errors
    /// - If the parent directory cannot be created
    /// - If the file cannot be written
    pub fn save_to(&self, config_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_content = toml::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        tracing::info!("Configuration saved");
        Ok(())
    }
}

/// Retrieves the path to the config file.
///
/// # Errors
/// - If the home directory cannot be determined
pub fn get_config_path() -> anyhow::Result<PathBuf> {
    let config_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
        .join(".config")
        .join("wardwatch");

    Ok(config_dir.join("wardwatch.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("wardwatch-test-{}-{name}", std::process::id()))
            .join("wardwatch.toml")
    }

    #[test]
    fn test_defaults() {
        let config = WardwatchConfig::default();
        assert_eq!(config.display.view, ViewMode::Detailed);
        assert_eq!(config.display.frame_rate, 60);
        assert_eq!(config.display.sort, SortKey::Name);
        assert_eq!(config.display.filter, StatusFilter::All);
    }

    #[test]
    fn test_parse_partial_file() {
        let config: WardwatchConfig = toml::from_str(
            r#"
            [display]
            view = "compact"
            sort = "heart-rate"
            "#,
        )
        .unwrap();
        assert_eq!(config.display.view, ViewMode::Compact);
        assert_eq!(config.display.sort, SortKey::HeartRate);
        assert_eq!(config.display.frame_rate, 60);
        assert_eq!(config.display.filter, StatusFilter::All);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: WardwatchConfig = toml::from_str("").unwrap();
        assert_eq!(config, WardwatchConfig::default());
    }

    #[test]
    fn test_invalid_view_is_rejected() {
        assert!(toml::from_str::<WardwatchConfig>("[display]\nview = \"grid\"").is_err());
    }

    #[test]
    fn test_frame_interval_is_clamped() {
        let mut display = DisplayConfig::default();
        assert_eq!(display.frame_interval(), Duration::from_secs_f64(1.0 / 60.0));

        display.frame_rate = 0;
        assert_eq!(display.frame_interval(), Duration::from_secs(1));

        display.frame_rate = 10_000;
        assert_eq!(display.frame_interval(), Duration::from_secs_f64(1.0 / 240.0));
    }

    #[test]
    fn test_load_creates_default_file() {
        let path = temp_config_path("create");
        let _ = fs::remove_dir_all(path.parent().unwrap());

        let config = WardwatchConfig::load_from(&path).unwrap();
        assert_eq!(config, WardwatchConfig::default());
        assert!(path.exists());

        let reloaded = WardwatchConfig::load_from(&path).unwrap();
        assert_eq!(reloaded, config);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_view_toggle() {
        assert_eq!(ViewMode::Compact.toggle(), ViewMode::Detailed);
        assert!(ViewMode::Detailed.toggle().is_compact());
    }
}
