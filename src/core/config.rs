use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_display_currency() -> String {
    "USD".to_string()
}

fn default_monthly_state() -> String {
    "Karnataka".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Overrides the bundled historical price dataset.
    #[serde(default)]
    pub price_data_path: Option<String>,
    /// Overrides the bundled state-wise sales dataset.
    #[serde(default)]
    pub sales_data_path: Option<String>,
    /// Currency shown alongside INR in cost breakdowns.
    #[serde(default = "default_display_currency")]
    pub display_currency: String,
    /// State whose month-level purchase series is loaded.
    #[serde(default = "default_monthly_state")]
    pub monthly_state: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            price_data_path: None,
            sales_data_path: None,
            display_currency: default_display_currency(),
            monthly_state: default_monthly_state(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the platform config dir, falling back to the
    /// built-in defaults when no file exists so the bundled datasets work
    /// without any setup.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using built-in defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "chandi", "chandi")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
