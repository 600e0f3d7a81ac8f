//! Standalone host settings, loaded from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Error type for settings loading.
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
            SettingsError::Validation(errors) => {
                write!(f, "Validation failed: {}", errors.join(", "))
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Settings for running the plugin core outside a messaging server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HostSettings {
    /// JSON file holding the plugin configuration.
    pub plugin_config_path: PathBuf,

    /// User ids known to the directory; used to validate `pluginadmins`.
    pub users: Vec<String>,

    /// Poll interval for the file watcher in seconds.
    pub poll_interval_secs: u64,

    pub observability: ObservabilityConfig,
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            plugin_config_path: PathBuf::from("autolink.json"),
            users: Vec::new(),
            poll_interval_secs: 2,
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl HostSettings {
    /// Semantic checks serde cannot express. Returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.plugin_config_path.as_os_str().is_empty() {
            errors.push("plugin_config_path must not be empty".to_string());
        }
        if self.poll_interval_secs == 0 {
            errors.push("poll_interval_secs must be greater than 0".to_string());
        }
        if !matches!(
            self.observability.log_level.as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ) {
            errors.push(format!(
                "unknown log level '{}'",
                self.observability.log_level
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Load and validate settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<HostSettings, SettingsError> {
    let content = fs::read_to_string(path).map_err(SettingsError::Io)?;
    parse_settings(&content)
}

/// Parse and validate settings from TOML text.
pub fn parse_settings(content: &str) -> Result<HostSettings, SettingsError> {
    let settings: HostSettings = toml::from_str(content).map_err(SettingsError::Parse)?;
    settings.validate().map_err(SettingsError::Validation)?;
    Ok(settings)
}
