use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{AppError, ConfigError};

/// Locale codes the client ships translations for
pub const SUPPORTED_LOCALES: [&str; 2] = ["es", "en"];

/// Unit system codes the client can display
pub const SUPPORTED_UNITS: [&str; 2] = ["km", "miles"];

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml and persisted preferences
    pub config_dir: PathBuf,

    /// Prediction service settings
    pub service: ServiceConfig,

    /// Fallback preferences used before the user picks any
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the prediction API (endpoints are appended to it)
    pub base_url: String,

    /// Client-side request timeout. Unset means the request waits for the
    /// network layer to give up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Locale used when nothing is persisted; unset means "detect from system"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,

    /// Unit system used when nothing is persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_unit: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            service: ServiceConfig::default(),
            preferences: PreferencesConfig::default(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("flightontime")
}

impl Config {
    /// Load and validate the configuration the user asked for.
    ///
    /// An explicit path must already exist. Without one, the default location
    /// is used and created with defaults on first run.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, ValidationResult), AppError> {
        match explicit {
            Some(path) if !path.exists() => {
                Err(ConfigError::NotFound(path.display().to_string()).into())
            }
            Some(path) => Self::load_validated_from(path),
            None => Self::load_validated_from(&Self::config_path()),
        }
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let mut config = Self::default();
            if let Some(parent) = path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(path)?;
            tracing::info!("Wrote default configuration to {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged; validation errors are returned as
    /// [`ConfigError::Invalid`].
    pub fn load_validated_from(path: &Path) -> Result<(Self, ValidationResult), AppError> {
        let config = Self::load_from(path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.service.base_url, "service.base_url", &mut result);

        match self.service.timeout_secs {
            Some(0) => result.add_error("service.timeout_secs", "Timeout must be greater than 0"),
            Some(secs) if secs > 300 => result.add_warning(
                "service.timeout_secs",
                "Timeout is unusually long (>300 seconds)",
            ),
            _ => {}
        }

        if let Some(locale) = &self.preferences.default_locale {
            if !SUPPORTED_LOCALES.contains(&locale.as_str()) {
                result.add_warning(
                    "preferences.default_locale",
                    format!("Unsupported locale '{}', system locale will be used", locale),
                );
            }
        }

        if let Some(unit) = &self.preferences.default_unit {
            if !SUPPORTED_UNITS.contains(&unit.as_str()) {
                result.add_warning(
                    "preferences.default_unit",
                    format!("Unsupported unit '{}', km will be used", unit),
                );
            }
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if url.port() == Some(0) {
                    result.add_error(field_name, "Port cannot be 0");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path of the default configuration file
    pub fn config_path() -> PathBuf {
        default_config_dir().join("config.toml")
    }
}
