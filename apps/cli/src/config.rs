//! # CLI Configuration
//!
//! Who gets paid and how payloads are stamped.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --promptpay-id 0812345678                                          │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     QRWARI_PROMPTPAY_ID=0812345678                                     │
//! │     QRWARI_STRICT_REFERENCES=true                                      │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/qrwari/qrwari.toml (Linux)                               │
//! │     ~/Library/Application Support/me.seta.qrwari/qrwari.toml (macOS)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     no payee, TH / 764, lenient references                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # qrwari.toml
//! [payee]
//! promptpay_id = "081-234-5678"
//!
//! [locale]
//! country_code = "TH"
//! currency_numeric = "764"
//! prefer_static_when_no_amount = true
//!
//! [split]
//! strict_references = false
//! ```

use std::path::{Path, PathBuf};

use qrwari_core::bill::LocaleSettings;
use qrwari_core::validation::{validate_country_code, validate_currency_numeric};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

/// Config file name inside the platform config directory.
const CONFIG_FILE_NAME: &str = "qrwari.toml";

/// The payee's PromptPay id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promptpay_id: Option<String>,
}

/// Split engine options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSettings {
    /// Reject events whose items tag unknown participant ids.
    #[serde(default)]
    pub strict_references: bool,
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrwariConfig {
    #[serde(default)]
    pub payee: PayeeConfig,

    #[serde(default)]
    pub locale: LocaleSettings,

    #[serde(default)]
    pub split: SplitSettings,
}

impl QrwariConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (qrwari.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with a custom environment lookup.
    pub fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match config_path {
            // An explicit path must exist
            Some(path) => {
                info!(?path, "Loading config from file");
                config = Self::read_file(&path)?;
            }
            None => {
                if let Some(path) = Self::default_config_path() {
                    if path.exists() {
                        info!(?path, "Loading config from file");
                        config = Self::read_file(&path)?;
                    } else {
                        debug!(?path, "Config file not found, using defaults");
                    }
                }
            }
        }

        config.apply_env_overrides(env);
        config.validate()?;

        Ok(config)
    }

    /// Loads only what the config file says, for rewriting it.
    ///
    /// Environment overrides are left out so they never end up on disk, and
    /// a missing file (explicit or default) yields the defaults.
    pub fn load_file(config_path: Option<PathBuf>) -> CliResult<Self> {
        let Some(path) = config_path.or_else(Self::default_config_path) else {
            return Ok(Self::default());
        };

        let config = if path.exists() {
            debug!(?path, "Loading stored config");
            Self::read_file(&path)?
        } else {
            debug!(?path, "Config file not found, starting from defaults");
            Self::default()
        };
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CliResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CliError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CliError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| CliError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        validate_country_code(&self.locale.country_code)
            .map_err(|e| CliError::InvalidConfig(e.to_string()))?;
        validate_currency_numeric(&self.locale.currency_numeric)
            .map_err(|e| CliError::InvalidConfig(e.to_string()))?;

        Ok(())
    }

    /// Returns the configured PromptPay id, if any and not blank.
    pub fn promptpay_id(&self) -> Option<&str> {
        self.payee
            .promptpay_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    fn read_file(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CliError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = env("QRWARI_PROMPTPAY_ID") {
            debug!("Overriding PromptPay id from environment");
            self.payee.promptpay_id = Some(id);
        }

        if let Some(code) = env("QRWARI_COUNTRY_CODE") {
            self.locale.country_code = code;
        }

        if let Some(code) = env("QRWARI_CURRENCY_NUMERIC") {
            self.locale.currency_numeric = code;
        }

        if let Some(strict) = env("QRWARI_STRICT_REFERENCES") {
            match strict.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" => self.split.strict_references = true,
                "0" | "false" | "no" => self.split.strict_references = false,
                _ => warn!(value = %strict, "Unknown QRWARI_STRICT_REFERENCES value"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("me", "seta", "qrwari")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
