//! # CLI Error Type
//!
//! Unified error type for subcommands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in qrwari                                 │
//! │                                                                         │
//! │  qrwari bill dinner.json                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Subcommand                                                      │  │
//! │  │  CliResult<String>                                               │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  File / JSON error? ─── CliError::Io / Json ──────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Domain error? ─────── CoreError ──────────── CliError ────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ─── stdout ───────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: error[UNSUPPORTED_IDENTIFIER]: Unsupported PromptPay id ...    │
//! │  exit status: ErrorCode::exit_status()                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use qrwari_core::CoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Everything a subcommand can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Split / payload / payment-request failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Loaded configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Failed to read an input file.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input was not a valid event document.
    #[error("Invalid event JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::ConfigSaveFailed(err.to_string())
    }
}

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input document or values are invalid
    ValidationError,

    /// PromptPay id cannot be classified
    UnsupportedIdentifier,

    /// Configuration missing or invalid
    ConfigError,

    /// File could not be read
    IoError,
}

impl ErrorCode {
    /// Upper-case name as printed on stderr.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::UnsupportedIdentifier => "UNSUPPORTED_IDENTIFIER",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::IoError => "IO_ERROR",
        }
    }

    /// Process exit status (BSD `sysexits` values).
    pub fn exit_status(&self) -> u8 {
        match self {
            ErrorCode::ValidationError => 65,
            ErrorCode::UnsupportedIdentifier => 65,
            ErrorCode::IoError => 74,
            ErrorCode::ConfigError => 78,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CliError {
    /// Wraps an I/O failure with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::Core(CoreError::UnsupportedIdentifier { .. }) => {
                ErrorCode::UnsupportedIdentifier
            }
            CliError::Core(CoreError::MissingPromptPayId) => ErrorCode::ConfigError,
            CliError::Core(_) | CliError::Json(_) => ErrorCode::ValidationError,
            CliError::InvalidConfig(_)
            | CliError::ConfigLoadFailed(_)
            | CliError::ConfigSaveFailed(_) => ErrorCode::ConfigError,
            CliError::Io { .. } => ErrorCode::IoError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err: CliError = CoreError::UnsupportedIdentifier {
            raw: "999".to_string(),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::UnsupportedIdentifier);

        let err: CliError = CoreError::MissingPromptPayId.into();
        assert_eq!(err.code(), ErrorCode::ConfigError);

        let err: CliError = CoreError::EmptyParticipants.into();
        assert_eq!(err.code(), ErrorCode::ValidationError);

        let err = CliError::io(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.code(), ErrorCode::IoError);
        assert_eq!(err.code().exit_status(), 74);
    }

    #[test]
    fn test_core_message_passes_through() {
        let err: CliError = CoreError::MissingPromptPayId.into();
        assert_eq!(err.to_string(), "PromptPay id is not set");
    }

    #[test]
    fn test_code_prints_screaming_snake() {
        assert_eq!(ErrorCode::UnsupportedIdentifier.as_str(), "UNSUPPORTED_IDENTIFIER");
        assert_eq!(ErrorCode::ConfigError.to_string(), "CONFIG_ERROR");
    }
}
