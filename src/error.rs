//! Error types for installer and launcher operations.
//!
//! This module defines [`PluginError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PluginError` for failures the CLI reports distinctly
//! - Use `anyhow::Error` (via `PluginError::Other`) for unexpected errors
//! - Download, extraction and installer failures surface as a failed
//!   install step; nothing is validated ahead of time

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// An external program needed by an install command is not on PATH.
    #[error("Missing program '{program}' required to install {package}")]
    MissingProgram { program: String, package: String },

    /// An install command exited unsuccessfully; its sentinel was not written.
    #[error(
        "Installation of {package} failed with {} (sentinel {sentinel} not written)",
        exit_status(.code)
    )]
    InstallStepFailed {
        package: String,
        sentinel: String,
        code: Option<i32>,
    },

    /// Shell command or launched program failed.
    #[error("Command failed with {}: {command}", exit_status(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PluginError {
    /// Whether the error comes from loading or validating configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParseError { .. }
                | Self::ConfigValidationError { .. }
        )
    }
}

/// `exit code N`, or `signal` when the process never exited normally.
fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "signal".to_string(),
    }
}

/// Result type alias for plugin operations.
pub type Result<T> = std::result::Result<T, PluginError>;
