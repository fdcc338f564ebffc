//! Configuration validation rules.
//!
//! - Versions must be non-empty path-safe tokens
//! - URLs must be http or https
//! - Directories must be non-empty

use crate::config::schema::PluginConfig;
use crate::error::{PluginError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Offending config key.
    pub field: String,
    /// Human-readable error message.
    pub message: String,
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &PluginConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_version(&mut errors, "tomosegmemtv_version", &config.tomosegmemtv_version);
    check_version(&mut errors, "annotator_version", &config.annotator_version);
    check_url(&mut errors, "tomosegmemtv_url", &config.tomosegmemtv_url);
    check_url(&mut errors, "annotator_base_url", &config.annotator_base_url);

    if config.em_root.as_os_str().is_empty() {
        errors.push(ValidationError {
            field: "em_root".to_string(),
            message: "em_root must not be empty".to_string(),
        });
    }
    if config.temp_root.as_os_str().is_empty() {
        errors.push(ValidationError {
            field: "temp_root".to_string(),
            message: "temp_root must not be empty".to_string(),
        });
    }

    errors
}

/// Validate a configuration, failing on the first batch of errors.
pub fn validate(config: &PluginConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        Ok(())
    } else {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Err(PluginError::ConfigValidationError { message })
    }
}

fn check_version(errors: &mut Vec<ValidationError>, field: &str, version: &str) {
    if version.is_empty() {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("{} must not be empty", field),
        });
    } else if version.contains(['/', '\\']) || version.chars().any(char::is_whitespace) {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("{} '{}' contains path separators or spaces", field, version),
        });
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, url: &str) {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("{} '{}' is not an http(s) URL", field, url),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&PluginConfig::default()).is_empty());
        assert!(validate(&PluginConfig::default()).is_ok());
    }

    #[test]
    fn empty_version_is_rejected() {
        let config = PluginConfig {
            annotator_version: String::new(),
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "annotator_version");
    }

    #[test]
    fn version_with_separator_is_rejected() {
        let config = PluginConfig {
            tomosegmemtv_version: "../1.0".to_string(),
            ..Default::default()
        };
        assert!(!validate_config(&config).is_empty());
    }

    #[test]
    fn non_http_url_is_rejected() {
        let config = PluginConfig {
            tomosegmemtv_url: "ftp://example.org/a.zip".to_string(),
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors[0].field, "tomosegmemtv_url");
    }

    #[test]
    fn collects_all_errors() {
        let config = PluginConfig {
            em_root: PathBuf::new(),
            tomosegmemtv_version: String::new(),
            annotator_base_url: "nope".to_string(),
            ..Default::default()
        };
        assert_eq!(validate_config(&config).len(), 3);
        assert!(matches!(
            validate(&config),
            Err(PluginError::ConfigValidationError { .. })
        ));
    }
}
