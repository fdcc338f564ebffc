//! Configuration file discovery and loading.
//!
//! Layers are merged in this order, later layers overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. User global config (`~/.tomosegmemtv/config.yml`)
//! 3. Explicit config file (`--config`)
//! 4. Environment variables (`EM_ROOT`, `TOMOSEGMEMTV_HOME`)
//!
//! Relative directories in the result are resolved against the current
//! working directory.

use crate::config::schema::PluginConfig;
use crate::config::validator::validate;
use crate::error::{PluginError, Result};
use crate::packages::constants::{EM_ROOT_VAR, TOMOSEGMEMTV_HOME_VAR};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables that override config keys.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    (EM_ROOT_VAR, "em_root"),
    (TOMOSEGMEMTV_HOME_VAR, "tomosegmemtv_home"),
];

/// Paths to configuration files in merge order.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.tomosegmemtv/config.yml
    pub user_global: Option<PathBuf>,

    /// File passed on the command line.
    pub explicit: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files, adding the explicit one if given.
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self {
            user_global: Self::find_user_global(),
            explicit: explicit.map(Path::to_path_buf),
        }
    }

    /// Find user's global config at ~/.tomosegmemtv/config.yml
    fn find_user_global() -> Option<PathBuf> {
        let path = dirs::home_dir()?.join(".tomosegmemtv").join("config.yml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// All config paths in merge order.
    pub fn all(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.explicit.iter()).collect()
    }
}

/// Parse YAML content into a config.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<PluginConfig> {
    let value = parse_value(content, source_path)?;
    from_value(value, source_path)
}

/// Load a config file as a raw YAML mapping (for merging).
///
/// An empty file yields an empty mapping.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PluginError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PluginError::Io(e)
        }
    })?;

    parse_value(&content, path)
}

fn parse_value(content: &str, path: &Path) -> Result<Value> {
    let value: Value =
        serde_yaml::from_str(content).map_err(|e| PluginError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        Value::Mapping(_) => Ok(value),
        _ => Err(PluginError::ConfigParseError {
            path: path.to_path_buf(),
            message: "expected a mapping at the top level".to_string(),
        }),
    }
}

fn from_value(value: Value, path: &Path) -> Result<PluginConfig> {
    serde_yaml::from_value(value).map_err(|e| PluginError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge config layers in order (later overrides earlier).
///
/// The schema is flat, so keys are replaced wholesale. A `null` value
/// removes the key, restoring the built-in default.
pub fn merge_layers(layers: &[Value]) -> Value {
    let mut merged = Mapping::new();
    for layer in layers {
        if let Value::Mapping(map) = layer {
            for (key, value) in map {
                if value.is_null() {
                    merged.remove(key);
                } else {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
    }
    Value::Mapping(merged)
}

/// Build the environment-variable layer.
///
/// Unset and empty variables are ignored.
pub fn env_layer<F>(env_fn: F) -> Value
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let mut map = Mapping::new();
    for (var, key) in ENV_OVERRIDES {
        if let Ok(value) = env_fn(var) {
            if !value.is_empty() {
                map.insert(Value::from(*key), Value::from(value));
            }
        }
    }
    Value::Mapping(map)
}

/// Load, merge and validate configuration from all layers.
///
/// # Errors
///
/// Returns `ConfigNotFound` if an explicit config file doesn't exist.
/// Returns `ConfigParseError` if any layer is invalid.
/// Returns `ConfigValidationError` if the merged values are unusable.
pub fn load_config(explicit: Option<&Path>) -> Result<PluginConfig> {
    load_config_with_env(&ConfigPaths::discover(explicit), |key| std::env::var(key))
}

/// Load with a custom env var lookup (for testing).
pub fn load_config_with_env<F>(paths: &ConfigPaths, env_fn: F) -> Result<PluginConfig>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let mut layers = Vec::new();
    for path in paths.all() {
        tracing::debug!("Loading config layer {}", path.display());
        layers.push(load_config_value(path)?);
    }
    layers.push(env_layer(env_fn));

    let source = paths
        .explicit
        .clone()
        .or_else(|| paths.user_global.clone())
        .unwrap_or_else(|| PathBuf::from("<defaults>"));

    let cwd = std::env::current_dir()?;
    let config = from_value(merge_layers(&layers), &source)?.anchored_at(&cwd);
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TempCleanup;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn make_env(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> std::result::Result<String, std::env::VarError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned().ok_or(std::env::VarError::NotPresent)
    }

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn no_layers_yields_defaults() {
        let config = load_config_with_env(&ConfigPaths::default(), make_env(&[])).unwrap();
        assert_eq!(config, PluginConfig::default());
    }

    #[test]
    fn explicit_file_overrides_user_global() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.yml");
        let explicit = temp.path().join("explicit.yml");
        fs::write(&global, "em_root: /global\ntemp_cleanup: keep\n").unwrap();
        fs::write(&explicit, "em_root: /explicit\n").unwrap();

        let paths = ConfigPaths {
            user_global: Some(global),
            explicit: Some(explicit),
        };
        let config = load_config_with_env(&paths, make_env(&[])).unwrap();

        assert_eq!(config.em_root, PathBuf::from("/explicit"));
        assert_eq!(config.temp_cleanup, TempCleanup::Keep);
    }

    #[test]
    fn env_vars_override_files() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("config.yml");
        fs::write(&explicit, "em_root: /from-file\n").unwrap();

        let paths = ConfigPaths {
            user_global: None,
            explicit: Some(explicit),
        };
        let env = make_env(&[("EM_ROOT", "/from-env"), ("TOMOSEGMEMTV_HOME", "/custom/tsmtv")]);
        let config = load_config_with_env(&paths, env).unwrap();

        assert_eq!(config.em_root, PathBuf::from("/from-env"));
        assert_eq!(config.tomosegmemtv_home, Some(PathBuf::from("/custom/tsmtv")));
    }

    #[test]
    fn relative_em_root_from_env_is_made_absolute() {
        let config =
            load_config_with_env(&ConfigPaths::default(), make_env(&[("EM_ROOT", "em")]))
                .unwrap();
        assert_eq!(config.em_root, std::env::current_dir().unwrap().join("em"));
    }

    #[test]
    fn empty_env_var_is_ignored() {
        let config =
            load_config_with_env(&ConfigPaths::default(), make_env(&[("EM_ROOT", "")])).unwrap();
        assert_ne!(config.em_root, PathBuf::from(""));
    }

    #[test]
    fn missing_explicit_file_is_not_found() {
        let paths = ConfigPaths {
            user_global: None,
            explicit: Some(PathBuf::from("/nonexistent/config.yml")),
        };
        let result = load_config_with_env(&paths, make_env(&[]));
        assert!(matches!(result, Err(PluginError::ConfigNotFound { .. })));
    }

    #[test]
    fn empty_file_is_an_empty_layer() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "").unwrap();

        let value = load_config_value(&path).unwrap();
        assert!(value.as_mapping().unwrap().is_empty());
    }

    #[test]
    fn non_mapping_file_is_a_parse_error() {
        let result = parse_config("- a\n- b\n", Path::new("list.yml"));
        assert!(matches!(result, Err(PluginError::ConfigParseError { .. })));
    }

    #[test]
    fn invalid_values_fail_validation() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "tomosegmemtv_version: ''\n").unwrap();

        let paths = ConfigPaths {
            user_global: None,
            explicit: Some(path),
        };
        let result = load_config_with_env(&paths, make_env(&[]));
        assert!(matches!(result, Err(PluginError::ConfigValidationError { .. })));
    }

    #[test]
    fn merge_layers_replaces_keys_in_order() {
        let merged = merge_layers(&[yaml("a: 1\nb: 2"), yaml("b: 3\nc: 4"), yaml("c: 5")]);
        assert_eq!(merged["a"], 1);
        assert_eq!(merged["b"], 3);
        assert_eq!(merged["c"], 5);
    }

    #[test]
    fn null_in_later_layer_restores_default() {
        let merged = merge_layers(&[yaml("tomosegmemtv_home: /x"), yaml("tomosegmemtv_home: null")]);
        assert!(merged.get("tomosegmemtv_home").is_none());
    }
}
