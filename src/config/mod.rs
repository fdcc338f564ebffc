//! Plugin configuration.
//!
//! Settings come from built-in defaults, `~/.tomosegmemtv/config.yml`, an
//! explicit `--config` file and finally `EM_ROOT` / `TOMOSEGMEMTV_HOME`,
//! each layer overriding the previous one. The merged result is checked by
//! [`validate`] before use.
//!
//! # Example
//!
//! ```
//! use tomosegmemtv::config::{parse_config, validate, TempCleanup};
//! use std::path::Path;
//!
//! let config = parse_config("em_root: /opt/em\ntemp_cleanup: keep\n", Path::new("config.yml")).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.temp_cleanup, TempCleanup::Keep);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    env_layer, load_config, load_config_value, load_config_with_env, merge_layers, parse_config,
    ConfigPaths,
};
pub use schema::{OsFamilySetting, PluginConfig, TempCleanup};
pub use validator::{validate, validate_config, ValidationError};
