//! Configuration schema.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! usable configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::packages::constants::{
    MEMBANNOTATOR_DEFAULT_BASE_URL, MEMBANNOTATOR_DEFAULT_VERSION, TOMOSEGMEMTV_DEFAULT_URL,
    TOMOSEGMEMTV_DEFAULT_VERSION,
};

/// Plugin configuration.
///
/// Passed explicitly to [`Plugin`](crate::plugin::Plugin); there is no
/// process-wide configuration state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// Root directory all packages are installed under.
    pub em_root: PathBuf,

    /// Segmentation toolkit version.
    pub tomosegmemtv_version: String,

    /// Annotator version.
    pub annotator_version: String,

    /// Download URL of the segmentation toolkit archive.
    pub tomosegmemtv_url: String,

    /// Base URL the annotator archive is published under.
    pub annotator_base_url: String,

    /// Where temporary extraction directories are created.
    pub temp_root: PathBuf,

    /// What happens to the annotator extraction directory after install.
    pub temp_cleanup: TempCleanup,

    /// Operating system family used for the runtime environment.
    pub os_family: OsFamilySetting,

    /// Use an existing segmentation toolkit installation instead of the
    /// managed one.
    pub tomosegmemtv_home: Option<PathBuf>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            em_root: default_em_root(),
            tomosegmemtv_version: TOMOSEGMEMTV_DEFAULT_VERSION.to_string(),
            annotator_version: MEMBANNOTATOR_DEFAULT_VERSION.to_string(),
            tomosegmemtv_url: TOMOSEGMEMTV_DEFAULT_URL.to_string(),
            annotator_base_url: MEMBANNOTATOR_DEFAULT_BASE_URL.to_string(),
            temp_root: std::env::temp_dir(),
            temp_cleanup: TempCleanup::default(),
            os_family: OsFamilySetting::default(),
            tomosegmemtv_home: None,
        }
    }
}

impl PluginConfig {
    /// Configuration with defaults and the given EM root.
    pub fn with_em_root(em_root: impl Into<PathBuf>) -> Self {
        Self {
            em_root: em_root.into(),
            ..Default::default()
        }
    }

    /// Resolve relative directories against `base`.
    ///
    /// Install commands run inside the plugin directory, so every path they
    /// see must already be absolute. Empty paths are left for the validator.
    pub fn anchored_at(mut self, base: &Path) -> Self {
        let anchor = |path: &mut PathBuf| {
            if path.is_relative() && !path.as_os_str().is_empty() {
                *path = base.join(&*path);
            }
        };
        anchor(&mut self.em_root);
        anchor(&mut self.temp_root);
        if let Some(home) = self.tomosegmemtv_home.as_mut() {
            anchor(home);
        }
        self
    }
}

fn default_em_root() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("scipion").join("software").join("em"))
        .unwrap_or_else(|| PathBuf::from("software/em"))
}

/// Policy for the annotator's temporary extraction directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TempCleanup {
    /// Never remove it.
    Keep,
    /// Remove it once the silent installer succeeds.
    #[default]
    OnSuccess,
    /// Remove it whether or not the installer succeeds.
    Always,
}

/// Configured operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OsFamilySetting {
    /// Detect from the running system.
    #[default]
    Auto,
    /// Treat the system as a generic Linux distribution.
    Generic,
    /// Treat the system as CentOS.
    #[serde(rename = "centos")]
    CentOs,
}
