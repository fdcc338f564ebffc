//! Installation sentinels.
//!
//! A sentinel is an empty file written by the last step of an install
//! command. Its existence is the only record that the install completed;
//! the unpacked contents are never inspected.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::packages::Package;

/// Marker file recording a completed installation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallSentinel {
    file_name: String,
}

impl InstallSentinel {
    /// Sentinel for a package: `<package>_installed`.
    pub fn for_package(package: Package) -> Self {
        Self::named(package.name())
    }

    /// Sentinel for an arbitrary step name.
    pub fn named(name: &str) -> Self {
        Self {
            file_name: format!("{}_installed", name),
        }
    }

    /// Sentinel file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Sentinel path inside an installation working directory.
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }

    /// Check whether the sentinel exists in `dir`.
    pub fn check(&self, dir: &Path) -> SentinelState {
        let path = self.path_in(dir);
        match std::fs::metadata(&path) {
            Ok(meta) => SentinelState {
                path,
                present: true,
                written_at: meta.modified().ok().map(DateTime::<Utc>::from),
            },
            Err(_) => SentinelState {
                path,
                present: false,
                written_at: None,
            },
        }
    }
}

impl std::fmt::Display for InstallSentinel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.file_name)
    }
}

/// Observed state of a sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct SentinelState {
    /// Where the sentinel was looked for.
    pub path: PathBuf,
    /// Whether the sentinel exists.
    pub present: bool,
    /// When it was written, if known.
    pub written_at: Option<DateTime<Utc>>,
}
