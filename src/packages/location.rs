//! Install location resolution.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use super::constants::{MEMBANNOTATOR, PLUGIN_EM_DIR, TOMOSEGMEMTV};

/// A package managed by this plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Package {
    /// The segmentation toolkit.
    TomoSegMemTv,
    /// The GUI annotator.
    MembraneAnnotator,
}

impl Package {
    /// Both packages, in installation order.
    pub const ALL: [Package; 2] = [Package::TomoSegMemTv, Package::MembraneAnnotator];

    /// Package name as used in directory, archive and sentinel names.
    pub fn name(&self) -> &'static str {
        match self {
            Package::TomoSegMemTv => TOMOSEGMEMTV,
            Package::MembraneAnnotator => MEMBANNOTATOR,
        }
    }

    /// Directory under the EM root holding this package.
    pub fn em_dir(&self) -> &'static str {
        PLUGIN_EM_DIR
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where a package version lives on disk.
///
/// Derived from the configured root plus static name/version values;
/// never validated against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageLocation {
    /// EM root the package is installed under.
    pub root: PathBuf,
    /// The package.
    pub package: Package,
    /// Package version.
    pub version: String,
}

impl PackageLocation {
    /// Create a location for a package version under `root`.
    pub fn new(root: impl Into<PathBuf>, package: Package, version: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            package,
            version: version.into(),
        }
    }

    /// `<name>-<version>`.
    pub fn dir_name(&self) -> String {
        format!("{}-{}", self.package.name(), self.version)
    }

    /// Directory shared by the plugin's packages; install commands run here.
    pub fn plugin_dir(&self) -> PathBuf {
        self.root.join(self.package.em_dir())
    }

    /// Absolute install directory.
    pub fn home(&self) -> PathBuf {
        self.plugin_dir().join(self.dir_name())
    }
}

/// Resolve the install directory of `package` at `version` under `root`.
///
/// Returns `<root>/<em_dir>/<name>-<version>` whether or not anything has
/// been installed there yet.
pub fn resolve_home(root: &Path, package: Package, version: &str) -> PathBuf {
    PackageLocation::new(root, package, version).home()
}
