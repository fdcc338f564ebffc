//! Runtime environment for the membraneAnnotator binaries.
//!
//! The annotator ships its own MATLAB runtime. Its shared libraries must be
//! on `LD_LIBRARY_PATH`, and on CentOS a glibc shim must be preloaded.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use super::detection::OsFamily;
use crate::packages::constants::{CENTOS_SHIM, MCR_ARCH};

/// Library search path variable.
pub const LD_LIBRARY_PATH: &str = "LD_LIBRARY_PATH";

/// Library preload variable.
pub const LD_PRELOAD: &str = "LD_PRELOAD";

/// Environment variables for a launched process.
///
/// Starts from an inherited environment; values set afterwards override
/// inherited ones and are remembered as overrides. Inherited variables that
/// are not valid UTF-8 are kept aside and passed to child processes as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeEnvironment {
    vars: BTreeMap<String, String>,
    overridden: BTreeSet<String>,
    #[serde(skip)]
    opaque: BTreeMap<OsString, OsString>,
}

impl RuntimeEnvironment {
    /// An empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// An environment inheriting the given variables.
    pub fn inherit<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            ..Self::default()
        }
    }

    /// An environment inheriting raw OS variables, which need not be UTF-8.
    pub fn inherit_os<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env = Self::default();
        for (key, value) in vars {
            let utf8 = key
                .to_str()
                .zip(value.to_str())
                .map(|(k, v)| (k.to_owned(), v.to_owned()));
            match utf8 {
                Some((k, v)) => {
                    env.vars.insert(k, v);
                }
                None => {
                    env.opaque.insert(key, value);
                }
            }
        }
        env
    }

    /// An environment inheriting the current process environment.
    pub fn from_process() -> Self {
        Self::inherit_os(std::env::vars_os())
    }

    /// Set a variable, replacing any inherited value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.opaque.remove(OsStr::new(&key));
        self.overridden.insert(key.clone());
        self.vars.insert(key, value.into());
    }

    /// Get a variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether a variable is present.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// All variables, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Inherited variables that are not valid UTF-8.
    pub fn opaque(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.opaque.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Only the variables set on top of the inherited environment.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overridden
            .iter()
            .filter_map(|k| self.vars.get(k).map(|v| (k.as_str(), v.as_str())))
    }

    /// Number of variables, opaque ones included.
    pub fn len(&self) -> usize {
        self.vars.len() + self.opaque.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Library directories inside a MATLAB runtime root.
pub fn library_dirs(runtime_root: &Path) -> [PathBuf; 4] {
    [
        runtime_root.join("runtime").join(MCR_ARCH),
        runtime_root.join("bin").join(MCR_ARCH),
        runtime_root.join("sys").join("os").join(MCR_ARCH),
        runtime_root
            .join("sys")
            .join("opengl")
            .join("lib")
            .join(MCR_ARCH),
    ]
}

/// Path of the glibc compatibility shim inside a MATLAB runtime root.
pub fn centos_shim(runtime_root: &Path) -> PathBuf {
    runtime_root.join("bin").join(MCR_ARCH).join(CENTOS_SHIM)
}

/// Build the runtime environment on top of `base`.
///
/// Sets `LD_LIBRARY_PATH` to the four runtime library directories, replacing
/// any inherited value, and sets `LD_PRELOAD` only on CentOS.
pub fn build_runtime_environment(
    mut base: RuntimeEnvironment,
    runtime_root: &Path,
    os: OsFamily,
) -> RuntimeEnvironment {
    let library_path = library_dirs(runtime_root)
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(":");
    base.set(LD_LIBRARY_PATH, library_path);

    if os == OsFamily::CentOs {
        tracing::info!("CentOS detected. Adding extra environment variable");
        base.set(LD_PRELOAD, centos_shim(runtime_root).display().to_string());
    }

    base
}
