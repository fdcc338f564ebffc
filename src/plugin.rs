//! The installer/launcher facade.
//!
//! [`Plugin`] ties a [`PluginConfig`] to the filesystem layout: it resolves
//! install locations, composes the install commands, builds the runtime
//! environment for the annotator, and hands programs to a [`JobRunner`].
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use tomosegmemtv::config::PluginConfig;
//! use tomosegmemtv::environment::{FixedOs, OsFamily};
//! use tomosegmemtv::plugin::Plugin;
//!
//! let plugin = Plugin::with_detector(
//!     PluginConfig::with_em_root("/opt/em"),
//!     Box::new(FixedOs(OsFamily::Generic)),
//! );
//! assert_eq!(
//!     plugin.locate_program("tomoseg"),
//!     Path::new("/opt/em/tomosegmemtv-em/tomosegmemtv-1.0/bin/tomoseg")
//! );
//! ```

use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::PluginConfig;
use crate::environment::{
    build_runtime_environment, detector_for, OsDetector, OsFamily, RuntimeEnvironment,
};
use crate::error::Result;
use crate::install::{
    annotator_command, temp_dest, toolkit_command, AnnotatorInstall, InstallCommand,
    InstallSentinel, PackageDefinition, PackageRegistry, SentinelState, ToolkitInstall,
};
use crate::launcher::JobRunner;
use crate::packages::constants::{
    HOMEPAGE, MCR_DIR, MEMBANNOTATOR_BIN, PLUGIN_EM_DIR, PLUGIN_VERSION, REFERENCES, TOMOSEGMEMTV,
    VOID_ARCHIVE,
};
use crate::packages::{resolve_home, Package};

/// External programs the install commands call.
pub const NEEDED_PROGRAMS: &[&str] = &["wget", "tar", "unzip"];

/// Static facts about the plugin.
#[derive(Debug, Clone, Serialize)]
pub struct PluginMetadata {
    pub name: &'static str,
    pub version: &'static str,
    pub references: &'static [&'static str],
    pub homepage: &'static str,
}

/// Install state of one package.
#[derive(Debug, Clone, Serialize)]
pub struct PackageStatus {
    pub package: Package,
    pub version: String,
    pub home: PathBuf,
    pub sentinel: SentinelState,
}

/// Installer and launcher for the segmentation toolkit and the annotator.
pub struct Plugin {
    config: PluginConfig,
    detector: Box<dyn OsDetector>,
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Plugin {
    /// Create a plugin using the OS detection the configuration asks for.
    pub fn new(config: PluginConfig) -> Self {
        let detector = detector_for(config.os_family);
        Self { config, detector }
    }

    /// Create a plugin with an explicit OS detector.
    pub fn with_detector(config: PluginConfig, detector: Box<dyn OsDetector>) -> Self {
        Self { config, detector }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: TOMOSEGMEMTV,
            version: PLUGIN_VERSION,
            references: REFERENCES,
            homepage: HOMEPAGE,
        }
    }

    /// Configured version of a package.
    pub fn version(&self, package: Package) -> &str {
        match package {
            Package::TomoSegMemTv => &self.config.tomosegmemtv_version,
            Package::MembraneAnnotator => &self.config.annotator_version,
        }
    }

    /// Managed install directory of a package, ignoring overrides.
    pub fn resolve_home(&self, package: Package) -> PathBuf {
        resolve_home(&self.config.em_root, package, self.version(package))
    }

    /// Directory the install commands run in and write sentinels to.
    pub fn plugin_dir(&self) -> PathBuf {
        self.config.em_root.join(PLUGIN_EM_DIR)
    }

    /// Segmentation toolkit home, honoring `tomosegmemtv_home`.
    pub fn toolkit_home(&self) -> PathBuf {
        match &self.config.tomosegmemtv_home {
            Some(home) => home.clone(),
            None => self.resolve_home(Package::TomoSegMemTv),
        }
    }

    pub fn annotator_home(&self) -> PathBuf {
        self.resolve_home(Package::MembraneAnnotator)
    }

    /// MATLAB runtime bundled with the annotator.
    pub fn runtime_root(&self) -> PathBuf {
        self.annotator_home().join(MCR_DIR)
    }

    /// `membraneAnnotator-<version>`.
    pub fn annotator_identifier(&self) -> String {
        format!(
            "{}-{}",
            Package::MembraneAnnotator.name(),
            self.config.annotator_version
        )
    }

    /// Where the annotator archive is downloaded to and reused from.
    pub fn cached_archive(&self) -> PathBuf {
        self.config
            .em_root
            .join(format!("{}.tar.gz", self.annotator_identifier()))
    }

    pub fn annotator_download_url(&self) -> String {
        format!(
            "{}{}.tar.gz",
            self.config.annotator_base_url,
            self.annotator_identifier()
        )
    }

    /// Path of a segmentation toolkit program. Not checked for existence.
    pub fn locate_program(&self, name: &str) -> PathBuf {
        self.toolkit_home().join("bin").join(name)
    }

    /// Path of the annotator executable. Not checked for existence.
    pub fn annotator_binary(&self) -> PathBuf {
        MEMBANNOTATOR_BIN
            .iter()
            .fold(self.annotator_home(), |path, part| path.join(part))
    }

    /// The two install commands, toolkit first.
    pub fn define_installation(&self) -> Vec<InstallCommand> {
        self.define_installation_with_rng(&mut rand::thread_rng())
    }

    /// The two install commands, with the temp directory suffix drawn from
    /// `rng`.
    pub fn define_installation_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Vec<InstallCommand> {
        let toolkit_home = self.toolkit_home();
        let toolkit = toolkit_command(&ToolkitInstall {
            url: &self.config.tomosegmemtv_url,
            home: &toolkit_home,
        });

        let identifier = self.annotator_identifier();
        let download_url = self.annotator_download_url();
        let cached_archive = self.cached_archive();
        let home = self.annotator_home();
        let plugin_dir = self.plugin_dir();
        let temp_dir = temp_dest(&self.config.temp_root, &identifier, rng);
        let annotator = annotator_command(&AnnotatorInstall {
            identifier: &identifier,
            download_url: &download_url,
            cached_archive: &cached_archive,
            home: &home,
            plugin_dir: &plugin_dir,
            temp_dir: &temp_dir,
            cleanup: self.config.temp_cleanup,
        });

        vec![toolkit, annotator]
    }

    /// The package definition handed to a registry.
    pub fn package_definition(&self) -> PackageDefinition {
        PackageDefinition {
            name: TOMOSEGMEMTV.to_string(),
            version: self.config.tomosegmemtv_version.clone(),
            archive: VOID_ARCHIVE.to_string(),
            commands: self.define_installation(),
            needed_programs: NEEDED_PROGRAMS.iter().map(|p| p.to_string()).collect(),
            default: true,
        }
    }

    /// Register the plugin's package with `registry`.
    pub fn define_binaries(&self, registry: &mut dyn PackageRegistry) {
        registry.add_package(self.package_definition());
    }

    /// Sentinel state of each package.
    pub fn status(&self) -> Vec<PackageStatus> {
        let plugin_dir = self.plugin_dir();
        Package::ALL
            .iter()
            .map(|&package| PackageStatus {
                package,
                version: self.version(package).to_string(),
                home: match package {
                    Package::TomoSegMemTv => self.toolkit_home(),
                    Package::MembraneAnnotator => self.annotator_home(),
                },
                sentinel: InstallSentinel::for_package(package).check(&plugin_dir),
            })
            .collect()
    }

    pub fn os_family(&self) -> OsFamily {
        self.detector.detect()
    }

    /// Runtime environment for the annotator, on top of the current
    /// process environment.
    pub fn runtime_environment(&self) -> RuntimeEnvironment {
        self.runtime_environment_with(RuntimeEnvironment::from_process())
    }

    /// Runtime environment for the annotator, on top of `base`.
    pub fn runtime_environment_with(&self, base: RuntimeEnvironment) -> RuntimeEnvironment {
        build_runtime_environment(base, &self.runtime_root(), self.os_family())
    }

    /// Run a segmentation toolkit program.
    pub fn run_tomo_segmen_tv(
        &self,
        runner: &mut dyn JobRunner,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
    ) -> Result<()> {
        let path = self.locate_program(program);
        tracing::debug!("Running {}", path.display());
        runner.run_job(&path, args, None, cwd)
    }

    /// Run the annotator, with the runtime environment unless `env` is given.
    pub fn run_membrane_annotator(
        &self,
        runner: &mut dyn JobRunner,
        args: &[String],
        env: Option<RuntimeEnvironment>,
        cwd: Option<&Path>,
    ) -> Result<()> {
        let env = env.unwrap_or_else(|| self.runtime_environment());
        let path = self.annotator_binary();
        tracing::debug!("Running {}", path.display());
        runner.run_job(&path, args, Some(&env), cwd)
    }
}
