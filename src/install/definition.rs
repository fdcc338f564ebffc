//! Package registration.

use serde::Serialize;

use super::command::InstallCommand;

/// Everything a package runner needs to install the plugin's binaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDefinition {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Placeholder archive marker; the commands fetch their own archives.
    pub archive: String,
    /// Install commands in execution order.
    pub commands: Vec<InstallCommand>,
    /// External programs the commands call.
    pub needed_programs: Vec<String>,
    /// Whether the package is installed by default.
    pub default: bool,
}

impl PackageDefinition {
    /// `(command, sentinel)` pairs in execution order.
    pub fn command_pairs(&self) -> Vec<(String, String)> {
        self.commands.iter().map(InstallCommand::as_pair).collect()
    }
}

/// Receives package definitions.
///
/// Implemented by whatever installs packages: the crate's own
/// [`Installer`](super::Installer) front end collects definitions into a
/// `Vec`, and an embedding application can register them with its own
/// package manager.
pub trait PackageRegistry {
    /// Register a package.
    fn add_package(&mut self, package: PackageDefinition);
}

impl PackageRegistry for Vec<PackageDefinition> {
    fn add_package(&mut self, package: PackageDefinition) {
        self.push(package);
    }
}
