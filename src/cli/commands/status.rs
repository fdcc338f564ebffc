//! Status command implementation.
//!
//! The `tomosegmemtv status` command shows where each package lives and
//! whether its install sentinel exists.

use serde::Serialize;
use std::path::PathBuf;

use crate::cli::args::StatusArgs;
use crate::environment::OsFamily;
use crate::error::{PluginError, Result};
use crate::plugin::{PackageStatus, Plugin, PluginMetadata};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Everything `status` reports.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub plugin: PluginMetadata,
    pub em_root: PathBuf,
    pub plugin_dir: PathBuf,
    pub os_family: OsFamily,
    pub packages: Vec<PackageStatus>,
}

impl StatusReport {
    /// Collect the report for a plugin.
    pub fn collect(plugin: &Plugin) -> Self {
        Self {
            plugin: plugin.metadata(),
            em_root: plugin.config().em_root.clone(),
            plugin_dir: plugin.plugin_dir(),
            os_family: plugin.os_family(),
            packages: plugin.status(),
        }
    }

    /// Whether every package is installed.
    pub fn all_installed(&self) -> bool {
        self.packages.iter().all(|p| p.sentinel.present)
    }
}

/// The status command implementation.
pub struct StatusCommand {
    plugin: Plugin,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(plugin: Plugin, args: StatusArgs) -> Self {
        Self { plugin, args }
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let report = StatusReport::collect(&self.plugin);

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&report).map_err(|e| PluginError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!(
            "{} {} - Status",
            report.plugin.name, report.plugin.version
        ));
        ui.message(&format!("EM root:   {}", report.em_root.display()));
        ui.message(&format!("OS family: {}", report.os_family));
        ui.message("");

        for package in &report.packages {
            let label = format!("{} {}", package.package, package.version);
            match package.sentinel.written_at {
                Some(at) if package.sentinel.present => ui.success(&format!(
                    "{} installed {} in {}",
                    label,
                    at.format("%Y-%m-%d %H:%M"),
                    package.home.display()
                )),
                _ if package.sentinel.present => {
                    ui.success(&format!("{} installed in {}", label, package.home.display()))
                }
                _ => ui.warning(&format!("{} not installed", label)),
            }
        }

        ui.message("");
        ui.message(&format!("Cite: {}", report.plugin.references.join(", ")));
        ui.message(&format!("Home: {}", report.plugin.homepage));

        if !report.all_installed() {
            ui.message("");
            ui.message("Run 'tomosegmemtv install' to install missing packages.");
        }

        Ok(CommandResult::success())
    }
}
