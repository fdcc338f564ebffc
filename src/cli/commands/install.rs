//! Install command implementation.
//!
//! The `tomosegmemtv install` command registers the plugin's package
//! definition with the built-in installer and runs it.

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::install::{
    InstallOptions, InstallSentinel, Installer, PackageDefinition, StepOutcome, StepReport,
};
use crate::packages::Package;
use crate::plugin::Plugin;
use crate::ui::{Confirmation, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Prompt key for the annotator license; answerable with
/// `TOMOSEGMEMTV_PROMPT_ACCEPT_LICENSE` in non-interactive runs.
const LICENSE_PROMPT: &str = "accept_license";

/// The install command implementation.
pub struct InstallCommand {
    plugin: Plugin,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(plugin: Plugin, args: InstallArgs) -> Self {
        Self { plugin, args }
    }

    fn options(&self) -> InstallOptions {
        InstallOptions {
            force: self.args.force,
            dry_run: self.args.dry_run,
        }
    }

    /// The annotator's installer accepts its license silently, so ask first
    /// when it is about to run.
    fn confirm_license(&self, ui: &mut dyn UserInterface) -> Result<bool> {
        if self.args.yes || self.args.dry_run {
            return Ok(true);
        }

        let sentinel = InstallSentinel::for_package(Package::MembraneAnnotator);
        if !self.args.force && sentinel.check(&self.plugin.plugin_dir()).present {
            return Ok(true);
        }

        ui.confirm(&Confirmation::new(
            LICENSE_PROMPT,
            "membraneAnnotator installs silently and accepts the MATLAB Runtime license. Continue?",
            true,
        ))
    }

    fn summarize(
        &self,
        definition: &PackageDefinition,
        reports: &[StepReport],
        ui: &mut dyn UserInterface,
    ) {
        if self.args.dry_run {
            ui.message("");
            ui.message("Dry run: nothing was executed.");
            return;
        }

        let installed = reports
            .iter()
            .filter(|r| r.outcome == StepOutcome::Installed)
            .count();
        if installed == 0 {
            ui.success(&format!(
                "{} {} is already installed",
                definition.name, definition.version
            ));
        } else {
            ui.success(&format!(
                "{} {} installed under {}",
                definition.name,
                definition.version,
                self.plugin.plugin_dir().display()
            ));
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut registry: Vec<PackageDefinition> = Vec::new();
        self.plugin.define_binaries(&mut registry);

        if !self.confirm_license(ui)? {
            ui.warning("Installation cancelled");
            return Ok(CommandResult::failure(1));
        }

        let installer = Installer::new(self.plugin.plugin_dir(), self.options());
        for definition in &registry {
            ui.show_header(&format!(
                "Installing {} {}",
                definition.name, definition.version
            ));
            let reports = installer.install(definition, ui)?;
            self.summarize(definition, &reports, ui);
        }

        Ok(CommandResult::success())
    }
}
