//! Running package definitions.
//!
//! Each install command runs through the shell in the installation working
//! directory unless its sentinel already exists there. The first failing
//! command stops the run; because it never wrote its sentinel it will be
//! retried in full next time.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::command::InstallCommand;
use super::definition::PackageDefinition;
use crate::error::{PluginError, Result};
use crate::packages::Package;
use crate::shell::{execute, find_program, CommandOptions, CommandResult};
use crate::ui::UserInterface;

/// Mockable dependencies for the installer.
pub struct InstallerContext<'a> {
    /// Run a shell command in a directory, optionally showing its output.
    pub run_command: &'a dyn Fn(&str, &Path, bool) -> Result<CommandResult>,
    /// Look up a program on PATH.
    pub find_program: &'a dyn Fn(&str) -> Option<PathBuf>,
}

/// Build the default `InstallerContext` for production use.
pub fn default_context() -> InstallerContext<'static> {
    InstallerContext {
        run_command: &|command, cwd, show_output| {
            let options = CommandOptions {
                capture: !show_output,
                ..CommandOptions::in_dir(cwd)
            };
            execute(command, &options)
        },
        find_program: &find_program,
    }
}

/// Installer behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Re-run commands even when their sentinel exists.
    pub force: bool,
    /// Report what would run without running it.
    pub dry_run: bool,
}

/// What happened to one install command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The command ran and succeeded.
    Installed,
    /// The sentinel existed, so the command was skipped.
    AlreadyInstalled,
    /// Dry run; the command would have run.
    Planned,
}

/// Outcome of one install command.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// Package the command installs.
    pub package: Package,
    /// Sentinel file name.
    pub sentinel: String,
    /// What happened.
    pub outcome: StepOutcome,
}

/// Runs package definitions in a working directory.
pub struct Installer<'a> {
    working_dir: PathBuf,
    options: InstallOptions,
    ctx: InstallerContext<'a>,
}

impl Installer<'static> {
    /// Create an installer that runs real shell commands.
    pub fn new(working_dir: impl Into<PathBuf>, options: InstallOptions) -> Self {
        Self::with_context(working_dir, options, default_context())
    }
}

impl<'a> Installer<'a> {
    /// Create an installer with custom dependencies (for testing).
    pub fn with_context(
        working_dir: impl Into<PathBuf>,
        options: InstallOptions,
        ctx: InstallerContext<'a>,
    ) -> Self {
        Self {
            working_dir: working_dir.into(),
            options,
            ctx,
        }
    }

    /// Directory commands run in and sentinels are checked in.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Install a package definition.
    ///
    /// # Errors
    ///
    /// Returns `MissingProgram` if a needed program is not on PATH while
    /// some command still has to run, and `InstallStepFailed` for the first
    /// command that exits unsuccessfully.
    pub fn install(
        &self,
        package: &PackageDefinition,
        ui: &mut dyn UserInterface,
    ) -> Result<Vec<StepReport>> {
        let pending: Vec<&InstallCommand> = package
            .commands
            .iter()
            .filter(|c| self.options.force || !self.is_installed(c))
            .collect();

        if !pending.is_empty() {
            self.check_programs(package, ui)?;
            if !self.options.dry_run {
                fs::create_dir_all(&self.working_dir)?;
            }
        }

        let mut reports = Vec::with_capacity(package.commands.len());
        for command in &package.commands {
            let outcome = self.run_step(command, ui)?;
            reports.push(StepReport {
                package: command.package,
                sentinel: command.sentinel.file_name().to_string(),
                outcome,
            });
        }

        Ok(reports)
    }

    fn is_installed(&self, command: &InstallCommand) -> bool {
        command.sentinel.check(&self.working_dir).present
    }

    fn check_programs(
        &self,
        package: &PackageDefinition,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        for program in &package.needed_programs {
            if (self.ctx.find_program)(program).is_some() {
                continue;
            }
            if self.options.dry_run {
                ui.warning(&format!("'{}' is not on PATH", program));
            } else {
                return Err(PluginError::MissingProgram {
                    program: program.clone(),
                    package: package.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn run_step(
        &self,
        command: &InstallCommand,
        ui: &mut dyn UserInterface,
    ) -> Result<StepOutcome> {
        let sentinel = command.sentinel.path_in(&self.working_dir);

        if !self.options.force && sentinel.exists() {
            tracing::debug!("{} exists, skipping", sentinel.display());
            let mut spinner = ui.start_spinner(&command.package.to_string());
            spinner.finish_skipped(&format!("{} already installed", command.package));
            return Ok(StepOutcome::AlreadyInstalled);
        }

        if self.options.dry_run {
            ui.message(&format!("Would install {}:", command.package));
            for step in &command.steps {
                ui.message(&format!("  {}", step));
            }
            return Ok(StepOutcome::Planned);
        }

        if sentinel.exists() {
            fs::remove_file(&sentinel)?;
        }

        let show_output = ui.output_mode().shows_command_output();
        let mut spinner = ui.start_spinner(&format!("Installing {}...", command.package));
        tracing::info!("Installing {} in {}", command.package, self.working_dir.display());

        let result = (self.ctx.run_command)(&command.command(), &self.working_dir, show_output)?;

        if !result.succeeded() {
            spinner.finish_error(&format!("{} failed", command.package));
            if !result.stderr.is_empty() {
                tracing::debug!("stderr from {}:\n{}", command.package, result.stderr);
            }
            return Err(PluginError::InstallStepFailed {
                package: command.package.to_string(),
                sentinel: command.sentinel.file_name().to_string(),
                code: result.exit_code,
            });
        }

        spinner.finish_success(&format!("{} installed", command.package));
        if !sentinel.exists() {
            ui.warning(&format!(
                "{} finished but {} was not written; it will run again next time",
                command.package,
                command.sentinel
            ));
        }

        Ok(StepOutcome::Installed)
    }
}
