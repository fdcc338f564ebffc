//! Run command implementation.
//!
//! The `tomosegmemtv run` command launches a segmentation toolkit program
//! from the toolkit's `bin` directory.

use crate::cli::args::RunArgs;
use crate::error::{PluginError, Result};
use crate::launcher::ProcessJobRunner;
use crate::plugin::Plugin;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    plugin: Plugin,
    args: RunArgs,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(plugin: Plugin, args: RunArgs) -> Self {
        Self { plugin, args }
    }
}

impl Command for RunCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut runner = ProcessJobRunner::new();
        let outcome = self.plugin.run_tomo_segmen_tv(
            &mut runner,
            &self.args.program,
            &self.args.args,
            self.args.cwd.as_deref(),
        );
        job_result(outcome, ui)
    }
}

/// Turn a job outcome into a command result, passing a child's exit code
/// through.
pub(super) fn job_result(
    outcome: Result<()>,
    ui: &mut dyn UserInterface,
) -> Result<CommandResult> {
    match outcome {
        Ok(()) => Ok(CommandResult::success()),
        Err(PluginError::CommandFailed {
            command,
            code: Some(code),
        }) => {
            ui.error(&format!("{} exited with code {}", command, code));
            Ok(CommandResult::failure(code))
        }
        Err(e) => Err(e),
    }
}
