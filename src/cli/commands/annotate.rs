//! Annotate command implementation.
//!
//! The `tomosegmemtv annotate` command launches membraneAnnotator with its
//! MATLAB runtime on the library path.

use crate::cli::args::AnnotateArgs;
use crate::error::Result;
use crate::launcher::ProcessJobRunner;
use crate::plugin::Plugin;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::run::job_result;

/// The annotate command implementation.
pub struct AnnotateCommand {
    plugin: Plugin,
    args: AnnotateArgs,
}

impl AnnotateCommand {
    /// Create a new annotate command.
    pub fn new(plugin: Plugin, args: AnnotateArgs) -> Self {
        Self { plugin, args }
    }
}

impl Command for AnnotateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let binary = self.plugin.annotator_binary();
        if !binary.exists() {
            ui.warning(&format!(
                "{} not found; run 'tomosegmemtv install' first",
                binary.display()
            ));
        }

        let mut runner = ProcessJobRunner::new();
        let outcome = self.plugin.run_membrane_annotator(
            &mut runner,
            &self.args.args,
            None,
            self.args.cwd.as_deref(),
        );
        job_result(outcome, ui)
    }
}
