//! Locate command implementation.

use crate::cli::args::LocateArgs;
use crate::error::Result;
use crate::plugin::Plugin;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Prints where a toolkit program is expected to be.
pub struct LocateCommand {
    plugin: Plugin,
    args: LocateArgs,
}

impl LocateCommand {
    /// Create a new locate command.
    pub fn new(plugin: Plugin, args: LocateArgs) -> Self {
        Self { plugin, args }
    }
}

impl Command for LocateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = self.plugin.locate_program(&self.args.program);
        if !path.exists() {
            tracing::debug!("{} does not exist yet", path.display());
        }
        ui.message(&path.display().to_string());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PluginConfig;
    use crate::environment::{FixedOs, OsFamily};
    use crate::ui::MockUI;

    #[test]
    fn prints_path_without_checking_existence() {
        let plugin = Plugin::with_detector(
            PluginConfig::with_em_root("/nowhere"),
            Box::new(FixedOs(OsFamily::Generic)),
        );
        let args = LocateArgs {
            program: "tomoseg".to_string(),
        };
        let mut ui = MockUI::new();

        let result = LocateCommand::new(plugin, args).execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(
            ui.messages(),
            ["/nowhere/tomosegmemtv-em/tomosegmemtv-1.0/bin/tomoseg".to_string()]
        );
    }
}
