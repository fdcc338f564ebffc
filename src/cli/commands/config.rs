//! Config command implementation.
//!
//! The `tomosegmemtv config` command shows the resolved configuration, or
//! the JSON schema config files are checked against.

use std::path::PathBuf;

use crate::cli::args::ConfigArgs;
use crate::config::PluginConfig;
use crate::error::{PluginError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    config: PluginConfig,
    sources: Vec<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    ///
    /// `sources` are the config files that were merged, in order.
    pub fn new(config: PluginConfig, sources: Vec<PathBuf>, args: ConfigArgs) -> Self {
        Self {
            config,
            sources,
            args,
        }
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.schema {
            let schema = schemars::schema_for!(PluginConfig);
            let json =
                serde_json::to_string_pretty(&schema).map_err(|e| PluginError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if self.args.json {
            let json = serde_json::to_string_pretty(&self.config)
                .map_err(|e| PluginError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        for path in &self.sources {
            ui.message(&format!("# {}", path.display()));
        }
        if !self.sources.is_empty() {
            ui.message("");
        }

        let yaml = serde_yaml::to_string(&self.config).map_err(|e| PluginError::Other(e.into()))?;
        ui.message(&yaml);

        Ok(CommandResult::success())
    }
}
