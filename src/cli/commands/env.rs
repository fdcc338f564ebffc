//! Env command implementation.
//!
//! The `tomosegmemtv env` command prints the environment the annotator is
//! launched with, in a form that can be `eval`ed by a shell.

use std::collections::BTreeMap;

use crate::cli::args::EnvArgs;
use crate::error::{PluginError, Result};
use crate::install::quote;
use crate::plugin::Plugin;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The env command implementation.
pub struct EnvCommand {
    plugin: Plugin,
    args: EnvArgs,
}

impl EnvCommand {
    /// Create a new env command.
    pub fn new(plugin: Plugin, args: EnvArgs) -> Self {
        Self { plugin, args }
    }
}

impl Command for EnvCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let env = self.plugin.runtime_environment();
        let vars: BTreeMap<&str, &str> = if self.args.all {
            env.iter().collect()
        } else {
            env.overrides().collect()
        };

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&vars).map_err(|e| PluginError::Other(e.into()))?;
            ui.message(&json);
        } else {
            for (key, value) in vars {
                ui.message(&format!("export {}={}", key, quote(value)));
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PluginConfig;
    use crate::environment::{FixedOs, OsFamily};
    use crate::ui::MockUI;

    fn plugin(os: OsFamily) -> Plugin {
        Plugin::with_detector(PluginConfig::with_em_root("/opt/em"), Box::new(FixedOs(os)))
    }

    #[test]
    fn prints_only_overrides_by_default() {
        let cmd = EnvCommand::new(plugin(OsFamily::Generic), EnvArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert_eq!(ui.messages().len(), 1);
        assert!(ui.messages()[0].starts_with("export LD_LIBRARY_PATH="));
        assert!(ui.messages()[0].contains("/opt/em/tomosegmemtv-em/membraneAnnotator-1.0/v99"));
    }

    #[test]
    fn centos_adds_preload() {
        let cmd = EnvCommand::new(plugin(OsFamily::CentOs), EnvArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.messages().iter().any(|m| m.starts_with("export LD_PRELOAD=")));
    }

    #[test]
    fn json_output_is_a_map() {
        let args = EnvArgs {
            json: true,
            all: false,
        };
        let cmd = EnvCommand::new(plugin(OsFamily::Generic), args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert!(value["LD_LIBRARY_PATH"]
            .as_str()
            .unwrap()
            .ends_with("sys/opengl/lib/glnxa64"));
        assert!(value.get("LD_PRELOAD").is_none());
    }

    #[test]
    fn all_includes_inherited_variables() {
        let args = EnvArgs {
            json: true,
            all: true,
        };
        let cmd = EnvCommand::new(plugin(OsFamily::Generic), args);
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        if let Ok(path) = std::env::var("PATH") {
            assert_eq!(value["PATH"], path);
        }
    }
}
