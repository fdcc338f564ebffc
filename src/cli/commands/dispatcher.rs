//! Routing parsed arguments to subcommands.

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config_with_env, validate, ConfigPaths, PluginConfig};
use crate::error::Result;
use crate::plugin::Plugin;
use crate::ui::UserInterface;

/// A subcommand, ready to run against a UI.
pub trait Command {
    /// Errors are reported by `main`; failures with a specific exit code
    /// come back as a [`CommandResult`].
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Process exit status chosen by a subcommand.
#[derive(Debug)]
pub struct CommandResult {
    pub success: bool,
    /// A launched program's own code for `run` and `annotate`.
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Builds the subcommand named on the command line and runs it.
///
/// Configuration is loaded per dispatch, so `completions` works even when
/// a config file is broken.
pub struct CommandDispatcher {
    config_paths: ConfigPaths,
    em_root: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a dispatcher discovering config files, plus an explicit
    /// file and EM root from the command line.
    pub fn new(config: Option<&Path>, em_root: Option<PathBuf>) -> Self {
        Self::with_paths(ConfigPaths::discover(config), em_root)
    }

    /// Create a dispatcher with explicit config paths (for testing).
    pub fn with_paths(config_paths: ConfigPaths, em_root: Option<PathBuf>) -> Self {
        Self {
            config_paths,
            em_root,
        }
    }

    pub fn config_paths(&self) -> &ConfigPaths {
        &self.config_paths
    }

    /// Load configuration, applying the command-line EM root last.
    pub fn load_config(&self) -> Result<PluginConfig> {
        let mut config = load_config_with_env(&self.config_paths, |key| std::env::var(key))?;
        if let Some(em_root) = &self.em_root {
            config.em_root = em_root.clone();
            config = config.anchored_at(&std::env::current_dir()?);
            validate(&config)?;
        }
        Ok(config)
    }

    fn plugin(&self) -> Result<Plugin> {
        let config = self.load_config()?;
        tracing::debug!("Using EM root {}", config.em_root.display());
        Ok(Plugin::new(config))
    }

    /// Run the subcommand in `cli`. Configuration is loaded only for the
    /// subcommands that need it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Install(args) => {
                let cmd = super::install::InstallCommand::new(self.plugin()?, args.clone());
                cmd.execute(ui)
            }
            Commands::Status(args) => {
                let cmd = super::status::StatusCommand::new(self.plugin()?, args.clone());
                cmd.execute(ui)
            }
            Commands::Env(args) => {
                let cmd = super::env::EnvCommand::new(self.plugin()?, args.clone());
                cmd.execute(ui)
            }
            Commands::Locate(args) => {
                let cmd = super::locate::LocateCommand::new(self.plugin()?, args.clone());
                cmd.execute(ui)
            }
            Commands::Run(args) => {
                let cmd = super::run::RunCommand::new(self.plugin()?, args.clone());
                cmd.execute(ui)
            }
            Commands::Annotate(args) => {
                let cmd = super::annotate::AnnotateCommand::new(self.plugin()?, args.clone());
                cmd.execute(ui)
            }
            Commands::Config(args) => {
                let config = self.load_config()?;
                let sources = self.config_paths.all().into_iter().cloned().collect();
                let cmd = super::config::ConfigCommand::new(config, sources, args.clone());
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
