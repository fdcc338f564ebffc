//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Install and launch the TomoSegMemTV membrane segmentation toolkit.
#[derive(Debug, Parser)]
#[command(name = "tomosegmemtv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    /// Path to an additional config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Root directory packages are installed under (overrides config and EM_ROOT)
    #[arg(long, global = true)]
    pub em_root: Option<PathBuf>,

    /// Show verbose output, including installer output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download and install the toolkit and the annotator
    Install(InstallArgs),

    /// Show install locations and state
    Status(StatusArgs),

    /// Print the annotator runtime environment
    Env(EnvArgs),

    /// Print the path of a toolkit program
    Locate(LocateArgs),

    /// Run a toolkit program
    Run(RunArgs),

    /// Launch membraneAnnotator
    Annotate(AnnotateArgs),

    /// Show resolved configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Print the install commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Reinstall packages that are already installed
    #[arg(short, long)]
    pub force: bool,

    /// Accept the annotator license without asking
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `env` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Include inherited variables, not only the ones added for the annotator
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `locate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LocateArgs {
    /// Program name, e.g. `tomoseg`
    pub program: String,
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Toolkit program to run
    pub program: String,

    /// Working directory for the program
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Arguments passed to the program
    #[arg(last = true)]
    pub args: Vec<String>,
}

/// Arguments for the `annotate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AnnotateArgs {
    /// Working directory for the annotator
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Arguments passed to the annotator
    #[arg(last = true)]
    pub args: Vec<String>,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the JSON schema of the config file instead
    #[arg(long)]
    pub schema: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["tomosegmemtv", "status", "--em-root", "/opt/em", "--debug"]);
        assert_eq!(cli.em_root, Some(PathBuf::from("/opt/em")));
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn parses_install_flags() {
        let cli = Cli::parse_from(["tomosegmemtv", "install", "--dry-run", "--yes"]);
        match cli.command {
            Commands::Install(args) => {
                assert!(args.dry_run);
                assert!(args.yes);
                assert!(!args.force);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn run_collects_trailing_args() {
        let cli = Cli::parse_from([
            "tomosegmemtv",
            "run",
            "tomoseg",
            "--cwd",
            "/work",
            "--",
            "-i",
            "in.mrc",
        ]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.program, "tomoseg");
                assert_eq!(args.cwd, Some(PathBuf::from("/work")));
                assert_eq!(args.args, vec!["-i", "in.mrc"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["tomosegmemtv"]).is_err());
    }
}
