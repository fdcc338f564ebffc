//! The `tomosegmemtv` command line: [`args`] parses it, [`commands`] acts
//! on it.

pub mod args;
pub mod commands;

pub use args::{
    AnnotateArgs, Cli, Commands, CompletionsArgs, ConfigArgs, EnvArgs, InstallArgs, LocateArgs,
    RunArgs, StatusArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
