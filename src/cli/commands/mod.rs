//! Subcommand implementations.
//!
//! `install` and `status` manage the packages, `env`, `locate`, `run` and
//! `annotate` launch them, and `config` and `completions` are utilities.
//! [`CommandDispatcher`] loads the configuration on demand and hands each
//! subcommand a [`Plugin`](crate::plugin::Plugin) built from it.

pub mod annotate;
pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod env;
pub mod install;
pub mod locate;
pub mod run;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
