//! Shell command execution and program lookup.

pub mod command;
pub mod platform;

pub use command::{execute, CommandOptions, CommandResult};
pub use platform::{find_program, find_program_in, is_ci};
