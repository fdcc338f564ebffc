//! Shell command execution.
//!
//! Install commands are POSIX `sh` command lines, so they always run under
//! `/bin/sh -c` rather than the user's login shell.

use crate::error::{PluginError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

const SHELL: &str = "/bin/sh";

/// How a shell command ended.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// `None` when the shell was killed by a signal.
    pub exit_code: Option<i32>,
    /// Empty unless output was captured.
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl CommandResult {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Where and how to run a command.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    pub cwd: Option<PathBuf>,
    /// Added on top of the inherited environment.
    pub env: HashMap<String, String>,
    /// Collect stdout and stderr instead of passing them through.
    pub capture: bool,
}

impl CommandOptions {
    pub fn in_dir(cwd: &Path) -> Self {
        Self {
            cwd: Some(cwd.to_path_buf()),
            ..Default::default()
        }
    }

    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }
}

fn stream(capture: bool) -> Stdio {
    if capture {
        Stdio::piped()
    } else {
        Stdio::inherit()
    }
}

/// Run `command` under `/bin/sh -c` and wait for it.
///
/// A non-zero exit is reported in the returned [`CommandResult`]; only a
/// failure to spawn the shell is an error.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let mut cmd = Command::new(SHELL);
    cmd.arg("-c")
        .arg(command)
        .envs(&options.env)
        .stdin(Stdio::null())
        .stdout(stream(options.capture))
        .stderr(stream(options.capture));
    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    tracing::debug!("Executing in {:?}: {}", options.cwd, command);
    let started = Instant::now();
    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn {}: {}", SHELL, e);
        PluginError::CommandFailed {
            command: command.to_string(),
            code: None,
        }
    })?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        duration: started.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(command: &str) -> CommandResult {
        execute(command, &CommandOptions::default().captured()).unwrap()
    }

    fn quiet_in(command: &str, cwd: &Path) -> CommandResult {
        execute(command, &CommandOptions::in_dir(cwd).captured()).unwrap()
    }

    #[test]
    fn captures_stdout_of_successful_command() {
        let result = quiet("echo hello");

        assert!(result.succeeded());
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn reports_exit_code_of_failing_command() {
        let result = quiet("echo oops >&2; exit 3");

        assert!(!result.succeeded());
        assert_eq!(result.exit_code, Some(3));
        assert!(result.stderr.contains("oops"));
    }

    #[test]
    fn and_chain_stops_at_first_failure() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = quiet_in("false && touch marker", temp.path());

        assert!(!result.succeeded());
        assert!(!temp.path().join("marker").exists());
    }

    #[test]
    fn extra_env_is_visible() {
        let mut options = CommandOptions::default().captured();
        options
            .env
            .insert("EM_TEST_VAR".to_string(), "segment".to_string());

        let result = execute("echo $EM_TEST_VAR", &options).unwrap();

        assert_eq!(result.stdout.trim(), "segment");
    }

    #[test]
    fn runs_in_working_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = quiet_in("touch here", temp.path());

        assert!(result.succeeded());
        assert!(temp.path().join("here").exists());
    }
}
