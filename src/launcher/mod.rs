//! Launching installed programs.
//!
//! Programs are handed to a [`JobRunner`]. [`ProcessJobRunner`] spawns them
//! directly; an embedding application can substitute its own scheduler.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::environment::RuntimeEnvironment;
use crate::error::{PluginError, Result};

/// Executes a program as a job.
pub trait JobRunner {
    /// Run `program` with `args`.
    ///
    /// With `env`, the child sees exactly those variables. Without it, the
    /// child inherits the current environment. `cwd` defaults to the
    /// current directory.
    fn run_job(
        &mut self,
        program: &Path,
        args: &[String],
        env: Option<&RuntimeEnvironment>,
        cwd: Option<&Path>,
    ) -> Result<()>;
}

/// Runs jobs as child processes with inherited stdio.
#[derive(Debug, Default)]
pub struct ProcessJobRunner;

impl ProcessJobRunner {
    pub fn new() -> Self {
        Self
    }
}

impl JobRunner for ProcessJobRunner {
    fn run_job(
        &mut self,
        program: &Path,
        args: &[String],
        env: Option<&RuntimeEnvironment>,
        cwd: Option<&Path>,
    ) -> Result<()> {
        let mut cmd = Command::new(program);
        cmd.args(args);

        if let Some(env) = env {
            cmd.env_clear();
            cmd.envs(env.iter());
            cmd.envs(env.opaque());
        }
        if let Some(cwd) = cwd {
            cmd.current_dir(cwd);
        }

        let rendered = render(program, args);
        tracing::debug!("Launching: {}", rendered);

        let status = cmd.status().map_err(|e| {
            tracing::debug!("Failed to spawn {}: {}", program.display(), e);
            PluginError::CommandFailed {
                command: rendered.clone(),
                code: None,
            }
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(PluginError::CommandFailed {
                command: rendered,
                code: status.code(),
            })
        }
    }
}

fn render(program: &Path, args: &[String]) -> String {
    std::iter::once(program.display().to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A job handed to a [`RecordingJobRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedJob {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub env: Option<RuntimeEnvironment>,
    pub cwd: Option<PathBuf>,
}

/// Records jobs instead of running them.
///
/// Used by `--dry-run` style callers and tests.
#[derive(Debug, Default)]
pub struct RecordingJobRunner {
    jobs: Vec<RecordedJob>,
}

impl RecordingJobRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs received so far, in order.
    pub fn jobs(&self) -> &[RecordedJob] {
        &self.jobs
    }
}

impl JobRunner for RecordingJobRunner {
    fn run_job(
        &mut self,
        program: &Path,
        args: &[String],
        env: Option<&RuntimeEnvironment>,
        cwd: Option<&Path>,
    ) -> Result<()> {
        self.jobs.push(RecordedJob {
            program: program.to_path_buf(),
            args: args.to_vec(),
            env: env.cloned(),
            cwd: cwd.map(Path::to_path_buf),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn process_runner_succeeds_for_zero_exit() {
        let mut runner = ProcessJobRunner::new();
        runner
            .run_job(Path::new("/bin/sh"), &["-c".into(), "exit 0".into()], None, None)
            .unwrap();
    }

    #[test]
    fn process_runner_reports_exit_code() {
        let mut runner = ProcessJobRunner::new();
        let err = runner
            .run_job(Path::new("/bin/sh"), &["-c".into(), "exit 3".into()], None, None)
            .unwrap_err();

        assert!(matches!(err, PluginError::CommandFailed { code: Some(3), .. }));
    }

    #[test]
    fn process_runner_reports_missing_program() {
        let mut runner = ProcessJobRunner::new();
        let err = runner
            .run_job(Path::new("/no/such/program"), &[], None, None)
            .unwrap_err();

        assert!(matches!(err, PluginError::CommandFailed { code: None, .. }));
    }

    #[test]
    fn process_runner_uses_exact_environment_and_cwd() {
        let temp = TempDir::new().unwrap();
        let mut env = RuntimeEnvironment::new();
        env.set("ONLY_VAR", "present");

        let script = "[ \"$ONLY_VAR\" = present ] && [ -z \"$HOME\" ] && pwd > where.txt";
        let mut runner = ProcessJobRunner::new();
        runner
            .run_job(
                Path::new("/bin/sh"),
                &["-c".into(), script.into()],
                Some(&env),
                Some(temp.path()),
            )
            .unwrap();

        assert!(temp.path().join("where.txt").exists());
    }

    #[test]
    fn process_runner_passes_non_utf8_variables_through() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let temp = TempDir::new().unwrap();
        let env = RuntimeEnvironment::inherit_os([(
            OsString::from("RAW_BYTES"),
            OsString::from_vec(vec![b'a', 0xff]),
        )]);

        let script = "printf %s \"$RAW_BYTES\" > raw.bin";
        let mut runner = ProcessJobRunner::new();
        runner
            .run_job(
                Path::new("/bin/sh"),
                &["-c".into(), script.into()],
                Some(&env),
                Some(temp.path()),
            )
            .unwrap();

        assert_eq!(std::fs::read(temp.path().join("raw.bin")).unwrap(), vec![b'a', 0xff]);
    }

    #[test]
    fn recording_runner_keeps_jobs() {
        let mut runner = RecordingJobRunner::new();
        runner
            .run_job(Path::new("/bin/x"), &["a".into()], None, Some(Path::new("/w")))
            .unwrap();

        assert_eq!(runner.jobs().len(), 1);
        assert_eq!(runner.jobs()[0].program, PathBuf::from("/bin/x"));
        assert_eq!(runner.jobs()[0].cwd, Some(PathBuf::from("/w")));
    }
}
