//! UI for pipes, CI and other sessions without a person at the keyboard.

use std::collections::HashMap;
use std::ffi::OsString;

use crate::error::{PluginError, Result};

use super::{parse_answer, Confirmation, Mark, OutputMode, SpinnerHandle, Theme, UserInterface};

/// Prefix of environment variables that answer prompts ahead of time.
pub const PROMPT_ENV_PREFIX: &str = "TOMOSEGMEMTV_PROMPT_";

/// Plain-text UI that never waits for input.
///
/// A confirmation is answered by its `TOMOSEGMEMTV_PROMPT_<KEY>` variable
/// when set, otherwise by its default. Spinners print one line when they
/// finish.
pub struct NonInteractiveUI {
    mode: OutputMode,
    answers: HashMap<String, String>,
    plain: Theme,
}

impl NonInteractiveUI {
    /// Answers come from the current process environment.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_overrides(mode, prompt_answers(std::env::vars_os()))
    }

    pub fn with_overrides(mode: OutputMode, answers: HashMap<String, String>) -> Self {
        Self {
            mode,
            answers,
            plain: Theme::new(false),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.plain.mark(Mark::Success, msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.plain.mark(Mark::Warning, msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.plain.mark(Mark::Error, msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("\n{}\n", title);
        }
    }

    fn confirm(&mut self, confirmation: &Confirmation) -> Result<bool> {
        let var = confirmation.env_var();
        match self.answers.get(&var) {
            None => Ok(confirmation.default),
            Some(raw) => parse_answer(raw).ok_or_else(|| PluginError::ConfigValidationError {
                message: format!("{} must be yes or no, got '{}'", var, raw),
            }),
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        // Command output follows in verbose mode; say what it belongs to.
        if self.mode.shows_command_output() {
            println!("{}", message);
        }
        Box::new(LineSpinner {
            show: self.mode.shows_progress(),
            plain: self.plain,
        })
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Keep the prompt-answering variables; other variables, including ones
/// that are not UTF-8, are ignored.
fn prompt_answers<I>(vars: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
        .collect()
}

/// Spinner stand-in that prints only its final state.
struct LineSpinner {
    show: bool,
    plain: Theme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.show {
            println!("{}", self.plain.mark(Mark::Success, msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", self.plain.mark(Mark::Error, msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.show {
            println!("{}", self.plain.mark(Mark::Skipped, msg));
        }
    }
}
