//! Terminal output for installs and launches.
//!
//! Commands talk to the user only through [`UserInterface`], which has
//! three implementations:
//! - [`TerminalUI`] with colors, spinners and a real confirmation prompt
//! - [`NonInteractiveUI`] for pipes and CI, answering prompts from the
//!   environment
//! - [`MockUI`] recording everything for tests
//!
//! # Example
//!
//! ```
//! use tomosegmemtv::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("tomosegmemtv");
//! ui.success("Installation complete");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerOutcome};
pub use non_interactive::{NonInteractiveUI, PROMPT_ENV_PREFIX};
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, Mark, Theme};

use crate::error::Result;

/// Where commands send user-facing output.
pub trait UserInterface {
    fn output_mode(&self) -> OutputMode;

    /// Plain line of output.
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Always shown, whatever the output mode.
    fn error(&mut self, msg: &str);

    /// Section title, hidden in quiet mode.
    fn show_header(&mut self, title: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, confirmation: &Confirmation) -> Result<bool>;

    /// Start a progress indicator for a long-running step.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Whether a person can answer prompts.
    fn is_interactive(&self) -> bool;
}

/// Handle for a running progress indicator.
pub trait SpinnerHandle {
    fn set_message(&mut self, msg: &str);
    fn finish_success(&mut self, msg: &str);
    fn finish_error(&mut self, msg: &str);
    fn finish_skipped(&mut self, msg: &str);
}

/// A yes/no question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Identifies the question to mocks and environment overrides.
    pub key: String,
    pub question: String,
    /// Answer used when the user just presses enter.
    pub default: bool,
}

impl Confirmation {
    pub fn new(key: &str, question: impl Into<String>, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.into(),
            default,
        }
    }

    /// Environment variable that answers this question ahead of time.
    pub fn env_var(&self) -> String {
        format!("{}{}", PROMPT_ENV_PREFIX, self.key.to_uppercase())
    }
}

/// Interpret a typed yes/no answer.
pub(crate) fn parse_answer(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_env_var_uses_upper_case_key() {
        let confirmation = Confirmation::new("accept_license", "Accept?", true);
        assert_eq!(
            confirmation.env_var(),
            "TOMOSEGMEMTV_PROMPT_ACCEPT_LICENSE"
        );
    }

    #[test]
    fn parse_answer_accepts_common_spellings() {
        assert_eq!(parse_answer("Yes"), Some(true));
        assert_eq!(parse_answer(" y "), Some(true));
        assert_eq!(parse_answer("0"), Some(false));
        assert_eq!(parse_answer("N"), Some(false));
        assert_eq!(parse_answer("maybe"), None);
    }
}
