//! Interactive confirmation prompt.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::error::{PluginError, Result};

use super::Confirmation;

fn map_dialoguer_err(e: dialoguer::Error) -> PluginError {
    PluginError::Io(e.into())
}

/// Ask `confirmation` on `term` and wait for an answer.
pub fn confirm_on(term: &Term, confirmation: &Confirmation) -> Result<bool> {
    let theme = ColorfulTheme {
        prompt_prefix: style(String::new()),
        ..ColorfulTheme::default()
    };

    Confirm::with_theme(&theme)
        .with_prompt(&confirmation.question)
        .default(confirmation.default)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}
