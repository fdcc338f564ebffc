//! Status marks and colors.

use console::Style;

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Success,
    Warning,
    Error,
    Skipped,
}

impl Mark {
    pub fn icon(self) -> &'static str {
        match self {
            Mark::Success => "✓",
            Mark::Warning => "⚠",
            Mark::Error => "✗",
            Mark::Skipped => "○",
        }
    }

    fn style(self) -> Style {
        match self {
            Mark::Success => Style::new().green(),
            Mark::Warning => Style::new().color256(208),
            Mark::Error => Style::new().red().bold(),
            Mark::Skipped => Style::new().dim(),
        }
    }
}

/// Renders status lines, with or without color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    colors: bool,
}

impl Theme {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    /// Colors when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        Self::new(should_use_colors())
    }

    /// `<icon> <msg>`, colored by kind.
    pub fn mark(&self, mark: Mark, msg: &str) -> String {
        let line = format!("{} {}", mark.icon(), msg);
        if self.colors {
            mark.style().apply_to(line).to_string()
        } else {
            line
        }
    }

    pub fn header(&self, title: &str) -> String {
        if self.colors {
            Style::new().bold().cyan().apply_to(title).to_string()
        } else {
            title.to_string()
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() || !console::colors_enabled() {
        return false;
    }

    console::Term::stdout().is_term()
}
