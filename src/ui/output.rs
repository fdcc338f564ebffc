//! Output verbosity.

/// How much the CLI prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also stream the output of install commands.
    Verbose,
    #[default]
    Normal,
    /// No headers or spinners; results, warnings and errors only.
    Quiet,
}

impl OutputMode {
    /// Mode selected by the `--verbose` and `--quiet` flags; quiet wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    /// Whether install commands write straight to the terminal.
    pub fn shows_command_output(self) -> bool {
        self == Self::Verbose
    }

    /// Whether headers and spinners are drawn.
    pub fn shows_progress(self) -> bool {
        self != Self::Quiet
    }
}
