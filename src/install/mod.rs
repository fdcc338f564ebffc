//! Package installation.
//!
//! - [`command`] composes the shell commands that fetch and install each package
//! - [`sentinel`] names and checks the marker files that make them idempotent
//! - [`tmpdir`] names the annotator's temporary extraction directory
//! - [`definition`] bundles commands for a package registry
//! - [`runner`] runs a definition, skipping commands already done

pub mod command;
pub mod definition;
pub mod runner;
pub mod sentinel;
pub mod tmpdir;

pub use command::{
    annotator_command, partial_download, quote, toolkit_command, AnnotatorInstall, InstallCommand,
    ToolkitInstall,
};
pub use definition::{PackageDefinition, PackageRegistry};
pub use runner::{
    default_context, InstallOptions, Installer, InstallerContext, StepOutcome, StepReport,
};
pub use sentinel::{InstallSentinel, SentinelState};
pub use tmpdir::{temp_dest, temp_dir_name, SUFFIX_LEN};
