//! tomosegmemtv - Installer and launcher for the TomoSegMemTV membrane
//! segmentation toolkit and the membraneAnnotator GUI.
//!
//! Both packages are installed side by side under
//! `<em_root>/tomosegmemtv-em/`. Installation is idempotent through sentinel
//! files; launching the annotator needs its bundled MATLAB runtime on the
//! library path, which [`plugin::Plugin`] computes.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, layering, and validation
//! - [`environment`] - OS detection and the annotator runtime environment
//! - [`error`] - Error types and result aliases
//! - [`install`] - Install command composition and execution
//! - [`launcher`] - Running installed programs as jobs
//! - [`packages`] - Package names, versions, and install locations
//! - [`plugin`] - The installer/launcher facade
//! - [`shell`] - Shell command execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use tomosegmemtv::config::PluginConfig;
//! use tomosegmemtv::environment::{FixedOs, OsFamily};
//! use tomosegmemtv::plugin::Plugin;
//!
//! let plugin = Plugin::with_detector(
//!     PluginConfig::with_em_root("/opt/em"),
//!     Box::new(FixedOs(OsFamily::Generic)),
//! );
//! let commands = plugin.define_installation();
//! assert_eq!(commands.len(), 2);
//! assert_eq!(commands[0].sentinel.file_name(), "tomosegmemtv_installed");
//! ```
//!
//! For end-to-end installs, see the integration tests.

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod install;
pub mod launcher;
pub mod packages;
pub mod plugin;
pub mod shell;
pub mod ui;

pub use error::{PluginError, Result};
