//! Host detection and runtime environment construction.
//!
//! - [`detection`] decides whether the host needs CentOS-specific handling
//! - [`runtime`] assembles the variables the annotator binaries need

pub mod detection;
pub mod runtime;

pub use detection::{detector_for, FixedOs, OsDetector, OsFamily, OsReleaseDetector};
pub use runtime::{
    build_runtime_environment, centos_shim, library_dirs, RuntimeEnvironment, LD_LIBRARY_PATH,
    LD_PRELOAD,
};
