//! Managed packages and their on-disk locations.
//!
//! Two packages are installed side by side under
//! `<em_root>/tomosegmemtv-em/`:
//!
//! - the TomoSegMemTV segmentation toolkit
//! - the membraneAnnotator GUI, bundled with its MATLAB runtime
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use tomosegmemtv::packages::{resolve_home, Package};
//!
//! let home = resolve_home(Path::new("/opt/em"), Package::TomoSegMemTv, "1.0");
//! assert_eq!(home, Path::new("/opt/em/tomosegmemtv-em/tomosegmemtv-1.0"));
//! ```

pub mod constants;
pub mod location;

pub use location::{resolve_home, Package, PackageLocation};
