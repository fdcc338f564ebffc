//! Fixed names, versions and locations of the managed packages.

/// Segmentation toolkit package name.
pub const TOMOSEGMEMTV: &str = "tomosegmemtv";

/// Default segmentation toolkit version.
pub const TOMOSEGMEMTV_DEFAULT_VERSION: &str = "1.0";

/// Remote archive for the segmentation toolkit.
pub const TOMOSEGMEMTV_DEFAULT_URL: &str = "http://tiny.cc/vvu7vz";

/// Environment variable that overrides the segmentation toolkit home.
pub const TOMOSEGMEMTV_HOME_VAR: &str = "TOMOSEGMEMTV_HOME";

/// GUI annotator package name.
pub const MEMBANNOTATOR: &str = "membraneAnnotator";

/// Default annotator version.
pub const MEMBANNOTATOR_DEFAULT_VERSION: &str = "1.0";

/// Base URL the annotator archive is published under.
pub const MEMBANNOTATOR_DEFAULT_BASE_URL: &str =
    "http://scipion.cnb.csic.es/downloads/scipion/software/em/";

/// Annotator executable, relative to the annotator home.
pub const MEMBANNOTATOR_BIN: &[&str] = &["application", "membraneAnnotator"];

/// Directory under the EM root shared by both packages.
pub const PLUGIN_EM_DIR: &str = "tomosegmemtv-em";

/// Environment variable naming the EM root.
pub const EM_ROOT_VAR: &str = "EM_ROOT";

/// MATLAB runtime directory inside the annotator home.
pub const MCR_DIR: &str = "v99";

/// Architecture tag used by the MATLAB runtime layout.
pub const MCR_ARCH: &str = "glnxa64";

/// glibc compatibility shim preloaded on CentOS.
pub const CENTOS_SHIM: &str = "glibc-2.17_shim.so";

/// Placeholder archive marker handed to the package registry.
pub const VOID_ARCHIVE: &str = "void.tgz";

/// Plugin release version.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Citations for the segmentation method.
pub const REFERENCES: &[&str] = &["MartinezSanchez2014"];

/// Upstream project page.
pub const HOMEPAGE: &str = "https://sites.google.com/site/3demimageprocessing/tomosegmemtv";
