//! Operating system family detection.
//!
//! Only one distinction matters to the runtime environment: whether the
//! host is CentOS, whose old glibc needs a compatibility shim preloaded.

use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::config::OsFamilySetting;

static OS_RELEASE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^ID=["']?([^"'\r\n]*)["']?\s*$"#).expect("OS_RELEASE_ID must compile")
});

/// Operating system family relevant to the runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OsFamily {
    /// Any distribution without special requirements.
    Generic,
    /// CentOS.
    #[serde(rename = "centos")]
    CentOs,
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsFamily::Generic => write!(f, "generic"),
            OsFamily::CentOs => write!(f, "centos"),
        }
    }
}

/// Something that can tell which OS family the host belongs to.
pub trait OsDetector {
    /// Detect the OS family.
    fn detect(&self) -> OsFamily;
}

/// Always reports the same family.
#[derive(Debug, Clone, Copy)]
pub struct FixedOs(pub OsFamily);

impl OsDetector for FixedOs {
    fn detect(&self) -> OsFamily {
        self.0
    }
}

/// Detects the family from `/etc/os-release`, falling back to the
/// presence of `/etc/centos-release`.
#[derive(Debug, Clone)]
pub struct OsReleaseDetector {
    os_release: PathBuf,
    centos_release: PathBuf,
}

impl OsReleaseDetector {
    /// Create a detector reading the standard system files.
    pub fn new() -> Self {
        Self::with_paths("/etc/os-release", "/etc/centos-release")
    }

    /// Create a detector reading the given files (for testing).
    pub fn with_paths(os_release: impl Into<PathBuf>, centos_release: impl Into<PathBuf>) -> Self {
        Self {
            os_release: os_release.into(),
            centos_release: centos_release.into(),
        }
    }

    /// Classify the contents of an os-release file.
    pub fn family_from_os_release(contents: &str) -> OsFamily {
        match OS_RELEASE_ID.captures(contents) {
            Some(caps) if caps[1].trim().eq_ignore_ascii_case("centos") => OsFamily::CentOs,
            _ => OsFamily::Generic,
        }
    }
}

impl Default for OsReleaseDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl OsDetector for OsReleaseDetector {
    fn detect(&self) -> OsFamily {
        match fs::read_to_string(&self.os_release) {
            Ok(contents) => Self::family_from_os_release(&contents),
            Err(_) if self.centos_release.exists() => OsFamily::CentOs,
            Err(_) => OsFamily::Generic,
        }
    }
}

/// Build the detector a configuration asks for.
pub fn detector_for(setting: OsFamilySetting) -> Box<dyn OsDetector> {
    match setting {
        OsFamilySetting::Auto => Box::new(OsReleaseDetector::new()),
        OsFamilySetting::Generic => Box::new(FixedOs(OsFamily::Generic)),
        OsFamilySetting::CentOs => Box::new(FixedOs(OsFamily::CentOs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CENTOS_7: &str = r#"NAME="CentOS Linux"
VERSION="7 (Core)"
ID="centos"
ID_LIKE="rhel fedora"
VERSION_ID="7"
"#;

    const UBUNTU: &str = r#"NAME="Ubuntu"
VERSION_ID="22.04"
ID=ubuntu
ID_LIKE=debian
"#;

    const ROCKY: &str = r#"NAME="Rocky Linux"
ID="rocky"
ID_LIKE="rhel centos fedora"
"#;

    #[test]
    fn centos_os_release_is_centos() {
        assert_eq!(
            OsReleaseDetector::family_from_os_release(CENTOS_7),
            OsFamily::CentOs
        );
    }

    #[test]
    fn ubuntu_os_release_is_generic() {
        assert_eq!(
            OsReleaseDetector::family_from_os_release(UBUNTU),
            OsFamily::Generic
        );
    }

    #[test]
    fn centos_derivatives_are_generic() {
        assert_eq!(
            OsReleaseDetector::family_from_os_release(ROCKY),
            OsFamily::Generic
        );
    }

    #[test]
    fn empty_os_release_is_generic() {
        assert_eq!(
            OsReleaseDetector::family_from_os_release(""),
            OsFamily::Generic
        );
    }

    #[test]
    fn detect_reads_os_release_file() {
        let temp = TempDir::new().unwrap();
        let os_release = temp.path().join("os-release");
        fs::write(&os_release, CENTOS_7).unwrap();

        let detector = OsReleaseDetector::with_paths(&os_release, temp.path().join("none"));
        assert_eq!(detector.detect(), OsFamily::CentOs);
    }

    #[test]
    fn detect_falls_back_to_centos_release_marker() {
        let temp = TempDir::new().unwrap();
        let marker = temp.path().join("centos-release");
        fs::write(&marker, "CentOS Linux release 7.9.2009 (Core)").unwrap();

        let detector = OsReleaseDetector::with_paths(temp.path().join("missing"), &marker);
        assert_eq!(detector.detect(), OsFamily::CentOs);
    }

    #[test]
    fn detect_without_any_file_is_generic() {
        let temp = TempDir::new().unwrap();
        let detector =
            OsReleaseDetector::with_paths(temp.path().join("a"), temp.path().join("b"));
        assert_eq!(detector.detect(), OsFamily::Generic);
    }

    #[test]
    fn fixed_setting_overrides_detection() {
        assert_eq!(
            detector_for(OsFamilySetting::CentOs).detect(),
            OsFamily::CentOs
        );
        assert_eq!(
            detector_for(OsFamilySetting::Generic).detect(),
            OsFamily::Generic
        );
    }

    #[test]
    fn os_family_display() {
        assert_eq!(OsFamily::CentOs.to_string(), "centos");
        assert_eq!(OsFamily::Generic.to_string(), "generic");
    }
}
