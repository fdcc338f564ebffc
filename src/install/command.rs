//! Install command composition.
//!
//! An install command is an ordered list of shell steps joined with `&&`,
//! ending in a `touch` of its sentinel. If any step fails the sentinel is
//! never written, and the whole command runs again next time.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::sentinel::InstallSentinel;
use crate::config::TempCleanup;
use crate::packages::Package;

/// Separator between steps of a rendered command.
const STEP_SEPARATOR: &str = " && ";

/// A composed installation command paired with its sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallCommand {
    /// Package the command installs.
    pub package: Package,
    /// Shell steps in execution order.
    pub steps: Vec<String>,
    /// Sentinel written by the final step.
    pub sentinel: InstallSentinel,
}

impl InstallCommand {
    /// The full command string.
    pub fn command(&self) -> String {
        self.steps.join(STEP_SEPARATOR)
    }

    /// `(command, sentinel file name)`, as handed to a package registry.
    pub fn as_pair(&self) -> (String, String) {
        (self.command(), self.sentinel.file_name().to_string())
    }

    /// Number of steps that download something.
    pub fn download_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.starts_with("wget ")).count()
    }
}

/// Inputs for the segmentation toolkit install command.
#[derive(Debug, Clone)]
pub struct ToolkitInstall<'a> {
    /// Archive URL.
    pub url: &'a str,
    /// Destination directory.
    pub home: &'a Path,
}

/// Build the segmentation toolkit install command.
///
/// Downloads the archive into the working directory and unzips it into
/// the toolkit home.
pub fn toolkit_command(inputs: &ToolkitInstall<'_>) -> InstallCommand {
    let package = Package::TomoSegMemTv;
    let sentinel = InstallSentinel::for_package(package);
    let archive = format!("{}.zip", package.name());

    let steps = vec![
        format!("wget {} -O {}", quote(inputs.url), quote(&archive)),
        format!("mkdir -p {}", quote_path(inputs.home)),
        format!("unzip -o {} -d {}", quote(&archive), quote_path(inputs.home)),
        format!("touch {}", sentinel.file_name()),
    ];

    InstallCommand {
        package,
        steps,
        sentinel,
    }
}

/// Inputs for the annotator install command.
#[derive(Debug, Clone)]
pub struct AnnotatorInstall<'a> {
    /// `<name>-<version>`; names the archive, the unpacked directory and
    /// the vendor installer.
    pub identifier: &'a str,
    /// Where the archive is fetched from when not cached.
    pub download_url: &'a str,
    /// Local archive path; downloaded to only when absent.
    pub cached_archive: &'a Path,
    /// Destination directory.
    pub home: &'a Path,
    /// Directory the sentinel is written to.
    pub plugin_dir: &'a Path,
    /// Fresh extraction directory.
    pub temp_dir: &'a Path,
    /// What to do with `temp_dir` afterwards.
    pub cleanup: TempCleanup,
}

/// Build the annotator install command.
///
/// Whether the download step is included is decided now, by looking for
/// the cached archive.
pub fn annotator_command(inputs: &AnnotatorInstall<'_>) -> InstallCommand {
    let package = Package::MembraneAnnotator;
    let sentinel = InstallSentinel::for_package(package);
    let tmp = quote_path(inputs.temp_dir);

    let mut steps = vec![format!("mkdir -p {}", quote_path(inputs.home))];

    if inputs.cached_archive.exists() {
        tracing::debug!(
            "Using cached archive {}",
            inputs.cached_archive.display()
        );
    } else {
        // wget leaves a truncated file behind when it fails.
        let partial = partial_download(inputs.cached_archive);
        steps.push(format!(
            "wget {} -O {}",
            quote(inputs.download_url),
            quote_path(&partial)
        ));
        steps.push(format!(
            "mv {} {}",
            quote_path(&partial),
            quote_path(inputs.cached_archive)
        ));
    }

    let installer = inputs
        .temp_dir
        .join(inputs.identifier)
        .join(format!("{}.install", inputs.identifier));
    let extract_and_install = [
        format!("mkdir {}", tmp),
        format!("tar zxf {} -C {}", quote_path(inputs.cached_archive), tmp),
        format!(
            "{} -mode silent -agreeToLicense yes -destinationFolder {}",
            quote_path(&installer),
            quote_path(inputs.home)
        ),
    ];

    match inputs.cleanup {
        TempCleanup::Keep => steps.extend(extract_and_install),
        TempCleanup::OnSuccess => {
            steps.extend(extract_and_install);
            steps.push(format!("rm -rf {}", tmp));
        }
        TempCleanup::Always => steps.push(format!(
            "({}; status=$?; rm -rf {}; exit $status)",
            extract_and_install.join(STEP_SEPARATOR),
            tmp
        )),
    }

    steps.push(format!("cd {}", quote_path(inputs.plugin_dir)));
    steps.push(format!("touch {}", sentinel.file_name()));

    InstallCommand {
        package,
        steps,
        sentinel,
    }
}

/// Where an archive is downloaded to before it is moved into place.
pub fn partial_download(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Quote a word for POSIX sh, leaving plain words untouched.
pub fn quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:=,@%".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

fn quote_path(path: &Path) -> String {
    quote(&path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn annotator_inputs<'a>(
        cached: &'a Path,
        cleanup: TempCleanup,
        paths: &'a (PathBuf, PathBuf, PathBuf),
    ) -> AnnotatorInstall<'a> {
        AnnotatorInstall {
            identifier: "membraneAnnotator-1.0",
            download_url: "http://example.org/em/membraneAnnotator-1.0.tar.gz",
            cached_archive: cached,
            home: &paths.0,
            plugin_dir: &paths.1,
            temp_dir: &paths.2,
            cleanup,
        }
    }

    fn paths() -> (PathBuf, PathBuf, PathBuf) {
        (
            PathBuf::from("/em/tomosegmemtv-em/membraneAnnotator-1.0"),
            PathBuf::from("/em/tomosegmemtv-em"),
            PathBuf::from("/tmp/membraneAnnotator-1.0_abcd"),
        )
    }

    #[test]
    fn toolkit_command_downloads_extracts_and_touches() {
        let home = PathBuf::from("/em/tomosegmemtv-em/tomosegmemtv-1.0");
        let cmd = toolkit_command(&ToolkitInstall {
            url: "http://tiny.cc/vvu7vz",
            home: &home,
        });

        assert_eq!(
            cmd.command(),
            "wget http://tiny.cc/vvu7vz -O tomosegmemtv.zip && \
             mkdir -p /em/tomosegmemtv-em/tomosegmemtv-1.0 && \
             unzip -o tomosegmemtv.zip -d /em/tomosegmemtv-em/tomosegmemtv-1.0 && \
             touch tomosegmemtv_installed"
        );
        assert_eq!(cmd.sentinel.file_name(), "tomosegmemtv_installed");
        assert_eq!(cmd.download_steps(), 1);
    }

    #[test]
    fn annotator_command_downloads_when_archive_absent() {
        let temp = TempDir::new().unwrap();
        let cached = temp.path().join("membraneAnnotator-1.0.tar.gz");
        let paths = paths();
        let cmd = annotator_command(&annotator_inputs(&cached, TempCleanup::Keep, &paths));

        assert_eq!(cmd.download_steps(), 1);
        let download = cmd.steps.iter().position(|s| s.starts_with("wget ")).unwrap();
        let extract = cmd.steps.iter().position(|s| s.starts_with("tar ")).unwrap();
        assert!(download < extract);
    }

    #[test]
    fn annotator_download_goes_through_partial_file() {
        let cached = PathBuf::from("/em/membraneAnnotator-1.0.tar.gz");
        let paths = paths();
        let cmd = annotator_command(&annotator_inputs(&cached, TempCleanup::Keep, &paths));

        let download = cmd.steps.iter().position(|s| s.starts_with("wget ")).unwrap();
        assert!(cmd.steps[download].ends_with("-O /em/membraneAnnotator-1.0.tar.gz.part"));
        assert_eq!(
            cmd.steps[download + 1],
            "mv /em/membraneAnnotator-1.0.tar.gz.part /em/membraneAnnotator-1.0.tar.gz"
        );
    }

    #[test]
    fn annotator_command_skips_download_when_archive_cached() {
        let temp = TempDir::new().unwrap();
        let cached = temp.path().join("membraneAnnotator-1.0.tar.gz");
        fs::write(&cached, "archive").unwrap();
        let paths = paths();
        let cmd = annotator_command(&annotator_inputs(&cached, TempCleanup::Keep, &paths));

        assert_eq!(cmd.download_steps(), 0);
        assert!(cmd.command().contains(&format!("tar zxf {}", cached.display())));
    }

    #[test]
    fn annotator_command_runs_silent_installer() {
        let cached = PathBuf::from("/nonexistent/membraneAnnotator-1.0.tar.gz");
        let paths = paths();
        let cmd = annotator_command(&annotator_inputs(&cached, TempCleanup::Keep, &paths));

        let expected = "/tmp/membraneAnnotator-1.0_abcd/membraneAnnotator-1.0/membraneAnnotator-1.0.install \
                        -mode silent -agreeToLicense yes \
                        -destinationFolder /em/tomosegmemtv-em/membraneAnnotator-1.0";
        assert!(cmd.steps.iter().any(|s| s == expected));
        assert_eq!(cmd.steps.last().unwrap(), "touch membraneAnnotator_installed");
        assert_eq!(cmd.steps[cmd.steps.len() - 2], "cd /em/tomosegmemtv-em");
    }

    #[test]
    fn keep_policy_never_removes_temp_dir() {
        let cached = PathBuf::from("/nonexistent/a.tar.gz");
        let paths = paths();
        let cmd = annotator_command(&annotator_inputs(&cached, TempCleanup::Keep, &paths));
        assert!(!cmd.command().contains("rm -rf"));
    }

    #[test]
    fn on_success_policy_removes_temp_dir_after_installer() {
        let cached = PathBuf::from("/nonexistent/a.tar.gz");
        let paths = paths();
        let cmd = annotator_command(&annotator_inputs(&cached, TempCleanup::OnSuccess, &paths));

        let install = cmd.steps.iter().position(|s| s.contains(".install ")).unwrap();
        assert_eq!(cmd.steps[install + 1], "rm -rf /tmp/membraneAnnotator-1.0_abcd");
    }

    #[test]
    fn always_policy_wraps_extraction_in_subshell_preserving_status() {
        let cached = PathBuf::from("/nonexistent/a.tar.gz");
        let paths = paths();
        let cmd = annotator_command(&annotator_inputs(&cached, TempCleanup::Always, &paths));

        let wrapped = cmd.steps.iter().find(|s| s.starts_with('(')).unwrap();
        assert!(wrapped.starts_with("(mkdir /tmp/membraneAnnotator-1.0_abcd && tar zxf"));
        assert!(wrapped.ends_with("; status=$?; rm -rf /tmp/membraneAnnotator-1.0_abcd; exit $status)"));
    }

    #[test]
    fn as_pair_returns_command_and_sentinel() {
        let home = PathBuf::from("/h");
        let cmd = toolkit_command(&ToolkitInstall {
            url: "http://x",
            home: &home,
        });
        let (command, sentinel) = cmd.as_pair();
        assert!(command.ends_with("touch tomosegmemtv_installed"));
        assert_eq!(sentinel, "tomosegmemtv_installed");
    }

    #[test]
    fn quote_leaves_plain_words() {
        assert_eq!(quote("/opt/em/a-1.0_x"), "/opt/em/a-1.0_x");
        assert_eq!(quote("http://tiny.cc/vvu7vz"), "http://tiny.cc/vvu7vz");
    }

    #[test]
    fn quote_wraps_words_with_spaces_and_quotes() {
        assert_eq!(quote("/my data/em"), "'/my data/em'");
        assert_eq!(quote("it's"), r"'it'\''s'");
        assert_eq!(quote(""), "''");
    }
}
