//! Public API surface checks.

use tomosegmemtv::config::PluginConfig;
use tomosegmemtv::environment::{FixedOs, OsFamily};
use tomosegmemtv::packages::Package;
use tomosegmemtv::plugin::Plugin;
use tomosegmemtv::PluginError;

fn plugin() -> Plugin {
    Plugin::with_detector(
        PluginConfig::with_em_root("/opt/em"),
        Box::new(FixedOs(OsFamily::Generic)),
    )
}

#[test]
fn missing_program_error_is_reported_by_name() {
    let err = PluginError::MissingProgram {
        program: "wget".into(),
        package: "tomosegmemtv".into(),
    };
    assert!(err.to_string().contains("wget"));
    assert!(!err.is_config_error());
}

#[test]
fn metadata_carries_citation_and_version() {
    let meta = plugin().metadata();
    assert_eq!(meta.version, "3.2.1");
    assert!(meta.references.contains(&"MartinezSanchez2014"));
    assert!(meta.homepage.contains("tomosegmemtv"));
}

#[test]
fn both_packages_share_the_plugin_directory() {
    let plugin = plugin();
    let dir = plugin.plugin_dir();
    assert!(plugin.resolve_home(Package::TomoSegMemTv).starts_with(&dir));
    assert!(plugin.resolve_home(Package::MembraneAnnotator).starts_with(&dir));
}

#[test]
fn status_subcommand_parses() {
    use clap::Parser;
    use tomosegmemtv::cli::{Cli, Commands};

    let cli = Cli::parse_from(["tomosegmemtv", "status", "--json"]);

    match cli.command {
        Commands::Status(args) => assert!(args.json),
        other => panic!("expected status, got {:?}", other),
    }
}
