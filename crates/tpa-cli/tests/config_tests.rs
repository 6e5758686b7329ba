use std::path::PathBuf;

use tpa::common::DiagnosticCategory;

use crate::args::CliArgs;
use crate::config::{
    TpaConfig, load_config, parse_config, resolve_config_path, resolve_options,
};

#[test]
fn parses_jsonc_with_comments_and_trailing_commas() {
    let source = r#"{
        // pick the newer reference set
        "reference": "net8",
        /* extra types */
        "metadata": ["refs/acme.json",],
        "exclude": ["legacy/**"],
        "strictOffsetAccessors": true,
        "rules": { "TPA0001": "off", "TPA0002": "error", },
    }"#;
    let config = parse_config(source).expect("valid config");
    assert_eq!(config.reference.as_deref(), Some("net8"));
    assert_eq!(config.metadata, vec![PathBuf::from("refs/acme.json")]);
    assert_eq!(config.exclude, vec!["legacy/**".to_string()]);
    assert_eq!(config.strict_offset_accessors, Some(true));
    assert_eq!(config.include_generated, None);
    assert_eq!(config.rules.len(), 2);
}

#[test]
fn comment_markers_inside_strings_are_kept() {
    let config = parse_config(r#"{ "exclude": ["//server/share/*.cs", "a/*/b"] }"#)
        .expect("valid config");
    assert_eq!(config.exclude, vec!["//server/share/*.cs".to_string(), "a/*/b".to_string()]);
}

#[test]
fn invalid_json_is_an_error() {
    assert!(parse_config("{ \"reference\": }").is_err());
    assert!(parse_config("{ \"rules\": [] }").is_err());
}

#[test]
fn flags_override_file_values() {
    let config = TpaConfig {
        reference: Some("net8".to_string()),
        exclude: vec!["a/**".to_string()],
        strict_offset_accessors: Some(false),
        ..TpaConfig::default()
    };
    let args = CliArgs {
        reference: Some("netstandard2.0".to_string()),
        exclude: vec!["b/**".to_string()],
        metadata: vec![PathBuf::from("extra.json")],
        strict_offset_accessors: true,
        ..CliArgs::default()
    };
    let cwd = PathBuf::from("/work");
    let options = resolve_options(config, &args, &cwd).expect("resolve");
    assert_eq!(options.reference, "netstandard2.0");
    assert_eq!(options.exclude, vec!["a/**".to_string(), "b/**".to_string()]);
    assert_eq!(options.metadata, vec![cwd.join("extra.json")]);
    assert!(options.analyzer.strict_offset_accessors);
    assert!(!options.analyzer.include_generated);
}

#[test]
fn default_reference_when_unset() {
    let options =
        resolve_options(TpaConfig::default(), &CliArgs::default(), &PathBuf::from("/work"))
            .expect("resolve");
    assert_eq!(options.reference, "net8");
    assert!(options.severities.is_empty());
}

#[test]
fn rule_severities() {
    let config = parse_config(r#"{ "rules": { "TPA0001": "off", "tpa2": "Error" } }"#)
        .expect("valid config");
    let options = resolve_options(config, &CliArgs::default(), &PathBuf::from("/work"))
        .expect("resolve");
    assert_eq!(options.severity_for(1, DiagnosticCategory::Info), None);
    assert_eq!(
        options.severity_for(2, DiagnosticCategory::Warning),
        Some(DiagnosticCategory::Error)
    );
    assert_eq!(
        options.severity_for(9001, DiagnosticCategory::Error),
        Some(DiagnosticCategory::Error),
        "codes without an override keep their default"
    );
}

#[test]
fn pass_time_provider_rule_can_be_configured() {
    let config = parse_config(r#"{ "rules": { "TPA0003": "error" } }"#).expect("valid config");
    let options = resolve_options(config, &CliArgs::default(), &PathBuf::from("/work"))
        .expect("TPA0003 is a known rule");
    assert_eq!(
        options.severity_for(3, DiagnosticCategory::Warning),
        Some(DiagnosticCategory::Error)
    );
}

#[test]
fn unknown_rule_or_severity_is_rejected() {
    let cwd = PathBuf::from("/work");
    let unknown_rule = parse_config(r#"{ "rules": { "TPA0042": "off" } }"#).expect("json");
    let err = resolve_options(unknown_rule, &CliArgs::default(), &cwd).expect_err("unknown rule");
    assert!(err.to_string().contains("TPA0042"), "{err}");

    let bad_severity = parse_config(r#"{ "rules": { "TPA0001": "loud" } }"#).expect("json");
    let err =
        resolve_options(bad_severity, &CliArgs::default(), &cwd).expect_err("unknown severity");
    assert!(err.to_string().contains("loud"), "{err}");
}

#[test]
fn config_discovery_and_explicit_paths() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert_eq!(resolve_config_path(dir.path(), None).expect("no config"), None);

    let config_path = dir.path().join("tpa.json");
    std::fs::write(&config_path, r#"{ "metadata": ["refs/acme.json"] }"#).expect("write");
    assert_eq!(
        resolve_config_path(dir.path(), None).expect("discovered"),
        Some(config_path.clone())
    );
    assert_eq!(
        resolve_config_path(dir.path(), Some(dir.path())).expect("directory"),
        Some(config_path.clone())
    );
    assert!(resolve_config_path(dir.path(), Some(std::path::Path::new("missing.json"))).is_err());

    let config = load_config(&config_path).expect("load");
    assert_eq!(config.metadata, vec![dir.path().join("refs/acme.json")]);
}
