use clap::Parser;
use std::path::PathBuf;

use crate::args::{CliArgs, OutputFormat};

#[test]
fn defaults_with_no_arguments() {
    let args = CliArgs::try_parse_from(["tpa"]).expect("parse");
    assert!(args.paths.is_empty());
    assert_eq!(args.format, OutputFormat::Text);
    assert!(args.reference.is_none());
    assert!(!args.fix && !args.quiet && !args.no_color);
    assert!(!args.strict_offset_accessors && !args.include_generated);
}

#[test]
fn repeatable_and_value_flags() {
    let args = CliArgs::try_parse_from([
        "tpa",
        "src",
        "tests/Clock.cs",
        "--format",
        "JSON",
        "--reference",
        "netstandard2.0",
        "--metadata",
        "a.json",
        "--metadata",
        "b.json",
        "--exclude",
        "legacy/**",
        "--exclude",
        "**/*.g.cs",
        "--strict-offset-accessors",
        "--include-generated",
        "--fix",
        "--no-color",
        "-q",
    ])
    .expect("parse");
    assert_eq!(args.paths, vec![PathBuf::from("src"), PathBuf::from("tests/Clock.cs")]);
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(args.reference.as_deref(), Some("netstandard2.0"));
    assert_eq!(args.metadata, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    assert_eq!(args.exclude, vec!["legacy/**".to_string(), "**/*.g.cs".to_string()]);
    assert!(args.strict_offset_accessors);
    assert!(args.include_generated);
    assert!(args.fix && args.no_color && args.quiet);
}

#[test]
fn unknown_format_is_rejected() {
    assert!(CliArgs::try_parse_from(["tpa", "--format", "xml"]).is_err());
}
