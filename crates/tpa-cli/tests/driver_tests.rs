//! End-to-end runs over temporary directories.
use std::path::Path;

use tpa::common::DiagnosticCategory;

use crate::args::CliArgs;
use crate::driver::{EXIT_DIAGNOSTICS, EXIT_SUCCESS, RunResult, run};

const WITH_PROVIDER: &str = "using System;

class C
{
    public DateTime M(TimeProvider tp)
    {
        return DateTime.UtcNow;
    }
}
";

const WITHOUT_PROVIDER: &str = "using System;

class D
{
    public DateTime M()
    {
        return DateTime.Now;
    }
}
";

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dirs");
    }
    std::fs::write(path, contents).expect("write");
}

/// `(file, code, line, column)` of every reported diagnostic.
fn summarize(result: &RunResult) -> Vec<(String, String, u32, u32)> {
    result
        .diagnostics
        .iter()
        .map(|reported| {
            let diagnostic = &reported.diagnostic;
            let text = &result.sources[&diagnostic.file];
            let map = tpa::common::LineMap::build(text);
            let position = map.offset_to_position(diagnostic.start, text);
            (
                diagnostic.file.clone(),
                diagnostic.code_string(),
                position.line + 1,
                position.character + 1,
            )
        })
        .collect()
}

fn entry(file: &str, code: &str, line: u32, column: u32) -> (String, String, u32, u32) {
    (file.to_string(), code.to_string(), line, column)
}

#[test]
fn reports_both_rules_across_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "src/WithProvider.cs", WITH_PROVIDER);
    write(dir.path(), "src/Plain.cs", WITHOUT_PROVIDER);

    let result = run(&CliArgs::default(), dir.path()).expect("run");
    assert!(result.targets_resolved);
    assert_eq!(result.files_read, 2);
    assert_eq!(
        summarize(&result),
        vec![
            entry("src/Plain.cs", "TPA0001", 7, 16),
            entry("src/WithProvider.cs", "TPA0002", 7, 16),
        ]
    );
    let with_provider = &result.diagnostics[1];
    assert_eq!(with_provider.diagnostic.arguments, vec!["tp", "DateTime.UtcNow"]);
    assert_eq!(
        with_provider.fix_title.as_deref(),
        Some("Use 'tp.GetUtcNow().UtcDateTime'")
    );
    assert!(result.diagnostics[0].fix_title.is_none());
    assert_eq!(result.exit_code(), EXIT_DIAGNOSTICS);
}

#[test]
fn info_only_run_succeeds() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "Plain.cs", WITHOUT_PROVIDER);

    let result = run(&CliArgs::default(), dir.path()).expect("run");
    assert_eq!(result.count(DiagnosticCategory::Info), 1);
    assert_eq!(result.exit_code(), EXIT_SUCCESS);
}

#[test]
fn fix_rewrites_files_in_place() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "WithProvider.cs", WITH_PROVIDER);
    write(dir.path(), "Plain.cs", WITHOUT_PROVIDER);

    let args = CliArgs {
        fix: true,
        ..CliArgs::default()
    };
    let result = run(&args, dir.path()).expect("run");
    assert_eq!(result.fixes_applied, 1);
    assert_eq!(result.files_fixed, 1);
    assert_eq!(summarize(&result), vec![entry("Plain.cs", "TPA0001", 7, 16)]);

    let fixed = std::fs::read_to_string(dir.path().join("WithProvider.cs")).expect("read");
    assert!(fixed.contains("return tp.GetUtcNow().UtcDateTime;"), "{fixed}");
    let untouched = std::fs::read_to_string(dir.path().join("Plain.cs")).expect("read");
    assert_eq!(untouched, WITHOUT_PROVIDER);

    let rerun = run(&CliArgs::default(), dir.path()).expect("rerun");
    assert_eq!(summarize(&rerun), vec![entry("Plain.cs", "TPA0001", 7, 16)]);
}

#[test]
fn config_rules_change_severity() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "WithProvider.cs", WITH_PROVIDER);
    write(dir.path(), "Plain.cs", WITHOUT_PROVIDER);
    write(
        dir.path(),
        "tpa.json",
        r#"{ "rules": { "TPA0002": "off", "TPA0001": "error" } }"#,
    );

    let result = run(&CliArgs::default(), dir.path()).expect("run");
    assert_eq!(summarize(&result), vec![entry("Plain.cs", "TPA0001", 7, 16)]);
    assert_eq!(result.diagnostics[0].diagnostic.category, DiagnosticCategory::Error);
    assert_eq!(result.exit_code(), EXIT_DIAGNOSTICS);
}

#[test]
fn unreadable_sources_are_reported_and_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "Plain.cs", WITHOUT_PROVIDER);
    std::fs::write(dir.path().join("Blob.cs"), [0u8, 0, 0, 0, 0, 7, 7]).expect("write");

    let result = run(&CliArgs::default(), dir.path()).expect("run");
    assert_eq!(result.files_read, 1);
    let blob = &result.diagnostics[0].diagnostic;
    assert_eq!(blob.file, "Blob.cs");
    assert_eq!(blob.code_string(), "TPA9001");
    assert_eq!(blob.category, DiagnosticCategory::Error);
    assert_eq!(
        blob.message_text,
        "Cannot read file 'Blob.cs': file appears to be binary."
    );
    assert_eq!(result.diagnostics[1].diagnostic.code_string(), "TPA0001");
    assert_eq!(result.exit_code(), EXIT_DIAGNOSTICS);
}

#[test]
fn reference_without_time_provider_skips_analysis() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "WithProvider.cs", WITH_PROVIDER);

    let args = CliArgs {
        reference: Some("netstandard2.0".to_string()),
        ..CliArgs::default()
    };
    let result = run(&args, dir.path()).expect("run");
    assert!(!result.targets_resolved);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.exit_code(), EXIT_SUCCESS);
}

#[test]
fn build_output_generated_and_excluded_files_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "obj/Debug/Gen.cs", WITHOUT_PROVIDER);
    write(dir.path(), "Form1.Designer.cs", WITHOUT_PROVIDER);
    write(dir.path(), "legacy/Old.cs", WITHOUT_PROVIDER);
    write(dir.path(), "Current.cs", WITH_PROVIDER);

    let args = CliArgs {
        exclude: vec!["legacy/**".to_string()],
        ..CliArgs::default()
    };
    let result = run(&args, dir.path()).expect("run");
    assert_eq!(summarize(&result), vec![entry("Current.cs", "TPA0002", 7, 16)]);

    let args = CliArgs {
        include_generated: true,
        ..CliArgs::default()
    };
    let result = run(&args, dir.path()).expect("run");
    let files: Vec<_> = summarize(&result).into_iter().map(|(file, ..)| file).collect();
    assert_eq!(files, vec!["Current.cs", "Form1.Designer.cs", "legacy/Old.cs"]);
}

#[test]
fn parse_errors_are_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "Broken.cs", "class C { void M() { var x = ; } int y; }");

    let result = run(&CliArgs::default(), dir.path()).expect("run");
    assert!(
        result
            .diagnostics
            .iter()
            .any(|reported| reported.diagnostic.code_string().starts_with("TPA1")),
        "expected a syntax diagnostic"
    );
}

#[test]
fn metadata_references_are_loaded() {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "WithProvider.cs", WITH_PROVIDER);
    write(
        dir.path(),
        "refs/acme.json",
        r#"{ "name": "Acme.Time", "types": [ { "name": "Acme.Clock", "kind": "class" } ] }"#,
    );
    write(dir.path(), "refs/broken.json", "{ not json");

    let args = CliArgs {
        paths: vec!["WithProvider.cs".into()],
        metadata: vec!["refs/acme.json".into()],
        ..CliArgs::default()
    };
    let result = run(&args, dir.path()).expect("run");
    assert_eq!(summarize(&result), vec![entry("WithProvider.cs", "TPA0002", 7, 16)]);

    let args = CliArgs {
        metadata: vec!["refs/broken.json".into()],
        ..CliArgs::default()
    };
    let err = run(&args, dir.path()).expect_err("invalid metadata");
    assert!(format!("{err:#}").contains("broken.json"), "{err:#}");
}

#[test]
fn fatal_errors_for_bad_inputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let args = CliArgs {
        reference: Some("net1".to_string()),
        ..CliArgs::default()
    };
    assert!(run(&args, dir.path()).is_err(), "unknown reference set");

    let args = CliArgs {
        config: Some("missing.json".into()),
        ..CliArgs::default()
    };
    assert!(run(&args, dir.path()).is_err(), "missing config");
}
