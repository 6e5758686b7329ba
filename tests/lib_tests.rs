use crate::tracing_config::LogFormat;
use crate::{AnalyzerOptions, analyze_sources};

#[test]
fn log_format_names() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("fancy"), LogFormat::Text);
}

#[test]
fn analyze_sources_reports_static_time() {
    let source = "using System;\nclass C\n{\n    DateTime M() => DateTime.Now;\n}\n";
    let result = analyze_sources(
        vec![("a.cs".to_string(), source.to_string())],
        "net8",
        AnalyzerOptions::default(),
    )
    .expect("builtin reference");
    assert!(result.targets_resolved);
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].code(), 1);
}

#[test]
fn analyze_sources_rejects_unknown_reference() {
    assert!(analyze_sources(Vec::new(), "net1", AnalyzerOptions::default()).is_err());
}
