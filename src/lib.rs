//! tpa: static time-access analyzer for C# sources.
//!
//! Facade over the workspace crates, plus the tracing setup used by the
//! `tpa` binary.

pub use tpa_binder as binder;
pub use tpa_checker as checker;
pub use tpa_common as common;
pub use tpa_parser as parser;
pub use tpa_scanner as scanner;

pub use tpa_binder::{Compilation, MetadataReference, SemanticModel, SourceFile};
pub use tpa_checker::{
    AnalysisResult, AnalyzerOptions, CancellationToken, Finding, TargetTypeSet,
    TimeProviderAnalyzer,
};
pub use tpa_common::{Diagnostic, DiagnosticCategory, Location, Span};

// Tracing configuration (text / tree / JSON output for debugging)
pub mod tracing_config;

/// Analyze in-memory sources against a built-in reference set.
///
/// Convenience entry point for embedding; the CLI builds its compilation
/// itself so that it can add metadata files and report unreadable sources.
pub fn analyze_sources(
    sources: Vec<(String, String)>,
    reference: &str,
    options: AnalyzerOptions,
) -> Result<AnalysisResult, tpa_binder::MetadataError> {
    let reference = MetadataReference::builtin(reference)?;
    let compilation = Compilation::from_sources(sources, &[reference]);
    Ok(TimeProviderAnalyzer::new(options).analyze_compilation(&compilation))
}

#[cfg(test)]
#[path = "../tests/lib_tests.rs"]
mod lib_tests;
