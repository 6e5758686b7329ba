//! One analysis run: read sources, build the compilation, analyze, report.

use anyhow::{Context, Result};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use tpa::binder::{Compilation, MetadataReference};
use tpa::checker::{TimeProviderAnalyzer, apply_edits, code_fix_for, edits_by_file};
use tpa::common::{Diagnostic, DiagnosticCategory, diagnostic_codes};

use crate::args::CliArgs;
use crate::config::{ResolvedOptions, load_options};
use crate::driver_sources::{
    FileReadResult, build_exclude_set, discover_sources, display_name, read_source_file,
};

/// Exit status when nothing at warning-or-above was reported.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status when a warning or error was reported.
pub const EXIT_DIAGNOSTICS: i32 = 1;
/// Exit status for a fatal error (bad arguments, config or references).
pub const EXIT_FATAL: i32 = 2;

/// A diagnostic as reported, with the title of its fix when one exists.
#[derive(Debug, Clone)]
pub struct ReportedDiagnostic {
    pub diagnostic: Diagnostic,
    pub fix_title: Option<String>,
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub diagnostics: Vec<ReportedDiagnostic>,
    /// Source text by display name, as read (before any fix was applied).
    pub sources: FxHashMap<String, String>,
    pub files_read: usize,
    pub files_fixed: usize,
    pub fixes_applied: usize,
    pub targets_resolved: bool,
}

impl RunResult {
    pub fn exit_code(&self) -> i32 {
        let failing = self
            .diagnostics
            .iter()
            .any(|reported| reported.diagnostic.category >= DiagnosticCategory::Warning);
        if failing { EXIT_DIAGNOSTICS } else { EXIT_SUCCESS }
    }

    pub fn count(&self, category: DiagnosticCategory) -> usize {
        self.diagnostics
            .iter()
            .filter(|reported| reported.diagnostic.category == category)
            .count()
    }
}

/// Run the analysis described by `args`, with relative paths resolved against `cwd`.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunResult> {
    let options = load_options(args, cwd)?;
    let exclude = build_exclude_set(&options.exclude)?;
    let paths = discover_sources(&args.paths, cwd, &exclude)?;
    let references = load_references(&options)?;

    let read: Vec<(String, PathBuf, FileReadResult)> = paths
        .par_iter()
        .map(|path| (display_name(path, cwd), path.clone(), read_source_file(path)))
        .collect();

    let mut result = RunResult::default();
    let mut diagnostics = Vec::new();
    let mut inputs = Vec::with_capacity(read.len());
    let mut file_paths: FxHashMap<String, PathBuf> = FxHashMap::default();
    for (name, path, contents) in read {
        match contents {
            FileReadResult::Text(text) => {
                file_paths.insert(name.clone(), path);
                result.sources.insert(name.clone(), text.clone());
                inputs.push((name, text));
            }
            FileReadResult::Binary => {
                diagnostics.push(cannot_read(&name, "file appears to be binary"));
            }
            FileReadResult::Error(message) => {
                diagnostics.push(cannot_read(&name, &message));
            }
        }
    }
    result.files_read = inputs.len();

    let compilation = Compilation::from_sources(inputs, &references);
    for file in compilation.files() {
        diagnostics.extend(file.parse_diagnostics.iter().map(|parse| {
            Diagnostic::error(
                file.name.clone(),
                parse.start,
                parse.length,
                parse.message.clone(),
                parse.code,
            )
        }));
    }

    let analysis = TimeProviderAnalyzer::new(options.analyzer.clone()).analyze_compilation(&compilation);
    result.targets_resolved = analysis.targets_resolved;
    if !analysis.targets_resolved {
        info!(
            reference = %options.reference,
            "System.TimeProvider is not available; time-access analysis skipped"
        );
    }

    let mut reported = Vec::new();
    let mut fixable = Vec::new();
    for finding in &analysis.findings {
        let diagnostic = finding.to_diagnostic();
        let Some(category) = options.severity_for(diagnostic.code, diagnostic.category) else {
            continue;
        };
        let fix = code_fix_for(finding);
        if args.fix && fix.is_some() {
            fixable.push(finding);
            continue;
        }
        reported.push(ReportedDiagnostic {
            diagnostic: diagnostic.with_category(category),
            fix_title: fix.map(|fix| fix.title),
        });
    }

    if args.fix {
        apply_fixes(&mut result, &file_paths, edits_by_file(fixable))?;
    }

    for diagnostic in diagnostics {
        if let Some(category) = options.severity_for(diagnostic.code, diagnostic.category) {
            reported.push(ReportedDiagnostic {
                diagnostic: diagnostic.with_category(category),
                fix_title: None,
            });
        }
    }

    reported.sort_by(|a, b| {
        let (a, b) = (&a.diagnostic, &b.diagnostic);
        (a.file.as_str(), a.start, a.code).cmp(&(b.file.as_str(), b.start, b.code))
    });
    result.diagnostics = reported;

    debug!(
        files = result.files_read,
        diagnostics = result.diagnostics.len(),
        fixes = result.fixes_applied,
        "run complete"
    );
    Ok(result)
}

fn load_references(options: &ResolvedOptions) -> Result<Vec<MetadataReference>> {
    let mut references = vec![
        MetadataReference::builtin(&options.reference)
            .with_context(|| format!("failed to load reference set '{}'", options.reference))?,
    ];
    for path in &options.metadata {
        let reference = MetadataReference::load(path)
            .with_context(|| format!("failed to load metadata {}", path.display()))?;
        references.push(reference);
    }
    Ok(references)
}

fn cannot_read(name: &str, reason: &str) -> Diagnostic {
    Diagnostic::from_code(
        name.to_string(),
        0,
        0,
        diagnostic_codes::CANNOT_READ_FILE,
        &[name, reason],
    )
}

fn apply_fixes(
    result: &mut RunResult,
    file_paths: &FxHashMap<String, PathBuf>,
    edits: FxHashMap<String, Vec<tpa::checker::TextEdit>>,
) -> Result<()> {
    let mut files: Vec<_> = edits.into_iter().collect();
    files.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, edits) in files {
        let (Some(path), Some(text)) = (file_paths.get(&name), result.sources.get(&name)) else {
            continue;
        };
        let count = edits.len();
        let fixed = apply_edits(text, edits);
        std::fs::write(path, fixed)
            .with_context(|| format!("failed to write fixes to {}", path.display()))?;
        debug!(file = %name, edits = count, "applied fixes");
        result.files_fixed += 1;
        result.fixes_applied += count;
    }
    Ok(())
}
