//! Running the analysis over a compilation.
//!
//! `analyze_member_access` is the per-expression entry point; the
//! compilation driver applies it to every simple member access of every
//! file, one file per rayon task.

use rayon::prelude::*;
use tpa_binder::{Compilation, SemanticModel};
use tpa_common::Diagnostic;
use tpa_parser::{NodeIndex, syntax_kind_ext};
use tracing::{Level, debug, span, trace};

use crate::cancellation::CancellationToken;
use crate::classifier::{StaticAccessClassifier, qualified_property_name};
use crate::finding::Finding;
use crate::options::{AnalyzerOptions, is_generated_file};
use crate::scope_resolver::ScopeResolver;
use crate::target_types::{AccessorNameSets, TargetTypeSet};

/// Findings of one run, sorted by file, start and code.
#[derive(Clone, Debug, Default)]
pub struct AnalysisResult {
    pub findings: Vec<Finding>,
    /// False when the compilation lacks one of the target types.
    pub targets_resolved: bool,
    pub files_analyzed: usize,
    pub generated_files_skipped: usize,
    pub cancelled: bool,
}

impl AnalysisResult {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.findings.iter().map(Finding::to_diagnostic).collect()
    }
}

/// Outcome of one file.
enum FileOutcome {
    Analyzed(Vec<Finding>),
    Generated,
    Cancelled,
}

#[derive(Clone, Debug)]
pub struct TimeProviderAnalyzer {
    options: AnalyzerOptions,
    names: AccessorNameSets,
}

impl Default for TimeProviderAnalyzer {
    fn default() -> Self {
        TimeProviderAnalyzer::new(AnalyzerOptions::default())
    }
}

impl TimeProviderAnalyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        TimeProviderAnalyzer {
            options,
            names: AccessorNameSets::DEFAULT,
        }
    }

    #[must_use]
    pub fn with_accessor_names(mut self, names: AccessorNameSets) -> Self {
        self.names = names;
        self
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub fn classifier(&self) -> StaticAccessClassifier<'_> {
        StaticAccessClassifier::new(&self.names, self.options.strict_offset_accessors)
    }

    /// Analyze one member-access node.
    ///
    /// Returns None for anything that is not a simple (`a.b`) member access
    /// to one of the clock accessors.
    pub fn analyze_member_access(
        &self,
        model: &SemanticModel<'_>,
        node: NodeIndex,
        targets: &TargetTypeSet,
    ) -> Option<Finding> {
        self.analyze_member_access_with_cancel(model, node, targets, &CancellationToken::new())
    }

    pub fn analyze_member_access_with_cancel(
        &self,
        model: &SemanticModel<'_>,
        node: NodeIndex,
        targets: &TargetTypeSet,
        cancel: &CancellationToken,
    ) -> Option<Finding> {
        let arena = model.arena();
        let data = arena.get(node)?;
        if data.kind != syntax_kind_ext::MEMBER_ACCESS_EXPRESSION {
            return None;
        }
        if arena.get_member_access(data)?.question_dot {
            return None;
        }
        let symbol = model.symbol_info(node)?;
        if !self.classifier().classify(&symbol, targets) {
            return None;
        }
        let property_name = qualified_property_name(model.types(), &symbol);
        let location = model.file().node_location(node)?;

        let binding = ScopeResolver::new(model, targets.time_provider, cancel).resolve(node);
        if cancel.is_cancelled() {
            return None;
        }
        trace!(
            property = %property_name,
            start = location.span.start,
            binding = ?binding.as_ref().map(|b| (&b.name, b.kind)),
            "classified static time access"
        );
        Some(match binding {
            Some(binding) => Finding::StaticTimeWithProviderInScope {
                location,
                property_name,
                provider_name: binding.name,
            },
            None => Finding::StaticTime {
                location,
                property_name,
            },
        })
    }

    /// Findings of one file in source order, or None when cancelled.
    pub fn analyze_file(
        &self,
        model: &SemanticModel<'_>,
        targets: &TargetTypeSet,
        cancel: &CancellationToken,
    ) -> Option<Vec<Finding>> {
        let file = model.file();
        let arena = model.arena();
        let mut findings = Vec::new();
        for node in arena.descendants(file.root) {
            if arena.kind(node) != Some(syntax_kind_ext::MEMBER_ACCESS_EXPRESSION) {
                continue;
            }
            if cancel.is_cancelled() {
                return None;
            }
            findings.extend(self.analyze_member_access_with_cancel(model, node, targets, cancel));
        }
        if cancel.is_cancelled() {
            return None;
        }
        Some(findings)
    }

    pub fn analyze_compilation(&self, compilation: &Compilation) -> AnalysisResult {
        self.analyze_compilation_with_cancel(compilation, &CancellationToken::new())
    }

    /// Analyze every file of `compilation` in parallel.
    ///
    /// On cancellation the result holds the findings of files that finished.
    pub fn analyze_compilation_with_cancel(
        &self,
        compilation: &Compilation,
        cancel: &CancellationToken,
    ) -> AnalysisResult {
        let analyze_span = span!(Level::DEBUG, "analyze_compilation", files = compilation.files().len());
        let _enter = analyze_span.enter();

        let Some(targets) = TargetTypeSet::resolve(compilation) else {
            return AnalysisResult::default();
        };
        debug!(?targets, "target types resolved");

        let outcomes: Vec<FileOutcome> = (0..compilation.files().len())
            .into_par_iter()
            .map(|index| self.analyze_file_at(compilation, index, &targets, cancel))
            .collect();

        let mut result = AnalysisResult {
            targets_resolved: true,
            ..AnalysisResult::default()
        };
        for outcome in outcomes {
            match outcome {
                FileOutcome::Analyzed(findings) => {
                    result.files_analyzed += 1;
                    result.findings.extend(findings);
                }
                FileOutcome::Generated => result.generated_files_skipped += 1,
                FileOutcome::Cancelled => result.cancelled = true,
            }
        }
        result.findings.sort_by(|a, b| {
            let (left, right) = (a.location(), b.location());
            left.file_path
                .cmp(&right.file_path)
                .then(left.span.start.cmp(&right.span.start))
                .then(a.code().cmp(&b.code()))
        });
        debug!(
            findings = result.findings.len(),
            files = result.files_analyzed,
            generated = result.generated_files_skipped,
            cancelled = result.cancelled,
            "analysis finished"
        );
        result
    }

    fn analyze_file_at(
        &self,
        compilation: &Compilation,
        index: usize,
        targets: &TargetTypeSet,
        cancel: &CancellationToken,
    ) -> FileOutcome {
        if cancel.is_cancelled() {
            return FileOutcome::Cancelled;
        }
        let Some(model) = compilation.semantic_model(index) else {
            return FileOutcome::Analyzed(Vec::new());
        };
        let file = model.file();
        if !self.options.include_generated && is_generated_file(&file.name, &file.text) {
            debug!(file = %file.name, "skipping generated file");
            return FileOutcome::Generated;
        }
        let _file_span = tracing::debug_span!("analyze_file", file = %file.name).entered();
        match self.analyze_file(&model, targets, cancel) {
            Some(findings) => {
                debug!(file = %file.name, findings = findings.len(), "file analyzed");
                FileOutcome::Analyzed(findings)
            }
            None => FileOutcome::Cancelled,
        }
    }
}
