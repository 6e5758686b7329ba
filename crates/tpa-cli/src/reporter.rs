use colored::Colorize;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;

use tpa::common::{Diagnostic, DiagnosticCategory, LineMap, Span};

use crate::driver::ReportedDiagnostic;

pub struct Reporter {
    color: bool,
    sources: FxHashMap<String, String>,
    line_maps: FxHashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: FxHashMap::default(),
            line_maps: FxHashMap::default(),
        }
    }

    /// Seed the reporter with already-read sources so files are not read twice.
    #[must_use]
    pub fn with_sources(mut self, sources: FxHashMap<String, String>) -> Self {
        self.sources = sources;
        self
    }

    pub fn render(&mut self, diagnostics: &[ReportedDiagnostic]) -> String {
        let mut out = String::new();
        for (index, reported) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(&reported.diagnostic));
            if let Some(title) = &reported.fix_title {
                out.push('\n');
                out.push_str(&self.format_fix(title));
            }
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let location = self.format_location(&diagnostic.file, diagnostic.start);
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic);

        let mut output = String::new();
        if let Some(location) = location {
            output.push_str(&location);
        } else if !diagnostic.file.is_empty() {
            output.push_str(&diagnostic.file);
        } else {
            output.push_str("<unknown>");
        }

        output.push_str(" - ");
        output.push_str(&category);
        output.push(' ');
        output.push_str(&code);
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }

        output
    }

    /// Source line with the flagged span underlined:
    ///
    /// ```text
    ///     9           return DateTime.Now;
    ///                        ~~~~~~~~~~~~
    /// ```
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if file.is_empty() || length == 0 {
            return None;
        }

        let (line_num, column) = self.position_for(file, start)?;
        let source = self.sources.get(file)?;
        let line_map = self.line_maps.get(file)?;
        let line_start = line_map.line_start(line_num - 1)? as usize;
        let line_text = source.get(line_start..)?.lines().next().unwrap_or("");

        // Columns are UTF-16 units; widen tabs to match the printed line.
        let span_end = (start + length) as usize;
        let mut underline = String::new();
        let mut offset = line_start;
        let mut units = 0u32;
        for ch in line_text.chars() {
            if offset >= span_end {
                break;
            }
            let width = if ch == '\t' { 4 } else { 1 };
            let marker = if units < column - 1 { ' ' } else { '~' };
            underline.extend(std::iter::repeat_n(marker, width));
            units += ch.len_utf16() as u32;
            offset += ch.len_utf8();
        }
        let underline = underline.trim_end().to_string();
        let underline = if underline.is_empty() { "~".to_string() } else { underline };

        let underline_display = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!(
            "\n  {:>3}   {}\n       {}",
            line_num,
            line_text.replace('\t', "    "),
            underline_display
        ))
    }

    fn format_fix(&self, title: &str) -> String {
        let prefix = if self.color {
            "  Fix".green().to_string()
        } else {
            "  Fix".to_string()
        };
        format!("{prefix}: {title}")
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }

        let (line, column) = self.position_for(file, offset)?;
        Some(format!("{file}:{line}:{column}"))
    }

    /// 1-based line and column of `offset` in `file`.
    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        self.ensure_source(file)?;
        if !self.line_maps.contains_key(file) {
            let source = self.sources.get(file)?;
            self.line_maps.insert(file.to_string(), LineMap::build(source));
        }

        let source = self.sources.get(file)?;
        let line_map = self.line_maps.get(file)?;
        let position = line_map.offset_to_position(offset, source);
        Some((position.line + 1, position.character + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Info => label.cyan().bold().to_string(),
            DiagnosticCategory::Hidden => label.dimmed().to_string(),
        }
    }

    fn format_code(&self, diagnostic: &Diagnostic) -> String {
        let label = diagnostic.code_string();
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }

    /// JSON array of diagnostics with 1-based positions.
    pub fn render_json(&mut self, diagnostics: &[ReportedDiagnostic]) -> serde_json::Result<String> {
        let entries: Vec<JsonDiagnostic<'_>> = diagnostics
            .iter()
            .map(|reported| self.json_entry(reported))
            .collect();
        serde_json::to_string_pretty(&entries)
    }

    fn json_entry<'d>(&mut self, reported: &'d ReportedDiagnostic) -> JsonDiagnostic<'d> {
        let diagnostic = &reported.diagnostic;
        let span = Span::new(diagnostic.start, diagnostic.start + diagnostic.length);
        let (line, column) = self
            .position_for(&diagnostic.file, span.start)
            .unwrap_or((1, 1));
        let (end_line, end_column) = self
            .position_for(&diagnostic.file, span.end)
            .unwrap_or((line, column));
        JsonDiagnostic {
            file: &diagnostic.file,
            line,
            column,
            end_line,
            end_column,
            code: diagnostic.code_string(),
            severity: diagnostic.category,
            message: &diagnostic.message_text,
            arguments: &diagnostic.arguments,
            fix: reported.fix_title.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonDiagnostic<'d> {
    pub file: &'d str,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub code: String,
    pub severity: DiagnosticCategory,
    pub message: &'d str,
    pub arguments: &'d [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<&'d str>,
}
