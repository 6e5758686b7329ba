//! `tpa.json` loading and merging with command-line flags.

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use tpa::checker::AnalyzerOptions;
use tpa::common::DiagnosticCategory;
use tpa::common::diagnostics::{get_diagnostic_message, parse_code};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "tpa.json";

/// On-disk configuration. Comments and trailing commas are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TpaConfig {
    pub reference: Option<String>,
    pub metadata: Vec<PathBuf>,
    pub exclude: Vec<String>,
    pub strict_offset_accessors: Option<bool>,
    pub include_generated: Option<bool>,
    /// Rule id to severity name (`off`, `info`, `warning`, `error`).
    pub rules: FxHashMap<String, String>,
}

/// Everything the driver needs, after the config file and flags are merged.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub reference: String,
    pub metadata: Vec<PathBuf>,
    pub exclude: Vec<String>,
    pub analyzer: AnalyzerOptions,
    /// Severity overrides by code; `None` turns the rule off.
    pub severities: FxHashMap<u32, Option<DiagnosticCategory>>,
}

impl ResolvedOptions {
    /// Severity for `code`: the override when present, else `default`.
    pub fn severity_for(
        &self,
        code: u32,
        default: DiagnosticCategory,
    ) -> Option<DiagnosticCategory> {
        match self.severities.get(&code) {
            Some(overridden) => *overridden,
            None => Some(default),
        }
    }
}

pub fn parse_config(source: &str) -> Result<TpaConfig> {
    let stripped = strip_jsonc(source);
    let normalized = remove_trailing_commas(&stripped);
    let config = serde_json::from_str(&normalized).context("failed to parse tpa.json")?;
    Ok(config)
}

/// Load a config file. Relative metadata paths are resolved against its directory.
pub fn load_config(path: &Path) -> Result<TpaConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config =
        parse_config(&source).with_context(|| format!("in config {}", path.display()))?;
    if let Some(base) = path.parent() {
        for metadata in &mut config.metadata {
            if metadata.is_relative() {
                *metadata = base.join(&*metadata);
            }
        }
    }
    Ok(config)
}

pub fn find_config(cwd: &Path) -> Option<PathBuf> {
    let candidate = cwd.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// `--config` when given (a file or a directory holding `tpa.json`), else discovery in `cwd`.
pub fn resolve_config_path(cwd: &Path, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(explicit) = explicit else {
        return Ok(find_config(cwd));
    };

    let mut candidate = if explicit.is_absolute() {
        explicit.to_path_buf()
    } else {
        cwd.join(explicit)
    };
    if candidate.is_dir() {
        candidate = candidate.join(CONFIG_FILE_NAME);
    }
    if !candidate.is_file() {
        bail!("config not found at {}", candidate.display());
    }
    Ok(Some(candidate))
}

/// Merge `config` with `args`; flags win over file values.
pub fn resolve_options(config: TpaConfig, args: &CliArgs, cwd: &Path) -> Result<ResolvedOptions> {
    let reference = args
        .reference
        .clone()
        .or(config.reference)
        .unwrap_or_else(|| tpa::binder::DEFAULT_REFERENCE.to_string());

    let mut metadata = config.metadata;
    metadata.extend(args.metadata.iter().map(|path| {
        if path.is_relative() {
            cwd.join(path)
        } else {
            path.clone()
        }
    }));

    let mut exclude = config.exclude;
    exclude.extend(args.exclude.iter().cloned());

    let analyzer = AnalyzerOptions {
        strict_offset_accessors: args.strict_offset_accessors
            || config.strict_offset_accessors.unwrap_or(false),
        include_generated: args.include_generated || config.include_generated.unwrap_or(false),
    };

    let mut severities = FxHashMap::default();
    for (rule, severity) in &config.rules {
        let Some(code) = parse_code(rule).filter(|code| get_diagnostic_message(*code).is_some())
        else {
            bail!("unknown rule '{rule}' in config");
        };
        let category = if severity.trim().eq_ignore_ascii_case("off") {
            None
        } else {
            match DiagnosticCategory::from_name(severity) {
                Some(category) => Some(category),
                None => bail!("unknown severity '{severity}' for rule '{rule}'"),
            }
        };
        severities.insert(code, category);
    }

    Ok(ResolvedOptions {
        reference,
        metadata,
        exclude,
        analyzer,
        severities,
    })
}

/// Find the config for this run and merge it with the flags.
pub fn load_options(args: &CliArgs, cwd: &Path) -> Result<ResolvedOptions> {
    let config = match resolve_config_path(cwd, args.config.as_deref())? {
        Some(path) => {
            tracing::debug!(config = %path.display(), "loading config");
            load_config(&path)?
        }
        None => TpaConfig::default(),
    };
    resolve_options(config, args, cwd)
}

fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some(ch) = chars.next() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(ch);
            }
            continue;
        }

        if in_block_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block_comment = false;
            } else if ch == '\n' {
                out.push(ch);
            }
            continue;
        }

        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match (ch, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                chars.next();
                in_line_comment = true;
            }
            ('/', Some('*')) => {
                chars.next();
                in_block_comment = true;
            }
            _ => out.push(ch),
        }
    }

    out
}

fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
            out.push(ch);
            continue;
        }

        if ch == ',' {
            let mut lookahead = chars.clone();
            while lookahead.peek().is_some_and(|next| next.is_whitespace()) {
                lookahead.next();
            }
            if matches!(lookahead.peek(), Some('}' | ']')) {
                continue;
            }
        }

        out.push(ch);
    }

    out
}
