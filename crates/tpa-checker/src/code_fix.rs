//! Rewriting a clock read into a call through the reachable provider.
//!
//! Only findings that name a provider get a fix, and only for the five
//! accessors with a direct `TimeProvider` equivalent.

use rustc_hash::FxHashMap;
use tpa_common::Span;
use tracing::trace;

use crate::finding::Finding;

/// Replacement of one span of a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub span: Span,
    pub new_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeFix {
    pub title: String,
    pub file: String,
    pub edit: TextEdit,
}

/// `TimeProvider` expression equivalent to an accessor, after `provider.`.
fn replacement_suffix(property_name: &str) -> Option<&'static str> {
    Some(match property_name {
        "DateTime.UtcNow" => "GetUtcNow().UtcDateTime",
        "DateTime.Now" => "GetLocalNow().DateTime",
        "DateTime.Today" => "GetLocalNow().Date",
        "DateTimeOffset.UtcNow" => "GetUtcNow()",
        "DateTimeOffset.Now" => "GetLocalNow()",
        _ => return None,
    })
}

pub fn code_fix_for(finding: &Finding) -> Option<CodeFix> {
    let provider = finding.provider_name()?;
    let suffix = replacement_suffix(finding.property_name())?;
    let new_text = format!("{provider}.{suffix}");
    let location = finding.location();
    Some(CodeFix {
        title: format!("Use '{new_text}'"),
        file: location.file_path.clone(),
        edit: TextEdit {
            span: location.span,
            new_text,
        },
    })
}

/// Fix edits of `findings`, grouped by file.
pub fn edits_by_file<'f>(findings: impl IntoIterator<Item = &'f Finding>) -> FxHashMap<String, Vec<TextEdit>> {
    let mut edits: FxHashMap<String, Vec<TextEdit>> = FxHashMap::default();
    for fix in findings.into_iter().filter_map(code_fix_for) {
        edits.entry(fix.file).or_default().push(fix.edit);
    }
    edits
}

/// Apply `edits` to `text` from the last span to the first. An edit that
/// overlaps one already applied is dropped.
pub fn apply_edits(text: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by(|a, b| b.span.start.cmp(&a.span.start).then(b.span.end.cmp(&a.span.end)));
    let mut result = text.to_string();
    let mut limit = u32::MAX;
    for edit in edits {
        let Span { start, end } = edit.span;
        if end > limit || start > end || end as usize > text.len() {
            trace!(start, end, "skipping overlapping or out-of-range edit");
            continue;
        }
        if !text.is_char_boundary(start as usize) || !text.is_char_boundary(end as usize) {
            continue;
        }
        result.replace_range(start as usize..end as usize, &edit.new_text);
        limit = start;
    }
    result
}
