//! Analyzer options and generated-code detection.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerOptions {
    /// Only `DateTimeOffset.Now` and `DateTimeOffset.UtcNow` count; otherwise
    /// any `DateTimeOffset` property, or a `Now`/`UtcNow` property on any type.
    pub strict_offset_accessors: bool,
    /// Analyze generated files too.
    pub include_generated: bool,
}

const GENERATED_SUFFIXES: &[&str] = &[
    ".g.cs",
    ".g.i.cs",
    ".designer.cs",
    ".generated.cs",
    ".assemblyinfo.cs",
];

const GENERATED_MARKERS: &[&str] = &["<auto-generated", "<autogenerated"];

/// Whether a file is tool output: by name, or by an `<auto-generated>`
/// marker in the comments that open the file.
pub fn is_generated_file(file_name: &str, text: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    if GENERATED_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        return true;
    }
    leading_comments(text).any(|comment| {
        let comment = comment.to_ascii_lowercase();
        GENERATED_MARKERS.iter().any(|marker| comment.contains(marker))
    })
}

/// Comments before the first token of `text`.
fn leading_comments(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text.strip_prefix('\u{feff}').unwrap_or(text);
    std::iter::from_fn(move || {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("//") {
            let end = after.find('\n').unwrap_or(after.len());
            let (comment, tail) = after.split_at(end);
            rest = tail;
            Some(comment)
        } else if let Some(after) = rest.strip_prefix("/*") {
            let end = after.find("*/");
            let (comment, tail) = match end {
                Some(end) => (&after[..end], &after[end + 2..]),
                None => (after, ""),
            };
            rest = tail;
            Some(comment)
        } else {
            None
        }
    })
}
