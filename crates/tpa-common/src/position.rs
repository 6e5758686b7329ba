//! Position and location utilities.
//!
//! The AST stores byte offsets, while diagnostics are reported with line/column
//! positions. This module provides the conversion.

use serde::Serialize;

use crate::span::Span;

/// A position in a source file (0-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (UTF-16 code units)
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Position { line, character }
    }
}

/// A range in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Range { start, end }
    }
}

/// A location in a source file (file path + byte span + line/column range).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file_path: String,
    pub span: Span,
    pub range: Range,
}

impl Location {
    pub fn new(file_path: String, span: Span, range: Range) -> Self {
        Location {
            file_path,
            span,
            range,
        }
    }

    /// 1-based `(line, column)` of the start, the form editors and test
    /// expectations use.
    pub fn start_line_column(&self) -> (u32, u32) {
        (self.range.start.line + 1, self.range.start.character + 1)
    }

    /// 1-based `(line, column)` of the end.
    pub fn end_line_column(&self) -> (u32, u32) {
        (self.range.end.line + 1, self.range.end.character + 1)
    }
}

/// Line map for efficient offset <-> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];

        for i in memchr::memchr2_iter(b'\n', b'\r', bytes) {
            if bytes[i] == b'\r' {
                // \r\n is a single line break; the \n will create the line start
                if bytes.get(i + 1) == Some(&b'\n') {
                    continue;
                }
            }
            line_starts.push((i + 1) as u32);
        }

        LineMap { line_starts }
    }

    /// Number of lines in the mapped text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset at which `line` (0-indexed) starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts.get(line as usize).copied()
    }

    /// Convert a byte offset to a Position (line, character).
    /// Character is counted in UTF-16 code units.
    pub fn offset_to_position(&self, offset: u32, source: &str) -> Position {
        // Binary search for the line containing this offset
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let clamped_end = (offset as usize).min(source.len());
        let start = (line_start as usize).min(clamped_end);
        let slice = source.get(start..clamped_end).unwrap_or("");
        let character = slice.chars().map(|ch| ch.len_utf16() as u32).sum();

        Position {
            line: line as u32,
            character,
        }
    }

    /// Convert a byte span to a line/column range.
    pub fn span_to_range(&self, span: Span, source: &str) -> Range {
        Range::new(
            self.offset_to_position(span.start, source),
            self.offset_to_position(span.end, source),
        )
    }
}
