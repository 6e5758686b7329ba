//! Common types and utilities for the tpa analyzer.
//!
//! This crate provides foundational types used across all tpa crates:
//! - Source spans (`Span`)
//! - Position/Range types and `LineMap` for line/column locations
//! - Diagnostic types, descriptors and message formatting

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Location, Position, Range};

// Diagnostics - descriptors, categories and formatted diagnostics
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, format_message,
    get_diagnostic_message,
};

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod position_tests;
#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
