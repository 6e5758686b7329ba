//! C# scanner/tokenizer for the tpa analyzer.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `tokenize` - Scan a whole text into a token vector

mod scanner;
mod syntax_kind;

pub use scanner::{ScannerDiagnostic, ScannerState, Token, tokenize, tokenize_range};
pub use syntax_kind::{SyntaxKind, keyword_from_text};

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;
