//! Parser state: token cursor, diagnostics and shared helpers.
//!
//! The parser consumes the scanner's token vector. Lookahead that must decide
//! between two parses (declaration vs. expression, generic name vs. less-than,
//! cast vs. parenthesized expression, lambda vs. tuple) is done by index-based
//! `scan_*` functions that never create nodes.

use tpa_common::diagnostics::{format_message, get_message_template};
use tpa_scanner::{SyntaxKind, Token, tokenize};
use tracing::trace;

use super::base::NodeIndex;
use super::node::NodeArena;

/// A recoverable syntax problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

/// Deepest nesting of expressions/statements before the parser gives up on a
/// subtree and reports it as an error.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 400;

pub struct ParserState {
    pub(crate) file_name: String,
    pub(crate) source: String,
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) arena: NodeArena,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) recursion_depth: u32,
    /// End offset of the last consumed token.
    pub(crate) last_end: u32,
    /// Names of the enclosing type declarations (for constructor detection).
    pub(crate) type_names: Vec<String>,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let (tokens, scanner_diagnostics) = tokenize(&source_text);
        let parse_diagnostics = scanner_diagnostics
            .into_iter()
            .map(|diag| ParseDiagnostic {
                start: diag.pos as u32,
                length: diag.length as u32,
                message: diag.message.to_string(),
                code: diag.code,
            })
            .collect();
        let capacity = tokens.len();
        ParserState {
            file_name,
            source: source_text,
            tokens,
            pos: 0,
            arena: NodeArena::with_capacity(capacity),
            parse_diagnostics,
            recursion_depth: 0,
            last_end: 0,
            type_names: Vec::new(),
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    /// Arena and diagnostics, consuming the parser.
    pub fn into_parts(self) -> (NodeArena, Vec<ParseDiagnostic>) {
        (self.arena, self.parse_diagnostics)
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn source_text(&self) -> &str {
        &self.source
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token_at(&self, index: usize) -> &Token {
        // The token vector always ends with EndOfFileToken.
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[index.min(last)]
    }

    #[inline]
    pub(crate) fn kind_at(&self, index: usize) -> SyntaxKind {
        if self.tokens.is_empty() {
            SyntaxKind::EndOfFileToken
        } else {
            self.token_at(index).kind
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> SyntaxKind {
        self.kind_at(self.pos)
    }

    #[inline]
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.kind_at(self.pos + n)
    }

    #[inline]
    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    #[inline]
    pub(crate) fn at_eof(&self) -> bool {
        self.at(SyntaxKind::EndOfFileToken)
    }

    pub(crate) fn text_at(&self, index: usize) -> &str {
        if self.tokens.is_empty() {
            return "";
        }
        let token = self.token_at(index);
        self.source
            .get(token.start as usize..token.end as usize)
            .unwrap_or("")
    }

    pub(crate) fn current_text(&self) -> &str {
        self.text_at(self.pos)
    }

    /// Start offset of the current token.
    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        if self.tokens.is_empty() {
            0
        } else {
            self.token_at(self.pos).start
        }
    }

    /// True if the token at `index` is an identifier with exactly `text`.
    pub(crate) fn is_contextual_at(&self, index: usize, text: &str) -> bool {
        self.kind_at(index) == SyntaxKind::Identifier && self.text_at(index) == text
    }

    pub(crate) fn at_contextual(&self, text: &str) -> bool {
        self.is_contextual_at(self.pos, text)
    }

    pub(crate) fn advance(&mut self) {
        if !self.at_eof() {
            self.last_end = self.token_at(self.pos).end;
            self.pos += 1;
        }
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report "'x' expected." at the current token.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_at_current(
            tpa_common::diagnostic_codes::TOKEN_EXPECTED,
            &[kind.text()],
        );
        false
    }

    /// True if the tokens at `first` and `first + 1` touch (no trivia between).
    pub(crate) fn tokens_adjacent(&self, first: usize) -> bool {
        self.token_at(first).end == self.token_at(first + 1).start
    }

    /// `>` `>` joined into a shift operator at the current position.
    pub(crate) fn at_shift_right(&self) -> bool {
        self.at(SyntaxKind::GreaterThanToken)
            && self.nth(1) == SyntaxKind::GreaterThanToken
            && self.tokens_adjacent(self.pos)
    }

    pub(crate) fn at_shift_right_equals(&self) -> bool {
        self.at(SyntaxKind::GreaterThanToken)
            && self.nth(1) == SyntaxKind::GreaterThanEqualsToken
            && self.tokens_adjacent(self.pos)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at(&mut self, start: u32, length: u32, code: u32, args: &[&str]) {
        // One diagnostic per position keeps cascades quiet.
        if self
            .parse_diagnostics
            .last()
            .is_some_and(|last| last.start == start)
        {
            return;
        }
        let message = get_message_template(code)
            .map_or_else(|| format!("TPA{code:04}"), |template| format_message(template, args));
        trace!(file = %self.file_name, start, code, "parse diagnostic");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message,
            code,
        });
    }

    pub(crate) fn error_at_current(&mut self, code: u32, args: &[&str]) {
        let (start, length) = if self.tokens.is_empty() {
            (0, 0)
        } else {
            let token = self.token_at(self.pos);
            (token.start, token.end - token.start)
        };
        self.error_at(start, length, code, args);
    }

    /// Report the current token as unexpected and skip it.
    pub(crate) fn skip_unexpected(&mut self) {
        let text = self.current_text().to_string();
        self.error_at_current(tpa_common::diagnostic_codes::UNEXPECTED_TOKEN, &[&text]);
        self.advance();
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.error_at_current(tpa_common::diagnostic_codes::EXPRESSION_EXPECTED, &[]);
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Shared node helpers
    // =========================================================================

    /// Parse an identifier token into an `Identifier` node.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.at(SyntaxKind::Identifier) {
            let token = self.token_at(self.pos).clone();
            let text = self.current_text().to_string();
            self.advance();
            self.arena.add_identifier(token.start, token.end, &text)
        } else {
            self.error_at_current(tpa_common::diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
            NodeIndex::NONE
        }
    }

    /// Skip tokens until one of `stops` (not consumed) or end of file,
    /// stepping over balanced brackets.
    pub(crate) fn skip_until(&mut self, stops: &[SyntaxKind]) {
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current();
            if depth == 0 && stops.contains(&kind) {
                return;
            }
            match kind {
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Index just past the bracket matching the opener at `index`.
    pub(crate) fn scan_balanced(&self, index: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = index;
        loop {
            match self.kind_at(i) {
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::OpenBraceToken => depth += 1,
                SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i + 1);
                    }
                }
                SyntaxKind::EndOfFileToken => return None,
                _ => {}
            }
            i += 1;
        }
    }

    /// Skip attribute lists (`[Attr(...)]`); attributes are not modeled.
    pub(crate) fn skip_attributes(&mut self) {
        while self.at(SyntaxKind::OpenBracketToken) {
            match self.scan_balanced(self.pos) {
                Some(end) => {
                    while self.pos < end {
                        self.advance();
                    }
                }
                None => {
                    self.skip_unexpected();
                    return;
                }
            }
        }
    }
}
