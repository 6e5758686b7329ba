//! Scanner state machine.
//!
//! The scanner works on byte offsets into the source text. Trivia (whitespace,
//! comments, preprocessor directive lines) is skipped and never produces
//! tokens. Interpolated strings are scanned as a single token whose
//! interpolation holes are recorded so the parser can analyze the embedded
//! expressions.

use tpa_common::Span;
use tpa_common::diagnostic_codes;

use crate::syntax_kind::{SyntaxKind, keyword_from_text};

/// A scanned token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub start: u32,
    pub end: u32,
    /// Interpolation hole contents (between the braces), for
    /// `InterpolatedStringLiteral` tokens only.
    pub holes: Vec<Span>,
}

impl Token {
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

/// A lexical error found while scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

pub struct ScannerState<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    end: usize,
    token: SyntaxKind,
    token_start: usize,
    holes: Vec<Span>,
    /// True while only whitespace has been seen on the current line.
    at_line_start: bool,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl<'a> ScannerState<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_range(text, 0, text.len())
    }

    /// Scan only `text[start..end]`, keeping offsets absolute.
    pub fn with_range(text: &'a str, start: usize, end: usize) -> Self {
        let end = end.min(text.len());
        ScannerState {
            text,
            bytes: text.as_bytes(),
            pos: start.min(end),
            end,
            token: SyntaxKind::Unknown,
            token_start: start.min(end),
            holes: Vec::new(),
            at_line_start: start == 0,
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_pos(&self) -> usize {
        self.token_start
    }

    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    pub fn token_text(&self) -> &'a str {
        self.text.get(self.token_start..self.pos).unwrap_or("")
    }

    pub fn take_holes(&mut self) -> Vec<Span> {
        std::mem::take(&mut self.holes)
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<ScannerDiagnostic> {
        self.diagnostics
    }

    #[inline]
    fn peek(&self, offset: usize) -> u8 {
        let at = self.pos + offset;
        if at < self.end { self.bytes[at] } else { 0 }
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
            code,
        });
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.holes.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        if self.pos >= self.end {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        }

        let ch = self.bytes[self.pos];
        self.token = match ch {
            b'{' => self.single(SyntaxKind::OpenBraceToken),
            b'}' => self.single(SyntaxKind::CloseBraceToken),
            b'(' => self.single(SyntaxKind::OpenParenToken),
            b')' => self.single(SyntaxKind::CloseParenToken),
            b'[' => self.single(SyntaxKind::OpenBracketToken),
            b']' => self.single(SyntaxKind::CloseBracketToken),
            b';' => self.single(SyntaxKind::SemicolonToken),
            b',' => self.single(SyntaxKind::CommaToken),
            b'~' => self.single(SyntaxKind::TildeToken),
            b'.' => {
                if self.peek(1).is_ascii_digit() {
                    self.scan_number()
                } else if self.peek(1) == b'.' {
                    self.pos += 2;
                    SyntaxKind::DotDotToken
                } else {
                    self.single(SyntaxKind::DotToken)
                }
            }
            b':' => {
                if self.peek(1) == b':' {
                    self.pos += 2;
                    SyntaxKind::ColonColonToken
                } else {
                    self.single(SyntaxKind::ColonToken)
                }
            }
            b'?' => match (self.peek(1), self.peek(2)) {
                (b'?', b'=') => {
                    self.pos += 3;
                    SyntaxKind::QuestionQuestionEqualsToken
                }
                (b'?', _) => {
                    self.pos += 2;
                    SyntaxKind::QuestionQuestionToken
                }
                // `a?.5:b` is a conditional with a numeric literal, not `?.`
                (b'.', next) if !next.is_ascii_digit() => {
                    self.pos += 2;
                    SyntaxKind::QuestionDotToken
                }
                _ => self.single(SyntaxKind::QuestionToken),
            },
            b'=' => match self.peek(1) {
                b'=' => self.double(SyntaxKind::EqualsEqualsToken),
                b'>' => self.double(SyntaxKind::EqualsGreaterThanToken),
                _ => self.single(SyntaxKind::EqualsToken),
            },
            b'!' => match self.peek(1) {
                b'=' => self.double(SyntaxKind::ExclamationEqualsToken),
                _ => self.single(SyntaxKind::ExclamationToken),
            },
            b'<' => match (self.peek(1), self.peek(2)) {
                (b'<', b'=') => {
                    self.pos += 3;
                    SyntaxKind::LessThanLessThanEqualsToken
                }
                (b'<', _) => self.double(SyntaxKind::LessThanLessThanToken),
                (b'=', _) => self.double(SyntaxKind::LessThanEqualsToken),
                _ => self.single(SyntaxKind::LessThanToken),
            },
            b'>' => match self.peek(1) {
                b'=' => self.double(SyntaxKind::GreaterThanEqualsToken),
                _ => self.single(SyntaxKind::GreaterThanToken),
            },
            b'+' => match self.peek(1) {
                b'+' => self.double(SyntaxKind::PlusPlusToken),
                b'=' => self.double(SyntaxKind::PlusEqualsToken),
                _ => self.single(SyntaxKind::PlusToken),
            },
            b'-' => match self.peek(1) {
                b'-' => self.double(SyntaxKind::MinusMinusToken),
                b'=' => self.double(SyntaxKind::MinusEqualsToken),
                b'>' => self.double(SyntaxKind::MinusGreaterThanToken),
                _ => self.single(SyntaxKind::MinusToken),
            },
            b'*' => match self.peek(1) {
                b'=' => self.double(SyntaxKind::AsteriskEqualsToken),
                _ => self.single(SyntaxKind::AsteriskToken),
            },
            b'/' => match self.peek(1) {
                b'=' => self.double(SyntaxKind::SlashEqualsToken),
                _ => self.single(SyntaxKind::SlashToken),
            },
            b'%' => match self.peek(1) {
                b'=' => self.double(SyntaxKind::PercentEqualsToken),
                _ => self.single(SyntaxKind::PercentToken),
            },
            b'&' => match self.peek(1) {
                b'&' => self.double(SyntaxKind::AmpersandAmpersandToken),
                b'=' => self.double(SyntaxKind::AmpersandEqualsToken),
                _ => self.single(SyntaxKind::AmpersandToken),
            },
            b'|' => match self.peek(1) {
                b'|' => self.double(SyntaxKind::BarBarToken),
                b'=' => self.double(SyntaxKind::BarEqualsToken),
                _ => self.single(SyntaxKind::BarToken),
            },
            b'^' => match self.peek(1) {
                b'=' => self.double(SyntaxKind::CaretEqualsToken),
                _ => self.single(SyntaxKind::CaretToken),
            },
            b'"' => self.scan_string_prefixed(0, false),
            b'\'' => self.scan_char(),
            b'@' => match self.peek(1) {
                b'"' => {
                    self.pos += 1;
                    self.scan_string_prefixed(0, true)
                }
                b'$' => {
                    self.pos += 1;
                    self.scan_dollar_string(true)
                }
                c if is_identifier_start(c) || c >= 0x80 => {
                    // Verbatim identifier: `@class` is never a keyword
                    self.pos += 1;
                    self.scan_identifier_tail();
                    SyntaxKind::Identifier
                }
                _ => self.invalid_character(),
            },
            b'$' => match self.peek(1) {
                b'"' | b'$' | b'@' => self.scan_dollar_string(false),
                _ => self.invalid_character(),
            },
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier_or_keyword(),
            c if c >= 0x80 => {
                let ch = self.current_char();
                if ch.is_alphabetic() || ch == '_' {
                    self.scan_identifier_or_keyword()
                } else {
                    self.invalid_character()
                }
            }
            _ => self.invalid_character(),
        };
        self.at_line_start = false;
        self.token
    }

    #[inline]
    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    #[inline]
    fn double(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 2;
        kind
    }

    fn current_char(&self) -> char {
        self.text
            .get(self.pos..self.end)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\0')
    }

    fn invalid_character(&mut self) -> SyntaxKind {
        let len = self.current_char().len_utf8().max(1);
        self.error(
            self.pos,
            len,
            "Invalid character.",
            diagnostic_codes::INVALID_CHARACTER,
        );
        self.pos += len;
        SyntaxKind::Unknown
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    fn skip_trivia(&mut self) {
        while self.pos < self.end {
            match self.bytes[self.pos] {
                b'\n' | b'\r' => {
                    self.pos += 1;
                    self.at_line_start = true;
                }
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'/' if self.peek(1) == b'/' => self.skip_to_line_end(),
                b'/' if self.peek(1) == b'*' => {
                    let start = self.pos;
                    let body = self.pos + 2;
                    match memchr::memmem::find(&self.bytes[body..self.end], b"*/") {
                        Some(offset) => self.pos = body + offset + 2,
                        None => {
                            self.error(
                                start,
                                self.end - start,
                                "'*/' expected.",
                                diagnostic_codes::UNTERMINATED_COMMENT,
                            );
                            self.pos = self.end;
                        }
                    }
                }
                // Preprocessor directives occupy whole lines
                b'#' if self.at_line_start => self.skip_to_line_end(),
                0xEF if self.pos == 0 && self.peek(1) == 0xBB && self.peek(2) == 0xBF => {
                    self.pos += 3;
                }
                c if c >= 0x80 && self.current_char().is_whitespace() => {
                    self.pos += self.current_char().len_utf8();
                }
                _ => break,
            }
        }
    }

    fn skip_to_line_end(&mut self) {
        self.pos = match memchr::memchr2(b'\n', b'\r', &self.bytes[self.pos..self.end]) {
            Some(offset) => self.pos + offset,
            None => self.end,
        };
    }

    // =========================================================================
    // Identifiers and numbers
    // =========================================================================

    fn scan_identifier_tail(&mut self) {
        while self.pos < self.end {
            let c = self.bytes[self.pos];
            if is_identifier_part(c) {
                self.pos += 1;
            } else if c >= 0x80 {
                let ch = self.current_char();
                if ch.is_alphanumeric() || ch == '_' {
                    self.pos += ch.len_utf8();
                } else {
                    break;
                }
            } else {
                break;
            }
        }
    }

    fn scan_identifier_or_keyword(&mut self) -> SyntaxKind {
        self.scan_identifier_tail();
        keyword_from_text(self.token_text()).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        if self.peek(0) == b'0' && matches!(self.peek(1), b'x' | b'X' | b'b' | b'B') {
            self.pos += 2;
            while self.peek(0).is_ascii_hexdigit() || self.peek(0) == b'_' {
                self.pos += 1;
            }
        } else {
            while self.peek(0).is_ascii_digit() || self.peek(0) == b'_' {
                self.pos += 1;
            }
            // Only a dot followed by a digit continues the literal; `1.ToString()` stays a call.
            if self.peek(0) == b'.' && self.peek(1).is_ascii_digit() {
                self.pos += 1;
                while self.peek(0).is_ascii_digit() || self.peek(0) == b'_' {
                    self.pos += 1;
                }
            }
            if matches!(self.peek(0), b'e' | b'E')
                && (self.peek(1).is_ascii_digit()
                    || (matches!(self.peek(1), b'+' | b'-') && self.peek(2).is_ascii_digit()))
            {
                self.pos += 2;
                while self.peek(0).is_ascii_digit() {
                    self.pos += 1;
                }
            }
        }
        // Type suffixes: u, l, ul, lu, f, d, m
        while matches!(
            self.peek(0),
            b'u' | b'U' | b'l' | b'L' | b'f' | b'F' | b'd' | b'D' | b'm' | b'M'
        ) {
            self.pos += 1;
        }
        SyntaxKind::NumericLiteral
    }

    // =========================================================================
    // Strings and characters
    // =========================================================================

    fn scan_char(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.end {
            match self.bytes[self.pos] {
                b'\\' => self.pos += 2,
                b'\'' => {
                    self.pos += 1;
                    return SyntaxKind::CharacterLiteral;
                }
                b'\n' | b'\r' => break,
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(self.end);
        self.error(
            start,
            self.pos - start,
            "Unterminated string literal.",
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        );
        SyntaxKind::CharacterLiteral
    }

    /// Scan a string starting at the opening quote. `dollars` is the number of
    /// `$` prefixes (0 for a plain string).
    fn scan_string_prefixed(&mut self, dollars: usize, verbatim: bool) -> SyntaxKind {
        let quotes = self.count_run(b'"');
        let kind = if dollars > 0 {
            SyntaxKind::InterpolatedStringLiteral
        } else {
            SyntaxKind::StringLiteral
        };
        if quotes >= 3 && !verbatim {
            self.scan_raw_string(quotes, dollars);
        } else if quotes == 2 && !verbatim {
            // Empty string ""
            self.pos += 2;
        } else {
            self.pos += 1;
            self.scan_quoted_body(dollars > 0, verbatim);
        }
        kind
    }

    fn scan_dollar_string(&mut self, verbatim_prefix: bool) -> SyntaxKind {
        let dollars = self.count_run(b'$');
        self.pos += dollars;
        let mut verbatim = verbatim_prefix;
        if self.peek(0) == b'@' {
            verbatim = true;
            self.pos += 1;
        }
        if self.peek(0) != b'"' {
            return self.invalid_character();
        }
        self.scan_string_prefixed(dollars, verbatim)
    }

    fn count_run(&self, byte: u8) -> usize {
        let mut count = 0;
        while self.peek(count) == byte {
            count += 1;
        }
        count
    }

    /// Scan the body of a regular or verbatim string after the opening quote.
    fn scan_quoted_body(&mut self, interpolated: bool, verbatim: bool) {
        let start = self.token_start;
        while self.pos < self.end {
            match self.bytes[self.pos] {
                b'\\' if !verbatim => self.pos += 2,
                b'"' => {
                    if verbatim && self.peek(1) == b'"' {
                        self.pos += 2;
                        continue;
                    }
                    self.pos += 1;
                    return;
                }
                b'{' if interpolated => {
                    if self.peek(1) == b'{' {
                        self.pos += 2;
                    } else {
                        self.pos += 1;
                        self.scan_interpolation_hole(1);
                    }
                }
                b'\n' | b'\r' if !verbatim => break,
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(self.end);
        self.error(
            start,
            self.pos - start,
            "Unterminated string literal.",
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        );
    }

    /// Scan a raw string literal (`"""..."""`) whose delimiter is `quotes` long.
    fn scan_raw_string(&mut self, quotes: usize, dollars: usize) {
        let start = self.token_start;
        self.pos += quotes;
        while self.pos < self.end {
            match self.bytes[self.pos] {
                b'"' => {
                    let run = self.count_run(b'"');
                    self.pos += run;
                    if run >= quotes {
                        return;
                    }
                }
                b'{' if dollars > 0 => {
                    let run = self.count_run(b'{');
                    if run >= dollars {
                        // Extra braces beyond the delimiter are literal content
                        self.pos += run;
                        self.scan_interpolation_hole(dollars);
                    } else {
                        self.pos += run;
                    }
                }
                _ => self.pos += 1,
            }
        }
        self.error(
            start,
            self.end - start,
            "Unterminated string literal.",
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        );
    }

    /// Scan an interpolation hole; `self.pos` is just past the opening brace(s).
    /// Records the hole content span and leaves `self.pos` after the closing brace(s).
    fn scan_interpolation_hole(&mut self, close_braces: usize) {
        let content_start = self.pos;
        let mut depth = 0usize;
        while self.pos < self.end {
            match self.bytes[self.pos] {
                b'(' | b'[' | b'{' => {
                    depth += 1;
                    self.pos += 1;
                }
                b')' | b']' => {
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                }
                b'}' if depth > 0 => {
                    depth -= 1;
                    self.pos += 1;
                }
                b'}' => {
                    self.holes
                        .push(Span::new(content_start as u32, self.pos as u32));
                    let run = self.count_run(b'}').min(close_braces);
                    self.pos += run.max(1);
                    return;
                }
                b'"' | b'\'' | b'@' | b'$' => {
                    // Nested literal inside the hole; scan it as its own token
                    let saved_start = self.token_start;
                    let saved_holes = std::mem::take(&mut self.holes);
                    self.token_start = self.pos;
                    match self.bytes[self.pos] {
                        b'"' => {
                            self.scan_string_prefixed(0, false);
                        }
                        b'\'' => {
                            self.scan_char();
                        }
                        b'@' if self.peek(1) == b'"' => {
                            self.pos += 1;
                            self.scan_string_prefixed(0, true);
                        }
                        b'@' if self.peek(1) == b'$' => {
                            self.pos += 1;
                            self.scan_dollar_string(true);
                        }
                        b'$' if matches!(self.peek(1), b'"' | b'$' | b'@') => {
                            self.scan_dollar_string(false);
                        }
                        _ => self.pos += 1,
                    }
                    self.holes = saved_holes;
                    self.token_start = saved_start;
                }
                _ => self.pos += 1,
            }
        }
    }
}

#[inline]
fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

#[inline]
fn is_identifier_part(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Scan a whole text into tokens. The last token is always `EndOfFileToken`.
pub fn tokenize(text: &str) -> (Vec<Token>, Vec<ScannerDiagnostic>) {
    tokenize_range(text, 0, text.len())
}

/// Scan `text[start..end]` into tokens with absolute offsets.
pub fn tokenize_range(text: &str, start: usize, end: usize) -> (Vec<Token>, Vec<ScannerDiagnostic>) {
    let mut scanner = ScannerState::with_range(text, start, end);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        let holes = if kind == SyntaxKind::InterpolatedStringLiteral {
            scanner.take_holes()
        } else {
            Vec::new()
        };
        tokens.push(Token {
            kind,
            start: scanner.token_pos() as u32,
            end: scanner.token_end() as u32,
            holes,
        });
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
    }
    (tokens, scanner.into_diagnostics())
}
