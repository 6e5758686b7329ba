//! Diagnostic types and message lookup.
//!
//! Every diagnostic the workspace can produce is described by a
//! `DiagnosticMessage` in `DIAGNOSTIC_MESSAGES`: the analyzer rules
//! (`TPA0001`, `TPA0002`), syntax errors (`TPA1xxx`) and host errors
//! (`TPA9xxx`).

use serde::Serialize;
use std::fmt;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category (severity).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Hidden = 0,
    Info = 1,
    Warning = 2,
    Error = 3,
}

impl DiagnosticCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Hidden => "hidden",
            DiagnosticCategory::Info => "info",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
        }
    }

    /// Parse a severity name as used in configuration files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hidden" | "silent" => Some(DiagnosticCategory::Hidden),
            "info" | "suggestion" | "message" => Some(DiagnosticCategory::Info),
            "warning" | "warn" => Some(DiagnosticCategory::Warning),
            "error" => Some(DiagnosticCategory::Error),
            _ => None,
        }
    }
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub title: &'static str,
    pub message: &'static str,
}

/// A reported diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// The raw message arguments, in template order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

impl Diagnostic {
    /// Create a diagnostic from a registered code, formatting its template with `args`.
    ///
    /// Unknown codes produce an error diagnostic whose text is the joined arguments.
    #[must_use]
    pub fn from_code(file: String, start: u32, length: u32, code: u32, args: &[&str]) -> Self {
        let (category, message_text) = match get_diagnostic_message(code) {
            Some(message) => (message.category, format_message(message.message, args)),
            None => (DiagnosticCategory::Error, args.join(" ")),
        };
        Self {
            file,
            start,
            length,
            message_text,
            category,
            code,
            arguments: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Create a new error diagnostic with a preformatted message.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            arguments: Vec::new(),
        }
    }

    /// Override the category (used for configured severities).
    #[must_use]
    pub fn with_category(mut self, category: DiagnosticCategory) -> Self {
        self.category = category;
        self
    }

    /// The display form of the code, e.g. `TPA0002`.
    pub fn code_string(&self) -> String {
        format_code(self.code)
    }
}

/// Render a numeric code the way descriptors are named (`TPA0001`).
#[must_use]
pub fn format_code(code: u32) -> String {
    format!("TPA{code:04}")
}

/// Parse a rule identifier (`TPA0001`, `tpa1`, `1`) back to its numeric code.
#[must_use]
pub fn parse_code(id: &str) -> Option<u32> {
    let trimmed = id.trim();
    let digits = trimmed
        .strip_prefix("TPA")
        .or_else(|| trimmed.strip_prefix("tpa"))
        .unwrap_or(trimmed);
    digits.parse().ok()
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the default category for a diagnostic code.
#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}

// =============================================================================
// Message Data
// =============================================================================

pub mod diagnostic_codes {
    pub const USE_OF_STATIC_TIME: u32 = 1;
    pub const USE_OF_STATIC_TIME_WITH_TIME_PROVIDER_IN_SCOPE: u32 = 2;
    /// Registered for rule configuration; no analysis reports it yet.
    pub const PASS_TIME_PROVIDER: u32 = 3;

    pub const UNEXPECTED_TOKEN: u32 = 1001;
    pub const TOKEN_EXPECTED: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const EXPRESSION_EXPECTED: u32 = 1004;
    pub const TYPE_EXPECTED: u32 = 1005;
    pub const DECLARATION_EXPECTED: u32 = 1006;
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1010;
    pub const UNTERMINATED_COMMENT: u32 = 1011;
    pub const INVALID_CHARACTER: u32 = 1012;

    pub const CANNOT_READ_FILE: u32 = 9001;
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::USE_OF_STATIC_TIME,
        category: DiagnosticCategory::Info,
        title: "Use of static time",
        message: "'{0}' reads the system clock directly; consider using TimeProvider.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::USE_OF_STATIC_TIME_WITH_TIME_PROVIDER_IN_SCOPE,
        category: DiagnosticCategory::Warning,
        title: "Use of static time with TimeProvider in scope",
        message: "'{1}' reads the system clock directly while TimeProvider '{0}' is in scope.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::PASS_TIME_PROVIDER,
        category: DiagnosticCategory::Warning,
        title: "Pass TimeProvider",
        message: "'{0}' accepts a TimeProvider; pass the one in scope.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNEXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        title: "Unexpected token",
        message: "Unexpected token '{0}'.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::TOKEN_EXPECTED,
        category: DiagnosticCategory::Error,
        title: "Token expected",
        message: "'{0}' expected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::IDENTIFIER_EXPECTED,
        category: DiagnosticCategory::Error,
        title: "Identifier expected",
        message: "Identifier expected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPRESSION_EXPECTED,
        category: DiagnosticCategory::Error,
        title: "Expression expected",
        message: "Expression expected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_EXPECTED,
        category: DiagnosticCategory::Error,
        title: "Type expected",
        message: "Type expected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::DECLARATION_EXPECTED,
        category: DiagnosticCategory::Error,
        title: "Declaration expected",
        message: "Declaration expected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        title: "Unterminated string literal",
        message: "Unterminated string literal.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_COMMENT,
        category: DiagnosticCategory::Error,
        title: "Unterminated comment",
        message: "'*/' expected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        title: "Invalid character",
        message: "Invalid character.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_READ_FILE,
        category: DiagnosticCategory::Error,
        title: "Cannot read file",
        message: "Cannot read file '{0}': {1}.",
    },
];
