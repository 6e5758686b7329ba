//! Token kinds produced by the scanner.
//!
//! Reserved C# keywords get their own kind. Contextual keywords (`var`,
//! `record`, `get`, `set`, `init`, `async`, `await`, `partial`, `where`,
//! `when`, `yield`, `global`, ...) are scanned as `Identifier` and recognized
//! by the parser from their text.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,

    // Literals and names
    Identifier,
    NumericLiteral,
    StringLiteral,
    InterpolatedStringLiteral,
    CharacterLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    SemicolonToken,
    CommaToken,
    DotToken,
    DotDotToken,
    ColonToken,
    ColonColonToken,
    QuestionToken,
    QuestionQuestionToken,
    QuestionQuestionEqualsToken,
    QuestionDotToken,
    EqualsGreaterThanToken,
    EqualsToken,
    EqualsEqualsToken,
    ExclamationToken,
    ExclamationEqualsToken,
    LessThanToken,
    LessThanEqualsToken,
    LessThanLessThanToken,
    LessThanLessThanEqualsToken,
    /// `>` is always scanned alone; the parser joins adjacent `>` tokens into
    /// shift operators so that `List<List<int>>` closes two type argument lists.
    GreaterThanToken,
    GreaterThanEqualsToken,
    /// Produced by the parser when it joins adjacent `>` tokens.
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanEqualsToken,
    PlusToken,
    PlusPlusToken,
    PlusEqualsToken,
    MinusToken,
    MinusMinusToken,
    MinusEqualsToken,
    MinusGreaterThanToken,
    AsteriskToken,
    AsteriskEqualsToken,
    SlashToken,
    SlashEqualsToken,
    PercentToken,
    PercentEqualsToken,
    AmpersandToken,
    AmpersandAmpersandToken,
    AmpersandEqualsToken,
    BarToken,
    BarBarToken,
    BarEqualsToken,
    CaretToken,
    CaretEqualsToken,
    TildeToken,

    // Reserved keywords
    AbstractKeyword,
    AsKeyword,
    BaseKeyword,
    BoolKeyword,
    BreakKeyword,
    ByteKeyword,
    CaseKeyword,
    CatchKeyword,
    CharKeyword,
    CheckedKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DecimalKeyword,
    DefaultKeyword,
    DelegateKeyword,
    DoKeyword,
    DoubleKeyword,
    ElseKeyword,
    EnumKeyword,
    EventKeyword,
    ExplicitKeyword,
    ExternKeyword,
    FalseKeyword,
    FinallyKeyword,
    FixedKeyword,
    FloatKeyword,
    ForKeyword,
    ForEachKeyword,
    GotoKeyword,
    IfKeyword,
    ImplicitKeyword,
    InKeyword,
    IntKeyword,
    InterfaceKeyword,
    InternalKeyword,
    IsKeyword,
    LockKeyword,
    LongKeyword,
    NamespaceKeyword,
    NewKeyword,
    NullKeyword,
    ObjectKeyword,
    OperatorKeyword,
    OutKeyword,
    OverrideKeyword,
    ParamsKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadOnlyKeyword,
    RefKeyword,
    ReturnKeyword,
    SByteKeyword,
    SealedKeyword,
    ShortKeyword,
    SizeOfKeyword,
    StackAllocKeyword,
    StaticKeyword,
    StringKeyword,
    StructKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    UIntKeyword,
    ULongKeyword,
    UncheckedKeyword,
    UnsafeKeyword,
    UShortKeyword,
    UsingKeyword,
    VirtualKeyword,
    VoidKeyword,
    VolatileKeyword,
    WhileKeyword,
}

impl SyntaxKind {
    #[inline]
    pub const fn is_keyword(self) -> bool {
        (self as u16) >= (SyntaxKind::AbstractKeyword as u16)
    }

    /// Keywords naming built-in types (`int`, `string`, `object`, ...).
    pub const fn is_predefined_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::BoolKeyword
                | SyntaxKind::ByteKeyword
                | SyntaxKind::SByteKeyword
                | SyntaxKind::ShortKeyword
                | SyntaxKind::UShortKeyword
                | SyntaxKind::IntKeyword
                | SyntaxKind::UIntKeyword
                | SyntaxKind::LongKeyword
                | SyntaxKind::ULongKeyword
                | SyntaxKind::FloatKeyword
                | SyntaxKind::DoubleKeyword
                | SyntaxKind::DecimalKeyword
                | SyntaxKind::CharKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::VoidKeyword
        )
    }

    /// Declaration modifiers accepted in front of types and members.
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::InternalKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::ReadOnlyKeyword
                | SyntaxKind::ConstKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::SealedKeyword
                | SyntaxKind::VirtualKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::ExternKeyword
                | SyntaxKind::UnsafeKeyword
                | SyntaxKind::VolatileKeyword
                | SyntaxKind::NewKeyword
                | SyntaxKind::FixedKeyword
        )
    }

    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::NumericLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::InterpolatedStringLiteral
                | SyntaxKind::CharacterLiteral
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
        )
    }

    /// Assignment operators (`=`, `+=`, `??=`, ...).
    pub const fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::EqualsToken
                | SyntaxKind::PlusEqualsToken
                | SyntaxKind::MinusEqualsToken
                | SyntaxKind::AsteriskEqualsToken
                | SyntaxKind::SlashEqualsToken
                | SyntaxKind::PercentEqualsToken
                | SyntaxKind::AmpersandEqualsToken
                | SyntaxKind::BarEqualsToken
                | SyntaxKind::CaretEqualsToken
                | SyntaxKind::LessThanLessThanEqualsToken
                | SyntaxKind::GreaterThanGreaterThanEqualsToken
                | SyntaxKind::QuestionQuestionEqualsToken
        )
    }

    /// Source text of a punctuation or keyword token, for diagnostics.
    pub fn text(self) -> &'static str {
        use SyntaxKind::*;
        match self {
            OpenBraceToken => "{",
            CloseBraceToken => "}",
            OpenParenToken => "(",
            CloseParenToken => ")",
            OpenBracketToken => "[",
            CloseBracketToken => "]",
            SemicolonToken => ";",
            CommaToken => ",",
            DotToken => ".",
            DotDotToken => "..",
            ColonToken => ":",
            ColonColonToken => "::",
            QuestionToken => "?",
            QuestionQuestionToken => "??",
            QuestionQuestionEqualsToken => "??=",
            QuestionDotToken => "?.",
            EqualsGreaterThanToken => "=>",
            EqualsToken => "=",
            EqualsEqualsToken => "==",
            ExclamationToken => "!",
            ExclamationEqualsToken => "!=",
            LessThanToken => "<",
            LessThanEqualsToken => "<=",
            LessThanLessThanToken => "<<",
            LessThanLessThanEqualsToken => "<<=",
            GreaterThanToken => ">",
            GreaterThanEqualsToken => ">=",
            GreaterThanGreaterThanToken => ">>",
            GreaterThanGreaterThanEqualsToken => ">>=",
            PlusToken => "+",
            PlusPlusToken => "++",
            PlusEqualsToken => "+=",
            MinusToken => "-",
            MinusMinusToken => "--",
            MinusEqualsToken => "-=",
            MinusGreaterThanToken => "->",
            AsteriskToken => "*",
            AsteriskEqualsToken => "*=",
            SlashToken => "/",
            SlashEqualsToken => "/=",
            PercentToken => "%",
            PercentEqualsToken => "%=",
            AmpersandToken => "&",
            AmpersandAmpersandToken => "&&",
            AmpersandEqualsToken => "&=",
            BarToken => "|",
            BarBarToken => "||",
            BarEqualsToken => "|=",
            CaretToken => "^",
            CaretEqualsToken => "^=",
            TildeToken => "~",
            EndOfFileToken => "end of file",
            Identifier => "identifier",
            NumericLiteral | StringLiteral | InterpolatedStringLiteral | CharacterLiteral => {
                "literal"
            }
            Unknown => "unknown",
            keyword => KEYWORDS
                .iter()
                .find(|(_, kind)| *kind == keyword)
                .map_or("keyword", |(text, _)| *text),
        }
    }
}

static KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("abstract", SyntaxKind::AbstractKeyword),
    ("as", SyntaxKind::AsKeyword),
    ("base", SyntaxKind::BaseKeyword),
    ("bool", SyntaxKind::BoolKeyword),
    ("break", SyntaxKind::BreakKeyword),
    ("byte", SyntaxKind::ByteKeyword),
    ("case", SyntaxKind::CaseKeyword),
    ("catch", SyntaxKind::CatchKeyword),
    ("char", SyntaxKind::CharKeyword),
    ("checked", SyntaxKind::CheckedKeyword),
    ("class", SyntaxKind::ClassKeyword),
    ("const", SyntaxKind::ConstKeyword),
    ("continue", SyntaxKind::ContinueKeyword),
    ("decimal", SyntaxKind::DecimalKeyword),
    ("default", SyntaxKind::DefaultKeyword),
    ("delegate", SyntaxKind::DelegateKeyword),
    ("do", SyntaxKind::DoKeyword),
    ("double", SyntaxKind::DoubleKeyword),
    ("else", SyntaxKind::ElseKeyword),
    ("enum", SyntaxKind::EnumKeyword),
    ("event", SyntaxKind::EventKeyword),
    ("explicit", SyntaxKind::ExplicitKeyword),
    ("extern", SyntaxKind::ExternKeyword),
    ("false", SyntaxKind::FalseKeyword),
    ("finally", SyntaxKind::FinallyKeyword),
    ("fixed", SyntaxKind::FixedKeyword),
    ("float", SyntaxKind::FloatKeyword),
    ("for", SyntaxKind::ForKeyword),
    ("foreach", SyntaxKind::ForEachKeyword),
    ("goto", SyntaxKind::GotoKeyword),
    ("if", SyntaxKind::IfKeyword),
    ("implicit", SyntaxKind::ImplicitKeyword),
    ("in", SyntaxKind::InKeyword),
    ("int", SyntaxKind::IntKeyword),
    ("interface", SyntaxKind::InterfaceKeyword),
    ("internal", SyntaxKind::InternalKeyword),
    ("is", SyntaxKind::IsKeyword),
    ("lock", SyntaxKind::LockKeyword),
    ("long", SyntaxKind::LongKeyword),
    ("namespace", SyntaxKind::NamespaceKeyword),
    ("new", SyntaxKind::NewKeyword),
    ("null", SyntaxKind::NullKeyword),
    ("object", SyntaxKind::ObjectKeyword),
    ("operator", SyntaxKind::OperatorKeyword),
    ("out", SyntaxKind::OutKeyword),
    ("override", SyntaxKind::OverrideKeyword),
    ("params", SyntaxKind::ParamsKeyword),
    ("private", SyntaxKind::PrivateKeyword),
    ("protected", SyntaxKind::ProtectedKeyword),
    ("public", SyntaxKind::PublicKeyword),
    ("readonly", SyntaxKind::ReadOnlyKeyword),
    ("ref", SyntaxKind::RefKeyword),
    ("return", SyntaxKind::ReturnKeyword),
    ("sbyte", SyntaxKind::SByteKeyword),
    ("sealed", SyntaxKind::SealedKeyword),
    ("short", SyntaxKind::ShortKeyword),
    ("sizeof", SyntaxKind::SizeOfKeyword),
    ("stackalloc", SyntaxKind::StackAllocKeyword),
    ("static", SyntaxKind::StaticKeyword),
    ("string", SyntaxKind::StringKeyword),
    ("struct", SyntaxKind::StructKeyword),
    ("switch", SyntaxKind::SwitchKeyword),
    ("this", SyntaxKind::ThisKeyword),
    ("throw", SyntaxKind::ThrowKeyword),
    ("true", SyntaxKind::TrueKeyword),
    ("try", SyntaxKind::TryKeyword),
    ("typeof", SyntaxKind::TypeOfKeyword),
    ("uint", SyntaxKind::UIntKeyword),
    ("ulong", SyntaxKind::ULongKeyword),
    ("unchecked", SyntaxKind::UncheckedKeyword),
    ("unsafe", SyntaxKind::UnsafeKeyword),
    ("ushort", SyntaxKind::UShortKeyword),
    ("using", SyntaxKind::UsingKeyword),
    ("virtual", SyntaxKind::VirtualKeyword),
    ("void", SyntaxKind::VoidKeyword),
    ("volatile", SyntaxKind::VolatileKeyword),
    ("while", SyntaxKind::WhileKeyword),
];

/// Map identifier text to a reserved keyword kind.
pub fn keyword_from_text(text: &str) -> Option<SyntaxKind> {
    KEYWORDS
        .binary_search_by(|(keyword, _)| (*keyword).cmp(text))
        .ok()
        .map(|index| KEYWORDS[index].1)
}
