use crate::{SyntaxKind, Token, tokenize, tokenize_range};
use tpa_common::diagnostic_codes;

fn kinds(text: &str) -> Vec<SyntaxKind> {
    tokenize(text).0.into_iter().map(|t| t.kind).collect()
}

fn texts<'a>(text: &'a str, tokens: &[Token]) -> Vec<&'a str> {
    tokens
        .iter()
        .map(|t| &text[t.start as usize..t.end as usize])
        .collect()
}

#[test]
fn scans_member_access_with_keywords_and_identifiers() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("var now = System.DateTime.Now;"),
        vec![
            Identifier,
            Identifier,
            EqualsToken,
            Identifier,
            DotToken,
            Identifier,
            DotToken,
            Identifier,
            SemicolonToken,
            EndOfFileToken
        ]
    );
    assert_eq!(
        kinds("public static class"),
        vec![PublicKeyword, StaticKeyword, ClassKeyword, EndOfFileToken]
    );
}

#[test]
fn greater_than_is_never_merged_into_shift() {
    use SyntaxKind::*;
    assert_eq!(
        kinds("List<List<int>> x"),
        vec![
            Identifier,
            LessThanToken,
            Identifier,
            LessThanToken,
            IntKeyword,
            GreaterThanToken,
            GreaterThanToken,
            Identifier,
            EndOfFileToken
        ]
    );
    assert_eq!(kinds("a >= b")[1], GreaterThanEqualsToken);
}

#[test]
fn trivia_is_skipped() {
    let text = "// leading\n#if DEBUG\n/* block\n comment */ a\n#endif\n b";
    let (tokens, diags) = tokenize(text);
    assert!(diags.is_empty());
    assert_eq!(texts(text, &tokens), vec!["a", "b", ""]);
}

#[test]
fn hash_in_the_middle_of_a_line_is_not_a_directive() {
    let (tokens, diags) = tokenize("a # b");
    assert_eq!(tokens[1].kind, SyntaxKind::Unknown);
    assert_eq!(diags[0].code, diagnostic_codes::INVALID_CHARACTER);
}

#[test]
fn numeric_literal_does_not_swallow_member_access() {
    use SyntaxKind::*;
    let text = "1.ToString() 1.5e-3f 0xFF_FFu 10UL";
    let (tokens, _) = tokenize(text);
    assert_eq!(
        texts(text, &tokens),
        vec!["1", ".", "ToString", "(", ")", "1.5e-3f", "0xFF_FFu", "10UL", ""]
    );
    assert_eq!(tokens[0].kind, NumericLiteral);
}

#[test]
fn verbatim_and_raw_strings() {
    let text = r#"@"a ""quoted"" \ path" """raw "" text""" "esc\"aped""#;
    let (tokens, diags) = tokenize(text);
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(
        texts(text, &tokens),
        vec![
            r#"@"a ""quoted"" \ path""#,
            r#""""raw "" text""""#,
            r#""esc\"aped""#,
            ""
        ]
    );
    assert!(
        tokens[..3]
            .iter()
            .all(|t| t.kind == SyntaxKind::StringLiteral)
    );
}

#[test]
fn interpolated_string_records_holes() {
    let text = r#"$"at {DateTime.Now:O} and {{literal}} {f(x, "}")}""#;
    let (tokens, diags) = tokenize(text);
    assert!(diags.is_empty(), "{diags:?}");
    assert_eq!(tokens[0].kind, SyntaxKind::InterpolatedStringLiteral);
    assert_eq!(tokens[0].end as usize, text.len());
    let holes: Vec<&str> = tokens[0].holes.iter().map(|h| h.text(text)).collect();
    assert_eq!(holes, vec!["DateTime.Now:O", r#"f(x, "}")"#]);
}

#[test]
fn raw_interpolated_string_uses_dollar_count_for_holes() {
    let text = r#"$$"""{literal} {{value}}""""#;
    let (tokens, _) = tokenize(text);
    assert_eq!(tokens[0].kind, SyntaxKind::InterpolatedStringLiteral);
    let holes: Vec<&str> = tokens[0].holes.iter().map(|h| h.text(text)).collect();
    assert_eq!(holes, vec!["value"]);
}

#[test]
fn verbatim_identifier_is_not_a_keyword() {
    let text = "@class";
    let (tokens, _) = tokenize(text);
    assert_eq!(tokens[0].kind, SyntaxKind::Identifier);
    assert_eq!(texts(text, &tokens)[0], "@class");
}

#[test]
fn unterminated_string_is_reported() {
    let (tokens, diags) = tokenize("\"abc\nx");
    assert_eq!(tokens[0].kind, SyntaxKind::StringLiteral);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, diagnostic_codes::UNTERMINATED_STRING_LITERAL);
    assert_eq!(tokens[1].kind, SyntaxKind::Identifier);
}

#[test]
fn unterminated_block_comment_is_reported() {
    let (tokens, diags) = tokenize("a /* never closed");
    assert_eq!(tokens.len(), 2);
    assert_eq!(diags[0].code, diagnostic_codes::UNTERMINATED_COMMENT);
}

#[test]
fn tokenize_range_keeps_absolute_offsets() {
    let text = "xxxx DateTime.Now yyyy";
    let (tokens, _) = tokenize_range(text, 5, 17);
    assert_eq!(texts(text, &tokens), vec!["DateTime", ".", "Now", ""]);
    assert_eq!(tokens[0].start, 5);
    assert_eq!(tokens.last().map(|t| t.start), Some(17));
}

#[test]
fn null_conditional_and_conditional_with_decimal() {
    use SyntaxKind::*;
    assert_eq!(kinds("a?.b")[1], QuestionDotToken);
    assert_eq!(kinds("a?.5:b")[1], QuestionToken);
    assert_eq!(kinds("a ??= b")[1], QuestionQuestionEqualsToken);
}

#[test]
fn char_literals_handle_escapes() {
    let text = r"'\'' 'x'";
    let (tokens, diags) = tokenize(text);
    assert!(diags.is_empty());
    assert_eq!(texts(text, &tokens), vec![r"'\''", "'x'", ""]);
}
