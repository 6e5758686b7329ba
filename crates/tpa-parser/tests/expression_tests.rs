//! Tests for expression and pattern parsing.
use crate::parser::node::ModifierFlags;
use crate::parser::{NodeIndex, ParserState, syntax_kind_ext};
use tpa_scanner::SyntaxKind;

/// Parses `x = <expr>;` as a top-level statement and returns the right side.
fn parse_expr(expr: &str) -> (ParserState, NodeIndex) {
    let source = format!("x = {expr};");
    let mut parser = ParserState::new("test.cs".to_string(), source);
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics for `{expr}`: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    let assignment = arena
        .descendants(root)
        .find(|&node| arena.kind(node) == Some(syntax_kind_ext::ASSIGNMENT_EXPRESSION))
        .expect("assignment");
    let right = arena
        .get_binary_expr(arena.get(assignment).unwrap())
        .unwrap()
        .right;
    (parser, right)
}

fn kind_of(parser: &ParserState, node: NodeIndex) -> u16 {
    parser.get_arena().kind(node).unwrap()
}

fn text_of<'a>(parser: &'a ParserState, node: NodeIndex) -> &'a str {
    parser.get_arena().node_text(node, parser.source_text())
}

#[test]
fn member_access_on_type_name() {
    let (parser, expr) = parse_expr("DateTime.Now");
    let arena = parser.get_arena();
    assert_eq!(kind_of(&parser, expr), syntax_kind_ext::MEMBER_ACCESS_EXPRESSION);
    let access = arena.get_member_access(arena.get(expr).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(access.name), Some("Now"));
    assert_eq!(arena.identifier_text(access.expression), Some("DateTime"));
    assert_eq!(text_of(&parser, expr), "DateTime.Now");
}

#[test]
fn chained_invocations() {
    let (parser, expr) = parse_expr("DateTime.Now.AddDays(1).ToString(\"O\")");
    let arena = parser.get_arena();
    assert_eq!(kind_of(&parser, expr), syntax_kind_ext::INVOCATION_EXPRESSION);
    let call = arena.get_call_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(call.arguments.len(), 1);
    assert_eq!(
        text_of(&parser, call.expression),
        "DateTime.Now.AddDays(1).ToString"
    );
}

#[test]
fn binary_precedence() {
    let (parser, expr) = parse_expr("a + b * c");
    let arena = parser.get_arena();
    let add = arena.get_binary_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(add.operator_token, SyntaxKind::PlusToken);
    assert_eq!(kind_of(&parser, add.right), syntax_kind_ext::BINARY_EXPRESSION);
    assert_eq!(text_of(&parser, add.right), "b * c");
}

#[test]
fn shift_right_joins_greater_than_tokens() {
    let (parser, expr) = parse_expr("a >> 2");
    let arena = parser.get_arena();
    let shift = arena.get_binary_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(shift.operator_token, SyntaxKind::GreaterThanGreaterThanToken);
}

#[test]
fn nested_generic_creation() {
    let (parser, expr) = parse_expr("new List<List<int>>()");
    let arena = parser.get_arena();
    assert_eq!(kind_of(&parser, expr), syntax_kind_ext::OBJECT_CREATION_EXPRESSION);
    let creation = arena.get_object_creation(arena.get(expr).unwrap()).unwrap();
    assert_eq!(kind_of(&parser, creation.type_node), syntax_kind_ext::GENERIC_NAME);
    assert_eq!(text_of(&parser, creation.type_node), "List<List<int>>");
}

#[test]
fn generic_invocation_versus_comparison() {
    let (parser, expr) = parse_expr("F<int>(x)");
    let arena = parser.get_arena();
    let call = arena.get_call_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(kind_of(&parser, call.expression), syntax_kind_ext::GENERIC_NAME);

    let (parser, expr) = parse_expr("a < b && c > d");
    let arena = parser.get_arena();
    let and = arena.get_binary_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(and.operator_token, SyntaxKind::AmpersandAmpersandToken);
    assert_eq!(kind_of(&parser, and.left), syntax_kind_ext::BINARY_EXPRESSION);
}

#[test]
fn cast_disambiguation() {
    let (parser, expr) = parse_expr("(DateTime)value");
    assert_eq!(kind_of(&parser, expr), syntax_kind_ext::CAST_EXPRESSION);

    let (parser, expr) = parse_expr("(a) + b");
    assert_eq!(kind_of(&parser, expr), syntax_kind_ext::BINARY_EXPRESSION);

    let (parser, expr) = parse_expr("(int)-1");
    assert_eq!(kind_of(&parser, expr), syntax_kind_ext::CAST_EXPRESSION);
}

#[test]
fn lambdas() {
    let (parser, expr) = parse_expr("x => x.Now");
    let arena = parser.get_arena();
    assert_eq!(kind_of(&parser, expr), syntax_kind_ext::LAMBDA_EXPRESSION);
    let lambda = arena.get_lambda(arena.get(expr).unwrap()).unwrap();
    assert_eq!(lambda.parameters.len(), 1);
    assert_eq!(kind_of(&parser, lambda.body), syntax_kind_ext::MEMBER_ACCESS_EXPRESSION);

    let (parser, expr) = parse_expr("async (a, b) => { }");
    let arena = parser.get_arena();
    let lambda = arena.get_lambda(arena.get(expr).unwrap()).unwrap();
    assert!(lambda.modifiers.contains(ModifierFlags::ASYNC));
    assert_eq!(lambda.parameters.len(), 2);
    assert_eq!(kind_of(&parser, lambda.body), syntax_kind_ext::BLOCK);
}

#[test]
fn coalesce_binds_tighter_than_conditional() {
    let (parser, expr) = parse_expr("a ?? b ? c : d");
    let arena = parser.get_arena();
    let conditional = arena.get_conditional_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(text_of(&parser, conditional.condition), "a ?? b");
}

#[test]
fn null_conditional_access() {
    let (parser, expr) = parse_expr("a?.b?[0]");
    let arena = parser.get_arena();
    assert_eq!(kind_of(&parser, expr), syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION);
    let element = arena.get_element_access(arena.get(expr).unwrap()).unwrap();
    assert!(element.question_dot);
    let member = arena
        .get_member_access(arena.get(element.expression).unwrap())
        .unwrap();
    assert!(member.question_dot);
}

#[test]
fn interpolated_string_holes_are_parsed() {
    let (parser, expr) = parse_expr("$\"Now: {DateTime.Now:O} and {count}\"");
    let arena = parser.get_arena();
    assert_eq!(
        kind_of(&parser, expr),
        syntax_kind_ext::INTERPOLATED_STRING_EXPRESSION
    );
    let string = arena.get_interpolated_string(arena.get(expr).unwrap()).unwrap();
    assert_eq!(string.holes.len(), 2);
    assert_eq!(text_of(&parser, string.holes.nodes[0]), "DateTime.Now");
    assert_eq!(
        kind_of(&parser, string.holes.nodes[0]),
        syntax_kind_ext::MEMBER_ACCESS_EXPRESSION
    );
    // Hole nodes hang off the string
    assert_eq!(arena.parent(string.holes.nodes[0]), expr);
}

#[test]
fn object_and_array_creation() {
    let (parser, expr) = parse_expr("new Clock { Start = now, Name = \"x\" }");
    let arena = parser.get_arena();
    let creation = arena.get_object_creation(arena.get(expr).unwrap()).unwrap();
    let initializer = arena.get_initializer(arena.get(creation.initializer).unwrap()).unwrap();
    assert_eq!(initializer.elements.len(), 2);

    let (parser, expr) = parse_expr("new int[] { 1, 2 }");
    assert_eq!(kind_of(&parser, expr), syntax_kind_ext::ARRAY_CREATION_EXPRESSION);

    let (parser, expr) = parse_expr("new[] { 1 }");
    assert_eq!(
        kind_of(&parser, expr),
        syntax_kind_ext::IMPLICIT_ARRAY_CREATION_EXPRESSION
    );
}

#[test]
fn is_patterns() {
    let (parser, expr) = parse_expr("o is DateTime d");
    let arena = parser.get_arena();
    let is = arena.get_binary_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(kind_of(&parser, is.right), syntax_kind_ext::DECLARATION_PATTERN);
    let pattern = arena.get_pattern(arena.get(is.right).unwrap()).unwrap();
    assert_eq!(text_of(&parser, pattern.type_node), "DateTime");

    let (parser, expr) = parse_expr("o is not null");
    let arena = parser.get_arena();
    let is = arena.get_binary_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(kind_of(&parser, is.right), syntax_kind_ext::UNARY_PATTERN);

    let (parser, expr) = parse_expr("o is { Length: > 0 }");
    let arena = parser.get_arena();
    let is = arena.get_binary_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(kind_of(&parser, is.right), syntax_kind_ext::RECURSIVE_PATTERN);
    let recursive = arena.get_pattern(arena.get(is.right).unwrap()).unwrap();
    assert_eq!(recursive.subpatterns.len(), 1);
}

#[test]
fn out_var_argument() {
    let (parser, expr) = parse_expr("int.TryParse(s, out var n)");
    let arena = parser.get_arena();
    let call = arena.get_call_expr(arena.get(expr).unwrap()).unwrap();
    assert_eq!(call.arguments.len(), 2);
    let argument = arena.get_argument(arena.get(call.arguments.nodes[1]).unwrap()).unwrap();
    assert_eq!(argument.ref_kind, Some(SyntaxKind::OutKeyword));
    assert_eq!(
        kind_of(&parser, argument.expression),
        syntax_kind_ext::DECLARATION_EXPRESSION
    );
}

#[test]
fn with_and_tuple_expressions() {
    let (parser, expr) = parse_expr("p with { X = 1 }");
    assert_eq!(kind_of(&parser, expr), syntax_kind_ext::WITH_EXPRESSION);

    let (parser, expr) = parse_expr("(a, b)");
    let arena = parser.get_arena();
    assert_eq!(kind_of(&parser, expr), syntax_kind_ext::TUPLE_EXPRESSION);
    assert_eq!(
        arena.get_initializer(arena.get(expr).unwrap()).unwrap().elements.len(),
        2
    );
}
