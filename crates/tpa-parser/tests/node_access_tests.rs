//! Tests for arena traversal: parents, ancestors, descendants and text.
use crate::parser::{NodeIndex, ParserState, is_method_like, syntax_kind_ext};
use tpa_scanner::SyntaxKind;

fn parse_source(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.cs".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn first_of_kind(parser: &ParserState, root: NodeIndex, kind: u16) -> NodeIndex {
    let arena = parser.get_arena();
    arena
        .descendants(root)
        .find(|&node| arena.kind(node) == Some(kind))
        .expect("node of requested kind")
}

#[test]
fn ancestors_walk_up_to_the_source_file() {
    let (parser, root) = parse_source("class C { void M() { var t = DateTime.Now; } }");
    let arena = parser.get_arena();
    let access = first_of_kind(&parser, root, syntax_kind_ext::MEMBER_ACCESS_EXPRESSION);
    let kinds: Vec<u16> = arena
        .ancestors(access)
        .filter_map(|node| arena.kind(node))
        .collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::VARIABLE_DECLARATOR,
            syntax_kind_ext::VARIABLE_DECLARATION,
            syntax_kind_ext::LOCAL_DECLARATION_STATEMENT,
            syntax_kind_ext::BLOCK,
            syntax_kind_ext::METHOD_DECLARATION,
            syntax_kind_ext::CLASS_DECLARATION,
            syntax_kind_ext::SOURCE_FILE,
        ]
    );
    assert!(arena.parent(root).is_none());
}

#[test]
fn find_ancestor_locates_enclosing_method() {
    let (parser, root) = parse_source("class C { int M() { return DateTime.Now.Day; } }");
    let arena = parser.get_arena();
    let access = first_of_kind(&parser, root, syntax_kind_ext::MEMBER_ACCESS_EXPRESSION);
    let method = arena.find_ancestor(access, is_method_like);
    assert_eq!(arena.kind(method), Some(syntax_kind_ext::METHOD_DECLARATION));

    let (parser, root) = parse_source("class C { int P => DateTime.Now.Day; }");
    let arena = parser.get_arena();
    let access = first_of_kind(&parser, root, syntax_kind_ext::MEMBER_ACCESS_EXPRESSION);
    assert!(arena.find_ancestor(access, is_method_like).is_none());
}

#[test]
fn descendants_are_in_source_order() {
    let (parser, root) = parse_source("class C { int a; int b; }");
    let arena = parser.get_arena();
    let names: Vec<&str> = arena
        .descendants(root)
        .filter_map(|node| arena.identifier_text(node))
        .collect();
    assert_eq!(names, vec!["C", "a", "b"]);
}

#[test]
fn do_statement_children_keep_source_order() {
    let (parser, root) = parse_source("class C { void M() { do { } while (done); } }");
    let arena = parser.get_arena();
    let do_loop = first_of_kind(&parser, root, syntax_kind_ext::DO_STATEMENT);
    let kinds: Vec<u16> = arena
        .children(do_loop)
        .into_iter()
        .filter_map(|node| arena.kind(node))
        .collect();
    assert_eq!(kinds, vec![syntax_kind_ext::BLOCK, SyntaxKind::Identifier as u16]);
}

#[test]
fn verbatim_identifiers_drop_the_at_sign() {
    let (parser, root) = parse_source("class C { int @class; }");
    let arena = parser.get_arena();
    let names: Vec<&str> = arena
        .descendants(root)
        .filter_map(|node| arena.identifier_text(node))
        .collect();
    assert_eq!(names, vec!["C", "class"]);
}

#[test]
fn node_text_and_kind_names() {
    let source = "class C { object M() => DateTime.UtcNow; }";
    let (parser, root) = parse_source(source);
    let arena = parser.get_arena();
    let access = first_of_kind(&parser, root, syntax_kind_ext::MEMBER_ACCESS_EXPRESSION);
    assert_eq!(arena.node_text(access, parser.source_text()), "DateTime.UtcNow");
    assert_eq!(
        syntax_kind_ext::kind_name(syntax_kind_ext::MEMBER_ACCESS_EXPRESSION),
        "MemberAccessExpression"
    );
    let span = arena.span(access).unwrap();
    assert_eq!(span.start as usize, source.find("DateTime").unwrap());
}
