//! Tests for declaration and statement parsing.
use crate::parser::node::{AccessorKind, ModifierFlags};
use crate::parser::{NodeIndex, ParserState, syntax_kind_ext};

fn parse_source(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.cs".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn member_kinds(parser: &ParserState, members: &[NodeIndex]) -> Vec<u16> {
    members
        .iter()
        .map(|&member| parser.get_arena().kind(member).unwrap())
        .collect()
}

fn find_first(parser: &ParserState, root: NodeIndex, kind: u16) -> NodeIndex {
    let arena = parser.get_arena();
    arena
        .descendants(root)
        .find(|&node| arena.kind(node) == Some(kind))
        .unwrap_or_else(|| panic!("no {} node", syntax_kind_ext::kind_name(kind)))
}

#[test]
fn parse_class_members_in_block_namespace() {
    let source = r#"
namespace App
{
    public class Clock
    {
        private readonly DateTime _start = DateTime.Now;
        public DateTime Start { get; }
        public Clock(DateTime start) { _start = start; }
        public DateTime Now() => DateTime.UtcNow;
    }
}
"#;
    let (parser, root) = parse_source(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    let sf = arena.get_source_file_at(root).unwrap();
    assert_eq!(
        member_kinds(&parser, &sf.members.nodes),
        vec![syntax_kind_ext::NAMESPACE_DECLARATION]
    );

    let namespace = arena.get_namespace(arena.get(sf.members.nodes[0]).unwrap()).unwrap();
    let class = arena.get(namespace.members.nodes[0]).unwrap();
    assert_eq!(class.kind, syntax_kind_ext::CLASS_DECLARATION);
    let class_data = arena.get_type_decl(class).unwrap();
    assert_eq!(arena.identifier_text(class_data.name), Some("Clock"));
    assert!(class_data.modifiers.contains(ModifierFlags::PUBLIC));
    assert_eq!(
        member_kinds(&parser, &class_data.members.nodes),
        vec![
            syntax_kind_ext::FIELD_DECLARATION,
            syntax_kind_ext::PROPERTY_DECLARATION,
            syntax_kind_ext::CONSTRUCTOR_DECLARATION,
            syntax_kind_ext::METHOD_DECLARATION,
        ]
    );

    let field = arena.get_field(arena.get(class_data.members.nodes[0]).unwrap()).unwrap();
    assert!(field.modifiers.contains(ModifierFlags::PRIVATE | ModifierFlags::READONLY));

    let property = arena
        .get_property(arena.get(class_data.members.nodes[1]).unwrap())
        .unwrap();
    assert_eq!(property.accessors.len(), 1);
    let getter = arena.get_accessor(arena.get(property.accessors.nodes[0]).unwrap()).unwrap();
    assert_eq!(getter.keyword, AccessorKind::Get);
}

#[test]
fn parse_file_scoped_namespace_with_using_directives() {
    let source = "using System;\nusing static System.Math;\nusing Clock = System.DateTime;\nnamespace App;\nclass A { }\nclass B { }\n";
    let (parser, root) = parse_source(source);
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let sf = arena.get_source_file_at(root).unwrap();
    assert_eq!(
        member_kinds(&parser, &sf.members.nodes),
        vec![
            syntax_kind_ext::USING_DIRECTIVE,
            syntax_kind_ext::USING_DIRECTIVE,
            syntax_kind_ext::USING_DIRECTIVE,
            syntax_kind_ext::FILE_SCOPED_NAMESPACE_DECLARATION,
        ]
    );

    let static_using = arena
        .get_using_directive(arena.get(sf.members.nodes[1]).unwrap())
        .unwrap();
    assert!(static_using.is_static);
    let alias_using = arena
        .get_using_directive(arena.get(sf.members.nodes[2]).unwrap())
        .unwrap();
    assert_eq!(arena.identifier_text(alias_using.alias), Some("Clock"));

    let namespace = arena.get_namespace(arena.get(sf.members.nodes[3]).unwrap()).unwrap();
    assert_eq!(namespace.members.len(), 2);
}

#[test]
fn parse_top_level_statements() {
    let source = "using System;\nvar now = DateTime.Now;\nConsole.WriteLine(now);\n";
    let (parser, root) = parse_source(source);
    assert!(parser.get_diagnostics().is_empty());
    let sf = parser.get_arena().get_source_file_at(root).unwrap();
    assert_eq!(
        member_kinds(&parser, &sf.members.nodes),
        vec![
            syntax_kind_ext::USING_DIRECTIVE,
            syntax_kind_ext::LOCAL_DECLARATION_STATEMENT,
            syntax_kind_ext::EXPRESSION_STATEMENT,
        ]
    );
}

#[test]
fn parse_method_body_statements() {
    let source = r#"
class C
{
    void M()
    {
        int Local(int x) => x;
        for (var i = 0; i < 10; i++) { }
        foreach (var item in items) { }
        try { } catch (Exception ex) when (ex != null) { } finally { }
        using var stream = Open();
        lock (gate) { }
    }
}
"#;
    let (parser, root) = parse_source(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    let method = find_first(&parser, root, syntax_kind_ext::METHOD_DECLARATION);
    let body = arena.get_method(arena.get(method).unwrap()).unwrap().body;
    let block = arena.get_block(arena.get(body).unwrap()).unwrap();
    assert_eq!(
        member_kinds(&parser, &block.statements.nodes),
        vec![
            syntax_kind_ext::LOCAL_FUNCTION_STATEMENT,
            syntax_kind_ext::FOR_STATEMENT,
            syntax_kind_ext::FOREACH_STATEMENT,
            syntax_kind_ext::TRY_STATEMENT,
            syntax_kind_ext::LOCAL_DECLARATION_STATEMENT,
            syntax_kind_ext::LOCK_STATEMENT,
        ]
    );

    let using_local = arena
        .get_local_declaration(arena.get(block.statements.nodes[4]).unwrap())
        .unwrap();
    assert!(using_local.modifiers.contains(ModifierFlags::USING));

    let for_loop = arena.get_loop(arena.get(block.statements.nodes[1]).unwrap()).unwrap();
    assert!(for_loop.declaration.is_some());
    assert!(for_loop.condition.is_some());
    assert_eq!(for_loop.incrementors.len(), 1);

    let try_data = arena.get_try(arena.get(block.statements.nodes[3]).unwrap()).unwrap();
    assert_eq!(try_data.catches.len(), 1);
    assert!(try_data.finally_block.is_some());
    let catch = arena.get_catch_clause(arena.get(try_data.catches.nodes[0]).unwrap()).unwrap();
    assert_eq!(arena.identifier_text(catch.identifier), Some("ex"));
    assert!(catch.filter.is_some());
}

#[test]
fn parse_switch_statement_and_switch_expression() {
    let source = r#"
class C
{
    string M(int x)
    {
        switch (x)
        {
            case 1: return "one";
            case > 5 and < 10: break;
            default: return "other";
        }
        return x switch { 0 => "zero", _ => "many" };
    }
}
"#;
    let (parser, root) = parse_source(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();

    let switch = find_first(&parser, root, syntax_kind_ext::SWITCH_STATEMENT);
    let switch_data = arena.get_switch(arena.get(switch).unwrap()).unwrap();
    assert_eq!(switch_data.sections.len(), 3);
    let second = arena
        .get_switch_section(arena.get(switch_data.sections.nodes[1]).unwrap())
        .unwrap();
    let label = arena.get_case_label(arena.get(second.labels.nodes[0]).unwrap()).unwrap();
    assert_eq!(arena.kind(label.pattern), Some(syntax_kind_ext::BINARY_PATTERN));

    let switch_expr = find_first(&parser, root, syntax_kind_ext::SWITCH_EXPRESSION);
    let arms = &arena.get_switch_expr(arena.get(switch_expr).unwrap()).unwrap().arms;
    assert_eq!(arms.len(), 2);
    let last_arm = arena.get_switch_arm(arena.get(arms.nodes[1]).unwrap()).unwrap();
    assert_eq!(arena.kind(last_arm.pattern), Some(syntax_kind_ext::DISCARD_PATTERN));
}

#[test]
fn parse_generic_members_and_constraints() {
    let source = r#"
class Repo<T> where T : class
{
    public List<T> Items { get; set; } = new();
    public TResult Map<TResult>(Func<T, TResult> f) where TResult : new() => default;
    public T this[int index] => Items[index];
}
"#;
    let (parser, root) = parse_source(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    let class = find_first(&parser, root, syntax_kind_ext::CLASS_DECLARATION);
    let class_data = arena.get_type_decl(arena.get(class).unwrap()).unwrap();
    assert_eq!(class_data.type_parameters.len(), 1);
    assert_eq!(
        member_kinds(&parser, &class_data.members.nodes),
        vec![
            syntax_kind_ext::PROPERTY_DECLARATION,
            syntax_kind_ext::METHOD_DECLARATION,
            syntax_kind_ext::INDEXER_DECLARATION,
        ]
    );
    let property = arena
        .get_property(arena.get(class_data.members.nodes[0]).unwrap())
        .unwrap();
    assert_eq!(
        arena.kind(property.initializer),
        Some(syntax_kind_ext::OBJECT_CREATION_EXPRESSION)
    );
    let method = arena
        .get_method(arena.get(class_data.members.nodes[1]).unwrap())
        .unwrap();
    assert_eq!(method.type_parameters.len(), 1);
    assert_eq!(
        arena.kind(method.expression_body),
        Some(syntax_kind_ext::DEFAULT_EXPRESSION)
    );
}

#[test]
fn parse_records_enums_and_delegates() {
    let source = "public record Point(int X, int Y);\npublic enum Color { Red, Green = 2, Blue }\npublic delegate DateTime Clock();\npublic readonly record struct Pair(int A, int B);\n";
    let (parser, root) = parse_source(source);
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let sf = arena.get_source_file_at(root).unwrap();
    assert_eq!(
        member_kinds(&parser, &sf.members.nodes),
        vec![
            syntax_kind_ext::RECORD_DECLARATION,
            syntax_kind_ext::ENUM_DECLARATION,
            syntax_kind_ext::DELEGATE_DECLARATION,
            syntax_kind_ext::RECORD_STRUCT_DECLARATION,
        ]
    );
    let record = arena.get_type_decl(arena.get(sf.members.nodes[0]).unwrap()).unwrap();
    assert_eq!(record.parameters.as_ref().map(|p| p.len()), Some(2));
    let enumeration = arena.get_type_decl(arena.get(sf.members.nodes[1]).unwrap()).unwrap();
    assert_eq!(enumeration.members.len(), 3);
}

#[test]
fn parse_constructor_initializer_and_operators() {
    let source = r#"
class Money : Value
{
    public Money(int amount) : base(amount) { }
    ~Money() { }
    public static Money operator +(Money a, Money b) => a;
    public static implicit operator int(Money m) => 0;
    public event EventHandler Changed;
}
"#;
    let (parser, root) = parse_source(source);
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.get_arena();
    let class = find_first(&parser, root, syntax_kind_ext::CLASS_DECLARATION);
    let class_data = arena.get_type_decl(arena.get(class).unwrap()).unwrap();
    assert_eq!(class_data.base_types.len(), 1);
    assert_eq!(
        member_kinds(&parser, &class_data.members.nodes),
        vec![
            syntax_kind_ext::CONSTRUCTOR_DECLARATION,
            syntax_kind_ext::DESTRUCTOR_DECLARATION,
            syntax_kind_ext::OPERATOR_DECLARATION,
            syntax_kind_ext::CONVERSION_OPERATOR_DECLARATION,
            syntax_kind_ext::EVENT_FIELD_DECLARATION,
        ]
    );
    let constructor = arena
        .get_method(arena.get(class_data.members.nodes[0]).unwrap())
        .unwrap();
    assert_eq!(
        arena.kind(constructor.constructor_initializer),
        Some(syntax_kind_ext::CONSTRUCTOR_INITIALIZER)
    );
}

#[test]
fn parse_recovers_from_missing_expression() {
    let (parser, root) = parse_source("class C { void M() { var x = ; } int y; }");
    assert!(!parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let class = find_first(&parser, root, syntax_kind_ext::CLASS_DECLARATION);
    let class_data = arena.get_type_decl(arena.get(class).unwrap()).unwrap();
    assert_eq!(class_data.members.len(), 2);
}

#[test]
fn parse_recovers_from_stray_tokens_between_members() {
    let (parser, root) = parse_source("class C { ) int a; } class D { }");
    assert!(!parser.get_diagnostics().is_empty());
    let sf = parser.get_arena().get_source_file_at(root).unwrap();
    assert_eq!(sf.members.len(), 2);
}

#[test]
fn parse_does_not_loop_on_unbalanced_input() {
    let (parser, _root) = parse_source("class C { void M() { if (x { ");
    assert!(!parser.get_diagnostics().is_empty());
}
