//! Tests for locating the closest reachable TimeProvider.
use tpa_binder::{Compilation, MetadataReference};

use crate::cancellation::CancellationToken;
use crate::scope_resolver::{BindingKind, ScopeResolver};
use crate::target_types::TargetTypeSet;
use crate::test_utils::{compile, find_access, find_accesses};

/// Name and kind of the binding found for the `occurrence`-th `access`.
fn resolve_nth(compilation: &Compilation, access: &str, occurrence: usize) -> Option<(String, BindingKind)> {
    let targets = TargetTypeSet::resolve(compilation).expect("targets");
    let model = compilation.semantic_model(0).expect("model");
    let node = find_accesses(&model, access)[occurrence];
    let cancel = CancellationToken::new();
    ScopeResolver::new(&model, targets.time_provider, &cancel)
        .resolve(node)
        .map(|binding| (binding.name, binding.kind))
}

fn resolve(source: &str, access: &str) -> Option<(String, BindingKind)> {
    resolve_nth(&compile(source), access, 0)
}

fn found(name: &str, kind: BindingKind) -> Option<(String, BindingKind)> {
    Some((name.to_string(), kind))
}

#[test]
fn parameter_wins_over_local_field_and_property() {
    let source = r#"using System;
class C
{
    private TimeProvider _field = TimeProvider.System;
    private TimeProvider Prop { get; } = TimeProvider.System;

    public DateTime M(int count, TimeProvider clock)
    {
        var local = TimeProvider.System;
        return DateTime.UtcNow;
    }
}"#;
    assert_eq!(resolve(source, "DateTime.UtcNow"), found("clock", BindingKind::Parameter));
}

#[test]
fn first_qualifying_parameter_in_declaration_order() {
    let source = r#"using System;
class C
{
    public DateTime M(TimeProvider first, TimeProvider second) => DateTime.Now;
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), found("first", BindingKind::Parameter));
}

#[test]
fn nullable_parameter_matches() {
    let source = r#"using System;
class C
{
    public DateTime M(TimeProvider? maybe) => DateTime.Now;
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), found("maybe", BindingKind::Parameter));
}

#[test]
fn local_declared_before_use() {
    let source = r#"using System;
class C
{
    private TimeProvider _field = TimeProvider.System;

    public DateTime M()
    {
        TimeProvider explicitLocal = TimeProvider.System;
        var inferred = TimeProvider.System;
        return DateTime.Now;
    }
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), found("explicitLocal", BindingKind::Local));
}

#[test]
fn inferred_local_matches() {
    let source = r#"using System;
class C
{
    public DateTimeOffset M()
    {
        var tp = TimeProvider.System;
        return DateTimeOffset.Now;
    }
}"#;
    assert_eq!(resolve(source, "DateTimeOffset.Now"), found("tp", BindingKind::Local));
}

#[test]
fn local_declared_after_use_is_ignored() {
    let source = r#"using System;
class C
{
    public DateTime M()
    {
        var now = DateTime.Now;
        var late = TimeProvider.System;
        return now;
    }
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), None);
}

#[test]
fn local_after_use_falls_back_to_field() {
    let source = r#"using System;
class C
{
    private TimeProvider _clock = TimeProvider.System;

    public DateTime M()
    {
        var now = DateTime.Now;
        var late = TimeProvider.System;
        return now;
    }
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), found("_clock", BindingKind::Field));
}

#[test]
fn earlier_sibling_block_local_counts() {
    // Precedence is textual, not scope-aware.
    let source = r#"using System;
class C
{
    public DateTime M(bool flag)
    {
        if (flag)
        {
            var inner = TimeProvider.System;
        }
        return DateTime.Now;
    }
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), found("inner", BindingKind::Local));
}

#[test]
fn non_provider_locals_are_skipped() {
    let source = r#"using System;
class C
{
    public DateTime M()
    {
        var text = "x";
        int count = 1, other = 2;
        return DateTime.Now;
    }
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), None);
}

#[test]
fn field_wins_over_property() {
    let source = r#"using System;
class C
{
    public TimeProvider Clock { get; set; }
    private readonly TimeProvider _provider;

    public DateTime M() { return DateTime.Now; }
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), found("_provider", BindingKind::Field));
}

#[test]
fn property_when_no_field() {
    let source = r#"using System;
class C
{
    private string _name;
    public TimeProvider Clock { get; set; }

    public DateTime M() { return DateTime.Now; }
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), found("Clock", BindingKind::Property));
}

#[test]
fn fields_in_declaration_order() {
    let source = r#"using System;
class C
{
    private TimeProvider a = TimeProvider.System, b = TimeProvider.System;
    private static TimeProvider c = TimeProvider.System;

    public DateTime M() => DateTime.Now;
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), found("a", BindingKind::Field));
}

#[test]
fn outer_type_members_are_not_searched() {
    let source = r#"using System;
class Outer
{
    private TimeProvider tp = TimeProvider.System;

    public DateTime GetNow() { return DateTime.Now; }

    class Inner
    {
        public DateTime GetNow() { return DateTime.Now; }
    }
}"#;
    let compilation = compile(source);
    assert_eq!(
        resolve_nth(&compilation, "DateTime.Now", 0),
        found("tp", BindingKind::Field)
    );
    assert_eq!(resolve_nth(&compilation, "DateTime.Now", 1), None);
}

#[test]
fn inner_type_member_binds_tighter() {
    let source = r#"using System;
class Outer
{
    private TimeProvider tp = TimeProvider.System;

    class Inner
    {
        private TimeProvider nestedProvider = TimeProvider.System;

        public DateTime GetNow() { return DateTime.Now; }
    }
}"#;
    assert_eq!(
        resolve(source, "DateTime.Now"),
        found("nestedProvider", BindingKind::Field)
    );
}

#[test]
fn nested_type_members_are_searched() {
    let source = r#"using System;
class Outer
{
    public DateTime GetNow() { return DateTime.Now; }

    class Inner
    {
        private TimeProvider tp = TimeProvider.System;
    }
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), found("tp", BindingKind::Field));
}

#[test]
fn own_field_before_nested_field_in_document_order() {
    let source = r#"using System;
class Outer
{
    private TimeProvider first = TimeProvider.System;

    class Inner
    {
        private TimeProvider second = TimeProvider.System;
    }

    public DateTime GetNow() { return DateTime.Now; }
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), found("first", BindingKind::Field));
}

#[test]
fn nested_field_wins_over_own_property() {
    let source = r#"using System;
class Outer
{
    public TimeProvider Clock { get; set; }

    public DateTime GetNow() { return DateTime.Now; }

    class Inner
    {
        private TimeProvider nested = TimeProvider.System;
    }
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), found("nested", BindingKind::Field));
}

#[test]
fn outside_method_like_declarations_nothing_is_found() {
    let source = r#"using System;
class C
{
    private TimeProvider tp = TimeProvider.System;
    private DateTime _created = DateTime.Now;
    public DateTime Stamp => DateTime.UtcNow;
    public DateTime Today { get { return DateTime.Today; } }
}"#;
    let compilation = compile(source);
    assert_eq!(resolve_nth(&compilation, "DateTime.Now", 0), None);
    assert_eq!(resolve_nth(&compilation, "DateTime.UtcNow", 0), None);
    assert_eq!(resolve_nth(&compilation, "DateTime.Today", 0), None);
}

#[test]
fn constructors_and_operators_are_method_like() {
    let source = r#"using System;
class C
{
    public C(TimeProvider injected) { var now = DateTime.Now; }
    public static C operator +(C left, TimeProvider right) { var now = DateTime.UtcNow; return left; }
}"#;
    let compilation = compile(source);
    assert_eq!(
        resolve_nth(&compilation, "DateTime.Now", 0),
        found("injected", BindingKind::Parameter)
    );
    assert_eq!(
        resolve_nth(&compilation, "DateTime.UtcNow", 0),
        found("right", BindingKind::Parameter)
    );
}

#[test]
fn lambdas_and_local_functions_search_the_enclosing_method() {
    let source = r#"using System;
class C
{
    public void M(TimeProvider outer)
    {
        Func<DateTime> f = () => DateTime.Now;
        DateTime Local() => DateTime.UtcNow;
    }
}"#;
    let compilation = compile(source);
    assert_eq!(
        resolve_nth(&compilation, "DateTime.Now", 0),
        found("outer", BindingKind::Parameter)
    );
    assert_eq!(
        resolve_nth(&compilation, "DateTime.UtcNow", 0),
        found("outer", BindingKind::Parameter)
    );
}

#[test]
fn derived_class_alone_does_not_match() {
    let source = r#"using System;
class FakeClock : TimeProvider { }
class C
{
    public DateTime M(FakeClock clock) => DateTime.Now;
}"#;
    assert_eq!(resolve(source, "DateTime.Now"), None);
}

/// A reference where the time abstraction is an interface.
const INTERFACE_REFERENCE: &str = r#"{
  "name": "System.Runtime",
  "types": [
    { "name": "System.Object", "kind": "class" },
    { "name": "System.ValueType", "kind": "class", "baseType": "System.Object" },
    { "name": "System.DateTime", "kind": "struct", "baseType": "System.ValueType",
      "members": [ { "name": "Now", "kind": "property", "static": true, "type": "System.DateTime" } ] },
    { "name": "System.DateTimeOffset", "kind": "struct", "baseType": "System.ValueType",
      "members": [ { "name": "Now", "kind": "property", "static": true, "type": "System.DateTimeOffset" } ] },
    { "name": "System.TimeProvider", "kind": "interface" },
    { "name": "System.IClock", "kind": "interface", "interfaces": ["System.TimeProvider"] }
  ]
}"#;

#[test]
fn implementing_the_abstraction_matches_transitively() {
    let reference = MetadataReference::from_json("interface-reference", INTERFACE_REFERENCE)
        .expect("valid reference");
    let source = r#"using System;
class Base : IClock { }
class Derived : Base { }
class C
{
    public DateTime M(Derived clock) => DateTime.Now;
}"#;
    let compilation =
        Compilation::from_sources(vec![("a.cs".to_string(), source.to_string())], &[reference]);
    assert_eq!(
        resolve_nth(&compilation, "DateTime.Now", 0),
        found("clock", BindingKind::Parameter)
    );
}

#[test]
fn cancelled_resolution_finds_nothing() {
    let source = r#"using System;
class C
{
    public DateTime M(TimeProvider clock) => DateTime.Now;
}"#;
    let compilation = compile(source);
    let targets = TargetTypeSet::resolve(&compilation).expect("targets");
    let model = compilation.semantic_model(0).expect("model");
    let cancel = CancellationToken::new();
    cancel.cancel();
    let resolver = ScopeResolver::new(&model, targets.time_provider, &cancel);
    assert_eq!(resolver.resolve(find_access(&model, "DateTime.Now")), None);
}
