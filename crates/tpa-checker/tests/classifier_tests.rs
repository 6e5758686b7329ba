//! Tests for recognizing clock-reading accessors.
use crate::classifier::{StaticAccessClassifier, qualified_property_name};
use crate::target_types::{AccessorNameSets, TargetTypeSet};
use crate::test_utils::{compile, compile_with, find_access};

fn classify(source: &str, access: &str, strict: bool) -> bool {
    let compilation = compile(source);
    let targets = TargetTypeSet::resolve(&compilation).expect("targets");
    let model = compilation.semantic_model(0).expect("model");
    let Some(symbol) = model.symbol_info(find_access(&model, access)) else {
        return false;
    };
    StaticAccessClassifier::new(&AccessorNameSets::DEFAULT, strict).classify(&symbol, &targets)
}

#[test]
fn target_types_resolve_from_net8() {
    let compilation = compile("");
    let targets = TargetTypeSet::resolve(&compilation).expect("net8 declares all three");
    let types = compilation.types();
    assert_eq!(types.simple_name(targets.time_provider), "TimeProvider");
    assert_eq!(types.simple_name(targets.date_time), "DateTime");
    assert_eq!(types.simple_name(targets.date_time_offset), "DateTimeOffset");
}

#[test]
fn target_types_missing_from_netstandard() {
    let compilation = compile_with(&[("a.cs", "class C {}")], "netstandard2.0");
    assert!(
        TargetTypeSet::resolve(&compilation).is_none(),
        "netstandard2.0 has no TimeProvider"
    );
}

#[test]
fn classifies_every_static_now_accessor() {
    let source = "using System;\n\
        class C {\n\
            object A() => DateTime.Now;\n\
            object B() => DateTime.UtcNow;\n\
            object D() => DateTime.Today;\n\
            object E() => DateTimeOffset.Now;\n\
            object F() => DateTimeOffset.UtcNow;\n\
        }";
    for access in [
        "DateTime.Now",
        "DateTime.UtcNow",
        "DateTime.Today",
        "DateTimeOffset.Now",
        "DateTimeOffset.UtcNow",
    ] {
        assert!(classify(source, access, false), "{access} should classify");
        assert!(classify(source, access, true), "{access} should classify when strict");
    }
}

#[test]
fn rejects_non_property_members() {
    let source = "using System;\n\
        class C {\n\
            object A() => DateTime.MinValue;\n\
            object B() => DateTime.Parse(\"2020-01-01\");\n\
        }";
    assert!(!classify(source, "DateTime.MinValue", false), "fields never classify");
    assert!(!classify(source, "DateTime.Parse", false), "methods never classify");
}

#[test]
fn rejects_other_date_time_properties() {
    let source = "using System;\n\
        class C { int Y() => DateTime.Now.Year; }";
    assert!(!classify(source, "DateTime.Now.Year", false));
    assert!(classify(source, "DateTime.Now", false));
}

#[test]
fn date_time_offset_rule_depends_on_strictness() {
    let source = "using System;\n\
        class C { int Y() => DateTimeOffset.UtcNow.Year; }";
    assert!(
        classify(source, "DateTimeOffset.UtcNow.Year", false),
        "any DateTimeOffset property matches under the default rule"
    );
    assert!(
        !classify(source, "DateTimeOffset.UtcNow.Year", true),
        "strict rule requires an accessor name"
    );
}

#[test]
fn same_named_type_in_other_namespace_matches_only_by_name() {
    let source = "namespace Fake {\n\
            class DateTime { public static DateTime Now => null; public static DateTime Today => null; }\n\
            class User { object M() => DateTime.Now; object N() => DateTime.Today; }\n\
        }";
    assert!(
        classify(source, "DateTime.Now", false),
        "default rule matches any property named Now"
    );
    assert!(
        !classify(source, "DateTime.Today", false),
        "Today is only a DateTime accessor, matched by declaring type"
    );
    assert!(
        !classify(source, "DateTime.Now", true),
        "strict rule compares declaring types, not names"
    );
}

#[test]
fn same_named_property_on_other_type_depends_on_strictness() {
    let source = "using System;\n\
        class Clock { public static DateTime Now => default; public static DateTime UtcNow => default; public static DateTime Later => default; }\n\
        class User { object A() => Clock.Now; object B() => Clock.UtcNow; object C() => Clock.Later; }";
    assert!(classify(source, "Clock.Now", false));
    assert!(classify(source, "Clock.UtcNow", false));
    assert!(!classify(source, "Clock.Later", false), "name must be an accessor name");
    assert!(!classify(source, "Clock.Now", true));
    assert!(!classify(source, "Clock.UtcNow", true));
}

#[test]
fn qualified_name_uses_simple_type_name() {
    let compilation = compile("class C { object M() => System.DateTime.UtcNow; }");
    let model = compilation.semantic_model(0).expect("model");
    let symbol = model
        .symbol_info(find_access(&model, "System.DateTime.UtcNow"))
        .expect("bound");
    assert_eq!(
        qualified_property_name(compilation.types(), &symbol),
        "DateTime.UtcNow"
    );
}
