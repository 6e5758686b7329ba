//! End-to-end tests of the analyzer over whole compilations.
use tpa_common::diagnostics::diagnostic_codes::{
    USE_OF_STATIC_TIME, USE_OF_STATIC_TIME_WITH_TIME_PROVIDER_IN_SCOPE,
};
use tpa_common::{DiagnosticCategory, Span};

use crate::analyzer::TimeProviderAnalyzer;
use crate::cancellation::CancellationToken;
use crate::finding::Finding;
use crate::options::AnalyzerOptions;
use crate::target_types::TargetTypeSet;
use crate::test_utils::{
    analyze, analyze_with, compile, compile_with, find_access, method_fixture, single, summarize,
};

const ACCESSES: &[&str] = &[
    "DateTime.Now",
    "DateTime.UtcNow",
    "DateTime.Today",
    "DateTimeOffset.Now",
    "DateTimeOffset.UtcNow",
];

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn empty_input_has_no_findings() {
    assert!(analyze("").is_empty());
}

#[test]
fn code_without_clock_reads_has_no_findings() {
    let source = r#"using System;
class C
{
    private TimeProvider _clock = TimeProvider.System;
    public DateTimeOffset M() => _clock.GetUtcNow();
}"#;
    assert!(analyze(source).is_empty());
}

#[test]
fn static_time_without_provider() {
    for access in ACCESSES {
        let findings = analyze(&method_fixture("", "", access));
        let finding = single(&findings);
        assert_eq!(
            summarize(finding),
            (USE_OF_STATIC_TIME, 9, 20, args(&[access])),
            "{access}"
        );
        let (end_line, end_column) = finding.location().end_line_column();
        assert_eq!((end_line, end_column), (9, 20 + access.len() as u32));
    }
}

#[test]
fn static_time_with_provider_parameter() {
    for access in ACCESSES {
        let findings = analyze(&method_fixture("", "TimeProvider timeProvider", access));
        assert_eq!(
            summarize(single(&findings)),
            (
                USE_OF_STATIC_TIME_WITH_TIME_PROVIDER_IN_SCOPE,
                9,
                20,
                args(&["timeProvider", access])
            ),
            "{access}"
        );
    }
}

#[test]
fn static_time_with_provider_local() {
    for access in ACCESSES {
        let return_type = access.split('.').next().unwrap_or_default();
        let source = format!(
            "using System;\n\
             \n\
             namespace ConsoleApplication1\n\
             {{\n\
             \x20   class SomeClass\n\
             \x20   {{\n\
             \x20       public {return_type} GetNow()\n\
             \x20       {{\n\
             \x20           var tp = TimeProvider.System;\n\
             \x20           return {access};\n\
             \x20       }}\n\
             \x20   }}\n\
             }}\n"
        );
        let findings = analyze(&source);
        assert_eq!(
            summarize(single(&findings)),
            (
                USE_OF_STATIC_TIME_WITH_TIME_PROVIDER_IN_SCOPE,
                10,
                20,
                args(&["tp", access])
            ),
            "{access}"
        );
    }
}

#[test]
fn static_time_with_provider_field() {
    for (modifiers, name) in [("private static", "provider"), ("private", "tp")] {
        for access in ACCESSES {
            let members = format!(
                "        {modifiers} TimeProvider {name} = TimeProvider.System;\n\n"
            );
            let findings = analyze(&method_fixture(&members, "", access));
            let finding = single(&findings);
            assert_eq!(
                summarize(finding),
                (
                    USE_OF_STATIC_TIME_WITH_TIME_PROVIDER_IN_SCOPE,
                    11,
                    20,
                    args(&[name, access])
                ),
                "{modifiers} {access}"
            );
            assert_eq!(
                finding.location().end_line_column(),
                (11, 20 + access.len() as u32)
            );
        }
    }
}

#[test]
fn static_field_span_is_the_access_expression() {
    let members = "        private static TimeProvider provider = TimeProvider.System;\n\n";
    let source = method_fixture(members, "", "DateTime.Now");
    let findings = analyze(&source);
    let finding = single(&findings);
    let span = finding.location().span;
    assert_eq!(span.text(&source), "DateTime.Now");
    assert_eq!(finding.location().start_line_column(), (11, 20));
    assert_eq!(finding.location().end_line_column(), (11, 32));
}

#[test]
fn nested_class_uses_outer_scope_only_for_outer_method() {
    for access in ACCESSES {
        let return_type = access.split('.').next().unwrap_or_default();
        let source = format!(
            "using System;\n\
             \n\
             namespace ConsoleApplication1\n\
             {{\n\
             \x20   class SomeClass\n\
             \x20   {{\n\
             \x20       private TimeProvider tp = TimeProvider.System;\n\
             \n\
             \x20       public {return_type} GetNow()\n\
             \x20       {{\n\
             \x20           return {access};\n\
             \x20       }}\n\
             \n\
             \x20       class NestedClass\n\
             \x20       {{\n\
             \x20           public {return_type} GetNow()\n\
             \x20           {{\n\
             \x20               return {access};\n\
             \x20           }}\n\
             \x20       }}\n\
             \x20   }}\n\
             }}\n"
        );
        let findings: Vec<_> = analyze(&source).iter().map(summarize).collect();
        assert_eq!(
            findings,
            vec![
                (
                    USE_OF_STATIC_TIME_WITH_TIME_PROVIDER_IN_SCOPE,
                    11,
                    20,
                    args(&["tp", access])
                ),
                (USE_OF_STATIC_TIME, 18, 24, args(&[access])),
            ],
            "{access}"
        );
    }
}

#[test]
fn nested_class_inner_field_binds_tighter() {
    for access in ACCESSES {
        let return_type = access.split('.').next().unwrap_or_default();
        let source = format!(
            "using System;\n\
             \n\
             namespace ConsoleApplication1\n\
             {{\n\
             \x20   class SomeClass\n\
             \x20   {{\n\
             \x20       private TimeProvider tp = TimeProvider.System;\n\
             \n\
             \x20       class NestedClass\n\
             \x20       {{\n\
             \x20           private TimeProvider nestedProvider = TimeProvider.System;\n\
             \n\
             \x20           public {return_type} GetNow()\n\
             \x20           {{\n\
             \x20               return {access};\n\
             \x20           }}\n\
             \x20       }}\n\
             \x20   }}\n\
             }}\n"
        );
        let findings = analyze(&source);
        assert_eq!(
            summarize(single(&findings)),
            (
                USE_OF_STATIC_TIME_WITH_TIME_PROVIDER_IN_SCOPE,
                15,
                24,
                args(&["nestedProvider", access])
            ),
            "{access}"
        );
    }
}

#[test]
fn netstandard_compilations_are_skipped() {
    let source = method_fixture("", "", "DateTime.Now");
    let compilation = compile_with(&[("a.cs", &source)], "netstandard2.0");
    let result = TimeProviderAnalyzer::default().analyze_compilation(&compilation);
    assert!(!result.targets_resolved);
    assert!(result.findings.is_empty());
}

#[test]
fn offset_over_match_follows_strictness() {
    let source = r#"using System;
class C
{
    public int Year() => DateTimeOffset.UtcNow.Year;
}"#;
    let legacy: Vec<_> = analyze(source)
        .iter()
        .map(|f| f.property_name().to_string())
        .collect();
    assert_eq!(legacy, vec!["DateTimeOffset.Year", "DateTimeOffset.UtcNow"]);

    let strict_options = AnalyzerOptions {
        strict_offset_accessors: true,
        ..AnalyzerOptions::default()
    };
    let strict: Vec<_> = analyze_with(source, strict_options)
        .iter()
        .map(|f| f.property_name().to_string())
        .collect();
    assert_eq!(strict, vec!["DateTimeOffset.UtcNow"]);
}

#[test]
fn conditional_access_is_not_a_simple_member_access() {
    let source = r#"using System;
class C
{
    public int? Year(DateTimeOffset? value) => value?.Year;
}"#;
    assert!(analyze(source).is_empty());
}

#[test]
fn accessor_named_properties_on_other_types_follow_strictness() {
    let source = r#"using System;
class Clock
{
    public static DateTime Now => default;
    public static DateTime UtcNow => default;
}
class User
{
    object A() => Clock.Now;
    object B() => Clock.UtcNow;
}"#;
    let legacy: Vec<_> = analyze(source).iter().map(summarize).collect();
    assert_eq!(
        legacy,
        vec![
            (USE_OF_STATIC_TIME, 9, 19, args(&["Clock.Now"])),
            (USE_OF_STATIC_TIME, 10, 19, args(&["Clock.UtcNow"])),
        ]
    );

    let strict_options = AnalyzerOptions {
        strict_offset_accessors: true,
        ..AnalyzerOptions::default()
    };
    assert!(analyze_with(source, strict_options).is_empty());
}

#[test]
fn user_type_named_date_time_is_flagged_by_name_only() {
    let source = r#"namespace Fake
{
    class DateTime { public static DateTime Now => null; public static DateTime Today => null; }
    class User { object M() => DateTime.Now; object N() => DateTime.Today; }
}"#;
    let legacy: Vec<_> = analyze(source)
        .iter()
        .map(|f| f.property_name().to_string())
        .collect();
    assert_eq!(legacy, vec!["DateTime.Now"]);

    let strict_options = AnalyzerOptions {
        strict_offset_accessors: true,
        ..AnalyzerOptions::default()
    };
    assert!(analyze_with(source, strict_options).is_empty());
}

#[test]
fn analyzing_twice_is_idempotent() {
    let source = method_fixture("", "TimeProvider timeProvider", "DateTime.UtcNow");
    let compilation = compile(&source);
    let analyzer = TimeProviderAnalyzer::default();
    let first = analyzer.analyze_compilation(&compilation).findings;
    let second = analyzer.analyze_compilation(&compilation).findings;
    assert_eq!(first, second);

    let targets = TargetTypeSet::resolve(&compilation).expect("targets");
    let model = compilation.semantic_model(0).expect("model");
    let node = find_access(&model, "DateTime.UtcNow");
    assert_eq!(
        analyzer.analyze_member_access(&model, node, &targets),
        analyzer.analyze_member_access(&model, node, &targets)
    );
}

#[test]
fn findings_are_sorted_by_file_then_position() {
    let first = method_fixture("", "", "DateTime.Now");
    let second = r#"using System;
class Other
{
    object A() => DateTimeOffset.UtcNow;
    object B() => DateTime.Today;
}"#;
    let compilation = compile_with(&[("b.cs", second), ("a.cs", &first)], "net8");
    let result = TimeProviderAnalyzer::default().analyze_compilation(&compilation);
    let order: Vec<_> = result
        .findings
        .iter()
        .map(|f| (f.location().file_path.clone(), f.property_name().to_string()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("a.cs".to_string(), "DateTime.Now".to_string()),
            ("b.cs".to_string(), "DateTimeOffset.UtcNow".to_string()),
            ("b.cs".to_string(), "DateTime.Today".to_string()),
        ]
    );
    assert_eq!(result.files_analyzed, 2);
}

#[test]
fn generated_files_are_skipped_unless_included() {
    let source = method_fixture("", "", "DateTime.Now");
    let compilation = compile_with(
        &[("Form1.Designer.cs", &source), ("Handwritten.cs", &source)],
        "net8",
    );
    let skipped = TimeProviderAnalyzer::default().analyze_compilation(&compilation);
    assert_eq!(skipped.generated_files_skipped, 1);
    assert_eq!(skipped.findings.len(), 1);
    assert_eq!(skipped.findings[0].location().file_path, "Handwritten.cs");

    let included = TimeProviderAnalyzer::new(AnalyzerOptions {
        include_generated: true,
        ..AnalyzerOptions::default()
    })
    .analyze_compilation(&compilation);
    assert_eq!(included.generated_files_skipped, 0);
    assert_eq!(included.findings.len(), 2);
}

#[test]
fn cancelled_runs_report_nothing_for_unfinished_files() {
    let source = method_fixture("", "", "DateTime.Now");
    let compilation = compile(&source);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = TimeProviderAnalyzer::default().analyze_compilation_with_cancel(&compilation, &cancel);
    assert!(result.cancelled);
    assert!(result.findings.is_empty());
}

#[test]
fn diagnostics_carry_descriptor_text_and_category() {
    let source = method_fixture("", "TimeProvider timeProvider", "DateTime.UtcNow");
    let compilation = compile(&source);
    let diagnostics = TimeProviderAnalyzer::default()
        .analyze_compilation(&compilation)
        .diagnostics();
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.code_string(), "TPA0002");
    assert_eq!(diagnostic.category, DiagnosticCategory::Warning);
    assert_eq!(
        diagnostic.message_text,
        "'DateTime.UtcNow' reads the system clock directly while TimeProvider 'timeProvider' is in scope."
    );
    assert_eq!(diagnostic.arguments, args(&["timeProvider", "DateTime.UtcNow"]));
    let span = Span::new(diagnostic.start, diagnostic.start + diagnostic.length);
    assert_eq!(span.text(&source), "DateTime.UtcNow");

    let weak = Finding::StaticTime {
        location: compilation.files()[0].location(span),
        property_name: "DateTime.UtcNow".to_string(),
    }
    .to_diagnostic();
    assert_eq!(weak.code_string(), "TPA0001");
    assert_eq!(weak.category, DiagnosticCategory::Info);
    assert_eq!(
        weak.message_text,
        "'DateTime.UtcNow' reads the system clock directly; consider using TimeProvider."
    );
}
