//! Tests for the provider rewrite.
use tpa_common::{LineMap, Location, Span};

use crate::code_fix::{TextEdit, apply_edits, code_fix_for, edits_by_file};
use crate::finding::Finding;
use crate::test_utils::{analyze, method_fixture, single};

fn location(file: &str, start: u32, end: u32) -> Location {
    let text = " ".repeat(end as usize);
    let span = Span::new(start, end);
    Location::new(
        file.to_string(),
        span,
        LineMap::build(&text).span_to_range(span, &text),
    )
}

fn with_provider(property: &str, provider: &str) -> Finding {
    Finding::StaticTimeWithProviderInScope {
        location: location("a.cs", 0, property.len() as u32),
        property_name: property.to_string(),
        provider_name: provider.to_string(),
    }
}

#[test]
fn replacement_for_each_accessor() {
    let cases = [
        ("DateTime.UtcNow", "p.GetUtcNow().UtcDateTime"),
        ("DateTime.Now", "p.GetLocalNow().DateTime"),
        ("DateTime.Today", "p.GetLocalNow().Date"),
        ("DateTimeOffset.UtcNow", "p.GetUtcNow()"),
        ("DateTimeOffset.Now", "p.GetLocalNow()"),
    ];
    for (property, expected) in cases {
        let fix = code_fix_for(&with_provider(property, "p")).expect(property);
        assert_eq!(fix.edit.new_text, expected, "{property}");
        assert_eq!(fix.title, format!("Use '{expected}'"));
        assert_eq!(fix.file, "a.cs");
        assert_eq!(fix.edit.span, Span::new(0, property.len() as u32));
    }
}

#[test]
fn no_fix_without_provider_or_for_over_match() {
    let weak = Finding::StaticTime {
        location: location("a.cs", 0, 12),
        property_name: "DateTime.Now".to_string(),
    };
    assert!(code_fix_for(&weak).is_none(), "TPA0001 has no fix");
    assert!(
        code_fix_for(&with_provider("DateTimeOffset.Year", "p")).is_none(),
        "only the five accessors are rewritten"
    );
}

#[test]
fn fixes_rewrite_source_through_provider() {
    let source = method_fixture("", "TimeProvider tp", "DateTime.UtcNow");
    let findings = analyze(&source);
    let fix = code_fix_for(single(&findings)).expect("fix");
    let fixed = apply_edits(&source, vec![fix.edit]);
    assert!(
        fixed.contains("return tp.GetUtcNow().UtcDateTime;"),
        "unexpected rewrite:\n{fixed}"
    );
}

#[test]
fn edits_apply_from_last_to_first() {
    let text = "a = X.Now; b = Y.Now;";
    let edits = vec![
        TextEdit {
            span: Span::new(4, 9),
            new_text: "first".to_string(),
        },
        TextEdit {
            span: Span::new(15, 20),
            new_text: "second-longer".to_string(),
        },
    ];
    assert_eq!(apply_edits(text, edits), "a = first; b = second-longer;");
}

#[test]
fn overlapping_edits_keep_the_later_one() {
    let text = "0123456789";
    let edits = vec![
        TextEdit {
            span: Span::new(2, 6),
            new_text: "A".to_string(),
        },
        TextEdit {
            span: Span::new(4, 8),
            new_text: "B".to_string(),
        },
    ];
    assert_eq!(apply_edits(text, edits), "0123B89");
}

#[test]
fn edits_are_grouped_by_file() {
    let mut other = with_provider("DateTime.Now", "clock");
    if let Finding::StaticTimeWithProviderInScope { location: loc, .. } = &mut other {
        *loc = location("b.cs", 0, 12);
    }
    let findings = [
        with_provider("DateTime.UtcNow", "p"),
        other,
        Finding::StaticTime {
            location: location("c.cs", 0, 12),
            property_name: "DateTime.Now".to_string(),
        },
    ];
    let grouped = edits_by_file(&findings);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped["a.cs"][0].new_text, "p.GetUtcNow().UtcDateTime");
    assert_eq!(grouped["b.cs"][0].new_text, "clock.GetLocalNow().DateTime");
}
