//! Tests for metadata reference loading and the embedded reference sets.
use crate::metadata::{
    DEFAULT_REFERENCE, MemberKind, MetadataError, MetadataReference, TypeKind,
    builtin_reference_names, get_builtin_reference,
};
use std::io::Write;

fn find_type<'a>(
    reference: &'a MetadataReference,
    name: &str,
) -> Option<&'a crate::metadata::MetadataType> {
    reference.types.iter().find(|ty| ty.name == name)
}

#[test]
fn net8_declares_time_provider() {
    let reference = MetadataReference::builtin("net8").expect("net8 parses");
    assert_eq!(reference.name, "net8");
    let provider = find_type(&reference, "System.TimeProvider").expect("TimeProvider");
    assert_eq!(provider.kind, TypeKind::Class);
    let system = provider
        .members
        .iter()
        .find(|member| member.name == "System")
        .expect("TimeProvider.System");
    assert_eq!(system.kind, MemberKind::Property);
    assert!(system.is_static);
    assert_eq!(system.type_name.as_deref(), Some("System.TimeProvider"));
}

#[test]
fn netstandard_predates_time_provider() {
    let reference = MetadataReference::builtin("netstandard2.0").expect("netstandard parses");
    assert!(find_type(&reference, "System.TimeProvider").is_none());
    let date_time = find_type(&reference, "System.DateTime").expect("DateTime");
    assert_eq!(date_time.kind, TypeKind::Struct);
    assert!(
        date_time
            .members
            .iter()
            .any(|member| member.name == "UtcNow" && member.is_static)
    );
}

#[test]
fn builtin_names_accept_aliases() {
    assert_eq!(get_builtin_reference("NET8.0").map(|r| r.name), Some("net8"));
    assert_eq!(
        get_builtin_reference(" netstandard2 ").map(|r| r.name),
        Some("netstandard2.0")
    );
    assert!(get_builtin_reference("net472").is_none());
    assert!(builtin_reference_names().contains(&DEFAULT_REFERENCE));
}

#[test]
fn unknown_reference_lists_known_sets() {
    let err = MetadataReference::builtin("net472").unwrap_err();
    assert!(matches!(err, MetadataError::UnknownReference(ref name) if name == "net472"));
    let message = err.to_string();
    assert!(message.contains("net8"), "{message}");
    assert!(message.contains("netstandard2.0"), "{message}");
}

#[test]
fn from_json_reports_origin_on_error() {
    let err = MetadataReference::from_json("broken.json", "{ \"name\": 3 }").unwrap_err();
    assert!(matches!(err, MetadataError::Json { ref name, .. } if name == "broken.json"));
}

#[test]
fn optional_fields_default() {
    let reference = MetadataReference::from_json(
        "inline",
        r#"{ "name": "Mini", "types": [ { "name": "Acme.Clock", "kind": "interface" } ] }"#,
    )
    .expect("valid reference");
    let clock = &reference.types[0];
    assert!(clock.base_type.is_none());
    assert!(clock.interfaces.is_empty());
    assert!(clock.members.is_empty());
    assert!(clock.kind.is_interface());
}

#[test]
fn load_reads_reference_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{ "name": "Acme", "types": [ {{ "name": "Acme.Clock", "kind": "class",
             "members": [ {{ "name": "Now", "kind": "property", "static": true,
                            "type": "System.DateTime" }} ] }} ] }}"#
    )
    .expect("write reference");
    let reference = MetadataReference::load(file.path()).expect("loads");
    assert_eq!(reference.name, "Acme");
    assert_eq!(reference.types[0].members[0].name, "Now");
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("missing.json");
    let err = MetadataReference::load(&missing).unwrap_err();
    assert!(matches!(err, MetadataError::Io { ref path, .. } if *path == missing));
}
