//! Tests for type keys and the type table.
use crate::metadata::{MemberKind, MetadataReference, TypeKind};
use crate::types::{TypeKey, TypeTable};

fn net8_table() -> TypeTable {
    let mut table = TypeTable::new();
    table.add_reference(&MetadataReference::builtin("net8").expect("net8"));
    table
}

#[test]
fn type_key_parses_arity_of_last_segment() {
    let key = TypeKey::parse("System.Func`2");
    assert_eq!(key.metadata_name, "System.Func");
    assert_eq!(key.arity, 2);
    assert_eq!(key.to_string(), "System.Func`2");

    let nested = TypeKey::parse("System.Collections.Generic.Dictionary`2+KeyCollection");
    assert_eq!(nested.arity, 0);
    assert_eq!(nested.simple_name(), "KeyCollection");
    assert_eq!(nested.namespace(), "System.Collections.Generic");
}

#[test]
fn type_key_nesting_keeps_outer_arity() {
    let outer = TypeKey::new("Acme.Cache", 1);
    let inner = outer.nested("Entry", 0);
    assert_eq!(inner.metadata_name, "Acme.Cache`1+Entry");
    assert_eq!(inner.simple_name(), "Entry");
    assert_eq!(TypeKey::new("Clock", 0).namespace(), "");
}

#[test]
fn lookup_is_identity() {
    let table = net8_table();
    let by_name = table.lookup_metadata_name("System.DateTime").expect("DateTime");
    let by_key = table.lookup(&TypeKey::new("System.DateTime", 0)).expect("DateTime");
    assert_eq!(by_name, by_key);
    assert_ne!(Some(by_name), table.lookup_metadata_name("System.DateTimeOffset"));
    assert!(table.lookup_metadata_name("System.Func`2").is_some());
    assert!(table.lookup(&TypeKey::new("System.Func", 3)).is_none());
}

#[test]
fn namespaces_include_every_prefix() {
    let table = net8_table();
    assert!(table.is_namespace("System"));
    assert!(table.is_namespace("System.Collections"));
    assert!(table.is_namespace("System.Collections.Generic"));
    assert!(!table.is_namespace("System.DateTime"));
    assert!(!table.is_namespace("Collections"));
}

#[test]
fn members_resolve_their_types() {
    let table = net8_table();
    let date_time = table.lookup_metadata_name("System.DateTime").expect("DateTime");
    let now = table.find_member(date_time, "Now").expect("DateTime.Now");
    assert_eq!(now.kind, MemberKind::Property);
    assert!(now.is_static);
    assert_eq!(now.type_id, Some(date_time));
    assert_eq!(now.declaring_type, date_time);

    let offset = table.lookup_metadata_name("System.DateTimeOffset").expect("offset");
    let utc = table.find_member(offset, "UtcDateTime").expect("UtcDateTime");
    assert!(!utc.is_static);
    assert_eq!(utc.type_id, Some(date_time));
}

#[test]
fn base_chain_and_inherited_members() {
    let table = net8_table();
    let int32 = table.lookup_metadata_name("System.Int32").expect("Int32");
    let value_type = table.lookup_metadata_name("System.ValueType").expect("ValueType");
    let object = table.lookup_metadata_name("System.Object").expect("Object");
    assert_eq!(table.base_types(int32).as_slice(), &[value_type, object]);
    assert!(table.base_types(object).is_empty());
    // Inherited from System.Object
    assert!(table.find_member(int32, "GetHashCode").is_some());
}

#[test]
fn interfaces_are_transitive() {
    let table = net8_table();
    let list = table.lookup_metadata_name("System.Collections.Generic.List`1").expect("List");
    let interfaces = table.all_interfaces(list);
    for name in [
        "System.Collections.Generic.IList`1",
        "System.Collections.Generic.ICollection`1",
        "System.Collections.Generic.IEnumerable`1",
        "System.Collections.IEnumerable",
    ] {
        let id = table.lookup_metadata_name(name).expect(name);
        assert!(interfaces.contains(&id), "missing {name}");
    }
    // Cached result is the same set
    assert_eq!(table.all_interfaces(list), interfaces);

    let collection = table
        .lookup_metadata_name("System.Collections.Generic.ICollection`1")
        .expect("ICollection");
    // Interface members come from base interfaces too
    assert!(table.find_member(collection, "GetEnumerator").is_some());
}

#[test]
fn cyclic_bases_terminate() {
    let reference = MetadataReference::from_json(
        "cycle",
        r#"{ "name": "cycle", "types": [
            { "name": "A", "kind": "class", "baseType": "B" },
            { "name": "B", "kind": "class", "baseType": "A" },
            { "name": "I", "kind": "interface", "interfaces": ["J"] },
            { "name": "J", "kind": "interface", "interfaces": ["I"] } ] }"#,
    )
    .expect("valid");
    let mut table = TypeTable::new();
    table.add_reference(&reference);
    let a = table.lookup_metadata_name("A").expect("A");
    let b = table.lookup_metadata_name("B").expect("B");
    assert_eq!(table.base_types(a).as_slice(), &[b]);
    assert!(table.find_member(a, "Missing").is_none());
    let i = table.lookup_metadata_name("I").expect("I");
    assert_eq!(table.all_interfaces(i).len(), 1);
}

#[test]
fn earlier_reference_keeps_its_definition() {
    let first = MetadataReference::from_json(
        "first",
        r#"{ "name": "first", "types": [ { "name": "Acme.Clock", "kind": "class",
            "members": [ { "name": "Now", "kind": "property", "static": true } ] } ] }"#,
    )
    .expect("valid");
    let second = MetadataReference::from_json(
        "second",
        r#"{ "name": "second", "types": [ { "name": "Acme.Clock", "kind": "struct",
            "members": [ { "name": "Today", "kind": "property" } ] } ] }"#,
    )
    .expect("valid");
    let mut table = TypeTable::new();
    table.add_references(&[first, second]);
    let clock = table.lookup_metadata_name("Acme.Clock").expect("Clock");
    let info = table.get(clock).expect("info");
    assert_eq!(info.kind, TypeKind::Class);
    assert!(table.find_member(clock, "Now").is_some());
    assert!(table.find_member(clock, "Today").is_none());
}

#[test]
fn nested_types_are_found_through_the_outer_key() {
    let reference = MetadataReference::from_json(
        "nested",
        r#"{ "name": "nested", "types": [
            { "name": "Acme.Outer", "kind": "class" },
            { "name": "Acme.Outer+Inner", "kind": "class" },
            { "name": "Acme.Derived", "kind": "class", "baseType": "Acme.Outer" } ] }"#,
    )
    .expect("valid");
    let mut table = TypeTable::new();
    table.add_reference(&reference);
    let outer = table.lookup_metadata_name("Acme.Outer").expect("Outer");
    let inner = table.lookup_metadata_name("Acme.Outer+Inner").expect("Inner");
    let derived = table.lookup_metadata_name("Acme.Derived").expect("Derived");
    assert_eq!(table.find_nested_type(outer, "Inner", 0), Some(inner));
    assert_eq!(table.find_nested_type(derived, "Inner", 0), Some(inner));
    assert_eq!(table.get(inner).and_then(|info| info.containing_type), Some(outer));
    assert_eq!(table.simple_name(inner), "Inner");
}
