//! Type identity and the per-compilation type table.
//!
//! Types are identified by value keys (`TypeKey`: metadata name plus generic
//! arity) interned into `TypeId` handles. Two handles are equal exactly when
//! they denote the same type, so `TypeId` equality is symbol identity.

use dashmap::DashMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::sync::Arc;
use tpa_parser::NodeIndex;
use tracing::trace;

use crate::metadata::{MemberKind, MetadataReference, TypeKind};

/// Deepest base-type chain walked before giving up (guards against cycles in
/// malformed metadata or source).
const MAX_BASE_DEPTH: usize = 64;

// =============================================================================
// Keys and handles
// =============================================================================

/// Value key of a type: metadata name without the arity suffix of its last
/// segment, plus generic arity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey {
    pub metadata_name: String,
    pub arity: u32,
}

impl TypeKey {
    pub fn new(metadata_name: impl Into<String>, arity: u32) -> Self {
        TypeKey {
            metadata_name: metadata_name.into(),
            arity,
        }
    }

    /// Parse a metadata name such as ``System.Func`2`` or `Outer+Inner`.
    pub fn parse(metadata_name: &str) -> Self {
        let name = metadata_name.trim();
        let segment_start = name.rfind(['.', '+']).map_or(0, |i| i + 1);
        if let Some(tick) = name[segment_start..].find('`') {
            let split = segment_start + tick;
            if let Ok(arity) = name[split + 1..].parse::<u32>() {
                return TypeKey::new(&name[..split], arity);
            }
        }
        TypeKey::new(name, 0)
    }

    /// Last segment of the name, e.g. `DateTime` for `System.DateTime`.
    pub fn simple_name(&self) -> &str {
        let start = self
            .metadata_name
            .rfind(['.', '+'])
            .map_or(0, |i| i + 1);
        &self.metadata_name[start..]
    }

    /// Containing namespace; empty for the global namespace. Nested types
    /// report the namespace of their outermost type.
    pub fn namespace(&self) -> &str {
        let outer_end = self.metadata_name.find('+').unwrap_or(self.metadata_name.len());
        let outer = &self.metadata_name[..outer_end];
        outer.rfind('.').map_or("", |i| &outer[..i])
    }

    /// Key of a type nested in this one.
    pub fn nested(&self, name: &str, arity: u32) -> TypeKey {
        let outer = if self.arity > 0 {
            format!("{}`{}", self.metadata_name, self.arity)
        } else {
            self.metadata_name.clone()
        };
        TypeKey::new(format!("{outer}+{name}"), arity)
    }
}

impl std::fmt::Display for TypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.arity > 0 {
            write!(f, "{}`{}", self.metadata_name, self.arity)
        } else {
            f.write_str(&self.metadata_name)
        }
    }
}

/// Handle of a type in one compilation's `TypeTable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

// =============================================================================
// Type information
// =============================================================================

/// Where a type was declared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeOrigin {
    Metadata { reference: String },
    Source { file: usize, node: NodeIndex },
}

#[derive(Clone, Debug)]
pub struct MemberInfo {
    pub name: String,
    pub kind: MemberKind,
    pub is_static: bool,
    /// Field/property/event type or method return type, when resolvable.
    pub type_id: Option<TypeId>,
    pub declaring_type: TypeId,
    /// Declaring syntax for source members.
    pub declaration: Option<(usize, NodeIndex)>,
}

#[derive(Clone, Debug)]
pub struct TypeInfo {
    pub key: TypeKey,
    pub kind: TypeKind,
    pub base_type: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub members: Vec<MemberInfo>,
    pub containing_type: Option<TypeId>,
    /// More than one for partial source types.
    pub origins: SmallVec<[TypeOrigin; 1]>,
}

impl TypeInfo {
    pub fn simple_name(&self) -> &str {
        self.key.simple_name()
    }

    pub fn is_interface(&self) -> bool {
        self.kind.is_interface()
    }
}

// =============================================================================
// TypeTable
// =============================================================================

#[derive(Debug, Default)]
pub struct TypeTable {
    types: Vec<TypeInfo>,
    by_key: FxHashMap<TypeKey, TypeId>,
    /// Every namespace that contains a type, with all of its prefixes.
    namespaces: FxHashSet<String>,
    /// Transitive interface sets, computed on first use.
    interface_cache: DashMap<TypeId, Arc<[TypeId]>>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeInfo> {
        self.types.get(id.0 as usize)
    }

    pub(crate) fn get_mut(&mut self, id: TypeId) -> Option<&mut TypeInfo> {
        self.types.get_mut(id.0 as usize)
    }

    pub fn lookup(&self, key: &TypeKey) -> Option<TypeId> {
        self.by_key.get(key).copied()
    }

    /// Look up a type by metadata name (``System.Func`2``, `Outer+Inner`).
    pub fn lookup_metadata_name(&self, metadata_name: &str) -> Option<TypeId> {
        self.lookup(&TypeKey::parse(metadata_name))
    }

    pub fn is_namespace(&self, name: &str) -> bool {
        self.namespaces.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeInfo)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, info)| (TypeId(index as u32), info))
    }

    /// Display name of a type: its simple name.
    pub fn simple_name(&self, id: TypeId) -> &str {
        self.get(id).map_or("?", TypeInfo::simple_name)
    }

    /// Declare a type, or return the existing declaration of the same key.
    /// Source declarations of an existing key add an origin (partial types).
    pub(crate) fn declare(&mut self, key: TypeKey, kind: TypeKind, origin: TypeOrigin) -> TypeId {
        if let Some(&existing) = self.by_key.get(&key) {
            if matches!(origin, TypeOrigin::Source { .. })
                && let Some(info) = self.get_mut(existing)
            {
                info.origins.push(origin);
            }
            return existing;
        }
        let id = TypeId(self.types.len() as u32);
        let namespace = key.namespace();
        if !namespace.is_empty() {
            for (dot, _) in namespace.match_indices('.') {
                self.namespaces.insert(namespace[..dot].to_string());
            }
            self.namespaces.insert(namespace.to_string());
        }
        self.by_key.insert(key.clone(), id);
        let mut origins = SmallVec::new();
        origins.push(origin);
        self.types.push(TypeInfo {
            key,
            kind,
            base_type: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            containing_type: None,
            origins,
        });
        id
    }

    pub fn add_reference(&mut self, reference: &MetadataReference) {
        self.add_references(std::slice::from_ref(reference));
    }

    /// Resolve base types, interfaces and members of a reference's types.
    fn fill_references(&mut self, reference: &MetadataReference, ids: &[TypeId]) {
        for (ty, &id) in reference.types.iter().zip(ids) {
            // A type declared by an earlier reference keeps that definition.
            let owned = self.get(id).is_some_and(|info| {
                info.members.is_empty()
                    && matches!(
                        info.origins.first(),
                        Some(TypeOrigin::Metadata { reference: name }) if *name == reference.name
                    )
            });
            if !owned {
                continue;
            }
            let base_type = ty
                .base_type
                .as_deref()
                .and_then(|name| self.lookup_metadata_name(name));
            let interfaces = ty
                .interfaces
                .iter()
                .filter_map(|name| self.lookup_metadata_name(name))
                .collect();
            let members = ty
                .members
                .iter()
                .map(|member| MemberInfo {
                    name: member.name.clone(),
                    kind: member.kind,
                    is_static: member.is_static,
                    type_id: member
                        .type_name
                        .as_deref()
                        .and_then(|name| self.lookup_metadata_name(name)),
                    declaring_type: id,
                    declaration: None,
                })
                .collect();
            let containing_type = ty
                .name
                .rfind('+')
                .and_then(|plus| self.lookup_metadata_name(&ty.name[..plus]));
            if let Some(info) = self.get_mut(id) {
                info.base_type = base_type;
                info.interfaces = interfaces;
                info.members = members;
                info.containing_type = containing_type;
            }
        }
        self.interface_cache.clear();
    }

    /// Add every type of the given references. All types are declared before
    /// any name is resolved, so references may point into each other. Names
    /// no loaded reference declares stay unresolved.
    pub fn add_references(&mut self, references: &[MetadataReference]) {
        let mut declared = Vec::with_capacity(references.len());
        for reference in references {
            let ids: Vec<TypeId> = reference
                .types
                .iter()
                .map(|ty| {
                    self.declare(
                        TypeKey::parse(&ty.name),
                        ty.kind,
                        TypeOrigin::Metadata {
                            reference: reference.name.clone(),
                        },
                    )
                })
                .collect();
            declared.push(ids);
        }
        for (reference, ids) in references.iter().zip(&declared) {
            self.fill_references(reference, ids);
        }
    }

    pub(crate) fn clear_interface_cache(&mut self) {
        self.interface_cache.clear();
    }

    /// Base types of `id`, nearest first, excluding `id` itself.
    pub fn base_types(&self, id: TypeId) -> SmallVec<[TypeId; 4]> {
        let mut bases = SmallVec::new();
        let mut current = self.get(id).and_then(|info| info.base_type);
        while let Some(base) = current {
            if base == id || bases.contains(&base) || bases.len() >= MAX_BASE_DEPTH {
                break;
            }
            bases.push(base);
            current = self.get(base).and_then(|info| info.base_type);
        }
        bases
    }

    /// Every interface `id` implements: declared interfaces, their base
    /// interfaces, and interfaces inherited through base classes.
    pub fn all_interfaces(&self, id: TypeId) -> Arc<[TypeId]> {
        if let Some(cached) = self.interface_cache.get(&id) {
            return Arc::clone(cached.value());
        }
        let mut result: Vec<TypeId> = Vec::new();
        let mut seen = FxHashSet::default();
        let mut stack: Vec<TypeId> = Vec::new();

        let mut owners: SmallVec<[TypeId; 4]> = SmallVec::new();
        owners.push(id);
        owners.extend(self.base_types(id));
        for owner in owners.iter().rev() {
            if let Some(info) = self.get(*owner) {
                stack.extend(info.interfaces.iter().rev().copied());
            }
        }
        while let Some(interface) = stack.pop() {
            if interface == id || !seen.insert(interface) {
                continue;
            }
            result.push(interface);
            if let Some(info) = self.get(interface) {
                stack.extend(info.interfaces.iter().rev().copied());
            }
        }
        trace!(type_id = id.0, count = result.len(), "computed interface set");
        let interfaces: Arc<[TypeId]> = result.into();
        self.interface_cache.insert(id, Arc::clone(&interfaces));
        interfaces
    }

    /// First member named `name` on `id` or one of its base types. Interfaces
    /// also search their base interfaces.
    pub fn find_member(&self, id: TypeId, name: &str) -> Option<&MemberInfo> {
        let direct = |owner: TypeId| {
            self.get(owner)
                .and_then(|info| info.members.iter().find(|member| member.name == name))
        };
        if let Some(member) = direct(id) {
            return Some(member);
        }
        for base in self.base_types(id) {
            if let Some(member) = direct(base) {
                return Some(member);
            }
        }
        if self.get(id).is_some_and(TypeInfo::is_interface) {
            return self.all_interfaces(id).iter().find_map(|&base| direct(base));
        }
        None
    }

    /// Type nested in `outer` (or in one of its base types).
    pub fn find_nested_type(&self, outer: TypeId, name: &str, arity: u32) -> Option<TypeId> {
        let mut owners: SmallVec<[TypeId; 4]> = SmallVec::new();
        owners.push(outer);
        owners.extend(self.base_types(outer));
        owners.into_iter().find_map(|owner| {
            self.get(owner)
                .and_then(|info| self.lookup(&info.key.nested(name, arity)))
        })
    }
}
