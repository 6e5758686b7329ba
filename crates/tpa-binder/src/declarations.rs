//! Source type declarations.
//!
//! Declaring happens in two passes: every type declaration of every file is
//! entered into the type table first, so that base lists and member types can
//! then be resolved against the complete set of names.

use rustc_hash::FxHashMap;
use tpa_parser::node::{ModifierFlags, NodeArena};
use tpa_parser::{NodeIndex, NodeList, is_namespace_declaration, syntax_kind_ext};
use tracing::trace;

use crate::compilation::{Compilation, SourceFile};
use crate::metadata::{MemberKind, TypeKind};
use crate::scope::qualified_name_text;
use crate::semantic::SemanticModel;
use crate::types::{MemberInfo, TypeId, TypeKey, TypeOrigin, TypeTable};

fn type_kind(kind: u16) -> Option<TypeKind> {
    Some(match kind {
        syntax_kind_ext::CLASS_DECLARATION => TypeKind::Class,
        syntax_kind_ext::STRUCT_DECLARATION | syntax_kind_ext::RECORD_STRUCT_DECLARATION => {
            TypeKind::Struct
        }
        syntax_kind_ext::INTERFACE_DECLARATION => TypeKind::Interface,
        syntax_kind_ext::RECORD_DECLARATION => TypeKind::Record,
        syntax_kind_ext::ENUM_DECLARATION => TypeKind::Enum,
        syntax_kind_ext::DELEGATE_DECLARATION => TypeKind::Delegate,
        _ => return None,
    })
}

/// Name node and type parameter list of a type or delegate declaration.
fn declaration_name(arena: &NodeArena, node: NodeIndex) -> Option<(NodeIndex, &NodeList)> {
    let data = arena.get(node)?;
    if data.kind == syntax_kind_ext::DELEGATE_DECLARATION {
        let delegate = arena.get_method(data)?;
        return Some((delegate.name, &delegate.type_parameters));
    }
    let declaration = arena.get_type_decl(data)?;
    Some((declaration.name, &declaration.type_parameters))
}

/// Enter every type declared in `file` into `types`.
pub(crate) fn declare_file_types(
    file_index: usize,
    file: &SourceFile,
    types: &mut TypeTable,
    declared: &mut FxHashMap<(usize, NodeIndex), TypeId>,
) {
    let arena = &file.arena;
    let Some(source) = arena.get_source_file_at(file.root) else {
        return;
    };
    let mut declarer = Declarer {
        file_index,
        arena,
        types,
        declared,
    };
    declarer.declare_members(&source.members, "", None);
}

struct Declarer<'a> {
    file_index: usize,
    arena: &'a NodeArena,
    types: &'a mut TypeTable,
    declared: &'a mut FxHashMap<(usize, NodeIndex), TypeId>,
}

impl Declarer<'_> {
    fn declare_members(&mut self, members: &NodeList, namespace: &str, outer: Option<&TypeKey>) {
        let arena = self.arena;
        for member in members.iter() {
            let Some(kind) = arena.kind(member) else {
                continue;
            };
            if is_namespace_declaration(kind) {
                let Some(data) = arena.get(member).and_then(|n| arena.get_namespace(n)) else {
                    continue;
                };
                let name = qualified_name_text(arena, data.name).unwrap_or_default();
                let full = if namespace.is_empty() {
                    name
                } else {
                    format!("{namespace}.{name}")
                };
                self.declare_members(&data.members, &full, None);
            } else if let Some(type_kind) = type_kind(kind) {
                self.declare_type(member, type_kind, namespace, outer);
            }
        }
    }

    fn declare_type(
        &mut self,
        node: NodeIndex,
        kind: TypeKind,
        namespace: &str,
        outer: Option<&TypeKey>,
    ) {
        let Some((name_node, type_parameters)) = declaration_name(self.arena, node) else {
            return;
        };
        let Some(name) = self.arena.identifier_text(name_node) else {
            return;
        };
        let arity = type_parameters.len() as u32;
        let key = match outer {
            Some(outer) => outer.nested(name, arity),
            None if namespace.is_empty() => TypeKey::new(name, arity),
            None => TypeKey::new(format!("{namespace}.{name}"), arity),
        };
        trace!(key = %key, "declare source type");
        let id = self.types.declare(
            key.clone(),
            kind,
            TypeOrigin::Source {
                file: self.file_index,
                node,
            },
        );
        self.declared.insert((self.file_index, node), id);

        let arena = self.arena;
        if let Some(declaration) = arena.get(node).and_then(|n| arena.get_type_decl(n)) {
            self.declare_members(&declaration.members, namespace, Some(&key));
        }
    }
}

/// `global using` directives of a file.
pub(crate) fn global_using_directives(file: &SourceFile) -> Vec<NodeIndex> {
    let arena = &file.arena;
    arena
        .descendants(file.root)
        .filter(|&node| {
            arena
                .get(node)
                .and_then(|n| arena.get_using_directive(n))
                .is_some_and(|using| using.is_global)
        })
        .collect()
}

// =============================================================================
// Completion: base types and members
// =============================================================================

/// What one declaration (of possibly several partial ones) contributes.
struct DeclarationShape {
    id: TypeId,
    containing_type: Option<TypeId>,
    base_type: Option<TypeId>,
    interfaces: Vec<TypeId>,
    members: Vec<MemberInfo>,
}

/// Resolve base lists and members of every source type.
pub(crate) fn complete_source_types(compilation: &mut Compilation) {
    let mut declarations: Vec<((usize, NodeIndex), TypeId)> = compilation
        .declared_types()
        .iter()
        .map(|(&key, &id)| (key, id))
        .collect();
    declarations.sort_by_key(|&((file, node), _)| (file, node));

    let shapes: Vec<DeclarationShape> = declarations
        .iter()
        .filter_map(|&((file, node), id)| {
            let model = compilation.semantic_model(file)?;
            Some(shape_of(&model, node, id))
        })
        .collect();

    let object = compilation.get_type_by_metadata_name("System.Object");
    let value_type = compilation.get_type_by_metadata_name("System.ValueType");
    let enum_type = compilation.get_type_by_metadata_name("System.Enum");
    let delegate_type = compilation.get_type_by_metadata_name("System.Delegate");

    let types = compilation.types_mut();
    for shape in shapes {
        let Some(info) = types.get_mut(shape.id) else {
            continue;
        };
        info.containing_type = info.containing_type.or(shape.containing_type);
        info.base_type = info.base_type.or(shape.base_type);
        for interface in shape.interfaces {
            if !info.interfaces.contains(&interface) {
                info.interfaces.push(interface);
            }
        }
        info.members.extend(shape.members);
    }

    let defaults: Vec<(TypeId, Option<TypeId>)> = declarations
        .iter()
        .filter_map(|&(_, id)| {
            let info = types.get(id)?;
            if info.base_type.is_some() {
                return None;
            }
            let default = match info.kind {
                TypeKind::Class | TypeKind::Record => object,
                TypeKind::Struct => value_type,
                TypeKind::Enum => enum_type,
                TypeKind::Delegate => delegate_type.or(object),
                TypeKind::Interface => None,
            };
            Some((id, default.filter(|&base| base != id)))
        })
        .collect();
    for (id, default) in defaults {
        if let Some(info) = types.get_mut(id) {
            info.base_type = default;
        }
    }
    types.clear_interface_cache();
}

fn shape_of(model: &SemanticModel<'_>, node: NodeIndex, id: TypeId) -> DeclarationShape {
    let arena = model.arena();
    let mut shape = DeclarationShape {
        id,
        containing_type: model.enclosing_type(node),
        base_type: None,
        interfaces: Vec::new(),
        members: Vec::new(),
    };
    let Some(data) = arena.get(node) else {
        return shape;
    };
    let Some(declaration) = arena.get_type_decl(data) else {
        return shape;
    };
    let types = model.types();
    let own_kind = types.get(id).map(|info| info.kind);
    let takes_base_class = matches!(own_kind, Some(TypeKind::Class | TypeKind::Record));

    if own_kind != Some(TypeKind::Enum) {
        for (position, base) in declaration.base_types.iter().enumerate() {
            let Some(base_id) = model.resolve_type(base) else {
                continue;
            };
            if base_id == id {
                continue;
            }
            match types.get(base_id).map(|info| info.kind) {
                Some(TypeKind::Interface) => shape.interfaces.push(base_id),
                Some(TypeKind::Class | TypeKind::Record) if takes_base_class && position == 0 => {
                    shape.base_type = Some(base_id);
                }
                _ => {}
            }
        }
    }

    let member = |name_node: NodeIndex,
                  kind: MemberKind,
                  is_static: bool,
                  type_id: Option<TypeId>,
                  declaration: NodeIndex| {
        arena.identifier_text(name_node).map(|name| MemberInfo {
            name: name.to_string(),
            kind,
            is_static,
            type_id,
            declaring_type: id,
            declaration: Some((model.file_index(), declaration)),
        })
    };

    let is_record = matches!(
        data.kind,
        syntax_kind_ext::RECORD_DECLARATION | syntax_kind_ext::RECORD_STRUCT_DECLARATION
    );
    if is_record && let Some(parameters) = &declaration.parameters {
        for parameter in parameters.iter() {
            let Some(symbol) = model.declared_symbol(parameter) else {
                continue;
            };
            if let Some(property) = arena
                .get(parameter)
                .and_then(|p| arena.get_parameter(p))
                .and_then(|p| member(p.name, MemberKind::Property, false, symbol.type_id, parameter))
            {
                shape.members.push(property);
            }
        }
    }

    for member_node in declaration.members.iter() {
        let Some(member_data) = arena.get(member_node) else {
            continue;
        };
        match member_data.kind {
            syntax_kind_ext::FIELD_DECLARATION | syntax_kind_ext::EVENT_FIELD_DECLARATION => {
                let Some(field) = arena.get_field(member_data) else {
                    continue;
                };
                let kind = if member_data.kind == syntax_kind_ext::EVENT_FIELD_DECLARATION {
                    MemberKind::Event
                } else {
                    MemberKind::Field
                };
                let is_static = field
                    .modifiers
                    .intersects(ModifierFlags::STATIC | ModifierFlags::CONST);
                let Some(variables) = arena
                    .get(field.declaration)
                    .and_then(|d| arena.get_variable_declaration(d))
                else {
                    continue;
                };
                let type_id = model.resolve_type(variables.type_node);
                for declarator in variables.declarators.iter() {
                    let name = arena
                        .get(declarator)
                        .and_then(|d| arena.get_variable_declarator(d))
                        .map(|d| d.name);
                    if let Some(info) =
                        name.and_then(|name| member(name, kind, is_static, type_id, declarator))
                    {
                        shape.members.push(info);
                    }
                }
            }
            syntax_kind_ext::PROPERTY_DECLARATION | syntax_kind_ext::EVENT_DECLARATION => {
                let Some(property) = arena.get_property(member_data) else {
                    continue;
                };
                let kind = if member_data.kind == syntax_kind_ext::EVENT_DECLARATION {
                    MemberKind::Event
                } else {
                    MemberKind::Property
                };
                let is_static = property.modifiers.contains(ModifierFlags::STATIC);
                let type_id = model.resolve_type(property.type_node);
                shape
                    .members
                    .extend(member(property.name, kind, is_static, type_id, member_node));
            }
            syntax_kind_ext::METHOD_DECLARATION => {
                let Some(method) = arena.get_method(member_data) else {
                    continue;
                };
                let is_static = method.modifiers.contains(ModifierFlags::STATIC);
                let type_id = model.resolve_type(method.return_type);
                shape.members.extend(member(
                    method.name,
                    MemberKind::Method,
                    is_static,
                    type_id,
                    member_node,
                ));
            }
            syntax_kind_ext::ENUM_MEMBER_DECLARATION => {
                if let Some(value) = arena.get_variable_declarator(member_data) {
                    shape.members.extend(member(
                        value.name,
                        MemberKind::Field,
                        true,
                        Some(id),
                        member_node,
                    ));
                }
            }
            _ => {}
        }
    }
    shape
}
