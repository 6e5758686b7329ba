//! Type and namespace name lookup.
//!
//! Names are looked up the way C# does for namespace-or-type names: type
//! parameters and nested types of the enclosing declarations first, then each
//! enclosing namespace (innermost first) with the using directives declared at
//! that level, then the global namespace with the file's and the
//! compilation's global using directives.

use smallvec::SmallVec;
use tpa_parser::node::NodeArena;
use tpa_parser::{
    NodeIndex, NodeList, is_namespace_declaration, is_type_declaration, syntax_kind_ext,
};
use tpa_scanner::SyntaxKind;

use crate::semantic::SemanticModel;
use crate::types::{TypeId, TypeKey};

/// Result of resolving a namespace-or-type name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamespaceOrType {
    Namespace(String),
    Type(TypeId),
}

/// Namespace declaration level around a node.
struct ImportScope {
    /// Namespaces this declaration introduces, innermost first. For
    /// `namespace A.B` at file level: `["A.B", "A"]`. Empty for the file.
    levels: SmallVec<[String; 2]>,
    /// Using directives declared directly in this namespace (or file).
    directives: SmallVec<[NodeIndex; 8]>,
}

/// Metadata name of a C# predefined type keyword.
pub fn predefined_type_name(keyword: SyntaxKind) -> Option<&'static str> {
    Some(match keyword {
        SyntaxKind::BoolKeyword => "System.Boolean",
        SyntaxKind::ByteKeyword => "System.Byte",
        SyntaxKind::SByteKeyword => "System.SByte",
        SyntaxKind::ShortKeyword => "System.Int16",
        SyntaxKind::UShortKeyword => "System.UInt16",
        SyntaxKind::IntKeyword => "System.Int32",
        SyntaxKind::UIntKeyword => "System.UInt32",
        SyntaxKind::LongKeyword => "System.Int64",
        SyntaxKind::ULongKeyword => "System.UInt64",
        SyntaxKind::FloatKeyword => "System.Single",
        SyntaxKind::DoubleKeyword => "System.Double",
        SyntaxKind::DecimalKeyword => "System.Decimal",
        SyntaxKind::CharKeyword => "System.Char",
        SyntaxKind::StringKeyword => "System.String",
        SyntaxKind::ObjectKeyword => "System.Object",
        SyntaxKind::VoidKeyword => "System.Void",
        _ => return None,
    })
}

/// Dotted text of a name node (`A.B.C`). `global::` prefixes are dropped.
pub fn qualified_name_text(arena: &NodeArena, node: NodeIndex) -> Option<String> {
    let data = arena.get(node)?;
    match data.kind {
        syntax_kind_ext::QUALIFIED_NAME => {
            let name = arena.get_qualified_name(data)?;
            let left = qualified_name_text(arena, name.left)?;
            let right = qualified_name_text(arena, name.right)?;
            Some(format!("{left}.{right}"))
        }
        syntax_kind_ext::ALIAS_QUALIFIED_NAME => {
            let name = arena.get_qualified_name(data)?;
            qualified_name_text(arena, name.right)
        }
        syntax_kind_ext::GENERIC_NAME => {
            let generic = arena.get_generic_name(data)?;
            arena.identifier_text(generic.name).map(str::to_string)
        }
        _ => arena.identifier_text(node).map(str::to_string),
    }
}

/// Name text and generic arity of an identifier or generic name node.
pub fn simple_name_parts(arena: &NodeArena, node: NodeIndex) -> Option<(&str, u32)> {
    let data = arena.get(node)?;
    if data.kind == syntax_kind_ext::GENERIC_NAME {
        let generic = arena.get_generic_name(data)?;
        let name = arena.identifier_text(generic.name)?;
        return Some((name, generic.type_arguments.len() as u32));
    }
    arena.identifier_text(node).map(|name| (name, 0))
}

fn join_namespace(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}.{name}")
    }
}

fn has_type_parameter(arena: &NodeArena, parameters: &NodeList, name: &str) -> bool {
    parameters
        .iter()
        .any(|parameter| arena.identifier_text(parameter) == Some(name))
}

impl SemanticModel<'_> {
    // =========================================================================
    // Type nodes
    // =========================================================================

    /// The type a type syntax node denotes. Arrays, pointers, tuples and type
    /// parameters have no type identity here.
    pub fn resolve_type(&self, type_node: NodeIndex) -> Option<TypeId> {
        let arena = self.arena();
        let node = arena.get(type_node)?;
        match node.kind {
            syntax_kind_ext::PREDEFINED_TYPE => {
                let keyword = arena.get_predefined_type(node)?.keyword;
                self.types().lookup_metadata_name(predefined_type_name(keyword)?)
            }
            // `T?` on a reference type is the same type
            syntax_kind_ext::NULLABLE_TYPE | syntax_kind_ext::REF_TYPE => {
                self.resolve_type(arena.get_wrapped_type(node)?.element_type)
            }
            _ => match self.resolve_namespace_or_type(type_node)? {
                NamespaceOrType::Type(id) => Some(id),
                NamespaceOrType::Namespace(_) => None,
            },
        }
    }

    /// `var` used as an implicit type (not a type named `var`).
    pub fn is_implicit_type(&self, type_node: NodeIndex) -> bool {
        type_node.is_some()
            && self.arena().identifier_text(type_node) == Some("var")
            && self.lookup_type_name("var", 0, type_node).is_none()
    }

    /// Resolve a name node (identifier, generic, qualified or alias-qualified).
    pub fn resolve_namespace_or_type(&self, node: NodeIndex) -> Option<NamespaceOrType> {
        let _guard = self.enter()?;
        let arena = self.arena();
        let data = arena.get(node)?;
        match data.kind {
            syntax_kind_ext::QUALIFIED_NAME => {
                let name = arena.get_qualified_name(data)?;
                let left = self.resolve_namespace_or_type(name.left)?;
                self.member_namespace_or_type(&left, name.right)
            }
            syntax_kind_ext::ALIAS_QUALIFIED_NAME => {
                let name = arena.get_qualified_name(data)?;
                let alias = arena.identifier_text(name.left)?;
                let left = if alias == "global" {
                    NamespaceOrType::Namespace(String::new())
                } else {
                    self.lookup_namespace_name(alias, node)
                        .map(NamespaceOrType::Namespace)?
                };
                self.member_namespace_or_type(&left, name.right)
            }
            syntax_kind_ext::PREDEFINED_TYPE => self.resolve_type(node).map(NamespaceOrType::Type),
            _ => {
                let (name, arity) = simple_name_parts(arena, node)?;
                self.lookup_type_name(name, arity, node)
                    .map(NamespaceOrType::Type)
                    .or_else(|| {
                        (arity == 0)
                            .then(|| self.lookup_namespace_name(name, node))
                            .flatten()
                            .map(NamespaceOrType::Namespace)
                    })
            }
        }
    }

    /// `container.right` where `right` is an identifier or generic name.
    pub(crate) fn member_namespace_or_type(
        &self,
        container: &NamespaceOrType,
        right: NodeIndex,
    ) -> Option<NamespaceOrType> {
        self.member_in(self.arena(), container, right)
    }

    fn member_in(
        &self,
        arena: &NodeArena,
        container: &NamespaceOrType,
        right: NodeIndex,
    ) -> Option<NamespaceOrType> {
        let (name, arity) = simple_name_parts(arena, right)?;
        match container {
            NamespaceOrType::Namespace(namespace) => {
                let full = join_namespace(namespace, name);
                if let Some(id) = self.types().lookup(&TypeKey::new(full.clone(), arity)) {
                    Some(NamespaceOrType::Type(id))
                } else if arity == 0 && self.types().is_namespace(&full) {
                    Some(NamespaceOrType::Namespace(full))
                } else {
                    None
                }
            }
            NamespaceOrType::Type(outer) => self
                .types()
                .find_nested_type(*outer, name, arity)
                .map(NamespaceOrType::Type),
        }
    }

    /// Resolve a using directive target. Targets are fully qualified names,
    /// so they never see other using directives.
    fn directive_target(&self, arena: &NodeArena, node: NodeIndex) -> Option<NamespaceOrType> {
        let data = arena.get(node)?;
        match data.kind {
            syntax_kind_ext::QUALIFIED_NAME => {
                let name = arena.get_qualified_name(data)?;
                let left = self.directive_target(arena, name.left)?;
                self.member_in(arena, &left, name.right)
            }
            syntax_kind_ext::ALIAS_QUALIFIED_NAME => {
                let name = arena.get_qualified_name(data)?;
                self.member_in(arena, &NamespaceOrType::Namespace(String::new()), name.right)
            }
            syntax_kind_ext::PREDEFINED_TYPE => {
                let keyword = arena.get_predefined_type(data)?.keyword;
                self.types()
                    .lookup_metadata_name(predefined_type_name(keyword)?)
                    .map(NamespaceOrType::Type)
            }
            _ => self.member_in(arena, &NamespaceOrType::Namespace(String::new()), node),
        }
    }

    // =========================================================================
    // Simple names
    // =========================================================================

    /// Look up a simple type name as seen from `context`.
    pub fn lookup_type_name(&self, name: &str, arity: u32, context: NodeIndex) -> Option<TypeId> {
        let arena = self.arena();

        // Type parameters and nested types of enclosing declarations
        for ancestor in std::iter::once(context).chain(arena.ancestors(context)) {
            let Some(node) = arena.get(ancestor) else {
                continue;
            };
            if let Some(method) = arena.get_method(node) {
                if arity == 0 && has_type_parameter(arena, &method.type_parameters, name) {
                    return None;
                }
            } else if let Some(declaration) = arena.get_type_decl(node) {
                if arity == 0 && has_type_parameter(arena, &declaration.type_parameters, name) {
                    return None;
                }
                if let Some(owner) = self.compilation().declared_type(self.file_index(), ancestor)
                    && let Some(nested) = self.types().find_nested_type(owner, name, arity)
                {
                    return Some(nested);
                }
            }
        }

        for scope in self.import_scopes(context) {
            for level in &scope.levels {
                let key = TypeKey::new(join_namespace(level, name), arity);
                if let Some(id) = self.types().lookup(&key) {
                    return Some(id);
                }
            }
            if scope.levels.is_empty()
                && let Some(id) = self.types().lookup(&TypeKey::new(name, arity))
            {
                return Some(id);
            }
            let directives = scope.directives.iter().map(|&d| (self.file_index(), d));
            if scope.levels.is_empty() {
                let global = self.compilation().global_usings().iter().copied();
                if let Some(id) = self.type_from_directives(directives.chain(global), name, arity) {
                    return Some(id);
                }
            } else if let Some(id) = self.type_from_directives(directives, name, arity) {
                return Some(id);
            }
        }
        None
    }

    /// Look up a simple namespace name (or namespace alias) from `context`.
    pub fn lookup_namespace_name(&self, name: &str, context: NodeIndex) -> Option<String> {
        for scope in self.import_scopes(context) {
            for level in &scope.levels {
                let candidate = join_namespace(level, name);
                if self.types().is_namespace(&candidate) {
                    return Some(candidate);
                }
            }
            if scope.levels.is_empty() && self.types().is_namespace(name) {
                return Some(name.to_string());
            }
            if let Some(target) = self.alias_namespace(&scope.directives, name) {
                return Some(target);
            }
        }
        None
    }

    fn type_from_directives(
        &self,
        directives: impl Iterator<Item = (usize, NodeIndex)>,
        name: &str,
        arity: u32,
    ) -> Option<TypeId> {
        let mut imported = None;
        for (file, directive) in directives {
            let Some(source) = self.compilation().file(file) else {
                continue;
            };
            let arena = &source.arena;
            let Some(using) = arena.get(directive).and_then(|n| arena.get_using_directive(n)) else {
                continue;
            };
            if using.alias.is_some() {
                if arity == 0
                    && arena.identifier_text(using.alias) == Some(name)
                    && let Some(NamespaceOrType::Type(id)) = self.directive_target(arena, using.name)
                {
                    return Some(id);
                }
                continue;
            }
            if imported.is_some() {
                continue;
            }
            imported = match self.directive_target(arena, using.name) {
                Some(NamespaceOrType::Type(owner)) if using.is_static => {
                    self.types().find_nested_type(owner, name, arity)
                }
                Some(NamespaceOrType::Namespace(namespace)) if !using.is_static => self
                    .types()
                    .lookup(&TypeKey::new(join_namespace(&namespace, name), arity)),
                _ => None,
            };
        }
        imported
    }

    fn alias_namespace(&self, directives: &[NodeIndex], name: &str) -> Option<String> {
        let arena = self.arena();
        directives.iter().find_map(|&directive| {
            let using = arena.get_using_directive(arena.get(directive)?)?;
            if arena.identifier_text(using.alias) != Some(name) {
                return None;
            }
            let target = qualified_name_text(arena, using.name)?;
            self.types().is_namespace(&target).then_some(target)
        })
    }

    /// Namespace declaration levels around `node`, innermost first, ending
    /// with the file level.
    fn import_scopes(&self, node: NodeIndex) -> SmallVec<[ImportScope; 4]> {
        let arena = self.arena();
        // (relative name, members) from innermost to outermost
        let mut declarations: SmallVec<[(String, NodeIndex); 4]> = SmallVec::new();
        let mut file_members = None;
        for ancestor in std::iter::once(node).chain(arena.ancestors(node)) {
            let Some(data) = arena.get(ancestor) else {
                continue;
            };
            if is_namespace_declaration(data.kind) {
                if let Some(namespace) = arena.get_namespace(data) {
                    let name = qualified_name_text(arena, namespace.name).unwrap_or_default();
                    declarations.push((name, ancestor));
                }
            } else if data.kind == syntax_kind_ext::SOURCE_FILE {
                file_members = arena.get_source_file(data).map(|file| &file.members);
            }
        }

        let using_directives = |members: &NodeList| -> SmallVec<[NodeIndex; 8]> {
            members
                .iter()
                .filter(|&member| arena.kind(member) == Some(syntax_kind_ext::USING_DIRECTIVE))
                .filter(|&member| {
                    arena
                        .get(member)
                        .and_then(|n| arena.get_using_directive(n))
                        .is_some_and(|using| !using.is_global)
                })
                .collect()
        };

        let mut scopes: SmallVec<[ImportScope; 4]> = SmallVec::new();
        let mut outer = String::new();
        let mut full_names: SmallVec<[(String, String); 4]> = SmallVec::new();
        for (relative, _) in declarations.iter().rev() {
            let full = join_namespace(&outer, relative);
            full_names.push((outer.clone(), full.clone()));
            outer = full;
        }
        for ((parent, full), (_, declaration)) in
            full_names.iter().rev().zip(declarations.iter())
        {
            let mut levels = SmallVec::new();
            let mut current = full.as_str();
            while current.len() > parent.len() && !current.is_empty() {
                levels.push(current.to_string());
                current = current.rfind('.').map_or("", |dot| &current[..dot]);
            }
            let directives = arena
                .get(*declaration)
                .and_then(|n| arena.get_namespace(n))
                .map(|namespace| using_directives(&namespace.members))
                .unwrap_or_default();
            scopes.push(ImportScope { levels, directives });
        }
        scopes.push(ImportScope {
            levels: SmallVec::new(),
            directives: file_members.map(using_directives).unwrap_or_default(),
        });
        scopes
    }

    /// The type declared by the nearest enclosing type declaration.
    pub fn enclosing_type(&self, node: NodeIndex) -> Option<TypeId> {
        let arena = self.arena();
        arena
            .ancestors(node)
            .find(|&ancestor| arena.kind(ancestor).is_some_and(is_type_declaration))
            .and_then(|declaration| self.compilation().declared_type(self.file_index(), declaration))
    }
}
