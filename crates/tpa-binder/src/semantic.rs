//! Per-file semantic queries: what a name refers to and the type of an
//! expression.

use std::cell::Cell;

use tpa_parser::node::{AccessorKind, ModifierFlags, NodeArena};
use tpa_parser::{
    NodeIndex, NodeList, is_method_like, is_namespace_declaration, is_type_declaration,
    syntax_kind_ext,
};
use tpa_scanner::SyntaxKind;

use crate::compilation::{Compilation, SourceFile};
use crate::metadata::MemberKind;
use crate::scope::{NamespaceOrType, simple_name_parts};
use crate::types::{MemberInfo, TypeId, TypeTable};

/// Nested binding requests allowed before giving up on a query.
const MAX_BINDING_DEPTH: u32 = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Namespace,
    Type,
    Field,
    Property,
    Method,
    Event,
    Local,
    Parameter,
}

/// What a name or declaration refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub kind: SymbolKind,
    /// Simple name; full name for namespaces.
    pub name: String,
    /// Value type of fields, properties, events, locals and parameters;
    /// return type of methods; the type itself for types.
    pub type_id: Option<TypeId>,
    pub containing_type: Option<TypeId>,
    pub is_static: bool,
    /// Declaring node in the queried file, NONE when declared elsewhere.
    pub declaration: NodeIndex,
}

impl Symbol {
    pub fn is_property_like(&self) -> bool {
        self.kind == SymbolKind::Property
    }

    /// Symbols that denote a value when used as an expression.
    pub fn is_value(&self) -> bool {
        matches!(
            self.kind,
            SymbolKind::Field
                | SymbolKind::Property
                | SymbolKind::Event
                | SymbolKind::Local
                | SymbolKind::Parameter
        )
    }

    fn member(member: &MemberInfo) -> Symbol {
        Symbol {
            kind: match member.kind {
                MemberKind::Field => SymbolKind::Field,
                MemberKind::Property => SymbolKind::Property,
                MemberKind::Method => SymbolKind::Method,
                MemberKind::Event => SymbolKind::Event,
            },
            name: member.name.clone(),
            type_id: member.type_id,
            containing_type: Some(member.declaring_type),
            is_static: member.is_static,
            declaration: NodeIndex::NONE,
        }
    }

    fn of_type(types: &TypeTable, id: TypeId) -> Symbol {
        let info = types.get(id);
        Symbol {
            kind: SymbolKind::Type,
            name: info.map(|info| info.simple_name().to_string()).unwrap_or_default(),
            type_id: Some(id),
            containing_type: info.and_then(|info| info.containing_type),
            is_static: true,
            declaration: NodeIndex::NONE,
        }
    }

    fn namespace(name: String) -> Symbol {
        Symbol {
            kind: SymbolKind::Namespace,
            name,
            type_id: None,
            containing_type: None,
            is_static: true,
            declaration: NodeIndex::NONE,
        }
    }

    fn from_namespace_or_type(types: &TypeTable, resolved: NamespaceOrType) -> Symbol {
        match resolved {
            NamespaceOrType::Namespace(name) => Symbol::namespace(name),
            NamespaceOrType::Type(id) => Symbol::of_type(types, id),
        }
    }
}

/// Decrements the binding depth when a nested query finishes.
pub(crate) struct DepthGuard<'m> {
    depth: &'m Cell<u32>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

/// Semantic queries over one file of a compilation.
///
/// Cheap to create; holds no caches.
pub struct SemanticModel<'a> {
    compilation: &'a Compilation,
    file_index: usize,
    file: &'a SourceFile,
    depth: Cell<u32>,
}

impl<'a> SemanticModel<'a> {
    pub(crate) fn new(compilation: &'a Compilation, file_index: usize, file: &'a SourceFile) -> Self {
        SemanticModel {
            compilation,
            file_index,
            file,
            depth: Cell::new(0),
        }
    }

    pub fn compilation(&self) -> &'a Compilation {
        self.compilation
    }

    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    pub fn file_index(&self) -> usize {
        self.file_index
    }

    pub fn arena(&self) -> &'a NodeArena {
        &self.file.arena
    }

    pub fn types(&self) -> &'a TypeTable {
        self.compilation.types()
    }

    pub(crate) fn enter(&self) -> Option<DepthGuard<'_>> {
        let depth = self.depth.get();
        if depth >= MAX_BINDING_DEPTH {
            return None;
        }
        self.depth.set(depth + 1);
        Some(DepthGuard { depth: &self.depth })
    }

    // =========================================================================
    // Symbols
    // =========================================================================

    /// The symbol a name, member access, invocation or object creation
    /// refers to.
    pub fn symbol_info(&self, node: NodeIndex) -> Option<Symbol> {
        let _guard = self.enter()?;
        let arena = self.arena();
        let data = arena.get(node)?;
        match data.kind {
            k if k == SyntaxKind::Identifier as u16 => {
                let parent = arena.parent(node);
                if let Some(access) = arena.get(parent).and_then(|p| arena.get_member_access(p))
                    && access.name == node
                {
                    return self.symbol_info(parent);
                }
                self.lookup_simple_name(arena.identifier_text(node)?, node)
            }
            syntax_kind_ext::GENERIC_NAME => {
                let (name, arity) = simple_name_parts(arena, node)?;
                if let Some(id) = self.lookup_type_name(name, arity, node) {
                    return Some(Symbol::of_type(self.types(), id));
                }
                // Generic method name
                self.lookup_member_in_enclosing_types(name, node)
            }
            syntax_kind_ext::MEMBER_ACCESS_EXPRESSION => {
                let access = arena.get_member_access(data)?;
                let names_something = matches!(
                    arena.kind(access.expression),
                    Some(
                        syntax_kind_ext::MEMBER_ACCESS_EXPRESSION
                            | syntax_kind_ext::GENERIC_NAME
                            | syntax_kind_ext::ALIAS_QUALIFIED_NAME
                            | syntax_kind_ext::PREDEFINED_TYPE
                    )
                ) || arena.kind(access.expression) == Some(SyntaxKind::Identifier as u16);
                let container = if names_something {
                    self.symbol_info(access.expression)?
                } else {
                    // `(a ?? b).Now`, `provider.GetUtcNow().DateTime`
                    Symbol {
                        kind: SymbolKind::Local,
                        name: String::new(),
                        type_id: Some(self.type_of_expression(access.expression)?),
                        containing_type: None,
                        is_static: false,
                        declaration: NodeIndex::NONE,
                    }
                };
                self.member_of_symbol(&container, access.name)
            }
            syntax_kind_ext::QUALIFIED_NAME
            | syntax_kind_ext::ALIAS_QUALIFIED_NAME
            | syntax_kind_ext::PREDEFINED_TYPE => self
                .resolve_namespace_or_type(node)
                .map(|resolved| Symbol::from_namespace_or_type(self.types(), resolved)),
            syntax_kind_ext::INVOCATION_EXPRESSION => {
                let call = arena.get_call_expr(data)?;
                self.symbol_info(call.expression)
                    .filter(|symbol| symbol.kind == SymbolKind::Method)
            }
            syntax_kind_ext::OBJECT_CREATION_EXPRESSION => {
                let creation = arena.get_object_creation(data)?;
                let id = self.resolve_type(creation.type_node)?;
                Some(Symbol::of_type(self.types(), id))
            }
            _ => None,
        }
    }

    /// Member `name_node` of whatever `container` denotes.
    fn member_of_symbol(&self, container: &Symbol, name_node: NodeIndex) -> Option<Symbol> {
        let (name, _) = simple_name_parts(self.arena(), name_node)?;
        match container.kind {
            SymbolKind::Namespace => self
                .member_namespace_or_type(&NamespaceOrType::Namespace(container.name.clone()), name_node)
                .map(|resolved| Symbol::from_namespace_or_type(self.types(), resolved)),
            SymbolKind::Type => {
                let owner = container.type_id?;
                if let Some(member) = self.types().find_member(owner, name) {
                    return Some(Symbol::member(member));
                }
                self.member_namespace_or_type(&NamespaceOrType::Type(owner), name_node)
                    .map(|resolved| Symbol::from_namespace_or_type(self.types(), resolved))
            }
            SymbolKind::Method => None,
            _ => {
                let value_type = container.type_id?;
                self.types().find_member(value_type, name).map(Symbol::member)
            }
        }
    }

    /// Simple name in expression context: locals and parameters, members of
    /// enclosing types, then types and namespaces.
    fn lookup_simple_name(&self, name: &str, node: NodeIndex) -> Option<Symbol> {
        if let Some(local) = self.lookup_local(name, node) {
            return Some(local);
        }
        if let Some(member) = self.lookup_member_in_enclosing_types(name, node) {
            return Some(member);
        }
        if let Some(id) = self.lookup_type_name(name, 0, node) {
            return Some(Symbol::of_type(self.types(), id));
        }
        self.lookup_namespace_name(name, node).map(Symbol::namespace)
    }

    fn lookup_member_in_enclosing_types(&self, name: &str, node: NodeIndex) -> Option<Symbol> {
        let arena = self.arena();
        arena
            .ancestors(node)
            .filter(|&ancestor| arena.kind(ancestor).is_some_and(is_type_declaration))
            .filter_map(|declaration| self.compilation.declared_type(self.file_index, declaration))
            .find_map(|owner| self.types().find_member(owner, name))
            .map(Symbol::member)
    }

    // =========================================================================
    // Locals and parameters
    // =========================================================================

    /// Parameter or local named `name` visible at `node`.
    pub fn lookup_local(&self, name: &str, node: NodeIndex) -> Option<Symbol> {
        let arena = self.arena();
        let mut body_root = node;
        for ancestor in arena.ancestors(node) {
            let Some(data) = arena.get(ancestor) else {
                continue;
            };
            if is_type_declaration(data.kind)
                || is_namespace_declaration(data.kind)
                || data.kind == syntax_kind_ext::DELEGATE_DECLARATION
            {
                break;
            }
            body_root = ancestor;
            if data.kind == syntax_kind_ext::SOURCE_FILE {
                break;
            }
            let parameters = match data.kind {
                syntax_kind_ext::LAMBDA_EXPRESSION | syntax_kind_ext::ANONYMOUS_METHOD_EXPRESSION => {
                    arena.get_lambda(data).map(|lambda| &lambda.parameters)
                }
                syntax_kind_ext::INDEXER_DECLARATION => {
                    arena.get_property(data).map(|property| &property.parameters)
                }
                _ => arena.get_method(data).map(|method| &method.parameters),
            };
            if let Some(symbol) = parameters.and_then(|list| self.parameter_named(list, name)) {
                return Some(symbol);
            }
            if name == "value"
                && let Some(symbol) = self.accessor_value_parameter(ancestor)
            {
                return Some(symbol);
            }
        }
        if let Some(symbol) = self.local_named(body_root, name, node) {
            return Some(symbol);
        }
        self.primary_constructor_parameter(name, node)
    }

    fn parameter_named(&self, parameters: &NodeList, name: &str) -> Option<Symbol> {
        let arena = self.arena();
        parameters
            .iter()
            .find(|&parameter| {
                arena
                    .get(parameter)
                    .and_then(|p| arena.get_parameter(p))
                    .is_some_and(|p| arena.identifier_text(p.name) == Some(name))
            })
            .and_then(|parameter| self.declared_symbol(parameter))
    }

    /// Implicit `value` parameter of `set`, `init`, `add` and `remove`.
    fn accessor_value_parameter(&self, accessor: NodeIndex) -> Option<Symbol> {
        let arena = self.arena();
        let data = arena.get_accessor(arena.get(accessor)?)?;
        if matches!(data.keyword, AccessorKind::Get | AccessorKind::Unknown) {
            return None;
        }
        let property = arena
            .ancestors(accessor)
            .find_map(|ancestor| arena.get_property(arena.get(ancestor)?))?;
        Some(Symbol {
            kind: SymbolKind::Parameter,
            name: "value".to_string(),
            type_id: self.resolve_type(property.type_node),
            containing_type: None,
            is_static: false,
            declaration: accessor,
        })
    }

    /// Primary constructor parameters are in scope in the whole type body.
    fn primary_constructor_parameter(&self, name: &str, node: NodeIndex) -> Option<Symbol> {
        let arena = self.arena();
        arena.ancestors(node).find_map(|ancestor| {
            let declaration = arena.get_type_decl(arena.get(ancestor)?)?;
            self.parameter_named(declaration.parameters.as_ref()?, name)
        })
    }

    /// Closest local named `name` declared in `root` before `node` whose scope
    /// contains `node`.
    fn local_named(&self, root: NodeIndex, name: &str, node: NodeIndex) -> Option<Symbol> {
        let arena = self.arena();
        let use_span = arena.span(node)?;
        let mut best: Option<(u32, NodeIndex)> = None;
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let Some(data) = arena.get(current) else {
                continue;
            };
            if current != root
                && (is_type_declaration(data.kind)
                    || is_namespace_declaration(data.kind)
                    || data.kind == syntax_kind_ext::DELEGATE_DECLARATION)
            {
                continue;
            }
            if data.pos >= use_span.start {
                continue;
            }
            // `var x = x;` does not see itself
            let encloses_use = data.kind == syntax_kind_ext::VARIABLE_DECLARATOR
                && use_span.end <= data.end;
            if let Some(name_node) = self.local_declaration_name(current)
                && arena.identifier_text(name_node) == Some(name)
                && !encloses_use
                && self.local_scope_contains(current, use_span.start)
                && best.is_none_or(|(start, _)| data.pos > start)
            {
                best = Some((data.pos, current));
            }
            stack.extend(arena.children(current));
        }
        best.and_then(|(_, declaration)| self.declared_symbol(declaration))
    }

    /// Name node of a node that declares a local, if it is one.
    fn local_declaration_name(&self, node: NodeIndex) -> Option<NodeIndex> {
        let arena = self.arena();
        let data = arena.get(node)?;
        let name = match data.kind {
            syntax_kind_ext::VARIABLE_DECLARATOR => {
                let declaration = arena.parent(node);
                let holder = arena.kind(arena.parent(declaration));
                if matches!(
                    holder,
                    Some(syntax_kind_ext::FIELD_DECLARATION | syntax_kind_ext::EVENT_FIELD_DECLARATION)
                ) {
                    return None;
                }
                arena.get_variable_declarator(data)?.name
            }
            syntax_kind_ext::FOREACH_STATEMENT => arena.get_foreach(data)?.variable,
            syntax_kind_ext::CATCH_CLAUSE => arena.get_catch_clause(data)?.identifier,
            syntax_kind_ext::DECLARATION_EXPRESSION => arena.get_declaration_expr(data)?.designation,
            syntax_kind_ext::DECLARATION_PATTERN
            | syntax_kind_ext::VAR_PATTERN
            | syntax_kind_ext::RECURSIVE_PATTERN => arena.get_pattern(data)?.designation,
            _ => return None,
        };
        (arena.kind(name) == Some(SyntaxKind::Identifier as u16)).then_some(name)
    }

    /// Whether the scope a local declaration introduces covers `offset`.
    fn local_scope_contains(&self, declaration: NodeIndex, offset: u32) -> bool {
        let arena = self.arena();
        let scope = match arena.kind(declaration) {
            Some(syntax_kind_ext::FOREACH_STATEMENT | syntax_kind_ext::CATCH_CLAUSE) => declaration,
            _ => arena
                .ancestors(declaration)
                .find(|&ancestor| {
                    matches!(
                        arena.kind(ancestor),
                        Some(
                            syntax_kind_ext::BLOCK
                                | syntax_kind_ext::SWITCH_SECTION
                                | syntax_kind_ext::FOR_STATEMENT
                                | syntax_kind_ext::USING_STATEMENT
                                | syntax_kind_ext::FIXED_STATEMENT
                                | syntax_kind_ext::LAMBDA_EXPRESSION
                                | syntax_kind_ext::SOURCE_FILE
                        )
                    ) || arena.kind(ancestor).is_some_and(is_method_like)
                })
                .unwrap_or(declaration),
        };
        arena
            .span(scope)
            .is_some_and(|span| span.start <= offset && offset < span.end)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// The symbol a declaration node declares: parameters, variable
    /// declarators (locals and fields), properties, events, methods, types,
    /// foreach variables, catch variables and designations.
    pub fn declared_symbol(&self, node: NodeIndex) -> Option<Symbol> {
        let arena = self.arena();
        let data = arena.get(node)?;
        let value = |kind: SymbolKind, name_node: NodeIndex, type_id: Option<TypeId>| Symbol {
            kind,
            name: arena.identifier_text(name_node).unwrap_or_default().to_string(),
            type_id,
            containing_type: None,
            is_static: false,
            declaration: node,
        };
        match data.kind {
            syntax_kind_ext::PARAMETER => {
                let parameter = arena.get_parameter(data)?;
                let type_id = self.resolve_type(parameter.type_node);
                Some(value(SymbolKind::Parameter, parameter.name, type_id))
            }
            syntax_kind_ext::VARIABLE_DECLARATOR => {
                let declarator = arena.get_variable_declarator(data)?;
                let declaration_node = arena.parent(node);
                let declaration = arena
                    .get(declaration_node)
                    .and_then(|d| arena.get_variable_declaration(d))?;
                let holder = arena.parent(declaration_node);
                if let Some(field) = arena.get(holder).and_then(|h| arena.get_field(h)) {
                    let kind = if arena.kind(holder) == Some(syntax_kind_ext::EVENT_FIELD_DECLARATION) {
                        SymbolKind::Event
                    } else {
                        SymbolKind::Field
                    };
                    return Some(Symbol {
                        containing_type: self.enclosing_type(node),
                        is_static: field.modifiers.intersects(ModifierFlags::STATIC | ModifierFlags::CONST),
                        ..value(kind, declarator.name, self.resolve_type(declaration.type_node))
                    });
                }
                let type_id = if self.is_implicit_type(declaration.type_node) {
                    self.type_of_expression(declarator.initializer)
                } else {
                    self.resolve_type(declaration.type_node)
                };
                Some(value(SymbolKind::Local, declarator.name, type_id))
            }
            syntax_kind_ext::ENUM_MEMBER_DECLARATION => {
                let member = arena.get_variable_declarator(data)?;
                let owner = self.enclosing_type(node);
                Some(Symbol {
                    containing_type: owner,
                    is_static: true,
                    ..value(SymbolKind::Field, member.name, owner)
                })
            }
            syntax_kind_ext::PROPERTY_DECLARATION | syntax_kind_ext::EVENT_DECLARATION => {
                let property = arena.get_property(data)?;
                let kind = if data.kind == syntax_kind_ext::EVENT_DECLARATION {
                    SymbolKind::Event
                } else {
                    SymbolKind::Property
                };
                Some(Symbol {
                    containing_type: self.enclosing_type(node),
                    is_static: property.modifiers.contains(ModifierFlags::STATIC),
                    ..value(kind, property.name, self.resolve_type(property.type_node))
                })
            }
            syntax_kind_ext::METHOD_DECLARATION | syntax_kind_ext::LOCAL_FUNCTION_STATEMENT => {
                let method = arena.get_method(data)?;
                let containing_type = (data.kind == syntax_kind_ext::METHOD_DECLARATION)
                    .then(|| self.enclosing_type(node))
                    .flatten();
                Some(Symbol {
                    containing_type,
                    is_static: method.modifiers.contains(ModifierFlags::STATIC),
                    ..value(SymbolKind::Method, method.name, self.resolve_type(method.return_type))
                })
            }
            syntax_kind_ext::FOREACH_STATEMENT => {
                let foreach = arena.get_foreach(data)?;
                Some(value(SymbolKind::Local, foreach.variable, self.explicit_type(foreach.type_node)))
            }
            syntax_kind_ext::CATCH_CLAUSE => {
                let catch = arena.get_catch_clause(data)?;
                Some(value(SymbolKind::Local, catch.identifier, self.resolve_type(catch.type_node)))
            }
            syntax_kind_ext::DECLARATION_EXPRESSION => {
                let declaration = arena.get_declaration_expr(data)?;
                Some(value(
                    SymbolKind::Local,
                    declaration.designation,
                    self.explicit_type(declaration.type_node),
                ))
            }
            syntax_kind_ext::DECLARATION_PATTERN
            | syntax_kind_ext::VAR_PATTERN
            | syntax_kind_ext::RECURSIVE_PATTERN => {
                let pattern = arena.get_pattern(data)?;
                Some(value(
                    SymbolKind::Local,
                    pattern.designation,
                    self.explicit_type(pattern.type_node),
                ))
            }
            kind if is_type_declaration(kind) || kind == syntax_kind_ext::DELEGATE_DECLARATION => {
                let id = self.compilation.declared_type(self.file_index, node)?;
                Some(Symbol {
                    declaration: node,
                    ..Symbol::of_type(self.types(), id)
                })
            }
            _ => None,
        }
    }

    /// Declared type, or None for an implicit `var`.
    fn explicit_type(&self, type_node: NodeIndex) -> Option<TypeId> {
        if self.is_implicit_type(type_node) {
            None
        } else {
            self.resolve_type(type_node)
        }
    }

    // =========================================================================
    // Expression types
    // =========================================================================

    /// Static type of an expression, when it is a named type.
    pub fn type_of_expression(&self, expr: NodeIndex) -> Option<TypeId> {
        let _guard = self.enter()?;
        let arena = self.arena();
        let data = arena.get(expr)?;
        let types = self.types();
        match data.kind {
            k if k == SyntaxKind::Identifier as u16 => self.value_type(expr),
            syntax_kind_ext::MEMBER_ACCESS_EXPRESSION | syntax_kind_ext::GENERIC_NAME => {
                self.value_type(expr)
            }
            syntax_kind_ext::INVOCATION_EXPRESSION => self.symbol_info(expr)?.type_id,
            syntax_kind_ext::OBJECT_CREATION_EXPRESSION => {
                self.resolve_type(arena.get_object_creation(data)?.type_node)
            }
            syntax_kind_ext::CAST_EXPRESSION => self.resolve_type(arena.get_cast(data)?.type_node),
            syntax_kind_ext::AS_EXPRESSION => self.resolve_type(arena.get_binary_expr(data)?.right),
            syntax_kind_ext::ASSIGNMENT_EXPRESSION => {
                self.type_of_expression(arena.get_binary_expr(data)?.left)
            }
            syntax_kind_ext::BINARY_EXPRESSION => {
                let binary = arena.get_binary_expr(data)?;
                if binary.operator_token != SyntaxKind::QuestionQuestionToken {
                    return None;
                }
                self.type_of_expression(binary.left)
                    .or_else(|| self.type_of_expression(binary.right))
            }
            syntax_kind_ext::PARENTHESIZED_EXPRESSION => {
                self.type_of_expression(arena.get_parenthesized(data)?.expression)
            }
            syntax_kind_ext::CONDITIONAL_EXPRESSION => {
                let conditional = arena.get_conditional_expr(data)?;
                self.type_of_expression(conditional.when_true)
                    .or_else(|| self.type_of_expression(conditional.when_false))
            }
            syntax_kind_ext::SWITCH_EXPRESSION => arena
                .get_switch_expr(data)?
                .arms
                .iter()
                .filter_map(|arm| arena.get(arm).and_then(|a| arena.get_switch_arm(a)))
                .find_map(|arm| self.type_of_expression(arm.expression)),
            syntax_kind_ext::THIS_EXPRESSION => self.enclosing_type(expr),
            syntax_kind_ext::BASE_EXPRESSION => types.get(self.enclosing_type(expr)?)?.base_type,
            syntax_kind_ext::DEFAULT_EXPRESSION => {
                self.resolve_type(arena.get_type_operand(data)?.type_node)
            }
            syntax_kind_ext::TYPEOF_EXPRESSION => types.lookup_metadata_name("System.Type"),
            syntax_kind_ext::INTERPOLATED_STRING_EXPRESSION => {
                types.lookup_metadata_name("System.String")
            }
            syntax_kind_ext::LITERAL_EXPRESSION => {
                let literal = arena.get_literal(data)?;
                types.lookup_metadata_name(literal_type_name(literal.token, &literal.text)?)
            }
            _ => None,
        }
    }

    fn value_type(&self, expr: NodeIndex) -> Option<TypeId> {
        self.symbol_info(expr)
            .filter(Symbol::is_value)
            .and_then(|symbol| symbol.type_id)
    }
}

fn literal_type_name(token: SyntaxKind, text: &str) -> Option<&'static str> {
    Some(match token {
        SyntaxKind::StringLiteral => "System.String",
        SyntaxKind::CharacterLiteral => "System.Char",
        SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => "System.Boolean",
        SyntaxKind::NumericLiteral => {
            let lower = text.to_ascii_lowercase();
            let hex = lower.starts_with("0x") || lower.starts_with("0b");
            if lower.ends_with('m') {
                "System.Decimal"
            } else if !hex && lower.ends_with('f') {
                "System.Single"
            } else if (!hex && lower.ends_with('d')) || lower.contains('.') || (!hex && lower.contains('e')) {
                "System.Double"
            } else if lower.ends_with("ul") || lower.ends_with("lu") {
                "System.UInt64"
            } else if lower.ends_with('l') {
                "System.Int64"
            } else if lower.ends_with('u') {
                "System.UInt32"
            } else {
                "System.Int32"
            }
        }
        _ => return None,
    })
}
