//! Finding the closest `TimeProvider` reachable from an expression.
//!
//! Resolution is lexical and confined to the enclosing method-like
//! declaration and the type declaration that directly contains it (with the
//! types nested inside that one). The search order is fixed:
//!
//! 1. parameters of the method-like declaration, in declaration order
//! 2. locals of the method body that start before the expression, in
//!    pre-order
//! 3. fields anywhere in the containing type's subtree, then properties,
//!    in document order
//!
//! The first binding whose type is `TimeProvider` (or implements it) wins.

use tpa_binder::{SemanticModel, SymbolKind, TypeId, TypeTable};
use tpa_parser::{NodeIndex, is_method_like, is_type_declaration, syntax_kind_ext};
use tracing::trace;

use crate::cancellation::CancellationToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Parameter,
    Local,
    Field,
    Property,
}

/// A reachable binding of the time-abstraction type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub kind: BindingKind,
    /// The declaring node: parameter, variable declarator or property.
    pub declaration: NodeIndex,
}

/// Identity, or an interface implemented by `candidate`.
///
/// Deriving from the time-abstraction class is not enough.
pub fn is_time_provider_type(types: &TypeTable, candidate: Option<TypeId>, time_provider: TypeId) -> bool {
    match candidate {
        Some(id) if id == time_provider => true,
        Some(id) => types.all_interfaces(id).contains(&time_provider),
        None => false,
    }
}

pub struct ScopeResolver<'m, 'a> {
    model: &'m SemanticModel<'a>,
    time_provider: TypeId,
    cancel: &'m CancellationToken,
}

impl<'m, 'a> ScopeResolver<'m, 'a> {
    pub fn new(model: &'m SemanticModel<'a>, time_provider: TypeId, cancel: &'m CancellationToken) -> Self {
        ScopeResolver {
            model,
            time_provider,
            cancel,
        }
    }

    /// The closest binding reachable from `expr`, or None.
    ///
    /// Expressions outside any method-like declaration (field initializers,
    /// property accessors, top-level statements) never find one.
    pub fn resolve(&self, expr: NodeIndex) -> Option<Binding> {
        let arena = self.model.arena();
        let method = arena.find_ancestor(expr, is_method_like);
        if method.is_none() {
            trace!(expr = expr.0, "no enclosing method-like declaration");
            return None;
        }
        let expr_start = arena.get(expr)?.pos;

        self.parameter_binding(method)
            .or_else(|| self.local_binding(method, expr_start))
            .or_else(|| self.member_binding(method))
    }

    fn matches(&self, type_id: Option<TypeId>) -> bool {
        is_time_provider_type(self.model.types(), type_id, self.time_provider)
    }

    fn parameter_binding(&self, method: NodeIndex) -> Option<Binding> {
        let arena = self.model.arena();
        let method_data = arena.get(method).and_then(|n| arena.get_method(n))?;
        for parameter in method_data.parameters.iter() {
            if self.cancel.is_cancelled() {
                return None;
            }
            let Some(symbol) = self.model.declared_symbol(parameter) else {
                continue;
            };
            if self.matches(symbol.type_id) {
                return Some(Binding {
                    name: symbol.name,
                    kind: BindingKind::Parameter,
                    declaration: parameter,
                });
            }
        }
        None
    }

    /// Variable declarators of the method that start before the expression.
    ///
    /// The walk is textual: a declarator in a sibling block, or in a lambda
    /// declared earlier, still counts.
    fn local_binding(&self, method: NodeIndex, expr_start: u32) -> Option<Binding> {
        let arena = self.model.arena();
        let declarators = arena
            .descendants(method)
            .take_while(|&node| arena.get(node).is_some_and(|n| n.pos < expr_start))
            .filter(|&node| {
                arena.kind(node) == Some(syntax_kind_ext::VARIABLE_DECLARATOR)
                    && arena.kind(arena.parent(node)) == Some(syntax_kind_ext::VARIABLE_DECLARATION)
            });
        for declarator in declarators {
            if self.cancel.is_cancelled() {
                return None;
            }
            let Some(symbol) = self.model.declared_symbol(declarator) else {
                continue;
            };
            if symbol.kind == SymbolKind::Local && self.matches(symbol.type_id) {
                return Some(Binding {
                    name: symbol.name,
                    kind: BindingKind::Local,
                    declaration: declarator,
                });
            }
        }
        None
    }

    /// Fields, then properties, anywhere inside the containing type.
    ///
    /// The walk starts at the nearest enclosing type, so outer types are never
    /// searched, but members of types nested inside it are, in document order.
    fn member_binding(&self, method: NodeIndex) -> Option<Binding> {
        let arena = self.model.arena();
        let owner = arena.find_ancestor(method, is_type_declaration);
        if owner.is_none() {
            return None;
        }

        let mut properties = Vec::new();
        for member in arena.descendants(owner) {
            if self.cancel.is_cancelled() {
                return None;
            }
            match arena.kind(member) {
                Some(syntax_kind_ext::FIELD_DECLARATION) => {
                    let variables = arena
                        .get(member)
                        .and_then(|n| arena.get_field(n))
                        .and_then(|field| arena.get(field.declaration))
                        .and_then(|d| arena.get_variable_declaration(d));
                    let Some(variables) = variables else {
                        continue;
                    };
                    for declarator in variables.declarators.iter() {
                        let Some(symbol) = self.model.declared_symbol(declarator) else {
                            continue;
                        };
                        if symbol.kind == SymbolKind::Field && self.matches(symbol.type_id) {
                            return Some(Binding {
                                name: symbol.name,
                                kind: BindingKind::Field,
                                declaration: declarator,
                            });
                        }
                    }
                }
                Some(syntax_kind_ext::PROPERTY_DECLARATION) => properties.push(member),
                _ => {}
            }
        }

        for property in properties {
            if self.cancel.is_cancelled() {
                return None;
            }
            let Some(symbol) = self.model.declared_symbol(property) else {
                continue;
            };
            if self.matches(symbol.type_id) {
                return Some(Binding {
                    name: symbol.name,
                    kind: BindingKind::Property,
                    declaration: property,
                });
            }
        }
        None
    }
}
