//! NodeArena access methods: typed data getters, child enumeration and
//! ancestor/descendant traversal.

use smallvec::SmallVec;
use tpa_common::Span;
use tpa_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};
use super::node::*;
use super::syntax_kind_ext;

/// Child handles of one node, in source order.
pub type Children = SmallVec<[NodeIndex; 8]>;

/// Generates a typed getter that checks the node kind before indexing the pool.
macro_rules! get_data {
    ($($(#[$meta:meta])* $fn_name:ident => $pool:ident: $data:ty [$($kind:path),+ $(,)?];)+) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $fn_name(&self, node: &Node) -> Option<&$data> {
                if node.has_data() && matches!(node.kind, $($kind)|+) {
                    self.$pool.get(node.data_index as usize)
                } else {
                    None
                }
            }
        )+
    };
}

impl NodeArena {
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_extended_mut(&mut self, index: NodeIndex) -> Option<&mut ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get_mut(index.0 as usize)
        }
    }

    /// Parent of a node, NONE for the source file.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<u16> {
        self.get(index).map(|node| node.kind)
    }

    pub fn span(&self, index: NodeIndex) -> Option<Span> {
        self.get(index).map(|node| Span::new(node.pos, node.end))
    }

    /// Get identifier data for `Identifier` and type parameter nodes.
    #[inline]
    pub fn get_identifier(&self, node: &Node) -> Option<&IdentifierData> {
        if node.has_data()
            && (node.kind == SyntaxKind::Identifier as u16
                || node.kind == syntax_kind_ext::TYPE_PARAMETER)
        {
            self.identifiers.get(node.data_index as usize)
        } else {
            None
        }
    }

    /// Identifier text of a node, `@` prefix removed.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node)
            .map(|data| data.escaped_text.as_str())
    }

    pub fn get_source_file_at(&self, index: NodeIndex) -> Option<&SourceFileData> {
        self.get(index).and_then(|node| self.get_source_file(node))
    }

    get_data! {
        get_literal => literals: LiteralData [syntax_kind_ext::LITERAL_EXPRESSION];
        get_predefined_type => predefined_types: PredefinedTypeData [syntax_kind_ext::PREDEFINED_TYPE];
        get_qualified_name => qualified_names: QualifiedNameData [
            syntax_kind_ext::QUALIFIED_NAME,
            syntax_kind_ext::ALIAS_QUALIFIED_NAME,
        ];
        get_generic_name => generic_names: GenericNameData [syntax_kind_ext::GENERIC_NAME];
        get_wrapped_type => wrapped_types: WrappedTypeData [
            syntax_kind_ext::ARRAY_TYPE,
            syntax_kind_ext::NULLABLE_TYPE,
            syntax_kind_ext::POINTER_TYPE,
            syntax_kind_ext::REF_TYPE,
        ];
        get_tuple_type => tuple_types: TupleTypeData [syntax_kind_ext::TUPLE_TYPE];

        get_member_access => member_accesses: MemberAccessData [
            syntax_kind_ext::MEMBER_ACCESS_EXPRESSION,
            syntax_kind_ext::POINTER_MEMBER_ACCESS_EXPRESSION,
        ];
        get_element_access => element_accesses: ElementAccessData [syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION];
        /// Invocations and constructor initializers.
        get_call_expr => call_exprs: CallExprData [
            syntax_kind_ext::INVOCATION_EXPRESSION,
            syntax_kind_ext::CONSTRUCTOR_INITIALIZER,
        ];
        get_object_creation => object_creations: ObjectCreationData [
            syntax_kind_ext::OBJECT_CREATION_EXPRESSION,
            syntax_kind_ext::ARRAY_CREATION_EXPRESSION,
            syntax_kind_ext::IMPLICIT_ARRAY_CREATION_EXPRESSION,
            syntax_kind_ext::ANONYMOUS_OBJECT_CREATION_EXPRESSION,
            syntax_kind_ext::STACKALLOC_EXPRESSION,
        ];
        get_binary_expr => binary_exprs: BinaryExprData [
            syntax_kind_ext::BINARY_EXPRESSION,
            syntax_kind_ext::ASSIGNMENT_EXPRESSION,
            syntax_kind_ext::IS_EXPRESSION,
            syntax_kind_ext::AS_EXPRESSION,
            syntax_kind_ext::RANGE_EXPRESSION,
            syntax_kind_ext::WITH_EXPRESSION,
        ];
        get_unary_expr => unary_exprs: UnaryExprData [
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
            syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
            syntax_kind_ext::AWAIT_EXPRESSION,
            syntax_kind_ext::THROW_EXPRESSION,
            syntax_kind_ext::REF_EXPRESSION,
            syntax_kind_ext::CHECKED_EXPRESSION,
        ];
        get_conditional_expr => conditional_exprs: ConditionalExprData [syntax_kind_ext::CONDITIONAL_EXPRESSION];
        get_parenthesized => parenthesized: ParenthesizedData [syntax_kind_ext::PARENTHESIZED_EXPRESSION];
        get_cast => casts: CastData [syntax_kind_ext::CAST_EXPRESSION];
        get_type_operand => type_operands: TypeOperandData [
            syntax_kind_ext::TYPEOF_EXPRESSION,
            syntax_kind_ext::DEFAULT_EXPRESSION,
            syntax_kind_ext::SIZEOF_EXPRESSION,
        ];
        get_lambda => lambdas: LambdaData [
            syntax_kind_ext::LAMBDA_EXPRESSION,
            syntax_kind_ext::ANONYMOUS_METHOD_EXPRESSION,
        ];
        get_interpolated_string => interpolated_strings: InterpolatedStringData [syntax_kind_ext::INTERPOLATED_STRING_EXPRESSION];
        get_switch_expr => switch_exprs: SwitchExprData [syntax_kind_ext::SWITCH_EXPRESSION];
        get_switch_arm => switch_arms: SwitchArmData [syntax_kind_ext::SWITCH_EXPRESSION_ARM];
        get_initializer => initializers: InitializerData [
            syntax_kind_ext::INITIALIZER_EXPRESSION,
            syntax_kind_ext::COLLECTION_EXPRESSION,
            syntax_kind_ext::TUPLE_EXPRESSION,
        ];
        get_argument => arguments: ArgumentData [syntax_kind_ext::ARGUMENT];
        get_declaration_expr => declaration_exprs: DeclarationExprData [syntax_kind_ext::DECLARATION_EXPRESSION];
        get_pattern => patterns: PatternData [
            syntax_kind_ext::DECLARATION_PATTERN,
            syntax_kind_ext::CONSTANT_PATTERN,
            syntax_kind_ext::RECURSIVE_PATTERN,
            syntax_kind_ext::VAR_PATTERN,
            syntax_kind_ext::DISCARD_PATTERN,
            syntax_kind_ext::RELATIONAL_PATTERN,
            syntax_kind_ext::UNARY_PATTERN,
            syntax_kind_ext::BINARY_PATTERN,
            syntax_kind_ext::LIST_PATTERN,
            syntax_kind_ext::PARENTHESIZED_PATTERN,
            syntax_kind_ext::SUBPATTERN,
        ];

        get_block => blocks: BlockData [syntax_kind_ext::BLOCK];
        get_local_declaration => local_declarations: LocalDeclarationData [syntax_kind_ext::LOCAL_DECLARATION_STATEMENT];
        get_variable_declaration => variable_declarations: VariableDeclarationData [syntax_kind_ext::VARIABLE_DECLARATION];
        get_variable_declarator => variable_declarators: VariableDeclaratorData [
            syntax_kind_ext::VARIABLE_DECLARATOR,
            syntax_kind_ext::ENUM_MEMBER_DECLARATION,
        ];
        get_expr_statement => expr_statements: ExprStatementData [
            syntax_kind_ext::EXPRESSION_STATEMENT,
            syntax_kind_ext::RETURN_STATEMENT,
            syntax_kind_ext::THROW_STATEMENT,
            syntax_kind_ext::YIELD_RETURN_STATEMENT,
            syntax_kind_ext::GOTO_STATEMENT,
        ];
        get_if_statement => if_statements: IfData [syntax_kind_ext::IF_STATEMENT];
        get_loop => loops: LoopData [
            syntax_kind_ext::FOR_STATEMENT,
            syntax_kind_ext::WHILE_STATEMENT,
            syntax_kind_ext::DO_STATEMENT,
        ];
        get_foreach => foreach_statements: ForEachData [syntax_kind_ext::FOREACH_STATEMENT];
        get_scoped_statement => scoped_statements: ScopedStatementData [
            syntax_kind_ext::USING_STATEMENT,
            syntax_kind_ext::FIXED_STATEMENT,
            syntax_kind_ext::LOCK_STATEMENT,
            syntax_kind_ext::CHECKED_STATEMENT,
            syntax_kind_ext::UNSAFE_STATEMENT,
        ];
        get_try => try_data: TryData [syntax_kind_ext::TRY_STATEMENT];
        get_catch_clause => catch_clauses: CatchData [syntax_kind_ext::CATCH_CLAUSE];
        get_switch => switch_data: SwitchData [syntax_kind_ext::SWITCH_STATEMENT];
        get_switch_section => switch_sections: SwitchSectionData [syntax_kind_ext::SWITCH_SECTION];
        get_case_label => case_labels: CaseLabelData [syntax_kind_ext::CASE_LABEL];
        get_labeled => labeled_data: LabeledData [syntax_kind_ext::LABELED_STATEMENT];

        get_source_file => source_files: SourceFileData [syntax_kind_ext::SOURCE_FILE];
        get_using_directive => using_directives: UsingDirectiveData [syntax_kind_ext::USING_DIRECTIVE];
        get_namespace => namespaces: NamespaceData [
            syntax_kind_ext::NAMESPACE_DECLARATION,
            syntax_kind_ext::FILE_SCOPED_NAMESPACE_DECLARATION,
        ];
        get_type_decl => type_decls: TypeDeclData [
            syntax_kind_ext::CLASS_DECLARATION,
            syntax_kind_ext::STRUCT_DECLARATION,
            syntax_kind_ext::INTERFACE_DECLARATION,
            syntax_kind_ext::RECORD_DECLARATION,
            syntax_kind_ext::RECORD_STRUCT_DECLARATION,
            syntax_kind_ext::ENUM_DECLARATION,
        ];
        get_field => fields: FieldData [
            syntax_kind_ext::FIELD_DECLARATION,
            syntax_kind_ext::EVENT_FIELD_DECLARATION,
        ];
        get_property => properties: PropertyData [
            syntax_kind_ext::PROPERTY_DECLARATION,
            syntax_kind_ext::INDEXER_DECLARATION,
            syntax_kind_ext::EVENT_DECLARATION,
        ];
        get_accessor => accessors: AccessorData [syntax_kind_ext::ACCESSOR_DECLARATION];
        get_method => methods: MethodData [
            syntax_kind_ext::METHOD_DECLARATION,
            syntax_kind_ext::CONSTRUCTOR_DECLARATION,
            syntax_kind_ext::DESTRUCTOR_DECLARATION,
            syntax_kind_ext::OPERATOR_DECLARATION,
            syntax_kind_ext::CONVERSION_OPERATOR_DECLARATION,
            syntax_kind_ext::LOCAL_FUNCTION_STATEMENT,
            syntax_kind_ext::DELEGATE_DECLARATION,
        ];
        get_parameter => parameters: ParameterData [syntax_kind_ext::PARAMETER];
    }

    // ============================================================================
    // Children and traversal
    // ============================================================================

    /// Direct children of a node in source order.
    pub fn children(&self, index: NodeIndex) -> Children {
        let mut out = Children::new();
        let Some(node) = self.get(index) else {
            return out;
        };
        fn one(child: NodeIndex, out: &mut Children) {
            if child.is_some() {
                out.push(child);
            }
        }
        fn list(list: &NodeList, out: &mut Children) {
            out.extend(list.nodes.iter().copied().filter(|child| child.is_some()));
        }

        use syntax_kind_ext as k;
        match node.kind {
            k::QUALIFIED_NAME | k::ALIAS_QUALIFIED_NAME => {
                if let Some(d) = self.get_qualified_name(node) {
                    one(d.left, &mut out);
                    one(d.right, &mut out);
                }
            }
            k::GENERIC_NAME => {
                if let Some(d) = self.get_generic_name(node) {
                    one(d.name, &mut out);
                    list(&d.type_arguments, &mut out);
                }
            }
            k::ARRAY_TYPE | k::NULLABLE_TYPE | k::POINTER_TYPE | k::REF_TYPE => {
                if let Some(d) = self.get_wrapped_type(node) {
                    one(d.element_type, &mut out);
                }
            }
            k::TUPLE_TYPE => {
                if let Some(d) = self.get_tuple_type(node) {
                    list(&d.elements, &mut out);
                }
            }
            k::MEMBER_ACCESS_EXPRESSION | k::POINTER_MEMBER_ACCESS_EXPRESSION => {
                if let Some(d) = self.get_member_access(node) {
                    one(d.expression, &mut out);
                    one(d.name, &mut out);
                }
            }
            k::ELEMENT_ACCESS_EXPRESSION => {
                if let Some(d) = self.get_element_access(node) {
                    one(d.expression, &mut out);
                    list(&d.arguments, &mut out);
                }
            }
            k::INVOCATION_EXPRESSION | k::CONSTRUCTOR_INITIALIZER => {
                if let Some(d) = self.get_call_expr(node) {
                    one(d.expression, &mut out);
                    list(&d.arguments, &mut out);
                }
            }
            k::OBJECT_CREATION_EXPRESSION
            | k::ARRAY_CREATION_EXPRESSION
            | k::IMPLICIT_ARRAY_CREATION_EXPRESSION
            | k::ANONYMOUS_OBJECT_CREATION_EXPRESSION
            | k::STACKALLOC_EXPRESSION => {
                if let Some(d) = self.get_object_creation(node) {
                    one(d.type_node, &mut out);
                    list(&d.arguments, &mut out);
                    one(d.initializer, &mut out);
                }
            }
            k::BINARY_EXPRESSION
            | k::ASSIGNMENT_EXPRESSION
            | k::IS_EXPRESSION
            | k::AS_EXPRESSION
            | k::RANGE_EXPRESSION
            | k::WITH_EXPRESSION => {
                if let Some(d) = self.get_binary_expr(node) {
                    one(d.left, &mut out);
                    one(d.right, &mut out);
                }
            }
            k::PREFIX_UNARY_EXPRESSION
            | k::POSTFIX_UNARY_EXPRESSION
            | k::AWAIT_EXPRESSION
            | k::THROW_EXPRESSION
            | k::REF_EXPRESSION
            | k::CHECKED_EXPRESSION => {
                if let Some(d) = self.get_unary_expr(node) {
                    one(d.operand, &mut out);
                }
            }
            k::CONDITIONAL_EXPRESSION => {
                if let Some(d) = self.get_conditional_expr(node) {
                    one(d.condition, &mut out);
                    one(d.when_true, &mut out);
                    one(d.when_false, &mut out);
                }
            }
            k::PARENTHESIZED_EXPRESSION => {
                if let Some(d) = self.get_parenthesized(node) {
                    one(d.expression, &mut out);
                }
            }
            k::CAST_EXPRESSION => {
                if let Some(d) = self.get_cast(node) {
                    one(d.type_node, &mut out);
                    one(d.expression, &mut out);
                }
            }
            k::TYPEOF_EXPRESSION | k::DEFAULT_EXPRESSION | k::SIZEOF_EXPRESSION => {
                if let Some(d) = self.get_type_operand(node) {
                    one(d.type_node, &mut out);
                }
            }
            k::LAMBDA_EXPRESSION | k::ANONYMOUS_METHOD_EXPRESSION => {
                if let Some(d) = self.get_lambda(node) {
                    list(&d.parameters, &mut out);
                    one(d.body, &mut out);
                }
            }
            k::INTERPOLATED_STRING_EXPRESSION => {
                if let Some(d) = self.get_interpolated_string(node) {
                    list(&d.holes, &mut out);
                }
            }
            k::SWITCH_EXPRESSION => {
                if let Some(d) = self.get_switch_expr(node) {
                    one(d.expression, &mut out);
                    list(&d.arms, &mut out);
                }
            }
            k::SWITCH_EXPRESSION_ARM => {
                if let Some(d) = self.get_switch_arm(node) {
                    one(d.pattern, &mut out);
                    one(d.when_clause, &mut out);
                    one(d.expression, &mut out);
                }
            }
            k::INITIALIZER_EXPRESSION | k::COLLECTION_EXPRESSION | k::TUPLE_EXPRESSION => {
                if let Some(d) = self.get_initializer(node) {
                    list(&d.elements, &mut out);
                }
            }
            k::ARGUMENT => {
                if let Some(d) = self.get_argument(node) {
                    one(d.name, &mut out);
                    one(d.expression, &mut out);
                }
            }
            k::DECLARATION_EXPRESSION => {
                if let Some(d) = self.get_declaration_expr(node) {
                    one(d.type_node, &mut out);
                    one(d.designation, &mut out);
                }
            }
            k::RECURSIVE_PATTERN => {
                // `Type { ... } designation`
                if let Some(d) = self.get_pattern(node) {
                    one(d.type_node, &mut out);
                    list(&d.subpatterns, &mut out);
                    one(d.designation, &mut out);
                }
            }
            k::DECLARATION_PATTERN
            | k::CONSTANT_PATTERN
            | k::VAR_PATTERN
            | k::DISCARD_PATTERN
            | k::RELATIONAL_PATTERN
            | k::UNARY_PATTERN
            | k::BINARY_PATTERN
            | k::LIST_PATTERN
            | k::PARENTHESIZED_PATTERN
            | k::SUBPATTERN => {
                if let Some(d) = self.get_pattern(node) {
                    one(d.type_node, &mut out);
                    one(d.designation, &mut out);
                    one(d.expression, &mut out);
                    list(&d.subpatterns, &mut out);
                }
            }
            k::BLOCK => {
                if let Some(d) = self.get_block(node) {
                    list(&d.statements, &mut out);
                }
            }
            k::LOCAL_DECLARATION_STATEMENT => {
                if let Some(d) = self.get_local_declaration(node) {
                    one(d.declaration, &mut out);
                }
            }
            k::VARIABLE_DECLARATION => {
                if let Some(d) = self.get_variable_declaration(node) {
                    one(d.type_node, &mut out);
                    list(&d.declarators, &mut out);
                }
            }
            k::VARIABLE_DECLARATOR | k::ENUM_MEMBER_DECLARATION => {
                if let Some(d) = self.get_variable_declarator(node) {
                    one(d.name, &mut out);
                    one(d.initializer, &mut out);
                }
            }
            k::EXPRESSION_STATEMENT
            | k::RETURN_STATEMENT
            | k::THROW_STATEMENT
            | k::YIELD_RETURN_STATEMENT
            | k::GOTO_STATEMENT => {
                if let Some(d) = self.get_expr_statement(node) {
                    one(d.expression, &mut out);
                }
            }
            k::IF_STATEMENT => {
                if let Some(d) = self.get_if_statement(node) {
                    one(d.condition, &mut out);
                    one(d.then_statement, &mut out);
                    one(d.else_statement, &mut out);
                }
            }
            k::DO_STATEMENT => {
                if let Some(d) = self.get_loop(node) {
                    one(d.statement, &mut out);
                    one(d.condition, &mut out);
                }
            }
            k::FOR_STATEMENT | k::WHILE_STATEMENT => {
                if let Some(d) = self.get_loop(node) {
                    one(d.declaration, &mut out);
                    list(&d.initializers, &mut out);
                    one(d.condition, &mut out);
                    list(&d.incrementors, &mut out);
                    one(d.statement, &mut out);
                }
            }
            k::FOREACH_STATEMENT => {
                if let Some(d) = self.get_foreach(node) {
                    one(d.type_node, &mut out);
                    one(d.variable, &mut out);
                    one(d.expression, &mut out);
                    one(d.statement, &mut out);
                }
            }
            k::USING_STATEMENT
            | k::FIXED_STATEMENT
            | k::LOCK_STATEMENT
            | k::CHECKED_STATEMENT
            | k::UNSAFE_STATEMENT => {
                if let Some(d) = self.get_scoped_statement(node) {
                    one(d.declaration, &mut out);
                    one(d.expression, &mut out);
                    one(d.statement, &mut out);
                }
            }
            k::TRY_STATEMENT => {
                if let Some(d) = self.get_try(node) {
                    one(d.block, &mut out);
                    list(&d.catches, &mut out);
                    one(d.finally_block, &mut out);
                }
            }
            k::CATCH_CLAUSE => {
                if let Some(d) = self.get_catch_clause(node) {
                    one(d.type_node, &mut out);
                    one(d.identifier, &mut out);
                    one(d.filter, &mut out);
                    one(d.block, &mut out);
                }
            }
            k::SWITCH_STATEMENT => {
                if let Some(d) = self.get_switch(node) {
                    one(d.expression, &mut out);
                    list(&d.sections, &mut out);
                }
            }
            k::SWITCH_SECTION => {
                if let Some(d) = self.get_switch_section(node) {
                    list(&d.labels, &mut out);
                    list(&d.statements, &mut out);
                }
            }
            k::CASE_LABEL => {
                if let Some(d) = self.get_case_label(node) {
                    one(d.pattern, &mut out);
                    one(d.when_clause, &mut out);
                }
            }
            k::LABELED_STATEMENT => {
                if let Some(d) = self.get_labeled(node) {
                    one(d.label, &mut out);
                    one(d.statement, &mut out);
                }
            }
            k::SOURCE_FILE => {
                if let Some(d) = self.get_source_file(node) {
                    list(&d.members, &mut out);
                }
            }
            k::USING_DIRECTIVE => {
                if let Some(d) = self.get_using_directive(node) {
                    one(d.alias, &mut out);
                    one(d.name, &mut out);
                }
            }
            k::NAMESPACE_DECLARATION | k::FILE_SCOPED_NAMESPACE_DECLARATION => {
                if let Some(d) = self.get_namespace(node) {
                    one(d.name, &mut out);
                    list(&d.members, &mut out);
                }
            }
            k::CLASS_DECLARATION
            | k::STRUCT_DECLARATION
            | k::INTERFACE_DECLARATION
            | k::RECORD_DECLARATION
            | k::RECORD_STRUCT_DECLARATION
            | k::ENUM_DECLARATION => {
                if let Some(d) = self.get_type_decl(node) {
                    one(d.name, &mut out);
                    list(&d.type_parameters, &mut out);
                    if let Some(parameters) = &d.parameters {
                        list(parameters, &mut out);
                    }
                    list(&d.base_types, &mut out);
                    list(&d.members, &mut out);
                }
            }
            k::FIELD_DECLARATION | k::EVENT_FIELD_DECLARATION => {
                if let Some(d) = self.get_field(node) {
                    one(d.declaration, &mut out);
                }
            }
            k::PROPERTY_DECLARATION | k::INDEXER_DECLARATION | k::EVENT_DECLARATION => {
                if let Some(d) = self.get_property(node) {
                    one(d.type_node, &mut out);
                    one(d.name, &mut out);
                    list(&d.parameters, &mut out);
                    list(&d.accessors, &mut out);
                    one(d.expression_body, &mut out);
                    one(d.initializer, &mut out);
                }
            }
            k::ACCESSOR_DECLARATION => {
                if let Some(d) = self.get_accessor(node) {
                    one(d.body, &mut out);
                    one(d.expression_body, &mut out);
                }
            }
            k::METHOD_DECLARATION
            | k::CONSTRUCTOR_DECLARATION
            | k::DESTRUCTOR_DECLARATION
            | k::OPERATOR_DECLARATION
            | k::CONVERSION_OPERATOR_DECLARATION
            | k::LOCAL_FUNCTION_STATEMENT
            | k::DELEGATE_DECLARATION => {
                if let Some(d) = self.get_method(node) {
                    one(d.return_type, &mut out);
                    one(d.name, &mut out);
                    list(&d.type_parameters, &mut out);
                    list(&d.parameters, &mut out);
                    one(d.constructor_initializer, &mut out);
                    one(d.body, &mut out);
                    one(d.expression_body, &mut out);
                }
            }
            k::PARAMETER => {
                if let Some(d) = self.get_parameter(node) {
                    one(d.type_node, &mut out);
                    one(d.name, &mut out);
                    one(d.default_value, &mut out);
                }
            }
            _ => {}
        }
        out
    }

    /// Proper ancestors of a node, innermost first.
    pub fn ancestors(&self, index: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            current: self.parent(index),
        }
    }

    /// First proper ancestor matching `predicate`.
    pub fn find_ancestor(&self, index: NodeIndex, predicate: impl Fn(u16) -> bool) -> NodeIndex {
        self.ancestors(index)
            .find(|&ancestor| self.kind(ancestor).is_some_and(&predicate))
            .unwrap_or(NodeIndex::NONE)
    }

    /// Proper descendants of a node in pre-order (source order).
    pub fn descendants(&self, index: NodeIndex) -> Descendants<'_> {
        let mut stack: Vec<NodeIndex> = self.children(index).into_iter().collect();
        stack.reverse();
        Descendants { arena: self, stack }
    }

    /// Text of a node in `source`.
    pub fn node_text<'a>(&self, index: NodeIndex, source: &'a str) -> &'a str {
        self.span(index).map_or("", |span| span.text(source))
    }
}

pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    current: NodeIndex,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        if self.current.is_none() {
            return None;
        }
        let result = self.current;
        self.current = self.arena.parent(result);
        Some(result)
    }
}

/// Pre-order walk over a subtree.
pub struct Descendants<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeIndex>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let next = self.stack.pop()?;
        let children = self.arena.children(next);
        self.stack.extend(children.into_iter().rev());
        Some(next)
    }
}

// ============================================================================
// Kind predicates
// ============================================================================

/// Method, constructor, destructor, operator or conversion operator.
pub fn is_method_like(kind: u16) -> bool {
    matches!(
        kind,
        syntax_kind_ext::METHOD_DECLARATION
            | syntax_kind_ext::CONSTRUCTOR_DECLARATION
            | syntax_kind_ext::DESTRUCTOR_DECLARATION
            | syntax_kind_ext::OPERATOR_DECLARATION
            | syntax_kind_ext::CONVERSION_OPERATOR_DECLARATION
    )
}

/// Class, struct, interface, record or enum declaration.
pub fn is_type_declaration(kind: u16) -> bool {
    matches!(
        kind,
        syntax_kind_ext::CLASS_DECLARATION
            | syntax_kind_ext::STRUCT_DECLARATION
            | syntax_kind_ext::INTERFACE_DECLARATION
            | syntax_kind_ext::RECORD_DECLARATION
            | syntax_kind_ext::RECORD_STRUCT_DECLARATION
            | syntax_kind_ext::ENUM_DECLARATION
    )
}

pub fn is_namespace_declaration(kind: u16) -> bool {
    kind == syntax_kind_ext::NAMESPACE_DECLARATION
        || kind == syntax_kind_ext::FILE_SCOPED_NAMESPACE_DECLARATION
}
