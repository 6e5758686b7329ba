//! NodeArena creation methods (add_* methods).
//!
//! Nodes are built bottom-up: children always exist before their parent, so
//! the parent pointer of every child is set when the parent is added.

use super::base::NodeIndex;
use super::node::*;
use super::syntax_kind_ext;
use tpa_scanner::SyntaxKind;

/// Generates an `add_*` method that stores `data` in `pool` and creates the
/// node header pointing at it.
macro_rules! add_with_data {
    ($($(#[$meta:meta])* $fn_name:ident => $pool:ident: $data:ty;)+) => {
        $(
            $(#[$meta])*
            pub fn $fn_name(&mut self, kind: u16, pos: u32, end: u32, data: $data) -> NodeIndex {
                let data_index = self.$pool.len() as u32;
                self.$pool.push(data);
                self.push_node(kind, pos, end, data_index)
            }
        )+
    };
}

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 5_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena with pre-allocated capacity for the most common pools.
    pub fn with_capacity(capacity: usize) -> NodeArena {
        let safe_capacity = capacity.min(Self::MAX_NODE_PREALLOC);
        let mut arena = NodeArena::default();
        arena.nodes = Vec::with_capacity(safe_capacity);
        arena.extended_info = Vec::with_capacity(safe_capacity);
        arena.identifiers = Vec::with_capacity(safe_capacity / 3);
        arena.member_accesses = Vec::with_capacity(safe_capacity / 10);
        arena.call_exprs = Vec::with_capacity(safe_capacity / 10);
        arena.arguments = Vec::with_capacity(safe_capacity / 10);
        arena.literals = Vec::with_capacity(safe_capacity / 10);
        arena.source_files = Vec::with_capacity(1);
        arena
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(info) = self.get_extended_mut(child) {
            info.parent = parent;
        }
    }

    fn push_node(&mut self, kind: u16, pos: u32, end: u32, data_index: u32) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            pos,
            end,
            data_index,
        });
        self.extended_info.push(ExtendedNodeInfo::default());
        for child in self.children(index) {
            self.set_parent(child, index);
        }
        index
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a node without data (`this`, `base`, `break`, empty statements, ...).
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(kind, pos, end, NO_DATA)
    }

    pub fn add_identifier(&mut self, pos: u32, end: u32, text: &str) -> NodeIndex {
        self.add_identifier_with_kind(SyntaxKind::Identifier as u16, pos, end, text)
    }

    pub fn add_type_parameter(&mut self, pos: u32, end: u32, text: &str) -> NodeIndex {
        self.add_identifier_with_kind(syntax_kind_ext::TYPE_PARAMETER, pos, end, text)
    }

    fn add_identifier_with_kind(&mut self, kind: u16, pos: u32, end: u32, text: &str) -> NodeIndex {
        let escaped_text = text.strip_prefix('@').unwrap_or(text).to_string();
        let data_index = self.identifiers.len() as u32;
        self.identifiers.push(IdentifierData { escaped_text });
        self.push_node(kind, pos, end, data_index)
    }

    add_with_data! {
        add_literal => literals: LiteralData;
        add_predefined_type => predefined_types: PredefinedTypeData;
        add_qualified_name => qualified_names: QualifiedNameData;
        add_generic_name => generic_names: GenericNameData;
        /// Array, nullable, pointer and ref types.
        add_wrapped_type => wrapped_types: WrappedTypeData;
        add_tuple_type => tuple_types: TupleTypeData;

        add_member_access => member_accesses: MemberAccessData;
        add_element_access => element_accesses: ElementAccessData;
        add_call_expr => call_exprs: CallExprData;
        add_object_creation => object_creations: ObjectCreationData;
        add_binary_expr => binary_exprs: BinaryExprData;
        add_unary_expr => unary_exprs: UnaryExprData;
        add_conditional_expr => conditional_exprs: ConditionalExprData;
        add_parenthesized => parenthesized: ParenthesizedData;
        add_cast => casts: CastData;
        add_type_operand => type_operands: TypeOperandData;
        add_lambda => lambdas: LambdaData;
        add_interpolated_string => interpolated_strings: InterpolatedStringData;
        add_switch_expr => switch_exprs: SwitchExprData;
        add_switch_arm => switch_arms: SwitchArmData;
        /// Initializers, collection expressions and tuple expressions.
        add_initializer => initializers: InitializerData;
        add_argument => arguments: ArgumentData;
        add_declaration_expr => declaration_exprs: DeclarationExprData;
        add_pattern => patterns: PatternData;

        add_block => blocks: BlockData;
        add_local_declaration => local_declarations: LocalDeclarationData;
        add_variable_declaration => variable_declarations: VariableDeclarationData;
        /// Variable declarators and enum members.
        add_variable_declarator => variable_declarators: VariableDeclaratorData;
        add_expr_statement => expr_statements: ExprStatementData;
        add_if_statement => if_statements: IfData;
        add_loop => loops: LoopData;
        add_foreach => foreach_statements: ForEachData;
        add_scoped_statement => scoped_statements: ScopedStatementData;
        add_try => try_data: TryData;
        add_catch_clause => catch_clauses: CatchData;
        add_switch => switch_data: SwitchData;
        add_switch_section => switch_sections: SwitchSectionData;
        add_case_label => case_labels: CaseLabelData;
        add_labeled => labeled_data: LabeledData;

        add_source_file => source_files: SourceFileData;
        add_using_directive => using_directives: UsingDirectiveData;
        add_namespace => namespaces: NamespaceData;
        add_type_decl => type_decls: TypeDeclData;
        add_field => fields: FieldData;
        add_property => properties: PropertyData;
        add_accessor => accessors: AccessorData;
        add_method => methods: MethodData;
        add_parameter => parameters: ParameterData;
    }
}
