//! Parser state - compilation units, namespaces, types and members.

use super::state::ParserState;
use crate::parser::{
    NodeIndex, NodeList,
    node::{
        AccessorData, AccessorKind, CallExprData, FieldData, MethodData, ModifierFlags,
        NamespaceData, ParameterData, PropertyData, SourceFileData, TypeDeclData,
        UsingDirectiveData, VariableDeclaratorData,
    },
    syntax_kind_ext,
};
use tpa_common::diagnostic_codes;
use tpa_scanner::SyntaxKind;
use tracing::debug;

impl ParserState {
    /// Parse the whole file into a `SOURCE_FILE` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        let members = self.parse_namespace_members(None);
        let end = self.source.len() as u32;
        let root = self.arena.add_source_file(
            syntax_kind_ext::SOURCE_FILE,
            0,
            end,
            SourceFileData {
                file_name: self.file_name.clone(),
                members: NodeList::from_vec(members),
            },
        );
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );
        root
    }

    /// Members of a compilation unit (`close` is None) or a namespace body.
    /// Statements are accepted at file level only.
    fn parse_namespace_members(&mut self, close: Option<SyntaxKind>) -> Vec<NodeIndex> {
        let mut members = Vec::new();
        loop {
            if self.at_eof() || close.is_some_and(|kind| self.at(kind)) {
                break;
            }
            let before = self.pos;
            self.skip_attributes();
            let after_attributes = self.pos;
            let after_attributes_end = self.last_end;
            let start = self.token_pos();

            if self.is_using_directive_ahead() {
                members.push(self.parse_using_directive());
                continue;
            }
            if self.at(SyntaxKind::NamespaceKeyword) {
                let namespace = self.parse_namespace_declaration(close);
                members.push(namespace);
                continue;
            }

            let modifiers = self.parse_modifiers();
            if self.is_type_declaration_start() {
                members.push(self.parse_type_declaration(start, modifiers));
                continue;
            }
            if self.at(SyntaxKind::DelegateKeyword) && self.nth(1) != SyntaxKind::OpenParenToken {
                members.push(self.parse_delegate_declaration(start, modifiers));
                continue;
            }

            if close.is_none() {
                // Top-level statement: rewind over the modifiers, they belong to it.
                self.pos = after_attributes;
                self.last_end = after_attributes_end;
                let statement = self.parse_statement();
                if statement.is_some() {
                    members.push(statement);
                }
            } else {
                self.error_at_current(diagnostic_codes::DECLARATION_EXPECTED, &[]);
            }
            if self.pos == before {
                self.skip_unexpected();
            }
        }
        members
    }

    fn is_using_directive_ahead(&self) -> bool {
        let mut i = self.pos;
        if self.is_contextual_at(i, "global") && self.kind_at(i + 1) == SyntaxKind::UsingKeyword {
            return true;
        }
        if self.kind_at(i) != SyntaxKind::UsingKeyword {
            return false;
        }
        i += 1;
        match self.kind_at(i) {
            SyntaxKind::StaticKeyword => true,
            // `using var x = ...;` and `using (...)` are statements
            SyntaxKind::Identifier => matches!(
                self.kind_at(i + 1),
                SyntaxKind::EqualsToken
                    | SyntaxKind::DotToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::ColonColonToken
            ),
            _ => false,
        }
    }

    fn parse_using_directive(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let is_global = if self.at_contextual("global") {
            self.advance();
            true
        } else {
            false
        };
        self.expect(SyntaxKind::UsingKeyword);
        let is_static = self.eat(SyntaxKind::StaticKeyword);
        let (alias, name) =
            if self.at(SyntaxKind::Identifier) && self.nth(1) == SyntaxKind::EqualsToken {
                let alias = self.parse_identifier();
                self.advance();
                (alias, self.parse_type())
            } else {
                (NodeIndex::NONE, self.parse_name())
            };
        self.expect_semicolon();
        self.arena.add_using_directive(
            syntax_kind_ext::USING_DIRECTIVE,
            start,
            self.last_end,
            UsingDirectiveData {
                is_global,
                is_static,
                alias,
                name,
            },
        )
    }

    /// Block namespaces, and file-scoped namespaces that own every member up
    /// to the end of the enclosing scope.
    fn parse_namespace_declaration(&mut self, close: Option<SyntaxKind>) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let name = self.parse_name();
        if self.eat(SyntaxKind::SemicolonToken) {
            let members = self.parse_namespace_members(close);
            return self.arena.add_namespace(
                syntax_kind_ext::FILE_SCOPED_NAMESPACE_DECLARATION,
                start,
                self.last_end,
                NamespaceData {
                    name,
                    members: NodeList::from_vec(members),
                },
            );
        }
        let members = if self.expect(SyntaxKind::OpenBraceToken) {
            let members = self.parse_namespace_members(Some(SyntaxKind::CloseBraceToken));
            self.expect(SyntaxKind::CloseBraceToken);
            members
        } else {
            Vec::new()
        };
        self.eat(SyntaxKind::SemicolonToken);
        self.arena.add_namespace(
            syntax_kind_ext::NAMESPACE_DECLARATION,
            start,
            self.last_end,
            NamespaceData {
                name,
                members: NodeList::from_vec(members),
            },
        )
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    /// Keyword and contextual declaration modifiers.
    pub(crate) fn parse_modifiers(&mut self) -> ModifierFlags {
        let mut modifiers = ModifierFlags::empty();
        loop {
            if let Some(flag) = ModifierFlags::from_keyword(self.current()) {
                // `new T()` at statement level is not a modifier
                if flag == ModifierFlags::NEW && !self.is_member_start_at(self.pos + 1) {
                    break;
                }
                modifiers |= flag;
            } else if let Some(flag) = self.contextual_modifier() {
                modifiers |= flag;
            } else {
                break;
            }
            self.advance();
        }
        modifiers
    }

    /// Contextual modifier at the cursor, when the next token can continue a
    /// declaration (so a type named `async` is still a type).
    fn contextual_modifier(&self) -> Option<ModifierFlags> {
        if !self.at(SyntaxKind::Identifier) {
            return None;
        }
        let flag = ModifierFlags::from_contextual(self.current_text())?;
        if flag == ModifierFlags::SCOPED {
            return None;
        }
        self.is_member_start_at(self.pos + 1).then_some(flag)
    }

    fn is_member_start_at(&self, index: usize) -> bool {
        let kind = self.kind_at(index);
        kind == SyntaxKind::Identifier
            || kind.is_modifier()
            || kind.is_predefined_type()
            || matches!(
                kind,
                SyntaxKind::ClassKeyword
                    | SyntaxKind::StructKeyword
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::EnumKeyword
                    | SyntaxKind::DelegateKeyword
                    | SyntaxKind::EventKeyword
                    | SyntaxKind::ImplicitKeyword
                    | SyntaxKind::ExplicitKeyword
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::RefKeyword
                    | SyntaxKind::TildeToken
            )
    }

    // =========================================================================
    // Type declarations
    // =========================================================================

    fn is_type_declaration_start(&self) -> bool {
        match self.current() {
            SyntaxKind::ClassKeyword
            | SyntaxKind::StructKeyword
            | SyntaxKind::InterfaceKeyword
            | SyntaxKind::EnumKeyword => true,
            SyntaxKind::Identifier => {
                self.at_contextual("record")
                    && matches!(
                        self.nth(1),
                        SyntaxKind::Identifier | SyntaxKind::StructKeyword | SyntaxKind::ClassKeyword
                    )
            }
            _ => false,
        }
    }

    fn parse_type_declaration(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        let kind = match self.current() {
            SyntaxKind::ClassKeyword => syntax_kind_ext::CLASS_DECLARATION,
            SyntaxKind::StructKeyword => syntax_kind_ext::STRUCT_DECLARATION,
            SyntaxKind::InterfaceKeyword => syntax_kind_ext::INTERFACE_DECLARATION,
            SyntaxKind::EnumKeyword => syntax_kind_ext::ENUM_DECLARATION,
            _ => match self.nth(1) {
                SyntaxKind::StructKeyword => {
                    self.advance();
                    syntax_kind_ext::RECORD_STRUCT_DECLARATION
                }
                SyntaxKind::ClassKeyword => {
                    self.advance();
                    syntax_kind_ext::RECORD_DECLARATION
                }
                _ => syntax_kind_ext::RECORD_DECLARATION,
            },
        };
        self.advance();

        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameter_list();
        let parameters = if self.at(SyntaxKind::OpenParenToken) {
            Some(self.parse_parameter_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken))
        } else {
            None
        };
        let base_types = self.parse_base_list();
        self.skip_constraint_clauses();

        let type_name = self.arena.identifier_text(name).unwrap_or_default().to_string();
        self.type_names.push(type_name);
        let members = if self.eat(SyntaxKind::OpenBraceToken) {
            let members = if kind == syntax_kind_ext::ENUM_DECLARATION {
                self.parse_enum_members()
            } else {
                self.parse_type_members()
            };
            self.expect(SyntaxKind::CloseBraceToken);
            self.eat(SyntaxKind::SemicolonToken);
            members
        } else {
            // `record R(int X);`
            self.expect_semicolon();
            Vec::new()
        };
        self.type_names.pop();

        self.arena.add_type_decl(
            kind,
            start,
            self.last_end,
            TypeDeclData {
                modifiers,
                name,
                type_parameters,
                parameters,
                base_types,
                members: NodeList::from_vec(members),
            },
        )
    }

    /// `: Base(args), IFoo<T>`; record base arguments are skipped.
    fn parse_base_list(&mut self) -> NodeList {
        let mut base_types = Vec::new();
        if !self.eat(SyntaxKind::ColonToken) {
            return NodeList::new();
        }
        loop {
            let base = self.parse_type();
            if base.is_none() {
                break;
            }
            base_types.push(base);
            if self.at(SyntaxKind::OpenParenToken) {
                self.skip_balanced_group();
            }
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        NodeList::from_vec(base_types)
    }

    fn skip_balanced_group(&mut self) {
        if let Some(end) = self.scan_balanced(self.pos) {
            while self.pos < end {
                self.advance();
            }
        }
    }

    fn parse_enum_members(&mut self) -> Vec<NodeIndex> {
        let mut members = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) && !self.at_eof() {
            self.skip_attributes();
            let start = self.token_pos();
            let name = self.parse_identifier();
            if name.is_none() {
                self.skip_until(&[SyntaxKind::CommaToken, SyntaxKind::CloseBraceToken]);
            }
            let initializer = if self.eat(SyntaxKind::EqualsToken) {
                self.parse_required_expression()
            } else {
                NodeIndex::NONE
            };
            if name.is_some() {
                members.push(self.arena.add_variable_declarator(
                    syntax_kind_ext::ENUM_MEMBER_DECLARATION,
                    start,
                    self.last_end,
                    VariableDeclaratorData { name, initializer },
                ));
            }
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        members
    }

    fn parse_type_members(&mut self) -> Vec<NodeIndex> {
        let mut members = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) && !self.at_eof() {
            let before = self.pos;
            let member = self.parse_member();
            if member.is_some() {
                members.push(member);
            }
            if self.pos == before {
                self.skip_unexpected();
            }
        }
        members
    }

    fn parse_delegate_declaration(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        self.advance();
        let return_type = self.parse_type();
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameter_list();
        let parameters =
            self.parse_parameter_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        self.skip_constraint_clauses();
        self.expect_semicolon();
        self.add_method_like(
            syntax_kind_ext::DELEGATE_DECLARATION,
            start,
            MethodData {
                modifiers,
                return_type,
                name,
                type_parameters,
                parameters,
                body: NodeIndex::NONE,
                expression_body: NodeIndex::NONE,
                constructor_initializer: NodeIndex::NONE,
            },
        )
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn parse_member(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            self.skip_until(&[SyntaxKind::CloseBraceToken]);
            return NodeIndex::NONE;
        }
        let member = self.parse_member_inner();
        self.exit_recursion();
        member
    }

    fn parse_member_inner(&mut self) -> NodeIndex {
        self.skip_attributes();
        let start = self.token_pos();
        let modifiers = self.parse_modifiers();

        if self.is_type_declaration_start() {
            return self.parse_type_declaration(start, modifiers);
        }
        match self.current() {
            SyntaxKind::DelegateKeyword => {
                return self.parse_delegate_declaration(start, modifiers);
            }
            SyntaxKind::EventKeyword => return self.parse_event(start, modifiers),
            SyntaxKind::TildeToken => return self.parse_destructor(start, modifiers),
            SyntaxKind::ImplicitKeyword | SyntaxKind::ExplicitKeyword => {
                return self.parse_conversion_operator(start, modifiers);
            }
            SyntaxKind::Identifier
                if self.nth(1) == SyntaxKind::OpenParenToken
                    && self
                        .type_names
                        .last()
                        .is_some_and(|name| name == self.current_text().trim_start_matches('@')) =>
            {
                return self.parse_constructor(start, modifiers);
            }
            _ => {}
        }

        let type_node = self.parse_type();
        if type_node.is_none() {
            self.skip_until(&[SyntaxKind::SemicolonToken, SyntaxKind::CloseBraceToken]);
            self.eat(SyntaxKind::SemicolonToken);
            return NodeIndex::NONE;
        }

        match self.current() {
            SyntaxKind::OperatorKeyword => self.parse_operator(start, modifiers, type_node),
            SyntaxKind::ThisKeyword => self.parse_indexer(start, modifiers, type_node),
            SyntaxKind::Identifier => {
                // Explicit interface implementations: `IFoo.Bar`, `IFoo<T>.this[...]`
                let mut name = self.parse_identifier();
                loop {
                    if self.at(SyntaxKind::LessThanToken)
                        && self
                            .scan_type_argument_list(self.pos)
                            .is_some_and(|after| self.kind_at(after) == SyntaxKind::DotToken)
                    {
                        self.parse_type_argument_list();
                    }
                    if !self.at(SyntaxKind::DotToken) {
                        break;
                    }
                    self.advance();
                    if self.at(SyntaxKind::ThisKeyword) {
                        return self.parse_indexer(start, modifiers, type_node);
                    }
                    name = self.parse_identifier();
                }
                match self.current() {
                    SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken => {
                        self.parse_method(start, modifiers, type_node, name)
                    }
                    SyntaxKind::OpenBraceToken | SyntaxKind::EqualsGreaterThanToken => {
                        self.parse_property(start, modifiers, type_node, name)
                    }
                    _ => self.parse_field(start, modifiers, type_node, name),
                }
            }
            _ => {
                self.error_at_current(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
                self.skip_until(&[SyntaxKind::SemicolonToken, SyntaxKind::CloseBraceToken]);
                self.eat(SyntaxKind::SemicolonToken);
                NodeIndex::NONE
            }
        }
    }

    /// Fields: the first declarator's name is already consumed.
    fn parse_field(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        type_node: NodeIndex,
        first_name: NodeIndex,
    ) -> NodeIndex {
        let declaration = self.parse_declarators_after_first(start, type_node, first_name);
        self.expect_semicolon();
        self.arena.add_field(
            syntax_kind_ext::FIELD_DECLARATION,
            start,
            self.last_end,
            FieldData {
                modifiers,
                declaration,
            },
        )
    }

    fn parse_declarators_after_first(
        &mut self,
        start: u32,
        type_node: NodeIndex,
        first_name: NodeIndex,
    ) -> NodeIndex {
        let first_start = self
            .arena
            .get(first_name)
            .map_or_else(|| self.token_pos(), |node| node.pos);
        let mut declarators = vec![self.finish_declarator(first_start, first_name)];
        if self.eat(SyntaxKind::CommaToken) {
            self.parse_declarator_list(&mut declarators);
        }
        self.add_variable_declaration(start, type_node, declarators)
    }

    /// `event T Name;` or `event T Name { add { } remove { } }`
    fn parse_event(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        self.advance();
        let type_node = self.parse_type();
        let mut name = self.parse_identifier();
        // Explicit interface event: `event EventHandler IFoo.Changed { ... }`
        while self.eat(SyntaxKind::DotToken) {
            name = self.parse_identifier();
        }
        if self.at(SyntaxKind::OpenBraceToken) {
            let accessors = self.parse_accessor_list();
            return self.arena.add_property(
                syntax_kind_ext::EVENT_DECLARATION,
                start,
                self.last_end,
                PropertyData {
                    modifiers,
                    type_node,
                    name,
                    parameters: NodeList::new(),
                    accessors,
                    expression_body: NodeIndex::NONE,
                    initializer: NodeIndex::NONE,
                },
            );
        }
        let declaration = self.parse_declarators_after_first(start, type_node, name);
        self.expect_semicolon();
        self.arena.add_field(
            syntax_kind_ext::EVENT_FIELD_DECLARATION,
            start,
            self.last_end,
            FieldData {
                modifiers,
                declaration,
            },
        )
    }

    fn parse_property(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        type_node: NodeIndex,
        name: NodeIndex,
    ) -> NodeIndex {
        let (accessors, expression_body, initializer) = self.parse_property_body();
        self.arena.add_property(
            syntax_kind_ext::PROPERTY_DECLARATION,
            start,
            self.last_end,
            PropertyData {
                modifiers,
                type_node,
                name,
                parameters: NodeList::new(),
                accessors,
                expression_body,
                initializer,
            },
        )
    }

    fn parse_indexer(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        type_node: NodeIndex,
    ) -> NodeIndex {
        self.advance();
        let parameters =
            self.parse_parameter_list(SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken);
        let (accessors, expression_body, _) = self.parse_property_body();
        self.arena.add_property(
            syntax_kind_ext::INDEXER_DECLARATION,
            start,
            self.last_end,
            PropertyData {
                modifiers,
                type_node,
                name: NodeIndex::NONE,
                parameters,
                accessors,
                expression_body,
                initializer: NodeIndex::NONE,
            },
        )
    }

    /// `{ get; set; } = value;` or `=> expr;`
    fn parse_property_body(&mut self) -> (NodeList, NodeIndex, NodeIndex) {
        if self.eat(SyntaxKind::EqualsGreaterThanToken) {
            let expression_body = self.parse_required_expression();
            self.expect_semicolon();
            return (NodeList::new(), expression_body, NodeIndex::NONE);
        }
        let accessors = self.parse_accessor_list();
        let initializer = if self.eat(SyntaxKind::EqualsToken) {
            let initializer = if self.at(SyntaxKind::OpenBraceToken) {
                self.parse_initializer()
            } else {
                self.parse_required_expression()
            };
            self.expect_semicolon();
            initializer
        } else {
            NodeIndex::NONE
        };
        (accessors, NodeIndex::NONE, initializer)
    }

    fn parse_accessor_list(&mut self) -> NodeList {
        let mut accessors = Vec::new();
        if !self.expect(SyntaxKind::OpenBraceToken) {
            return NodeList::new();
        }
        while !self.at(SyntaxKind::CloseBraceToken) && !self.at_eof() {
            self.skip_attributes();
            let start = self.token_pos();
            let modifiers = self.parse_modifiers();
            if !self.at(SyntaxKind::Identifier) {
                self.skip_unexpected();
                continue;
            }
            let keyword = AccessorKind::from_text(self.current_text());
            if keyword == AccessorKind::Unknown {
                let text = self.current_text().to_string();
                self.error_at_current(diagnostic_codes::UNEXPECTED_TOKEN, &[&text]);
            }
            self.advance();
            let (body, expression_body) = self.parse_function_body();
            accessors.push(self.arena.add_accessor(
                syntax_kind_ext::ACCESSOR_DECLARATION,
                start,
                self.last_end,
                AccessorData {
                    modifiers,
                    keyword,
                    body,
                    expression_body,
                },
            ));
        }
        self.expect(SyntaxKind::CloseBraceToken);
        NodeList::from_vec(accessors)
    }

    fn parse_method(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        return_type: NodeIndex,
        name: NodeIndex,
    ) -> NodeIndex {
        let type_parameters = self.parse_type_parameter_list();
        let parameters =
            self.parse_parameter_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        self.skip_constraint_clauses();
        let (body, expression_body) = self.parse_function_body();
        self.add_method_like(
            syntax_kind_ext::METHOD_DECLARATION,
            start,
            MethodData {
                modifiers,
                return_type,
                name,
                type_parameters,
                parameters,
                body,
                expression_body,
                constructor_initializer: NodeIndex::NONE,
            },
        )
    }

    fn parse_constructor(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        let name = self.parse_identifier();
        let parameters =
            self.parse_parameter_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        let constructor_initializer = if self.at(SyntaxKind::ColonToken) {
            self.parse_constructor_initializer()
        } else {
            NodeIndex::NONE
        };
        let (body, expression_body) = self.parse_function_body();
        self.add_method_like(
            syntax_kind_ext::CONSTRUCTOR_DECLARATION,
            start,
            MethodData {
                modifiers,
                return_type: NodeIndex::NONE,
                name,
                type_parameters: NodeList::new(),
                parameters,
                body,
                expression_body,
                constructor_initializer,
            },
        )
    }

    /// `: base(args)` or `: this(args)`
    fn parse_constructor_initializer(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let target_start = self.token_pos();
        let target_kind = match self.current() {
            SyntaxKind::BaseKeyword => syntax_kind_ext::BASE_EXPRESSION,
            SyntaxKind::ThisKeyword => syntax_kind_ext::THIS_EXPRESSION,
            _ => {
                self.error_at_current(diagnostic_codes::TOKEN_EXPECTED, &["base"]);
                return NodeIndex::NONE;
            }
        };
        self.advance();
        let expression = self.arena.add_token(target_kind, target_start, self.last_end);
        let arguments =
            self.parse_argument_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        self.arena.add_call_expr(
            syntax_kind_ext::CONSTRUCTOR_INITIALIZER,
            start,
            self.last_end,
            CallExprData {
                expression,
                arguments,
            },
        )
    }

    fn parse_destructor(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        self.advance();
        let name = self.parse_identifier();
        let parameters =
            self.parse_parameter_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        let (body, expression_body) = self.parse_function_body();
        self.add_method_like(
            syntax_kind_ext::DESTRUCTOR_DECLARATION,
            start,
            MethodData {
                modifiers,
                return_type: NodeIndex::NONE,
                name,
                type_parameters: NodeList::new(),
                parameters,
                body,
                expression_body,
                constructor_initializer: NodeIndex::NONE,
            },
        )
    }

    /// `T operator +(T a, T b)`
    fn parse_operator(
        &mut self,
        start: u32,
        modifiers: ModifierFlags,
        return_type: NodeIndex,
    ) -> NodeIndex {
        self.advance();
        // `checked` user-defined operators
        self.eat(SyntaxKind::CheckedKeyword);
        if self.at_shift_right() || self.at_shift_right_equals() {
            self.advance();
        }
        if self.at(SyntaxKind::OpenParenToken) {
            self.error_at_current(diagnostic_codes::TOKEN_EXPECTED, &["operator"]);
        } else {
            self.advance();
        }
        self.finish_operator(syntax_kind_ext::OPERATOR_DECLARATION, start, modifiers, return_type)
    }

    /// `implicit operator T(U value)`
    fn parse_conversion_operator(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        self.advance();
        self.expect(SyntaxKind::OperatorKeyword);
        self.eat(SyntaxKind::CheckedKeyword);
        let return_type = self.parse_type();
        self.finish_operator(
            syntax_kind_ext::CONVERSION_OPERATOR_DECLARATION,
            start,
            modifiers,
            return_type,
        )
    }

    fn finish_operator(
        &mut self,
        kind: u16,
        start: u32,
        modifiers: ModifierFlags,
        return_type: NodeIndex,
    ) -> NodeIndex {
        let parameters =
            self.parse_parameter_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        let (body, expression_body) = self.parse_function_body();
        self.add_method_like(
            kind,
            start,
            MethodData {
                modifiers,
                return_type,
                name: NodeIndex::NONE,
                type_parameters: NodeList::new(),
                parameters,
                body,
                expression_body,
                constructor_initializer: NodeIndex::NONE,
            },
        )
    }

    fn add_method_like(&mut self, kind: u16, start: u32, data: MethodData) -> NodeIndex {
        self.arena.add_method(kind, start, self.last_end, data)
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Parameters between `open` and `close`. Lambda parameters may omit
    /// their type.
    pub(crate) fn parse_parameter_list(&mut self, open: SyntaxKind, close: SyntaxKind) -> NodeList {
        let mut parameters = Vec::new();
        if !self.expect(open) {
            return NodeList::new();
        }
        while !self.at(close) && !self.at_eof() {
            let before = self.pos;
            let parameter = self.parse_parameter(close);
            if parameter.is_some() {
                parameters.push(parameter);
            }
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
            if self.pos == before {
                break;
            }
        }
        if !self.expect(close) {
            self.skip_until(&[close, SyntaxKind::OpenBraceToken, SyntaxKind::SemicolonToken]);
            self.eat(close);
        }
        NodeList::from_vec(parameters)
    }

    fn parse_parameter(&mut self, close: SyntaxKind) -> NodeIndex {
        self.skip_attributes();
        let start = self.token_pos();
        let mut modifiers = ModifierFlags::empty();
        loop {
            let flag = match self.current() {
                SyntaxKind::RefKeyword => ModifierFlags::REF,
                SyntaxKind::OutKeyword => ModifierFlags::OUT,
                SyntaxKind::InKeyword => ModifierFlags::IN,
                SyntaxKind::ParamsKeyword => ModifierFlags::PARAMS,
                SyntaxKind::ThisKeyword => ModifierFlags::THIS,
                SyntaxKind::ReadOnlyKeyword => ModifierFlags::READONLY,
                SyntaxKind::Identifier
                    if self.at_contextual("scoped") && self.nth(1) != SyntaxKind::CommaToken =>
                {
                    ModifierFlags::SCOPED
                }
                _ => break,
            };
            modifiers |= flag;
            self.advance();
        }
        // `__arglist`
        if self.at_contextual("__arglist") {
            self.advance();
            return NodeIndex::NONE;
        }

        // Implicitly typed lambda parameter
        let type_node = if self.at(SyntaxKind::Identifier)
            && (self.nth(1) == SyntaxKind::CommaToken || self.nth(1) == close)
        {
            NodeIndex::NONE
        } else {
            self.parse_type()
        };
        let name = self.parse_identifier();
        let default_value = if self.eat(SyntaxKind::EqualsToken) {
            self.parse_required_expression()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_parameter(
            syntax_kind_ext::PARAMETER,
            start,
            self.last_end,
            ParameterData {
                modifiers,
                type_node,
                name,
                default_value,
            },
        )
    }
}
