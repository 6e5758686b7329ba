//! Parser state - statements, blocks and local declarations.

use super::state::ParserState;
use crate::parser::{
    NodeIndex, NodeList,
    node::{
        BlockData, CaseLabelData, CatchData, ExprStatementData, ForEachData, IfData, LabeledData,
        LocalDeclarationData, LoopData, MethodData, ModifierFlags, ScopedStatementData,
        SwitchData, SwitchSectionData, TryData, VariableDeclarationData, VariableDeclaratorData,
    },
    syntax_kind_ext,
};
use tpa_common::diagnostic_codes;
use tpa_scanner::SyntaxKind;

impl ParserState {
    /// Parse `{ statements }`.
    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.expect(SyntaxKind::OpenBraceToken) {
            return NodeIndex::NONE;
        }
        let mut statements = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) && !self.at_eof() {
            let before = self.pos;
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.pos == before {
                self.skip_unexpected();
            }
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.arena.add_block(
            syntax_kind_ext::BLOCK,
            start,
            self.last_end,
            BlockData {
                statements: NodeList::from_vec(statements),
            },
        )
    }

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let statement = self.parse_statement_inner();
        self.exit_recursion();
        statement
    }

    fn parse_statement_inner(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.current() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                self.advance();
                self.arena
                    .add_token(syntax_kind_ext::EMPTY_STATEMENT, start, self.last_end)
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ForEachKeyword => self.parse_foreach_statement(start, false),
            SyntaxKind::UsingKeyword => self.parse_using(start, ModifierFlags::empty()),
            SyntaxKind::FixedKeyword => {
                self.parse_scoped_statement(syntax_kind_ext::FIXED_STATEMENT, true)
            }
            SyntaxKind::LockKeyword => {
                self.parse_scoped_statement(syntax_kind_ext::LOCK_STATEMENT, false)
            }
            SyntaxKind::CheckedKeyword | SyntaxKind::UncheckedKeyword
                if self.nth(1) == SyntaxKind::OpenBraceToken =>
            {
                self.advance();
                self.parse_block_statement(start, syntax_kind_ext::CHECKED_STATEMENT)
            }
            SyntaxKind::UnsafeKeyword if self.nth(1) == SyntaxKind::OpenBraceToken => {
                self.advance();
                self.parse_block_statement(start, syntax_kind_ext::UNSAFE_STATEMENT)
            }
            SyntaxKind::ReturnKeyword => {
                self.parse_expression_carrying(syntax_kind_ext::RETURN_STATEMENT)
            }
            SyntaxKind::ThrowKeyword => {
                self.parse_expression_carrying(syntax_kind_ext::THROW_STATEMENT)
            }
            SyntaxKind::BreakKeyword => self.parse_jump(syntax_kind_ext::BREAK_STATEMENT),
            SyntaxKind::ContinueKeyword => self.parse_jump(syntax_kind_ext::CONTINUE_STATEMENT),
            SyntaxKind::GotoKeyword => self.parse_goto_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ConstKeyword => {
                self.advance();
                self.parse_local_declaration(start, ModifierFlags::CONST)
            }
            SyntaxKind::Identifier if self.at_contextual("yield") => self.parse_yield_statement(),
            SyntaxKind::Identifier
                if self.at_contextual("await")
                    && matches!(
                        self.nth(1),
                        SyntaxKind::ForEachKeyword | SyntaxKind::UsingKeyword
                    ) =>
            {
                self.advance();
                if self.at(SyntaxKind::ForEachKeyword) {
                    self.parse_foreach_statement(start, true)
                } else {
                    self.parse_using(start, ModifierFlags::AWAIT)
                }
            }
            SyntaxKind::Identifier if self.nth(1) == SyntaxKind::ColonToken => {
                let label = self.parse_identifier();
                self.advance();
                let statement = self.parse_statement();
                self.arena.add_labeled(
                    syntax_kind_ext::LABELED_STATEMENT,
                    start,
                    self.last_end,
                    LabeledData { label, statement },
                )
            }
            _ if self.is_local_function_ahead() => self.parse_local_function(),
            _ if self.is_local_declaration_ahead(self.pos) => {
                self.parse_local_declaration(start, ModifierFlags::empty())
            }
            SyntaxKind::Identifier
                if self.at_contextual("scoped")
                    && self.is_local_declaration_ahead(self.pos + 1) =>
            {
                self.advance();
                self.parse_local_declaration(start, ModifierFlags::SCOPED)
            }
            _ => self.parse_expression_statement(),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// `T x =`, `T x;`, `T x,` at `index` (optionally after `ref`).
    pub(crate) fn is_local_declaration_ahead(&self, index: usize) -> bool {
        let mut i = index;
        if self.kind_at(i) == SyntaxKind::RefKeyword {
            i += 1;
            if self.kind_at(i) == SyntaxKind::ReadOnlyKeyword {
                i += 1;
            }
        }
        // `await x;` is an expression
        if self.is_contextual_at(i, "await") {
            return false;
        }
        let Some(end) = self.scan_type(i) else {
            return false;
        };
        self.kind_at(end) == SyntaxKind::Identifier
            && matches!(
                self.kind_at(end + 1),
                SyntaxKind::EqualsToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::OpenBracketToken
            )
    }

    /// Modifiers, return type, name, then `(` or `<`.
    fn is_local_function_ahead(&self) -> bool {
        let mut i = self.pos;
        loop {
            match self.kind_at(i) {
                SyntaxKind::StaticKeyword | SyntaxKind::UnsafeKeyword | SyntaxKind::ExternKeyword => {
                    i += 1
                }
                SyntaxKind::Identifier if self.is_contextual_at(i, "async") => i += 1,
                _ => break,
            }
        }
        let Some(end) = self.scan_type(i) else {
            return false;
        };
        if self.kind_at(end) != SyntaxKind::Identifier {
            return false;
        }
        let parameters_start = match self.kind_at(end + 1) {
            SyntaxKind::OpenParenToken => end + 1,
            SyntaxKind::LessThanToken => match self.scan_type_argument_list(end + 1) {
                Some(after) if self.kind_at(after) == SyntaxKind::OpenParenToken => after,
                _ => return false,
            },
            _ => return false,
        };
        // A body must follow, otherwise `await F(x);` would look like a declaration.
        self.scan_balanced(parameters_start).is_some_and(|after| {
            matches!(
                self.kind_at(after),
                SyntaxKind::OpenBraceToken | SyntaxKind::EqualsGreaterThanToken
            ) || self.is_contextual_at(after, "where")
        })
    }

    fn parse_local_function(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut modifiers = ModifierFlags::empty();
        loop {
            if let Some(flag) = ModifierFlags::from_keyword(self.current()) {
                modifiers |= flag;
            } else if self.at_contextual("async") {
                modifiers |= ModifierFlags::ASYNC;
            } else {
                break;
            }
            self.advance();
        }
        let return_type = self.parse_type();
        let name = self.parse_identifier();
        let type_parameters = self.parse_type_parameter_list();
        let parameters =
            self.parse_parameter_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        self.skip_constraint_clauses();
        let (body, expression_body) = self.parse_function_body();
        self.arena.add_method(
            syntax_kind_ext::LOCAL_FUNCTION_STATEMENT,
            start,
            self.last_end,
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

    /// `{ ... }`, `=> expr;` or `;`. Returns (block body, expression body).
    pub(crate) fn parse_function_body(&mut self) -> (NodeIndex, NodeIndex) {
        if self.at(SyntaxKind::OpenBraceToken) {
            (self.parse_block(), NodeIndex::NONE)
        } else if self.eat(SyntaxKind::EqualsGreaterThanToken) {
            let expression = self.parse_required_expression();
            self.expect_semicolon();
            (NodeIndex::NONE, expression)
        } else {
            self.expect_semicolon();
            (NodeIndex::NONE, NodeIndex::NONE)
        }
    }

    fn parse_local_declaration(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        let declaration = self.parse_variable_declaration();
        self.expect_semicolon();
        self.arena.add_local_declaration(
            syntax_kind_ext::LOCAL_DECLARATION_STATEMENT,
            start,
            self.last_end,
            LocalDeclarationData {
                modifiers,
                declaration,
            },
        )
    }

    /// `T a = 1, b` - shared by locals, `for`, `using` and `fixed`.
    pub(crate) fn parse_variable_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let type_node = self.parse_type();
        self.parse_declarators(start, type_node)
    }

    /// Declarators after an already parsed type.
    fn parse_declarators(&mut self, start: u32, type_node: NodeIndex) -> NodeIndex {
        let mut declarators = Vec::new();
        self.parse_declarator_list(&mut declarators);
        self.add_variable_declaration(start, type_node, declarators)
    }

    pub(crate) fn parse_declarator_list(&mut self, declarators: &mut Vec<NodeIndex>) {
        loop {
            let declarator_start = self.token_pos();
            let name = self.parse_identifier();
            if name.is_none() {
                break;
            }
            declarators.push(self.finish_declarator(declarator_start, name));
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
    }

    /// Everything after a declarator's name: `[size]` and `= initializer`.
    pub(crate) fn finish_declarator(&mut self, start: u32, name: NodeIndex) -> NodeIndex {
        // Fixed-size buffer: `fixed byte data[16];`
        if self.at(SyntaxKind::OpenBracketToken) {
            self.skip_attributes();
        }
        let initializer = if self.eat(SyntaxKind::EqualsToken) {
            if self.at(SyntaxKind::OpenBraceToken) {
                self.parse_initializer()
            } else {
                self.parse_required_expression()
            }
        } else {
            NodeIndex::NONE
        };
        self.arena.add_variable_declarator(
            syntax_kind_ext::VARIABLE_DECLARATOR,
            start,
            self.last_end,
            VariableDeclaratorData { name, initializer },
        )
    }

    pub(crate) fn add_variable_declaration(
        &mut self,
        start: u32,
        type_node: NodeIndex,
        declarators: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.arena.add_variable_declaration(
            syntax_kind_ext::VARIABLE_DECLARATION,
            start,
            self.last_end,
            VariableDeclarationData {
                type_node,
                declarators: NodeList::from_vec(declarators),
            },
        )
    }

    // =========================================================================
    // Simple statements
    // =========================================================================

    pub(crate) fn expect_semicolon(&mut self) {
        if !self.expect(SyntaxKind::SemicolonToken) {
            self.skip_until(&[SyntaxKind::SemicolonToken, SyntaxKind::CloseBraceToken]);
            self.eat(SyntaxKind::SemicolonToken);
        }
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_expression();
        if expression.is_none() {
            let text = self.current_text().to_string();
            self.error_at_current(diagnostic_codes::UNEXPECTED_TOKEN, &[&text]);
            return NodeIndex::NONE;
        }
        self.expect_semicolon();
        self.add_expression_statement(syntax_kind_ext::EXPRESSION_STATEMENT, start, expression)
    }

    fn add_expression_statement(&mut self, kind: u16, start: u32, expression: NodeIndex) -> NodeIndex {
        self.arena.add_expr_statement(
            kind,
            start,
            self.last_end,
            ExprStatementData { expression },
        )
    }

    /// `return [expr];`, `throw [expr];`
    fn parse_expression_carrying(&mut self, kind: u16) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let expression = if self.at(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_required_expression()
        };
        self.expect_semicolon();
        self.add_expression_statement(kind, start, expression)
    }

    fn parse_jump(&mut self, kind: u16) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        self.expect_semicolon();
        self.arena.add_token(kind, start, self.last_end)
    }

    /// `goto label;`, `goto case X;`, `goto default;`
    fn parse_goto_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let target = if self.eat(SyntaxKind::CaseKeyword) {
            self.parse_required_expression()
        } else if self.eat(SyntaxKind::DefaultKeyword) {
            NodeIndex::NONE
        } else {
            self.parse_identifier()
        };
        self.expect_semicolon();
        self.add_expression_statement(syntax_kind_ext::GOTO_STATEMENT, start, target)
    }

    fn parse_yield_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.nth(1) {
            SyntaxKind::ReturnKeyword => {
                self.advance();
                self.advance();
                let expression = self.parse_required_expression();
                self.expect_semicolon();
                self.add_expression_statement(
                    syntax_kind_ext::YIELD_RETURN_STATEMENT,
                    start,
                    expression,
                )
            }
            SyntaxKind::BreakKeyword => {
                self.advance();
                self.parse_jump(syntax_kind_ext::YIELD_BREAK_STATEMENT)
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_parenthesized_condition(&mut self) -> NodeIndex {
        self.expect(SyntaxKind::OpenParenToken);
        let condition = self.parse_required_expression();
        if !self.expect(SyntaxKind::CloseParenToken) {
            self.skip_until(&[SyntaxKind::CloseParenToken]);
            self.eat(SyntaxKind::CloseParenToken);
        }
        condition
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let condition = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement();
        let else_statement = if self.eat(SyntaxKind::ElseKeyword) {
            self.parse_statement()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_if_statement(
            syntax_kind_ext::IF_STATEMENT,
            start,
            self.last_end,
            IfData {
                condition,
                then_statement,
                else_statement,
            },
        )
    }

    // =========================================================================
    // Loops
    // =========================================================================

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let condition = self.parse_parenthesized_condition();
        let statement = self.parse_statement();
        self.add_loop(syntax_kind_ext::WHILE_STATEMENT, start, condition, statement)
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let statement = self.parse_statement();
        self.expect(SyntaxKind::WhileKeyword);
        let condition = self.parse_parenthesized_condition();
        self.expect_semicolon();
        self.add_loop(syntax_kind_ext::DO_STATEMENT, start, condition, statement)
    }

    fn add_loop(
        &mut self,
        kind: u16,
        start: u32,
        condition: NodeIndex,
        statement: NodeIndex,
    ) -> NodeIndex {
        self.arena.add_loop(
            kind,
            start,
            self.last_end,
            LoopData {
                declaration: NodeIndex::NONE,
                initializers: NodeList::new(),
                condition,
                incrementors: NodeList::new(),
                statement,
            },
        )
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        self.expect(SyntaxKind::OpenParenToken);

        let mut declaration = NodeIndex::NONE;
        let mut initializers = NodeList::new();
        if self.is_local_declaration_ahead(self.pos) {
            declaration = self.parse_variable_declaration();
        } else if !self.at(SyntaxKind::SemicolonToken) {
            initializers = self.parse_statement_expression_list(SyntaxKind::SemicolonToken);
        }
        self.expect(SyntaxKind::SemicolonToken);

        let condition = if self.at(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_required_expression()
        };
        self.expect(SyntaxKind::SemicolonToken);

        let incrementors = if self.at(SyntaxKind::CloseParenToken) {
            NodeList::new()
        } else {
            self.parse_statement_expression_list(SyntaxKind::CloseParenToken)
        };
        if !self.expect(SyntaxKind::CloseParenToken) {
            self.skip_until(&[SyntaxKind::CloseParenToken]);
            self.eat(SyntaxKind::CloseParenToken);
        }
        let statement = self.parse_statement();
        self.arena.add_loop(
            syntax_kind_ext::FOR_STATEMENT,
            start,
            self.last_end,
            LoopData {
                declaration,
                initializers,
                condition,
                incrementors,
                statement,
            },
        )
    }

    fn parse_statement_expression_list(&mut self, terminator: SyntaxKind) -> NodeList {
        let mut expressions = Vec::new();
        loop {
            let expression = self.parse_required_expression();
            if expression.is_none() {
                break;
            }
            expressions.push(expression);
            if self.at(terminator) || !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        NodeList::from_vec(expressions)
    }

    fn parse_foreach_statement(&mut self, start: u32, is_await: bool) -> NodeIndex {
        self.advance();
        self.expect(SyntaxKind::OpenParenToken);
        let (type_node, variable) = match self.scan_type(self.pos) {
            Some(end)
                if self.kind_at(end) == SyntaxKind::Identifier
                    && self.kind_at(end + 1) == SyntaxKind::InKeyword =>
            {
                let type_node = self.parse_type();
                (type_node, self.parse_identifier())
            }
            // Deconstruction: `var (a, b)`, `(var a, var b)`
            _ => (NodeIndex::NONE, self.parse_expression()),
        };
        self.expect(SyntaxKind::InKeyword);
        let expression = self.parse_required_expression();
        self.expect(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.arena.add_foreach(
            syntax_kind_ext::FOREACH_STATEMENT,
            start,
            self.last_end,
            ForEachData {
                is_await,
                type_node,
                variable,
                expression,
                statement,
            },
        )
    }

    // =========================================================================
    // using / fixed / lock / checked / unsafe
    // =========================================================================

    /// `using (...) stmt` or `using var x = ...;` (optionally after `await`).
    fn parse_using(&mut self, start: u32, modifiers: ModifierFlags) -> NodeIndex {
        if self.nth(1) != SyntaxKind::OpenParenToken {
            self.advance();
            return self.parse_local_declaration(start, modifiers | ModifierFlags::USING);
        }
        self.advance();
        self.advance();
        let (declaration, expression) = if self.is_local_declaration_ahead(self.pos) {
            (self.parse_variable_declaration(), NodeIndex::NONE)
        } else {
            (NodeIndex::NONE, self.parse_required_expression())
        };
        self.expect(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.arena.add_scoped_statement(
            syntax_kind_ext::USING_STATEMENT,
            start,
            self.last_end,
            ScopedStatementData {
                declaration,
                expression,
                statement,
            },
        )
    }

    /// `fixed (T* p = ...) stmt`, `lock (x) stmt`
    fn parse_scoped_statement(&mut self, kind: u16, declares: bool) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        self.expect(SyntaxKind::OpenParenToken);
        let (declaration, expression) = if declares {
            (self.parse_variable_declaration(), NodeIndex::NONE)
        } else {
            (NodeIndex::NONE, self.parse_required_expression())
        };
        self.expect(SyntaxKind::CloseParenToken);
        let statement = self.parse_statement();
        self.arena.add_scoped_statement(
            kind,
            start,
            self.last_end,
            ScopedStatementData {
                declaration,
                expression,
                statement,
            },
        )
    }

    fn parse_block_statement(&mut self, start: u32, kind: u16) -> NodeIndex {
        let statement = self.parse_block();
        self.arena.add_scoped_statement(
            kind,
            start,
            self.last_end,
            ScopedStatementData {
                declaration: NodeIndex::NONE,
                expression: NodeIndex::NONE,
                statement,
            },
        )
    }

    // =========================================================================
    // try / switch
    // =========================================================================

    fn parse_try_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let block = self.parse_block();
        let mut catches = Vec::new();
        while self.at(SyntaxKind::CatchKeyword) {
            catches.push(self.parse_catch_clause());
        }
        let finally_block = if self.eat(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };
        if catches.is_empty() && finally_block.is_none() {
            self.error_at_current(diagnostic_codes::TOKEN_EXPECTED, &["catch"]);
        }
        self.arena.add_try(
            syntax_kind_ext::TRY_STATEMENT,
            start,
            self.last_end,
            TryData {
                block,
                catches: NodeList::from_vec(catches),
                finally_block,
            },
        )
    }

    fn parse_catch_clause(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let mut type_node = NodeIndex::NONE;
        let mut identifier = NodeIndex::NONE;
        if self.eat(SyntaxKind::OpenParenToken) {
            type_node = self.parse_type();
            if self.at(SyntaxKind::Identifier) {
                identifier = self.parse_identifier();
            }
            self.expect(SyntaxKind::CloseParenToken);
        }
        let filter = if self.at_contextual("when") {
            self.advance();
            self.parse_parenthesized_condition()
        } else {
            NodeIndex::NONE
        };
        let block = self.parse_block();
        self.arena.add_catch_clause(
            syntax_kind_ext::CATCH_CLAUSE,
            start,
            self.last_end,
            CatchData {
                type_node,
                identifier,
                filter,
                block,
            },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        // `switch (x)` and `switch (a, b)`: the parentheses parse as an expression.
        let expression = if self.at(SyntaxKind::OpenParenToken) {
            self.parse_required_expression()
        } else {
            self.error_at_current(diagnostic_codes::TOKEN_EXPECTED, &["("]);
            NodeIndex::NONE
        };
        self.expect(SyntaxKind::OpenBraceToken);
        let mut sections = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) && !self.at_eof() {
            if !self.is_switch_label_ahead() {
                self.skip_unexpected();
                continue;
            }
            sections.push(self.parse_switch_section());
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.arena.add_switch(
            syntax_kind_ext::SWITCH_STATEMENT,
            start,
            self.last_end,
            SwitchData {
                expression,
                sections: NodeList::from_vec(sections),
            },
        )
    }

    fn is_switch_label_ahead(&self) -> bool {
        self.at(SyntaxKind::CaseKeyword)
            || (self.at(SyntaxKind::DefaultKeyword) && self.nth(1) == SyntaxKind::ColonToken)
    }

    fn parse_switch_section(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut labels = Vec::new();
        while self.is_switch_label_ahead() {
            let label_start = self.token_pos();
            if self.eat(SyntaxKind::DefaultKeyword) {
                self.expect(SyntaxKind::ColonToken);
                labels.push(self.arena.add_token(
                    syntax_kind_ext::DEFAULT_LABEL,
                    label_start,
                    self.last_end,
                ));
                continue;
            }
            self.advance();
            let pattern = self.parse_pattern();
            let when_clause = if self.at_contextual("when") {
                self.advance();
                self.parse_required_expression()
            } else {
                NodeIndex::NONE
            };
            if !self.expect(SyntaxKind::ColonToken) {
                self.skip_until(&[SyntaxKind::ColonToken]);
                self.eat(SyntaxKind::ColonToken);
            }
            labels.push(self.arena.add_case_label(
                syntax_kind_ext::CASE_LABEL,
                label_start,
                self.last_end,
                CaseLabelData {
                    pattern,
                    when_clause,
                },
            ));
        }
        let mut statements = Vec::new();
        while !self.is_switch_label_ahead()
            && !self.at(SyntaxKind::CloseBraceToken)
            && !self.at_eof()
        {
            let before = self.pos;
            let statement = self.parse_statement();
            if statement.is_some() {
                statements.push(statement);
            }
            if self.pos == before {
                self.skip_unexpected();
            }
        }
        self.arena.add_switch_section(
            syntax_kind_ext::SWITCH_SECTION,
            start,
            self.last_end,
            SwitchSectionData {
                labels: NodeList::from_vec(labels),
                statements: NodeList::from_vec(statements),
            },
        )
    }
}
