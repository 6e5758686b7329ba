//! Parser state - expression parsing.
//!
//! Binary operators use precedence climbing. Ambiguous prefixes (lambda,
//! cast, generic name) are resolved with the node-free `scan_*` lookahead
//! before any node is created.

use super::state::ParserState;
use crate::parser::{
    NodeIndex, NodeList,
    node::{
        ArgumentData, BinaryExprData, CallExprData, CastData, ConditionalExprData,
        DeclarationExprData, ElementAccessData, GenericNameData, InitializerData,
        InterpolatedStringData, LambdaData, LiteralData, MemberAccessData, ModifierFlags,
        ObjectCreationData, ParameterData, ParenthesizedData, QualifiedNameData, SwitchArmData,
        SwitchExprData, TypeOperandData, UnaryExprData, WrappedTypeData,
    },
    syntax_kind_ext,
};
use tpa_common::diagnostic_codes;
use tpa_scanner::{SyntaxKind, tokenize_range};

/// Binary operator precedence, lowest first.
const PREC_LOGICAL_OR: u8 = 1;
const PREC_LOGICAL_AND: u8 = 2;
const PREC_BITWISE_OR: u8 = 3;
const PREC_BITWISE_XOR: u8 = 4;
const PREC_BITWISE_AND: u8 = 5;
const PREC_EQUALITY: u8 = 6;
const PREC_RELATIONAL: u8 = 7;
pub(crate) const PREC_SHIFT: u8 = 8;
const PREC_ADDITIVE: u8 = 9;
const PREC_MULTIPLICATIVE: u8 = 10;

impl ParserState {
    /// Parse a full expression (assignment level, lambdas included).
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let expression = self.parse_assignment_expression();
        self.exit_recursion();
        expression
    }

    /// Parse an expression, reporting an error when none is present.
    pub(crate) fn parse_required_expression(&mut self) -> NodeIndex {
        let expression = self.parse_expression();
        if expression.is_none() {
            self.error_at_current(diagnostic_codes::EXPRESSION_EXPECTED, &[]);
        }
        expression
    }

    fn parse_assignment_expression(&mut self) -> NodeIndex {
        if self.is_lambda_start() {
            return self.parse_lambda_expression();
        }
        let start = self.token_pos();
        let left = self.parse_conditional_expression();
        if left.is_none() {
            return left;
        }
        let operator_token = if self.at_shift_right_equals() {
            self.advance();
            self.advance();
            SyntaxKind::GreaterThanGreaterThanEqualsToken
        } else if self.current().is_assignment_operator() {
            let kind = self.current();
            self.advance();
            kind
        } else {
            return left;
        };
        let right = self.parse_required_expression();
        self.arena.add_binary_expr(
            syntax_kind_ext::ASSIGNMENT_EXPRESSION,
            start,
            self.last_end,
            BinaryExprData {
                left,
                operator_token,
                right,
            },
        )
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let condition = self.parse_coalesce_expression();
        if condition.is_none() || !self.at(SyntaxKind::QuestionToken) {
            return condition;
        }
        self.advance();
        let when_true = self.parse_required_expression();
        self.expect(SyntaxKind::ColonToken);
        let when_false = self.parse_required_expression();
        self.arena.add_conditional_expr(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            start,
            self.last_end,
            ConditionalExprData {
                condition,
                when_true,
                when_false,
            },
        )
    }

    fn parse_coalesce_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let left = self.parse_binary_expression(PREC_LOGICAL_OR);
        if left.is_none() || !self.at(SyntaxKind::QuestionQuestionToken) {
            return left;
        }
        self.advance();
        // Right associative
        let right = if self.enter_recursion() {
            let right = self.parse_coalesce_expression();
            self.exit_recursion();
            right
        } else {
            NodeIndex::NONE
        };
        self.arena.add_binary_expr(
            syntax_kind_ext::BINARY_EXPRESSION,
            start,
            self.last_end,
            BinaryExprData {
                left,
                operator_token: SyntaxKind::QuestionQuestionToken,
                right,
            },
        )
    }

    /// Precedence and width (in tokens) of the binary operator at the cursor.
    fn binary_operator(&self) -> Option<(u8, SyntaxKind, usize)> {
        if self.at_shift_right_equals() {
            return None;
        }
        if self.at_shift_right() {
            return Some((PREC_SHIFT, SyntaxKind::GreaterThanGreaterThanToken, 2));
        }
        let kind = self.current();
        let precedence = match kind {
            SyntaxKind::BarBarToken => PREC_LOGICAL_OR,
            SyntaxKind::AmpersandAmpersandToken => PREC_LOGICAL_AND,
            SyntaxKind::BarToken => PREC_BITWISE_OR,
            SyntaxKind::CaretToken => PREC_BITWISE_XOR,
            SyntaxKind::AmpersandToken => PREC_BITWISE_AND,
            SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => PREC_EQUALITY,
            SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanEqualsToken
            | SyntaxKind::IsKeyword
            | SyntaxKind::AsKeyword => PREC_RELATIONAL,
            SyntaxKind::LessThanLessThanToken => PREC_SHIFT,
            SyntaxKind::PlusToken | SyntaxKind::MinusToken => PREC_ADDITIVE,
            SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
                PREC_MULTIPLICATIVE
            }
            _ => return None,
        };
        Some((precedence, kind, 1))
    }

    pub(crate) fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_switch_or_with_expression();
        if left.is_none() {
            return left;
        }
        while let Some((precedence, operator_token, width)) = self.binary_operator() {
            if precedence < min_precedence {
                break;
            }
            for _ in 0..width {
                self.advance();
            }
            let (kind, right) = match operator_token {
                SyntaxKind::IsKeyword => (syntax_kind_ext::IS_EXPRESSION, self.parse_pattern()),
                SyntaxKind::AsKeyword => (
                    syntax_kind_ext::AS_EXPRESSION,
                    self.parse_type_in_expression(),
                ),
                _ => (
                    syntax_kind_ext::BINARY_EXPRESSION,
                    self.parse_binary_expression(precedence + 1),
                ),
            };
            if right.is_none() {
                self.error_at_current(diagnostic_codes::EXPRESSION_EXPECTED, &[]);
            }
            left = self.arena.add_binary_expr(
                kind,
                start,
                self.last_end,
                BinaryExprData {
                    left,
                    operator_token,
                    right,
                },
            );
        }
        left
    }

    /// `x switch { ... }` and `x with { ... }` bind tighter than relational
    /// operators.
    fn parse_switch_or_with_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut expression = self.parse_range_expression();
        while expression.is_some() && self.nth(1) == SyntaxKind::OpenBraceToken {
            if self.at(SyntaxKind::SwitchKeyword) {
                self.advance();
                expression = self.parse_switch_expression_arms(start, expression);
            } else if self.at_contextual("with") {
                self.advance();
                let initializer = self.parse_initializer();
                expression = self.arena.add_binary_expr(
                    syntax_kind_ext::WITH_EXPRESSION,
                    start,
                    self.last_end,
                    BinaryExprData {
                        left: expression,
                        operator_token: SyntaxKind::Unknown,
                        right: initializer,
                    },
                );
            } else {
                break;
            }
        }
        expression
    }

    fn parse_switch_expression_arms(&mut self, start: u32, expression: NodeIndex) -> NodeIndex {
        self.expect(SyntaxKind::OpenBraceToken);
        let mut arms = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) && !self.at_eof() {
            let arm_start = self.token_pos();
            let before = self.pos;
            let pattern = self.parse_pattern();
            let when_clause = if self.at_contextual("when") {
                self.advance();
                self.parse_required_expression()
            } else {
                NodeIndex::NONE
            };
            self.expect(SyntaxKind::EqualsGreaterThanToken);
            let arm_expression = self.parse_required_expression();
            arms.push(self.arena.add_switch_arm(
                syntax_kind_ext::SWITCH_EXPRESSION_ARM,
                arm_start,
                self.last_end,
                SwitchArmData {
                    pattern,
                    when_clause,
                    expression: arm_expression,
                },
            ));
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
            if self.pos == before {
                self.skip_unexpected();
            }
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.arena.add_switch_expr(
            syntax_kind_ext::SWITCH_EXPRESSION,
            start,
            self.last_end,
            SwitchExprData {
                expression,
                arms: NodeList::from_vec(arms),
            },
        )
    }

    /// `a..b`, `..b`, `a..`, `..`
    fn parse_range_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let left = if self.at(SyntaxKind::DotDotToken) {
            NodeIndex::NONE
        } else {
            let left = self.parse_unary_expression();
            if left.is_none() || !self.at(SyntaxKind::DotDotToken) {
                return left;
            }
            left
        };
        self.advance();
        let right = if Self::can_start_expression(self.current()) {
            self.parse_unary_expression()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_binary_expr(
            syntax_kind_ext::RANGE_EXPRESSION,
            start,
            self.last_end,
            BinaryExprData {
                left,
                operator_token: SyntaxKind::DotDotToken,
                right,
            },
        )
    }

    pub(crate) fn parse_unary_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let result = self.parse_unary_expression_inner();
        self.exit_recursion();
        result
    }

    fn parse_unary_expression_inner(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let kind = self.current();
        match kind {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::AsteriskToken
            | SyntaxKind::CaretToken => {
                self.advance();
                let operand = self.parse_unary_expression();
                self.add_unary(syntax_kind_ext::PREFIX_UNARY_EXPRESSION, start, kind, operand)
            }
            SyntaxKind::ThrowKeyword => {
                self.advance();
                let operand = self.parse_required_expression();
                self.add_unary(syntax_kind_ext::THROW_EXPRESSION, start, kind, operand)
            }
            SyntaxKind::RefKeyword => {
                self.advance();
                let operand = self.parse_unary_expression();
                self.add_unary(syntax_kind_ext::REF_EXPRESSION, start, kind, operand)
            }
            SyntaxKind::Identifier if self.is_await_expression() => {
                self.advance();
                let operand = self.parse_unary_expression();
                self.add_unary(
                    syntax_kind_ext::AWAIT_EXPRESSION,
                    start,
                    SyntaxKind::Identifier,
                    operand,
                )
            }
            SyntaxKind::OpenParenToken if self.is_cast_expression() => self.parse_cast_expression(),
            _ => {
                let primary = self.parse_primary_expression();
                if primary.is_none() {
                    return primary;
                }
                self.parse_postfix_expression(start, primary)
            }
        }
    }

    fn add_unary(
        &mut self,
        kind: u16,
        start: u32,
        operator: SyntaxKind,
        operand: NodeIndex,
    ) -> NodeIndex {
        if operand.is_none() {
            self.error_at_current(diagnostic_codes::EXPRESSION_EXPECTED, &[]);
        }
        self.arena.add_unary_expr(
            kind,
            start,
            self.last_end,
            UnaryExprData { operator, operand },
        )
    }

    fn is_await_expression(&self) -> bool {
        if !self.at_contextual("await") {
            return false;
        }
        let next = self.nth(1);
        Self::can_start_expression(next)
            && !matches!(
                next,
                SyntaxKind::MinusToken
                    | SyntaxKind::PlusToken
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::AmpersandToken
                    | SyntaxKind::CaretToken
                    | SyntaxKind::DotDotToken
                    | SyntaxKind::OpenBracketToken
            )
    }

    // =========================================================================
    // Casts and lambdas
    // =========================================================================

    fn is_cast_expression(&self) -> bool {
        let Some(type_end) = self.scan_type(self.pos + 1) else {
            return false;
        };
        if self.kind_at(type_end) != SyntaxKind::CloseParenToken {
            return false;
        }
        let next_index = type_end + 1;
        let next = self.kind_at(next_index);
        // `(int)-x` is a cast; `(a)-x` is a subtraction.
        if self.kind_at(self.pos + 1).is_predefined_type() && type_end == self.pos + 2 {
            return Self::can_start_expression(next);
        }
        match next {
            SyntaxKind::Identifier => !matches!(
                self.text_at(next_index),
                "with" | "and" | "or" | "when" | "switch"
            ),
            SyntaxKind::OpenParenToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken => true,
            kind if kind.is_literal() => true,
            kind if kind.is_keyword() => !matches!(
                kind,
                SyntaxKind::AsKeyword | SyntaxKind::IsKeyword | SyntaxKind::SwitchKeyword
            ),
            _ => false,
        }
    }

    fn parse_cast_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.expect(SyntaxKind::OpenParenToken);
        let type_node = self.parse_type();
        self.expect(SyntaxKind::CloseParenToken);
        let expression = self.parse_unary_expression();
        if expression.is_none() {
            self.error_at_current(diagnostic_codes::EXPRESSION_EXPECTED, &[]);
        }
        self.arena.add_cast(
            syntax_kind_ext::CAST_EXPRESSION,
            start,
            self.last_end,
            CastData {
                type_node,
                expression,
            },
        )
    }

    pub(crate) fn is_lambda_start(&self) -> bool {
        let mut i = self.pos;
        // Modifiers: `async`, `static`
        loop {
            if self.kind_at(i) == SyntaxKind::StaticKeyword {
                i += 1;
            } else if self.is_contextual_at(i, "async")
                && matches!(
                    self.kind_at(i + 1),
                    SyntaxKind::Identifier | SyntaxKind::OpenParenToken | SyntaxKind::StaticKeyword
                )
            {
                i += 1;
            } else {
                break;
            }
        }
        match self.kind_at(i) {
            SyntaxKind::Identifier => self.kind_at(i + 1) == SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::OpenParenToken => self
                .scan_balanced(i)
                .is_some_and(|end| self.kind_at(end) == SyntaxKind::EqualsGreaterThanToken),
            _ => false,
        }
    }

    fn parse_lambda_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut modifiers = ModifierFlags::empty();
        loop {
            if self.at(SyntaxKind::StaticKeyword) {
                modifiers |= ModifierFlags::STATIC;
            } else if self.at_contextual("async") && self.nth(1) != SyntaxKind::EqualsGreaterThanToken
            {
                modifiers |= ModifierFlags::ASYNC;
            } else {
                break;
            }
            self.advance();
        }
        let parameters = if self.at(SyntaxKind::Identifier) {
            let param_start = self.token_pos();
            let name = self.parse_identifier();
            NodeList::from_vec(vec![self.arena.add_parameter(
                syntax_kind_ext::PARAMETER,
                param_start,
                self.last_end,
                ParameterData {
                    modifiers: ModifierFlags::empty(),
                    type_node: NodeIndex::NONE,
                    name,
                    default_value: NodeIndex::NONE,
                },
            )])
        } else {
            self.parse_parameter_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken)
        };
        self.expect(SyntaxKind::EqualsGreaterThanToken);
        let body = self.parse_lambda_body();
        self.arena.add_lambda(
            syntax_kind_ext::LAMBDA_EXPRESSION,
            start,
            self.last_end,
            LambdaData {
                modifiers,
                parameters,
                body,
            },
        )
    }

    fn parse_lambda_body(&mut self) -> NodeIndex {
        if self.at(SyntaxKind::OpenBraceToken) {
            self.parse_block()
        } else {
            self.parse_required_expression()
        }
    }

    fn parse_anonymous_method(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let parameters = if self.at(SyntaxKind::OpenParenToken) {
            self.parse_parameter_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken)
        } else {
            NodeList::new()
        };
        let body = self.parse_block();
        self.arena.add_lambda(
            syntax_kind_ext::ANONYMOUS_METHOD_EXPRESSION,
            start,
            self.last_end,
            LambdaData {
                modifiers: ModifierFlags::empty(),
                parameters,
                body,
            },
        )
    }

    // =========================================================================
    // Primary and postfix expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let kind = self.current();
        match kind {
            SyntaxKind::Identifier => {
                if self.nth(1) == SyntaxKind::ColonColonToken {
                    let alias = self.parse_identifier();
                    self.advance();
                    let right = self.parse_simple_name_in_expression();
                    return self.arena.add_qualified_name(
                        syntax_kind_ext::ALIAS_QUALIFIED_NAME,
                        start,
                        self.last_end,
                        QualifiedNameData { left: alias, right },
                    );
                }
                self.parse_simple_name_in_expression()
            }
            SyntaxKind::NumericLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::CharacterLiteral
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword => {
                let text = self.current_text().to_string();
                self.advance();
                self.arena.add_literal(
                    syntax_kind_ext::LITERAL_EXPRESSION,
                    start,
                    self.last_end,
                    LiteralData { token: kind, text },
                )
            }
            SyntaxKind::InterpolatedStringLiteral => self.parse_interpolated_string(),
            SyntaxKind::ThisKeyword => {
                self.advance();
                self.arena
                    .add_token(syntax_kind_ext::THIS_EXPRESSION, start, self.last_end)
            }
            SyntaxKind::BaseKeyword => {
                self.advance();
                self.arena
                    .add_token(syntax_kind_ext::BASE_EXPRESSION, start, self.last_end)
            }
            SyntaxKind::OpenParenToken => self.parse_parenthesized_or_tuple(),
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::TypeOfKeyword | SyntaxKind::SizeOfKeyword => {
                self.advance();
                self.expect(SyntaxKind::OpenParenToken);
                let type_node = self.parse_type();
                self.expect(SyntaxKind::CloseParenToken);
                let node_kind = if kind == SyntaxKind::TypeOfKeyword {
                    syntax_kind_ext::TYPEOF_EXPRESSION
                } else {
                    syntax_kind_ext::SIZEOF_EXPRESSION
                };
                self.arena.add_type_operand(
                    node_kind,
                    start,
                    self.last_end,
                    TypeOperandData { type_node },
                )
            }
            SyntaxKind::DefaultKeyword => {
                self.advance();
                let type_node = if self.eat(SyntaxKind::OpenParenToken) {
                    let type_node = self.parse_type();
                    self.expect(SyntaxKind::CloseParenToken);
                    type_node
                } else {
                    NodeIndex::NONE
                };
                self.arena.add_type_operand(
                    syntax_kind_ext::DEFAULT_EXPRESSION,
                    start,
                    self.last_end,
                    TypeOperandData { type_node },
                )
            }
            SyntaxKind::CheckedKeyword | SyntaxKind::UncheckedKeyword => {
                self.advance();
                self.expect(SyntaxKind::OpenParenToken);
                let operand = self.parse_required_expression();
                self.expect(SyntaxKind::CloseParenToken);
                self.add_unary(syntax_kind_ext::CHECKED_EXPRESSION, start, kind, operand)
            }
            SyntaxKind::DelegateKeyword => self.parse_anonymous_method(),
            SyntaxKind::StackAllocKeyword => self.parse_stackalloc_expression(),
            SyntaxKind::OpenBracketToken => {
                let elements =
                    self.parse_expression_list(SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken);
                self.arena.add_initializer(
                    syntax_kind_ext::COLLECTION_EXPRESSION,
                    start,
                    self.last_end,
                    InitializerData { elements },
                )
            }
            kind if kind.is_predefined_type() => self.parse_predefined_type(),
            _ => NodeIndex::NONE,
        }
    }

    /// Identifier in an expression, turned into a generic name when a type
    /// argument list follows and the token after it disambiguates.
    fn parse_simple_name_in_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let name = self.parse_identifier();
        if name.is_none() || !self.at(SyntaxKind::LessThanToken) || !self.is_generic_name_ahead() {
            return name;
        }
        let type_arguments = self.parse_type_argument_list();
        self.arena.add_generic_name(
            syntax_kind_ext::GENERIC_NAME,
            start,
            self.last_end,
            GenericNameData {
                name,
                type_arguments,
            },
        )
    }

    /// `F<A, B>(x)` vs `a < b`: a type argument list is taken only when it is
    /// followed by a token that cannot continue a relational expression.
    fn is_generic_name_ahead(&self) -> bool {
        let Some(end) = self.scan_type_argument_list(self.pos) else {
            return false;
        };
        matches!(
            self.kind_at(end),
            SyntaxKind::OpenParenToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
                | SyntaxKind::ColonToken
                | SyntaxKind::SemicolonToken
                | SyntaxKind::CommaToken
                | SyntaxKind::DotToken
                | SyntaxKind::QuestionToken
                | SyntaxKind::QuestionDotToken
                | SyntaxKind::EqualsEqualsToken
                | SyntaxKind::ExclamationEqualsToken
                | SyntaxKind::BarToken
                | SyntaxKind::CaretToken
                | SyntaxKind::AmpersandAmpersandToken
                | SyntaxKind::BarBarToken
                | SyntaxKind::AmpersandToken
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::EndOfFileToken
        )
    }

    fn parse_postfix_expression(&mut self, start: u32, mut expression: NodeIndex) -> NodeIndex {
        loop {
            match self.current() {
                SyntaxKind::DotToken | SyntaxKind::MinusGreaterThanToken => {
                    let kind = if self.at(SyntaxKind::DotToken) {
                        syntax_kind_ext::MEMBER_ACCESS_EXPRESSION
                    } else {
                        syntax_kind_ext::POINTER_MEMBER_ACCESS_EXPRESSION
                    };
                    self.advance();
                    let name = self.parse_simple_name_in_expression();
                    expression = self.arena.add_member_access(
                        kind,
                        start,
                        self.last_end,
                        MemberAccessData {
                            expression,
                            name,
                            question_dot: false,
                        },
                    );
                }
                SyntaxKind::QuestionDotToken => {
                    self.advance();
                    if self.at(SyntaxKind::OpenBracketToken) {
                        expression = self.parse_element_access(start, expression, true);
                    } else {
                        let name = self.parse_simple_name_in_expression();
                        expression = self.arena.add_member_access(
                            syntax_kind_ext::MEMBER_ACCESS_EXPRESSION,
                            start,
                            self.last_end,
                            MemberAccessData {
                                expression,
                                name,
                                question_dot: true,
                            },
                        );
                    }
                }
                SyntaxKind::QuestionToken
                    if self.nth(1) == SyntaxKind::OpenBracketToken
                        && self.tokens_adjacent(self.pos) =>
                {
                    self.advance();
                    expression = self.parse_element_access(start, expression, true);
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_argument_list(
                        SyntaxKind::OpenParenToken,
                        SyntaxKind::CloseParenToken,
                    );
                    expression = self.arena.add_call_expr(
                        syntax_kind_ext::INVOCATION_EXPRESSION,
                        start,
                        self.last_end,
                        CallExprData {
                            expression,
                            arguments,
                        },
                    );
                }
                SyntaxKind::OpenBracketToken => {
                    expression = self.parse_element_access(start, expression, false);
                }
                SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::ExclamationToken => {
                    // Postfix `!` is the null-forgiving operator.
                    let operator = self.current();
                    self.advance();
                    expression = self.arena.add_unary_expr(
                        syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                        start,
                        self.last_end,
                        UnaryExprData {
                            operator,
                            operand: expression,
                        },
                    );
                }
                _ => return expression,
            }
        }
    }

    fn parse_element_access(
        &mut self,
        start: u32,
        expression: NodeIndex,
        question_dot: bool,
    ) -> NodeIndex {
        let arguments =
            self.parse_argument_list(SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken);
        self.arena.add_element_access(
            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
            start,
            self.last_end,
            ElementAccessData {
                expression,
                arguments,
                question_dot,
            },
        )
    }

    /// `(x)`, `(a, b)` tuples, `(var a, var b)` deconstructions.
    fn parse_parenthesized_or_tuple(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let first = self.parse_tuple_element();
        if self.at(SyntaxKind::CommaToken) {
            let mut elements = vec![first];
            while self.eat(SyntaxKind::CommaToken) {
                elements.push(self.parse_tuple_element());
            }
            self.expect(SyntaxKind::CloseParenToken);
            return self.arena.add_initializer(
                syntax_kind_ext::TUPLE_EXPRESSION,
                start,
                self.last_end,
                InitializerData {
                    elements: NodeList::from_vec(elements),
                },
            );
        }
        self.expect(SyntaxKind::CloseParenToken);
        if first.is_none() {
            self.error_at_current(diagnostic_codes::EXPRESSION_EXPECTED, &[]);
        }
        self.arena.add_parenthesized(
            syntax_kind_ext::PARENTHESIZED_EXPRESSION,
            start,
            self.last_end,
            ParenthesizedData { expression: first },
        )
    }

    /// Named tuple elements become arguments; `var x` becomes a declaration.
    fn parse_tuple_element(&mut self) -> NodeIndex {
        if self.at(SyntaxKind::Identifier) && self.nth(1) == SyntaxKind::ColonToken {
            self.parse_argument()
        } else if self.is_declaration_expression() {
            self.parse_declaration_expression()
        } else {
            self.parse_expression()
        }
    }

    // =========================================================================
    // Arguments and initializers
    // =========================================================================

    pub(crate) fn parse_argument_list(&mut self, open: SyntaxKind, close: SyntaxKind) -> NodeList {
        let mut arguments = Vec::new();
        if !self.expect(open) {
            return NodeList::new();
        }
        while !self.at(close) && !self.at_eof() {
            let before = self.pos;
            let argument = self.parse_argument();
            if argument.is_some() {
                arguments.push(argument);
            }
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
            if self.pos == before {
                break;
            }
        }
        if !self.expect(close) {
            self.skip_until(&[close, SyntaxKind::SemicolonToken]);
            self.eat(close);
        }
        NodeList::from_vec(arguments)
    }

    /// `[name:] [ref|out|in] expression`, or `out T x` declarations.
    fn parse_argument(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let name = if self.at(SyntaxKind::Identifier) && self.nth(1) == SyntaxKind::ColonToken {
            let name = self.parse_identifier();
            self.advance();
            name
        } else {
            NodeIndex::NONE
        };
        let ref_kind = match self.current() {
            SyntaxKind::RefKeyword | SyntaxKind::OutKeyword | SyntaxKind::InKeyword => {
                let kind = self.current();
                self.advance();
                Some(kind)
            }
            _ => None,
        };
        let expression = if self.is_declaration_expression() {
            self.parse_declaration_expression()
        } else {
            self.parse_expression()
        };
        if expression.is_none() {
            self.error_at_current(diagnostic_codes::EXPRESSION_EXPECTED, &[]);
            if name.is_none() && ref_kind.is_none() {
                return NodeIndex::NONE;
            }
        }
        self.arena.add_argument(
            syntax_kind_ext::ARGUMENT,
            start,
            self.last_end,
            ArgumentData {
                name,
                ref_kind,
                expression,
            },
        )
    }

    /// `T x` followed by `,` or `)`: an inline declaration.
    fn is_declaration_expression(&self) -> bool {
        let Some(end) = self.scan_type(self.pos) else {
            return false;
        };
        self.kind_at(end) == SyntaxKind::Identifier
            && matches!(
                self.kind_at(end + 1),
                SyntaxKind::CommaToken | SyntaxKind::CloseParenToken
            )
    }

    fn parse_declaration_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let type_node = self.parse_type();
        let designation = self.parse_identifier();
        self.arena.add_declaration_expr(
            syntax_kind_ext::DECLARATION_EXPRESSION,
            start,
            self.last_end,
            DeclarationExprData {
                type_node,
                designation,
            },
        )
    }

    /// Comma-separated expressions between `open` and `close`.
    fn parse_expression_list(&mut self, open: SyntaxKind, close: SyntaxKind) -> NodeList {
        let mut elements = Vec::new();
        self.expect(open);
        while !self.at(close) && !self.at_eof() {
            let element = self.parse_expression();
            if element.is_none() {
                self.skip_unexpected();
                continue;
            }
            elements.push(element);
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect(close);
        NodeList::from_vec(elements)
    }

    /// `{ a, b }`, `{ X = 1, [0] = y }`, `{ { k, v } }`.
    pub(crate) fn parse_initializer(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.expect(SyntaxKind::OpenBraceToken);
        let mut elements = Vec::new();
        while !self.at(SyntaxKind::CloseBraceToken) && !self.at_eof() {
            let element = if self.at(SyntaxKind::OpenBraceToken) {
                self.parse_initializer()
            } else {
                self.parse_expression()
            };
            if element.is_none() {
                self.skip_unexpected();
                continue;
            }
            elements.push(element);
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect(SyntaxKind::CloseBraceToken);
        self.arena.add_initializer(
            syntax_kind_ext::INITIALIZER_EXPRESSION,
            start,
            self.last_end,
            InitializerData {
                elements: NodeList::from_vec(elements),
            },
        )
    }

    // =========================================================================
    // Object creation
    // =========================================================================

    fn parse_new_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        match self.current() {
            // new[] { ... }
            SyntaxKind::OpenBracketToken => {
                self.advance();
                while self.eat(SyntaxKind::CommaToken) {}
                self.expect(SyntaxKind::CloseBracketToken);
                let initializer = self.parse_initializer();
                self.add_creation(
                    syntax_kind_ext::IMPLICIT_ARRAY_CREATION_EXPRESSION,
                    start,
                    NodeIndex::NONE,
                    NodeList::new(),
                    initializer,
                )
            }
            // new { A = 1 }
            SyntaxKind::OpenBraceToken => {
                let initializer = self.parse_initializer();
                self.add_creation(
                    syntax_kind_ext::ANONYMOUS_OBJECT_CREATION_EXPRESSION,
                    start,
                    NodeIndex::NONE,
                    NodeList::new(),
                    initializer,
                )
            }
            // Target-typed new()
            SyntaxKind::OpenParenToken => {
                let arguments =
                    self.parse_argument_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
                let initializer = self.parse_optional_initializer();
                self.add_creation(
                    syntax_kind_ext::OBJECT_CREATION_EXPRESSION,
                    start,
                    NodeIndex::NONE,
                    arguments,
                    initializer,
                )
            }
            _ => self.parse_typed_creation(start),
        }
    }

    fn parse_typed_creation(&mut self, start: u32) -> NodeIndex {
        let type_start = self.token_pos();
        let element_type = if self.current().is_predefined_type() {
            self.parse_predefined_type()
        } else if self.at(SyntaxKind::Identifier) {
            self.parse_name()
        } else {
            self.error_at_current(diagnostic_codes::TYPE_EXPECTED, &[]);
            return NodeIndex::NONE;
        };
        let mut type_node = element_type;
        if self.at(SyntaxKind::QuestionToken) {
            self.advance();
            type_node = self.arena.add_wrapped_type(
                syntax_kind_ext::NULLABLE_TYPE,
                type_start,
                self.last_end,
                WrappedTypeData {
                    element_type: type_node,
                    rank: 0,
                },
            );
        }

        if self.at(SyntaxKind::OpenBracketToken) {
            // Sized first dimension: new T[n, m]
            let sizes = if matches!(
                self.nth(1),
                SyntaxKind::CloseBracketToken | SyntaxKind::CommaToken
            ) {
                NodeList::new()
            } else {
                self.parse_argument_list(SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken)
            };
            if !sizes.is_empty() {
                type_node = self.arena.add_wrapped_type(
                    syntax_kind_ext::ARRAY_TYPE,
                    type_start,
                    self.last_end,
                    WrappedTypeData {
                        element_type: type_node,
                        rank: sizes.len() as u32,
                    },
                );
            }
            // Remaining rank specifiers: [] [,]
            while self.at(SyntaxKind::OpenBracketToken) {
                self.advance();
                let mut rank = 1;
                while self.eat(SyntaxKind::CommaToken) {
                    rank += 1;
                }
                self.expect(SyntaxKind::CloseBracketToken);
                type_node = self.arena.add_wrapped_type(
                    syntax_kind_ext::ARRAY_TYPE,
                    type_start,
                    self.last_end,
                    WrappedTypeData {
                        element_type: type_node,
                        rank,
                    },
                );
            }
            let initializer = self.parse_optional_initializer();
            return self.add_creation(
                syntax_kind_ext::ARRAY_CREATION_EXPRESSION,
                start,
                type_node,
                sizes,
                initializer,
            );
        }

        let arguments = if self.at(SyntaxKind::OpenParenToken) {
            self.parse_argument_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken)
        } else {
            if !self.at(SyntaxKind::OpenBraceToken) {
                self.error_at_current(diagnostic_codes::TOKEN_EXPECTED, &["("]);
            }
            NodeList::new()
        };
        let initializer = self.parse_optional_initializer();
        self.add_creation(
            syntax_kind_ext::OBJECT_CREATION_EXPRESSION,
            start,
            type_node,
            arguments,
            initializer,
        )
    }

    fn parse_stackalloc_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let type_node = if self.at(SyntaxKind::OpenBracketToken) {
            NodeIndex::NONE
        } else if self.current().is_predefined_type() {
            self.parse_predefined_type()
        } else {
            self.parse_name()
        };
        let sizes =
            self.parse_argument_list(SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken);
        let initializer = self.parse_optional_initializer();
        self.add_creation(
            syntax_kind_ext::STACKALLOC_EXPRESSION,
            start,
            type_node,
            sizes,
            initializer,
        )
    }

    fn parse_optional_initializer(&mut self) -> NodeIndex {
        if self.at(SyntaxKind::OpenBraceToken) {
            self.parse_initializer()
        } else {
            NodeIndex::NONE
        }
    }

    fn add_creation(
        &mut self,
        kind: u16,
        start: u32,
        type_node: NodeIndex,
        arguments: NodeList,
        initializer: NodeIndex,
    ) -> NodeIndex {
        self.arena.add_object_creation(
            kind,
            start,
            self.last_end,
            ObjectCreationData {
                type_node,
                arguments,
                initializer,
            },
        )
    }

    // =========================================================================
    // Interpolated strings
    // =========================================================================

    /// Parse the expressions inside each interpolation hole. Alignment and
    /// format specifiers after the expression are ignored.
    fn parse_interpolated_string(&mut self) -> NodeIndex {
        let token = self.token_at(self.pos).clone();
        self.advance();
        let string_end = self.last_end;

        let mut holes = Vec::with_capacity(token.holes.len());
        for hole in &token.holes {
            let (hole_tokens, _) =
                tokenize_range(&self.source, hole.start as usize, hole.end as usize);
            let saved_tokens = std::mem::replace(&mut self.tokens, hole_tokens);
            let saved_pos = std::mem::replace(&mut self.pos, 0);
            let expression = self.parse_expression();
            self.tokens = saved_tokens;
            self.pos = saved_pos;
            if expression.is_some() {
                holes.push(expression);
            }
        }
        self.last_end = string_end;

        self.arena.add_interpolated_string(
            syntax_kind_ext::INTERPOLATED_STRING_EXPRESSION,
            token.start,
            token.end,
            InterpolatedStringData {
                holes: NodeList::from_vec(holes),
            },
        )
    }
}
