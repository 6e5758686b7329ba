//! Parser state - patterns (`is`, `case`, switch expression arms).

use super::state::ParserState;
use super::state_expressions::PREC_SHIFT;
use crate::parser::{NodeIndex, NodeList, node::PatternData, syntax_kind_ext};
use tpa_common::diagnostic_codes;
use tpa_scanner::SyntaxKind;

impl ParserState {
    pub(crate) fn parse_pattern(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let pattern = self.parse_disjunctive_pattern();
        self.exit_recursion();
        if pattern.is_none() {
            self.error_at_current(diagnostic_codes::EXPRESSION_EXPECTED, &[]);
        }
        pattern
    }

    fn parse_disjunctive_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_conjunctive_pattern();
        while left.is_some() && self.at_contextual("or") {
            self.advance();
            let right = self.parse_conjunctive_pattern();
            left = self.add_pattern(
                syntax_kind_ext::BINARY_PATTERN,
                start,
                PatternData {
                    subpatterns: NodeList::from_vec(vec![left, right]),
                    operator: SyntaxKind::BarBarToken,
                    ..empty_pattern()
                },
            );
        }
        left
    }

    fn parse_conjunctive_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_negated_pattern();
        while left.is_some() && self.at_contextual("and") {
            self.advance();
            let right = self.parse_negated_pattern();
            left = self.add_pattern(
                syntax_kind_ext::BINARY_PATTERN,
                start,
                PatternData {
                    subpatterns: NodeList::from_vec(vec![left, right]),
                    operator: SyntaxKind::AmpersandAmpersandToken,
                    ..empty_pattern()
                },
            );
        }
        left
    }

    fn parse_negated_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.at_contextual("not") && self.can_start_pattern_at(self.pos + 1) {
            self.advance();
            let operand = self.parse_negated_pattern();
            return self.add_pattern(
                syntax_kind_ext::UNARY_PATTERN,
                start,
                PatternData {
                    subpatterns: NodeList::from_vec(vec![operand]),
                    operator: SyntaxKind::ExclamationToken,
                    ..empty_pattern()
                },
            );
        }
        self.parse_primary_pattern()
    }

    fn can_start_pattern_at(&self, index: usize) -> bool {
        let kind = self.kind_at(index);
        Self::can_start_expression(kind)
            || matches!(
                kind,
                SyntaxKind::OpenBraceToken
                    | SyntaxKind::LessThanToken
                    | SyntaxKind::LessThanEqualsToken
                    | SyntaxKind::GreaterThanToken
                    | SyntaxKind::GreaterThanEqualsToken
            )
    }

    fn parse_primary_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.current() {
            SyntaxKind::LessThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::GreaterThanEqualsToken => {
                let operator = self.current();
                self.advance();
                let expression = self.parse_binary_expression(PREC_SHIFT);
                self.add_pattern(
                    syntax_kind_ext::RELATIONAL_PATTERN,
                    start,
                    PatternData {
                        expression,
                        operator,
                        ..empty_pattern()
                    },
                )
            }
            SyntaxKind::DotDotToken => {
                // Slice inside a list pattern: `[first, ..]`, `[.., var last]`
                self.advance();
                let subpatterns = if self.can_start_pattern_at(self.pos)
                    && !matches!(
                        self.current(),
                        SyntaxKind::CommaToken | SyntaxKind::CloseBracketToken
                    ) {
                    NodeList::from_vec(vec![self.parse_negated_pattern()])
                } else {
                    NodeList::new()
                };
                self.add_pattern(
                    syntax_kind_ext::UNARY_PATTERN,
                    start,
                    PatternData {
                        subpatterns,
                        operator: SyntaxKind::DotDotToken,
                        ..empty_pattern()
                    },
                )
            }
            SyntaxKind::OpenBracketToken => {
                let subpatterns = self.parse_subpattern_list(
                    SyntaxKind::OpenBracketToken,
                    SyntaxKind::CloseBracketToken,
                );
                let designation = self.parse_optional_designation();
                self.add_pattern(
                    syntax_kind_ext::LIST_PATTERN,
                    start,
                    PatternData {
                        designation,
                        subpatterns,
                        ..empty_pattern()
                    },
                )
            }
            SyntaxKind::OpenBraceToken => self.parse_recursive_pattern(start, NodeIndex::NONE),
            SyntaxKind::OpenParenToken if !self.is_parenthesized_constant() => {
                let subpatterns = self
                    .parse_subpattern_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
                let single_unnamed = subpatterns.len() == 1
                    && subpatterns.nodes.first().is_some_and(|&sub| {
                        self.arena
                            .get(sub)
                            .and_then(|node| self.arena.get_pattern(node))
                            .is_some_and(|data| data.expression.is_none())
                    });
                if single_unnamed && !self.at(SyntaxKind::OpenBraceToken) && !self.is_designation_ahead() {
                    self.add_pattern(
                        syntax_kind_ext::PARENTHESIZED_PATTERN,
                        start,
                        PatternData {
                            subpatterns,
                            ..empty_pattern()
                        },
                    )
                } else {
                    self.finish_recursive_pattern(start, NodeIndex::NONE, subpatterns)
                }
            }
            SyntaxKind::Identifier if self.at_contextual("var") => {
                self.advance();
                let designation = if self.at(SyntaxKind::OpenParenToken) {
                    // `var (a, b)`: parsed as a positional pattern of designations
                    let subpatterns = self.parse_subpattern_list(
                        SyntaxKind::OpenParenToken,
                        SyntaxKind::CloseParenToken,
                    );
                    self.finish_recursive_pattern(start, NodeIndex::NONE, subpatterns)
                } else {
                    self.parse_identifier()
                };
                self.add_pattern(
                    syntax_kind_ext::VAR_PATTERN,
                    start,
                    PatternData {
                        designation,
                        ..empty_pattern()
                    },
                )
            }
            SyntaxKind::Identifier if self.current_text() == "_" && !self.continues_expression_at(self.pos + 1) => {
                self.advance();
                self.add_pattern(syntax_kind_ext::DISCARD_PATTERN, start, empty_pattern())
            }
            _ => self.parse_type_or_constant_pattern(start),
        }
    }

    /// `(a + b)` in a pattern position is a constant, `(1, 2)` is positional.
    fn is_parenthesized_constant(&self) -> bool {
        self.scan_balanced(self.pos).is_some_and(|end| {
            let mut depth = 0usize;
            for i in self.pos + 1..end - 1 {
                match self.kind_at(i) {
                    SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::OpenBraceToken => depth += 1,
                    SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::CloseBraceToken => depth = depth.saturating_sub(1),
                    SyntaxKind::CommaToken | SyntaxKind::ColonToken if depth == 0 => return false,
                    SyntaxKind::Identifier
                        if depth == 0
                            && matches!(self.text_at(i), "or" | "and" | "not" | "var") =>
                    {
                        return false;
                    }
                    _ => {}
                }
            }
            // A binary operator after `)` means the parentheses group an operand.
            matches!(
                self.kind_at(end),
                SyntaxKind::PlusToken
                    | SyntaxKind::MinusToken
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::SlashToken
                    | SyntaxKind::PercentToken
                    | SyntaxKind::DotToken
            )
        })
    }

    /// True when the token at `index` would continue an expression (`_.x`,
    /// `_(1)`), so a leading `_` is a name rather than a discard.
    fn continues_expression_at(&self, index: usize) -> bool {
        matches!(
            self.kind_at(index),
            SyntaxKind::DotToken | SyntaxKind::OpenParenToken | SyntaxKind::OpenBracketToken
        )
    }

    fn is_designation_ahead(&self) -> bool {
        self.at(SyntaxKind::Identifier)
            && !matches!(self.current_text(), "and" | "or" | "when" | "not")
    }

    fn parse_optional_designation(&mut self) -> NodeIndex {
        if self.is_designation_ahead() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        }
    }

    /// Type patterns (`DateTime`), declaration patterns (`DateTime d`),
    /// recursive patterns with a type (`Point { X: 0 }`) and constants.
    fn parse_type_or_constant_pattern(&mut self, start: u32) -> NodeIndex {
        if let Some(end) = self.scan_type(self.pos) {
            let after = self.kind_at(end);
            let is_designation = after == SyntaxKind::Identifier
                && !matches!(self.text_at(end), "and" | "or" | "when" | "not");
            let is_recursive = matches!(
                after,
                SyntaxKind::OpenBraceToken | SyntaxKind::OpenParenToken
            ) && !self.kind_at(self.pos).is_literal();
            let ends_pattern = matches!(
                after,
                SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::EqualsGreaterThanToken
                    | SyntaxKind::AmpersandAmpersandToken
                    | SyntaxKind::BarBarToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::EndOfFileToken
            ) || (after == SyntaxKind::Identifier && !is_designation);
            let is_named_type = self.current().is_predefined_type()
                || (self.at(SyntaxKind::Identifier) && !self.is_invocation_of_name(end));

            if is_designation || (is_recursive && is_named_type) {
                let type_node = self.parse_type_in_expression();
                if is_designation {
                    let designation = self.parse_identifier();
                    return self.add_pattern(
                        syntax_kind_ext::DECLARATION_PATTERN,
                        start,
                        PatternData {
                            type_node,
                            designation,
                            ..empty_pattern()
                        },
                    );
                }
                return self.parse_recursive_pattern(start, type_node);
            }
            if ends_pattern && is_named_type && self.at(SyntaxKind::Identifier) {
                // Bare type; a constant member like `Color.Red` parses the same way.
                let type_node = self.parse_type_in_expression();
                return self.add_pattern(
                    syntax_kind_ext::DECLARATION_PATTERN,
                    start,
                    PatternData {
                        type_node,
                        ..empty_pattern()
                    },
                );
            }
        }

        let expression = self.parse_binary_expression(PREC_SHIFT);
        if expression.is_none() {
            return NodeIndex::NONE;
        }
        self.add_pattern(
            syntax_kind_ext::CONSTANT_PATTERN,
            start,
            PatternData {
                expression,
                ..empty_pattern()
            },
        )
    }

    /// A type followed by `(` is a positional pattern unless the name is
    /// itself callable like `nameof(x)`.
    fn is_invocation_of_name(&self, type_end: usize) -> bool {
        self.kind_at(type_end) == SyntaxKind::OpenParenToken && self.at_contextual("nameof")
    }

    fn parse_recursive_pattern(&mut self, start: u32, type_node: NodeIndex) -> NodeIndex {
        let mut subpatterns = Vec::new();
        if self.at(SyntaxKind::OpenParenToken) {
            subpatterns.extend(
                self.parse_subpattern_list(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken)
                    .nodes,
            );
        }
        self.finish_recursive_pattern(start, type_node, NodeList::from_vec(subpatterns))
    }

    /// Optional property clause and designation after the type and
    /// positional part of a recursive pattern.
    fn finish_recursive_pattern(
        &mut self,
        start: u32,
        type_node: NodeIndex,
        positional: NodeList,
    ) -> NodeIndex {
        let mut subpatterns = positional.nodes;
        if self.at(SyntaxKind::OpenBraceToken) {
            subpatterns.extend(
                self.parse_subpattern_list(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken)
                    .nodes,
            );
        }
        let designation = self.parse_optional_designation();
        self.add_pattern(
            syntax_kind_ext::RECURSIVE_PATTERN,
            start,
            PatternData {
                type_node,
                designation,
                subpatterns: NodeList::from_vec(subpatterns),
                ..empty_pattern()
            },
        )
    }

    /// `Name: pattern` or `A.B: pattern` or a bare pattern.
    fn parse_subpattern_list(&mut self, open: SyntaxKind, close: SyntaxKind) -> NodeList {
        let mut subpatterns = Vec::new();
        self.expect(open);
        while !self.at(close) && !self.at_eof() {
            let start = self.token_pos();
            let before = self.pos;
            let name = if self.is_subpattern_name_ahead() {
                let name = self.parse_binary_expression(PREC_SHIFT);
                self.expect(SyntaxKind::ColonToken);
                name
            } else {
                NodeIndex::NONE
            };
            let pattern = self.parse_pattern();
            subpatterns.push(self.add_pattern(
                syntax_kind_ext::SUBPATTERN,
                start,
                PatternData {
                    expression: name,
                    subpatterns: NodeList::from_vec(vec![pattern]),
                    ..empty_pattern()
                },
            ));
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
            if self.pos == before {
                self.skip_unexpected();
            }
        }
        if !self.expect(close) {
            self.skip_until(&[close]);
            self.eat(close);
        }
        NodeList::from_vec(subpatterns)
    }

    fn is_subpattern_name_ahead(&self) -> bool {
        let mut i = self.pos;
        loop {
            if self.kind_at(i) != SyntaxKind::Identifier {
                return false;
            }
            match self.kind_at(i + 1) {
                SyntaxKind::ColonToken => return true,
                SyntaxKind::DotToken => i += 2,
                _ => return false,
            }
        }
    }

    fn add_pattern(&mut self, kind: u16, start: u32, data: PatternData) -> NodeIndex {
        self.arena.add_pattern(kind, start, self.last_end, data)
    }
}

fn empty_pattern() -> PatternData {
    PatternData {
        type_node: NodeIndex::NONE,
        designation: NodeIndex::NONE,
        expression: NodeIndex::NONE,
        subpatterns: NodeList::new(),
        operator: SyntaxKind::Unknown,
    }
}
