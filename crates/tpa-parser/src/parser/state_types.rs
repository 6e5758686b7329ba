//! Parser state - type and name parsing, plus node-free type lookahead.

use super::state::ParserState;
use crate::parser::{
    NodeIndex, NodeList,
    node::{GenericNameData, PredefinedTypeData, QualifiedNameData, TupleTypeData, WrappedTypeData},
    syntax_kind_ext,
};
use tpa_common::diagnostic_codes;
use tpa_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Lookahead (no nodes are created)
    // =========================================================================

    /// Index just past a type starting at `i`, if one can be scanned there.
    pub(crate) fn scan_type(&self, i: usize) -> Option<usize> {
        let mut i = self.scan_non_array_type(i)?;
        loop {
            match self.kind_at(i) {
                SyntaxKind::QuestionToken => i += 1,
                SyntaxKind::AsteriskToken => i += 1,
                SyntaxKind::OpenBracketToken => {
                    let mut j = i + 1;
                    while self.kind_at(j) == SyntaxKind::CommaToken {
                        j += 1;
                    }
                    if self.kind_at(j) != SyntaxKind::CloseBracketToken {
                        return Some(i);
                    }
                    i = j + 1;
                }
                _ => return Some(i),
            }
        }
    }

    fn scan_non_array_type(&self, i: usize) -> Option<usize> {
        let kind = self.kind_at(i);
        if kind.is_predefined_type() {
            return Some(i + 1);
        }
        match kind {
            SyntaxKind::Identifier => self.scan_named_type(i),
            SyntaxKind::OpenParenToken => self.scan_tuple_type(i),
            _ => None,
        }
    }

    fn scan_named_type(&self, mut i: usize) -> Option<usize> {
        i = self.scan_simple_name(i)?;
        if self.kind_at(i) == SyntaxKind::ColonColonToken {
            i = self.scan_simple_name(i + 1)?;
        }
        while self.kind_at(i) == SyntaxKind::DotToken
            && self.kind_at(i + 1) == SyntaxKind::Identifier
        {
            i = self.scan_simple_name(i + 1)?;
        }
        Some(i)
    }

    fn scan_simple_name(&self, i: usize) -> Option<usize> {
        if self.kind_at(i) != SyntaxKind::Identifier {
            return None;
        }
        if self.kind_at(i + 1) == SyntaxKind::LessThanToken {
            // `a < b` is not a generic name; callers decide from what follows.
            return self.scan_type_argument_list(i + 1).or(Some(i + 1));
        }
        Some(i + 1)
    }

    /// Index just past `<...>` starting at `i`.
    pub(crate) fn scan_type_argument_list(&self, mut i: usize) -> Option<usize> {
        if self.kind_at(i) != SyntaxKind::LessThanToken {
            return None;
        }
        i += 1;
        loop {
            match self.kind_at(i) {
                // Omitted arguments: `typeof(Dictionary<,>)`
                SyntaxKind::CommaToken | SyntaxKind::GreaterThanToken => {}
                _ => i = self.scan_type(i)?,
            }
            match self.kind_at(i) {
                SyntaxKind::CommaToken => i += 1,
                SyntaxKind::GreaterThanToken => return Some(i + 1),
                _ => return None,
            }
        }
    }

    fn scan_tuple_type(&self, mut i: usize) -> Option<usize> {
        i += 1;
        let mut elements = 0;
        loop {
            i = self.scan_type(i)?;
            if self.kind_at(i) == SyntaxKind::Identifier {
                i += 1;
            }
            elements += 1;
            match self.kind_at(i) {
                SyntaxKind::CommaToken => i += 1,
                SyntaxKind::CloseParenToken if elements >= 2 => return Some(i + 1),
                _ => return None,
            }
        }
    }

    /// Tokens that can begin an expression.
    pub(crate) fn can_start_expression(kind: SyntaxKind) -> bool {
        kind.is_literal()
            || kind.is_predefined_type()
            || matches!(
                kind,
                SyntaxKind::Identifier
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::ExclamationToken
                    | SyntaxKind::TildeToken
                    | SyntaxKind::MinusToken
                    | SyntaxKind::PlusToken
                    | SyntaxKind::PlusPlusToken
                    | SyntaxKind::MinusMinusToken
                    | SyntaxKind::CaretToken
                    | SyntaxKind::DotDotToken
                    | SyntaxKind::AmpersandToken
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::ThisKeyword
                    | SyntaxKind::BaseKeyword
                    | SyntaxKind::NewKeyword
                    | SyntaxKind::TypeOfKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::SizeOfKeyword
                    | SyntaxKind::CheckedKeyword
                    | SyntaxKind::UncheckedKeyword
                    | SyntaxKind::DelegateKeyword
                    | SyntaxKind::ThrowKeyword
                    | SyntaxKind::StackAllocKeyword
                    | SyntaxKind::RefKeyword
            )
    }

    // =========================================================================
    // Type parsing
    // =========================================================================

    /// Parse a type in a declaration context (`?` is always nullable).
    pub(crate) fn parse_type(&mut self) -> NodeIndex {
        self.parse_type_inner(false)
    }

    /// Parse a type after `is`/`as`, where `?` followed by an expression is
    /// the conditional operator instead.
    pub(crate) fn parse_type_in_expression(&mut self) -> NodeIndex {
        self.parse_type_inner(true)
    }

    fn parse_type_inner(&mut self, in_expression: bool) -> NodeIndex {
        let start = self.token_pos();
        if self.at(SyntaxKind::RefKeyword) {
            self.advance();
            self.eat(SyntaxKind::ReadOnlyKeyword);
            let element_type = self.parse_type_inner(in_expression);
            return self.arena.add_wrapped_type(
                syntax_kind_ext::REF_TYPE,
                start,
                self.last_end,
                WrappedTypeData {
                    element_type,
                    rank: 0,
                },
            );
        }

        let mut ty = self.parse_non_array_type();
        if ty.is_none() {
            return ty;
        }
        loop {
            match self.current() {
                SyntaxKind::QuestionToken => {
                    if in_expression && Self::can_start_expression(self.nth(1)) {
                        break;
                    }
                    self.advance();
                    ty = self.arena.add_wrapped_type(
                        syntax_kind_ext::NULLABLE_TYPE,
                        start,
                        self.last_end,
                        WrappedTypeData {
                            element_type: ty,
                            rank: 0,
                        },
                    );
                }
                SyntaxKind::AsteriskToken if !in_expression => {
                    self.advance();
                    ty = self.arena.add_wrapped_type(
                        syntax_kind_ext::POINTER_TYPE,
                        start,
                        self.last_end,
                        WrappedTypeData {
                            element_type: ty,
                            rank: 0,
                        },
                    );
                }
                SyntaxKind::OpenBracketToken => {
                    let mut j = self.pos + 1;
                    while self.kind_at(j) == SyntaxKind::CommaToken {
                        j += 1;
                    }
                    if self.kind_at(j) != SyntaxKind::CloseBracketToken {
                        break;
                    }
                    let rank = (j - self.pos) as u32;
                    while self.pos <= j {
                        self.advance();
                    }
                    ty = self.arena.add_wrapped_type(
                        syntax_kind_ext::ARRAY_TYPE,
                        start,
                        self.last_end,
                        WrappedTypeData {
                            element_type: ty,
                            rank,
                        },
                    );
                }
                _ => break,
            }
        }
        ty
    }

    fn parse_non_array_type(&mut self) -> NodeIndex {
        let kind = self.current();
        if kind.is_predefined_type() {
            return self.parse_predefined_type();
        }
        match kind {
            SyntaxKind::Identifier => self.parse_name(),
            SyntaxKind::OpenParenToken if self.scan_tuple_type(self.pos).is_some() => {
                self.parse_tuple_type()
            }
            _ => {
                self.error_at_current(diagnostic_codes::TYPE_EXPECTED, &[]);
                NodeIndex::NONE
            }
        }
    }

    pub(crate) fn parse_predefined_type(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let keyword = self.current();
        self.advance();
        self.arena.add_predefined_type(
            syntax_kind_ext::PREDEFINED_TYPE,
            start,
            self.last_end,
            PredefinedTypeData { keyword },
        )
    }

    fn parse_tuple_type(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.advance();
        let mut elements = Vec::new();
        loop {
            let element = self.parse_type();
            // Element names are not modeled
            if self.at(SyntaxKind::Identifier) {
                self.advance();
            }
            elements.push(element);
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect(SyntaxKind::CloseParenToken);
        self.arena.add_tuple_type(
            syntax_kind_ext::TUPLE_TYPE,
            start,
            self.last_end,
            TupleTypeData {
                elements: NodeList::from_vec(elements),
            },
        )
    }

    /// Parse a possibly qualified, possibly generic name in a type or
    /// namespace context: `A.B<C>.D`, `global::System.DateTime`.
    pub(crate) fn parse_name(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut name = self.parse_simple_type_name();
        if name.is_none() {
            return name;
        }
        if self.at(SyntaxKind::ColonColonToken) {
            self.advance();
            let right = self.parse_simple_type_name();
            name = self.arena.add_qualified_name(
                syntax_kind_ext::ALIAS_QUALIFIED_NAME,
                start,
                self.last_end,
                QualifiedNameData { left: name, right },
            );
        }
        while self.at(SyntaxKind::DotToken) && self.nth(1) == SyntaxKind::Identifier {
            self.advance();
            let right = self.parse_simple_type_name();
            name = self.arena.add_qualified_name(
                syntax_kind_ext::QUALIFIED_NAME,
                start,
                self.last_end,
                QualifiedNameData { left: name, right },
            );
        }
        name
    }

    /// Identifier, with type arguments when a `<...>` list follows.
    fn parse_simple_type_name(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let name = self.parse_identifier();
        if name.is_none() || !self.at(SyntaxKind::LessThanToken) {
            return name;
        }
        if self.scan_type_argument_list(self.pos).is_none() {
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

    /// Parse `<T, U>`. The caller has checked that a list can be scanned.
    pub(crate) fn parse_type_argument_list(&mut self) -> NodeList {
        let mut arguments = Vec::new();
        self.expect(SyntaxKind::LessThanToken);
        loop {
            if matches!(
                self.current(),
                SyntaxKind::CommaToken | SyntaxKind::GreaterThanToken
            ) {
                let pos = self.token_pos();
                arguments.push(self.arena.add_token(
                    syntax_kind_ext::OMITTED_TYPE_ARGUMENT,
                    pos,
                    pos,
                ));
            } else {
                arguments.push(self.parse_type());
            }
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect(SyntaxKind::GreaterThanToken);
        NodeList::from_vec(arguments)
    }

    /// Parse `<in T, out U>` on a type, method or delegate declaration.
    pub(crate) fn parse_type_parameter_list(&mut self) -> NodeList {
        let mut parameters = Vec::new();
        if !self.eat(SyntaxKind::LessThanToken) {
            return NodeList::new();
        }
        loop {
            self.skip_attributes();
            if matches!(self.current(), SyntaxKind::InKeyword | SyntaxKind::OutKeyword) {
                self.advance();
            }
            if self.at(SyntaxKind::Identifier) {
                let start = self.token_pos();
                let text = self.current_text().to_string();
                self.advance();
                parameters.push(self.arena.add_type_parameter(start, self.last_end, &text));
            } else {
                self.error_at_current(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
                break;
            }
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expect(SyntaxKind::GreaterThanToken);
        NodeList::from_vec(parameters)
    }

    /// Skip `where T : class, new()` clauses; constraints are not modeled.
    pub(crate) fn skip_constraint_clauses(&mut self) {
        // Later `where` clauses are consumed by the same skip.
        if self.at_contextual("where") {
            self.advance();
            self.skip_until(&[
                SyntaxKind::OpenBraceToken,
                SyntaxKind::SemicolonToken,
                SyntaxKind::EqualsGreaterThanToken,
            ]);
        }
    }
}
