//! C# parser and arena-based AST for the tpa analyzer.
//!
//! - `NodeArena` stores every node of one file in flat, typed pools.
//! - `ParserState` builds the arena from the scanner's token stream and
//!   records recoverable syntax problems as `ParseDiagnostic`s.

pub mod parser;

pub use parser::{
    NodeArena, NodeIndex, NodeList, ParseDiagnostic, ParserState, is_method_like,
    is_namespace_declaration, is_type_declaration, node, syntax_kind_ext,
};

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod parser_tests;

#[cfg(test)]
#[path = "../tests/expression_tests.rs"]
mod expression_tests;

#[cfg(test)]
#[path = "../tests/node_access_tests.rs"]
mod node_access_tests;
