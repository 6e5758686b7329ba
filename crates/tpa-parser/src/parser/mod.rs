//! Parser module: arena AST, node kinds and the recursive-descent parser.

pub mod base;
pub mod node;
pub mod node_access;
mod node_arena;
mod state;
mod state_declarations;
mod state_expressions;
mod state_patterns;
mod state_statements;
mod state_types;
pub mod syntax_kind_ext;

pub use base::{NodeIndex, NodeList};
pub use node::NodeArena;
pub use node_access::{
    Ancestors, Children, Descendants, is_method_like, is_namespace_declaration, is_type_declaration,
};
pub use state::{ParseDiagnostic, ParserState};
