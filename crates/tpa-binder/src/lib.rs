//! Binding for the tpa analyzer.
//!
//! - `metadata`: metadata references (JSON type descriptions) and the
//!   reference sets embedded in the binary
//! - `types`: the compilation-wide type table
//! - `compilation`: parsed files plus references, built once and shared
//! - `semantic`: per-file queries (symbol of a name, type of an expression)

pub mod compilation;
mod declarations;
pub mod metadata;
pub mod scope;
pub mod semantic;
pub mod types;

pub use compilation::{Compilation, SourceFile};
pub use metadata::{
    BUILTIN_REFERENCES, DEFAULT_REFERENCE, MemberKind, MetadataError, MetadataReference, TypeKind,
    builtin_reference_names, get_builtin_reference,
};
pub use scope::NamespaceOrType;
pub use semantic::{SemanticModel, Symbol, SymbolKind};
pub use types::{MemberInfo, TypeId, TypeInfo, TypeKey, TypeOrigin, TypeTable};

#[cfg(test)]
#[path = "../tests/metadata_tests.rs"]
mod metadata_tests;

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;

#[cfg(test)]
#[path = "../tests/semantic_tests.rs"]
mod semantic_tests;
