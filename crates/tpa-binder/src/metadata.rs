//! Metadata references.
//!
//! A metadata reference describes types a compilation can use without their
//! source, the way a referenced assembly does for the C# compiler. References
//! are JSON documents:
//!
//! ```json
//! { "name": "System.Runtime",
//!   "types": [ { "name": "System.TimeProvider", "kind": "class",
//!                "baseType": "System.Object", "interfaces": [],
//!                "members": [ { "name": "System", "kind": "property",
//!                               "static": true, "type": "System.TimeProvider" } ] } ] }
//! ```
//!
//! Type names are metadata names: `Namespace.Name`, generic arity as `` `N ``,
//! nested types as `Outer+Inner`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Errors raised while loading a metadata reference.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("cannot read metadata reference '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid metadata reference '{name}': {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown reference set '{0}' (expected one of: {known})", known = builtin_reference_names().join(", "))]
    UnknownReference(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
    Record,
}

impl TypeKind {
    pub const fn is_interface(self) -> bool {
        matches!(self, TypeKind::Interface)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Event,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataMember {
    pub name: String,
    pub kind: MemberKind,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Field/property/event type, or method return type.
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataType {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub members: Vec<MetadataMember>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MetadataReference {
    pub name: String,
    #[serde(default)]
    pub types: Vec<MetadataType>,
}

impl MetadataReference {
    /// Parse a reference document. `origin` names it in errors.
    pub fn from_json(origin: &str, text: &str) -> Result<Self, MetadataError> {
        serde_json::from_str(text).map_err(|source| MetadataError::Json {
            name: origin.to_string(),
            source,
        })
    }

    /// Read and parse a reference document from disk.
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let text = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reference = Self::from_json(&path.display().to_string(), &text)?;
        debug!(
            path = %path.display(),
            types = reference.types.len(),
            "loaded metadata reference"
        );
        Ok(reference)
    }

    /// One of the reference sets compiled into the binary.
    pub fn builtin(name: &str) -> Result<Self, MetadataError> {
        let embedded = get_builtin_reference(name)
            .ok_or_else(|| MetadataError::UnknownReference(name.to_string()))?;
        Self::from_json(embedded.name, embedded.content)
    }
}

// =============================================================================
// Embedded reference sets
// =============================================================================

/// A reference set embedded with `include_str!`.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedReference {
    /// Target framework moniker (e.g. "net8")
    pub name: &'static str,
    pub content: &'static str,
}

/// .NET 8 base class library subset; declares `System.TimeProvider`.
pub const REFERENCE_NET8: EmbeddedReference = EmbeddedReference {
    name: "net8",
    content: include_str!("../references/net8.json"),
};

/// .NET Standard 2.0 subset; predates `System.TimeProvider`.
pub const REFERENCE_NETSTANDARD2_0: EmbeddedReference = EmbeddedReference {
    name: "netstandard2.0",
    content: include_str!("../references/netstandard2.0.json"),
};

pub const BUILTIN_REFERENCES: &[EmbeddedReference] = &[REFERENCE_NET8, REFERENCE_NETSTANDARD2_0];

/// The reference set used when none is configured.
pub const DEFAULT_REFERENCE: &str = "net8";

pub fn get_builtin_reference(name: &str) -> Option<&'static EmbeddedReference> {
    let name = name.trim().to_ascii_lowercase();
    let name = match name.as_str() {
        "net8.0" => "net8",
        "netstandard2" => "netstandard2.0",
        other => other,
    };
    BUILTIN_REFERENCES.iter().find(|reference| reference.name == name)
}

pub fn builtin_reference_names() -> Vec<&'static str> {
    BUILTIN_REFERENCES.iter().map(|reference| reference.name).collect()
}
