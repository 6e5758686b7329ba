//! Compilations: parsed source files plus the types they can see.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tpa_common::{LineMap, Location, Span};
use tpa_parser::node::NodeArena;
use tpa_parser::{NodeIndex, ParseDiagnostic, ParserState};
use tracing::{Level, debug, span};

use crate::declarations;
use crate::metadata::MetadataReference;
use crate::semantic::SemanticModel;
use crate::types::{TypeId, TypeTable};

/// One parsed source file.
pub struct SourceFile {
    pub name: String,
    pub text: String,
    pub arena: NodeArena,
    pub root: NodeIndex,
    pub line_map: LineMap,
    pub parse_diagnostics: Vec<ParseDiagnostic>,
}

impl SourceFile {
    pub fn parse(name: impl Into<String>, text: impl Into<String>) -> SourceFile {
        let name = name.into();
        let text = text.into();
        let mut parser = ParserState::new(name.clone(), text.clone());
        let root = parser.parse_source_file();
        let line_map = LineMap::build(&text);
        let (arena, parse_diagnostics) = parser.into_parts();
        SourceFile {
            name,
            text,
            arena,
            root,
            line_map,
            parse_diagnostics,
        }
    }

    /// File plus span plus line/column range of `span`.
    pub fn location(&self, span: Span) -> Location {
        let range = self.line_map.span_to_range(span, &self.text);
        Location::new(self.name.clone(), span, range)
    }

    pub fn node_location(&self, node: NodeIndex) -> Option<Location> {
        self.arena.span(node).map(|span| self.location(span))
    }

    pub fn node_text(&self, node: NodeIndex) -> &str {
        self.arena.node_text(node, &self.text)
    }
}

/// Source files and metadata references analyzed together.
///
/// Immutable once built; shared across analysis threads.
pub struct Compilation {
    files: Vec<SourceFile>,
    types: TypeTable,
    /// Type declaration node of each source type, keyed by `(file, node)`.
    declared_types: FxHashMap<(usize, NodeIndex), TypeId>,
    /// `global using` directives of every file, as `(file, node)`.
    global_usings: Vec<(usize, NodeIndex)>,
    reference_names: Vec<String>,
}

impl Compilation {
    /// Parse `sources` (name, text) in parallel and build a compilation.
    pub fn from_sources(
        sources: Vec<(String, String)>,
        references: &[MetadataReference],
    ) -> Compilation {
        let files = sources
            .into_par_iter()
            .map(|(name, text)| SourceFile::parse(name, text))
            .collect();
        Compilation::new(files, references)
    }

    pub fn new(files: Vec<SourceFile>, references: &[MetadataReference]) -> Compilation {
        let build_span = span!(Level::DEBUG, "build_compilation", files = files.len());
        let _enter = build_span.enter();

        let mut types = TypeTable::new();
        types.add_references(references);

        let mut declared_types = FxHashMap::default();
        let mut global_usings = Vec::new();
        for (file_index, file) in files.iter().enumerate() {
            declarations::declare_file_types(file_index, file, &mut types, &mut declared_types);
            global_usings.extend(
                declarations::global_using_directives(file)
                    .into_iter()
                    .map(|node| (file_index, node)),
            );
        }

        let mut compilation = Compilation {
            files,
            types,
            declared_types,
            global_usings,
            reference_names: references.iter().map(|r| r.name.clone()).collect(),
        };
        declarations::complete_source_types(&mut compilation);
        debug!(
            types = compilation.types.len(),
            source_types = compilation.declared_types.len(),
            "compilation built"
        );
        compilation
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, index: usize) -> Option<&SourceFile> {
        self.files.get(index)
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    pub(crate) fn types_mut(&mut self) -> &mut TypeTable {
        &mut self.types
    }

    pub fn reference_names(&self) -> &[String] {
        &self.reference_names
    }

    /// Resolve a metadata name (``System.Func`2``) to a type of this compilation.
    pub fn get_type_by_metadata_name(&self, metadata_name: &str) -> Option<TypeId> {
        self.types.lookup_metadata_name(metadata_name)
    }

    /// The type declared by a type declaration node.
    pub fn declared_type(&self, file: usize, node: NodeIndex) -> Option<TypeId> {
        self.declared_types.get(&(file, node)).copied()
    }

    pub(crate) fn declared_types(&self) -> &FxHashMap<(usize, NodeIndex), TypeId> {
        &self.declared_types
    }

    pub(crate) fn global_usings(&self) -> &[(usize, NodeIndex)] {
        &self.global_usings
    }

    pub fn semantic_model(&self, file: usize) -> Option<SemanticModel<'_>> {
        self.files
            .get(file)
            .map(|source| SemanticModel::new(self, file, source))
    }

    /// Semantic model of the file with the given name.
    pub fn semantic_model_for(&self, name: &str) -> Option<SemanticModel<'_>> {
        let index = self.files.iter().position(|file| file.name == name)?;
        self.semantic_model(index)
    }
}
