//! Arena node storage.
//!
//! Every node is a small fixed-size `Node` header. Kind-specific payloads live
//! in typed pools on the `NodeArena`; `Node::data_index` points into the pool
//! selected by the node's kind.

use bitflags::bitflags;
use tpa_scanner::SyntaxKind;

use super::base::{NodeIndex, NodeList};

pub const NO_DATA: u32 = u32::MAX;

/// Fixed-size node header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: u16,
    /// Start byte offset (first token, trivia excluded).
    pub pos: u32,
    /// End byte offset (exclusive).
    pub end: u32,
    pub data_index: u32,
}

impl Node {
    #[inline]
    pub fn has_data(&self) -> bool {
        self.data_index != NO_DATA
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

bitflags! {
    /// Declaration modifiers and local-declaration flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModifierFlags: u32 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const INTERNAL = 1 << 3;
        const STATIC = 1 << 4;
        const READONLY = 1 << 5;
        const CONST = 1 << 6;
        const ABSTRACT = 1 << 7;
        const SEALED = 1 << 8;
        const VIRTUAL = 1 << 9;
        const OVERRIDE = 1 << 10;
        const EXTERN = 1 << 11;
        const UNSAFE = 1 << 12;
        const VOLATILE = 1 << 13;
        const NEW = 1 << 14;
        const FIXED = 1 << 15;
        const ASYNC = 1 << 16;
        const PARTIAL = 1 << 17;
        const REQUIRED = 1 << 18;
        const FILE = 1 << 19;
        const SCOPED = 1 << 20;
        // Local declarations
        const USING = 1 << 21;
        const AWAIT = 1 << 22;
        // Parameters
        const REF = 1 << 23;
        const OUT = 1 << 24;
        const IN = 1 << 25;
        const PARAMS = 1 << 26;
        const THIS = 1 << 27;
    }
}

impl ModifierFlags {
    /// Modifier for a reserved keyword token, if it is one.
    pub fn from_keyword(kind: SyntaxKind) -> Option<ModifierFlags> {
        Some(match kind {
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::InternalKeyword => ModifierFlags::INTERNAL,
            SyntaxKind::StaticKeyword => ModifierFlags::STATIC,
            SyntaxKind::ReadOnlyKeyword => ModifierFlags::READONLY,
            SyntaxKind::ConstKeyword => ModifierFlags::CONST,
            SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
            SyntaxKind::SealedKeyword => ModifierFlags::SEALED,
            SyntaxKind::VirtualKeyword => ModifierFlags::VIRTUAL,
            SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
            SyntaxKind::ExternKeyword => ModifierFlags::EXTERN,
            SyntaxKind::UnsafeKeyword => ModifierFlags::UNSAFE,
            SyntaxKind::VolatileKeyword => ModifierFlags::VOLATILE,
            SyntaxKind::NewKeyword => ModifierFlags::NEW,
            SyntaxKind::FixedKeyword => ModifierFlags::FIXED,
            _ => return None,
        })
    }

    /// Contextual modifiers are scanned as identifiers.
    pub fn from_contextual(text: &str) -> Option<ModifierFlags> {
        Some(match text {
            "async" => ModifierFlags::ASYNC,
            "partial" => ModifierFlags::PARTIAL,
            "required" => ModifierFlags::REQUIRED,
            "file" => ModifierFlags::FILE,
            "scoped" => ModifierFlags::SCOPED,
            _ => return None,
        })
    }
}

// =============================================================================
// Names and types
// =============================================================================

/// `Identifier` and `TYPE_PARAMETER` nodes. `@` prefixes are stripped.
#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub escaped_text: String,
}

#[derive(Clone, Debug)]
pub struct LiteralData {
    pub token: SyntaxKind,
    pub text: String,
}

#[derive(Clone, Copy, Debug)]
pub struct PredefinedTypeData {
    pub keyword: SyntaxKind,
}

/// `left.right` in a type or namespace name, or `alias::right`.
#[derive(Clone, Copy, Debug)]
pub struct QualifiedNameData {
    pub left: NodeIndex,
    pub right: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct GenericNameData {
    pub name: NodeIndex,
    pub type_arguments: NodeList,
}

/// Array (`rank` > 0), nullable, pointer and ref types.
#[derive(Clone, Copy, Debug)]
pub struct WrappedTypeData {
    pub element_type: NodeIndex,
    pub rank: u32,
}

#[derive(Clone, Debug)]
pub struct TupleTypeData {
    pub elements: NodeList,
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub struct MemberAccessData {
    pub expression: NodeIndex,
    pub name: NodeIndex,
    /// `a?.b`
    pub question_dot: bool,
}

#[derive(Clone, Debug)]
pub struct ElementAccessData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
    pub question_dot: bool,
}

/// Invocations and constructor initializers (`: base(...)`).
#[derive(Clone, Debug)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: NodeList,
}

/// `new T(...)`, `new T[n]`, `new[] { }`, `new { }`, `stackalloc T[n]`.
#[derive(Clone, Debug)]
pub struct ObjectCreationData {
    /// NONE for target-typed `new()`, implicit arrays and anonymous objects.
    pub type_node: NodeIndex,
    pub arguments: NodeList,
    pub initializer: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: SyntaxKind,
    pub right: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct UnaryExprData {
    pub operator: SyntaxKind,
    pub operand: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct CastData {
    pub type_node: NodeIndex,
    pub expression: NodeIndex,
}

/// `typeof(T)`, `default(T)` / `default`, `sizeof(T)`.
#[derive(Clone, Copy, Debug)]
pub struct TypeOperandData {
    pub type_node: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct LambdaData {
    pub modifiers: ModifierFlags,
    pub parameters: NodeList,
    /// Block or expression.
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct InterpolatedStringData {
    pub holes: NodeList,
}

#[derive(Clone, Debug)]
pub struct SwitchExprData {
    pub expression: NodeIndex,
    pub arms: NodeList,
}

#[derive(Clone, Copy, Debug)]
pub struct SwitchArmData {
    pub pattern: NodeIndex,
    pub when_clause: NodeIndex,
    pub expression: NodeIndex,
}

/// Object/collection initializers, collection expressions and tuples.
#[derive(Clone, Debug)]
pub struct InitializerData {
    pub elements: NodeList,
}

#[derive(Clone, Copy, Debug)]
pub struct ArgumentData {
    pub name: NodeIndex,
    /// `ref`, `out` or `in`.
    pub ref_kind: Option<SyntaxKind>,
    pub expression: NodeIndex,
}

/// `out var x`, `out DateTime x`.
#[derive(Clone, Copy, Debug)]
pub struct DeclarationExprData {
    pub type_node: NodeIndex,
    pub designation: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct PatternData {
    pub type_node: NodeIndex,
    pub designation: NodeIndex,
    pub expression: NodeIndex,
    pub subpatterns: NodeList,
    /// Relational operator, `!` for `not`, `&&` for `and`, `||` for `or`.
    pub operator: SyntaxKind,
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Copy, Debug)]
pub struct LocalDeclarationData {
    /// `CONST`, `USING`, `AWAIT`, `SCOPED`.
    pub modifiers: ModifierFlags,
    pub declaration: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    pub type_node: NodeIndex,
    pub declarators: NodeList,
}

#[derive(Clone, Copy, Debug)]
pub struct VariableDeclaratorData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Expression, return, throw, yield and jump statements.
#[derive(Clone, Copy, Debug)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct IfData {
    pub condition: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// `for`, `while` and `do` loops.
#[derive(Clone, Debug)]
pub struct LoopData {
    pub declaration: NodeIndex,
    pub initializers: NodeList,
    pub condition: NodeIndex,
    pub incrementors: NodeList,
    pub statement: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct ForEachData {
    pub is_await: bool,
    /// NONE when the variable is a deconstruction.
    pub type_node: NodeIndex,
    pub variable: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

/// `using`, `fixed`, `lock`, `checked` and `unsafe` statements.
#[derive(Clone, Copy, Debug)]
pub struct ScopedStatementData {
    pub declaration: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TryData {
    pub block: NodeIndex,
    pub catches: NodeList,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct CatchData {
    pub type_node: NodeIndex,
    pub identifier: NodeIndex,
    pub filter: NodeIndex,
    pub block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SwitchData {
    pub expression: NodeIndex,
    pub sections: NodeList,
}

#[derive(Clone, Debug)]
pub struct SwitchSectionData {
    pub labels: NodeList,
    pub statements: NodeList,
}

#[derive(Clone, Copy, Debug)]
pub struct CaseLabelData {
    pub pattern: NodeIndex,
    pub when_clause: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub file_name: String,
    pub members: NodeList,
}

#[derive(Clone, Copy, Debug)]
pub struct UsingDirectiveData {
    pub is_global: bool,
    pub is_static: bool,
    pub alias: NodeIndex,
    pub name: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct NamespaceData {
    pub name: NodeIndex,
    pub members: NodeList,
}

/// Classes, structs, interfaces, records and enums.
#[derive(Clone, Debug)]
pub struct TypeDeclData {
    pub modifiers: ModifierFlags,
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    /// Primary constructor parameters.
    pub parameters: Option<NodeList>,
    pub base_types: NodeList,
    pub members: NodeList,
}

/// Field and event-field declarations.
#[derive(Clone, Copy, Debug)]
pub struct FieldData {
    pub modifiers: ModifierFlags,
    pub declaration: NodeIndex,
}

/// Properties, indexers and event declarations with accessors.
#[derive(Clone, Debug)]
pub struct PropertyData {
    pub modifiers: ModifierFlags,
    pub type_node: NodeIndex,
    /// NONE for indexers.
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub accessors: NodeList,
    pub expression_body: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessorKind {
    Get,
    Set,
    Init,
    Add,
    Remove,
    Unknown,
}

impl AccessorKind {
    pub fn from_text(text: &str) -> AccessorKind {
        match text {
            "get" => AccessorKind::Get,
            "set" => AccessorKind::Set,
            "init" => AccessorKind::Init,
            "add" => AccessorKind::Add,
            "remove" => AccessorKind::Remove,
            _ => AccessorKind::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AccessorData {
    pub modifiers: ModifierFlags,
    pub keyword: AccessorKind,
    pub body: NodeIndex,
    pub expression_body: NodeIndex,
}

/// Methods, constructors, destructors, operators, conversion operators,
/// local functions and delegates.
#[derive(Clone, Debug)]
pub struct MethodData {
    pub modifiers: ModifierFlags,
    /// NONE for constructors and destructors.
    pub return_type: NodeIndex,
    /// NONE for operators.
    pub name: NodeIndex,
    pub type_parameters: NodeList,
    pub parameters: NodeList,
    pub body: NodeIndex,
    pub expression_body: NodeIndex,
    pub constructor_initializer: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct ParameterData {
    pub modifiers: ModifierFlags,
    /// NONE for implicitly typed lambda parameters.
    pub type_node: NodeIndex,
    pub name: NodeIndex,
    pub default_value: NodeIndex,
}

// =============================================================================
// Arena
// =============================================================================

/// All nodes of one source file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,

    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub predefined_types: Vec<PredefinedTypeData>,
    pub qualified_names: Vec<QualifiedNameData>,
    pub generic_names: Vec<GenericNameData>,
    pub wrapped_types: Vec<WrappedTypeData>,
    pub tuple_types: Vec<TupleTypeData>,

    pub member_accesses: Vec<MemberAccessData>,
    pub element_accesses: Vec<ElementAccessData>,
    pub call_exprs: Vec<CallExprData>,
    pub object_creations: Vec<ObjectCreationData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub conditional_exprs: Vec<ConditionalExprData>,
    pub parenthesized: Vec<ParenthesizedData>,
    pub casts: Vec<CastData>,
    pub type_operands: Vec<TypeOperandData>,
    pub lambdas: Vec<LambdaData>,
    pub interpolated_strings: Vec<InterpolatedStringData>,
    pub switch_exprs: Vec<SwitchExprData>,
    pub switch_arms: Vec<SwitchArmData>,
    pub initializers: Vec<InitializerData>,
    pub arguments: Vec<ArgumentData>,
    pub declaration_exprs: Vec<DeclarationExprData>,
    pub patterns: Vec<PatternData>,

    pub blocks: Vec<BlockData>,
    pub local_declarations: Vec<LocalDeclarationData>,
    pub variable_declarations: Vec<VariableDeclarationData>,
    pub variable_declarators: Vec<VariableDeclaratorData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub if_statements: Vec<IfData>,
    pub loops: Vec<LoopData>,
    pub foreach_statements: Vec<ForEachData>,
    pub scoped_statements: Vec<ScopedStatementData>,
    pub try_data: Vec<TryData>,
    pub catch_clauses: Vec<CatchData>,
    pub switch_data: Vec<SwitchData>,
    pub switch_sections: Vec<SwitchSectionData>,
    pub case_labels: Vec<CaseLabelData>,
    pub labeled_data: Vec<LabeledData>,

    pub source_files: Vec<SourceFileData>,
    pub using_directives: Vec<UsingDirectiveData>,
    pub namespaces: Vec<NamespaceData>,
    pub type_decls: Vec<TypeDeclData>,
    pub fields: Vec<FieldData>,
    pub properties: Vec<PropertyData>,
    pub accessors: Vec<AccessorData>,
    pub methods: Vec<MethodData>,
    pub parameters: Vec<ParameterData>,
}
