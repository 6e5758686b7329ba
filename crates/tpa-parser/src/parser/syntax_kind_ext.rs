//! Node kinds that are not tokens.
//!
//! Token-backed nodes (identifiers, keywords used as names) reuse their
//! `SyntaxKind` value. Composite nodes use the constants below, which start
//! above every token kind.

pub const FIRST_NODE: u16 = 1000;

// Names and types
pub const QUALIFIED_NAME: u16 = 1000;
pub const ALIAS_QUALIFIED_NAME: u16 = 1001;
pub const GENERIC_NAME: u16 = 1002;
pub const PREDEFINED_TYPE: u16 = 1003;
pub const ARRAY_TYPE: u16 = 1004;
pub const NULLABLE_TYPE: u16 = 1005;
pub const POINTER_TYPE: u16 = 1006;
pub const TUPLE_TYPE: u16 = 1007;
pub const REF_TYPE: u16 = 1008;
pub const TYPE_PARAMETER: u16 = 1009;
pub const OMITTED_TYPE_ARGUMENT: u16 = 1010;

// Expressions
pub const LITERAL_EXPRESSION: u16 = 1100;
pub const MEMBER_ACCESS_EXPRESSION: u16 = 1101;
pub const POINTER_MEMBER_ACCESS_EXPRESSION: u16 = 1102;
pub const ELEMENT_ACCESS_EXPRESSION: u16 = 1103;
pub const INVOCATION_EXPRESSION: u16 = 1104;
pub const OBJECT_CREATION_EXPRESSION: u16 = 1105;
pub const ARRAY_CREATION_EXPRESSION: u16 = 1106;
pub const IMPLICIT_ARRAY_CREATION_EXPRESSION: u16 = 1107;
pub const ANONYMOUS_OBJECT_CREATION_EXPRESSION: u16 = 1108;
pub const STACKALLOC_EXPRESSION: u16 = 1109;
pub const BINARY_EXPRESSION: u16 = 1110;
pub const ASSIGNMENT_EXPRESSION: u16 = 1111;
pub const IS_EXPRESSION: u16 = 1112;
pub const AS_EXPRESSION: u16 = 1113;
pub const RANGE_EXPRESSION: u16 = 1114;
pub const WITH_EXPRESSION: u16 = 1115;
pub const PREFIX_UNARY_EXPRESSION: u16 = 1116;
pub const POSTFIX_UNARY_EXPRESSION: u16 = 1117;
pub const AWAIT_EXPRESSION: u16 = 1118;
pub const THROW_EXPRESSION: u16 = 1119;
pub const REF_EXPRESSION: u16 = 1120;
pub const CHECKED_EXPRESSION: u16 = 1121;
pub const CONDITIONAL_EXPRESSION: u16 = 1122;
pub const PARENTHESIZED_EXPRESSION: u16 = 1123;
pub const CAST_EXPRESSION: u16 = 1124;
pub const TYPEOF_EXPRESSION: u16 = 1125;
pub const DEFAULT_EXPRESSION: u16 = 1126;
pub const SIZEOF_EXPRESSION: u16 = 1127;
pub const LAMBDA_EXPRESSION: u16 = 1128;
pub const ANONYMOUS_METHOD_EXPRESSION: u16 = 1129;
pub const INTERPOLATED_STRING_EXPRESSION: u16 = 1130;
pub const SWITCH_EXPRESSION: u16 = 1131;
pub const SWITCH_EXPRESSION_ARM: u16 = 1132;
pub const INITIALIZER_EXPRESSION: u16 = 1133;
pub const COLLECTION_EXPRESSION: u16 = 1134;
pub const TUPLE_EXPRESSION: u16 = 1135;
pub const ARGUMENT: u16 = 1136;
pub const DECLARATION_EXPRESSION: u16 = 1137;
pub const THIS_EXPRESSION: u16 = 1138;
pub const BASE_EXPRESSION: u16 = 1139;

// Patterns
pub const DECLARATION_PATTERN: u16 = 1200;
pub const CONSTANT_PATTERN: u16 = 1201;
pub const RECURSIVE_PATTERN: u16 = 1202;
pub const VAR_PATTERN: u16 = 1203;
pub const DISCARD_PATTERN: u16 = 1204;
pub const RELATIONAL_PATTERN: u16 = 1205;
pub const UNARY_PATTERN: u16 = 1206;
pub const BINARY_PATTERN: u16 = 1207;
pub const LIST_PATTERN: u16 = 1208;
pub const PARENTHESIZED_PATTERN: u16 = 1209;
pub const SUBPATTERN: u16 = 1210;

// Statements
pub const BLOCK: u16 = 1300;
pub const LOCAL_DECLARATION_STATEMENT: u16 = 1301;
pub const VARIABLE_DECLARATION: u16 = 1302;
pub const VARIABLE_DECLARATOR: u16 = 1303;
pub const EXPRESSION_STATEMENT: u16 = 1304;
pub const EMPTY_STATEMENT: u16 = 1305;
pub const IF_STATEMENT: u16 = 1306;
pub const FOR_STATEMENT: u16 = 1307;
pub const FOREACH_STATEMENT: u16 = 1308;
pub const WHILE_STATEMENT: u16 = 1309;
pub const DO_STATEMENT: u16 = 1310;
pub const USING_STATEMENT: u16 = 1311;
pub const FIXED_STATEMENT: u16 = 1312;
pub const LOCK_STATEMENT: u16 = 1313;
pub const CHECKED_STATEMENT: u16 = 1314;
pub const UNSAFE_STATEMENT: u16 = 1315;
pub const RETURN_STATEMENT: u16 = 1316;
pub const THROW_STATEMENT: u16 = 1317;
pub const YIELD_RETURN_STATEMENT: u16 = 1318;
pub const YIELD_BREAK_STATEMENT: u16 = 1319;
pub const BREAK_STATEMENT: u16 = 1320;
pub const CONTINUE_STATEMENT: u16 = 1321;
pub const GOTO_STATEMENT: u16 = 1322;
pub const TRY_STATEMENT: u16 = 1323;
pub const CATCH_CLAUSE: u16 = 1324;
pub const SWITCH_STATEMENT: u16 = 1325;
pub const SWITCH_SECTION: u16 = 1326;
pub const CASE_LABEL: u16 = 1327;
pub const DEFAULT_LABEL: u16 = 1328;
pub const LABELED_STATEMENT: u16 = 1329;
pub const LOCAL_FUNCTION_STATEMENT: u16 = 1330;

// Declarations
pub const SOURCE_FILE: u16 = 1400;
pub const USING_DIRECTIVE: u16 = 1401;
pub const NAMESPACE_DECLARATION: u16 = 1402;
pub const FILE_SCOPED_NAMESPACE_DECLARATION: u16 = 1403;
pub const CLASS_DECLARATION: u16 = 1404;
pub const STRUCT_DECLARATION: u16 = 1405;
pub const INTERFACE_DECLARATION: u16 = 1406;
pub const RECORD_DECLARATION: u16 = 1407;
pub const RECORD_STRUCT_DECLARATION: u16 = 1408;
pub const ENUM_DECLARATION: u16 = 1409;
pub const ENUM_MEMBER_DECLARATION: u16 = 1410;
pub const DELEGATE_DECLARATION: u16 = 1411;
pub const FIELD_DECLARATION: u16 = 1412;
pub const EVENT_FIELD_DECLARATION: u16 = 1413;
pub const PROPERTY_DECLARATION: u16 = 1414;
pub const INDEXER_DECLARATION: u16 = 1415;
pub const EVENT_DECLARATION: u16 = 1416;
pub const ACCESSOR_DECLARATION: u16 = 1417;
pub const METHOD_DECLARATION: u16 = 1418;
pub const CONSTRUCTOR_DECLARATION: u16 = 1419;
pub const DESTRUCTOR_DECLARATION: u16 = 1420;
pub const OPERATOR_DECLARATION: u16 = 1421;
pub const CONVERSION_OPERATOR_DECLARATION: u16 = 1422;
pub const CONSTRUCTOR_INITIALIZER: u16 = 1423;
pub const PARAMETER: u16 = 1424;

/// Debug name of a node kind (composite or token).
pub fn kind_name(kind: u16) -> &'static str {
    match kind {
        QUALIFIED_NAME => "QualifiedName",
        ALIAS_QUALIFIED_NAME => "AliasQualifiedName",
        GENERIC_NAME => "GenericName",
        PREDEFINED_TYPE => "PredefinedType",
        ARRAY_TYPE => "ArrayType",
        NULLABLE_TYPE => "NullableType",
        POINTER_TYPE => "PointerType",
        TUPLE_TYPE => "TupleType",
        REF_TYPE => "RefType",
        TYPE_PARAMETER => "TypeParameter",
        OMITTED_TYPE_ARGUMENT => "OmittedTypeArgument",
        LITERAL_EXPRESSION => "LiteralExpression",
        MEMBER_ACCESS_EXPRESSION => "MemberAccessExpression",
        POINTER_MEMBER_ACCESS_EXPRESSION => "PointerMemberAccessExpression",
        ELEMENT_ACCESS_EXPRESSION => "ElementAccessExpression",
        INVOCATION_EXPRESSION => "InvocationExpression",
        OBJECT_CREATION_EXPRESSION => "ObjectCreationExpression",
        ARRAY_CREATION_EXPRESSION => "ArrayCreationExpression",
        IMPLICIT_ARRAY_CREATION_EXPRESSION => "ImplicitArrayCreationExpression",
        ANONYMOUS_OBJECT_CREATION_EXPRESSION => "AnonymousObjectCreationExpression",
        STACKALLOC_EXPRESSION => "StackAllocExpression",
        BINARY_EXPRESSION => "BinaryExpression",
        ASSIGNMENT_EXPRESSION => "AssignmentExpression",
        IS_EXPRESSION => "IsExpression",
        AS_EXPRESSION => "AsExpression",
        RANGE_EXPRESSION => "RangeExpression",
        WITH_EXPRESSION => "WithExpression",
        PREFIX_UNARY_EXPRESSION => "PrefixUnaryExpression",
        POSTFIX_UNARY_EXPRESSION => "PostfixUnaryExpression",
        AWAIT_EXPRESSION => "AwaitExpression",
        THROW_EXPRESSION => "ThrowExpression",
        REF_EXPRESSION => "RefExpression",
        CHECKED_EXPRESSION => "CheckedExpression",
        CONDITIONAL_EXPRESSION => "ConditionalExpression",
        PARENTHESIZED_EXPRESSION => "ParenthesizedExpression",
        CAST_EXPRESSION => "CastExpression",
        TYPEOF_EXPRESSION => "TypeOfExpression",
        DEFAULT_EXPRESSION => "DefaultExpression",
        SIZEOF_EXPRESSION => "SizeOfExpression",
        LAMBDA_EXPRESSION => "LambdaExpression",
        ANONYMOUS_METHOD_EXPRESSION => "AnonymousMethodExpression",
        INTERPOLATED_STRING_EXPRESSION => "InterpolatedStringExpression",
        SWITCH_EXPRESSION => "SwitchExpression",
        SWITCH_EXPRESSION_ARM => "SwitchExpressionArm",
        INITIALIZER_EXPRESSION => "InitializerExpression",
        COLLECTION_EXPRESSION => "CollectionExpression",
        TUPLE_EXPRESSION => "TupleExpression",
        ARGUMENT => "Argument",
        DECLARATION_EXPRESSION => "DeclarationExpression",
        THIS_EXPRESSION => "ThisExpression",
        BASE_EXPRESSION => "BaseExpression",
        DECLARATION_PATTERN => "DeclarationPattern",
        CONSTANT_PATTERN => "ConstantPattern",
        RECURSIVE_PATTERN => "RecursivePattern",
        VAR_PATTERN => "VarPattern",
        DISCARD_PATTERN => "DiscardPattern",
        RELATIONAL_PATTERN => "RelationalPattern",
        UNARY_PATTERN => "UnaryPattern",
        BINARY_PATTERN => "BinaryPattern",
        LIST_PATTERN => "ListPattern",
        PARENTHESIZED_PATTERN => "ParenthesizedPattern",
        SUBPATTERN => "Subpattern",
        BLOCK => "Block",
        LOCAL_DECLARATION_STATEMENT => "LocalDeclarationStatement",
        VARIABLE_DECLARATION => "VariableDeclaration",
        VARIABLE_DECLARATOR => "VariableDeclarator",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        EMPTY_STATEMENT => "EmptyStatement",
        IF_STATEMENT => "IfStatement",
        FOR_STATEMENT => "ForStatement",
        FOREACH_STATEMENT => "ForEachStatement",
        WHILE_STATEMENT => "WhileStatement",
        DO_STATEMENT => "DoStatement",
        USING_STATEMENT => "UsingStatement",
        FIXED_STATEMENT => "FixedStatement",
        LOCK_STATEMENT => "LockStatement",
        CHECKED_STATEMENT => "CheckedStatement",
        UNSAFE_STATEMENT => "UnsafeStatement",
        RETURN_STATEMENT => "ReturnStatement",
        THROW_STATEMENT => "ThrowStatement",
        YIELD_RETURN_STATEMENT => "YieldReturnStatement",
        YIELD_BREAK_STATEMENT => "YieldBreakStatement",
        BREAK_STATEMENT => "BreakStatement",
        CONTINUE_STATEMENT => "ContinueStatement",
        GOTO_STATEMENT => "GotoStatement",
        TRY_STATEMENT => "TryStatement",
        CATCH_CLAUSE => "CatchClause",
        SWITCH_STATEMENT => "SwitchStatement",
        SWITCH_SECTION => "SwitchSection",
        CASE_LABEL => "CaseLabel",
        DEFAULT_LABEL => "DefaultLabel",
        LABELED_STATEMENT => "LabeledStatement",
        LOCAL_FUNCTION_STATEMENT => "LocalFunctionStatement",
        SOURCE_FILE => "SourceFile",
        USING_DIRECTIVE => "UsingDirective",
        NAMESPACE_DECLARATION => "NamespaceDeclaration",
        FILE_SCOPED_NAMESPACE_DECLARATION => "FileScopedNamespaceDeclaration",
        CLASS_DECLARATION => "ClassDeclaration",
        STRUCT_DECLARATION => "StructDeclaration",
        INTERFACE_DECLARATION => "InterfaceDeclaration",
        RECORD_DECLARATION => "RecordDeclaration",
        RECORD_STRUCT_DECLARATION => "RecordStructDeclaration",
        ENUM_DECLARATION => "EnumDeclaration",
        ENUM_MEMBER_DECLARATION => "EnumMemberDeclaration",
        DELEGATE_DECLARATION => "DelegateDeclaration",
        FIELD_DECLARATION => "FieldDeclaration",
        EVENT_FIELD_DECLARATION => "EventFieldDeclaration",
        PROPERTY_DECLARATION => "PropertyDeclaration",
        INDEXER_DECLARATION => "IndexerDeclaration",
        EVENT_DECLARATION => "EventDeclaration",
        ACCESSOR_DECLARATION => "AccessorDeclaration",
        METHOD_DECLARATION => "MethodDeclaration",
        CONSTRUCTOR_DECLARATION => "ConstructorDeclaration",
        DESTRUCTOR_DECLARATION => "DestructorDeclaration",
        OPERATOR_DECLARATION => "OperatorDeclaration",
        CONVERSION_OPERATOR_DECLARATION => "ConversionOperatorDeclaration",
        CONSTRUCTOR_INITIALIZER => "ConstructorInitializer",
        PARAMETER => "Parameter",
        _ if kind == tpa_scanner::SyntaxKind::Identifier as u16 => "Identifier",
        _ => "Token",
    }
}
