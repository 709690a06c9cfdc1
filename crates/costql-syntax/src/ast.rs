//! Owned syntax trees for GraphQL schema and request documents.
//!
//! Trees are plain data: every node owns its strings and carries the byte
//! range it was parsed from.

use indexmap::IndexMap;
use rowan::TextRange;

// ============================================================================
// Shared
// ============================================================================

/// Type reference such as `[User!]!`.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Named(String),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    /// Innermost named type.
    pub fn name(&self) -> &str {
        match self {
            Type::Named(name) => name,
            Type::List(inner) | Type::NonNull(inner) => inner.name(),
        }
    }

    /// True if a list wrapper appears anywhere in the reference.
    pub fn is_list(&self) -> bool {
        match self {
            Type::Named(_) => false,
            Type::List(_) => true,
            Type::NonNull(inner) => inner.is_list(),
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Named(name) => f.write_str(name),
            Type::List(inner) => write!(f, "[{inner}]"),
            Type::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Variable(String),
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Int literals coerce to floats, as in GraphQL input coercion.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Short description of the literal kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Variable(_) => "variable",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::Enum(_) => "enum value",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub range: TextRange,
}

impl Directive {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "query" => Some(OperationKind::Query),
            "mutation" => Some(OperationKind::Mutation),
            "subscription" => Some(OperationKind::Subscription),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

// ============================================================================
// Type system documents
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDocument {
    pub definitions: Vec<TypeSystemDefinition>,
}

impl SchemaDocument {
    /// Appends the definitions of `other`, as if both sources were concatenated.
    pub fn merge(&mut self, other: SchemaDocument) {
        self.definitions.extend(other.definitions);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeSystemDefinition {
    Schema(SchemaDefinition),
    SchemaExtension(SchemaDefinition),
    Type(TypeDefinition),
    TypeExtension(TypeDefinition),
    Directive(DirectiveDefinition),
}

/// `schema { query: Q }` or `extend schema ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDefinition {
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub operation_types: Vec<RootOperationType>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RootOperationType {
    pub kind: OperationKind,
    pub type_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl DefinitionKind {
    pub fn keyword(self) -> &'static str {
        match self {
            DefinitionKind::Scalar => "scalar",
            DefinitionKind::Object => "type",
            DefinitionKind::Interface => "interface",
            DefinitionKind::Union => "union",
            DefinitionKind::Enum => "enum",
            DefinitionKind::InputObject => "input",
        }
    }
}

/// A type definition or extension.
///
/// One shape for every kind; members that do not apply to `kind` are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub kind: DefinitionKind,
    pub name: String,
    pub description: Option<String>,
    pub implements: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<FieldDefinition>,
    /// Union member types.
    pub members: Vec<String>,
    pub values: Vec<EnumValueDefinition>,
    pub input_fields: Vec<InputValueDefinition>,
    pub range: TextRange,
}

impl TypeDefinition {
    pub fn new(kind: DefinitionKind, name: impl Into<String>, range: TextRange) -> Self {
        Self {
            kind,
            name: name.into(),
            description: None,
            implements: Vec::new(),
            directives: Vec::new(),
            fields: Vec::new(),
            members: Vec::new(),
            values: Vec::new(),
            input_fields: Vec::new(),
            range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: Type,
    pub directives: Vec<Directive>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDefinition {
    pub description: Option<String>,
    pub name: String,
    pub ty: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<String>,
    pub name: String,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveDefinition {
    pub description: Option<String>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<String>,
    pub range: TextRange,
}

// ============================================================================
// Executable documents
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutableDocument {
    pub definitions: Vec<ExecutableDefinition>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutableDefinition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationDefinition {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variables: Vec<VariableDefinition>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    pub name: String,
    pub ty: Type,
    pub default_value: Option<Value>,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FragmentDefinition {
    pub name: String,
    pub type_condition: String,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub range: TextRange,
}

/// Leaf fields carry an empty selection set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Selection {
    Field(Field),
    InlineFragment(InlineFragment),
    FragmentSpread(FragmentSpread),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<Argument>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub range: TextRange,
}

impl Field {
    /// Alias if present, otherwise the field name.
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<String>,
    pub directives: Vec<Directive>,
    pub selection_set: SelectionSet,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FragmentSpread {
    pub name: String,
    pub directives: Vec<Directive>,
    pub range: TextRange,
}
