//! The output type graph.
//!
//! Types and fields live in arenas owned by the
//! [`Environment`](crate::Environment) and refer to each other through
//! [`TypeId`] and [`FieldId`]. Everything here is read-only once the
//! environment is built.

mod closure;

#[cfg(test)]
mod closure_tests;

pub(crate) use closure::transitive_closure;

use costql_core::{Bounds, Pricer, StepPricer};
use costql_syntax::ast::{self, DefinitionKind};
use indexmap::{IndexMap, IndexSet};

use crate::join::Join;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u32);

impl FieldId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The five kinds of output type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Object,
    Interface,
    Union,
    Scalar,
    Enum,
}

impl TypeKind {
    /// Input objects are not output types.
    pub(crate) fn from_definition(kind: DefinitionKind) -> Option<Self> {
        match kind {
            DefinitionKind::Object => Some(TypeKind::Object),
            DefinitionKind::Interface => Some(TypeKind::Interface),
            DefinitionKind::Union => Some(TypeKind::Union),
            DefinitionKind::Scalar => Some(TypeKind::Scalar),
            DefinitionKind::Enum => Some(TypeKind::Enum),
            DefinitionKind::InputObject => None,
        }
    }

    pub fn is_abstract(self) -> bool {
        matches!(self, TypeKind::Interface | TypeKind::Union)
    }

    pub fn is_concrete(self) -> bool {
        !self.is_abstract()
    }

    pub fn has_fields(self) -> bool {
        matches!(self, TypeKind::Object | TypeKind::Interface)
    }

    pub fn is_leaf(self) -> bool {
        matches!(self, TypeKind::Scalar | TypeKind::Enum)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Object => "object",
            TypeKind::Interface => "interface",
            TypeKind::Union => "union",
            TypeKind::Scalar => "scalar",
            TypeKind::Enum => "enum",
        }
    }
}

/// Resolved cost metadata of a type or field.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementCost {
    pub(crate) cardinality: Bounds,
    pub(crate) pricing: StepPricer,
    pub(crate) shared: Option<bool>,
    pub(crate) always: bool,
    pub(crate) join: Option<Join>,
}

impl ElementCost {
    pub(crate) const UNRESOLVED: Self = Self {
        cardinality: Bounds::ALWAYS_0,
        pricing: StepPricer::FREE,
        shared: None,
        always: false,
        join: None,
    };

    pub fn cardinality(&self) -> Bounds {
        self.cardinality
    }

    pub fn pricing(&self) -> &StepPricer {
        &self.pricing
    }

    /// `None` when neither the element nor anything it inherits from says.
    pub fn shared(&self) -> Option<bool> {
        self.shared
    }

    /// Re-evaluated per alias instead of once per field.
    pub fn always_recomputed(&self) -> bool {
        self.always
    }

    pub fn join(&self) -> Option<&Join> {
        self.join.as_ref()
    }

    pub fn is_free(&self) -> bool {
        self.pricing.is_free()
    }
}

#[derive(Debug, Clone)]
pub struct OutputType {
    pub(crate) id: TypeId,
    pub(crate) name: String,
    pub(crate) kind: TypeKind,
    pub(crate) builtin: bool,
    pub(crate) resource: bool,
    pub(crate) fields: IndexMap<String, FieldId>,
    pub(crate) direct_generalizations: IndexSet<TypeId>,
    pub(crate) direct_specializations: IndexSet<TypeId>,
    pub(crate) all_generalizations: IndexSet<TypeId>,
    pub(crate) all_specializations: IndexSet<TypeId>,
    pub(crate) assignable_to: IndexSet<TypeId>,
    pub(crate) assignable_from: IndexSet<TypeId>,
    pub(crate) object_types: IndexSet<TypeId>,
    pub(crate) cost: ElementCost,
}

impl OutputType {
    pub(crate) fn new(id: TypeId, name: &str, kind: TypeKind, builtin: bool) -> Self {
        Self {
            id,
            name: name.to_owned(),
            kind,
            builtin,
            resource: false,
            fields: IndexMap::new(),
            direct_generalizations: IndexSet::new(),
            direct_specializations: IndexSet::new(),
            all_generalizations: IndexSet::new(),
            all_specializations: IndexSet::new(),
            assignable_to: IndexSet::new(),
            assignable_from: IndexSet::new(),
            object_types: IndexSet::new(),
            cost: ElementCost::UNRESOLVED,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    /// Marked as a resource, directly or through a generalization.
    pub fn is_resource(&self) -> bool {
        self.resource
    }

    pub fn is_abstract(&self) -> bool {
        self.kind.is_abstract()
    }

    pub fn is_concrete(&self) -> bool {
        self.kind.is_concrete()
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<FieldId> {
        self.fields.get(name).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.fields.values().copied()
    }

    pub fn direct_generalizations(&self) -> &IndexSet<TypeId> {
        &self.direct_generalizations
    }

    pub fn direct_specializations(&self) -> &IndexSet<TypeId> {
        &self.direct_specializations
    }

    /// Nearest first.
    pub fn all_generalizations(&self) -> &IndexSet<TypeId> {
        &self.all_generalizations
    }

    pub fn all_specializations(&self) -> &IndexSet<TypeId> {
        &self.all_specializations
    }

    /// Self and every generalization.
    pub fn assignable_to(&self) -> &IndexSet<TypeId> {
        &self.assignable_to
    }

    /// Self and every specialization.
    pub fn assignable_from(&self) -> &IndexSet<TypeId> {
        &self.assignable_from
    }

    /// Object types a value of this type can be at runtime.
    pub fn object_types(&self) -> &IndexSet<TypeId> {
        &self.object_types
    }

    /// True if a value of this type is also a value of `other`.
    pub fn is(&self, other: TypeId) -> bool {
        self.assignable_to.contains(&other)
    }

    pub fn cost(&self) -> &ElementCost {
        &self.cost
    }

    pub fn cardinality(&self) -> Bounds {
        self.cost.cardinality
    }

    pub fn is_free(&self) -> bool {
        self.cost.is_free()
    }
}

#[derive(Debug, Clone)]
pub struct FieldModel {
    pub(crate) id: FieldId,
    pub(crate) name: String,
    pub(crate) qualified_name: String,
    pub(crate) container: TypeId,
    pub(crate) target: TypeId,
    pub(crate) ty: ast::Type,
    pub(crate) options: IndexMap<TypeId, f64>,
    pub(crate) direct_generalizations: IndexSet<FieldId>,
    pub(crate) direct_specializations: IndexSet<FieldId>,
    pub(crate) all_generalizations: IndexSet<FieldId>,
    pub(crate) all_specializations: IndexSet<FieldId>,
    pub(crate) cost: ElementCost,
}

impl FieldModel {
    pub(crate) fn new(
        id: FieldId,
        container: &OutputType,
        name: &str,
        target: TypeId,
        ty: ast::Type,
    ) -> Self {
        Self {
            id,
            name: name.to_owned(),
            qualified_name: format!("{}.{}", container.name, name),
            container: container.id,
            target,
            ty,
            options: IndexMap::new(),
            direct_generalizations: IndexSet::new(),
            direct_specializations: IndexSet::new(),
            all_generalizations: IndexSet::new(),
            all_specializations: IndexSet::new(),
            cost: ElementCost::UNRESOLVED,
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Container.field`.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn container(&self) -> TypeId {
        self.container
    }

    pub fn target(&self) -> TypeId {
        self.target
    }

    /// Declared type expression, wrappers included.
    pub fn ty(&self) -> &ast::Type {
        &self.ty
    }

    pub fn is_to_many(&self) -> bool {
        self.ty.is_list()
    }

    /// Concrete object types the field may return, with their weights.
    ///
    /// Empty for leaf targets.
    pub fn options(&self) -> &IndexMap<TypeId, f64> {
        &self.options
    }

    pub fn total_weight(&self) -> f64 {
        self.options.values().sum()
    }

    pub fn direct_generalizations(&self) -> &IndexSet<FieldId> {
        &self.direct_generalizations
    }

    pub fn direct_specializations(&self) -> &IndexSet<FieldId> {
        &self.direct_specializations
    }

    pub fn all_generalizations(&self) -> &IndexSet<FieldId> {
        &self.all_generalizations
    }

    pub fn all_specializations(&self) -> &IndexSet<FieldId> {
        &self.all_specializations
    }

    pub fn cost(&self) -> &ElementCost {
        &self.cost
    }

    pub fn cardinality(&self) -> Bounds {
        self.cost.cardinality
    }

    pub fn is_free(&self) -> bool {
        self.cost.is_free()
    }
}
