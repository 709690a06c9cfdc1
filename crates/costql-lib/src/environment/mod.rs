//! One schema, compiled into a priced type graph.

mod builder;
mod cardinality;
mod dump;
mod invariants;
mod joins;


pub use builder::EnvironmentBuilder;

use costql_syntax::ast::{ExecutableDocument, OperationKind, SchemaDocument};
use indexmap::IndexMap;

use crate::config::EnvironmentConfig;
use crate::graph::{FieldId, FieldModel, OutputType, TypeId};
use crate::invoice::Invoice;
use crate::request::Request;
use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Roots {
    query: Option<TypeId>,
    mutation: Option<TypeId>,
    subscription: Option<TypeId>,
}

impl Roots {
    pub(crate) fn set(&mut self, kind: OperationKind, id: Option<TypeId>) {
        match kind {
            OperationKind::Query => self.query = id,
            OperationKind::Mutation => self.mutation = id,
            OperationKind::Subscription => self.subscription = id,
            _ => {}
        }
    }

    fn get(&self, kind: OperationKind) -> Option<TypeId> {
        match kind {
            OperationKind::Query => self.query,
            OperationKind::Mutation => self.mutation,
            OperationKind::Subscription => self.subscription,
            _ => None,
        }
    }
}

/// Immutable, fully resolved type graph of one schema.
///
/// Safe to share between threads; pricing a request never mutates it.
#[derive(Debug, Clone)]
pub struct Environment {
    pub(crate) types: Vec<OutputType>,
    pub(crate) fields: Vec<FieldModel>,
    pub(crate) by_name: IndexMap<String, TypeId>,
    pub(crate) roots: Roots,
    pub(crate) config: EnvironmentConfig,
}

impl Environment {
    pub fn builder(document: SchemaDocument) -> EnvironmentBuilder {
        EnvironmentBuilder::new(document)
    }

    /// Parses `source` and builds with the default configuration.
    pub fn from_sdl(source: &str) -> Result<Self> {
        EnvironmentBuilder::from_sdl(source)?.build()
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    /// Panics if `id` was issued by another environment.
    pub fn ty(&self, id: TypeId) -> &OutputType {
        invariants::ensure_type(&self.types, id)
    }

    /// Panics if `id` was issued by another environment.
    pub fn field(&self, id: FieldId) -> &FieldModel {
        invariants::ensure_field(&self.fields, id)
    }

    pub fn type_id(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    pub fn type_by_name(&self, name: &str) -> Option<&OutputType> {
        self.type_id(name).map(|id| self.ty(id))
    }

    /// Looks up `Type.field` by its two parts.
    pub fn field_by_name(&self, type_name: &str, field_name: &str) -> Option<&FieldModel> {
        let id = self.type_by_name(type_name)?.field(field_name)?;
        Some(self.field(id))
    }

    /// Built-in scalars first, then in definition order.
    pub fn types(&self) -> impl Iterator<Item = &OutputType> {
        self.types.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldModel> {
        self.fields.iter()
    }

    pub fn root(&self, kind: OperationKind) -> Option<&OutputType> {
        self.roots.get(kind).map(|id| self.ty(id))
    }

    pub fn query_type(&self) -> Option<&OutputType> {
        self.root(OperationKind::Query)
    }

    pub fn mutation_type(&self) -> Option<&OutputType> {
        self.root(OperationKind::Mutation)
    }

    pub fn subscription_type(&self) -> Option<&OutputType> {
        self.root(OperationKind::Subscription)
    }

    /// Reflexive.
    pub fn is_assignable(&self, from: TypeId, to: TypeId) -> bool {
        self.ty(from).is(to)
    }

    pub fn request(&self, document: ExecutableDocument) -> Result<Request<'_>> {
        Request::new(self, document)
    }

    pub fn request_str(&self, source: &str) -> Result<Request<'_>> {
        self.request(costql_syntax::parse_executable(source)?)
    }

    pub fn invoice(&self, document: ExecutableDocument) -> Result<Invoice> {
        self.request(document)?.invoice()
    }

    pub fn invoice_str(&self, source: &str) -> Result<Invoice> {
        self.request_str(source)?.invoice()
    }
}
