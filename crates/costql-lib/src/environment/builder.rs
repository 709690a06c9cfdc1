//! Staged construction of an [`Environment`].
//!
//! Every stage completes for all types (and fields) before the next one
//! starts:
//!
//! 1. register built-in scalars, then one model per output type definition
//! 2. attach extensions and read the cost directives
//! 3. link declared `implements` and union members
//! 4. close the relations transitively
//! 5. discover fields, link same-named fields across the hierarchy and
//!    inherit their declarations
//! 6. fill cardinality then pricing defaults, types before fields
//! 7. resolve join hints and the operation roots

use costql_core::{Bounds, Price, StepPricer, WorkType};
use costql_syntax::ast::{Directive, OperationKind, SchemaDocument, TypeDefinition, TypeSystemDefinition};
use indexmap::{IndexMap, IndexSet};

use super::cardinality::{self, FieldShape};
use super::joins::JoinResolver;
use super::{Environment, Roots};
use crate::config::EnvironmentConfig;
use crate::cost::DeclaredCost;
use crate::graph::{FieldId, FieldModel, OutputType, TypeId, TypeKind, transitive_closure};
use crate::join::Join;
use crate::{Error, Result};

const BUILTIN_SCALARS: [&str; 5] = ["ID", "Boolean", "Int", "Float", "String"];

const DEFAULT_ROOTS: [(OperationKind, &str); 3] = [
    (OperationKind::Query, "Query"),
    (OperationKind::Mutation, "Mutation"),
    (OperationKind::Subscription, "Subscription"),
];

pub struct EnvironmentBuilder {
    document: SchemaDocument,
    config: EnvironmentConfig,
}

impl EnvironmentBuilder {
    pub fn new(document: SchemaDocument) -> Self {
        Self {
            document,
            config: EnvironmentConfig::default(),
        }
    }

    pub fn from_sdl(source: &str) -> Result<Self> {
        Ok(Self::new(costql_syntax::parse_schema(source)?))
    }

    /// Adds the definitions of another schema source.
    pub fn with_document(mut self, document: SchemaDocument) -> Self {
        self.document.merge(document);
        self
    }

    pub fn with_config(mut self, config: EnvironmentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cost_directive(mut self, name: impl Into<String>) -> Self {
        self.config.cost_directive = name.into();
        self
    }

    pub fn with_free_directive(mut self, name: impl Into<String>) -> Self {
        self.config.free_directive = name.into();
        self
    }

    pub fn with_resource_directive(mut self, name: impl Into<String>) -> Self {
        self.config.resource_directive = name.into();
        self
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    pub fn build(self) -> Result<Environment> {
        let EnvironmentBuilder { document, config } = self;

        let mut build = Build::new(&config);
        build.register_builtins();
        build.register_types(&document)?;
        build.apply_extensions(&document)?;
        build.declare_type_costs()?;
        build.relate_types()?;
        build.close_types()?;
        build.discover_fields()?;
        build.relate_fields();
        build.inherit_field_costs();
        build.apply_cardinality_defaults();
        build.apply_pricing_defaults();
        build.resolve_joins();
        let roots = build.resolve_roots(&document)?;

        let Build {
            types,
            fields,
            by_name,
            ..
        } = build;
        tracing::debug!(types = types.len(), fields = fields.len(), "environment built");

        Ok(Environment {
            types,
            fields,
            by_name,
            roots,
            config,
        })
    }
}

struct Build<'d> {
    config: &'d EnvironmentConfig,
    types: Vec<OutputType>,
    fields: Vec<FieldModel>,
    by_name: IndexMap<String, TypeId>,
    /// Definition followed by its extensions, per type.
    sources: Vec<Vec<&'d TypeDefinition>>,
    type_costs: Vec<DeclaredCost>,
    marked_resource: Vec<bool>,
    /// Directives of every declaration of a field, in source order.
    field_directives: Vec<Vec<&'d Directive>>,
    field_costs: Vec<DeclaredCost>,
}

impl<'d> Build<'d> {
    fn new(config: &'d EnvironmentConfig) -> Self {
        Self {
            config,
            types: Vec::new(),
            fields: Vec::new(),
            by_name: IndexMap::new(),
            sources: Vec::new(),
            type_costs: Vec::new(),
            marked_resource: Vec::new(),
            field_directives: Vec::new(),
            field_costs: Vec::new(),
        }
    }

    fn add_type(&mut self, name: &str, kind: TypeKind, builtin: bool) -> TypeId {
        let id = TypeId::new(self.types.len());
        self.types.push(OutputType::new(id, name, kind, builtin));
        self.sources.push(Vec::new());
        self.by_name.insert(name.to_owned(), id);
        id
    }

    fn lookup(&self, name: &str, referrer: &str) -> Result<TypeId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownType {
                name: name.to_owned(),
                referrer: referrer.to_owned(),
            })
    }

    fn register_builtins(&mut self) {
        for name in BUILTIN_SCALARS {
            self.add_type(name, TypeKind::Scalar, true);
        }
    }

    fn register_types(&mut self, document: &'d SchemaDocument) -> Result<()> {
        for definition in &document.definitions {
            let TypeSystemDefinition::Type(def) = definition else {
                continue;
            };
            let Some(kind) = TypeKind::from_definition(def.kind) else {
                continue;
            };
            let id = match self.by_name.get(&def.name) {
                // Redeclaring a built-in scalar only adds directives.
                Some(&id) if kind == TypeKind::Scalar && self.types[id.index()].builtin => id,
                Some(_) => return Err(Error::DuplicateType(def.name.clone())),
                None => self.add_type(&def.name, kind, false),
            };
            self.sources[id.index()].push(def);
        }
        tracing::debug!(types = self.types.len(), "registered types");
        Ok(())
    }

    fn apply_extensions(&mut self, document: &'d SchemaDocument) -> Result<()> {
        let mut applied = 0usize;
        for definition in &document.definitions {
            let TypeSystemDefinition::TypeExtension(ext) = definition else {
                continue;
            };
            let Some(kind) = TypeKind::from_definition(ext.kind) else {
                continue;
            };
            let Some(&id) = self.by_name.get(&ext.name) else {
                return Err(Error::UnresolvedExtension {
                    name: ext.name.clone(),
                    reason: "no such type".to_owned(),
                });
            };
            let declared = self.types[id.index()].kind;
            if declared != kind {
                return Err(Error::UnresolvedExtension {
                    name: ext.name.clone(),
                    reason: format!("it is declared as {}, not {}", declared.keyword(), kind.keyword()),
                });
            }
            self.sources[id.index()].push(ext);
            applied += 1;
        }
        tracing::debug!(extensions = applied, "applied extensions");
        Ok(())
    }

    fn declare_type_costs(&mut self) -> Result<()> {
        for (ty, sources) in self.types.iter().zip(&self.sources) {
            let directives: Vec<&Directive> = sources
                .iter()
                .flat_map(|def| def.directives.iter())
                .collect();
            self.type_costs.push(DeclaredCost::parse(
                &ty.name,
                directives.iter().copied(),
                self.config,
            )?);
            self.marked_resource.push(
                directives
                    .iter()
                    .any(|d| d.name == self.config.resource_directive),
            );
        }
        Ok(())
    }

    fn link(&mut self, special: TypeId, general: TypeId) {
        self.types[special.index()].direct_generalizations.insert(general);
        self.types[general.index()].direct_specializations.insert(special);
    }

    fn relate_types(&mut self) -> Result<()> {
        let mut edges = 0usize;
        for i in 0..self.types.len() {
            let id = TypeId::new(i);
            let is_union = self.types[i].kind == TypeKind::Union;
            for def in self.sources[i].clone() {
                for name in &def.implements {
                    let general = self.lookup(name, &self.types[i].name)?;
                    self.link(id, general);
                    edges += 1;
                }
                if is_union {
                    for name in &def.members {
                        let member = self.lookup(name, &self.types[i].name)?;
                        self.link(member, id);
                        edges += 1;
                    }
                }
            }
        }
        tracing::debug!(edges, "linked direct relations");
        Ok(())
    }

    fn cyclic(&self, id: TypeId) -> Error {
        Error::CyclicInheritance(self.types[id.index()].name.clone())
    }

    fn close_types(&mut self) -> Result<()> {
        let up: Vec<IndexSet<TypeId>> = self
            .types
            .iter()
            .map(|t| t.direct_generalizations.clone())
            .collect();
        let down: Vec<IndexSet<TypeId>> = self
            .types
            .iter()
            .map(|t| t.direct_specializations.clone())
            .collect();
        let all_up = transitive_closure(&up).map_err(|id| self.cyclic(id))?;
        let all_down = transitive_closure(&down).map_err(|id| self.cyclic(id))?;

        let kinds: Vec<TypeKind> = self.types.iter().map(|t| t.kind).collect();
        for (ty, (up, down)) in self.types.iter_mut().zip(all_up.into_iter().zip(all_down)) {
            ty.assignable_to = std::iter::once(ty.id).chain(up.iter().copied()).collect();
            ty.assignable_from = std::iter::once(ty.id).chain(down.iter().copied()).collect();
            ty.object_types = ty
                .assignable_from
                .iter()
                .copied()
                .filter(|id| kinds[id.index()] == TypeKind::Object)
                .collect();
            ty.resource = self.marked_resource[ty.id.index()]
                || up.iter().any(|g| self.marked_resource[g.index()]);
            ty.all_generalizations = up;
            ty.all_specializations = down;
        }
        tracing::debug!(types = self.types.len(), "closed type relations");
        Ok(())
    }

    fn discover_fields(&mut self) -> Result<()> {
        for i in 0..self.types.len() {
            if !self.types[i].kind.has_fields() {
                continue;
            }
            for def in self.sources[i].clone() {
                for field in &def.fields {
                    // A later declaration of the same field only adds directives.
                    if let Some(existing) = self.types[i].field(&field.name) {
                        self.field_directives[existing.index()].extend(field.directives.iter());
                        continue;
                    }
                    let referrer = format!("{}.{}", self.types[i].name, field.name);
                    let target = self.lookup(field.ty.name(), &referrer)?;
                    let id = FieldId::new(self.fields.len());
                    let model = FieldModel::new(id, &self.types[i], &field.name, target, field.ty.clone());
                    self.fields.push(model);
                    self.field_directives.push(field.directives.iter().collect());
                    self.types[i].fields.insert(field.name.clone(), id);
                }
            }
        }

        for (field, directives) in self.fields.iter_mut().zip(&self.field_directives) {
            field.options = self.types[field.target.index()]
                .object_types
                .iter()
                .map(|&option| (option, 1.0))
                .collect();
            self.field_costs.push(DeclaredCost::parse(
                &field.qualified_name,
                directives.iter().copied(),
                self.config,
            )?);
        }
        tracing::debug!(fields = self.fields.len(), "discovered fields");
        Ok(())
    }

    fn relate_fields(&mut self) {
        for i in 0..self.fields.len() {
            let container = &self.types[self.fields[i].container.index()];
            let name = self.fields[i].name.as_str();
            let direct_up = same_named(&self.types, &container.direct_generalizations, name);
            let direct_down = same_named(&self.types, &container.direct_specializations, name);
            let all_up = same_named(&self.types, &container.all_generalizations, name);
            let all_down = same_named(&self.types, &container.all_specializations, name);

            let field = &mut self.fields[i];
            field.direct_generalizations = direct_up;
            field.direct_specializations = direct_down;
            field.all_generalizations = all_up;
            field.all_specializations = all_down;
        }
    }

    /// Undeclared `q`, pricing, `shared` and `always` come from the nearest
    /// generalization field that declares them.
    fn inherit_field_costs(&mut self) {
        let declared = self.field_costs.clone();
        for (field, cost) in self.fields.iter().zip(self.field_costs.iter_mut()) {
            let parents = field
                .direct_generalizations
                .iter()
                .chain(&field.all_generalizations);
            for parent in parents {
                let parent = &declared[parent.index()];
                cost.cardinality = cost.cardinality.or(parent.cardinality);
                cost.pricing = cost.pricing.or(parent.pricing);
                cost.shared = cost.shared.or(parent.shared);
                cost.always = cost.always.or(parent.always);
            }
        }
    }

    fn enum_values(&self, i: usize) -> usize {
        self.sources[i].iter().map(|def| def.values.len()).sum()
    }

    fn apply_cardinality_defaults(&mut self) {
        let (concrete, abstracts): (Vec<usize>, Vec<usize>) =
            (0..self.types.len()).partition(|&i| self.types[i].kind.is_concrete());

        for i in concrete.into_iter().chain(abstracts) {
            let declared = &self.type_costs[i];
            let ty = &self.types[i];
            let cardinality = declared.cardinality.unwrap_or_else(|| match ty.kind {
                TypeKind::Object => cardinality::OBJECT_DEFAULT,
                TypeKind::Scalar => Bounds::ALWAYS_1,
                TypeKind::Enum => cardinality::enum_default(self.enum_values(i)),
                TypeKind::Interface | TypeKind::Union => ty
                    .object_types
                    .iter()
                    .map(|o| self.types[o.index()].cost.cardinality)
                    .sum(),
            });
            let shared = declared.shared;
            let always = declared.always.unwrap_or(false);

            let cost = &mut self.types[i].cost;
            cost.cardinality = cardinality;
            cost.shared = shared;
            cost.always = always;
        }

        for i in 0..self.fields.len() {
            let field = &self.fields[i];
            let declared = &self.field_costs[i];
            let target = &self.types[field.target.index()];
            let shared = declared.shared.or(target.cost.shared);
            let cardinality = declared.cardinality.unwrap_or_else(|| {
                FieldShape {
                    container: self.types[field.container.index()].cost.cardinality,
                    target: target.cost.cardinality,
                    shared: shared.unwrap_or(false),
                }
                .cardinality(&field.ty)
            });
            let always = declared.always.unwrap_or(false);

            let cost = &mut self.fields[i].cost;
            cost.cardinality = cardinality;
            cost.shared = shared;
            cost.always = always;
        }
        tracing::debug!("applied cardinality defaults");
    }

    fn apply_pricing_defaults(&mut self) {
        for (ty, declared) in self.types.iter_mut().zip(&self.type_costs) {
            ty.cost.pricing = declared.pricing.unwrap_or_else(|| {
                let work = if ty.kind.is_leaf() {
                    WorkType::TrivialReturn
                } else {
                    WorkType::InstanceAccess
                };
                StepPricer::per_unit(Price::of(work, Bounds::ALWAYS_1))
            });
        }

        for (field, declared) in self.fields.iter_mut().zip(&self.field_costs) {
            field.cost.pricing = declared.pricing.unwrap_or_else(|| {
                let work = if self.types[field.target.index()].resource {
                    WorkType::EfficientRemoteCall
                } else {
                    WorkType::LocalCall
                };
                StepPricer::per_unit(Price::of(work, Bounds::ALWAYS_1))
            });
        }
        tracing::debug!("applied pricing defaults");
    }

    fn resolve_joins(&mut self) {
        let resolver = JoinResolver {
            types: &self.types,
            fields: &self.fields,
            by_name: &self.by_name,
        };
        let type_joins: Vec<Option<Join>> = self
            .type_costs
            .iter()
            .zip(&self.types)
            .map(|(declared, ty)| {
                let hints = declared.joins.as_ref()?;
                Some(resolver.resolve(&ty.object_types, hints))
            })
            .collect();
        let field_joins: Vec<Option<Join>> = self
            .field_costs
            .iter()
            .zip(&self.fields)
            .map(|(declared, field)| {
                let hints = declared.joins.as_ref()?;
                let target = &self.types[field.target.index()];
                Some(resolver.resolve(&target.object_types, hints))
            })
            .collect();

        let resolved = type_joins.iter().chain(&field_joins).flatten().count();
        for (ty, join) in self.types.iter_mut().zip(type_joins) {
            ty.cost.join = join;
        }
        for (field, join) in self.fields.iter_mut().zip(field_joins) {
            field.cost.join = join;
        }
        tracing::debug!(joins = resolved, "resolved join hints");
    }

    fn resolve_roots(&self, document: &SchemaDocument) -> Result<Roots> {
        let mut declared: IndexMap<OperationKind, &str> = IndexMap::new();
        for definition in &document.definitions {
            let (TypeSystemDefinition::Schema(schema)
            | TypeSystemDefinition::SchemaExtension(schema)) = definition
            else {
                continue;
            };
            for root in &schema.operation_types {
                declared.insert(root.kind, &root.type_name);
            }
        }

        let object = |name: &str| {
            self.by_name
                .get(name)
                .copied()
                .filter(|id| self.types[id.index()].kind == TypeKind::Object)
        };

        let mut roots = Roots::default();
        if declared.is_empty() {
            for (kind, name) in DEFAULT_ROOTS {
                roots.set(kind, object(name));
            }
        } else {
            for (kind, name) in declared {
                let id = object(name).ok_or_else(|| Error::InvalidRootType {
                    kind: kind.keyword(),
                    name: name.to_owned(),
                })?;
                roots.set(kind, Some(id));
            }
        }
        Ok(roots)
    }
}

fn same_named(types: &[OutputType], containers: &IndexSet<TypeId>, name: &str) -> IndexSet<FieldId> {
    containers
        .iter()
        .filter_map(|id| types[id.index()].field(name))
        .collect()
}
