//! Pricing a request document against an environment.

use costql_core::{Bounds, Price, Pricer, WorkType};
use costql_syntax::ast::{
    ExecutableDefinition, ExecutableDocument, Field, FragmentDefinition, OperationDefinition,
    Selection, SelectionSet,
};
use indexmap::IndexMap;

use crate::environment::Environment;
use crate::graph::{FieldId, FieldModel, OutputType, TypeId};
use crate::invoice::Invoice;
use crate::join::Join;
use crate::{Error, Result};

/// Field nodes merged under one field, then under one response key.
type Groups<'r> = IndexMap<FieldId, IndexMap<&'r str, Vec<&'r Field>>>;

/// A request document bound to the environment it is priced against.
#[derive(Debug)]
pub struct Request<'env> {
    env: &'env Environment,
    operations: Vec<OperationDefinition>,
    fragments: IndexMap<String, Vec<FragmentDefinition>>,
}

impl<'env> Request<'env> {
    /// Fails on spreads of undefined fragments and on fragments that spread
    /// themselves, directly or not.
    pub fn new(env: &'env Environment, document: ExecutableDocument) -> Result<Self> {
        let mut operations = Vec::new();
        let mut fragments: IndexMap<String, Vec<FragmentDefinition>> = IndexMap::new();
        for definition in document.definitions {
            match definition {
                ExecutableDefinition::Operation(op) => operations.push(op),
                ExecutableDefinition::Fragment(fragment) => {
                    fragments.entry(fragment.name.clone()).or_default().push(fragment)
                }
            }
        }

        let request = Self {
            env,
            operations,
            fragments,
        };
        request.check_spreads()?;
        Ok(request)
    }

    pub fn environment(&self) -> &'env Environment {
        self.env
    }

    pub fn operations(&self) -> &[OperationDefinition] {
        &self.operations
    }

    /// Every definition named `name`, in document order.
    pub fn fragments(&self, name: &str) -> &[FragmentDefinition] {
        self.fragments.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Sum over all operations, each priced from its root at quantity one.
    #[tracing::instrument(level = "debug", skip_all, fields(operations = self.operations.len()))]
    pub fn invoice(&self) -> Result<Invoice> {
        let mut invoice = Invoice::new();
        for op in &self.operations {
            let root = self
                .env
                .root(op.kind)
                .ok_or_else(|| Error::UnrecognizedOperation(op.kind.keyword().to_owned()))?;
            invoice += self.invoice_type(root, None, Bounds::ALWAYS_1, &[&op.selection_set])?;
        }
        tracing::debug!(
            resources = invoice.resource_costs().len(),
            parts = invoice.part_costs().len(),
            fields = invoice.field_costs().len(),
            "invoiced"
        );
        Ok(invoice)
    }

    fn invoice_type<'r>(
        &'r self,
        ty: &OutputType,
        join: Option<&Join>,
        quantity: Bounds,
        sets: &[&'r SelectionSet],
    ) -> Result<Invoice> {
        let mut invoice = Invoice::new();
        let price = if ty.is_free() {
            Price::of(WorkType::InstanceAccess, quantity)
        } else if join.is_some() {
            joined_price(quantity)
        } else {
            ty.cost().pricing().price(quantity)
        };
        invoice.add_type_cost(ty, price);

        let mut groups = Groups::new();
        for set in sets {
            self.collect(ty, set, &mut groups)?;
        }

        let context = ty.cost().join().or(join);
        for (field, by_key) in &groups {
            let field = self.env.field(*field);
            let nested = context.and_then(|j| j.get(field.id()));
            for nodes in by_key.values() {
                invoice += self.invoice_field(field, nested, quantity, nodes)?;
            }
        }
        Ok(invoice)
    }

    fn invoice_field(
        &self,
        field: &FieldModel,
        nested: Option<&Join>,
        quantity: Bounds,
        nodes: &[&Field],
    ) -> Result<Invoice> {
        let mut invoice = Invoice::new();
        if !field.is_free() {
            let price = match nested {
                Some(_) => joined_price(quantity),
                None => field.cost().pricing().price(quantity),
            };
            invoice.add_field_cost(field.id(), price);
        }

        let options = field.options();
        if options.is_empty() {
            return Ok(invoice);
        }

        let downstream = field.cost().join().or(nested);
        let sets: Vec<&SelectionSet> = nodes.iter().map(|node| &node.selection_set).collect();
        let total_weight = field.total_weight();
        let per_parent = field.cardinality().times_bounds(quantity);
        for (&option, &weight) in options {
            let option_quantity = per_parent.scale(weight / total_weight);
            invoice += self.invoice_type(self.env.ty(option), downstream, option_quantity, &sets)?;
        }
        Ok(invoice)
    }

    /// Merges the selections applying to `ty` into `groups`.
    fn collect<'r>(&'r self, ty: &OutputType, set: &'r SelectionSet, groups: &mut Groups<'r>) -> Result<()> {
        for selection in &set.selections {
            match selection {
                Selection::Field(node) => {
                    if node.name.starts_with("__") {
                        continue;
                    }
                    let id = ty.field(&node.name).ok_or_else(|| Error::UnknownField {
                        type_name: ty.name().to_owned(),
                        field: node.name.clone(),
                    })?;
                    let key = if self.env.field(id).cost().always_recomputed() {
                        node.response_key()
                    } else {
                        node.name.as_str()
                    };
                    groups
                        .entry(id)
                        .or_default()
                        .entry(key)
                        .or_default()
                        .push(node);
                }
                Selection::InlineFragment(fragment) => {
                    // Typed inline fragments apply to their exact type only.
                    let applies = match &fragment.type_condition {
                        Some(condition) => {
                            let condition = self.condition(condition, ty)?;
                            condition == ty.id() && ty.is(condition)
                        }
                        None => true,
                    };
                    if applies {
                        self.collect(ty, &fragment.selection_set, groups)?;
                    }
                }
                Selection::FragmentSpread(spread) => {
                    let definitions = self
                        .fragments
                        .get(&spread.name)
                        .ok_or_else(|| Error::UnknownFragment(spread.name.clone()))?;
                    for fragment in definitions {
                        if ty.is(self.condition(&fragment.type_condition, ty)?) {
                            self.collect(ty, &fragment.selection_set, groups)?;
                        }
                    }
                }
                _ => return Err(Error::UnsupportedSelection(ty.name().to_owned())),
            }
        }
        Ok(())
    }

    fn condition(&self, name: &str, ty: &OutputType) -> Result<TypeId> {
        self.env.type_id(name).ok_or_else(|| Error::UnknownType {
            name: name.to_owned(),
            referrer: ty.name().to_owned(),
        })
    }

    fn check_spreads(&self) -> Result<()> {
        let mut state = IndexMap::new();
        for op in &self.operations {
            let mut names = Vec::new();
            spreads(&op.selection_set, &mut names);
            for name in names {
                self.visit_fragment(name, &mut state)?;
            }
        }
        for name in self.fragments.keys() {
            self.visit_fragment(name, &mut state)?;
        }
        Ok(())
    }

    /// `state[name]` is false while `name` is being expanded.
    fn visit_fragment<'r>(&'r self, name: &'r str, state: &mut IndexMap<&'r str, bool>) -> Result<()> {
        match state.get(name) {
            Some(true) => return Ok(()),
            Some(false) => return Err(Error::FragmentCycle(name.to_owned())),
            None => {}
        }
        let definitions = self
            .fragments
            .get(name)
            .ok_or_else(|| Error::UnknownFragment(name.to_owned()))?;

        state.insert(name, false);
        for fragment in definitions {
            let mut names = Vec::new();
            spreads(&fragment.selection_set, &mut names);
            for next in names {
                self.visit_fragment(next, state)?;
            }
        }
        state.insert(name, true);
        Ok(())
    }
}

/// Bulk gather plus the instance accesses it still implies.
fn joined_price(quantity: Bounds) -> Price {
    Price::of(WorkType::BulkJoin, quantity).plus(Price::of(WorkType::InstanceAccess, quantity))
}

/// Fragment names spread anywhere below `set`.
fn spreads<'a>(set: &'a SelectionSet, out: &mut Vec<&'a str>) {
    for selection in &set.selections {
        match selection {
            Selection::Field(field) => spreads(&field.selection_set, out),
            Selection::InlineFragment(fragment) => spreads(&fragment.selection_set, out),
            Selection::FragmentSpread(spread) => out.push(&spread.name),
            _ => {}
        }
    }
}
