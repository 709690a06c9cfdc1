//! Aggregated cost of a request.

use std::ops::{Add, AddAssign, Mul};

use costql_core::{Bounds, Price};
use indexmap::IndexMap;

use crate::graph::{FieldId, OutputType, TypeId};

/// Prices keyed by the element they were charged for.
///
/// Types marked as resources (directly or through a generalization) are
/// kept apart from the other "part" types. Merging invoices adds the
/// prices of shared keys. Equality does not depend on insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invoice {
    resource_costs: IndexMap<TypeId, Price>,
    part_costs: IndexMap<TypeId, Price>,
    field_costs: IndexMap<FieldId, Price>,
}

fn accumulate<K: std::hash::Hash + Eq>(map: &mut IndexMap<K, Price>, key: K, price: Price) {
    map.entry(key)
        .and_modify(|existing| *existing += price)
        .or_insert(price);
}

impl Invoice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type_cost(&mut self, ty: &OutputType, price: Price) {
        let map = if ty.is_resource() {
            &mut self.resource_costs
        } else {
            &mut self.part_costs
        };
        accumulate(map, ty.id(), price);
    }

    pub fn add_field_cost(&mut self, field: FieldId, price: Price) {
        accumulate(&mut self.field_costs, field, price);
    }

    pub fn resource_costs(&self) -> &IndexMap<TypeId, Price> {
        &self.resource_costs
    }

    pub fn part_costs(&self) -> &IndexMap<TypeId, Price> {
        &self.part_costs
    }

    pub fn field_costs(&self) -> &IndexMap<FieldId, Price> {
        &self.field_costs
    }

    pub fn type_cost(&self, ty: TypeId) -> Option<Price> {
        self.resource_costs
            .get(&ty)
            .or_else(|| self.part_costs.get(&ty))
            .copied()
    }

    pub fn field_cost(&self, field: FieldId) -> Option<Price> {
        self.field_costs.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_costs.is_empty() && self.part_costs.is_empty() && self.field_costs.is_empty()
    }

    /// Sum over every entry.
    pub fn total(&self) -> Price {
        self.resource_costs
            .values()
            .chain(self.part_costs.values())
            .chain(self.field_costs.values())
            .copied()
            .sum()
    }

    /// In-place addition.
    pub fn merge(&mut self, other: &Invoice) {
        for (&ty, &price) in &other.resource_costs {
            accumulate(&mut self.resource_costs, ty, price);
        }
        for (&ty, &price) in &other.part_costs {
            accumulate(&mut self.part_costs, ty, price);
        }
        for (&field, &price) in &other.field_costs {
            accumulate(&mut self.field_costs, field, price);
        }
    }

    pub fn plus(mut self, other: &Invoice) -> Self {
        self.merge(other);
        self
    }

    pub fn times(self, factor: Price) -> Self {
        self.map(|p| p.times(factor))
    }

    pub fn times_bounds(self, factor: Bounds) -> Self {
        self.map(|p| p.times_bounds(factor))
    }

    pub fn scale(self, factor: f64) -> Self {
        self.map(|p| p.scale(factor))
    }

    fn map(mut self, f: impl Fn(Price) -> Price) -> Self {
        let prices = self
            .resource_costs
            .values_mut()
            .chain(self.part_costs.values_mut())
            .chain(self.field_costs.values_mut());
        for price in prices {
            *price = f(*price);
        }
        self
    }
}

impl Add for Invoice {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(&rhs)
    }
}

impl AddAssign for Invoice {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

impl AddAssign<&Invoice> for Invoice {
    fn add_assign(&mut self, rhs: &Invoice) {
        self.merge(rhs);
    }
}

impl Mul<Price> for Invoice {
    type Output = Self;

    fn mul(self, rhs: Price) -> Self {
        self.times(rhs)
    }
}

impl Mul<Bounds> for Invoice {
    type Output = Self;

    fn mul(self, rhs: Bounds) -> Self {
        self.times_bounds(rhs)
    }
}

impl Mul<f64> for Invoice {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}
