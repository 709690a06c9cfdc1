//! Batched-fetch hints.
//!
//! A [`Join`] names the fields whose values arrive together with their
//! parent, and recursively which of their own fields do. A joined element is
//! priced as a bulk gather instead of a standalone fetch.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::graph::FieldId;

/// Recursive field to sub-join mapping.
///
/// An empty join still means "joined": the element itself is fetched in
/// bulk, none of its fields are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Join {
    fields: IndexMap<FieldId, Join>,
}

impl Join {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldId) -> Option<&Join> {
        self.fields.get(&field)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &Join)> {
        self.fields.iter().map(|(&id, join)| (id, join))
    }

    /// Joins `field`, merging `sub` into whatever was already joined under it.
    pub fn join_field(&mut self, field: FieldId, sub: Join) {
        match self.fields.entry(field) {
            Entry::Occupied(mut existing) => existing.get_mut().incorporate(sub),
            Entry::Vacant(slot) => {
                slot.insert(sub);
            }
        }
    }

    /// Recursive union.
    pub fn incorporate(&mut self, other: Join) {
        for (field, sub) in other.fields {
            self.join_field(field, sub);
        }
    }
}
