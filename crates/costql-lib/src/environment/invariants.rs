//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::graph::{FieldId, FieldModel, OutputType, TypeId};

#[inline]
pub fn ensure_type(types: &[OutputType], id: TypeId) -> &OutputType {
    types.get(id.index()).unwrap_or_else(|| {
        panic!(
            "environment: type id {} out of range (ids are only valid for the environment that issued them)",
            id.index()
        )
    })
}

#[inline]
pub fn ensure_field(fields: &[FieldModel], id: FieldId) -> &FieldModel {
    fields.get(id.index()).unwrap_or_else(|| {
        panic!(
            "environment: field id {} out of range (ids are only valid for the environment that issued them)",
            id.index()
        )
    })
}
