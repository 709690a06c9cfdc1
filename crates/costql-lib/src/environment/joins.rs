//! Resolving `joins` hints against the finished type graph.
//!
//! Unknown type and field names inside a hint are skipped, not reported.

use indexmap::{IndexMap, IndexSet};

use crate::cost::JoinHint;
use crate::graph::{FieldModel, OutputType, TypeId};
use crate::join::Join;

pub(crate) struct JoinResolver<'a> {
    pub types: &'a [OutputType],
    pub fields: &'a [FieldModel],
    pub by_name: &'a IndexMap<String, TypeId>,
}

impl JoinResolver<'_> {
    /// Merges every hint, each applied to its own focus within `possible`.
    pub(crate) fn resolve(&self, possible: &IndexSet<TypeId>, hints: &[JoinHint]) -> Join {
        let mut join = Join::new();
        for hint in hints {
            self.apply(&mut join, possible, hint);
        }
        join
    }

    fn apply(&self, join: &mut Join, possible: &IndexSet<TypeId>, hint: &JoinHint) {
        let filter = hint.types.as_deref();
        let focused = self.focus(possible, filter);
        if focused.is_empty() {
            return;
        }

        if hint.auto_depth > 0 {
            join.incorporate(self.auto_join(&focused, filter, hint.auto_depth));
        }

        for &ty in &focused {
            for name in &hint.fields {
                let Some(field) = self.types[ty.index()].field(name) else {
                    tracing::trace!(ty = %self.types[ty.index()].name, field = %name, "join hint names no field");
                    continue;
                };
                let target = self.fields[field.index()].target;
                let sub = self.resolve(&self.types[target.index()].object_types, &hint.sub);
                join.join_field(field, sub);
            }
        }
    }

    /// `possible` restricted to the object types of the named types.
    fn focus(&self, possible: &IndexSet<TypeId>, filter: Option<&[String]>) -> IndexSet<TypeId> {
        let Some(names) = filter else {
            return possible.clone();
        };
        let allowed: IndexSet<TypeId> = names
            .iter()
            .filter_map(|name| self.by_name.get(name))
            .flat_map(|id| self.types[id.index()].object_types.iter().copied())
            .collect();
        possible
            .iter()
            .copied()
            .filter(|id| allowed.contains(id))
            .collect()
    }

    /// Joins every leaf-or-to-one field of `focused`, `depth` levels down.
    fn auto_join(&self, focused: &IndexSet<TypeId>, filter: Option<&[String]>, depth: u32) -> Join {
        let mut join = Join::new();
        if depth == 0 {
            return join;
        }

        for &ty in focused {
            for field in self.types[ty.index()].fields() {
                let model = &self.fields[field.index()];
                let target = &self.types[model.target.index()];
                if model.is_to_many() && !target.kind.is_leaf() {
                    continue;
                }
                let next = self.focus(&target.object_types, filter);
                join.join_field(field, self.auto_join(&next, filter, depth - 1));
            }
        }
        join
    }
}
