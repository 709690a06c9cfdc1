use std::fmt::{self, Write};

use indexmap::IndexSet;

use super::Environment;
use crate::graph::TypeId;

impl Environment {
    /// Plain-text listing of the schema's own types and their closed relations.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format_graph(&mut out).expect("String write never fails");
        out
    }

    fn format_graph(&self, w: &mut impl Write) -> fmt::Result {
        for ty in self.types.iter().filter(|t| !t.builtin) {
            write!(w, "{} {}", ty.kind.keyword(), ty.name)?;
            if ty.resource {
                w.write_str(" (resource)")?;
            }
            writeln!(w)?;

            self.format_relation(w, "supertypes", &ty.all_generalizations)?;
            self.format_relation(w, "subtypes", &ty.all_specializations)?;
            if ty.is_abstract() {
                self.format_relation(w, "objects", &ty.object_types)?;
            }
            for id in ty.fields() {
                let field = self.field(id);
                writeln!(w, "  {}: {}", field.name, field.ty)?;
            }
        }
        Ok(())
    }

    fn format_relation(&self, w: &mut impl Write, label: &str, ids: &IndexSet<TypeId>) -> fmt::Result {
        if ids.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = ids.iter().map(|&id| self.ty(id).name()).collect();
        writeln!(w, "  {label}: {}", names.join(", "))
    }
}
