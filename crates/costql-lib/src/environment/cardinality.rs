//! Default cardinality derivation.

use costql_core::Bounds;
use costql_syntax::ast::Type;

/// Expected items per element of a list nested inside another list.
pub(crate) const DEFAULT_COLLECTION: Bounds = Bounds::LOW_AVERAGE.scale(100.0);

/// Scaling applied to the ratio of a shared field.
const SHARED_FACTORS: (f64, f64, f64, f64) = (1.0, 3.0, 10.0, 20.0);

/// Instances per object type when nothing is declared.
pub(crate) const OBJECT_DEFAULT: Bounds = Bounds::LOW_AVERAGE.scale(500.0);

/// `(0, max(1, n/10), 0.7n, n)` for an enum of `n` values.
pub(crate) fn enum_default(values: usize) -> Bounds {
    let n = values as f64;
    Bounds::clamp_upward(0.0, (n / 10.0).max(1.0), 0.7 * n, n)
}

/// Values of a field per instance of its container, from the declared shape.
pub(crate) struct FieldShape {
    pub container: Bounds,
    pub target: Bounds,
    pub shared: bool,
}

impl FieldShape {
    pub(crate) fn cardinality(&self, ty: &Type) -> Bounds {
        self.walk(ty, false, false)
    }

    fn walk(&self, ty: &Type, non_null: bool, in_collection: bool) -> Bounds {
        match ty {
            Type::NonNull(inner) => self.walk(inner, true, in_collection),
            Type::List(inner) => {
                let items = self.walk(inner, false, true);
                if in_collection {
                    items.times_bounds(DEFAULT_COLLECTION)
                } else {
                    items
                }
            }
            Type::Named(_) if in_collection => self.ratio(),
            Type::Named(_) if non_null => Bounds::ALWAYS_1,
            Type::Named(_) => Bounds::HIGH_AVERAGE,
        }
    }

    /// Target instances per container instance.
    fn ratio(&self) -> Bounds {
        let s = Bounds::greatest(Bounds::ALWAYS_1, self.container);
        let t = self.target;

        let spread = s.p95() - s.min();
        let p05 = if spread > 0.0 {
            (s.avg() - s.min()).powi(2) / spread + s.min()
        } else {
            s.avg()
        };

        // Ordered for exact arithmetic. When `p05` rounds above `s.avg()` the
        // p95 ratio lands an ulp below the average one and is raised to it.
        let ratio = Bounds::clamp_upward(
            t.min() / s.max(),
            t.avg() / s.avg(),
            t.p95() / p05,
            t.max() / s.min(),
        );
        if self.shared {
            let (min, avg, p95, max) = SHARED_FACTORS;
            ratio.times(min, avg, p95, max)
        } else {
            ratio
        }
    }
}
