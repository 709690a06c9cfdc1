#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Bounded cost arithmetic.
//!
//! Everything the pricing engine knows about quantities is expressed as a
//! [`Bounds`]: a four-point summary (minimum, average, 95th percentile,
//! maximum) of a distribution. Costs are vectors of bounds indexed by
//! [`WorkType`], and a [`Pricer`] turns a quantity into such a vector.

mod bounds;
mod partial;
mod price;
mod pricer;
mod work_type;

#[cfg(test)]
mod price_tests;

pub use bounds::Bounds;
pub use partial::PartialBounds;
pub use price::Price;
pub use pricer::{Pricer, StepPricer};
pub use work_type::WorkType;

/// Errors raised while constructing bounds from explicit values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoundsError {
    #[error("bounds must satisfy min <= avg <= p95 <= max, got ({min}, {avg}, {p95}, {max})")]
    Unordered { min: f64, avg: f64, p95: f64, max: f64 },

    #[error("bounds must be finite, got ({min}, {avg}, {p95}, {max})")]
    NotFinite { min: f64, avg: f64, p95: f64, max: f64 },

    /// `const` was combined with one of `min`, `avg`, `p95`, `max`.
    #[error("a constant cannot be specified together with min, avg, p95 or max")]
    Ambiguous,
}
