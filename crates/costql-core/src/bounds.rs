//! Four-point statistical summaries and their algebra.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use serde::Serialize;

use crate::BoundsError;

/// Minimum, average, 95th percentile and maximum of a quantity.
///
/// Always ordered `min <= avg <= p95 <= max`. Values coming from user input
/// go through [`Bounds::new`]; the arithmetic below preserves the ordering as
/// long as every factor involved is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    min: f64,
    avg: f64,
    p95: f64,
    max: f64,
}

impl Bounds {
    pub const ALWAYS_0: Self = Self::raw(0.0, 0.0, 0.0, 0.0);
    pub const LOW_AVERAGE: Self = Self::raw(0.0, 0.1, 0.5, 1.0);
    pub const LINEAR_0_TO_1: Self = Self::raw(0.0, 0.5, 0.95, 1.0);
    pub const HIGH_AVERAGE: Self = Self::raw(0.0, 0.9, 0.99, 1.0);
    pub const ALWAYS_1: Self = Self::raw(1.0, 1.0, 1.0, 1.0);

    pub fn new(min: f64, avg: f64, p95: f64, max: f64) -> Result<Self, BoundsError> {
        if ![min, avg, p95, max].iter().all(|v| v.is_finite()) {
            return Err(BoundsError::NotFinite { min, avg, p95, max });
        }
        if avg < min || p95 < avg || max < p95 {
            return Err(BoundsError::Unordered { min, avg, p95, max });
        }
        Ok(Self::raw(min, avg, p95, max))
    }

    /// All four points equal to `value`.
    pub fn constant(value: f64) -> Result<Self, BoundsError> {
        Self::new(value, value, value, value)
    }

    const fn raw(min: f64, avg: f64, p95: f64, max: f64) -> Self {
        Self { min, avg, p95, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn avg(&self) -> f64 {
        self.avg
    }

    pub fn p95(&self) -> f64 {
        self.p95
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_always_zero(&self) -> bool {
        *self == Self::ALWAYS_0
    }

    pub fn plus(self, other: Self) -> Self {
        Self::raw(
            self.min + other.min,
            self.avg + other.avg,
            self.p95 + other.p95,
            self.max + other.max,
        )
    }

    pub const fn scale(self, factor: f64) -> Self {
        self.times(factor, factor, factor, factor)
    }

    /// Multiplies each point by its own factor.
    pub const fn times(self, min: f64, avg: f64, p95: f64, max: f64) -> Self {
        Self::raw(self.min * min, self.avg * avg, self.p95 * p95, self.max * max)
    }

    pub fn times_bounds(self, other: Self) -> Self {
        self.times(other.min, other.avg, other.p95, other.max)
    }

    pub fn floor_div(self, denominator: f64) -> Self {
        Self::raw(
            (self.min / denominator).floor(),
            (self.avg / denominator).floor(),
            (self.p95 / denominator).floor(),
            (self.max / denominator).floor(),
        )
    }

    /// Pointwise `max(ceil(x / denominator), floor)`.
    pub fn ceil_div(self, denominator: f64, floor: f64) -> Self {
        let step = |v: f64| (v / denominator).ceil().max(floor);
        Self::raw(step(self.min), step(self.avg), step(self.p95), step(self.max))
    }

    /// Pointwise minimum, re-clamped from the top down.
    pub fn least(a: Self, b: Self) -> Self {
        let max = a.max.min(b.max);
        let p95 = a.p95.min(b.p95).min(max);
        let avg = a.avg.min(b.avg).min(p95);
        let min = a.min.min(b.min).min(avg);
        Self::raw(min, avg, p95, max)
    }

    /// Pointwise maximum, re-clamped from the bottom up.
    pub fn greatest(a: Self, b: Self) -> Self {
        let min = a.min.max(b.min);
        let avg = a.avg.max(b.avg).max(min);
        let p95 = a.p95.max(b.p95).max(avg);
        let max = a.max.max(b.max).max(p95);
        Self::raw(min, avg, p95, max)
    }

    /// Builds bounds from derived values, raising each point to at least its
    /// predecessor. Used where rounding could otherwise break the ordering.
    pub fn clamp_upward(min: f64, avg: f64, p95: f64, max: f64) -> Self {
        let avg = avg.max(min);
        let p95 = p95.max(avg);
        let max = max.max(p95);
        Self::raw(min, avg, p95, max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::ALWAYS_0
    }
}

impl Add for Bounds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl AddAssign for Bounds {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.plus(rhs);
    }
}

impl Mul<f64> for Bounds {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Mul for Bounds {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.times_bounds(rhs)
    }
}

impl Sum for Bounds {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ALWAYS_0, Self::plus)
    }
}

impl<'a> Sum<&'a Bounds> for Bounds {
    fn sum<I: Iterator<Item = &'a Bounds>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
