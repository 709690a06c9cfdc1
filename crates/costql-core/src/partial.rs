//! Completion of partially specified bounds.
//!
//! Schema authors rarely know all four points of a distribution. Missing
//! points are interpolated off a power curve anchored at the given ones:
//! the average is assumed to sit at the 50% mark and the 95th percentile at
//! the 95% mark of the `[min, max]` span, after a shared exponent `γ` is
//! fitted to whatever was specified.

use crate::{Bounds, BoundsError};

/// Bounds as written by a user: any subset of the four points, or a constant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialBounds {
    pub constant: Option<f64>,
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub p95: Option<f64>,
    pub max: Option<f64>,
}

impl PartialBounds {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fills in the missing points.
    ///
    /// Returns `Ok(None)` when none of `avg`, `p95` or `max` is known; the
    /// caller falls back to its own default in that case.
    pub fn complete(&self) -> Result<Option<Bounds>, BoundsError> {
        if let Some(c) = self.constant {
            if self.min.is_some() || self.avg.is_some() || self.p95.is_some() || self.max.is_some() {
                return Err(BoundsError::Ambiguous);
            }
            return Bounds::constant(c).map(Some);
        }

        let min = self.min.unwrap_or(0.0);

        let (avg, p95, max) = match (self.avg, self.p95, self.max) {
            (avg, Some(p95), Some(max)) => {
                let avg = avg.unwrap_or_else(|| {
                    let span = max - min;
                    let gamma = log_0_95((p95 - min) / span);
                    0.5_f64.powf(gamma) * span + min
                });
                (avg, p95, max)
            }
            (avg, None, Some(max)) => {
                let p95 = (max - min) * 0.95 + min;
                let avg = avg.unwrap_or((max - min) * 0.5 + min);
                (avg, p95, max)
            }
            (Some(avg), Some(p95), None) => {
                let gamma = log_1_9(p95 / avg);
                let max = p95 / 0.95_f64.powf(gamma) + min;
                (avg, p95, max)
            }
            (None, Some(p95), None) => {
                let max = (p95 - min) / 0.95 + min;
                let avg = (max - min) * 0.5 + min;
                (avg, p95, max)
            }
            (Some(avg), None, None) => {
                let max = avg + (avg - min);
                let p95 = (max - min) * 0.95 + min;
                (avg, p95, max)
            }
            (None, None, None) => return Ok(None),
        };

        Bounds::new(min, avg, p95, max).map(Some)
    }
}

fn log_0_95(x: f64) -> f64 {
    x.ln() / 0.95_f64.ln()
}

fn log_1_9(x: f64) -> f64 {
    x.ln() / 1.9_f64.ln()
}
