use crate::{Bounds, Price};

/// Converts a quantity into a price.
pub trait Pricer {
    fn price(&self, quantity: Bounds) -> Price;

    fn is_free(&self) -> bool;
}

/// `base × ceil(quantity / max_units_per_base), floored at 1` plus `unit × quantity`.
///
/// Without `max_units_per_base` the base is charged exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPricer {
    base: Price,
    unit: Price,
    max_units_per_base: Option<f64>,
}

impl StepPricer {
    pub const FREE: Self = Self {
        base: Price::FREE,
        unit: Price::FREE,
        max_units_per_base: None,
    };

    pub fn new(base: Price, unit: Price, max_units_per_base: Option<f64>) -> Self {
        Self {
            base,
            unit,
            max_units_per_base,
        }
    }

    pub fn per_unit(unit: Price) -> Self {
        Self::new(Price::FREE, unit, None)
    }

    pub fn base(&self) -> Price {
        self.base
    }

    pub fn unit(&self) -> Price {
        self.unit
    }

    pub fn max_units_per_base(&self) -> Option<f64> {
        self.max_units_per_base
    }
}

impl Pricer for StepPricer {
    fn price(&self, quantity: Bounds) -> Price {
        let base = match self.max_units_per_base {
            Some(per_base) => self.base.times_bounds(quantity.ceil_div(per_base, 1.0)),
            None => self.base,
        };
        base.plus(self.unit.times_bounds(quantity))
    }

    fn is_free(&self) -> bool {
        self.base.is_free() && self.unit.is_free()
    }
}
