//! Cost vectors: one [`Bounds`] per [`WorkType`].

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{Bounds, WorkType};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price {
    slots: [Bounds; WorkType::COUNT],
}

impl Price {
    pub const FREE: Self = Self {
        slots: [Bounds::ALWAYS_0; WorkType::COUNT],
    };

    /// A price with `bounds` in the `work` slot and zero elsewhere.
    pub fn of(work: WorkType, bounds: Bounds) -> Self {
        Self::FREE.with(work, bounds)
    }

    pub fn from_slots(slots: [Bounds; WorkType::COUNT]) -> Self {
        Self { slots }
    }

    pub fn get(&self, work: WorkType) -> Bounds {
        self.slots[work.index()]
    }

    pub fn with(mut self, work: WorkType, bounds: Bounds) -> Self {
        self.slots[work.index()] = bounds;
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (WorkType, Bounds)> + '_ {
        WorkType::ALL.into_iter().zip(self.slots.iter().copied())
    }

    pub fn is_free(&self) -> bool {
        self.slots.iter().all(Bounds::is_always_zero)
    }

    pub fn plus(self, other: Self) -> Self {
        self.zip_with(other, Bounds::plus)
    }

    /// Slot-by-slot product.
    pub fn times(self, other: Self) -> Self {
        self.zip_with(other, Bounds::times_bounds)
    }

    /// Multiplies every slot by the same bounds.
    pub fn times_bounds(self, factor: Bounds) -> Self {
        self.map(|b| b.times_bounds(factor))
    }

    pub fn scale(self, factor: f64) -> Self {
        self.map(|b| b.scale(factor))
    }

    fn map(mut self, f: impl Fn(Bounds) -> Bounds) -> Self {
        for slot in &mut self.slots {
            *slot = f(*slot);
        }
        self
    }

    fn zip_with(mut self, other: Self, f: impl Fn(Bounds, Bounds) -> Bounds) -> Self {
        for (slot, rhs) in self.slots.iter_mut().zip(other.slots) {
            *slot = f(*slot, rhs);
        }
        self
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::FREE
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.plus(rhs);
    }
}

impl Mul<f64> for Price {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Mul<Bounds> for Price {
    type Output = Self;

    fn mul(self, rhs: Bounds) -> Self {
        self.times_bounds(rhs)
    }
}

impl Mul for Price {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.times(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::FREE, Self::plus)
    }
}

/// Serialized as a map keyed by work type id, e.g. `{"access": {...}, ...}`.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WorkType::COUNT))?;
        for (work, bounds) in self.iter() {
            map.serialize_entry(work.id(), &bounds)?;
        }
        map.end()
    }
}
