use log::trace;

use crate::encoded::{DecimalSlot, SlotError};
use crate::primitives::Direction;

/// In-memory [`DecimalSlot`] holding `bits`-wide multiples of `factor`.
///
/// Edges are addressed densely from zero; storage grows on write.
#[derive(Debug, Clone)]
pub struct QuantizedSlot {
    bits: u8,
    factor: f64,
    two_directions: bool,
    values: Vec<u32>,
}

impl QuantizedSlot {
    pub const MAX_BITS: u8 = 31;

    pub fn new(bits: u8, factor: f64, two_directions: bool) -> Result<Self, SlotError> {
        if bits == 0 || bits > Self::MAX_BITS || !factor.is_finite() || factor <= 0.0 {
            return Err(SlotError::InvalidLayout { bits, factor });
        }

        Ok(QuantizedSlot {
            bits,
            factor,
            two_directions,
            values: vec![],
        })
    }

    /// Slot for speeds, 5 bits of 5 km/h in both directions.
    pub fn speed() -> Self {
        QuantizedSlot {
            bits: 5,
            factor: 5.0,
            two_directions: true,
            values: vec![],
        }
    }

    /// Slot for priority factors, 8 bits of 0.01 in both directions, so
    /// every [`PriorityCode`](crate::PriorityCode) factor is exact.
    pub fn priority() -> Self {
        QuantizedSlot {
            bits: 8,
            factor: 0.01,
            two_directions: true,
            values: vec![],
        }
    }

    /// The same layout, storing only the forward direction.
    pub fn single_direction(self) -> Self {
        QuantizedSlot {
            two_directions: false,
            values: vec![],
            ..self
        }
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Number of edges with storage.
    pub fn len(&self) -> usize {
        self.values.len() / self.stride()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    fn stride(&self) -> usize {
        if self.two_directions {
            2
        } else {
            1
        }
    }

    #[inline]
    fn max_raw(&self) -> u32 {
        (1u32 << self.bits) - 1
    }

    fn index(&self, edge: usize, direction: Direction) -> usize {
        match (self.two_directions, direction) {
            (true, Direction::Backward) => edge * 2 + 1,
            (true, Direction::Forward) => edge * 2,
            (false, _) => edge,
        }
    }
}

impl DecimalSlot for QuantizedSlot {
    fn store_two_directions(&self) -> bool {
        self.two_directions
    }

    fn max_storable(&self) -> f64 {
        self.max_raw() as f64 * self.factor
    }

    fn smallest_non_zero(&self) -> f64 {
        self.factor
    }

    fn next_storable(&self, value: f64) -> f64 {
        if value.is_nan() || value <= 0.0 {
            return 0.0;
        }

        let raw = (value / self.factor).round().min(self.max_raw() as f64);
        raw * self.factor
    }

    fn set(&mut self, edge: usize, direction: Direction, value: f64) -> Result<(), SlotError> {
        if direction.is_reverse() && !self.two_directions {
            return Err(SlotError::NoStorage { edge, direction });
        }

        let max = self.max_storable();
        // Half a step of slack so that products like 3 * 0.1 still store.
        if !value.is_finite() || value < 0.0 || value > max + self.factor / 2.0 {
            return Err(SlotError::OutOfRange { value, max });
        }

        let raw = ((value / self.factor).round() as u32).min(self.max_raw());
        let index = self.index(edge, direction);
        if index >= self.values.len() {
            self.values.resize((edge + 1) * self.stride(), 0);
        }

        trace!("Storing {value} as {raw} x {} on edge {edge} {direction}", self.factor);
        self.values[index] = raw;
        Ok(())
    }

    fn get(&self, edge: usize, direction: Direction) -> f64 {
        let direction = if self.two_directions {
            direction
        } else {
            Direction::Forward
        };

        self.values
            .get(self.index(edge, direction))
            .map_or(0.0, |raw| *raw as f64 * self.factor)
    }
}
