use crate::encoded::SlotError;
use crate::primitives::Direction;

/// Per-edge storage of a quantised decimal, owned by the graph builder.
///
/// The slot decides what it can represent; callers round through
/// [`DecimalSlot::next_storable`] before writing and never assume a
/// written value reads back unchanged otherwise.
pub trait DecimalSlot {
    /// Whether the backward direction has storage of its own.
    fn store_two_directions(&self) -> bool;

    /// The largest value the slot can hold.
    fn max_storable(&self) -> f64;

    /// The smallest positive value the slot can hold.
    fn smallest_non_zero(&self) -> f64;

    /// Rounds `value` to the nearest value the slot can hold.
    fn next_storable(&self, value: f64) -> f64;

    /// Stores `value` for one direction of `edge`.
    fn set(&mut self, edge: usize, direction: Direction, value: f64) -> Result<(), SlotError>;

    /// Reads the value of one direction of `edge`, zero when never written.
    fn get(&self, edge: usize, direction: Direction) -> f64;
}
