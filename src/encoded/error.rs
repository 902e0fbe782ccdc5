use std::fmt;

use crate::primitives::Direction;

#[derive(Debug, Clone, PartialEq)]
pub enum SlotError {
    /// The value is negative, not finite, or above the largest storable value.
    OutOfRange { value: f64, max: f64 },
    /// The slot stores a single direction and cannot take this one.
    NoStorage { edge: usize, direction: Direction },
    /// A slot layout that cannot hold any positive value.
    InvalidLayout { bits: u8, factor: f64 },
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotError::OutOfRange { value, max } => {
                write!(f, "value {value} is outside the storable range [0, {max}]")
            }
            SlotError::NoStorage { edge, direction } => {
                write!(f, "edge {edge} has no {direction} storage")
            }
            SlotError::InvalidLayout { bits, factor } => {
                write!(f, "invalid slot layout of {bits} bits with factor {factor}")
            }
        }
    }
}

impl std::error::Error for SlotError {}
