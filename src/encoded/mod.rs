//! Storage contract for the derived attributes.

pub mod definition;
pub mod error;
pub mod quantized;
#[cfg(test)]
mod test;

pub use definition::DecimalSlot;
pub use error::SlotError;
pub use quantized::QuantizedSlot;
