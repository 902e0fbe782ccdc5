pub mod code;
pub mod resolver;

pub use code::{factor, PriorityCode};
pub use resolver::{OverrideSet, OverrideTier, PriorityResolver, WeightedOverride};
