#![doc = include_str!("../README.md")]

pub mod access;
pub mod encoded;
pub mod error;
pub mod primitives;
pub mod priority;
pub mod profile;
pub mod speed;
pub mod tags;
pub mod util;
pub mod way;

#[doc(inline)]
pub use access::{AccessClassifier, AccessVerdict};
#[doc(inline)]
pub use encoded::{DecimalSlot, QuantizedSlot};
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use primitives::{Direction, DirectionalValue, RoadClass, RouteNetwork};
#[doc(inline)]
pub use priority::{PriorityCode, PriorityResolver};
#[doc(inline)]
pub use profile::{ProfileConfig, ProfileKind, ProfileOverrides};
#[doc(inline)]
pub use speed::SpeedResolver;
#[doc(inline)]
pub use tags::{TagString, WayTags};
#[doc(inline)]
pub use way::{EdgeAttributes, WayInput, WayProcessor};
