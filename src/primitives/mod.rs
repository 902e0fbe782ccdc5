pub mod access;
pub mod conditional;
pub mod direction;
pub mod network;
pub mod road_class;
pub mod speed;

pub use access::AccessValue;
pub use conditional::{ConditionalAccess, ConditionalEntry};
pub use direction::{Direction, DirectionalValue};
pub use network::RouteNetwork;
pub use road_class::{RoadClass, TrackGrade};
pub use speed::SpeedValue;
