use crate::priority::PriorityCode;
use crate::tags::WayTags;

/// Everything the resolvers know about one way.
#[derive(Debug, Clone, Default)]
pub struct WayInput {
    pub tags: WayTags,
    /// Priority inherited from route relations, computed upstream.
    pub relation_priority: Option<PriorityCode>,
    /// Length of the edge in km, used by pedestrian and ferry speeds.
    pub distance_km: Option<f64>,
    /// Ferry speed computed by the caller, in km/h. Takes precedence
    /// over the profile's [`FerrySpeed`](crate::speed::FerrySpeed) calculator.
    pub ferry_speed: Option<f64>,
}

impl WayInput {
    pub fn new(tags: impl Into<WayTags>) -> Self {
        WayInput {
            tags: tags.into(),
            ..WayInput::default()
        }
    }

    pub fn with_relation_priority(self, priority: PriorityCode) -> Self {
        WayInput {
            relation_priority: Some(priority),
            ..self
        }
    }

    pub fn with_distance(self, distance_km: f64) -> Self {
        WayInput {
            distance_km: Some(distance_km),
            ..self
        }
    }

    pub fn with_ferry_speed(self, speed: f64) -> Self {
        WayInput {
            ferry_speed: Some(speed),
            ..self
        }
    }
}

impl From<WayTags> for WayInput {
    fn from(tags: WayTags) -> Self {
        WayInput::new(tags)
    }
}
