use serde::Deserialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The value of a way's `highway=*` tag.
///
/// Values outside this set do not parse; profiles treat such ways as
/// having no known road class (no default speed, not permitted).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RoadClass {
    Motorway,
    MotorwayLink,
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    Unclassified,
    Residential,

    /// Residential streets where pedestrians have legal priority; speeds are kept very low.
    LivingStreet,
    /// Access roads to estates, car parks, alleys. See `service=*` for the usage.
    Service,
    /// Road of unknown type, awaiting survey.
    Road,
    /// Agricultural or forestry road. Quality is described by `tracktype=*`.
    Track,

    // Non-motorised infrastructure
    Pedestrian,
    Footway,
    Path,
    Steps,
    Cycleway,
    Bridleway,
    Platform,

    /// A ford mapped as its own way (`highway=ford`).
    Ford,
}

impl RoadClass {
    #[inline]
    pub fn parse(value: &str) -> Option<RoadClass> {
        value.parse().ok()
    }
}

/// Surface quality of a `highway=track`, from solid (grade1) to soft (grade5).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    Deserialize,
)]
#[repr(u8)]
pub enum TrackGrade {
    #[strum(serialize = "grade1")]
    #[serde(rename = "grade1")]
    Grade1 = 1,
    #[strum(serialize = "grade2")]
    #[serde(rename = "grade2")]
    Grade2 = 2,
    #[strum(serialize = "grade3")]
    #[serde(rename = "grade3")]
    Grade3 = 3,
    #[strum(serialize = "grade4")]
    #[serde(rename = "grade4")]
    Grade4 = 4,
    #[strum(serialize = "grade5")]
    #[serde(rename = "grade5")]
    Grade5 = 5,
}
