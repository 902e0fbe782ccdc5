use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::primitives::{RoadClass, RouteNetwork, TrackGrade};
use crate::priority::PriorityCode;

/// Per-deployment adjustments to a built-in profile, typically loaded
/// by the ingest tool from its configuration file.
///
/// ```json
/// {
///     "road_speeds": { "motorway": 110.0, "track": 10.0 },
///     "avoid": ["track", "service"],
///     "reference_date": "2024-01-15"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileOverrides {
    pub road_speeds: HashMap<RoadClass, f64>,
    pub track_speeds: HashMap<TrackGrade, f64>,
    pub track_default: Option<f64>,
    pub max_speed: Option<f64>,
    pub floor_speed: Option<f64>,
    pub bad_surfaces: Option<Vec<String>>,
    pub avoid: Option<Vec<RoadClass>>,
    pub track_grades: Option<Vec<TrackGrade>>,
    pub block_fords: Option<bool>,
    pub networks: HashMap<RouteNetwork, PriorityCode>,

    /// Day against which date conditions (`access:conditional`) are evaluated.
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A speed that is not a finite, positive number of km/h.
    InvalidSpeed { field: String, value: f64 },
    /// The floor speed would exceed the maximum speed.
    FloorAboveMax { floor: f64, max: f64 },
    /// The maximum speed would fall below what the speed slot can represent.
    MaxBelowMinimum { max: f64, min: f64 },
    UnknownProfile(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSpeed { field, value } => {
                write!(f, "{field} must be a positive speed, got {value}")
            }
            ConfigError::FloorAboveMax { floor, max } => {
                write!(f, "floor speed {floor} exceeds maximum speed {max}")
            }
            ConfigError::MaxBelowMinimum { max, min } => {
                write!(f, "maximum speed {max} is below the minimum speed {min}")
            }
            ConfigError::UnknownProfile(name) => write!(f, "unknown profile '{name}'"),
        }
    }
}

impl std::error::Error for ConfigError {}

pub(crate) fn check_speed(field: impl fmt::Display, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidSpeed {
            field: field.to_string(),
            value,
        })
    }
}
