//! Vehicle profiles as plain configuration values.
//!
//! A profile is built once per ingest run and then shared read-only by
//! every resolver. The variants differ only in data (tables, value sets)
//! and in a few explicit strategy switches; there is no per-profile code.

pub mod overrides;
pub mod tables;

use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::primitives::{AccessValue, RoadClass, RouteNetwork, TrackGrade};
use crate::priority::PriorityCode;
use crate::tags::WayTags;

pub use overrides::{ConfigError, ProfileOverrides};
use overrides::check_speed;
use tables::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ProfileKind {
    Car,
    Motorcycle,
    Foot,
    Carferry,
    Motorcycleferry,
    Footferry,
}

impl ProfileKind {
    pub fn parse(name: &str) -> Result<ProfileKind, ConfigError> {
        name.parse()
            .map_err(|_| ConfigError::UnknownProfile(name.to_string()))
    }

    /// Ferry variants route over ferry lines and prioritise them.
    pub const fn is_ferry(&self) -> bool {
        matches!(
            self,
            ProfileKind::Carferry | ProfileKind::Motorcycleferry | ProfileKind::Footferry
        )
    }

    /// The vehicle the profile describes, without the ferry specialisation.
    pub const fn vehicle(&self) -> ProfileKind {
        match self {
            ProfileKind::Car | ProfileKind::Carferry => ProfileKind::Car,
            ProfileKind::Motorcycle | ProfileKind::Motorcycleferry => ProfileKind::Motorcycle,
            ProfileKind::Foot | ProfileKind::Footferry => ProfileKind::Foot,
        }
    }
}

/// How the non-ferry speed of a way is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedStrategy {
    /// The avgspeed / maxspeed / road-class fallback chain of motor vehicles.
    Road,
    /// Walking speed corrected for the ascent of the way.
    Pedestrian { mean: f64, steps: f64 },
}

#[derive(Debug, Clone)]
pub struct SpeedRules {
    pub strategy: SpeedStrategy,
    pub road_speeds: FxHashMap<RoadClass, f64>,
    pub track_speeds: FxHashMap<TrackGrade, f64>,
    /// Used for tracks without a known `tracktype`.
    pub track_default: f64,
    /// Last resort for ways no other rule gives a speed to.
    pub floor_speed: f64,
    /// Smallest speed the resolver ever returns.
    pub min_speed: f64,
    /// Largest speed the profile stores.
    pub max_speed: f64,
    /// Quantisation step of the speed slot, the smallest non-zero ferry speed.
    pub speed_step: f64,
    /// Share of the legal limit assumed to be driven.
    pub legal_factor: f64,
    pub bad_surfaces: FxHashSet<String>,
    pub bad_surface_speed: f64,
    /// Additional vehicle-specific limit, e.g. `maxspeed:motorcycle`.
    pub vehicle_max_speed_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PriorityRules {
    /// Ways of these classes are only used to reach a destination.
    pub avoid: FxHashSet<RoadClass>,
    /// Key whose `private` value demotes the way, e.g. `motor_vehicle`.
    pub private_key: String,
    pub include_ferries: bool,
    pub networks: FxHashMap<RouteNetwork, PriorityCode>,
}

#[derive(Debug, Clone)]
pub struct AccessRules {
    /// Restriction keys from most to least specific.
    pub restrictions: Vec<String>,
    pub restricted: Vec<AccessValue>,
    pub intended: Vec<AccessValue>,
    pub ferry_routes: Vec<String>,
    pub include_ferries: bool,
    /// Tags that, when present, deny a ferry its implied default access.
    pub ferry_contradictions: Vec<String>,
    /// `key=value` structures without a road class that are still walked,
    /// such as platforms and piers.
    pub walkable_structures: Vec<(String, String)>,
    pub road_classes: FxHashSet<RoadClass>,
    pub track_grades: FxHashSet<TrackGrade>,
    pub allow_ungraded_track: bool,
    pub block_fords: bool,
    pub reference_date: Option<NaiveDate>,
}

/// Static configuration of one vehicle profile.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    pub kind: ProfileKind,
    pub speed: SpeedRules,
    pub priority: PriorityRules,
    pub access: AccessRules,
}

impl ProfileConfig {
    /// The built-in configuration of `kind`.
    pub fn new(kind: ProfileKind) -> ProfileConfig {
        let defaults = ProfileOverrides::default();
        Self::build(kind, &defaults)
    }

    /// The built-in configuration of `kind` with `overrides` applied.
    pub fn with_overrides(
        kind: ProfileKind,
        overrides: &ProfileOverrides,
    ) -> Result<ProfileConfig, ConfigError> {
        for (class, speed) in &overrides.road_speeds {
            check_speed(format!("road_speeds.{class}"), *speed)?;
        }
        for (grade, speed) in &overrides.track_speeds {
            check_speed(format!("track_speeds.{grade}"), *speed)?;
        }
        for (field, value) in [
            ("track_default", overrides.track_default),
            ("max_speed", overrides.max_speed),
            ("floor_speed", overrides.floor_speed),
        ] {
            if let Some(value) = value {
                check_speed(field, value)?;
            }
        }

        let profile = Self::build(kind, overrides);
        let rules = &profile.speed;

        let min = rules.min_speed.max(rules.speed_step);
        if rules.max_speed < min {
            return Err(ConfigError::MaxBelowMinimum {
                max: rules.max_speed,
                min,
            });
        }

        if rules.floor_speed > rules.max_speed {
            return Err(ConfigError::FloorAboveMax {
                floor: rules.floor_speed,
                max: rules.max_speed,
            });
        }

        debug!("Built {kind} profile with overrides: {overrides:?}");
        Ok(profile)
    }

    /// Priority of a way that belongs to a route relation of `network`.
    pub fn network_priority(&self, network: RouteNetwork) -> Option<PriorityCode> {
        self.priority.networks.get(&network).copied()
    }

    /// True for ways without a road class that the profile still walks.
    pub fn is_walkable_structure(&self, tags: &WayTags) -> bool {
        tags.highway().is_none()
            && self
                .access
                .walkable_structures
                .iter()
                .any(|(key, value)| tags.has_tag(key, value))
    }

    fn build(kind: ProfileKind, overrides: &ProfileOverrides) -> ProfileConfig {
        ProfileConfig {
            kind,
            speed: speed_rules(kind, overrides),
            priority: priority_rules(kind, overrides),
            access: access_rules(kind, overrides),
        }
    }
}

fn speed_rules(kind: ProfileKind, overrides: &ProfileOverrides) -> SpeedRules {
    let vehicle = kind.vehicle();

    let (strategy, road_speeds, track_speeds) = match vehicle {
        ProfileKind::Motorcycle => (
            SpeedStrategy::Road,
            table(&CAR_ROAD_SPEEDS, &MOTORCYCLE_ROAD_SPEED_CHANGES, &overrides.road_speeds),
            table(&MOTORCYCLE_TRACK_SPEEDS, &[], &overrides.track_speeds),
        ),
        ProfileKind::Foot => (
            SpeedStrategy::Pedestrian {
                mean: 5.0,
                steps: 3.0,
            },
            table(&[], &[], &overrides.road_speeds),
            table(&[], &[], &overrides.track_speeds),
        ),
        _ => (
            SpeedStrategy::Road,
            table(&CAR_ROAD_SPEEDS, &[], &overrides.road_speeds),
            table(&CAR_TRACK_SPEEDS, &[], &overrides.track_speeds),
        ),
    };

    let track_default = overrides
        .track_default
        .or_else(|| road_speeds.get(&RoadClass::Track).copied())
        .unwrap_or(15.0);

    let (max_speed, floor_speed, min_speed, speed_step) = match vehicle {
        ProfileKind::Motorcycle => (120.0, 10.0, 1.0, 5.0),
        ProfileKind::Foot => (15.0, 5.0, 0.05, 1.0),
        _ => (140.0, 5.0, 1.0, 5.0),
    };

    let bad_surfaces = match (&overrides.bad_surfaces, vehicle) {
        (Some(surfaces), _) => surfaces.iter().cloned().collect(),
        (None, ProfileKind::Foot) => FxHashSet::default(),
        (None, _) => BAD_SURFACES.iter().map(|s| s.to_string()).collect(),
    };

    SpeedRules {
        strategy,
        road_speeds,
        track_speeds,
        track_default,
        floor_speed: overrides.floor_speed.unwrap_or(floor_speed),
        min_speed,
        max_speed: overrides.max_speed.unwrap_or(max_speed),
        speed_step,
        legal_factor: 0.9,
        bad_surfaces,
        bad_surface_speed: 30.0,
        vehicle_max_speed_key: (vehicle == ProfileKind::Motorcycle)
            .then(|| "maxspeed:motorcycle".to_string()),
    }
}

fn priority_rules(kind: ProfileKind, overrides: &ProfileOverrides) -> PriorityRules {
    let (avoid, private_key) = match kind.vehicle() {
        ProfileKind::Foot => (vec![], "foot"),
        _ => (vec![RoadClass::Track], "motor_vehicle"),
    };

    let mut networks = [
        RouteNetwork::International,
        RouteNetwork::National,
        RouteNetwork::Regional,
        RouteNetwork::Local,
    ]
    .into_iter()
    .map(|network| (network, PriorityCode::Unchanged))
    .collect::<FxHashMap<_, _>>();
    networks.extend(overrides.networks.iter().map(|(k, v)| (*k, *v)));

    PriorityRules {
        avoid: overrides
            .avoid
            .clone()
            .unwrap_or(avoid)
            .into_iter()
            .collect(),
        private_key: private_key.to_string(),
        include_ferries: kind.is_ferry(),
        networks,
    }
}

fn access_rules(kind: ProfileKind, overrides: &ProfileOverrides) -> AccessRules {
    let vehicle = kind.vehicle();

    let restrictions: &[&str] = match vehicle {
        ProfileKind::Car => &["motorcar", "motor_vehicle", "vehicle", "access"],
        ProfileKind::Motorcycle => &["motorcycle", "motor_vehicle", "vehicle", "access"],
        _ => &["foot", "access"],
    };

    let walkable_structures = match vehicle {
        ProfileKind::Foot => WALKABLE_STRUCTURES
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
        _ => vec![],
    };

    let (restricted, road_classes, track_grades, ferry_contradictions) = match vehicle {
        ProfileKind::Foot => (
            RESTRICTED.to_vec(),
            FOOT_ROAD_CLASSES.iter().copied().collect::<FxHashSet<_>>(),
            vec![
                TrackGrade::Grade1,
                TrackGrade::Grade2,
                TrackGrade::Grade3,
                TrackGrade::Grade4,
                TrackGrade::Grade5,
            ],
            vec![],
        ),
        _ => (
            [RESTRICTED.as_slice(), MOTOR_RESTRICTED.as_slice()].concat(),
            MOTOR_ROAD_CLASSES.iter().copied().collect::<FxHashSet<_>>(),
            vec![TrackGrade::Grade1, TrackGrade::Grade2, TrackGrade::Grade3],
            strings(&["foot", "bicycle"]),
        ),
    };

    AccessRules {
        restrictions: strings(restrictions),
        restricted,
        intended: INTENDED.to_vec(),
        ferry_routes: strings(&FERRY_ROUTES),
        include_ferries: kind.is_ferry(),
        ferry_contradictions,
        walkable_structures,
        road_classes,
        track_grades: overrides
            .track_grades
            .clone()
            .unwrap_or(track_grades)
            .into_iter()
            .collect(),
        allow_ungraded_track: true,
        block_fords: overrides.block_fords.unwrap_or(false),
        reference_date: overrides.reference_date,
    }
}

impl From<ProfileKind> for ProfileConfig {
    fn from(kind: ProfileKind) -> Self {
        ProfileConfig::new(kind)
    }
}

/// Builds one configuration per requested profile name.
pub fn profiles_by_name<S: AsRef<str>>(
    names: &[S],
    overrides: &HashMap<String, ProfileOverrides>,
) -> Result<Vec<ProfileConfig>, ConfigError> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let kind = ProfileKind::parse(name)?;
            match overrides.get(name) {
                Some(overrides) => ProfileConfig::with_overrides(kind, overrides),
                None => Ok(ProfileConfig::new(kind)),
            }
        })
        .collect()
}
