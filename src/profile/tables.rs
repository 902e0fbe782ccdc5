//! Base tables of the built-in profiles, and the shared constructors
//! that turn a base table plus overrides into a profile's own copy.

use std::collections::HashMap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::primitives::{AccessValue, RoadClass, TrackGrade};
use crate::tags::TagString;

/// Car speeds per road class, in km/h.
///
/// See: http://wiki.openstreetmap.org/wiki/OSM_tags_for_routing/Maxspeed
pub const CAR_ROAD_SPEEDS: [(RoadClass, f64); 16] = [
    // autobahn
    (RoadClass::Motorway, 100.0),
    (RoadClass::MotorwayLink, 70.0),
    // bundesstraße
    (RoadClass::Trunk, 70.0),
    (RoadClass::TrunkLink, 65.0),
    // linking bigger town
    (RoadClass::Primary, 65.0),
    (RoadClass::PrimaryLink, 60.0),
    // linking towns + villages
    (RoadClass::Secondary, 60.0),
    (RoadClass::SecondaryLink, 50.0),
    // streets without middle line separation
    (RoadClass::Tertiary, 50.0),
    (RoadClass::TertiaryLink, 40.0),
    (RoadClass::Unclassified, 30.0),
    (RoadClass::Residential, 30.0),
    // spielstraße
    (RoadClass::LivingStreet, 5.0),
    (RoadClass::Service, 20.0),
    // unknown road
    (RoadClass::Road, 20.0),
    // forestry stuff
    (RoadClass::Track, 15.0),
];

/// Motorcycles keep the car table, only trunk roads are faster.
pub const MOTORCYCLE_ROAD_SPEED_CHANGES: [(RoadClass, f64); 2] =
    [(RoadClass::Trunk, 80.0), (RoadClass::TrunkLink, 75.0)];

pub const CAR_TRACK_SPEEDS: [(TrackGrade, f64); 3] = [
    // paved
    (TrackGrade::Grade1, 20.0),
    // now unpaved, gravel mixed with ...
    (TrackGrade::Grade2, 15.0),
    // ... hard and soft materials
    (TrackGrade::Grade3, 10.0),
];

pub const MOTORCYCLE_TRACK_SPEEDS: [(TrackGrade, f64); 1] = [(TrackGrade::Grade1, 20.0)];

pub const BAD_SURFACES: [&str; 16] = [
    "cobblestone",
    "unhewn_cobblestone",
    "sett",
    "grass_paver",
    "gravel",
    "fine_gravel",
    "pebblestone",
    "sand",
    "paving_stones",
    "dirt",
    "earth",
    "ground",
    "wood",
    "grass",
    "unpaved",
    "compacted",
];

pub const MOTOR_ROAD_CLASSES: [RoadClass; 16] = [
    RoadClass::Motorway,
    RoadClass::MotorwayLink,
    RoadClass::Trunk,
    RoadClass::TrunkLink,
    RoadClass::Primary,
    RoadClass::PrimaryLink,
    RoadClass::Secondary,
    RoadClass::SecondaryLink,
    RoadClass::Tertiary,
    RoadClass::TertiaryLink,
    RoadClass::Unclassified,
    RoadClass::Residential,
    RoadClass::LivingStreet,
    RoadClass::Service,
    RoadClass::Road,
    RoadClass::Track,
];

pub const FOOT_ROAD_CLASSES: [RoadClass; 21] = [
    RoadClass::Trunk,
    RoadClass::TrunkLink,
    RoadClass::Primary,
    RoadClass::PrimaryLink,
    RoadClass::Secondary,
    RoadClass::SecondaryLink,
    RoadClass::Tertiary,
    RoadClass::TertiaryLink,
    RoadClass::Unclassified,
    RoadClass::Residential,
    RoadClass::LivingStreet,
    RoadClass::Service,
    RoadClass::Road,
    RoadClass::Track,
    RoadClass::Pedestrian,
    RoadClass::Footway,
    RoadClass::Path,
    RoadClass::Steps,
    RoadClass::Cycleway,
    RoadClass::Bridleway,
    RoadClass::Platform,
];

pub const RESTRICTED: [AccessValue; 6] = [
    AccessValue::No,
    AccessValue::Restricted,
    AccessValue::Military,
    AccessValue::Emergency,
    AccessValue::Private,
    AccessValue::Permit,
];

pub const MOTOR_RESTRICTED: [AccessValue; 3] = [
    AccessValue::Agricultural,
    AccessValue::Forestry,
    AccessValue::Delivery,
];

pub const INTENDED: [AccessValue; 4] = [
    AccessValue::Yes,
    AccessValue::Designated,
    AccessValue::Official,
    AccessValue::Permissive,
];

pub const FERRY_ROUTES: [&str; 2] = ["shuttle_train", "ferry"];

/// Walked by pedestrians even though they carry no `highway` tag.
pub const WALKABLE_STRUCTURES: [(&str, &str); 2] = [
    (TagString::RAILWAY, "platform"),
    (TagString::MAN_MADE, "pier"),
];

/// Builds a profile's own table from a base table, replacing or adding
/// entries from `changes` and then from `overrides`.
pub fn table<K>(base: &[(K, f64)], changes: &[(K, f64)], overrides: &HashMap<K, f64>) -> FxHashMap<K, f64>
where
    K: Copy + Eq + Hash,
{
    let mut table = base.iter().copied().collect::<FxHashMap<_, _>>();
    table.extend(changes.iter().copied());
    table.extend(overrides.iter().map(|(k, v)| (*k, *v)));
    table
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
