//! Directional travel speed of a way.

pub mod ferry;

use log::trace;
use strum::{AsRefStr, Display};

use crate::primitives::speed::{is_valid_speed, string_to_kmh};
use crate::primitives::{Direction, RoadClass, TrackGrade};
use crate::profile::{ProfileConfig, SpeedStrategy};
use crate::tags::{TagString, WayTags};
use crate::way::WayInput;

pub use ferry::{DurationFerrySpeed, FerrySpeed};

/// The rule that produced a resolved speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SpeedSource {
    DirectionalAverage,
    Average,
    DirectionalLegal,
    Legal,
    RoadClass,
    TrackGrade,
    Floor,
    Steps,
    Naismith,
    Ferry,
}

/// Resolves the directional speed of a way, in km/h, for one profile.
///
/// Resolution is total: absent or malformed tags only move the chain on
/// to the next rule, and the result always lies in
/// `[min_speed, max_speed]` of the profile.
#[derive(Clone, Copy)]
pub struct SpeedResolver<'a> {
    profile: &'a ProfileConfig,
    ferry: &'a dyn FerrySpeed,
}

impl<'a> SpeedResolver<'a> {
    pub fn new(profile: &'a ProfileConfig) -> Self {
        SpeedResolver {
            profile,
            ferry: &ferry::DEFAULT_FERRY_SPEED,
        }
    }

    pub fn with_ferry_speed(profile: &'a ProfileConfig, ferry: &'a dyn FerrySpeed) -> Self {
        SpeedResolver { profile, ferry }
    }

    /// True for ways without a road class that are tagged as a ferry route.
    /// A walkable pier on a ferry route is walked, not sailed.
    pub fn is_ferry(&self, tags: &WayTags) -> bool {
        tags.highway().is_none()
            && tags.has_any(TagString::ROUTE, &self.profile.access.ferry_routes)
            && !self.profile.is_walkable_structure(tags)
    }

    pub fn resolve(&self, input: &WayInput, direction: Direction) -> f64 {
        self.resolve_with_source(input, direction).0
    }

    /// Resolves the speed together with the rule that chose it.
    pub fn resolve_with_source(&self, input: &WayInput, direction: Direction) -> (f64, SpeedSource) {
        let (speed, source) = if self.is_ferry(&input.tags) {
            (self.ferry_speed(input), SpeedSource::Ferry)
        } else {
            let (speed, source) = match self.profile.speed.strategy {
                SpeedStrategy::Road => self.road_speed(&input.tags, direction),
                SpeedStrategy::Pedestrian { mean, steps } => {
                    self.pedestrian_speed(input, direction, mean, steps)
                }
            };

            (self.post_process(&input.tags, speed), source)
        };

        trace!(
            "{} speed {direction}: {speed:.2} km/h from {source}",
            self.profile.kind
        );
        (speed, source)
    }

    /// Ferry speed, identical in both directions and inside the range the
    /// profile's speed slot can hold.
    fn ferry_speed(&self, input: &WayInput) -> f64 {
        let rules = &self.profile.speed;
        let speed = input
            .ferry_speed
            .filter(|speed| speed.is_finite() && *speed > 0.0)
            .unwrap_or_else(|| self.ferry.speed(input));

        if speed.is_nan() {
            return rules.speed_step;
        }

        speed.clamp(rules.speed_step, rules.max_speed)
    }

    fn road_speed(&self, tags: &WayTags, direction: Direction) -> (f64, SpeedSource) {
        let rules = &self.profile.speed;

        let average = |key: &str| {
            tags.parse::<f64>(key)
                .filter(|speed| is_valid_speed(*speed) && *speed > 0.0)
                .map(|speed| speed.max(1.0))
        };

        let legal = |key: &str| {
            tags.get(key)
                .and_then(string_to_kmh)
                .filter(|speed| is_valid_speed(*speed) && *speed > 0.0)
                .map(|speed| (speed * rules.legal_factor).max(1.0).min(rules.max_speed))
        };

        let directional_average = direction.qualify(TagString::AVG_SPEED);
        let directional_legal = direction.qualify(TagString::MAX_SPEED);

        average(&directional_average)
            .map(|speed| (speed, SpeedSource::DirectionalAverage))
            .or_else(|| average(TagString::AVG_SPEED).map(|speed| (speed, SpeedSource::Average)))
            .or_else(|| legal(&directional_legal).map(|speed| (speed, SpeedSource::DirectionalLegal)))
            .or_else(|| legal(TagString::MAX_SPEED).map(|speed| (speed, SpeedSource::Legal)))
            .or_else(|| self.class_speed(tags))
            .unwrap_or((rules.floor_speed, SpeedSource::Floor))
    }

    /// Default speed of the way's road class, refined by `tracktype` on tracks.
    fn class_speed(&self, tags: &WayTags) -> Option<(f64, SpeedSource)> {
        let rules = &self.profile.speed;
        let class = tags.highway().and_then(RoadClass::parse)?;

        if class == RoadClass::Track {
            let graded = tags
                .parse::<TrackGrade>(TagString::TRACK_TYPE)
                .and_then(|grade| rules.track_speeds.get(&grade).copied());

            return Some(match graded {
                Some(speed) => (speed, SpeedSource::TrackGrade),
                None => (rules.track_default, SpeedSource::RoadClass),
            });
        }

        rules
            .road_speeds
            .get(&class)
            .map(|speed| (*speed, SpeedSource::RoadClass))
    }

    /// Walking speed after Naismith's rule: one hour per 5 km plus one hour
    /// per 600 m of ascent.
    fn pedestrian_speed(
        &self,
        input: &WayInput,
        direction: Direction,
        mean: f64,
        steps: f64,
    ) -> (f64, SpeedSource) {
        let tags = &input.tags;
        if tags.has_tag(TagString::HIGHWAY, "steps") {
            return (steps, SpeedSource::Steps);
        }

        let distance = match input.distance_km {
            Some(distance) if distance.is_finite() && distance > 0.0 => distance,
            _ => return (mean, SpeedSource::Naismith),
        };

        let ascent = tags
            .parse::<f64>(&direction.qualify(TagString::ASCENT))
            .filter(|ascent| ascent.is_finite())
            .unwrap_or(0.0);

        let speed = distance / (distance / mean + ascent / 600.0);
        if speed.is_nan() {
            return (mean, SpeedSource::Naismith);
        }

        (speed, SpeedSource::Naismith)
    }

    /// Caps applied to every non-ferry speed, then the final clamp into
    /// the profile's range.
    fn post_process(&self, tags: &WayTags, speed: f64) -> f64 {
        let rules = &self.profile.speed;
        let mut speed = speed;

        let vehicle_limit = rules
            .vehicle_max_speed_key
            .as_deref()
            .and_then(|key| tags.get(key))
            .and_then(string_to_kmh)
            .filter(|limit| is_valid_speed(*limit) && *limit > 0.0);

        if let Some(limit) = vehicle_limit {
            speed = speed.min((limit * rules.legal_factor).max(1.0));
        }

        let surface = tags
            .get(TagString::SURFACE)
            .and_then(|surface| surface.split(':').next());

        if surface.is_some_and(|surface| rules.bad_surfaces.contains(surface))
            && speed > rules.bad_surface_speed
        {
            speed = rules.bad_surface_speed;
        }

        speed.clamp(rules.min_speed, rules.max_speed)
    }
}
