use std::sync::OnceLock;

use regex::Regex;

use crate::tags::TagString;
use crate::way::WayInput;

/// Source of the raw speed of a ferry way, before the profile clamps it.
///
/// Only consulted when the caller did not supply a precomputed
/// [`WayInput::ferry_speed`].
pub trait FerrySpeed: Send + Sync {
    fn speed(&self, input: &WayInput) -> f64;
}

/// Derives ferry speed from the scheduled `duration` of the crossing and
/// the length of the way.
///
/// Boarding and waiting are not part of `duration`, so the trip speed is
/// divided by `waiting_factor`. Ways without a usable duration or length
/// travel at `unknown_speed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationFerrySpeed {
    pub unknown_speed: f64,
    pub waiting_factor: f64,
}

impl Default for DurationFerrySpeed {
    fn default() -> Self {
        DEFAULT_FERRY_SPEED
    }
}

pub(crate) static DEFAULT_FERRY_SPEED: DurationFerrySpeed = DurationFerrySpeed {
    unknown_speed: 6.0,
    waiting_factor: 1.4,
};

impl FerrySpeed for DurationFerrySpeed {
    fn speed(&self, input: &WayInput) -> f64 {
        let hours = input
            .tags
            .get(TagString::DURATION)
            .and_then(parse_duration_minutes)
            .map(|minutes| minutes / 60.0)
            .filter(|hours| *hours > 0.0);

        match (hours, input.distance_km) {
            (Some(hours), Some(distance)) if distance > 0.0 => {
                let speed = (distance / hours / self.waiting_factor).round();
                if speed > 0.0 {
                    speed
                } else {
                    self.unknown_speed
                }
            }
            _ => self.unknown_speed,
        }
    }
}

const ISO_DURATION_PATTERN: &str =
    r"^P(?:(\d+)D)?(?:T(?:(\d+(?:\.\d+)?)H)?(?:(\d+(?:\.\d+)?)M)?(?:(\d+(?:\.\d+)?)S)?)?$";

fn iso_duration_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(ISO_DURATION_PATTERN).ok())
        .as_ref()
}

/// Reads an OSM `duration` value as minutes.
///
/// Accepts `mm`, `hh:mm`, `hh:mm:ss` and ISO 8601 durations such as `PT1H30M`.
pub fn parse_duration_minutes(value: &str) -> Option<f64> {
    let value = value.trim();

    if value.starts_with('P') {
        let captures = iso_duration_pattern()?.captures(value)?;
        let part = |index: usize| {
            captures
                .get(index)
                .map_or(Some(0.0), |m| m.as_str().parse::<f64>().ok())
        };

        let minutes = part(1)? * 24.0 * 60.0 + part(2)? * 60.0 + part(3)? + part(4)? / 60.0;
        return Some(minutes);
    }

    let parts = value
        .split(':')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;

    let minutes = match parts.as_slice() {
        [minutes] => *minutes as f64,
        [hours, minutes] => (*hours * 60 + *minutes) as f64,
        [hours, minutes, seconds] => (*hours * 60 + *minutes) as f64 + *seconds as f64 / 60.0,
        _ => return None,
    };

    Some(minutes)
}
