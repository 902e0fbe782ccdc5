use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Speed shown on an unlimited-speed sign (`maxspeed=none`), in km/h.
pub const UNLIMITED_SIGN_SPEED: f64 = 150.0;

/// Speed assumed for `maxspeed=walk`, in km/h.
pub const WALK_SPEED: f64 = 6.0;

const MPH_IN_KMH: f64 = 1.609344;
const KNOT_IN_KMH: f64 = 1.852;

const VALUE_PATTERN: &str = r"^\s*(\d+(?:\.\d+)?)\s*([A-Za-z/]*)\s*$";

fn value_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(VALUE_PATTERN).ok()).as_ref()
}

/// A parsed speed tag value, such as `maxspeed=30 mph`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedValue {
    /// Speed in kilometers per hour
    Kmh(f64),
    /// Speed in miles per hour (Multiply by 1.609344)
    Mph(f64),
    /// Speed in knots (Multiply by 1.852)
    Knots(f64),
    /// No speed limit (typically represented as "none" in OSM)
    None,
    /// Variable speed limit (electronic signs, etc.)
    Variable,
    /// Walk speed
    Walk,
}

impl SpeedValue {
    /// Parses a speed tag value. Returns `None` for anything that is not
    /// a number with an optional known unit, or one of the keywords
    /// `none`, `walk`, `variable` and `signals`.
    pub fn parse(value: &str) -> Option<SpeedValue> {
        match value.trim() {
            "none" => return Some(SpeedValue::None),
            "walk" => return Some(SpeedValue::Walk),
            "variable" | "signals" => return Some(SpeedValue::Variable),
            _ => {}
        }

        let captures = value_pattern()?.captures(value)?;
        let number = captures.get(1)?.as_str().parse::<f64>().ok()?;
        let unit = captures
            .get(2)
            .map(|unit| unit.as_str().to_lowercase())
            .unwrap_or_default();

        match unit.as_str() {
            "" | "km/h" | "kmh" | "kph" => Some(SpeedValue::Kmh(number)),
            "mph" => Some(SpeedValue::Mph(number)),
            "knots" | "kn" => Some(SpeedValue::Knots(number)),
            _ => None,
        }
    }

    /// Shows the speed as represented in Kilometers per Hour.
    pub fn in_kmh(&self) -> Option<f64> {
        match self {
            SpeedValue::Kmh(speed) => Some(*speed),
            SpeedValue::Mph(speed) => Some(*speed * MPH_IN_KMH),
            SpeedValue::Knots(speed) => Some(*speed * KNOT_IN_KMH),
            SpeedValue::None => Some(UNLIMITED_SIGN_SPEED),
            SpeedValue::Walk => Some(WALK_SPEED),
            SpeedValue::Variable => None,
        }
    }
}

/// Converts a speed tag value to km/h, `None` if it cannot be read.
#[inline]
pub fn string_to_kmh(value: &str) -> Option<f64> {
    SpeedValue::parse(value)?.in_kmh()
}

/// A speed is usable as a candidate when it is a finite, non-negative number.
#[inline]
pub fn is_valid_speed(speed: f64) -> bool {
    speed.is_finite() && speed >= 0.0
}

impl fmt::Display for SpeedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedValue::Kmh(speed) => write!(f, "{}", speed),
            SpeedValue::Mph(speed) => write!(f, "{} mph", speed),
            SpeedValue::Knots(speed) => write!(f, "{} knots", speed),
            SpeedValue::None => write!(f, "none"),
            SpeedValue::Variable => write!(f, "variable"),
            SpeedValue::Walk => write!(f, "walk"),
        }
    }
}
