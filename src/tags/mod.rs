//! Read-only tag dictionary of a single way.


use std::collections::HashMap;
use std::ops::Deref;
use std::str::FromStr;

use crate::primitives::Direction;

#[derive(Clone, Debug, PartialEq, PartialOrd, Eq, Hash)]
pub struct TagString(String);

impl Deref for TagString {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for TagString {
    fn from(s: String) -> Self {
        TagString(s)
    }
}

impl From<&str> for TagString {
    fn from(s: &str) -> Self {
        TagString(s.to_string())
    }
}

impl TagString {
    pub const HIGHWAY: &'static str = "highway";
    pub const ROUTE: &'static str = "route";
    pub const SERVICE: &'static str = "service";
    pub const TRACK_TYPE: &'static str = "tracktype";
    pub const SURFACE: &'static str = "surface";
    pub const MAX_SPEED: &'static str = "maxspeed";
    pub const AVG_SPEED: &'static str = "avgspeed";
    pub const ASCENT: &'static str = "ascent";
    pub const DURATION: &'static str = "duration";
    pub const IMPASSABLE: &'static str = "impassable";
    pub const STATUS: &'static str = "status";
    pub const FORD: &'static str = "ford";
    pub const FICTIONAL: &'static str = "fictional";
    pub const RAILWAY: &'static str = "railway";
    pub const MAN_MADE: &'static str = "man_made";
    pub const CONDITIONAL: &'static str = "conditional";

    pub fn parse<F: FromStr>(&self) -> Option<F> {
        FromStr::from_str(self.as_str()).ok()
    }
}

/// The tags of one way, keyed by tag name.
///
/// Lookups never fail: an absent key reads as `None` (or the
/// supplied default), so the resolvers can treat missing and
/// malformed values the same way.
#[derive(Clone, Debug, Default)]
pub struct WayTags(HashMap<TagString, TagString>);

impl WayTags {
    pub fn new(map: HashMap<TagString, TagString>) -> Self {
        WayTags(map)
    }

    fn r#use(assoc: &str) -> TagString {
        TagString::from(assoc)
    }

    #[inline]
    pub fn get(&self, assoc: &str) -> Option<&str> {
        self.0.get(&WayTags::r#use(assoc)).map(|v| v.as_str())
    }

    /// Returns the value of `assoc`, or `default` when the way does not carry it.
    #[inline]
    pub fn get_or<'a>(&'a self, assoc: &str, default: &'a str) -> &'a str {
        self.get(assoc).unwrap_or(default)
    }

    #[inline]
    pub fn has(&self, assoc: &str) -> bool {
        self.get(assoc).is_some()
    }

    #[inline]
    pub fn has_tag(&self, assoc: &str, value: &str) -> bool {
        self.get(assoc).is_some_and(|v| v == value)
    }

    /// True if `assoc` is present and its value is one of `values`.
    pub fn has_any<S: AsRef<str>>(&self, assoc: &str, values: &[S]) -> bool {
        self.get(assoc)
            .is_some_and(|v| values.iter().any(|candidate| candidate.as_ref() == v))
    }

    /// Value of the first key in `keys` that the way carries, or the
    /// empty string. `keys` are ordered from most to least specific,
    /// e.g. `motorcar, motor_vehicle, vehicle, access`.
    pub fn first_priority_value<S: AsRef<str>>(&self, keys: &[S]) -> &str {
        keys.iter()
            .find_map(|key| self.get(key.as_ref()))
            .unwrap_or("")
    }

    pub fn parse<F: FromStr>(&self, assoc: &str) -> Option<F> {
        self.0.get(&WayTags::r#use(assoc)).and_then(TagString::parse::<F>)
    }

    /// Value of the `key:forward` / `key:backward` variant of `key`.
    #[inline]
    pub fn directional(&self, key: &str, direction: Direction) -> Option<&str> {
        self.get(&direction.qualify(key))
    }

    #[inline]
    pub fn highway(&self) -> Option<&str> {
        self.get(TagString::HIGHWAY)
    }
}

impl Deref for WayTags {
    type Target = HashMap<TagString, TagString>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K, V> FromIterator<(K, V)> for WayTags
where
    K: Into<TagString>,
    V: Into<TagString>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        WayTags(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for WayTags
where
    K: Into<TagString>,
    V: Into<TagString>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
