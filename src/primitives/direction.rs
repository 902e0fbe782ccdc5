use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Direction of travel along a way, relative to how the way is drawn.
///
/// Only the two travel directions are modelled; side-of-way qualifiers
/// (`left`, `right`) never select a directional speed or priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Direction {
    /// Direction in which the OSM way is drawn (from first node to last node).
    /// Used in tags like `avgspeed:forward=40`.
    #[default]
    Forward = 0,

    /// Direction opposite to how the OSM way is drawn (from last node to first node).
    /// Used in tags like `maxspeed:backward=30`.
    Backward = 1,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Forward, Direction::Backward];

    /// True for the backward direction, the "reverse" flag of the storage layer.
    #[inline]
    pub const fn is_reverse(&self) -> bool {
        matches!(self, Direction::Backward)
    }

    #[inline]
    pub const fn opposite(&self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// The key suffix of the direction, `forward` or `backward`.
    #[inline]
    pub fn suffix(&self) -> &'static str {
        (*self).into()
    }

    /// Forms the directional variant of a key, i.e. `maxspeed` to `maxspeed:backward`.
    pub fn qualify(&self, key: &str) -> String {
        format!("{key}:{}", self.suffix())
    }
}

/// A pair of values attached to the two travel directions of one way.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectionalValue<T> {
    pub forward: T,
    pub backward: T,
}

impl<T> DirectionalValue<T> {
    pub const fn new(forward: T, backward: T) -> Self {
        DirectionalValue { forward, backward }
    }

    /// Resolves both directions with the same function.
    pub fn from_fn(mut f: impl FnMut(Direction) -> T) -> Self {
        DirectionalValue {
            forward: f(Direction::Forward),
            backward: f(Direction::Backward),
        }
    }

    #[inline]
    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> DirectionalValue<U> {
        DirectionalValue {
            forward: f(self.forward),
            backward: f(self.backward),
        }
    }
}

impl<T: Clone> DirectionalValue<T> {
    /// The same value in both directions.
    pub fn splat(value: T) -> Self {
        DirectionalValue {
            forward: value.clone(),
            backward: value,
        }
    }
}
