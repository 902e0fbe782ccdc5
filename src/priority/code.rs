use serde::Deserialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Ordered routing preference stored on an edge, read by the weighting
/// as the multiplicative factor `weight / 100`.
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
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum PriorityCode {
    Exclude = 0,
    PrivateDestination = 1,
    ReachDestination = 10,
    VeryBad = 30,
    Bad = 50,
    AvoidMore = 60,
    Avoid = 80,
    SlightAvoid = 90,
    Unchanged = 100,
    SlightPrefer = 110,
    Prefer = 120,
    VeryNice = 130,
    Best = 150,
}

/// Converts a priority weight to its multiplicative factor.
#[inline]
pub const fn factor(weight: i32) -> f64 {
    weight as f64 / 100.0
}

impl PriorityCode {
    /// Every level, sorted by weight.
    pub const ALL: [PriorityCode; 13] = [
        PriorityCode::Exclude,
        PriorityCode::PrivateDestination,
        PriorityCode::ReachDestination,
        PriorityCode::VeryBad,
        PriorityCode::Bad,
        PriorityCode::AvoidMore,
        PriorityCode::Avoid,
        PriorityCode::SlightAvoid,
        PriorityCode::Unchanged,
        PriorityCode::SlightPrefer,
        PriorityCode::Prefer,
        PriorityCode::VeryNice,
        PriorityCode::Best,
    ];

    #[inline]
    pub const fn weight(self) -> i32 {
        self as i32
    }

    #[inline]
    pub const fn factor(self) -> f64 {
        factor(self.weight())
    }

    #[inline]
    fn position(self) -> usize {
        // ALL is sorted and the weights are distinct, so the search always hits.
        PriorityCode::ALL.partition_point(|code| code.weight() < self.weight())
    }

    /// The smallest level whose weight is at least `n`, or [`PriorityCode::Best`]
    /// if `n` lies above the scale.
    pub fn nearest_at_or_above(n: i32) -> PriorityCode {
        let index = PriorityCode::ALL.partition_point(|code| code.weight() < n);
        PriorityCode::ALL
            .get(index)
            .copied()
            .unwrap_or(PriorityCode::Best)
    }

    /// The next level down, saturating at [`PriorityCode::Exclude`].
    pub fn worse(self) -> PriorityCode {
        let index = self.position();
        PriorityCode::ALL[index.saturating_sub(1)]
    }

    /// The next level up, saturating at [`PriorityCode::Best`].
    pub fn better(self) -> PriorityCode {
        let index = self.position();
        PriorityCode::ALL
            .get(index + 1)
            .copied()
            .unwrap_or(PriorityCode::Best)
    }
}
