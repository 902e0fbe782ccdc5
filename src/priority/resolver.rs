use log::trace;
use smallvec::SmallVec;

use crate::primitives::{Direction, RoadClass};
use crate::priority::PriorityCode;
use crate::profile::ProfileConfig;
use crate::tags::{TagString, WayTags};
use crate::way::WayInput;

/// Precedence of a priority rule. A rule of a greater tier always
/// replaces the code chosen by a lesser one, regardless of the order
/// in which the rules fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum OverrideTier {
    /// Seeded when no relation priority is supplied.
    Default = 0,
    /// Private, fictional or avoided ways, "only to reach a destination".
    Demotion = 40,
    /// Priority inherited from route relation membership.
    Relation = 110,
}

impl OverrideTier {
    #[inline]
    pub const fn weight(self) -> u16 {
        self as u16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedOverride {
    pub tier: OverrideTier,
    pub code: PriorityCode,
}

/// The candidates collected for one direction of one way.
///
/// Resolution picks the candidate of the greatest tier. Candidates of
/// equal tier resolve to the one inserted last; every rule currently
/// inserts at a distinct tier except the demotion rules, which all
/// insert the same code.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet(SmallVec<[WeightedOverride; 8]>);

impl OverrideSet {
    pub fn seeded(relation: Option<PriorityCode>) -> Self {
        let mut set = OverrideSet::default();
        match relation {
            Some(code) => set.insert(OverrideTier::Relation, code),
            None => set.insert(OverrideTier::Default, PriorityCode::Unchanged),
        }
        set
    }

    #[inline]
    pub fn insert(&mut self, tier: OverrideTier, code: PriorityCode) {
        self.0.push(WeightedOverride { tier, code });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `max_by_key` returns the last of several equal maxima, which is
    /// the last-inserted-wins rule for ties.
    pub fn resolve(&self) -> PriorityCode {
        self.0
            .iter()
            .max_by_key(|candidate| candidate.tier)
            .map_or(PriorityCode::Unchanged, |candidate| candidate.code)
    }
}

/// Resolves the directional [`PriorityCode`] of a way for one profile.
#[derive(Debug, Clone, Copy)]
pub struct PriorityResolver<'a> {
    profile: &'a ProfileConfig,
}

impl<'a> PriorityResolver<'a> {
    pub fn new(profile: &'a ProfileConfig) -> Self {
        PriorityResolver { profile }
    }

    /// Whether the profile stores a priority for this way at all: ways
    /// with a road class and walkable structures do, ferry ways only for
    /// ferry profiles.
    pub fn applies(&self, input: &WayInput) -> bool {
        let tags = &input.tags;
        match tags.highway() {
            Some(_) => true,
            None if self.profile.is_walkable_structure(tags) => true,
            None => {
                self.profile.priority.include_ferries
                    && tags.has_any(TagString::ROUTE, &self.profile.access.ferry_routes)
            }
        }
    }

    pub fn resolve(&self, input: &WayInput, direction: Direction) -> PriorityCode {
        let mut set = OverrideSet::seeded(input.relation_priority);
        self.collect(&input.tags, direction, &mut set);

        let code = set.resolve();
        trace!(
            "{} priority {direction}: {code} from {} candidates",
            self.profile.kind,
            set.len()
        );
        code
    }

    fn collect(&self, tags: &WayTags, direction: Direction, set: &mut OverrideSet) {
        let rules = &self.profile.priority;
        let key = rules.private_key.as_str();

        if tags.has_tag(key, "private") {
            set.insert(OverrideTier::Demotion, PriorityCode::PrivateDestination);
        }

        if tags.directional(key, direction) == Some("private") {
            set.insert(OverrideTier::Demotion, PriorityCode::PrivateDestination);
        }

        if tags.has_tag(TagString::FICTIONAL, "yes") {
            set.insert(OverrideTier::Demotion, PriorityCode::PrivateDestination);
        }

        let avoided = tags
            .highway()
            .and_then(RoadClass::parse)
            .is_some_and(|class| rules.avoid.contains(&class));

        if avoided {
            set.insert(OverrideTier::Demotion, PriorityCode::PrivateDestination);
        }
    }
}
