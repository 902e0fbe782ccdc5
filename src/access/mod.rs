//! Way-level access gate, evaluated before any directional attribute.


use log::debug;
use strum::{AsRefStr, Display};

use crate::primitives::{AccessValue, ConditionalAccess, RoadClass, TrackGrade};
use crate::profile::ProfileConfig;
use crate::tags::{TagString, WayTags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AccessVerdict {
    /// A regular way the profile may travel.
    Usable,
    /// A ferry line the profile may travel; its speed comes from the ferry path.
    Ferry,
    /// The way receives no attributes for this profile.
    Excluded,
}

impl AccessVerdict {
    #[inline]
    pub const fn is_excluded(&self) -> bool {
        matches!(self, AccessVerdict::Excluded)
    }

    #[inline]
    pub const fn is_ferry(&self) -> bool {
        matches!(self, AccessVerdict::Ferry)
    }
}

/// Classifies whole ways for one profile.
///
/// Rules are checked in a fixed order and the first decisive rule wins;
/// a way no rule rejects is usable.
#[derive(Debug, Clone, Copy)]
pub struct AccessClassifier<'a> {
    profile: &'a ProfileConfig,
}

impl<'a> AccessClassifier<'a> {
    pub fn new(profile: &'a ProfileConfig) -> Self {
        AccessClassifier { profile }
    }

    pub fn classify(&self, tags: &WayTags) -> AccessVerdict {
        let verdict = self.verdict(tags);

        if verdict.is_excluded() {
            debug!(
                "{} excludes way (highway={:?}, route={:?})",
                self.profile.kind,
                tags.highway(),
                tags.get(TagString::ROUTE)
            );
        }

        verdict
    }

    fn verdict(&self, tags: &WayTags) -> AccessVerdict {
        let rules = &self.profile.access;
        let first_value = tags.first_priority_value(&rules.restrictions);

        let Some(highway) = tags.highway() else {
            if self.profile.is_walkable_structure(tags) {
                return self.structure_verdict(tags, first_value);
            }

            return self.ferry_verdict(tags, first_value);
        };

        if highway == "service" && tags.has_tag(TagString::SERVICE, "emergency_access") {
            return AccessVerdict::Excluded;
        }

        let Some(class) = RoadClass::parse(highway) else {
            return AccessVerdict::Excluded;
        };

        if class == RoadClass::Track && !self.permits_track(tags) {
            return AccessVerdict::Excluded;
        }

        if !rules.road_classes.contains(&class) {
            return AccessVerdict::Excluded;
        }

        if tags.has_tag(TagString::IMPASSABLE, "yes") || tags.has_tag(TagString::STATUS, "impassable") {
            return AccessVerdict::Excluded;
        }

        let conditional = ConditionalAccess::from_tags(tags, &rules.restrictions);
        let conditionally_restricted = conditional.restricts(&rules.restricted, rules.reference_date);
        let conditionally_permitted = conditional.permits(&rules.intended, rules.reference_date);

        for value in AccessValue::alternatives(first_value) {
            if rules.restricted.contains(&value) && !conditionally_permitted {
                return AccessVerdict::Excluded;
            }

            if rules.intended.contains(&value) && !conditionally_restricted {
                return AccessVerdict::Usable;
            }
        }

        if rules.block_fords && is_ford(class, tags) {
            return AccessVerdict::Excluded;
        }

        if conditionally_restricted {
            return AccessVerdict::Excluded;
        }

        AccessVerdict::Usable
    }

    /// Ways without a road class are only travelled as ferries.
    fn ferry_verdict(&self, tags: &WayTags, first_value: &str) -> AccessVerdict {
        let rules = &self.profile.access;

        if !rules.include_ferries || !tags.has_any(TagString::ROUTE, &rules.ferry_routes) {
            return AccessVerdict::Excluded;
        }

        let values = AccessValue::alternatives(first_value).collect::<Vec<_>>();
        if values.iter().any(|value| rules.restricted.contains(value)) {
            return AccessVerdict::Excluded;
        }

        if values.iter().any(|value| rules.intended.contains(value)) {
            return AccessVerdict::Ferry;
        }

        // Implied default access, unless the ferry is tagged for other modes
        let contradicted = rules.ferry_contradictions.iter().any(|key| tags.has(key));
        if first_value.trim().is_empty() && !contradicted {
            return AccessVerdict::Ferry;
        }

        AccessVerdict::Excluded
    }

    /// Platforms and piers only answer to the restriction hierarchy.
    fn structure_verdict(&self, tags: &WayTags, first_value: &str) -> AccessVerdict {
        let rules = &self.profile.access;
        let conditional = ConditionalAccess::from_tags(tags, &rules.restrictions);
        let permitted = conditional.permits(&rules.intended, rules.reference_date);

        let closed = AccessValue::alternatives(first_value).any(|value| rules.restricted.contains(&value))
            || conditional.restricts(&rules.restricted, rules.reference_date);

        if closed && !permitted {
            return AccessVerdict::Excluded;
        }

        AccessVerdict::Usable
    }

    fn permits_track(&self, tags: &WayTags) -> bool {
        let rules = &self.profile.access;

        match tags.get(TagString::TRACK_TYPE) {
            None => rules.allow_ungraded_track,
            Some(value) => value
                .parse::<TrackGrade>()
                .is_ok_and(|grade| rules.track_grades.contains(&grade)),
        }
    }
}

fn is_ford(class: RoadClass, tags: &WayTags) -> bool {
    class == RoadClass::Ford || tags.get(TagString::FORD).is_some_and(|ford| ford != "no")
}
