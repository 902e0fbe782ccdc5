//! Properties that must hold for every tag combination, not just the
//! hand-picked scenarios.

use proptest::prelude::*;
use strum::IntoEnumIterator;

use way_attributes::priority::{OverrideSet, OverrideTier};
use way_attributes::{
    DecimalSlot, Direction, PriorityCode, ProfileConfig, ProfileKind, QuantizedSlot,
    SpeedResolver, WayInput, WayProcessor, WayTags,
};

const KEYS: [&str; 14] = [
    "highway",
    "avgspeed",
    "avgspeed:forward",
    "avgspeed:backward",
    "maxspeed",
    "maxspeed:forward",
    "maxspeed:backward",
    "maxspeed:motorcycle",
    "surface",
    "tracktype",
    "route",
    "ascent:forward",
    "access",
    "motor_vehicle",
];

const VALUES: [&str; 24] = [
    "motorway",
    "residential",
    "track",
    "steps",
    "footway",
    "ferry",
    "grade1",
    "grade4",
    "gravel",
    "asphalt",
    "0",
    "-15",
    "0.2",
    "42",
    "130",
    "1e9",
    "NaN",
    "inf",
    "none",
    "walk",
    "30 mph",
    "private",
    "yes",
    "",
];

fn tags() -> impl Strategy<Value = WayTags> {
    prop::collection::vec(
        (prop::sample::select(KEYS.to_vec()), prop::sample::select(VALUES.to_vec())),
        0..8,
    )
    .prop_map(|pairs| pairs.into_iter().collect::<WayTags>())
}

fn way() -> impl Strategy<Value = WayInput> {
    (
        tags(),
        prop::option::of(-1.0f64..50.0),
        prop::option::of(-10.0f64..500.0),
        prop::option::of(prop::sample::select(PriorityCode::ALL.to_vec())),
    )
        .prop_map(|(tags, distance, ferry_speed, relation)| WayInput {
            tags,
            relation_priority: relation,
            distance_km: distance,
            ferry_speed,
        })
}

const DURATIONS: [&str; 8] = ["45", "00:30", "1:15", "02:00:30", "PT1H30M", "PT0S", "0", "soon"];

/// Ferry lines only: a ferry route, never a road class, with random
/// schedule, length and precomputed speed.
fn ferry_way() -> impl Strategy<Value = WayInput> {
    (
        prop::sample::select(vec!["ferry", "shuttle_train"]),
        prop::option::of(prop::sample::select(DURATIONS.to_vec())),
        prop::option::of(prop::sample::select(vec!["yes", "no", "designated"])),
        prop::option::of(-1.0f64..200.0),
        prop::option::of(prop_oneof![
            -10.0f64..500.0,
            Just(f64::NAN),
            Just(f64::INFINITY),
        ]),
    )
        .prop_map(|(route, duration, access, distance, ferry_speed)| {
            let mut tags = vec![("route", route)];
            tags.extend(duration.map(|duration| ("duration", duration)));
            tags.extend(access.map(|access| ("access", access)));

            WayInput {
                tags: tags.into_iter().collect(),
                relation_priority: None,
                distance_km: distance,
                ferry_speed,
            }
        })
}

fn profile() -> impl Strategy<Value = ProfileKind> {
    prop::sample::select(ProfileKind::iter().collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn speed_is_positive_and_bounded(kind in profile(), input in way()) {
        let profile = ProfileConfig::new(kind);
        let resolver = SpeedResolver::new(&profile);

        for direction in Direction::BOTH {
            let speed = resolver.resolve(&input, direction);
            prop_assert!(speed > 0.0, "{kind} {direction}: {speed}");
            prop_assert!(speed <= profile.speed.max_speed, "{kind} {direction}: {speed}");
        }
    }

    #[test]
    fn ferry_speed_is_symmetric(kind in profile(), input in ferry_way()) {
        let profile = ProfileConfig::new(kind);
        let resolver = SpeedResolver::new(&profile);
        prop_assert!(resolver.is_ferry(&input.tags));

        let forward = resolver.resolve(&input, Direction::Forward);
        let backward = resolver.resolve(&input, Direction::Backward);
        prop_assert_eq!(forward, backward);
        prop_assert!(forward >= profile.speed.speed_step, "{kind}: {forward}");
        prop_assert!(forward <= profile.speed.max_speed, "{kind}: {forward}");
    }

    #[test]
    fn greatest_tier_wins(
        codes in prop::collection::vec(prop::sample::select(PriorityCode::ALL.to_vec()), 3),
        order in Just(vec![OverrideTier::Default, OverrideTier::Demotion, OverrideTier::Relation])
            .prop_shuffle(),
    ) {
        let mut set = OverrideSet::default();
        for (tier, code) in order.iter().zip(&codes) {
            set.insert(*tier, *code);
        }

        let relation = order
            .iter()
            .position(|tier| *tier == OverrideTier::Relation)
            .map(|index| codes[index]);

        prop_assert_eq!(Some(set.resolve()), relation);
    }

    #[test]
    fn nearest_code_covers_weight(n in 0i32..=150) {
        let code = PriorityCode::nearest_at_or_above(n);
        prop_assert!(code.factor() >= n as f64 / 100.0);
        prop_assert!(code.weight() >= n);
    }

    #[test]
    fn nearest_code_above_scale_is_best(n in 151i32..i32::MAX) {
        prop_assert_eq!(PriorityCode::nearest_at_or_above(n), PriorityCode::Best);
    }

    #[test]
    fn excluded_ways_are_never_written(kind in profile(), input in way()) {
        let profile = ProfileConfig::new(kind);
        let processor = WayProcessor::new(&profile);
        let mut speed = QuantizedSlot::speed();
        let mut priority = QuantizedSlot::priority();

        let result = processor.process(0, &input, &mut speed, &mut priority);
        prop_assert!(result.is_ok());

        match result.ok().flatten() {
            None => {
                prop_assert!(speed.is_empty());
                prop_assert!(priority.is_empty());
            }
            Some(_) => {
                prop_assert!(speed.get(0, Direction::Forward) > 0.0);
                prop_assert!(speed.get(0, Direction::Backward) > 0.0);
            }
        }
    }

    #[test]
    fn batch_equals_sequential(kind in profile(), inputs in prop::collection::vec(way(), 0..32)) {
        let profile = ProfileConfig::new(kind);
        let processor = WayProcessor::new(&profile);

        let sequential = inputs.iter().map(|input| processor.resolve(input)).collect::<Vec<_>>();
        prop_assert_eq!(processor.resolve_batch(&inputs), sequential);
    }
}
