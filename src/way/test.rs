use approx::assert_relative_eq;

use crate::access::AccessVerdict;
use crate::encoded::{DecimalSlot, QuantizedSlot, SlotError};
use crate::error::Error;
use crate::primitives::{Direction, DirectionalValue};
use crate::priority::PriorityCode;
use crate::profile::{ProfileConfig, ProfileKind};
use crate::way::{WayInput, WayProcessor};

fn slots() -> (QuantizedSlot, QuantizedSlot) {
    (QuantizedSlot::speed(), QuantizedSlot::priority())
}

#[test_log::test]
fn relation_priority_beats_avoided_track() {
    let profile = ProfileConfig::new(ProfileKind::Car);
    let processor = WayProcessor::new(&profile);

    let input = WayInput::new([("highway", "track"), ("motor_vehicle", "private")])
        .with_relation_priority(PriorityCode::VeryNice);

    // motor_vehicle=private alone closes the way to cars
    assert_eq!(processor.resolve(&input), None);

    let input = WayInput::new([("highway", "track"), ("motor_vehicle", "private"), ("motorcar", "yes")])
        .with_relation_priority(PriorityCode::VeryNice);

    let attributes = processor.resolve(&input).expect("usable way");
    assert_eq!(attributes.access, AccessVerdict::Usable);
    assert_eq!(
        attributes.priority,
        Some(DirectionalValue::splat(PriorityCode::VeryNice))
    );
}

#[test_log::test]
fn writes_both_directions() {
    let profile = ProfileConfig::new(ProfileKind::Car);
    let processor = WayProcessor::new(&profile);
    let (mut speed, mut priority) = slots();

    let input = WayInput::new([
        ("highway", "primary"),
        ("maxspeed:forward", "100"),
        ("maxspeed:backward", "50"),
        ("motor_vehicle:backward", "private"),
        ("motorcar", "yes"),
    ]);

    let attributes = processor
        .process(7, &input, &mut speed, &mut priority)
        .expect("storable")
        .expect("usable way");

    assert_relative_eq!(attributes.speed.forward, 90.0);
    assert_relative_eq!(attributes.speed.backward, 45.0);

    assert_relative_eq!(speed.get(7, Direction::Forward), 90.0);
    // 45 km/h is a multiple of the slot step
    assert_relative_eq!(speed.get(7, Direction::Backward), 45.0);

    assert_relative_eq!(priority.get(7, Direction::Forward), 1.0, epsilon = 1e-9);
    assert_relative_eq!(priority.get(7, Direction::Backward), 0.01, epsilon = 1e-9);
}

#[test_log::test]
fn values_are_rounded_to_the_slot() {
    let profile = ProfileConfig::new(ProfileKind::Car);
    let processor = WayProcessor::new(&profile);
    let (mut speed, mut priority) = slots();

    let input = WayInput::new([("highway", "motorway"), ("maxspeed", "130")]);
    let attributes = processor
        .process(0, &input, &mut speed, &mut priority)
        .expect("storable")
        .expect("usable way");

    assert_relative_eq!(attributes.speed.forward, 117.0);
    assert_relative_eq!(speed.get(0, Direction::Forward), 115.0);

    // Positive speeds never store as zero
    let input = WayInput::new([("highway", "residential"), ("avgspeed", "1")]);
    processor
        .process(1, &input, &mut speed, &mut priority)
        .expect("storable");
    assert_relative_eq!(speed.get(1, Direction::Forward), 5.0);
}

#[test_log::test]
fn excluded_ways_write_nothing() {
    let profile = ProfileConfig::new(ProfileKind::Car);
    let processor = WayProcessor::new(&profile);
    let (mut speed, mut priority) = slots();

    let input = WayInput::new([("highway", "residential"), ("access", "no")]);
    let result = processor
        .process(2, &input, &mut speed, &mut priority)
        .expect("nothing to store");

    assert_eq!(result, None);
    assert!(speed.is_empty());
    assert!(priority.is_empty());
}

#[test_log::test]
fn single_direction_slots_only_take_forward() {
    let profile = ProfileConfig::new(ProfileKind::Car);
    let processor = WayProcessor::new(&profile);
    let mut speed = QuantizedSlot::speed().single_direction();
    let mut priority = QuantizedSlot::priority().single_direction();

    let input = WayInput::new([
        ("highway", "secondary"),
        ("avgspeed:forward", "40"),
        ("avgspeed:backward", "20"),
    ]);

    processor
        .process(0, &input, &mut speed, &mut priority)
        .expect("no backward write is attempted");

    assert_eq!(speed.len(), 1);
    assert_relative_eq!(speed.get(0, Direction::Forward), 40.0);
    assert_relative_eq!(speed.get(0, Direction::Backward), 40.0);
}

#[test_log::test]
fn ferries_get_priority_only_in_ferry_profiles() {
    let ferry = WayInput::new([("route", "ferry")]).with_ferry_speed(25.0);

    let footferry = ProfileConfig::new(ProfileKind::Footferry);
    let attributes = WayProcessor::new(&footferry)
        .resolve(&ferry)
        .expect("ferry is usable");

    assert_eq!(attributes.access, AccessVerdict::Ferry);
    assert_eq!(attributes.speed, DirectionalValue::splat(15.0));
    assert_eq!(
        attributes.priority,
        Some(DirectionalValue::splat(PriorityCode::Unchanged))
    );

    let carferry = ProfileConfig::new(ProfileKind::Carferry);
    let attributes = WayProcessor::new(&carferry)
        .resolve(&ferry)
        .expect("ferry is usable");
    assert_eq!(attributes.speed, DirectionalValue::splat(25.0));

    let car = ProfileConfig::new(ProfileKind::Car);
    assert_eq!(WayProcessor::new(&car).resolve(&ferry), None);
}

#[test_log::test]
fn foot_profiles_process_platforms_and_piers() {
    let profile = ProfileConfig::new(ProfileKind::Foot);
    let processor = WayProcessor::new(&profile);

    for tags in [[("railway", "platform")], [("man_made", "pier")]] {
        let attributes = processor
            .resolve(&WayInput::new(tags))
            .expect("walkable structure");

        assert_eq!(attributes.access, AccessVerdict::Usable);
        assert_eq!(attributes.speed, DirectionalValue::splat(5.0));
        assert_eq!(
            attributes.priority,
            Some(DirectionalValue::splat(PriorityCode::Unchanged))
        );
    }

    let car = ProfileConfig::new(ProfileKind::Car);
    let platform = WayInput::new([("railway", "platform")]);
    assert_eq!(WayProcessor::new(&car).resolve(&platform), None);
}

#[test_log::test]
fn batch_matches_sequential() {
    let profile = ProfileConfig::new(ProfileKind::Motorcycle);
    let processor = WayProcessor::new(&profile);

    let inputs = vec![
        WayInput::new([("highway", "trunk")]),
        WayInput::new([("highway", "track"), ("tracktype", "grade5")]),
        WayInput::new([("highway", "residential"), ("surface", "sett"), ("maxspeed", "50")]),
        WayInput::new([("highway", "footway")]),
        WayInput::new([("highway", "tertiary"), ("fictional", "yes")])
            .with_relation_priority(PriorityCode::Prefer),
        WayInput::default(),
    ];

    let batch = processor.resolve_batch(&inputs);
    let sequential = inputs
        .iter()
        .map(|input| processor.resolve(input))
        .collect::<Vec<_>>();

    assert_eq!(batch, sequential);
    assert_eq!(batch.iter().filter(|result| result.is_some()).count(), 3);

    let ways = inputs.into_iter().enumerate().collect::<Vec<_>>();
    let (mut speed, mut priority) = slots();
    let processed = processor
        .process_batch(&ways, &mut speed, &mut priority)
        .expect("storable");

    assert_eq!(processed, sequential);
    assert_relative_eq!(speed.get(0, Direction::Forward), 80.0);
    assert_relative_eq!(speed.get(2, Direction::Backward), 30.0);
    assert_relative_eq!(speed.get(3, Direction::Forward), 0.0);
    assert_relative_eq!(priority.get(4, Direction::Forward), 1.2, epsilon = 1e-9);
}

/// A slot that refuses every write, as a storage layer might when full.
struct FullSlot;

impl DecimalSlot for FullSlot {
    fn store_two_directions(&self) -> bool {
        true
    }

    fn max_storable(&self) -> f64 {
        0.0
    }

    fn smallest_non_zero(&self) -> f64 {
        1.0
    }

    fn next_storable(&self, value: f64) -> f64 {
        value
    }

    fn set(&mut self, _: usize, _: Direction, value: f64) -> Result<(), SlotError> {
        Err(SlotError::OutOfRange { value, max: 0.0 })
    }

    fn get(&self, _: usize, _: Direction) -> f64 {
        0.0
    }
}

#[test_log::test]
fn slot_rejections_are_surfaced() {
    let profile = ProfileConfig::new(ProfileKind::Car);
    let processor = WayProcessor::new(&profile);
    let mut priority = QuantizedSlot::priority();

    let input = WayInput::new([("highway", "residential")]);
    let result = processor.process(0, &input, &mut FullSlot, &mut priority);

    assert!(matches!(
        result,
        Err(Error::Slot(SlotError::OutOfRange { max, .. })) if max == 0.0
    ));
}
