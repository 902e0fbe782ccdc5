use approx::assert_relative_eq;

use crate::encoded::{DecimalSlot, QuantizedSlot, SlotError};
use crate::primitives::Direction;
use crate::priority::PriorityCode;

#[test_log::test]
fn layout_validation() {
    assert!(QuantizedSlot::new(5, 5.0, true).is_ok());
    assert_eq!(
        QuantizedSlot::new(0, 5.0, true).unwrap_err(),
        SlotError::InvalidLayout {
            bits: 0,
            factor: 5.0
        }
    );
    assert!(QuantizedSlot::new(32, 1.0, true).is_err());
    assert!(QuantizedSlot::new(4, 0.0, false).is_err());
    assert!(QuantizedSlot::new(4, f64::INFINITY, false).is_err());
}

#[test_log::test]
fn range_of_speed_slot() {
    let slot = QuantizedSlot::speed();

    assert_relative_eq!(slot.max_storable(), 155.0);
    assert_relative_eq!(slot.smallest_non_zero(), 5.0);
    assert_relative_eq!(slot.next_storable(117.0), 115.0);
    assert_relative_eq!(slot.next_storable(118.0), 120.0);
    assert_relative_eq!(slot.next_storable(2.0), 0.0);
    assert_relative_eq!(slot.next_storable(500.0), 155.0);
    assert_relative_eq!(slot.next_storable(-3.0), 0.0);
    assert_relative_eq!(slot.next_storable(f64::NAN), 0.0);
}

#[test_log::test]
fn directional_storage() {
    let mut slot = QuantizedSlot::speed();

    slot.set(3, Direction::Forward, 50.0).expect("storable");
    slot.set(3, Direction::Backward, 30.0).expect("storable");

    assert_eq!(slot.len(), 4);
    assert_relative_eq!(slot.get(3, Direction::Forward), 50.0);
    assert_relative_eq!(slot.get(3, Direction::Backward), 30.0);

    // Unwritten edges read as zero
    assert_relative_eq!(slot.get(1, Direction::Forward), 0.0);
    assert_relative_eq!(slot.get(40, Direction::Backward), 0.0);
}

#[test_log::test]
fn single_direction_storage() {
    let mut slot = QuantizedSlot::speed().single_direction();
    assert!(!slot.store_two_directions());

    slot.set(0, Direction::Forward, 25.0).expect("storable");
    assert_relative_eq!(slot.get(0, Direction::Backward), 25.0);

    assert_eq!(
        slot.set(0, Direction::Backward, 25.0),
        Err(SlotError::NoStorage {
            edge: 0,
            direction: Direction::Backward
        })
    );
}

#[test_log::test]
fn rejects_values_it_cannot_represent() {
    let mut slot = QuantizedSlot::speed();

    assert_eq!(
        slot.set(0, Direction::Forward, 200.0),
        Err(SlotError::OutOfRange {
            value: 200.0,
            max: 155.0
        })
    );
    assert!(slot.set(0, Direction::Forward, -1.0).is_err());
    assert!(slot.set(0, Direction::Forward, f64::INFINITY).is_err());
    assert!(slot.is_empty());
}

#[test_log::test]
fn priority_factors_are_exact() {
    let mut slot = QuantizedSlot::priority();

    for (edge, code) in PriorityCode::ALL.into_iter().enumerate() {
        slot.set(edge, Direction::Forward, code.factor()).expect("storable");
        assert_relative_eq!(slot.get(edge, Direction::Forward), code.factor(), epsilon = 1e-9);
    }
}
