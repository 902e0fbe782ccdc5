//! Per-way orchestration: access first, then speed and priority per
//! direction, then the writes into the edge slots.

pub mod input;
#[cfg(test)]
mod test;

use log::{debug, warn};
use rayon::prelude::*;

use crate::access::{AccessClassifier, AccessVerdict};
use crate::encoded::{DecimalSlot, SlotError};
use crate::error::Error;
use crate::primitives::{Direction, DirectionalValue};
use crate::priority::{PriorityCode, PriorityResolver};
use crate::profile::ProfileConfig;
use crate::speed::{FerrySpeed, SpeedResolver};

pub use input::WayInput;

/// The attributes derived for one way.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeAttributes {
    pub access: AccessVerdict,
    /// Speed in km/h, as computed, before slot rounding.
    pub speed: DirectionalValue<f64>,
    /// `None` for ways the profile stores no priority for.
    pub priority: Option<DirectionalValue<PriorityCode>>,
}

/// Runs the resolvers of one profile over ways.
///
/// Holds no state besides the borrowed profile, so a single processor
/// can be shared across threads.
#[derive(Clone, Copy)]
pub struct WayProcessor<'a> {
    profile: &'a ProfileConfig,
    access: AccessClassifier<'a>,
    speed: SpeedResolver<'a>,
    priority: PriorityResolver<'a>,
}

impl<'a> WayProcessor<'a> {
    pub fn new(profile: &'a ProfileConfig) -> Self {
        WayProcessor {
            profile,
            access: AccessClassifier::new(profile),
            speed: SpeedResolver::new(profile),
            priority: PriorityResolver::new(profile),
        }
    }

    pub fn with_ferry_speed(profile: &'a ProfileConfig, ferry: &'a dyn FerrySpeed) -> Self {
        WayProcessor {
            speed: SpeedResolver::with_ferry_speed(profile, ferry),
            ..WayProcessor::new(profile)
        }
    }

    pub fn profile(&self) -> &'a ProfileConfig {
        self.profile
    }

    /// Derives the attributes of a way, `None` when access excludes it.
    pub fn resolve(&self, input: &WayInput) -> Option<EdgeAttributes> {
        let access = self.access.classify(&input.tags);
        if access.is_excluded() {
            return None;
        }

        let speed = DirectionalValue::from_fn(|direction| self.speed.resolve(input, direction));
        let priority = self.priority.applies(input).then(|| {
            DirectionalValue::from_fn(|direction| self.priority.resolve(input, direction))
        });

        Some(EdgeAttributes {
            access,
            speed,
            priority,
        })
    }

    /// Resolves many ways in parallel. Results are in input order.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = "debug"))]
    pub fn resolve_batch(&self, inputs: &[WayInput]) -> Vec<Option<EdgeAttributes>> {
        inputs.par_iter().map(|input| self.resolve(input)).collect()
    }

    /// Resolves a way and writes its attributes into the slots of `edge`.
    /// Excluded ways leave the slots untouched.
    pub fn process<S, P>(
        &self,
        edge: usize,
        input: &WayInput,
        speed_slot: &mut S,
        priority_slot: &mut P,
    ) -> Result<Option<EdgeAttributes>, Error>
    where
        S: DecimalSlot + ?Sized,
        P: DecimalSlot + ?Sized,
    {
        let Some(attributes) = self.resolve(input) else {
            debug!("Skipping edge {edge}, excluded for {}", self.profile.kind);
            return Ok(None);
        };

        self.write(edge, &attributes, speed_slot, priority_slot)?;
        Ok(Some(attributes))
    }

    /// Resolves `(edge, way)` pairs in parallel, then writes them in order.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = "debug"))]
    pub fn process_batch<S, P>(
        &self,
        ways: &[(usize, WayInput)],
        speed_slot: &mut S,
        priority_slot: &mut P,
    ) -> Result<Vec<Option<EdgeAttributes>>, Error>
    where
        S: DecimalSlot + ?Sized,
        P: DecimalSlot + ?Sized,
    {
        let resolved = ways
            .par_iter()
            .map(|(_, input)| self.resolve(input))
            .collect::<Vec<_>>();

        for ((edge, _), attributes) in ways.iter().zip(&resolved) {
            if let Some(attributes) = attributes {
                self.write(*edge, attributes, speed_slot, priority_slot)?;
            }
        }

        Ok(resolved)
    }

    fn write<S, P>(
        &self,
        edge: usize,
        attributes: &EdgeAttributes,
        speed_slot: &mut S,
        priority_slot: &mut P,
    ) -> Result<(), Error>
    where
        S: DecimalSlot + ?Sized,
        P: DecimalSlot + ?Sized,
    {
        for direction in Direction::BOTH {
            store(speed_slot, edge, direction, *attributes.speed.get(direction), "speed")?;

            if let Some(priority) = &attributes.priority {
                let factor = priority.get(direction).factor();
                store(priority_slot, edge, direction, factor, "priority")?;
            }
        }

        Ok(())
    }
}

/// Writes one direction, rounded to what the slot holds. Positive values
/// never round down to zero, and single-direction slots only take forward.
fn store<S>(
    slot: &mut S,
    edge: usize,
    direction: Direction,
    value: f64,
    name: &str,
) -> Result<(), SlotError>
where
    S: DecimalSlot + ?Sized,
{
    if direction.is_reverse() && !slot.store_two_directions() {
        return Ok(());
    }

    let max = slot.max_storable();
    if value > max {
        warn!("Clamping {name} {value} to {max} on edge {edge} {direction}");
    }

    let mut stored = slot.next_storable(value);
    if stored <= 0.0 && value > 0.0 {
        stored = slot.smallest_non_zero();
    }

    slot.set(edge, direction, stored)
}
