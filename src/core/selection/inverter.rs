use std::{cmp::Reverse, iter};

use crate::{
    catalog::{Inverter, InverterFamily},
    core::{selection::Preferences, system::SystemVoltage},
    prelude::*,
    quantity::power::Watts,
};

/// Families to try, in order, when the requested family has no single unit
/// powerful enough.
pub const UPGRADE_PATHS: [(InverterFamily, &[InverterFamily]); 4] = [
    (
        InverterFamily::OffGrid,
        &[InverterFamily::Hybrid, InverterFamily::Online, InverterFamily::ThreePhaseOnline],
    ),
    (InverterFamily::Hybrid, &[InverterFamily::Online, InverterFamily::ThreePhaseOnline]),
    (InverterFamily::Online, &[InverterFamily::ThreePhaseOnline]),
    (InverterFamily::ThreePhaseOnline, &[]),
];

/// Practical ceiling on the number of inverters run in parallel.
pub const MAX_COUPLED_UNITS: u32 = 4;

fn upgrades(family: InverterFamily) -> &'static [InverterFamily] {
    UPGRADE_PATHS
        .iter()
        .find_map(|(from, to)| (*from == family).then_some(*to))
        .unwrap_or_default()
}

fn is_compatible(inverter: &Inverter, voltage: SystemVoltage, preferences: &Preferences) -> bool {
    voltage.accepts_inverter(inverter.voltage) && inverter.phase == preferences.phase
}

/// Smallest (then cheapest) single unit of the family that covers the requirement.
fn single_unit<'a>(
    inverters: &'a [Inverter],
    family: InverterFamily,
    required: Watts,
    voltage: SystemVoltage,
    preferences: &Preferences,
) -> Option<&'a Inverter> {
    inverters
        .iter()
        .filter(|inverter| inverter.family == family && inverter.power >= required)
        .filter(|inverter| is_compatible(inverter, voltage, preferences))
        .min_by_key(|inverter| (inverter.power, inverter.listing.price))
}

/// Parallel units of the most powerful inverter in the requested family.
fn coupled_units<'a>(
    inverters: &'a [Inverter],
    required: Watts,
    voltage: SystemVoltage,
    preferences: &Preferences,
) -> Option<(&'a Inverter, u32)> {
    let inverter = inverters
        .iter()
        .filter(|inverter| inverter.family == preferences.inverter_family)
        .filter(|inverter| inverter.power > Watts::ZERO)
        .filter(|inverter| is_compatible(inverter, voltage, preferences))
        .max_by_key(|inverter| (inverter.power, Reverse(inverter.listing.price)))?;

    let count = (required / inverter.power).floor() + 1.0;
    if !count.is_finite() || count > f64::from(MAX_COUPLED_UNITS) {
        debug!(id = %inverter.listing.id, count, "too many units to couple");
        return None;
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count as u32;

    Some((inverter, count))
}

pub fn select<'a>(
    inverters: &'a [Inverter],
    required: Watts,
    voltage: SystemVoltage,
    preferences: &Preferences,
) -> Option<(&'a Inverter, u32)> {
    let requested = preferences.inverter_family;
    iter::once(requested)
        .chain(upgrades(requested).iter().copied())
        .find_map(|family| {
            let inverter = single_unit(inverters, family, required, voltage, preferences)?;
            if family != requested {
                info!(from = %requested, to = %family, "upgraded the inverter family");
            }
            Some((inverter, 1))
        })
        .or_else(|| coupled_units(inverters, required, voltage, preferences))
}
