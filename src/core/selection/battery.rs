use itertools::Itertools;

use crate::{
    catalog::{Battery, BatteryChemistry},
    core::system::SystemVoltage,
    prelude::*,
    quantity::charge::AmpHours,
};

/// Pick the smallest battery that covers the requirement on its own, or else
/// as many of the largest battery as needed.
///
/// High-voltage stacks are compared by stored energy, the rest by capacity.
pub fn select<'a>(
    batteries: &'a [Battery],
    required: AmpHours,
    voltage: SystemVoltage,
    chemistry: BatteryChemistry,
) -> Option<(&'a Battery, u32)> {
    let (chemistry, required) = if voltage.is_high_voltage() {
        (BatteryChemistry::HighVoltageLithium, (required * voltage.nominal()).0)
    } else {
        (chemistry, required.0)
    };
    let measure = |battery: &Battery| {
        if voltage.is_high_voltage() { battery.stored_energy().0 } else { battery.capacity.0 }
    };

    let candidates = batteries
        .iter()
        .filter(|battery| battery.chemistry == chemistry && voltage.accepts_battery(battery.voltage))
        .map(|battery| (battery, measure(battery)))
        .filter(|(_, capacity)| *capacity > 0.0)
        .sorted_by(|(_, lhs), (_, rhs)| lhs.total_cmp(rhs))
        .collect_vec();

    if let Some((battery, _)) = candidates.iter().find(|(_, capacity)| *capacity >= required) {
        return Some((*battery, 1));
    }
    let (largest, capacity) = candidates.last()?;
    let count = count(required, *capacity);
    if count.is_none() {
        debug!(id = %largest.listing.id, required, "battery bank would be unbounded");
    }
    Some((*largest, count?))
}

/// Units needed when no single one suffices, or [`None`] when the count does not fit.
fn count(required: f64, unit: f64) -> Option<u32> {
    let count = (required / unit).floor() + 1.0;
    if !count.is_finite() || count > f64::from(u32::MAX) {
        return None;
    }
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count as u32;
    Some(count)
}
