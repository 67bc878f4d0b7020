use ordered_float::OrderedFloat;

use crate::{catalog::Panel, quantity::power::Watts};

/// Number of panels needed to reach the required peak power, or [`None`] when
/// the count does not fit.
fn count(required: Watts, unit: Watts) -> Option<u32> {
    let count = (required / unit).ceil();
    if !count.is_finite() || count > f64::from(u32::MAX) {
        return None;
    }
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = count as u32;
    Some(count)
}

/// Pick the panel which minimizes the panel count, then price per watt,
/// and prefers the more powerful module on a tie.
pub fn select(panels: &[Panel], required: Watts) -> Option<(&Panel, u32)> {
    panels
        .iter()
        .filter(|panel| panel.peak_power > Watts::ZERO)
        .filter_map(|panel| Some((panel, count(required, panel.peak_power)?)))
        .min_by_key(|(panel, count)| {
            (
                *count,
                OrderedFloat(panel.listing.price / panel.peak_power),
                -panel.peak_power,
            )
        })
}
