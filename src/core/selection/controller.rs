use crate::{
    catalog::{ChargeController, ControllerType},
    core::system::SystemVoltage,
    prelude::*,
    quantity::{current::Amperes, power::Watts},
};

/// Headroom over the nominal array current.
pub const SAFETY_MARGIN: f64 = 1.25;

pub fn required_current(installed_power: Watts, voltage: SystemVoltage) -> Amperes {
    installed_power / voltage.nominal() * SAFETY_MARGIN
}

/// Select the smallest sufficient controller, the cheapest one among equals.
///
/// Any controller type is accepted when `kind` is [`None`].
pub fn select(
    controllers: &[ChargeController],
    installed_power: Watts,
    voltage: SystemVoltage,
    kind: Option<ControllerType>,
) -> Option<&ChargeController> {
    let required = required_current(installed_power, voltage);
    trace!(%required, "looking for a charge controller");
    controllers
        .iter()
        .filter(|controller| kind.is_none_or(|kind| controller.kind == kind))
        .filter(|controller| controller.current >= required)
        .min_by_key(|controller| (controller.current, controller.listing.price))
}
