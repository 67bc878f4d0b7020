//! Maps the dimensioning result onto concrete catalog items.
//!
//! The selector never fails: a category without a suitable item is reported as
//! [`Slot::Unmatched`], so that a partial quote can still be produced.

mod battery;
mod controller;
mod inverter;
mod panel;

use bon::Builder;
use enumset::EnumSet;

use crate::{
    catalog::{
        BatteryChemistry,
        Catalog,
        Category,
        ControllerType,
        InverterFamily,
        ItemId,
        PhaseType,
    },
    core::dimensioning::DimensioningResult,
    prelude::*,
    quantity::power::Watts,
};

/// Equipment families the customer asked for.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct Preferences {
    pub chemistry: BatteryChemistry,
    pub inverter_family: InverterFamily,

    /// Any controller type is accepted when not specified.
    pub controller_type: Option<ControllerType>,

    #[builder(default = PhaseType::Single)]
    pub phase: PhaseType,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pick {
    pub id: ItemId,
    pub quantity: u32,
}

impl Pick {
    pub fn new(id: &ItemId, quantity: u32) -> Self {
        Self { id: id.clone(), quantity }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Slot {
    Picked(Pick),

    /// Nothing to buy in this category: zero requirement, or a hybrid inverter
    /// that embeds its own charger.
    NotRequired,

    /// No catalog item or combination satisfies the requirement.
    Unmatched,
}

impl Slot {
    pub const fn pick(&self) -> Option<&Pick> {
        match self {
            Self::Picked(pick) => Some(pick),
            Self::NotRequired | Self::Unmatched => None,
        }
    }

    pub const fn is_unmatched(&self) -> bool {
        matches!(self, Self::Unmatched)
    }
}

#[must_use]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EquipmentSelection {
    pub panels: Slot,
    pub battery: Slot,
    pub inverter: Slot,
    pub controller: Slot,
}

impl EquipmentSelection {
    /// Slots in the quoting order.
    pub fn slots(&self) -> [(Category, &Slot); 4] {
        [
            (Category::Panel, &self.panels),
            (Category::Battery, &self.battery),
            (Category::Inverter, &self.inverter),
            (Category::ChargeController, &self.controller),
        ]
    }

    /// Categories the catalog could not satisfy.
    pub fn missing(&self) -> EnumSet<Category> {
        self.slots()
            .into_iter()
            .filter(|(_, slot)| slot.is_unmatched())
            .map(|(category, _)| category)
            .collect()
    }
}

#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Selector<'a> {
    catalog: &'a Catalog,
    dimensioning: &'a DimensioningResult,
    preferences: Preferences,
}

impl<S: selector_builder::IsComplete> SelectorBuilder<'_, S> {
    pub fn select(self) -> EquipmentSelection {
        self.build().select()
    }
}

impl Selector<'_> {
    #[instrument(
        skip_all,
        fields(
            peak_power = %self.dimensioning.peak_power,
            battery_capacity = %self.dimensioning.battery_capacity,
            inverter_power = %self.dimensioning.inverter_power,
            voltage = %self.dimensioning.voltage,
        ),
    )]
    fn select(self) -> EquipmentSelection {
        let required_peak_power = self.dimensioning.peak_power;
        let voltage = self.dimensioning.voltage;

        let (panels, installed_power) = if required_peak_power <= Watts::ZERO {
            (Slot::NotRequired, Watts::ZERO)
        } else if let Some((panel, count)) =
            panel::select(&self.catalog.panels, required_peak_power)
        {
            info!(id = %panel.listing.id, count, "selected panels");
            (Slot::Picked(Pick::new(&panel.listing.id, count)), panel.peak_power * f64::from(count))
        } else {
            warn!(%required_peak_power, "no panel matches");
            // Size the charge controller for the nominal requirement:
            (Slot::Unmatched, required_peak_power)
        };

        let battery = if self.dimensioning.battery_capacity.0 <= 0.0 {
            Slot::NotRequired
        } else if let Some((battery, count)) = battery::select(
            &self.catalog.batteries,
            self.dimensioning.battery_capacity,
            voltage,
            self.preferences.chemistry,
        ) {
            info!(id = %battery.listing.id, count, "selected batteries");
            Slot::Picked(Pick::new(&battery.listing.id, count))
        } else {
            warn!(chemistry = %self.preferences.chemistry, %voltage, "no battery matches");
            Slot::Unmatched
        };

        let (inverter, inverter_family) = if self.dimensioning.inverter_power <= Watts::ZERO {
            (Slot::NotRequired, None)
        } else if let Some((inverter, count)) = inverter::select(
            &self.catalog.inverters,
            self.dimensioning.inverter_power,
            voltage,
            &self.preferences,
        ) {
            info!(id = %inverter.listing.id, family = %inverter.family, count, "selected inverters");
            (Slot::Picked(Pick::new(&inverter.listing.id, count)), Some(inverter.family))
        } else {
            warn!(family = %self.preferences.inverter_family, "no inverter matches");
            (Slot::Unmatched, None)
        };

        let controller = if inverter_family == Some(InverterFamily::Hybrid)
            || installed_power <= Watts::ZERO
        {
            Slot::NotRequired
        } else if let Some(controller) = controller::select(
            &self.catalog.controllers,
            installed_power,
            voltage,
            self.preferences.controller_type,
        ) {
            info!(id = %controller.listing.id, "selected the charge controller");
            Slot::Picked(Pick::new(&controller.listing.id, 1))
        } else {
            warn!(%installed_power, "no charge controller matches");
            Slot::Unmatched
        };

        EquipmentSelection { panels, battery, inverter, controller }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::tests::catalog,
        core::{
            dimensioning::{DimensioningParameters, LoadSpecification},
            system::SystemVoltage,
        },
        quantity::energy::KilowattHours,
    };

    fn dimension(daily_energy: f64, chemistry: BatteryChemistry) -> DimensioningResult {
        dimension_at(daily_energy, SystemVoltage::V48, chemistry)
    }

    fn dimension_at(
        daily_energy: f64,
        voltage: SystemVoltage,
        chemistry: BatteryChemistry,
    ) -> DimensioningResult {
        let specification = LoadSpecification::builder()
            .daily_energy(KilowattHours(daily_energy))
            .voltage(voltage)
            .chemistry(chemistry)
            .build();
        DimensioningParameters::default().dimension(&specification).unwrap()
    }

    fn preferences(family: InverterFamily) -> Preferences {
        Preferences::builder()
            .chemistry(BatteryChemistry::Lithium)
            .inverter_family(family)
            .controller_type(ControllerType::Mppt)
            .build()
    }

    #[test]
    fn test_hybrid_needs_no_controller() {
        let catalog = catalog();
        let dimensioning = dimension(10.0, BatteryChemistry::Lithium);
        let selection = Selector::builder()
            .catalog(&catalog)
            .dimensioning(&dimensioning)
            .preferences(preferences(InverterFamily::Hybrid))
            .select();
        assert_eq!(selection.panels, Slot::Picked(Pick::new(&ItemId::from("pv-550"), 5)));
        assert_eq!(selection.battery, Slot::Picked(Pick::new(&ItemId::from("lfp-48-200"), 1)));
        assert_eq!(selection.inverter, Slot::Picked(Pick::new(&ItemId::from("hy-5000"), 1)));
        assert_eq!(selection.controller, Slot::NotRequired);
        assert!(selection.missing().is_empty());
    }

    #[test]
    fn test_off_grid_gets_controller() {
        let catalog = catalog();
        let dimensioning = dimension(6.0, BatteryChemistry::Lithium);
        let selection = Selector::builder()
            .catalog(&catalog)
            .dimensioning(&dimensioning)
            .preferences(preferences(InverterFamily::OffGrid))
            .select();
        // 1500 W → 3 × 550 W = 1650 W, 1650 / 48 × 1.25 ≈ 43 A:
        assert_eq!(selection.inverter, Slot::Picked(Pick::new(&ItemId::from("og-3000"), 1)));
        assert_eq!(selection.controller, Slot::Picked(Pick::new(&ItemId::from("mppt-60"), 1)));
    }

    #[test]
    fn test_missing_categories() {
        let catalog = catalog();
        let dimensioning = dimension(10.0, BatteryChemistry::Gel);
        let gel = Preferences {
            chemistry: BatteryChemistry::Gel,
            ..preferences(InverterFamily::Hybrid)
        };
        let selection = Selector::builder()
            .catalog(&catalog)
            .dimensioning(&dimensioning)
            .preferences(gel)
            .select();
        assert_eq!(selection.battery, Slot::Unmatched);
        assert_eq!(selection.missing(), EnumSet::only(Category::Battery));
    }

    #[test]
    fn test_empty_catalog_never_panics() {
        let catalog = Catalog::default();
        let dimensioning = dimension(10.0, BatteryChemistry::Lithium);
        let selection = Selector::builder()
            .catalog(&catalog)
            .dimensioning(&dimensioning)
            .preferences(preferences(InverterFamily::OffGrid))
            .select();
        assert_eq!(selection.missing(), EnumSet::all());
    }

    #[test]
    fn test_zero_consumption_requires_nothing() {
        let catalog = catalog();
        let dimensioning = dimension(0.0, BatteryChemistry::Lithium);
        let selection = Selector::builder()
            .catalog(&catalog)
            .dimensioning(&dimensioning)
            .preferences(preferences(InverterFamily::OffGrid))
            .select();
        assert!(selection.slots().iter().all(|(_, slot)| **slot == Slot::NotRequired));
    }

    #[test]
    fn test_battery_follows_dimensioning_voltage() {
        let catalog = catalog();
        // 10 kWh/day at 400 V: 5 kWh at night / 0.9 / 0.93 ≈ 5.97 kWh of storage.
        let dimensioning =
            dimension_at(10.0, SystemVoltage::HighVoltage, BatteryChemistry::Lithium);
        let selection = Selector::builder()
            .catalog(&catalog)
            .dimensioning(&dimensioning)
            .preferences(preferences(InverterFamily::Hybrid))
            .select();
        assert_eq!(selection.battery, Slot::Picked(Pick::new(&ItemId::from("hv-10"), 1)));
    }

    #[test]
    fn test_unbounded_battery_bank_is_unmatched() {
        let catalog = catalog();
        let dimensioning = dimension(1e14, BatteryChemistry::Lithium);
        let selection = Selector::builder()
            .catalog(&catalog)
            .dimensioning(&dimensioning)
            .preferences(preferences(InverterFamily::Hybrid))
            .select();
        assert_eq!(selection.battery, Slot::Unmatched);
        assert_eq!(selection.panels, Slot::Unmatched);
        assert_eq!(selection.inverter, Slot::Unmatched);
        assert!(selection.missing().contains(Category::Battery));
    }
}
