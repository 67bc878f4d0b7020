//! Read-only equipment catalog snapshot supplied by the storefront.

mod battery;
mod controller;
mod inverter;
mod panel;

use std::{fs, path::Path};

use enumset::EnumSetType;
use serde::{Deserialize, Serialize};

pub use self::{
    battery::{Battery, BatteryChemistry},
    controller::{ChargeController, ControllerType},
    inverter::{Inverter, InverterFamily, PhaseType},
    panel::Panel,
};
use crate::{prelude::*, quantity::cost::Cost};

#[derive(Debug, derive_more::Display, EnumSetType)]
pub enum Category {
    #[display("panels")]
    Panel,

    #[display("battery")]
    Battery,

    #[display("inverter")]
    Inverter,

    #[display("charge controller")]
    ChargeController,
}

#[derive(
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::From,
)]
pub struct ItemId(String);

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Attributes every purchasable item carries regardless of its category.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Listing {
    pub id: ItemId,
    pub name: String,

    #[serde(rename = "price_fcfa")]
    pub price: Cost,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "category", rename_all = "kebab-case")]
pub enum CatalogItem {
    Panel(Panel),
    Battery(Battery),
    Inverter(Inverter),
    ChargeController(ChargeController),
}

#[must_use]
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub panels: Vec<Panel>,
    pub batteries: Vec<Battery>,
    pub inverters: Vec<Inverter>,
    pub controllers: Vec<ChargeController>,
}

impl FromIterator<CatalogItem> for Catalog {
    fn from_iter<T: IntoIterator<Item = CatalogItem>>(iterator: T) -> Self {
        let mut catalog = Self::default();
        for item in iterator {
            match item {
                CatalogItem::Panel(panel) => catalog.panels.push(panel),
                CatalogItem::Battery(battery) => catalog.batteries.push(battery),
                CatalogItem::Inverter(inverter) => catalog.inverters.push(inverter),
                CatalogItem::ChargeController(controller) => catalog.controllers.push(controller),
            }
        }
        catalog
    }
}

impl Catalog {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the catalog from `{}`", path.display()))?;
        let catalog = Self::from_json(&contents)
            .with_context(|| format!("failed to parse the catalog `{}`", path.display()))?;
        info!(
            n_panels = catalog.panels.len(),
            n_batteries = catalog.batteries.len(),
            n_inverters = catalog.inverters.len(),
            n_controllers = catalog.controllers.len(),
            "loaded the catalog",
        );
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Vec<CatalogItem>>(json)?.into_iter().collect())
    }

    pub fn listing(&self, category: Category, id: &ItemId) -> Option<&Listing> {
        match category {
            Category::Panel => self.panel(id).map(|panel| &panel.listing),
            Category::Battery => self.battery(id).map(|battery| &battery.listing),
            Category::Inverter => self.inverter(id).map(|inverter| &inverter.listing),
            Category::ChargeController => {
                self.controller(id).map(|controller| &controller.listing)
            }
        }
    }

    /// Short technical summary of the item.
    pub fn details(&self, category: Category, id: &ItemId) -> Option<String> {
        match category {
            Category::Panel => self.panel(id).map(Panel::details),
            Category::Battery => self.battery(id).map(Battery::details),
            Category::Inverter => self.inverter(id).map(Inverter::details),
            Category::ChargeController => self.controller(id).map(ChargeController::details),
        }
    }

    pub fn panel(&self, id: &ItemId) -> Option<&Panel> {
        self.panels.iter().find(|panel| &panel.listing.id == id)
    }

    pub fn battery(&self, id: &ItemId) -> Option<&Battery> {
        self.batteries.iter().find(|battery| &battery.listing.id == id)
    }

    pub fn inverter(&self, id: &ItemId) -> Option<&Inverter> {
        self.inverters.iter().find(|inverter| &inverter.listing.id == id)
    }

    pub fn controller(&self, id: &ItemId) -> Option<&ChargeController> {
        self.controllers.iter().find(|controller| &controller.listing.id == id)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Small but realistic catalog shared by the selection and pricing tests.
    // language=json
    pub const CATALOG: &str = r#"[
        {"category": "panel", "id": "pv-300", "name": "Mono 300 W", "price_fcfa": 60000, "peak_power_watts": 300, "technology": "monocrystalline"},
        {"category": "panel", "id": "pv-450", "name": "Mono 450 W", "price_fcfa": 85000, "peak_power_watts": 450, "technology": "monocrystalline"},
        {"category": "panel", "id": "pv-550", "name": "Mono 550 W", "price_fcfa": 110000, "peak_power_watts": 550},
        {"category": "battery", "id": "agm-100", "name": "AGM 12 V 100 Ah", "price_fcfa": 95000, "capacity_amp_hours": 100, "voltage_volts": 12, "chemistry": "agm", "cycles": 600},
        {"category": "battery", "id": "agm-200", "name": "AGM 12 V 200 Ah", "price_fcfa": 180000, "capacity_amp_hours": 200, "voltage_volts": 12, "chemistry": "agm", "cycles": 600},
        {"category": "battery", "id": "lfp-48-100", "name": "LiFePO4 48 V 100 Ah", "price_fcfa": 1200000, "capacity_amp_hours": 100, "voltage_volts": 48, "chemistry": "lithium", "cycles": 6000, "max_depth_of_discharge_percent": 90},
        {"category": "battery", "id": "lfp-48-200", "name": "LiFePO4 48 V 200 Ah", "price_fcfa": 2200000, "capacity_amp_hours": 200, "voltage_volts": 48, "chemistry": "lithium", "cycles": 6000},
        {"category": "battery", "id": "hv-10", "name": "HV stack 10 kWh", "price_fcfa": 4500000, "capacity_amp_hours": 50, "voltage_volts": 204.8, "chemistry": "high-voltage-lithium", "energy_kwh": 10.24},
        {"category": "inverter", "id": "og-3000", "name": "Off-grid 3 kW", "price_fcfa": 350000, "power_watts": 3000, "voltage_volts": 48, "family": "off-grid", "phase": "single"},
        {"category": "inverter", "id": "hy-5000", "name": "Hybrid 5 kW", "price_fcfa": 750000, "power_watts": 5000, "voltage_volts": 48, "family": "hybrid", "phase": "single"},
        {"category": "inverter", "id": "on-10000", "name": "Online 10 kW", "price_fcfa": 1900000, "power_watts": 10000, "voltage_volts": 48, "family": "online", "phase": "single"},
        {"category": "inverter", "id": "hv-20000", "name": "Three-phase online 20 kW", "price_fcfa": 4800000, "power_watts": 20000, "voltage_volts": 400, "family": "three-phase-online", "phase": "three"},
        {"category": "charge-controller", "id": "mppt-60", "name": "MPPT 60 A", "price_fcfa": 120000, "current_amperes": 60, "type": "mppt", "max_input_voltage_volts": 150},
        {"category": "charge-controller", "id": "mppt-100", "name": "MPPT 100 A", "price_fcfa": 210000, "current_amperes": 100, "type": "mppt", "max_input_voltage_volts": 250},
        {"category": "charge-controller", "id": "pwm-30", "name": "PWM 30 A", "price_fcfa": 25000, "current_amperes": 30, "type": "pwm", "max_input_voltage_volts": 50}
    ]"#;

    pub fn catalog() -> Catalog {
        Catalog::from_json(CATALOG).unwrap()
    }

    #[test]
    fn test_from_json_ok() -> Result {
        let catalog = Catalog::from_json(CATALOG)?;
        assert_eq!(catalog.panels.len(), 3);
        assert_eq!(catalog.batteries.len(), 5);
        assert_eq!(catalog.inverters.len(), 4);
        assert_eq!(catalog.controllers.len(), 3);
        Ok(())
    }

    #[test]
    fn test_listing_ok() {
        let catalog = catalog();
        let listing = catalog.listing(Category::Inverter, &ItemId::from("hy-5000")).unwrap();
        assert_eq!(listing.name, "Hybrid 5 kW");
        assert_eq!(listing.price, Cost(750_000.0));
    }

    #[test]
    fn test_listing_wrong_category() {
        assert!(catalog().listing(Category::Panel, &ItemId::from("hy-5000")).is_none());
    }

    #[test]
    fn test_details() {
        let catalog = catalog();
        assert_eq!(
            catalog.details(Category::Battery, &ItemId::from("lfp-48-100")).unwrap(),
            "48 V lithium, 6000 cycles, 90 % DoD",
        );
        assert_eq!(
            catalog.details(Category::Panel, &ItemId::from("pv-450")).unwrap(),
            "450 W mono",
        );
        assert_eq!(
            catalog.details(Category::ChargeController, &ItemId::from("pwm-30")).unwrap(),
            "30.0 A PWM, up to 50 V",
        );
    }

    #[test]
    fn test_unknown_category_err() {
        // language=json
        let json = r#"[{"category": "cable", "id": "c", "name": "Cable", "price_fcfa": 1}]"#;
        assert!(Catalog::from_json(json).is_err());
    }
}
