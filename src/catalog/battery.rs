use serde::{Deserialize, Serialize};

use crate::{
    catalog::Listing,
    quantity::{
        charge::AmpHours,
        energy::KilowattHours,
        proportions::Percentage,
        voltage::Volts,
    },
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Battery {
    #[serde(flatten)]
    pub listing: Listing,

    #[serde(rename = "capacity_amp_hours")]
    pub capacity: AmpHours,

    #[serde(rename = "voltage_volts")]
    pub voltage: Volts,

    pub chemistry: BatteryChemistry,

    /// Rated number of cycles.
    #[serde(default)]
    pub cycles: Option<u32>,

    #[serde(default, rename = "max_depth_of_discharge_percent")]
    pub max_depth_of_discharge: Option<Percentage>,

    /// Nameplate energy, published for high-voltage stacks.
    #[serde(default, rename = "energy_kwh")]
    pub energy: Option<KilowattHours>,
}

impl Battery {
    /// Stored energy: the nameplate value if present, otherwise capacity × voltage.
    pub fn stored_energy(&self) -> KilowattHours {
        self.energy.unwrap_or(self.capacity * self.voltage)
    }

    pub fn details(&self) -> String {
        let mut details = format!("{} {}", self.voltage, self.chemistry);
        if let Some(cycles) = self.cycles {
            details.push_str(&format!(", {cycles} cycles"));
        }
        if let Some(depth_of_discharge) = self.max_depth_of_discharge {
            details.push_str(&format!(", {depth_of_discharge} DoD"));
        }
        details
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Deserialize,
    Serialize,
    clap::ValueEnum,
    derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum BatteryChemistry {
    #[display("lead-acid")]
    LeadAcid,

    #[display("AGM")]
    Agm,

    #[display("gel")]
    Gel,

    #[display("lithium")]
    Lithium,

    #[display("high-voltage lithium")]
    HighVoltageLithium,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::catalog::tests::catalog;

    #[test]
    fn test_stored_energy_from_capacity() {
        let catalog = catalog();
        assert_abs_diff_eq!(catalog.batteries[2].stored_energy().0, 4.8, epsilon = 1e-9);
    }

    #[test]
    fn test_stored_energy_from_nameplate() {
        let catalog = catalog();
        assert_abs_diff_eq!(catalog.batteries[4].stored_energy().0, 10.24, epsilon = 1e-9);
    }
}
