//! Electrical specification of the installation derived from the daily load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::BatteryChemistry,
    core::system::SystemVoltage,
    prelude::*,
    quantity::{
        charge::AmpHours,
        energy::KilowattHours,
        power::{Kilowatts, Watts},
        proportions::Percentage,
        time::Hours,
    },
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChemistryParameters {
    #[serde(rename = "depth_of_discharge_percent")]
    pub depth_of_discharge: Percentage,

    /// Round-trip efficiency.
    #[serde(rename = "efficiency_percent")]
    pub efficiency: Percentage,
}

impl ChemistryParameters {
    const fn new(depth_of_discharge: f64, efficiency: f64) -> Self {
        Self {
            depth_of_discharge: Percentage(depth_of_discharge),
            efficiency: Percentage(efficiency),
        }
    }
}

impl BatteryChemistry {
    pub const fn default_parameters(self) -> ChemistryParameters {
        match self {
            Self::LeadAcid => ChemistryParameters::new(50.0, 85.0),
            Self::Agm => ChemistryParameters::new(70.0, 85.0),
            Self::Gel => ChemistryParameters::new(80.0, 85.0),
            Self::Lithium => ChemistryParameters::new(90.0, 93.0),
            Self::HighVoltageLithium => ChemistryParameters::new(95.0, 96.0),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DimensioningParameters {
    /// Wiring, temperature, and soiling losses applied to the panel array.
    pub panel_loss_factor: f64,

    /// Peak-sun-hours per day used when no measurement is available.
    pub solar_hours: Hours,

    /// Peak simultaneous load as a fraction of the daily energy.
    pub inverter_peak_fraction: f64,

    /// Per-chemistry overrides of the built-in table.
    #[serde(rename = "chemistry")]
    pub chemistry_overrides: BTreeMap<BatteryChemistry, ChemistryParameters>,
}

impl Default for DimensioningParameters {
    fn default() -> Self {
        Self {
            panel_loss_factor: 1.25,
            solar_hours: Hours(5.0),
            inverter_peak_fraction: 1.0 / 3.0,
            chemistry_overrides: BTreeMap::new(),
        }
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("daily consumption must be a non-negative number, got {0}")]
    Consumption(KilowattHours),

    #[error("autonomy must be at least one day")]
    Autonomy,
}

/// Sizing request.
#[must_use]
#[derive(Copy, Clone, Debug, bon::Builder)]
pub struct LoadSpecification {
    pub daily_energy: KilowattHours,

    #[builder(default = 1)]
    pub autonomy_days: u32,

    pub voltage: SystemVoltage,
    pub chemistry: BatteryChemistry,

    /// Fraction of the daily energy consumed at night.
    #[builder(default = LoadSpecification::DEFAULT_NIGHT_SHARE)]
    pub night_share: f64,

    /// Measured peak-sun-hours at the install location.
    pub measured_solar_hours: Option<Hours>,
}

impl LoadSpecification {
    pub const DEFAULT_NIGHT_SHARE: f64 = 0.5;
    pub const MIN_NIGHT_SHARE: f64 = 0.1;
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DimensioningResult {
    pub peak_power: Watts,
    pub night_energy: KilowattHours,

    /// Capacity at the system voltage.
    pub battery_capacity: AmpHours,

    pub inverter_power: Watts,
    pub voltage: SystemVoltage,
    pub chemistry: ChemistryParameters,
    pub solar_hours: Hours,
}

impl DimensioningResult {
    /// Required battery capacity expressed as energy at the nominal voltage.
    pub fn battery_energy(&self) -> KilowattHours {
        self.battery_capacity * self.voltage.nominal()
    }
}

impl DimensioningParameters {
    pub fn chemistry(&self, chemistry: BatteryChemistry) -> ChemistryParameters {
        self.chemistry_overrides
            .get(&chemistry)
            .copied()
            .unwrap_or_else(|| chemistry.default_parameters())
    }

    #[instrument(
        skip_all,
        fields(
            daily_energy = %specification.daily_energy,
            voltage = %specification.voltage,
            chemistry = %specification.chemistry,
        ),
    )]
    pub fn dimension(
        &self,
        specification: &LoadSpecification,
    ) -> Result<DimensioningResult, InvalidInput> {
        let daily_energy = specification.daily_energy;
        if !daily_energy.is_finite() || daily_energy < KilowattHours::ZERO {
            return Err(InvalidInput::Consumption(daily_energy));
        }
        if specification.autonomy_days == 0 {
            return Err(InvalidInput::Autonomy);
        }

        let solar_hours = specification
            .measured_solar_hours
            .filter(|hours| hours.is_finite() && *hours > Hours::ZERO)
            .unwrap_or(self.solar_hours);
        let peak_power = Watts::from(daily_energy * self.panel_loss_factor / solar_hours);

        let night_share = if specification.night_share.is_nan() {
            LoadSpecification::DEFAULT_NIGHT_SHARE
        } else {
            specification.night_share.clamp(LoadSpecification::MIN_NIGHT_SHARE, 1.0)
        };
        let night_energy = daily_energy * night_share;

        let chemistry = self.chemistry(specification.chemistry);
        let battery_capacity = night_energy * f64::from(specification.autonomy_days)
            / specification.voltage.nominal()
            / (chemistry.depth_of_discharge.to_ratio() * chemistry.efficiency.to_ratio());

        let inverter_power = Watts::from(Kilowatts(daily_energy.0 * self.inverter_peak_fraction));

        let result = DimensioningResult {
            peak_power,
            night_energy,
            battery_capacity,
            inverter_power,
            voltage: specification.voltage,
            chemistry,
            solar_hours,
        };
        info!(
            peak_power = %result.peak_power,
            battery_capacity = %result.battery_capacity,
            inverter_power = %result.inverter_power,
            "dimensioned",
        );
        Ok(result)
    }

    /// Energy the installed array delivers per day after the array losses.
    pub fn expected_daily_production(
        &self,
        installed_power: Kilowatts,
        solar_hours: Hours,
    ) -> KilowattHours {
        installed_power * solar_hours / self.panel_loss_factor
    }
}
