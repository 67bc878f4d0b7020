use serde::{Deserialize, Serialize};

use crate::{
    catalog::Listing,
    quantity::{power::Watts, voltage::Volts},
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Inverter {
    #[serde(flatten)]
    pub listing: Listing,

    #[serde(rename = "power_watts")]
    pub power: Watts,

    /// DC input voltage.
    #[serde(rename = "voltage_volts")]
    pub voltage: Volts,

    pub family: InverterFamily,
    pub phase: PhaseType,
}

impl Inverter {
    pub fn details(&self) -> String {
        format!("{} {}, {} DC, {}", self.power, self.family, self.voltage, self.phase)
    }
}

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize, clap::ValueEnum, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum InverterFamily {
    /// Stand-alone inverter, needs a separate charge controller.
    #[display("off-grid")]
    OffGrid,

    /// Inverter with a built-in MPPT charger and grid input.
    #[display("hybrid")]
    Hybrid,

    /// Double-conversion (UPS-grade) inverter.
    #[display("online")]
    Online,

    #[display("three-phase online")]
    ThreePhaseOnline,
}

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize, clap::ValueEnum, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseType {
    #[display("single-phase")]
    Single,

    #[display("three-phase")]
    Three,
}
