use serde::{Deserialize, Serialize};

use crate::quantity::voltage::Volts;

/// Nominal DC bus voltage of the installation.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize, clap::ValueEnum, derive_more::Display,
)]
pub enum SystemVoltage {
    #[serde(rename = "12")]
    #[value(name = "12")]
    #[display("12 V")]
    V12,

    #[serde(rename = "24")]
    #[value(name = "24")]
    #[display("24 V")]
    V24,

    #[serde(rename = "48")]
    #[value(name = "48")]
    #[display("48 V")]
    V48,

    /// Industrial-scale stacks above 48 V.
    #[serde(rename = "hv")]
    #[value(name = "hv")]
    #[display("high voltage")]
    HighVoltage,
}

impl SystemVoltage {
    /// Minimal DC input voltage of an inverter that can run on a high-voltage bus.
    pub const HIGH_VOLTAGE_INVERTER_MIN: Volts = Volts(180.0);

    /// Voltage used for the battery and charge controller math.
    ///
    /// The high-voltage class is represented as 400 V.
    pub const fn nominal(self) -> Volts {
        match self {
            Self::V12 => Volts(12.0),
            Self::V24 => Volts(24.0),
            Self::V48 => Volts(48.0),
            Self::HighVoltage => Volts(400.0),
        }
    }

    pub const fn is_high_voltage(self) -> bool {
        matches!(self, Self::HighVoltage)
    }

    pub fn accepts_battery(self, voltage: Volts) -> bool {
        match self {
            Self::HighVoltage => voltage > Self::V48.nominal(),
            _ => voltage == self.nominal(),
        }
    }

    pub fn accepts_inverter(self, voltage: Volts) -> bool {
        match self {
            Self::HighVoltage => voltage >= Self::HIGH_VOLTAGE_INVERTER_MIN,
            _ => voltage == self.nominal(),
        }
    }
}
