use serde::{Deserialize, Serialize};

use crate::{
    catalog::Listing,
    quantity::{current::Amperes, voltage::Volts},
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChargeController {
    #[serde(flatten)]
    pub listing: Listing,

    #[serde(rename = "current_amperes")]
    pub current: Amperes,

    #[serde(rename = "type")]
    pub kind: ControllerType,

    #[serde(rename = "max_input_voltage_volts")]
    pub max_input_voltage: Volts,
}

impl ChargeController {
    pub fn details(&self) -> String {
        format!("{} {}, up to {}", self.current, self.kind, self.max_input_voltage)
    }
}

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize, clap::ValueEnum, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum ControllerType {
    #[display("PWM")]
    Pwm,

    #[display("MPPT")]
    Mppt,
}
