use std::ops::Mul;

use crate::quantity::{energy::KilowattHours, voltage::Volts};

quantity!(AmpHours, via: f64, suffix: "Ah", precision: 0);

impl Mul<Volts> for AmpHours {
    type Output = KilowattHours;

    fn mul(self, voltage: Volts) -> Self::Output {
        KilowattHours(self.0 * voltage.0 * 0.001)
    }
}
