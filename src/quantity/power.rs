use std::ops::{Div, Mul};

use crate::quantity::{current::Amperes, energy::KilowattHours, time::Hours, voltage::Volts};

quantity!(Watts, via: f64, suffix: "W", precision: 0);
quantity!(Kilowatts, via: f64, suffix: "kW", precision: 2);

impl From<Kilowatts> for Watts {
    fn from(kilowatts: Kilowatts) -> Self {
        Self(kilowatts.0 * 1000.0)
    }
}

impl From<Watts> for Kilowatts {
    fn from(watts: Watts) -> Self {
        Self(watts.0 / 1000.0)
    }
}

impl Mul<Hours> for Kilowatts {
    type Output = KilowattHours;

    fn mul(self, hours: Hours) -> Self::Output {
        KilowattHours(self.0 * hours.0)
    }
}

impl Mul<Hours> for Watts {
    type Output = KilowattHours;

    fn mul(self, hours: Hours) -> Self::Output {
        Kilowatts::from(self) * hours
    }
}

impl Div<Volts> for Watts {
    type Output = Amperes;

    fn div(self, voltage: Volts) -> Self::Output {
        Amperes(self.0 / voltage.0)
    }
}
