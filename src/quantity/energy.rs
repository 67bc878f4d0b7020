use std::ops::{Div, Mul};

use crate::quantity::{
    charge::AmpHours,
    cost::Cost,
    power::Kilowatts,
    rate::KilowattHourRate,
    time::Hours,
    voltage::Volts,
};

quantity!(KilowattHours, via: f64, suffix: "kWh", precision: 2);

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rate: KilowattHourRate) -> Self::Output {
        Cost(self.0 * rate.0)
    }
}

impl Div<Hours> for KilowattHours {
    type Output = Kilowatts;

    fn div(self, hours: Hours) -> Self::Output {
        Kilowatts(self.0 / hours.0)
    }
}

impl Div<Volts> for KilowattHours {
    type Output = AmpHours;

    fn div(self, voltage: Volts) -> Self::Output {
        AmpHours(self.0 * 1000.0 / voltage.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_into_amp_hours() {
        assert_abs_diff_eq!((KilowattHours(2.4) / Volts(48.0)).0, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_into_cost() {
        let cost = KilowattHours(150.0) * KilowattHourRate(124.17);
        assert_abs_diff_eq!(cost.0, 18_625.5, epsilon = 1e-9);
    }
}
