use std::ops::Div;

use crate::quantity::power::Watts;

quantity!(Cost, via: f64, suffix: "FCFA", precision: 0);

impl Cost {
    /// Round to the whole franc.
    #[must_use]
    pub fn round(self) -> Self {
        Self(self.0.round())
    }
}

/// Price per watt, used to compare panels of different sizes.
impl Div<Watts> for Cost {
    type Output = f64;

    fn div(self, power: Watts) -> Self::Output {
        self.0 / power.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round() {
        assert_eq!(Cost(1234.5).round(), Cost(1235.0));
        assert_eq!(Cost(1234.49).round(), Cost(1234.0));
    }
}
