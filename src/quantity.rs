#[macro_use]
pub mod macros;

pub mod charge;
pub mod cost;
pub mod current;
pub mod energy;
pub mod power;
pub mod proportions;
pub mod rate;
pub mod time;
pub mod voltage;

#[cfg(test)]
mod tests {
    use crate::quantity::{energy::KilowattHours, power::Watts};

    #[test]
    fn test_min() {
        assert_eq!(Watts(1.0).min(Watts(2.0)), Watts(1.0));
        assert_eq!(Watts(2.0).min(Watts(1.0)), Watts(1.0));
    }

    #[test]
    fn test_max() {
        assert_eq!(Watts(1.0).max(Watts(2.0)), Watts(2.0));
        assert_eq!(Watts(2.0).max(Watts(1.0)), Watts(2.0));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(Watts(1.0).clamp(Watts(2.0), Watts(3.0)), Watts(2.0));
        assert_eq!(Watts(4.0).clamp(Watts(2.0), Watts(3.0)), Watts(3.0));
        assert_eq!(Watts(2.0).clamp(Watts(1.0), Watts(3.0)), Watts(2.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Watts(2499.6).to_string(), "2500 W");
        assert_eq!(KilowattHours(1.234).to_string(), "1.23 kWh");
    }

    #[test]
    fn test_sum() {
        let total: KilowattHours = [KilowattHours(1.0), KilowattHours(2.5)].into_iter().sum();
        assert_eq!(total, KilowattHours(3.5));
    }
}
