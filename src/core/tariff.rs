//! Three-tier progressive electricity tariff.
//!
//! The same schedule converts a bill into consumption and back, and projects
//! the bill once part of the consumption is covered by solar production.

use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize, clap::ValueEnum, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum BillingPeriod {
    /// 30-day bill.
    #[display("monthly")]
    Monthly,

    /// 60-day bill.
    #[display("bimonthly")]
    Bimonthly,
}

impl BillingPeriod {
    pub const fn days(self) -> u32 {
        match self {
            Self::Monthly => 30,
            Self::Bimonthly => 60,
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TariffSchedule {
    /// Energy billed at the first rate.
    #[serde(rename = "tier_1_kwh")]
    pub tier_1_limit: KilowattHours,

    /// Energy billed at the second rate, on top of the first tier.
    #[serde(rename = "tier_2_kwh")]
    pub tier_2_width: KilowattHours,

    pub tier_1_rate: KilowattHourRate,

    pub tier_2_rate: KilowattHourRate,

    /// Rate for everything above the first two tiers.
    pub tier_3_rate: KilowattHourRate,
}

impl TariffSchedule {
    pub const MONTHLY: Self = Self {
        tier_1_limit: KilowattHours(150.0),
        tier_2_width: KilowattHours(100.0),
        tier_1_rate: KilowattHourRate(124.17),
        tier_2_rate: KilowattHourRate(136.49),
        tier_3_rate: KilowattHourRate(159.36),
    };

    pub const BIMONTHLY: Self = Self {
        tier_1_limit: KilowattHours(300.0),
        tier_2_width: KilowattHours(200.0),
        tier_1_rate: KilowattHourRate(124.17),
        tier_2_rate: KilowattHourRate(136.49),
        tier_3_rate: KilowattHourRate(159.36),
    };

    /// Cost of a fully consumed first tier.
    fn tier_1_cost(&self) -> Cost {
        self.tier_1_limit * self.tier_1_rate
    }

    /// Cost of fully consumed first and second tiers.
    fn tier_2_cost(&self) -> Cost {
        self.tier_1_cost() + self.tier_2_width * self.tier_2_rate
    }

    /// Invert the schedule: find the consumption that produces the bill.
    pub fn estimate_energy(&self, bill: Cost) -> KilowattHours {
        if bill <= Cost::ZERO {
            return KilowattHours::ZERO;
        }
        if bill <= self.tier_1_cost() {
            KilowattHours(bill.0 / self.tier_1_rate.0)
        } else if bill <= self.tier_2_cost() {
            self.tier_1_limit + KilowattHours((bill - self.tier_1_cost()).0 / self.tier_2_rate.0)
        } else {
            self.tier_1_limit
                + self.tier_2_width
                + KilowattHours((bill - self.tier_2_cost()).0 / self.tier_3_rate.0)
        }
    }

    pub fn estimate_cost(&self, energy: KilowattHours) -> Cost {
        self.breakdown(energy).iter().map(|slice| slice.cost).sum()
    }

    /// Split the consumption into the tariff slices.
    pub fn breakdown(&self, energy: KilowattHours) -> [TierSlice; 3] {
        let energy = energy.max(KilowattHours::ZERO);
        let tier_1 = energy.min(self.tier_1_limit);
        let tier_2 = (energy - self.tier_1_limit).clamp(KilowattHours::ZERO, self.tier_2_width);
        let tier_3 = (energy - self.tier_1_limit - self.tier_2_width).max(KilowattHours::ZERO);
        [
            TierSlice::new(tier_1, self.tier_1_rate),
            TierSlice::new(tier_2, self.tier_2_rate),
            TierSlice::new(tier_3, self.tier_3_rate),
        ]
    }
}

/// Part of the consumption billed at a single rate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TierSlice {
    pub energy: KilowattHours,
    pub rate: KilowattHourRate,
    pub cost: Cost,
}

impl TierSlice {
    fn new(energy: KilowattHours, rate: KilowattHourRate) -> Self {
        Self { energy, rate, cost: energy * rate }
    }
}

/// Tariff schedules for both billing periods.
#[derive(Copy, Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tariff {
    pub monthly: TariffSchedule,
    pub bimonthly: TariffSchedule,
}

impl Default for Tariff {
    fn default() -> Self {
        Self { monthly: TariffSchedule::MONTHLY, bimonthly: TariffSchedule::BIMONTHLY }
    }
}

impl Tariff {
    pub const fn schedule(&self, period: BillingPeriod) -> &TariffSchedule {
        match period {
            BillingPeriod::Monthly => &self.monthly,
            BillingPeriod::Bimonthly => &self.bimonthly,
        }
    }

    #[instrument(skip_all, fields(bill = %bill, period = %period))]
    pub fn estimate_energy(&self, bill: Cost, period: BillingPeriod) -> KilowattHours {
        let energy = self.schedule(period).estimate_energy(bill);
        debug!(%energy, "estimated the consumption");
        energy
    }

    pub fn estimate_cost(&self, energy: KilowattHours, period: BillingPeriod) -> Cost {
        self.schedule(period).estimate_cost(energy)
    }

    /// Average daily consumption behind the bill.
    pub fn daily_energy(&self, bill: Cost, period: BillingPeriod) -> KilowattHours {
        self.estimate_energy(bill, period) / f64::from(period.days())
    }

    /// Project the bill before and after the installation.
    #[instrument(skip_all, fields(grid = %grid_consumption, solar = %solar_production))]
    pub fn project(
        &self,
        grid_consumption: KilowattHours,
        solar_production: KilowattHours,
        period: BillingPeriod,
    ) -> BillProjection {
        let before = self.estimate_cost(grid_consumption, period);
        let after = self.estimate_cost(
            (grid_consumption - solar_production).max(KilowattHours::ZERO),
            period,
        );
        BillProjection { before, after, savings: before - after }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BillProjection {
    pub before: Cost,
    pub after: Cost,
    pub savings: Cost,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_estimate_energy_tier_1() {
        let energy = TariffSchedule::MONTHLY.estimate_energy(Cost(12_417.0));
        assert_abs_diff_eq!(energy.0, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_estimate_energy_tier_2_bimonthly() {
        // 300 kWh × 124.17 = 37 251, the remaining 7 749 is billed at 136.49:
        let energy = TariffSchedule::BIMONTHLY.estimate_energy(Cost(45_000.0));
        assert_abs_diff_eq!(energy.0, 300.0 + 7_749.0 / 136.49, epsilon = 1e-9);
    }

    #[test]
    fn test_estimate_energy_above_tier_2_envelope() {
        // The first two monthly tiers cost 18 625.5 + 13 649 = 32 274.5:
        let energy = TariffSchedule::MONTHLY.estimate_energy(Cost(45_000.0));
        assert_abs_diff_eq!(energy.0, 250.0 + 12_725.5 / 159.36, epsilon = 1e-9);
    }

    #[test]
    fn test_estimate_energy_tier_2_monthly() {
        let energy = TariffSchedule::MONTHLY.estimate_energy(Cost(25_000.0));
        assert_abs_diff_eq!(energy.0, 150.0 + 6_374.5 / 136.49, epsilon = 1e-9);
    }

    #[test]
    fn test_non_positive_is_zero() {
        assert_eq!(TariffSchedule::MONTHLY.estimate_energy(Cost(-1.0)), KilowattHours::ZERO);
        assert_eq!(TariffSchedule::MONTHLY.estimate_energy(Cost::ZERO), KilowattHours::ZERO);
        assert_eq!(TariffSchedule::MONTHLY.estimate_cost(KilowattHours(-5.0)), Cost::ZERO);
    }

    #[test]
    fn test_estimate_cost_slices() {
        let cost = TariffSchedule::MONTHLY.estimate_cost(KilowattHours(300.0));
        assert_abs_diff_eq!(cost.0, 150.0 * 124.17 + 100.0 * 136.49 + 50.0 * 159.36, epsilon = 1e-6);
    }

    #[test]
    fn test_round_trip_within_each_tier() {
        for schedule in [TariffSchedule::MONTHLY, TariffSchedule::BIMONTHLY] {
            for bill in [5_000.0, 18_000.0, 25_000.0, 45_000.0, 120_000.0] {
                let energy = schedule.estimate_energy(Cost(bill));
                assert_abs_diff_eq!(schedule.estimate_cost(energy).0, bill, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_tier_boundaries_are_continuous() {
        let schedule = TariffSchedule::MONTHLY;
        assert_abs_diff_eq!(
            schedule.estimate_energy(schedule.tier_1_cost()).0,
            150.0,
            epsilon = 1e-9,
        );
        assert_abs_diff_eq!(
            schedule.estimate_energy(schedule.tier_2_cost()).0,
            250.0,
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_daily_energy() {
        let tariff = Tariff::default();
        let daily = tariff.daily_energy(Cost(12_417.0), BillingPeriod::Monthly);
        assert_abs_diff_eq!(daily.0, 100.0 / 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_project_covers_part_of_consumption() {
        let projection = Tariff::default().project(
            KilowattHours(300.0),
            KilowattHours(200.0),
            BillingPeriod::Monthly,
        );
        assert_abs_diff_eq!(projection.after.0, 100.0 * 124.17, epsilon = 1e-6);
        assert_abs_diff_eq!(
            projection.savings.0,
            projection.before.0 - projection.after.0,
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_project_excess_production_is_free() {
        let projection = Tariff::default().project(
            KilowattHours(100.0),
            KilowattHours(250.0),
            BillingPeriod::Bimonthly,
        );
        assert_eq!(projection.after, Cost::ZERO);
        assert_eq!(projection.savings, projection.before);
    }
}
