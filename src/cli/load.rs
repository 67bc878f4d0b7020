use std::path::PathBuf;

use clap::Parser;

use crate::{
    catalog::BatteryChemistry,
    core::{
        dimensioning::LoadSpecification,
        load::LoadProfile,
        system::SystemVoltage,
        tariff::{BillingPeriod, Tariff},
    },
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, time::Hours},
};

/// Where the daily consumption comes from.
#[derive(Parser)]
#[group(required = true, multiple = false)]
pub struct LoadSourceArgs {
    /// Average daily consumption in kilowatt-hours.
    #[clap(long = "daily-kwh", env = "DAILY_KWH")]
    pub daily_energy: Option<KilowattHours>,

    /// Electricity bill amount in FCFA, converted through the tariff.
    #[clap(long = "bill-amount", env = "BILL_AMOUNT")]
    pub bill: Option<Cost>,

    /// TOML file with the `[[appliance]]` inventory.
    #[clap(long, env = "APPLIANCES")]
    pub appliances: Option<PathBuf>,
}

#[derive(Parser)]
pub struct LoadArgs {
    #[clap(flatten)]
    pub source: LoadSourceArgs,

    #[clap(long, env = "BILLING_PERIOD", default_value = "monthly")]
    pub billing_period: BillingPeriod,
}

/// Resolved daily load.
#[derive(Copy, Clone, Debug)]
pub struct Load {
    pub daily_energy: KilowattHours,

    /// Night share derived from the appliances.
    pub night_share: Option<f64>,
}

impl LoadArgs {
    #[instrument(skip_all)]
    pub fn resolve(&self, tariff: &Tariff) -> Result<Load> {
        if let Some(daily_energy) = self.source.daily_energy {
            Ok(Load { daily_energy, night_share: None })
        } else if let Some(bill) = self.source.bill {
            let daily_energy = tariff.daily_energy(bill, self.billing_period);
            info!(%bill, period = %self.billing_period, %daily_energy, "converted the bill");
            Ok(Load { daily_energy, night_share: None })
        } else if let Some(path) = &self.source.appliances {
            let profile = LoadProfile::read(path)?;
            Ok(Load {
                daily_energy: profile.daily_energy(),
                night_share: Some(profile.night_share()),
            })
        } else {
            bail!("specify one of `--daily-kwh`, `--bill-amount`, or `--appliances`")
        }
    }
}

#[derive(Parser)]
pub struct SystemArgs {
    /// Days the battery must cover without any sun.
    #[clap(long, env = "AUTONOMY_DAYS", default_value = "1")]
    pub autonomy_days: u32,

    #[clap(long, env = "SYSTEM_VOLTAGE", default_value = "48")]
    pub voltage: SystemVoltage,

    #[clap(long, env = "BATTERY_CHEMISTRY", default_value = "lithium")]
    pub chemistry: BatteryChemistry,

    /// Fraction of the daily energy consumed after sunset, overrides the appliance estimate.
    #[clap(long, env = "NIGHT_SHARE")]
    pub night_share: Option<f64>,

    /// Measured peak-sun-hours at the install location.
    #[clap(long = "peak-sun-hours", env = "PEAK_SUN_HOURS")]
    pub solar_hours: Option<Hours>,
}

impl SystemArgs {
    pub fn specification(&self, load: &Load) -> LoadSpecification {
        LoadSpecification::builder()
            .daily_energy(load.daily_energy)
            .autonomy_days(self.autonomy_days)
            .voltage(self.voltage)
            .chemistry(self.chemistry)
            .maybe_night_share(self.night_share.or(load.night_share))
            .maybe_measured_solar_hours(self.solar_hours)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestArgs {
        #[clap(flatten)]
        load: LoadArgs,

        #[clap(flatten)]
        system: SystemArgs,
    }

    #[test]
    fn test_daily_energy() -> Result {
        let args = TestArgs::try_parse_from(["test", "--daily-kwh", "12.5"])?;
        let load = args.load.resolve(&Tariff::default())?;
        assert_eq!(load.daily_energy, KilowattHours(12.5));
        assert!(load.night_share.is_none());
        Ok(())
    }

    #[test]
    fn test_bill() -> Result {
        let args = TestArgs::try_parse_from([
            "test",
            "--bill-amount",
            "12417",
            "--billing-period",
            "monthly",
        ])?;
        let load = args.load.resolve(&Tariff::default())?;
        approx::assert_abs_diff_eq!(load.daily_energy.0, 100.0 / 30.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_sources_are_exclusive() {
        assert!(
            TestArgs::try_parse_from(["test", "--daily-kwh", "1", "--bill-amount", "1000"]).is_err()
        );
    }

    #[test]
    fn test_night_share_priority() -> Result {
        let args = TestArgs::try_parse_from(["test", "--daily-kwh", "10", "--night-share", "0.7"])?;
        let load = Load { daily_energy: KilowattHours(10.0), night_share: Some(0.2) };
        let specification = args.system.specification(&load);
        approx::assert_abs_diff_eq!(specification.night_share, 0.7);
        assert_eq!(specification.voltage, SystemVoltage::V48);
        assert_eq!(specification.chemistry, BatteryChemistry::Lithium);
        Ok(())
    }

    #[test]
    fn test_high_voltage_value() -> Result {
        let args = TestArgs::try_parse_from([
            "test",
            "--daily-kwh",
            "40",
            "--voltage",
            "hv",
            "--chemistry",
            "high-voltage-lithium",
        ])?;
        assert_eq!(args.system.voltage, SystemVoltage::HighVoltage);
        assert_eq!(args.system.chemistry, BatteryChemistry::HighVoltageLithium);
        Ok(())
    }
}
