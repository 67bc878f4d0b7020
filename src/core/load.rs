use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    prelude::*,
    quantity::{energy::KilowattHours, power::Watts, time::Hours},
};

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Appliance {
    pub name: String,

    #[serde(rename = "power_watts")]
    pub power: Watts,

    #[serde(default = "Appliance::default_quantity")]
    pub quantity: u32,

    /// Hours of use per day.
    pub daily_hours: Hours,

    /// Part of the daily hours that falls after sunset.
    #[serde(default)]
    pub night_hours: Hours,
}

impl Appliance {
    const fn default_quantity() -> u32 {
        1
    }

    pub fn daily_energy(&self) -> KilowattHours {
        self.power * self.daily_hours * f64::from(self.quantity)
    }

    pub fn night_energy(&self) -> KilowattHours {
        self.power * self.night_hours.clamp(Hours::ZERO, self.daily_hours) * f64::from(self.quantity)
    }
}

/// Household appliance inventory, read from `[[appliance]]` TOML tables.
#[must_use]
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadProfile {
    #[serde(default, rename = "appliance")]
    pub appliances: Vec<Appliance>,
}

impl LoadProfile {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the appliances from `{}`", path.display()))?;
        let profile = Self::from_toml(&contents)
            .with_context(|| format!("failed to parse the appliances `{}`", path.display()))?;
        info!(
            n_appliances = profile.appliances.len(),
            daily_energy = %profile.daily_energy(),
            "loaded the load profile",
        );
        Ok(profile)
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let profile: Self = toml::from_str(contents)?;
        for appliance in &profile.appliances {
            ensure!(
                appliance.power.is_finite() && appliance.power >= Watts::ZERO,
                "`{}` must draw a non-negative power, got {}",
                appliance.name,
                appliance.power,
            );
            ensure!(
                appliance.daily_hours >= Hours::ZERO && appliance.daily_hours <= Hours(24.0),
                "`{}` cannot run {} a day",
                appliance.name,
                appliance.daily_hours,
            );
            debug!(name = %appliance.name, daily_energy = %appliance.daily_energy(), "appliance");
        }
        Ok(profile)
    }

    pub fn daily_energy(&self) -> KilowattHours {
        self.appliances.iter().map(Appliance::daily_energy).sum()
    }

    /// Fraction of the daily energy consumed at night.
    pub fn night_share(&self) -> f64 {
        let daily_energy = self.daily_energy();
        if daily_energy <= KilowattHours::ZERO {
            return 0.0;
        }
        self.appliances.iter().map(Appliance::night_energy).sum::<KilowattHours>() / daily_energy
    }
}
