use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    core::{
        dimensioning::DimensioningParameters,
        pricing::Rates,
        tariff::{BillingPeriod, Tariff},
    },
    prelude::*,
};

/// Tunable parameters of the whole pipeline.
///
/// Every section is optional, an empty file yields the built-in defaults.
#[must_use]
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    pub dimensioning: DimensioningParameters,
    pub tariff: Tariff,
    pub pricing: Rates,
}

impl Configuration {
    #[instrument(skip_all)]
    pub fn read(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            debug!("no configuration file, using the defaults");
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the configuration from `{}`", path.display()))?;
        let configuration = Self::from_toml(&contents)
            .with_context(|| format!("failed to parse the configuration `{}`", path.display()))?;
        info!(path = %path.display(), "loaded the configuration");
        Ok(configuration)
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let configuration: Self = toml::from_str(contents)?;
        ensure!(
            configuration.dimensioning.panel_loss_factor > 0.0,
            "the panel loss factor must be positive",
        );
        ensure!(
            configuration.dimensioning.solar_hours.0 > 0.0,
            "the peak-sun-hours must be positive",
        );
        ensure!(
            configuration.pricing.accessory_rate >= 0.0,
            "the accessory rate must not be negative",
        );
        for (chemistry, parameters) in &configuration.dimensioning.chemistry_overrides {
            ensure!(
                is_percentage(parameters.depth_of_discharge.0),
                "the depth of discharge of `{chemistry}` must be within (0, 100], got {}",
                parameters.depth_of_discharge,
            );
            ensure!(
                is_percentage(parameters.efficiency.0),
                "the efficiency of `{chemistry}` must be within (0, 100], got {}",
                parameters.efficiency,
            );
        }
        for (period, schedule) in [
            (BillingPeriod::Monthly, &configuration.tariff.monthly),
            (BillingPeriod::Bimonthly, &configuration.tariff.bimonthly),
        ] {
            ensure!(
                [schedule.tier_1_limit, schedule.tier_2_width]
                    .into_iter()
                    .all(|width| is_non_negative(width.0)),
                "the {period} tier widths must not be negative",
            );
            ensure!(
                [schedule.tier_1_rate, schedule.tier_2_rate, schedule.tier_3_rate]
                    .into_iter()
                    .all(|rate| is_non_negative(rate.0)),
                "the {period} rates must not be negative",
            );
        }
        Ok(configuration)
    }
}

fn is_percentage(value: f64) -> bool {
    value > 0.0 && value <= 100.0
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
