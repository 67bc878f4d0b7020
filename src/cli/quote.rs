use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;

use crate::{
    api::price_list,
    catalog::{Catalog, ControllerType, InverterFamily, PhaseType},
    cli::load::{LoadArgs, SystemArgs},
    config::Configuration,
    core::{
        pricing::{PriceLookup, Pricing},
        selection::{Preferences, Selector},
    },
    prelude::*,
    tables::{
        build_dimensioning_table,
        build_projection_table,
        build_quote_table,
        build_selection_table,
    },
};

#[derive(Parser)]
pub struct QuoteArgs {
    #[clap(flatten)]
    pub load: LoadArgs,

    #[clap(flatten)]
    pub system: SystemArgs,

    /// JSON catalog snapshot.
    #[clap(long, env = "CATALOG")]
    pub catalog: PathBuf,

    #[clap(long, env = "INVERTER_FAMILY", default_value = "hybrid")]
    pub inverter_family: InverterFamily,

    /// Any controller type is accepted when omitted.
    #[clap(long, env = "CONTROLLER_TYPE")]
    pub controller_type: Option<ControllerType>,

    #[clap(long, env = "PHASE", default_value = "single")]
    pub phase: PhaseType,

    /// Region for the labor rate, the flat labor fee applies when omitted.
    #[clap(long, env = "REGION")]
    pub region: Option<String>,

    /// Live price list base URL, catalog prices are used when omitted.
    #[clap(long = "price-list-url", env = "PRICE_LIST_URL")]
    pub price_list_url: Option<String>,
}

impl QuoteArgs {
    #[instrument(skip_all)]
    pub fn run(&self, configuration: &Configuration) -> Result {
        let load = self.load.resolve(&configuration.tariff)?;
        let dimensioning =
            configuration.dimensioning.dimension(&self.system.specification(&load))?;
        println!("{}", build_dimensioning_table(&dimensioning));

        let catalog = Catalog::read(&self.catalog)?;
        let preferences = Preferences::builder()
            .chemistry(self.system.chemistry)
            .inverter_family(self.inverter_family)
            .maybe_controller_type(self.controller_type)
            .phase(self.phase)
            .build();
        let selection = Selector::builder()
            .catalog(&catalog)
            .dimensioning(&dimensioning)
            .preferences(preferences)
            .select();
        println!("{}", build_selection_table(&catalog, &selection));

        let price_list = self.price_list_url.as_deref().map(price_list::Client::new);
        let quote = Pricing::builder()
            .catalog(&catalog)
            .rates(&configuration.pricing)
            .selection(&selection)
            .maybe_region(self.region.as_deref())
            .maybe_price_lookup(price_list.as_ref().map(|client| client as &dyn PriceLookup))
            .price();
        println!("{}", build_quote_table(&quote));
        if !quote.is_complete() {
            warn!(missing = %quote.missing.iter().join(", "), "the quote is incomplete");
        }

        let period = self.load.billing_period;
        let days = f64::from(period.days());
        let production = configuration
            .dimensioning
            .expected_daily_production(quote.installed_power, dimensioning.solar_hours);
        let projection =
            configuration.tariff.project(load.daily_energy * days, production * days, period);
        info!(%production, savings = %projection.savings, "projected the bill");
        println!("{}", build_projection_table(&projection));

        Ok(())
    }
}
