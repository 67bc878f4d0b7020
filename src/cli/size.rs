use clap::Parser;

use crate::{
    cli::load::{LoadArgs, SystemArgs},
    config::Configuration,
    prelude::*,
    tables::build_dimensioning_table,
};

#[derive(Parser)]
pub struct SizeArgs {
    #[clap(flatten)]
    pub load: LoadArgs,

    #[clap(flatten)]
    pub system: SystemArgs,
}

impl SizeArgs {
    #[instrument(skip_all)]
    pub fn run(&self, configuration: &Configuration) -> Result {
        let load = self.load.resolve(&configuration.tariff)?;
        let result = configuration.dimensioning.dimension(&self.system.specification(&load))?;
        println!("{}", build_dimensioning_table(&result));
        Ok(())
    }
}
