use clap::Parser;

use crate::{
    config::Configuration,
    core::tariff::BillingPeriod,
    prelude::*,
    quantity::cost::Cost,
    tables::build_breakdown_table,
};

#[derive(Parser)]
pub struct BillArgs {
    /// Bill amount in FCFA.
    #[clap(long, env = "BILL_AMOUNT")]
    pub amount: Cost,

    #[clap(long, env = "BILLING_PERIOD", default_value = "monthly")]
    pub billing_period: BillingPeriod,
}

impl BillArgs {
    #[instrument(skip_all)]
    pub fn run(&self, configuration: &Configuration) -> Result {
        let tariff = &configuration.tariff;
        let energy = tariff.estimate_energy(self.amount, self.billing_period);
        let daily_energy = tariff.daily_energy(self.amount, self.billing_period);
        info!(%energy, %daily_energy, period = %self.billing_period, "estimated");
        let slices = tariff.schedule(self.billing_period).breakdown(energy);
        println!("{}", build_breakdown_table(&slices));
        Ok(())
    }
}
