mod bill;
mod load;
mod quote;
mod size;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    cli::{bill::BillArgs, quote::QuoteArgs, size::SizeArgs},
    config::Configuration,
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// TOML file overriding the built-in sizing, tariff, and pricing parameters.
    #[clap(long, env = "SIZER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Estimate the consumption behind an electricity bill.
    #[clap(name = "bill")]
    Bill(BillArgs),

    /// Dimension the panels, battery, and inverter for a load.
    #[clap(name = "size")]
    Size(Box<SizeArgs>),

    /// Main command: dimension, select the equipment, and price the installation.
    #[clap(name = "quote")]
    Quote(Box<QuoteArgs>),
}

impl Args {
    pub fn run(self) -> Result {
        let configuration = Configuration::read(self.config.as_deref())?;
        match self.command {
            Command::Bill(args) => args.run(&configuration),
            Command::Size(args) => args.run(&configuration),
            Command::Quote(args) => args.run(&configuration),
        }
    }
}
