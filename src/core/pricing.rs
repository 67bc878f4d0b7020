//! Turns an equipment selection into priced quote lines.

mod quote;

use std::collections::BTreeMap;

use bon::Builder;
use serde::{Deserialize, Serialize};

pub use self::quote::{PriceSource, Quote, QuoteLine};
use crate::{
    catalog::{Catalog, ItemId, Listing},
    core::selection::EquipmentSelection,
    prelude::*,
    quantity::{
        cost::Cost,
        power::{Kilowatts, Watts},
        proportions::Percentage,
    },
};

/// Source of up-to-date unit prices.
pub trait PriceLookup {
    fn unit_price(&self, id: &ItemId) -> Result<Cost>;
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rates {
    /// Cabling and protection, as a fraction of everything priced before.
    pub accessory_rate: f64,

    pub mounting_per_panel: Cost,

    /// Labor fee when no region is given.
    pub flat_labor: Cost,

    /// Labor as a percentage of the equipment subtotal, per region.
    pub regional_labor: BTreeMap<String, Percentage>,
}

impl Default for Rates {
    fn default() -> Self {
        let regional_labor = [
            ("dakar", 15.0),
            ("thies", 18.0),
            ("diourbel", 20.0),
            ("kaolack", 20.0),
            ("saint-louis", 22.0),
            ("louga", 22.0),
            ("fatick", 22.0),
            ("kaffrine", 25.0),
            ("kolda", 28.0),
            ("ziguinchor", 28.0),
            ("sedhiou", 30.0),
            ("tambacounda", 30.0),
            ("matam", 32.0),
            ("kedougou", 35.0),
        ]
        .into_iter()
        .map(|(region, percentage)| (region.to_owned(), Percentage(percentage)))
        .collect();
        Self {
            accessory_rate: 0.10,
            mounting_per_panel: Cost(15_000.0),
            flat_labor: Cost(150_000.0),
            regional_labor,
        }
    }
}

impl Rates {
    /// Case-insensitive regional labor lookup.
    pub fn labor_percentage(&self, region: &str) -> Option<Percentage> {
        let region = region.trim();
        self.regional_labor
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(region))
            .map(|(_, percentage)| *percentage)
    }
}

#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Pricing<'a> {
    catalog: &'a Catalog,
    rates: &'a Rates,
    selection: &'a EquipmentSelection,
    region: Option<&'a str>,
    price_lookup: Option<&'a dyn PriceLookup>,
}

impl<S: pricing_builder::IsComplete> PricingBuilder<'_, S> {
    pub fn price(self) -> Quote {
        self.build().price()
    }
}

impl Pricing<'_> {
    #[instrument(skip_all, fields(region = self.region))]
    fn price(self) -> Quote {
        let mut missing = self.selection.missing();
        let mut lines = Vec::new();

        for (category, slot) in self.selection.slots() {
            let Some(pick) = slot.pick() else { continue };
            let Some(listing) = self.catalog.listing(category, &pick.id) else {
                warn!(%category, id = %pick.id, "the picked item is not in the catalog");
                missing.insert(category);
                continue;
            };
            let (unit_price, source) = self.unit_price(listing);
            lines.push(QuoteLine::new(listing.name.clone(), pick.quantity, unit_price, source));
        }

        if lines.is_empty() {
            info!("nothing to quote");
            return Quote::new(lines, Kilowatts::ZERO, missing);
        }

        let panel = self
            .selection
            .panels
            .pick()
            .and_then(|pick| Some((self.catalog.panel(&pick.id)?, pick.quantity)));
        let installed_power = panel.map_or(Watts::ZERO, |(panel, count)| {
            panel.peak_power * f64::from(count)
        });
        if let Some((_, count)) = panel {
            lines.push(QuoteLine::new(
                "Mounting hardware",
                count,
                self.rates.mounting_per_panel,
                PriceSource::Rate,
            ));
        }

        let accessories = (subtotal(&lines) * self.rates.accessory_rate).round();
        lines.push(QuoteLine::new("Cabling and protection", 1, accessories, PriceSource::Rate));

        let (description, labor) = self.labor(subtotal(&lines));
        lines.push(QuoteLine::new(description, 1, labor, PriceSource::Rate));

        let quote = Quote::new(lines, Kilowatts::from(installed_power), missing);
        info!(total = %quote.total, installed_power = %quote.installed_power, "priced");
        quote
    }

    fn unit_price(&self, listing: &Listing) -> (Cost, PriceSource) {
        let Some(price_lookup) = self.price_lookup else {
            return (listing.price, PriceSource::Catalog);
        };
        match price_lookup.unit_price(&listing.id) {
            Ok(price) if price.is_finite() && price >= Cost::ZERO => {
                debug!(id = %listing.id, %price, "live price");
                (price, PriceSource::Live)
            }
            Ok(price) => {
                warn!(id = %listing.id, %price, "invalid live price, using the catalog price");
                (listing.price, PriceSource::Catalog)
            }
            Err(error) => {
                warn!(id = %listing.id, "using the catalog price: {error:#}");
                (listing.price, PriceSource::Catalog)
            }
        }
    }

    fn labor(&self, subtotal: Cost) -> (String, Cost) {
        let Some(region) = self.region else {
            return ("Installation labor".to_owned(), self.rates.flat_labor);
        };
        if let Some(percentage) = self.rates.labor_percentage(region) {
            let labor = (subtotal * percentage.to_ratio()).round();
            (format!("Installation labor ({region}, {percentage})"), labor)
        } else {
            warn!(region, "unknown region, using the flat labor fee");
            ("Installation labor".to_owned(), self.rates.flat_labor)
        }
    }
}

fn subtotal(lines: &[QuoteLine]) -> Cost {
    lines.iter().map(|line| line.subtotal).sum()
}
