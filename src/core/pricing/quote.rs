use enumset::EnumSet;

use crate::{
    catalog::Category,
    quantity::{cost::Cost, power::Kilowatts},
};

/// Where the unit price of a line comes from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum PriceSource {
    #[display("catalog")]
    Catalog,

    /// External price list.
    #[display("live")]
    Live,

    /// Derived from the configured pricing rates.
    #[display("rate")]
    Rate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuoteLine {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Cost,
    pub subtotal: Cost,
    pub source: PriceSource,
}

impl QuoteLine {
    pub fn new(
        description: impl Into<String>,
        quantity: u32,
        unit_price: Cost,
        source: PriceSource,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            subtotal: unit_price * f64::from(quantity),
            source,
        }
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    pub lines: Vec<QuoteLine>,
    pub total: Cost,

    /// Peak power of the selected panels.
    pub installed_power: Kilowatts,

    /// Categories left out of the quote because nothing matched.
    pub missing: EnumSet<Category>,
}

impl Quote {
    pub fn new(
        lines: Vec<QuoteLine>,
        installed_power: Kilowatts,
        missing: EnumSet<Category>,
    ) -> Self {
        let total = lines.iter().map(|line| line.subtotal).sum();
        Self { lines, total, installed_power, missing }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
