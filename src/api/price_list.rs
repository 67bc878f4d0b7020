//! Storefront price list with up-to-date unit prices.

use std::time::Duration;

use serde::Deserialize;
use ureq::Agent;

use crate::{catalog::ItemId, core::pricing::PriceLookup, prelude::*, quantity::cost::Cost};

pub struct Client {
    agent: Agent,
    base_url: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent =
            Agent::config_builder().timeout_global(Some(Duration::from_secs(10))).build().into();
        Self { agent, base_url: base_url.into() }
    }

    fn url(&self, id: &ItemId) -> String {
        format!("{}/{id}", self.base_url.trim_end_matches('/'))
    }
}

impl PriceLookup for Client {
    #[instrument(skip_all, fields(id = %id))]
    fn unit_price(&self, id: &ItemId) -> Result<Cost> {
        debug!("fetching…");
        let response = self
            .agent
            .get(self.url(id))
            .call()
            .with_context(|| format!("failed to request the price of `{id}`"))?
            .body_mut()
            .read_json::<Response>()
            .with_context(|| format!("failed to deserialize the price of `{id}`"))?;
        Ok(response.price)
    }
}

#[derive(Deserialize)]
struct Response {
    price: Cost,
}
