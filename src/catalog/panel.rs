use serde::{Deserialize, Serialize};

use crate::{catalog::Listing, quantity::power::Watts};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Panel {
    #[serde(flatten)]
    pub listing: Listing,

    #[serde(rename = "peak_power_watts")]
    pub peak_power: Watts,

    #[serde(default)]
    pub technology: Option<PanelTechnology>,
}

impl Panel {
    pub fn details(&self) -> String {
        match self.technology {
            Some(technology) => format!("{} {technology}", self.peak_power),
            None => self.peak_power.to_string(),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize, derive_more::Display)]
#[serde(rename_all = "kebab-case")]
pub enum PanelTechnology {
    #[display("mono")]
    Monocrystalline,

    #[display("poly")]
    Polycrystalline,

    #[display("thin-film")]
    ThinFilm,
}
