use serde::{Deserialize, Serialize};

/// Which list price a sale or catalog starts from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    /// Precio menor
    #[default]
    Retail,
    /// Precio mayor
    Wholesale,
}

/// Product as read from the hosted database. Prices and cost are expected
/// to be non-negative; retail and wholesale are not reconciled here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub base_price_retail: f64,
    pub base_price_wholesale: f64,
    pub cost: f64,
}

impl Product {
    pub fn base_price(&self, tier: PriceTier) -> f64 {
        match tier {
            PriceTier::Retail => self.base_price_retail,
            PriceTier::Wholesale => self.base_price_wholesale,
        }
    }
}
