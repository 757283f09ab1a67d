use mostrador_core::UserRole;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::pricing::{AdjustmentSpec, PriceAdjustmentEngine, PriceAdjustmentResult};
use crate::product::{PriceTier, Product};

/// Per-product settings inside a catalog
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemDiscount {
    /// Added on top of the catalog-wide percent
    #[serde(default)]
    pub individual_percent: f64,

    /// Replaces the wholesale price as the base
    #[serde(default)]
    pub custom_base_price: Option<f64>,
}

/// Discounts configured in the catalog builder. Catalogs always start from
/// the wholesale price.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogDiscounts {
    #[serde(default)]
    pub global_percent: f64,
    #[serde(default)]
    pub items: HashMap<String, ItemDiscount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntryPrice {
    pub product_id: String,
    pub base_price: f64,
    pub total_percent: f64,
    pub result: PriceAdjustmentResult,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogPricing {
    pub entries: Vec<CatalogEntryPrice>,
    /// Products whose combined discount exceeds the requester's ceiling
    pub requires_authorization: Vec<String>,
    pub below_cost: Vec<String>,
}

impl CatalogDiscounts {
    pub fn new(global_percent: f64) -> Self {
        Self {
            global_percent,
            items: HashMap::new(),
        }
    }

    pub fn set_item(&mut self, product_id: impl Into<String>, item: ItemDiscount) {
        self.items.insert(product_id.into(), item);
    }

    /// Global and individual percents are summed, not compounded
    pub fn total_percent(&self, product_id: &str) -> f64 {
        let individual = self.items.get(product_id).map(|i| i.individual_percent).unwrap_or(0.0);
        self.global_percent + individual
    }

    pub fn base_price(&self, product: &Product) -> f64 {
        self.items
            .get(&product.id)
            .and_then(|i| i.custom_base_price)
            .unwrap_or_else(|| product.base_price(PriceTier::Wholesale))
    }

    pub fn price_entry(
        &self,
        product: &Product,
        role: UserRole,
        engine: &PriceAdjustmentEngine,
    ) -> CatalogEntryPrice {
        let base_price = self.base_price(product);
        let total_percent = self.total_percent(&product.id);
        let spec = AdjustmentSpec::Percentage { percent: total_percent };

        CatalogEntryPrice {
            product_id: product.id.clone(),
            base_price,
            total_percent,
            result: engine.evaluate(base_price, product.cost, &spec, role),
        }
    }

    pub fn price_catalog(
        &self,
        products: &[Product],
        role: UserRole,
        engine: &PriceAdjustmentEngine,
    ) -> CatalogPricing {
        let mut pricing = CatalogPricing::default();

        for product in products {
            let entry = self.price_entry(product, role, engine);
            if entry.result.requires_authorization {
                pricing.requires_authorization.push(entry.product_id.clone());
            }
            if entry.result.below_cost {
                pricing.below_cost.push(entry.product_id.clone());
            }
            pricing.entries.push(entry);
        }

        tracing::debug!(
            products = products.len(),
            global_percent = self.global_percent,
            flagged = pricing.requires_authorization.len(),
            "Priced catalog"
        );

        pricing
    }
}
