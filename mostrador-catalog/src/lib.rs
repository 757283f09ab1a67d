pub mod product;
pub mod policy;
pub mod pricing;
pub mod session;
pub mod bulk;
pub mod sale;
pub mod display;

pub use product::{PriceTier, Product};
pub use policy::AuthorizationPolicy;
pub use pricing::{
    compute_discount_percent, compute_final_price, compute_margin_percent, is_below_cost,
    AdjustmentSpec, PriceAdjustmentEngine, PriceAdjustmentResult,
};
pub use session::{CommitError, CommittedPrice, EditState, PriceClassification, PriceEditSession};
pub use bulk::{CatalogDiscounts, CatalogEntryPrice, CatalogPricing, ItemDiscount};
pub use sale::{SaleDiscount, SaleDiscountError, SaleDiscountSpec};
