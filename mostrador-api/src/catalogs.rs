use axum::{extract::State, routing::post, Json, Router};
use mostrador_catalog::{CatalogDiscounts, CatalogPricing, Product};
use mostrador_core::UserRole;
use serde::Deserialize;
use crate::{error::AppError, pricing::validate_product, state::AppState};

#[derive(Debug, Deserialize)]
pub struct PriceCatalogRequest {
    pub products: Vec<Product>,
    #[serde(default)]
    pub discounts: CatalogDiscounts,
    #[serde(default)]
    pub role: UserRole,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/catalogs/price", post(price_catalog))
}

/// Custom bases replace the wholesale price, so they follow the same rules
fn validate_discounts(discounts: &CatalogDiscounts) -> Result<(), AppError> {
    for (product_id, item) in &discounts.items {
        if let Some(base) = item.custom_base_price {
            if !base.is_finite() || base < 0.0 {
                return Err(AppError::ValidationError(format!(
                    "custom_base_price of product {} must be a non-negative number",
                    product_id
                )));
            }
        }
    }
    Ok(())
}

async fn price_catalog(
    State(state): State<AppState>,
    Json(req): Json<PriceCatalogRequest>,
) -> Result<Json<CatalogPricing>, AppError> {
    for product in &req.products {
        validate_product(product)?;
    }
    validate_discounts(&req.discounts)?;

    let pricing = req.discounts.price_catalog(&req.products, req.role, &state.engine);
    Ok(Json(pricing))
}
