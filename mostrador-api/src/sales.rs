use axum::{routing::post, Json, Router};
use mostrador_catalog::{SaleDiscount, SaleDiscountSpec};
use serde::Deserialize;
use tracing::info;
use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SaleDiscountRequest {
    pub subtotal: f64,
    pub discount: SaleDiscountSpec,
    #[serde(default)]
    pub reason: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/sales/discount", post(apply_sale_discount))
}

async fn apply_sale_discount(
    Json(req): Json<SaleDiscountRequest>,
) -> Result<Json<SaleDiscount>, AppError> {
    let discount = SaleDiscount::compute(req.subtotal, req.discount);
    discount.validate(&req.reason)?;

    info!(
        subtotal = discount.subtotal,
        amount = discount.amount,
        reason = %req.reason.trim(),
        "Sale discount applied"
    );
    Ok(Json(discount))
}
