use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use mostrador_catalog::{
    AdjustmentSpec, CommittedPrice, EditState, PriceAdjustmentResult, PriceEditSession, PriceTier,
    Product,
};
use mostrador_core::UserRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LineItemRequest {
    pub product: Product,
    #[serde(default)]
    pub tier: PriceTier,
    pub adjustment: AdjustmentSpec,
    /// Missing role is treated as the least privileged seller
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LineItemPreviewResponse {
    pub result: PriceAdjustmentResult,
    pub state: EditState,
    pub can_commit: bool,
}

#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub ceilings: BTreeMap<String, f64>,
    pub default_ceiling: f64,
    pub reason_threshold_percent: f64,
}

#[derive(Debug, Serialize)]
pub struct RoleCeilingResponse {
    pub role: UserRole,
    pub ceiling: f64,
    pub reason_threshold_percent: f64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/pricing/policy", get(get_policy))
        .route("/v1/pricing/policy/{role}", get(get_role_ceiling))
        .route("/v1/pricing/line-items/preview", post(preview_line_item))
        .route("/v1/pricing/line-items/commit", post(commit_line_item))
}

/// Prices and cost arrive from the database; reject what the engine is not meant to see
pub(crate) fn validate_product(product: &Product) -> Result<(), AppError> {
    let fields = [
        ("base_price_retail", product.base_price_retail),
        ("base_price_wholesale", product.base_price_wholesale),
        ("cost", product.cost),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::ValidationError(format!(
                "{} of product {} must be a non-negative number",
                name, product.id
            )));
        }
    }
    Ok(())
}

fn open_session<'a>(
    state: &'a AppState,
    req: &LineItemRequest,
) -> Result<PriceEditSession<'a>, AppError> {
    validate_product(&req.product)?;
    let mut session = PriceEditSession::new(&state.engine, req.product.clone(), req.tier, req.role);
    session.edit(req.adjustment)?;
    if let Some(reason) = &req.reason {
        session.set_reason(reason.as_str())?;
    }
    Ok(session)
}

async fn get_policy(State(state): State<AppState>) -> Json<PolicyResponse> {
    let policy = state.engine.policy();
    let ceilings = UserRole::ALL
        .into_iter()
        .map(|role| (role.to_string(), policy.authorization_ceiling(role)))
        .collect();

    Json(PolicyResponse {
        ceilings,
        default_ceiling: policy.default_ceiling,
        reason_threshold_percent: policy.reason_threshold_percent,
    })
}

async fn get_role_ceiling(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<RoleCeilingResponse>, AppError> {
    let role: UserRole = role.parse()?;

    Ok(Json(RoleCeilingResponse {
        role,
        ceiling: state.engine.authorization_ceiling(role),
        reason_threshold_percent: state.engine.policy().reason_threshold_percent,
    }))
}

async fn preview_line_item(
    State(state): State<AppState>,
    Json(req): Json<LineItemRequest>,
) -> Result<Json<LineItemPreviewResponse>, AppError> {
    let session = open_session(&state, &req)?;
    let result = session
        .result()
        .cloned()
        .ok_or_else(|| AppError::InternalServerError("Adjustment was not evaluated".to_string()))?;

    Ok(Json(LineItemPreviewResponse {
        result,
        state: session.state(),
        can_commit: session.can_commit(),
    }))
}

async fn commit_line_item(
    State(state): State<AppState>,
    Json(req): Json<LineItemRequest>,
) -> Result<Json<CommittedPrice>, AppError> {
    let mut session = open_session(&state, &req)?;
    let committed = session.commit()?;
    Ok(Json(committed))
}
