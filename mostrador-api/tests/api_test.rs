use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use mostrador_api::{app, AppState};
use mostrador_catalog::PriceAdjustmentEngine;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router() -> Router {
    app(AppState::new(PriceAdjustmentEngine::default()))
}

fn product() -> Value {
    json!({
        "id": "ALI-001",
        "name": "Alimento balanceado 15kg",
        "base_price_retail": 1000.0,
        "base_price_wholesale": 900.0,
        "cost": 700.0
    })
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = router().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(request).await
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

#[tokio::test]
async fn test_health() {
    let response = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_policy_lists_every_role() {
    let (status, body) = get("/v1/pricing/policy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ceilings"]["vendedor"], 10.0);
    assert_eq!(body["ceilings"]["gerente"], 100.0);
    assert_eq!(body["ceilings"]["editor"], 10.0);
    assert_eq!(body["reason_threshold_percent"], 10.0);
}

#[tokio::test]
async fn test_role_ceiling_lookup() {
    let (status, body) = get("/v1/pricing/policy/supervisor").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "supervisor");
    assert_eq!(body["ceiling"], 20.0);

    let (status, _) = get("/v1/pricing/policy/cajero").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_preview_reports_flags() {
    let (status, body) = post(
        "/v1/pricing/line-items/preview",
        json!({
            "product": product(),
            "adjustment": { "type": "percentage", "percent": 20.0 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["final_price"], 800.0);
    assert_eq!(body["result"]["discount_amount"], 200.0);
    assert_eq!(body["result"]["requires_authorization"], true);
    assert_eq!(body["result"]["requires_reason"], true);
    assert_eq!(body["result"]["below_cost"], false);
    assert_eq!(body["state"]["state"], "blocked");
    assert_eq!(body["can_commit"], false);
}

#[tokio::test]
async fn test_commit_refused_without_authorization() {
    let (status, body) = post(
        "/v1/pricing/line-items/commit",
        json!({
            "product": product(),
            "role": "vendedor",
            "adjustment": { "type": "percentage", "percent": 20.0 },
            "reason": "Cliente frecuente"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("authorization"));
}

#[tokio::test]
async fn test_commit_requires_reason() {
    let request = json!({
        "product": product(),
        "role": "gerente",
        "tier": "wholesale",
        "adjustment": { "type": "fixed_price", "price": 650.0 }
    });
    let (status, _) = post("/v1/pricing/line-items/commit", request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = post(
        "/v1/pricing/line-items/commit",
        json!({
            "product": product(),
            "role": "gerente",
            "tier": "wholesale",
            "adjustment": { "type": "fixed_price", "price": 650.0 },
            "reason": "Liquidacion"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit_price"], 650.0);
    assert_eq!(body["classification"]["kind"], "custom");
    assert_eq!(body["reason"], "Liquidacion");
}

#[tokio::test]
async fn test_commit_list_price() {
    let (status, body) = post(
        "/v1/pricing/line-items/commit",
        json!({
            "product": product(),
            "adjustment": { "type": "fixed_amount", "amount": 0.0 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["unit_price"], 1000.0);
    assert_eq!(body["classification"], json!({ "kind": "list", "tier": "retail" }));
    assert!(body["reason"].is_null());
}

#[tokio::test]
async fn test_negative_cost_rejected() {
    let mut bad = product();
    bad["cost"] = json!(-1.0);
    let (status, _) = post(
        "/v1/pricing/line-items/preview",
        json!({ "product": bad, "adjustment": { "type": "percentage", "percent": 5.0 } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalog_pricing() {
    let (status, body) = post(
        "/v1/catalogs/price",
        json!({
            "products": [product()],
            "role": "supervisor",
            "discounts": {
                "global_percent": 10.0,
                "items": { "ALI-001": { "individual_percent": 15.0 } }
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"][0]["total_percent"], 25.0);
    assert_eq!(body["entries"][0]["result"]["final_price"], 675.0);
    assert_eq!(body["requires_authorization"], json!(["ALI-001"]));
    assert_eq!(body["below_cost"], json!(["ALI-001"]));
}

#[tokio::test]
async fn test_catalog_rejects_negative_custom_base() {
    let (status, body) = post(
        "/v1/catalogs/price",
        json!({
            "products": [product()],
            "discounts": {
                "global_percent": 5.0,
                "items": { "ALI-001": { "custom_base_price": -100.0 } }
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("custom_base_price"));
}

#[tokio::test]
async fn test_sale_discount() {
    let (status, body) = post(
        "/v1/sales/discount",
        json!({
            "subtotal": 300.0,
            "discount": { "type": "fixed_amount", "amount": 100.0 },
            "reason": "Compra por volumen"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["percent"], 33.33);
    assert_eq!(body["total"], 200.0);

    let (status, body) = post(
        "/v1/sales/discount",
        json!({
            "subtotal": 300.0,
            "discount": { "type": "percentage", "percent": 10.0 }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("reason"));
}
