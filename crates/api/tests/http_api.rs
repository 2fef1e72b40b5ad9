//! HTTP-level tests driving the router with in-process requests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

use fiado_api::{AppState, create_router};
use fiado_core::rate::FixedRateSource;
use fiado_store::Store;

fn app() -> Router {
    create_router(AppState {
        store: Arc::new(Store::new()),
        rates: Arc::new(FixedRateSource::new(dec!(40), dec!(44))),
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_customer_and_transaction_flow() {
    let app = app();

    let (status, customer) = send(
        &app,
        "POST",
        "/api/v1/customers",
        Some(json!({"name": "Bodegon La Trinidad", "phone": null, "notes": null,
                    "rate_type": "bcv_usd", "custom_rate": null})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = customer["id"].as_str().unwrap().to_string();

    // Rate is locked from the source; amount_bs is derived at 40 Bs/USD.
    let (status, tx) = send(
        &app,
        "POST",
        &format!("/api/v1/customers/{id}/transactions"),
        Some(json!({"kind": "purchase", "date": "2026-03-10",
                    "description": "cemento", "amount_primary": "100",
                    "currency_track": "bcv_usd"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(tx["locked_rate"], "40");
    assert_eq!(tx["amount_bs"], "4000");

    let (status, detail) = send(&app, "GET", &format!("/api/v1/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["balances_view"]["bcv"], "100");
    assert_eq!(detail["bs_today"], "4000");

    // Settle it and the balance drops back to zero.
    let tx_id = tx["id"].as_str().unwrap();
    let (status, settled) = send(
        &app,
        "POST",
        &format!("/api/v1/transactions/{tx_id}/settle"),
        Some(json!({"method": "pago movil"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settled["is_settled"], true);

    let (_, detail) = send(&app, "GET", &format!("/api/v1/customers/{id}"), None).await;
    assert_eq!(detail["balances_view"]["bcv"], "0");
}

#[tokio::test]
async fn test_divisas_view_query() {
    let app = app();
    let (_, customer) = send(
        &app,
        "POST",
        "/api/v1/customers",
        Some(json!({"name": "Carniceria El Toro", "phone": null, "notes": null,
                    "rate_type": "bcv_usd", "custom_rate": null})),
    )
    .await;
    let id = customer["id"].as_str().unwrap().to_string();

    send(
        &app,
        "POST",
        &format!("/api/v1/customers/{id}/transactions"),
        Some(json!({"kind": "purchase", "date": "2026-03-10",
                    "description": "viveres", "amount_primary": "50",
                    "amount_secondary": "40", "currency_track": "bcv_usd"})),
    )
    .await;

    let (_, bcv) = send(&app, "GET", &format!("/api/v1/customers/{id}"), None).await;
    assert_eq!(bcv["balances_view"]["bcv"], "50");
    assert_eq!(bcv["balances_view"]["divisas"], "0");

    let (_, divisas) = send(
        &app,
        "GET",
        &format!("/api/v1/customers/{id}?view=divisas"),
        None,
    )
    .await;
    assert_eq!(divisas["balances_view"]["bcv"], "0");
    assert_eq!(divisas["balances_view"]["divisas"], "40");
}

#[tokio::test]
async fn test_share_token_lifecycle() {
    let app = app();
    let (_, customer) = send(
        &app,
        "POST",
        "/api/v1/customers",
        Some(json!({"name": "Kiosko Mirna", "phone": null, "notes": null,
                    "rate_type": "bcv_usd", "custom_rate": null})),
    )
    .await;
    let id = customer["id"].as_str().unwrap().to_string();

    let (status, issued) = send(
        &app,
        "POST",
        &format!("/api/v1/customers/{id}/share-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let token = issued["token"].as_str().unwrap().to_string();

    let (status, snapshot) = send(&app, "GET", &format!("/api/v1/share/{token}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["customer_name"], "Kiosko Mirna");
    // The snapshot never carries contact details or rate setup.
    assert!(snapshot.get("phone").is_none());
    assert!(snapshot.get("custom_rate").is_none());

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/v1/customers/{id}/share-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/v1/share/{token}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_quote_endpoints() {
    let app = app();
    let (status, quote) = send(
        &app,
        "POST",
        "/api/v1/quotes",
        Some(json!({
            "items": [{"name": "bloques", "quantity": "100", "unit": null,
                       "unit_price_primary": "0.80", "unit_price_secondary": null}],
            "pricing_mode": "bcv", "locked_rate": "40", "date": "2026-03-10",
            "customer_name": null, "customer_address": null
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(quote["total_primary"], "80.00");
    assert_eq!(quote["total_bs"], "3200.00");
    let code = quote["code"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, "GET", &format!("/api/v1/quotes/{code}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, quote);

    let (status, issued) = send(
        &app,
        "POST",
        &format!("/api/v1/quotes/{code}/issued"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(issued["externally_referenced"], true);
}

#[tokio::test]
async fn test_error_body_shape() {
    let app = app();

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/customers/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    assert!(body["message"].as_str().unwrap().starts_with("Not found"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/customers",
        Some(json!({"name": "   ", "phone": null, "notes": null,
                    "rate_type": "bcv_usd", "custom_rate": null})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_rates_endpoint() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/v1/rates/current?kind=bcv_eur", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "bcv_eur");
    assert_eq!(body["rate"], "44");
}
