//! Shared helpers for the router tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use std::time::Duration;
use tower::ServiceExt;

use roster_axum::bootstrap::{AxumContext, CorsConfig};
use roster_axum::routes::create_router;
use roster_core::RoundTrips;
use roster_db::TestDb;

/// Router over a seeded in-memory database, plus its round-trip counter.
pub async fn seeded_app() -> (Router, RoundTrips) {
    app_for(TestDb::seeded().await.unwrap())
}

pub fn app_for(db: TestDb) -> (Router, RoundTrips) {
    let round_trips = db.round_trips().clone();
    let ctx = AxumContext::new(db.core());
    let router = create_router(ctx, &CorsConfig::AllowAll, Duration::from_secs(30));
    (router, round_trips)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(app, "GET", uri, None).await;
    (status, serde_json::from_slice(&body).unwrap())
}
