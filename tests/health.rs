mod common;

use axum::extract::State;
use common::Harness;
use invoice_actions::{config::MissingRowPolicy, routes::health::health_check};

#[tokio::test]
async fn health_check_returns_ok() {
    let h = Harness::new(MissingRowPolicy::Ignore);
    let response = health_check(State(h.state.clone())).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "up");
}

#[tokio::test]
async fn health_check_reports_degraded_database() {
    let h = Harness::new(MissingRowPolicy::Ignore);
    h.store.fail();

    let response = health_check(State(h.state.clone())).await;

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "degraded");
    assert_eq!(data.database, "down");
}
