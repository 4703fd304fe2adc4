use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use safetrack::clock::Clock;
use safetrack::trainings::alerts::{alert_router, AlertDispatcher, AlertService, AlertStore};
use safetrack::trainings::roster::{roster_router, EmployeeDirectory, RosterService};
use serde_json::json;
use std::sync::Arc;

/// Compose the library routers with the service-level operational endpoints.
pub(crate) fn with_training_routes<R, C, S, D>(
    roster: Arc<RosterService<R, C>>,
    alerts: Arc<AlertService<S, D, C>>,
) -> axum::Router
where
    R: EmployeeDirectory + 'static,
    S: AlertStore + 'static,
    D: AlertDispatcher + 'static,
    C: Clock + 'static,
{
    roster_router(roster)
        .merge(alert_router(alerts))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
