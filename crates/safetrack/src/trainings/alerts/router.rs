use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::dispatcher::AlertDispatcher;
use super::repository::AlertStore;
use super::service::AlertService;
use crate::clock::Clock;

/// Router builder exposing the alert pipeline over HTTP: candidate preview,
/// manual dispatch, and the sent-alert history panel.
pub fn alert_router<S, D, C>(service: Arc<AlertService<S, D, C>>) -> Router
where
    S: AlertStore + 'static,
    D: AlertDispatcher + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/api/v1/alerts", get(preview_handler::<S, D, C>))
        .route("/api/v1/alerts/dispatch", post(dispatch_handler::<S, D, C>))
        .route("/api/v1/alerts/history", get(history_handler::<S, D, C>))
        .with_state(service)
}

async fn preview_handler<S, D, C>(
    State(service): State<Arc<AlertService<S, D, C>>>,
) -> Json<serde_json::Value>
where
    S: AlertStore + 'static,
    D: AlertDispatcher + 'static,
    C: Clock + 'static,
{
    let alerts = service.alerts_to_send();
    Json(json!({ "count": alerts.len(), "alerts": alerts }))
}

async fn dispatch_handler<S, D, C>(
    State(service): State<Arc<AlertService<S, D, C>>>,
) -> Json<serde_json::Value>
where
    S: AlertStore + 'static,
    D: AlertDispatcher + 'static,
    C: Clock + 'static,
{
    let delivered = service.dispatch_pending();
    Json(json!({ "delivered": delivered }))
}

async fn history_handler<S, D, C>(
    State(service): State<Arc<AlertService<S, D, C>>>,
) -> Json<serde_json::Value>
where
    S: AlertStore + 'static,
    D: AlertDispatcher + 'static,
    C: Clock + 'static,
{
    let history = service.email_history();
    Json(json!({ "count": history.len(), "history": history }))
}
