use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::repository::EmployeeDirectory;
use super::service::RosterService;
use crate::clock::Clock;
use crate::trainings::domain::{Employee, EmployeeId, StatusFilter};
use crate::trainings::store::StoreError;

/// Router builder exposing roster sync, the dashboard overview, and deletes.
pub fn roster_router<R, C>(service: Arc<RosterService<R, C>>) -> Router
where
    R: EmployeeDirectory + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route("/api/v1/employees", get(overview_handler::<R, C>))
        .route("/api/v1/employees/sync", post(sync_handler::<R, C>))
        .route(
            "/api/v1/employees/:employee_id",
            delete(delete_handler::<R, C>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OverviewQuery {
    #[serde(default)]
    status: StatusFilter,
    #[serde(default)]
    search: String,
    role: Option<String>,
    /// Pin the classification day, mainly for reporting and tests.
    today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SyncRequest {
    employees: Vec<Employee>,
}

async fn overview_handler<R, C>(
    State(service): State<Arc<RosterService<R, C>>>,
    Query(query): Query<OverviewQuery>,
) -> Response
where
    R: EmployeeDirectory + 'static,
    C: Clock + 'static,
{
    let overview = service.overview(
        query.status,
        &query.search,
        query.role.as_deref(),
        query.today,
    );
    (StatusCode::OK, Json(overview)).into_response()
}

async fn sync_handler<R, C>(
    State(service): State<Arc<RosterService<R, C>>>,
    Json(request): Json<SyncRequest>,
) -> Response
where
    R: EmployeeDirectory + 'static,
    C: Clock + 'static,
{
    match service.sync(request.employees) {
        Ok(count) => {
            let payload = json!({ "success": true, "count": count });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

async fn delete_handler<R, C>(
    State(service): State<Arc<RosterService<R, C>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    R: EmployeeDirectory + 'static,
    C: Clock + 'static,
{
    match service.delete(&EmployeeId(employee_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(StoreError::NotFound) => {
            let payload = json!({ "error": "employee not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
