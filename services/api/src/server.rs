use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryTrainingStore, LoggingAlertDispatcher};
use crate::routes::with_training_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use safetrack::clock::SystemClock;
use safetrack::config::AppConfig;
use safetrack::error::AppError;
use safetrack::telemetry;
use safetrack::trainings::alerts::{AlertScheduler, AlertService};
use safetrack::trainings::roster::RosterService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryTrainingStore::default());
    let dispatcher = Arc::new(LoggingAlertDispatcher);
    let roster_service = Arc::new(RosterService::new(store.clone(), SystemClock));
    let alert_service = Arc::new(AlertService::new(store, dispatcher, SystemClock));

    let scheduler = AlertScheduler::new(alert_service.clone(), config.alerts.interval_minutes);
    tokio::spawn(scheduler.run());

    let app = with_training_routes(roster_service, alert_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "safety-training tracker ready");

    axum::serve(listener, app).await?;
    Ok(())
}
