use crate::cli::ServeArgs;
use crate::infra::{default_promotion_config, AppState, InMemoryLevelStore, InMemoryScoreLedger};
use crate::routes::with_workflow_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use parlo::config::AppConfig;
use parlo::error::AppError;
use parlo::telemetry;
use parlo::workflows::placement::{PlacementService, StandardContent};
use parlo::workflows::progression::ProgressionService;
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

    let levels = Arc::new(InMemoryLevelStore::default());
    let ledger = Arc::new(InMemoryScoreLedger::default());
    let content = Arc::new(StandardContent::standard());
    let placement_service = Arc::new(PlacementService::new(content, levels.clone()));
    let promotion = config.progression.apply(default_promotion_config());
    let progression_service = Arc::new(ProgressionService::new(levels, ledger, promotion));

    let app = with_workflow_routes(placement_service, progression_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "placement and progression service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
