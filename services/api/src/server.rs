use crate::cli::ServeArgs;
use crate::infra::{demo_catalog, AppState, InMemoryRecordStore};
use crate::routes::with_refinement_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chem_refine::config::AppConfig;
use chem_refine::error::AppError;
use chem_refine::telemetry;
use chem_refine::workflows::refinement::RefinementService;
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

    let store = Arc::new(InMemoryRecordStore::seeded(demo_catalog()));
    let refinement_service = Arc::new(RefinementService::new(store));

    let app = with_refinement_routes(refinement_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "refinement service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
