use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAlertPublisher, InMemoryPoolRepository};
use crate::routes::with_pool_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use clearwater::config::AppConfig;
use clearwater::error::AppError;
use clearwater::pools::PoolCareService;
use clearwater::telemetry;

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

    let repository = Arc::new(InMemoryPoolRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let pool_service = Arc::new(PoolCareService::new(repository, alerts));

    let app = with_pool_routes(pool_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "pool-care service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
