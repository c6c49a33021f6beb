use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::atlas_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use fastfood_atlas::config::AppConfig;
use fastfood_atlas::error::AppError;
use fastfood_atlas::AtlasSession;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut config: AppConfig, mut args: ServeArgs) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let session = Arc::new(AtlasSession::load(&config.dataset)?);
    let locations = session.dataset().len();

    let app = atlas_router(session)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, locations, "fast food atlas ready");

    axum::serve(listener, app).await?;
    Ok(())
}
