use crate::cli::ServeArgs;
use crate::infra::{seed_demo_portfolio, AppState};
use crate::routes::with_backoffice_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mall_ops::backoffice::BackOfficeService;
use mall_ops::config::AppConfig;
use mall_ops::error::AppError;
use mall_ops::telemetry;
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

    let service = Arc::new(BackOfficeService::new());
    if args.seed || config.seed_demo_data {
        seed_demo_portfolio(&service)?;
        info!("seeded sample mall portfolio");
    }

    let app = with_backoffice_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "mall back office ready");

    axum::serve(listener, app).await?;
    Ok(())
}
