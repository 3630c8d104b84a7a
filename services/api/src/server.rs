use crate::cli::ServeArgs;
use crate::infra::{load_program, AppState};
use crate::routes::with_deal_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use bonus_accelerator::config::AppConfig;
use bonus_accelerator::error::AppError;
use bonus_accelerator::program::history::BoundedResultLog;
use bonus_accelerator::program::DealEvaluationService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut config: AppConfig, mut args: ServeArgs) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let program = load_program(args.program_config.as_deref(), config.program.path.as_deref())?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let program_name = program.program_name.clone();
    let results = Arc::new(BoundedResultLog::default());
    let deal_service = Arc::new(DealEvaluationService::new(program, results));

    let app = with_deal_routes(deal_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, program = %program_name, "bonus accelerator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
