use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_grading_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use grade_predictor::config::AppConfig;
use grade_predictor::error::AppError;
use grade_predictor::grading::{GradePredictor, SubjectCatalog};
use grade_predictor::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = SubjectCatalog::global();
    let predictor = GradePredictor::new(catalog);

    let app = with_grading_routes(predictor)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        subjects = catalog.subjects().len(),
        default_track = %config.predictor.default_degree_type,
        "grade predictor ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
