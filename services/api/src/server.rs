use crate::cli::ServeArgs;
use crate::infra::{AppState, SandboxCheckoutGateway};
use crate::routes::with_intake_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};
use traffic_intake::config::AppConfig;
use traffic_intake::error::AppError;
use traffic_intake::telemetry;
use traffic_intake::workflows::intake::IntakeService;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let validator = config.intake.validator();
    if validator.is_bypassed() {
        warn!("intake step validation is bypassed; every step will accept incomplete forms");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        validator,
    };

    let gateway = Arc::new(SandboxCheckoutGateway::default());
    let intake_service = Arc::new(IntakeService::new(
        gateway,
        validator,
        config.intake.redirects(),
    ));

    let app = with_intake_routes(intake_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        checkout_origin = %config.intake.checkout_origin,
        "traffic intake service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
