use crate::cli::ServeArgs;
use crate::infra::{AppState, HolidayResolver};
use crate::routes::compliance_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rto_compliance::attendance::ComplianceValidator;
use rto_compliance::config::AppConfig;
use rto_compliance::error::AppError;
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

    let holidays = HolidayResolver::from_csv(args.holidays.as_deref(), config.holidays.clone())?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        validator: Arc::new(ComplianceValidator::new(config.policy.clone())),
        holidays,
    };

    let app = compliance_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        min_office_days = config.policy.min_office_days_per_week(),
        window_weeks = config.policy.rolling_window_weeks(),
        "rto compliance service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
