use crate::infra::{
    deserialize_date, deserialize_dates, deserialize_optional_date, evaluation_span, AppState,
    ModeChoice,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use rto_compliance::attendance::{
    ComplianceSummary, DaySelection, Horizon, ValidationInput, WeekCompliance, WeekStatus,
};
use rto_compliance::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct ValidateRequest {
    pub(crate) selections: Vec<DaySelection>,
    #[serde(default, deserialize_with = "deserialize_dates")]
    pub(crate) holidays: Vec<NaiveDate>,
    #[serde(default)]
    pub(crate) country: Option<String>,
    #[serde(default)]
    pub(crate) company: Option<String>,
    #[serde(default)]
    pub(crate) mode: ModeChoice,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ValidateResponse {
    #[serde(flatten)]
    pub(crate) summary: ComplianceSummary,
    pub(crate) holidays_applied: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WeekRequest {
    #[serde(deserialize_with = "deserialize_date")]
    pub(crate) week_start: NaiveDate,
    pub(crate) selections: Vec<DaySelection>,
    #[serde(default, deserialize_with = "deserialize_dates")]
    pub(crate) holidays: Vec<NaiveDate>,
    #[serde(default)]
    pub(crate) country: Option<String>,
    #[serde(default)]
    pub(crate) company: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WeekResponse {
    #[serde(flatten)]
    pub(crate) week: WeekCompliance,
    pub(crate) status_label: &'static str,
}

pub(crate) fn compliance_routes() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/compliance/validate",
            axum::routing::post(validate_endpoint),
        )
        .route("/api/v1/compliance/week", axum::routing::post(week_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn validate_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, AppError> {
    let ValidateRequest {
        selections,
        holidays,
        country,
        company,
        mode,
        from,
        to,
    } = payload;

    let span = evaluation_span(from, to, &selections)?;
    let query = state.holidays.query(country, company);
    let holidays = state.holidays.resolve(&holidays, query, span);

    let mut input = ValidationInput::new(&selections, &holidays);
    if let Some(span) = span {
        input = input.with_horizon(span);
    }

    let validator = state.validator.as_ref();
    let result = validator.validate(&input, &mode.into_mode(validator.config()));
    debug!(?mode, is_valid = result.is_valid, "compliance request validated");

    Ok(Json(ValidateResponse {
        summary: result.summary(),
        holidays_applied: holidays.len(),
    }))
}

pub(crate) async fn week_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<WeekRequest>,
) -> Result<Json<WeekResponse>, AppError> {
    let WeekRequest {
        week_start,
        selections,
        holidays,
        country,
        company,
    } = payload;

    let query = state.holidays.query(country, company);
    let span = Horizon::new(week_start, week_start);
    let holidays = state.holidays.resolve(&holidays, query, Some(span));
    let week = state
        .validator
        .week_compliance(week_start, &ValidationInput::new(&selections, &holidays));

    let status = if week.is_compliant {
        WeekStatus::Compliant
    } else {
        WeekStatus::Invalid
    };

    Ok(Json(WeekResponse {
        week,
        status_label: status.label(),
    }))
}
