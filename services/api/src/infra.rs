use chrono::NaiveDate;
use clap::ValueEnum;
use metrics_exporter_prometheus::PrometheusHandle;
use rto_compliance::attendance::{
    load_holidays, ComplianceValidator, CsvHolidaySource, DaySelection, HolidayCollection,
    HolidayQuery, HolidaySource, Horizon, PolicyConfig, ValidationMode,
};
use rto_compliance::config::HolidaySettings;
use rto_compliance::error::AppError;
use serde::Deserialize;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) validator: Arc<ComplianceValidator>,
    pub(crate) holidays: HolidayResolver,
}

/// Validation flavour chosen by a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ModeChoice {
    Strict,
    #[default]
    Rolling,
    Anchored,
}

impl ModeChoice {
    pub(crate) fn into_mode(self, policy: &PolicyConfig) -> ValidationMode {
        match self {
            Self::Strict => ValidationMode::Strict,
            Self::Rolling => ValidationMode::rolling(policy),
            Self::Anchored => ValidationMode::anchored(policy),
        }
    }
}

/// Combines explicit holiday dates with an optional calendar source and the
/// configured default country/company.
#[derive(Clone, Default)]
pub(crate) struct HolidayResolver {
    source: Option<Arc<dyn HolidaySource>>,
    defaults: HolidaySettings,
}

impl HolidayResolver {
    pub(crate) fn new(source: Option<Arc<dyn HolidaySource>>, defaults: HolidaySettings) -> Self {
        Self { source, defaults }
    }

    pub(crate) fn from_csv(path: Option<&Path>, defaults: HolidaySettings) -> Result<Self, AppError> {
        let source = match path {
            Some(path) => Some(Arc::new(CsvHolidaySource::from_path(path)?) as Arc<dyn HolidaySource>),
            None => None,
        };
        Ok(Self::new(source, defaults))
    }

    /// Request values override the configured defaults field by field.
    pub(crate) fn query(&self, country: Option<String>, company: Option<String>) -> Option<HolidayQuery> {
        let settings = HolidaySettings {
            country: country.or_else(|| self.defaults.country.clone()),
            company: company.or_else(|| self.defaults.company.clone()),
        };
        settings.query()
    }

    /// Explicit dates plus the calendar entries for every year touched by the
    /// working days of `span`. Without a span there is nothing to look up.
    pub(crate) fn resolve(
        &self,
        explicit: &[NaiveDate],
        query: Option<HolidayQuery>,
        span: Option<Horizon>,
    ) -> HolidayCollection {
        let mut collection: HolidayCollection = explicit.iter().copied().collect();

        if let (Some(source), Some(query), Some(span)) = (self.source.as_deref(), query, span) {
            let query = query.with_years(span.years());
            collection.extend(load_holidays(source, &query).iter());
        }

        collection
    }
}

/// Longest span a single request may evaluate, roughly ten years.
pub(crate) const MAX_HORIZON_WEEKS: usize = 520;

/// The weeks a run evaluates: the explicit range when given, otherwise the
/// span of the valid selections. Oversized spans are rejected.
pub(crate) fn evaluation_span(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    selections: &[DaySelection],
) -> Result<Option<Horizon>, AppError> {
    let span = match horizon_from(from, to)? {
        Some(horizon) => Some(horizon),
        None => Horizon::covering(selections.iter().filter_map(DaySelection::date)),
    };

    match span {
        Some(span) if span.week_count() > MAX_HORIZON_WEEKS => Err(AppError::InvalidRequest(
            format!(
                "evaluation span of {} weeks exceeds the limit of {MAX_HORIZON_WEEKS}",
                span.week_count()
            ),
        )),
        span => Ok(span),
    }
}

/// Both bounds or neither; a single bound is rejected.
pub(crate) fn horizon_from(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Option<Horizon>, AppError> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(Some(Horizon::new(from, to))),
        (None, None) => Ok(None),
        _ => Err(AppError::InvalidRequest(
            "`from` and `to` must be given together".to_string(),
        )),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

pub(crate) fn deserialize_dates<'de, D>(deserializer: D) -> Result<Vec<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    raw.iter()
        .map(|value| parse_date(value).map_err(serde::de::Error::custom))
        .collect()
}
