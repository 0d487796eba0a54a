use super::aggregate::{aggregate_week, aggregate_weeks};
use super::cache::WeekCache;
use super::calendar::Horizon;
use super::domain::{DaySelection, WeekCompliance, WindowCompliance};
use super::holidays::HolidayCollection;
use super::policy::{PolicyConfig, ValidationMode};
use super::report::{assemble, no_selections, ValidationResult};
use super::selections::SelectionLedger;
use super::window::{evaluate_average, evaluate_strict, window_at};
use chrono::NaiveDate;
use tracing::debug;

/// Everything a run reads besides the policy.
#[derive(Debug, Clone, Copy)]
pub struct ValidationInput<'a> {
    pub selections: &'a [DaySelection],
    pub holidays: &'a HolidayCollection,
    /// Weeks to evaluate; defaults to the span of the valid selections.
    pub horizon: Option<Horizon>,
}

impl<'a> ValidationInput<'a> {
    pub fn new(selections: &'a [DaySelection], holidays: &'a HolidayCollection) -> Self {
        Self {
            selections,
            holidays,
            horizon: None,
        }
    }

    pub fn with_horizon(mut self, horizon: Horizon) -> Self {
        self.horizon = Some(horizon);
        self
    }
}

/// Stateless validator applying one policy to attendance selections.
///
/// Runs are pure and synchronous; identical inputs give identical results.
#[derive(Debug, Clone)]
pub struct ComplianceValidator {
    config: PolicyConfig,
}

impl ComplianceValidator {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Overall compliance across the horizon.
    pub fn validate(&self, input: &ValidationInput<'_>, mode: &ValidationMode) -> ValidationResult {
        self.run(input, mode, None)
    }

    /// Same as [`validate`](Self::validate), reusing week records from `cache`.
    pub fn validate_with_cache(
        &self,
        input: &ValidationInput<'_>,
        mode: &ValidationMode,
        cache: &mut WeekCache,
    ) -> ValidationResult {
        self.run(input, mode, Some(cache))
    }

    /// Record for the week containing `week_start`.
    pub fn week_compliance(&self, week_start: NaiveDate, input: &ValidationInput<'_>) -> WeekCompliance {
        let ledger = SelectionLedger::from_selections(input.selections);
        aggregate_week(week_start, &ledger, input.holidays, &self.config, None)
    }

    /// Best-N-of-M aggregate for `size` weeks starting at horizon index
    /// `start_index`. `None` when the index lies outside the horizon.
    pub fn window_compliance(
        &self,
        start_index: usize,
        size: usize,
        input: &ValidationInput<'_>,
    ) -> Option<WindowCompliance> {
        let ledger = SelectionLedger::from_selections(input.selections);
        let horizon = resolve_horizon(input, &ledger)?;
        let weeks = aggregate_weeks(&horizon.weeks(), &ledger, input.holidays, &self.config, None);

        window_at(
            &weeks,
            start_index,
            size,
            &self.config.average_rules(),
            self.config.min_office_days_per_week(),
        )
    }

    fn run(
        &self,
        input: &ValidationInput<'_>,
        mode: &ValidationMode,
        cache: Option<&mut WeekCache>,
    ) -> ValidationResult {
        let ledger = SelectionLedger::from_selections(input.selections);

        if matches!(mode, ValidationMode::Average(_)) && !ledger.has_work_from_home() {
            debug!(skipped = ledger.skipped(), "no work-from-home selections; nothing to validate");
            return no_selections(mode.kind());
        }

        let weeks = resolve_horizon(input, &ledger)
            .map(|horizon| horizon.weeks())
            .unwrap_or_default();
        let records = aggregate_weeks(&weeks, &ledger, input.holidays, &self.config, cache);

        let outcome = match mode {
            ValidationMode::Strict => evaluate_strict(&records, &self.config),
            ValidationMode::Average(rules) => evaluate_average(&records, rules, &self.config),
        };

        debug!(
            mode = ?mode.kind(),
            weeks = records.len(),
            windows = outcome.windows.len(),
            skipped = ledger.skipped(),
            is_valid = outcome.is_valid,
            "attendance validated"
        );

        assemble(mode.kind(), records, outcome)
    }
}

fn resolve_horizon(input: &ValidationInput<'_>, ledger: &SelectionLedger) -> Option<Horizon> {
    input.horizon.or_else(|| Horizon::covering(ledger.dates()))
}
