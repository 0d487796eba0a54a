use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_OFFICE_DAYS: u32 = 3;
pub const DEFAULT_WEEKDAYS_PER_WEEK: u32 = 5;
pub const DEFAULT_ROLLING_WINDOW_WEEKS: usize = 12;
pub const DEFAULT_TOP_WEEKS: usize = 8;
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Rejections raised while building a policy or a set of averaging rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("minimum office days ({min}) exceeds weekdays per week ({total})")]
    MinimumExceedsWeekdays { min: u32, total: u32 },
    #[error("weekdays per week must be between 1 and 5 (found {0})")]
    WeekdaysOutOfRange(u32),
    #[error("rolling window must span at least one week")]
    EmptyWindow,
    #[error("weeks to count must be between 1 and the window size {window} (found {top})")]
    TopWeeksOutOfRange { top: usize, window: usize },
    #[error("threshold must be a fraction in (0, 1] (found {0})")]
    ThresholdOutOfRange(f64),
}

/// The policy fields that shape a single week's record, used to key cached
/// week records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyFingerprint {
    pub min_office_days_per_week: u32,
    pub total_weekdays_per_week: u32,
}

/// Immutable return-to-office rules for a validation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyConfig {
    min_office_days_per_week: u32,
    total_weekdays_per_week: u32,
    rolling_window_weeks: usize,
    top_weeks_to_count: usize,
    threshold_percentage: f64,
}

impl PolicyConfig {
    pub fn new(
        min_office_days_per_week: u32,
        total_weekdays_per_week: u32,
        rolling_window_weeks: usize,
        top_weeks_to_count: usize,
        threshold_percentage: f64,
    ) -> Result<Self, PolicyError> {
        if total_weekdays_per_week == 0 || total_weekdays_per_week > 5 {
            return Err(PolicyError::WeekdaysOutOfRange(total_weekdays_per_week));
        }

        if min_office_days_per_week > total_weekdays_per_week {
            return Err(PolicyError::MinimumExceedsWeekdays {
                min: min_office_days_per_week,
                total: total_weekdays_per_week,
            });
        }

        validate_window(
            rolling_window_weeks,
            top_weeks_to_count,
            threshold_percentage,
        )?;

        Ok(Self {
            min_office_days_per_week,
            total_weekdays_per_week,
            rolling_window_weeks,
            top_weeks_to_count,
            threshold_percentage,
        })
    }

    pub fn min_office_days_per_week(&self) -> u32 {
        self.min_office_days_per_week
    }

    pub fn total_weekdays_per_week(&self) -> u32 {
        self.total_weekdays_per_week
    }

    pub fn rolling_window_weeks(&self) -> usize {
        self.rolling_window_weeks
    }

    pub fn top_weeks_to_count(&self) -> usize {
        self.top_weeks_to_count
    }

    pub fn threshold_percentage(&self) -> f64 {
        self.threshold_percentage
    }

    /// Averaging rules derived from this policy, sliding across the horizon.
    pub fn average_rules(&self) -> AverageRules {
        AverageRules {
            window_weeks: self.rolling_window_weeks,
            top_weeks: self.top_weeks_to_count,
            threshold_percentage: self.threshold_percentage,
            scope: WindowScope::Rolling,
        }
    }

    /// Only the fields that shape a single week's record participate; window
    /// settings never change a cached week.
    pub fn fingerprint(&self) -> PolicyFingerprint {
        PolicyFingerprint {
            min_office_days_per_week: self.min_office_days_per_week,
            total_weekdays_per_week: self.total_weekdays_per_week,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_office_days_per_week: DEFAULT_MIN_OFFICE_DAYS,
            total_weekdays_per_week: DEFAULT_WEEKDAYS_PER_WEEK,
            rolling_window_weeks: DEFAULT_ROLLING_WINDOW_WEEKS,
            top_weeks_to_count: DEFAULT_TOP_WEEKS,
            threshold_percentage: DEFAULT_THRESHOLD,
        }
    }
}

/// Which window positions an average-mode run evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowScope {
    /// Every position, sliding one week at a time.
    Rolling,
    /// A single window anchored at the first evaluated week.
    Anchored,
}

/// Best-N-of-M averaging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageRules {
    window_weeks: usize,
    top_weeks: usize,
    threshold_percentage: f64,
    scope: WindowScope,
}

impl AverageRules {
    pub fn new(
        window_weeks: usize,
        top_weeks: usize,
        threshold_percentage: f64,
        scope: WindowScope,
    ) -> Result<Self, PolicyError> {
        validate_window(window_weeks, top_weeks, threshold_percentage)?;
        Ok(Self {
            window_weeks,
            top_weeks,
            threshold_percentage,
            scope,
        })
    }

    pub fn window_weeks(&self) -> usize {
        self.window_weeks
    }

    pub fn top_weeks(&self) -> usize {
        self.top_weeks
    }

    pub fn threshold_percentage(&self) -> f64 {
        self.threshold_percentage
    }

    pub fn scope(&self) -> WindowScope {
        self.scope
    }

    pub fn with_scope(self, scope: WindowScope) -> Self {
        Self { scope, ..self }
    }

    /// Threshold expressed on the 0-100 scale used by window percentages.
    pub fn required_percentage(&self) -> f64 {
        self.threshold_percentage * 100.0
    }
}

/// The single mode switch consumed by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ValidationMode {
    Strict,
    Average(AverageRules),
}

impl ValidationMode {
    pub fn rolling(config: &PolicyConfig) -> Self {
        Self::Average(config.average_rules())
    }

    pub fn anchored(config: &PolicyConfig) -> Self {
        Self::Average(config.average_rules().with_scope(WindowScope::Anchored))
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            ValidationMode::Strict => ModeKind::Strict,
            ValidationMode::Average(_) => ModeKind::Average,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    Strict,
    Average,
}

impl ModeKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Average => "Rolling Average",
        }
    }
}

fn validate_window(window: usize, top: usize, threshold: f64) -> Result<(), PolicyError> {
    if window == 0 {
        return Err(PolicyError::EmptyWindow);
    }

    if top == 0 || top > window {
        return Err(PolicyError::TopWeeksOutOfRange { top, window });
    }

    if !threshold.is_finite() || threshold <= 0.0 || threshold > 1.0 {
        return Err(PolicyError::ThresholdOutOfRange(threshold));
    }

    Ok(())
}
