use super::domain::{weakest, WeekCompliance, WindowCompliance};
use super::policy::{AverageRules, PolicyConfig, WindowScope};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Absorbs binary rounding in percentage comparisons (24/40 must read as 60%).
const PERCENT_TOLERANCE: f64 = 1e-9;

/// Window-level verdict handed to the result assembler.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowOutcome {
    pub(crate) windows: Vec<WindowCompliance>,
    pub(crate) is_valid: bool,
    pub(crate) overall_compliance: f64,
    pub(crate) worst_week: Option<NaiveDate>,
    pub(crate) message: String,
}

pub(crate) fn meets_threshold(percentage: f64, required: f64) -> bool {
    percentage + PERCENT_TOLERANCE >= required
}

/// Every week must stand on its own; each becomes a one-week window.
pub(crate) fn evaluate_strict(weeks: &[WeekCompliance], config: &PolicyConfig) -> WindowOutcome {
    let min = config.min_office_days_per_week();
    let required_percentage =
        min as f64 / config.total_weekdays_per_week() as f64 * 100.0;

    let windows: Vec<WindowCompliance> = weeks
        .iter()
        .enumerate()
        .map(|(index, week)| WindowCompliance {
            window_start: index,
            window_end: index,
            weeks: vec![week.clone()],
            total_office_days: week.office_days,
            total_weekdays: week.total_days,
            average_office_days_per_week: week.office_days as f64,
            compliance_percentage: week.percentage,
            is_compliant: week.is_compliant,
            required_office_days: min,
            required_percentage,
        })
        .collect();

    let overall_compliance = if weeks.is_empty() {
        100.0
    } else {
        weeks.iter().map(|week| week.percentage).sum::<f64>() / weeks.len() as f64
    };

    let violations: Vec<&WeekCompliance> = weeks.iter().filter(|week| !week.is_compliant).collect();
    let worst = weakest(violations.iter().copied());

    let message = match worst {
        Some(week) => format!(
            "{} of {} weeks fall below {} office days; week {} (starting {}) has {} office day{}",
            violations.len(),
            weeks.len(),
            min,
            week.week_number,
            week.week_start,
            week.office_days,
            plural(week.office_days)
        ),
        None if weeks.is_empty() => "No weeks to validate".to_string(),
        None => format!(
            "All {} weeks meet the minimum of {} office days",
            weeks.len(),
            min
        ),
    };

    WindowOutcome {
        windows,
        is_valid: violations.is_empty(),
        overall_compliance,
        worst_week: worst.map(|week| week.week_start),
        message,
    }
}

/// Slide (or anchor) best-N-of-M windows across the evaluated weeks.
pub(crate) fn evaluate_average(
    weeks: &[WeekCompliance],
    rules: &AverageRules,
    config: &PolicyConfig,
) -> WindowOutcome {
    let windows: Vec<WindowCompliance> = window_starts(weeks.len(), rules)
        .into_iter()
        .filter_map(|start| {
            window_at(
                weeks,
                start,
                rules.window_weeks(),
                rules,
                config.min_office_days_per_week(),
            )
        })
        .collect();

    let is_valid = windows.iter().all(|window| window.is_compliant);
    let overall_compliance = windows
        .iter()
        .map(|window| window.compliance_percentage)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .unwrap_or(100.0);

    let first_failure = windows.iter().find(|window| !window.is_compliant);
    let worst_week = first_failure
        .and_then(|window| weakest(&weeks[window.window_start..=window.window_end]))
        .map(|week| week.week_start);

    let message = match first_failure {
        Some(window) => format!(
            "Weeks {} to {}: best {} of {} weeks average {:.1}% office attendance; {:.0}% required",
            weeks[window.window_start].week_start,
            weeks[window.window_end].week_start,
            window.weeks.len(),
            window.len(),
            window.compliance_percentage,
            window.required_percentage
        ),
        None if windows.is_empty() => "No weeks to validate".to_string(),
        None => format!(
            "All {} window{} meet the {:.0}% office threshold (lowest {:.1}%)",
            windows.len(),
            if windows.len() == 1 { "" } else { "s" },
            rules.required_percentage(),
            overall_compliance
        ),
    };

    WindowOutcome {
        windows,
        is_valid,
        overall_compliance,
        worst_week,
        message,
    }
}

/// Aggregate the window starting at `start`, clamped to the available weeks.
pub(crate) fn window_at(
    weeks: &[WeekCompliance],
    start: usize,
    size: usize,
    rules: &AverageRules,
    min_office_days: u32,
) -> Option<WindowCompliance> {
    if start >= weeks.len() || size == 0 {
        return None;
    }

    let end = start.saturating_add(size).min(weeks.len()) - 1;
    let selected = best_weeks(&weeks[start..=end], rules.top_weeks());

    let total_office_days: u32 = selected.iter().map(|week| week.office_days).sum();
    let total_weekdays: u32 = selected.iter().map(|week| week.total_days).sum();
    let compliance_percentage = if total_weekdays > 0 {
        total_office_days as f64 / total_weekdays as f64 * 100.0
    } else {
        100.0
    };
    let required_percentage = rules.required_percentage();

    Some(WindowCompliance {
        window_start: start,
        window_end: end,
        weeks: selected,
        total_office_days,
        total_weekdays,
        average_office_days_per_week: total_office_days as f64 / rules.top_weeks() as f64,
        compliance_percentage,
        is_compliant: meets_threshold(compliance_percentage, required_percentage),
        required_office_days: min_office_days
            .saturating_mul(u32::try_from(rules.top_weeks()).unwrap_or(u32::MAX)),
        required_percentage,
    })
}

/// Highest office days first; earlier weeks win ties.
fn best_weeks(window: &[WeekCompliance], top: usize) -> Vec<WeekCompliance> {
    let mut ranked: Vec<WeekCompliance> = window.to_vec();
    ranked.sort_by(|a, b| {
        b.office_days
            .cmp(&a.office_days)
            .then_with(|| a.week_start.cmp(&b.week_start))
    });
    ranked.truncate(top);
    ranked
}

fn window_starts(week_count: usize, rules: &AverageRules) -> Vec<usize> {
    if week_count == 0 {
        return Vec::new();
    }

    match rules.scope() {
        WindowScope::Anchored => vec![0],
        WindowScope::Rolling if week_count <= rules.window_weeks() => vec![0],
        WindowScope::Rolling => (0..=week_count - rules.window_weeks()).collect(),
    }
}

fn plural(count: u32) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
