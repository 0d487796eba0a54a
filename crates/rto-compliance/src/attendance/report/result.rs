use super::status::{resolve, StatusFacts, WeekStatus};
use super::views::{ComplianceSummary, WeekStatusEntry, WindowEntry};
use crate::attendance::calendar::week_start;
use crate::attendance::domain::{WeekCompliance, WindowCompliance};
use crate::attendance::policy::ModeKind;
use crate::attendance::window::WindowOutcome;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub(crate) const NO_SELECTIONS_MESSAGE: &str = "No selections to validate";

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
    pub overall_compliance: f64,
    pub mode: ModeKind,
    /// Every week of the horizon, in calendar order.
    pub weeks: Vec<WeekCompliance>,
    pub windows: Vec<WindowCompliance>,
    pub violating_windows: Vec<WindowCompliance>,
    pub compliant_windows: Vec<WindowCompliance>,
    pub evaluated_weeks: BTreeSet<NaiveDate>,
    /// Weakest week of the first failing window, highlighted by the UI.
    pub worst_week: Option<NaiveDate>,
}

impl ValidationResult {
    /// Status of the week containing `date`.
    pub fn week_status(&self, date: NaiveDate) -> WeekStatus {
        let monday = week_start(date);
        let evaluated = self.evaluated_weeks.contains(&monday);
        let located = self
            .weeks
            .iter()
            .position(|week| week.week_start == monday)
            .map(|index| (index, &self.weeks[index]));

        let Some((index, week)) = located.filter(|_| evaluated) else {
            return WeekStatus::Ignored;
        };

        let windows_compliant = self.is_valid
            || self
                .windows
                .iter()
                .filter(|window| window.contains_index(index))
                .all(|window| window.is_compliant);

        resolve(StatusFacts {
            evaluated,
            week_compliant: week.is_compliant,
            windows_compliant,
            is_worst_week: self.worst_week == Some(monday),
        })
    }

    pub fn week(&self, date: NaiveDate) -> Option<&WeekCompliance> {
        let monday = week_start(date);
        self.weeks.iter().find(|week| week.week_start == monday)
    }

    /// Presentation view over the given weeks (any day of each week works).
    pub fn summary_for(&self, displayed: &[NaiveDate]) -> ComplianceSummary {
        let mut seen = BTreeSet::new();
        let weeks = displayed
            .iter()
            .map(|date| week_start(*date))
            .filter(|monday| seen.insert(*monday))
            .map(|monday| WeekStatusEntry::new(monday, self.week(monday), self.week_status(monday)))
            .collect();

        self.build_summary(weeks)
    }

    /// Presentation view over every week of the horizon.
    pub fn summary(&self) -> ComplianceSummary {
        let weeks = self
            .weeks
            .iter()
            .map(|week| {
                WeekStatusEntry::new(week.week_start, Some(week), self.week_status(week.week_start))
            })
            .collect();

        self.build_summary(weeks)
    }

    fn build_summary(&self, weeks: Vec<WeekStatusEntry>) -> ComplianceSummary {
        let windows = self
            .windows
            .iter()
            .filter_map(|window| WindowEntry::from_window(window, &self.weeks))
            .collect();

        ComplianceSummary {
            is_valid: self.is_valid,
            message: self.message.clone(),
            mode: self.mode,
            mode_label: self.mode.label(),
            overall_compliance: (self.overall_compliance * 10.0).round() / 10.0,
            worst_week: self.worst_week,
            weeks,
            windows,
        }
    }
}

/// Defined success when there is nothing marked remote.
pub(crate) fn no_selections(mode: ModeKind) -> ValidationResult {
    ValidationResult {
        is_valid: true,
        message: NO_SELECTIONS_MESSAGE.to_string(),
        overall_compliance: 100.0,
        mode,
        weeks: Vec::new(),
        windows: Vec::new(),
        violating_windows: Vec::new(),
        compliant_windows: Vec::new(),
        evaluated_weeks: BTreeSet::new(),
        worst_week: None,
    }
}

pub(crate) fn assemble(
    mode: ModeKind,
    weeks: Vec<WeekCompliance>,
    outcome: WindowOutcome,
) -> ValidationResult {
    let evaluated_weeks = outcome
        .windows
        .iter()
        .flat_map(|window| weeks[window.window_start..=window.window_end].iter())
        .map(|week| week.week_start)
        .collect();

    let (compliant_windows, violating_windows): (Vec<_>, Vec<_>) = outcome
        .windows
        .iter()
        .cloned()
        .partition(|window| window.is_compliant);

    ValidationResult {
        is_valid: outcome.is_valid,
        message: outcome.message,
        overall_compliance: outcome.overall_compliance,
        mode,
        weeks,
        windows: outcome.windows,
        violating_windows,
        compliant_windows,
        evaluated_weeks,
        worst_week: outcome.worst_week,
    }
}
