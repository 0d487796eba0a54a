use super::status::WeekStatus;
use crate::attendance::domain::{WeekCompliance, WindowCompliance};
use crate::attendance::policy::ModeKind;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WeekStatusEntry {
    pub week_start: NaiveDate,
    pub status: WeekStatus,
    pub status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_from_home_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holidays: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl WeekStatusEntry {
    pub(crate) fn new(
        week_start: NaiveDate,
        week: Option<&WeekCompliance>,
        status: WeekStatus,
    ) -> Self {
        Self {
            week_start,
            status,
            status_label: status.label(),
            week_number: week.map(|week| week.week_number),
            office_days: week.map(|week| week.office_days),
            total_days: week.map(|week| week.total_days),
            work_from_home_days: week.map(|week| week.work_from_home_days),
            holidays: week.map(|week| week.holidays),
            percentage: week.map(|week| week.percentage.round()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowEntry {
    pub first_week: NaiveDate,
    pub last_week: NaiveDate,
    pub counted_weeks: Vec<NaiveDate>,
    pub total_office_days: u32,
    pub total_weekdays: u32,
    pub compliance_percentage: f64,
    pub required_percentage: f64,
    pub is_compliant: bool,
}

impl WindowEntry {
    pub(crate) fn from_window(window: &WindowCompliance, weeks: &[WeekCompliance]) -> Option<Self> {
        let first_week = weeks.get(window.window_start)?.week_start;
        let last_week = weeks.get(window.window_end)?.week_start;

        Some(Self {
            first_week,
            last_week,
            counted_weeks: window.weeks.iter().map(|week| week.week_start).collect(),
            total_office_days: window.total_office_days,
            total_weekdays: window.total_weekdays,
            compliance_percentage: (window.compliance_percentage * 10.0).round() / 10.0,
            required_percentage: window.required_percentage,
            is_compliant: window.is_compliant,
        })
    }
}

/// Serializable overview for calendar front ends and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceSummary {
    pub is_valid: bool,
    pub message: String,
    pub mode: ModeKind,
    pub mode_label: &'static str,
    pub overall_compliance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_week: Option<NaiveDate>,
    pub weeks: Vec<WeekStatusEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<WindowEntry>,
}

impl ComplianceSummary {
    pub fn count(&self, status: WeekStatus) -> usize {
        self.weeks.iter().filter(|entry| entry.status == status).count()
    }
}
