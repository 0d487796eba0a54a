use chrono::{Duration, NaiveDate};

use crate::attendance::calendar::Horizon;
use crate::attendance::domain::{DaySelection, SelectionType};
use crate::attendance::policy::PolicyConfig;
use crate::attendance::validator::ComplianceValidator;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Monday of the `index`-th week after Monday 2025-01-06.
pub(super) fn monday(index: usize) -> NaiveDate {
    date(2025, 1, 6) + Duration::weeks(index as i64)
}

pub(super) fn horizon(weeks: usize) -> Horizon {
    Horizon::new(monday(0), monday(weeks - 1))
}

pub(super) fn policy() -> PolicyConfig {
    PolicyConfig::default()
}

pub(super) fn validator() -> ComplianceValidator {
    ComplianceValidator::new(policy())
}

/// Marks the first `remote` weekdays of the week remote and the rest office.
pub(super) fn week_with_remote_days(week_start: NaiveDate, remote: u32) -> Vec<DaySelection> {
    (0..5)
        .map(|offset| {
            let selection_type = if offset < remote {
                SelectionType::WorkFromHome
            } else {
                SelectionType::Office
            };
            DaySelection::on(week_start + Duration::days(offset as i64), selection_type)
        })
        .collect()
}

/// One week per entry, each with the given number of office days out of five.
pub(super) fn weeks_with_office_days(office_days: &[u32]) -> Vec<DaySelection> {
    office_days
        .iter()
        .enumerate()
        .flat_map(|(index, office)| week_with_remote_days(monday(index), 5 - office))
        .collect()
}
