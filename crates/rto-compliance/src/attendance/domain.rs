use super::calendar::week_bounds;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionType {
    #[serde(alias = "wfh", alias = "remote")]
    WorkFromHome,
    #[serde(alias = "none")]
    Office,
}

impl SelectionType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WorkFromHome => "Work From Home",
            Self::Office => "Office",
        }
    }
}

/// A single calendar cell as produced by the selection store.
///
/// Months are zero-based (0 = January). Any missing component marks the
/// record as malformed; it is kept as-is and skipped during aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySelection {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
    pub selection_type: SelectionType,
}

impl DaySelection {
    pub fn new(year: i32, month: u32, day: u32, selection_type: SelectionType) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            selection_type,
        }
    }

    pub fn work_from_home(date: NaiveDate) -> Self {
        Self::on(date, SelectionType::WorkFromHome)
    }

    pub fn office(date: NaiveDate) -> Self {
        Self::on(date, SelectionType::Office)
    }

    pub fn on(date: NaiveDate, selection_type: SelectionType) -> Self {
        Self::new(date.year(), date.month0(), date.day(), selection_type)
    }

    /// The calendar date, or `None` when a component is missing, the triple
    /// is not a real date, or its Monday-to-Sunday week runs off the calendar.
    pub fn date(&self) -> Option<NaiveDate> {
        let (year, month, day) = (self.year?, self.month?, self.day?);
        let date = NaiveDate::from_ymd_opt(year, month.checked_add(1)?, day)?;
        week_bounds(date).map(|_| date)
    }

    pub fn is_work_from_home(&self) -> bool {
        self.selection_type == SelectionType::WorkFromHome
    }
}

/// Compliance record for one Monday-aligned calendar week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekCompliance {
    pub week_start: NaiveDate,
    pub week_number: u32,
    /// Effective weekdays: working days minus holidays.
    pub total_days: u32,
    pub work_from_home_days: u32,
    pub office_days: u32,
    pub holidays: u32,
    pub is_compliant: bool,
    pub percentage: f64,
}

/// Aggregate over one window position. `window_start` and `window_end` are
/// inclusive indices into the evaluated week list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowCompliance {
    pub window_start: usize,
    pub window_end: usize,
    /// Weeks that carried the average, best first.
    pub weeks: Vec<WeekCompliance>,
    pub total_office_days: u32,
    pub total_weekdays: u32,
    pub average_office_days_per_week: f64,
    pub compliance_percentage: f64,
    pub is_compliant: bool,
    pub required_office_days: u32,
    pub required_percentage: f64,
}

impl WindowCompliance {
    pub fn contains_index(&self, index: usize) -> bool {
        index >= self.window_start && index <= self.window_end
    }

    pub fn len(&self) -> usize {
        self.window_end + 1 - self.window_start
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

/// Lowest office-day week in `weeks`, earliest week start on ties.
pub(crate) fn weakest<'a, I>(weeks: I) -> Option<&'a WeekCompliance>
where
    I: IntoIterator<Item = &'a WeekCompliance>,
{
    weeks.into_iter().min_by(|a, b| {
        a.office_days
            .cmp(&b.office_days)
            .then_with(|| a.week_start.cmp(&b.week_start))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_based_month_maps_to_calendar_date() {
        let selection = DaySelection::new(2025, 0, 31, SelectionType::WorkFromHome);
        assert_eq!(
            selection.date(),
            Some(NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date"))
        );
        let round_trip = DaySelection::work_from_home(
            NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid date"),
        );
        assert_eq!(round_trip.month, Some(11));
    }

    #[test]
    fn malformed_selections_have_no_date() {
        let missing_day = DaySelection {
            year: Some(2025),
            month: Some(1),
            day: None,
            selection_type: SelectionType::WorkFromHome,
        };
        assert_eq!(missing_day.date(), None);

        let impossible = DaySelection::new(2025, 1, 30, SelectionType::Office);
        assert_eq!(impossible.date(), None);

        let out_of_range_month = DaySelection::new(2025, 12, 1, SelectionType::Office);
        assert_eq!(out_of_range_month.date(), None);
    }

    #[test]
    fn dates_whose_week_leaves_the_calendar_are_malformed() {
        assert_eq!(DaySelection::work_from_home(NaiveDate::MIN).date(), None);
        assert_eq!(DaySelection::work_from_home(NaiveDate::MAX).date(), None);
    }

    #[test]
    fn selection_type_accepts_legacy_aliases() {
        let parsed: SelectionType = serde_json::from_str("\"none\"").expect("alias parses");
        assert_eq!(parsed, SelectionType::Office);
        let parsed: SelectionType = serde_json::from_str("\"wfh\"").expect("alias parses");
        assert_eq!(parsed, SelectionType::WorkFromHome);
    }
}
