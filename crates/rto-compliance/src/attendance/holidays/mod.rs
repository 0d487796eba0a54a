mod parser;

use super::calendar::{is_weekday, working_days};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use parser::HolidayRecord;

/// Deduplicated set of holiday dates. Only weekday members affect compliance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCollection {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// A date counts as a holiday only on a weekday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        is_weekday(date) && self.contains(date)
    }

    /// Holidays falling on the working days of the week starting at `monday`.
    pub fn count_in_week(&self, monday: NaiveDate, weekdays_per_week: u32) -> u32 {
        self.in_week(monday, weekdays_per_week).len() as u32
    }

    /// Holiday dates that land on a working day of the week starting at
    /// `monday`, in order.
    pub fn in_week(&self, monday: NaiveDate, weekdays_per_week: u32) -> Vec<NaiveDate> {
        working_days(monday, weekdays_per_week)
            .filter(|day| self.contains(*day))
            .collect()
    }

    pub fn weekdays_only(&self) -> Self {
        self.dates
            .iter()
            .copied()
            .filter(|date| is_weekday(*date))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for HolidayCollection {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl Extend<NaiveDate> for HolidayCollection {
    fn extend<T: IntoIterator<Item = NaiveDate>>(&mut self, iter: T) {
        self.dates.extend(iter);
    }
}

/// Lookup parameters understood by every holiday source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayQuery {
    pub country: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub weekdays_only: bool,
}

impl HolidayQuery {
    pub fn for_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Self::default()
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_years<I: IntoIterator<Item = i32>>(mut self, years: I) -> Self {
        self.years = years.into_iter().collect();
        self.years.sort_unstable();
        self.years.dedup();
        self
    }

    pub fn weekdays_only(mut self) -> Self {
        self.weekdays_only = true;
        self
    }

    fn matches_year(&self, date: NaiveDate) -> bool {
        self.years.is_empty() || self.years.contains(&date.year())
    }
}

/// Errors surfaced by holiday sources. They never cross [`load_holidays`].
#[derive(Debug, thiserror::Error)]
pub enum HolidaySourceError {
    #[error("failed to read holiday data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid holiday CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("holiday source unavailable: {0}")]
    Unavailable(String),
}

/// Capability yielding holiday dates. The validator only ever sees the
/// resulting [`HolidayCollection`].
pub trait HolidaySource: Send + Sync {
    fn holidays(&self, query: &HolidayQuery) -> Result<HolidayCollection, HolidaySourceError>;
}

/// Resolve holidays for `query`, degrading to an empty collection when the
/// source fails.
pub fn load_holidays(source: &dyn HolidaySource, query: &HolidayQuery) -> HolidayCollection {
    match source.holidays(query) {
        Ok(collection) => {
            debug!(
                country = %query.country,
                company = ?query.company,
                holidays = collection.len(),
                "holiday collection loaded"
            );
            collection
        }
        Err(error) => {
            warn!(
                country = %query.country,
                company = ?query.company,
                %error,
                "holiday lookup failed; continuing without holidays"
            );
            HolidayCollection::new()
        }
    }
}

/// Holiday calendar backed by a `date,country,company,name` CSV export.
///
/// Rows without a company apply to everyone in the country; company rows only
/// apply when the query names that company.
#[derive(Debug, Clone, Default)]
pub struct CsvHolidaySource {
    records: Vec<HolidayRecord>,
}

impl CsvHolidaySource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, HolidaySourceError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, HolidaySourceError> {
        let records = parser::parse_records(reader)?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HolidaySource for CsvHolidaySource {
    fn holidays(&self, query: &HolidayQuery) -> Result<HolidayCollection, HolidaySourceError> {
        let collection = self
            .records
            .iter()
            .filter(|record| record.country.eq_ignore_ascii_case(query.country.trim()))
            .filter(|record| match (&record.company, &query.company) {
                (None, _) => true,
                (Some(owner), Some(requested)) => owner.eq_ignore_ascii_case(requested.trim()),
                (Some(_), None) => false,
            })
            .map(|record| record.date)
            .filter(|date| query.matches_year(*date))
            .filter(|date| !query.weekdays_only || is_weekday(*date))
            .collect();

        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CALENDAR: &str = "date,country,company,name\n\
2025-01-01,US,,New Year's Day\n\
2025-05-26,us,,Memorial Day\n\
2025-07-04,US,,Independence Day\n\
2025-07-05,US,,Weekend Observance\n\
2025-11-28,US,acme,Day After Thanksgiving\n\
2025-12-26,GB,,Boxing Day\n\
2024-12-25T00:00:00Z,US,,Christmas Day\n\
not-a-date,US,,Broken Row\n";

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn source() -> CsvHolidaySource {
        CsvHolidaySource::from_reader(CALENDAR.as_bytes()).expect("calendar parses")
    }

    struct FailingSource;

    impl HolidaySource for FailingSource {
        fn holidays(&self, _query: &HolidayQuery) -> Result<HolidayCollection, HolidaySourceError> {
            Err(HolidaySourceError::Unavailable("upstream timeout".to_string()))
        }
    }

    #[test]
    fn filters_by_country_case_insensitively() {
        let holidays = load_holidays(&source(), &HolidayQuery::for_country("US"));
        assert!(holidays.contains(date(2025, 5, 26)));
        assert!(holidays.contains(date(2024, 12, 25)));
        assert!(!holidays.contains(date(2025, 12, 26)));
        assert!(!holidays.contains(date(2025, 11, 28)));
    }

    #[test]
    fn company_rows_apply_only_to_that_company() {
        let query = HolidayQuery::for_country("US").with_company("ACME");
        let holidays = load_holidays(&source(), &query);
        assert!(holidays.contains(date(2025, 11, 28)));
        assert!(holidays.contains(date(2025, 7, 4)));
    }

    #[test]
    fn year_and_weekday_filters_narrow_the_collection() {
        let query = HolidayQuery::for_country("US")
            .with_years([2025, 2025])
            .weekdays_only();
        let holidays = load_holidays(&source(), &query);
        assert_eq!(query.years, vec![2025]);
        assert!(!holidays.contains(date(2024, 12, 25)));
        assert!(!holidays.contains(date(2025, 7, 5)));
        assert_eq!(holidays.len(), 3);
    }

    #[test]
    fn failing_source_degrades_to_empty_collection() {
        let holidays = load_holidays(&FailingSource, &HolidayQuery::for_country("US"));
        assert!(holidays.is_empty());
    }

    #[test]
    fn weekend_members_are_not_holidays() {
        let holidays: HolidayCollection = [date(2025, 7, 4), date(2025, 7, 5)].into_iter().collect();
        assert!(holidays.is_holiday(date(2025, 7, 4)));
        assert!(!holidays.is_holiday(date(2025, 7, 5)));
        assert_eq!(holidays.weekdays_only().len(), 1);
        assert_eq!(holidays.count_in_week(date(2025, 6, 30), 5), 1);
        assert_eq!(holidays.count_in_week(date(2025, 6, 30), 4), 0);
    }
}
