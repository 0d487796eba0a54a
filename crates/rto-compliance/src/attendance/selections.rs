use super::calendar::{is_working_day, week_bounds};
use super::domain::{DaySelection, SelectionType};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// One logical selection per calendar date.
///
/// Later records overwrite earlier ones for the same date; malformed records
/// are counted and otherwise ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionLedger {
    by_date: BTreeMap<NaiveDate, SelectionType>,
    skipped: usize,
}

impl SelectionLedger {
    pub fn from_selections(selections: &[DaySelection]) -> Self {
        let mut ledger = Self::default();
        for selection in selections {
            match selection.date() {
                Some(date) => {
                    ledger.by_date.insert(date, selection.selection_type);
                }
                None => {
                    debug!(?selection, "skipping malformed day selection");
                    ledger.skipped += 1;
                }
            }
        }
        ledger
    }

    pub fn selection_on(&self, date: NaiveDate) -> Option<SelectionType> {
        self.by_date.get(&date).copied()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    pub fn work_from_home_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date
            .iter()
            .filter(|(_, selection)| **selection == SelectionType::WorkFromHome)
            .map(|(date, _)| *date)
    }

    pub fn has_work_from_home(&self) -> bool {
        self.work_from_home_dates().next().is_some()
    }

    /// Work-from-home dates on working days of the week starting at `monday`.
    pub fn work_from_home_in_week(&self, monday: NaiveDate, weekdays_per_week: u32) -> Vec<NaiveDate> {
        let Some((monday, sunday)) = week_bounds(monday) else {
            return Vec::new();
        };
        self.by_date
            .range(monday..=sunday)
            .filter(|(date, selection)| {
                **selection == SelectionType::WorkFromHome
                    && is_working_day(**date, weekdays_per_week)
            })
            .map(|(date, _)| *date)
            .collect()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionImportError {
    #[error("failed to read selection export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid selection CSV data: {0}")]
    Csv(#[from] csv::Error),
}

pub fn load_selections<P: AsRef<Path>>(path: P) -> Result<Vec<DaySelection>, SelectionImportError> {
    let file = std::fs::File::open(path)?;
    parse_selections(file)
}

/// Read `year,month,day,selection` rows (zero-based month).
///
/// Blank or non-numeric date parts produce malformed records rather than
/// errors; rows with an unknown selection label are dropped.
pub fn parse_selections<R: Read>(reader: R) -> Result<Vec<DaySelection>, SelectionImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut selections = Vec::new();

    for record in csv_reader.deserialize::<SelectionRow>() {
        let row = record?;
        let Some(selection_type) = parse_selection_type(&row.selection) else {
            debug!(label = %row.selection, "skipping selection row with unknown type");
            continue;
        };

        selections.push(DaySelection {
            year: row.year,
            month: row.month,
            day: row.day,
            selection_type,
        });
    }

    Ok(selections)
}

#[derive(Debug, Deserialize)]
struct SelectionRow {
    #[serde(default, deserialize_with = "lenient_number")]
    year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_number")]
    month: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    day: Option<u32>,
    selection: String,
}

fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.and_then(|value| value.trim().parse::<T>().ok()))
}

fn parse_selection_type(label: &str) -> Option<SelectionType> {
    match label.trim().to_ascii_lowercase().as_str() {
        "work_from_home" | "work-from-home" | "wfh" | "remote" => Some(SelectionType::WorkFromHome),
        "office" | "none" | "" => Some(SelectionType::Office),
        _ => None,
    }
}
