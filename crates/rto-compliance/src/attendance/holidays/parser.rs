use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::debug;

#[derive(Debug, Clone)]
pub(crate) struct HolidayRecord {
    pub(crate) date: NaiveDate,
    pub(crate) country: String,
    pub(crate) company: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<HolidayRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<HolidayRow>() {
        let row = record?;
        let Some(date) = parse_date(&row.date) else {
            debug!(raw = %row.date, name = ?row.name, "skipping holiday row with unreadable date");
            continue;
        };

        records.push(HolidayRecord {
            date,
            country: row.country,
            company: row.company,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct HolidayRow {
    date: String,
    country: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts plain dates or RFC 3339 timestamps; timestamps keep their local
/// calendar date.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}
