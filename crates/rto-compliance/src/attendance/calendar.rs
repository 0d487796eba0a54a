use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Monday of the week containing `date`, saturating at the first
/// representable day.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset))
        .unwrap_or(NaiveDate::MIN)
}

/// Monday and Sunday of the week containing `date`, or `None` when either
/// end falls outside the calendar.
pub fn week_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let monday = date.checked_sub_days(Days::new(offset))?;
    let sunday = monday.checked_add_days(Days::new(6))?;
    Some((monday, sunday))
}

pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Whether `date` is one of the first `weekdays_per_week` days counted from
/// Monday.
pub fn is_working_day(date: NaiveDate, weekdays_per_week: u32) -> bool {
    is_weekday(date) && date.weekday().num_days_from_monday() < weekdays_per_week
}

/// The working days of the week starting at `monday`.
pub fn working_days(monday: NaiveDate, weekdays_per_week: u32) -> impl Iterator<Item = NaiveDate> {
    (0..weekdays_per_week.min(5))
        .filter_map(move |offset| monday.checked_add_days(Days::new(u64::from(offset))))
}

pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Inclusive span of calendar weeks under evaluation, stored as Mondays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horizon {
    first: NaiveDate,
    last: NaiveDate,
}

impl Horizon {
    /// Snaps both ends to their Monday; reversed bounds are swapped.
    pub fn new(first: NaiveDate, last: NaiveDate) -> Self {
        let (first, last) = if first <= last {
            (first, last)
        } else {
            (last, first)
        };

        Self {
            first: week_start(first),
            last: week_start(last),
        }
    }

    /// Smallest horizon covering every date, or `None` for an empty input.
    pub fn covering<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(date), max.max(date)),
                None => (date, date),
            });
        }

        bounds.map(|(first, last)| Self::new(first, last))
    }

    pub fn first_week(&self) -> NaiveDate {
        self.first
    }

    pub fn last_week(&self) -> NaiveDate {
        self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let monday = week_start(date);
        monday >= self.first && monday <= self.last
    }

    pub fn week_count(&self) -> usize {
        ((self.last - self.first).num_days() / 7) as usize + 1
    }

    pub fn weeks(&self) -> Vec<NaiveDate> {
        let last = self.last;
        std::iter::successors(Some(self.first), |monday| {
            monday.checked_add_days(Days::new(7))
        })
        .take_while(|monday| *monday <= last)
        .collect()
    }

    /// Calendar years touched by the working days (Monday to Friday) of
    /// every week in the span.
    pub fn years(&self) -> RangeInclusive<i32> {
        let last_friday = self
            .last
            .checked_add_days(Days::new(4))
            .unwrap_or(NaiveDate::MAX);
        self.first.year()..=last_friday.year()
    }
}
