use super::cache::WeekCache;
use super::calendar::{iso_week_number, week_start};
use super::domain::WeekCompliance;
use super::holidays::HolidayCollection;
use super::policy::PolicyConfig;
use super::selections::SelectionLedger;
use chrono::NaiveDate;

/// Effective remote days and holidays inside one week. Cached records are
/// reused only while these match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct WeekFacts {
    pub(crate) work_from_home: Vec<NaiveDate>,
    pub(crate) holidays: Vec<NaiveDate>,
}

/// Raw facts for one week before the policy is applied.
struct WeekInputs {
    monday: NaiveDate,
    facts: WeekFacts,
}

impl WeekInputs {
    fn collect(
        monday: NaiveDate,
        ledger: &SelectionLedger,
        holidays: &HolidayCollection,
        config: &PolicyConfig,
    ) -> Self {
        let weekdays = config.total_weekdays_per_week();
        let holidays_in_week = holidays.in_week(monday, weekdays);
        // A holiday is never voluntary absence, whatever the user tagged it.
        let work_from_home = ledger
            .work_from_home_in_week(monday, weekdays)
            .into_iter()
            .filter(|date| !holidays_in_week.contains(date))
            .collect();

        Self {
            monday,
            facts: WeekFacts {
                work_from_home,
                holidays: holidays_in_week,
            },
        }
    }

    fn compliance(&self, config: &PolicyConfig) -> WeekCompliance {
        let holidays = self.facts.holidays.len() as u32;
        let work_from_home_days = self.facts.work_from_home.len() as u32;
        let total_days = config.total_weekdays_per_week().saturating_sub(holidays);
        let office_days = total_days.saturating_sub(work_from_home_days);

        let (is_compliant, percentage) = if total_days == 0 {
            (true, 100.0)
        } else {
            (
                office_days >= config.min_office_days_per_week(),
                office_days as f64 / total_days as f64 * 100.0,
            )
        };

        WeekCompliance {
            week_start: self.monday,
            week_number: iso_week_number(self.monday),
            total_days,
            work_from_home_days,
            office_days,
            holidays,
            is_compliant,
            percentage,
        }
    }
}

/// Compliance record for the week containing `date`.
pub(crate) fn aggregate_week(
    date: NaiveDate,
    ledger: &SelectionLedger,
    holidays: &HolidayCollection,
    config: &PolicyConfig,
    cache: Option<&mut WeekCache>,
) -> WeekCompliance {
    let monday = week_start(date);
    let inputs = WeekInputs::collect(monday, ledger, holidays, config);

    match cache {
        Some(cache) => cache.get_or_insert_with(monday, config.fingerprint(), &inputs.facts, || {
            inputs.compliance(config)
        }),
        None => inputs.compliance(config),
    }
}

/// One record per Monday in `weeks`, in the given order.
pub(crate) fn aggregate_weeks(
    weeks: &[NaiveDate],
    ledger: &SelectionLedger,
    holidays: &HolidayCollection,
    config: &PolicyConfig,
    mut cache: Option<&mut WeekCache>,
) -> Vec<WeekCompliance> {
    weeks
        .iter()
        .map(|monday| aggregate_week(*monday, ledger, holidays, config, cache.as_deref_mut()))
        .collect()
}
