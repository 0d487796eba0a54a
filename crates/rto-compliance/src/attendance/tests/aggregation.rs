use super::common::*;
use crate::attendance::domain::{DaySelection, SelectionType};
use crate::attendance::holidays::HolidayCollection;
use crate::attendance::policy::PolicyConfig;
use crate::attendance::validator::{ComplianceValidator, ValidationInput};
use chrono::Duration;

#[test]
fn fully_holiday_week_is_vacuously_compliant() {
    let week = monday(2);
    let holidays: HolidayCollection = (0..5).map(|offset| week + Duration::days(offset)).collect();
    let selections = week_with_remote_days(week, 4);

    let record = validator().week_compliance(week, &ValidationInput::new(&selections, &holidays));

    assert_eq!(record.total_days, 0);
    assert_eq!(record.work_from_home_days, 0);
    assert_eq!(record.office_days, 0);
    assert_eq!(record.percentage, 100.0);
    assert!(record.is_compliant);
}

#[test]
fn holiday_marked_remote_is_not_counted_as_remote() {
    let week = monday(0);
    let holidays: HolidayCollection = [week + Duration::days(1)].into_iter().collect();
    let selections = vec![
        DaySelection::work_from_home(week),
        DaySelection::work_from_home(week + Duration::days(1)),
    ];

    let record = validator().week_compliance(week, &ValidationInput::new(&selections, &holidays));

    assert_eq!(record.holidays, 1);
    assert_eq!(record.total_days, 4);
    assert_eq!(record.work_from_home_days, 1);
    assert_eq!(record.office_days, 3);
    assert!(record.is_compliant);
}

#[test]
fn minimum_office_days_is_an_inclusive_boundary() {
    let holidays = HolidayCollection::new();
    let validator = validator();

    let three_remote = week_with_remote_days(monday(0), 3);
    let record = validator.week_compliance(monday(0), &ValidationInput::new(&three_remote, &holidays));
    assert_eq!(record.office_days, 2);
    assert!(!record.is_compliant);

    let two_remote = week_with_remote_days(monday(0), 2);
    let record = validator.week_compliance(monday(0), &ValidationInput::new(&two_remote, &holidays));
    assert_eq!(record.office_days, 3);
    assert!(record.is_compliant);
    assert_eq!(record.percentage, 60.0);
}

#[test]
fn monday_holiday_shrinks_the_denominator() {
    let week = monday(4);
    let holidays: HolidayCollection = [week].into_iter().collect();
    let selections = vec![
        DaySelection::work_from_home(week + Duration::days(1)),
        DaySelection::work_from_home(week + Duration::days(3)),
    ];

    let record = validator().week_compliance(week, &ValidationInput::new(&selections, &holidays));

    assert_eq!(record.total_days, 4);
    assert_eq!(record.office_days, 2);
    assert_eq!(record.percentage, 50.0);
    assert!(!record.is_compliant);
}

#[test]
fn weekend_holidays_do_not_change_the_week() {
    let week = monday(1);
    let holidays: HolidayCollection = [week + Duration::days(5), week + Duration::days(6)]
        .into_iter()
        .collect();
    let selections = week_with_remote_days(week, 1);

    let record = validator().week_compliance(week, &ValidationInput::new(&selections, &holidays));

    assert_eq!(record.holidays, 0);
    assert_eq!(record.total_days, 5);
    assert_eq!(record.office_days, 4);
}

#[test]
fn weeks_group_by_monday_across_the_year_boundary() {
    let selections = vec![
        DaySelection::work_from_home(date(2025, 12, 31)),
        DaySelection::work_from_home(date(2026, 1, 2)),
    ];
    let holidays: HolidayCollection = [date(2026, 1, 1)].into_iter().collect();

    let record =
        validator().week_compliance(date(2026, 1, 1), &ValidationInput::new(&selections, &holidays));

    assert_eq!(record.week_start, date(2025, 12, 29));
    assert_eq!(record.week_number, 1);
    assert_eq!(record.total_days, 4);
    assert_eq!(record.work_from_home_days, 2);
    assert_eq!(record.office_days, 2);
}

#[test]
fn malformed_and_duplicate_selections_are_resolved_before_counting() {
    let week = monday(0);
    let selections = vec![
        DaySelection {
            year: Some(2025),
            month: None,
            day: Some(7),
            selection_type: SelectionType::WorkFromHome,
        },
        DaySelection::work_from_home(week),
        DaySelection::office(week),
        DaySelection::work_from_home(week + Duration::days(2)),
    ];
    let holidays = HolidayCollection::new();

    let record = validator().week_compliance(week, &ValidationInput::new(&selections, &holidays));

    assert_eq!(record.work_from_home_days, 1);
    assert_eq!(record.office_days, 4);
}

#[test]
fn shortened_weeks_use_their_own_denominator() {
    let config = PolicyConfig::new(2, 4, 12, 8, 0.6).expect("valid four-day policy");
    let validator = ComplianceValidator::new(config);
    let week = monday(0);
    // Friday is outside a four-day week, so its remote mark carries no weight.
    let selections = vec![
        DaySelection::work_from_home(week),
        DaySelection::work_from_home(week + Duration::days(4)),
    ];
    let holidays = HolidayCollection::new();

    let record = validator.week_compliance(week, &ValidationInput::new(&selections, &holidays));

    assert_eq!(record.total_days, 4);
    assert_eq!(record.work_from_home_days, 1);
    assert_eq!(record.office_days, 3);
    assert_eq!(record.percentage, 75.0);
}
