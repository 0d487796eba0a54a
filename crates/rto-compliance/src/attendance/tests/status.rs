use super::common::*;
use crate::attendance::holidays::HolidayCollection;
use crate::attendance::policy::{PolicyConfig, ValidationMode};
use crate::attendance::report::WeekStatus;
use crate::attendance::validator::{ComplianceValidator, ValidationInput};
use chrono::Duration;

#[test]
fn weekly_violation_stays_invalid_inside_a_passing_window() {
    let mut office = vec![0];
    office.extend([5; 11]);
    let selections = weeks_with_office_days(&office);
    let holidays = HolidayCollection::new();
    let validator = validator();

    let result = validator.validate(
        &ValidationInput::new(&selections, &holidays),
        &ValidationMode::rolling(validator.config()),
    );

    assert!(result.is_valid, "{}", result.message);
    assert_eq!(result.week_status(monday(0)), WeekStatus::Invalid);
    for index in 1..12 {
        assert_eq!(result.week_status(monday(index)), WeekStatus::Compliant, "week {index}");
    }
}

#[test]
fn failing_window_marks_its_weakest_week_and_leaves_the_rest_pending() {
    let config = PolicyConfig::new(2, 5, 12, 8, 0.6).expect("valid policy");
    let validator = ComplianceValidator::new(config);
    let mut office = vec![3, 3];
    office.extend([2; 10]);
    let selections = weeks_with_office_days(&office);
    let holidays = HolidayCollection::new();

    let result = validator.validate(
        &ValidationInput::new(&selections, &holidays),
        &ValidationMode::rolling(validator.config()),
    );

    assert!(!result.is_valid);
    assert_eq!(result.overall_compliance, 45.0);
    assert_eq!(result.worst_week, Some(monday(2)));
    assert_eq!(result.week_status(monday(2)), WeekStatus::Invalid);

    let pending: Vec<_> = (0..12)
        .filter(|index| result.week_status(monday(*index)) == WeekStatus::Pending)
        .collect();
    assert_eq!(pending, vec![0, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
}

#[test]
fn weeks_outside_evaluated_windows_are_ignored() {
    let selections = weeks_with_office_days(&[5, 5, 5, 5, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0]);
    let holidays = HolidayCollection::new();
    let validator = validator();
    let input = ValidationInput::new(&selections, &holidays);

    let anchored = validator.validate(&input, &ValidationMode::anchored(validator.config()));
    assert_eq!(anchored.week_status(monday(12)), WeekStatus::Ignored);
    assert_eq!(anchored.week_status(monday(13)), WeekStatus::Ignored);
    assert_eq!(anchored.week_status(monday(0)), WeekStatus::Compliant);

    let rolling = validator.validate(&input, &ValidationMode::rolling(validator.config()));
    assert_eq!(rolling.week_status(monday(30)), WeekStatus::Ignored);
    assert_eq!(rolling.week_status(monday(0) - Duration::weeks(1)), WeekStatus::Ignored);
}

#[test]
fn status_lookup_accepts_any_day_of_the_week() {
    let selections = weeks_with_office_days(&[5, 1, 5]);
    let holidays = HolidayCollection::new();

    let result = validator().validate(
        &ValidationInput::new(&selections, &holidays),
        &ValidationMode::Strict,
    );

    assert_eq!(result.week_status(monday(1) + Duration::days(3)), WeekStatus::Invalid);
    assert_eq!(result.week_status(monday(1) + Duration::days(6)), WeekStatus::Invalid);
}

#[test]
fn strict_mode_grades_each_week_on_its_own() {
    let selections = weeks_with_office_days(&[5, 2, 4]);
    let holidays = HolidayCollection::new();

    let result = validator().validate(
        &ValidationInput::new(&selections, &holidays),
        &ValidationMode::Strict,
    );

    assert!(!result.is_valid);
    assert_eq!(result.week_status(monday(0)), WeekStatus::Compliant);
    assert_eq!(result.week_status(monday(1)), WeekStatus::Invalid);
    assert_eq!(result.week_status(monday(2)), WeekStatus::Compliant);
}

#[test]
fn summary_deduplicates_weeks_and_keeps_ignored_entries() {
    let selections = weeks_with_office_days(&[5, 1, 5]);
    let holidays = HolidayCollection::new();

    let result = validator().validate(
        &ValidationInput::new(&selections, &holidays),
        &ValidationMode::Strict,
    );
    let summary = result.summary_for(&[
        monday(0),
        monday(0) + Duration::days(2),
        monday(1) + Duration::days(4),
        monday(20),
    ]);

    assert_eq!(summary.weeks.len(), 3);
    assert_eq!(summary.count(WeekStatus::Compliant), 1);
    assert_eq!(summary.count(WeekStatus::Invalid), 1);
    assert_eq!(summary.count(WeekStatus::Ignored), 1);

    let ignored = &summary.weeks[2];
    assert_eq!(ignored.week_start, monday(20));
    assert_eq!(ignored.status_label, "");
    assert_eq!(ignored.office_days, None);

    assert_eq!(summary.mode_label, "Strict");
    assert_eq!(summary.windows.len(), 3);
}

#[test]
fn full_summary_covers_every_horizon_week() {
    let selections = weeks_with_office_days(&[5, 5, 5, 5, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0]);
    let holidays = HolidayCollection::new();
    let validator = validator();

    let summary = validator
        .validate(
            &ValidationInput::new(&selections, &holidays),
            &ValidationMode::anchored(validator.config()),
        )
        .summary();

    assert_eq!(summary.weeks.len(), 14);
    assert_eq!(summary.count(WeekStatus::Ignored), 2);
    assert_eq!(summary.windows[0].first_week, monday(0));
    assert_eq!(summary.windows[0].last_week, monday(11));
    assert_eq!(summary.mode_label, "Rolling Average");
}
