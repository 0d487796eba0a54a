use super::common::*;
use crate::attendance::cache::WeekCache;
use crate::attendance::domain::DaySelection;
use crate::attendance::holidays::HolidayCollection;
use crate::attendance::policy::{PolicyConfig, ValidationMode};
use crate::attendance::validator::{ComplianceValidator, ValidationInput};
use chrono::Duration;

#[test]
fn cached_runs_match_uncached_runs() {
    let selections = weeks_with_office_days(&[5, 0, 2, 3, 1, 4, 4, 0, 3, 2, 5, 1, 2]);
    let holidays: HolidayCollection = [monday(5) + Duration::days(1)].into_iter().collect();
    let validator = validator();
    let input = ValidationInput::new(&selections, &holidays);
    let mode = ValidationMode::rolling(validator.config());
    let mut cache = WeekCache::new();

    let uncached = validator.validate(&input, &mode);
    let first = validator.validate_with_cache(&input, &mode, &mut cache);
    let second = validator.validate_with_cache(&input, &mode, &mut cache);

    assert_eq!(first, uncached);
    assert_eq!(second, uncached);
    assert_eq!(cache.len(), 13);
    assert_eq!(cache.stats().misses, 13);
    assert_eq!(cache.stats().hits, 13);
}

#[test]
fn policy_change_never_serves_stale_weeks() {
    let selections = weeks_with_office_days(&[2, 2, 2]);
    let holidays = HolidayCollection::new();
    let input = ValidationInput::new(&selections, &holidays);
    let mut cache = WeekCache::new();

    let strict = validator().validate_with_cache(&input, &ValidationMode::Strict, &mut cache);
    assert!(!strict.is_valid);

    let lenient = ComplianceValidator::new(PolicyConfig::new(2, 5, 12, 8, 0.6).expect("valid policy"));
    let relaxed = lenient.validate_with_cache(&input, &ValidationMode::Strict, &mut cache);

    assert!(relaxed.is_valid, "{}", relaxed.message);
    assert_eq!(relaxed, lenient.validate(&input, &ValidationMode::Strict));
    assert_eq!(cache.stats().resets, 1);
    assert_eq!(cache.policy(), Some(lenient.config().fingerprint()));
}

#[test]
fn threshold_change_keeps_week_records() {
    let selections = weeks_with_office_days(&[3, 3, 3]);
    let holidays = HolidayCollection::new();
    let input = ValidationInput::new(&selections, &holidays);
    let mut cache = WeekCache::new();

    let standard = validator();
    standard.validate_with_cache(&input, &ValidationMode::rolling(standard.config()), &mut cache);

    let stricter =
        ComplianceValidator::new(PolicyConfig::new(3, 5, 12, 8, 0.8).expect("valid policy"));
    let result =
        stricter.validate_with_cache(&input, &ValidationMode::rolling(stricter.config()), &mut cache);

    assert!(!result.is_valid);
    assert_eq!(cache.stats().resets, 0);
    assert_eq!(cache.stats().hits, 3);
}

#[test]
fn edited_selections_are_recomputed() {
    let mut selections = weeks_with_office_days(&[5, 5]);
    let holidays = HolidayCollection::new();
    let validator = validator();
    let mut cache = WeekCache::new();

    validator.validate_with_cache(
        &ValidationInput::new(&selections, &holidays),
        &ValidationMode::Strict,
        &mut cache,
    );

    selections.extend((0..3).map(|offset| DaySelection::work_from_home(monday(1) + Duration::days(offset))));
    let edited = validator.validate_with_cache(
        &ValidationInput::new(&selections, &holidays),
        &ValidationMode::Strict,
        &mut cache,
    );

    assert_eq!(edited.weeks[0].office_days, 5);
    assert_eq!(edited.weeks[1].office_days, 2);
    assert!(!edited.is_valid);
    assert_eq!(cache.stats().hits, 1);
    assert_eq!(cache.stats().misses, 3);
}
