//! Attendance compliance: week aggregation, rolling window evaluation and
//! per-week status assignment.
//!
//! Data flows one way: selections and holidays are folded into
//! [`WeekCompliance`] records, the records are checked per week (strict) or
//! across sliding best-N-of-M windows (average), and the outcome is assembled
//! into a [`ValidationResult`] that answers per-week status queries.

mod aggregate;
pub mod cache;
pub mod calendar;
pub mod domain;
pub mod holidays;
pub mod policy;
pub mod report;
pub mod selections;
mod validator;
mod window;

#[cfg(test)]
mod tests;

pub use cache::{CacheStats, WeekCache};
pub use calendar::Horizon;
pub use domain::{DaySelection, SelectionType, WeekCompliance, WindowCompliance};
pub use holidays::{
    load_holidays, CsvHolidaySource, HolidayCollection, HolidayQuery, HolidaySource,
    HolidaySourceError,
};
pub use policy::{
    AverageRules, ModeKind, PolicyConfig, PolicyError, PolicyFingerprint, ValidationMode,
    WindowScope,
};
pub use report::views::{ComplianceSummary, WeekStatusEntry, WindowEntry};
pub use report::{ValidationResult, WeekStatus};
pub use selections::{load_selections, parse_selections, SelectionImportError, SelectionLedger};
pub use validator::{ComplianceValidator, ValidationInput};
