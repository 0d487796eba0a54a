use crate::infra::{evaluation_span, HolidayResolver, ModeChoice};
use chrono::NaiveDate;
use clap::Args;
use rto_compliance::attendance::{
    load_selections, ComplianceSummary, ComplianceValidator, HolidayCollection, Horizon,
    ValidationInput, WeekCompliance, WeekStatus,
};
use rto_compliance::config::AppConfig;
use rto_compliance::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub(crate) struct SourceArgs {
    /// Selection export with `year,month,day,selection` rows (zero-based month)
    #[arg(long)]
    pub(crate) selections: PathBuf,
    /// Holiday calendar CSV with `date,country,company,name` rows
    #[arg(long)]
    pub(crate) holidays: Option<PathBuf>,
    /// Holiday country code (defaults to RTO_HOLIDAY_COUNTRY)
    #[arg(long)]
    pub(crate) country: Option<String>,
    /// Company whose extra closures apply (defaults to RTO_HOLIDAY_COMPANY)
    #[arg(long)]
    pub(crate) company: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Validation mode
    #[arg(long, value_enum, default_value_t = ModeChoice::Rolling)]
    pub(crate) mode: ModeChoice,
    /// First day of the evaluated range (YYYY-MM-DD); requires --to
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) from: Option<NaiveDate>,
    /// Last day of the evaluated range (YYYY-MM-DD); requires --from
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) to: Option<NaiveDate>,
    /// Emit the summary as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct WeekArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Any day of the week to inspect (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) week_start: NaiveDate,
    /// Emit the record as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_check(config: &AppConfig, args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs {
        source,
        mode,
        from,
        to,
        json,
    } = args;

    let selections = load_selections(&source.selections)?;
    let span = evaluation_span(from, to, &selections)?;
    let holidays = load_holidays_for(config, source, span)?;
    let validator = ComplianceValidator::new(config.policy.clone());

    let mut input = ValidationInput::new(&selections, &holidays);
    if let Some(span) = span {
        input = input.with_horizon(span);
    }

    let summary = validator
        .validate(&input, &mode.into_mode(validator.config()))
        .summary();

    if json {
        println!("{}", to_json(&summary)?);
    } else {
        render_summary(&summary, holidays.len());
    }

    Ok(())
}

pub(crate) fn run_week(config: &AppConfig, args: WeekArgs) -> Result<(), AppError> {
    let WeekArgs {
        source,
        week_start,
        json,
    } = args;

    let selections = load_selections(&source.selections)?;
    let span = Horizon::new(week_start, week_start);
    let holidays = load_holidays_for(config, source, Some(span))?;
    let validator = ComplianceValidator::new(config.policy.clone());
    let week = validator.week_compliance(week_start, &ValidationInput::new(&selections, &holidays));

    if json {
        println!("{}", to_json(&week)?);
    } else {
        render_week(&week, config.policy.min_office_days_per_week());
    }

    Ok(())
}

fn load_holidays_for(
    config: &AppConfig,
    source: SourceArgs,
    span: Option<Horizon>,
) -> Result<HolidayCollection, AppError> {
    let SourceArgs {
        holidays,
        country,
        company,
        ..
    } = source;

    let resolver = HolidayResolver::from_csv(holidays.as_deref(), config.holidays.clone())?;
    Ok(resolver.resolve(&[], resolver.query(country, company), span))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))
}

pub(crate) fn render_summary(summary: &ComplianceSummary, holidays: usize) {
    println!("Return-to-office compliance ({})", summary.mode_label);
    println!(
        "Result: {} | overall {:.1}% | {} holiday(s) applied",
        if summary.is_valid { "VALID" } else { "INVALID" },
        summary.overall_compliance,
        holidays
    );
    println!("{}", summary.message);

    if summary.weeks.is_empty() {
        println!("\nWeeks: none");
    } else {
        println!("\nWeeks");
        for entry in &summary.weeks {
            let label = if entry.status == WeekStatus::Ignored {
                "-"
            } else {
                entry.status_label
            };
            println!(
                "- {} (week {}): {}/{} office days, {} remote, {} holiday(s) [{}]",
                entry.week_start,
                entry.week_number.unwrap_or_default(),
                entry.office_days.unwrap_or_default(),
                entry.total_days.unwrap_or_default(),
                entry.work_from_home_days.unwrap_or_default(),
                entry.holidays.unwrap_or_default(),
                label
            );
        }
    }

    if !summary.windows.is_empty() {
        println!("\nWindows");
        for window in &summary.windows {
            println!(
                "- {} -> {}: {} of {} office days ({:.1}%, {:.0}% required) {}",
                window.first_week,
                window.last_week,
                window.total_office_days,
                window.total_weekdays,
                window.compliance_percentage,
                window.required_percentage,
                if window.is_compliant { "ok" } else { "FAILING" }
            );
        }
    }

    if let Some(week) = summary.worst_week {
        println!("\nWorst week: {}", week);
    }

    println!(
        "\nStatus counts: {} compliant | {} pending | {} invalid",
        summary.count(WeekStatus::Compliant),
        summary.count(WeekStatus::Pending),
        summary.count(WeekStatus::Invalid)
    );
}

pub(crate) fn render_week(week: &WeekCompliance, min_office_days: u32) {
    println!("Week of {} (ISO week {})", week.week_start, week.week_number);
    println!(
        "- {} working day(s) after {} holiday(s)",
        week.total_days, week.holidays
    );
    println!(
        "- {} remote, {} office ({:.0}%)",
        week.work_from_home_days, week.office_days, week.percentage
    );
    println!(
        "- Minimum {} office day(s): {}",
        min_office_days,
        if week.is_compliant { "met" } else { "NOT met" }
    );
}
