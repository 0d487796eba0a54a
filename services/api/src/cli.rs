use crate::report::{run_check, run_week, CheckArgs, WeekArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rto_compliance::config::AppConfig;
use rto_compliance::error::AppError;
use rto_compliance::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "RTO Compliance",
    about = "Validate return-to-office attendance against the office-day policy",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate a selection export and print per-week statuses
    Check(CheckArgs),
    /// Print the compliance record for a single week
    Week(WeekArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Holiday calendar CSV served to every request
    #[arg(long)]
    pub(crate) holidays: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Check(args) => run_check(&config, args),
        Command::Week(args) => run_week(&config, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::ModeChoice;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_accepts_mode_and_range() {
        let cli = Cli::try_parse_from([
            "rto-compliance-api",
            "check",
            "--selections",
            "selections.csv",
            "--mode",
            "strict",
            "--from",
            "2025-01-06",
            "--to",
            "2025-03-31",
        ])
        .expect("arguments parse");

        let Some(Command::Check(args)) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.mode, ModeChoice::Strict);
        assert_eq!(args.source.selections, PathBuf::from("selections.csv"));
        assert!(args.from.is_some() && args.to.is_some());
    }

    #[test]
    fn week_rejects_malformed_dates() {
        let parsed = Cli::try_parse_from([
            "rto-compliance-api",
            "week",
            "--selections",
            "selections.csv",
            "--week-start",
            "06/01/2025",
        ]);
        assert!(parsed.is_err());
    }
}
