//! Argument parsing, logging setup, and the single exit-code decision point.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use dsweep_config::SyncConfig;
use dsweep_config::defaults::{
    DEFAULT_BATCH_SIZE, DEFAULT_PAGE_CEILING, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_LIMIT,
};
use dsweep_telemetry::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging, new_run_id, run_span,
};
use tracing::{Instrument, error, info};
use url::Url;
use uuid::Uuid;

use crate::client::{CliError, CliResult};
use crate::output::render_outcome;
use crate::pipeline::sweep;

/// Parses process arguments, runs one sweep, and returns the process exit code.
pub async fn run() -> i32 {
    run_from(std::env::args_os()).await
}

/// Same as [`run`] with an explicit argument list (first item is the program name).
pub async fn run_from<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 2 } else { 0 };
            if err.print().is_err() {
                return 2;
            }
            return code;
        }
    };

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        ..LoggingConfig::default()
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: {err}");
    }

    let run_id = new_run_id();
    let span = run_span(run_id, cli.dry_run);
    match execute(cli, run_id).instrument(span).await {
        Ok(()) => 0,
        Err(err) => {
            let exit_code = err.exit_code();
            let message = err.display_message();
            error!(run_id = %run_id, exit_code, "run failed");
            eprintln!("error: {message}");
            exit_code
        }
    }
}

async fn execute(cli: Cli, run_id: Uuid) -> CliResult<()> {
    let output = cli.output;
    let dry_run = cli.dry_run;
    let config = cli
        .sync_config()
        .validate()
        .map_err(|err| CliError::validation(err.describe()))?;
    info!(?config, "starting sweep");

    let outcome = sweep(&config, run_id, dry_run).await?;
    let stdout = std::io::stdout();
    render_outcome(&outcome, output, &mut stdout.lock())
}

#[derive(Parser)]
#[command(
    name = "dsweep",
    version,
    about = "Move downloads that no Download Station task accounts for"
)]
struct Cli {
    #[arg(long, env = "DSWEEP_BASE_URL", value_parser = parse_url)]
    base_url: Url,
    #[arg(long, env = "DSWEEP_ACCOUNT")]
    account: String,
    #[arg(long, env = "DSWEEP_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long = "source-dir", env = "DSWEEP_SOURCE_DIR")]
    source_dir: PathBuf,
    #[arg(long = "destination-dir", env = "DSWEEP_DESTINATION_DIR")]
    destination_dir: PathBuf,
    #[arg(long, env = "DSWEEP_BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: u32,
    #[arg(long, env = "DSWEEP_PAGE_CEILING", default_value_t = DEFAULT_PAGE_CEILING)]
    page_ceiling: u32,
    #[arg(
        long,
        env = "DSWEEP_RETRY_LIMIT",
        default_value_t = DEFAULT_RETRY_LIMIT,
        help = "Total attempts per task page"
    )]
    retry_limit: u32,
    #[arg(
        long,
        env = "DSWEEP_TIMEOUT_SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        help = "Per-request timeout in seconds"
    )]
    timeout: u64,
    #[arg(long, help = "Report what would move without moving anything")]
    dry_run: bool,
    #[arg(
        long = "output",
        alias = "format",
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for the run summary"
    )]
    output: OutputFormat,
    #[arg(long, env = "DSWEEP_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
    #[arg(long, env = "DSWEEP_LOG_FORMAT", value_parser = parse_log_format)]
    log_format: Option<LogFormat>,
}

impl Cli {
    fn sync_config(self) -> SyncConfig {
        SyncConfig::new(
            self.base_url,
            self.account,
            self.password,
            self.source_dir,
            self.destination_dir,
        )
        .with_batch_size(self.batch_size)
        .with_page_ceiling(self.page_ceiling)
        .with_retry_limit(self.retry_limit)
        .with_request_timeout(Duration::from_secs(self.timeout))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 11] = [
        "dsweep",
        "--base-url",
        "http://nas.local:5000",
        "--account",
        "admin",
        "--password",
        "secret",
        "--source-dir",
        "/volume/pt",
        "--destination-dir",
        "/volume/ptshare",
    ];

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(REQUIRED.iter().chain(extra).copied())
    }

    #[test]
    fn parse_url_rejects_invalid_input() {
        let err = parse_url("not-a-url").err().unwrap_or_default();
        assert!(err.contains("invalid URL"));
    }

    #[test]
    fn defaults_match_station_conventions() -> Result<(), clap::Error> {
        let cli = parse(&[])?;
        assert_eq!(cli.output, OutputFormat::Table);
        assert!(!cli.dry_run);
        assert!(cli.log_format.is_none());

        let config = cli.sync_config();
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.page_ceiling, 1_000);
        assert_eq!(config.retry_limit, 2);
        assert_eq!(config.request_timeout, Duration::from_secs(1));
        assert_eq!(config.service_base_url.as_str(), "http://nas.local:5000/");
        Ok(())
    }

    #[test]
    fn overrides_flow_into_config() -> Result<(), clap::Error> {
        let cli = parse(&[
            "--batch-size",
            "50",
            "--retry-limit",
            "4",
            "--timeout",
            "15",
            "--dry-run",
            "--output",
            "json",
            "--log-format",
            "json",
        ])?;
        assert!(cli.dry_run);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.log_format, Some(LogFormat::Json));

        let config = cli.sync_config();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.retry_limit, 4);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        Ok(())
    }

    #[test]
    fn unknown_log_format_is_a_usage_error() {
        assert!(parse(&["--log-format", "xml"]).is_err());
    }

    #[tokio::test]
    async fn invalid_configuration_exits_with_validation_code() {
        let mut args: Vec<&str> = REQUIRED.to_vec();
        args.extend(["--batch-size", "0"]);
        assert_eq!(run_from(args).await, 2);
    }

    #[tokio::test]
    async fn missing_arguments_exit_with_usage_code() {
        assert_eq!(run_from(["dsweep", "--dry-run"]).await, 2);
    }
}
