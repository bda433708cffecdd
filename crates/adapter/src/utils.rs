use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use slog::{o, Drain, Level, Logger};
use std::{env, time::Duration};

use crate::{
    find_config_file, load_config, AdapterConfig, ConfigSource, DEFAULT_ALERT_REGION,
    DEFAULT_BASE_URL, DEFAULT_OBSERVATION_LIMIT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report {
    /// Grid and station metadata for the coordinate
    Point,
    /// Forecast periods for the coordinate
    Forecast,
    /// Recent observations from the nearest station
    Observations,
    /// Active alerts for the region
    Alerts,
}

#[derive(Parser, Clone, Debug, serde::Deserialize, Default)]
#[command(
    author,
    version,
    about = "nws-tables - Flattens api.weather.gov data into JSON rows"
)]
pub struct Cli {
    /// What to fetch (defaults to forecast)
    #[arg(value_enum)]
    #[serde(skip)]
    pub report: Option<Report>,

    /// Path to config file (TOML format)
    /// Searched in order: this flag, $NWS_TABLES_CONFIG, ./nws-tables.toml,
    /// $XDG_CONFIG_HOME/nws-tables/nws-tables.toml, /etc/nws-tables/nws-tables.toml
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short, long, env = "NWS_TABLES_LEVEL")]
    pub level: Option<String>,

    /// Weather API root
    #[arg(short, long, env = "NWS_TABLES_BASE_URL")]
    pub base_url: Option<String>,

    /// HTTP User-Agent header sent with every request
    #[arg(short, long, env = "NWS_TABLES_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(short, long, env = "NWS_TABLES_TIMEOUT")]
    pub timeout: Option<u64>,

    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Use the hourly forecast instead of the 12 hour periods
    #[arg(long)]
    #[serde(default)]
    pub hourly: bool,

    /// Number of observations to request
    #[arg(long)]
    pub limit: Option<u32>,

    /// Alert area code, e.g. a state abbreviation
    #[arg(short, long)]
    pub region: Option<String>,
}

impl Cli {
    pub fn report(&self) -> Report {
        self.report.unwrap_or(Report::Forecast)
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_OBSERVATION_LIMIT)
    }

    pub fn region(&self) -> String {
        self.region
            .clone()
            .unwrap_or_else(|| DEFAULT_ALERT_REGION.to_string())
    }

    pub fn coordinates(&self) -> Result<(f64, f64), anyhow::Error> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok((latitude, longitude)),
            _ => Err(anyhow!(
                "--latitude and --longitude are required for {:?}",
                self.report()
            )),
        }
    }

    pub fn adapter_config(&self) -> AdapterConfig {
        AdapterConfig {
            base_url: self.base_url(),
            user_agent: self.user_agent(),
            timeout: self.timeout(),
        }
    }

    /// Values given on the command line win over the ones from `file`.
    pub fn merge(self, file: Cli) -> Cli {
        Cli {
            report: self.report,
            config: self.config,
            level: self.level.or(file.level),
            base_url: self.base_url.or(file.base_url),
            user_agent: self.user_agent.or(file.user_agent),
            timeout: self.timeout.or(file.timeout),
            latitude: self.latitude.or(file.latitude),
            longitude: self.longitude.or(file.longitude),
            hourly: self.hourly || file.hourly,
            limit: self.limit.or(file.limit),
            region: self.region.or(file.region),
        }
    }
}

/// Load configuration from CLI args, config file, and environment
pub fn get_config_info() -> Result<Cli, anyhow::Error> {
    with_config_file(Cli::parse())
}

/// A config file that exists but can't be read or parsed is an error,
/// as is a `--config` path that doesn't exist.
fn with_config_file(cli_args: Cli) -> Result<Cli, anyhow::Error> {
    let source = if let Some(ref path) = cli_args.config {
        ConfigSource::Explicit(path.into())
    } else {
        find_config_file("NWS_TABLES_CONFIG", "nws-tables.toml")
    };

    let file_config: Cli = load_config(&source)
        .with_context(|| format!("failed to load config from {}", source))?;
    Ok(cli_args.merge(file_config))
}

fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::Trace,
        "debug" => Level::Debug,
        "info" => Level::Info,
        "warn" => Level::Warning,
        "error" => Level::Error,
        _ => Level::Info,
    }
}

pub fn setup_logger(cli: &Cli) -> Logger {
    let log_level = match cli.level.as_ref() {
        Some(level) => parse_level(level),
        None => parse_level(&env::var("RUST_LOG").unwrap_or_default()),
    };

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(log_level).fuse();
    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}
