mod config;
mod exporter;
mod fetch;
mod geo;
mod knowledge;
mod metrics;
mod pipeline;
mod web;

use clap::{Parser, ValueEnum};
use std::process::ExitCode;
use std::time::Duration;

use crate::config::{Config, ConfigError};
use crate::exporter::Exporter;
use crate::geo::Position;

#[derive(Parser)]
#[command(name = "adsb-exporter")]
#[command(about = "Export dump1090 receiver data as Prometheus metrics")]
struct Cli {
    /// YAML configuration file; command line options override it
    #[arg(long, env = "DUMP1090_EXPORTER_CONFIG")]
    config: Option<String>,

    /// dump1090 data URL or file system path
    #[arg(long, env = "RESOURCE_PATH")]
    resource_path: Option<String>,

    /// Address to expose collected metrics on
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Port to expose collected metrics on
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Time between aircraft data updates (e.g. 10s)
    #[arg(long, env = "AIRCRAFT_INTERVAL", value_parser = humantime::parse_duration)]
    aircraft_interval: Option<Duration>,

    /// Time between statistics updates (e.g. 60s)
    #[arg(long, env = "STATS_INTERVAL", value_parser = humantime::parse_duration)]
    stats_interval: Option<Duration>,

    /// Time between receiver probes while the origin is unknown
    #[arg(long, env = "RECEIVER_INTERVAL", value_parser = humantime::parse_duration)]
    receiver_interval: Option<Duration>,

    /// Time between receiver probes once the origin is known
    #[arg(long, env = "RECEIVER_INTERVAL_ORIGIN_OK", value_parser = humantime::parse_duration)]
    receiver_interval_origin_ok: Option<Duration>,

    /// Receiver latitude to use as the origin
    #[arg(long, env = "LATITUDE", allow_negative_numbers = true)]
    latitude: Option<f64>,

    /// Receiver longitude to use as the origin
    #[arg(long, env = "LONGITUDE", allow_negative_numbers = true)]
    longitude: Option<f64>,

    /// Time to wait for a response from dump1090
    #[arg(long, env = "FETCH_TIMEOUT", value_parser = humantime::parse_duration)]
    fetch_timeout: Option<Duration>,

    /// Aircraft database location used to add registration and type labels
    #[arg(long, env = "DB_PATH")]
    db_path: Option<String>,

    /// Statistics time periods to export (comma separated)
    #[arg(long, env = "TIME_PERIODS", value_delimiter = ',')]
    time_periods: Vec<String>,

    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        self.apply(&mut config)?;
        Ok(config)
    }

    fn apply(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(path) = &self.resource_path {
            config.resource_path = path.clone();
        }

        if self.host.is_some() || self.port.is_some() {
            let (host, port) = config
                .web
                .bind
                .rsplit_once(':')
                .unwrap_or((config.web.bind.as_str(), "9105"));
            let host = self.host.as_deref().unwrap_or(host);
            let port = self.port.map(|p| p.to_string()).unwrap_or(port.to_string());
            config.web.bind = format!("{}:{}", host, port);
        }

        if let Some(d) = self.aircraft_interval {
            config.intervals.aircraft = d;
        }
        if let Some(d) = self.stats_interval {
            config.intervals.stats = d;
        }
        if let Some(d) = self.receiver_interval {
            config.intervals.receiver = d;
        }
        if let Some(d) = self.receiver_interval_origin_ok {
            config.intervals.receiver_origin_ok = d;
        }
        if let Some(d) = self.fetch_timeout {
            config.fetch_timeout = d;
        }

        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => {
                let coordinates = format!("{}, {}", lat, lon);
                let origin = Position::from_coordinates(&coordinates)
                    .ok_or(ConfigError::InvalidOrigin(coordinates))?;
                config.origin = Some(origin);
            }
            (None, None) => {}
            _ => log::warn!("Both --latitude and --longitude are needed to set the origin"),
        }

        if let Some(db) = &self.db_path {
            config.db_path = Some(db.clone());
        }
        if !self.time_periods.is_empty() {
            config.time_periods = self.time_periods.clone();
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level.as_filter()),
    )
    .init();

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let exporter = match Exporter::start(config).await {
        Ok(exporter) => exporter,
        Err(e) => {
            log::error!("Failed to start exporter: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }

    log::info!("Shutting down");
    exporter.stop().await;
    ExitCode::SUCCESS
}
