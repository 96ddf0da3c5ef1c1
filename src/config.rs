use serde::{Deserialize, Deserializer};
use std::time::Duration;
use thiserror::Error;

use crate::geo::Position;
use crate::metrics::DEFAULT_NAMESPACE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid origin: {0}")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL or directory holding `receiver.json`, `aircraft.json`
    /// and `stats.json`.
    pub resource_path: String,
    pub web: WebConfig,
    pub intervals: IntervalsConfig,
    /// Receiver location; when set it is never replaced by the probed one.
    #[serde(deserialize_with = "deserialize_origin")]
    pub origin: Option<Position>,
    #[serde(with = "humantime_duration")]
    pub fetch_timeout: Duration,
    /// Location of the aircraft database shards.
    pub db_path: Option<String>,
    pub time_periods: Vec<String>,
    pub namespace: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntervalsConfig {
    #[serde(with = "humantime_duration")]
    pub aircraft: Duration,
    #[serde(with = "humantime_duration")]
    pub stats: Duration,
    /// Receiver probe interval while the origin is unknown.
    #[serde(with = "humantime_duration")]
    pub receiver: Duration,
    /// Receiver probe interval once the origin is known.
    #[serde(with = "humantime_duration")]
    pub receiver_origin_ok: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource_path: "http://localhost:8080/data".to_string(),
            web: WebConfig::default(),
            intervals: IntervalsConfig::default(),
            origin: None,
            fetch_timeout: Duration::from_secs(2),
            db_path: None,
            time_periods: vec!["last1min".to_string()],
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:9105".to_string(),
        }
    }
}

impl Default for IntervalsConfig {
    fn default() -> Self {
        Self {
            aircraft: Duration::from_secs(10),
            stats: Duration::from_secs(60),
            receiver: Duration::from_secs(10),
            receiver_origin_ok: Duration::from_secs(300),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }
}

fn deserialize_origin<'de, D>(deserializer: D) -> Result<Option<Position>, D::Error>
where
    D: Deserializer<'de>,
{
    let coordinates: Option<String> = Option::deserialize(deserializer)?;
    coordinates
        .map(|c| {
            Position::from_coordinates(&c).ok_or_else(|| {
                serde::de::Error::custom(ConfigError::InvalidOrigin(c.clone()))
            })
        })
        .transpose()
}

mod humantime_duration {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.resource_path, "http://localhost:8080/data");
        assert_eq!(config.web.bind, "0.0.0.0:9105");
        assert_eq!(config.intervals.aircraft, Duration::from_secs(10));
        assert_eq!(config.intervals.stats, Duration::from_secs(60));
        assert_eq!(config.intervals.receiver, Duration::from_secs(10));
        assert_eq!(config.intervals.receiver_origin_ok, Duration::from_secs(300));
        assert_eq!(config.fetch_timeout, Duration::from_secs(2));
        assert_eq!(config.time_periods, vec!["last1min".to_string()]);
        assert_eq!(config.namespace, "dump1090_");
        assert!(config.origin.is_none());
        assert!(config.db_path.is_none());
    }

    #[test]
    fn parses_full_file() {
        let yaml = r#"
resource_path: /run/dump1090-fa
web:
  bind: 127.0.0.1:9999
intervals:
  aircraft: 5s
  stats: 1m
  receiver_origin_ok: 10m
origin: "51.47, -0.45"
fetch_timeout: 500ms
db_path: /usr/share/dump1090-fa/html/db
time_periods: [last1min, total]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.resource_path, "/run/dump1090-fa");
        assert_eq!(config.web.bind, "127.0.0.1:9999");
        assert_eq!(config.intervals.aircraft, Duration::from_secs(5));
        assert_eq!(config.intervals.stats, Duration::from_secs(60));
        assert_eq!(config.intervals.receiver, Duration::from_secs(10));
        assert_eq!(config.intervals.receiver_origin_ok, Duration::from_secs(600));
        assert_eq!(config.origin, Some(Position::new(51.47, -0.45)));
        assert_eq!(config.fetch_timeout, Duration::from_millis(500));
        assert_eq!(config.db_path.as_deref(), Some("/usr/share/dump1090-fa/html/db"));
        assert_eq!(config.time_periods, vec!["last1min", "total"]);
    }

    #[test]
    fn rejects_bad_origin() {
        let err = Config::from_yaml("origin: somewhere").unwrap_err();
        assert!(err.to_string().contains("invalid origin"));
    }

    #[test]
    fn rejects_bad_duration() {
        assert!(Config::from_yaml("fetch_timeout: soon").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exporter.yaml");
        let err = Config::from_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
