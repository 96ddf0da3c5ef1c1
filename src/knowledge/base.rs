use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use super::error::KnowledgeError;
use super::shards::{shard_prefix, AIRCRAFT_SHARDS};
use crate::fetch::Fetcher;

const SHARD_TIMEOUT: Duration = Duration::from_secs(10);

/// Registration data for one airframe.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AircraftRecord {
    #[serde(rename = "r", default)]
    pub registration: Option<String>,
    #[serde(rename = "t", default)]
    pub type_code: Option<String>,
}

/// Read-only lookup table from ICAO hex identifier to registration data.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    aircraft: HashMap<String, AircraftRecord>,
}

impl KnowledgeBase {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fetch every shard of the aircraft database found at `location`.
    ///
    /// Without a location the knowledge base stays empty and lookups always
    /// miss. A shard that cannot be fetched aborts the whole build.
    pub async fn build(fetcher: &Fetcher, location: Option<&str>) -> Result<Self, KnowledgeError> {
        let location = match location.map(str::trim).filter(|l| !l.is_empty()) {
            Some(l) => l.trim_end_matches('/'),
            None => {
                log::info!(
                    "No database provided. Aircraft will not be enriched with registration data."
                );
                return Ok(Self::empty());
            }
        };

        log::info!("Database provided at {}, building knowledge base", location);
        let fetcher = fetcher.with_timeout(SHARD_TIMEOUT);
        let mut kb = Self::empty();

        for (i, shard) in AIRCRAFT_SHARDS.iter().enumerate() {
            log::info!(
                "Fetching shard {} out of {}. Aircraft so far: {}",
                i + 1,
                AIRCRAFT_SHARDS.len(),
                kb.len()
            );
            let data = fetcher
                .fetch(&format!("{}/{}", location, shard))
                .await
                .map_err(|source| KnowledgeError::Shard {
                    shard: shard.to_string(),
                    source,
                })?;
            kb.merge_shard(shard, data)?;
        }

        if kb.is_empty() {
            log::warn!("Database at {} holds no aircraft records", location);
        } else {
            log::info!(
                "Database construction finished. {} aircraft found.",
                kb.len()
            );
        }
        Ok(kb)
    }

    /// Merge one shard, rebuilding full identifiers from the shard prefix.
    pub fn merge_shard(&mut self, shard: &str, data: Value) -> Result<(), KnowledgeError> {
        let Value::Object(entries) = data else {
            return Err(KnowledgeError::InvalidShard(shard.to_string()));
        };

        let prefix = shard_prefix(shard);
        for (suffix, value) in entries {
            // Shards also carry bookkeeping keys such as `children`.
            if !value.is_object() {
                continue;
            }
            match serde_json::from_value::<AircraftRecord>(value) {
                Ok(record) => {
                    let hex = format!("{}{}", prefix, suffix).to_uppercase();
                    self.aircraft.insert(hex, record);
                }
                Err(e) => log::debug!("Skipping entry {}{} in {}: {}", prefix, suffix, shard, e),
            }
        }
        Ok(())
    }

    pub fn lookup(&self, hex: &str) -> Option<&AircraftRecord> {
        if self.aircraft.is_empty() {
            return None;
        }
        self.aircraft.get(&hex.trim().to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }
}
