use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use strum_macros::Display;

use super::error::PollError;
use super::origin::OriginCell;
use crate::config::IntervalsConfig;
use crate::fetch::{Fetcher, Resources};
use crate::geo::Position;
use crate::knowledge::KnowledgeBase;
use crate::metrics::MetricStore;
use crate::pipeline::{process_aircraft, process_stats};

/// The three dump1090 feeds, each polled by its own loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Feed {
    Receiver,
    Aircraft,
    Stats,
}

impl Feed {
    pub const ALL: [Feed; 3] = [Feed::Receiver, Feed::Stats, Feed::Aircraft];
}

/// Everything a polling cycle needs: where to fetch from and what to update.
pub struct Collector {
    fetcher: Fetcher,
    resources: Resources,
    intervals: IntervalsConfig,
    time_periods: Vec<String>,
    origin: OriginCell,
    knowledge: Arc<KnowledgeBase>,
    store: Arc<MetricStore>,
}

impl Collector {
    pub fn new(
        fetcher: Fetcher,
        resources: Resources,
        intervals: IntervalsConfig,
        time_periods: Vec<String>,
        origin: Option<Position>,
        knowledge: Arc<KnowledgeBase>,
        store: Arc<MetricStore>,
    ) -> Self {
        Self {
            fetcher,
            resources,
            intervals,
            time_periods,
            origin: OriginCell::new(origin),
            knowledge,
            store,
        }
    }

    #[cfg(test)]
    pub fn origin(&self) -> Option<Position> {
        self.origin.get()
    }

    #[cfg(test)]
    pub fn store(&self) -> &Arc<MetricStore> {
        &self.store
    }

    /// Time between the starts of two cycles of `feed`.
    pub fn interval(&self, feed: Feed) -> Duration {
        match feed {
            // Back off once the receiver location is known, it rarely moves.
            Feed::Receiver if self.origin.is_set() => self.intervals.receiver_origin_ok,
            Feed::Receiver => self.intervals.receiver,
            Feed::Aircraft => self.intervals.aircraft,
            Feed::Stats => self.intervals.stats,
        }
    }

    /// Run one fetch and process step for `feed`.
    pub async fn poll(&self, feed: Feed) -> Result<(), PollError> {
        match feed {
            Feed::Receiver => {
                let receiver = self.fetcher.fetch(&self.resources.receiver).await?;
                self.update_origin(&receiver);
            }
            Feed::Aircraft => {
                let aircraft = self.fetcher.fetch(&self.resources.aircraft).await?;
                process_aircraft(&aircraft, self.origin.get(), &self.knowledge, &self.store)?;
            }
            Feed::Stats => {
                let stats = self.fetcher.fetch(&self.resources.stats).await?;
                process_stats(&stats, &self.time_periods, &self.store)?;
            }
        }
        Ok(())
    }

    fn update_origin(&self, receiver: &Value) {
        let lat = receiver.get("lat").and_then(Value::as_f64);
        let lon = receiver.get("lon").and_then(Value::as_f64);
        let (Some(lat), Some(lon)) = (lat, lon) else {
            log::debug!("Receiver data carries no location");
            return;
        };

        let probed = Position::new(lat, lon);
        if self.origin.update(probed) {
            log::info!(
                "Origin successfully extracted from receiver data: {}",
                probed
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::specs::{MAX_RANGE, OBSERVED, TIME_PERIOD};
    use crate::metrics::DEFAULT_NAMESPACE;
    use crate::pipeline::LATEST;
    use std::path::Path;

    fn collector(dir: &Path, origin: Option<Position>) -> Collector {
        Collector::new(
            Fetcher::new(Duration::from_secs(1)),
            Resources::new(dir.to_str().unwrap()),
            IntervalsConfig::default(),
            vec!["last1min".to_string()],
            origin,
            Arc::new(KnowledgeBase::empty()),
            Arc::new(MetricStore::new(DEFAULT_NAMESPACE).unwrap()),
        )
    }

    #[tokio::test]
    async fn receiver_probe_sets_origin_and_backs_off() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("receiver.json"), r#"{"lat": 10.0, "lon": 11.0}"#).unwrap();
        let collector = collector(dir.path(), None);

        assert_eq!(collector.interval(Feed::Receiver), Duration::from_secs(10));
        collector.poll(Feed::Receiver).await.unwrap();

        assert_eq!(collector.origin(), Some(Position::new(10.0, 11.0)));
        assert_eq!(collector.interval(Feed::Receiver), Duration::from_secs(300));
    }

    #[tokio::test]
    async fn receiver_without_location_keeps_probing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("receiver.json"), r#"{"version": "9.0", "refresh": 1000}"#).unwrap();
        let collector = collector(dir.path(), None);

        collector.poll(Feed::Receiver).await.unwrap();
        assert_eq!(collector.origin(), None);
        assert_eq!(collector.interval(Feed::Receiver), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn configured_origin_wins_over_probe() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("receiver.json"), r#"{"lat": 1.0, "lon": 1.0}"#).unwrap();
        let configured = Position::new(10.0, 11.0);
        let collector = collector(dir.path(), Some(configured));

        collector.poll(Feed::Receiver).await.unwrap();
        assert_eq!(collector.origin(), Some(configured));
        assert_eq!(collector.interval(Feed::Receiver), Duration::from_secs(300));
    }

    #[tokio::test]
    async fn aircraft_poll_uses_origin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("aircraft.json"),
            r#"{"messages": 5, "aircraft": [{"hex": "abc123", "lat": 10.0, "lon": 10.0, "seen": 1, "seen_pos": 1}]}"#,
        )
        .unwrap();
        let collector = collector(dir.path(), Some(Position::new(10.0, 11.0)));

        collector.poll(Feed::Aircraft).await.unwrap();

        let labels = [(TIME_PERIOD, LATEST)];
        assert_eq!(collector.store().get(OBSERVED, &labels), Some(1.0));
        assert!(collector.store().get(MAX_RANGE, &labels).unwrap() > 100_000.0);
    }

    #[tokio::test]
    async fn missing_feed_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let collector = collector(dir.path(), None);

        let err = collector.poll(Feed::Stats).await.unwrap_err();
        assert!(matches!(err, PollError::Fetch(_)));
    }

    #[tokio::test]
    async fn malformed_feed_is_a_pipeline_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("aircraft.json"), r#"{"now": 1700000000}"#).unwrap();
        let collector = collector(dir.path(), None);

        let err = collector.poll(Feed::Aircraft).await.unwrap_err();
        assert!(matches!(err, PollError::Pipeline(_)));
    }

    #[test]
    fn feed_names() {
        assert_eq!(Feed::Receiver.to_string(), "receiver");
        assert_eq!(Feed::Stats.to_string(), "stats");
    }
}
