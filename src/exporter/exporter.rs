use std::sync::Arc;

use super::collector::{Collector, Feed};
use super::error::ExporterError;
use super::worker::WorkerHandle;
use crate::config::Config;
use crate::fetch::{Fetcher, Resources};
use crate::knowledge::KnowledgeBase;
use crate::metrics::MetricStore;
use crate::web::{start_server, ServerHandle};

/// Polls dump1090 and serves the derived gauges until stopped.
pub struct Exporter {
    #[cfg(test)]
    collector: Arc<Collector>,
    workers: Vec<WorkerHandle>,
    server: ServerHandle,
}

impl Exporter {
    /// Build the knowledge base, start the metrics server, then launch the
    /// receiver, statistics and aircraft loops.
    pub async fn start(config: Config) -> Result<Self, ExporterError> {
        let resources = Resources::new(&config.resource_path);
        log::info!("Monitoring dump1090 resources at: {}", resources.base);
        log::info!(
            "Refresh rates: aircraft={:?}, statistics={:?}, receiver={:?}/{:?}",
            config.intervals.aircraft,
            config.intervals.stats,
            config.intervals.receiver,
            config.intervals.receiver_origin_ok
        );
        match config.origin {
            Some(origin) => log::info!("Origin: {}", origin),
            None => log::info!("Origin: not configured, waiting for receiver data"),
        }

        let fetcher = Fetcher::new(config.fetch_timeout);
        let knowledge = KnowledgeBase::build(&fetcher, config.db_path.as_deref()).await?;
        let store = Arc::new(MetricStore::new(&config.namespace)?);

        let server = start_server(&config.web.bind, store.clone())
            .await
            .map_err(|source| ExporterError::Bind {
                bind: config.web.bind.clone(),
                source,
            })?;
        log::info!(
            "Serving dump1090 prometheus metrics on: http://{}/metrics",
            server.local_addr()
        );

        let collector = Arc::new(Collector::new(
            fetcher,
            resources,
            config.intervals,
            config.time_periods,
            config.origin,
            Arc::new(knowledge),
            store,
        ));

        let workers = Feed::ALL
            .iter()
            .map(|feed| WorkerHandle::spawn(collector.clone(), *feed))
            .collect();

        Ok(Self {
            #[cfg(test)]
            collector,
            workers,
            server,
        })
    }

    /// Stop all loops, wait for them to finish, then stop the server.
    pub async fn stop(self) {
        let pending: Vec<_> = self.workers.into_iter().map(WorkerHandle::signal).collect();
        for (feed, join) in pending {
            if let Err(e) = join.await {
                log::error!("{} poller task failed: {}", feed, e);
            }
        }
        self.server.stop().await;
    }
}

#[cfg(test)]
impl Exporter {
    pub fn local_addr(&self) -> std::net::SocketAddr {
        self.server.local_addr()
    }

    pub fn store(&self) -> &Arc<MetricStore> {
        self.collector.store()
    }

    pub fn origin(&self) -> Option<crate::geo::Position> {
        self.collector.origin()
    }
}
