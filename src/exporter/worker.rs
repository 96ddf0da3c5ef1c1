use std::sync::Arc;

use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use super::collector::{Collector, Feed};

/// A running polling loop and the means to stop it.
#[derive(Debug)]
pub(super) struct WorkerHandle {
    feed: Feed,
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

impl WorkerHandle {
    pub fn spawn(collector: Arc<Collector>, feed: Feed) -> Self {
        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_poll_loop(collector, feed, stop_rx));
        Self {
            feed,
            stop_tx,
            join,
        }
    }

    /// Ask the loop to stop without waiting for it.
    pub fn signal(self) -> (Feed, JoinHandle<()>) {
        let _ = self.stop_tx.send(());
        (self.feed, self.join)
    }
}

/// Poll `feed` until told to stop.
///
/// Each cycle starts one interval after the previous one started, so slow
/// fetches eat into the sleep rather than delaying the schedule. A failed
/// cycle is logged and the loop carries on. The stop signal is honoured
/// before a fetch and while sleeping, never halfway through processing.
async fn run_poll_loop(
    collector: Arc<Collector>,
    feed: Feed,
    mut stop_rx: oneshot::Receiver<()>,
) {
    log::info!("Starting {} poller", feed);

    loop {
        let start = Instant::now();

        match stop_rx.try_recv() {
            Err(TryRecvError::Empty) => {}
            Ok(()) | Err(TryRecvError::Closed) => break,
        }

        if let Err(e) = collector.poll(feed).await {
            log::error!("Error fetching dump1090 {} data: {}", feed, e);
        }

        let next = start + collector.interval(feed);
        let wait = next.saturating_duration_since(Instant::now());
        log::debug!("Next {} poll in {:?}", feed, wait);

        let should_stop = tokio::select! {
            _ = sleep_until(next) => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            break;
        }
    }

    log::info!("Stopped {} poller", feed);
}
