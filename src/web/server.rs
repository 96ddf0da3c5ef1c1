use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::metrics::MetricStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MetricStore>,
}

/// A running metrics server.
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    join: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight scrapes.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        match self.join.await {
            Ok(Ok(())) => log::info!("Metrics server stopped"),
            Ok(Err(e)) => log::error!("Metrics server error: {}", e),
            Err(e) => log::error!("Metrics server task failed: {}", e),
        }
    }
}

pub fn router(store: Arc<MetricStore>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { store })
}

pub async fn start_server(bind: &str, store: Arc<MetricStore>) -> std::io::Result<ServerHandle> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    let local_addr = listener.local_addr()?;
    let app = router(store);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let join = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    Ok(ServerHandle {
        local_addr,
        shutdown_tx,
        join,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::specs::{OBSERVED, TIME_PERIOD};
    use crate::metrics::DEFAULT_NAMESPACE;

    #[tokio::test]
    async fn serves_rendered_metrics() {
        let store = Arc::new(MetricStore::new(DEFAULT_NAMESPACE).unwrap());
        store.set(OBSERVED, &[(TIME_PERIOD, "latest")], 4.0).unwrap();
        let server = start_server("127.0.0.1:0", store).await.unwrap();

        let resp = reqwest::get(format!("http://{}/metrics", server.local_addr()))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let content_type = resp.headers()[reqwest::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        let body = resp.text().await.unwrap();
        assert!(body.contains(r#"dump1090_recent_aircraft_observed{time_period="latest"} 4"#));

        server.stop().await;
    }

    #[tokio::test]
    async fn index_points_to_metrics() {
        let store = Arc::new(MetricStore::new(DEFAULT_NAMESPACE).unwrap());
        let server = start_server("127.0.0.1:0", store).await.unwrap();

        let body = reqwest::get(format!("http://{}/", server.local_addr()))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("/metrics"));

        server.stop().await;
    }
}
