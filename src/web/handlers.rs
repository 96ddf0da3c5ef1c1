use axum::{extract::State, http::header, response::IntoResponse};

use super::error::ApiResult;
use super::server::AppState;

pub async fn index() -> &'static str {
    "dump1090 exporter. Metrics are served at /metrics\n"
}

pub async fn metrics(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let body = state.store.render()?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
