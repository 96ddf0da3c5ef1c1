use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::metrics::MetricError;

pub enum ApiError {
    Render(MetricError),
}

impl From<MetricError> for ApiError {
    fn from(e: MetricError) -> Self {
        ApiError::Render(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Render(e) => {
                log::error!("Failed to render metrics: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("failed to render metrics: {}", e),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
