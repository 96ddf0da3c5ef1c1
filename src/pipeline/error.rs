use thiserror::Error;

use crate::metrics::MetricError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("malformed {feed} document: {reason}")]
    Malformed { feed: &'static str, reason: String },
    #[error("metric store error: {0}")]
    Metric(#[from] MetricError),
}

impl PipelineError {
    pub fn malformed(feed: &'static str, reason: impl Into<String>) -> Self {
        PipelineError::Malformed {
            feed,
            reason: reason.into(),
        }
    }
}
