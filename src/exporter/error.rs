use thiserror::Error;

use crate::fetch::FetchError;
use crate::knowledge::KnowledgeError;
use crate::metrics::MetricError;
use crate::pipeline::PipelineError;

/// Failures that prevent the exporter from starting.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),
    #[error("metric store error: {0}")]
    Metric(#[from] MetricError),
    #[error("failed to bind metrics server on {bind}: {source}")]
    Bind {
        bind: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a single polling cycle. Logged, never fatal.
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
