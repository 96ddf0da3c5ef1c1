use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricError {
    #[error("unknown gauge: {0}")]
    UnknownGauge(String),
    #[error("gauge {gauge} has no label {label}")]
    UnknownLabel { gauge: String, label: String },
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("metrics are not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
