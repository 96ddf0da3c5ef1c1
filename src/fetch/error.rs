use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch failed {status}: {resource}")]
    Status {
        status: reqwest::StatusCode,
        resource: String,
    },
    #[error("request timed out to {0}")]
    Timeout(String),
    #[error("client error {source}, {resource}")]
    Client {
        resource: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("read error {source}, {resource}")]
    Read {
        resource: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {resource}: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}
