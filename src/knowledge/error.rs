use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to fetch aircraft shard {shard}: {source}")]
    Shard {
        shard: String,
        #[source]
        source: FetchError,
    },
    #[error("aircraft shard {0} is not a JSON object")]
    InvalidShard(String),
}
