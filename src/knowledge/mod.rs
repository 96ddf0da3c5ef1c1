mod base;
mod error;
mod shards;

pub use base::KnowledgeBase;
pub use error::KnowledgeError;
