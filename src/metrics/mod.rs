mod error;
pub mod specs;
mod store;

pub use error::MetricError;
pub use store::{MetricStore, DEFAULT_NAMESPACE};
