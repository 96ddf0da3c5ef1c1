mod aircraft;
mod error;
mod stats;

pub use aircraft::process_aircraft;
#[cfg(test)]
pub use aircraft::LATEST;
pub use error::PipelineError;
pub use stats::process_stats;
