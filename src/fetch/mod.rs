mod error;
mod fetcher;
mod resources;

pub use error::FetchError;
pub use fetcher::Fetcher;
pub use resources::Resources;
