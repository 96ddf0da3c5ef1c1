mod collector;
mod error;
mod exporter;
mod origin;
mod worker;

pub use exporter::Exporter;
