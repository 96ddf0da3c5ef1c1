mod error;
mod handlers;
pub mod server;

pub use server::{start_server, ServerHandle};
