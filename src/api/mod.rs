//! HTTP API for the SmartAttend web front end

mod error;
mod server;

pub use error::ApiError;
pub use server::{router, start_server, AppState};
