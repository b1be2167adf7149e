#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod routes;

use config::Config;
use gymlog_domain::Service;
use gymlog_storage::memory::MemoryStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub service: Service<MemoryStore>,
}
