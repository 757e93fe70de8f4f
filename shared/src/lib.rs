pub mod types;
pub mod config;
pub mod error;
pub mod guest;
pub mod profile;
pub mod image_proxy;
pub mod responses;

use config::Config;
use std::sync::Arc;

/// Shared application state
///
/// Only immutable configuration lives here. Every invocation builds and drops
/// its own HTTP clients.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self { config })
    }
}
