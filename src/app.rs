use std::sync::Arc;

use crate::config;
use crate::registry::Registry;

/// Shared application state.
///
/// Constructed once at startup (or per test) and cloned into every request
/// handler; there is no hidden process-wide registry instance.
#[derive(Debug, Clone)]
pub struct App {
    pub config: Arc<config::Server>,
    pub registry: Arc<Registry>,
}

impl App {
    #[must_use]
    pub fn new(config: config::Server) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(Registry::new()),
        }
    }
}
