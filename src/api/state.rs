//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Application services
    pub services: Arc<dyn ServiceContainer>,
    /// Database handle, used for health checks
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state backed by the given database.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let services = Arc::new(Services::from_connection(database.get_connection(), config));
        Self { services, database }
    }

    /// Create application state with manually injected services.
    pub fn new(services: Arc<dyn ServiceContainer>, database: Arc<Database>) -> Self {
        Self { services, database }
    }
}
