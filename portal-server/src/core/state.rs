use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, Result};
use crate::store::PortalStore;

/// Shared server state - one instance cloned into every handler
///
/// Cheap to clone: the store and JWT service are behind `Arc`.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration (immutable after startup)
    pub config: Config,
    /// Embedded store (redb)
    pub store: PortalStore,
    /// JWT validation service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize server state
    ///
    /// Ensures the working directory exists, opens the store and builds the
    /// JWT service from config.
    pub fn initialize(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let store = PortalStore::open(config.store_path())?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Ok(Self {
            config: config.clone(),
            store,
            jwt_service,
        })
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Build a state around an in-memory store (tests only)
    #[cfg(test)]
    pub fn for_tests() -> Self {
        let store = PortalStore::open_in_memory().expect("in-memory store");
        let config = Config::with_overrides("/tmp/portal-test", 0);
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            store,
            jwt_service,
        }
    }
}
