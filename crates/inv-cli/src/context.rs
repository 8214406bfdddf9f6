//! Shared application resources initialized once at startup.

use std::sync::Arc;

use inv_api::InventoryService;
use inv_auth::SessionStore;
use inv_config::InvConfig;

/// Everything a command handler needs: the resolved configuration, the
/// session store, and the service facade wired to both.
pub struct AppContext {
    pub config: InvConfig,
    pub session: Arc<SessionStore>,
    pub service: InventoryService,
}

impl AppContext {
    /// Build the context and restore any persisted session before the first
    /// command runs.
    #[must_use]
    pub fn init(config: InvConfig) -> Self {
        let session = Arc::new(SessionStore::new());
        session.hydrate();
        let service = InventoryService::new(&config, Arc::clone(&session));
        Self {
            config,
            session,
            service,
        }
    }
}
