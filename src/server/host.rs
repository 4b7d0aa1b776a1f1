//! Server host holding the services behind every route
//!
//! The host is built once at startup and shared by all handlers. It is the
//! single source of truth for application state; nothing is kept in globals.

use crate::config::AppConfig;
use crate::core::donation::DonationRequest;
use crate::core::error::ConfigError;
use crate::core::filter::SearchMode;
use crate::core::grid::GridLayout;
use crate::core::item::Item;
use crate::core::service::{AccountService, CatalogService, DonationService};
use crate::core::session::SessionManager;
use crate::core::store::TableStore;
use crate::core::user::User;
use axum::extract::FromRef;
use std::sync::Arc;

/// Host context containing all application state
pub struct ServerHost {
    /// Validated configuration
    pub config: Arc<AppConfig>,

    pub catalog: CatalogService,
    pub accounts: AccountService,
    pub donations: DonationService,

    /// Search mode applied when a request does not choose one
    pub default_search: SearchMode,

    /// Column layout of result pages
    pub grid: GridLayout,
}

impl ServerHost {
    /// Build the host from a configuration and the three table stores
    pub fn from_components(
        config: AppConfig,
        catalog_store: Arc<dyn TableStore<Item>>,
        user_store: Arc<dyn TableStore<User>>,
        donation_store: Arc<dyn TableStore<DonationRequest>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let sessions = SessionManager::new(config.accounts.session_ttl());
        let default_search = config.catalog.search()?;
        let grid = config.catalog.grid();

        Ok(Self {
            catalog: CatalogService::new(catalog_store),
            accounts: AccountService::new(user_store, sessions, config.accounts.policy()),
            donations: DonationService::new(donation_store),
            default_search,
            grid,
            config: Arc::new(config),
        })
    }

    /// Page size used when a request does not set `limit`
    pub fn page_size(&self) -> usize {
        self.config.catalog.page_size
    }
}

impl FromRef<Arc<ServerHost>> for AccountService {
    fn from_ref(host: &Arc<ServerHost>) -> Self {
        host.accounts.clone()
    }
}
