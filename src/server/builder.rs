//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::AppConfig;
use crate::core::donation::DonationRequest;
use crate::core::item::Item;
use crate::core::store::TableStore;
use crate::core::user::User;
use crate::storage::CsvTableStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for creating the HTTP server
///
/// Stores not set explicitly are CSV files at the paths from the
/// configuration.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::from_yaml_file("estyle.yaml")?)
///     .with_user_store(InMemoryTableStore::<User>::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    catalog_store: Option<Arc<dyn TableStore<Item>>>,
    user_store: Option<Arc<dyn TableStore<User>>>,
    donation_store: Option<Arc<dyn TableStore<DonationRequest>>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default_config(),
            catalog_store: None,
            user_store: None,
            donation_store: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_catalog_store(mut self, store: impl TableStore<Item> + 'static) -> Self {
        self.catalog_store = Some(Arc::new(store));
        self
    }

    pub fn with_user_store(mut self, store: impl TableStore<User> + 'static) -> Self {
        self.user_store = Some(Arc::new(store));
        self
    }

    pub fn with_donation_store(
        mut self,
        store: impl TableStore<DonationRequest> + 'static,
    ) -> Self {
        self.donation_store = Some(Arc::new(store));
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the host, filling in CSV stores where none were given
    pub fn build_host(self) -> Result<ServerHost> {
        let storage = &self.config.storage;

        let catalog_store = self.catalog_store.unwrap_or_else(|| {
            Arc::new(
                CsvTableStore::<Item>::new(&storage.catalog.path)
                    .create_if_missing(storage.catalog.create_if_missing),
            )
        });
        let user_store = self.user_store.unwrap_or_else(|| {
            Arc::new(
                CsvTableStore::<User>::new(&storage.users.path)
                    .create_if_missing(storage.users.create_if_missing),
            )
        });
        let donation_store = self.donation_store.unwrap_or_else(|| {
            Arc::new(
                CsvTableStore::<DonationRequest>::new(&storage.donations.path)
                    .create_if_missing(storage.donations.create_if_missing),
            )
        });

        let host =
            ServerHost::from_components(self.config, catalog_store, user_store, donation_store)?;
        Ok(host)
    }

    /// Build the final REST router with request tracing
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        Ok(RestExposure::build_router(host, custom_routes).layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.host:server.port` from the configuration and handles
    /// SIGTERM and SIGINT (Ctrl+C) for graceful shutdown.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.addr();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for a shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
