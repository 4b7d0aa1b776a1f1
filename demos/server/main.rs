//! E-Style REST server
//!
//! Usage:
//!
//! ```text
//! cargo run --example server                 # built-in defaults, data/ in the working dir
//! cargo run --example server -- estyle.yaml  # configuration file
//! RUST_LOG=estyle=debug,tower_http=debug cargo run --example server
//! ```

use anyhow::Result;
use estyle::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("estyle=info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(path = %path, "loading configuration");
            AppConfig::from_yaml_file(&path)?
        }
        None => AppConfig::default_config(),
    };

    tracing::info!(
        catalog = %config.storage.catalog.path.display(),
        users = %config.storage.users.path.display(),
        donations = %config.storage.donations.path.display(),
        "using CSV tables"
    );

    ServerBuilder::new().with_config(config).serve().await
}
