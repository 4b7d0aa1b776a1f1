//! # E-Style
//!
//! Backend of a clothing rental marketplace: browse a catalog of items,
//! list and rent items, manage accounts and submit charity donations.
//!
//! ## Features
//!
//! - **Filter Engine**: Price range, brand/colour sets, text search and sorting over the catalog
//! - **Grid Layout**: Results placed in fixed columns, with pagination
//! - **Accounts**: Argon2-hashed credentials, login by username or email, explicit sessions
//! - **Pluggable Storage**: Whole-table `TableStore` with CSV file and in-memory backends
//! - **Configuration-Based**: Paths, grid, search defaults and account policy from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use estyle::prelude::*;
//!
//! let catalog = vec![/* items */];
//! let params = FilterParams::default()
//!     .with_price_range(Some(0.0), Some(1000.0))
//!     .with_brands(["Zara"])
//!     .with_query("dress")
//!     .with_sort(SortSpec::desc(ItemField::Price));
//!
//! let results = filter(&catalog, &params);
//! let columns = GridLayout::new(3).arrange(&results);
//! ```
//!
//! Serving the REST API:
//!
//! ```rust,ignore
//! ServerBuilder::new()
//!     .with_config(AppConfig::from_yaml_file("estyle.yaml")?)
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        auth::{AccountPolicy, authenticate, register},
        donation::{DonationRequest, NewDonation},
        field::FieldValue,
        filter::{FilterParams, PriceRange, SearchMode, SortDirection, SortSpec, filter},
        grid::GridLayout,
        item::{Item, ItemField, ItemStatus, NewItem},
        query::{CatalogPage, CatalogQuery, PaginationMeta},
        session::{Session, SessionManager},
        user::{User, UserProfile},
    };

    // === Errors ===
    pub use crate::core::error::{
        AuthError, CatalogError, ConfigError, DonationError, EstyleError, EstyleResult,
        RequestError, StoreError,
    };

    // === Services ===
    pub use crate::core::service::{AccountService, CatalogService, DonationService};

    // === Storage ===
    pub use crate::core::store::{TableRecord, TableStore};
    pub use crate::storage::{CsvTableStore, InMemoryTableStore};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::core::extractors::AuthSession;
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
