//! Core module containing the domain types, the filter engine and services

pub mod auth;
pub mod donation;
pub mod error;
pub mod extractors;
pub mod field;
pub mod filter;
pub mod grid;
pub mod item;
pub mod query;
pub mod service;
pub mod session;
pub mod store;
pub mod user;

pub use auth::{AccountPolicy, authenticate, register};
pub use donation::{DonationRequest, NewDonation};
pub use error::{
    AuthError, CatalogError, ConfigError, DonationError, ErrorResponse, EstyleError,
    EstyleResult, RequestError, StoreError,
};
pub use extractors::AuthSession;
pub use field::FieldValue;
pub use filter::{FilterParams, PriceRange, SearchMode, SortDirection, SortSpec, filter};
pub use grid::GridLayout;
pub use item::{Item, ItemField, ItemStatus, NewItem};
pub use query::{CatalogPage, CatalogQuery, PaginationMeta};
pub use service::{AccountService, CatalogService, DonationService};
pub use session::{Session, SessionManager};
pub use store::{Row, TableRecord, TableStore};
pub use user::{User, UserProfile};
