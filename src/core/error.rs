//! Typed error handling for the e-STYLE backend
//!
//! Every failure a caller can observe is one variant of a small, typed
//! hierarchy so that handlers can turn it into a user-facing message without
//! string matching.
//!
//! # Error Categories
//!
//! - [`StoreError`]: backing tables missing, unreadable or malformed
//! - [`AuthError`]: sign-up and log-in failures
//! - [`CatalogError`]: item lookups and rentals
//! - [`DonationError`]: rejected donation requests
//! - [`RequestError`]: malformed HTTP input and missing sessions
//! - [`ConfigError`]: configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! match accounts.login("alice", "wrong").await {
//!     Ok(session) => println!("welcome {}", session.username),
//!     Err(EstyleError::Auth(AuthError::SecretMismatch { .. })) => {
//!         println!("Incorrect password");
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for the e-STYLE backend
#[derive(Debug, Error)]
pub enum EstyleError {
    /// Backing table errors
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Account errors
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Catalog errors
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Donation errors
    #[error(transparent)]
    Donation(#[from] DonationError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl EstyleError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            EstyleError::Store(e) => e.status_code(),
            EstyleError::Auth(e) => e.status_code(),
            EstyleError::Catalog(e) => e.status_code(),
            EstyleError::Donation(_) => StatusCode::BAD_REQUEST,
            EstyleError::Request(e) => e.status_code(),
            EstyleError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            EstyleError::Store(e) => e.error_code(),
            EstyleError::Auth(e) => e.error_code(),
            EstyleError::Catalog(e) => e.error_code(),
            EstyleError::Donation(_) => "INVALID_DONATION",
            EstyleError::Request(e) => e.error_code(),
            EstyleError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            EstyleError::Store(StoreError::MalformedRecord { table, line, .. }) => {
                Some(serde_json::json!({ "table": table, "line": line }))
            }
            EstyleError::Auth(AuthError::AlreadyExists { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            EstyleError::Catalog(CatalogError::ItemNotAvailable { id, status }) => {
                Some(serde_json::json!({ "id": id, "status": status }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for EstyleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors raised while loading or persisting a table
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing table is missing or unreadable
    #[error("Table '{table}' is unavailable: {message}")]
    DataUnavailable { table: String, message: String },

    /// A row could not be turned into a record
    #[error("Malformed record in '{table}' at line {line}: {message}")]
    MalformedRecord {
        table: String,
        line: usize,
        message: String,
    },

    /// Writing the table back failed
    #[error("Failed to write table '{table}': {message}")]
    Io { table: String, message: String },

    /// The largest id in the table leaves no room for another row
    #[error("Table '{table}' has no id left after {last}")]
    KeysExhausted { table: String, last: u64 },
}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::DataUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::MalformedRecord { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::KeysExhausted { .. } => StatusCode::INSUFFICIENT_STORAGE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::DataUnavailable { .. } => "DATA_UNAVAILABLE",
            StoreError::MalformedRecord { .. } => "MALFORMED_RECORD",
            StoreError::Io { .. } => "STORAGE_IO",
            StoreError::KeysExhausted { .. } => "KEYS_EXHAUSTED",
        }
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to registration and authentication
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user matches the identifier
    #[error("No account found for '{identifier}'")]
    IdentifierNotFound { identifier: String },

    /// The user exists but the secret does not match
    #[error("Incorrect password for '{username}'")]
    SecretMismatch { username: String },

    /// Username (or email, when unique) is already taken
    #[error("An account with {field} '{value}' already exists")]
    AlreadyExists { field: &'static str, value: String },

    /// Registration input rejected before touching the table
    #[error("Invalid {field}: {message}")]
    InvalidInput { field: &'static str, message: String },

    /// Password hashing or hash parsing failed
    #[error("Password hashing failed: {message}")]
    Hashing { message: String },
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::IdentifierNotFound { .. } => StatusCode::UNAUTHORIZED,
            AuthError::SecretMismatch { .. } => StatusCode::UNAUTHORIZED,
            AuthError::AlreadyExists { .. } => StatusCode::CONFLICT,
            AuthError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            AuthError::Hashing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::IdentifierNotFound { .. } => "IDENTIFIER_NOT_FOUND",
            AuthError::SecretMismatch { .. } => "SECRET_MISMATCH",
            AuthError::AlreadyExists { .. } => "ALREADY_EXISTS",
            AuthError::InvalidInput { .. } => "INVALID_INPUT",
            AuthError::Hashing { .. } => "HASHING_FAILED",
        }
    }
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Errors related to catalog items
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No item carries this id
    #[error("Item with id '{id}' not found")]
    ItemNotFound { id: u64 },

    /// Item exists but cannot be rented in its current status
    #[error("Item '{id}' is {status} and cannot be rented")]
    ItemNotAvailable { id: u64, status: String },

    /// A new listing failed validation
    #[error("Invalid item: {message}")]
    InvalidItem { message: String },
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::ItemNotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::ItemNotAvailable { .. } => StatusCode::CONFLICT,
            CatalogError::InvalidItem { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            CatalogError::ItemNotAvailable { .. } => "ITEM_NOT_AVAILABLE",
            CatalogError::InvalidItem { .. } => "INVALID_ITEM",
        }
    }
}

// =============================================================================
// Donation Errors
// =============================================================================

/// Errors related to donation requests
#[derive(Debug, Error)]
pub enum DonationError {
    #[error("Invalid donation: {message}")]
    Invalid { message: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Missing, unknown or expired session
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Query string could not be turned into filter parameters
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    /// Request body rejected
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// Path parameter could not be parsed
    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidPath { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::InvalidPath { .. } => "INVALID_PATH",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for e-STYLE operations
pub type EstyleResult<T> = Result<T, EstyleError>;
