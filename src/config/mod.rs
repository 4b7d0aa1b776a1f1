//! Configuration loading and management
//!
//! Every section has defaults; a YAML file only needs the keys it changes.

use crate::core::auth::AccountPolicy;
use crate::core::error::ConfigError;
use crate::core::filter::SearchMode;
use crate::core::grid::GridLayout;
use crate::core::item::ItemField;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP listener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port`, as passed to the listener
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location of one CSV table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub path: PathBuf,

    /// Load a missing file as an empty table
    #[serde(default)]
    pub create_if_missing: bool,
}

impl TableConfig {
    fn new(path: &str, create_if_missing: bool) -> Self {
        Self {
            path: PathBuf::from(path),
            create_if_missing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub catalog: TableConfig,
    pub users: TableConfig,
    pub donations: TableConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            catalog: TableConfig::new("data/catalog.csv", false),
            users: TableConfig::new("data/users.csv", true),
            donations: TableConfig::new("data/donations.csv", true),
        }
    }
}

/// Browsing defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Number of columns results are laid out in
    pub grid_columns: usize,

    /// Page size when the request does not set `limit`
    pub page_size: usize,

    /// `fields` or `row`
    pub search_mode: String,

    /// Columns searched in `fields` mode
    pub search_fields: Vec<ItemField>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            grid_columns: 3,
            page_size: 24,
            search_mode: "fields".to_string(),
            search_fields: vec![ItemField::Name, ItemField::Brand, ItemField::Colour],
        }
    }
}

impl CatalogConfig {
    pub fn grid(&self) -> GridLayout {
        GridLayout::new(self.grid_columns)
    }

    /// Search mode used when a request does not pick one
    pub fn search(&self) -> Result<SearchMode, ConfigError> {
        SearchMode::from_parts(&self.search_mode, &self.search_fields).map_err(|message| {
            ConfigError::InvalidValue {
                field: "catalog.search_mode".to_string(),
                value: self.search_mode.clone(),
                message,
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsConfig {
    pub login_with_email: bool,
    pub unique_email: bool,
    pub session_ttl_minutes: u64,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        let policy = AccountPolicy::default();
        Self {
            login_with_email: policy.login_with_email,
            unique_email: policy.unique_email,
            session_ttl_minutes: 24 * 60,
        }
    }
}

impl AccountsConfig {
    pub fn policy(&self) -> AccountPolicy {
        AccountPolicy {
            login_with_email: self.login_with_email,
            unique_email: self.unique_email,
        }
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        let minutes = self.session_ttl_minutes.min(i32::MAX as u64) as i64;
        chrono::Duration::minutes(minutes)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub accounts: AccountsConfig,
}

impl AppConfig {
    /// Load and validate configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string(),
            },
            _ => ConfigError::IoError {
                message: format!("{}: {}", path, e),
            },
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &str, value: impl ToString, message: &str) -> ConfigError {
            ConfigError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
                message: message.to_string(),
            }
        }

        if self.catalog.grid_columns == 0 {
            return Err(invalid("catalog.grid_columns", 0, "must be at least 1"));
        }
        if self.catalog.page_size == 0 {
            return Err(invalid("catalog.page_size", 0, "must be at least 1"));
        }
        if matches!(self.catalog.search()?, SearchMode::Fields(_))
            && self.catalog.search_fields.is_empty()
        {
            return Err(invalid(
                "catalog.search_fields",
                "[]",
                "field search needs at least one column",
            ));
        }
        if self.accounts.session_ttl_minutes == 0 {
            return Err(invalid("accounts.session_ttl_minutes", 0, "must be at least 1"));
        }
        Ok(())
    }
}
