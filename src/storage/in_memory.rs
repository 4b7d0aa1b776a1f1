//! In-memory table store for testing and development

use crate::core::error::StoreError;
use crate::core::store::{TableRecord, TableStore};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory table store
///
/// Holds the last saved table. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryTableStore<T: TableRecord> {
    rows: Arc<RwLock<Vec<T>>>,
}

impl<T: TableRecord> InMemoryTableStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_rows(Vec::new())
    }

    /// Create a store seeded with `rows`
    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    fn lock_error(e: impl std::fmt::Display) -> StoreError {
        StoreError::Io {
            table: T::TABLE.to_string(),
            message: format!("Failed to acquire lock: {}", e),
        }
    }
}

impl<T: TableRecord> Default for InMemoryTableStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: TableRecord> TableStore<T> for InMemoryTableStore<T> {
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        let rows = self.rows.read().map_err(Self::lock_error)?;
        Ok(rows.clone())
    }

    async fn save(&self, rows: &[T]) -> Result<(), StoreError> {
        let mut stored = self.rows.write().map_err(Self::lock_error)?;
        *stored = rows.to_vec();
        Ok(())
    }
}
