//! Storage interface for whole-table load/save
//!
//! Every table in the system (catalog, users, donations) is read in full at
//! the start of an interaction and, when mutated, written back in full. The
//! filter engine and the services never see how a table is stored; they only
//! talk to a [`TableStore`].

use crate::core::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;

/// A record that can be stored as one row of a flat table
pub trait TableRecord: Clone + Send + Sync + 'static {
    /// Table name used in logs and error messages
    const TABLE: &'static str;

    /// Column order used when writing the table
    fn headers() -> &'static [&'static str];

    /// Columns a table must have to be loaded; each entry lists accepted
    /// names for one column
    fn required_columns() -> &'static [&'static [&'static str]];

    /// Render the record as cells in [`headers`](Self::headers) order
    fn to_row(&self) -> Vec<String>;

    /// Parse a record from a row
    ///
    /// The returned message becomes the body of a `MalformedRecord` error.
    fn from_row(row: &Row<'_>) -> Result<Self, String>;

    /// Unique key of the record, checked on load
    fn key(&self) -> String;
}

/// One row of a table, addressed by column name
#[derive(Debug, Clone)]
pub struct Row<'a> {
    columns: &'a HashMap<String, usize>,
    cells: Vec<String>,
}

impl<'a> Row<'a> {
    /// Build a row over a header index (lowercased column name -> position)
    pub fn new(columns: &'a HashMap<String, usize>, cells: Vec<String>) -> Self {
        Self { columns, cells }
    }

    /// Cell for the first of `names` present in the header, trimmed
    pub fn get(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .find_map(|name| self.columns.get(*name))
            .and_then(|idx| self.cells.get(*idx))
            .map(|cell| cell.trim())
    }

    /// Like [`get`](Self::get), failing when no such column exists
    pub fn require(&self, names: &[&str]) -> Result<&str, String> {
        self.get(names)
            .ok_or_else(|| format!("missing column '{}'", names[0]))
    }
}

/// Name of the first required column absent from a header index
pub fn missing_column<T: TableRecord>(columns: &HashMap<String, usize>) -> Option<&'static str> {
    T::required_columns()
        .iter()
        .find(|names| !names.iter().any(|name| columns.contains_key(*name)))
        .map(|names| names[0])
}

/// Id for a new row: one past the largest id present, 1 for an empty table
pub fn next_id<T: TableRecord>(ids: impl Iterator<Item = u64>) -> Result<u64, StoreError> {
    match ids.max() {
        None => Ok(1),
        Some(last) => last.checked_add(1).ok_or(StoreError::KeysExhausted {
            table: T::TABLE.to_string(),
            last,
        }),
    }
}

/// Injected storage capability for a table of `T`
///
/// Implementations must treat `save` as a full overwrite: after it returns,
/// `load` yields exactly the saved rows in the saved order.
#[async_trait]
pub trait TableStore<T: TableRecord>: Send + Sync {
    /// Load every row, in stored order
    async fn load(&self) -> Result<Vec<T>, StoreError>;

    /// Replace the stored table with `rows`
    async fn save(&self, rows: &[T]) -> Result<(), StoreError>;
}

/// Reject tables whose records share a key
pub fn ensure_unique_keys<T: TableRecord>(rows: &[T]) -> Result<(), StoreError> {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        // line 1 is the header
        let line = idx + 2;
        if let Some(first) = seen.insert(row.key(), line) {
            return Err(StoreError::MalformedRecord {
                table: T::TABLE.to_string(),
                line,
                message: format!("duplicate key '{}' (first seen at line {})", row.key(), first),
            });
        }
    }
    Ok(())
}
