//! CSV file table store
//!
//! One file per table, first record is the header. Fields are comma
//! separated and may be wrapped in double quotes; a quote inside a quoted
//! field is written as `""`. Quoted fields may contain commas and line
//! breaks. Saving rewrites the whole file through a sibling temp file that
//! is renamed over the original.

use crate::core::error::StoreError;
use crate::core::store::{Row, TableRecord, TableStore, ensure_unique_keys, missing_column};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A parsed record and the line it starts on (1-based)
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRecord {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Split CSV text into records
///
/// Blank lines between records are skipped. Fails with the starting line of
/// a quoted field that is never closed.
pub fn parse_records(content: &str) -> Result<Vec<CsvRecord>, (usize, String)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quote_line = 0;
    let mut line = 1;
    let mut record_line = 1;
    let mut record_started = false;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                quote_line = line;
                record_started = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                record_started = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                if record_started || !field.is_empty() {
                    fields.push(std::mem::take(&mut field));
                    records.push(CsvRecord {
                        line: record_line,
                        fields: std::mem::take(&mut fields),
                    });
                }
                record_started = false;
                line += 1;
                record_line = line;
            }
            _ => {
                field.push(c);
                record_started = true;
            }
        }
    }

    if in_quotes {
        return Err((quote_line, "unterminated quoted field".to_string()));
    }
    if record_started || !field.is_empty() {
        fields.push(field);
        records.push(CsvRecord {
            line: record_line,
            fields,
        });
    }

    Ok(records)
}

/// Quote a field when it would not survive a round trip bare
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render a full table with its header
pub fn render_table<T: TableRecord>(rows: &[T]) -> String {
    let mut out = T::headers().join(",");
    out.push('\n');
    for row in rows {
        let line: Vec<String> = row.to_row().iter().map(|f| escape_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Table store backed by a CSV file
pub struct CsvTableStore<T> {
    path: PathBuf,
    create_if_missing: bool,
    _record: PhantomData<fn() -> T>,
}

impl<T: TableRecord> CsvTableStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: false,
            _record: PhantomData,
        }
    }

    /// Treat a missing file as an empty table instead of an error
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, action: &str, e: std::io::Error) -> StoreError {
        StoreError::Io {
            table: T::TABLE.to_string(),
            message: format!("{} {}: {}", action, self.path.display(), e),
        }
    }

    fn parse(&self, content: &str) -> Result<Vec<T>, StoreError> {
        let malformed = |line: usize, message: String| StoreError::MalformedRecord {
            table: T::TABLE.to_string(),
            line,
            message,
        };

        let mut records = parse_records(content)
            .map_err(|(line, message)| malformed(line, message))?
            .into_iter();

        let Some(header) = records.next() else {
            return Ok(Vec::new());
        };

        let columns: HashMap<String, usize> = header
            .fields
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_lowercase(), idx))
            .collect();

        if let Some(column) = missing_column::<T>(&columns) {
            return Err(malformed(header.line, format!("missing column '{}'", column)));
        }

        let width = header.fields.len();
        let rows = records
            .map(|record| {
                if record.fields.len() != width {
                    return Err(malformed(
                        record.line,
                        format!("expected {} fields, found {}", width, record.fields.len()),
                    ));
                }
                let row = Row::new(&columns, record.fields);
                T::from_row(&row).map_err(|message| malformed(record.line, message))
            })
            .collect::<Result<Vec<T>, StoreError>>()?;

        ensure_unique_keys(&rows)?;
        Ok(rows)
    }
}

#[async_trait]
impl<T: TableRecord> TableStore<T> for CsvTableStore<T> {
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound && self.create_if_missing => {
                tracing::debug!(table = T::TABLE, path = %self.path.display(), "table file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::warn!(table = T::TABLE, path = %self.path.display(), error = %e, "table unavailable");
                return Err(StoreError::DataUnavailable {
                    table: T::TABLE.to_string(),
                    message: format!("{}: {}", self.path.display(), e),
                });
            }
        };

        let rows = self.parse(&content)?;
        tracing::debug!(table = T::TABLE, rows = rows.len(), "table loaded");
        Ok(rows)
    }

    async fn save(&self, rows: &[T]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error("creating directory for", e))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, render_table(rows))
            .await
            .map_err(|e| self.io_error("writing temp file for", e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| self.io_error("replacing", e))?;

        tracing::debug!(table = T::TABLE, rows = rows.len(), "table saved");
        Ok(())
    }
}
