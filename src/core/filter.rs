//! Catalog filter/search engine
//!
//! [`filter`] applies composable predicates to a loaded catalog and returns a
//! new, optionally sorted, sequence of items:
//!
//! 1. price range (inclusive, evaluated first because it is cheapest)
//! 2. brand set membership (empty set = no restriction)
//! 3. colour set membership (empty set = no restriction)
//! 4. case-insensitive free text, field-scoped or whole-row
//! 5. optional stable sort on one column
//!
//! The input slice is never mutated and an empty result is not an error.
//!
//! # Example
//!
//! ```rust,ignore
//! let params = FilterParams::default()
//!     .with_price_range(Some(0.0), Some(1000.0))
//!     .with_brands(["Zara"])
//!     .with_query("red")
//!     .with_sort(SortSpec::desc(ItemField::Price));
//!
//! let visible = filter(&catalog, &params);
//! ```

use crate::core::item::{Item, ItemField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Columns searched by default in field-scoped mode
pub const DEFAULT_SEARCH_FIELDS: [ItemField; 3] =
    [ItemField::Name, ItemField::Brand, ItemField::Colour];

/// Inclusive price bounds; a missing bound is unbounded
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min.is_none_or(|min| min <= price) && self.max.is_none_or(|max| price <= max)
    }
}

/// How the free-text query is matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode {
    /// Substring of any of the named columns
    Fields(Vec<ItemField>),

    /// Substring of every column rendered as text and joined by spaces
    WholeRow,
}

impl Default for SearchMode {
    fn default() -> Self {
        SearchMode::Fields(DEFAULT_SEARCH_FIELDS.to_vec())
    }
}

impl SearchMode {
    /// Build a mode from its name and, for field-scoped mode, a column list
    ///
    /// An empty column list falls back to [`DEFAULT_SEARCH_FIELDS`].
    pub fn from_parts(mode: &str, fields: &[ItemField]) -> Result<Self, String> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "fields" | "field" => {
                if fields.is_empty() {
                    Ok(SearchMode::default())
                } else {
                    Ok(SearchMode::Fields(fields.to_vec()))
                }
            }
            "row" | "whole_row" | "whole-row" => Ok(SearchMode::WholeRow),
            other => Err(format!("unknown search mode '{}'", other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Fields(_) => "fields",
            SearchMode::WholeRow => "row",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort stage: one column, one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: ItemField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: ItemField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: ItemField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

impl FromStr for SortSpec {
    type Err = String;

    /// Parse `field`, `field:asc` or `field:desc`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            Some((field, dir)) => (field, dir.trim().to_ascii_lowercase()),
            None => (s, "asc".to_string()),
        };
        let field = field.parse::<ItemField>()?;
        match direction.as_str() {
            "asc" => Ok(SortSpec::asc(field)),
            "desc" => Ok(SortSpec::desc(field)),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.field, dir)
    }
}

/// Caller-supplied constraints for one catalog view
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterParams {
    pub price: Option<PriceRange>,
    pub brands: BTreeSet<String>,
    pub colours: BTreeSet<String>,
    pub query: Option<String>,
    pub search: SearchMode,
    pub sort: Option<SortSpec>,
}

impl FilterParams {
    pub fn with_price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price = if min.is_none() && max.is_none() {
            None
        } else {
            Some(PriceRange::new(min, max))
        };
        self
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = brands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_colours<I, S>(mut self, colours: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colours = colours.into_iter().map(Into::into).collect();
        self
    }

    /// Set the free-text query; blank text clears it
    pub fn with_query(mut self, query: impl AsRef<str>) -> Self {
        let query = query.as_ref().trim();
        self.query = (!query.is_empty()).then(|| query.to_string());
        self
    }

    pub fn with_search(mut self, search: SearchMode) -> Self {
        self.search = search;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Whether `item` passes every predicate
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(range) = &self.price {
            if !range.contains(item.price) {
                return false;
            }
        }
        if !self.brands.is_empty() && !self.brands.contains(&item.brand) {
            return false;
        }
        if !self.colours.is_empty() && !self.colours.contains(&item.colour) {
            return false;
        }
        match &self.query {
            Some(query) => text_matches(item, &query.to_lowercase(), &self.search),
            None => true,
        }
    }
}

fn text_matches(item: &Item, needle: &str, mode: &SearchMode) -> bool {
    match mode {
        SearchMode::Fields(fields) => fields
            .iter()
            .any(|field| item.text_of(*field).to_lowercase().contains(needle)),
        SearchMode::WholeRow => item.row_text().to_lowercase().contains(needle),
    }
}

/// Apply `params` to `catalog`
///
/// Returns a new vector in load order (or sort order, when a sort is given);
/// equal sort keys keep their load order in both directions.
pub fn filter(catalog: &[Item], params: &FilterParams) -> Vec<Item> {
    let mut result: Vec<Item> = catalog
        .iter()
        .filter(|item| params.matches(item))
        .cloned()
        .collect();

    if let Some(sort) = params.sort {
        apply_sort(&mut result, sort);
    }

    result
}

/// Stable sort on one column
pub fn apply_sort(items: &mut [Item], sort: SortSpec) {
    match sort.direction {
        SortDirection::Asc => items.sort_by(|a, b| {
            a.field_value(sort.field)
                .compare(&b.field_value(sort.field))
        }),
        SortDirection::Desc => items.sort_by(|a, b| {
            b.field_value(sort.field)
                .compare(&a.field_value(sort.field))
        }),
    }
}
