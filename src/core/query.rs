//! Catalog query parameters and pagination utilities

use crate::core::error::RequestError;
use crate::core::filter::{FilterParams, SearchMode, SortSpec};
use crate::core::grid::GridLayout;
use crate::core::item::{Item, ItemField};
use serde::{Deserialize, Serialize};

/// Maximum page size accepted from clients
pub const MAX_LIMIT: usize = 100;

/// Query parameters for browsing the catalog
///
/// Every parameter is optional; list-valued parameters are comma separated
/// because the form widgets submit one string per field.
///
/// # Example
/// ```text
/// GET /items?min_price=0&max_price=1000
/// GET /items?brand=Zara,H%26M&colour=Red&q=dress&sort=price:desc
/// GET /items?q=1500&search=row&page=2&limit=12
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CatalogQuery {
    /// Page number (starts at 1)
    pub page: Option<usize>,

    /// Number of items per page
    pub limit: Option<usize>,

    pub min_price: Option<f64>,
    pub max_price: Option<f64>,

    /// Accepted brands, comma separated
    pub brand: Option<String>,

    /// Accepted colours, comma separated
    #[serde(alias = "color")]
    pub colour: Option<String>,

    /// Free-text query
    pub q: Option<String>,

    /// `fields` or `row`
    pub search: Option<String>,

    /// Columns searched in field-scoped mode, comma separated
    pub fields: Option<String>,

    /// `field`, `field:asc` or `field:desc`
    pub sort: Option<String>,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn invalid(message: String) -> RequestError {
    RequestError::InvalidQuery { message }
}

impl CatalogQuery {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Get limit, falling back to `default` and clamped to `1..=MAX_LIMIT`
    pub fn limit(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, MAX_LIMIT)
    }

    /// Translate into filter parameters
    ///
    /// `default_search` is used when the request names neither a search
    /// mode nor a column list.
    pub fn to_filter_params(
        &self,
        default_search: &SearchMode,
    ) -> Result<FilterParams, RequestError> {
        for (name, bound) in [("min_price", self.min_price), ("max_price", self.max_price)] {
            if bound.is_some_and(|b| !b.is_finite()) {
                return Err(invalid(format!("{} must be a finite number", name)));
            }
        }

        let mut params = FilterParams::default()
            .with_price_range(self.min_price, self.max_price)
            .with_brands(self.brand.as_deref().map(split_list).unwrap_or_default())
            .with_colours(self.colour.as_deref().map(split_list).unwrap_or_default())
            .with_query(self.q.as_deref().unwrap_or_default());

        let fields = self
            .fields
            .as_deref()
            .map(split_list)
            .unwrap_or_default()
            .iter()
            .map(|f| f.parse::<ItemField>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;

        params.search = match (self.search.as_deref(), fields.is_empty()) {
            (Some(mode), _) => SearchMode::from_parts(mode, &fields).map_err(invalid)?,
            (None, false) => SearchMode::Fields(fields),
            (None, true) => default_search.clone(),
        };

        if let Some(sort) = self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            params.sort = Some(sort.parse::<SortSpec>().map_err(invalid)?);
        }

        Ok(params)
    }
}

/// One page of catalog results
#[derive(Debug, Serialize)]
pub struct CatalogPage {
    /// Items on this page, in result order
    pub data: Vec<Item>,

    /// Item ids of this page, one list per grid column
    pub grid: Vec<Vec<u64>>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl CatalogPage {
    /// Cut page `page` of `limit` items out of `results` and lay it out
    pub fn build(results: Vec<Item>, page: usize, limit: usize, layout: &GridLayout) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total = results.len();
        let start = (page - 1).saturating_mul(limit);

        let data: Vec<Item> = results.into_iter().skip(start).take(limit).collect();
        let ids: Vec<u64> = data.iter().map(|item| item.id).collect();

        Self {
            grid: layout.arrange(&ids),
            data,
            pagination: PaginationMeta::new(page, limit, total),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let page = page.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}
