//! Shared test harness for table store testing
//!
//! Provides sample catalog rows and the `table_store_tests!` macro that
//! validates any `TableStore<Item>` implementation.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

pub mod table_store_tests;

use estyle::core::item::{Item, ItemStatus};

/// Build a catalog item with an empty owner and image
pub fn make_item(id: u64, name: &str, brand: &str, colour: &str, price: f64) -> Item {
    Item {
        id,
        name: name.to_string(),
        brand: brand.to_string(),
        colour: colour.to_string(),
        price,
        img: format!("img/{}.png", id),
        owner: String::new(),
        status: ItemStatus::Available,
    }
}

/// Small catalog with a mix of brands, colours and prices
pub fn sample_catalog() -> Vec<Item> {
    vec![
        make_item(1, "Summer dress", "Zara", "Red", 500.0),
        make_item(2, "Linen shirt", "H&M", "White", 1500.0),
        make_item(3, "Evening gown", "Gucci", "Black", 9000.0),
        make_item(4, "Denim jacket, oversized", "Levi's", "Blue", 2200.0),
        make_item(5, "Wool scarf", "Zara", "Grey", 300.0),
        make_item(6, "Red \"statement\" coat", "Mango", "Red", 1200.0),
    ]
}
