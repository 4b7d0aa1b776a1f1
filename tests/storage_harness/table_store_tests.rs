//! Macro-generated test suite for `TableStore<Item>` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use estyle::storage::InMemoryTableStore;
//!
//! table_store_tests!((InMemoryTableStore::<Item>::new(), ()));
//! ```
//!
//! # Generated Tests
//!
//! - `test_load_empty` - a fresh store loads no rows
//! - `test_save_then_load` - rows come back equal and in saved order
//! - `test_save_overwrites` - a second save replaces the first
//! - `test_special_characters_survive` - commas, quotes and newlines
//! - `test_catalog_service_persists_rent` - a rent is visible on the next load
//! - `test_concurrent_listings` - parallel `list_item` calls keep every row

/// Generate a `TableStore<Item>` conformance test suite.
///
/// `$factory` must evaluate to a `(store, guard)` tuple. The guard is held
/// for the duration of the test (e.g. a `TempDir`). It is re-evaluated for
/// each test to ensure isolation.
#[macro_export]
macro_rules! table_store_tests {
    ($factory:expr) => {
        mod table_store_contract_tests {
            use super::*;
            use estyle::core::item::{Item, ItemStatus, NewItem};
            use estyle::core::service::CatalogService;
            use estyle::core::store::TableStore;
            use std::sync::Arc;

            #[tokio::test]
            async fn test_load_empty() {
                let (store, _guard) = $factory;
                assert!(store.load().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_save_then_load() {
                let (store, _guard) = $factory;
                let catalog = sample_catalog();

                store.save(&catalog).await.unwrap();
                let loaded = store.load().await.unwrap();

                assert_eq!(loaded, catalog);
            }

            #[tokio::test]
            async fn test_save_overwrites() {
                let (store, _guard) = $factory;
                store.save(&sample_catalog()).await.unwrap();

                let smaller = vec![make_item(9, "Cap", "Nike", "Black", 50.0)];
                store.save(&smaller).await.unwrap();

                assert_eq!(store.load().await.unwrap(), smaller);
            }

            #[tokio::test]
            async fn test_special_characters_survive() {
                let (store, _guard) = $factory;
                let mut item = make_item(1, "Coat, \"long\"", "A&B", "Navy", 10.5);
                item.img = "line one\nline two".to_string();
                item.owner = "alice".to_string();
                item.status = ItemStatus::Unavailable;

                store.save(&[item.clone()]).await.unwrap();
                assert_eq!(store.load().await.unwrap(), vec![item]);
            }

            #[tokio::test]
            async fn test_catalog_service_persists_rent() {
                let (store, _guard) = $factory;
                store.save(&sample_catalog()).await.unwrap();
                let store: Arc<dyn TableStore<Item>> = Arc::new(store);
                let service = CatalogService::new(store.clone());

                service.rent(2, "alice").await.unwrap();

                let reloaded = store.load().await.unwrap();
                let shirt = reloaded.iter().find(|i| i.id == 2).unwrap();
                assert_eq!(shirt.status, ItemStatus::Rented);
                assert_eq!(reloaded.len(), sample_catalog().len());
            }

            #[tokio::test]
            async fn test_concurrent_listings() {
                let (store, _guard) = $factory;
                let store: Arc<dyn TableStore<Item>> = Arc::new(store);
                let service = CatalogService::new(store.clone());

                let mut handles = Vec::new();
                for n in 0..8 {
                    let service = service.clone();
                    handles.push(tokio::spawn(async move {
                        service
                            .list_item(
                                "bob",
                                NewItem {
                                    name: format!("Item {}", n),
                                    brand: "Zara".to_string(),
                                    colour: "Red".to_string(),
                                    price: 10.0,
                                    img: String::new(),
                                },
                            )
                            .await
                            .unwrap()
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                let mut ids: Vec<u64> = store.load().await.unwrap().iter().map(|i| i.id).collect();
                ids.sort();
                assert_eq!(ids, (1..=8).collect::<Vec<_>>());
            }
        }
    };
}
