//! REST API exposure
//!
//! Consumes a `ServerHost` and produces an Axum `Router`.

pub mod handlers;

use super::super::host::ServerHost;
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Catalog routes
    /// - Account routes
    /// - Donation routes
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Router {
        let api = Router::new()
            .route(
                "/items",
                get(handlers::list_items).post(handlers::create_item),
            )
            .route("/items/{id}", get(handlers::get_item))
            .route("/items/{id}/rent", post(handlers::rent_item))
            .route("/signup", post(handlers::signup))
            .route("/login", post(handlers::login))
            .route("/logout", post(handlers::logout))
            .route("/me", get(handlers::me))
            .route(
                "/donations",
                get(handlers::list_donations).post(handlers::submit_donation),
            )
            .with_state(host);

        let mut app = Self::health_routes().merge(api);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "e-style"
        }))
    }
}
