//! Catalog API Library
//!
//! Core functionality for the catalog browsing and administration service:
//! the flat-file catalog store, the pure filter view, and the HTTP surface
//! around them.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod services;

use axum::Router;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub catalog: services::store::CatalogStore,
}

/// Versioned API routes
pub fn api_v1_routes() -> Router<AppState> {
    Router::new().nest("/products", handlers::products::products_routes())
}
