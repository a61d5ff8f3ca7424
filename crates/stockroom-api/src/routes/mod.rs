//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{auth, cart, categories, dashboard, health, inventory, items};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(catalog_routes())
        .merge(cart_routes())
        .merge(inventory_routes())
        .merge(dashboard_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

/// Catalog routes (items and categories)
fn catalog_routes() -> Router<AppState> {
    Router::new()
        // Item CRUD
        .route("/items", get(items::list_items))
        .route("/items", post(items::create_item))
        .route("/items/:item_id", get(items::get_item))
        .route("/items/:item_id", patch(items::update_item))
        .route("/items/:item_id", delete(items::retire_item))
        .route("/items/:item_id/purge", delete(items::purge_item))
        // Category CRUD
        .route("/categories", get(categories::list_categories))
        .route("/categories", post(categories::create_category))
        .route("/categories/:category_id", patch(categories::rename_category))
        .route("/categories/:category_id", delete(categories::delete_category))
        // Search index maintenance
        .route("/admin/reindex", post(items::reindex))
}

/// Cart routes
fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::get_cart))
        .route("/cart", delete(cart::clear_cart))
        .route("/cart/lines", post(cart::add_line))
        .route("/cart/lines/:item_id", patch(cart::update_line))
        .route("/cart/lines/:item_id", delete(cart::remove_line))
        .route("/cart/commit", post(cart::commit_cart))
}

/// Personal inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/inventory", get(inventory::list_inventory))
        .route("/inventory/:item_id/return", post(inventory::return_item))
}

/// Dashboard routes
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/dashboard/activity", get(dashboard::recent_activity))
}
