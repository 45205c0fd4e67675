//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (catalog loaded)
//!
//! # Products
//! GET  /api/products           - Full catalog listing
//! GET  /api/products/search    - Filtered catalog search
//! GET  /api/products/{id}      - Single product
//!
//! # Assistant
//! POST /api/chat               - One shopping-assistant dispatch cycle
//! ```

pub mod chat;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create the combined storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(chat::router())
        .merge(products::router())
}
