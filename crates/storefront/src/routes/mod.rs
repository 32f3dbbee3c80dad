//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing
//! GET  /products/:id           - Product detail (404 page on unknown id)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Set quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout (external handoff; no payment processor)
//! GET  /checkout               - Checkout form + order summary
//! POST /checkout/whatsapp      - Validate, build message, redirect to wa.me
//! POST /checkout/email         - Validate, build message, redirect to mailto
//!
//! # Custom design wizard
//! GET  /custom-design          - Wizard page at the current step
//! POST /custom-design          - Merge posted fields, then move next/back
//! POST /custom-design/upload   - Attach reference files (multipart)
//! POST /custom-design/whatsapp - Terminal submit via WhatsApp
//! POST /custom-design/email    - Terminal submit via email
//!
//! # Reviews
//! GET  /reviews                - Review list with filter/sort
//! POST /reviews                - Submission (static moderation notice)
//! ```

pub mod cart;
pub mod checkout;
pub mod custom_design;
pub mod home;
pub mod products;
pub mod reviews;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/whatsapp", post(checkout::submit_whatsapp))
        .route("/email", post(checkout::submit_email))
}

/// Create the custom-design wizard router.
pub fn custom_design_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(custom_design::show).post(custom_design::navigate))
        .route("/upload", post(custom_design::upload))
        .route("/whatsapp", post(custom_design::submit_whatsapp))
        .route("/email", post(custom_design::submit_email))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout handoff
        .nest("/checkout", checkout_routes())
        // Custom design wizard
        .nest("/custom-design", custom_design_routes())
        // Reviews
        .route("/reviews", get(reviews::index).post(reviews::submit))
}
