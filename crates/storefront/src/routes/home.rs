//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::routes::products::ProductView;
use crate::routes::reviews::{Review, all_reviews};
use crate::state::AppState;

// =============================================================================
// Hero Configuration (Static content)
// =============================================================================

/// The hero banner shown above the fold.
#[derive(Clone)]
pub struct HeroConfig {
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
    pub button_url: String,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title: "Elegance in Every Thread".to_string(),
            subtitle: "Discover our collection of modern and traditional abayas, \
                       crafted with premium fabrics and meticulous attention to detail."
                .to_string(),
            button_text: "Shop the Collection".to_string(),
            button_url: "/products".to_string(),
        }
    }
}

/// Number of products to show in the featured grid.
const FEATURED_PRODUCTS: usize = 8;

/// Number of reviews to feature on the home page.
const FEATURED_REVIEWS: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub store_name: String,
    pub cart_count: u32,
    /// Hero banner configuration.
    pub hero: HeroConfig,
    /// Featured products for the grid.
    pub featured_products: Vec<ProductView>,
    /// Featured customer reviews.
    pub featured_reviews: Vec<Review>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let featured_products = state
        .catalog()
        .featured(FEATURED_PRODUCTS)
        .iter()
        .map(ProductView::from)
        .collect();

    let mut featured_reviews = all_reviews();
    featured_reviews.truncate(FEATURED_REVIEWS);

    HomeTemplate {
        store_name: state.config().store_name.clone(),
        cart_count: state.cart().count(),
        hero: HeroConfig::default(),
        featured_products,
        featured_reviews,
    }
}
