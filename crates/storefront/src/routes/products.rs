//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use amara_core::{Product, ProductId, Size};

use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image: product.image.clone(),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub store_name: String,
    pub cart_count: u32,
    pub products: Vec<ProductView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub store_name: String,
    pub cart_count: u32,
    pub product: ProductView,
    pub sizes: Vec<&'static str>,
    pub related_products: Vec<ProductView>,
}

/// Not-found page for unknown product ids: a navigation escape hatch, not a
/// crash.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub store_name: String,
    pub cart_count: u32,
}

/// Display product listing page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    ProductsIndexTemplate {
        store_name: state.config().store_name.clone(),
        cart_count: state.cart().count(),
        products: state.catalog().all().iter().map(ProductView::from).collect(),
    }
}

/// Number of related products shown under the detail page.
const RELATED_PRODUCTS: usize = 4;

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let product_id = ProductId::new(id);
    let Some(product) = state.catalog().find(&product_id) else {
        tracing::warn!(product_id = %product_id, "Unknown product requested");
        return (
            StatusCode::NOT_FOUND,
            ProductNotFoundTemplate {
                store_name: state.config().store_name.clone(),
                cart_count: state.cart().count(),
            },
        )
            .into_response();
    };

    ProductShowTemplate {
        store_name: state.config().store_name.clone(),
        cart_count: state.cart().count(),
        product: ProductView::from(product),
        sizes: Size::ALL.iter().map(Size::label).collect(),
        related_products: state
            .catalog()
            .related(&product_id, RELATED_PRODUCTS)
            .into_iter()
            .map(ProductView::from)
            .collect(),
    }
    .into_response()
}
