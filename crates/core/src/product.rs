//! The immutable catalog product record.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product as loaded from the catalog file.
///
/// Products are loaded wholesale at startup and never mutated; cart line
/// items hold their own copy of the record they were created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog handle, also used in product-page URLs.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Path to the product image under the static file root.
    pub image: String,
}
