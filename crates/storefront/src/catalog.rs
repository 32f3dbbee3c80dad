//! The product catalog, loaded wholesale at startup.
//!
//! The catalog is a static JSON file read once in `main` and held in memory
//! for the life of the process; nothing ever mutates it. Every page reads
//! through this store.

use std::path::Path;
use std::sync::Arc;

use amara_core::{Product, ProductId};
use thiserror::Error;

/// Error loading the catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),
}

/// In-memory catalog store, cheaply cloneable.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid catalog
    /// JSON, or contains duplicate product ids.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&raw).map_err(|e| match e {
            CatalogError::Parse { source, .. } => CatalogError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        tracing::info!(
            products = catalog.products.len(),
            path = %path.display(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a catalog from raw JSON.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or duplicate product ids.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> =
            serde_json::from_str(raw).map_err(|source| CatalogError::Parse {
                path: String::new(),
                source,
            })?;

        let mut seen = std::collections::HashSet::new();
        for product in &products {
            if !seen.insert(product.id.clone()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }

        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == *id)
    }

    /// The first `n` products, for the home-page grid.
    #[must_use]
    pub fn featured(&self, n: usize) -> &[Product] {
        self.products.get(..n.min(self.products.len())).unwrap_or(&[])
    }

    /// Up to `n` products other than `exclude`, for "you may also like".
    #[must_use]
    pub fn related(&self, exclude: &ProductId, n: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.id != *exclude)
            .take(n)
            .collect()
    }
}
