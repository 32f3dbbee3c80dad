//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use amara_core::{Cart, CustomOrderForm};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart and the custom-order
/// form are the only mutable pieces; each sits behind its own `Mutex`, so
/// mutations are serialized the same way the storefront's single event queue
/// serializes user input, while any number of pages may read between them.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<Cart>,
    wizard: Mutex<CustomOrderForm>,
}

impl AppState {
    /// Create a new application state with an empty cart and a fresh wizard
    /// form.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(Cart::new()),
                wizard: Mutex::new(CustomOrderForm::default()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Lock the cart. Neither store holds its lock across an await point,
    /// so a poisoned lock can only mean a panic mid-mutation; recover with
    /// whatever state is there rather than taking the whole storefront down.
    pub fn cart(&self) -> MutexGuard<'_, Cart> {
        self.inner.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the custom-order wizard form.
    pub fn wizard(&self) -> MutexGuard<'_, CustomOrderForm> {
        self.inner.wizard.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
