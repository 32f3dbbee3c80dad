//! The shopping-cart state container.
//!
//! A cart is an ordered sequence of line items keyed by `(product id, size)`:
//! the same product in two different sizes is two distinct lines, while
//! adding the same product/size pair again increments the existing line.
//! Derived values (`count`, `subtotal`) are recomputed on every read and
//! never cached, so they cannot drift from the line items.
//!
//! The cart lives for the life of the process and is never persisted; it is
//! cleared explicitly after a checkout handoff is dispatched.

use crate::product::Product;
use crate::types::{CurrencyCode, Price, ProductId, Size};

/// A single cart line: a product in one size, with a quantity of at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineItem {
    pub product: Product,
    pub size: Size,
    pub quantity: u32,
}

impl CartLineItem {
    /// The price of this line (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// The cart: insertion-ordered line items, mutated only through the methods
/// below.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add `quantity` of a product in the given size.
    ///
    /// If a line for `(product.id, size)` already exists its quantity is
    /// incremented; otherwise a new line is appended. Adding a quantity of
    /// zero is a no-op, so a line can never be created below the minimum
    /// quantity of 1. There is no upper bound.
    pub fn add(&mut self, product: Product, size: Size, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.find_mut(&product.id, size) {
            Some(line) => line.quantity += quantity,
            None => self.items.push(CartLineItem {
                product,
                size,
                quantity,
            }),
        }
    }

    /// Remove the line for `(product_id, size)`. Silently does nothing if no
    /// such line exists.
    pub fn remove(&mut self, product_id: &ProductId, size: Size) {
        self.items
            .retain(|line| !(line.product.id == *product_id && line.size == size));
    }

    /// Set the quantity of an existing line directly (not additive).
    ///
    /// A quantity of zero removes the line instead of leaving a
    /// zero-quantity entry. Setting the quantity of an absent line does
    /// nothing.
    pub fn set_quantity(&mut self, product_id: &ProductId, size: Size, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id, size);
        } else if let Some(line) = self.find_mut(product_id, size) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart. Called after a checkout handoff has been dispatched.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines, recomputed on every call.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of price x quantity across all lines, recomputed on every call.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or(CurrencyCode::default(), |line| {
                line.product.price.currency_code
            });
        self.items.iter().fold(Price::zero(currency), |total, line| {
            total + line.line_total()
        })
    }

    fn find_mut(&mut self, product_id: &ProductId, size: Size) -> Option<&mut CartLineItem> {
        self.items
            .iter_mut()
            .find(|line| line.product.id == *product_id && line.size == size)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Abaya {id}"),
            description: String::new(),
            price: Price::new(price.parse().unwrap(), CurrencyCode::AED),
            image: format!("/static/images/products/{id}.jpg"),
        }
    }

    fn subtotal(cart: &Cart) -> Decimal {
        cart.subtotal().amount
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(product("abaya-a", "100"), Size::M, 1);
        }
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_add_increments_existing_quantity() {
        let mut cart = Cart::new();
        cart.add(product("abaya-a", "100"), Size::M, 2);
        cart.add(product("abaya-a", "100"), Size::M, 3);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_sizes_are_distinct_lines() {
        let mut cart = Cart::new();
        cart.add(product("abaya-a", "100"), Size::M, 1);
        cart.add(product("abaya-a", "100"), Size::L, 1);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::new();
        cart.add(product("abaya-b", "100"), Size::M, 1);
        cart.add(product("abaya-a", "100"), Size::M, 1);
        cart.add(product("abaya-b", "100"), Size::M, 1);
        let ids: Vec<&str> = cart
            .items()
            .iter()
            .map(|line| line.product.id.as_str())
            .collect();
        assert_eq!(ids, ["abaya-b", "abaya-a"]);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("abaya-a", "100"), Size::M, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_is_not_additive() {
        let mut cart = Cart::new();
        cart.add(product("abaya-a", "100"), Size::M, 2);
        cart.set_quantity(&ProductId::new("abaya-a"), Size::M, 7);
        assert_eq!(cart.count(), 7);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(product("abaya-a", "100"), Size::M, 2);
        cart.add(product("abaya-b", "80"), Size::S, 1);
        cart.set_quantity(&ProductId::new("abaya-a"), Size::M, 0);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("abaya-a", "100"), Size::M, 1);
        cart.remove(&ProductId::new("abaya-a"), Size::L);
        cart.remove(&ProductId::new("abaya-z"), Size::M);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_subtotal_recomputed_after_every_mutation() {
        let mut cart = Cart::new();
        cart.add(product("abaya-a", "100"), Size::M, 2);
        assert_eq!(subtotal(&cart), Decimal::from(200));

        cart.add(product("abaya-b", "80.50"), Size::S, 1);
        assert_eq!(subtotal(&cart), "280.50".parse().unwrap());

        cart.set_quantity(&ProductId::new("abaya-a"), Size::M, 1);
        assert_eq!(subtotal(&cart), "180.50".parse().unwrap());

        cart.remove(&ProductId::new("abaya-b"), Size::S);
        assert_eq!(subtotal(&cart), Decimal::from(100));

        cart.clear();
        assert_eq!(subtotal(&cart), Decimal::ZERO);
        assert_eq!(cart.count(), 0);
    }
}
