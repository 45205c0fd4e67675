//! The client-held shopping cart state container.
//!
//! The cart is owned by the UI layer, which persists it between visits. This
//! module defines the state machine the UI drives: every mutation is atomic
//! per call, and the derived totals are recomputed from the item list on each
//! mutation rather than incrementally accumulated, so they cannot drift.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// One cart line: a product snapshot plus the quantity requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Compound line id: `{product_id}-{added_at millis}`.
    pub id: String,
    /// Snapshot of the product at the time it was added.
    pub product: Product,
    /// Quantity of this product. Invariant: >= 1 while the line exists.
    pub quantity: u32,
    /// When this line was first added.
    pub added_at: DateTime<Utc>,
}

/// Shopping cart state.
///
/// Totals are derived fields: [`Cart::total_items`] is the sum of line
/// quantities and [`Cart::total_price`] the sum of `price * quantity`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
    total_items: u32,
    total_price: Decimal,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total quantity across all lines.
    #[must_use]
    pub const fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Total price across all lines.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// True if the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` of `product` to the cart.
    ///
    /// If a line for the same product already exists its quantity is
    /// increased; otherwise a new line is appended.
    pub fn add_item(&mut self, product: Product, quantity: u32) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            existing.quantity += quantity;
        } else {
            let added_at = Utc::now();
            self.items.push(CartItem {
                id: format!("{}-{}", product.id, added_at.timestamp_millis()),
                product,
                quantity,
                added_at,
            });
        }
        self.recompute_totals();
    }

    /// Remove the line for `product_id`, if present.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product.id != product_id);
        self.recompute_totals();
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// A quantity of zero removes the line. Setting a quantity for a product
    /// that is not in the cart is a no-op.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            item.quantity = quantity;
        }
        self.recompute_totals();
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn recompute_totals(&mut self) {
        self.total_items = self.items.iter().map(|i| i.quantity).sum();
        self.total_price = self
            .items
            .iter()
            .map(|i| i.product.price * Decimal::from(i.quantity))
            .sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::product::{Category, Difficulty};

    fn product(id: i32, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: price.parse().expect("valid decimal"),
            description: String::new(),
            image: String::new(),
            category: Category::Tools,
            tags: Vec::new(),
            difficulty: Difficulty::Beginner,
            material: "Stainless Steel".to_string(),
            size: String::new(),
        }
    }

    #[test]
    fn test_add_item_appends_line_with_compound_id() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "10.00"), 2);

        assert_eq!(cart.items().len(), 1);
        let item = cart.items().first().expect("one line");
        assert!(item.id.starts_with("1-"));
        assert_eq!(item.quantity, 2);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), Decimal::new(2000, 2));
    }

    #[test]
    fn test_add_item_merges_existing_line() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "10.00"), 1);
        cart.add_item(product(1, "10.00"), 3);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), Decimal::new(4000, 2));
    }

    #[test]
    fn test_totals_span_multiple_lines() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "10.00"), 2);
        cart.add_item(product(2, "20.00"), 1);

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Decimal::new(4000, 2));
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "10.00"), 2);
        cart.add_item(product(2, "20.00"), 1);
        cart.remove_item(ProductId::new(1));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price(), Decimal::new(2000, 2));
    }

    #[test]
    fn test_set_quantity_updates_totals() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "10.00"), 1);
        cart.set_quantity(ProductId::new(1), 5);

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_price(), Decimal::new(5000, 2));
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "10.00"), 2);
        cart.set_quantity(ProductId::new(1), 0);

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_set_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "10.00"), 2);
        cart.set_quantity(ProductId::new(99), 5);

        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "10.00"), 2);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_serde_uses_camel_case_keys() {
        let mut cart = Cart::new();
        cart.add_item(product(1, "10.00"), 1);

        let json = serde_json::to_value(&cart).expect("serialize");
        assert!(json.get("totalItems").is_some());
        assert!(json.get("totalPrice").is_some());
        let items = json.get("items").and_then(|v| v.as_array()).expect("items");
        assert!(items.first().and_then(|i| i.get("addedAt")).is_some());
    }
}
