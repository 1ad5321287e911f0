//! Cart line items and pricing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sales tax applied to the cart subtotal.
pub const TAX_RATE: f64 = 0.13;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    /// Unit price in USD.
    pub price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Billing period for subscription-style items (e.g. "monthly").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl CartItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
            category: None,
            duration: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CartTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub item_count: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("cart is empty")]
    Empty,
}

/// Insertion-ordered set of line items keyed by `CartItem::id`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from stored lines: zero-quantity lines are dropped and
    /// lines sharing an id are merged.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items.into_iter().filter(|item| item.quantity > 0) {
            cart.add_item(item);
        }
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Adds an item, or bumps the quantity of the line that shares its id.
    pub fn add_item(&mut self, item: CartItem) {
        let added = item.quantity.max(1);
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(added);
            return;
        }
        self.items.push(CartItem {
            quantity: added,
            ..item
        });
    }

    /// Sets the quantity for `id`. Zero or negative quantities remove the line.
    /// Returns `false` when no line has that id.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) -> bool {
        let Some(index) = self.items.iter().position(|line| line.id == id) else {
            return false;
        };

        if quantity <= 0 {
            self.items.remove(index);
        } else {
            self.items[index].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        true
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.id != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity))
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn tax(&self) -> f64 {
        self.subtotal() * TAX_RATE
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.tax()
    }

    pub fn totals(&self) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal * TAX_RATE;
        CartTotals {
            subtotal,
            tax,
            total: subtotal + tax,
            item_count: self.item_count(),
        }
    }

    /// Finalises the order: returns the charged totals and empties the cart.
    pub fn checkout(&mut self) -> Result<CartTotals, CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }
        let totals = self.totals();
        self.clear();
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn subtotal_and_tax_follow_price_times_quantity() {
        for (price, quantity) in [(0.0, 1), (19.99, 3), (1250.5, 7), (0.01, 1000)] {
            let mut cart = Cart::new();
            cart.add_item(CartItem::new("sku", "Item", price).with_quantity(quantity));
            let subtotal = price * quantity as f64;
            assert!(approx(cart.subtotal(), subtotal));
            assert!(approx(cart.tax(), subtotal * TAX_RATE));
            assert!(approx(cart.total(), subtotal + subtotal * TAX_RATE));
        }
    }

    #[test]
    fn stored_cart_is_normalised_on_load() {
        let raw = r#"[
            {"id":"a","name":"HS report","price":49.0,"quantity":0},
            {"id":"a","name":"HS report","price":49.0,"quantity":2},
            {"id":"b","name":"Pro plan","price":99.0,"quantity":1},
            {"id":"b","name":"Pro plan","price":99.0,"quantity":3}
        ]"#;
        let cart: Cart = serde_json::from_str(raw).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.get("a").map(|item| item.quantity), Some(2));
        assert_eq!(cart.get("b").map(|item| item.quantity), Some(4));
        assert!(cart.items().iter().all(|item| item.quantity >= 1));

        let saved = serde_json::to_value(&cart).unwrap();
        assert_eq!(saved.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn adding_same_id_increments_quantity() {
        let mut cart = Cart::new();
        cart.add_item(CartItem::new("hs-pro", "HS Pro", 49.0));
        cart.add_item(CartItem::new("hs-pro", "HS Pro", 49.0));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get("hs-pro").map(|item| item.quantity), Some(2));
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn zero_quantity_items_are_added_as_one() {
        let mut cart = Cart::new();
        cart.add_item(CartItem::new("a", "A", 5.0).with_quantity(0));
        assert_eq!(cart.get("a").map(|item| item.quantity), Some(1));
    }

    #[test]
    fn non_positive_quantity_removes_item() {
        let mut cart = Cart::new();
        cart.add_item(CartItem::new("a", "A", 10.0));
        cart.add_item(CartItem::new("b", "B", 20.0));

        assert!(cart.update_quantity("a", 0));
        assert!(cart.get("a").is_none());

        assert!(cart.update_quantity("b", -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_sets_value_and_ignores_unknown_ids() {
        let mut cart = Cart::new();
        cart.add_item(CartItem::new("a", "A", 10.0));

        assert!(cart.update_quantity("a", 4));
        assert_eq!(cart.get("a").map(|item| item.quantity), Some(4));
        assert!(!cart.update_quantity("missing", 2));
    }

    #[test]
    fn items_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(CartItem::new("c", "C", 1.0));
        cart.add_item(CartItem::new("a", "A", 1.0));
        cart.add_item(CartItem::new("c", "C", 1.0));
        cart.add_item(CartItem::new("b", "B", 1.0));

        let ids: Vec<_> = cart.items().iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn checkout_empties_cart() {
        let mut cart = Cart::new();
        cart.add_item(CartItem::new("a", "A", 100.0).with_quantity(2));

        let totals = cart.checkout().expect("non-empty cart");
        assert!(approx(totals.subtotal, 200.0));
        assert!(approx(totals.total, 226.0));
        assert_eq!(totals.item_count, 2);
        assert!(cart.is_empty());
        assert_eq!(cart.checkout(), Err(CartError::Empty));
    }

    #[test]
    fn json_round_trip_preserves_items() {
        let mut cart = Cart::new();
        cart.add_item(
            CartItem::new("plan-pro", "Pro Plan", 99.0)
                .with_category("subscription")
                .with_duration("monthly"),
        );
        cart.add_item(CartItem::new("report", "Compliance Report", 250.0).with_quantity(3));

        let json = serde_json::to_string(&cart).expect("serialize");
        assert!(json.starts_with('['));
        let restored: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, cart);
    }
}
