//! Cart state and its transitions.

use serde::{Deserialize, Serialize};
use storefront_core::Product;

/// One cart line: a product snapshot and how many of it.
///
/// The snapshot is the product as it looked when first added; a later
/// catalog change does not rewrite carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product id; doubles as the item's identity within the cart.
    pub id: u64,
    /// Always at least 1; a cart never holds zero of something.
    pub quantity: u32,
    /// Snapshot of the product at first add.
    pub product: Product,
}

/// The cart: an ordered list of items, one per distinct product id,
/// ordered by first add.
///
/// Serializes as a bare JSON array of items, which is exactly the document
/// the durable store keeps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// The items, in first-add order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds one unit of `product`: increments the existing line or appends
    /// a new one with quantity 1.
    pub fn add(&mut self, product: Product) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity += 1;
        } else {
            self.items.push(CartItem {
                id: product.id,
                quantity: 1,
                product,
            });
        }
    }

    /// Drops the line with `product_id`, if present.
    pub fn remove(&mut self, product_id: u64) {
        self.items.retain(|item| item.id != product_id);
    }

    /// Sets the quantity of the line with `product_id`.
    ///
    /// A quantity below 1 is rejected as a no-op: removal is a distinct
    /// operation, not a zero-quantity update. Unknown ids are ignored.
    pub fn set_quantity(&mut self, product_id: u64, quantity: u32) {
        if quantity < 1 {
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * quantity` over all lines.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.product.price * f64::from(item.quantity))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Rating;

    fn product(id: u64, price: f64) -> Product {
        Product {
            id,
            title: format!("product {id}"),
            price,
            description: String::new(),
            category: "test".into(),
            image: String::new(),
            rating: Rating {
                rate: 0.0,
                count: 0,
            },
        }
    }

    #[test]
    fn adding_twice_increments_quantity() {
        let mut cart = CartState::default();
        cart.add(product(7, 10.0));
        cart.add(product(7, 10.0));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn items_keep_first_add_order() {
        let mut cart = CartState::default();
        cart.add(product(2, 1.0));
        cart.add(product(9, 1.0));
        cart.add(product(2, 1.0));
        let ids: Vec<u64> = cart.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![2, 9]);
    }

    #[test]
    fn zero_quantity_update_is_rejected() {
        let mut cart = CartState::default();
        cart.add(product(7, 10.0));
        cart.add(product(7, 10.0));
        cart.set_quantity(7, 0);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn valid_quantity_update_applies() {
        let mut cart = CartState::default();
        cart.add(product(7, 10.0));
        cart.set_quantity(7, 5);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn unknown_id_update_is_ignored() {
        let mut cart = CartState::default();
        cart.add(product(7, 10.0));
        cart.set_quantity(8, 3);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn remove_then_total_is_zero() {
        let mut cart = CartState::default();
        cart.add(product(7, 12.5));
        cart.remove(7);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn removing_unknown_id_is_a_noop() {
        let mut cart = CartState::default();
        cart.add(product(7, 10.0));
        cart.remove(99);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let mut cart = CartState::default();
        cart.add(product(1, 2.5));
        cart.add(product(1, 2.5));
        cart.add(product(2, 10.0));
        assert!((cart.total() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn serializes_as_a_bare_item_array() {
        let mut cart = CartState::default();
        cart.add(product(1, 2.5));
        let json: serde_json::Value = serde_json::to_value(&cart).expect("serialize");
        assert!(json.is_array());
        assert_eq!(json[0]["quantity"], 1);
    }
}
