//! In-memory cart store.
//!
//! Pure state, no I/O. Line items are keyed by `product_id` and keep the
//! order they were first added in; totals are recomputed on every read
//! since carts stay small.

use parking_lot::Mutex;
use rust_decimal::Decimal;

use leafplate_api::objects::catalog::Product;
use leafplate_api::objects::orders::{OrderLine, OrderRequest};

/// One cart line. Invariant: `quantity >= 1`; a line reaching zero is
/// removed, never retained.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// Shared cart state. All methods take `&self`; the store is meant to be
/// held in an `Arc` and handed to whatever needs it.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Mutex<Vec<CartItem>>,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`: increment the existing line or append a
    /// new one with quantity 1.
    pub fn add(&self, product: &Product) {
        let mut items = self.items.lock();
        match items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => item.quantity += 1,
            None => items.push(CartItem {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
            }),
        }
    }

    /// Set a line's quantity. Zero removes the line; an absent
    /// `product_id` is a no-op.
    pub fn update_quantity(&self, product_id: i64, quantity: u32) {
        let mut items = self.items.lock();
        if quantity == 0 {
            items.retain(|i| i.product_id != product_id);
            return;
        }
        if let Some(item) = items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Remove a line if present.
    pub fn remove(&self, product_id: i64) {
        self.items.lock().retain(|i| i.product_id != product_id);
    }

    /// Empty the cart.
    pub fn clear(&self) {
        self.items.lock().clear();
    }

    /// Sum of `price × quantity` over all lines.
    pub fn total(&self) -> Decimal {
        self.items
            .lock()
            .iter()
            .map(|i| i.price * Decimal::from(i.quantity))
            .sum()
    }

    /// Sum of quantities over all lines.
    pub fn count(&self) -> u32 {
        self.items.lock().iter().map(|i| i.quantity).sum()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Snapshot of the current lines, in insertion order.
    pub fn items(&self) -> Vec<CartItem> {
        self.items.lock().clone()
    }

    /// Build the order-creation payload for the current contents.
    pub fn order_request(&self) -> OrderRequest {
        let items = self.items.lock();
        OrderRequest {
            total_amount: items
                .iter()
                .map(|i| i.price * Decimal::from(i.quantity))
                .sum(),
            items: items
                .iter()
                .map(|i| OrderLine {
                    product_id: i.product_id,
                    quantity: i.quantity,
                })
                .collect(),
        }
    }
}
