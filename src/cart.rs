//! Shopping cart.
//!
//! The cart is an ordered list of line items keyed by product id. Adding an id
//! that is already present merges into the existing line instead of appending
//! a duplicate. Every mutation persists the full snapshot to the injected
//! store; totals are derived on demand and never cached.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    catalog::Product,
    storage::{Storage, keys, load_or_default, persist},
};

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product identifier, unique within the cart.
    pub id: u64,

    /// Display title, copied from the product at add time.
    pub title: String,

    /// Unit price at add time, in major units.
    pub unit_price: Decimal,

    /// Thumbnail URI.
    pub thumbnail: String,

    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl CartItem {
    /// Line subtotal: unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The user's in-progress collection of intended purchases.
#[derive(Debug)]
pub struct Cart {
    items: SmallVec<[CartItem; 8]>,
    store: Arc<dyn Storage>,
}

impl Cart {
    /// Restore the cart persisted in `store`, or start empty.
    pub fn load(store: Arc<dyn Storage>) -> Self {
        let items = load_or_default(store.as_ref(), keys::CART);

        Self { items, store }
    }

    /// Add a line to the cart.
    ///
    /// If a line with the same id already exists its quantity is incremented
    /// by the incoming quantity; the existing title, price and thumbnail are
    /// kept. Otherwise the line is appended as-is.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity += item.quantity;
        } else {
            tracing::debug!(id = item.id, title = %item.title, "adding new cart line");
            self.items.push(item);
        }

        self.save();
    }

    /// Add one unit of a catalog product, copying the fields the cart keeps.
    pub fn add_product(&mut self, product: &Product) {
        self.add_item(CartItem {
            id: product.id,
            title: product.title.clone(),
            unit_price: product.price,
            thumbnail: product.thumbnail.clone(),
            quantity: 1,
        });
    }

    /// Remove the line with the given id. Absent ids are a no-op.
    pub fn remove_item(&mut self, id: u64) {
        self.items.retain(|line| line.id != id);
        self.save();
    }

    /// Set the quantity of the line with the given id.
    ///
    /// A quantity of zero removes the line, matching [`Cart::remove_item`].
    /// Absent ids are a no-op.
    pub fn set_quantity(&mut self, id: u64, quantity: u32) {
        if quantity == 0 {
            self.remove_item(id);
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity;
            self.save();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.save();
    }

    /// Current lines, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of unit price times quantity across all lines.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn save(&self) {
        persist(self.store.as_ref(), keys::CART, &self.items);
    }
}
