//! Transaction ledger.
//!
//! The ledger is the append-only history of completed orders. Entries are
//! immutable snapshots: line items and totals are copied out of the cart at
//! checkout time and never track later cart mutations. Newest entries come
//! first, matching the transactions view.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    cart::CartItem,
    checkout::{PaymentMethod, ShippingAddress},
    storage::{Storage, keys, load_or_default, persist},
};

/// Lifecycle state of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionStatus {
    /// Recorded but not settled.
    Pending,

    /// Settled.
    Completed,
}

/// A completed order, as recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Ledger identifier.
    pub id: String,

    /// Order identifier assigned at checkout.
    pub order_id: String,

    /// When the entry was recorded.
    pub created_at: Timestamp,

    /// Order total at submission time, in major units.
    pub total: Decimal,

    /// Number of units across all lines.
    pub item_count: u32,

    /// Shipping address captured from the checkout form.
    pub shipping_address: ShippingAddress,

    /// Payment method chosen at checkout.
    pub payment_method: PaymentMethod,

    /// Settlement status.
    pub status: TransactionStatus,

    /// Snapshot of the cart lines at submission time.
    pub line_items: Vec<CartItem>,
}

/// An order draft handed to the ledger by the checkout flow.
#[derive(Debug, Clone)]
pub struct Order {
    /// Order identifier; generated by the ledger when absent.
    pub order_id: Option<String>,

    /// Order total in major units.
    pub total: Decimal,

    /// Number of units across all lines.
    pub item_count: u32,

    /// Shipping address from the checkout form.
    pub shipping_address: ShippingAddress,

    /// Chosen payment method.
    pub payment_method: PaymentMethod,

    /// Snapshot of the cart lines.
    pub line_items: Vec<CartItem>,
}

/// Append-only record of completed orders.
#[derive(Debug)]
pub struct Ledger {
    entries: Vec<Transaction>,
    store: Arc<dyn Storage>,
}

impl Ledger {
    /// Restore the ledger persisted in `store`, or start empty.
    pub fn load(store: Arc<dyn Storage>) -> Self {
        let entries = load_or_default(store.as_ref(), keys::TRANSACTIONS);

        Self { entries, store }
    }

    /// Record a completed order and return the ledger entry.
    ///
    /// The entry reuses the draft's order id as its ledger id when present,
    /// otherwise a `TXN-` id is generated. Entries are prepended so the
    /// newest order is first.
    pub fn add(&mut self, order: Order) -> Transaction {
        let order_id = order
            .order_id
            .unwrap_or_else(|| format!("TXN-{}", Uuid::now_v7()));

        let entry = Transaction {
            id: order_id.clone(),
            order_id,
            created_at: Timestamp::now(),
            total: order.total,
            item_count: order.item_count,
            shipping_address: order.shipping_address,
            payment_method: order.payment_method,
            status: TransactionStatus::Completed,
            line_items: order.line_items,
        };

        tracing::info!(id = %entry.id, total = %entry.total, "recording transaction");

        self.entries.insert(0, entry.clone());
        persist(self.store.as_ref(), keys::TRANSACTIONS, &self.entries);

        entry
    }

    /// Look up an entry by ledger id or order id.
    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.entries
            .iter()
            .find(|entry| entry.id == id || entry.order_id == id)
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    /// Sum of totals across all entries.
    pub fn total_revenue(&self) -> Decimal {
        self.entries.iter().map(|entry| entry.total).sum()
    }

    /// Number of recorded entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Tally of (completed, pending) entries.
    pub fn status_counts(&self) -> (usize, usize) {
        let completed = self
            .entries
            .iter()
            .filter(|entry| entry.status == TransactionStatus::Completed)
            .count();

        (completed, self.entries.len() - completed)
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::MemoryStore;

    use super::*;

    fn address() -> ShippingAddress {
        ShippingAddress {
            name: String::from("Ada Lovelace"),
            email: String::from("ada@example.com"),
            phone: String::from("555-0100"),
            address: String::from("1 Analytical Way"),
            city: String::from("London"),
            state: String::from("LDN"),
            zip_code: String::from("EC1"),
            country: String::from("UK"),
        }
    }

    fn order(order_id: Option<&str>, total: Decimal) -> Order {
        Order {
            order_id: order_id.map(str::to_owned),
            total,
            item_count: 1,
            shipping_address: address(),
            payment_method: PaymentMethod::Card,
            line_items: Vec::new(),
        }
    }

    fn empty_ledger() -> Ledger {
        Ledger::load(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn add_reuses_order_id_and_marks_completed() {
        let mut ledger = empty_ledger();

        let entry = ledger.add(order(Some("ORD-1"), Decimal::TEN));

        assert_eq!(entry.id, "ORD-1");
        assert_eq!(entry.order_id, "ORD-1");
        assert_eq!(entry.status, TransactionStatus::Completed);
    }

    #[test]
    fn add_generates_txn_id_when_absent() {
        let mut ledger = empty_ledger();

        let entry = ledger.add(order(None, Decimal::TEN));

        assert!(entry.id.starts_with("TXN-"));
    }

    #[test]
    fn entries_are_newest_first() {
        let mut ledger = empty_ledger();

        ledger.add(order(Some("ORD-1"), Decimal::ONE));
        ledger.add(order(Some("ORD-2"), Decimal::TWO));

        let ids: Vec<&str> = ledger.entries().iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, vec!["ORD-2", "ORD-1"]);
    }

    #[test]
    fn get_matches_id_or_order_id() {
        let mut ledger = empty_ledger();

        ledger.add(order(Some("ORD-9"), Decimal::ONE));

        assert!(ledger.get("ORD-9").is_some());
        assert!(ledger.get("ORD-404").is_none());
    }

    #[test]
    fn total_revenue_sums_entry_totals() {
        let mut ledger = empty_ledger();

        ledger.add(order(Some("a"), Decimal::new(1000, 2)));
        ledger.add(order(Some("b"), Decimal::new(2550, 2)));
        ledger.add(order(Some("c"), Decimal::ZERO));

        assert_eq!(ledger.total_revenue(), Decimal::new(3550, 2));
        assert_eq!(ledger.count(), 3);
    }

    #[test]
    fn status_counts_tally_completed_entries() {
        let mut ledger = empty_ledger();

        ledger.add(order(Some("a"), Decimal::ONE));
        ledger.add(order(Some("b"), Decimal::ONE));

        assert_eq!(ledger.status_counts(), (2, 0));
    }

    #[test]
    fn ledger_persists_and_reloads() {
        let store = Arc::new(MemoryStore::new());

        let mut ledger = Ledger::load(Arc::clone(&store) as Arc<dyn Storage>);
        ledger.add(order(Some("ORD-1"), Decimal::new(4999, 2)));

        let restored = Ledger::load(store);

        assert_eq!(restored.count(), 1);
        assert_eq!(restored.total_revenue(), Decimal::new(4999, 2));
    }
}
