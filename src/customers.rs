//! Customer directory.
//!
//! A read-only collection backing the customers listing. Like the catalog it
//! is sourced from an external feed and never mutated here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a customer feed.
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Malformed JSON customer feed.
    #[error("failed to parse customer feed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single customer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer identifier.
    pub id: u64,

    /// Full name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    #[serde(default)]
    pub phone: String,

    /// Postal address, as one display line.
    #[serde(default)]
    pub address: String,
}

/// Read-only customer collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    /// Create a directory from an already-parsed customer list.
    pub fn new(customers: impl Into<Vec<Customer>>) -> Self {
        Self {
            customers: customers.into(),
        }
    }

    /// Parse a directory from a JSON customer feed.
    ///
    /// # Errors
    ///
    /// - [`CustomerError::Json`]: the feed was not valid JSON for this shape.
    pub fn from_json_str(raw: &str) -> Result<Self, CustomerError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// All customers, in feed order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Look up a customer by id.
    pub fn get(&self, id: u64) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    /// Number of customers.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
