//! Shopfront
//!
//! Shopfront is the client-side core of a small e-commerce administration
//! dashboard: a storage-backed cart, a validated checkout flow feeding an
//! append-only transaction ledger, an authentication context with a
//! password-reset machine, and the pure list-query helpers the listing views
//! share. State containers are constructed explicitly around an injected
//! [`storage::Storage`] and restore themselves from it at initialization.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customers;
pub mod fixtures;
pub mod ledger;
pub mod money;
pub mod prelude;
pub mod query;
pub mod reviews;
pub mod settings;
pub mod storage;
