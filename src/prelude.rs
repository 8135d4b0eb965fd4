//! Shopfront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{
        AuthContext, AuthError, User, UserDirectory, UserRecord,
        reset::{DEMO_VERIFICATION_CODE, PasswordResetFlow, ResetError, ResetStage},
    },
    cart::{Cart, CartItem},
    catalog::{Catalog, CatalogError, Product},
    checkout::{
        CheckoutDetails, CheckoutError, CheckoutFlow, CheckoutState, FieldErrors, PaymentMethod,
        ShippingAddress,
    },
    customers::{Customer, CustomerDirectory, CustomerError},
    ledger::{Ledger, Order, Transaction, TransactionStatus},
    query::{
        ALL, FieldAccessor, SortDirection, filter_by_field, filter_by_search, paginate,
        sort_by_key, total_pages,
    },
    settings::{Language, Preferences, Profile, Settings, Theme},
    storage::{JsonFileStore, MemoryStore, Storage, StorageError, keys},
};
