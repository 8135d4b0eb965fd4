//! Fixtures
//!
//! Seed data for demos and integration tests: a small catalog (parsed from
//! the embedded YAML document), a registered-users list, customers and
//! reviews.

use jiff::civil::date;

use crate::{
    auth::UserRecord,
    catalog::{Catalog, CatalogError},
    customers::{Customer, CustomerDirectory},
    reviews::Review,
};

/// The embedded demo catalog.
///
/// # Errors
///
/// Returns a [`CatalogError`] if the embedded document fails to parse, which
/// would indicate a broken fixture.
pub fn demo_catalog() -> Result<Catalog, CatalogError> {
    Catalog::from_yaml_str(include_str!("fixtures/catalog.yaml"))
}

/// A registered-users list with one known account.
///
/// The password is plaintext on purpose; see the `auth` module docs.
pub fn demo_users() -> Vec<UserRecord> {
    vec![UserRecord {
        id: String::from("demo-1"),
        name: String::from("Demo User"),
        email: String::from("demo@example.com"),
        password: String::from("password"),
    }]
}

/// A small customer directory.
pub fn demo_customers() -> CustomerDirectory {
    CustomerDirectory::new([
        Customer {
            id: 1,
            name: String::from("Terry Medhurst"),
            email: String::from("atuny0@sohu.com"),
            phone: String::from("+63 791 675 8914"),
            address: String::from("1745 T Street Southeast, Washington"),
        },
        Customer {
            id: 2,
            name: String::from("Sheldon Quigley"),
            email: String::from("hbingley1@plala.or.jp"),
            phone: String::from("+7 813 117 7139"),
            address: String::from("6007 Applegate Lane, Louisville"),
        },
        Customer {
            id: 3,
            name: String::from("Terrill Hills"),
            email: String::from("rshawe2@51.la"),
            phone: String::from("+63 739 292 7942"),
            address: String::from("560 Penstock Drive, Grass Valley"),
        },
    ])
}

/// A handful of product reviews.
pub fn demo_reviews() -> Vec<Review> {
    vec![
        Review::new(
            1,
            "Wireless Earbuds",
            "John Smith",
            5,
            "Excellent product! Great sound quality and comfortable to wear.",
            date(2024, 1, 15),
        ),
        Review::new(
            2,
            "Wireless Earbuds",
            "Sarah Johnson",
            4,
            "Good value for money. Battery life could be better.",
            date(2024, 1, 14),
        ),
        Review::new(
            3,
            "Ergonomic Office Chair",
            "Mike Chen",
            5,
            "Perfect for my home office setup. Very sturdy and adjustable.",
            date(2024, 1, 13),
        ),
        Review::new(
            4,
            "Mechanical Keyboard",
            "Priya Patel",
            3,
            "Decent keyboard but the space bar feels a bit loose.",
            date(2024, 1, 12),
        ),
    ]
}
