//! Checkout Demo
//!
//! Seeds a store with the demo users and catalog, fills a cart, runs the
//! checkout flow and prints the resulting ledger.
//!
//! Use `--delay-ms` to change the simulated processing delay
//! Use `--payment` to choose the payment method

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use tabled::{Table, Tabled};

use shopfront::{
    cart::Cart,
    checkout::{CheckoutDetails, CheckoutFlow, PaymentMethod},
    fixtures,
    ledger::Ledger,
    money::format_usd,
    storage::{MemoryStore, Storage, keys, persist},
};

/// Arguments for the checkout demo.
#[derive(Debug, Parser)]
struct Args {
    /// Simulated processing delay in milliseconds
    #[clap(long, default_value_t = 250)]
    delay_ms: u64,

    /// Payment method: card, paypal or cod
    #[clap(long, default_value = "card")]
    payment: String,
}

#[derive(Debug, Tabled)]
struct LedgerRow {
    #[tabled(rename = "Order")]
    order_id: String,

    #[tabled(rename = "Items")]
    items: u32,

    #[tabled(rename = "Total")]
    total: String,

    #[tabled(rename = "Status")]
    status: String,
}

/// Checkout Demo
#[expect(clippy::print_stdout, reason = "Example code")]
#[tokio::main]
pub async fn main() -> Result<()> {
    let args = Args::parse();

    let payment_method = match args.payment.as_str() {
        "paypal" => PaymentMethod::Paypal,
        "cod" => PaymentMethod::CashOnDelivery,
        _ => PaymentMethod::Card,
    };

    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    persist(store.as_ref(), keys::USERS, &fixtures::demo_users());

    let catalog = fixtures::demo_catalog()?;

    let mut cart = Cart::load(Arc::clone(&store));
    for product in catalog.products().iter().take(2) {
        cart.add_product(product);
    }

    println!(
        "Cart: {} items, total {}",
        cart.item_count(),
        format_usd(cart.total())
    );

    let details = CheckoutDetails {
        first_name: String::from("Demo"),
        last_name: String::from("User"),
        email: String::from("demo@example.com"),
        phone: String::from("555-0100"),
        address: String::from("1 Demo Street"),
        city: String::from("Springfield"),
        state: String::from("IL"),
        zip_code: String::from("62701"),
        country: String::from("USA"),
        payment_method,
        card_number: String::from("4111111111111111"),
        card_name: String::from("Demo User"),
        expiry_date: String::from("12/30"),
        cvv: String::from("123"),
    };

    let mut ledger = Ledger::load(Arc::clone(&store));
    let mut flow = CheckoutFlow::with_delay(Duration::from_millis(args.delay_ms));

    let entry = flow.submit(&details, &mut cart, &mut ledger).await?;

    println!("Order {} recorded", entry.order_id);
    println!("Cart is now empty: {}", cart.is_empty());

    let rows: Vec<LedgerRow> = ledger
        .entries()
        .iter()
        .map(|entry| LedgerRow {
            order_id: entry.order_id.clone(),
            items: entry.item_count,
            total: format_usd(entry.total),
            status: format!("{:?}", entry.status),
        })
        .collect();

    println!("{}", Table::new(rows));
    println!("Revenue: {}", format_usd(ledger.total_revenue()));

    Ok(())
}
