//! End-to-end checkout: cart mutations, validation, submission, ledger
//! bookkeeping and persistence through the file-backed store.

use std::{sync::Arc, time::Duration};

use rust_decimal::Decimal;
use testresult::TestResult;

use shopfront::{
    cart::Cart,
    checkout::{CheckoutDetails, CheckoutError, CheckoutFlow, PaymentMethod},
    fixtures,
    ledger::Ledger,
    storage::{JsonFileStore, MemoryStore, Storage, keys},
};

fn filled_form() -> CheckoutDetails {
    CheckoutDetails {
        first_name: String::from("Demo"),
        last_name: String::from("User"),
        email: String::from("demo@example.com"),
        phone: String::from("555-0100"),
        address: String::from("1 Demo Street"),
        city: String::from("Springfield"),
        state: String::from("IL"),
        zip_code: String::from("62701"),
        country: String::from("USA"),
        payment_method: PaymentMethod::Card,
        card_number: String::from("4111111111111111"),
        card_name: String::from("Demo User"),
        expiry_date: String::from("12/30"),
        cvv: String::from("123"),
    }
}

#[tokio::test]
async fn catalog_to_ledger_round_trip() -> TestResult {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let catalog = fixtures::demo_catalog()?;

    let mut cart = Cart::load(Arc::clone(&store));

    let Some(phone) = catalog.get(1) else {
        panic!("fixture product missing");
    };
    let Some(laptop) = catalog.get(3) else {
        panic!("fixture product missing");
    };

    cart.add_product(phone);
    cart.add_product(phone);
    cart.add_product(laptop);

    assert_eq!(cart.len(), 2, "duplicate ids merge into one line");
    assert_eq!(cart.item_count(), 3);

    let expected_total = phone.price * Decimal::TWO + laptop.price;
    assert_eq!(cart.total(), expected_total);

    let mut ledger = Ledger::load(Arc::clone(&store));
    let mut flow = CheckoutFlow::with_delay(Duration::ZERO);

    let entry = flow.submit(&filled_form(), &mut cart, &mut ledger).await?;

    assert_eq!(entry.total, expected_total);
    assert_eq!(entry.line_items.len(), 2);
    assert_eq!(entry.shipping_address.name, "Demo User");
    assert_eq!(ledger.count(), 1);
    assert!(cart.is_empty());

    // The entry is a snapshot: later cart activity must not touch it.
    cart.add_product(phone);

    let Some(recorded) = ledger.get(&entry.order_id) else {
        panic!("ledger entry vanished");
    };
    assert_eq!(recorded.total, expected_total);
    assert_eq!(recorded.line_items.len(), 2);

    Ok(())
}

#[tokio::test]
async fn missing_field_aborts_without_side_effects() -> TestResult {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let catalog = fixtures::demo_catalog()?;

    let mut cart = Cart::load(Arc::clone(&store));
    if let Some(product) = catalog.get(2) {
        cart.add_product(product);
    }

    let mut ledger = Ledger::load(Arc::clone(&store));
    let mut flow = CheckoutFlow::with_delay(Duration::ZERO);

    let mut form = filled_form();
    form.zip_code = String::new();
    form.email = String::from("not an email");

    let result = flow.submit(&form, &mut cart, &mut ledger).await;

    match result {
        Err(CheckoutError::Validation(errors)) => {
            assert!(errors.contains_key("zipCode"));
            assert_eq!(
                errors.get("email").map(String::as_str),
                Some("Email is invalid")
            );
        }
        other => panic!("expected a validation failure, got {other:?}"),
    }

    assert_eq!(ledger.count(), 0);
    assert_eq!(cart.item_count(), 1, "cart is untouched");

    Ok(())
}

#[tokio::test]
async fn state_survives_a_restart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let catalog = fixtures::demo_catalog()?;

    let expected_total = {
        let store: Arc<dyn Storage> = Arc::new(JsonFileStore::open(dir.path())?);

        let mut cart = Cart::load(Arc::clone(&store));
        if let Some(product) = catalog.get(4) {
            cart.add_product(product);
            cart.set_quantity(product.id, 3);
        }

        let mut ledger = Ledger::load(Arc::clone(&store));
        let mut flow = CheckoutFlow::with_delay(Duration::ZERO);
        flow.submit(&filled_form(), &mut cart, &mut ledger).await?;

        ledger.total_revenue()
    };

    // A fresh process restores the ledger and the (now empty) cart.
    let store: Arc<dyn Storage> = Arc::new(JsonFileStore::open(dir.path())?);

    let cart = Cart::load(Arc::clone(&store));
    let ledger = Ledger::load(Arc::clone(&store));

    assert!(cart.is_empty());
    assert_eq!(ledger.count(), 1);
    assert_eq!(ledger.total_revenue(), expected_total);

    Ok(())
}

#[tokio::test]
async fn malformed_persisted_cart_falls_back_to_empty() -> TestResult {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    store.write(keys::CART, "not even json")?;

    let cart = Cart::load(Arc::clone(&store));

    assert!(cart.is_empty());

    Ok(())
}

#[tokio::test]
async fn revenue_sums_across_submissions() -> TestResult {
    let store: Arc<dyn Storage> = Arc::new(MemoryStore::new());
    let catalog = fixtures::demo_catalog()?;

    let mut cart = Cart::load(Arc::clone(&store));
    let mut ledger = Ledger::load(Arc::clone(&store));
    let mut flow = CheckoutFlow::with_delay(Duration::ZERO);
    let form = filled_form();

    let mut expected = Decimal::ZERO;
    for id in [1, 2] {
        if let Some(product) = catalog.get(id) {
            cart.add_product(product);
            expected += product.price;
        }

        flow.submit(&form, &mut cart, &mut ledger).await?;
    }

    assert_eq!(ledger.count(), 2);
    assert_eq!(ledger.total_revenue(), expected);
    assert_eq!(ledger.status_counts(), (2, 0));

    Ok(())
}
