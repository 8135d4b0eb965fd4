//! Checkout flow.
//!
//! Checkout validates the shipping and payment form, then runs a single
//! simulated submission (a bounded delay standing in for a payment call).
//! On success it records the order in the ledger, clears the cart and hands
//! the new ledger entry back to the caller. Validation failures are data, not
//! faults: they come back as a field-keyed error map so the form can
//! re-render with messages.

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    cart::Cart,
    ledger::{Ledger, Order, Transaction},
};

/// Default simulated processing delay.
pub const PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// Validation errors keyed by form field.
pub type FieldErrors = FxHashMap<&'static str, String>;

/// Supported payment methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    /// Credit or debit card.
    #[default]
    Card,

    /// PayPal.
    Paypal,

    /// Pay on delivery.
    CashOnDelivery,
}

/// Postal address and contact captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Full recipient name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// State or region.
    pub state: String,

    /// Postal code.
    pub zip_code: String,

    /// Country.
    pub country: String,
}

/// The checkout form, as filled in by the user.
#[derive(Debug, Clone, Default)]
pub struct CheckoutDetails {
    /// Recipient first name.
    pub first_name: String,

    /// Recipient last name.
    pub last_name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// State or region.
    pub state: String,

    /// Postal code.
    pub zip_code: String,

    /// Country.
    pub country: String,

    /// Chosen payment method.
    pub payment_method: PaymentMethod,

    /// Card number; required only for [`PaymentMethod::Card`].
    pub card_number: String,

    /// Cardholder name; required only for [`PaymentMethod::Card`].
    pub card_name: String,

    /// Card expiry; required only for [`PaymentMethod::Card`].
    pub expiry_date: String,

    /// Card verification value; required only for [`PaymentMethod::Card`].
    pub cvv: String,
}

impl CheckoutDetails {
    /// Validate the form, returning an error message per offending field.
    ///
    /// An empty map means the form may be submitted. All shipping fields must
    /// be non-empty after trimming; the email must look like an address; card
    /// fields are required only when paying by card.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        let required: [(&'static str, &str, &str); 8] = [
            ("firstName", &self.first_name, "First name is required"),
            ("lastName", &self.last_name, "Last name is required"),
            ("phone", &self.phone, "Phone is required"),
            ("address", &self.address, "Address is required"),
            ("city", &self.city, "City is required"),
            ("state", &self.state, "State is required"),
            ("zipCode", &self.zip_code, "Zip code is required"),
            ("country", &self.country, "Country is required"),
        ];

        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field, message.to_owned());
            }
        }

        if self.email.trim().is_empty() {
            errors.insert("email", String::from("Email is required"));
        } else if !is_valid_email(&self.email) {
            errors.insert("email", String::from("Email is invalid"));
        }

        if self.payment_method == PaymentMethod::Card {
            let card_required: [(&'static str, &str, &str); 4] = [
                ("cardNumber", &self.card_number, "Card number is required"),
                ("cardName", &self.card_name, "Cardholder name is required"),
                ("expiryDate", &self.expiry_date, "Expiry date is required"),
                ("cvv", &self.cvv, "CVV is required"),
            ];

            for (field, value, message) in card_required {
                if value.trim().is_empty() {
                    errors.insert(field, message.to_owned());
                }
            }
        }

        errors
    }

    /// The shipping address this form describes.
    pub fn shipping_address(&self) -> ShippingAddress {
        ShippingAddress {
            name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state.trim().to_owned(),
            zip_code: self.zip_code.trim().to_owned(),
            country: self.country.trim().to_owned(),
        }
    }
}

/// Whether `email` contains a `local@host.tld` shaped run of characters.
pub(crate) fn is_valid_email(email: &str) -> bool {
    let chars: Vec<char> = email.chars().collect();

    chars.iter().enumerate().any(|(at, c)| {
        if *c != '@' {
            return false;
        }

        let local_ok = at
            .checked_sub(1)
            .and_then(|i| chars.get(i))
            .is_some_and(|prev| !prev.is_whitespace());

        if !local_ok {
            return false;
        }

        // The maximal non-whitespace run after the '@' must contain an
        // interior dot.
        let run: Vec<char> = chars
            .iter()
            .skip(at + 1)
            .take_while(|ch| !ch.is_whitespace())
            .copied()
            .collect();

        run.iter()
            .enumerate()
            .any(|(i, ch)| *ch == '.' && i > 0 && i + 1 < run.len())
    })
}

/// Errors that abort a checkout submission.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The form failed validation; the map holds a message per field.
    #[error("checkout form failed validation")]
    Validation(FieldErrors),

    /// There is nothing in the cart to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A submission is already in flight.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
}

/// Observable states of the checkout flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckoutState {
    /// Collecting shipping and payment fields.
    #[default]
    Editing,

    /// A submission is in flight.
    Submitting,
}

/// The validated transition from a cart to a ledger entry.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
    processing_delay: Option<Duration>,
}

/// Restores [`CheckoutState::Editing`] when a submission finishes or its
/// future is dropped mid-flight.
struct EditingGuard<'a>(&'a mut CheckoutState);

impl Drop for EditingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = CheckoutState::Editing;
    }
}

impl CheckoutFlow {
    /// Create a flow with the default processing delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flow with a custom processing delay. Tests pass
    /// [`Duration::ZERO`].
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            state: CheckoutState::Editing,
            processing_delay: Some(delay),
        }
    }

    /// Current flow state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Validate the form and run the simulated submission.
    ///
    /// On success exactly one ledger entry is recorded, the cart is cleared
    /// and the entry is returned. Dropping the returned future during the
    /// delay leaves the cart and ledger untouched and the flow back in
    /// [`CheckoutState::Editing`].
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::SubmissionInFlight`]: a submission is already
    ///   running; the submit control is disabled while in flight.
    /// - [`CheckoutError::EmptyCart`]: the cart has no lines.
    /// - [`CheckoutError::Validation`]: one or more form fields are invalid;
    ///   no partial submission occurs.
    pub async fn submit(
        &mut self,
        details: &CheckoutDetails,
        cart: &mut Cart,
        ledger: &mut Ledger,
    ) -> Result<Transaction, CheckoutError> {
        if self.state == CheckoutState::Submitting {
            return Err(CheckoutError::SubmissionInFlight);
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let errors = details.validate();
        if !errors.is_empty() {
            return Err(CheckoutError::Validation(errors));
        }

        let delay = self.processing_delay.unwrap_or(PROCESSING_DELAY);
        self.state = CheckoutState::Submitting;
        let guard = EditingGuard(&mut self.state);

        tokio::time::sleep(delay).await;

        let order = Order {
            order_id: Some(format!("ORD-{}", Uuid::now_v7())),
            total: cart.total(),
            item_count: cart.item_count(),
            shipping_address: details.shipping_address(),
            payment_method: details.payment_method,
            line_items: cart.items().to_vec(),
        };

        let entry = ledger.add(order);
        cart.clear();
        drop(guard);

        tracing::info!(order_id = %entry.order_id, "checkout completed");

        Ok(entry)
    }
}
