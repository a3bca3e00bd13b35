//! # Checkout
//!
//! Order total derivation, checkout form rules and order placement.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart Screen                                                            │
//! │    subtotal = cart.total()                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  OrderTotals::compute(subtotal, delivery_fee, tax_rate)                 │
//! │    tax         = subtotal × tax_rate          (exact, sub-cent)         │
//! │    grand_total = subtotal + delivery_fee + tax (exact, sub-cent)        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  breakdown() ──► rounded to cents for display ONLY                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Checkout Screen: address + phone + payment method                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  place_order() ──► validate ──► Order ──► cart.clear()                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Payment is not processed anywhere; the chosen method is recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::cart::CartStore;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, PreciseMoney};
use crate::orders::Order;
use crate::types::{PaymentMethod, TaxRate};
use crate::validation::{validate_max_len, validate_required};
use crate::{DEFAULT_DELIVERY_FEE_CENTS, DEFAULT_TAX_RATE_BPS};

/// Longest accepted delivery address, in characters.
pub const MAX_ADDRESS_LEN: usize = 200;

/// Longest accepted phone number, in characters.
pub const MAX_PHONE_LEN: usize = 32;

// =============================================================================
// Charges
// =============================================================================

/// Fees applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charges {
    pub delivery_fee: Money,
    pub tax_rate: TaxRate,
}

impl Default for Charges {
    /// $2.99 delivery, 10% tax.
    fn default() -> Self {
        Charges {
            delivery_fee: Money::from_cents(DEFAULT_DELIVERY_FEE_CENTS),
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Exact order totals.
///
/// ## Rounding Rule
/// Tax and grand total are held unrounded. The only rounding happens in
/// [`tax_display`](Self::tax_display),
/// [`grand_total_display`](Self::grand_total_display) and
/// [`breakdown`](Self::breakdown), half away from zero.
///
/// ```rust
/// use bitebox_core::checkout::OrderTotals;
/// use bitebox_core::money::Money;
/// use bitebox_core::types::TaxRate;
///
/// let totals = OrderTotals::compute(
///     Money::from_cents(1797),
///     Money::from_cents(299),
///     TaxRate::from_bps(1000),
/// );
/// // 17.97 + 2.99 + 1.797 = 22.757
/// assert_eq!(totals.grand_total().units(), 22_757_000);
/// assert_eq!(totals.grand_total_display().to_string(), "$22.76");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    subtotal: Money,
    delivery_fee: Money,
    tax_rate: TaxRate,
    tax: PreciseMoney,
    grand_total: PreciseMoney,
}

impl OrderTotals {
    /// `tax = subtotal × tax_rate`, `grand_total = subtotal + delivery_fee + tax`.
    pub fn compute(subtotal: Money, delivery_fee: Money, tax_rate: TaxRate) -> Self {
        let tax = subtotal.exact_tax(tax_rate);
        let grand_total = PreciseMoney::from(subtotal) + PreciseMoney::from(delivery_fee) + tax;

        OrderTotals {
            subtotal,
            delivery_fee,
            tax_rate,
            tax,
            grand_total,
        }
    }

    /// Totals for the current cart contents.
    pub fn for_cart(cart: &CartStore, charges: &Charges) -> Self {
        Self::compute(cart.total(), charges.delivery_fee, charges.tax_rate)
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Unrounded tax.
    pub fn tax(&self) -> PreciseMoney {
        self.tax
    }

    /// Unrounded grand total.
    pub fn grand_total(&self) -> PreciseMoney {
        self.grand_total
    }

    pub fn tax_display(&self) -> Money {
        self.tax.round_to_money()
    }

    pub fn grand_total_display(&self) -> Money {
        self.grand_total.round_to_money()
    }

    /// Display-ready amounts in whole cents.
    ///
    /// `total` is the rounded exact grand total, not the sum of the rounded
    /// parts.
    pub fn breakdown(&self) -> PriceBreakdown {
        PriceBreakdown {
            subtotal: self.subtotal,
            delivery_fee: self.delivery_fee,
            tax_rate: self.tax_rate,
            tax: self.tax_display(),
            total: self.grand_total_display(),
        }
    }
}

/// Order summary rows as shown on the cart and checkout screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Delivery details entered on the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    pub fn new(
        address: impl Into<String>,
        phone: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Self {
        CheckoutForm {
            address: address.into(),
            phone: phone.into(),
            payment_method,
        }
    }

    /// Address and phone must both be filled in.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("address", &self.address)?;
        validate_required("phone", &self.phone)?;
        validate_max_len("address", &self.address, MAX_ADDRESS_LEN)?;
        validate_max_len("phone", &self.phone, MAX_PHONE_LEN)?;
        Ok(())
    }
}

// =============================================================================
// Order Placement
// =============================================================================

/// Turns the cart into an order.
///
/// ## Steps
/// 1. Validate the form
/// 2. Reject an empty cart
/// 3. Compute totals with `charges`
/// 4. Build the order (status `Confirmed`, ETA `now + delivery_minutes`)
/// 5. Clear the cart
///
/// On any error the cart is left untouched.
pub fn place_order(
    cart: &mut CartStore,
    form: &CheckoutForm,
    charges: &Charges,
    delivery_minutes: u32,
    now: DateTime<Utc>,
) -> CoreResult<Order> {
    form.validate()?;

    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let totals = OrderTotals::for_cart(cart, charges);
    let order = Order::from_cart(cart, form, totals.breakdown(), now, delivery_minutes);

    cart.clear();

    info!(
        order_id = %order.id,
        items = order.items.len(),
        total = %order.breakdown.total,
        "order placed"
    );

    Ok(order)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MenuEntry;
    use crate::orders::OrderStatus;

    fn sample_cart() -> CartStore {
        let mut cart = CartStore::new();
        cart.add_item(&MenuEntry::new("A", "Burger", Money::from_cents(999)), 1);
        cart.add_item(&MenuEntry::new("B", "Fries", Money::from_cents(399)), 2);
        cart
    }

    fn valid_form() -> CheckoutForm {
        CheckoutForm::new("123 Main St", "+1 555 0100", PaymentMethod::Cash)
    }

    #[test]
    fn test_order_totals_example() {
        let totals = OrderTotals::compute(
            Money::from_cents(1797),
            Money::from_cents(299),
            TaxRate::from_bps(1000),
        );

        // tax = 1.797 exactly
        assert_eq!(totals.tax().units(), 1_797_000);
        // grand total = 22.757 exactly
        assert_eq!(totals.grand_total().units(), 22_757_000);
        assert_eq!(totals.grand_total_display().cents(), 2276);
        assert_eq!(totals.tax_display().cents(), 180);
    }

    #[test]
    fn test_half_cent_rounds_up_on_display() {
        let totals = OrderTotals::compute(Money::from_cents(5), Money::zero(), TaxRate::from_bps(1000));
        assert_eq!(totals.tax().units(), 5_000); // 0.5 cent
        assert_eq!(totals.grand_total().units(), 55_000); // 5.5 cents
        assert_eq!(totals.tax_display().cents(), 1);
        assert_eq!(totals.grand_total_display().cents(), 6);
    }

    #[test]
    fn test_zero_subtotal() {
        let totals = OrderTotals::compute(Money::zero(), Money::from_cents(299), TaxRate::from_bps(1000));
        assert_eq!(totals.tax_display(), Money::zero());
        assert_eq!(totals.grand_total_display().cents(), 299);
    }

    #[test]
    fn test_breakdown() {
        let totals = OrderTotals::for_cart(&sample_cart(), &Charges::default());
        let breakdown = totals.breakdown();

        assert_eq!(breakdown.subtotal.cents(), 1797);
        assert_eq!(breakdown.delivery_fee.cents(), 299);
        assert_eq!(breakdown.tax.cents(), 180);
        assert_eq!(breakdown.total.cents(), 2276);
        assert_eq!(breakdown.tax_rate.bps(), 1000);
    }

    #[test]
    fn test_form_requires_address_and_phone() {
        assert!(valid_form().validate().is_ok());

        let missing_address = CheckoutForm::new("  ", "555", PaymentMethod::Card);
        assert!(matches!(
            missing_address.validate(),
            Err(ValidationError::Required { field }) if field == "address"
        ));

        let missing_phone = CheckoutForm::new("123 Main St", "", PaymentMethod::Card);
        assert!(matches!(
            missing_phone.validate(),
            Err(ValidationError::Required { field }) if field == "phone"
        ));
    }

    #[test]
    fn test_form_length_caps() {
        let long_address = CheckoutForm::new("x".repeat(MAX_ADDRESS_LEN + 1), "555", PaymentMethod::Card);
        assert!(matches!(
            long_address.validate(),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn test_place_order_clears_cart() {
        let mut cart = sample_cart();
        let now = Utc::now();

        let order = place_order(&mut cart, &valid_form(), &Charges::default(), 45, now).unwrap();

        assert!(cart.is_empty());
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.breakdown.total.cents(), 2276);
        assert_eq!(order.payment_method, PaymentMethod::Cash);
        assert_eq!(order.placed_at, now);
        assert_eq!(order.estimated_delivery, now + chrono::Duration::minutes(45));
    }

    #[test]
    fn test_place_order_invalid_form_keeps_cart() {
        let mut cart = sample_cart();
        let form = CheckoutForm::new("", "", PaymentMethod::Card);

        let result = place_order(&mut cart, &form, &Charges::default(), 45, Utc::now());

        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_place_order_empty_cart() {
        let mut cart = CartStore::new();
        let result = place_order(&mut cart, &valid_form(), &Charges::default(), 45, Utc::now());
        assert!(matches!(result, Err(CoreError::EmptyCart)));
    }
}
