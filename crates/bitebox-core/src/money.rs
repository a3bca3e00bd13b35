//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing menu prices as binary floats:                                  │
//! │    9.99 + 3.99 + 3.99 = 17.970000000000002  ❌ WRONG!                   │
//! │                                                                         │
//! │  Repeated "add to cart" taps compound the error before the UI           │
//! │  rounds it away with toFixed(2).                                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    999 + 399 + 399 = 1797 cents, exactly, every time                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Precisions
//! - [`Money`]: whole cents. Prices, line totals, cart totals, fees.
//! - [`PreciseMoney`]: 1/10000 of a cent. Used while deriving tax and grand
//!   totals so that nothing is rounded before display.
//!
//! ## Usage
//! ```rust
//! use bitebox_core::money::Money;
//!
//! let burger = Money::from_cents(999); // $9.99
//! let two_burgers = burger * 2u32;      // $19.98
//! assert_eq!(two_burgers.cents(), 1998);
//! assert_eq!(two_burgers.to_string(), "$19.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

/// Number of [`PreciseMoney`] units in one cent.
///
/// Basis points divide by 10 000, so any `cents × bps` product is exact at
/// this scale.
pub const PRECISE_UNITS_PER_CENT: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  MenuEntry.price ──► CartLine.unit_price ──► CartLine.line_total        │
/// │                                                    │                    │
/// │                                                    ▼                    │
/// │                        CartStore.total ──► OrderTotals.subtotal         │
/// │                                                    │                    │
/// │                   Charges.delivery_fee ────────────┤                    │
/// │                                                    ▼                    │
/// │                                   PreciseMoney grand total              │
/// │                                                    │                    │
/// │                                                    ▼                    │
/// │                                 rounded to Money only for display       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Arithmetic saturates at the `i64` bounds, so a cart total never wraps
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use bitebox_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -$5.50.
    ///
    /// ```rust
    /// use bitebox_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(12, 99).cents(), 1299);
    /// assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use bitebox_core::money::Money;
    ///
    /// let fries = Money::from_cents(399); // $3.99
    /// assert_eq!(fries.multiply_quantity(2).cents(), 798);
    /// ```
    ///
    /// Saturates at the `i64` bounds instead of overflowing.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    /// Computes tax on this amount WITHOUT rounding.
    ///
    /// The result is exact: `cents × bps` is already expressed in
    /// 1/10000-cent units.
    ///
    /// ```rust
    /// use bitebox_core::money::Money;
    /// use bitebox_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(1797);           // $17.97
    /// let tax = subtotal.exact_tax(TaxRate::from_bps(1000)); // 10%
    /// // $1.797 is kept as-is; display rounds it to $1.80
    /// assert_eq!(tax.units(), 1_797_000);
    /// assert_eq!(tax.round_to_money().cents(), 180);
    /// ```
    pub fn exact_tax(&self, rate: TaxRate) -> PreciseMoney {
        PreciseMoney(self.0 as i128 * rate.bps() as i128)
    }
}

/// Display shows money as `$D.CC`.
///
/// Debugging and console output only. Locale-aware formatting belongs to the
/// app's config (`format_currency`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Precise Money
// =============================================================================

/// A monetary value in 1/10000 of a cent.
///
/// ## Why Another Type?
/// Tax at a basis-point rate produces fractions of a cent. Rounding the tax
/// first and then adding it to the grand total can drift by a cent from
/// rounding the exact sum once. `PreciseMoney` carries the exact value
/// through the arithmetic and is only rounded by [`round_to_money`].
///
/// ```text
/// subtotal 17.97 + fee 2.99 + tax 1.797 = 22.757 ──round──► 22.76
/// ```
///
/// [`round_to_money`]: PreciseMoney::round_to_money
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PreciseMoney(i128);

impl PreciseMoney {
    /// Lifts a whole-cent amount into precise units.
    #[inline]
    pub const fn from_money(money: Money) -> Self {
        PreciseMoney(money.cents() as i128 * PRECISE_UNITS_PER_CENT)
    }

    #[inline]
    pub const fn from_units(units: i128) -> Self {
        PreciseMoney(units)
    }

    /// Raw value in 1/10000-cent units.
    #[inline]
    pub const fn units(&self) -> i128 {
        self.0
    }

    /// Rounds to whole cents, half away from zero. Clamps to the `Money`
    /// range.
    ///
    /// ```rust
    /// use bitebox_core::money::PreciseMoney;
    ///
    /// assert_eq!(PreciseMoney::from_units(22_757_000).round_to_money().cents(), 2276);
    /// assert_eq!(PreciseMoney::from_units(5_000).round_to_money().cents(), 1);
    /// assert_eq!(PreciseMoney::from_units(4_999).round_to_money().cents(), 0);
    /// assert_eq!(PreciseMoney::from_units(-5_000).round_to_money().cents(), -1);
    /// ```
    pub fn round_to_money(&self) -> Money {
        let whole = self.0 / PRECISE_UNITS_PER_CENT;
        let remainder = self.0 % PRECISE_UNITS_PER_CENT;
        let half = PRECISE_UNITS_PER_CENT / 2;

        let rounded = if remainder >= half {
            whole + 1
        } else if remainder <= -half {
            whole - 1
        } else {
            whole
        };

        let cents = i64::try_from(rounded).unwrap_or(if rounded < 0 {
            i64::MIN
        } else {
            i64::MAX
        });
        Money::from_cents(cents)
    }
}

impl From<Money> for PreciseMoney {
    fn from(money: Money) -> Self {
        PreciseMoney::from_money(money)
    }
}

impl Add for PreciseMoney {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        PreciseMoney(self.0.saturating_add(other.0))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
