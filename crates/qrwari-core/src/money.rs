//! # Money Module
//!
//! Provides the `Money` type for handling baht amounts exactly.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  When splitting a bill:                                                 │
//! │    ฿100.00 / 3 = ฿33.33 (×3 = ฿99.99)  → Lost ฿0.01!                   │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimals + explicit rounding                     │
//! │    100.00 / 3 = 33.3333333333 (10 digits, half-up)                     │
//! │    round to cents only at the end, then hand the lost satang           │
//! │    to exactly one person (see split.rs)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use qrwari_core::money::Money;
//!
//! let bill = Money::from_cents(10000); // ฿100.00
//! let share = bill.share_of(std::num::NonZeroUsize::new(3).unwrap());
//! assert_eq!(share.round_half_up().to_plain_string(), "33.33");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::num::NonZeroUsize;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::SHARE_SCALE;

/// Fractional digits of a settled amount (satang).
const CENT_SCALE: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A signed baht amount backed by an exact decimal.
///
/// ## Design Decisions
/// - **Signed**: negative amounts model discounts and flow through the same
///   arithmetic as charges
/// - **Unbounded scale**: intermediate shares keep 10 fractional digits;
///   only [`Money::round_half_up`] produces a settled 2-digit amount
/// - **Serialized as a string**: `"123.45"`, never a JSON float
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from satang (1/100 baht).
    ///
    /// ## Example
    /// ```rust
    /// use qrwari_core::money::Money;
    ///
    /// let price = Money::from_cents(12345);
    /// assert_eq!(price.to_plain_string(), "123.45");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, CENT_SCALE))
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero (at any scale).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Rounds to exactly 2 fractional digits, half away from zero.
    ///
    /// The result always carries scale 2, so `50` becomes `50.00`.
    ///
    /// ## Example
    /// ```rust
    /// use qrwari_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::new(Decimal::new(33335, 3)); // 33.335
    /// assert_eq!(m.round_half_up().to_string(), "฿33.34");
    /// ```
    pub fn round_half_up(&self) -> Self {
        self.round_to(CENT_SCALE)
    }

    /// Rounds to `scale` fractional digits, half away from zero, padding
    /// with zeros when the value has fewer digits.
    pub fn round_to(&self, scale: u32) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(scale);
        Money(rounded)
    }

    /// Adds, returning `None` if the result does not fit in a `Decimal`.
    #[inline]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtracts, returning `None` if the result does not fit in a `Decimal`.
    #[inline]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Divides into `parts` equal shares kept at 10 fractional digits.
    ///
    /// ## Example
    /// ```rust
    /// use qrwari_core::money::Money;
    /// use std::num::NonZeroUsize;
    ///
    /// let share = Money::from_cents(10000).share_of(NonZeroUsize::new(3).unwrap());
    /// assert_eq!(share.amount().to_string(), "33.3333333333");
    /// ```
    pub fn share_of(&self, parts: NonZeroUsize) -> Self {
        Money(self.0 / Decimal::from(parts.get())).round_to(SHARE_SCALE)
    }

    /// Renders as a plain decimal string with exactly 2 fractional digits,
    /// rounding half-up if needed (`"123.45"`, `"-5.00"`).
    pub fn to_plain_string(&self) -> String {
        self.round_half_up().0.to_string()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the settled amount with the baht sign.
///
/// ## Note
/// For debugging and CLI output. A UI should format with its own locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settled = self.round_half_up();
        let sign = if settled.is_negative() { "-" } else { "" };
        write!(f, "{}฿{}", sign, settled.0.abs())
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Parses `"123.45"`, `"-20"`, etc.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: e.to_string(),
            })
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
