//! # Money Module
//!
//! Fixed-point value types: [`Money`] (integer cents) and [`Percentage`]
//! (integer basis points).
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    33.33 * 0.18 = 5.999399999999999  ❌ rounding depends on noise       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer cents and basis points                           │
//! │    3333 cents * 1800 bps / 10000 = 599.94 cents → 600 (half-up)        │
//! │    Every stored amount has exactly two decimals                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tipsplit_core::money::{Money, Percentage};
//!
//! let bill = Money::from_cents(10000);        // 100.00
//! let tip = bill.percentage(Percentage::from_bps(2000)); // 20%
//! assert_eq!(tip.cents(), 2000);               // 20.00
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use ts_rs::TS;

/// Basis points in one whole (100.00%).
pub const BPS_PER_WHOLE: i64 = 10_000;

// =============================================================================
// Rounding
// =============================================================================

/// Integer division rounding half away from zero.
///
/// This is the "standard" rounding used for every stored amount:
/// `0.5 → 1`, `1.5 → 2`, `2.5 → 3`.
///
/// `denominator` must be positive.
///
/// ```rust
/// use tipsplit_core::money::div_round_half_up;
///
/// assert_eq!(div_round_half_up(599_940, 1_000), 600);
/// assert_eq!(div_round_half_up(5, 2), 3);
/// assert_eq!(div_round_half_up(-5, 2), -3);
/// ```
pub fn div_round_half_up(numerator: i128, denominator: i128) -> i128 {
    debug_assert!(denominator > 0, "denominator must be positive");

    if numerator >= 0 {
        (2 * numerator + denominator) / (2 * denominator)
    } else {
        -((-2 * numerator + denominator) / (2 * denominator))
    }
}

/// Rounds a decimal half-up to two places and returns it scaled by 100.
///
/// Returns `None` when the value does not fit in an `i64`.
fn decimal_to_hundredths(value: Decimal) -> Option<i64> {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.checked_mul(Decimal::ONE_HUNDRED)?.trunc().to_i64()
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never needs a sign check before subtracting
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde**: serializes as the raw cent count; the HTTP layer converts
///   to a decimal number for JSON clients
///
/// ## Where Money is Used
/// ```text
/// bill_amount ──► percentage(tip) ──► tip_amount
///      │                                  │
///      └──────────────── + ───────────────┘
///                        │
///                   total_amount ──► split(people) ──► per_person_amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use tipsplit_core::money::Money;
    ///
    /// let bill = Money::from_cents(3333); // 33.33
    /// assert_eq!(bill.cents(), 3333);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal, rounding half-up to cents.
    ///
    /// Returns `None` if the amount does not fit.
    ///
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    /// use tipsplit_core::money::Money;
    ///
    /// let amount = Money::from_decimal(Decimal::from_str("10.005").unwrap()).unwrap();
    /// assert_eq!(amount.cents(), 1001);
    /// ```
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        decimal_to_hundredths(value).map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as an exact decimal with scale 2.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a percentage and rounds half-up to the cent.
    ///
    /// ## Implementation
    /// `cents * bps / 10000` evaluated in `i128`, rounded with
    /// [`div_round_half_up`].
    ///
    /// ```rust
    /// use tipsplit_core::money::{Money, Percentage};
    ///
    /// // 33.33 at 18% = 5.9994 → 6.00
    /// let tip = Money::from_cents(3333).percentage(Percentage::from_bps(1800));
    /// assert_eq!(tip.cents(), 600);
    /// ```
    pub fn percentage(&self, rate: Percentage) -> Money {
        let raw = self.0 as i128 * rate.bps() as i128;
        Money::from_cents(div_round_half_up(raw, BPS_PER_WHOLE as i128) as i64)
    }

    /// Divides the amount into `ways` equal shares, rounding half-up.
    ///
    /// A non-positive `ways` is treated as a single share.
    ///
    /// ```rust
    /// use tipsplit_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(3933).split(3).cents(), 1311);
    /// assert_eq!(Money::from_cents(1000).split(3).cents(), 333);
    /// assert_eq!(Money::from_cents(1001).split(2).cents(), 501);
    /// ```
    pub fn split(&self, ways: i64) -> Money {
        let ways = ways.max(1) as i128;
        Money::from_cents(div_round_half_up(self.0 as i128, ways) as i64)
    }
}

/// Shows the amount with two decimals and no currency symbol.
///
/// ```rust
/// use tipsplit_core::money::Money;
///
/// assert_eq!(Money::from_cents(12000).to_string(), "120.00");
/// ```
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
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
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A percentage in basis points (1 bp = 0.01%).
///
/// ## Why Basis Points?
/// Tip percentages carry two decimals (`17.50%`), so `1750` bps
/// represents them exactly. `10000` bps = 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct Percentage(u32);

impl Percentage {
    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from a decimal percent value (`17.5` = 17.5%),
    /// rounding half-up to two decimals.
    ///
    /// Returns `None` for negative or oversized values.
    pub fn from_decimal(percent: Decimal) -> Option<Self> {
        let bps = decimal_to_hundredths(percent)?;
        u32::try_from(bps).ok().map(Percentage)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the percent value as an exact decimal with scale 2.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0 as i64, 2)
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

/// Percent value with two decimals, without the `%` sign.
impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
