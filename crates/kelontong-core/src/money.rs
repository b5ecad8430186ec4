//! # Money Module
//!
//! Provides the `Money` type for monetary values and `Percentage` for
//! discount and tax rates.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Discount 15% on Rp 3.500 with floats:                                  │
//! │    3500 * 15 / 100 = 525                                                │
//! │    (3500 - 525) * 0.1 = 297.50000000000006  ❌                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Sen (1/100 rupiah)                               │
//! │    350000 sen * 1500 bps / 10000 = 52500 sen                            │
//! │    297500 sen * 1000 bps / 10000 = 29750 sen = Rp 297,50  ✅            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kelontong_core::money::Money;
//!
//! let price = Money::from_rupiah(3500);
//! assert_eq!(price.sen(), 350_000);
//! assert_eq!(price.to_string(), "Rp3.500");
//!
//! let line_total = price * 3;
//! assert_eq!(line_total, Money::from_rupiah(10_500));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Number of sen in one rupiah.
pub const SEN_PER_RUPIAH: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in sen, the smallest rupiah unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: change and refunds may be negative in intermediate math
/// - **Sen, not rupiah**: percentage discounts and 10% tax can produce
///   fractions of a rupiah; sen keep them exact to two places
/// - **Serialized as a bare integer** of sen
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartLineItem.subtotal ──► Cart subtotal
///                                                 │
///                         discount (bps) ◄────────┤
///                         tax 10% (bps)  ◄────────┤
///                                                 ▼
///                                   total ──► tender / change ──► receipt
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from sen.
    #[inline]
    pub const fn from_sen(sen: i64) -> Self {
        Money(sen)
    }

    /// Creates a Money value from whole rupiah.
    ///
    /// ## Example
    /// ```rust
    /// use kelontong_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupiah(15_000).sen(), 1_500_000);
    /// ```
    #[inline]
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Money(rupiah * SEN_PER_RUPIAH)
    }

    /// Returns the value in sen.
    #[inline]
    pub const fn sen(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupiah portion (truncated toward zero).
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0 / SEN_PER_RUPIAH
    }

    /// Returns the sen portion (always 0-99).
    #[inline]
    pub const fn sen_part(&self) -> i64 {
        (self.0 % SEN_PER_RUPIAH).abs()
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the value as a float number of rupiah (for display ratios only).
    #[inline]
    pub fn as_rupiah_f64(&self) -> f64 {
        self.0 as f64 / SEN_PER_RUPIAH as f64
    }

    /// Calculates `rate` of this amount, rounded half away from zero to the
    /// nearest sen.
    ///
    /// ## Implementation
    /// Integer math with an i128 intermediate: `(amount * bps ± 5000) / 10000`.
    ///
    /// ## Example
    /// ```rust
    /// use kelontong_core::money::{Money, Percentage};
    ///
    /// let amount = Money::from_rupiah(2975);
    /// let tax = amount.percent_of(Percentage::from_bps(1000));
    /// assert_eq!(tax.sen(), 29_750); // Rp 297,50
    ///
    /// // 0.5 sen rounds up
    /// assert_eq!(Money::from_sen(5).percent_of(Percentage::from_bps(1000)).sen(), 1);
    /// ```
    pub fn percent_of(&self, rate: Percentage) -> Money {
        let product = self.0 as i128 * rate.bps() as i128;
        let half = if product < 0 { -5000 } else { 5000 };
        Money::from_sen(((product + half) / 10_000) as i64)
    }

    /// Multiplies money by a quantity, saturating at the representable range.
    ///
    /// ## Example
    /// ```rust
    /// use kelontong_core::money::Money;
    ///
    /// let unit_price = Money::from_rupiah(8500);
    /// assert_eq!(unit_price.multiply_quantity(4), Money::from_rupiah(34_000));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

/// Groups a non-negative integer with dots every three digits (id-ID style).
fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money the way Indonesian receipts do: `Rp10.395`, `-Rp297,50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rp{}", sign, group_thousands(self.rupiah().abs()))?;
        if self.sen_part() != 0 {
            write!(f, ",{:02}", self.sen_part())?;
        }
        Ok(())
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

/// Multiplication by a unit count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
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
// Percentage
// =============================================================================

/// A rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01%, so 1000 bps = 10% and 1250 bps = 12.5%.
/// Keeps discount and tax math in integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(u32);

impl Percentage {
    /// 100%.
    pub const FULL: Percentage = Percentage(10_000);

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a rate from a percentage, rounded to the nearest basis point.
    ///
    /// Negative and NaN inputs become zero.
    pub fn from_percent(pct: f64) -> Self {
        Percentage((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}%", self.percent())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupiah() {
        let money = Money::from_rupiah(3500);
        assert_eq!(money.sen(), 350_000);
        assert_eq!(money.rupiah(), 3500);
        assert_eq!(money.sen_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_rupiah(3500).to_string(), "Rp3.500");
        assert_eq!(Money::from_rupiah(10_395).to_string(), "Rp10.395");
        assert_eq!(Money::from_rupiah(1_500_000).to_string(), "Rp1.500.000");
        assert_eq!(Money::from_rupiah(999).to_string(), "Rp999");
        assert_eq!(Money::from_sen(29_750).to_string(), "Rp297,50");
        assert_eq!(Money::from_sen(-29_750).to_string(), "-Rp297,50");
        assert_eq!(Money::zero().to_string(), "Rp0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupiah(1000);
        let b = Money::from_rupiah(500);

        assert_eq!((a + b).rupiah(), 1500);
        assert_eq!((a - b).rupiah(), 500);
        assert_eq!((a * 3).rupiah(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_rupiah(100);
        assert_eq!(c.rupiah(), 1400);
    }

    #[test]
    fn test_sum() {
        let values = vec![Money::from_rupiah(1), Money::from_rupiah(2), Money::from_rupiah(3)];
        let by_ref: Money = values.iter().sum();
        let by_value: Money = values.into_iter().sum();
        assert_eq!(by_ref, Money::from_rupiah(6));
        assert_eq!(by_value, Money::from_rupiah(6));
    }

    #[test]
    fn test_percent_of_exact() {
        // Rp 10.500 at 10% = Rp 1.050
        let amount = Money::from_rupiah(10_500);
        assert_eq!(amount.percent_of(Percentage::from_bps(1000)), Money::from_rupiah(1050));
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        // 15 sen at 10% = 1.5 sen → 2 sen
        assert_eq!(Money::from_sen(15).percent_of(Percentage::from_bps(1000)).sen(), 2);
        // 14 sen at 10% = 1.4 sen → 1 sen
        assert_eq!(Money::from_sen(14).percent_of(Percentage::from_bps(1000)).sen(), 1);
        // Negative amounts round away from zero symmetrically
        assert_eq!(Money::from_sen(-15).percent_of(Percentage::from_bps(1000)).sen(), -2);
    }

    #[test]
    fn test_percent_of_large_amount_does_not_overflow() {
        let huge = Money::from_sen(i64::MAX / 2);
        let full = huge.percent_of(Percentage::FULL);
        assert_eq!(full, huge);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let price = Money::from_sen(i64::MAX / 4);
        assert_eq!(price.multiply_quantity(u32::MAX), Money::from_sen(i64::MAX));
        assert_eq!(price * 2, Money::from_sen(i64::MAX / 4 * 2));
    }

    #[test]
    fn test_percentage_from_percent() {
        assert_eq!(Percentage::from_percent(10.0).bps(), 1000);
        assert_eq!(Percentage::from_percent(12.5).bps(), 1250);
        assert_eq!(Percentage::from_percent(-5.0).bps(), 0);
        assert_eq!(Percentage::from_percent(f64::NAN).bps(), 0);
    }

    #[test]
    fn test_percentage_display() {
        assert_eq!(Percentage::from_bps(1000).to_string(), "10%");
        assert_eq!(Percentage::from_bps(1250).to_string(), "12.5%");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_sen(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().sen(), 100);
    }

    #[test]
    fn test_serializes_as_bare_sen() {
        let json = serde_json::to_string(&Money::from_rupiah(3500)).unwrap();
        assert_eq!(json, "350000");
    }
}
