//! # Money Module
//!
//! Display-side money handling for quotes.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ENGINE (full f64 precision)            DISPLAY (integer cents)         │
//! │                                                                         │
//! │  unit price 2.4575 (interpolated)  ──►  Money::from_dollars ──► $2.46   │
//! │  base price 614.375                ──►  Money::from_dollars ──► $614.38 │
//! │                                                                         │
//! │  The breakdown keeps every fraction of a cent so that `total` is the   │
//! │  exact sum of its components. Cents appear only at the edge.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pinforge_core::money::{format_currency, format_price, Money};
//!
//! let total = Money::from_dollars(1234.5);
//! assert_eq!(total.cents(), 123450);
//! assert_eq!(total.to_string(), "$1,234.50");
//!
//! assert_eq!(format_currency(62.5), "$62.50");
//! assert_eq!(format_price(261.0), "261.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: The engine never produces negative amounts, but a
///   signed type keeps subtraction in callers honest
/// - **Constructed from dollars**: The engine works in `f64` dollars;
///   conversion rounds half away from zero to the nearest cent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from an engine amount in dollars.
    ///
    /// Non-finite input maps to zero, matching the engine's "no price yet"
    /// convention.
    ///
    /// ## Example
    /// ```rust
    /// use pinforge_core::money::Money;
    ///
    /// assert_eq!(Money::from_dollars(62.2).cents(), 6220);
    /// assert_eq!(Money::from_dollars(0.005).cents(), 1);
    /// assert_eq!(Money::from_dollars(f64::NAN).cents(), 0);
    /// ```
    pub fn from_dollars(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        // Snap to 1e-6 first so 0.005 stored as 0.004999... still rounds up
        let cents = ((amount * 100.0) * 1e6).round() / 1e6;
        Money(cents.round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Formats without the currency symbol or grouping: `1234.50`.
    pub fn to_plain_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

/// en-US currency display: `$1,234.56`, `-$5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            group_thousands(self.dollars().unsigned_abs()),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Formats an engine amount as USD with two decimals: `$1,234.56`.
pub fn format_currency(amount: f64) -> String {
    Money::from_dollars(amount).to_string()
}

/// Formats an engine amount with two decimals and no symbol: `1234.56`.
pub fn format_price(amount: f64) -> String {
    Money::from_dollars(amount).to_plain_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dollars_rounds_to_cents() {
        assert_eq!(Money::from_dollars(261.0).cents(), 26100);
        assert_eq!(Money::from_dollars(373.2).cents(), 37320);
        assert_eq!(Money::from_dollars(66.666).cents(), 6667);
        assert_eq!(Money::from_dollars(2.4575).cents(), 246);
    }

    #[test]
    fn test_from_dollars_non_finite_is_zero() {
        assert!(Money::from_dollars(f64::INFINITY).is_zero());
        assert!(Money::from_dollars(f64::NAN).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(123456789)), "$1,234,567.89");
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_currency(50.0), "$50.00");
        assert_eq!(format_currency(62.5), "$62.50");
        assert_eq!(format_currency(1500.0), "$1,500.00");
        assert_eq!(format_price(311.0), "311.00");
        assert_eq!(format_price(1500.0), "1500.00");
    }
}
