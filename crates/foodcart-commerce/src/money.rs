//! Money type for representing prices.
//!
//! Menu prices are whole currency units (no minor units), so amounts are
//! plain non-negative integers. Every arithmetic path is checked so a
//! pathological quantity surfaces as an error instead of wrapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;

use crate::error::CommerceError;

/// Default symbol printed after amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "\u{20bd}";

/// A price or total in whole currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Zero amount.
    pub const ZERO: Money = Money(0);

    /// Create a new amount.
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// The raw amount in whole units.
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Add another amount, returning None on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiply by a quantity.
    ///
    /// Negative quantities are rejected as overflow; callers validate
    /// quantities before pricing.
    pub fn checked_mul(&self, quantity: i64) -> Option<Money> {
        let factor = u64::try_from(quantity).ok()?;
        self.0.checked_mul(factor).map(Money)
    }

    /// Sum amounts, failing on overflow.
    pub fn try_sum<'a>(iter: impl IntoIterator<Item = &'a Money>) -> Result<Money, CommerceError> {
        iter.into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(*m))
            .ok_or(CommerceError::Overflow)
    }

    /// Format with a trailing currency symbol (e.g., "300 ₽").
    pub fn display_with(&self, symbol: &str) -> String {
        format!("{} {}", self.0, symbol)
    }
}

impl From<u64> for Money {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

/// Plain integer sum, like `u64`'s own. Totals that may exceed the range go
/// through [`Money::try_sum`].
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money(iter.map(|m| m.0).sum())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
