//! Fixed-point money in integer minor units.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Number of minor units in one major unit (2 decimal places).
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Signed money amount represented as **integer minor units** (cents).
///
/// Every amount inside the engine is a `Money`, so accumulation never drifts.
/// Decimal values only appear at the boundaries: [`Money::try_from_major`] when
/// the caller hands amounts in, [`Money::to_major`] when results are presented.
///
/// ```rust
/// use tripsplit_core::Money;
///
/// let amount = Money::try_from_major(12.34).unwrap();
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert!(Money::try_from_major(f64::NAN).is_err());
/// ```
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Converts a caller-supplied decimal into minor units.
    ///
    /// Rounds to the nearest minor unit, half away from zero. Fails on NaN,
    /// infinities and values that do not fit in `i64` minor units.
    pub fn try_from_major(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::invalid_amount(format!(
                "amount must be finite (got {value})"
            )));
        }

        let scaled = (value * MINOR_UNITS_PER_MAJOR as f64).round();
        // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
        if scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
            return Err(DomainError::invalid_amount(format!(
                "amount out of range (got {value})"
            )));
        }

        Ok(Self(scaled as i64))
    }

    /// Presentation value with exactly 2 decimals.
    pub fn to_major(self) -> f64 {
        self.0 as f64 / MINOR_UNITS_PER_MAJOR as f64
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Divides into `parts` equal shares, rounded to the nearest minor unit
    /// (half away from zero). Returns `None` when `parts` is zero.
    pub fn div_rounded(self, parts: u64) -> Option<Money> {
        if parts == 0 {
            return None;
        }
        let numerator = self.0 as i128;
        let divisor = parts as i128;
        let magnitude = (2 * numerator.abs() + divisor) / (2 * divisor);
        let signed = if numerator < 0 { -magnitude } else { magnitude };
        i64::try_from(signed).ok().map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per_major = MINOR_UNITS_PER_MAJOR as u64;
        write!(f, "{sign}{}.{:02}", abs / per_major, abs % per_major)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
