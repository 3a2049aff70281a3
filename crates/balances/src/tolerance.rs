//! Rounding slack shared by every stage of the pipeline.

use tripsplit_core::Money;

/// Balances within one minor unit of zero count as settled.
pub const SETTLEMENT_TOLERANCE: Money = Money::from_minor(1);
