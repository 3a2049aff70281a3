//! Balance computation and debt settlement for a single trip.
//!
//! A strict three-stage pipeline, each stage consuming only the previous
//! stage's output:
//!
//! 1. [`aggregate_ledger`] folds expenses and splits into per-participant totals.
//! 2. [`compute_balances`] joins those totals with the roster into net balances.
//! 3. [`simplify_debts`] reduces the balances to a short list of recommended
//!    payments.
//!
//! [`compute_and_settle`] chains the three. Everything here is pure and
//! synchronous: no IO, no shared state, no caching. Inputs are borrowed and
//! never mutated, so concurrent callers can share snapshots freely.

pub mod ledger;
pub mod settle;
pub mod sheet;
pub mod simplify;
pub mod stats;
pub mod tolerance;

pub use ledger::{Ledger, ParticipantTotals, aggregate_ledger};
pub use settle::{TripSettlement, compute_and_settle};
pub use sheet::{BalanceSheet, ParticipantBalance, compute_balances};
pub use simplify::{SettlementPlan, SettlementTransaction, simplify_debts};
pub use stats::{TripStats, trip_stats};
pub use tolerance::SETTLEMENT_TOLERANCE;
