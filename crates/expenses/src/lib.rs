//! Trip records and split allocation.
//!
//! Plain, required-field records the caller hands to the engine (participants,
//! expenses, splits), plus the rules for turning an expense and its
//! beneficiaries into splits. Pure domain logic only: no IO, no persistence.

pub mod allocation;
pub mod expense;
pub mod participant;

pub use allocation::{Beneficiary, allocate_splits, fair_share, split_evenly};
pub use expense::{Expense, Split};
pub use participant::Participant;
