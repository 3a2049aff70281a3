//! `tripsplit-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, fixed-point money and the domain error type.

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use id::{ExpenseId, ParticipantId, TripId};
pub use money::{MINOR_UNITS_PER_MAJOR, Money};
