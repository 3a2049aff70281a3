use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tripsplit_core::{ExpenseId, ParticipantId, TripId};

/// A single payment made by one participant on behalf of the group.
///
/// `amount` is the caller's decimal value (2 decimal places in storage). It is
/// validated and converted to fixed-point only inside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub trip_id: TripId,
    pub payer_id: ParticipantId,
    pub amount: f64,
    /// Soft-delete marker; deleted expenses are ignored by the engine.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Expense {
    pub fn new(id: ExpenseId, trip_id: TripId, payer_id: ParticipantId, amount: f64) -> Self {
        Self {
            id,
            trip_id,
            payer_id,
            amount,
            deleted_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// The part of an expense allocated to one beneficiary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub expense_id: ExpenseId,
    pub beneficiary_id: ParticipantId,
    pub amount_owed: f64,
    /// Soft-delete marker; deleted splits are ignored by the engine.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Split {
    pub fn new(expense_id: ExpenseId, beneficiary_id: ParticipantId, amount_owed: f64) -> Self {
        Self {
            expense_id,
            beneficiary_id,
            amount_owed,
            deleted_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}
