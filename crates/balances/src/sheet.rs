//! Balance calculation: roster + ledger → per-participant net balances.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use tripsplit_core::{Money, ParticipantId};
use tripsplit_expenses::Participant;

use crate::ledger::Ledger;
use crate::tolerance::SETTLEMENT_TOLERANCE;

/// Net position of one participant.
///
/// Tracks:
/// - `total_spent`: what the participant paid for the group
/// - `total_owed`: what was allocated to the participant
/// - `balance`: `total_spent - total_owed` (positive = creditor, negative = debtor)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantBalance {
    pub participant_id: ParticipantId,
    pub name: String,
    pub email: String,
    pub total_spent: Money,
    pub total_owed: Money,
    pub balance: Money,
}

/// Balances of every roster entry plus trip totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    /// One entry per roster participant, in roster order.
    pub balances: Vec<ParticipantBalance>,
    pub total_expenses: Money,
    pub participant_count: usize,
}

impl BalanceSheet {
    /// The sheet of a trip without participants.
    pub fn empty() -> Self {
        Self {
            balances: Vec::new(),
            total_expenses: Money::ZERO,
            participant_count: 0,
        }
    }

    pub fn balance_of(&self, participant_id: &ParticipantId) -> Option<&ParticipantBalance> {
        self.balances
            .iter()
            .find(|b| &b.participant_id == participant_id)
    }

    /// Sum of all balances. Zero for a consistent ledger.
    ///
    /// Saturates at the bounds of `Money` when a roster repeats a participant
    /// with a very large balance.
    pub fn imbalance(&self) -> Money {
        let total = self.imbalance_minor().clamp(i64::MIN as i128, i64::MAX as i128);
        Money::from_minor(total as i64)
    }

    /// Whether the balances net out within one minor unit per participant.
    ///
    /// A `false` here means the caller handed in splits that do not add up to
    /// their expenses, or ledger activity for people missing from the roster.
    pub fn is_conserved(&self) -> bool {
        let allowed = SETTLEMENT_TOLERANCE.minor() as i128 * self.participant_count as i128;
        self.imbalance_minor().abs() <= allowed
    }

    fn imbalance_minor(&self) -> i128 {
        self.balances.iter().map(|b| b.balance.minor() as i128).sum()
    }
}

/// Joins the roster with the aggregated ledger.
///
/// Every roster entry gets a balance, zero when it has no activity. Ledger
/// entries for people not on the roster are dropped (and logged).
pub fn compute_balances(participants: &[Participant], ledger: &Ledger) -> BalanceSheet {
    if participants.is_empty() {
        return BalanceSheet::empty();
    }

    let balances: Vec<ParticipantBalance> = participants
        .iter()
        .map(|participant| {
            let totals = ledger.totals_for(&participant.id);
            ParticipantBalance {
                participant_id: participant.id,
                name: participant.name.clone(),
                email: participant.email.clone(),
                total_spent: totals.total_spent,
                total_owed: totals.total_owed,
                balance: totals.balance(),
            }
        })
        .collect();

    let roster: BTreeSet<ParticipantId> = participants.iter().map(|p| p.id).collect();
    for (participant_id, totals) in ledger.iter().filter(|(id, _)| !roster.contains(id)) {
        tracing::warn!(
            participant_id = %participant_id,
            total_spent = %totals.total_spent,
            total_owed = %totals.total_owed,
            "ledger activity for participant not on the roster"
        );
    }

    tracing::debug!(participants = balances.len(), "computed balances");

    BalanceSheet {
        balances,
        total_expenses: ledger.total_expenses(),
        participant_count: participants.len(),
    }
}
