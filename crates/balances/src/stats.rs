//! Per-viewer trip summary.

use serde::{Deserialize, Serialize};

use tripsplit_core::{DomainResult, Money, ParticipantId};
use tripsplit_expenses::{Expense, Participant, Split};

use crate::ledger::aggregate_ledger;
use crate::sheet::compute_balances;

/// Headline numbers of a trip as seen by one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripStats {
    /// Number of active expenses.
    pub expense_count: usize,
    pub total_amount: Money,
    pub participant_count: usize,
    /// Positive = the viewer is owed money, negative = the viewer owes money.
    pub viewer_balance: Money,
}

pub fn trip_stats(
    participants: &[Participant],
    expenses: &[Expense],
    splits: &[Split],
    viewer: ParticipantId,
) -> DomainResult<TripStats> {
    let ledger = aggregate_ledger(expenses, splits)?;
    let sheet = compute_balances(participants, &ledger);

    let viewer_balance = sheet
        .balance_of(&viewer)
        .map(|b| b.balance)
        .unwrap_or(Money::ZERO);

    Ok(TripStats {
        expense_count: ledger.expense_count(),
        total_amount: ledger.total_expenses(),
        participant_count: participants.len(),
        viewer_balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tripsplit_core::{ExpenseId, TripId};
    use uuid::Uuid;

    fn pid(n: u128) -> ParticipantId {
        ParticipantId::from_uuid(Uuid::from_u128(n))
    }

    fn eid(n: u128) -> ExpenseId {
        ExpenseId::from_uuid(Uuid::from_u128(1_000 + n))
    }

    fn trip() -> TripId {
        TripId::from_uuid(Uuid::from_u128(9_999))
    }

    #[test]
    fn reports_counts_totals_and_viewer_balance() {
        let roster = vec![
            Participant::new(pid(1), "Ana", "ana@example.com"),
            Participant::new(pid(2), "Bruno", "bruno@example.com"),
        ];
        let mut voided = Expense::new(eid(2), trip(), pid(2), 999.0);
        voided.deleted_at = Some(Utc::now());
        let expenses = vec![Expense::new(eid(1), trip(), pid(1), 60.0), voided];
        let splits = vec![
            Split::new(eid(1), pid(1), 30.0),
            Split::new(eid(1), pid(2), 30.0),
        ];

        let stats = trip_stats(&roster, &expenses, &splits, pid(2)).unwrap();
        assert_eq!(
            stats,
            TripStats {
                expense_count: 1,
                total_amount: Money::from_minor(6_000),
                participant_count: 2,
                viewer_balance: Money::from_minor(-3_000),
            }
        );
    }

    #[test]
    fn viewer_off_the_roster_has_zero_balance() {
        let roster = vec![Participant::new(pid(1), "Ana", "ana@example.com")];
        let expenses = vec![Expense::new(eid(1), trip(), pid(1), 10.0)];

        let stats = trip_stats(&roster, &expenses, &[], pid(7)).unwrap();
        assert_eq!(stats.viewer_balance, Money::ZERO);
        assert_eq!(stats.expense_count, 1);
    }
}
