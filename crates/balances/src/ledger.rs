//! Ledger aggregation: expenses + splits → per-participant totals.

use std::collections::{BTreeMap, BTreeSet};

use tripsplit_core::{DomainError, DomainResult, Money, ParticipantId};
use tripsplit_expenses::{Expense, Split};

/// What one participant paid and what they were allocated.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ParticipantTotals {
    /// Sum of expense amounts this participant paid.
    pub total_spent: Money,
    /// Sum of split amounts allocated to this participant.
    pub total_owed: Money,
}

impl ParticipantTotals {
    /// Net position: positive = owed money, negative = owes money.
    pub fn balance(&self) -> Money {
        self.total_spent - self.total_owed
    }
}

/// Aggregated ledger of one trip.
///
/// Participants with no activity are absent. `total_expenses` is summed from
/// the expenses directly, not from the per-participant totals. Both
/// ledger-wide totals fit in `Money`, which bounds every later sum over
/// balances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    totals: BTreeMap<ParticipantId, ParticipantTotals>,
    total_expenses: Money,
    total_owed: Money,
    expense_count: usize,
}

impl Ledger {
    pub fn totals_for(&self, participant_id: &ParticipantId) -> ParticipantTotals {
        self.totals.get(participant_id).copied().unwrap_or_default()
    }

    /// Participants with activity, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantTotals)> {
        self.totals.iter()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total_expenses(&self) -> Money {
        self.total_expenses
    }

    /// Sum of every aggregated split, across all participants.
    pub fn total_owed(&self) -> Money {
        self.total_owed
    }

    /// Number of active expenses that were aggregated.
    pub fn expense_count(&self) -> usize {
        self.expense_count
    }

    fn entry(&mut self, participant_id: ParticipantId) -> &mut ParticipantTotals {
        self.totals.entry(participant_id).or_default()
    }
}

/// Folds a trip's expenses and splits into a [`Ledger`].
///
/// - Soft-deleted expenses and splits are ignored.
/// - Splits pointing at an expense that is not in `expenses` (or is deleted)
///   are ignored.
/// - Any negative or non-finite amount fails the whole aggregation, and so
///   does a total (per participant or ledger-wide) that overflows.
pub fn aggregate_ledger(expenses: &[Expense], splits: &[Split]) -> DomainResult<Ledger> {
    let mut ledger = Ledger::default();
    let mut live_expenses = BTreeSet::new();

    for expense in expenses.iter().filter(|e| e.is_active()) {
        let amount = validate_amount(expense.amount, || format!("expense {}", expense.id))?;

        ledger.total_expenses = accumulate(ledger.total_expenses, amount)?;
        let payer = ledger.entry(expense.payer_id);
        payer.total_spent = accumulate(payer.total_spent, amount)?;

        ledger.expense_count += 1;
        live_expenses.insert(expense.id);
    }

    let mut skipped_splits = 0usize;
    for split in splits.iter().filter(|s| s.is_active()) {
        if !live_expenses.contains(&split.expense_id) {
            skipped_splits += 1;
            continue;
        }

        let owed = validate_amount(split.amount_owed, || {
            format!("split of expense {} for {}", split.expense_id, split.beneficiary_id)
        })?;

        ledger.total_owed = accumulate(ledger.total_owed, owed)?;
        let beneficiary = ledger.entry(split.beneficiary_id);
        beneficiary.total_owed = accumulate(beneficiary.total_owed, owed)?;
    }

    if skipped_splits > 0 {
        tracing::debug!(skipped_splits, "ignored splits without an active expense");
    }

    tracing::debug!(
        expenses = ledger.expense_count,
        participants = ledger.len(),
        total_expenses = %ledger.total_expenses,
        "aggregated ledger"
    );

    Ok(ledger)
}

fn validate_amount(value: f64, what: impl Fn() -> String) -> DomainResult<Money> {
    let money = Money::try_from_major(value)
        .map_err(|e| DomainError::invalid_amount(format!("{}: {e}", what())))?;
    if money.is_negative() {
        return Err(DomainError::invalid_amount(format!(
            "{}: amount must not be negative (got {value})",
            what()
        )));
    }
    Ok(money)
}

fn accumulate(total: Money, amount: Money) -> DomainResult<Money> {
    total
        .checked_add(amount)
        .ok_or_else(|| DomainError::invalid_amount("ledger total overflowed"))
}
