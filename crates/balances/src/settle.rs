//! The composed pipeline: aggregate → balances → settlement plan.

use serde::{Deserialize, Serialize};

use tripsplit_core::DomainResult;
use tripsplit_expenses::{Expense, Participant, Split};

use crate::ledger::aggregate_ledger;
use crate::sheet::{BalanceSheet, compute_balances};
use crate::simplify::{SettlementPlan, simplify_debts};

/// Balances and the recommended payments for one trip snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSettlement {
    pub sheet: BalanceSheet,
    pub plan: SettlementPlan,
}

impl TripSettlement {
    pub fn empty() -> Self {
        Self {
            sheet: BalanceSheet::empty(),
            plan: SettlementPlan::default(),
        }
    }
}

/// Runs the whole pipeline over one trip snapshot.
///
/// An empty roster short-circuits to the empty settlement without looking at
/// expenses or splits. The result depends only on the inputs, so the same
/// snapshot always produces the same plan in the same order.
pub fn compute_and_settle(
    participants: &[Participant],
    expenses: &[Expense],
    splits: &[Split],
) -> DomainResult<TripSettlement> {
    if participants.is_empty() {
        tracing::debug!("empty roster; nothing to settle");
        return Ok(TripSettlement::empty());
    }

    let ledger = aggregate_ledger(expenses, splits)?;
    let sheet = compute_balances(participants, &ledger);
    let plan = simplify_debts(&sheet.balances);

    if !sheet.is_conserved() {
        tracing::warn!(
            imbalance = %sheet.imbalance(),
            participants = sheet.participant_count,
            "balances do not sum to zero; splits may not match their expenses"
        );
    }

    tracing::info!(
        participants = sheet.participant_count,
        expenses = ledger.expense_count(),
        total_expenses = %sheet.total_expenses,
        transactions = plan.transaction_count,
        "settled trip balances"
    );

    Ok(TripSettlement { sheet, plan })
}
