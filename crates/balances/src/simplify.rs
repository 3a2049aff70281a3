//! Debt simplification: net balances → recommended settlement payments.
//!
//! Greedy pairing of the largest debtor with the largest creditor. This keeps
//! the plan to at most `n - 1` payments for `n` participants with a non-zero
//! balance. It is not guaranteed to be the global minimum (that problem is
//! NP-hard), and the pairing order is part of the output contract: callers
//! compare plans across runs, so the sort order and tie-break must not change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use tripsplit_core::{Money, ParticipantId};

use crate::sheet::ParticipantBalance;
use crate::tolerance::SETTLEMENT_TOLERANCE;

/// A recommended payment. Recommending it does not record that it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTransaction {
    pub from: ParticipantId,
    pub from_name: String,
    pub to: ParticipantId,
    pub to_name: String,
    /// Always positive.
    pub amount: Money,
}

/// Ordered settlement payments. Emission order is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementPlan {
    pub transactions: Vec<SettlementTransaction>,
    pub transaction_count: usize,
}

impl SettlementPlan {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Balances left after every payment in the plan is made.
    ///
    /// The payer's balance rises by the amount, the payee's falls by it. Debts
    /// within [`SETTLEMENT_TOLERANCE`] are never paid, so a creditor owed only
    /// by such debtors keeps a residual larger than the tolerance (+0.03
    /// against three debts of 0.01 stays +0.03).
    pub fn apply(&self, balances: &[ParticipantBalance]) -> BTreeMap<ParticipantId, Money> {
        let mut residual: BTreeMap<ParticipantId, Money> = balances
            .iter()
            .map(|b| (b.participant_id, b.balance))
            .collect();

        for tx in &self.transactions {
            *residual.entry(tx.from).or_default() += tx.amount;
            *residual.entry(tx.to).or_default() -= tx.amount;
        }

        residual
    }
}

/// One side of the walk. `remaining` is a working copy of the magnitude still
/// to pay (debtor) or to receive (creditor); the caller's balance is untouched.
struct Position<'a> {
    entry: &'a ParticipantBalance,
    remaining: Money,
}

/// Reduces net balances to a list of pairwise payments.
///
/// 1. Debtors are balances below `-tolerance`, creditors above `+tolerance`.
/// 2. Debtors sort most negative first, creditors most positive first; ties
///    fall back to participant id.
/// 3. Two pointers walk both lists; each step moves
///    `min(debt remaining, credit remaining)` and emits a payment when that
///    exceeds the tolerance.
/// 4. A side advances once its remainder drops below the tolerance.
///
/// If debts and credits do not net out, whatever is left over stays unsettled;
/// [`BalanceSheet::is_conserved`](crate::BalanceSheet::is_conserved) is how
/// callers detect that.
pub fn simplify_debts(balances: &[ParticipantBalance]) -> SettlementPlan {
    let mut debtors: Vec<Position<'_>> = balances
        .iter()
        .filter(|b| b.balance < -SETTLEMENT_TOLERANCE)
        .map(|b| Position {
            entry: b,
            remaining: b.balance.abs(),
        })
        .collect();

    let mut creditors: Vec<Position<'_>> = balances
        .iter()
        .filter(|b| b.balance > SETTLEMENT_TOLERANCE)
        .map(|b| Position {
            entry: b,
            remaining: b.balance,
        })
        .collect();

    debtors.sort_by(|a, b| {
        a.entry
            .balance
            .cmp(&b.entry.balance)
            .then_with(|| a.entry.participant_id.cmp(&b.entry.participant_id))
    });
    creditors.sort_by(|a, b| {
        b.entry
            .balance
            .cmp(&a.entry.balance)
            .then_with(|| a.entry.participant_id.cmp(&b.entry.participant_id))
    });

    let mut transactions = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let debtor = &mut debtors[i];
        let creditor = &mut creditors[j];

        let transfer = debtor.remaining.min(creditor.remaining);

        if transfer > SETTLEMENT_TOLERANCE {
            transactions.push(SettlementTransaction {
                from: debtor.entry.participant_id,
                from_name: debtor.entry.name.clone(),
                to: creditor.entry.participant_id,
                to_name: creditor.entry.name.clone(),
                amount: transfer,
            });
        }

        // Subtracting even a sub-tolerance transfer guarantees one side reaches
        // zero, so every iteration advances at least one pointer.
        debtor.remaining -= transfer;
        creditor.remaining -= transfer;

        if debtor.remaining < SETTLEMENT_TOLERANCE {
            i += 1;
        }
        if creditor.remaining < SETTLEMENT_TOLERANCE {
            j += 1;
        }
    }

    let unsettled_debt = unsettled_minor(&debtors[i..]);
    let unsettled_credit = unsettled_minor(&creditors[j..]);
    let tolerance = SETTLEMENT_TOLERANCE.minor() as i128;
    if unsettled_debt > tolerance || unsettled_credit > tolerance {
        tracing::debug!(
            unsettled_debt_minor = %unsettled_debt,
            unsettled_credit_minor = %unsettled_credit,
            "balances do not net out; residual left unsettled"
        );
    }

    tracing::debug!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        transactions = transactions.len(),
        "simplified debts"
    );

    SettlementPlan {
        transaction_count: transactions.len(),
        transactions,
    }
}

/// Sum of what is left on one side of the walk, in minor units.
fn unsettled_minor(positions: &[Position<'_>]) -> i128 {
    positions.iter().map(|p| p.remaining.minor() as i128).sum()
}
