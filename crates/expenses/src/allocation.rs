//! Turning an expense and its beneficiaries into splits.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use tripsplit_core::{DomainError, DomainResult, Money, ParticipantId};

use crate::expense::{Expense, Split};

/// A participant who benefits from an expense.
///
/// Without an explicit `amount_owed` the beneficiary is charged a fair share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub participant_id: ParticipantId,
    #[serde(default)]
    pub amount_owed: Option<f64>,
}

impl Beneficiary {
    pub fn fair_share(participant_id: ParticipantId) -> Self {
        Self {
            participant_id,
            amount_owed: None,
        }
    }

    pub fn owing(participant_id: ParticipantId, amount_owed: f64) -> Self {
        Self {
            participant_id,
            amount_owed: Some(amount_owed),
        }
    }
}

/// Equal share of `total` among `beneficiary_count` people, rounded to the
/// nearest minor unit.
///
/// The rounding remainder is not redistributed: three fair shares of 100.00
/// are 33.33 each and sum to 99.99.
pub fn fair_share(total: Money, beneficiary_count: usize) -> DomainResult<Money> {
    if total.is_negative() {
        return Err(DomainError::invalid_amount(format!(
            "cannot share a negative total ({total})"
        )));
    }
    if beneficiary_count == 0 {
        return Err(DomainError::validation("fair share needs at least one beneficiary"));
    }

    total
        .div_rounded(beneficiary_count as u64)
        .ok_or_else(|| DomainError::validation("fair share needs at least one beneficiary"))
}

/// Builds one split per beneficiary of `expense`.
///
/// Explicit amounts and fair shares may be mixed; fair shares are always
/// computed against the full expense amount and the full beneficiary count.
pub fn allocate_splits(
    expense: &Expense,
    beneficiaries: &[Beneficiary],
) -> DomainResult<Vec<Split>> {
    let total = non_negative(expense.amount, "expense amount")?;
    ensure_unique(beneficiaries.iter().map(|b| b.participant_id))?;

    let share = fair_share(total, beneficiaries.len())?;

    let splits = beneficiaries
        .iter()
        .map(|b| {
            let owed = match b.amount_owed {
                Some(explicit) => non_negative(explicit, "amount owed")?,
                None => share,
            };
            Ok(Split::new(expense.id, b.participant_id, owed.to_major()))
        })
        .collect::<DomainResult<Vec<_>>>()?;

    tracing::debug!(
        expense_id = %expense.id,
        splits = splits.len(),
        fair_share = %share,
        "allocated expense splits"
    );

    Ok(splits)
}

/// Splits `expense` evenly so the shares sum exactly to the expense amount.
///
/// Shares differ by at most one minor unit; the leftover units go to the first
/// participants in the given order.
pub fn split_evenly(expense: &Expense, participants: &[ParticipantId]) -> DomainResult<Vec<Split>> {
    let total = non_negative(expense.amount, "expense amount")?;
    if participants.is_empty() {
        return Err(DomainError::validation("even split needs at least one beneficiary"));
    }
    ensure_unique(participants.iter().copied())?;

    let count = participants.len() as i64;
    let base = total.minor() / count;
    let remainder = (total.minor() % count) as usize;

    Ok(participants
        .iter()
        .enumerate()
        .map(|(idx, participant_id)| {
            let extra = if idx < remainder { 1 } else { 0 };
            let owed = Money::from_minor(base + extra);
            Split::new(expense.id, *participant_id, owed.to_major())
        })
        .collect())
}

fn non_negative(value: f64, what: &str) -> DomainResult<Money> {
    let money = Money::try_from_major(value)
        .map_err(|e| DomainError::invalid_amount(format!("{what}: {e}")))?;
    if money.is_negative() {
        return Err(DomainError::invalid_amount(format!(
            "{what} must not be negative (got {value})"
        )));
    }
    Ok(money)
}

fn ensure_unique(ids: impl Iterator<Item = ParticipantId>) -> DomainResult<()> {
    let mut seen = BTreeSet::new();
    let mut any = false;
    for id in ids {
        any = true;
        if !seen.insert(id) {
            return Err(DomainError::validation(format!("duplicate beneficiary {id}")));
        }
    }
    if !any {
        return Err(DomainError::validation("expense must have at least one beneficiary"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tripsplit_core::{ExpenseId, TripId};
    use uuid::Uuid;

    fn pid(n: u128) -> ParticipantId {
        ParticipantId::from_uuid(Uuid::from_u128(n))
    }

    fn test_expense(amount: f64) -> Expense {
        Expense::new(
            ExpenseId::from_uuid(Uuid::from_u128(100)),
            TripId::from_uuid(Uuid::from_u128(200)),
            pid(1),
            amount,
        )
    }

    #[test]
    fn fair_share_rounds_to_two_decimals() {
        let share = fair_share(Money::from_minor(10_000), 3).unwrap();
        assert_eq!(share, Money::from_minor(3333));

        let share = fair_share(Money::from_minor(200), 3).unwrap();
        assert_eq!(share, Money::from_minor(67));
    }

    #[test]
    fn fair_share_rejects_zero_beneficiaries() {
        let err = fair_share(Money::from_minor(100), 0).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for zero beneficiaries"),
        }
    }

    #[test]
    fn allocate_splits_charges_fair_share_by_default() {
        let expense = test_expense(300_000.0);
        let beneficiaries = vec![
            Beneficiary::fair_share(pid(1)),
            Beneficiary::fair_share(pid(2)),
            Beneficiary::fair_share(pid(3)),
        ];

        let splits = allocate_splits(&expense, &beneficiaries).unwrap();
        assert_eq!(splits.len(), 3);
        for (split, beneficiary) in splits.iter().zip(&beneficiaries) {
            assert_eq!(split.expense_id, expense.id);
            assert_eq!(split.beneficiary_id, beneficiary.participant_id);
            assert_eq!(split.amount_owed, 100_000.0);
            assert!(split.is_active());
        }
    }

    #[test]
    fn allocate_splits_mixes_explicit_amounts_and_fair_shares() {
        let expense = test_expense(150_000.0);
        let beneficiaries = vec![
            Beneficiary::fair_share(pid(1)),
            Beneficiary::owing(pid(2), 75_000.0),
        ];

        let splits = allocate_splits(&expense, &beneficiaries).unwrap();
        assert_eq!(splits[0].amount_owed, 75_000.0);
        assert_eq!(splits[1].amount_owed, 75_000.0);
    }

    #[test]
    fn allocate_splits_does_not_redistribute_the_remainder() {
        let expense = test_expense(100.0);
        let beneficiaries: Vec<_> = (1..=3).map(|n| Beneficiary::fair_share(pid(n))).collect();

        let splits = allocate_splits(&expense, &beneficiaries).unwrap();
        let owed: Vec<f64> = splits.iter().map(|s| s.amount_owed).collect();
        assert_eq!(owed, vec![33.33, 33.33, 33.33]);
    }

    #[test]
    fn allocate_splits_rejects_empty_and_duplicate_beneficiaries() {
        let expense = test_expense(10.0);

        let err = allocate_splits(&expense, &[]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let dup = vec![Beneficiary::fair_share(pid(1)), Beneficiary::fair_share(pid(1))];
        let err = allocate_splits(&expense, &dup).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn allocate_splits_rejects_invalid_amounts() {
        let err = allocate_splits(&test_expense(-5.0), &[Beneficiary::fair_share(pid(1))])
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(_)));

        let err = allocate_splits(&test_expense(5.0), &[Beneficiary::owing(pid(1), f64::NAN)])
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(_)));
    }

    #[test]
    fn split_evenly_hands_leftover_units_to_the_first_participants() {
        let expense = test_expense(100.0);
        let splits = split_evenly(&expense, &[pid(1), pid(2), pid(3)]).unwrap();

        let owed: Vec<f64> = splits.iter().map(|s| s.amount_owed).collect();
        assert_eq!(owed, vec![33.34, 33.33, 33.33]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: a fair share never carries more than 2 decimals.
        #[test]
        fn fair_share_has_at_most_two_decimals(
            minor in 0i64..10_000_000_000i64,
            count in 1usize..50usize,
        ) {
            let share = fair_share(Money::from_minor(minor), count).unwrap().to_major();
            let scaled = share * 100.0;
            prop_assert!((scaled - scaled.round()).abs() < 1e-6);
        }

        /// Property: even splits always sum exactly to the expense amount.
        #[test]
        fn split_evenly_conserves_the_total(
            minor in 0i64..10_000_000_000i64,
            count in 1u128..40u128,
        ) {
            let expense = test_expense(Money::from_minor(minor).to_major());
            let participants: Vec<_> = (1..=count).map(pid).collect();

            let splits = split_evenly(&expense, &participants).unwrap();
            let total: Money = splits
                .iter()
                .map(|s| Money::try_from_major(s.amount_owed).unwrap())
                .sum();
            prop_assert_eq!(total.minor(), minor);
        }
    }
}
