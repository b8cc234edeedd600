//! Per-transaction share computation

use crate::models::{CostCenter, CostCenterId, Money, Split, Transaction};

/// Where a share came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareSource {
    /// The whole transaction was attributed to one cost center
    Direct,
    /// An explicit split row
    Split,
    /// A shared transaction without splits, using the cost center's default percentage
    SharedDefault,
}

/// One cost center's monetary part of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Share {
    pub cost_center_id: CostCenterId,
    pub amount: Money,
    pub source: ShareSource,
}

impl Share {
    /// Whether this share counts as "shared" in responsible-party totals
    pub fn is_shared(&self) -> bool {
        self.source != ShareSource::Direct
    }
}

/// Compute one split's contribution to a transaction
///
/// When the splits together claim more than the transaction amount, every
/// split is rescaled proportionally so they fit the real total. Otherwise the
/// split's own amount (or percentage of the transaction) is used as is,
/// including when the splits fall short of the total.
pub fn compute_split_amount(split: &Split, transaction_amount: Money, all_splits: &[Split]) -> Money {
    let nominal = split.nominal_amount(transaction_amount);
    let claimed: Money = all_splits
        .iter()
        .map(|s| s.nominal_amount(transaction_amount))
        .sum();

    if claimed > transaction_amount && claimed.is_positive() {
        transaction_amount.scale(nominal, claimed)
    } else {
        nominal
    }
}

/// Every cost center's share of one transaction
///
/// - explicit splits: one share per split, see [`compute_split_amount`]
/// - shared without splits: each active, non-bucket cost center with a
///   default percentage gets that percentage of the amount; others get nothing
/// - otherwise the assigned cost center gets the whole amount
/// - no assignment at all: no shares
pub fn shares_for_transaction(transaction: &Transaction, cost_centers: &[CostCenter]) -> Vec<Share> {
    if transaction.has_splits() {
        return transaction
            .splits
            .iter()
            .map(|split| Share {
                cost_center_id: split.cost_center_id,
                amount: compute_split_amount(split, transaction.amount, &transaction.splits),
                source: ShareSource::Split,
            })
            .collect();
    }

    if transaction.is_shared {
        return cost_centers
            .iter()
            .filter(|cc| cc.receives_default_share())
            .filter_map(|cc| {
                cc.default_split_percentage.map(|pct| Share {
                    cost_center_id: cc.id,
                    amount: transaction.amount.percent(pct),
                    source: ShareSource::SharedDefault,
                })
            })
            .collect();
    }

    transaction
        .cost_center_id
        .map(|id| Share {
            cost_center_id: id,
            amount: transaction.amount,
            source: ShareSource::Direct,
        })
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn money(units: i64) -> Money {
        Money::from_cents(units * 100)
    }

    #[test]
    fn test_overallocated_splits_rescaled() {
        let a = Split::with_amount(CostCenterId::new(), money(60));
        let b = Split::with_amount(CostCenterId::new(), money(60));
        let splits = vec![a.clone(), b.clone()];

        assert_eq!(compute_split_amount(&a, money(100), &splits), money(50));
        assert_eq!(compute_split_amount(&b, money(100), &splits), money(50));
    }

    #[test]
    fn test_underallocated_splits_used_as_is() {
        let a = Split::with_amount(CostCenterId::new(), money(30));
        let b = Split::with_amount(CostCenterId::new(), money(20));
        let splits = vec![a.clone(), b.clone()];

        assert_eq!(compute_split_amount(&a, money(100), &splits), money(30));
        assert_eq!(compute_split_amount(&b, money(100), &splits), money(20));
    }

    #[test]
    fn test_percentage_splits() {
        let a = Split::with_percentage(CostCenterId::new(), 70.0);
        let b = Split::with_percentage(CostCenterId::new(), 30.0);
        let splits = vec![a.clone(), b.clone()];

        assert_eq!(compute_split_amount(&a, money(250), &splits), Money::from_cents(17_500));
        assert_eq!(compute_split_amount(&b, money(250), &splits), Money::from_cents(7_500));
    }

    #[test]
    fn test_percentage_overallocation_rescaled() {
        let a = Split::with_percentage(CostCenterId::new(), 75.0);
        let b = Split::with_percentage(CostCenterId::new(), 75.0);
        let splits = vec![a.clone(), b.clone()];

        assert_eq!(compute_split_amount(&a, money(100), &splits), money(50));
    }

    #[test]
    fn test_empty_split_contributes_zero() {
        let empty = Split {
            cost_center_id: CostCenterId::new(),
            percentage: None,
            amount: None,
        };
        let splits = vec![empty.clone()];
        assert_eq!(compute_split_amount(&empty, money(100), &splits), Money::zero());
    }

    #[test]
    fn test_shared_transaction_uses_defaults() {
        let alice = CostCenter::with_default_split("Alice", 60.0);
        let bob = CostCenter::with_default_split("Bob", 40.0);
        let bucket = CostCenter::shared_bucket("Shared");
        let mut inactive = CostCenter::with_default_split("Carol", 50.0);
        inactive.deactivate();
        let no_default = CostCenter::new("Dan");
        let cost_centers = vec![alice.clone(), bob.clone(), bucket, inactive, no_default];

        let mut txn = Transaction::expense(date(), money(200));
        txn.mark_shared();

        let shares = shares_for_transaction(&txn, &cost_centers);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].cost_center_id, alice.id);
        assert_eq!(shares[0].amount, money(120));
        assert_eq!(shares[1].cost_center_id, bob.id);
        assert_eq!(shares[1].amount, money(80));
        assert!(shares.iter().all(|s| s.source == ShareSource::SharedDefault));
    }

    #[test]
    fn test_explicit_splits_win_over_shared_flag() {
        let alice = CostCenter::with_default_split("Alice", 60.0);
        let mut txn = Transaction::expense(date(), money(100));
        txn.mark_shared();
        txn.add_split(Split::with_amount(alice.id, money(100)));

        let shares = shares_for_transaction(&txn, &[alice.clone()]);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].amount, money(100));
        assert_eq!(shares[0].source, ShareSource::Split);
    }

    #[test]
    fn test_direct_and_unassigned() {
        let alice = CostCenter::new("Alice");
        let mut txn = Transaction::expense(date(), money(42));
        assert!(shares_for_transaction(&txn, &[alice.clone()]).is_empty());

        txn.assign_to(alice.id);
        let shares = shares_for_transaction(&txn, &[alice.clone()]);
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].amount, money(42));
        assert!(!shares[0].is_shared());
    }
}
