//! Totals by responsible party across many transactions

use std::collections::HashMap;

use tracing::debug;

use super::calculator::shares_for_transaction;
use crate::models::{CostCenter, CostCenterId, Money, Transaction};

/// One cost center's totals for a period
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsibleEntry {
    pub cost_center_id: CostCenterId,
    pub name: String,
    /// Transactions attributed wholly to this cost center
    pub individual: Money,
    /// Parts of split or shared transactions
    pub shared: Money,
    pub total: Money,
    /// Share of the period total, 0-100
    pub percentage: f64,
}

/// Contributions per cost center over a set of transactions
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsibleTotals {
    /// Sum of all transaction amounts
    pub period_total: Money,
    pub entries: Vec<ResponsibleEntry>,
    /// Transactions with no cost center at all
    pub unattributed: Money,
}

impl ResponsibleTotals {
    /// Aggregate shares of `transactions` per cost center
    ///
    /// Entries follow the order of `cost_centers`; a cost center appears when
    /// it is active or received something. Shares pointing at an unknown cost
    /// center are still reported, named by their id.
    pub fn aggregate(transactions: &[Transaction], cost_centers: &[CostCenter]) -> Self {
        let mut sums: HashMap<CostCenterId, (Money, Money)> = HashMap::new();
        let mut order: Vec<CostCenterId> = cost_centers.iter().map(|cc| cc.id).collect();
        let mut period_total = Money::zero();
        let mut unattributed = Money::zero();

        for txn in transactions {
            period_total += txn.amount;

            let shares = shares_for_transaction(txn, cost_centers);
            if shares.is_empty() {
                unattributed += txn.amount;
                continue;
            }

            for share in shares {
                if !order.contains(&share.cost_center_id) {
                    order.push(share.cost_center_id);
                }
                let entry = sums
                    .entry(share.cost_center_id)
                    .or_insert((Money::zero(), Money::zero()));
                if share.is_shared() {
                    entry.1 += share.amount;
                } else {
                    entry.0 += share.amount;
                }
            }
        }

        let names: HashMap<CostCenterId, &CostCenter> =
            cost_centers.iter().map(|cc| (cc.id, cc)).collect();

        let entries = order
            .into_iter()
            .filter_map(|id| {
                let (individual, shared) = sums.get(&id).copied().unwrap_or_default();
                let known = names.get(&id);
                let active = known.map_or(false, |cc| cc.is_active);
                if !active && individual.is_zero() && shared.is_zero() {
                    return None;
                }
                let total = individual + shared;
                Some(ResponsibleEntry {
                    cost_center_id: id,
                    name: known.map_or_else(|| id.to_string(), |cc| cc.name.clone()),
                    individual,
                    shared,
                    total,
                    percentage: total.percentage_of(period_total),
                })
            })
            .collect::<Vec<_>>();

        debug!(
            transactions = transactions.len(),
            entries = entries.len(),
            %period_total,
            "aggregated responsible totals"
        );

        Self {
            period_total,
            entries,
            unattributed,
        }
    }

    /// Look up one cost center's entry
    pub fn entry(&self, cost_center_id: CostCenterId) -> Option<&ResponsibleEntry> {
        self.entries
            .iter()
            .find(|e| e.cost_center_id == cost_center_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Split;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn money(units: i64) -> Money {
        Money::from_cents(units * 100)
    }

    #[test]
    fn test_aggregate_individual_and_shared() {
        let alice = CostCenter::with_default_split("Alice", 60.0);
        let bob = CostCenter::with_default_split("Bob", 40.0);
        let cost_centers = vec![alice.clone(), bob.clone()];

        let mut direct = Transaction::expense(date(), money(100));
        direct.assign_to(alice.id);

        let mut shared = Transaction::expense(date(), money(200));
        shared.mark_shared();

        let mut split = Transaction::expense(date(), money(100));
        split.add_split(Split::with_amount(alice.id, money(60)));
        split.add_split(Split::with_amount(bob.id, money(60)));

        let unassigned = Transaction::expense(date(), money(100));

        let totals =
            ResponsibleTotals::aggregate(&[direct, shared, split, unassigned], &cost_centers);

        assert_eq!(totals.period_total, money(500));
        assert_eq!(totals.unattributed, money(100));

        let a = totals.entry(alice.id).unwrap();
        assert_eq!(a.individual, money(100));
        assert_eq!(a.shared, money(120 + 50));
        assert_eq!(a.total, money(270));
        assert!((a.percentage - 54.0).abs() < 1e-9);

        let b = totals.entry(bob.id).unwrap();
        assert_eq!(b.individual, Money::zero());
        assert_eq!(b.shared, money(80 + 50));
        assert!((b.percentage - 26.0).abs() < 1e-9);
    }

    #[test]
    fn test_inactive_without_activity_omitted() {
        let alice = CostCenter::new("Alice");
        let mut gone = CostCenter::new("Gone");
        gone.deactivate();

        let totals = ResponsibleTotals::aggregate(&[], &[alice.clone(), gone.clone()]);
        assert_eq!(totals.entries.len(), 1);
        assert_eq!(totals.entries[0].name, "Alice");
        assert_eq!(totals.entries[0].percentage, 0.0);
        assert!(totals.entry(gone.id).is_none());
    }

    #[test]
    fn test_unknown_cost_center_reported_by_id() {
        let stranger = CostCenterId::new();
        let mut txn = Transaction::expense(date(), money(10));
        txn.assign_to(stranger);

        let totals = ResponsibleTotals::aggregate(&[txn], &[]);
        assert_eq!(totals.entries.len(), 1);
        assert_eq!(totals.entries[0].name, stranger.to_string());
        assert!((totals.entries[0].percentage - 100.0).abs() < 1e-9);
    }
}
