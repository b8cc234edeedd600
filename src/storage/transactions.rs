//! Transaction repository
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FamfinError;
use crate::models::{CostCenterId, MonthYear, Transaction, TransactionId};

use super::file_io::{lock_error, read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    transactions: RwLock<HashMap<TransactionId, Transaction>>,
}

impl TransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            transactions: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), FamfinError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut transactions = self.transactions.write().map_err(lock_error)?;
        transactions.clear();
        for txn in file_data.transactions {
            transactions.insert(txn.id, txn);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), FamfinError> {
        let file_data = TransactionData {
            transactions: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, FamfinError> {
        let transactions = self.transactions.read().map_err(lock_error)?;
        Ok(transactions.get(&id).cloned())
    }

    /// All transactions ordered by date, then creation time
    pub fn get_all(&self) -> Result<Vec<Transaction>, FamfinError> {
        let transactions = self.transactions.read().map_err(lock_error)?;
        let mut list: Vec<_> = transactions.values().cloned().collect();
        sort_by_date(&mut list);
        Ok(list)
    }

    /// Transactions dated within a month
    pub fn get_for_month(&self, month: MonthYear) -> Result<Vec<Transaction>, FamfinError> {
        let transactions = self.transactions.read().map_err(lock_error)?;
        let mut list: Vec<_> = transactions
            .values()
            .filter(|t| month.contains(t.date))
            .cloned()
            .collect();
        sort_by_date(&mut list);
        Ok(list)
    }

    /// Transactions that mention a cost center, directly or through a split
    pub fn get_for_cost_center(
        &self,
        cost_center_id: CostCenterId,
    ) -> Result<Vec<Transaction>, FamfinError> {
        let transactions = self.transactions.read().map_err(lock_error)?;
        let mut list: Vec<_> = transactions
            .values()
            .filter(|t| {
                t.cost_center_id == Some(cost_center_id)
                    || t.splits.iter().any(|s| s.cost_center_id == cost_center_id)
            })
            .cloned()
            .collect();
        sort_by_date(&mut list);
        Ok(list)
    }

    pub fn upsert(&self, txn: Transaction) -> Result<(), FamfinError> {
        let mut transactions = self.transactions.write().map_err(lock_error)?;
        transactions.insert(txn.id, txn);
        Ok(())
    }

    pub fn delete(&self, id: TransactionId) -> Result<bool, FamfinError> {
        let mut transactions = self.transactions.write().map_err(lock_error)?;
        Ok(transactions.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, FamfinError> {
        let transactions = self.transactions.read().map_err(lock_error)?;
        Ok(transactions.len())
    }
}

fn sort_by_date(list: &mut [Transaction]) {
    list.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Split};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        (temp_dir, repo)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let txn = Transaction::expense(date(2025, 1, 15), Money::from_cents(5_000));
        let id = txn.id;
        repo.upsert(txn).unwrap();
        repo.save().unwrap();

        let reloaded = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(id).unwrap().unwrap().amount.cents(), 5_000);
    }

    #[test]
    fn test_get_for_month_sorted() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(Transaction::expense(date(2025, 1, 20), Money::from_cents(300)))
            .unwrap();
        repo.upsert(Transaction::expense(date(2025, 1, 5), Money::from_cents(100)))
            .unwrap();
        repo.upsert(Transaction::expense(date(2025, 2, 1), Money::from_cents(200)))
            .unwrap();

        let jan = repo
            .get_for_month(MonthYear::new(2025, 1).unwrap())
            .unwrap();
        let amounts: Vec<_> = jan.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![100, 300]);
    }

    #[test]
    fn test_get_for_cost_center() {
        let (_temp_dir, repo) = create_test_repo();
        let alice = CostCenterId::new();
        let bob = CostCenterId::new();

        let mut direct = Transaction::expense(date(2025, 1, 1), Money::from_cents(100));
        direct.assign_to(alice);
        let mut split = Transaction::expense(date(2025, 1, 2), Money::from_cents(200));
        split.add_split(Split::with_percentage(bob, 50.0));
        split.add_split(Split::with_percentage(alice, 50.0));
        let mut other = Transaction::expense(date(2025, 1, 3), Money::from_cents(300));
        other.assign_to(bob);

        for txn in [direct, split, other] {
            repo.upsert(txn).unwrap();
        }

        assert_eq!(repo.get_for_cost_center(alice).unwrap().len(), 2);
        assert_eq!(repo.count().unwrap(), 3);
    }

    #[test]
    fn test_legacy_category_object_is_normalized() {
        let (temp_dir, repo) = create_test_repo();
        let json = r#"{"transactions": [{
            "id": "8d3f2a40-1c1e-4a51-9a84-0f2b6c1d9e77",
            "date": "2025-03-02",
            "amount": 1250,
            "category": {"name": "Groceries"},
            "created_at": "2025-03-02T10:00:00Z",
            "updated_at": "2025-03-02T10:00:00Z"
        }]}"#;
        std::fs::write(temp_dir.path().join("transactions.json"), json).unwrap();

        repo.load().unwrap();
        let txns = repo.get_all().unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].category.as_deref(), Some("Groceries"));
    }
}
