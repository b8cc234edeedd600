//! Transaction service
//!
//! Records expenses and income with their cost-center attribution, and
//! expands credit-card purchases into monthly installment rows.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{FamfinError, FamfinResult};
use crate::models::{
    CostCenterId, Installment, Money, MonthYear, Split, Transaction, TransactionId,
    TransactionKind,
};
use crate::split::split_installments;
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub amount: Money,
    pub description: Option<String>,
    /// Category name; matched case-insensitively against known categories
    pub category: Option<String>,
    pub cost_center_id: Option<CostCenterId>,
    pub is_shared: bool,
    pub splits: Vec<Split>,
}

impl CreateTransactionInput {
    pub fn new(kind: TransactionKind, date: NaiveDate, amount: Money) -> Self {
        Self {
            kind,
            date,
            amount,
            description: None,
            category: None,
            cost_center_id: None,
            is_shared: false,
            splits: Vec::new(),
        }
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a single transaction
    pub fn create(&self, input: CreateTransactionInput) -> FamfinResult<Transaction> {
        let txn = self.build(&input)?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(audit_label(&txn)),
            &txn,
        )?;

        info!(id = %txn.id, amount = %txn.amount, kind = %txn.kind, "created transaction");
        Ok(txn)
    }

    /// Create one transaction per installment, a month apart
    ///
    /// `input.amount` is the purchase total. Installment amounts add up to
    /// it exactly; fixed-amount splits are scaled to each installment and
    /// percentage splits are carried over unchanged.
    pub fn create_installments(
        &self,
        input: CreateTransactionInput,
        count: u32,
    ) -> FamfinResult<Vec<Transaction>> {
        if count == 0 {
            return Err(FamfinError::Validation(
                "Installment count must be at least 1".into(),
            ));
        }

        let template = self.build(&input)?;
        let parts = split_installments(input.amount, count);

        let mut created = Vec::with_capacity(parts.len());
        for (index, part) in parts.into_iter().enumerate() {
            let number = index as u32 + 1;
            let mut txn = template.clone();
            txn.id = TransactionId::new();
            txn.amount = part;
            txn.date = MonthYear::shift_date(input.date, index as u32);
            txn.installment = Some(Installment {
                number,
                total: count,
            });
            txn.splits = template
                .splits
                .iter()
                .map(|split| match split.amount {
                    Some(amount) => Split {
                        amount: Some(amount.scale(part, input.amount)),
                        ..split.clone()
                    },
                    None => split.clone(),
                })
                .collect();
            txn.validate()
                .map_err(|e| FamfinError::Validation(e.to_string()))?;
            created.push(txn);
        }

        for txn in &created {
            self.storage.transactions.upsert(txn.clone())?;
        }
        self.storage.transactions.save()?;

        for txn in &created {
            self.storage.log_create(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(audit_label(txn)),
                txn,
            )?;
        }

        info!(count, total = %input.amount, "created installment transactions");
        Ok(created)
    }

    pub fn get(&self, id: TransactionId) -> FamfinResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full id or by its short display form
    /// (`txn-1a2b3c4d` or `1a2b3c4d`)
    pub fn find(&self, identifier: &str) -> FamfinResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }

        let short = identifier.trim();
        let short = short.strip_prefix("txn-").unwrap_or(short).to_lowercase();
        if short.is_empty() {
            return Ok(None);
        }
        let mut matches = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| t.id.as_uuid().simple().to_string().starts_with(&short));

        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(Some(txn)),
            (Some(_), Some(_)) => Err(FamfinError::Validation(format!(
                "Transaction id '{}' is ambiguous",
                identifier
            ))),
            _ => Ok(None),
        }
    }

    pub fn list(&self) -> FamfinResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    pub fn list_for_month(&self, month: MonthYear) -> FamfinResult<Vec<Transaction>> {
        self.storage.transactions.get_for_month(month)
    }

    pub fn delete(&self, id: TransactionId) -> FamfinResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| FamfinError::NotFound {
                entity_type: "Transaction",
                identifier: id.to_string(),
            })?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(audit_label(&txn)),
            &txn,
        )?;

        Ok(txn)
    }

    /// Validate references and assemble a transaction without saving it
    fn build(&self, input: &CreateTransactionInput) -> FamfinResult<Transaction> {
        if let Some(id) = input.cost_center_id {
            self.require_cost_center(id)?;
        }
        for split in &input.splits {
            self.require_cost_center(split.cost_center_id)?;
            if split.percentage.is_some_and(|p| p < 0.0)
                || split.amount.is_some_and(|a| a.is_negative())
            {
                return Err(FamfinError::Validation(
                    "Split amounts and percentages cannot be negative".into(),
                ));
            }
        }

        let mut txn = Transaction::new(input.kind, input.date, input.amount);
        txn.description = input
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        txn.category = self.resolve_category(input.category.as_deref())?;
        txn.cost_center_id = input.cost_center_id;
        txn.is_shared = input.is_shared;
        txn.splits = input.splits.clone();

        txn.validate()
            .map_err(|e| FamfinError::Validation(e.to_string()))?;

        if txn.has_splits() && txn.splits_total() != txn.amount {
            debug!(
                amount = %txn.amount,
                splits_total = %txn.splits_total(),
                "split total differs from transaction amount"
            );
        }

        Ok(txn)
    }

    fn require_cost_center(&self, id: CostCenterId) -> FamfinResult<()> {
        match self.storage.cost_centers.get(id)? {
            Some(_) => Ok(()),
            None => Err(FamfinError::cost_center_not_found(id.to_string())),
        }
    }

    /// Canonical category name when known; unknown names are kept as typed
    fn resolve_category(&self, name: Option<&str>) -> FamfinResult<Option<String>> {
        let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) else {
            return Ok(None);
        };
        match self.storage.categories.get_by_name(name)? {
            Some(category) => Ok(Some(category.name)),
            None => {
                debug!(category = name, "transaction category is not a known budget category");
                Ok(Some(name.to_string()))
            }
        }
    }
}

fn audit_label(txn: &Transaction) -> String {
    match txn.installment {
        Some(installment) => format!("{} {} ({})", txn.date, txn.description, installment),
        None => format!("{} {}", txn.date, txn.description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FamfinPaths;
    use crate::models::{BudgetCategory, CostCenter, MacroGroup};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamfinPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn setup_cost_centers(storage: &Storage) -> (CostCenterId, CostCenterId) {
        let alice = CostCenter::with_default_split("Alice", 60.0);
        let bob = CostCenter::with_default_split("Bob", 40.0);
        let ids = (alice.id, bob.id);
        storage.cost_centers.upsert(alice).unwrap();
        storage.cost_centers.upsert(bob).unwrap();
        ids
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_direct_transaction() {
        let (_temp_dir, storage) = create_test_storage();
        let (alice, _) = setup_cost_centers(&storage);
        storage
            .categories
            .upsert(BudgetCategory::new("Groceries", Some(MacroGroup::Needs)))
            .unwrap();
        let service = TransactionService::new(&storage);

        let mut input = CreateTransactionInput::new(
            TransactionKind::Expense,
            date(2025, 1, 10),
            Money::from_cents(8_450),
        );
        input.description = Some("  Market  ".into());
        input.category = Some("groceries".into());
        input.cost_center_id = Some(alice);

        let txn = service.create(input).unwrap();

        assert_eq!(txn.description, "Market");
        assert_eq!(txn.category.as_deref(), Some("Groceries"));
        assert_eq!(service.list().unwrap().len(), 1);
        assert_eq!(storage.audit().entry_count().unwrap(), 1);
    }

    #[test]
    fn test_rejects_unknown_cost_center_and_bad_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut input = CreateTransactionInput::new(
            TransactionKind::Expense,
            date(2025, 1, 10),
            Money::from_cents(100),
        );
        input.cost_center_id = Some(CostCenterId::new());
        assert!(service.create(input).unwrap_err().is_not_found());

        let zero = CreateTransactionInput::new(
            TransactionKind::Expense,
            date(2025, 1, 10),
            Money::zero(),
        );
        assert!(service.create(zero).unwrap_err().is_validation());
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_overclaimed_splits_are_accepted() {
        let (_temp_dir, storage) = create_test_storage();
        let (alice, bob) = setup_cost_centers(&storage);
        let service = TransactionService::new(&storage);

        let mut input = CreateTransactionInput::new(
            TransactionKind::Expense,
            date(2025, 1, 10),
            Money::from_cents(10_000),
        );
        input.splits = vec![
            Split::with_percentage(alice, 60.0),
            Split::with_percentage(bob, 60.0),
        ];

        let txn = service.create(input).unwrap();
        assert_eq!(txn.splits_total(), Money::from_cents(12_000));
    }

    #[test]
    fn test_create_installments() {
        let (_temp_dir, storage) = create_test_storage();
        let (alice, bob) = setup_cost_centers(&storage);
        let service = TransactionService::new(&storage);

        let mut input = CreateTransactionInput::new(
            TransactionKind::Expense,
            date(2025, 1, 31),
            Money::from_cents(10_000),
        );
        input.description = Some("Laptop".into());
        input.splits = vec![
            Split::with_amount(alice, Money::from_cents(6_000)),
            Split::with_percentage(bob, 40.0),
        ];

        let created = service.create_installments(input, 3).unwrap();

        assert_eq!(created.len(), 3);
        let amounts: Vec<_> = created.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![3_334, 3_333, 3_333]);
        let dates: Vec<_> = created.iter().map(|t| t.date).collect();
        assert_eq!(
            dates,
            vec![date(2025, 1, 31), date(2025, 2, 28), date(2025, 3, 31)]
        );
        assert_eq!(created[1].installment, Some(Installment { number: 2, total: 3 }));
        assert_eq!(created[0].splits[0].amount, Some(Money::from_cents(2_000)));
        assert_eq!(created[0].splits[1].percentage, Some(40.0));
        assert_eq!(storage.transactions.count().unwrap(), 3);
    }

    #[test]
    fn test_zero_installments_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let input = CreateTransactionInput::new(
            TransactionKind::Expense,
            date(2025, 1, 1),
            Money::from_cents(100),
        );
        assert!(service.create_installments(input, 0).unwrap_err().is_validation());
    }

    #[test]
    fn test_list_for_month_and_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let jan = service
            .create(CreateTransactionInput::new(
                TransactionKind::Income,
                date(2025, 1, 5),
                Money::from_cents(500_000),
            ))
            .unwrap();
        service
            .create(CreateTransactionInput::new(
                TransactionKind::Expense,
                date(2025, 2, 5),
                Money::from_cents(1_000),
            ))
            .unwrap();

        let month = MonthYear::new(2025, 1).unwrap();
        assert_eq!(service.list_for_month(month).unwrap().len(), 1);

        service.delete(jan.id).unwrap();
        assert!(service.list_for_month(month).unwrap().is_empty());
        assert!(service.get(jan.id).unwrap().is_none());
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service
            .create(CreateTransactionInput::new(
                TransactionKind::Expense,
                date(2025, 3, 1),
                Money::from_cents(2_500),
            ))
            .unwrap();

        let by_display = service.find(&txn.id.to_string()).unwrap().unwrap();
        assert_eq!(by_display.id, txn.id);
        let by_uuid = service.find(&txn.id.as_uuid().to_string()).unwrap().unwrap();
        assert_eq!(by_uuid.id, txn.id);
        assert!(service.find("txn-zzzz").unwrap().is_none());
    }
}
