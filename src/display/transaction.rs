//! Transaction display formatting
//!
//! Register rows show who carries each transaction: a single cost center,
//! everyone ("shared"), or a number of explicit splits.

use crate::models::{CostCenter, Transaction, TransactionKind};
use crate::split::shares_for_transaction;

/// Describe who carries a transaction
fn responsible_label(txn: &Transaction, cost_centers: &[CostCenter]) -> String {
    if txn.has_splits() {
        return format!("split ({})", txn.splits.len());
    }
    if txn.is_shared {
        return "shared".to_string();
    }
    match txn.cost_center_id {
        Some(id) => cost_centers
            .iter()
            .find(|cc| cc.id == id)
            .map_or_else(|| id.to_string(), |cc| cc.name.clone()),
        None => "-".to_string(),
    }
}

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, cost_centers: &[CostCenter]) -> String {
    let sign = match txn.kind {
        TransactionKind::Expense => "-",
        TransactionKind::Income => "+",
    };
    let description = match txn.installment {
        Some(installment) => format!("{} ({})", txn.description, installment),
        None => txn.description.clone(),
    };

    format!(
        "{} {:24} {:16} {:14} {:>12}",
        txn.date.format("%Y-%m-%d"),
        truncate(&description, 24),
        truncate(txn.category.as_deref().unwrap_or("-"), 16),
        truncate(&responsible_label(txn, cost_centers), 14),
        format!("{}{}", sign, txn.amount)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], cost_centers: &[CostCenter]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:10} {:24} {:16} {:14} {:>12}\n",
        "Date", "Description", "Category", "Who", "Amount"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, cost_centers));
        output.push('\n');
    }

    output
}

/// Format a transaction with each cost center's computed share
pub fn format_transaction_details(txn: &Transaction, cost_centers: &[CostCenter]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format("%Y-%m-%d")));
    output.push_str(&format!("Kind:        {}\n", txn.kind));
    output.push_str(&format!("Amount:      {}\n", txn.amount));

    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }
    if let Some(category) = &txn.category {
        output.push_str(&format!("Category:    {}\n", category));
    }
    if let Some(installment) = txn.installment {
        output.push_str(&format!("Installment: {}\n", installment));
    }

    let shares = shares_for_transaction(txn, cost_centers);
    if shares.is_empty() {
        output.push_str("Responsible: (unattributed)\n");
    } else {
        output.push_str("Responsible:\n");
        for share in shares {
            let name = cost_centers
                .iter()
                .find(|cc| cc.id == share.cost_center_id)
                .map_or_else(|| share.cost_center_id.to_string(), |cc| cc.name.clone());
            output.push_str(&format!("  {:<20} {:>12}\n", name, share.amount.to_string()));
        }
    }

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Installment, Money, Split};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World!", 8), "Hello...");
    }

    #[test]
    fn test_format_row_labels() {
        let alice = CostCenter::new("Alice");
        let cost_centers = vec![alice.clone()];

        let mut direct = Transaction::expense(date(), Money::from_cents(5_000));
        direct.description = "Market".into();
        direct.assign_to(alice.id);
        let row = format_transaction_row(&direct, &cost_centers);
        assert!(row.contains("Alice"));
        assert!(row.contains("-$50.00"));

        let mut shared = Transaction::income(date(), Money::from_cents(100));
        shared.mark_shared();
        shared.installment = Some(Installment { number: 2, total: 3 });
        let row = format_transaction_row(&shared, &cost_centers);
        assert!(row.contains("shared"));
        assert!(row.contains("(2/3)"));
        assert!(row.contains("+$1.00"));
    }

    #[test]
    fn test_details_show_rescaled_shares() {
        let alice = CostCenter::new("Alice");
        let bob = CostCenter::new("Bob");
        let mut txn = Transaction::expense(date(), Money::from_cents(10_000));
        txn.add_split(Split::with_percentage(alice.id, 60.0));
        txn.add_split(Split::with_percentage(bob.id, 60.0));

        let output = format_transaction_details(&txn, &[alice, bob]);
        assert_eq!(output.matches("$50.00").count(), 2);
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(format_transaction_register(&[], &[]), "No transactions found.\n");
    }
}
