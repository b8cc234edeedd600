//! Transaction CLI commands
//!
//! Implements CLI commands for recording expenses and income, including
//! cost-center attribution and credit-card installments.

use clap::Subcommand;

use super::{parse_assignment, parse_date, parse_money, parse_month, parse_percentage};
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{FamfinError, FamfinResult};
use crate::models::{Split, TransactionKind};
use crate::services::{CostCenterService, CreateTransactionInput, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an expense (or income with --income)
    Add {
        /// Amount (e.g., "84.50"); for installments, the purchase total
        amount: String,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Attribute the whole amount to one cost center
        #[arg(long, value_name = "NAME")]
        cost_center: Option<String>,
        /// Share among all cost centers by their default splits
        #[arg(long)]
        shared: bool,
        /// Fixed-amount split (e.g., --split Alice=30)
        #[arg(long = "split", value_name = "NAME=AMOUNT")]
        split: Vec<String>,
        /// Percentage split (e.g., --split-pct Alice=60)
        #[arg(long = "split-pct", value_name = "NAME=PCT")]
        split_pct: Vec<String>,
        /// Spread the amount over N monthly installments
        #[arg(long, value_name = "N")]
        installments: Option<u32>,
    },

    /// List transactions
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long, conflicts_with = "all")]
        month: Option<String>,
        /// List every transaction
        #[arg(long)]
        all: bool,
    },

    /// Show a transaction with each cost center's share
    Show {
        /// Transaction ID (full or short form)
        id: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID (full or short form)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(storage: &Storage, cmd: TransactionCommands) -> FamfinResult<()> {
    let service = TransactionService::new(storage);
    let cost_centers = CostCenterService::new(storage);

    match cmd {
        TransactionCommands::Add {
            amount,
            income,
            date,
            description,
            category,
            cost_center,
            shared,
            split,
            split_pct,
            installments,
        } => {
            let kind = if income {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            let date = parse_date(date.as_deref())?;
            let mut input = CreateTransactionInput::new(kind, date, parse_money(&amount)?);
            input.description = description;
            input.category = category;
            input.is_shared = shared;

            if let Some(name) = cost_center {
                input.cost_center_id = Some(cost_centers.require(&name)?.id);
            }
            for arg in &split {
                let (name, value) = parse_assignment(arg)?;
                let id = cost_centers.require(&name)?.id;
                input.splits.push(Split::with_amount(id, parse_money(&value)?));
            }
            for arg in &split_pct {
                let (name, value) = parse_assignment(arg)?;
                let id = cost_centers.require(&name)?.id;
                input.splits.push(Split::with_percentage(id, parse_percentage(&value)?));
            }

            let attributions = [
                input.cost_center_id.is_some(),
                input.is_shared,
                !input.splits.is_empty(),
            ];
            if attributions.iter().filter(|set| **set).count() > 1 {
                return Err(FamfinError::Validation(
                    "Use only one of --cost-center, --shared or --split/--split-pct".into(),
                ));
            }

            match installments {
                Some(count) => {
                    let created = service.create_installments(input, count)?;
                    let all = cost_centers.list()?;
                    println!("Created {} installments:", created.len());
                    print!("{}", format_transaction_register(&created, &all));
                }
                None => {
                    let txn = service.create(input)?;
                    println!("Created transaction: {}", txn.id);
                    print!("{}", format_transaction_details(&txn, &cost_centers.list()?));
                }
            }
        }

        TransactionCommands::List { month, all } => {
            let transactions = if all {
                service.list()?
            } else {
                service.list_for_month(parse_month(month.as_deref())?)?
            };
            print!(
                "{}",
                format_transaction_register(&transactions, &cost_centers.list()?)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = find_transaction(&service, &id)?;
            print!("{}", format_transaction_details(&txn, &cost_centers.list()?));
        }

        TransactionCommands::Delete { id } => {
            let txn = find_transaction(&service, &id)?;
            service.delete(txn.id)?;
            println!("Deleted transaction: {}", txn.id);
        }
    }

    Ok(())
}

fn find_transaction(
    service: &TransactionService,
    id: &str,
) -> FamfinResult<crate::models::Transaction> {
    service.find(id)?.ok_or_else(|| FamfinError::NotFound {
        entity_type: "Transaction",
        identifier: id.to_string(),
    })
}
