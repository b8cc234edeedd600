//! Service layer for famfin
//!
//! Services sit on top of the storage layer: they validate input, resolve
//! names to records, persist changes and write the audit log.

pub mod budget;
pub mod category;
pub mod cost_center;
pub mod transaction;

pub use budget::{BudgetLine, BudgetService};
pub use category::CategoryService;
pub use cost_center::CostCenterService;
pub use transaction::{CreateTransactionInput, TransactionService};
