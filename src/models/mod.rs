//! Core data models for famfin
//!
//! Budget categories and their macro groups, derived distributions, cost
//! centers, transactions with splits, and confirmed monthly budgets.

pub mod budget;
pub mod category;
pub mod cost_center;
pub mod distribution;
pub mod ids;
pub mod macro_group;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::Budget;
pub use category::BudgetCategory;
pub use cost_center::CostCenter;
pub use distribution::Distribution;
pub use ids::{CategoryId, CostCenterId, TransactionId};
pub use macro_group::MacroGroup;
pub use money::Money;
pub use period::MonthYear;
pub use transaction::{Installment, Split, Transaction, TransactionKind};
