//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; printing is left to the CLI handlers.

pub mod budget;
pub mod category;
pub mod cost_center;
pub mod transaction;

pub use budget::{format_budget_lines, format_plan};
pub use category::{format_category_list, format_category_tree};
pub use cost_center::format_cost_center_list;
pub use transaction::{format_transaction_details, format_transaction_register, format_transaction_row};
