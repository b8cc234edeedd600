//! Split calculator
//!
//! Works out each cost center's monetary part of a transaction, tolerating
//! splits that over- or under-claim the transaction total, and sums those
//! parts per responsible party over a period. Also splits credit-card
//! purchases into installments.
//!
//! Pure and synchronous, like the allocation engine: persistence happens in
//! the services after the user confirms.

mod aggregate;
mod calculator;
mod installments;

pub use aggregate::{ResponsibleEntry, ResponsibleTotals};
pub use calculator::{compute_split_amount, shares_for_transaction, Share, ShareSource};
pub use installments::split_installments;
