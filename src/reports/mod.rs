//! Reports for famfin
//!
//! Reports read from storage and format for the terminal or CSV; they never
//! write data.

pub mod responsible;

pub use responsible::ResponsibleReport;
