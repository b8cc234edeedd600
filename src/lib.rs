//! famfin - family finance allocation and expense splitting
//!
//! This library provides the core of the famfin household budgeting tool:
//! distributing a monthly income across needs, wants and investments, and
//! working out which member of the family is responsible for each expense.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `allocation`: Income distribution engine (pure, no I/O)
//! - `split`: Cost-center split calculator and installments (pure, no I/O)
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, cost centers, transactions, budgets)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`, `reports`, `export`, `cli`: Terminal output and commands
//!
//! # Example
//!
//! ```rust,ignore
//! use famfin::allocation::{calculate_distribution, AllocationPolicy};
//! use famfin::models::{BudgetCategory, MacroGroup, Money};
//!
//! let categories = vec![BudgetCategory::new("Housing", Some(MacroGroup::Needs))];
//! let rows = calculate_distribution(
//!     Money::from_cents(500_000),
//!     20,
//!     &categories,
//!     &AllocationPolicy::default(),
//! );
//! ```

pub mod allocation;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod split;
pub mod storage;

pub use error::{FamfinError, FamfinResult};
