//! # Split Settlement
//!
//! Settles shared expenses within a group: net balances per participant and
//! a short, deterministic list of transfers that brings everyone to zero.
//!
//! ## Features
//!
//! - **Settlement calculator**: greedy debtor/creditor matching that keeps the
//!   participant input order and emits at most `debtors + creditors - 1` transfers
//! - **Exact money**: balances are kept in integer minor units, so they always
//!   sum to zero and settle without rounding residue
//! - **Expense groups**: membership and expense bookkeeping with removal cascade
//! - **Summaries**: totals and "A owes B amount" statements for display
//! - **Configuration**: currency scale and dangling-reference policy from TOML or env
//!
//! ## Quick Start
//!
//! ```rust
//! use split_settlement::{compute_settlement, Expense, Participant};
//! use bigdecimal::BigDecimal;
//!
//! let participants = vec![
//!     Participant::new("alice".to_string(), "Alice".to_string(), None),
//!     Participant::new("bob".to_string(), "Bob".to_string(), None),
//! ];
//! let expenses = vec![Expense::new(
//!     "dinner".to_string(),
//!     "Dinner".to_string(),
//!     BigDecimal::from(100),
//!     "alice".to_string(),
//!     vec!["alice".to_string(), "bob".to_string()],
//! )];
//!
//! let transfers = compute_settlement(&participants, &expenses).unwrap();
//! assert_eq!(transfers.len(), 1);
//! assert_eq!(transfers[0].from, "bob");
//! assert_eq!(transfers[0].amount.to_string(), "50.00");
//! ```

pub mod config;
pub mod group;
pub mod settlement;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use group::{ExpenseBuilder, ExpenseGroup, PaidTotal, SettlementStatement, SettlementSummary};
pub use settlement::{
    accumulate_balances, compute_balances, compute_settlement, split_shares, Balances,
    SettlementCalculator,
};
pub use traits::*;
pub use types::*;

// Re-export expense patterns for convenience
pub use group::expense::patterns;
