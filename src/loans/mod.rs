//! Loan financial aggregation
//!
//! Computes per-contract outstanding balances from the repayment ledger and
//! rolls them up into a borrower-level summary of existing debt.

pub mod store;
pub mod summary;

pub use store::{LoanStore, PgLoanStore};
pub use summary::{total_owed, ExistingLoanSummary, LoanAggregator};
