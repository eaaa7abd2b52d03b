//! Borrower loan summary calculations
//!
//! Interest is a flat one-time percentage of principal, not amortized per
//! period. Outstanding balances are clamped at zero, and only installments
//! with a confirmed paid date count as repaid.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::LoanContract;

use super::store::LoanStore;

/// Total amount owed on a contract: principal plus flat interest.
///
/// A missing or negative rate contributes no interest, so the result is
/// exactly the principal.
pub fn total_owed(principal: f64, interest_rate_percent: Option<f64>) -> f64 {
    let rate = interest_rate_percent.filter(|r| *r > 0.0).unwrap_or(0.0);
    principal + principal * (rate / 100.0)
}

/// Outstanding balance on a contract given the sum of confirmed repayments,
/// floored at zero
pub fn outstanding_balance(contract: &LoanContract, amount_repaid: f64) -> f64 {
    (total_owed(contract.principal, contract.interest_rate) - amount_repaid).max(0.0)
}

/// Rounded arithmetic mean of the populated contract durations; 0 if none
fn mean_duration_days(durations: &[i32]) -> i32 {
    if durations.is_empty() {
        return 0;
    }
    let sum: i64 = durations.iter().map(|d| *d as i64).sum();
    (sum as f64 / durations.len() as f64).round() as i32
}

/// Borrower-level summary of existing debt across active contracts
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExistingLoanSummary {
    pub has_existing_loans: bool,
    pub total_outstanding_amount: f64,
    pub average_duration_days: i32,
}

impl ExistingLoanSummary {
    /// Zero-value summary used when the borrower has no active contracts,
    /// and as the fail-safe default when aggregation cannot complete
    pub fn none() -> Self {
        Self {
            has_existing_loans: false,
            total_outstanding_amount: 0.0,
            average_duration_days: 0,
        }
    }
}

/// Borrower loan aggregator over an explicitly passed loan store
#[derive(Clone)]
pub struct LoanAggregator<S> {
    store: S,
}

impl<S: LoanStore> LoanAggregator<S> {
    /// Create a new aggregator over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Summarize a borrower's existing loans.
    ///
    /// Any failure while enumerating the borrower's contracts collapses the
    /// result to the zero-value summary. That fail-safe-to-no-debt default is
    /// a deliberate policy, not an accident; see DESIGN.md.
    pub async fn summarize(&self, borrower_id: Uuid) -> ExistingLoanSummary {
        match self.try_summarize(borrower_id).await {
            Ok(summary) => summary,
            Err(err) => {
                tracing::warn!(
                    borrower_id = %borrower_id,
                    error = %err,
                    "Loan aggregation failed, defaulting to no existing loans"
                );
                ExistingLoanSummary::none()
            }
        }
    }

    async fn try_summarize(&self, borrower_id: Uuid) -> Result<ExistingLoanSummary, ApiError> {
        let contracts = self.store.active_contracts(borrower_id).await?;

        if contracts.is_empty() {
            return Ok(ExistingLoanSummary::none());
        }

        let mut total_outstanding = 0.0;
        let mut durations = Vec::new();

        for contract in &contracts {
            let amount_repaid = match self.store.paid_installments(contract.id).await {
                Ok(installments) => installments.iter().map(|i| i.amount).sum(),
                Err(err) => {
                    // A ledger read failure means we cannot confirm any
                    // repayment, so the contract counts at its full total owed.
                    tracing::warn!(
                        contract_id = %contract.id,
                        error = %err,
                        "Repayment ledger read failed, treating contract as unrepaid"
                    );
                    0.0
                }
            };

            total_outstanding += outstanding_balance(contract, amount_repaid);

            if let Some(days) = contract.duration_days {
                durations.push(days);
            }
        }

        Ok(ExistingLoanSummary {
            has_existing_loans: true,
            total_outstanding_amount: total_outstanding,
            average_duration_days: mean_duration_days(&durations),
        })
    }
}
