//! Loan summary API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::loans::{ExistingLoanSummary, LoanAggregator, PgLoanStore};
use crate::models::ApiResponse;

/// GET /api/borrowers/:borrower_id/loan-summary - Summarize existing loans
pub async fn get_loan_summary(
    State(aggregator): State<Arc<LoanAggregator<PgLoanStore>>>,
    Path(borrower_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ExistingLoanSummary>>, ApiError> {
    let summary = aggregator.summarize(borrower_id).await;

    Ok(Json(ApiResponse::ok(summary)))
}
