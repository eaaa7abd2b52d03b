//! Loan summary route definitions

use axum::{routing::get, Router};

use crate::handlers::loans::get_loan_summary;
use crate::state::AppState;

pub fn loan_routes() -> Router<AppState> {
    Router::new().route(
        "/api/borrowers/:borrower_id/loan-summary",
        get(get_loan_summary),
    )
}
