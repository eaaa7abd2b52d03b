//! Credit scoring route definitions

use axum::{routing::post, Router};

use crate::handlers::scoring::{calculate_credit_score, get_latest_credit_score};
use crate::state::AppState;

pub fn scoring_routes() -> Router<AppState> {
    Router::new().route(
        "/api/borrowers/:borrower_id/credit-score",
        post(calculate_credit_score).get(get_latest_credit_score),
    )
}
