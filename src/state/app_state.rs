//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::loans::{LoanAggregator, PgLoanStore};
use crate::scoring::{PgScoringStore, ScoringClient, ScoringService};

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub loan_aggregator: Arc<LoanAggregator<PgLoanStore>>,
    pub scoring_service: Arc<ScoringService<PgScoringStore, ScoringClient>>,
    pub db_pool: PgPool,
}

impl AppState {
    pub fn new(
        loan_aggregator: Arc<LoanAggregator<PgLoanStore>>,
        scoring_service: Arc<ScoringService<PgScoringStore, ScoringClient>>,
        db_pool: PgPool,
    ) -> Self {
        Self {
            loan_aggregator,
            scoring_service,
            db_pool,
        }
    }
}

impl FromRef<AppState> for Arc<LoanAggregator<PgLoanStore>> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_aggregator.clone()
    }
}

impl FromRef<AppState> for Arc<ScoringService<PgScoringStore, ScoringClient>> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.scoring_service.clone()
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
