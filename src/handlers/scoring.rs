//! Credit scoring API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{ApiResponse, CreditScoreRecord};
use crate::scoring::{PgScoringStore, ScoreOutcome, ScoringClient, ScoringService};

type SharedScoringService = Arc<ScoringService<PgScoringStore, ScoringClient>>;

/// POST /api/borrowers/:borrower_id/credit-score - Run the scoring pipeline
pub async fn calculate_credit_score(
    State(scoring_service): State<SharedScoringService>,
    Path(borrower_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ScoreOutcome>>, ApiError> {
    let outcome = scoring_service.calculate_credit_score(borrower_id).await?;

    Ok(Json(ApiResponse::ok(outcome)))
}

/// GET /api/borrowers/:borrower_id/credit-score - Most recent persisted score
pub async fn get_latest_credit_score(
    State(scoring_service): State<SharedScoringService>,
    Path(borrower_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CreditScoreRecord>>, ApiError> {
    let record = scoring_service
        .latest_credit_score(borrower_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No credit score recorded for borrower {}", borrower_id))
        })?;

    Ok(Json(ApiResponse::ok(record)))
}
