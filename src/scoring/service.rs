//! Credit scoring service - orchestrates the payload builder pipeline
//!
//! Fetch order: the borrower record first (its failure is fatal), then the
//! secondary datasets, each independently fault-tolerant. Dependent fetches
//! are sequenced on the identifiers returned by the previous step
//! (applications before contracts, contracts before repayments).

use uuid::Uuid;

use crate::error::ApiError;
use crate::models::CreditScoreRecord;

use super::client::{ScoreOutcome, ScoreSubmitter};
use super::payload::ScoringPayload;
use super::store::ScoringStore;

/// Credit scoring service over an explicitly passed store and submitter
#[derive(Clone)]
pub struct ScoringService<S, C> {
    store: S,
    submitter: C,
}

impl<S: ScoringStore, C: ScoreSubmitter> ScoringService<S, C> {
    /// Create a new scoring service
    pub fn new(store: S, submitter: C) -> Self {
        Self { store, submitter }
    }

    /// Run the full pipeline for a borrower: gather records, normalize,
    /// submit to the scoring service, and persist the returned score.
    ///
    /// Nothing is persisted when the submission fails at the transport or
    /// application level.
    pub async fn calculate_credit_score(
        &self,
        borrower_id: Uuid,
    ) -> Result<ScoreOutcome, ApiError> {
        // Mandatory fetch; without the borrower there is nothing to score.
        let borrower = self.store.borrower(borrower_id).await?;

        let addresses = fold_missing("addresses", self.store.addresses(borrower_id).await);
        let next_of_kin = fold_missing("next_of_kin", self.store.next_of_kin(borrower_id).await);
        let farms = fold_missing("farms", self.store.farms(borrower_id).await);

        let farm_ids: Vec<Uuid> = farms.iter().map(|f| f.id).collect();
        let production = fold_missing(
            "production_records",
            self.store.production_records(&farm_ids).await,
        );

        let applications = fold_missing(
            "loan_applications",
            self.store.loan_applications(borrower_id).await,
        );

        let application_ids: Vec<Uuid> = applications.iter().map(|a| a.id).collect();
        let contracts = fold_missing(
            "loan_contracts",
            self.store.loan_contracts(&application_ids).await,
        );

        let contract_ids: Vec<Uuid> = contracts.iter().map(|c| c.id).collect();
        let repayments = fold_missing("repayments", self.store.repayments(&contract_ids).await);

        let transactions = fold_missing("transactions", self.store.transactions(borrower_id).await);

        let payload = ScoringPayload::assemble(
            &borrower,
            &addresses,
            &next_of_kin,
            &farms,
            &production,
            &applications,
            &contracts,
            &repayments,
            &transactions,
        );

        let outcome = self.submitter.submit(&payload).await?;

        let record = self
            .store
            .insert_credit_score(borrower_id, outcome.credit_score)
            .await?;

        tracing::info!(
            borrower_id = %borrower_id,
            record_id = %record.id,
            credit_score = outcome.credit_score,
            credit_rating = %outcome.credit_rating,
            "Credit score persisted"
        );

        Ok(outcome)
    }

    /// Most recent persisted score for a borrower
    pub async fn latest_credit_score(
        &self,
        borrower_id: Uuid,
    ) -> Result<Option<CreditScoreRecord>, ApiError> {
        self.store.latest_credit_score(borrower_id).await
    }
}

/// Fold a failed secondary fetch into an empty dataset so the pipeline can
/// continue. The degrade is logged, never silent.
fn fold_missing<T>(dataset: &str, result: Result<Vec<T>, ApiError>) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(
                dataset = dataset,
                error = %err,
                "Secondary fetch failed, continuing with empty dataset"
            );
            Vec::new()
        }
    }
}
