//! Data access for the credit scoring pipeline

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    Address, Borrower, CreditScoreRecord, Farm, LoanApplication, LoanContract, NextOfKin,
    ProductionRecord, RepaymentInstallment, TransactionHistory,
};

/// Read/write interface consumed by the scoring service.
///
/// The borrower fetch is the only mandatory one; every other dataset may be
/// folded to an empty default by the caller when its fetch fails.
#[async_trait]
pub trait ScoringStore: Send + Sync {
    async fn borrower(&self, borrower_id: Uuid) -> Result<Borrower, ApiError>;

    async fn addresses(&self, borrower_id: Uuid) -> Result<Vec<Address>, ApiError>;

    async fn next_of_kin(&self, borrower_id: Uuid) -> Result<Vec<NextOfKin>, ApiError>;

    async fn farms(&self, borrower_id: Uuid) -> Result<Vec<Farm>, ApiError>;

    async fn production_records(
        &self,
        farm_ids: &[Uuid],
    ) -> Result<Vec<ProductionRecord>, ApiError>;

    async fn loan_applications(&self, borrower_id: Uuid)
        -> Result<Vec<LoanApplication>, ApiError>;

    async fn loan_contracts(
        &self,
        application_ids: &[Uuid],
    ) -> Result<Vec<LoanContract>, ApiError>;

    async fn repayments(
        &self,
        contract_ids: &[Uuid],
    ) -> Result<Vec<RepaymentInstallment>, ApiError>;

    async fn transactions(&self, borrower_id: Uuid) -> Result<Vec<TransactionHistory>, ApiError>;

    async fn insert_credit_score(
        &self,
        borrower_id: Uuid,
        score: f64,
    ) -> Result<CreditScoreRecord, ApiError>;

    async fn latest_credit_score(
        &self,
        borrower_id: Uuid,
    ) -> Result<Option<CreditScoreRecord>, ApiError>;
}

/// Postgres-backed scoring store
#[derive(Clone)]
pub struct PgScoringStore {
    pool: PgPool,
}

impl PgScoringStore {
    /// Create a new store over a connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoringStore for PgScoringStore {
    async fn borrower(&self, borrower_id: Uuid) -> Result<Borrower, ApiError> {
        let borrower = sqlx::query_as::<_, Borrower>("SELECT * FROM borrowers WHERE id = $1")
            .bind(borrower_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        borrower.ok_or_else(|| ApiError::NotFound(format!("Borrower {} not found", borrower_id)))
    }

    async fn addresses(&self, borrower_id: Uuid) -> Result<Vec<Address>, ApiError> {
        let rows = sqlx::query_as::<_, Address>(
            "SELECT * FROM addresses WHERE borrower_id = $1 ORDER BY created_at",
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(rows)
    }

    async fn next_of_kin(&self, borrower_id: Uuid) -> Result<Vec<NextOfKin>, ApiError> {
        let rows = sqlx::query_as::<_, NextOfKin>(
            "SELECT * FROM next_of_kin WHERE borrower_id = $1 ORDER BY created_at",
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(rows)
    }

    async fn farms(&self, borrower_id: Uuid) -> Result<Vec<Farm>, ApiError> {
        let rows = sqlx::query_as::<_, Farm>(
            "SELECT * FROM farms WHERE borrower_id = $1 ORDER BY created_at",
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(rows)
    }

    async fn production_records(
        &self,
        farm_ids: &[Uuid],
    ) -> Result<Vec<ProductionRecord>, ApiError> {
        if farm_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ProductionRecord>(
            "SELECT * FROM production_records WHERE farm_id = ANY($1) ORDER BY created_at",
        )
        .bind(farm_ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(rows)
    }

    async fn loan_applications(
        &self,
        borrower_id: Uuid,
    ) -> Result<Vec<LoanApplication>, ApiError> {
        let rows = sqlx::query_as::<_, LoanApplication>(
            "SELECT * FROM loan_applications WHERE borrower_id = $1 ORDER BY created_at",
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(rows)
    }

    async fn loan_contracts(
        &self,
        application_ids: &[Uuid],
    ) -> Result<Vec<LoanContract>, ApiError> {
        if application_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, LoanContract>(
            "SELECT * FROM loan_contracts WHERE application_id = ANY($1) ORDER BY created_at",
        )
        .bind(application_ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(rows)
    }

    async fn repayments(
        &self,
        contract_ids: &[Uuid],
    ) -> Result<Vec<RepaymentInstallment>, ApiError> {
        if contract_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, RepaymentInstallment>(
            "SELECT * FROM repayment_installments WHERE contract_id = ANY($1) ORDER BY due_date",
        )
        .bind(contract_ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(rows)
    }

    async fn transactions(&self, borrower_id: Uuid) -> Result<Vec<TransactionHistory>, ApiError> {
        let rows = sqlx::query_as::<_, TransactionHistory>(
            "SELECT * FROM transaction_history WHERE borrower_id = $1 ORDER BY created_at",
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(rows)
    }

    async fn insert_credit_score(
        &self,
        borrower_id: Uuid,
        score: f64,
    ) -> Result<CreditScoreRecord, ApiError> {
        let record = sqlx::query_as::<_, CreditScoreRecord>(
            r#"
            INSERT INTO credit_score_records (borrower_id, score)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(borrower_id)
        .bind(score)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(record)
    }

    async fn latest_credit_score(
        &self,
        borrower_id: Uuid,
    ) -> Result<Option<CreditScoreRecord>, ApiError> {
        let record = sqlx::query_as::<_, CreditScoreRecord>(
            r#"
            SELECT * FROM credit_score_records
            WHERE borrower_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(borrower_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(record)
    }
}
