//! Data access for loan aggregation

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{LoanContract, RepaymentInstallment};

/// Read interface consumed by the borrower loan aggregator.
///
/// Passed explicitly into the aggregator so the failure-folding policy can be
/// exercised with in-memory doubles.
#[async_trait]
pub trait LoanStore: Send + Sync {
    /// All active contracts rooted at the borrower's loan applications
    async fn active_contracts(&self, borrower_id: Uuid) -> Result<Vec<LoanContract>, ApiError>;

    /// Installments with a non-null paid date for one contract
    async fn paid_installments(
        &self,
        contract_id: Uuid,
    ) -> Result<Vec<RepaymentInstallment>, ApiError>;
}

/// Postgres-backed loan store
#[derive(Clone)]
pub struct PgLoanStore {
    pool: PgPool,
}

impl PgLoanStore {
    /// Create a new store over a connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanStore for PgLoanStore {
    async fn active_contracts(&self, borrower_id: Uuid) -> Result<Vec<LoanContract>, ApiError> {
        let contracts = sqlx::query_as::<_, LoanContract>(
            r#"
            SELECT c.*
            FROM loan_contracts c
            JOIN loan_applications a ON a.id = c.application_id
            WHERE a.borrower_id = $1 AND c.status = 'active'
            ORDER BY c.created_at
            "#,
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(contracts)
    }

    async fn paid_installments(
        &self,
        contract_id: Uuid,
    ) -> Result<Vec<RepaymentInstallment>, ApiError> {
        let installments = sqlx::query_as::<_, RepaymentInstallment>(
            r#"
            SELECT *
            FROM repayment_installments
            WHERE contract_id = $1 AND paid_at IS NOT NULL
            ORDER BY due_date
            "#,
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(installments)
    }
}
