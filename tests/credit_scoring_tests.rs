//! Credit scoring pipeline tests
//!
//! These tests drive the scoring service through in-memory store and
//! submitter doubles: persistence only on success, fatal borrower fetch,
//! independently degradable secondary datasets, and the transaction-data
//! whitelist applied end to end.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use farmcredit_server::error::ApiError;
use farmcredit_server::models::{
    Address, ApplicationStatus, Borrower, ContractStatus, CreditScoreRecord, Farm,
    LoanApplication, LoanContract, NextOfKin, ProductionRecord, RepaymentInstallment,
    TransactionHistory,
};
use farmcredit_server::scoring::{ScoreOutcome, ScoreSubmitter, ScoringPayload, ScoringService, ScoringStore};

// ============================================================================
// In-Memory Scoring Store
// ============================================================================

#[derive(Default)]
struct InMemoryScoringStore {
    borrower: Option<Borrower>,
    addresses: Vec<Address>,
    next_of_kin: Vec<NextOfKin>,
    farms: Vec<Farm>,
    production: Vec<ProductionRecord>,
    applications: Vec<LoanApplication>,
    contracts: Vec<LoanContract>,
    repayments: Vec<RepaymentInstallment>,
    transactions: Vec<TransactionHistory>,
    failing_datasets: Vec<&'static str>,
    persisted_scores: Mutex<Vec<(Uuid, f64)>>,
}

impl InMemoryScoringStore {
    fn with_borrower(borrower: Borrower) -> Self {
        Self {
            borrower: Some(borrower),
            ..Default::default()
        }
    }

    fn fails(&self, dataset: &'static str) -> Result<(), ApiError> {
        if self.failing_datasets.contains(&dataset) {
            Err(ApiError::DatabaseError(format!("{} unavailable", dataset)))
        } else {
            Ok(())
        }
    }

    fn persisted(&self) -> Vec<(Uuid, f64)> {
        self.persisted_scores.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoringStore for &InMemoryScoringStore {
    async fn borrower(&self, borrower_id: Uuid) -> Result<Borrower, ApiError> {
        self.borrower
            .clone()
            .ok_or_else(|| ApiError::NotFound(format!("Borrower {} not found", borrower_id)))
    }

    async fn addresses(&self, _borrower_id: Uuid) -> Result<Vec<Address>, ApiError> {
        self.fails("addresses")?;
        Ok(self.addresses.clone())
    }

    async fn next_of_kin(&self, _borrower_id: Uuid) -> Result<Vec<NextOfKin>, ApiError> {
        self.fails("next_of_kin")?;
        Ok(self.next_of_kin.clone())
    }

    async fn farms(&self, _borrower_id: Uuid) -> Result<Vec<Farm>, ApiError> {
        self.fails("farms")?;
        Ok(self.farms.clone())
    }

    async fn production_records(
        &self,
        farm_ids: &[Uuid],
    ) -> Result<Vec<ProductionRecord>, ApiError> {
        self.fails("production_records")?;
        Ok(self
            .production
            .iter()
            .filter(|p| farm_ids.contains(&p.farm_id))
            .cloned()
            .collect())
    }

    async fn loan_applications(
        &self,
        _borrower_id: Uuid,
    ) -> Result<Vec<LoanApplication>, ApiError> {
        self.fails("loan_applications")?;
        Ok(self.applications.clone())
    }

    async fn loan_contracts(
        &self,
        application_ids: &[Uuid],
    ) -> Result<Vec<LoanContract>, ApiError> {
        self.fails("loan_contracts")?;
        Ok(self
            .contracts
            .iter()
            .filter(|c| application_ids.contains(&c.application_id))
            .cloned()
            .collect())
    }

    async fn repayments(
        &self,
        contract_ids: &[Uuid],
    ) -> Result<Vec<RepaymentInstallment>, ApiError> {
        self.fails("repayments")?;
        Ok(self
            .repayments
            .iter()
            .filter(|r| contract_ids.contains(&r.contract_id))
            .cloned()
            .collect())
    }

    async fn transactions(&self, _borrower_id: Uuid) -> Result<Vec<TransactionHistory>, ApiError> {
        self.fails("transactions")?;
        Ok(self.transactions.clone())
    }

    async fn insert_credit_score(
        &self,
        borrower_id: Uuid,
        score: f64,
    ) -> Result<CreditScoreRecord, ApiError> {
        self.persisted_scores.lock().unwrap().push((borrower_id, score));
        Ok(CreditScoreRecord {
            id: Uuid::new_v4(),
            borrower_id,
            score,
            created_at: Utc::now(),
        })
    }

    async fn latest_credit_score(
        &self,
        borrower_id: Uuid,
    ) -> Result<Option<CreditScoreRecord>, ApiError> {
        Ok(self
            .persisted()
            .last()
            .map(|(id, score)| CreditScoreRecord {
                id: Uuid::new_v4(),
                borrower_id: *id,
                score: *score,
                created_at: Utc::now(),
            })
            .filter(|r| r.borrower_id == borrower_id))
    }
}

// ============================================================================
// Stub Submitter
// ============================================================================

enum SubmitBehavior {
    Succeed(f64, &'static str),
    HttpFailure,
    Rejected(&'static str),
}

struct StubSubmitter {
    behavior: SubmitBehavior,
    captured: Mutex<Option<ScoringPayload>>,
}

impl StubSubmitter {
    fn new(behavior: SubmitBehavior) -> Self {
        Self {
            behavior,
            captured: Mutex::new(None),
        }
    }

    fn captured_payload(&self) -> Option<ScoringPayload> {
        self.captured.lock().unwrap().clone()
    }

    fn was_called(&self) -> bool {
        self.captured.lock().unwrap().is_some()
    }
}

#[async_trait]
impl ScoreSubmitter for &StubSubmitter {
    async fn submit(&self, payload: &ScoringPayload) -> Result<ScoreOutcome, ApiError> {
        *self.captured.lock().unwrap() = Some(payload.clone());

        match &self.behavior {
            SubmitBehavior::Succeed(score, rating) => Ok(ScoreOutcome {
                credit_score: *score,
                credit_rating: rating.to_string(),
            }),
            SubmitBehavior::HttpFailure => Err(ApiError::ExternalServiceError(
                "Scoring service returned HTTP 500".to_string(),
            )),
            SubmitBehavior::Rejected(message) => {
                Err(ApiError::ScoringRejected(message.to_string()))
            }
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn borrower() -> Borrower {
    Borrower {
        id: Uuid::new_v4(),
        first_name: "Chinedu".to_string(),
        last_name: "Okafor".to_string(),
        email: Some("chinedu@example.com".to_string()),
        phone: None,
        age: Some(41),
        gender: Some("male".to_string()),
        education_level: None,
        marital_status: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn farm(borrower_id: Uuid) -> Farm {
    Farm {
        id: Uuid::new_v4(),
        borrower_id,
        size_hectares: Some(2.5),
        started_on: None,
        harvest_count: Some(4),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn application(borrower_id: Uuid, farm_id: Uuid) -> LoanApplication {
    LoanApplication {
        id: Uuid::new_v4(),
        borrower_id,
        farm_id,
        requested_amount: 150_000.0,
        existing_loan_amount: Some(20_000.0),
        existing_loan_duration_days: Some(60),
        status: ApplicationStatus::Approved,
        interest_rate: Some(12.0),
        duration_days: Some(180),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn transaction(borrower_id: Uuid, data: serde_json::Value) -> TransactionHistory {
    TransactionHistory {
        id: Uuid::new_v4(),
        borrower_id,
        transaction_type: Some("repayment".to_string()),
        transaction_data: Some(data),
        created_at: Utc::now(),
    }
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_success_persists_exactly_one_record_with_returned_score() {
    let b = borrower();
    let borrower_id = b.id;
    let store = InMemoryScoringStore::with_borrower(b);
    let submitter = StubSubmitter::new(SubmitBehavior::Succeed(712.0, "Good"));

    let service = ScoringService::new(&store, &submitter);
    let outcome = service.calculate_credit_score(borrower_id).await.unwrap();

    assert_eq!(outcome.credit_score, 712.0);
    assert_eq!(outcome.credit_rating, "Good");
    assert_eq!(store.persisted(), vec![(borrower_id, 712.0)]);
}

#[tokio::test]
async fn test_http_failure_persists_nothing() {
    let b = borrower();
    let borrower_id = b.id;
    let store = InMemoryScoringStore::with_borrower(b);
    let submitter = StubSubmitter::new(SubmitBehavior::HttpFailure);

    let service = ScoringService::new(&store, &submitter);
    let err = service.calculate_credit_score(borrower_id).await.unwrap_err();

    assert_eq!(err.error_code(), "EXTERNAL_SERVICE_ERROR");
    assert!(store.persisted().is_empty());
}

#[tokio::test]
async fn test_application_level_rejection_persists_nothing() {
    let b = borrower();
    let borrower_id = b.id;
    let store = InMemoryScoringStore::with_borrower(b);
    let submitter = StubSubmitter::new(SubmitBehavior::Rejected("Insufficient data"));

    let service = ScoringService::new(&store, &submitter);
    let err = service.calculate_credit_score(borrower_id).await.unwrap_err();

    assert_eq!(err.error_code(), "SCORING_REJECTED");
    assert!(err.to_string().contains("Insufficient data"));
    assert!(store.persisted().is_empty());
}

#[tokio::test]
async fn test_missing_borrower_is_fatal_and_never_submits() {
    let store = InMemoryScoringStore::default();
    let submitter = StubSubmitter::new(SubmitBehavior::Succeed(700.0, "Good"));

    let service = ScoringService::new(&store, &submitter);
    let err = service.calculate_credit_score(Uuid::new_v4()).await.unwrap_err();

    assert_eq!(err.error_code(), "NOT_FOUND");
    assert!(!submitter.was_called());
    assert!(store.persisted().is_empty());
}

#[tokio::test]
async fn test_secondary_fetch_failures_degrade_to_empty_datasets() {
    let b = borrower();
    let borrower_id = b.id;
    let mut store = InMemoryScoringStore::with_borrower(b);
    store.addresses.push(Address {
        id: Uuid::new_v4(),
        borrower_id,
        street: Some("12 Ring Road".to_string()),
        city: Some("Ibadan".to_string()),
        state: Some("Oyo".to_string()),
        country: Some("Nigeria".to_string()),
        created_at: Utc::now(),
    });
    store.failing_datasets = vec!["addresses", "farms", "transactions"];
    let submitter = StubSubmitter::new(SubmitBehavior::Succeed(640.0, "Fair"));

    let service = ScoringService::new(&store, &submitter);
    let outcome = service.calculate_credit_score(borrower_id).await.unwrap();

    // Degraded datasets arrive empty; the submission still happens
    assert_eq!(outcome.credit_score, 640.0);
    let payload = submitter.captured_payload().unwrap();
    assert!(payload.address_data.is_empty());
    assert!(payload.farm_data.is_empty());
    assert!(payload.transaction_data.is_empty());
    assert_eq!(store.persisted(), vec![(borrower_id, 640.0)]);
}

#[tokio::test]
async fn test_dependent_fetches_follow_the_identifier_chain() {
    let b = borrower();
    let borrower_id = b.id;
    let mut store = InMemoryScoringStore::with_borrower(b);

    let f = farm(borrower_id);
    let app = application(borrower_id, f.id);
    let contract = LoanContract {
        id: Uuid::new_v4(),
        application_id: app.id,
        principal: 150_000.0,
        interest_rate: Some(12.0),
        duration_days: Some(180),
        status: ContractStatus::Active,
        disbursed_at: Some(Utc::now()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let installment = RepaymentInstallment {
        id: Uuid::new_v4(),
        contract_id: contract.id,
        due_date: Utc::now().date_naive(),
        amount: 28_000.0,
        paid_at: Some(Utc::now()),
        fine: None,
        created_at: Utc::now(),
    };

    store.production.push(ProductionRecord {
        id: Uuid::new_v4(),
        farm_id: f.id,
        crop_type: Some("cassava".to_string()),
        expected_yield_kg: Some(1200.0),
        expected_profit: Some(300_000.0),
        created_at: Utc::now(),
    });
    store.farms.push(f);
    store.contracts.push(contract);
    store.repayments.push(installment);
    store.applications.push(app);

    let submitter = StubSubmitter::new(SubmitBehavior::Succeed(701.0, "Good"));
    let service = ScoringService::new(&store, &submitter);
    service.calculate_credit_score(borrower_id).await.unwrap();

    let payload = submitter.captured_payload().unwrap();
    assert_eq!(payload.farm_data.len(), 1);
    assert_eq!(payload.production_data.len(), 1);
    assert_eq!(payload.loan_data.len(), 1);
    assert_eq!(payload.loan_contract_data.len(), 1);
    assert_eq!(payload.repayment_data.len(), 1);
    assert_eq!(
        payload.loan_contract_data[0].application_id,
        payload.loan_data[0].application_id
    );
    assert_eq!(
        payload.repayment_data[0].contract_id,
        payload.loan_contract_data[0].contract_id
    );
}

#[tokio::test]
async fn test_transaction_data_is_narrowed_before_transmission() {
    let b = borrower();
    let borrower_id = b.id;
    let mut store = InMemoryScoringStore::with_borrower(b);
    store.transactions.push(transaction(
        borrower_id,
        json!({"amount": 500, "note": "hi", "total_amount": "bad"}),
    ));

    let submitter = StubSubmitter::new(SubmitBehavior::Succeed(655.0, "Fair"));
    let service = ScoringService::new(&store, &submitter);
    service.calculate_credit_score(borrower_id).await.unwrap();

    let payload = submitter.captured_payload().unwrap();
    assert_eq!(payload.transaction_data.len(), 1);
    let narrowed = &payload.transaction_data[0];
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed["amount"], json!(500));
}

#[tokio::test]
async fn test_latest_credit_score_reads_most_recent_record() {
    let b = borrower();
    let borrower_id = b.id;
    let store = InMemoryScoringStore::with_borrower(b);
    let submitter = StubSubmitter::new(SubmitBehavior::Succeed(690.0, "Good"));

    let service = ScoringService::new(&store, &submitter);
    assert!(service.latest_credit_score(borrower_id).await.unwrap().is_none());

    service.calculate_credit_score(borrower_id).await.unwrap();

    let latest = service.latest_credit_score(borrower_id).await.unwrap().unwrap();
    assert_eq!(latest.score, 690.0);
    assert_eq!(latest.borrower_id, borrower_id);
}
