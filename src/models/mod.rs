//! Data models for the FarmCredit backend

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Borrower model (a farmer seeking a loan)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Borrower {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub education_level: Option<String>,
    pub marital_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Borrower address
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Address {
    pub id: Uuid,
    pub borrower_id: Uuid,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Next of kin contact for a borrower
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct NextOfKin {
    pub id: Uuid,
    pub borrower_id: Uuid,
    pub full_name: String,
    pub relationship: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Farm model, owned by exactly one borrower
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Farm {
    pub id: Uuid,
    pub borrower_id: Uuid,
    pub size_hectares: Option<f64>,
    pub started_on: Option<NaiveDate>,
    pub harvest_count: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Expected yield and profit for a crop on a farm
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ProductionRecord {
    pub id: Uuid,
    pub farm_id: Uuid,
    pub crop_type: Option<String>,
    pub expected_yield_kg: Option<f64>,
    pub expected_profit: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Loan application status
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

/// Loan application model (a request for funds, prior to disbursement)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct LoanApplication {
    pub id: Uuid,
    pub borrower_id: Uuid,
    pub farm_id: Uuid,
    pub requested_amount: f64,
    /// Snapshot of outstanding debt computed at submission time
    pub existing_loan_amount: Option<f64>,
    pub existing_loan_duration_days: Option<i32>,
    pub status: ApplicationStatus,
    pub interest_rate: Option<f64>,
    pub duration_days: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Loan contract status
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "contract_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Active,
    Completed,
    Defaulted,
}

/// Loan contract model (a disbursed obligation tied to one approved application)
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct LoanContract {
    pub id: Uuid,
    pub application_id: Uuid,
    pub principal: f64,
    /// Flat one-time interest charge as a percentage of principal
    pub interest_rate: Option<f64>,
    pub duration_days: Option<i32>,
    pub status: ContractStatus,
    pub disbursed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One scheduled/paid repayment unit against a contract
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct RepaymentInstallment {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub due_date: NaiveDate,
    pub amount: f64,
    /// Null until the installment is actually paid
    pub paid_at: Option<DateTime<Utc>>,
    pub fine: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Append-only credit score record; the most recent row is the current score
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct CreditScoreRecord {
    pub id: Uuid,
    pub borrower_id: Uuid,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// Transaction history entry with free-form transaction data
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct TransactionHistory {
    pub id: Uuid,
    pub borrower_id: Uuid,
    pub transaction_type: Option<String>,
    pub transaction_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// API response wrapper, the success half of the discriminated result
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Build a successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}
