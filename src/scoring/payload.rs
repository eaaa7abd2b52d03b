//! Normalized credit score payload
//!
//! The scoring service expects a fixed-shape JSON document. Every optional
//! field is normalized here with explicit defaults: absent numbers become 0,
//! absent strings become empty, absent dates become the current time.
//! Free-form transaction data is narrowed to a numeric whitelist before
//! transmission.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::models::{
    Address, Borrower, Farm, LoanApplication, LoanContract, NextOfKin, ProductionRecord,
    RepaymentInstallment, TransactionHistory,
};

/// Only these numeric sub-fields of `transaction_data` are transmitted.
/// Non-numeric values and any other fields are dropped, never coerced.
const TRANSACTION_NUMERIC_FIELDS: [&str; 3] = ["amount", "total_amount", "penalty"];

/// The full payload submitted to the scoring service
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoringPayload {
    pub farmer_data: FarmerData,
    pub address_data: Vec<AddressData>,
    pub next_of_kin_data: Vec<NextOfKinData>,
    pub farm_data: Vec<FarmData>,
    pub production_data: Vec<ProductionData>,
    pub loan_data: Vec<LoanData>,
    pub loan_contract_data: Vec<LoanContractData>,
    pub repayment_data: Vec<RepaymentData>,
    pub transaction_data: Vec<Map<String, Value>>,
}

/// Normalized borrower record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FarmerData {
    pub farmer_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub age: i64,
    pub gender: String,
    pub education_level: String,
    pub marital_status: String,
    pub registered_at: DateTime<Utc>,
}

/// Normalized address record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AddressData {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

/// Normalized next-of-kin record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NextOfKinData {
    pub full_name: String,
    pub relationship: String,
    pub phone: String,
}

/// Normalized farm record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FarmData {
    pub farm_id: Uuid,
    pub size_hectares: f64,
    pub started_on: NaiveDate,
    pub harvest_count: i64,
}

/// Normalized production record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProductionData {
    pub farm_id: Uuid,
    pub crop_type: String,
    pub expected_yield_kg: f64,
    pub expected_profit: f64,
}

/// Normalized loan application record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoanData {
    pub application_id: Uuid,
    pub requested_amount: f64,
    pub existing_loan_amount: f64,
    pub existing_loan_duration_days: i64,
    pub status: String,
    pub interest_rate: f64,
    pub duration_days: i64,
}

/// Normalized loan contract record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoanContractData {
    pub contract_id: Uuid,
    pub application_id: Uuid,
    pub principal: f64,
    pub interest_rate: f64,
    pub duration_days: i64,
    pub status: String,
    pub disbursed_at: DateTime<Utc>,
}

/// Normalized repayment installment record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RepaymentData {
    pub contract_id: Uuid,
    pub due_date: NaiveDate,
    pub amount: f64,
    pub paid: bool,
    pub paid_at: DateTime<Utc>,
    pub fine: f64,
}

impl ScoringPayload {
    /// Assemble the normalized payload from raw records
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        borrower: &Borrower,
        addresses: &[Address],
        next_of_kin: &[NextOfKin],
        farms: &[Farm],
        production: &[ProductionRecord],
        applications: &[LoanApplication],
        contracts: &[LoanContract],
        repayments: &[RepaymentInstallment],
        transactions: &[TransactionHistory],
    ) -> Self {
        let now = Utc::now();

        Self {
            farmer_data: FarmerData {
                farmer_id: borrower.id,
                first_name: borrower.first_name.clone(),
                last_name: borrower.last_name.clone(),
                email: borrower.email.clone().unwrap_or_default(),
                phone: borrower.phone.clone().unwrap_or_default(),
                age: borrower.age.unwrap_or(0) as i64,
                gender: borrower.gender.clone().unwrap_or_default(),
                education_level: borrower.education_level.clone().unwrap_or_default(),
                marital_status: borrower.marital_status.clone().unwrap_or_default(),
                registered_at: borrower.created_at,
            },
            address_data: addresses
                .iter()
                .map(|a| AddressData {
                    street: a.street.clone().unwrap_or_default(),
                    city: a.city.clone().unwrap_or_default(),
                    state: a.state.clone().unwrap_or_default(),
                    country: a.country.clone().unwrap_or_default(),
                })
                .collect(),
            next_of_kin_data: next_of_kin
                .iter()
                .map(|k| NextOfKinData {
                    full_name: k.full_name.clone(),
                    relationship: k.relationship.clone().unwrap_or_default(),
                    phone: k.phone.clone().unwrap_or_default(),
                })
                .collect(),
            farm_data: farms
                .iter()
                .map(|f| FarmData {
                    farm_id: f.id,
                    size_hectares: f.size_hectares.unwrap_or(0.0),
                    started_on: f.started_on.unwrap_or_else(|| now.date_naive()),
                    harvest_count: f.harvest_count.unwrap_or(0) as i64,
                })
                .collect(),
            production_data: production
                .iter()
                .map(|p| ProductionData {
                    farm_id: p.farm_id,
                    crop_type: p.crop_type.clone().unwrap_or_default(),
                    expected_yield_kg: p.expected_yield_kg.unwrap_or(0.0),
                    expected_profit: p.expected_profit.unwrap_or(0.0),
                })
                .collect(),
            loan_data: applications
                .iter()
                .map(|a| LoanData {
                    application_id: a.id,
                    requested_amount: a.requested_amount,
                    existing_loan_amount: a.existing_loan_amount.unwrap_or(0.0),
                    existing_loan_duration_days: a.existing_loan_duration_days.unwrap_or(0) as i64,
                    status: format!("{:?}", a.status).to_lowercase(),
                    interest_rate: a.interest_rate.unwrap_or(0.0),
                    duration_days: a.duration_days.unwrap_or(0) as i64,
                })
                .collect(),
            loan_contract_data: contracts
                .iter()
                .map(|c| LoanContractData {
                    contract_id: c.id,
                    application_id: c.application_id,
                    principal: c.principal,
                    interest_rate: c.interest_rate.unwrap_or(0.0),
                    duration_days: c.duration_days.unwrap_or(0) as i64,
                    status: format!("{:?}", c.status).to_lowercase(),
                    disbursed_at: c.disbursed_at.unwrap_or(now),
                })
                .collect(),
            repayment_data: repayments
                .iter()
                .map(|r| RepaymentData {
                    contract_id: r.contract_id,
                    due_date: r.due_date,
                    amount: r.amount,
                    paid: r.paid_at.is_some(),
                    paid_at: r.paid_at.unwrap_or(now),
                    fine: r.fine.unwrap_or(0.0),
                })
                .collect(),
            transaction_data: transactions
                .iter()
                .map(|t| narrow_transaction_data(t.transaction_data.as_ref()))
                .collect(),
        }
    }
}

/// Narrow free-form transaction data to the whitelisted numeric fields
pub fn narrow_transaction_data(data: Option<&Value>) -> Map<String, Value> {
    let mut narrowed = Map::new();

    if let Some(Value::Object(fields)) = data {
        for key in TRANSACTION_NUMERIC_FIELDS {
            if let Some(value) = fields.get(key) {
                if value.is_number() {
                    narrowed.insert(key.to_string(), value.clone());
                }
            }
        }
    }

    narrowed
}
