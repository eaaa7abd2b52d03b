//! HTTP client for the external credit scoring service

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ApiError;

use super::payload::ScoringPayload;

/// Score and qualitative rating returned by the scoring service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub credit_score: f64,
    pub credit_rating: String,
}

/// Raw response body of the scoring service
#[derive(Debug, Deserialize)]
pub struct ScoringApiResponse {
    #[serde(rename = "responseCode")]
    pub response_code: i32,
    #[serde(rename = "responseMessage", default)]
    pub response_message: Option<String>,
    #[serde(default)]
    pub data: Option<ScoringApiData>,
}

/// Score payload inside a successful response
#[derive(Debug, Deserialize)]
pub struct ScoringApiData {
    pub credit_score: f64,
    pub credit_rating: String,
}

/// Submission interface for the scoring pipeline, passed explicitly so the
/// pipeline can be exercised without network access
#[async_trait]
pub trait ScoreSubmitter: Send + Sync {
    async fn submit(&self, payload: &ScoringPayload) -> Result<ScoreOutcome, ApiError>;
}

/// reqwest-backed scoring client
#[derive(Clone)]
pub struct ScoringClient {
    http: reqwest::Client,
    url: String,
}

impl ScoringClient {
    /// Create a new client for the given endpoint
    pub fn new(url: String, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }
}

#[async_trait]
impl ScoreSubmitter for ScoringClient {
    async fn submit(&self, payload: &ScoringPayload) -> Result<ScoreOutcome, ApiError> {
        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::ExternalServiceError(format!(
                "Scoring service returned HTTP {}",
                status
            )));
        }

        let body: ScoringApiResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ExternalServiceError(format!("Invalid scoring response: {}", e)))?;

        interpret_response(body)
    }
}

/// Interpret the application-level response. Anything other than
/// `responseCode == 200` with a score payload is a failure; the service's
/// message is carried back to the caller.
pub fn interpret_response(body: ScoringApiResponse) -> Result<ScoreOutcome, ApiError> {
    if body.response_code != 200 {
        let message = body
            .response_message
            .unwrap_or_else(|| format!("Scoring service responded with code {}", body.response_code));
        return Err(ApiError::ScoringRejected(message));
    }

    let data = body.data.ok_or_else(|| {
        ApiError::ExternalServiceError("Scoring response missing score data".to_string())
    })?;

    Ok(ScoreOutcome {
        credit_score: data.credit_score,
        credit_rating: data.credit_rating,
    })
}
