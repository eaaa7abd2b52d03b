//! Credit scoring pipeline
//!
//! Builds the normalized cross-entity payload for a borrower, submits it to
//! the external scoring service, and persists the returned score.

pub mod client;
pub mod payload;
pub mod service;
pub mod store;

pub use client::{ScoreOutcome, ScoreSubmitter, ScoringClient};
pub use payload::ScoringPayload;
pub use service::ScoringService;
pub use store::{PgScoringStore, ScoringStore};
