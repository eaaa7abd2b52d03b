//! Route definitions for the FarmCredit API

mod loans;
mod scoring;

pub use loans::loan_routes;
pub use scoring::scoring_routes;
