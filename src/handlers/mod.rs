//! API handlers for the FarmCredit backend

pub mod loans;
pub mod scoring;
