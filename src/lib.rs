//! FarmCredit Backend Library
//!
//! This library exports the core modules for the FarmCredit backend server:
//! loan financial aggregation and the credit scoring pipeline, plus the
//! supporting configuration, persistence, and HTTP plumbing.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod loans;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod state;
